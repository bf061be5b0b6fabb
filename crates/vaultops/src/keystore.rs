//! Interactive selection of an operator account from a keystore directory

use crate::error::{Error, Result};
use alloy::signers::local::PrivateKeySigner;
use std::io::{BufRead, Write};
use std::path::Path;

/// Environment variable holding the keystore password
pub const PASSWORD_ENV: &str = "VAULTOPS_KEYSTORE_PASSWORD";

/// Account names available in `dir`: the stems of its `*.json` files, sorted
pub fn list_accounts(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Prompt until the answer is one of `choices`.
///
/// An empty answer or end of input aborts with [`Error::NoAccountSelected`].
pub fn select_account<R: BufRead, W: Write>(
    choices: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<String> {
    if choices.is_empty() {
        log::error!("No keystore accounts available");
        return Err(Error::NoAccountSelected);
    }

    let listed = choices.join(", ");
    loop {
        write!(output, "Account ({listed}): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::NoAccountSelected);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Err(Error::NoAccountSelected);
        }
        if choices.iter().any(|c| c == answer) {
            return Ok(answer.to_string());
        }

        let quoted: Vec<String> = choices.iter().map(|c| format!("'{c}'")).collect();
        writeln!(output, "Error: '{answer}' is not one of {}.", quoted.join(", "))?;
    }
}

/// Password from [`PASSWORD_ENV`], otherwise one line of input
pub fn read_password<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }

    write!(output, "Enter password: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Decrypt `<dir>/<name>.json`
pub fn load_signer(dir: &Path, name: &str, password: &str) -> Result<PrivateKeySigner> {
    let path = dir.join(format!("{name}.json"));
    let signer = PrivateKeySigner::decrypt_keystore(&path, password)?;
    log::info!("Loaded account {} ({})", name, signer.address());
    Ok(signer)
}
