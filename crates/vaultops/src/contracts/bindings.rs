//! ABI bindings for the external contracts

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    #[sol(rpc)]
    interface IVault {
        function name() external view returns (string);
        function apiVersion() external view returns (string);
        function governance() external view returns (address);
        function rewards() external view returns (address);
        function deposit(uint256 amount) external returns (uint256);
        function withdraw() external returns (uint256);
        function totalAssets() external view returns (uint256);
        function totalDebt() external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function pricePerShare() external view returns (uint256);
        function revokeStrategy(address strategy) external;
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }

    /// `strategies(address)` layout for vault API versions before 0.3.2
    #[sol(rpc)]
    interface IVaultRateLimited {
        function strategies(address strategy) external view returns (
            uint256 performanceFee,
            uint256 activation,
            uint256 debtRatio,
            uint256 rateLimit,
            uint256 lastReport,
            uint256 totalDebt,
            uint256 totalGain,
            uint256 totalLoss
        );
    }

    /// `strategies(address)` layout from vault API version 0.3.2 on
    #[sol(rpc)]
    interface IVaultDebtLimited {
        function strategies(address strategy) external view returns (
            uint256 performanceFee,
            uint256 activation,
            uint256 debtRatio,
            uint256 minDebtPerHarvest,
            uint256 maxDebtPerHarvest,
            uint256 lastReport,
            uint256 totalDebt,
            uint256 totalGain,
            uint256 totalLoss
        );
    }

    #[sol(rpc)]
    interface IStrategy {
        function name() external view returns (string);
        function want() external view returns (address);
        function strategist() external view returns (address);
        function gauge() external view returns (address);
        function harvest() external;
        function tend() external;
        function harvestTrigger(uint256 callCost) external view returns (bool);
        function tendTrigger(uint256 callCost) external view returns (bool);
        function setEmergencyExit() external;
        function emergencyExit() external view returns (bool);
        function estimatedTotalAssets() external view returns (uint256);
        function balanceOfPool() external view returns (uint256);
    }

    #[sol(rpc)]
    interface IGauge {
        function balanceOf(address account) external view returns (uint256);
    }

    #[sol(rpc)]
    interface IVoter {
        function governance() external view returns (address);
        function setGovernance(address governance) external;
    }

    #[sol(rpc)]
    interface IController {
        function strategies(address token) external view returns (address);
    }

    #[sol(rpc)]
    interface IGaugeCleaner {
        function clear(address token) external;
        function setVoterGovernance() external;
    }
}
