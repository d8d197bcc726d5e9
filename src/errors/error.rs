use crate::models::SuiAddress;
use crate::utils::is_insufficient_gas;
use config::ConfigError;
use ethers_providers::ProviderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// 发送方名下没有任何可用 coin，连 gas 都无法支付
    #[error("地址 {address} 名下没有可用的 SUI coin")]
    NoFunds { address: SuiAddress },

    /// dry run 返回非 success，原样携带链上错误信息
    #[error("交易模拟失败: {0}")]
    SimulationFailed(String),

    /// 正式广播失败（网络/节点校验）
    #[error("交易提交失败: {0}")]
    Submission(String),

    #[error("gas 余额不足: 请为地址 {address} 充值足够覆盖 gas 与支付金额的 SUI ({message})")]
    InsufficientGas { address: SuiAddress, message: String },

    #[error("配置错误: {0}")]
    Config(String),

    #[error("无效的provider: {0}")]
    ProviderError(String),

    #[error("无效的地址: {0}")]
    InvalidAddress(String),

    #[error("无效的对象ID: {0}")]
    InvalidObjectId(String),

    #[error("无效的对象摘要: {0}")]
    InvalidDigest(String),

    #[error("无效的私钥: {0}")]
    InvalidSecret(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("解析错误: {0}")]
    ParserError(String),

    #[error("无效的数字: {0}")]
    InvalidNumber(String),

    /// 内部不可预期错误（兜底）
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    /// 将广播阶段的错误细分：余额不足单独提示，其余保持原样
    pub fn classify_submission(self, address: SuiAddress) -> Self {
        match self {
            AppError::Submission(message) if is_insufficient_gas(&message) => {
                AppError::InsufficientGas { address, message }
            }
            other => other,
        }
    }

    /// 交易是否已经到达过链上（决定调用方能否整体重跑）
    pub fn is_pre_commit(&self) -> bool {
        !matches!(self, AppError::Submission(_) | AppError::InsufficientGas { .. })
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidNumber(err.to_string())
    }
}
