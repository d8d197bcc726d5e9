use crate::errors::AppError;
use crate::models::{ObjectId, PaymentRequest};
use crate::services::tx::types::{DEFAULT_GAS_BUFFER, DEFAULT_SIMULATION_BUDGET_CAP, TxOptions};
use crate::utils::is_valid_move_identifier;
use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub payment: PaymentConfig,
    pub signer: SignerConfig,
    #[serde(default)]
    pub gas: GasConfig,
}

/// 预置的链环境
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub name: Network,
    /// 覆盖默认全节点地址（自建节点/第三方 RPC）
    #[serde(default)]
    pub rpc_url: Option<String>,
}

impl NetworkConfig {
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.name.default_rpc_url())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContractConfig {
    pub package_id: String,
    pub treasury_id: String,
    #[serde(default = "default_module")]
    pub module: String,
    #[serde(default = "default_function")]
    pub function: String,
}

fn default_module() -> String {
    "payment".to_string()
}

fn default_function() -> String {
    "process_payment".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    /// 单位 MIST
    pub amount: u64,
    pub payment_id: String,
    #[serde(default)]
    pub metadata: String,
}

#[derive(Deserialize, Clone)]
pub struct SignerConfig {
    pub secret: String,
}

// 私钥不进日志
impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GasConfig {
    #[serde(default = "default_gas_buffer")]
    pub buffer: u64,
    #[serde(default = "default_simulation_budget_cap")]
    pub simulation_budget_cap: u64,
}

fn default_gas_buffer() -> u64 {
    DEFAULT_GAS_BUFFER
}

fn default_simulation_budget_cap() -> u64 {
    DEFAULT_SIMULATION_BUDGET_CAP
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_GAS_BUFFER,
            simulation_budget_cap: DEFAULT_SIMULATION_BUDGET_CAP,
        }
    }
}

impl From<&GasConfig> for TxOptions {
    fn from(gas: &GasConfig) -> Self {
        TxOptions {
            gas_buffer: gas.buffer,
            simulation_budget_cap: gas.simulation_budget_cap,
        }
    }
}

// 环境变量一律保持字符串，数值字段在反序列化时再转换；
// payment_id / metadata / secret 不能被当成数字改写（如 000042 -> 42）
fn env_source() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("__")
        .separator("__")
}

impl Config {
    /// 加载顺序：.env -> config/default -> config/{APP_ENVIRONMENT} -> APP__ 前缀环境变量
    ///
    /// 例：APP__SIGNER__SECRET、APP__PAYMENT__AMOUNT=20000000
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.package_id()?;
        self.treasury_id()?;
        for ident in [&self.contract.module, &self.contract.function] {
            if !is_valid_move_identifier(ident) {
                return Err(AppError::Config(format!("无效的 Move 标识符: {}", ident)));
            }
        }
        if self.payment.amount == 0 {
            return Err(AppError::Config("payment.amount 必须大于 0".to_string()));
        }
        if self.payment.payment_id.is_empty() {
            return Err(AppError::Config("payment.payment_id 不能为空".to_string()));
        }
        if self.signer.secret.trim().is_empty() {
            return Err(AppError::Config(
                "signer.secret 未配置（可通过 APP__SIGNER__SECRET 提供）".to_string(),
            ));
        }
        Ok(())
    }

    pub fn package_id(&self) -> Result<ObjectId, AppError> {
        self.contract.package_id.parse()
    }

    pub fn treasury_id(&self) -> Result<ObjectId, AppError> {
        self.contract.treasury_id.parse()
    }

    pub fn payment_request(&self) -> Result<PaymentRequest, AppError> {
        Ok(PaymentRequest::new(
            self.treasury_id()?,
            self.payment.amount,
            self.payment.payment_id.clone(),
            self.payment.metadata.clone(),
        ))
    }
}
