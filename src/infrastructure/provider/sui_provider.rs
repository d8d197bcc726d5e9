use crate::config::NetworkConfig;
use crate::errors::AppError;
use crate::log_info;
use crate::models::rpc::{CoinPage, DryRunResponse, ExecuteResponse, ObjectResponse};
use crate::models::{ObjectId, SuiAddress};
use crate::services::tx::types::SignedTransaction;
use crate::utils::json_to_u64;
use async_trait::async_trait;
use ethers_providers::{Http, Provider, ProviderError, RpcError};
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

/// 本地执行完成后才返回，保证响应里带完整 effects / events
const EXECUTE_REQUEST_TYPE: &str = "WaitForLocalExecution";

/// 账本服务（Sui 全节点 JSON-RPC）的抽象，服务层只依赖此 trait
#[async_trait]
pub trait ProviderTrait: Send + Sync {
    async fn get_coins(
        &self,
        owner: &SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, AppError>;
    async fn get_reference_gas_price(&self) -> Result<u64, AppError>;
    async fn get_object(&self, id: &ObjectId) -> Result<ObjectResponse, AppError>;
    /// 非提交式模拟执行；节点直接拒绝（JSON-RPC 错误）时返回 SimulationFailed
    async fn dry_run(&self, tx_bytes: &str) -> Result<DryRunResponse, AppError>;
    /// 正式执行，要求响应包含 effects 与 events
    async fn execute_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<ExecuteResponse, AppError>;
}

pub struct SuiProvider {
    provider: Arc<Provider<Http>>,
}

impl SuiProvider {
    pub fn new(config: &NetworkConfig) -> Result<Self, AppError> {
        let rpc_url = config.rpc_url();
        let url = Url::parse(rpc_url)
            .map_err(|e| AppError::Config(format!("无效的 RPC URL {}: {}", rpc_url, e)))?;
        log_info!("初始化 Sui RPC Provider: network={:?}, url={}", config.name, url);
        Ok(Self {
            provider: Arc::new(Provider::new(Http::new(url))),
        })
    }
}

/// 取出节点返回的 JSON-RPC 错误信息；网络层错误返回 None
fn rpc_error_message(err: &ProviderError) -> Option<String> {
    match err {
        ProviderError::JsonRpcClientError(inner) => inner
            .as_error_response()
            .map(|resp| resp.message.clone()),
        _ => None,
    }
}

// 节点明确拒绝（JSON-RPC error）即模拟失败；网络层错误仍归为 provider 错误
fn dry_run_error(err: ProviderError) -> AppError {
    match rpc_error_message(&err) {
        Some(message) => AppError::SimulationFailed(message),
        None => AppError::ProviderError(format!("dry run 请求失败: {}", err)),
    }
}

fn submission_error(err: ProviderError) -> AppError {
    AppError::Submission(rpc_error_message(&err).unwrap_or_else(|| err.to_string()))
}

#[async_trait]
impl ProviderTrait for SuiProvider {
    async fn get_coins(
        &self,
        owner: &SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, AppError> {
        self.provider
            .request::<_, CoinPage>(
                "suix_getCoins",
                (owner.to_string(), coin_type, cursor, Option::<u32>::None),
            )
            .await
            .map_err(AppError::from)
    }

    async fn get_reference_gas_price(&self) -> Result<u64, AppError> {
        let value: Value = self
            .provider
            .request("suix_getReferenceGasPrice", Vec::<Value>::new())
            .await?;
        json_to_u64(&value)
            .ok_or_else(|| AppError::ParserError(format!("无法解析参考 gas 价格: {}", value)))
    }

    async fn get_object(&self, id: &ObjectId) -> Result<ObjectResponse, AppError> {
        self.provider
            .request::<_, ObjectResponse>(
                "sui_getObject",
                (id.to_string(), json!({ "showOwner": true })),
            )
            .await
            .map_err(AppError::from)
    }

    async fn dry_run(&self, tx_bytes: &str) -> Result<DryRunResponse, AppError> {
        self.provider
            .request::<_, DryRunResponse>("sui_dryRunTransactionBlock", [tx_bytes])
            .await
            .map_err(dry_run_error)
    }

    async fn execute_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<ExecuteResponse, AppError> {
        self.provider
            .request::<_, ExecuteResponse>(
                "sui_executeTransactionBlock",
                (
                    &signed.tx_bytes,
                    &signed.signatures,
                    json!({ "showEffects": true, "showEvents": true }),
                    EXECUTE_REQUEST_TYPE,
                ),
            )
            .await
            .map_err(submission_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_providers::{HttpClientError, JsonRpcError};

    fn rejected(message: &str) -> ProviderError {
        ProviderError::from(HttpClientError::JsonRpcError(JsonRpcError {
            code: -32002,
            message: message.to_string(),
            data: None,
        }))
    }

    fn transport_failure() -> ProviderError {
        let err = serde_json::from_str::<Value>("<html>bad gateway</html>").unwrap_err();
        ProviderError::from(HttpClientError::SerdeJson {
            err,
            text: "<html>bad gateway</html>".to_string(),
        })
    }

    #[test]
    fn rejected_dry_run_is_simulation_failure() {
        let msg = "Error checking transaction input objects: GasBalanceTooLow";
        match dry_run_error(rejected(msg)) {
            AppError::SimulationFailed(m) => assert_eq!(m, msg),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn dry_run_transport_error_is_provider_error() {
        assert!(matches!(
            dry_run_error(transport_failure()),
            AppError::ProviderError(_)
        ));
        assert!(matches!(
            dry_run_error(ProviderError::CustomError("timeout".to_string())),
            AppError::ProviderError(_)
        ));
    }

    #[test]
    fn submission_keeps_node_message_verbatim() {
        match submission_error(rejected("InsufficientCoinBalance")) {
            AppError::Submission(m) => assert_eq!(m, "InsufficientCoinBalance"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            submission_error(transport_failure()),
            AppError::Submission(_)
        ));
    }

    #[test]
    fn network_name_selects_default_url() {
        let provider = SuiProvider::new(&NetworkConfig {
            name: crate::config::Network::Localnet,
            rpc_url: None,
        });
        assert!(provider.is_ok());
        let bad = SuiProvider::new(&NetworkConfig {
            name: crate::config::Network::Testnet,
            rpc_url: Some("not a url".to_string()),
        });
        assert!(matches!(bad, Err(AppError::Config(_))));
    }
}
