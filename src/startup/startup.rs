use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::infrastructure::parser::EventParser;
use crate::infrastructure::provider::{ProviderTrait, SuiProvider};
use crate::models::{PaymentOutcome, PaymentRequest};
use crate::services::PaymentService;
use crate::services::tx::builder::{MoveTarget, PaymentTxBuilder};
use crate::services::tx::coin::CoinService;
use crate::services::tx::gas::GasService;
use crate::services::tx::signer::{LocalSigner, TxSigner};
use crate::services::tx::types::TxOptions;
use crate::utils::format_mist;
use crate::{log_error, log_info, log_warn};

/// 应用程序启动与管理结构体（单次支付，执行完即退出）
pub struct Application {
    pub payment_service: Arc<PaymentService>,
    pub request: PaymentRequest,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl Application {
    /// 构建应用实例（初始化 RPC、签名器与各子服务，不发起任何链上请求）
    pub async fn build(config: Config) -> Result<Self> {
        let provider = Arc::new(SuiProvider::new(&config.network)?) as Arc<dyn ProviderTrait>;
        Self::build_with_provider(config, provider)
    }

    pub fn build_with_provider(config: Config, provider: Arc<dyn ProviderTrait>) -> Result<Self> {
        let signer = Arc::new(LocalSigner::from_secret(&config.signer.secret)?);
        log_info!("签名地址: {}", signer.address());

        let package = config.package_id()?;
        let target = MoveTarget::new(
            package,
            config.contract.module.clone(),
            config.contract.function.clone(),
        )?;
        log_info!("合约入口: {}", target);

        let event_parser = Arc::new(EventParser::for_package(package, &config.contract.module));
        let gas_svc = Arc::new(GasService::new(TxOptions::from(&config.gas)));

        let payment_service = Arc::new(PaymentService::new(
            signer,
            Arc::new(CoinService::default()),
            gas_svc,
            Arc::new(PaymentTxBuilder::new(target)),
            event_parser,
            provider,
        ));
        let request = config.payment_request()?;
        Ok(Self {
            payment_service,
            request,
        })
    }

    /// 执行一次支付。链上执行失败或流水线中途出错都返回 Err，由 main 以非零码退出
    pub async fn run(self) -> anyhow::Result<PaymentOutcome> {
        let outcome = match self.payment_service.pay(&self.request).await {
            Ok(outcome) => outcome,
            Err(e) => {
                if let AppError::InsufficientGas { address, .. } = &e {
                    log_error!("请先为 {} 充值 SUI 后重新运行", address);
                } else if e.is_pre_commit() {
                    log_error!("支付未上链，可直接重新运行: {}", e);
                } else {
                    log_error!("提交阶段失败，重跑前请先在浏览器确认交易状态: {}", e);
                }
                return Err(e.into());
            }
        };

        match &outcome {
            PaymentOutcome::Confirmed { digest, event } => {
                log_info!(
                    "✔️ 支付已确认: digest={}, payment_id={}, amount={}",
                    digest,
                    event.payment_id.as_deref().unwrap_or("-"),
                    event
                        .amount
                        .map(format_mist)
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            PaymentOutcome::CommittedUnconfirmed { digest } => {
                log_warn!("⚠️ 交易 {} 已上链但缺少确认事件，请人工核对", digest);
            }
            PaymentOutcome::Failed { digest, reason } => {
                log_error!("❌ 交易 {} 执行失败: {}", digest, reason);
                anyhow::bail!("payment transaction {} failed on chain: {}", digest, reason);
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::provider::mock_provider::{MockProvider, execute_response};
    use config::{File, FileFormat};
    use serde_json::json;

    const CONFIG: &str = r#"
        [network]
        name = "localnet"

        [contract]
        package_id = "0xabc"
        treasury_id = "0x7e"

        [payment]
        amount = 20000000
        payment_id = "order-42"
        metadata = "coffee"

        [signer]
        secret = "0707070707070707070707070707070707070707070707070707070707070707"
    "#;

    fn config() -> Config {
        config::Config::builder()
            .add_source(File::from_str(CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[tokio::test]
    async fn runs_single_payment() {
        let provider = Arc::new(MockProvider::new().with_execute(Ok(execute_response(
            "Dg9",
            json!({ "status": "success" }),
            json!([{
                "type": "0xabc::payment::PaymentProcessed",
                "parsedJson": { "payment_id": "order-42", "amount": "20000000" }
            }]),
        ))));
        let app = Application::build_with_provider(config(), provider.clone()).unwrap();
        assert_eq!(app.request.payment_id(), "order-42");

        let outcome = app.run().await.unwrap();
        assert!(matches!(outcome, PaymentOutcome::Confirmed { .. }));
        assert_eq!(provider.submitted().len(), 1);
    }

    #[tokio::test]
    async fn on_chain_failure_is_an_error() {
        let provider = Arc::new(MockProvider::new().with_execute(Ok(execute_response(
            "Dg9",
            json!({ "status": "failure", "error": "MoveAbort(1)" }),
            json!([]),
        ))));
        let app = Application::build_with_provider(config(), provider).unwrap();
        let err = app.run().await.unwrap_err();
        assert!(err.to_string().contains("MoveAbort"));
    }

    #[tokio::test]
    async fn unconfirmed_commit_is_not_an_error() {
        let provider = Arc::new(MockProvider::new());
        let app = Application::build_with_provider(config(), provider).unwrap();
        let outcome = app.run().await.unwrap();
        assert!(matches!(outcome, PaymentOutcome::CommittedUnconfirmed { .. }));
    }

    #[test]
    fn bad_secret_fails_build() {
        let mut cfg = config();
        cfg.signer.secret = "zz".to_string();
        let provider = Arc::new(MockProvider::new());
        assert!(matches!(
            Application::build_with_provider(cfg, provider),
            Err(AppError::InvalidSecret(_))
        ));
    }
}
