// services/payment_service.rs
use crate::errors::AppError;
use crate::infrastructure::parser::EventParser;
use crate::infrastructure::provider::ProviderTrait;
use crate::models::{ExecutionResult, ExecutionStatus, ObjectId, PaymentOutcome, PaymentRequest};
use crate::services::tx::builder::{PaymentTxBuilder, treasury_object_arg};
use crate::services::tx::coin::CoinService;
use crate::services::tx::gas::GasService;
use crate::services::tx::signer::TxSigner;
use crate::services::tx::types::{BudgetedTransaction, ObjectArg};
use crate::utils::format_mist;
use crate::{log_error, log_info, log_warn};
use std::sync::Arc;

/// 单笔支付流水线：查 coin -> 构建 -> dry run 定预算 -> 签名广播 -> 解析确认事件
///
/// 每一步都等待上一步完成，任一步失败即终止；不做自动重试，
/// 调用方若要重试需要从查 coin 开始重新执行整条流水线。
pub struct PaymentService {
    pub signer: Arc<dyn TxSigner>,
    pub coin_svc: Arc<CoinService>,
    pub gas_svc: Arc<GasService>,
    pub builder: Arc<PaymentTxBuilder>,
    pub event_parser: Arc<EventParser>,
    pub provider: Arc<dyn ProviderTrait>,
}

impl PaymentService {
    pub fn new(
        signer: Arc<dyn TxSigner>,
        coin_svc: Arc<CoinService>,
        gas_svc: Arc<GasService>,
        builder: Arc<PaymentTxBuilder>,
        event_parser: Arc<EventParser>,
        provider: Arc<dyn ProviderTrait>,
    ) -> Self {
        Self {
            signer,
            coin_svc,
            gas_svc,
            builder,
            event_parser,
            provider,
        }
    }

    pub async fn pay(&self, request: &PaymentRequest) -> Result<PaymentOutcome, AppError> {
        let sender = self.signer.address();
        log_info!(
            "发起支付: sender={}, amount={} ({}), payment_id={}",
            sender,
            request.amount(),
            format_mist(request.amount()),
            request.payment_id()
        );

        // 1. 查询可用 coin，没有则直接失败
        let coins = self.coin_svc.locate(sender, &*self.provider).await?;

        // 2. 构建交易
        let gas_price = self.provider.get_reference_gas_price().await?;
        let gas = self.coin_svc.select_gas(coins, gas_price);
        let treasury = self.resolve_treasury(request.treasury_id()).await?;
        let tx = self.builder.build(sender, request, treasury, gas);

        // 3. dry run 估算并附加 gas 预算
        let (tx, _estimate) = self.gas_svc.estimate(tx, &*self.provider).await?;

        // 4. 签名并广播
        let result = self.submit(tx).await?;

        // 5. 解析结果
        Ok(self.interpret(result))
    }

    async fn resolve_treasury(&self, id: ObjectId) -> Result<ObjectArg, AppError> {
        let response = self.provider.get_object(&id).await?;
        let data = response.data.ok_or_else(|| {
            AppError::InvalidObjectId(format!(
                "treasury {} 不存在: {}",
                id,
                response.error.map(|e| e.to_string()).unwrap_or_default()
            ))
        })?;
        treasury_object_arg(&data)
    }

    /// 签名 + 正式执行。余额不足类错误会被细分为 InsufficientGas
    pub async fn submit(&self, tx: BudgetedTransaction) -> Result<ExecutionResult, AppError> {
        let sender = self.signer.address();
        let gas_budget = tx.gas_budget();
        let signed = self.signer.sign_tx(tx).await?;

        let response = self
            .provider
            .execute_transaction(&signed)
            .await
            .map_err(|e| {
                let e = e.classify_submission(sender);
                log_error!("广播失败 (gas_budget={}): {}", gas_budget, e);
                e
            })?;

        let result = ExecutionResult::from(response);
        log_info!(
            "交易已提交: digest={}, status={:?}, events={}",
            result.digest,
            result.status,
            result.events.len()
        );
        Ok(result)
    }

    /// effects 失败 -> Failed；成功且找到确认事件 -> Confirmed；否则 CommittedUnconfirmed
    pub fn interpret(&self, result: ExecutionResult) -> PaymentOutcome {
        if let ExecutionStatus::Failure { error } = &result.status {
            return PaymentOutcome::Failed {
                digest: result.digest.clone(),
                reason: error.clone(),
            };
        }
        match self.event_parser.find_confirmation(&result) {
            Some(event) => PaymentOutcome::Confirmed {
                digest: result.digest,
                event,
            },
            None => {
                log_warn!(
                    "交易 {} 已上链，但未收到 {} 事件",
                    result.digest,
                    self.event_parser.expected()
                );
                PaymentOutcome::CommittedUnconfirmed {
                    digest: result.digest,
                }
            }
        }
    }
}
