use crate::errors::AppError;
use crate::models::SuiAddress;
use crate::services::tx::types::{BudgetedTransaction, SignedTransaction};
use async_trait::async_trait;

#[async_trait]
pub trait TxSigner: Send + Sync {
    /// 消费已定预算的交易，产出可直接广播的签名交易
    async fn sign_tx(&self, tx: BudgetedTransaction) -> Result<SignedTransaction, AppError>;
    fn address(&self) -> SuiAddress;
}
