// services/tx/simulation/simulation_service.rs

use crate::errors::AppError;
use crate::infrastructure::provider::ProviderTrait;
use crate::models::ExecutionStatus;
use crate::services::tx::gas::GasEstimate;
use crate::{log_debug, log_warn};

/// dry run：非提交式执行，只读取 effects 状态与 gas 消耗
#[derive(Debug, Default)]
pub struct SimulationService;

impl SimulationService {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(
        &self,
        tx_bytes: &str,
        provider: &dyn ProviderTrait,
    ) -> Result<GasEstimate, AppError> {
        let response = provider.dry_run(tx_bytes).await?;

        if let ExecutionStatus::Failure { error } = ExecutionStatus::from(response.effects.status) {
            log_warn!("dry run 失败，终止本次支付: {}", error);
            return Err(AppError::SimulationFailed(error));
        }

        let gas_used = response.effects.gas_used;
        log_debug!("dry run gasUsed: {:?}", gas_used);
        Ok(GasEstimate {
            computation_cost: gas_used.computation_cost,
            storage_cost: gas_used.storage_cost,
            storage_rebate: gas_used.storage_rebate,
        })
    }
}
