// services/tx/gas/gas_service.rs

use crate::errors::AppError;
use crate::infrastructure::provider::ProviderTrait;
use crate::log_info;
use crate::services::tx::simulation::SimulationService;
use crate::services::tx::types::{BudgetedTransaction, TxOptions, UnsignedTransaction};
use crate::utils::format_mist;

/// dry run 返回的 gas 消耗（单位 MIST）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GasEstimate {
    pub computation_cost: u64,
    pub storage_cost: u64,
    pub storage_rebate: u64,
}

impl GasEstimate {
    /// 三项之和。rebate 也计入：网络先按最坏情况扣除，执行后才返还
    pub fn total_cost(&self) -> Result<u64, AppError> {
        self.computation_cost
            .checked_add(self.storage_cost)
            .and_then(|v| v.checked_add(self.storage_rebate))
            .ok_or_else(|| AppError::Internal("gas 消耗求和溢出".to_string()))
    }

    /// gas_budget = computation + storage + rebate + buffer
    pub fn gas_budget(&self, buffer: u64) -> Result<u64, AppError> {
        self.total_cost()?
            .checked_add(buffer)
            .ok_or_else(|| AppError::Internal("gas 预算加缓冲溢出".to_string()))
    }
}

/// gas 预算服务：固定缓冲，不做费率市场调整（纯整数运算）
pub struct GasService {
    options: TxOptions,
    simulation: SimulationService,
}

impl Default for GasService {
    fn default() -> Self {
        Self::new(TxOptions::default())
    }
}

impl GasService {
    pub fn new(options: TxOptions) -> Self {
        Self {
            options,
            simulation: SimulationService::new(),
        }
    }

    /// dry run 时的临时预算
    ///
    /// 预算在 PTB 执行前就从 GasCoin 中预留，SplitCoins 只能使用剩余部分，
    /// 所以上限是 余额 - 拆分金额；扣完后为 0 时直接失败，不发起 dry run。
    pub fn simulation_budget(&self, gas_balance: u64, gas_coin_spend: u64) -> Result<u64, AppError> {
        let available = gas_balance.saturating_sub(gas_coin_spend);
        if available == 0 {
            return Err(AppError::SimulationFailed(format!(
                "gas coin 余额 {} 不足以覆盖支付金额 {}，没有剩余额度支付 gas",
                format_mist(gas_balance),
                format_mist(gas_coin_spend)
            )));
        }
        Ok(self.options.simulation_budget_cap.min(available))
    }

    /// 模拟执行并为交易附加预算。模拟失败时交易被消费，不会进入提交阶段
    pub async fn estimate(
        &self,
        tx: UnsignedTransaction,
        provider: &dyn ProviderTrait,
    ) -> Result<(BudgetedTransaction, GasEstimate), AppError> {
        let provisional = self.simulation_budget(tx.gas().balance, tx.gas_coin_spend())?;
        let tx_bytes = tx.simulation_bytes(provisional);

        let estimate = self.simulation.run(&tx_bytes, provider).await?;
        let gas_budget = estimate.gas_budget(self.options.gas_buffer)?;

        log_info!(
            "gas 估算: computation={}, storage={}, rebate={}, buffer={} => budget={} ({})",
            estimate.computation_cost,
            estimate.storage_cost,
            estimate.storage_rebate,
            self.options.gas_buffer,
            gas_budget,
            format_mist(gas_budget)
        );
        Ok((tx.with_gas_budget(gas_budget), estimate))
    }
}
