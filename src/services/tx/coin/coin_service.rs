// services/tx/coin/coin_service.rs

use crate::errors::AppError;
use crate::infrastructure::provider::ProviderTrait;
use crate::models::{Coin, SuiAddress, total_balance};
use crate::services::tx::types::GasPayment;
use crate::utils::format_mist;
use crate::{log_debug, log_info};

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
/// 单笔交易最多可引用的 gas coin 数量
pub const MAX_GAS_PAYMENT_OBJECTS: usize = 256;

/// 查询发送方名下的可用 SUI coin（只读快照，不做缓存，每次支付重新查询）
pub struct CoinService {
    coin_type: String,
}

impl Default for CoinService {
    fn default() -> Self {
        Self::new(SUI_COIN_TYPE)
    }
}

impl CoinService {
    pub fn new(coin_type: impl Into<String>) -> Self {
        Self {
            coin_type: coin_type.into(),
        }
    }

    /// 翻页拉取全部 coin；一个都没有时返回 NoFunds
    pub async fn locate(
        &self,
        owner: SuiAddress,
        provider: &dyn ProviderTrait,
    ) -> Result<Vec<Coin>, AppError> {
        let mut coins = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = provider
                .get_coins(&owner, &self.coin_type, cursor.take())
                .await?;
            log_debug!("suix_getCoins 返回 {} 个 coin", page.data.len());
            for dto in page.data {
                coins.push(Coin::try_from(dto)?);
            }
            match (page.has_next_page, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }

        if coins.is_empty() {
            return Err(AppError::NoFunds { address: owner });
        }
        log_info!(
            "地址 {} 共有 {} 个 coin，余额合计 {}",
            owner,
            coins.len(),
            format_mist(total_balance(&coins))
        );
        Ok(coins)
    }

    /// 选出用于支付 gas 的 coin：余额从大到小，最多 MAX_GAS_PAYMENT_OBJECTS 个
    pub fn select_gas(&self, mut coins: Vec<Coin>, gas_price: u64) -> GasPayment {
        coins.sort_by(|a, b| b.balance.cmp(&a.balance));
        coins.truncate(MAX_GAS_PAYMENT_OBJECTS);
        GasPayment {
            balance: total_balance(&coins),
            coins: coins.into_iter().map(|c| c.object_ref).collect(),
            price: gas_price,
        }
    }
}
