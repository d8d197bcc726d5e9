use crate::errors::AppError;
use crate::models::domain::object::{ObjectDigest, ObjectId, ObjectRef};
use crate::models::rpc::CoinDto;
use crate::utils::str_to_u64;

/// 发送方名下的一枚可花费 coin（查询时刻的快照）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coin {
    pub coin_type: String,
    pub object_ref: ObjectRef,
    pub balance: u64,
}

impl TryFrom<CoinDto> for Coin {
    type Error = AppError;

    fn try_from(dto: CoinDto) -> Result<Self, Self::Error> {
        let object_id: ObjectId = dto.coin_object_id.parse()?;
        let digest: ObjectDigest = dto.digest.parse()?;
        Ok(Self {
            coin_type: dto.coin_type,
            object_ref: ObjectRef::new(object_id, str_to_u64("version", &dto.version)?, digest),
            balance: str_to_u64("balance", &dto.balance)?,
        })
    }
}

/// 多枚 coin 的余额总和（饱和加法）
pub fn total_balance(coins: &[Coin]) -> u64 {
    coins
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.balance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(balance: &str) -> CoinDto {
        CoinDto {
            coin_type: "0x2::sui::SUI".to_string(),
            coin_object_id: "0x5".to_string(),
            version: "12".to_string(),
            digest: bs58::encode([3u8; 32]).into_string(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn converts_rpc_coin() {
        let coin = Coin::try_from(dto("5000000000")).unwrap();
        assert_eq!(coin.balance, 5_000_000_000);
        assert_eq!(coin.object_ref.version, 12);
        assert_eq!(coin.object_ref.object_id, "0x5".parse::<ObjectId>().unwrap());
    }

    #[test]
    fn rejects_bad_balance() {
        assert!(matches!(
            Coin::try_from(dto("lots")),
            Err(AppError::InvalidNumber(_))
        ));
    }

    #[test]
    fn total_balance_saturates() {
        let mut a = Coin::try_from(dto("1")).unwrap();
        a.balance = u64::MAX;
        let b = Coin::try_from(dto("10")).unwrap();
        assert_eq!(total_balance(&[a, b]), u64::MAX);
        assert_eq!(total_balance(&[]), 0);
    }
}
