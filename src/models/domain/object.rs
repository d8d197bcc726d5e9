use crate::errors::AppError;
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 32;
pub const DIGEST_LENGTH: usize = 32;

/// 解析 0x 前缀的十六进制，不足 64 位时左侧补零（0x2 == 0x00..02）
fn parse_hex32(raw: &str) -> Option<[u8; ADDRESS_LENGTH]> {
    let hex_str = raw.trim().strip_prefix("0x").unwrap_or(raw.trim());
    if hex_str.is_empty() || hex_str.len() > ADDRESS_LENGTH * 2 {
        return None;
    }
    let padded = format!("{:0>64}", hex_str);
    let mut out = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(padded, &mut out).ok()?;
    Some(out)
}

macro_rules! hex32_type {
    ($(#[$meta:meta])* $name:ident, $err:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; ADDRESS_LENGTH]);

        impl $name {
            pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s)
                    .map(Self)
                    .ok_or_else(|| AppError::$err(s.to_string()))
            }
        }

        // 统一输出完整的 0x + 64 位小写 hex，与节点返回格式一致
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

hex32_type!(
    /// 账户地址：blake2b256(flag || pubkey)
    SuiAddress,
    InvalidAddress
);
hex32_type!(
    /// 链上对象 ID（包、共享对象、coin）
    ObjectId,
    InvalidObjectId
);

/// 对象摘要，RPC 中以 base58 表示
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectDigest([u8; DIGEST_LENGTH]);

impl ObjectDigest {
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }
}

impl FromStr for ObjectDigest {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AppError::InvalidDigest(format!("{}: {}", s, e)))?;
        let bytes: [u8; DIGEST_LENGTH] = bytes
            .try_into()
            .map_err(|_| AppError::InvalidDigest(format!("{}: 长度不是 {} 字节", s, DIGEST_LENGTH)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectDigest({})", self)
    }
}

/// (id, version, digest)，拥有型对象的完整引用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

impl ObjectRef {
    pub fn new(object_id: ObjectId, version: u64, digest: ObjectDigest) -> Self {
        Self {
            object_id,
            version,
            digest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_is_left_padded() {
        let short: ObjectId = "0x2".parse().unwrap();
        let full: ObjectId =
            "0x0000000000000000000000000000000000000000000000000000000000000002"
                .parse()
                .unwrap();
        assert_eq!(short, full);
        assert_eq!(
            short.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!("0x".parse::<SuiAddress>().is_err());
        assert!("0xzz".parse::<SuiAddress>().is_err());
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(too_long.parse::<SuiAddress>().is_err());
        assert!(matches!(
            "nope".parse::<ObjectId>(),
            Err(AppError::InvalidObjectId(_))
        ));
    }

    #[test]
    fn digest_base58_roundtrip_and_length_check() {
        let digest = ObjectDigest::new([9u8; DIGEST_LENGTH]);
        let parsed: ObjectDigest = digest.to_string().parse().unwrap();
        assert_eq!(parsed, digest);

        let short = bs58::encode([1u8; 16]).into_string();
        assert!(short.parse::<ObjectDigest>().is_err());
    }
}
