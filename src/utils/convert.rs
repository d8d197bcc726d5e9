use crate::errors::AppError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Sui JSON-RPC 用字符串表示 u64（BigInt），个别字段仍可能是数字
pub fn json_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.parse::<u64>().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

pub fn str_to_u64(field: &str, raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|e| AppError::InvalidNumber(format!("{}={} 无法解析为u64: {}", field, raw, e)))
}

/// serde 辅助：反序列化 "123" 或 123 为 u64
pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    json_to_u64(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("期望u64(字符串或数字)，实际: {}", value)))
}
