//! Sui JSON-RPC 响应结构（只声明用到的字段，其余字段忽略）

use crate::utils::deserialize_u64;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// suix_getCoins 单个 coin
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDto {
    pub coin_type: String,
    pub coin_object_id: String,
    pub version: String,
    pub digest: String,
    pub balance: String,
}

/// suix_getCoins 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<CoinDto>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// sui_getObject 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    pub version: String,
    pub digest: String,
    /// {"AddressOwner": "0x.."} | {"Shared": {"initial_shared_version": n}} | "Immutable" | ...
    #[serde(default)]
    pub owner: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasUsedDto {
    #[serde(deserialize_with = "deserialize_u64")]
    pub computation_cost: u64,
    #[serde(deserialize_with = "deserialize_u64")]
    pub storage_cost: u64,
    #[serde(deserialize_with = "deserialize_u64")]
    pub storage_rebate: u64,
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub non_refundable_storage_fee: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectsDto {
    pub status: StatusDto,
    pub gas_used: GasUsedDto,
    #[serde(default)]
    pub transaction_digest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub transaction_module: Option<String>,
    #[serde(default)]
    pub parsed_json: Value,
}

/// sui_dryRunTransactionBlock 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryRunResponse {
    pub effects: EffectsDto,
    #[serde(default)]
    pub events: Vec<EventDto>,
}

/// sui_executeTransactionBlock 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub digest: String,
    #[serde(default)]
    pub effects: Option<EffectsDto>,
    #[serde(default)]
    pub events: Option<Vec<EventDto>>,
}
