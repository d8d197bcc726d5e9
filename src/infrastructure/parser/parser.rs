use crate::errors::AppError;
use crate::models::{ExecutionResult, ObjectId, SuiEvent};
use crate::utils::json_to_u64;
use crate::{log_debug, log_warn};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const PAYMENT_PROCESSED_EVENT: &str = "PaymentProcessed";

/// Move 结构体类型标签 `address::module::Name`，地址统一规范化后比较
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub address: ObjectId,
    pub module: String,
    pub name: String,
}

impl EventType {
    pub fn new(address: ObjectId, module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address,
            module: module.into(),
            name: name.into(),
        }
    }

    /// 事件类型字符串是否与自身相同；带泛型参数的标签不匹配
    pub fn matches(&self, type_tag: &str) -> bool {
        type_tag
            .parse::<EventType>()
            .map(|other| other == *self)
            .unwrap_or(false)
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, "::");
        match (parts.next(), parts.next(), parts.next()) {
            (Some(address), Some(module), Some(name)) if !name.contains("::") => {
                Ok(Self::new(address.parse()?, module, name))
            }
            _ => Err(AppError::ParserError(format!("无效的事件类型: {}", s))),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

/// 合约支付确认事件。链上 payload 原样保留在 raw 中，常用字段尽量解出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentProcessed {
    pub payment_id: Option<String>,
    pub amount: Option<u64>,
    pub metadata: Option<String>,
    pub raw: Value,
}

impl PaymentProcessed {
    pub fn from_payload(payload: Value) -> Self {
        let text = |key: &str| payload.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            payment_id: text("payment_id"),
            amount: payload.get("amount").and_then(json_to_u64),
            metadata: text("metadata"),
            raw: payload.clone(),
        }
    }
}

/// 按类型标签解码后的事件
#[derive(Debug, Clone, PartialEq)]
pub enum ChainEvent {
    PaymentProcessed(PaymentProcessed),
    Unrecognized { type_tag: String, payload: Value },
}

impl ChainEvent {
    pub fn decode(expected: &EventType, event: &SuiEvent) -> Self {
        if expected.matches(&event.type_tag) {
            ChainEvent::PaymentProcessed(PaymentProcessed::from_payload(event.payload.clone()))
        } else {
            ChainEvent::Unrecognized {
                type_tag: event.type_tag.clone(),
                payload: event.payload.clone(),
            }
        }
    }
}

pub struct EventParser {
    expected: EventType,
}

impl EventParser {
    pub fn new(expected: EventType) -> Self {
        Self { expected }
    }

    /// `{package}::{module}::PaymentProcessed`
    pub fn for_package(package: ObjectId, module: &str) -> Self {
        Self::new(EventType::new(package, module, PAYMENT_PROCESSED_EVENT))
    }

    pub fn expected(&self) -> &EventType {
        &self.expected
    }

    /// 按事件发出顺序查找第一个确认事件；找不到返回 None（不是错误）
    pub fn find_confirmation(&self, result: &ExecutionResult) -> Option<PaymentProcessed> {
        let mut skipped = 0usize;
        for event in &result.events {
            match ChainEvent::decode(&self.expected, event) {
                ChainEvent::PaymentProcessed(confirmation) => {
                    log_debug!("交易 {} 跳过 {} 个无关事件", result.digest, skipped);
                    return Some(confirmation);
                }
                ChainEvent::Unrecognized { type_tag, .. } => {
                    log_debug!("忽略事件: {}", type_tag);
                    skipped += 1;
                }
            }
        }
        log_warn!(
            "交易 {} 共 {} 个事件，未找到 {}",
            result.digest,
            result.events.len(),
            self.expected
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExecutionStatus;
    use serde_json::json;

    fn pkg() -> ObjectId {
        "0xabc".parse().unwrap()
    }

    fn event(type_tag: &str, payload: Value) -> SuiEvent {
        SuiEvent {
            type_tag: type_tag.to_string(),
            sender: None,
            payload,
        }
    }

    fn result(events: Vec<SuiEvent>) -> ExecutionResult {
        ExecutionResult {
            digest: "D1".to_string(),
            status: ExecutionStatus::Success,
            events,
        }
    }

    #[test]
    fn type_tags_compare_after_address_normalization() {
        let expected = EventType::new(pkg(), "payment", "PaymentProcessed");
        assert!(expected.matches("0xabc::payment::PaymentProcessed"));
        assert!(expected.matches(&format!(
            "0x{:0>64}::payment::PaymentProcessed",
            "abc"
        )));
        assert!(!expected.matches("0xabd::payment::PaymentProcessed"));
        assert!(!expected.matches("0xabc::payment::PaymentRefunded"));
        assert!(!expected.matches("0xabc::other::PaymentProcessed"));
        assert!(!expected.matches("0xabc::payment::PaymentProcessed<0x2::sui::SUI>"));
        assert!(!expected.matches("garbage"));
    }

    #[test]
    fn finds_confirmation_at_any_position() {
        let parser = EventParser::for_package(pkg(), "payment");
        let target = event(
            "0xabc::payment::PaymentProcessed",
            json!({ "payment_id": "order-42", "amount": "20000000", "metadata": "m" }),
        );
        for n in 0..4 {
            for pos in 0..=n {
                let mut events: Vec<SuiEvent> = (0..n)
                    .map(|i| event("0x2::coin::CoinEvent", json!({ "i": i })))
                    .collect();
                events.insert(pos, target.clone());

                let found = parser.find_confirmation(&result(events)).unwrap();
                assert_eq!(found.payment_id.as_deref(), Some("order-42"));
                assert_eq!(found.amount, Some(20_000_000));
                assert_eq!(found.raw, target.payload);
            }
        }
    }

    #[test]
    fn returns_first_match_in_emission_order() {
        let parser = EventParser::for_package(pkg(), "payment");
        let events = vec![
            event("0xabc::payment::PaymentProcessed", json!({ "payment_id": "first" })),
            event("0xabc::payment::PaymentProcessed", json!({ "payment_id": "second" })),
        ];
        let found = parser.find_confirmation(&result(events)).unwrap();
        assert_eq!(found.payment_id.as_deref(), Some("first"));
    }

    #[test]
    fn absence_is_none() {
        let parser = EventParser::for_package(pkg(), "payment");
        assert!(parser.find_confirmation(&result(vec![])).is_none());
        let unrelated = vec![event("0x2::display::DisplayCreated", json!({}))];
        assert!(parser.find_confirmation(&result(unrelated)).is_none());
    }

    #[test]
    fn non_object_payload_is_kept_raw() {
        let expected = EventType::new(pkg(), "payment", "PaymentProcessed");
        let decoded = ChainEvent::decode(
            &expected,
            &event("0xabc::payment::PaymentProcessed", json!("opaque")),
        );
        match decoded {
            ChainEvent::PaymentProcessed(p) => {
                assert_eq!(p.raw, json!("opaque"));
                assert!(p.payment_id.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
