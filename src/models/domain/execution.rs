use crate::infrastructure::parser::PaymentProcessed;
use crate::models::rpc::{EventDto, ExecuteResponse, StatusDto};
use serde_json::Value;

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failure { error: String },
}

impl From<StatusDto> for ExecutionStatus {
    fn from(dto: StatusDto) -> Self {
        if dto.status == STATUS_SUCCESS {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failure {
                error: dto
                    .error
                    .unwrap_or_else(|| format!("status={}", dto.status)),
            }
        }
    }
}

/// 链上事件，按节点返回顺序保存
#[derive(Debug, Clone, PartialEq)]
pub struct SuiEvent {
    pub type_tag: String,
    pub sender: Option<String>,
    pub payload: Value,
}

impl From<EventDto> for SuiEvent {
    fn from(dto: EventDto) -> Self {
        Self {
            type_tag: dto.type_tag,
            sender: dto.sender,
            payload: dto.parsed_json,
        }
    }
}

/// 正式执行后的结果：digest + effects 状态 + 事件
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub digest: String,
    pub status: ExecutionStatus,
    pub events: Vec<SuiEvent>,
}

impl From<ExecuteResponse> for ExecutionResult {
    fn from(resp: ExecuteResponse) -> Self {
        // 请求时带了 showEffects，缺失只可能是节点异常，按失败处理
        let status = resp
            .effects
            .map(|e| ExecutionStatus::from(e.status))
            .unwrap_or_else(|| ExecutionStatus::Failure {
                error: "响应中缺少 effects".to_string(),
            });
        Self {
            digest: resp.digest,
            status,
            events: resp
                .events
                .unwrap_or_default()
                .into_iter()
                .map(SuiEvent::from)
                .collect(),
        }
    }
}

/// 一次支付的最终结果。找不到确认事件不是错误，单独成一个分支
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Confirmed {
        digest: String,
        event: PaymentProcessed,
    },
    CommittedUnconfirmed {
        digest: String,
    },
    Failed {
        digest: String,
        reason: String,
    },
}

impl PaymentOutcome {
    pub fn digest(&self) -> &str {
        match self {
            PaymentOutcome::Confirmed { digest, .. }
            | PaymentOutcome::CommittedUnconfirmed { digest }
            | PaymentOutcome::Failed { digest, .. } => digest,
        }
    }
}
