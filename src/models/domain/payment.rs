use crate::models::domain::object::ObjectId;

/// 一次支付意图，构造后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    treasury_id: ObjectId,
    /// 金额，单位 MIST
    amount: u64,
    /// 调用方提供的全局唯一标识，合约侧据此做幂等
    payment_id: String,
    metadata: String,
}

impl PaymentRequest {
    pub fn new(
        treasury_id: ObjectId,
        amount: u64,
        payment_id: impl Into<String>,
        metadata: impl Into<String>,
    ) -> Self {
        Self {
            treasury_id,
            amount,
            payment_id: payment_id.into(),
            metadata: metadata.into(),
        }
    }

    pub fn treasury_id(&self) -> ObjectId {
        self.treasury_id
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn payment_id(&self) -> &str {
        &self.payment_id
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}
