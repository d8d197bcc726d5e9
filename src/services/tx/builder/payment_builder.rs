// services/tx/builder/payment_builder.rs

use crate::errors::AppError;
use crate::log_info;
use crate::models::rpc::ObjectData;
use crate::models::{ObjectDigest, ObjectId, ObjectRef, PaymentRequest, SuiAddress};
use crate::services::tx::types::{
    Argument, CallArg, Command, GasPayment, ObjectArg, ProgrammableMoveCall,
    ProgrammableTransaction, UnsignedTransaction,
};
use crate::utils::{is_valid_move_identifier, json_to_u64, str_to_u64};
use serde_json::Value;

/// `{package}::{module}::{function}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTarget {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
}

impl MoveTarget {
    pub fn new(
        package: ObjectId,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Result<Self, AppError> {
        let (module, function) = (module.into(), function.into());
        for ident in [&module, &function] {
            if !is_valid_move_identifier(ident) {
                return Err(AppError::Config(format!("无效的 Move 标识符: {}", ident)));
            }
        }
        Ok(Self {
            package,
            module,
            function,
        })
    }
}

impl std::fmt::Display for MoveTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.function)
    }
}

/// 组装支付交易：SplitCoins(GasCoin, [amount]) + 一次 MoveCall
///
/// 不做余额校验，金额超出 gas coin 余额时由 dry run 报错。
pub struct PaymentTxBuilder {
    target: MoveTarget,
}

impl PaymentTxBuilder {
    pub fn new(target: MoveTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &MoveTarget {
        &self.target
    }

    pub fn build(
        &self,
        sender: SuiAddress,
        request: &PaymentRequest,
        treasury: ObjectArg,
        gas: GasPayment,
    ) -> UnsignedTransaction {
        // 输入顺序：金额、treasury、payment_id、metadata
        let inputs = vec![
            CallArg::pure(&request.amount()),
            CallArg::Object(treasury),
            CallArg::pure(request.payment_id()),
            CallArg::pure(request.metadata()),
        ];

        let split = Command::SplitCoins(Argument::GasCoin, vec![Argument::Input(0)]);
        // split 的第一个结果：仅在本交易内有效的新 coin
        let paid_coin = Argument::NestedResult(0, 0);
        let call = Command::MoveCall(Box::new(ProgrammableMoveCall {
            package: self.target.package,
            module: self.target.module.clone(),
            function: self.target.function.clone(),
            arguments: vec![
                Argument::Input(1),
                Argument::Input(2),
                Argument::Input(3),
                paid_coin,
            ],
        }));

        log_info!(
            "构建支付交易: sender={}, target={}, amount={}, payment_id={}",
            sender,
            self.target,
            request.amount(),
            request.payment_id()
        );

        UnsignedTransaction::new(
            sender,
            ProgrammableTransaction {
                inputs,
                commands: vec![split, call],
            },
            gas,
        )
        .with_gas_coin_spend(request.amount())
    }
}

/// 根据 sui_getObject 的 owner 字段决定 treasury 以共享对象还是拥有型对象传入
pub fn treasury_object_arg(data: &ObjectData) -> Result<ObjectArg, AppError> {
    let id: ObjectId = data.object_id.parse()?;
    let owner = data
        .owner
        .as_ref()
        .ok_or_else(|| AppError::ParserError(format!("对象 {} 缺少 owner 信息", id)))?;

    if let Some(shared) = owner.get("Shared") {
        let initial_shared_version = shared
            .get("initial_shared_version")
            .and_then(json_to_u64)
            .ok_or_else(|| {
                AppError::ParserError(format!("共享对象 {} 缺少 initial_shared_version", id))
            })?;
        return Ok(ObjectArg::SharedObject {
            id,
            initial_shared_version,
            // 合约会写入 treasury
            mutable: true,
        });
    }

    let is_owned = matches!(owner, Value::String(s) if s == "Immutable")
        || owner.get("AddressOwner").is_some()
        || owner.get("ObjectOwner").is_some();
    if !is_owned {
        return Err(AppError::ParserError(format!(
            "不支持的对象所有权类型 {}: {}",
            id, owner
        )));
    }
    let digest: ObjectDigest = data.digest.parse()?;
    Ok(ObjectArg::ImmOrOwnedObject(ObjectRef::new(
        id,
        str_to_u64("version", &data.version)?,
        digest,
    )))
}
