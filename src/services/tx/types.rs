// services/tx/types.rs

use crate::infrastructure::codec::{BcsWriter, ToBcs};
use crate::models::{ObjectId, ObjectRef, SuiAddress};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// 交易级参数（来自 [gas] 配置）
#[derive(Debug, Clone)]
pub struct TxOptions {
    /// 在模拟得出的 gas 之上额外追加的固定缓冲，单位 MIST
    pub gas_buffer: u64,
    /// dry run 使用的临时预算上限
    pub simulation_budget_cap: u64,
}

pub const DEFAULT_GAS_BUFFER: u64 = 1_000_000;
/// 协议允许的单笔交易最大 gas 预算 (50 SUI)
pub const DEFAULT_SIMULATION_BUDGET_CAP: u64 = 50_000_000_000;

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            gas_buffer: DEFAULT_GAS_BUFFER,
            simulation_budget_cap: DEFAULT_SIMULATION_BUDGET_CAP,
        }
    }
}

// ==================== PTB 结构 ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

impl ToBcs for Argument {
    fn write_bcs(&self, w: &mut BcsWriter) {
        match self {
            Argument::GasCoin => {
                w.write_variant(0);
            }
            Argument::Input(i) => {
                w.write_variant(1).write_u16(*i);
            }
            Argument::Result(i) => {
                w.write_variant(2).write_u16(*i);
            }
            Argument::NestedResult(i, j) => {
                w.write_variant(3).write_u16(*i).write_u16(*j);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

impl ToBcs for ObjectRef {
    fn write_bcs(&self, w: &mut BcsWriter) {
        // 摘要在 BCS 中是 vector<u8>，带长度前缀
        w.write_fixed(self.object_id.as_bytes())
            .write_u64(self.version)
            .write_bytes(self.digest.as_bytes());
    }
}

impl ToBcs for ObjectArg {
    fn write_bcs(&self, w: &mut BcsWriter) {
        match self {
            ObjectArg::ImmOrOwnedObject(object_ref) => {
                w.write_variant(0);
                object_ref.write_bcs(w);
            }
            ObjectArg::SharedObject {
                id,
                initial_shared_version,
                mutable,
            } => {
                w.write_variant(1)
                    .write_fixed(id.as_bytes())
                    .write_u64(*initial_shared_version)
                    .write_bool(*mutable);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// 已经 BCS 编码好的纯值
    Pure(Vec<u8>),
    Object(ObjectArg),
}

impl CallArg {
    pub fn pure<T: ToBcs + ?Sized>(value: &T) -> Self {
        CallArg::Pure(value.to_bcs_bytes())
    }
}

impl ToBcs for CallArg {
    fn write_bcs(&self, w: &mut BcsWriter) {
        match self {
            CallArg::Pure(bytes) => {
                w.write_variant(0).write_bytes(bytes);
            }
            CallArg::Object(arg) => {
                w.write_variant(1);
                arg.write_bcs(w);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub arguments: Vec<Argument>,
}

impl ToBcs for ProgrammableMoveCall {
    fn write_bcs(&self, w: &mut BcsWriter) {
        w.write_fixed(self.package.as_bytes())
            .write_str(&self.module)
            .write_str(&self.function)
            // 支付入口不是泛型函数，type_arguments 恒为空
            .write_uleb128(0)
            .write_seq(&self.arguments);
    }
}

// Command 变体下标与链上定义保持一致（TransferObjects=1、MergeCoins=3 等未使用）
const COMMAND_MOVE_CALL: u32 = 0;
const COMMAND_SPLIT_COINS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    SplitCoins(Argument, Vec<Argument>),
}

impl ToBcs for Command {
    fn write_bcs(&self, w: &mut BcsWriter) {
        match self {
            Command::MoveCall(call) => {
                w.write_variant(COMMAND_MOVE_CALL);
                call.write_bcs(w);
            }
            Command::SplitCoins(coin, amounts) => {
                w.write_variant(COMMAND_SPLIT_COINS);
                coin.write_bcs(w);
                w.write_seq(amounts);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl ToBcs for ProgrammableTransaction {
    fn write_bcs(&self, w: &mut BcsWriter) {
        w.write_seq(&self.inputs).write_seq(&self.commands);
    }
}

/// 支付 gas 的 coin 集合与参考 gas 价格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasPayment {
    pub coins: Vec<ObjectRef>,
    pub price: u64,
    /// coins 的余额合计，用于确定模拟预算
    pub balance: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionData {
    pub kind: ProgrammableTransaction,
    pub sender: SuiAddress,
    pub gas_payment: Vec<ObjectRef>,
    pub gas_owner: SuiAddress,
    pub gas_price: u64,
    pub gas_budget: u64,
}

impl ToBcs for TransactionData {
    fn write_bcs(&self, w: &mut BcsWriter) {
        // TransactionData::V1 / TransactionKind::ProgrammableTransaction
        w.write_variant(0).write_variant(0);
        self.kind.write_bcs(w);
        w.write_fixed(self.sender.as_bytes());
        // GasData
        w.write_seq(&self.gas_payment)
            .write_fixed(self.gas_owner.as_bytes())
            .write_u64(self.gas_price)
            .write_u64(self.gas_budget);
        // TransactionExpiration::None
        w.write_variant(0);
    }
}

// ==================== 交易生命周期 ====================

/// 已填好 sender / split / move call，但尚未确定 gas 预算。只能被模拟或转换为 BudgetedTransaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    sender: SuiAddress,
    kind: ProgrammableTransaction,
    gas: GasPayment,
    /// PTB 内从 GasCoin 中拆出的金额
    gas_coin_spend: u64,
}

impl UnsignedTransaction {
    pub fn new(sender: SuiAddress, kind: ProgrammableTransaction, gas: GasPayment) -> Self {
        Self {
            sender,
            kind,
            gas,
            gas_coin_spend: 0,
        }
    }

    pub fn with_gas_coin_spend(mut self, amount: u64) -> Self {
        self.gas_coin_spend = amount;
        self
    }

    pub fn gas_coin_spend(&self) -> u64 {
        self.gas_coin_spend
    }

    pub fn sender(&self) -> SuiAddress {
        self.sender
    }

    pub fn kind(&self) -> &ProgrammableTransaction {
        &self.kind
    }

    pub fn gas(&self) -> &GasPayment {
        &self.gas
    }

    /// 以临时预算编码，仅供 dry run 使用
    pub fn simulation_bytes(&self, provisional_budget: u64) -> String {
        STANDARD.encode(self.data_with_budget(provisional_budget).to_bcs_bytes())
    }

    /// 附加最终 gas 预算，消费自身
    pub fn with_gas_budget(self, gas_budget: u64) -> BudgetedTransaction {
        let data = self.data_with_budget(gas_budget);
        BudgetedTransaction { data }
    }

    fn data_with_budget(&self, gas_budget: u64) -> TransactionData {
        TransactionData {
            kind: self.kind.clone(),
            sender: self.sender,
            gas_payment: self.gas.coins.clone(),
            gas_owner: self.sender,
            gas_price: self.gas.price,
            gas_budget,
        }
    }
}

/// 预算已确定，可签名提交（签名后即被消费）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetedTransaction {
    data: TransactionData,
}

impl BudgetedTransaction {
    pub fn gas_budget(&self) -> u64 {
        self.data.gas_budget
    }

    pub fn to_bcs_bytes(&self) -> Vec<u8> {
        self.data.to_bcs_bytes()
    }
}

/// base64(BCS(TransactionData)) + base64 序列化签名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: String,
    pub signatures: Vec<String>,
}
