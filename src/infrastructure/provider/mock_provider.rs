//! 测试用的内存账本：返回预置响应，并记录每一次调用

use crate::errors::AppError;
use crate::infrastructure::provider::ProviderTrait;
use crate::models::rpc::{CoinDto, CoinPage, DryRunResponse, ExecuteResponse, ObjectResponse};
use crate::models::{ObjectId, SuiAddress};
use crate::services::tx::types::SignedTransaction;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;

pub const TEST_GAS_PRICE: u64 = 750;

pub fn coin_dto(id: &str, balance: u64) -> CoinDto {
    CoinDto {
        coin_type: "0x2::sui::SUI".to_string(),
        coin_object_id: id.to_string(),
        version: "7".to_string(),
        digest: bs58::encode([4u8; 32]).into_string(),
        balance: balance.to_string(),
    }
}

pub fn dry_run_response(status: Value, computation: u64, storage: u64, rebate: u64) -> DryRunResponse {
    serde_json::from_value(json!({
        "effects": {
            "status": status,
            "gasUsed": {
                "computationCost": computation.to_string(),
                "storageCost": storage.to_string(),
                "storageRebate": rebate.to_string(),
                "nonRefundableStorageFee": "0"
            }
        },
        "events": []
    }))
    .expect("valid dry run fixture")
}

pub fn execute_response(digest: &str, status: Value, events: Value) -> ExecuteResponse {
    serde_json::from_value(json!({
        "digest": digest,
        "effects": {
            "status": status,
            "gasUsed": {
                "computationCost": "1000000",
                "storageCost": "500000",
                "storageRebate": "100000",
                "nonRefundableStorageFee": "0"
            }
        },
        "events": events
    }))
    .expect("valid execute fixture")
}

pub struct MockProvider {
    pub coin_pages: Vec<Vec<CoinDto>>,
    pub object: Value,
    pub dry_run: Result<DryRunResponse, String>,
    pub execute: Result<ExecuteResponse, String>,
    calls: Mutex<Vec<String>>,
    dry_run_bytes: Mutex<Vec<String>>,
    submitted: Mutex<Vec<SignedTransaction>>,
}

impl MockProvider {
    /// 一个 5 SUI 的 coin、共享 treasury、成功的 dry run 与执行
    pub fn new() -> Self {
        Self {
            coin_pages: vec![vec![coin_dto("0xc0", 5_000_000_000)]],
            object: json!({
                "data": {
                    "objectId": "0x7e",
                    "version": "20",
                    "digest": bs58::encode([5u8; 32]).into_string(),
                    "owner": { "Shared": { "initial_shared_version": 11 } }
                }
            }),
            dry_run: Ok(dry_run_response(json!({ "status": "success" }), 1_000_000, 500_000, 100_000)),
            execute: Ok(execute_response("Dg1", json!({ "status": "success" }), json!([]))),
            calls: Mutex::new(Vec::new()),
            dry_run_bytes: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_coin_pages(mut self, pages: Vec<Vec<CoinDto>>) -> Self {
        self.coin_pages = pages;
        self
    }

    pub fn with_object(mut self, object: Value) -> Self {
        self.object = object;
        self
    }

    pub fn with_dry_run(mut self, dry_run: Result<DryRunResponse, String>) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_execute(mut self, execute: Result<ExecuteResponse, String>) -> Self {
        self.execute = execute;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn dry_run_bytes(&self) -> Vec<String> {
        self.dry_run_bytes.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl ProviderTrait for MockProvider {
    async fn get_coins(
        &self,
        _owner: &SuiAddress,
        _coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, AppError> {
        self.record("suix_getCoins");
        // cursor 即页码
        let page = cursor.map(|c| c.parse::<usize>().unwrap()).unwrap_or(0);
        let has_next_page = page + 1 < self.coin_pages.len();
        Ok(CoinPage {
            data: self.coin_pages.get(page).cloned().unwrap_or_default(),
            next_cursor: has_next_page.then(|| (page + 1).to_string()),
            has_next_page,
        })
    }

    async fn get_reference_gas_price(&self) -> Result<u64, AppError> {
        self.record("suix_getReferenceGasPrice");
        Ok(TEST_GAS_PRICE)
    }

    async fn get_object(&self, _id: &ObjectId) -> Result<ObjectResponse, AppError> {
        self.record("sui_getObject");
        Ok(serde_json::from_value(self.object.clone())?)
    }

    async fn dry_run(&self, tx_bytes: &str) -> Result<DryRunResponse, AppError> {
        self.record("sui_dryRunTransactionBlock");
        self.dry_run_bytes.lock().unwrap().push(tx_bytes.to_string());
        self.dry_run.clone().map_err(AppError::SimulationFailed)
    }

    async fn execute_transaction(
        &self,
        signed: &SignedTransaction,
    ) -> Result<ExecuteResponse, AppError> {
        self.record("sui_executeTransactionBlock");
        self.submitted.lock().unwrap().push(signed.clone());
        self.execute.clone().map_err(AppError::Submission)
    }
}
