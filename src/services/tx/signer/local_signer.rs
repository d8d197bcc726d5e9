// services/tx/signer/local_signer.rs

use crate::errors::AppError;
use crate::infrastructure::codec::BcsWriter;
use crate::models::SuiAddress;
use crate::services::tx::signer::TxSigner;
use crate::services::tx::types::{BudgetedTransaction, SignedTransaction};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};
use std::sync::Arc;

type Blake2b256 = Blake2b<U32>;

/// 签名方案标记字节
pub const ED25519_FLAG: u8 = 0x00;
const SEED_LENGTH: usize = 32;
/// Intent { scope: TransactionData, version: V0, app_id: Sui }
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// 地址 = blake2b256(flag || pubkey)
pub fn derive_address(public_key: &[u8; 32]) -> SuiAddress {
    SuiAddress::new(blake2b256(&[&[ED25519_FLAG], public_key]))
}

#[derive(Clone)]
pub struct LocalSigner {
    key: Arc<SigningKey>,
    address: SuiAddress,
}

impl LocalSigner {
    pub fn new(key: SigningKey) -> Self {
        let address = derive_address(&key.verifying_key().to_bytes());
        Self {
            key: Arc::new(key),
            address,
        }
    }

    /// 支持两种格式：
    /// - hex 32 字节种子（可带 0x）
    /// - base64 的 flag || seed（sui.keystore 格式），或裸 32 字节种子
    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(AppError::InvalidSecret("私钥为空".to_string()));
        }
        if secret.starts_with("suiprivkey") {
            return Err(AppError::InvalidSecret(
                "暂不支持 bech32 (suiprivkey) 格式，请使用 `sui keytool convert` 导出 base64/hex".to_string(),
            ));
        }

        let hex_str = secret.strip_prefix("0x").unwrap_or(secret);
        if hex_str.len() == SEED_LENGTH * 2 {
            if let Ok(bytes) = hex::decode(hex_str) {
                return Self::from_seed(&bytes);
            }
        }

        let raw = STANDARD
            .decode(secret)
            .map_err(|e| AppError::InvalidSecret(format!("既不是 hex 也不是 base64: {}", e)))?;
        match raw.len() {
            SEED_LENGTH => Self::from_seed(&raw),
            len if len == SEED_LENGTH + 1 => {
                if raw[0] != ED25519_FLAG {
                    return Err(AppError::InvalidSecret(format!(
                        "仅支持 ed25519 (flag=0x00)，实际 flag=0x{:02x}",
                        raw[0]
                    )));
                }
                Self::from_seed(&raw[1..])
            }
            len => Err(AppError::InvalidSecret(format!("私钥长度 {} 字节不合法", len))),
        }
    }

    fn from_seed(seed: &[u8]) -> Result<Self, AppError> {
        let seed: [u8; SEED_LENGTH] = seed
            .try_into()
            .map_err(|_| AppError::InvalidSecret(format!("种子长度应为 {} 字节", SEED_LENGTH)))?;
        Ok(Self::new(SigningKey::from_bytes(&seed)))
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    /// flag || signature(64) || pubkey(32)，签名对象为 blake2b256(intent || tx_bytes)
    fn sign_bytes(&self, tx_bytes: &[u8]) -> Vec<u8> {
        let digest = blake2b256(&[&TRANSACTION_INTENT, tx_bytes]);
        let signature = self.key.sign(&digest);

        let mut w = BcsWriter::new();
        w.write_u8(ED25519_FLAG)
            .write_fixed(&signature.to_bytes())
            .write_fixed(&self.public_key());
        w.into_bytes()
    }
}

#[async_trait::async_trait]
impl TxSigner for LocalSigner {
    async fn sign_tx(&self, tx: BudgetedTransaction) -> Result<SignedTransaction, AppError> {
        let tx_bytes = tx.to_bcs_bytes();
        let signature = self.sign_bytes(&tx_bytes);
        Ok(SignedTransaction {
            tx_bytes: STANDARD.encode(&tx_bytes),
            signatures: vec![STANDARD.encode(signature)],
        })
    }

    fn address(&self) -> SuiAddress {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tx::types::{GasPayment, ProgrammableTransaction, UnsignedTransaction};
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    const SEED: [u8; 32] = [7u8; 32];

    #[test]
    fn hex_and_base64_secrets_resolve_to_same_key() {
        let from_hex = LocalSigner::from_secret(&hex::encode(SEED)).unwrap();
        let from_0x = LocalSigner::from_secret(&format!("0x{}", hex::encode(SEED))).unwrap();

        let mut keystore = vec![ED25519_FLAG];
        keystore.extend_from_slice(&SEED);
        let from_keystore = LocalSigner::from_secret(&STANDARD.encode(&keystore)).unwrap();
        let from_raw_b64 = LocalSigner::from_secret(&STANDARD.encode(SEED)).unwrap();

        assert_eq!(from_hex.address(), from_0x.address());
        assert_eq!(from_hex.address(), from_keystore.address());
        assert_eq!(from_hex.address(), from_raw_b64.address());
    }

    #[test]
    fn rejects_unsupported_secrets() {
        assert!(LocalSigner::from_secret("").is_err());
        assert!(LocalSigner::from_secret("suiprivkey1qq...").is_err());

        let mut secp = vec![0x01];
        secp.extend_from_slice(&SEED);
        assert!(matches!(
            LocalSigner::from_secret(&STANDARD.encode(&secp)),
            Err(AppError::InvalidSecret(_))
        ));
        assert!(LocalSigner::from_secret(&STANDARD.encode([1u8; 20])).is_err());
    }

    #[test]
    fn address_is_blake2b_of_flag_and_pubkey() {
        let signer = LocalSigner::new(SigningKey::from_bytes(&SEED));
        let pk = signer.public_key();
        let mut h = Blake2b256::new();
        h.update([ED25519_FLAG]);
        h.update(pk);
        assert_eq!(signer.address().as_bytes()[..], h.finalize()[..]);
    }

    #[tokio::test]
    async fn signature_verifies_over_intent_digest() {
        let signer = LocalSigner::new(SigningKey::from_bytes(&SEED));
        let tx = UnsignedTransaction::new(
            signer.address(),
            ProgrammableTransaction::default(),
            GasPayment {
                coins: vec![],
                price: 1000,
                balance: 0,
            },
        )
        .with_gas_budget(2_600_000);
        let expected_bytes = tx.to_bcs_bytes();

        let signed = signer.sign_tx(tx).await.unwrap();
        assert_eq!(STANDARD.decode(&signed.tx_bytes).unwrap(), expected_bytes);

        let serialized = STANDARD.decode(&signed.signatures[0]).unwrap();
        assert_eq!(serialized.len(), 1 + 64 + 32);
        assert_eq!(serialized[0], ED25519_FLAG);

        let sig = Signature::from_slice(&serialized[1..65]).unwrap();
        let pk: [u8; 32] = serialized[65..].try_into().unwrap();
        let vk = VerifyingKey::from_bytes(&pk).unwrap();
        let digest = blake2b256(&[&TRANSACTION_INTENT, &expected_bytes]);
        assert!(vk.verify(&digest, &sig).is_ok());
    }
}
