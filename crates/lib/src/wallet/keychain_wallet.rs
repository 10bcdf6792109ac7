use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_keychain::{Signer, SolanaSigner};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::Arc;

use crate::{error::ReclaimError, sanitize_error, wallet::keypair::load_keypair, wallet::signer::WalletSigner};

/// Wallet backed by a `solana-keychain` signer that broadcasts through an RPC client
pub struct KeychainWallet {
    signer: Signer,
    rpc_client: Arc<RpcClient>,
}

impl KeychainWallet {
    pub fn new(signer: Signer, rpc_client: Arc<RpcClient>) -> Self {
        Self { signer, rpc_client }
    }

    /// Builds an in-memory signer from a keypair file path, byte array or base58 key
    pub fn from_private_key(private_key: &str, rpc_client: Arc<RpcClient>) -> Result<Self, ReclaimError> {
        let keypair = load_keypair(private_key)?;
        let signer = Signer::from_memory(&keypair.to_base58_string()).map_err(|e| {
            ReclaimError::SigningError(format!("Failed to create memory signer: {}", sanitize_error!(e)))
        })?;
        Ok(Self::new(signer, rpc_client))
    }
}

#[async_trait]
impl WalletSigner for KeychainWallet {
    fn pubkey(&self) -> Pubkey {
        self.signer.pubkey()
    }

    async fn sign_and_send(&self, mut transaction: Transaction) -> Result<Signature, ReclaimError> {
        let message_bytes = transaction.message.serialize();
        let signature = self.signer.sign_message(&message_bytes).await?;
        transaction.signatures = vec![signature];

        log::debug!("Broadcasting transaction {signature}");
        Ok(self.rpc_client.send_transaction(&transaction).await?)
    }
}
