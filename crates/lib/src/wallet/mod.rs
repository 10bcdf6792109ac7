pub mod keychain_wallet;
pub mod keypair;
pub mod signer;

pub use keychain_wallet::KeychainWallet;
pub use keypair::{load_keypair, KeypairSource};
pub use signer::{MockWalletSigner, WalletSigner};
