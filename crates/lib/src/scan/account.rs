use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use solana_account_decoder::{UiAccountData, UiAccountEncoding};
use solana_client::rpc_response::RpcKeyedAccount;
use solana_program_pack::Pack;
use solana_sdk::{program_option::COption, pubkey::Pubkey};
use spl_token_2022_interface::extension::StateWithExtensions;
use std::str::FromStr;

use crate::{constant::MINT_LABEL_LEN, reclaim::fee::lamports_to_sol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAccountState {
    Uninitialized,
    Initialized,
    Frozen,
}

impl TokenAccountState {
    fn from_parsed(state: &str) -> Option<Self> {
        match state {
            "uninitialized" => Some(Self::Uninitialized),
            "initialized" => Some(Self::Initialized),
            "frozen" => Some(Self::Frozen),
            _ => None,
        }
    }
}

impl From<spl_token_interface::state::AccountState> for TokenAccountState {
    fn from(state: spl_token_interface::state::AccountState) -> Self {
        use spl_token_interface::state::AccountState;
        match state {
            AccountState::Uninitialized => Self::Uninitialized,
            AccountState::Initialized => Self::Initialized,
            AccountState::Frozen => Self::Frozen,
        }
    }
}

impl From<spl_token_2022_interface::state::AccountState> for TokenAccountState {
    fn from(state: spl_token_2022_interface::state::AccountState) -> Self {
        use spl_token_2022_interface::state::AccountState;
        match state {
            AccountState::Uninitialized => Self::Uninitialized,
            AccountState::Initialized => Self::Initialized,
            AccountState::Frozen => Self::Frozen,
        }
    }
}

/// The fields of an on-chain token account the scanner cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountSnapshot {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub state: TokenAccountState,
    pub close_authority: Option<Pubkey>,
    pub data_len: usize,
    pub token_program: Pubkey,
}

impl TokenAccountSnapshot {
    /// Decodes a keyed account returned by `getTokenAccountsByOwner`.
    ///
    /// Both `jsonParsed` and raw binary encodings are accepted. Returns `None` when the
    /// address or the account data cannot be interpreted as a token account.
    pub fn from_keyed_account(keyed: &RpcKeyedAccount, token_program: &Pubkey) -> Option<Self> {
        let address = Pubkey::from_str(&keyed.pubkey).ok()?;
        let declared_len = keyed.account.space.map(|space| space as usize);

        let mut snapshot = match &keyed.account.data {
            UiAccountData::Json(parsed) => {
                let mut snapshot = parse_json_info(address, &parsed.parsed, token_program)?;
                if parsed.space > 0 {
                    snapshot.data_len = parsed.space as usize;
                }
                snapshot
            }
            UiAccountData::Binary(data, UiAccountEncoding::Base64) => {
                let bytes = STANDARD.decode(data).ok()?;
                unpack_token_account(address, &bytes, token_program)?
            }
            UiAccountData::Binary(data, UiAccountEncoding::Base58)
            | UiAccountData::LegacyBinary(data) => {
                let bytes = bs58::decode(data).into_vec().ok()?;
                unpack_token_account(address, &bytes, token_program)?
            }
            UiAccountData::Binary(_, _) => return None,
        };

        if let Some(len) = declared_len.filter(|len| *len > 0) {
            snapshot.data_len = len;
        }
        Some(snapshot)
    }

    /// Whether `owner` can close this account right now
    pub fn closable_by(&self, owner: &Pubkey) -> bool {
        self.state == TokenAccountState::Initialized
            && self.close_authority.is_none_or(|authority| authority == *owner)
    }
}

fn parse_json_info(address: Pubkey, parsed: &Value, token_program: &Pubkey) -> Option<TokenAccountSnapshot> {
    let info = parsed.get("info")?;
    let mint = Pubkey::from_str(info.get("mint")?.as_str()?).ok()?;
    let amount = info.get("tokenAmount")?.get("amount")?.as_str()?.parse().ok()?;
    let state = TokenAccountState::from_parsed(info.get("state")?.as_str()?)?;
    let close_authority = match info.get("closeAuthority").and_then(Value::as_str) {
        Some(authority) => Some(Pubkey::from_str(authority).ok()?),
        None => None,
    };

    Some(TokenAccountSnapshot {
        address,
        mint,
        amount,
        state,
        close_authority,
        data_len: spl_token_interface::state::Account::LEN,
        token_program: *token_program,
    })
}

fn unpack_token_account(address: Pubkey, bytes: &[u8], token_program: &Pubkey) -> Option<TokenAccountSnapshot> {
    if *token_program == spl_token_2022_interface::id() {
        let account =
            StateWithExtensions::<spl_token_2022_interface::state::Account>::unpack(bytes).ok()?;
        let base = account.base;
        return Some(TokenAccountSnapshot {
            address,
            mint: base.mint,
            amount: base.amount,
            state: base.state.into(),
            close_authority: coption_to_option(base.close_authority),
            data_len: bytes.len(),
            token_program: *token_program,
        });
    }

    let account = spl_token_interface::state::Account::unpack(bytes).ok()?;
    Some(TokenAccountSnapshot {
        address,
        mint: account.mint,
        amount: account.amount,
        state: account.state.into(),
        close_authority: coption_to_option(account.close_authority),
        data_len: bytes.len(),
        token_program: *token_program,
    })
}

fn coption_to_option(value: COption<Pubkey>) -> Option<Pubkey> {
    match value {
        COption::Some(value) => Some(value),
        COption::None => None,
    }
}

/// Short display label for a mint
pub fn mint_label(mint: &Pubkey) -> String {
    mint.to_string().chars().take(MINT_LABEL_LEN).collect()
}

/// A zero-balance token account and the deposit closing it would return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAccountRecord {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub mint_label: String,
    /// Rent-exempt minimum for the account's data length
    pub reclaimable_lamports: u64,
    pub token_program: Pubkey,
    pub data_len: usize,
}

impl EmptyAccountRecord {
    pub fn new(snapshot: &TokenAccountSnapshot, reclaimable_lamports: u64) -> Self {
        Self {
            address: snapshot.address,
            mint: snapshot.mint,
            mint_label: mint_label(&snapshot.mint),
            reclaimable_lamports,
            token_program: snapshot.token_program,
            data_len: snapshot.data_len,
        }
    }

    pub fn reclaimable_sol(&self) -> f64 {
        lamports_to_sol(self.reclaimable_lamports)
    }
}
