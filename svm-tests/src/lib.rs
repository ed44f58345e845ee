//! Instruction-level harness for the airdrop program.
//!
//! Loads the compiled program (`target/deploy/airdrop.so`) next to the SPL
//! Token program in Mollusk and keeps an account store that carries the
//! accounts written by one instruction into the next, so whole lifecycles run
//! through the real entry points, account constraints and token CPIs.

use std::{collections::HashMap, str::FromStr, sync::Once};

use mollusk_svm::{
    program::keyed_account_for_system_program,
    result::{Check, InstructionResult},
    Mollusk,
};
use mollusk_svm_programs_token::token;
use solana_sdk::{
    account::Account,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

pub const PROGRAM_ID: &str = "Ek6Jpdv5iEEDLXTVQ8UFcntms3DT2ewHtzzwH2R5MpvN";
pub const AUTHORITY_SEED: &[u8] = b"airdrop-authority";

// sha256("global:<name>")[..8]
const INITIALIZE_AIRDROP: [u8; 8] = [96, 196, 74, 102, 61, 195, 48, 184];
const GET_AIRDROP: [u8; 8] = [65, 235, 201, 36, 73, 65, 168, 167];
const CANCEL_AIRDROP: [u8; 8] = [33, 234, 12, 134, 155, 39, 138, 27];

/// sha256("account:AirdropState")[..8]
pub const AIRDROP_STATE_DISCRIMINATOR: [u8; 8] = [1, 49, 110, 205, 185, 136, 198, 165];
pub const AIRDROP_STATE_LEN: usize = 154;
const STATUS_OFFSET: usize = AIRDROP_STATE_LEN - 1;

pub const STATUS_ACTIVE: u8 = 0;
pub const STATUS_CANCELLED: u8 = 1;

const TOKEN_ACCOUNT_LEN: usize = 165;
const MINT_LEN: usize = 82;
const TOKEN_ACCOUNT_LAMPORTS: u64 = 2_039_280;
const MINT_LAMPORTS: u64 = 1_461_600;
const WALLET_LAMPORTS: u64 = 10_000_000_000;

/// Custom error codes of `AirdropError` (Anchor offsets them by 6000).
pub mod codes {
    pub const INVALID_AMOUNT: u32 = 6000;
    pub const INSUFFICIENT_FUNDS: u32 = 6001;
    pub const UNAUTHORIZED: u32 = 6002;
    pub const ALREADY_CANCELLED: u32 = 6003;
    pub const ACCOUNT_MISMATCH: u32 = 6004;
    pub const AUTHORITY_DERIVATION_MISMATCH: u32 = 6005;
}

/// Addresses of one airdrop instance.
#[derive(Clone, Copy, Debug)]
pub struct Airdrop {
    pub initializer: Pubkey,
    pub deposit: Pubkey,
    pub state: Pubkey,
    pub holding: Pubkey,
    pub authority: Pubkey,
}

pub struct Harness {
    mollusk: Mollusk,
    pub program_id: Pubkey,
    pub token_program: Pubkey,
    pub system_program: Pubkey,
    pub mint: Pubkey,
    accounts: HashMap<Pubkey, Account>,
}

static DEPLOY_DIR: Once = Once::new();

impl Harness {
    pub fn new() -> Self {
        DEPLOY_DIR.call_once(|| {
            if std::env::var_os("SBF_OUT_DIR").is_none() {
                std::env::set_var(
                    "SBF_OUT_DIR",
                    concat!(env!("CARGO_MANIFEST_DIR"), "/../target/deploy"),
                );
            }
        });

        let program_id = Pubkey::from_str(PROGRAM_ID).expect("program id");
        let mut mollusk = Mollusk::new(&program_id, "airdrop");
        token::add_program(&mut mollusk);

        let (token_program, token_program_account) = token::keyed_account();
        let (system_program, system_program_account) = keyed_account_for_system_program();

        let mut accounts = HashMap::new();
        accounts.insert(token_program, token_program_account);
        accounts.insert(system_program, system_program_account);

        let mint = Pubkey::new_unique();
        accounts.insert(
            mint,
            Account {
                lamports: MINT_LAMPORTS,
                data: mint_data(&Pubkey::new_unique(), u64::MAX / 2, 0),
                owner: token_program,
                executable: false,
                rent_epoch: 0,
            },
        );

        Self {
            mollusk,
            program_id,
            token_program,
            system_program,
            mint,
            accounts,
        }
    }

    /// A funded system account.
    pub fn wallet(&mut self) -> Pubkey {
        let key = Pubkey::new_unique();
        self.accounts.insert(
            key,
            Account {
                lamports: WALLET_LAMPORTS,
                data: vec![],
                owner: self.system_program,
                executable: false,
                rent_epoch: 0,
            },
        );
        key
    }

    /// An initialised token account of the harness mint.
    pub fn token_account(&mut self, owner: &Pubkey, amount: u64) -> Pubkey {
        let key = Pubkey::new_unique();
        self.accounts.insert(
            key,
            Account {
                lamports: TOKEN_ACCOUNT_LAMPORTS,
                data: token_account_data(&self.mint, owner, amount),
                owner: self.token_program,
                executable: false,
                rent_epoch: 0,
            },
        );
        key
    }

    pub fn exists(&self, key: &Pubkey) -> bool {
        self.accounts
            .get(key)
            .is_some_and(|account| account.lamports > 0)
    }

    pub fn balance(&self, token_account: &Pubkey) -> u64 {
        let data = &self.accounts[token_account].data;
        u64::from_le_bytes(data[64..72].try_into().expect("amount"))
    }

    pub fn token_owner(&self, token_account: &Pubkey) -> Pubkey {
        let data = &self.accounts[token_account].data;
        Pubkey::new_from_array(data[32..64].try_into().expect("owner"))
    }

    pub fn state_data(&self, state: &Pubkey) -> &[u8] {
        &self.accounts[state].data
    }

    pub fn status(&self, state: &Pubkey) -> u8 {
        self.state_data(state)[STATUS_OFFSET]
    }

    pub fn find_authority(&self, state: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(&[AUTHORITY_SEED, state.as_ref()], &self.program_id)
    }

    /// Run `ix` against the store, assert `checks`, and keep the written
    /// accounts when the instruction succeeded.
    pub fn process(&mut self, ix: &Instruction, checks: &[Check]) -> InstructionResult {
        let mut accounts: Vec<(Pubkey, Account)> = Vec::with_capacity(ix.accounts.len());
        for meta in &ix.accounts {
            if accounts.iter().any(|(key, _)| *key == meta.pubkey) {
                continue;
            }
            let account = self.accounts.get(&meta.pubkey).cloned().unwrap_or_default();
            accounts.push((meta.pubkey, account));
        }

        let result = self
            .mollusk
            .process_and_validate_instruction(ix, &accounts, checks);
        if result.raw_result.is_ok() {
            for (key, account) in &result.resulting_accounts {
                self.accounts.insert(*key, account.clone());
            }
        }
        result
    }

    /// Addresses for a new airdrop whose depositor holds `deposit_balance`.
    /// Nothing is sent to the program yet.
    pub fn prepare(&mut self, deposit_balance: u64) -> Airdrop {
        let initializer = self.wallet();
        let deposit = self.token_account(&initializer, deposit_balance);
        let state = Pubkey::new_unique();
        let holding = self.token_account(&state, 0);
        let (authority, _) = self.find_authority(&state);
        Airdrop {
            initializer,
            deposit,
            state,
            holding,
            authority,
        }
    }

    /// Prepare and initialise an airdrop, asserting success.
    pub fn open(&mut self, amount: u64, claim_amount: u64) -> Airdrop {
        let airdrop = self.prepare(amount);
        let ix = self.initialize_ix(&airdrop, amount, claim_amount);
        self.process(&ix, &[Check::success()]);
        airdrop
    }

    pub fn initialize_ix(&self, airdrop: &Airdrop, amount: u64, claim_amount: u64) -> Instruction {
        let mut data = INITIALIZE_AIRDROP.to_vec();
        data.extend_from_slice(&amount.to_le_bytes());
        data.extend_from_slice(&claim_amount.to_le_bytes());
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(airdrop.initializer, true),
                AccountMeta::new_readonly(self.mint, false),
                AccountMeta::new(airdrop.deposit, false),
                AccountMeta::new(airdrop.state, true),
                AccountMeta::new(airdrop.holding, false),
                AccountMeta::new_readonly(airdrop.authority, false),
                AccountMeta::new_readonly(self.token_program, false),
                AccountMeta::new_readonly(self.system_program, false),
            ],
            data,
        }
    }

    pub fn get_airdrop_ix(
        &self,
        state: &Pubkey,
        authority: &Pubkey,
        holding: &Pubkey,
        taker: &Pubkey,
    ) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(*state, false),
                AccountMeta::new_readonly(*authority, false),
                AccountMeta::new_readonly(self.mint, false),
                AccountMeta::new(*holding, false),
                AccountMeta::new(*taker, false),
                AccountMeta::new_readonly(self.token_program, false),
            ],
            data: GET_AIRDROP.to_vec(),
        }
    }

    pub fn cancel_ix(
        &self,
        signer: &Pubkey,
        state: &Pubkey,
        authority: &Pubkey,
        holding: &Pubkey,
        refund_to: &Pubkey,
    ) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new_readonly(*signer, true),
                AccountMeta::new(*state, false),
                AccountMeta::new_readonly(*authority, false),
                AccountMeta::new_readonly(self.mint, false),
                AccountMeta::new(*holding, false),
                AccountMeta::new(*refund_to, false),
                AccountMeta::new_readonly(self.token_program, false),
            ],
            data: CANCEL_AIRDROP.to_vec(),
        }
    }

    pub fn claim(&mut self, airdrop: &Airdrop, taker: &Pubkey, checks: &[Check]) -> InstructionResult {
        let ix = self.get_airdrop_ix(&airdrop.state, &airdrop.authority, &airdrop.holding, taker);
        self.process(&ix, checks)
    }

    pub fn cancel(&mut self, airdrop: &Airdrop, signer: &Pubkey, checks: &[Check]) -> InstructionResult {
        let ix = self.cancel_ix(
            signer,
            &airdrop.state,
            &airdrop.authority,
            &airdrop.holding,
            &airdrop.deposit,
        );
        self.process(&ix, checks)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

/// SPL Token mint layout (82 bytes).
fn mint_data(authority: &Pubkey, supply: u64, decimals: u8) -> Vec<u8> {
    let mut data = vec![0u8; MINT_LEN];
    data[0..4].copy_from_slice(&1u32.to_le_bytes());
    data[4..36].copy_from_slice(authority.as_ref());
    data[36..44].copy_from_slice(&supply.to_le_bytes());
    data[44] = decimals;
    data[45] = 1; // is_initialized
    data
}

/// SPL Token account layout (165 bytes), initialised, no delegate or close authority.
fn token_account_data(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[64..72].copy_from_slice(&amount.to_le_bytes());
    data[108] = 1; // AccountState::Initialized
    data
}
