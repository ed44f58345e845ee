use anchor_lang::prelude::*;

#[event]
pub struct AirdropInitialised {
    pub airdrop: Pubkey,
    pub initializer: Pubkey,
    pub mint: Pubkey,
    pub total_deposited: u64,
    pub claim_amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct AirdropClaimed {
    pub airdrop: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub remaining: u64,
    pub timestamp: i64,
}

#[event]
pub struct AirdropCancelled {
    pub airdrop: Pubkey,
    pub initializer: Pubkey,
    pub refunded: u64,
    pub timestamp: i64,
}
