#![allow(unexpected_cfgs)]

//! # Airdrop: Solana Anchor Program
//!
//! SPL-token airdrop escrow:
//!  - depositor locks tokens in a holding account owned by a per-airdrop PDA
//!  - anyone may claim a fixed amount per call until the balance runs out
//!  - depositor may cancel at any time and take back whatever is left
//!  - on-chain events for off-chain observability

use anchor_lang::prelude::*;

pub mod authority;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("Ek6Jpdv5iEEDLXTVQ8UFcntms3DT2ewHtzzwH2R5MpvN");

#[program]
pub mod airdrop {
    use super::*;

    /// Lock `amount` tokens and open the airdrop with a fixed `claim_amount`.
    pub fn initialize_airdrop(
        ctx: Context<InitializeAirdrop>,
        amount: u64,
        claim_amount: u64,
    ) -> Result<()> {
        initialize::handler(ctx, amount, claim_amount)
    }

    /// Pay `claim_amount` from the holding account to any token account of the mint.
    pub fn get_airdrop(ctx: Context<GetAirdrop>) -> Result<()> {
        get_airdrop::handler(ctx)
    }

    /// Refund the remaining balance to the depositor and mark the airdrop cancelled.
    pub fn cancel_airdrop(ctx: Context<CancelAirdrop>) -> Result<()> {
        cancel::handler(ctx)
    }
}
