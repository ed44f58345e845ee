use anchor_lang::prelude::*;

use crate::errors::AirdropError;

/// Lifecycle of an airdrop. `Cancelled` is terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AirdropStatus {
    #[default]
    Active,
    Cancelled,
}

/// One airdrop escrow. Created by `initialize_airdrop`, only ever mutated by
/// `cancel_airdrop`. The live balance of `airdrop_token_account` is the
/// source of truth for what is left to claim.
#[account]
#[derive(Default)]
pub struct AirdropState {
    /// Depositor; the only signer allowed to cancel
    pub initializer: Pubkey,
    /// SPL mint held by this airdrop
    pub mint: Pubkey,
    /// Token account the deposit came from; cancel refunds go back here
    pub deposit_token_account: Pubkey,
    /// Holding token account, owned by the derived authority while active
    pub airdrop_token_account: Pubkey,
    /// Amount locked at initialisation
    pub total_deposited: u64,
    /// Fixed amount paid out by every successful claim
    pub claim_amount: u64,
    /// Bump of the authority PDA, seeds = [AUTHORITY_SEED, airdrop_state]
    pub authority_bump: u8,
    pub status: AirdropStatus,
}

impl AirdropState {
    pub const LEN: usize = 8    // discriminator
        + 32 + 32 + 32 + 32     // initializer, mint, deposit_token_account, airdrop_token_account
        + 8 + 8                 // total_deposited, claim_amount
        + 1 + 1; // authority_bump, status

    pub fn validate_amounts(amount: u64, claim_amount: u64) -> Result<()> {
        require!(amount > 0, AirdropError::InvalidAmount);
        require!(claim_amount > 0, AirdropError::InvalidAmount);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == AirdropStatus::Active
    }

    pub fn is_initializer(&self, key: &Pubkey) -> bool {
        self.initializer == *key
    }

    /// Amount a claim may move given the holding account's current balance.
    pub fn claimable(&self, available: u64) -> Result<u64> {
        require!(self.is_active(), AirdropError::AlreadyCancelled);
        require_gte!(available, self.claim_amount, AirdropError::InsufficientFunds);
        Ok(self.claim_amount)
    }

    pub fn cancel(&mut self) -> Result<()> {
        require!(self.is_active(), AirdropError::AlreadyCancelled);
        self.status = AirdropStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(code: AirdropError) -> anchor_lang::error::Error {
        code.into()
    }

    fn active(claim_amount: u64) -> AirdropState {
        AirdropState {
            initializer: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            deposit_token_account: Pubkey::new_unique(),
            airdrop_token_account: Pubkey::new_unique(),
            total_deposited: 500,
            claim_amount,
            authority_bump: 255,
            status: AirdropStatus::Active,
        }
    }

    #[test]
    fn len_matches_serialized_size() {
        let mut buf = Vec::new();
        active(3).try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), AirdropState::LEN);
    }

    #[test]
    fn status_is_one_byte_on_the_wire() {
        let mut buf = Vec::new();
        AirdropStatus::Cancelled.serialize(&mut buf).unwrap();
        assert_eq!(buf, vec![1]);
    }

    #[test]
    fn zero_amounts_are_rejected() {
        assert_eq!(
            AirdropState::validate_amounts(0, 3).unwrap_err(),
            err(AirdropError::InvalidAmount)
        );
        assert_eq!(
            AirdropState::validate_amounts(500, 0).unwrap_err(),
            err(AirdropError::InvalidAmount)
        );
        assert!(AirdropState::validate_amounts(500, 3).is_ok());
    }

    #[test]
    fn claim_larger_than_deposit_is_accepted_at_init() {
        assert!(AirdropState::validate_amounts(2, 3).is_ok());
    }

    #[test]
    fn claimable_returns_fixed_amount() {
        let state = active(3);
        assert_eq!(state.claimable(500).unwrap(), 3);
        assert_eq!(state.claimable(3).unwrap(), 3);
    }

    #[test]
    fn claimable_rejects_short_balance() {
        let state = active(3);
        assert_eq!(
            state.claimable(2).unwrap_err(),
            err(AirdropError::InsufficientFunds)
        );
        assert_eq!(
            state.claimable(0).unwrap_err(),
            err(AirdropError::InsufficientFunds)
        );
    }

    #[test]
    fn only_the_initializer_matches() {
        let state = active(3);
        assert!(state.is_initializer(&state.initializer));
        assert!(!state.is_initializer(&Pubkey::new_unique()));
    }

    #[test]
    fn cancel_is_terminal() {
        let mut state = active(3);
        state.cancel().unwrap();
        assert_eq!(state.status, AirdropStatus::Cancelled);
        assert!(!state.is_active());
        assert_eq!(
            state.cancel().unwrap_err(),
            err(AirdropError::AlreadyCancelled)
        );
        assert_eq!(
            state.claimable(500).unwrap_err(),
            err(AirdropError::AlreadyCancelled)
        );
    }
}
