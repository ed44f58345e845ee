use anchor_lang::prelude::*;

#[error_code]
pub enum AirdropError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Airdrop token account holds less than the claim amount")]
    InsufficientFunds,
    #[msg("Only the airdrop initializer may do this")]
    Unauthorized,
    #[msg("Airdrop has already been cancelled")]
    AlreadyCancelled,
    #[msg("Account does not belong to this airdrop")]
    AccountMismatch,
    #[msg("Authority does not match the derivation stored for this airdrop")]
    AuthorityDerivationMismatch,
    #[msg("Arithmetic overflow")]
    Overflow,
}
