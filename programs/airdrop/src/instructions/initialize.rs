use crate::{
    authority::find_authority,
    errors::AirdropError,
    events::AirdropInitialised,
    state::{AirdropState, AirdropStatus},
};
use anchor_lang::prelude::*;
use anchor_spl::token::{
    self, spl_token::instruction::AuthorityType, Mint, SetAuthority, Token, TokenAccount,
    TransferChecked,
};

#[derive(Accounts)]
pub struct InitializeAirdrop<'info> {
    #[account(mut)]
    pub initializer: Signer<'info>,

    pub mint: Account<'info, Mint>,

    /// Source of the deposit, owned by the initializer
    #[account(
        mut,
        constraint = deposit_token_account.owner == initializer.key() @ AirdropError::AccountMismatch,
        constraint = deposit_token_account.mint  == mint.key()        @ AirdropError::AccountMismatch,
    )]
    pub deposit_token_account: Account<'info, TokenAccount>,

    /// Fresh keypair account; signs as the holding account's current owner
    #[account(init, payer = initializer, space = AirdropState::LEN)]
    pub airdrop_state: Account<'info, AirdropState>,

    /// Holding account, created empty by the client with airdrop_state as owner
    #[account(
        mut,
        constraint = airdrop_token_account.key() != deposit_token_account.key() @ AirdropError::AccountMismatch,
        constraint = airdrop_token_account.mint  == mint.key()                  @ AirdropError::AccountMismatch,
        constraint = airdrop_token_account.owner == airdrop_state.key()         @ AirdropError::AccountMismatch,
        constraint = airdrop_token_account.amount == 0                          @ AirdropError::AccountMismatch,
        constraint = airdrop_token_account.close_authority.is_none()            @ AirdropError::AccountMismatch,
    )]
    pub airdrop_token_account: Account<'info, TokenAccount>,

    /// CHECK: must equal find_authority(airdrop_state), checked in the handler
    pub airdrop_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeAirdrop>, amount: u64, claim_amount: u64) -> Result<()> {
    AirdropState::validate_amounts(amount, claim_amount)?;
    require_gte!(
        ctx.accounts.deposit_token_account.amount,
        amount,
        AirdropError::InsufficientFunds
    );

    let airdrop_key = ctx.accounts.airdrop_state.key();
    let (authority, bump) = find_authority(&airdrop_key, ctx.program_id);
    require_keys_eq!(
        authority,
        ctx.accounts.airdrop_authority.key(),
        AirdropError::AuthorityDerivationMismatch
    );

    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            from:      ctx.accounts.deposit_token_account.to_account_info(),
            mint:      ctx.accounts.mint.to_account_info(),
            to:        ctx.accounts.airdrop_token_account.to_account_info(),
            authority: ctx.accounts.initializer.to_account_info(),
        },
    );
    token::transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    // Holding account now answers only to the PDA
    let cpi_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        SetAuthority {
            current_authority: ctx.accounts.airdrop_state.to_account_info(),
            account_or_mint:   ctx.accounts.airdrop_token_account.to_account_info(),
        },
    );
    token::set_authority(cpi_ctx, AuthorityType::AccountOwner, Some(authority))?;

    let state = &mut ctx.accounts.airdrop_state;
    let clock = Clock::get()?;

    state.initializer = ctx.accounts.initializer.key();
    state.mint = ctx.accounts.mint.key();
    state.deposit_token_account = ctx.accounts.deposit_token_account.key();
    state.airdrop_token_account = ctx.accounts.airdrop_token_account.key();
    state.total_deposited = amount;
    state.claim_amount = claim_amount;
    state.authority_bump = bump;
    state.status = AirdropStatus::Active;

    emit!(AirdropInitialised {
        airdrop: airdrop_key,
        initializer: state.initializer,
        mint: state.mint,
        total_deposited: amount,
        claim_amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "[airdrop] initialised airdrop={} amount={} claim_amount={}",
        airdrop_key,
        amount,
        claim_amount
    );
    Ok(())
}
