use crate::{
    authority::{authority_seeds, verify_authority},
    errors::AirdropError,
    events::AirdropClaimed,
    state::AirdropState,
};
use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, TransferChecked};

#[derive(Accounts)]
pub struct GetAirdrop<'info> {
    #[account(
        constraint = airdrop_state.is_active() @ AirdropError::AlreadyCancelled,
    )]
    pub airdrop_state: Account<'info, AirdropState>,

    /// CHECK: re-derived from airdrop_state.authority_bump in the handler
    pub airdrop_authority: UncheckedAccount<'info>,

    #[account(address = airdrop_state.mint @ AirdropError::AccountMismatch)]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        address = airdrop_state.airdrop_token_account @ AirdropError::AccountMismatch,
        constraint = airdrop_token_account.owner == airdrop_authority.key() @ AirdropError::AccountMismatch,
    )]
    pub airdrop_token_account: Account<'info, TokenAccount>,

    /// Destination: any token account of the airdrop mint
    #[account(
        mut,
        constraint = taker_token_account.mint == airdrop_state.mint @ AirdropError::AccountMismatch,
        constraint = taker_token_account.key() != airdrop_token_account.key() @ AirdropError::AccountMismatch,
    )]
    pub taker_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<GetAirdrop>) -> Result<()> {
    let state = &ctx.accounts.airdrop_state;
    let airdrop_key = state.key();
    verify_authority(
        &airdrop_key,
        state.authority_bump,
        &ctx.accounts.airdrop_authority.key(),
        ctx.program_id,
    )?;

    let available = ctx.accounts.airdrop_token_account.amount;
    let amount = state.claimable(available)?;
    let remaining = available
        .checked_sub(amount)
        .ok_or(AirdropError::Overflow)?;

    let bump = [state.authority_bump];
    let seeds = authority_seeds(&airdrop_key, &bump);
    let signer = &[&seeds[..]];

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        TransferChecked {
            from:      ctx.accounts.airdrop_token_account.to_account_info(),
            mint:      ctx.accounts.mint.to_account_info(),
            to:        ctx.accounts.taker_token_account.to_account_info(),
            authority: ctx.accounts.airdrop_authority.to_account_info(),
        },
        signer,
    );
    token::transfer_checked(cpi_ctx, amount, ctx.accounts.mint.decimals)?;

    let clock = Clock::get()?;
    emit!(AirdropClaimed {
        airdrop: airdrop_key,
        recipient: ctx.accounts.taker_token_account.key(),
        amount,
        remaining,
        timestamp: clock.unix_timestamp,
    });

    msg!("[airdrop] claim amount={} remaining={}", amount, remaining);
    Ok(())
}
