use crate::{
    authority::{authority_seeds, verify_authority},
    errors::AirdropError,
    events::AirdropCancelled,
    state::AirdropState,
};
use anchor_lang::prelude::*;
use anchor_spl::token::{
    self, spl_token::instruction::AuthorityType, Mint, SetAuthority, Token, TokenAccount,
    TransferChecked,
};

#[derive(Accounts)]
pub struct CancelAirdrop<'info> {
    pub initializer: Signer<'info>,

    #[account(
        mut,
        constraint = airdrop_state.is_initializer(&initializer.key()) @ AirdropError::Unauthorized,
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

    /// Refunds only ever go back to where the deposit came from
    #[account(
        mut,
        address = airdrop_state.deposit_token_account @ AirdropError::AccountMismatch,
    )]
    pub deposit_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<CancelAirdrop>) -> Result<()> {
    let airdrop_key = ctx.accounts.airdrop_state.key();
    let initializer = ctx.accounts.airdrop_state.initializer;
    let bump = [ctx.accounts.airdrop_state.authority_bump];
    verify_authority(
        &airdrop_key,
        bump[0],
        &ctx.accounts.airdrop_authority.key(),
        ctx.program_id,
    )?;

    let seeds = authority_seeds(&airdrop_key, &bump);
    let signer = &[&seeds[..]];

    let refunded = ctx.accounts.airdrop_token_account.amount;
    if refunded > 0 {
        let cpi_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            TransferChecked {
                from:      ctx.accounts.airdrop_token_account.to_account_info(),
                mint:      ctx.accounts.mint.to_account_info(),
                to:        ctx.accounts.deposit_token_account.to_account_info(),
                authority: ctx.accounts.airdrop_authority.to_account_info(),
            },
            signer,
        );
        token::transfer_checked(cpi_ctx, refunded, ctx.accounts.mint.decimals)?;
    }

    // Give the emptied holding account back to the initializer
    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        SetAuthority {
            current_authority: ctx.accounts.airdrop_authority.to_account_info(),
            account_or_mint:   ctx.accounts.airdrop_token_account.to_account_info(),
        },
        signer,
    );
    token::set_authority(cpi_ctx, AuthorityType::AccountOwner, Some(initializer))?;

    ctx.accounts.airdrop_state.cancel()?;

    let clock = Clock::get()?;
    emit!(AirdropCancelled {
        airdrop: airdrop_key,
        initializer,
        refunded,
        timestamp: clock.unix_timestamp,
    });

    msg!("[airdrop] cancelled airdrop={} refunded={}", airdrop_key, refunded);
    Ok(())
}
