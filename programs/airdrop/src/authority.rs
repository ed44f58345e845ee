//! Program-derived authority over an airdrop's holding token account.
//!
//! Every airdrop gets its own authority, seeds = [AUTHORITY_SEED, airdrop_state].
//! A holding account presented alongside a different airdrop record therefore
//! cannot be signed for, on top of the address checks in each instruction.

use anchor_lang::prelude::*;

use crate::errors::AirdropError;

pub const AUTHORITY_SEED: &[u8] = b"airdrop-authority";

/// Canonical authority address and bump for `airdrop`.
pub fn find_authority(airdrop: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AUTHORITY_SEED, airdrop.as_ref()], program_id)
}

/// Re-derive the authority from the stored bump and compare it with `authority`.
pub fn verify_authority(
    airdrop: &Pubkey,
    bump: u8,
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Result<()> {
    let derived =
        Pubkey::create_program_address(&[AUTHORITY_SEED, airdrop.as_ref(), &[bump]], program_id)
            .map_err(|_| error!(AirdropError::AuthorityDerivationMismatch))?;
    require_keys_eq!(
        derived,
        *authority,
        AirdropError::AuthorityDerivationMismatch
    );
    Ok(())
}

/// Signer seeds for CPIs made on behalf of the authority.
pub fn authority_seeds<'a>(airdrop: &'a Pubkey, bump: &'a [u8; 1]) -> [&'a [u8]; 3] {
    [AUTHORITY_SEED, airdrop.as_ref(), bump]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(code: AirdropError) -> anchor_lang::error::Error {
        code.into()
    }

    #[test]
    fn derivation_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let airdrop = Pubkey::new_unique();
        assert_eq!(
            find_authority(&airdrop, &program_id),
            find_authority(&airdrop, &program_id)
        );
    }

    #[test]
    fn each_airdrop_has_its_own_authority() {
        let program_id = Pubkey::new_unique();
        let (a, _) = find_authority(&Pubkey::new_unique(), &program_id);
        let (b, _) = find_authority(&Pubkey::new_unique(), &program_id);
        assert_ne!(a, b);
    }

    #[test]
    fn stored_bump_reproduces_authority() {
        let program_id = Pubkey::new_unique();
        let airdrop = Pubkey::new_unique();
        let (authority, bump) = find_authority(&airdrop, &program_id);
        assert!(verify_authority(&airdrop, bump, &authority, &program_id).is_ok());
    }

    #[test]
    fn authority_of_another_airdrop_is_rejected() {
        let program_id = Pubkey::new_unique();
        let airdrop = Pubkey::new_unique();
        let other = Pubkey::new_unique();
        let (_, bump) = find_authority(&airdrop, &program_id);
        let (other_authority, _) = find_authority(&other, &program_id);
        assert_eq!(
            verify_authority(&airdrop, bump, &other_authority, &program_id).unwrap_err(),
            err(AirdropError::AuthorityDerivationMismatch)
        );
    }

    #[test]
    fn wrong_bump_is_rejected() {
        let program_id = Pubkey::new_unique();
        let airdrop = Pubkey::new_unique();
        let (authority, bump) = find_authority(&airdrop, &program_id);
        assert_eq!(
            verify_authority(&airdrop, bump.wrapping_sub(1), &authority, &program_id)
                .unwrap_err(),
            err(AirdropError::AuthorityDerivationMismatch)
        );
    }

    #[test]
    fn signer_seeds_end_with_bump() {
        let airdrop = Pubkey::new_unique();
        let bump = [254u8];
        let seeds = authority_seeds(&airdrop, &bump);
        assert_eq!(seeds[0], AUTHORITY_SEED);
        assert_eq!(seeds[1], &airdrop.to_bytes()[..]);
        assert_eq!(seeds[2], &[254u8][..]);
    }
}
