#![no_main]

use airdrop::{
    errors::AirdropError,
    state::{AirdropState, AirdropStatus},
};
use anchor_lang::error::Error;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }

    let amount = u64::from_le_bytes(data[0..8].try_into().unwrap_or([0; 8]));
    let claim_amount = u64::from_le_bytes(data[8..16].try_into().unwrap_or([0; 8]));

    if AirdropState::validate_amounts(amount, claim_amount).is_err() {
        assert!(amount == 0 || claim_amount == 0);
        return;
    }

    let mut state = AirdropState {
        total_deposited: amount,
        claim_amount,
        status: AirdropStatus::Active,
        ..Default::default()
    };
    let mut holding = amount;
    let mut paid_out = 0u64;

    // Each remaining byte is one operation: cancel on 0xff, claim otherwise.
    for op in &data[16..] {
        let was_active = state.is_active();
        if *op == 0xff {
            match state.cancel() {
                Ok(()) => {
                    assert!(was_active);
                    holding = 0;
                }
                Err(e) => {
                    assert!(!was_active);
                    assert_eq!(e, Error::from(AirdropError::AlreadyCancelled));
                }
            }
        } else {
            match state.claimable(holding) {
                Ok(paid) => {
                    assert!(was_active && holding >= claim_amount);
                    assert_eq!(paid, claim_amount);
                    holding -= paid;
                    paid_out += paid;
                }
                Err(e) if was_active => {
                    assert!(holding < claim_amount);
                    assert_eq!(e, Error::from(AirdropError::InsufficientFunds));
                }
                Err(e) => assert_eq!(e, Error::from(AirdropError::AlreadyCancelled)),
            }
        }

        assert!(holding <= state.total_deposited);
        if state.is_active() {
            assert_eq!(holding + paid_out, state.total_deposited);
        } else {
            assert_eq!(holding, 0);
            assert!(state.claimable(u64::MAX).is_err());
        }
    }
});
