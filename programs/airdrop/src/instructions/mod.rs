#![allow(ambiguous_glob_reexports)]

pub mod cancel;
pub mod get_airdrop;
pub mod initialize;

pub use cancel::*;
pub use get_airdrop::*;
pub use initialize::*;
