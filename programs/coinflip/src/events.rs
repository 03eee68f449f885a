use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub bump: u8,
    pub reserve: u64,
}

/// One settled wager. `payout` is zero when the vault kept the stake.
#[event]
pub struct CoinFlipped {
    pub player: Pubkey,
    pub choice: u8,
    pub outcome: u8,
    pub amount: u64,
    pub payout: u64,
    pub slot: u64,
}
