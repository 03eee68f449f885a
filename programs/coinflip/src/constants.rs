/// Seed of the single vault PDA: `[VAULT_SEED]` under the program id.
pub const VAULT_SEED: &[u8] = b"vault";

/// Gross payout on a win, as a multiple of the stake (stake back plus winnings).
pub const PAYOUT_MULTIPLIER: u64 = 2;
