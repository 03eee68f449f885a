use anchor_lang::prelude::*;

/// The shared pool every wager settles against.
///
/// Its balance is the account's lamports and is not mirrored in the data.
/// The vault address has no private key, so the only thing stored is the
/// canonical bump that proves `[b"vault"]` derives this address.
#[account]
pub struct Vault {
    pub bump: u8,
}

impl Vault {
    pub const LEN: usize = 8 + 1; // discriminator + u8

    /// Signer seeds for acting as the vault PDA.
    pub fn signer_seeds(&self) -> [&[u8]; 2] {
        [crate::VAULT_SEED, core::slice::from_ref(&self.bump)]
    }
}
