use anchor_lang::prelude::*;

declare_id!("F4rhSFJ4C2xjp2ZukFRyYzb3GzMc4SyHwyxXLfgEMJfJ");

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod wager;

pub use constants::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

#[program]
pub mod coinflip {
    use super::*;

    /// Create the shared vault PDA at `[b"vault"]` and record its canonical bump.
    ///
    /// Fails with `AlreadyInitialized` if the address already holds vault data.
    pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
        instructions::initialize_vault(ctx)
    }

    /// Stake `amount` lamports on `choice` (0 = heads, 1 = tails) and settle
    /// against the vault in the same transaction.
    pub fn flip_coin(ctx: Context<FlipCoin>, choice: u8, amount: u64) -> Result<()> {
        instructions::flip_coin(ctx, choice, amount)
    }
}
