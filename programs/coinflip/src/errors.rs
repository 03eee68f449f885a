use anchor_lang::prelude::*;

#[error_code]
pub enum CoinflipError {
    #[msg("Invalid choice. Must be 0 or 1.")]
    InvalidChoice,
    #[msg("Invalid bet amount.")]
    InvalidAmount,
    #[msg("Vault is already initialized.")]
    AlreadyInitialized,
    #[msg("Vault has insufficient funds for payout.")]
    InsufficientVaultBalance,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
