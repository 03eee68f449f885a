pub mod flip_coin;
pub mod initialize_vault;

pub use flip_coin::*;
pub use initialize_vault::*;
