use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::VAULT_SEED;
use crate::errors::CoinflipError;
use crate::events::CoinFlipped;
use crate::state::Vault;
use crate::wager::{ensure_payout_covered, Wager};

#[derive(Accounts)]
pub struct FlipCoin<'info> {
    /// Only the canonical PDA at the stored bump is accepted, which is what
    /// lets the program debit it without a private key.
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump = vault.bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,

    pub clock: Sysvar<'info, Clock>,
}

pub fn flip_coin(ctx: Context<FlipCoin>, choice: u8, amount: u64) -> Result<()> {
    let wager = Wager::new(choice, amount)?;

    let vault = ctx.accounts.vault.to_account_info();
    let player = ctx.accounts.player.to_account_info();

    // Escrow the stake before the outcome exists. A shortfall here is the
    // system program's error, not ours.
    let cpi_accounts = Transfer {
        from: player.clone(),
        to: vault.clone(),
    };
    let cpi_ctx = CpiContext::new(ctx.accounts.system_program.to_account_info(), cpi_accounts);
    system_program::transfer(cpi_ctx, wager.amount)?;

    // Checked for every wager, not only winners, so an underfunded vault
    // cannot be used as a free retry on losing flips.
    let reserve = Rent::get()?.minimum_balance(vault.data_len());
    ensure_payout_covered(vault.lamports(), reserve, wager.winning_payout()?)?;

    let clock = &ctx.accounts.clock;
    let settlement = wager.settle_at(clock.slot, clock.unix_timestamp)?;

    if settlement.is_win() {
        pay_out(&vault, &player, settlement.payout)?;
    }

    msg!(
        "Flip: choice {} outcome {} stake {} payout {}",
        wager.side as u8,
        settlement.outcome as u8,
        wager.amount,
        settlement.payout
    );

    emit!(CoinFlipped {
        player: *player.key,
        choice: wager.side as u8,
        outcome: settlement.outcome as u8,
        amount: wager.amount,
        payout: settlement.payout,
        slot: clock.slot,
    });

    Ok(())
}

/// Moves lamports out of the program-owned vault. The system program cannot
/// debit an account that carries data, so the balance is adjusted directly.
fn pay_out(vault: &AccountInfo, player: &AccountInfo, lamports: u64) -> Result<()> {
    let vault_balance = vault
        .lamports()
        .checked_sub(lamports)
        .ok_or(CoinflipError::InsufficientVaultBalance)?;
    let player_balance = player
        .lamports()
        .checked_add(lamports)
        .ok_or(CoinflipError::ArithmeticOverflow)?;

    **vault.try_borrow_mut_lamports()? = vault_balance;
    **player.try_borrow_mut_lamports()? = player_balance;

    Ok(())
}
