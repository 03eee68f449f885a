use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::constants::VAULT_SEED;
use crate::errors::CoinflipError;
use crate::events::VaultInitialized;
use crate::state::Vault;

#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// CHECK: Created and assigned to this program in the handler. The seeds
    /// pin the address and the constraint rejects a vault that already exists.
    #[account(
        mut,
        seeds = [VAULT_SEED],
        bump,
        constraint = vault.data_is_empty() @ CoinflipError::AlreadyInitialized
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub signer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_vault(ctx: Context<InitializeVault>) -> Result<()> {
    let state = Vault { bump: ctx.bumps.vault };
    let seeds = state.signer_seeds();
    let signer_seeds = &[&seeds[..]];

    let vault = ctx.accounts.vault.to_account_info();
    let payer = ctx.accounts.signer.to_account_info();
    let system = ctx.accounts.system_program.to_account_info();

    let reserve = Rent::get()?.minimum_balance(Vault::LEN);
    let prefunded = vault.lamports();

    if prefunded == 0 {
        let cpi_accounts = CreateAccount {
            from: payer,
            to: vault.clone(),
        };
        system_program::create_account(
            CpiContext::new_with_signer(system, cpi_accounts, signer_seeds),
            reserve,
            Vault::LEN as u64,
            ctx.program_id,
        )?;
    } else {
        // Someone topped up the address before it existed; create_account
        // would refuse it, so fund the shortfall and claim it in place.
        let shortfall = reserve.saturating_sub(prefunded);
        if shortfall > 0 {
            let cpi_accounts = Transfer {
                from: payer,
                to: vault.clone(),
            };
            system_program::transfer(CpiContext::new(system.clone(), cpi_accounts), shortfall)?;
        }

        let cpi_accounts = Allocate {
            account_to_allocate: vault.clone(),
        };
        system_program::allocate(
            CpiContext::new_with_signer(system.clone(), cpi_accounts, signer_seeds),
            Vault::LEN as u64,
        )?;

        let cpi_accounts = Assign {
            account_to_assign: vault.clone(),
        };
        system_program::assign(
            CpiContext::new_with_signer(system, cpi_accounts, signer_seeds),
            ctx.program_id,
        )?;
    }

    {
        let mut data = vault.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        state.try_serialize(&mut writer)?;
    }

    msg!("Vault initialized: {}", vault.key);
    msg!("Canonical bump stored: {}", state.bump);

    emit!(VaultInitialized {
        vault: *vault.key,
        bump: state.bump,
        reserve,
    });

    Ok(())
}
