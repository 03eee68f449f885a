//! Wager validation, outcome derivation and settlement math.
//!
//! Everything here is pure so the instruction handlers only move lamports.

use anchor_lang::error::Error;
use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::constants::PAYOUT_MULTIPLIER;
use crate::errors::CoinflipError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Side {
    Heads = 0,
    Tails = 1,
}

impl TryFrom<u8> for Side {
    type Error = Error;

    fn try_from(choice: u8) -> Result<Self> {
        match choice {
            0 => Ok(Side::Heads),
            1 => Ok(Side::Tails),
            _ => err!(CoinflipError::InvalidChoice),
        }
    }
}

/// A validated stake on one side of the coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wager {
    pub side: Side,
    pub amount: u64,
}

impl Wager {
    /// Checks the raw instruction arguments. The choice is checked before the
    /// amount so `flip_coin(2, 0)` reports `InvalidChoice`.
    pub fn new(choice: u8, amount: u64) -> Result<Self> {
        let side = Side::try_from(choice)?;
        require!(amount > 0, CoinflipError::InvalidAmount);

        Ok(Self { side, amount })
    }

    /// Lamports the vault owes the player if this wager wins.
    pub fn winning_payout(&self) -> Result<u64> {
        self.amount
            .checked_mul(PAYOUT_MULTIPLIER)
            .ok_or_else(|| error!(CoinflipError::ArithmeticOverflow))
    }

    pub fn settle(&self, outcome: Side) -> Result<Settlement> {
        let payout = if outcome == self.side {
            self.winning_payout()?
        } else {
            0
        };

        Ok(Settlement { outcome, payout })
    }

    /// Settles against the coin face the clock at execution time gives.
    pub fn settle_at(&self, slot: u64, unix_timestamp: i64) -> Result<Settlement> {
        self.settle(derive_outcome(slot, unix_timestamp))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub outcome: Side,
    pub payout: u64,
}

impl Settlement {
    pub fn is_win(&self) -> bool {
        self.payout > 0
    }
}

/// Derives the coin face from the clock of the executing bank only.
///
/// Instruction arguments and signer keys stay out of the hash: a caller can
/// grind those freely.
///
/// NOTE: slot and timestamp are visible before submission, so a caller who
/// controls submission timing can bias this. Replace with a VRF or a
/// commit-reveal over a future slot hash before real funds are at stake.
pub fn derive_outcome(slot: u64, unix_timestamp: i64) -> Side {
    let digest = hashv(&[&slot.to_le_bytes(), &unix_timestamp.to_le_bytes()]);

    if digest.to_bytes()[0] & 1 == 0 {
        Side::Heads
    } else {
        Side::Tails
    }
}

/// The vault must be able to pay `payout` and stay rent exempt.
///
/// `vault_lamports` is read after the stake has been escrowed.
pub fn ensure_payout_covered(vault_lamports: u64, reserve: u64, payout: u64) -> Result<()> {
    let spendable = vault_lamports.saturating_sub(reserve);
    require!(spendable >= payout, CoinflipError::InsufficientVaultBalance);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            Error::ProgramError(e) => panic!("unexpected program error: {e:?}"),
        }
    }

    #[test]
    fn rejects_choices_outside_heads_and_tails() {
        for choice in [2u8, 3, 42, u8::MAX] {
            let err = Wager::new(choice, 1_000).unwrap_err();
            assert_eq!(code(err), u32::from(CoinflipError::InvalidChoice));
        }
    }

    #[test]
    fn rejects_zero_stake() {
        let err = Wager::new(0, 0).unwrap_err();
        assert_eq!(code(err), u32::from(CoinflipError::InvalidAmount));
    }

    #[test]
    fn invalid_choice_wins_over_invalid_amount() {
        let err = Wager::new(2, 0).unwrap_err();
        assert_eq!(code(err), u32::from(CoinflipError::InvalidChoice));
    }

    #[test]
    fn accepts_both_sides() {
        assert_eq!(Wager::new(0, 1).unwrap().side, Side::Heads);
        assert_eq!(Wager::new(1, 1).unwrap().side, Side::Tails);
    }

    #[test]
    fn win_pays_stake_times_multiplier() {
        let wager = Wager::new(0, 100).unwrap();
        let settlement = wager.settle(Side::Heads).unwrap();

        assert!(settlement.is_win());
        assert_eq!(settlement.payout, 200);
    }

    #[test]
    fn loss_pays_nothing() {
        let wager = Wager::new(0, 100).unwrap();
        let settlement = wager.settle(Side::Tails).unwrap();

        assert!(!settlement.is_win());
        assert_eq!(settlement.payout, 0);
        assert_eq!(settlement.outcome, Side::Tails);
    }

    #[test]
    fn payout_overflow_is_reported() {
        let wager = Wager::new(1, u64::MAX).unwrap();

        let err = wager.winning_payout().unwrap_err();
        assert_eq!(code(err), u32::from(CoinflipError::ArithmeticOverflow));
    }

    #[test]
    fn solvency_boundary_is_inclusive() {
        let reserve = 890_880;

        assert!(ensure_payout_covered(reserve + 200, reserve, 200).is_ok());

        let err = ensure_payout_covered(reserve + 199, reserve, 200).unwrap_err();
        assert_eq!(code(err), u32::from(CoinflipError::InsufficientVaultBalance));
    }

    #[test]
    fn vault_below_reserve_covers_nothing() {
        let err = ensure_payout_covered(10, 890_880, 1).unwrap_err();
        assert_eq!(code(err), u32::from(CoinflipError::InsufficientVaultBalance));
    }

    #[test]
    fn outcome_is_deterministic_for_the_same_clock() {
        let first = derive_outcome(1_234, 1_700_000_000);
        let second = derive_outcome(1_234, 1_700_000_000);
        assert_eq!(first, second);
    }

    #[test]
    fn stake_cannot_steer_the_outcome() {
        let (slot, unix_timestamp) = (5_000, 1_700_000_000);
        let expected = derive_outcome(slot, unix_timestamp);

        for amount in 1..=64u64 {
            let heads = Wager::new(0, amount).unwrap();
            let tails = Wager::new(1, amount).unwrap();

            assert_eq!(heads.settle_at(slot, unix_timestamp).unwrap().outcome, expected);
            assert_eq!(tails.settle_at(slot, unix_timestamp).unwrap().outcome, expected);
        }
    }

    #[test]
    fn exactly_one_side_wins_at_a_given_clock() {
        let (slot, unix_timestamp) = (5_000, 1_700_000_000);
        let heads = Wager::new(0, 100).unwrap().settle_at(slot, unix_timestamp).unwrap();
        let tails = Wager::new(1, 100).unwrap().settle_at(slot, unix_timestamp).unwrap();

        assert!(heads.is_win() ^ tails.is_win());
        assert_eq!(heads.payout + tails.payout, 200);
    }

    #[test]
    fn outcome_moves_with_slot_and_timestamp() {
        let by_slot: Vec<_> = (0..64u64).map(|s| derive_outcome(s, 0)).collect();
        let by_time: Vec<_> = (0..64i64).map(|t| derive_outcome(0, t)).collect();

        for outcomes in [by_slot, by_time] {
            assert!(outcomes.contains(&Side::Heads));
            assert!(outcomes.contains(&Side::Tails));
        }
    }

    #[test]
    fn outcome_is_roughly_balanced() {
        let heads = (0..1_000u64)
            .filter(|slot| derive_outcome(*slot, 1_700_000_000) == Side::Heads)
            .count();

        assert!((400..=600).contains(&heads), "heads = {heads}");
    }
}
