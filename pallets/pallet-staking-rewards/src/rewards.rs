// KILT Blockchain – https://botlabs.org
// Copyright (C) 2019-2024 BOTLabs GmbH

// The KILT Blockchain is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The KILT Blockchain is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// If you feel like getting in touch with us, you can do so at info@botlabs.org

//! Reward accounting.
//!
//! Every reward asset of a pool keeps a *virtual* total
//! `V = total_rewards + total_dilution_adjustment - total_exit_adjustment`.
//! A position holding `share` out of `total_shares` is entitled to
//! `floor(V * share / total_shares)`, minus what has already been credited
//! to it (its reduction). Shares joining the pool are credited with the
//! entitlement they would otherwise dilute away from existing positions,
//! shares leaving the pool give back their credited entitlement. This keeps
//! `V - sum(reductions) == total_rewards - claimed_rewards`, so the sum of
//! what all positions can claim never exceeds the pot.

use sp_arithmetic::{
	helpers_128bit::multiply_by_rational_with_rounding,
	traits::{AtLeast32BitUnsigned, CheckedAdd, CheckedSub, Saturating, Zero},
	ArithmeticError, FixedPointNumber, FixedU64, PerThing, Permill, Rounding,
};

use crate::types::Reward;

/// `floor(a * b / c)`, computed without intermediate overflow.
pub(crate) fn mul_div_floor<Balance>(a: Balance, b: Balance, c: Balance) -> Result<Balance, ArithmeticError>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	if c.is_zero() {
		return Err(ArithmeticError::DivisionByZero);
	}
	let a: u128 = a.try_into().map_err(|_| ArithmeticError::Overflow)?;
	let b: u128 = b.try_into().map_err(|_| ArithmeticError::Overflow)?;
	let c: u128 = c.try_into().map_err(|_| ArithmeticError::Overflow)?;
	let result = multiply_by_rational_with_rounding(a, b, c, Rounding::Down).ok_or(ArithmeticError::Overflow)?;
	Balance::try_from(result).map_err(|_| ArithmeticError::Overflow)
}

/// The share resulting from staking `amount` with the given multiplier.
pub(crate) fn share_for<Balance>(amount: Balance, multiplier: FixedU64) -> Result<Balance, ArithmeticError>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	let inner = Balance::try_from(u128::from(multiplier.into_inner())).map_err(|_| ArithmeticError::Overflow)?;
	let accuracy = Balance::try_from(u128::from(FixedU64::DIV)).map_err(|_| ArithmeticError::Overflow)?;
	mul_div_floor(amount, inner, accuracy)
}

/// Splits `value` in two, returning `(retained, split_off)`. The split off
/// part is `(1 - ratio) * value` rounded down, the retained part receives the
/// remainder so that both add up to `value`.
pub(crate) fn split_amount<Balance>(value: Balance, ratio: Permill) -> (Balance, Balance)
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	let split_off = ratio.left_from_one().mul_floor(value);
	(value.saturating_sub(split_off), split_off)
}

impl<Balance> Reward<Balance>
where
	Balance: AtLeast32BitUnsigned + Copy,
{
	pub(crate) fn virtual_total(&self) -> Result<Balance, ArithmeticError> {
		self.total_rewards
			.checked_add(&self.total_dilution_adjustment)
			.ok_or(ArithmeticError::Overflow)?
			.checked_sub(&self.total_exit_adjustment)
			.ok_or(ArithmeticError::Underflow)
	}

	/// The amount currently held by the pot on behalf of this reward.
	pub(crate) fn available(&self) -> Balance {
		self.total_rewards.saturating_sub(self.claimed_rewards)
	}

	pub(crate) fn entitlement(&self, share: Balance, total_shares: Balance) -> Result<Balance, ArithmeticError> {
		if total_shares.is_zero() {
			return Ok(Zero::zero());
		}
		mul_div_floor(self.virtual_total()?, share, total_shares)
	}

	/// The amount a position can claim right now.
	pub(crate) fn claimable(
		&self,
		share: Balance,
		total_shares: Balance,
		reduction: Balance,
	) -> Result<Balance, ArithmeticError> {
		let owed = self.entitlement(share, total_shares)?.saturating_sub(reduction);
		Ok(owed.min(self.available()))
	}

	/// Books a payout. The caller adds `amount` to the position's reduction.
	pub(crate) fn register_claim(&mut self, amount: Balance) -> Result<(), ArithmeticError> {
		let claimed = self
			.claimed_rewards
			.checked_add(&amount)
			.ok_or(ArithmeticError::Overflow)?;
		if claimed > self.total_rewards {
			return Err(ArithmeticError::Underflow);
		}
		self.claimed_rewards = claimed;
		Ok(())
	}

	pub(crate) fn deposit(&mut self, amount: Balance, now: u64) -> Result<(), ArithmeticError> {
		self.total_rewards = self
			.total_rewards
			.checked_add(&amount)
			.ok_or(ArithmeticError::Overflow)?;
		self.last_updated_timestamp = now;
		Ok(())
	}

	/// Accounts for `added` shares joining a pool that held `total_shares`
	/// before. Returns the credit to add to the joining position's reduction.
	pub(crate) fn dilute(&mut self, added: Balance, total_shares: Balance) -> Result<Balance, ArithmeticError> {
		if total_shares.is_zero() || added.is_zero() {
			return Ok(Zero::zero());
		}
		let credit = mul_div_floor(self.virtual_total()?, added, total_shares)?;
		self.total_dilution_adjustment = self
			.total_dilution_adjustment
			.checked_add(&credit)
			.ok_or(ArithmeticError::Overflow)?;
		Ok(credit)
	}

	/// Divides the `reduction` of a position being split into `kept_share`
	/// and `split_share`, returning `(kept, split)`. The split off part is
	/// owed `(1 - ratio)` of what the position was owed, bounded by its own
	/// entitlement, the kept part is owed the rest. Both parts together
	/// are never owed more than the position was.
	pub(crate) fn split_reduction(
		&self,
		kept_share: Balance,
		split_share: Balance,
		total_shares: Balance,
		reduction: Balance,
		ratio: Permill,
	) -> Result<(Balance, Balance), ArithmeticError> {
		let share = kept_share.checked_add(&split_share).ok_or(ArithmeticError::Overflow)?;
		let owed = self.entitlement(share, total_shares)?.saturating_sub(reduction);
		let split_entitlement = self.entitlement(split_share, total_shares)?;
		let (_, split_owed) = split_amount(owed, ratio);
		let split_reduction = split_entitlement
			.saturating_sub(split_owed.min(split_entitlement))
			.min(reduction);
		Ok((reduction.saturating_sub(split_reduction), split_reduction))
	}

	/// Accounts for `removed` shares leaving a pool that held `total_shares`
	/// before. Returns the amount to take off the leaving position's
	/// reduction, which never exceeds `reduction`.
	pub(crate) fn release(
		&mut self,
		removed: Balance,
		total_shares: Balance,
		reduction: Balance,
	) -> Result<Balance, ArithmeticError> {
		if total_shares.is_zero() || removed.is_zero() {
			return Ok(Zero::zero());
		}
		let debit = mul_div_floor(self.virtual_total()?, removed, total_shares)?.min(reduction);
		self.total_exit_adjustment = self
			.total_exit_adjustment
			.checked_add(&debit)
			.ok_or(ArithmeticError::Overflow)?;
		Ok(debit)
	}
}
