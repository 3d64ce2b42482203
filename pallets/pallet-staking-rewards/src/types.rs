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

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_arithmetic::{FixedU64, Perbill};
use sp_runtime::{traits::Zero, BoundedBTreeMap, RuntimeDebug};

/// A lock duration, expressed in seconds.
pub type DurationSeconds = u64;

/// The period over which a [`RewardRate`] is expressed.
#[derive(Clone, Copy, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum RewardRatePeriod {
	PerSecond,
}

#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RewardRate<Balance> {
	pub period: RewardRatePeriod,
	pub amount: Balance,
}

impl<Balance> RewardRate<Balance> {
	pub fn per_second(amount: Balance) -> Self {
		Self {
			period: RewardRatePeriod::PerSecond,
			amount,
		}
	}
}

/// The reward-specific part of a pool configuration, as provided when the
/// pool is created.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RewardConfig<Balance> {
	/// The upper bound for the total amount ever deposited into the pot.
	pub max_rewards: Balance,
	pub reward_rate: RewardRate<Balance>,
}

/// A change to an existing reward configuration.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RewardUpdate<Balance> {
	pub reward_rate: RewardRate<Balance>,
}

/// The accrual state of a single reward asset inside a pool.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Reward<Balance> {
	/// Cumulative amount ever deposited into the rewards pot.
	pub total_rewards: Balance,
	/// Cumulative amount ever paid out of the rewards pot.
	pub claimed_rewards: Balance,
	/// Cumulative entitlement credited to shares at the moment they joined
	/// the pool.
	pub total_dilution_adjustment: Balance,
	/// Cumulative entitlement withdrawn by shares at the moment they left the
	/// pool.
	pub total_exit_adjustment: Balance,
	pub max_rewards: Balance,
	pub reward_rate: RewardRate<Balance>,
	/// Unix time, in seconds, of the last deposit or rate change.
	pub last_updated_timestamp: u64,
}

impl<Balance: Zero> Reward<Balance> {
	pub fn from_config(config: RewardConfig<Balance>, now: u64) -> Self {
		Self {
			total_rewards: Zero::zero(),
			claimed_rewards: Zero::zero(),
			total_dilution_adjustment: Zero::zero(),
			total_exit_adjustment: Zero::zero(),
			max_rewards: config.max_rewards,
			reward_rate: config.reward_rate,
			last_updated_timestamp: now,
		}
	}
}

/// Lock configuration of a pool.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct LockConfig<DurationPresets> {
	/// Allowed lock durations, each mapped to the multiplier applied to the
	/// staked amount to compute the share. `FixedU64::one()` is 1x.
	pub duration_presets: DurationPresets,
	/// Fraction of the principal forfeited when unstaking before the lock
	/// expires.
	pub unlock_penalty: Perbill,
}

pub type DurationPresets<MaxPresets> = BoundedBTreeMap<DurationSeconds, FixedU64, MaxPresets>;

/// The input to pool creation.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RewardPoolConfig<AccountId, AssetId, BlockNumber, CollectionId, Balance, RewardConfigs, Lock> {
	pub owner: AccountId,
	/// The principal asset. It also identifies the pool.
	pub asset_id: AssetId,
	pub start_block: BlockNumber,
	pub end_block: BlockNumber,
	pub reward_configs: RewardConfigs,
	pub lock: Lock,
	/// If not provided, a new share asset is created.
	pub share_asset_id: Option<AssetId>,
	/// If not provided, a new collection id is allocated.
	pub financial_nft_collection_id: Option<CollectionId>,
	pub minimum_staking_amount: Balance,
}

#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RewardPool<AccountId, AssetId, BlockNumber, CollectionId, Balance, Rewards, Lock> {
	pub owner: AccountId,
	pub asset_id: AssetId,
	pub share_asset_id: AssetId,
	pub financial_nft_collection_id: CollectionId,
	pub start_block: BlockNumber,
	pub end_block: BlockNumber,
	pub rewards: Rewards,
	pub lock: Lock,
	pub minimum_staking_amount: Balance,
	/// Sum of the shares of all live positions.
	pub total_shares: Balance,
}

impl<AccountId, AssetId, BlockNumber, CollectionId, Balance, Rewards, Lock>
	RewardPool<AccountId, AssetId, BlockNumber, CollectionId, Balance, Rewards, Lock>
where
	BlockNumber: PartialOrd,
{
	pub fn has_started(&self, now: &BlockNumber) -> bool {
		self.start_block <= *now
	}

	pub fn has_ended(&self, now: &BlockNumber) -> bool {
		self.end_block < *now
	}
}

/// The lock a single position is subject to.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Lock {
	/// Unix time, in seconds, at which the lock started or was last renewed.
	pub started_at: u64,
	/// Duration preset chosen when staking.
	pub duration: DurationSeconds,
	/// Penalty snapshot taken from the pool when staking.
	pub unlock_penalty: Perbill,
}

impl Lock {
	pub fn is_expired(&self, now: u64) -> bool {
		self.started_at.saturating_add(self.duration) <= now
	}
}

/// A staked position, identified by a financial NFT (collection, instance)
/// pair.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct Stake<AccountId, AssetId, Balance, ItemId, Reductions> {
	pub owner: AccountId,
	pub reward_pool_id: AssetId,
	/// The staked principal.
	pub stake: Balance,
	/// The multiplier-weighted principal.
	pub share: Balance,
	/// Per reward asset, the amount this position has been credited with so
	/// far.
	pub reductions: Reductions,
	pub lock: Lock,
	/// The position all splits of this position descend from.
	pub lineage_root: ItemId,
}

/// Whether the rewards pot of a pool holds any funds for a given asset.
#[derive(Clone, Copy, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub enum RewardsPotState {
	/// The pool does not exist or does not reward the asset.
	Unconfigured,
	/// The asset is rewarded but nothing is claimable from the pot.
	Empty,
	Funded,
}
