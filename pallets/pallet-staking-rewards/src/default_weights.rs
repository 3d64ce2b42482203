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

//! Weights for pallet_staking_rewards
//!
//! These are estimates derived from the storage accesses of each call. They
//! are to be replaced with the output of
//! `benchmark pallet --pallet=pallet-staking-rewards --extrinsic=*` once the
//! pallet is part of a runtime.

#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(clippy::unnecessary_cast)]

use frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use sp_std::marker::PhantomData;

/// Weight functions needed for pallet_staking_rewards.
pub trait WeightInfo {
	fn create_reward_pool(r: u32, ) -> Weight;
	fn add_to_rewards_pot() -> Weight;
	fn update_rewards_pool(r: u32, ) -> Weight;
	fn stake(r: u32, ) -> Weight;
	fn claim(r: u32, ) -> Weight;
	fn extend(r: u32, ) -> Weight;
	fn split(r: u32, ) -> Weight;
	fn unstake(r: u32, ) -> Weight;
}

/// Weights for pallet_staking_rewards using the Substrate node and recommended hardware.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::CollectionPools` (r:1 w:1)
	/// Proof: `StakingRewards::CollectionPools` (`max_values`: None, `max_size`: Some(36), added: 2511, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::NextCollectionId` (r:1 w:1)
	/// Proof: `StakingRewards::NextCollectionId` (`max_values`: Some(1), `max_size`: Some(4), added: 499, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::NextShareAssetId` (r:1 w:1)
	/// Proof: `StakingRewards::NextShareAssetId` (`max_values`: Some(1), `max_size`: Some(4), added: 499, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::ShareAssetPools` (r:12 w:1)
	/// Proof: `StakingRewards::ShareAssetPools` (`max_values`: None, `max_size`: Some(36), added: 2511, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:12 w:1)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardsPotIsEmpty` (r:0 w:10)
	/// Proof: `StakingRewards::RewardsPotIsEmpty` (`max_values`: None, `max_size`: Some(40), added: 2515, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn create_reward_pool(r: u32, ) -> Weight {
		Weight::from_parts(42_874_113, 6360)
			.saturating_add(Weight::from_parts(1_493_002, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(8_u64))
			.saturating_add(T::DbWeight::get().reads((2_u64).saturating_mul(r.into())))
			.saturating_add(T::DbWeight::get().writes(6_u64))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(r.into())))
	}
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:1 w:1)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Account` (r:2 w:2)
	/// Proof: `Assets::Account` (`max_values`: None, `max_size`: Some(134), added: 2609, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardsPotIsEmpty` (r:0 w:1)
	/// Proof: `StakingRewards::RewardsPotIsEmpty` (`max_values`: None, `max_size`: Some(40), added: 2515, mode: `MaxEncodedLen`)
	fn add_to_rewards_pot() -> Weight {
		Weight::from_parts(60_122_000, 6208)
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(5_u64))
	}
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn update_rewards_pool(r: u32, ) -> Weight {
		Weight::from_parts(14_801_559, 4859)
			.saturating_add(Weight::from_parts(502_716, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(1_u64))
			.saturating_add(T::DbWeight::get().writes(1_u64))
	}
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:2 w:2)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Account` (r:2 w:2)
	/// Proof: `Assets::Account` (`max_values`: None, `max_size`: Some(134), added: 2609, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::NextItemId` (r:1 w:1)
	/// Proof: `StakingRewards::NextItemId` (`max_values`: None, `max_size`: Some(28), added: 2503, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::Stakes` (r:0 w:1)
	/// Proof: `StakingRewards::Stakes` (`max_values`: None, `max_size`: Some(321), added: 2796, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn stake(r: u32, ) -> Weight {
		Weight::from_parts(81_552_908, 6360)
			.saturating_add(Weight::from_parts(1_102_380, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(7_u64))
	}
	/// Storage: `StakingRewards::Stakes` (r:1 w:1)
	/// Proof: `StakingRewards::Stakes` (`max_values`: None, `max_size`: Some(321), added: 2796, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:10 w:10)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Account` (r:20 w:20)
	/// Proof: `Assets::Account` (`max_values`: None, `max_size`: Some(134), added: 2609, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardsPotIsEmpty` (r:0 w:10)
	/// Proof: `StakingRewards::RewardsPotIsEmpty` (`max_values`: None, `max_size`: Some(40), added: 2515, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn claim(r: u32, ) -> Weight {
		Weight::from_parts(38_917_244, 4859)
			.saturating_add(Weight::from_parts(27_340_511, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(2_u64))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(r.into())))
			.saturating_add(T::DbWeight::get().writes(2_u64))
			.saturating_add(T::DbWeight::get().writes((4_u64).saturating_mul(r.into())))
			.saturating_add(Weight::from_parts(0, 5218).saturating_mul(r.into()))
	}
	/// Storage: `StakingRewards::Stakes` (r:1 w:1)
	/// Proof: `StakingRewards::Stakes` (`max_values`: None, `max_size`: Some(321), added: 2796, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:2 w:2)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Account` (r:2 w:2)
	/// Proof: `Assets::Account` (`max_values`: None, `max_size`: Some(134), added: 2609, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn extend(r: u32, ) -> Weight {
		Weight::from_parts(75_771_362, 6360)
			.saturating_add(Weight::from_parts(1_179_905, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(6_u64))
			.saturating_add(T::DbWeight::get().writes(6_u64))
	}
	/// Storage: `StakingRewards::Stakes` (r:2 w:2)
	/// Proof: `StakingRewards::Stakes` (`max_values`: None, `max_size`: Some(321), added: 2796, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::NextItemId` (r:1 w:1)
	/// Proof: `StakingRewards::NextItemId` (`max_values`: None, `max_size`: Some(28), added: 2503, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::SplitLineage` (r:1 w:1)
	/// Proof: `StakingRewards::SplitLineage` (`max_values`: None, `max_size`: Some(109), added: 2584, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn split(r: u32, ) -> Weight {
		Weight::from_parts(32_710_021, 6582)
			.saturating_add(Weight::from_parts(418_240, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(4_u64))
			.saturating_add(T::DbWeight::get().writes(4_u64))
	}
	/// Storage: `StakingRewards::Stakes` (r:1 w:1)
	/// Proof: `StakingRewards::Stakes` (`max_values`: None, `max_size`: Some(321), added: 2796, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardPools` (r:1 w:1)
	/// Proof: `StakingRewards::RewardPools` (`max_values`: None, `max_size`: Some(1394), added: 3869, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Asset` (r:12 w:12)
	/// Proof: `Assets::Asset` (`max_values`: None, `max_size`: Some(210), added: 2685, mode: `MaxEncodedLen`)
	/// Storage: `Assets::Account` (r:24 w:24)
	/// Proof: `Assets::Account` (`max_values`: None, `max_size`: Some(134), added: 2609, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::SplitLineage` (r:1 w:1)
	/// Proof: `StakingRewards::SplitLineage` (`max_values`: None, `max_size`: Some(109), added: 2584, mode: `MaxEncodedLen`)
	/// Storage: `StakingRewards::RewardsPotIsEmpty` (r:0 w:10)
	/// Proof: `StakingRewards::RewardsPotIsEmpty` (`max_values`: None, `max_size`: Some(40), added: 2515, mode: `MaxEncodedLen`)
	/// The range of component `r` is `[1, 10]`.
	fn unstake(r: u32, ) -> Weight {
		Weight::from_parts(82_419_733, 6360)
			.saturating_add(Weight::from_parts(28_002_174, 0).saturating_mul(r.into()))
			.saturating_add(T::DbWeight::get().reads(7_u64))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(r.into())))
			.saturating_add(T::DbWeight::get().writes(7_u64))
			.saturating_add(T::DbWeight::get().writes((4_u64).saturating_mul(r.into())))
			.saturating_add(Weight::from_parts(0, 5218).saturating_mul(r.into()))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn create_reward_pool(r: u32, ) -> Weight {
		Weight::from_parts(42_874_113, 6360)
			.saturating_add(Weight::from_parts(1_493_002, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(8_u64))
			.saturating_add(RocksDbWeight::get().reads((2_u64).saturating_mul(r.into())))
			.saturating_add(RocksDbWeight::get().writes(6_u64))
			.saturating_add(RocksDbWeight::get().writes((1_u64).saturating_mul(r.into())))
	}
	fn add_to_rewards_pot() -> Weight {
		Weight::from_parts(60_122_000, 6208)
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(5_u64))
	}
	fn update_rewards_pool(r: u32, ) -> Weight {
		Weight::from_parts(14_801_559, 4859)
			.saturating_add(Weight::from_parts(502_716, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(1_u64))
			.saturating_add(RocksDbWeight::get().writes(1_u64))
	}
	fn stake(r: u32, ) -> Weight {
		Weight::from_parts(81_552_908, 6360)
			.saturating_add(Weight::from_parts(1_102_380, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(7_u64))
	}
	fn claim(r: u32, ) -> Weight {
		Weight::from_parts(38_917_244, 4859)
			.saturating_add(Weight::from_parts(27_340_511, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(2_u64))
			.saturating_add(RocksDbWeight::get().reads((3_u64).saturating_mul(r.into())))
			.saturating_add(RocksDbWeight::get().writes(2_u64))
			.saturating_add(RocksDbWeight::get().writes((4_u64).saturating_mul(r.into())))
			.saturating_add(Weight::from_parts(0, 5218).saturating_mul(r.into()))
	}
	fn extend(r: u32, ) -> Weight {
		Weight::from_parts(75_771_362, 6360)
			.saturating_add(Weight::from_parts(1_179_905, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(6_u64))
			.saturating_add(RocksDbWeight::get().writes(6_u64))
	}
	fn split(r: u32, ) -> Weight {
		Weight::from_parts(32_710_021, 6582)
			.saturating_add(Weight::from_parts(418_240, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(4_u64))
			.saturating_add(RocksDbWeight::get().writes(4_u64))
	}
	fn unstake(r: u32, ) -> Weight {
		Weight::from_parts(82_419_733, 6360)
			.saturating_add(Weight::from_parts(28_002_174, 0).saturating_mul(r.into()))
			.saturating_add(RocksDbWeight::get().reads(7_u64))
			.saturating_add(RocksDbWeight::get().reads((3_u64).saturating_mul(r.into())))
			.saturating_add(RocksDbWeight::get().writes(7_u64))
			.saturating_add(RocksDbWeight::get().writes((4_u64).saturating_mul(r.into())))
			.saturating_add(Weight::from_parts(0, 5218).saturating_mul(r.into()))
	}
}
