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

use frame_benchmarking::v2::benchmarks;

/// Helper trait implementable by the runtime to provide asset ids that can be
/// freely created during the benchmarks.
pub trait BenchmarkHelper<AssetId> {
	/// The principal asset of the benchmarked pool.
	fn staked_asset_id() -> AssetId;
	/// The `i`-th reward asset of the benchmarked pool.
	fn reward_asset_id(i: u32) -> AssetId;
}

impl<AssetId> BenchmarkHelper<AssetId> for ()
where
	AssetId: From<u32>,
{
	fn staked_asset_id() -> AssetId {
		1_000_000u32.into()
	}

	fn reward_asset_id(i: u32) -> AssetId {
		1_000_001u32.saturating_add(i).into()
	}
}

#[benchmarks]
mod benchmarks {
	use frame_benchmarking::{account, v2::*};
	use frame_support::traits::{
		fungibles::{Create, Inspect, Mutate},
		EnsureOrigin, Get,
	};
	use frame_system::RawOrigin;
	use sp_arithmetic::{Perbill, Permill};
	use sp_runtime::{
		traits::{Bounded, One},
		BoundedBTreeMap,
	};
	use sp_std::{collections::btree_map::BTreeMap, vec::Vec};

	use crate::{
		benchmarking::BenchmarkHelper,
		types::{LockConfig, RewardConfig, RewardPoolConfig, RewardRate, RewardUpdate},
		Call, Config, Pallet, RewardPoolConfigOf, RewardPools, Stakes,
	};

	const SEED: u32 = 0;
	const ONE_HOUR: u64 = 60 * 60;

	fn unit<T: Config>() -> T::Balance {
		1_000_000u32.into()
	}

	fn ensure_asset<T: Config>(asset_id: T::AssetId) {
		if !T::Fungibles::asset_exists(asset_id) {
			let admin: T::AccountId = account("admin", 0, SEED);
			T::Fungibles::create(asset_id, admin, true, One::one()).unwrap();
		}
	}

	fn reward_asset_ids<T: Config>(r: u32) -> Vec<T::AssetId> {
		(0..r).map(<T as Config>::BenchmarkHelper::reward_asset_id).collect()
	}

	fn pool_config<T: Config>(r: u32) -> RewardPoolConfigOf<T> {
		let staked_asset_id = <T as Config>::BenchmarkHelper::staked_asset_id();
		ensure_asset::<T>(staked_asset_id);

		let reward_configs = reward_asset_ids::<T>(r)
			.into_iter()
			.map(|asset_id| {
				ensure_asset::<T>(asset_id);
				(
					asset_id,
					RewardConfig {
						max_rewards: T::Balance::max_value(),
						reward_rate: RewardRate::per_second(One::one()),
					},
				)
			})
			.collect::<BTreeMap<_, _>>();
		let duration_presets = BTreeMap::from([(ONE_HOUR, T::MaxRewardMultiplier::get())]);

		let now = frame_system::Pallet::<T>::block_number();
		RewardPoolConfig {
			owner: account("owner", 0, SEED),
			asset_id: staked_asset_id,
			start_block: now,
			end_block: now + 1_000u32.into(),
			reward_configs: BoundedBTreeMap::try_from(reward_configs).unwrap(),
			lock: LockConfig {
				duration_presets: BoundedBTreeMap::try_from(duration_presets).unwrap(),
				unlock_penalty: Perbill::from_percent(10),
			},
			share_asset_id: None,
			financial_nft_collection_id: None,
			minimum_staking_amount: One::one(),
		}
	}

	/// Creates a pool with `r` reward assets and funds each of them.
	fn create_funded_pool<T: Config>(r: u32) -> T::AssetId {
		let pool_id = Pallet::<T>::do_create_reward_pool(pool_config::<T>(r)).unwrap().0;
		let funder: T::AccountId = account("funder", 0, SEED);
		for asset_id in reward_asset_ids::<T>(r) {
			T::Fungibles::mint_into(asset_id, &funder, unit::<T>() * 100u32.into()).unwrap();
			Pallet::<T>::add_to_rewards_pot(
				RawOrigin::Signed(funder.clone()).into(),
				pool_id,
				asset_id,
				unit::<T>() * 10u32.into(),
				false,
			)
			.unwrap();
		}
		pool_id
	}

	/// Stakes on behalf of `who`, returning the position.
	fn create_stake<T: Config>(pool_id: T::AssetId, who: &T::AccountId) -> (T::CollectionId, T::ItemId) {
		T::Fungibles::mint_into(pool_id, who, unit::<T>() * 100u32.into()).unwrap();
		let (collection_id, item_id, _) =
			Pallet::<T>::do_stake(who, pool_id, unit::<T>() * 10u32.into(), ONE_HOUR, false).unwrap();
		(collection_id, item_id)
	}

	#[benchmark]
	fn create_reward_pool(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let origin = T::RewardPoolCreationOrigin::try_successful_origin().unwrap();
		let pool_config = pool_config::<T>(r);
		let pool_id = pool_config.asset_id;

		#[extrinsic_call]
		_(origin as T::RuntimeOrigin, pool_config);

		assert!(RewardPools::<T>::contains_key(pool_id));
	}

	#[benchmark]
	fn add_to_rewards_pot() {
		let pool_id = create_funded_pool::<T>(1);
		let asset_id = <T as Config>::BenchmarkHelper::reward_asset_id(0);
		let caller: T::AccountId = whitelisted_caller();
		T::Fungibles::mint_into(asset_id, &caller, unit::<T>() * 10u32.into()).unwrap();

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), pool_id, asset_id, unit::<T>(), false);

		assert_eq!(
			T::Fungibles::balance(asset_id, &Pallet::<T>::pool_account_id(&pool_id)),
			unit::<T>() * 11u32.into()
		);
	}

	#[benchmark]
	fn update_rewards_pool(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let origin = T::RewardPoolUpdateOrigin::try_successful_origin().unwrap();
		let pool_id = create_funded_pool::<T>(r);
		let updates = reward_asset_ids::<T>(r)
			.into_iter()
			.map(|asset_id| {
				(
					asset_id,
					RewardUpdate {
						reward_rate: RewardRate::per_second(2u32.into()),
					},
				)
			})
			.collect::<BTreeMap<_, _>>();
		let updates = BoundedBTreeMap::try_from(updates).unwrap();

		#[extrinsic_call]
		_(origin as T::RuntimeOrigin, pool_id, updates);

		let pool = RewardPools::<T>::get(pool_id).unwrap();
		assert!(pool
			.rewards
			.values()
			.all(|reward| reward.reward_rate == RewardRate::per_second(2u32.into())));
	}

	#[benchmark]
	fn stake(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let pool_id = create_funded_pool::<T>(r);
		// A previous staker makes the new share dilute the pool.
		create_stake::<T>(pool_id, &account("staker", 0, SEED));
		let caller: T::AccountId = whitelisted_caller();
		T::Fungibles::mint_into(pool_id, &caller, unit::<T>() * 100u32.into()).unwrap();

		#[extrinsic_call]
		_(
			RawOrigin::Signed(caller),
			pool_id,
			unit::<T>() * 10u32.into(),
			ONE_HOUR,
			false,
		);

		let pool = RewardPools::<T>::get(pool_id).unwrap();
		assert!(Stakes::<T>::contains_key(pool.financial_nft_collection_id, T::ItemId::one()));
	}

	#[benchmark]
	fn claim(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let pool_id = create_funded_pool::<T>(r);
		let caller: T::AccountId = whitelisted_caller();
		let (collection_id, item_id) = create_stake::<T>(pool_id, &caller);

		#[extrinsic_call]
		_(RawOrigin::Signed(caller.clone()), collection_id, item_id);

		for asset_id in reward_asset_ids::<T>(r) {
			assert_eq!(T::Fungibles::balance(asset_id, &caller), unit::<T>() * 10u32.into());
		}
	}

	#[benchmark]
	fn extend(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let pool_id = create_funded_pool::<T>(r);
		let caller: T::AccountId = whitelisted_caller();
		let (collection_id, item_id) = create_stake::<T>(pool_id, &caller);

		#[extrinsic_call]
		_(
			RawOrigin::Signed(caller),
			collection_id,
			item_id,
			unit::<T>() * 10u32.into(),
			false,
		);

		let stake = Stakes::<T>::get(collection_id, item_id).unwrap();
		assert_eq!(stake.stake, unit::<T>() * 20u32.into());
	}

	#[benchmark]
	fn split(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let pool_id = create_funded_pool::<T>(r);
		let caller: T::AccountId = whitelisted_caller();
		let (collection_id, item_id) = create_stake::<T>(pool_id, &caller);

		#[extrinsic_call]
		_(
			RawOrigin::Signed(caller),
			collection_id,
			item_id,
			Permill::from_percent(50),
		);

		let mut sibling_id = item_id;
		sibling_id += One::one();
		assert!(Stakes::<T>::contains_key(collection_id, sibling_id));
	}

	#[benchmark]
	fn unstake(r: Linear<1, { T::MaxRewardConfigsPerPool::get() }>) {
		let pool_id = create_funded_pool::<T>(r);
		let caller: T::AccountId = whitelisted_caller();
		let (collection_id, item_id) = create_stake::<T>(pool_id, &caller);

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), collection_id, item_id);

		assert!(!Stakes::<T>::contains_key(collection_id, item_id));
	}

}
