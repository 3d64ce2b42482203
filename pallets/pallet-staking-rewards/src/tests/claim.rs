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

use frame_support::{assert_noop, assert_ok};
use frame_system::RawOrigin;

use crate::{
	mock::*,
	types::{RewardPoolConfig, RewardsPotState},
	Error, Event, Pallet, RewardPools, RewardsPotIsEmpty, Stakes,
};

fn builder() -> ExtBuilder {
	ExtBuilder::default()
		.with_assets(vec![STAKED_ASSET_ID, REWARD_ASSET_ID])
		.with_asset_balances(vec![
			(STAKED_ASSET_ID, ALICE, 100 * UNIT),
			(STAKED_ASSET_ID, BOB, 100 * UNIT),
			(REWARD_ASSET_ID, POOL_OWNER, 1_000 * UNIT),
		])
		.with_reward_pools(vec![default_pool_config()])
}

fn stake(who: AccountId, amount: Balance, duration: u64) {
	assert_ok!(Pallet::<MockRuntime>::stake(
		RawOrigin::Signed(who).into(),
		STAKED_ASSET_ID,
		amount,
		duration,
		false
	));
}

fn fund(amount: Balance) {
	assert_ok!(Pallet::<MockRuntime>::add_to_rewards_pot(
		RawOrigin::Signed(POOL_OWNER).into(),
		STAKED_ASSET_ID,
		REWARD_ASSET_ID,
		amount,
		false
	));
}

fn claim(who: AccountId, instance: ItemId) {
	assert_ok!(Pallet::<MockRuntime>::claim(RawOrigin::Signed(who).into(), 0, instance));
}

#[test]
fn successful() {
	builder()
		.with_rewards(vec![(STAKED_ASSET_ID, REWARD_ASSET_ID, 100 * UNIT)])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			System::reset_events();

			claim(ALICE, 0);

			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 100 * UNIT);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 0);

			let stake = Stakes::<MockRuntime>::get(0, 0).expect("Stake should exist");
			assert_eq!(stake.reductions.get(&REWARD_ASSET_ID), Some(&(100 * UNIT)));
			let pool = RewardPools::<MockRuntime>::get(STAKED_ASSET_ID).expect("Pool should exist");
			assert_eq!(
				pool.rewards.get(&REWARD_ASSET_ID).map(|reward| reward.claimed_rewards),
				Some(100 * UNIT)
			);

			// The pot has been drained.
			assert!(RewardsPotIsEmpty::<MockRuntime>::contains_key(
				STAKED_ASSET_ID,
				REWARD_ASSET_ID
			));
			assert_eq!(
				Pallet::<MockRuntime>::rewards_pot_state(STAKED_ASSET_ID, REWARD_ASSET_ID),
				RewardsPotState::Empty
			);

			assert_eq!(
				events(),
				vec![
					Event::<MockRuntime>::RewardClaimed {
						owner: ALICE,
						fnft_collection_id: 0,
						fnft_instance_id: 0,
						asset_id: REWARD_ASSET_ID,
						amount: 100 * UNIT,
					},
					Event::<MockRuntime>::Claimed {
						owner: ALICE,
						fnft_collection_id: 0,
						fnft_instance_id: 0,
					}
				]
			);
		});
}

#[test]
fn claiming_twice_pays_nothing() {
	builder()
		.with_rewards(vec![(STAKED_ASSET_ID, REWARD_ASSET_ID, 100 * UNIT)])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			claim(ALICE, 0);
			System::reset_events();

			claim(ALICE, 0);

			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 100 * UNIT);
			assert_eq!(
				events(),
				vec![
					Event::<MockRuntime>::RewardClaimed {
						owner: ALICE,
						fnft_collection_id: 0,
						fnft_instance_id: 0,
						asset_id: REWARD_ASSET_ID,
						amount: 0,
					},
					Event::<MockRuntime>::Claimed {
						owner: ALICE,
						fnft_collection_id: 0,
						fnft_instance_id: 0,
					}
				]
			);
		});
}

#[test]
fn rewards_are_split_by_share() {
	builder().build_and_execute_with_sanity_tests(|| {
		stake(ALICE, 30 * UNIT, ONE_HOUR);
		stake(BOB, 10 * UNIT, ONE_HOUR);
		fund(100 * UNIT);

		claim(ALICE, 0);
		claim(BOB, 1);

		assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 75 * UNIT);
		assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 25 * UNIT);
		assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 0);
	});
}

#[test]
fn claim_order_does_not_matter() {
	builder().build_and_execute_with_sanity_tests(|| {
		stake(ALICE, 30 * UNIT, ONE_HOUR);
		stake(BOB, 10 * UNIT, ONE_HOUR);
		fund(100 * UNIT);

		claim(BOB, 1);
		claim(ALICE, 0);

		assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 75 * UNIT);
		assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 25 * UNIT);
	});
}

#[test]
fn longer_locks_earn_more() {
	builder().build_and_execute_with_sanity_tests(|| {
		// 50 at 1.2x and 60 at 1x end up with the same share.
		stake(ALICE, 50 * UNIT, ONE_WEEK);
		stake(BOB, 60 * UNIT, ONE_HOUR);
		fund(120 * UNIT);

		claim(ALICE, 0);
		claim(BOB, 1);

		assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 60 * UNIT);
		assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 60 * UNIT);
	});
}

#[test]
fn late_staker_only_earns_later_deposits() {
	builder()
		.with_rewards(vec![(STAKED_ASSET_ID, REWARD_ASSET_ID, 100 * UNIT)])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			stake(BOB, 50 * UNIT, ONE_HOUR);

			claim(BOB, 1);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 0);
			claim(ALICE, 0);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 100 * UNIT);

			fund(40 * UNIT);
			assert_eq!(
				Pallet::<MockRuntime>::rewards_pot_state(STAKED_ASSET_ID, REWARD_ASSET_ID),
				RewardsPotState::Funded
			);

			claim(ALICE, 0);
			claim(BOB, 1);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 120 * UNIT);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 20 * UNIT);
		});
}

#[test]
fn successful_with_multiple_reward_assets() {
	let pool_config = RewardPoolConfig {
		reward_configs: reward_configs(&[REWARD_ASSET_ID, SECOND_REWARD_ASSET_ID, THIRD_REWARD_ASSET_ID]),
		..default_pool_config()
	};

	ExtBuilder::default()
		.with_assets(vec![
			STAKED_ASSET_ID,
			REWARD_ASSET_ID,
			SECOND_REWARD_ASSET_ID,
			THIRD_REWARD_ASSET_ID,
		])
		.with_asset_balances(vec![
			(STAKED_ASSET_ID, ALICE, 100 * UNIT),
			(REWARD_ASSET_ID, POOL_OWNER, 30 * UNIT),
			(SECOND_REWARD_ASSET_ID, POOL_OWNER, 60 * UNIT),
			(THIRD_REWARD_ASSET_ID, POOL_OWNER, 90 * UNIT),
		])
		.with_reward_pools(vec![pool_config])
		.with_rewards(vec![
			(STAKED_ASSET_ID, REWARD_ASSET_ID, 30 * UNIT),
			(STAKED_ASSET_ID, SECOND_REWARD_ASSET_ID, 60 * UNIT),
			(STAKED_ASSET_ID, THIRD_REWARD_ASSET_ID, 90 * UNIT),
		])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			System::reset_events();

			claim(ALICE, 0);

			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 30 * UNIT);
			assert_eq!(asset_balance(SECOND_REWARD_ASSET_ID, &ALICE), 60 * UNIT);
			assert_eq!(asset_balance(THIRD_REWARD_ASSET_ID, &ALICE), 90 * UNIT);

			let claimed = [
				(REWARD_ASSET_ID, 30 * UNIT),
				(SECOND_REWARD_ASSET_ID, 60 * UNIT),
				(THIRD_REWARD_ASSET_ID, 90 * UNIT),
			]
			.into_iter()
			.map(|(asset_id, amount)| Event::<MockRuntime>::RewardClaimed {
				owner: ALICE,
				fnft_collection_id: 0,
				fnft_instance_id: 0,
				asset_id,
				amount,
			})
			.chain([Event::<MockRuntime>::Claimed {
				owner: ALICE,
				fnft_collection_id: 0,
				fnft_instance_id: 0,
			}])
			.collect::<Vec<_>>();
			assert_eq!(events(), claimed);
		});
}

#[test]
fn claims_from_a_partly_funded_pool() {
	let pool_config = RewardPoolConfig {
		reward_configs: reward_configs(&[REWARD_ASSET_ID, SECOND_REWARD_ASSET_ID, THIRD_REWARD_ASSET_ID]),
		..default_pool_config()
	};

	ExtBuilder::default()
		.with_assets(vec![
			STAKED_ASSET_ID,
			REWARD_ASSET_ID,
			SECOND_REWARD_ASSET_ID,
			THIRD_REWARD_ASSET_ID,
		])
		.with_asset_balances(vec![
			(STAKED_ASSET_ID, ALICE, 100 * UNIT),
			(REWARD_ASSET_ID, POOL_OWNER, 30 * UNIT),
		])
		.with_reward_pools(vec![pool_config])
		.with_rewards(vec![(STAKED_ASSET_ID, REWARD_ASSET_ID, 30 * UNIT)])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			System::reset_events();

			claim(ALICE, 0);

			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 30 * UNIT);
			assert_eq!(asset_balance(SECOND_REWARD_ASSET_ID, &ALICE), 0);
			assert_eq!(asset_balance(THIRD_REWARD_ASSET_ID, &ALICE), 0);

			let claimed = [
				(REWARD_ASSET_ID, 30 * UNIT),
				(SECOND_REWARD_ASSET_ID, 0),
				(THIRD_REWARD_ASSET_ID, 0),
			]
			.into_iter()
			.map(|(asset_id, amount)| Event::<MockRuntime>::RewardClaimed {
				owner: ALICE,
				fnft_collection_id: 0,
				fnft_instance_id: 0,
				asset_id,
				amount,
			})
			.chain([Event::<MockRuntime>::Claimed {
				owner: ALICE,
				fnft_collection_id: 0,
				fnft_instance_id: 0,
			}])
			.collect::<Vec<_>>();
			assert_eq!(events(), claimed);

			for asset_id in [REWARD_ASSET_ID, SECOND_REWARD_ASSET_ID, THIRD_REWARD_ASSET_ID] {
				assert_eq!(
					Pallet::<MockRuntime>::rewards_pot_state(STAKED_ASSET_ID, asset_id),
					RewardsPotState::Empty
				);
			}
		});
}

#[test]
fn payout_never_leaves_dust_in_the_pot() {
	ExtBuilder::default()
		.with_assets(vec![STAKED_ASSET_ID, REWARD_ASSET_ID])
		.with_asset_min_balances(vec![(REWARD_ASSET_ID, 10)])
		.with_asset_balances(vec![
			(STAKED_ASSET_ID, ALICE, 100 * UNIT),
			(STAKED_ASSET_ID, BOB, 100 * UNIT),
			(REWARD_ASSET_ID, ALICE, 10),
			(REWARD_ASSET_ID, BOB, 10),
			(REWARD_ASSET_ID, POOL_OWNER, 100),
		])
		.with_reward_pools(vec![default_pool_config()])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, UNIT, ONE_HOUR);
			stake(BOB, UNIT, ONE_HOUR);
			assert_ok!(Pallet::<MockRuntime>::add_to_rewards_pot(
				RawOrigin::Signed(POOL_OWNER).into(),
				STAKED_ASSET_ID,
				REWARD_ASSET_ID,
				15,
				false
			));

			// Paying the 7 owed would leave 8 in the pot, below the minimum balance.
			claim(ALICE, 0);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 15);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 10);
			assert_eq!(
				Pallet::<MockRuntime>::claimable_rewards(0, 0),
				Ok(vec![(REWARD_ASSET_ID, 2)])
			);

			System::reset_events();
			claim(BOB, 1);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 10);
			assert!(events().contains(&Event::<MockRuntime>::RewardClaimed {
				owner: BOB,
				fnft_collection_id: 0,
				fnft_instance_id: 1,
				asset_id: REWARD_ASSET_ID,
				amount: 0,
			}));

			// What Bob could not collect stays with the remaining staker.
			assert_ok!(Pallet::<MockRuntime>::unstake(RawOrigin::Signed(BOB).into(), 0, 1));
			assert_eq!(
				Pallet::<MockRuntime>::claimable_rewards(0, 0),
				Ok(vec![(REWARD_ASSET_ID, 10)])
			);

			claim(ALICE, 0);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 25);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 0);
			assert_eq!(
				Pallet::<MockRuntime>::rewards_pot_state(STAKED_ASSET_ID, REWARD_ASSET_ID),
				RewardsPotState::Empty
			);
		});
}

#[test]
fn payout_is_skipped_when_the_owner_cannot_receive_it() {
	ExtBuilder::default()
		.with_assets(vec![STAKED_ASSET_ID, REWARD_ASSET_ID])
		.with_asset_min_balances(vec![(REWARD_ASSET_ID, 10)])
		.with_asset_balances(vec![
			(STAKED_ASSET_ID, ALICE, 100 * UNIT),
			(STAKED_ASSET_ID, BOB, 100 * UNIT),
			(REWARD_ASSET_ID, POOL_OWNER, 100),
		])
		.with_reward_pools(vec![default_pool_config()])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, UNIT, ONE_HOUR);
			stake(BOB, 3 * UNIT, ONE_HOUR);
			fund(20);
			System::reset_events();

			// 5 is below the minimum balance of an account Alice does not have.
			claim(ALICE, 0);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &ALICE), 0);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 20);
			assert_eq!(
				events()[0],
				Event::<MockRuntime>::RewardClaimed {
					owner: ALICE,
					fnft_collection_id: 0,
					fnft_instance_id: 0,
					asset_id: REWARD_ASSET_ID,
					amount: 0,
				}
			);
			assert_eq!(
				Pallet::<MockRuntime>::claimable_rewards(0, 0),
				Ok(vec![(REWARD_ASSET_ID, 5)])
			);

			// Bob is owed 15, but only 10 can leave the pot.
			claim(BOB, 1);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &BOB), 10);
			assert_eq!(asset_balance(REWARD_ASSET_ID, &pot_account(STAKED_ASSET_ID)), 10);
		});
}

#[test]
fn fails_on_missing_stake() {
	builder().build_and_execute_with_sanity_tests(|| {
		assert_noop!(
			Pallet::<MockRuntime>::claim(RawOrigin::Signed(ALICE).into(), 0, 0),
			Error::<MockRuntime>::StakeNotFound
		);
	});
}

#[test]
fn fails_for_other_owner() {
	builder()
		.with_rewards(vec![(STAKED_ASSET_ID, REWARD_ASSET_ID, 100 * UNIT)])
		.build_and_execute_with_sanity_tests(|| {
			stake(ALICE, 50 * UNIT, ONE_HOUR);
			assert_noop!(
				Pallet::<MockRuntime>::claim(RawOrigin::Signed(BOB).into(), 0, 0),
				Error::<MockRuntime>::OnlyStakeOwner
			);
		});
}
