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

use frame_support::{ensure, traits::fungibles::Inspect};
use sp_runtime::{
	traits::{CheckedAdd, Zero},
	TryRuntimeError,
};
use sp_std::collections::btree_map::BTreeMap;

use crate::{Config, Pallet, RewardPools, ShareAssetPools, Stakes};

const LOG_TARGET: &str = "try-state::pallet-staking-rewards";

fn log_and_return_error_message(error_message: &'static str) -> TryRuntimeError {
	log::error!(target: LOG_TARGET, "{}", error_message);
	TryRuntimeError::Other(error_message)
}

pub(crate) fn do_try_state<T: Config>() -> Result<(), TryRuntimeError> {
	// Sum of the shares of every live position, per pool.
	let mut shares_per_pool = BTreeMap::<T::AssetId, T::Balance>::new();

	Stakes::<T>::iter().try_for_each(|(_, _, stake)| -> Result<(), TryRuntimeError> {
		let pool = RewardPools::<T>::get(stake.reward_pool_id)
			.ok_or_else(|| log_and_return_error_message("Stake references an unknown pool."))?;
		ensure!(
			pool.lock.duration_presets.contains_key(&stake.lock.duration),
			log_and_return_error_message("Stake references an unknown duration preset.")
		);

		let pool_shares = shares_per_pool.entry(stake.reward_pool_id).or_insert_with(Zero::zero);
		*pool_shares = pool_shares
			.checked_add(&stake.share)
			.ok_or_else(|| log_and_return_error_message("Shares of a pool overflow."))?;
		Ok(())
	})?;

	RewardPools::<T>::iter().try_for_each(|(pool_id, pool)| -> Result<(), TryRuntimeError> {
		let live_shares = shares_per_pool.get(&pool_id).copied().unwrap_or_default();
		ensure!(
			pool.total_shares == live_shares,
			log_and_return_error_message("Total shares do not match the shares of the live positions.")
		);
		ensure!(
			ShareAssetPools::<T>::get(pool.share_asset_id) == Some(pool_id),
			log_and_return_error_message("Share asset is not indexed for its pool.")
		);
		ensure!(
			pool.total_shares == T::Fungibles::total_issuance(pool.share_asset_id),
			log_and_return_error_message("Total shares do not match the share asset issuance.")
		);

		let pot = Pallet::<T>::pool_account_id(&pool_id);
		pool.rewards
			.iter()
			.try_for_each(|(asset_id, reward)| -> Result<(), TryRuntimeError> {
				ensure!(
					reward.claimed_rewards <= reward.total_rewards,
					log_and_return_error_message("More rewards claimed than deposited.")
				);
				ensure!(
					reward.total_rewards <= reward.max_rewards,
					log_and_return_error_message("More rewards deposited than allowed.")
				);
				ensure!(
					T::Fungibles::balance(*asset_id, &pot) >= reward.available(),
					log_and_return_error_message("Rewards pot does not cover the unclaimed rewards.")
				);
				Ok(())
			})
	})
}
