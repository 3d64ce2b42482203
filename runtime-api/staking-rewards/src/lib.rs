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

#![cfg_attr(not(feature = "std"), no_std)]

use parity_scale_codec::Codec;
use sp_std::vec::Vec;

pub use pallet_staking_rewards::types::RewardsPotState;

sp_api::decl_runtime_apis! {
	/// Runtime API to inspect reward pools and the positions staked in them.
	pub trait StakingRewards<AssetId, Balance, CollectionId, ItemId, RewardPool, Stake, Error> where
		AssetId: Codec,
		Balance: Codec,
		CollectionId: Codec,
		ItemId: Codec,
		RewardPool: Codec,
		Stake: Codec,
		Error: Codec,
		{
			/// The rewards the given position could claim right now, per reward asset.
			fn claimable_rewards(fnft_collection_id: CollectionId, fnft_instance_id: ItemId) -> Result<Vec<(AssetId, Balance)>, Error>;

			/// Whether the rewards pot of the given pool holds anything for `asset_id`.
			fn rewards_pot_state(pool_id: AssetId, asset_id: AssetId) -> RewardsPotState;

			fn reward_pool(pool_id: AssetId) -> Option<RewardPool>;

			fn stake(fnft_collection_id: CollectionId, fnft_instance_id: ItemId) -> Option<Stake>;
		}
}
