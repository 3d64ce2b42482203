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
#![doc = include_str!("../README.md")]

pub mod default_weights;
mod rewards;
pub mod types;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "try-runtime"))]
mod try_state;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;
#[cfg(feature = "runtime-benchmarks")]
pub use benchmarking::BenchmarkHelper;

pub use crate::{default_weights::WeightInfo, pallet::*};

const LOG_TARGET: &str = "runtime::pallet-staking-rewards";

#[frame_support::pallet]
pub mod pallet {
	use frame_support::{
		pallet_prelude::*,
		traits::{
			fungibles::{Create, Inspect, Mutate},
			tokens::{Balance as BalanceT, Fortitude, Precision, Preservation, Provenance},
			UnixTime,
		},
		PalletId,
	};
	use frame_system::pallet_prelude::*;
	use sp_arithmetic::{FixedU64, PerThing, Permill};
	use sp_runtime::{
		traits::{AccountIdConversion, CheckedAdd, CheckedSub, EnsureAddAssign, One, Zero},
		ArithmeticError, BoundedBTreeMap,
	};
	use sp_std::{collections::btree_map::BTreeMap, vec::Vec};

	use crate::{
		rewards::{share_for, split_amount},
		types::{
			DurationPresets, DurationSeconds, Lock, LockConfig, Reward, RewardConfig, RewardPool, RewardPoolConfig,
			RewardUpdate, RewardsPotState, Stake,
		},
		WeightInfo, LOG_TARGET,
	};

	pub(crate) type AccountIdOf<T> = <T as frame_system::Config>::AccountId;
	pub type DurationPresetsOf<T> = DurationPresets<<T as Config>::MaxStakingDurationPresets>;
	pub type LockConfigOf<T> = LockConfig<DurationPresetsOf<T>>;
	pub type RewardsOf<T> =
		BoundedBTreeMap<<T as Config>::AssetId, Reward<<T as Config>::Balance>, <T as Config>::MaxRewardConfigsPerPool>;
	pub type RewardConfigsOf<T> = BoundedBTreeMap<
		<T as Config>::AssetId,
		RewardConfig<<T as Config>::Balance>,
		<T as Config>::MaxRewardConfigsPerPool,
	>;
	pub type RewardUpdatesOf<T> = BoundedBTreeMap<
		<T as Config>::AssetId,
		RewardUpdate<<T as Config>::Balance>,
		<T as Config>::MaxRewardConfigsPerPool,
	>;
	pub type ReductionsOf<T> =
		BoundedBTreeMap<<T as Config>::AssetId, <T as Config>::Balance, <T as Config>::MaxRewardConfigsPerPool>;
	pub type RewardPoolConfigOf<T> = RewardPoolConfig<
		AccountIdOf<T>,
		<T as Config>::AssetId,
		BlockNumberFor<T>,
		<T as Config>::CollectionId,
		<T as Config>::Balance,
		RewardConfigsOf<T>,
		LockConfigOf<T>,
	>;
	pub type RewardPoolOf<T> = RewardPool<
		AccountIdOf<T>,
		<T as Config>::AssetId,
		BlockNumberFor<T>,
		<T as Config>::CollectionId,
		<T as Config>::Balance,
		RewardsOf<T>,
		LockConfigOf<T>,
	>;
	pub type StakeOf<T> = Stake<
		AccountIdOf<T>,
		<T as Config>::AssetId,
		<T as Config>::Balance,
		<T as Config>::ItemId,
		ReductionsOf<T>,
	>;
	pub type LineageOf<T> = BoundedVec<<T as Config>::ItemId, <T as Config>::MaxSplitPositions>;
	pub type PositionsOf<T> = BoundedVec<
		(<T as Config>::CollectionId, <T as Config>::ItemId, <T as Config>::Balance),
		<T as Config>::MaxSplitPositions,
	>;

	pub(crate) const REWARDS_POT: [u8; 3] = *b"pot";
	pub(crate) const STAKED_ASSETS: [u8; 3] = *b"stk";

	const STORAGE_VERSION: StorageVersion = StorageVersion::new(0);

	#[pallet::config]
	pub trait Config: frame_system::Config {
		/// Because this pallet emits events, it depends on the runtime's definition of an event.
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
		/// The ledger holding principal, share and reward assets.
		type Fungibles: Inspect<Self::AccountId, AssetId = Self::AssetId, Balance = Self::Balance>
			+ Mutate<Self::AccountId>
			+ Create<Self::AccountId>;
		/// Type of an asset id in the Fungibles implementation.
		type AssetId: Parameter + MaxEncodedLen + Copy + Ord + Default + EnsureAddAssign + One;
		/// The balance of assets in the Fungibles implementation.
		type Balance: BalanceT;
		/// Identifier of a financial NFT collection. One collection is assigned to each pool.
		type CollectionId: Parameter + MaxEncodedLen + Copy + Default + EnsureAddAssign + One;
		/// Identifier of a financial NFT inside its collection.
		type ItemId: Parameter + MaxEncodedLen + Copy + Default + EnsureAddAssign + One;
		/// Source of the current time, used for lock durations.
		type UnixTime: UnixTime;
		/// The pallet id, used to derive the rewards pot and staked assets accounts of each pool.
		#[pallet::constant]
		type PalletId: Get<PalletId>;
		/// Receiver of the principal slashed on early unstakes.
		type TreasuryAccount: Get<Self::AccountId>;
		/// The maximum number of reward assets per pool.
		#[pallet::constant]
		type MaxRewardConfigsPerPool: Get<u32>;
		/// The maximum number of duration presets per pool.
		#[pallet::constant]
		type MaxStakingDurationPresets: Get<u32>;
		/// The maximum number of live positions descending from a single stake.
		#[pallet::constant]
		type MaxSplitPositions: Get<u32>;
		/// The largest reward multiplier a duration preset may carry.
		#[pallet::constant]
		type MaxRewardMultiplier: Get<FixedU64>;
		/// Who can create new reward pools.
		type RewardPoolCreationOrigin: EnsureOrigin<Self::RuntimeOrigin>;
		/// Who can change the reward rates of existing pools.
		type RewardPoolUpdateOrigin: EnsureOrigin<Self::RuntimeOrigin>;
		/// Weight information for extrinsics in this pallet.
		type WeightInfo: WeightInfo;

		#[cfg(feature = "runtime-benchmarks")]
		type BenchmarkHelper: crate::BenchmarkHelper<Self::AssetId>;
	}

	#[pallet::pallet]
	#[pallet::storage_version(STORAGE_VERSION)]
	pub struct Pallet<T>(_);

	/// Reward pools, keyed by their principal asset.
	#[pallet::storage]
	pub type RewardPools<T: Config> = StorageMap<_, Blake2_128Concat, T::AssetId, RewardPoolOf<T>, OptionQuery>;

	/// Staked positions, keyed by their financial NFT collection and instance.
	#[pallet::storage]
	pub type Stakes<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, T::CollectionId, Blake2_128Concat, T::ItemId, StakeOf<T>, OptionQuery>;

	/// Present for a (pool, reward asset) pair when nothing can be claimed
	/// from the pot for that asset.
	#[pallet::storage]
	pub type RewardsPotIsEmpty<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, T::AssetId, Blake2_128Concat, T::AssetId, (), OptionQuery>;

	/// The pool a financial NFT collection belongs to.
	#[pallet::storage]
	pub type CollectionPools<T: Config> = StorageMap<_, Blake2_128Concat, T::CollectionId, T::AssetId, OptionQuery>;

	/// The pool a share asset belongs to.
	#[pallet::storage]
	pub type ShareAssetPools<T: Config> = StorageMap<_, Blake2_128Concat, T::AssetId, T::AssetId, OptionQuery>;

	/// The live positions split off a common original position, keyed by the
	/// collection and the original instance.
	#[pallet::storage]
	pub type SplitLineage<T: Config> =
		StorageDoubleMap<_, Blake2_128Concat, T::CollectionId, Blake2_128Concat, T::ItemId, LineageOf<T>, OptionQuery>;

	/// The collection id to try first when a pool is created without one.
	#[pallet::storage]
	pub type NextCollectionId<T: Config> = StorageValue<_, T::CollectionId, ValueQuery>;

	/// The share asset id to try first when a pool is created without one.
	#[pallet::storage]
	pub type NextShareAssetId<T: Config> = StorageValue<_, T::AssetId, ValueQuery>;

	/// The next instance id of each collection.
	#[pallet::storage]
	pub type NextItemId<T: Config> = StorageMap<_, Blake2_128Concat, T::CollectionId, T::ItemId, ValueQuery>;

	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// A new reward pool has been created.
		RewardPoolCreated {
			pool_id: T::AssetId,
			owner: T::AccountId,
			start_block: BlockNumberFor<T>,
			end_block: BlockNumberFor<T>,
			share_asset_id: T::AssetId,
			financial_nft_collection_id: T::CollectionId,
		},
		/// Funds have been added to the rewards pot of a pool.
		RewardsPotIncreased {
			pool_id: T::AssetId,
			asset_id: T::AssetId,
			amount: T::Balance,
		},
		/// The reward rates of a pool have been changed.
		RewardPoolUpdated { pool_id: T::AssetId },
		/// A new position has been created.
		Staked {
			pool_id: T::AssetId,
			owner: T::AccountId,
			amount: T::Balance,
			duration_preset: DurationSeconds,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			reward_multiplier: FixedU64,
			keep_alive: bool,
		},
		/// The rewards of a position have been paid out.
		Claimed {
			owner: T::AccountId,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		},
		/// A single reward asset has been paid out to a position owner.
		RewardClaimed {
			owner: T::AccountId,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			asset_id: T::AssetId,
			amount: T::Balance,
		},
		/// A position has been topped up, and its lock renewed.
		StakeAmountExtended {
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			amount: T::Balance,
		},
		/// A position has been split. Contains all live positions that
		/// descend from the same original position, with their shares.
		SplitPosition { positions: PositionsOf<T> },
		/// A position has been closed. `slash` is the principal forfeited
		/// for leaving early, if any.
		Unstaked {
			owner: T::AccountId,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			slash: Option<T::Balance>,
		},
	}

	#[pallet::error]
	pub enum Error<T> {
		/// A pool for the given principal asset exists already.
		RewardPoolAlreadyExists,
		/// The pool does not exist.
		RewardPoolNotFound,
		/// The pool's start block is not before its end block.
		InvalidPoolWindow,
		/// The pool's end block has already passed.
		EndBlockMustBeInTheFuture,
		/// A reward rate of zero was provided.
		ZeroRewardRate,
		/// The pool's lock configuration has no duration presets.
		NoDurationPresetsConfigured,
		/// A duration preset carries a multiplier above the allowed maximum.
		RewardMultiplierTooHigh,
		/// The asset is not rewarded by the pool.
		RewardAssetNotFound,
		/// The deposit would raise the pot above its configured maximum.
		MaxRewardLimitReached,
		/// The pool does not accept stakes before its start block.
		RewardPoolNotStarted,
		/// The pool does not accept rewards after its end block.
		RewardPoolEnded,
		/// The staked amount, or a part of it after a split, is below the
		/// pool's minimum or the principal asset's minimum balance.
		StakeAmountBelowMinimum,
		/// The pool has no such duration preset.
		InvalidDurationPreset,
		/// The account cannot pay the requested amount.
		NotEnoughAssets,
		/// The position does not exist.
		StakeNotFound,
		/// Only the owner of a position can operate on it.
		OnlyStakeOwner,
		/// The split ratio must be strictly between zero and one.
		InvalidSplitRatio,
		/// The position has been split too many times.
		TooManySplitPositions,
		/// The share asset has been issued already, belongs to another pool,
		/// or is used by the pool for another purpose.
		ShareAssetInUse,
		/// The financial NFT collection belongs to another pool.
		FinancialNftCollectionInUse,
		/// Internal error.
		Internal,
	}

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		#[cfg(feature = "try-runtime")]
		fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
			crate::try_state::do_try_state::<T>()
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Create a new reward pool for the principal asset in `pool_config`.
		///
		/// A share asset and a financial NFT collection are allocated for the
		/// pool unless provided.
		///
		/// Emits `RewardPoolCreated`.
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::create_reward_pool(T::MaxRewardConfigsPerPool::get()))]
		pub fn create_reward_pool(origin: OriginFor<T>, pool_config: RewardPoolConfigOf<T>) -> DispatchResult {
			T::RewardPoolCreationOrigin::ensure_origin(origin)?;

			let owner = pool_config.owner.clone();
			let start_block = pool_config.start_block;
			let end_block = pool_config.end_block;
			let (pool_id, share_asset_id, financial_nft_collection_id) = Self::do_create_reward_pool(pool_config)?;

			log::info!(
				target: LOG_TARGET,
				"Created reward pool {:?} with share asset {:?} and collection {:?}.",
				pool_id,
				share_asset_id,
				financial_nft_collection_id
			);

			Self::deposit_event(Event::RewardPoolCreated {
				pool_id,
				owner,
				start_block,
				end_block,
				share_asset_id,
				financial_nft_collection_id,
			});

			Ok(())
		}

		/// Add `amount` of the reward asset `asset_id` to the rewards pot of
		/// `pool_id`. Anyone can fund a pool.
		///
		/// Emits `RewardsPotIncreased`.
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::add_to_rewards_pot())]
		pub fn add_to_rewards_pot(
			origin: OriginFor<T>,
			pool_id: T::AssetId,
			asset_id: T::AssetId,
			amount: T::Balance,
			keep_alive: bool,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			RewardPools::<T>::try_mutate(pool_id, |maybe_pool| -> DispatchResult {
				let pool = maybe_pool.as_mut().ok_or(Error::<T>::RewardPoolNotFound)?;
				let now = frame_system::Pallet::<T>::block_number();
				let has_ended = pool.has_ended(&now);
				let reward = pool.rewards.get_mut(&asset_id).ok_or(Error::<T>::RewardAssetNotFound)?;
				ensure!(!has_ended, Error::<T>::RewardPoolEnded);

				let new_total = reward
					.total_rewards
					.checked_add(&amount)
					.ok_or(ArithmeticError::Overflow)?;
				ensure!(new_total <= reward.max_rewards, Error::<T>::MaxRewardLimitReached);
				Self::ensure_can_pay(asset_id, &who, amount, keep_alive)?;

				reward.deposit(amount, Self::now())?;

				if !amount.is_zero() {
					T::Fungibles::transfer(
						asset_id,
						&who,
						&Self::pool_account_id(&pool_id),
						amount,
						Self::preservation(keep_alive),
					)?;
					RewardsPotIsEmpty::<T>::remove(pool_id, asset_id);
				}

				Ok(())
			})?;

			Self::deposit_event(Event::RewardsPotIncreased {
				pool_id,
				asset_id,
				amount,
			});

			Ok(())
		}

		/// Lock `amount` of the pool's principal asset for `duration_preset`
		/// seconds and mint a new position for it.
		///
		/// Emits `Staked`.
		#[pallet::call_index(2)]
		#[pallet::weight(T::WeightInfo::stake(T::MaxRewardConfigsPerPool::get()))]
		pub fn stake(
			origin: OriginFor<T>,
			pool_id: T::AssetId,
			amount: T::Balance,
			duration_preset: DurationSeconds,
			keep_alive: bool,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let (fnft_collection_id, fnft_instance_id, reward_multiplier) =
				Self::do_stake(&who, pool_id, amount, duration_preset, keep_alive)?;

			Self::deposit_event(Event::Staked {
				pool_id,
				owner: who,
				amount,
				duration_preset,
				fnft_collection_id,
				fnft_instance_id,
				reward_multiplier,
				keep_alive,
			});

			Ok(())
		}

		/// Pay out everything the position can currently claim, for every
		/// reward asset of its pool.
		///
		/// Emits `RewardClaimed` for each reward asset, then `Claimed`.
		#[pallet::call_index(3)]
		#[pallet::weight(T::WeightInfo::claim(T::MaxRewardConfigsPerPool::get()))]
		pub fn claim(
			origin: OriginFor<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			// 1. Load and authorize
			let mut stake = Self::owned_stake(&who, fnft_collection_id, fnft_instance_id)?;
			let mut pool = RewardPools::<T>::get(stake.reward_pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;

			// 2. Pay out
			Self::do_claim(&mut stake, &mut pool, fnft_collection_id, fnft_instance_id)?;

			// 3. Write back
			RewardPools::<T>::insert(stake.reward_pool_id, pool);
			Stakes::<T>::insert(fnft_collection_id, fnft_instance_id, stake);

			Self::deposit_event(Event::Claimed {
				owner: who,
				fnft_collection_id,
				fnft_instance_id,
			});

			Ok(())
		}

		/// Add `amount` to the principal of a position and renew its lock.
		/// An `amount` of zero only renews the lock.
		///
		/// Emits `StakeAmountExtended`.
		#[pallet::call_index(4)]
		#[pallet::weight(T::WeightInfo::extend(T::MaxRewardConfigsPerPool::get()))]
		pub fn extend(
			origin: OriginFor<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			amount: T::Balance,
			keep_alive: bool,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			// 1. Load and authorize
			let mut stake = Self::owned_stake(&who, fnft_collection_id, fnft_instance_id)?;
			let pool_id = stake.reward_pool_id;
			let mut pool = RewardPools::<T>::get(pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;
			let multiplier = Self::multiplier(&pool, stake.lock.duration)?;
			Self::ensure_can_pay(pool_id, &who, amount, keep_alive)?;

			// 2. Move the principal
			if !amount.is_zero() {
				T::Fungibles::transfer(
					pool_id,
					&who,
					&Self::pool_staked_account_id(&pool_id),
					amount,
					Self::preservation(keep_alive),
				)?;
			}

			// 3. Recompute the share and renew the lock
			let new_stake = stake.stake.checked_add(&amount).ok_or(ArithmeticError::Overflow)?;
			let new_share = share_for(new_stake, multiplier)?;
			Self::resize_position(&mut stake, &mut pool, new_share)?;
			stake.stake = new_stake;
			stake.lock.started_at = Self::now();

			// 4. Write back
			RewardPools::<T>::insert(pool_id, pool);
			Stakes::<T>::insert(fnft_collection_id, fnft_instance_id, stake);

			Self::deposit_event(Event::StakeAmountExtended {
				fnft_collection_id,
				fnft_instance_id,
				amount,
			});

			Ok(())
		}

		/// Split a position in two. The position keeps `ratio` of its
		/// principal, share and reductions, a newly minted sibling gets the
		/// rest.
		///
		/// Emits `SplitPosition`.
		#[pallet::call_index(5)]
		#[pallet::weight(T::WeightInfo::split(T::MaxRewardConfigsPerPool::get()))]
		pub fn split(
			origin: OriginFor<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			ratio: Permill,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			ensure!(
				!ratio.is_zero() && ratio < Permill::one(),
				Error::<T>::InvalidSplitRatio
			);

			let mut stake = Self::owned_stake(&who, fnft_collection_id, fnft_instance_id)?;

			let positions = Self::do_split(&mut stake, fnft_collection_id, fnft_instance_id, ratio)?;

			Self::deposit_event(Event::SplitPosition { positions });

			Ok(())
		}

		/// Close a position. Pending rewards are paid out first. Unstaking
		/// before the lock expires forfeits the pool's unlock penalty to the
		/// treasury.
		///
		/// Emits `RewardClaimed` for each reward asset, then `Unstaked`.
		#[pallet::call_index(6)]
		#[pallet::weight(T::WeightInfo::unstake(T::MaxRewardConfigsPerPool::get()))]
		pub fn unstake(
			origin: OriginFor<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let slash = Self::do_unstake(&who, fnft_collection_id, fnft_instance_id)?;

			Self::deposit_event(Event::Unstaked {
				owner: who,
				fnft_collection_id,
				fnft_instance_id,
				slash,
			});

			Ok(())
		}

		/// Change the reward rates of an existing pool.
		///
		/// Emits `RewardPoolUpdated`.
		#[pallet::call_index(7)]
		#[pallet::weight(T::WeightInfo::update_rewards_pool(T::MaxRewardConfigsPerPool::get()))]
		pub fn update_rewards_pool(
			origin: OriginFor<T>,
			pool_id: T::AssetId,
			reward_updates: RewardUpdatesOf<T>,
		) -> DispatchResult {
			T::RewardPoolUpdateOrigin::ensure_origin(origin)?;

			RewardPools::<T>::try_mutate(pool_id, |maybe_pool| -> DispatchResult {
				let pool = maybe_pool.as_mut().ok_or(Error::<T>::RewardPoolNotFound)?;
				let now = Self::now();
				for (asset_id, update) in reward_updates.into_iter() {
					ensure!(!update.reward_rate.amount.is_zero(), Error::<T>::ZeroRewardRate);
					let reward = pool.rewards.get_mut(&asset_id).ok_or(Error::<T>::RewardAssetNotFound)?;
					reward.reward_rate = update.reward_rate;
					reward.last_updated_timestamp = now;
				}
				Ok(())
			})?;

			Self::deposit_event(Event::RewardPoolUpdated { pool_id });

			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// The account holding the rewards pot of a pool.
		pub fn pool_account_id(pool_id: &T::AssetId) -> T::AccountId {
			T::PalletId::get().into_sub_account_truncating((REWARDS_POT, pool_id))
		}

		/// The account holding the staked principal and the share tokens of a
		/// pool.
		pub fn pool_staked_account_id(pool_id: &T::AssetId) -> T::AccountId {
			T::PalletId::get().into_sub_account_truncating((STAKED_ASSETS, pool_id))
		}

		/// Whether the rewards pot of `pool_id` holds anything for
		/// `asset_id`.
		pub fn rewards_pot_state(pool_id: T::AssetId, asset_id: T::AssetId) -> RewardsPotState {
			let is_configured =
				RewardPools::<T>::get(pool_id).is_some_and(|pool| pool.rewards.contains_key(&asset_id));
			if !is_configured {
				RewardsPotState::Unconfigured
			} else if RewardsPotIsEmpty::<T>::contains_key(pool_id, asset_id) {
				RewardsPotState::Empty
			} else {
				RewardsPotState::Funded
			}
		}

		/// What the given position is owed right now, per reward asset. A
		/// claim pays out less if the rewards pot would otherwise be left with
		/// less than the asset's minimum balance.
		pub fn claimable_rewards(
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> Result<Vec<(T::AssetId, T::Balance)>, DispatchError> {
			let stake = Stakes::<T>::get(fnft_collection_id, fnft_instance_id).ok_or(Error::<T>::StakeNotFound)?;
			let pool = RewardPools::<T>::get(stake.reward_pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;

			pool.rewards
				.iter()
				.map(|(asset_id, reward)| -> Result<_, DispatchError> {
					let reduction = stake.reductions.get(asset_id).copied().unwrap_or_default();
					let amount = reward.claimable(stake.share, pool.total_shares, reduction)?;
					Ok((*asset_id, amount))
				})
				.collect()
		}

		fn now() -> u64 {
			T::UnixTime::now().as_secs()
		}

		fn preservation(keep_alive: bool) -> Preservation {
			if keep_alive {
				Preservation::Preserve
			} else {
				Preservation::Expendable
			}
		}

		fn ensure_can_pay(asset_id: T::AssetId, who: &T::AccountId, amount: T::Balance, keep_alive: bool) -> DispatchResult {
			let reducible =
				T::Fungibles::reducible_balance(asset_id, who, Self::preservation(keep_alive), Fortitude::Polite);
			ensure!(reducible >= amount, Error::<T>::NotEnoughAssets);
			Ok(())
		}

		/// The part of `amount` that can be paid from the pool account `from`
		/// to `to`. A pool account is either emptied or left with at least the
		/// minimum balance, so that no booked funds are lost as dust. Nothing
		/// is paid to an account that cannot receive it.
		fn payable(asset_id: T::AssetId, from: &T::AccountId, to: &T::AccountId, amount: T::Balance) -> T::Balance {
			let balance = T::Fungibles::balance(asset_id, from);
			let minimum_balance = T::Fungibles::minimum_balance(asset_id);
			let remainder = balance.saturating_sub(amount);
			let payable = if remainder.is_zero() || remainder >= minimum_balance {
				amount.min(balance)
			} else {
				balance.saturating_sub(minimum_balance)
			};

			if payable.is_zero()
				|| T::Fungibles::can_deposit(asset_id, to, payable, Provenance::Extant)
					.into_result()
					.is_err()
			{
				return Zero::zero();
			}
			payable
		}

		fn multiplier(pool: &RewardPoolOf<T>, duration: DurationSeconds) -> Result<FixedU64, DispatchError> {
			pool.lock
				.duration_presets
				.get(&duration)
				.copied()
				.ok_or_else(|| Error::<T>::InvalidDurationPreset.into())
		}

		fn owned_stake(
			who: &T::AccountId,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> Result<StakeOf<T>, DispatchError> {
			let stake = Stakes::<T>::get(fnft_collection_id, fnft_instance_id).ok_or(Error::<T>::StakeNotFound)?;
			ensure!(stake.owner == *who, Error::<T>::OnlyStakeOwner);
			Ok(stake)
		}

		fn set_reduction(
			reductions: &mut ReductionsOf<T>,
			asset_id: T::AssetId,
			amount: T::Balance,
		) -> DispatchResult {
			reductions.try_insert(asset_id, amount).map_err(|_| {
				log::error!(
					target: LOG_TARGET,
					"Reductions of a position exceed the number of reward assets."
				);
				Error::<T>::Internal
			})?;
			Ok(())
		}

		fn next_item_id(fnft_collection_id: T::CollectionId) -> Result<T::ItemId, DispatchError> {
			NextItemId::<T>::try_mutate(fnft_collection_id, |next| -> Result<T::ItemId, DispatchError> {
				let item_id = *next;
				next.ensure_add_assign(One::one())?;
				Ok(item_id)
			})
		}

		fn next_free_collection_id() -> Result<T::CollectionId, DispatchError> {
			let mut collection_id = NextCollectionId::<T>::get();
			while CollectionPools::<T>::contains_key(collection_id) {
				collection_id.ensure_add_assign(One::one())?;
			}
			let mut next = collection_id;
			next.ensure_add_assign(One::one())?;
			NextCollectionId::<T>::set(next);
			Ok(collection_id)
		}

		fn next_free_share_asset_id(pool_id: T::AssetId) -> Result<T::AssetId, DispatchError> {
			let mut asset_id = NextShareAssetId::<T>::get();
			while asset_id == pool_id
				|| T::Fungibles::asset_exists(asset_id)
				|| RewardPools::<T>::contains_key(asset_id)
				|| ShareAssetPools::<T>::contains_key(asset_id)
			{
				asset_id.ensure_add_assign(One::one())?;
			}
			let mut next = asset_id;
			next.ensure_add_assign(One::one())?;
			NextShareAssetId::<T>::set(next);
			Ok(asset_id)
		}

		fn mint_shares(pool: &RewardPoolOf<T>, amount: T::Balance) -> DispatchResult {
			if amount.is_zero() {
				return Ok(());
			}
			T::Fungibles::mint_into(
				pool.share_asset_id,
				&Self::pool_staked_account_id(&pool.asset_id),
				amount,
			)?;
			Ok(())
		}

		fn burn_shares(pool: &RewardPoolOf<T>, amount: T::Balance) -> DispatchResult {
			if amount.is_zero() {
				return Ok(());
			}
			T::Fungibles::burn_from(
				pool.share_asset_id,
				&Self::pool_staked_account_id(&pool.asset_id),
				amount,
				Precision::Exact,
				Fortitude::Force,
			)?;
			Ok(())
		}

		pub(crate) fn do_create_reward_pool(
			pool_config: RewardPoolConfigOf<T>,
		) -> Result<(T::AssetId, T::AssetId, T::CollectionId), DispatchError> {
			let RewardPoolConfig {
				owner,
				asset_id: pool_id,
				start_block,
				end_block,
				reward_configs,
				lock,
				share_asset_id,
				financial_nft_collection_id,
				minimum_staking_amount,
			} = pool_config;

			// 1. Validate the configuration
			ensure!(
				!RewardPools::<T>::contains_key(pool_id),
				Error::<T>::RewardPoolAlreadyExists
			);
			ensure!(start_block < end_block, Error::<T>::InvalidPoolWindow);
			ensure!(
				end_block > frame_system::Pallet::<T>::block_number(),
				Error::<T>::EndBlockMustBeInTheFuture
			);
			ensure!(
				reward_configs
					.values()
					.all(|config| !config.reward_rate.amount.is_zero()),
				Error::<T>::ZeroRewardRate
			);
			ensure!(
				reward_configs.keys().all(|asset_id| T::Fungibles::asset_exists(*asset_id)),
				Error::<T>::RewardAssetNotFound
			);
			ensure!(
				!lock.duration_presets.is_empty(),
				Error::<T>::NoDurationPresetsConfigured
			);
			let max_multiplier = T::MaxRewardMultiplier::get();
			ensure!(
				lock.duration_presets
					.values()
					.all(|multiplier| *multiplier <= max_multiplier),
				Error::<T>::RewardMultiplierTooHigh
			);

			// Share assets are minted by their pool only, they can neither be
			// staked nor paid out as rewards.
			ensure!(
				!ShareAssetPools::<T>::contains_key(pool_id)
					&& !reward_configs
						.keys()
						.any(|asset_id| ShareAssetPools::<T>::contains_key(asset_id)),
				Error::<T>::ShareAssetInUse
			);
			let share_asset_in_use = |share_asset_id: T::AssetId| {
				share_asset_id == pool_id
					|| reward_configs.contains_key(&share_asset_id)
					|| RewardPools::<T>::contains_key(share_asset_id)
					|| ShareAssetPools::<T>::contains_key(share_asset_id)
					|| !T::Fungibles::total_issuance(share_asset_id).is_zero()
			};
			if let Some(share_asset_id) = share_asset_id {
				ensure!(!share_asset_in_use(share_asset_id), Error::<T>::ShareAssetInUse);
			}
			if let Some(collection_id) = financial_nft_collection_id {
				ensure!(
					!CollectionPools::<T>::contains_key(collection_id),
					Error::<T>::FinancialNftCollectionInUse
				);
			}

			// 2. Allocate the share asset and the financial NFT collection
			let staked_account = Self::pool_staked_account_id(&pool_id);
			let share_asset_id = match share_asset_id {
				Some(share_asset_id) => share_asset_id,
				None => Self::next_free_share_asset_id(pool_id)?,
			};
			if !T::Fungibles::asset_exists(share_asset_id) {
				T::Fungibles::create(share_asset_id, staked_account, true, One::one())?;
			}
			let financial_nft_collection_id = match financial_nft_collection_id {
				Some(collection_id) => collection_id,
				None => Self::next_free_collection_id()?,
			};

			// 3. Store the pool
			let now = Self::now();
			let rewards = reward_configs
				.into_iter()
				.map(|(asset_id, config)| (asset_id, Reward::from_config(config, now)))
				.collect::<BTreeMap<_, _>>();
			let rewards = RewardsOf::<T>::try_from(rewards).map_err(|_| {
				log::error!(target: LOG_TARGET, "Reward configurations exceed their bound.");
				Error::<T>::Internal
			})?;

			rewards.keys().for_each(|asset_id| {
				RewardsPotIsEmpty::<T>::insert(pool_id, asset_id, ());
			});
			CollectionPools::<T>::insert(financial_nft_collection_id, pool_id);
			ShareAssetPools::<T>::insert(share_asset_id, pool_id);
			RewardPools::<T>::insert(
				pool_id,
				RewardPool {
					owner,
					asset_id: pool_id,
					share_asset_id,
					financial_nft_collection_id,
					start_block,
					end_block,
					rewards,
					lock,
					minimum_staking_amount,
					total_shares: Zero::zero(),
				},
			);

			Ok((pool_id, share_asset_id, financial_nft_collection_id))
		}

		pub(crate) fn do_stake(
			who: &T::AccountId,
			pool_id: T::AssetId,
			amount: T::Balance,
			duration_preset: DurationSeconds,
			keep_alive: bool,
		) -> Result<(T::CollectionId, T::ItemId, FixedU64), DispatchError> {
			// 1. Validate
			let mut pool = RewardPools::<T>::get(pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;
			ensure!(
				pool.has_started(&frame_system::Pallet::<T>::block_number()),
				Error::<T>::RewardPoolNotStarted
			);
			ensure!(
				amount >= pool.minimum_staking_amount && amount >= T::Fungibles::minimum_balance(pool_id),
				Error::<T>::StakeAmountBelowMinimum
			);
			let reward_multiplier = Self::multiplier(&pool, duration_preset)?;
			Self::ensure_can_pay(pool_id, who, amount, keep_alive)?;

			// 2. Move the principal
			if !amount.is_zero() {
				T::Fungibles::transfer(
					pool_id,
					who,
					&Self::pool_staked_account_id(&pool_id),
					amount,
					Self::preservation(keep_alive),
				)?;
			}

			// 3. Mint the position with an empty share, then grow it
			let fnft_collection_id = pool.financial_nft_collection_id;
			let fnft_instance_id = Self::next_item_id(fnft_collection_id)?;
			let mut reductions = ReductionsOf::<T>::default();
			for asset_id in pool.rewards.keys() {
				Self::set_reduction(&mut reductions, *asset_id, Zero::zero())?;
			}
			let mut stake = Stake {
				owner: who.clone(),
				reward_pool_id: pool_id,
				stake: amount,
				share: Zero::zero(),
				reductions,
				lock: Lock {
					started_at: Self::now(),
					duration: duration_preset,
					unlock_penalty: pool.lock.unlock_penalty,
				},
				lineage_root: fnft_instance_id,
			};
			let share = share_for(amount, reward_multiplier)?;
			Self::resize_position(&mut stake, &mut pool, share)?;

			// 4. Write back
			RewardPools::<T>::insert(pool_id, pool);
			Stakes::<T>::insert(fnft_collection_id, fnft_instance_id, stake);

			Ok((fnft_collection_id, fnft_instance_id, reward_multiplier))
		}

		/// Pays out the claimable rewards of a position. Storage is not
		/// written back.
		pub(crate) fn do_claim(
			stake: &mut StakeOf<T>,
			pool: &mut RewardPoolOf<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> DispatchResult {
			let pool_id = pool.asset_id;
			let pot = Self::pool_account_id(&pool_id);
			let total_shares = pool.total_shares;

			for (asset_id, reward) in pool.rewards.iter_mut() {
				let reduction = stake.reductions.get(asset_id).copied().unwrap_or_default();
				let owed = reward.claimable(stake.share, total_shares, reduction)?;
				let amount = Self::payable(*asset_id, &pot, &stake.owner, owed);

				if !amount.is_zero() {
					reward.register_claim(amount)?;
					let new_reduction = reduction.checked_add(&amount).ok_or(ArithmeticError::Overflow)?;
					Self::set_reduction(&mut stake.reductions, *asset_id, new_reduction)?;
					T::Fungibles::transfer(*asset_id, &pot, &stake.owner, amount, Preservation::Expendable)?;

					if reward.available().is_zero() {
						RewardsPotIsEmpty::<T>::insert(pool_id, asset_id, ());
					}
				}

				log::trace!(
					target: LOG_TARGET,
					"Position {:?}/{:?} claimed {:?} of {:?} owed in asset {:?}.",
					fnft_collection_id,
					fnft_instance_id,
					amount,
					owed,
					asset_id
				);

				Self::deposit_event(Event::RewardClaimed {
					owner: stake.owner.clone(),
					fnft_collection_id,
					fnft_instance_id,
					asset_id: *asset_id,
					amount,
				});
			}

			Ok(())
		}

		/// Changes the share of a position to `new_share`, keeping the
		/// position's claimable rewards and the pool's share issuance in sync.
		pub(crate) fn resize_position(
			stake: &mut StakeOf<T>,
			pool: &mut RewardPoolOf<T>,
			new_share: T::Balance,
		) -> DispatchResult {
			let total_shares = pool.total_shares;

			if new_share > stake.share {
				let added = new_share.checked_sub(&stake.share).ok_or(ArithmeticError::Underflow)?;
				for (asset_id, reward) in pool.rewards.iter_mut() {
					let credit = reward.dilute(added, total_shares)?;
					let reduction = stake
						.reductions
						.get(asset_id)
						.copied()
						.unwrap_or_default()
						.checked_add(&credit)
						.ok_or(ArithmeticError::Overflow)?;
					Self::set_reduction(&mut stake.reductions, *asset_id, reduction)?;
				}
				pool.total_shares = total_shares.checked_add(&added).ok_or(ArithmeticError::Overflow)?;
				Self::mint_shares(pool, added)?;
			} else if new_share < stake.share {
				let removed = stake.share.checked_sub(&new_share).ok_or(ArithmeticError::Underflow)?;
				for (asset_id, reward) in pool.rewards.iter_mut() {
					let reduction = stake.reductions.get(asset_id).copied().unwrap_or_default();
					let debit = reward.release(removed, total_shares, reduction)?;
					let reduction = reduction.checked_sub(&debit).ok_or(ArithmeticError::Underflow)?;
					Self::set_reduction(&mut stake.reductions, *asset_id, reduction)?;
				}
				pool.total_shares = total_shares.checked_sub(&removed).ok_or(ArithmeticError::Underflow)?;
				Self::burn_shares(pool, removed)?;
			}

			stake.share = new_share;
			Ok(())
		}

		pub(crate) fn do_split(
			stake: &mut StakeOf<T>,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
			ratio: Permill,
		) -> Result<PositionsOf<T>, DispatchError> {
			// 1. Divide the position
			let pool = RewardPools::<T>::get(stake.reward_pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;
			let (kept_stake, split_stake) = split_amount(stake.stake, ratio);
			let minimum_balance = T::Fungibles::minimum_balance(stake.reward_pool_id);
			ensure!(
				kept_stake >= minimum_balance && split_stake >= minimum_balance,
				Error::<T>::StakeAmountBelowMinimum
			);
			let (kept_share, split_share) = split_amount(stake.share, ratio);
			let mut split_reductions = BTreeMap::new();
			for (asset_id, reduction) in stake.reductions.iter_mut() {
				let reward = pool.rewards.get(asset_id).ok_or(Error::<T>::RewardAssetNotFound)?;
				let (kept, split) =
					reward.split_reduction(kept_share, split_share, pool.total_shares, *reduction, ratio)?;
				*reduction = kept;
				split_reductions.insert(*asset_id, split);
			}
			let split_reductions = ReductionsOf::<T>::try_from(split_reductions).map_err(|_| Error::<T>::Internal)?;
			stake.stake = kept_stake;
			stake.share = kept_share;

			// 2. Mint the sibling and record it in the lineage
			let split_instance_id = Self::next_item_id(fnft_collection_id)?;
			let lineage_root = stake.lineage_root;
			let mut lineage = SplitLineage::<T>::get(fnft_collection_id, lineage_root).unwrap_or_default();
			if lineage.is_empty() {
				lineage
					.try_push(fnft_instance_id)
					.map_err(|_| Error::<T>::TooManySplitPositions)?;
			}
			lineage
				.try_push(split_instance_id)
				.map_err(|_| Error::<T>::TooManySplitPositions)?;

			let sibling = Stake {
				owner: stake.owner.clone(),
				reward_pool_id: stake.reward_pool_id,
				stake: split_stake,
				share: split_share,
				reductions: split_reductions,
				lock: stake.lock.clone(),
				lineage_root,
			};

			// 3. Write back
			Stakes::<T>::insert(fnft_collection_id, fnft_instance_id, stake.clone());
			Stakes::<T>::insert(fnft_collection_id, split_instance_id, sibling);

			let positions = lineage
				.iter()
				.filter_map(|instance_id| {
					Stakes::<T>::get(fnft_collection_id, instance_id)
						.map(|position| (fnft_collection_id, *instance_id, position.share))
				})
				.collect::<Vec<_>>();
			SplitLineage::<T>::insert(fnft_collection_id, lineage_root, lineage);

			PositionsOf::<T>::try_from(positions).map_err(|_| Error::<T>::Internal.into())
		}

		pub(crate) fn do_unstake(
			who: &T::AccountId,
			fnft_collection_id: T::CollectionId,
			fnft_instance_id: T::ItemId,
		) -> Result<Option<T::Balance>, DispatchError> {
			// 1. Load and authorize
			let mut stake = Self::owned_stake(who, fnft_collection_id, fnft_instance_id)?;
			let pool_id = stake.reward_pool_id;
			let mut pool = RewardPools::<T>::get(pool_id).ok_or(Error::<T>::RewardPoolNotFound)?;

			// 2. Pay out pending rewards and give up the share
			Self::do_claim(&mut stake, &mut pool, fnft_collection_id, fnft_instance_id)?;
			Self::resize_position(&mut stake, &mut pool, Zero::zero())?;

			// 3. Return the principal, minus the penalty if unstaking early
			let is_early = !stake.lock.is_expired(Self::now());
			let returned = if is_early {
				stake.lock.unlock_penalty.left_from_one().mul_floor(stake.stake)
			} else {
				stake.stake
			};
			let slash = stake.stake.checked_sub(&returned).ok_or(ArithmeticError::Underflow)?;

			// The whole principal leaves the stake account at once, so that the
			// principal of the other positions is never reduced to dust.
			let staked_account = Self::pool_staked_account_id(&pool_id);
			if !stake.stake.is_zero() {
				T::Fungibles::transfer(pool_id, &staked_account, who, stake.stake, Preservation::Expendable)?;
			}
			if !slash.is_zero() {
				let treasury = T::TreasuryAccount::get();
				if T::Fungibles::can_deposit(pool_id, &treasury, slash, Provenance::Extant)
					.into_result()
					.is_ok()
				{
					T::Fungibles::transfer(pool_id, who, &treasury, slash, Preservation::Expendable)?;
				} else {
					// The treasury cannot hold the penalty.
					T::Fungibles::burn_from(pool_id, who, slash, Precision::Exact, Fortitude::Force)?;
				}
			}

			// 4. Burn the position
			Stakes::<T>::remove(fnft_collection_id, fnft_instance_id);
			SplitLineage::<T>::mutate_exists(fnft_collection_id, stake.lineage_root, |maybe_lineage| {
				if let Some(lineage) = maybe_lineage {
					lineage.retain(|instance_id| *instance_id != fnft_instance_id);
					if lineage.is_empty() {
						*maybe_lineage = None;
					}
				}
			});
			RewardPools::<T>::insert(pool_id, pool);

			log::info!(
				target: LOG_TARGET,
				"Position {:?}/{:?} unstaked, {:?} returned, {:?} slashed.",
				fnft_collection_id,
				fnft_instance_id,
				returned,
				slash
			);

			Ok((!slash.is_zero()).then_some(slash))
		}
	}
}
