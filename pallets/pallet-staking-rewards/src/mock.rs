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

use frame_support::{
	construct_runtime, parameter_types,
	traits::{AsEnsureOriginWithArg, ConstU128, ConstU32, Everything},
	weights::constants::RocksDbWeight,
	PalletId,
};
use frame_system::{mocking::MockBlock, EnsureRoot, EnsureSigned};
use sp_arithmetic::{FixedU64, Perbill};
use sp_core::{ConstU16, ConstU64, H256};
use sp_runtime::{
	traits::{BlakeTwo256, IdentityLookup},
	AccountId32, BoundedBTreeMap, BuildStorage,
};
use sp_std::collections::btree_map::BTreeMap;

use crate::{
	types::{DurationSeconds, LockConfig, RewardConfig, RewardPoolConfig, RewardRate},
	LockConfigOf, Pallet, RewardConfigsOf, RewardPoolConfigOf,
};

pub(crate) type AccountId = AccountId32;
pub(crate) type AssetId = u32;
pub(crate) type Balance = u128;
pub(crate) type CollectionId = u32;
pub(crate) type ItemId = u64;

// accounts
pub(crate) const ALICE: AccountId = AccountId::new([1u8; 32]);
pub(crate) const BOB: AccountId = AccountId::new([2u8; 32]);
pub(crate) const CHARLIE: AccountId = AccountId::new([3u8; 32]);
pub(crate) const POOL_OWNER: AccountId = AccountId::new([98u8; 32]);
pub(crate) const TREASURY: AccountId = AccountId::new([99u8; 32]);

// assets
pub(crate) const STAKED_ASSET_ID: AssetId = 10_000;
pub(crate) const REWARD_ASSET_ID: AssetId = 10_001;
pub(crate) const SECOND_REWARD_ASSET_ID: AssetId = 10_002;
pub(crate) const THIRD_REWARD_ASSET_ID: AssetId = 10_003;
pub(crate) const UNIT: Balance = 1_000_000_000_000;

// time
pub(crate) const GENESIS_TIMESTAMP_SECS: u64 = 1_700_000_000;
pub(crate) const ONE_HOUR: DurationSeconds = 60 * 60;
pub(crate) const ONE_WEEK: DurationSeconds = 7 * 24 * ONE_HOUR;
pub(crate) const POOL_START_BLOCK: u64 = 1;
pub(crate) const POOL_END_BLOCK: u64 = 1_000;

construct_runtime!(
	pub enum MockRuntime {
		System: frame_system,
		Balances: pallet_balances,
		Assets: pallet_assets,
		Timestamp: pallet_timestamp,
		StakingRewards: crate,
	}
);

impl frame_system::Config for MockRuntime {
	type AccountData = pallet_balances::AccountData<Balance>;
	type AccountId = AccountId;
	type BaseCallFilter = Everything;
	type Block = MockBlock<MockRuntime>;
	type BlockHashCount = ConstU64<256>;
	type BlockLength = ();
	type BlockWeights = ();
	type DbWeight = RocksDbWeight;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type Lookup = IdentityLookup<Self::AccountId>;
	type MaxConsumers = ConstU32<16>;
	type Nonce = u64;
	type OnKilledAccount = ();
	type OnNewAccount = ();
	type OnSetCode = ();
	type PalletInfo = PalletInfo;
	type RuntimeCall = RuntimeCall;
	type RuntimeEvent = RuntimeEvent;
	type RuntimeTask = ();
	type RuntimeOrigin = RuntimeOrigin;
	type SS58Prefix = ConstU16<38>;
	type SystemWeightInfo = ();
	type Version = ();
}

impl pallet_balances::Config for MockRuntime {
	type AccountStore = System;
	type Balance = Balance;
	type DustRemoval = ();
	type ExistentialDeposit = ConstU128<1>;
	type FreezeIdentifier = ();
	type MaxFreezes = ();
	type MaxLocks = ConstU32<10>;
	type MaxReserves = ConstU32<10>;
	type ReserveIdentifier = [u8; 8];
	type RuntimeEvent = RuntimeEvent;
	type RuntimeFreezeReason = ();
	type RuntimeHoldReason = RuntimeHoldReason;
	type WeightInfo = ();
}

impl pallet_assets::Config for MockRuntime {
	type ApprovalDeposit = ConstU128<0>;
	type AssetAccountDeposit = ConstU128<0>;
	type AssetDeposit = ConstU128<0>;
	type AssetId = AssetId;
	type AssetIdParameter = AssetId;
	type Balance = Balance;
	type CallbackHandle = ();
	type CreateOrigin = AsEnsureOriginWithArg<EnsureSigned<AccountId>>;
	type Currency = Balances;
	type Extra = ();
	type ForceOrigin = EnsureRoot<AccountId>;
	type Freezer = ();
	type MetadataDepositBase = ConstU128<0>;
	type MetadataDepositPerByte = ConstU128<0>;
	type RemoveItemsLimit = ConstU32<5>;
	type RuntimeEvent = RuntimeEvent;
	type StringLimit = ConstU32<50>;
	type WeightInfo = ();

	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = ();
}

impl pallet_timestamp::Config for MockRuntime {
	type MinimumPeriod = ConstU64<1>;
	type Moment = u64;
	type OnTimestampSet = ();
	type WeightInfo = ();
}

parameter_types! {
	pub const StakingRewardsPalletId: PalletId = PalletId(*b"kilt/stk");
	pub const TreasuryAccount: AccountId = TREASURY;
	pub MaxRewardMultiplier: FixedU64 = FixedU64::from_u32(2);
}

impl crate::Config for MockRuntime {
	type AssetId = AssetId;
	type Balance = Balance;
	type CollectionId = CollectionId;
	type Fungibles = Assets;
	type ItemId = ItemId;
	type MaxRewardConfigsPerPool = ConstU32<10>;
	type MaxRewardMultiplier = MaxRewardMultiplier;
	type MaxSplitPositions = ConstU32<4>;
	type MaxStakingDurationPresets = ConstU32<5>;
	type PalletId = StakingRewardsPalletId;
	type RewardPoolCreationOrigin = EnsureRoot<AccountId>;
	type RewardPoolUpdateOrigin = EnsureRoot<AccountId>;
	type RuntimeEvent = RuntimeEvent;
	type TreasuryAccount = TreasuryAccount;
	type UnixTime = Timestamp;
	type WeightInfo = ();

	#[cfg(feature = "runtime-benchmarks")]
	type BenchmarkHelper = ();
}

/// Lock presets: one hour at 1x, one week at 1.2x. Unstaking early costs
/// 10% of the principal.
pub(crate) fn default_lock_config() -> LockConfigOf<MockRuntime> {
	let presets = BTreeMap::from([
		(ONE_HOUR, FixedU64::from_u32(1)),
		(ONE_WEEK, FixedU64::from_rational(6, 5)),
	]);
	LockConfig {
		duration_presets: BoundedBTreeMap::try_from(presets).unwrap(),
		unlock_penalty: Perbill::from_percent(10),
	}
}

pub(crate) fn reward_configs(assets: &[AssetId]) -> RewardConfigsOf<MockRuntime> {
	let configs = assets
		.iter()
		.map(|asset_id| {
			(
				*asset_id,
				RewardConfig {
					max_rewards: 1_000_000 * UNIT,
					reward_rate: RewardRate::per_second(10),
				},
			)
		})
		.collect::<BTreeMap<_, _>>();
	BoundedBTreeMap::try_from(configs).unwrap()
}

/// A pool staking [`STAKED_ASSET_ID`] for [`REWARD_ASSET_ID`].
pub(crate) fn default_pool_config() -> RewardPoolConfigOf<MockRuntime> {
	RewardPoolConfig {
		owner: POOL_OWNER,
		asset_id: STAKED_ASSET_ID,
		start_block: POOL_START_BLOCK,
		end_block: POOL_END_BLOCK,
		reward_configs: reward_configs(&[REWARD_ASSET_ID]),
		lock: default_lock_config(),
		share_asset_id: None,
		financial_nft_collection_id: None,
		minimum_staking_amount: UNIT,
	}
}

pub(crate) fn events() -> Vec<crate::Event<MockRuntime>> {
	System::events()
		.into_iter()
		.map(|r| r.event)
		.filter_map(|e| {
			if let RuntimeEvent::StakingRewards(e) = e {
				Some(e)
			} else {
				None
			}
		})
		.collect::<Vec<_>>()
}

pub(crate) fn now() -> u64 {
	Timestamp::get() / 1_000
}

pub(crate) fn advance_time(seconds: u64) {
	Timestamp::set_timestamp(Timestamp::get() + seconds * 1_000);
}

pub(crate) fn asset_balance(asset_id: AssetId, who: &AccountId) -> Balance {
	Assets::balance(asset_id, who)
}

pub(crate) fn pot_account(pool_id: AssetId) -> AccountId {
	Pallet::<MockRuntime>::pool_account_id(&pool_id)
}

pub(crate) fn staked_account(pool_id: AssetId) -> AccountId {
	Pallet::<MockRuntime>::pool_staked_account_id(&pool_id)
}

#[derive(Default)]
pub(crate) struct ExtBuilder {
	assets: Vec<AssetId>,
	asset_min_balances: Vec<(AssetId, Balance)>,
	asset_balances: Vec<(AssetId, AccountId, Balance)>,
	pools: Vec<RewardPoolConfigOf<MockRuntime>>,
	// (pool id, reward asset id, amount)
	rewards: Vec<(AssetId, AssetId, Balance)>,
}

impl ExtBuilder {
	/// Creates the given sufficient assets, owned by the pool owner.
	pub(crate) fn with_assets(mut self, assets: Vec<AssetId>) -> Self {
		self.assets = assets;
		self
	}

	/// Overrides the minimum balance of assets created via
	/// [`Self::with_assets`], which is 1 otherwise.
	pub(crate) fn with_asset_min_balances(mut self, asset_min_balances: Vec<(AssetId, Balance)>) -> Self {
		self.asset_min_balances = asset_min_balances;
		self
	}

	pub(crate) fn with_asset_balances(mut self, asset_balances: Vec<(AssetId, AccountId, Balance)>) -> Self {
		self.asset_balances = asset_balances;
		self
	}

	pub(crate) fn with_reward_pools(mut self, pools: Vec<RewardPoolConfigOf<MockRuntime>>) -> Self {
		self.pools = pools;
		self
	}

	/// Funds the rewards pot of the given pools. The pool owner must hold the
	/// funds.
	pub(crate) fn with_rewards(mut self, rewards: Vec<(AssetId, AssetId, Balance)>) -> Self {
		self.rewards = rewards;
		self
	}

	pub(crate) fn build(self) -> sp_io::TestExternalities {
		let _ = env_logger::try_init();
		let mut storage = frame_system::GenesisConfig::<MockRuntime>::default()
			.build_storage()
			.unwrap();

		pallet_assets::GenesisConfig::<MockRuntime> {
			assets: self
				.assets
				.iter()
				.map(|asset_id| {
					let min_balance = self
						.asset_min_balances
						.iter()
						.find(|(id, _)| id == asset_id)
						.map_or(1, |(_, min_balance)| *min_balance);
					(*asset_id, POOL_OWNER, true, min_balance)
				})
				.collect(),
			accounts: self.asset_balances,
			metadata: vec![],
		}
		.assimilate_storage(&mut storage)
		.expect("assimilate should not fail");

		let mut ext = sp_io::TestExternalities::new(storage);

		ext.execute_with(|| {
			System::set_block_number(POOL_START_BLOCK);
			Timestamp::set_timestamp(GENESIS_TIMESTAMP_SECS * 1_000);

			for pool_config in self.pools {
				Pallet::<MockRuntime>::do_create_reward_pool(pool_config).unwrap();
			}

			for (pool_id, asset_id, amount) in self.rewards {
				Pallet::<MockRuntime>::add_to_rewards_pot(
					RuntimeOrigin::signed(POOL_OWNER),
					pool_id,
					asset_id,
					amount,
					false,
				)
				.unwrap();
			}

			System::reset_events()
		});

		ext
	}

	// Run the specified closure and test the storage invariants afterwards.
	pub(crate) fn build_and_execute_with_sanity_tests(self, run: impl FnOnce()) {
		let mut ext = self.build();
		ext.execute_with(|| {
			run();
			crate::try_state::do_try_state::<MockRuntime>().unwrap();
		});
	}

	#[cfg(feature = "runtime-benchmarks")]
	pub(crate) fn build_with_keystore(self) -> sp_io::TestExternalities {
		let mut ext = self.build();
		let keystore = sp_keystore::testing::MemoryKeystore::new();
		ext.register_extension(sp_keystore::KeystoreExt(sp_std::sync::Arc::new(keystore)));
		ext
	}
}
