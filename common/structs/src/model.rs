#![no_std]

use common_constants::{
    AAVE_INDEXES_OFFSET, COMPOUND_INDEXES_OFFSET, RAY_PRECISION, WAD_PRECISION,
};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Family of the underlying pool a market is built on.
///
/// The family is picked when the market is created and never changes: it fixes the
/// fixed-point unit (Ray or Wad), the accrual law of each side and the way periodic
/// rates are annualized.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PoolFamily {
    /// Ray based indexes, APR rates, accrual per second
    Aave,
    /// Wad based indexes, per block rates, accrual per block
    Compound,
}

impl PoolFamily {
    /// Decimal precision of the market's fixed-point unit.
    pub fn index_precision(&self) -> NumDecimals {
        match self {
            PoolFamily::Aave => RAY_PRECISION,
            PoolFamily::Compound => WAD_PRECISION,
        }
    }

    /// Decimal exponent used to de-scale P2P amounts and to express the idle proportion.
    pub fn indexes_offset(&self) -> NumDecimals {
        match self {
            PoolFamily::Aave => AAVE_INDEXES_OFFSET,
            PoolFamily::Compound => COMPOUND_INDEXES_OFFSET,
        }
    }
}

/// Persistent rate state of a single market.
///
/// Indexes and rates are stored at the family's unit precision, `reserve_factor` and
/// `p2p_index_cursor` at BPS precision. Deltas, amounts and the idle supply are raw
/// integers living in the unit's raw domain.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct MarketRateState<M: ManagedTypeApi> {
    pub family: PoolFamily,
    pub indexes_offset: NumDecimals,
    pub pool_supply_index: ManagedDecimal<M, NumDecimals>,
    pub pool_borrow_index: ManagedDecimal<M, NumDecimals>,
    pub pool_supply_rate: ManagedDecimal<M, NumDecimals>,
    pub pool_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub p2p_supply_index: ManagedDecimal<M, NumDecimals>,
    pub p2p_borrow_index: ManagedDecimal<M, NumDecimals>,
    pub p2p_supply_rate: ManagedDecimal<M, NumDecimals>,
    pub p2p_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub p2p_supply_index_from_rates: ManagedDecimal<M, NumDecimals>,
    pub p2p_borrow_index_from_rates: ManagedDecimal<M, NumDecimals>,
    pub p2p_supply_delta: BigUint<M>,
    pub p2p_borrow_delta: BigUint<M>,
    pub p2p_supply_amount: BigUint<M>,
    pub p2p_borrow_amount: BigUint<M>,
    pub idle_supply: BigUint<M>,
    pub reserve_factor: ManagedDecimal<M, NumDecimals>,
    pub p2p_index_cursor: ManagedDecimal<M, NumDecimals>,
    pub last_block: u64,
    pub last_timestamp: u64,
}

impl<M: ManagedTypeApi> MarketRateState<M> {
    /// Unit precision of every index and rate of this market.
    pub fn precision(&self) -> NumDecimals {
        self.family.index_precision()
    }

    /// Writes a P2P state change into the state. Rates are not refreshed here.
    pub fn apply_p2p_state_change(&mut self, change: &P2PStateChange<M>) {
        match change {
            P2PStateChange::SupplyDelta(delta) => self.p2p_supply_delta = delta.clone(),
            P2PStateChange::BorrowDelta(delta) => self.p2p_borrow_delta = delta.clone(),
            P2PStateChange::Amounts {
                p2p_supply_amount,
                p2p_borrow_amount,
            } => {
                self.p2p_supply_amount = p2p_supply_amount.clone();
                self.p2p_borrow_amount = p2p_borrow_amount.clone();
            },
            P2PStateChange::IdleSupply(idle_supply) => self.idle_supply = idle_supply.clone(),
            P2PStateChange::ReserveFactor(reserve_factor) => {
                self.reserve_factor = reserve_factor.clone()
            },
            P2PStateChange::IndexCursor(p2p_index_cursor) => {
                self.p2p_index_cursor = p2p_index_cursor.clone()
            },
        }
    }
}

/// New values published by the underlying pool for a market.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct PoolObservation<M: ManagedTypeApi> {
    pub pool_supply_index: ManagedDecimal<M, NumDecimals>,
    pub pool_borrow_index: ManagedDecimal<M, NumDecimals>,
    pub pool_supply_rate: ManagedDecimal<M, NumDecimals>,
    pub pool_borrow_rate: ManagedDecimal<M, NumDecimals>,
    pub block_number: u64,
    pub timestamp: u64,
}

/// A change of the P2P side of a market, decoded by the ingestion layer.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub enum P2PStateChange<M: ManagedTypeApi> {
    SupplyDelta(BigUint<M>),
    BorrowDelta(BigUint<M>),
    Amounts {
        p2p_supply_amount: BigUint<M>,
        p2p_borrow_amount: BigUint<M>,
    },
    IdleSupply(BigUint<M>),
    /// BPS precision
    ReserveFactor(ManagedDecimal<M, NumDecimals>),
    /// BPS precision
    IndexCursor(ManagedDecimal<M, NumDecimals>),
}

/// Per period growth multipliers, scaled by the market unit.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct GrowthFactors<M: ManagedTypeApi> {
    pub pool_supply_growth: ManagedDecimal<M, NumDecimals>,
    pub pool_borrow_growth: ManagedDecimal<M, NumDecimals>,
    pub p2p_supply_growth: ManagedDecimal<M, NumDecimals>,
    pub p2p_borrow_growth: ManagedDecimal<M, NumDecimals>,
}

impl<M: ManagedTypeApi> GrowthFactors<M> {
    /// Pool supply index grew faster than the pool borrow index.
    pub fn is_inverted(&self) -> bool {
        self.pool_supply_growth > self.pool_borrow_growth
    }
}

/// Shares of the P2P liquidity that are idle or still sitting on the pool, at unit precision.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct MarketProportions<M: ManagedTypeApi> {
    pub proportion_idle: ManagedDecimal<M, NumDecimals>,
    pub supply_proportion_delta: ManagedDecimal<M, NumDecimals>,
    pub borrow_proportion_delta: ManagedDecimal<M, NumDecimals>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct P2PRates<M: ManagedTypeApi> {
    pub p2p_supply_rate: ManagedDecimal<M, NumDecimals>,
    pub p2p_borrow_rate: ManagedDecimal<M, NumDecimals>,
}

/// Interests earned by matched liquidity between two observations, in underlying units.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct P2PInterests<M: ManagedTypeApi> {
    pub supply_interests: BigUint<M>,
    pub borrow_interests: BigUint<M>,
    pub supply_interests_from_rates: BigUint<M>,
    pub borrow_interests_from_rates: BigUint<M>,
}

/// Result of processing one pool observation for a market.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct P2PIndexesUpdate<M: ManagedTypeApi> {
    pub market_state: MarketRateState<M>,
    pub growth_factors: GrowthFactors<M>,
    pub proportions: MarketProportions<M>,
    pub interests: P2PInterests<M>,
    pub timestamp_diff: u64,
    pub block_diff: u64,
}
