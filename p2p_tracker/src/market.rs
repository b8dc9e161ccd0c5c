multiversx_sc::imports!();

use crate::{cache::Cache, storage, utils};

use common_errors::ERROR_MARKET_ALREADY_EXISTS;
use common_structs::PoolFamily;

/// Market lifecycle: creation and processing of the pool observations.
#[multiversx_sc::module]
pub trait MarketModule:
    storage::Storage
    + utils::UtilsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::accrual::InterestAccrualModule
    + common_rates::strategy::RateStrategyModule
    + common_rates::proportions::ProportionModule
    + common_rates::growth::GrowthFactorModule
    + common_rates::InterestRates
{
    /// Starts tracking a market.
    ///
    /// **Process**:
    /// 1. Fails if the market is already tracked.
    /// 2. Builds the first pool observation in the family's unit (Ray for Aave, Wad for Compound).
    /// 3. Seeds the P2P indexes, validates the BPS settings and computes the initial P2P rates.
    /// 4. Stores the state and emits `create_p2p_market`.
    ///
    /// ### Parameters
    /// - `market`: Address of the underlying pool market.
    /// - `family`: Pool family of the market.
    /// - `pool_supply_index`, `pool_borrow_index`: Current pool indexes, family unit.
    /// - `pool_supply_rate`, `pool_borrow_rate`: Current pool rates, family unit.
    /// - `p2p_supply_index`, `p2p_borrow_index`: Initial P2P indexes, family unit.
    /// - `reserve_factor`, `p2p_index_cursor`: BPS precision.
    /// - `block_number`, `timestamp`: Chain position of the observation.
    #[only_owner]
    #[endpoint(createMarket)]
    fn create_market(
        &self,
        market: ManagedAddress,
        family: PoolFamily,
        pool_supply_index: BigUint,
        pool_borrow_index: BigUint,
        pool_supply_rate: BigUint,
        pool_borrow_rate: BigUint,
        p2p_supply_index: BigUint,
        p2p_borrow_index: BigUint,
        reserve_factor: BigUint,
        p2p_index_cursor: BigUint,
        block_number: u64,
        timestamp: u64,
    ) {
        require!(!self.markets().contains(&market), ERROR_MARKET_ALREADY_EXISTS);

        let precision = family.index_precision();
        let observation = self.to_pool_observation(
            family,
            pool_supply_index,
            pool_borrow_index,
            pool_supply_rate,
            pool_borrow_rate,
            block_number,
            timestamp,
        );

        let market_state = self.create_market_state(
            family,
            &observation,
            &self.to_decimal(p2p_supply_index, precision),
            &self.to_decimal(p2p_borrow_index, precision),
            &self.to_decimal_bps(reserve_factor),
            &self.to_decimal_bps(p2p_index_cursor),
        );

        self.markets().insert(market.clone());
        self.market_state(&market).set(&market_state);

        self.create_p2p_market_event(&market, family, block_number, timestamp, &market_state);
    }

    /// Processes a new pool observation of a market.
    ///
    /// **Process**:
    /// 1. Loads the market into a `Cache`.
    /// 2. Derives the new P2P indexes from the pool growth, the deltas and the idle supply.
    /// 3. Refreshes the P2P rates from the new pool rates.
    /// 4. Emits `inverted_pool_growth` when the pool supply index grew faster than the
    ///    borrow index, then `update_p2p_indexes`.
    ///
    /// ### Returns
    /// - `(p2p_supply_index, p2p_borrow_index, p2p_supply_rate, p2p_borrow_rate)`
    ///
    /// Observations older than the last processed one are rejected.
    #[only_owner]
    #[endpoint(updatePoolIndexes)]
    fn update_pool_indexes(
        &self,
        market: ManagedAddress,
        pool_supply_index: BigUint,
        pool_borrow_index: BigUint,
        pool_supply_rate: BigUint,
        pool_borrow_rate: BigUint,
        block_number: u64,
        timestamp: u64,
    ) -> MultiValue4<
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
        ManagedDecimal<Self::Api, NumDecimals>,
    > {
        self.require_market_exists(&market);

        let mut cache = Cache::new(self, &market);
        let observation = self.to_pool_observation(
            cache.state.family,
            pool_supply_index,
            pool_borrow_index,
            pool_supply_rate,
            pool_borrow_rate,
            block_number,
            timestamp,
        );

        let update = self.update_p2p_indexes_and_rates(&cache.state, &observation);

        if update.growth_factors.is_inverted() {
            self.inverted_pool_growth_event(&market, block_number, &update.growth_factors);
        }
        self.update_p2p_indexes_event(&market, block_number, timestamp, &update);

        cache.state = update.market_state;
        cache.p2p_indexes_and_rates()
    }
}
