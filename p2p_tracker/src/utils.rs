multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::{cache::Cache, storage};

use common_errors::ERROR_MARKET_NOT_FOUND;
use common_structs::{P2PStateChange, PoolFamily, PoolObservation};

/// Helpers shared by the market, config and P2P state endpoints.
#[multiversx_sc::module]
pub trait UtilsModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::accrual::InterestAccrualModule
    + common_rates::strategy::RateStrategyModule
    + common_rates::proportions::ProportionModule
    + common_rates::growth::GrowthFactorModule
    + common_rates::InterestRates
{
    fn require_market_exists(&self, market: &ManagedAddress) {
        require!(self.markets().contains(market), ERROR_MARKET_NOT_FOUND);
    }

    /// Builds a pool observation from raw values expressed in the family's unit.
    fn to_pool_observation(
        &self,
        family: PoolFamily,
        pool_supply_index: BigUint,
        pool_borrow_index: BigUint,
        pool_supply_rate: BigUint,
        pool_borrow_rate: BigUint,
        block_number: u64,
        timestamp: u64,
    ) -> PoolObservation<Self::Api> {
        let precision = family.index_precision();

        PoolObservation {
            pool_supply_index: self.to_decimal(pool_supply_index, precision),
            pool_borrow_index: self.to_decimal(pool_borrow_index, precision),
            pool_supply_rate: self.to_decimal(pool_supply_rate, precision),
            pool_borrow_rate: self.to_decimal(pool_borrow_rate, precision),
            block_number,
            timestamp,
        }
    }

    /// Applies a P2P state change to a stored market and refreshes its P2P rates.
    ///
    /// **Process**:
    /// 1. Fails if the market is not tracked.
    /// 2. Loads the market state into a `Cache`.
    /// 3. Applies the change and recomputes the P2P supply and borrow rates.
    /// 4. Emits `update_p2p_state` with the change and the new rates.
    /// 5. The cache writes the new state back when dropped.
    fn process_p2p_state_change(
        &self,
        market: &ManagedAddress,
        change: P2PStateChange<Self::Api>,
    ) {
        self.require_market_exists(market);

        let mut cache = Cache::new(self, market);
        cache.state = self.apply_p2p_state_change(&cache.state, &change);

        self.update_p2p_state_event(market, &change, &cache.p2p_rates());
    }
}
