multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use crate::{storage, utils};

use common_structs::{MarketProportions, MarketRateState, P2PIndexesUpdate};

/// The ViewModule provides read-only endpoints over the tracked markets.
#[multiversx_sc::module]
pub trait ViewModule:
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
    /// Retrieves the full rate state of a market.
    #[view(getMarketState)]
    fn get_market_state(&self, market: ManagedAddress) -> MarketRateState<Self::Api> {
        self.require_market_exists(&market);
        self.market_state(&market).get()
    }

    /// Retrieves the current P2P indexes of a market.
    ///
    /// # Returns
    /// - `(p2p_supply_index, p2p_borrow_index)` in the market's unit.
    #[view(getP2PIndexes)]
    fn get_p2p_indexes(
        &self,
        market: ManagedAddress,
    ) -> MultiValue2<ManagedDecimal<Self::Api, NumDecimals>, ManagedDecimal<Self::Api, NumDecimals>>
    {
        let state = self.get_market_state(market);
        (state.p2p_supply_index, state.p2p_borrow_index).into()
    }

    /// Retrieves the P2P rates of a market as APRs.
    ///
    /// Per block rates of Compound markets are annualized, Aave rates are returned as stored.
    #[view(getP2PRatesApr)]
    fn get_p2p_rates_apr(
        &self,
        market: ManagedAddress,
    ) -> MultiValue2<ManagedDecimal<Self::Api, NumDecimals>, ManagedDecimal<Self::Api, NumDecimals>>
    {
        let state = self.get_market_state(market);
        (
            self.to_apr(state.family, &state.p2p_supply_rate),
            self.to_apr(state.family, &state.p2p_borrow_rate),
        )
            .into()
    }

    /// Retrieves the last observed pool rates of a market as APRs.
    #[view(getPoolRatesApr)]
    fn get_pool_rates_apr(
        &self,
        market: ManagedAddress,
    ) -> MultiValue2<ManagedDecimal<Self::Api, NumDecimals>, ManagedDecimal<Self::Api, NumDecimals>>
    {
        let state = self.get_market_state(market);
        (
            self.to_apr(state.family, &state.pool_supply_rate),
            self.to_apr(state.family, &state.pool_borrow_rate),
        )
            .into()
    }

    /// Idle and delta proportions currently weighing on the P2P rates.
    #[view(getMarketProportions)]
    fn get_market_proportions(&self, market: ManagedAddress) -> MarketProportions<Self::Api> {
        let state = self.get_market_state(market);
        self.compute_market_proportions(&state)
    }

    /// Computes the outcome of a pool observation without storing it.
    ///
    /// Same inputs and checks as `updatePoolIndexes`.
    #[view(simulateP2PIndexes)]
    fn simulate_p2p_indexes(
        &self,
        market: ManagedAddress,
        pool_supply_index: BigUint,
        pool_borrow_index: BigUint,
        pool_supply_rate: BigUint,
        pool_borrow_rate: BigUint,
        block_number: u64,
        timestamp: u64,
    ) -> P2PIndexesUpdate<Self::Api> {
        let state = self.get_market_state(market);
        let observation = self.to_pool_observation(
            state.family,
            pool_supply_index,
            pool_borrow_index,
            pool_supply_rate,
            pool_borrow_rate,
            block_number,
            timestamp,
        );

        self.update_p2p_indexes_and_rates(&state, &observation)
    }
}
