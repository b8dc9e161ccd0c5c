#![no_std]

pub mod accrual;
pub mod growth;
pub mod proportions;
pub mod strategy;

use common_constants::{BPS, BPS_PRECISION};
use common_errors::{
    ERROR_INVALID_P2P_INDEX, ERROR_INVALID_P2P_INDEX_CURSOR, ERROR_INVALID_POOL_INDEX,
    ERROR_INVALID_RESERVE_FACTOR, ERROR_OBSERVATION_OUT_OF_ORDER,
};
use common_structs::{
    MarketProportions, MarketRateState, P2PIndexesUpdate, P2PInterests, P2PRates,
    P2PStateChange, PoolFamily, PoolObservation,
};

multiversx_sc::imports!();

/// The InterestRates module derives the peer-to-peer indexes and rates of a market from
/// the indexes and rates published by its underlying pool.
///
/// **Scope**: Growth of the P2P indexes between two pool observations, P2P supply and
/// borrow rates, and the interests earned by matched liquidity.
///
/// **Goal**: Matched suppliers and borrowers always sit between the pool supply and borrow
/// sides, with the part of the P2P liquidity still on the pool (the delta) or idle
/// weighted in.
#[multiversx_sc::module]
pub trait InterestRates:
    common_math::SharedMathModule
    + accrual::InterestAccrualModule
    + strategy::RateStrategyModule
    + proportions::ProportionModule
    + growth::GrowthFactorModule
{
    /// Next P2P index of one side.
    ///
    /// **Formula**:
    /// - If `proportion_delta == 0`: `last_p2p_index * p2p_growth`.
    /// - Otherwise: `last_p2p_index * ((1 - proportion_delta - proportion_idle) * p2p_growth
    ///   + proportion_delta * pool_growth + proportion_idle)`.
    fn compute_p2p_index(
        &self,
        last_p2p_index: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_growth: &ManagedDecimal<Self::Api, NumDecimals>,
        pool_growth: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_delta: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_idle: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let precision = last_p2p_index.scale();
        if self.is_zero(proportion_delta) {
            return self.mul_down(last_p2p_index, p2p_growth, precision);
        }

        let proportion_delta = proportion_delta.rescale(precision);
        let proportion_idle = proportion_idle.rescale(precision);
        let proportion_p2p =
            self.unit_one(precision) - proportion_delta.clone() - proportion_idle.clone();

        let blended_growth = self.mul_down(&proportion_p2p, p2p_growth, precision)
            + self.mul_down(&proportion_delta, pool_growth, precision)
            + proportion_idle;

        self.mul_down(last_p2p_index, &blended_growth, precision)
    }

    /// Mid rate between the pool supply and borrow rates. Falls back to the borrow rate
    /// when the pool rates are inverted.
    fn compute_p2p_rate(
        &self,
        pool_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        pool_supply_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if pool_borrow_rate < pool_supply_rate {
            return pool_borrow_rate.clone();
        }

        self.weighted_avg(pool_supply_rate, pool_borrow_rate, p2p_index_cursor)
    }

    /// P2P supply rate.
    ///
    /// **Formula**:
    /// - If `pool_supply_rate > pool_borrow_rate`: `pool_borrow_rate`.
    /// - Otherwise: `p2p_rate - reserve_factor * (p2p_rate - pool_supply_rate)`.
    /// - With a non zero delta the rate is blended with the pool supply rate.
    fn compute_p2p_supply_rate(
        &self,
        pool_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        pool_supply_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_delta: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_idle: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let p2p_supply_rate = if pool_supply_rate > pool_borrow_rate {
            pool_borrow_rate.clone()
        } else {
            let p2p_rate =
                self.compute_p2p_rate(pool_borrow_rate, pool_supply_rate, p2p_index_cursor);
            let spread = p2p_rate.clone() - pool_supply_rate.clone();
            p2p_rate - self.percent_mul(&spread, reserve_factor)
        };

        self.blend_with_pool_rate(
            p2p_supply_rate,
            pool_supply_rate,
            proportion_delta,
            proportion_idle,
        )
    }

    /// P2P borrow rate.
    ///
    /// **Formula**:
    /// - If `pool_supply_rate > pool_borrow_rate`: `pool_borrow_rate`.
    /// - Otherwise: `p2p_rate + reserve_factor * (pool_borrow_rate - p2p_rate)`.
    /// - With a non zero delta the rate is blended with the pool borrow rate.
    fn compute_p2p_borrow_rate(
        &self,
        pool_borrow_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        pool_supply_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_delta: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_idle: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let p2p_borrow_rate = if pool_supply_rate > pool_borrow_rate {
            pool_borrow_rate.clone()
        } else {
            let p2p_rate =
                self.compute_p2p_rate(pool_borrow_rate, pool_supply_rate, p2p_index_cursor);
            let spread = pool_borrow_rate.clone() - p2p_rate.clone();
            p2p_rate + self.percent_mul(&spread, reserve_factor)
        };

        self.blend_with_pool_rate(
            p2p_borrow_rate,
            pool_borrow_rate,
            proportion_delta,
            proportion_idle,
        )
    }

    /// `p2p_rate * (1 - proportion_delta - proportion_idle) + pool_rate * proportion_delta`.
    ///
    /// Idle liquidity earns no rate. A zero delta leaves `p2p_rate` untouched.
    fn blend_with_pool_rate(
        &self,
        p2p_rate: ManagedDecimal<Self::Api, NumDecimals>,
        pool_rate: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_delta: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_idle: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if self.is_zero(proportion_delta) {
            return p2p_rate;
        }

        let precision = p2p_rate.scale();
        let proportion_delta = proportion_delta.rescale(precision);
        let proportion_p2p = self.unit_one(precision)
            - proportion_delta.clone()
            - proportion_idle.rescale(precision);

        self.mul_down(&p2p_rate, &proportion_p2p, precision)
            + self.mul_down(pool_rate, &proportion_delta, precision)
    }

    /// Idle and delta proportions of both sides, at unit precision.
    fn compute_market_proportions(
        &self,
        market_state: &MarketRateState<Self::Api>,
    ) -> MarketProportions<Self::Api> {
        let proportion_idle = self
            .compute_proportion_idle(
                market_state.indexes_offset,
                &market_state.idle_supply,
                &market_state.p2p_supply_amount,
                &market_state.p2p_supply_index,
            )
            .rescale(market_state.precision());

        let supply_proportion_delta = self.compute_proportion_delta(
            &market_state.p2p_supply_delta,
            &market_state.p2p_supply_amount,
            &market_state.pool_supply_index,
            &market_state.p2p_supply_index,
            &proportion_idle,
        );
        let borrow_proportion_delta = self.compute_proportion_delta(
            &market_state.p2p_borrow_delta,
            &market_state.p2p_borrow_amount,
            &market_state.pool_borrow_index,
            &market_state.p2p_borrow_index,
            &proportion_idle,
        );

        MarketProportions {
            proportion_idle,
            supply_proportion_delta,
            borrow_proportion_delta,
        }
    }

    /// P2P rates implied by the current pool rates and P2P state of a market.
    fn compute_p2p_rates(
        &self,
        market_state: &MarketRateState<Self::Api>,
    ) -> P2PRates<Self::Api> {
        let proportions = self.compute_market_proportions(market_state);

        let p2p_supply_rate = self.compute_p2p_supply_rate(
            &market_state.pool_borrow_rate,
            &market_state.pool_supply_rate,
            &market_state.p2p_index_cursor,
            &market_state.reserve_factor,
            &proportions.supply_proportion_delta,
            &proportions.proportion_idle,
        );
        let p2p_borrow_rate = self.compute_p2p_borrow_rate(
            &market_state.pool_borrow_rate,
            &market_state.pool_supply_rate,
            &market_state.p2p_index_cursor,
            &market_state.reserve_factor,
            &proportions.borrow_proportion_delta,
            &proportions.proportion_idle,
        );

        P2PRates {
            p2p_supply_rate,
            p2p_borrow_rate,
        }
    }

    /// Interests earned by `scaled_amount` while an index moved from `last_index` to
    /// `new_index`, in underlying units. A decreasing index earns nothing.
    fn compute_p2p_interests(
        &self,
        new_index: &ManagedDecimal<Self::Api, NumDecimals>,
        last_index: &ManagedDecimal<Self::Api, NumDecimals>,
        scaled_amount: &BigUint,
        indexes_offset: NumDecimals,
    ) -> BigUint {
        if new_index <= last_index {
            return BigUint::zero();
        }

        let index_growth = new_index.into_raw_units() - last_index.into_raw_units();

        index_growth * scaled_amount / self.pow10(indexes_offset)
    }

    /// Reserve factor at BPS precision, capped at 100%.
    fn require_valid_reserve_factor(
        &self,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let reserve_factor = reserve_factor.rescale(BPS_PRECISION);
        require!(
            reserve_factor.into_raw_units() <= &BigUint::from(BPS),
            ERROR_INVALID_RESERVE_FACTOR
        );

        reserve_factor
    }

    /// P2P index cursor at BPS precision, capped at 100%.
    fn require_valid_p2p_index_cursor(
        &self,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let p2p_index_cursor = p2p_index_cursor.rescale(BPS_PRECISION);
        require!(
            p2p_index_cursor.into_raw_units() <= &BigUint::from(BPS),
            ERROR_INVALID_P2P_INDEX_CURSOR
        );

        p2p_index_cursor
    }

    /// Builds the initial state of a market from its first pool observation and the
    /// P2P indexes it starts with. P2P amounts, deltas and idle supply start at zero.
    fn create_market_state(
        &self,
        family: PoolFamily,
        observation: &PoolObservation<Self::Api>,
        p2p_supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> MarketRateState<Self::Api> {
        let precision = family.index_precision();

        let pool_supply_index = observation.pool_supply_index.rescale(precision);
        let pool_borrow_index = observation.pool_borrow_index.rescale(precision);
        require!(
            !self.is_zero(&pool_supply_index) && !self.is_zero(&pool_borrow_index),
            ERROR_INVALID_POOL_INDEX
        );

        let p2p_supply_index = p2p_supply_index.rescale(precision);
        let p2p_borrow_index = p2p_borrow_index.rescale(precision);
        require!(
            !self.is_zero(&p2p_supply_index) && !self.is_zero(&p2p_borrow_index),
            ERROR_INVALID_P2P_INDEX
        );

        let reserve_factor = self.require_valid_reserve_factor(reserve_factor);
        let p2p_index_cursor = self.require_valid_p2p_index_cursor(p2p_index_cursor);

        let mut market_state = MarketRateState {
            family,
            indexes_offset: family.indexes_offset(),
            pool_supply_index,
            pool_borrow_index,
            pool_supply_rate: observation.pool_supply_rate.rescale(precision),
            pool_borrow_rate: observation.pool_borrow_rate.rescale(precision),
            p2p_supply_index_from_rates: p2p_supply_index.clone(),
            p2p_borrow_index_from_rates: p2p_borrow_index.clone(),
            p2p_supply_index,
            p2p_borrow_index,
            p2p_supply_rate: self.unit_zero(precision),
            p2p_borrow_rate: self.unit_zero(precision),
            p2p_supply_delta: BigUint::zero(),
            p2p_borrow_delta: BigUint::zero(),
            p2p_supply_amount: BigUint::zero(),
            p2p_borrow_amount: BigUint::zero(),
            idle_supply: BigUint::zero(),
            reserve_factor,
            p2p_index_cursor,
            last_block: observation.block_number,
            last_timestamp: observation.timestamp,
        };

        let rates = self.compute_p2p_rates(&market_state);
        market_state.p2p_supply_rate = rates.p2p_supply_rate;
        market_state.p2p_borrow_rate = rates.p2p_borrow_rate;

        market_state
    }

    /// Processes a new pool observation for a market.
    ///
    /// **Flow**:
    /// - Proportions are taken from the state before the observation.
    /// - Growth factors compare the observed pool indexes with the last stored ones.
    /// - The P2P indexes grow by the blended growth of each side.
    /// - The rate-derived P2P indexes accrue the last P2P rates over the elapsed periods.
    /// - The P2P rates are recomputed on the updated state.
    ///
    /// The returned state is the new market state. Observations older than the last one abort.
    fn update_p2p_indexes_and_rates(
        &self,
        market_state: &MarketRateState<Self::Api>,
        observation: &PoolObservation<Self::Api>,
    ) -> P2PIndexesUpdate<Self::Api> {
        require!(
            observation.block_number >= market_state.last_block
                && observation.timestamp >= market_state.last_timestamp,
            ERROR_OBSERVATION_OUT_OF_ORDER
        );

        let family = market_state.family;
        let precision = market_state.precision();
        let new_pool_supply_index = observation.pool_supply_index.rescale(precision);
        let new_pool_borrow_index = observation.pool_borrow_index.rescale(precision);
        require!(
            !self.is_zero(&new_pool_supply_index) && !self.is_zero(&new_pool_borrow_index),
            ERROR_INVALID_POOL_INDEX
        );

        let timestamp_diff = observation.timestamp - market_state.last_timestamp;
        let block_diff = observation.block_number - market_state.last_block;

        let proportions = self.compute_market_proportions(market_state);
        let growth_factors = self.compute_growth_factors(
            &new_pool_supply_index,
            &new_pool_borrow_index,
            &market_state.pool_supply_index,
            &market_state.pool_borrow_index,
            &market_state.p2p_index_cursor,
            &market_state.reserve_factor,
        );

        let p2p_supply_index = self.compute_p2p_index(
            &market_state.p2p_supply_index,
            &growth_factors.p2p_supply_growth,
            &growth_factors.pool_supply_growth,
            &proportions.supply_proportion_delta,
            &proportions.proportion_idle,
        );
        let p2p_borrow_index = self.compute_p2p_index(
            &market_state.p2p_borrow_index,
            &growth_factors.p2p_borrow_growth,
            &growth_factors.pool_borrow_growth,
            &proportions.borrow_proportion_delta,
            &proportions.proportion_idle,
        );

        let p2p_supply_index_from_rates = self.compute_new_supply_index(
            family,
            &market_state.p2p_supply_index_from_rates,
            &market_state.p2p_supply_rate,
            timestamp_diff,
            block_diff,
        );
        let p2p_borrow_index_from_rates = self.compute_new_borrow_index(
            family,
            &market_state.p2p_borrow_index_from_rates,
            &market_state.p2p_borrow_rate,
            timestamp_diff,
            block_diff,
        );

        let offset = market_state.indexes_offset;
        let interests = P2PInterests {
            supply_interests: self.compute_p2p_interests(
                &p2p_supply_index,
                &market_state.p2p_supply_index,
                &market_state.p2p_supply_amount,
                offset,
            ),
            borrow_interests: self.compute_p2p_interests(
                &p2p_borrow_index,
                &market_state.p2p_borrow_index,
                &market_state.p2p_borrow_amount,
                offset,
            ),
            supply_interests_from_rates: self.compute_p2p_interests(
                &p2p_supply_index_from_rates,
                &market_state.p2p_supply_index_from_rates,
                &market_state.p2p_supply_amount,
                offset,
            ),
            borrow_interests_from_rates: self.compute_p2p_interests(
                &p2p_borrow_index_from_rates,
                &market_state.p2p_borrow_index_from_rates,
                &market_state.p2p_borrow_amount,
                offset,
            ),
        };

        let mut next_state = market_state.clone();
        next_state.pool_supply_index = new_pool_supply_index;
        next_state.pool_borrow_index = new_pool_borrow_index;
        next_state.pool_supply_rate = observation.pool_supply_rate.rescale(precision);
        next_state.pool_borrow_rate = observation.pool_borrow_rate.rescale(precision);
        next_state.p2p_supply_index = p2p_supply_index;
        next_state.p2p_borrow_index = p2p_borrow_index;
        next_state.p2p_supply_index_from_rates = p2p_supply_index_from_rates;
        next_state.p2p_borrow_index_from_rates = p2p_borrow_index_from_rates;
        next_state.last_block = observation.block_number;
        next_state.last_timestamp = observation.timestamp;

        let rates = self.compute_p2p_rates(&next_state);
        next_state.p2p_supply_rate = rates.p2p_supply_rate;
        next_state.p2p_borrow_rate = rates.p2p_borrow_rate;

        P2PIndexesUpdate {
            market_state: next_state,
            growth_factors,
            proportions,
            interests,
            timestamp_diff,
            block_diff,
        }
    }

    /// Applies a P2P state change and refreshes the P2P rates. Indexes are left untouched.
    fn apply_p2p_state_change(
        &self,
        market_state: &MarketRateState<Self::Api>,
        change: &P2PStateChange<Self::Api>,
    ) -> MarketRateState<Self::Api> {
        let mut next_state = market_state.clone();

        match change {
            P2PStateChange::ReserveFactor(reserve_factor) => {
                next_state.reserve_factor = self.require_valid_reserve_factor(reserve_factor);
            },
            P2PStateChange::IndexCursor(p2p_index_cursor) => {
                next_state.p2p_index_cursor =
                    self.require_valid_p2p_index_cursor(p2p_index_cursor);
            },
            _ => next_state.apply_p2p_state_change(change),
        }

        let rates = self.compute_p2p_rates(&next_state);
        next_state.p2p_supply_rate = rates.p2p_supply_rate;
        next_state.p2p_borrow_rate = rates.p2p_borrow_rate;

        next_state
    }
}
