multiversx_sc::imports!();

use crate::{storage, utils};

use common_structs::P2PStateChange;

/// Owner settings of a market.
///
/// Both settings are basis points. Values above 100% are rejected and every change
/// refreshes the P2P rates of the market.
#[multiversx_sc::module]
pub trait ConfigModule:
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
    /// Sets the share of the P2P spread kept by the protocol.
    ///
    /// # Arguments
    /// - `market`: Tracked market.
    /// - `reserve_factor`: New reserve factor, BPS precision.
    #[only_owner]
    #[endpoint(setReserveFactor)]
    fn set_reserve_factor(&self, market: ManagedAddress, reserve_factor: BigUint) {
        let reserve_factor = self.to_decimal_bps(reserve_factor);
        self.process_p2p_state_change(&market, P2PStateChange::ReserveFactor(reserve_factor));
    }

    /// Moves the P2P rate between the pool supply rate (0%) and the pool borrow rate (100%).
    ///
    /// # Arguments
    /// - `market`: Tracked market.
    /// - `p2p_index_cursor`: New cursor, BPS precision.
    #[only_owner]
    #[endpoint(setP2PIndexCursor)]
    fn set_p2p_index_cursor(&self, market: ManagedAddress, p2p_index_cursor: BigUint) {
        let p2p_index_cursor = self.to_decimal_bps(p2p_index_cursor);
        self.process_p2p_state_change(&market, P2PStateChange::IndexCursor(p2p_index_cursor));
    }
}
