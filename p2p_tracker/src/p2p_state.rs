multiversx_sc::imports!();

use crate::{storage, utils};

use common_structs::P2PStateChange;

/// Endpoints fed by the ingestion account when the P2P side of a market changes.
///
/// Deltas, amounts and idle supply are raw integers in the market's scaled domain.
/// Indexes are never touched here, only the P2P rates are refreshed.
#[multiversx_sc::module]
pub trait P2PStateModule:
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
    #[only_owner]
    #[endpoint(updateP2PSupplyDelta)]
    fn update_p2p_supply_delta(&self, market: ManagedAddress, p2p_supply_delta: BigUint) {
        self.process_p2p_state_change(&market, P2PStateChange::SupplyDelta(p2p_supply_delta));
    }

    #[only_owner]
    #[endpoint(updateP2PBorrowDelta)]
    fn update_p2p_borrow_delta(&self, market: ManagedAddress, p2p_borrow_delta: BigUint) {
        self.process_p2p_state_change(&market, P2PStateChange::BorrowDelta(p2p_borrow_delta));
    }

    /// Sets both P2P amounts at once, as they are reported together.
    #[only_owner]
    #[endpoint(updateP2PAmounts)]
    fn update_p2p_amounts(
        &self,
        market: ManagedAddress,
        p2p_supply_amount: BigUint,
        p2p_borrow_amount: BigUint,
    ) {
        self.process_p2p_state_change(
            &market,
            P2PStateChange::Amounts {
                p2p_supply_amount,
                p2p_borrow_amount,
            },
        );
    }

    /// Idle supply can only be set on a market with P2P supply.
    #[only_owner]
    #[endpoint(updateIdleSupply)]
    fn update_idle_supply(&self, market: ManagedAddress, idle_supply: BigUint) {
        self.process_p2p_state_change(&market, P2PStateChange::IdleSupply(idle_supply));
    }
}
