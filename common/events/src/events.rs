#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("create_p2p_market")]
    fn create_p2p_market_event(
        &self,
        #[indexed] market: &ManagedAddress,
        #[indexed] family: PoolFamily,
        #[indexed] block_number: u64,
        #[indexed] timestamp: u64,
        market_state: &MarketRateState<Self::Api>,
    );

    // Emitted once per processed pool observation. Carries the new indexes and rates, the
    // growth factors, the proportions used for the blend and the interests of the period.
    #[event("update_p2p_indexes")]
    fn update_p2p_indexes_event(
        &self,
        #[indexed] market: &ManagedAddress,
        #[indexed] block_number: u64,
        #[indexed] timestamp: u64,
        update: &P2PIndexesUpdate<Self::Api>,
    );

    // Deltas, amounts, idle supply and the owner settings all end up here
    #[event("update_p2p_state")]
    fn update_p2p_state_event(
        &self,
        #[indexed] market: &ManagedAddress,
        #[indexed] change: &P2PStateChange<Self::Api>,
        rates: &P2PRates<Self::Api>,
    );

    #[event("inverted_pool_growth")]
    fn inverted_pool_growth_event(
        &self,
        #[indexed] market: &ManagedAddress,
        #[indexed] block_number: u64,
        growth_factors: &GrowthFactors<Self::Api>,
    );
}
