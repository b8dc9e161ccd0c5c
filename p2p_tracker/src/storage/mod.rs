multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_structs::MarketRateState;

/// On-chain storage of the tracked markets.
///
/// Each market keeps its whole rate state in a single slot, so every update of a
/// market is one read and one write.
#[multiversx_sc::module]
pub trait Storage {
    /// Returns the tracked markets.
    #[view(getMarkets)]
    #[storage_mapper("markets")]
    fn markets(&self) -> UnorderedSetMapper<ManagedAddress>;

    /// Rate state of a market, keyed by the address of its underlying pool market.
    #[storage_mapper("market_state")]
    fn market_state(
        &self,
        market: &ManagedAddress,
    ) -> SingleValueMapper<MarketRateState<Self::Api>>;
}
