use common_structs::{MarketRateState, P2PRates};

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// In-memory copy of one market's rate state.
///
/// **Scope**: Loaded once per call, mutated by the rate engine, committed on drop.
///
/// **Goal**: A single storage read and write per market whatever the number of
/// intermediate computations.
pub struct Cache<'a, C>
where
    C: crate::storage::Storage,
{
    sc_ref: &'a C,
    market: ManagedAddress<C::Api>,
    /// Current rate state of the market.
    pub state: MarketRateState<C::Api>,
}

impl<'a, C> Cache<'a, C>
where
    C: crate::storage::Storage,
{
    /// Loads the state of `market`. The market must exist.
    pub fn new(sc_ref: &'a C, market: &ManagedAddress<C::Api>) -> Self {
        Cache {
            state: sc_ref.market_state(market).get(),
            market: market.clone(),
            sc_ref,
        }
    }

    pub fn p2p_rates(&self) -> P2PRates<C::Api> {
        P2PRates {
            p2p_supply_rate: self.state.p2p_supply_rate.clone(),
            p2p_borrow_rate: self.state.p2p_borrow_rate.clone(),
        }
    }

    /// `(p2p_supply_index, p2p_borrow_index, p2p_supply_rate, p2p_borrow_rate)`
    pub fn p2p_indexes_and_rates(
        &self,
    ) -> MultiValue4<
        ManagedDecimal<C::Api, NumDecimals>,
        ManagedDecimal<C::Api, NumDecimals>,
        ManagedDecimal<C::Api, NumDecimals>,
        ManagedDecimal<C::Api, NumDecimals>,
    > {
        (
            self.state.p2p_supply_index.clone(),
            self.state.p2p_borrow_index.clone(),
            self.state.p2p_supply_rate.clone(),
            self.state.p2p_borrow_rate.clone(),
        )
            .into()
    }
}

impl<C> Drop for Cache<'_, C>
where
    C: crate::storage::Storage,
{
    fn drop(&mut self) {
        // commit the market state back to storage
        self.sc_ref.market_state(&self.market).set(&self.state);
    }
}
