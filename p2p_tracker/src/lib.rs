#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod config;
pub mod market;
pub mod p2p_state;
pub mod storage;
pub mod utils;
pub mod view;
pub use common_events::*;

/// Tracks the peer-to-peer indexes and rates of lending markets built on top of
/// Aave-like and Compound-like pools.
///
/// Each market is fed two kinds of inputs by its owner: pool observations (pool indexes
/// and rates at a block) and changes of the P2P side (deltas, matched amounts, idle
/// supply, settings). The contract keeps the derived P2P indexes and rates in storage
/// and logs every step as an event.
#[multiversx_sc::contract]
pub trait P2PTracker:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::accrual::InterestAccrualModule
    + common_rates::strategy::RateStrategyModule
    + common_rates::proportions::ProportionModule
    + common_rates::growth::GrowthFactorModule
    + common_rates::InterestRates
    + utils::UtilsModule
    + market::MarketModule
    + config::ConfigModule
    + p2p_state::P2PStateModule
    + view::ViewModule
{
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}
}
