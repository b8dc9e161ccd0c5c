#![allow(dead_code)]

use common_math::SharedMathModule;
use common_rates::{
    accrual::InterestAccrualModule, growth::GrowthFactorModule, proportions::ProportionModule,
    strategy::RateStrategyModule, InterestRates,
};
use common_structs::{PoolFamily, PoolObservation};
use multiversx_sc::types::{BigUint, ManagedDecimal, NumDecimals};
use multiversx_sc_scenario::api::StaticApi;

pub struct RatesTester;

impl multiversx_sc::contract_base::ContractBase for RatesTester {
    type Api = StaticApi;
}

impl SharedMathModule for RatesTester {}
impl InterestAccrualModule for RatesTester {}
impl RateStrategyModule for RatesTester {}
impl ProportionModule for RatesTester {}
impl GrowthFactorModule for RatesTester {}
impl InterestRates for RatesTester {}

pub const RAY: u128 = common_constants::RAY;
pub const WAD: u128 = common_constants::WAD;

/// One percent of a Ray
pub const RAY_PERCENT: u128 = RAY / 100;
/// One percent of a Wad
pub const WAD_PERCENT: u128 = WAD / 100;

pub fn raw(value: u128) -> BigUint<StaticApi> {
    BigUint::from(value)
}

pub fn ray_value(raw: u128) -> ManagedDecimal<StaticApi, NumDecimals> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), 27)
}

pub fn wad_value(raw: u128) -> ManagedDecimal<StaticApi, NumDecimals> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), 18)
}

pub fn bps_value(raw: u64) -> ManagedDecimal<StaticApi, NumDecimals> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), 4)
}

pub fn family_value(family: PoolFamily, raw: u128) -> ManagedDecimal<StaticApi, NumDecimals> {
    ManagedDecimal::from_raw_units(BigUint::from(raw), family.index_precision())
}

pub fn observation(
    family: PoolFamily,
    pool_supply_index: u128,
    pool_borrow_index: u128,
    pool_supply_rate: u128,
    pool_borrow_rate: u128,
    block_number: u64,
    timestamp: u64,
) -> PoolObservation<StaticApi> {
    PoolObservation {
        pool_supply_index: family_value(family, pool_supply_index),
        pool_borrow_index: family_value(family, pool_borrow_index),
        pool_supply_rate: family_value(family, pool_supply_rate),
        pool_borrow_rate: family_value(family, pool_borrow_rate),
        block_number,
        timestamp,
    }
}

pub fn assert_raw(value: &ManagedDecimal<StaticApi, NumDecimals>, expected: u128) {
    assert_eq!(value.into_raw_units(), &BigUint::<StaticApi>::from(expected));
}
