// Growth factors, proportions, P2P index and P2P rates
// Run with: cargo test --test test_p2p_components test_name

mod setup;

use common_math::SharedMathModule;
use common_rates::{growth::GrowthFactorModule, proportions::ProportionModule, InterestRates};
use common_structs::{MarketRateState, PoolFamily};
use multiversx_sc::types::BigUint;
use multiversx_sc_scenario::api::StaticApi;
use setup::*;

#[test]
fn test_growth_factors_regular_market() {
    let tester = RatesTester;

    let growth = tester.compute_growth_factors(
        &wad_value(102 * WAD_PERCENT),
        &wad_value(105 * WAD_PERCENT),
        &tester.wad(),
        &tester.wad(),
        &bps_value(5_000),
        &bps_value(1_000),
    );

    assert_raw(&growth.pool_supply_growth, 102 * WAD_PERCENT);
    assert_raw(&growth.pool_borrow_growth, 105 * WAD_PERCENT);
    // 1.035 -/+ 10% of the 0.015 spreads
    assert_raw(&growth.p2p_supply_growth, 1_033_500_000_000_000_000);
    assert_raw(&growth.p2p_borrow_growth, 1_036_500_000_000_000_000);
    assert!(!growth.is_inverted());
}

#[test]
fn test_growth_factors_stay_between_pool_sides() {
    let tester = RatesTester;

    let growth = tester.compute_growth_factors(
        &ray_value(RAY + 2 * RAY_PERCENT),
        &ray_value(RAY + 9 * RAY_PERCENT),
        &tester.ray(),
        &tester.ray(),
        &bps_value(3_300),
        &bps_value(2_500),
    );

    assert!(growth.pool_supply_growth <= growth.p2p_supply_growth);
    assert!(growth.p2p_supply_growth <= growth.p2p_borrow_growth);
    assert!(growth.p2p_borrow_growth <= growth.pool_borrow_growth);
}

#[test]
fn test_growth_factors_inverted_pool() {
    let tester = RatesTester;

    let growth = tester.compute_growth_factors(
        &wad_value(105 * WAD_PERCENT),
        &wad_value(102 * WAD_PERCENT),
        &tester.wad(),
        &tester.wad(),
        &bps_value(5_000),
        &bps_value(1_000),
    );

    assert!(growth.is_inverted());
    assert_raw(&growth.p2p_supply_growth, 102 * WAD_PERCENT);
    assert_raw(&growth.p2p_borrow_growth, 102 * WAD_PERCENT);
}

#[test]
fn test_p2p_index_without_delta_is_pure_growth() {
    let tester = RatesTester;
    let last_index = wad_value(WAD);

    // Idle share is ignored when there is no delta
    let index = tester.compute_p2p_index(
        &last_index,
        &wad_value(103 * WAD_PERCENT),
        &wad_value(101 * WAD_PERCENT),
        &tester.wad_zero(),
        &wad_value(10 * WAD_PERCENT),
    );
    assert_raw(&index, 103 * WAD_PERCENT);
}

#[test]
fn test_p2p_index_blends_delta_and_idle() {
    let tester = RatesTester;

    // 0.5 * 1.04 + 0.25 * 1.02 + 0.25 = 1.025
    let index = tester.compute_p2p_index(
        &tester.wad(),
        &wad_value(104 * WAD_PERCENT),
        &wad_value(102 * WAD_PERCENT),
        &wad_value(25 * WAD_PERCENT),
        &wad_value(25 * WAD_PERCENT),
    );
    assert_raw(&index, 1_025_000_000_000_000_000);
}

#[test]
fn test_p2p_index_is_idempotent_without_growth() {
    let tester = RatesTester;
    let last_index = ray_value(1_234_567_890_123_456_789_012_345_678);
    let one = tester.ray();

    let cases = [(0u128, 0u128), (30, 10), (90, 10), (0, 50)];
    for (delta, idle) in cases {
        let index = tester.compute_p2p_index(
            &last_index,
            &one,
            &one,
            &ray_value(delta * RAY_PERCENT),
            &ray_value(idle * RAY_PERCENT),
        );
        assert_eq!(index.into_raw_units(), last_index.into_raw_units());
    }
}

#[test]
fn test_p2p_rate() {
    let tester = RatesTester;
    let cursor = bps_value(5_000);

    let rate = tester.compute_p2p_rate(
        &ray_value(5 * RAY_PERCENT),
        &ray_value(3 * RAY_PERCENT),
        &cursor,
    );
    assert_raw(&rate, 4 * RAY_PERCENT);

    // Inverted pool rates
    let rate = tester.compute_p2p_rate(
        &ray_value(2 * RAY_PERCENT),
        &ray_value(3 * RAY_PERCENT),
        &cursor,
    );
    assert_raw(&rate, 2 * RAY_PERCENT);
}

#[test]
fn test_p2p_rates_with_reserve_factor() {
    let tester = RatesTester;
    let zero = tester.ray_zero();

    let supply_rate = tester.compute_p2p_supply_rate(
        &ray_value(5 * RAY_PERCENT),
        &ray_value(3 * RAY_PERCENT),
        &bps_value(5_000),
        &bps_value(1_000),
        &zero,
        &zero,
    );
    let borrow_rate = tester.compute_p2p_borrow_rate(
        &ray_value(5 * RAY_PERCENT),
        &ray_value(3 * RAY_PERCENT),
        &bps_value(5_000),
        &bps_value(1_000),
        &zero,
        &zero,
    );

    // 4% -/+ 10% of the 1% spreads
    assert_raw(&supply_rate, 39 * RAY_PERCENT / 10);
    assert_raw(&borrow_rate, 41 * RAY_PERCENT / 10);
}

#[test]
fn test_p2p_rates_fall_back_to_pool_borrow_rate_when_inverted() {
    let tester = RatesTester;
    let zero = tester.ray_zero();
    let pool_borrow_rate = ray_value(2 * RAY_PERCENT);
    let pool_supply_rate = ray_value(3 * RAY_PERCENT);

    let supply_rate = tester.compute_p2p_supply_rate(
        &pool_borrow_rate,
        &pool_supply_rate,
        &bps_value(5_000),
        &bps_value(1_000),
        &zero,
        &zero,
    );
    let borrow_rate = tester.compute_p2p_borrow_rate(
        &pool_borrow_rate,
        &pool_supply_rate,
        &bps_value(5_000),
        &bps_value(1_000),
        &zero,
        &zero,
    );

    assert_eq!(supply_rate.into_raw_units(), pool_borrow_rate.into_raw_units());
    assert_eq!(borrow_rate.into_raw_units(), pool_borrow_rate.into_raw_units());
}

#[test]
fn test_p2p_supply_rate_with_delta_and_idle() {
    let tester = RatesTester;

    // 3.9% * (1 - 0.5 - 0.1) + 3% * 0.5, the idle share earns nothing
    let supply_rate = tester.compute_p2p_supply_rate(
        &ray_value(5 * RAY_PERCENT),
        &ray_value(3 * RAY_PERCENT),
        &bps_value(5_000),
        &bps_value(1_000),
        &ray_value(50 * RAY_PERCENT),
        &ray_value(10 * RAY_PERCENT),
    );
    assert_raw(&supply_rate, 306 * RAY_PERCENT / 100);
}

#[test]
fn test_proportion_idle() {
    let tester = RatesTester;
    let index = tester.wad();
    let amount = raw(100 * WAD);

    let none = tester.compute_proportion_idle(18, &BigUint::zero(), &amount, &index);
    assert!(tester.is_zero(&none));
    assert_eq!(none.scale(), 18);

    let half = tester.compute_proportion_idle(18, &raw(50 * WAD), &amount, &index);
    assert_raw(&half, WAD / 2);

    // Capped at one
    let capped = tester.compute_proportion_idle(18, &raw(200 * WAD), &amount, &index);
    assert_raw(&capped, WAD);
}

#[test]
#[should_panic]
fn test_proportion_idle_without_p2p_supply_aborts() {
    let tester = RatesTester;
    let _ = tester.compute_proportion_idle(27, &raw(1), &BigUint::zero(), &tester.ray());
}

#[test]
fn test_proportion_delta() {
    let tester = RatesTester;
    let zero = tester.wad_zero();

    // 20 * 1.5 / (100 * 1.2)
    let proportion = tester.compute_proportion_delta(
        &raw(20 * WAD),
        &raw(100 * WAD),
        &wad_value(150 * WAD_PERCENT),
        &wad_value(120 * WAD_PERCENT),
        &zero,
    );
    assert_raw(&proportion, WAD / 4);

    // Capped by the idle share
    let proportion = tester.compute_proportion_delta(
        &raw(20 * WAD),
        &raw(100 * WAD),
        &wad_value(150 * WAD_PERCENT),
        &wad_value(120 * WAD_PERCENT),
        &wad_value(80 * WAD_PERCENT),
    );
    assert_raw(&proportion, 20 * WAD_PERCENT);
}

#[test]
fn test_proportion_delta_zero_cases() {
    let tester = RatesTester;
    let index = tester.wad();

    let no_amount = tester.compute_proportion_delta(
        &raw(20 * WAD),
        &BigUint::zero(),
        &index,
        &index,
        &tester.wad_zero(),
    );
    assert!(tester.is_zero(&no_amount));

    let no_delta_no_idle = tester.compute_proportion_delta(
        &BigUint::zero(),
        &raw(100 * WAD),
        &index,
        &index,
        &tester.wad_zero(),
    );
    assert!(tester.is_zero(&no_delta_no_idle));

    let no_delta_with_idle = tester.compute_proportion_delta(
        &BigUint::zero(),
        &raw(100 * WAD),
        &index,
        &index,
        &wad_value(10 * WAD_PERCENT),
    );
    assert!(tester.is_zero(&no_delta_with_idle));
}

#[test]
fn test_proportion_delta_and_idle_never_exceed_one() {
    let tester = RatesTester;
    let one = BigUint::<StaticApi>::from(WAD);
    let amount = raw(100 * WAD);
    let pool_index = wad_value(130 * WAD_PERCENT);
    let p2p_index = wad_value(110 * WAD_PERCENT);

    for delta in [1u128, 30, 77, 100, 250] {
        for idle in [0u128, 15, 60, 100] {
            let proportion_idle = wad_value(idle * WAD_PERCENT);
            let proportion_delta = tester.compute_proportion_delta(
                &raw(delta * WAD),
                &amount,
                &pool_index,
                &p2p_index,
                &proportion_idle,
            );
            let total = proportion_delta.into_raw_units() + proportion_idle.into_raw_units();
            assert!(total <= one);
        }
    }
}

#[test]
fn test_market_proportions_use_each_side_inputs() {
    let tester = RatesTester;
    let one = tester.wad();
    let zero = tester.wad_zero();

    let state = MarketRateState::<StaticApi> {
        family: PoolFamily::Compound,
        indexes_offset: PoolFamily::Compound.indexes_offset(),
        pool_supply_index: one.clone(),
        pool_borrow_index: wad_value(200 * WAD_PERCENT),
        pool_supply_rate: zero.clone(),
        pool_borrow_rate: zero.clone(),
        p2p_supply_index: one.clone(),
        p2p_borrow_index: one.clone(),
        p2p_supply_rate: zero.clone(),
        p2p_borrow_rate: zero,
        p2p_supply_index_from_rates: one.clone(),
        p2p_borrow_index_from_rates: one,
        p2p_supply_delta: BigUint::zero(),
        p2p_borrow_delta: raw(10 * WAD),
        p2p_supply_amount: raw(100 * WAD),
        p2p_borrow_amount: raw(80 * WAD),
        idle_supply: BigUint::zero(),
        reserve_factor: bps_value(1_000),
        p2p_index_cursor: bps_value(5_000),
        last_block: 0,
        last_timestamp: 0,
    };

    let proportions = tester.compute_market_proportions(&state);

    assert!(tester.is_zero(&proportions.proportion_idle));
    assert!(tester.is_zero(&proportions.supply_proportion_delta));
    // 10 * 2 / 80
    assert_raw(&proportions.borrow_proportion_delta, 25 * WAD_PERCENT);
}
