use common_constants::{BLOCKS_PER_YEAR, SECONDS_PER_YEAR};
use common_structs::PoolFamily;

use crate::accrual;

multiversx_sc::imports!();

/// Per family rate strategy.
///
/// - Aave: Ray unit, rates are already APRs, supply accrues linearly and borrow compounds,
///   both per second.
/// - Compound: Wad unit, rates are per block, both sides accrue linearly per block.
#[multiversx_sc::module]
pub trait RateStrategyModule:
    common_math::SharedMathModule + accrual::InterestAccrualModule
{
    fn index_one(&self, family: PoolFamily) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.unit_one(family.index_precision())
    }

    fn index_mul(
        &self,
        family: PoolFamily,
        x: &ManagedDecimal<Self::Api, NumDecimals>,
        y: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.mul_down(x, y, family.index_precision())
    }

    fn index_div(
        &self,
        family: PoolFamily,
        x: &ManagedDecimal<Self::Api, NumDecimals>,
        y: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.div_down(x, y, family.index_precision())
    }

    /// Annualizes a pool rate.
    fn to_apr(
        &self,
        family: PoolFamily,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        match family {
            PoolFamily::Aave => rate.clone(),
            PoolFamily::Compound => self.to_decimal(
                rate.into_raw_units() * &BigUint::from(BLOCKS_PER_YEAR),
                rate.scale(),
            ),
        }
    }

    fn periods_per_year(&self, family: PoolFamily) -> u64 {
        match family {
            PoolFamily::Aave => SECONDS_PER_YEAR,
            PoolFamily::Compound => BLOCKS_PER_YEAR,
        }
    }

    /// Number of accrual periods between two observations.
    fn elapsed_periods(&self, family: PoolFamily, timestamp_diff: u64, block_diff: u64) -> u64 {
        match family {
            PoolFamily::Aave => timestamp_diff,
            PoolFamily::Compound => block_diff,
        }
    }

    /// Supply index after accruing `rate` over the elapsed periods.
    fn compute_new_supply_index(
        &self,
        family: PoolFamily,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        timestamp_diff: u64,
        block_diff: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.compute_linear_interest_index(
            index,
            &self.to_apr(family, rate),
            self.elapsed_periods(family, timestamp_diff, block_diff),
            self.periods_per_year(family),
        )
    }

    /// Borrow index after accruing `rate` over the elapsed periods.
    fn compute_new_borrow_index(
        &self,
        family: PoolFamily,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        timestamp_diff: u64,
        block_diff: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let apr = self.to_apr(family, rate);
        let exp = self.elapsed_periods(family, timestamp_diff, block_diff);
        let periods_per_year = self.periods_per_year(family);

        match family {
            PoolFamily::Aave => {
                self.compute_compounded_interest_index(index, &apr, exp, periods_per_year)
            },
            PoolFamily::Compound => {
                self.compute_linear_interest_index(index, &apr, exp, periods_per_year)
            },
        }
    }
}
