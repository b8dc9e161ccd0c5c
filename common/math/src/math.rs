#![no_std]

use common_constants::{BPS, BPS_PRECISION, RAY, RAY_PRECISION, WAD, WAD_PRECISION};
use common_errors::ERROR_DIVISION_BY_ZERO;

multiversx_sc::imports!();

/// Fixed-point unit shared by every market.
///
/// Values are `ManagedDecimal`s whose scale is the unit precision (27 for Ray, 18 for
/// Wad, 4 for basis points). Every operation truncates toward zero.
#[multiversx_sc::module]
pub trait SharedMathModule {
    /// `a * b / one`, truncated, at `precision`.
    fn mul_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let product = scaled_a.into_raw_units() * scaled_b.into_raw_units();

        self.to_decimal(product / self.pow10(precision), precision)
    }

    /// `a * one / b`, truncated, at `precision`. A zero `b` aborts the call.
    fn div_down(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_a = a.rescale(precision);
        let scaled_b = b.rescale(precision);

        let denominator = scaled_b.into_raw_units();
        require!(denominator != &BigUint::zero(), ERROR_DIVISION_BY_ZERO);

        let numerator = scaled_a.into_raw_units() * &self.pow10(precision);

        self.to_decimal(numerator / denominator, precision)
    }

    /// `value * percent / BPS`, kept at the precision of `value`.
    fn percent_mul(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        percent: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let bps_percent = percent.rescale(BPS_PRECISION);
        let product = value.into_raw_units() * bps_percent.into_raw_units();

        self.to_decimal(product / BigUint::from(BPS), value.scale())
    }

    /// Basis-point interpolation `a + (b - a) * weight / BPS`, at the precision of `a`.
    ///
    /// A weight of 0 gives `a`, a weight of `BPS` gives `b`.
    fn weighted_avg(
        &self,
        a: &ManagedDecimal<Self::Api, NumDecimals>,
        b: &ManagedDecimal<Self::Api, NumDecimals>,
        weight: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let precision = a.scale();
        let scaled_b = b.rescale(precision);
        let scaled_weight = weight.rescale(BPS_PRECISION);

        let raw_a = a.into_raw_units();
        let raw_b = scaled_b.into_raw_units();
        let raw_weight = scaled_weight.into_raw_units();
        let bps = BigUint::from(BPS);

        let average = if raw_b >= raw_a {
            raw_a + &((raw_b - raw_a) * raw_weight / &bps)
        } else {
            raw_a - &((raw_a - raw_b) * raw_weight / &bps)
        };

        self.to_decimal(average, precision)
    }

    fn pow10(&self, precision: NumDecimals) -> BigUint {
        BigUint::from(10u64).pow(precision as u32)
    }

    /// `one` of a unit with the given precision.
    fn unit_one(&self, precision: NumDecimals) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(self.pow10(precision), precision)
    }

    fn unit_zero(&self, precision: NumDecimals) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::zero(), precision)
    }

    fn is_zero(&self, value: &ManagedDecimal<Self::Api, NumDecimals>) -> bool {
        value.into_raw_units() == &BigUint::zero()
    }

    fn to_decimal_wad(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, WAD_PRECISION)
    }

    fn to_decimal_ray(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, RAY_PRECISION)
    }

    fn to_decimal_bps(&self, value: BigUint) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(value, BPS_PRECISION)
    }

    fn ray(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(RAY), RAY_PRECISION)
    }

    fn wad(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(WAD), WAD_PRECISION)
    }

    fn bps(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal(BigUint::from(BPS), BPS_PRECISION)
    }

    fn ray_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_ray(BigUint::zero())
    }

    fn wad_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_wad(BigUint::zero())
    }

    fn bps_zero(&self) -> ManagedDecimal<Self::Api, NumDecimals> {
        self.to_decimal_bps(BigUint::zero())
    }

    fn to_decimal(
        &self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn get_min(
        &self,
        a: ManagedDecimal<Self::Api, NumDecimals>,
        b: ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if a < b {
            a
        } else {
            b
        }
    }
}
