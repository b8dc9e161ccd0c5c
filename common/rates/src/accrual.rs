multiversx_sc::imports!();

/// Index accrual laws used by the underlying pools.
///
/// `rate` is an annual rate, `exp` the number of elapsed periods and `periods_per_year`
/// the number of such periods in a year (seconds or blocks).
#[multiversx_sc::module]
pub trait InterestAccrualModule: common_math::SharedMathModule {
    /// Interest factor of a linear law.
    ///
    /// **Formula**:
    /// - `factor = 1 + rate * exp / periods_per_year`
    fn linear_interest_factor(
        &self,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        exp: u64,
        periods_per_year: u64,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let scaled_rate = rate.rescale(precision);
        let accrued =
            scaled_rate.into_raw_units() * &BigUint::from(exp) / BigUint::from(periods_per_year);

        self.unit_one(precision) + self.to_decimal(accrued, precision)
    }

    /// Interest factor of a compounded law, approximated by the first terms of the
    /// binomial expansion of `(1 + rate / periods_per_year) ^ exp`.
    ///
    /// **Formula**:
    /// - `base_power_two = rate * rate / periods_per_year^2`
    /// - `base_power_three = base_power_two * rate / periods_per_year`
    /// - `factor = 1 + rate * exp / periods_per_year`
    ///   `+ exp * (exp - 1) * base_power_two / 2`
    ///   `+ exp * (exp - 1) * max(exp - 2, 0) * base_power_three / 6`
    /// - If `exp == 0`, returns `1`.
    ///
    /// Every product truncates, so the factor slightly undershoots the exact power.
    fn compounded_interest_factor(
        &self,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        exp: u64,
        periods_per_year: u64,
        precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let one = self.unit_one(precision);
        if exp == 0 {
            return one;
        }

        let scaled_rate = rate.rescale(precision);
        let periods = BigUint::from(periods_per_year);
        let exp_minus_one = exp - 1;
        let exp_minus_two = if exp > 2 { exp - 2 } else { 0 };

        let base_power_two = self
            .mul_down(&scaled_rate, &scaled_rate, precision)
            .into_raw_units()
            / &(&periods * &periods);
        let base_power_three = self
            .mul_down(
                &self.to_decimal(base_power_two.clone(), precision),
                &scaled_rate,
                precision,
            )
            .into_raw_units()
            / &periods;

        let first_term = scaled_rate.into_raw_units() * &BigUint::from(exp) / &periods;
        let second_term = BigUint::from(exp) * &BigUint::from(exp_minus_one) * &base_power_two
            / BigUint::from(2u64);
        let third_term = BigUint::from(exp)
            * &BigUint::from(exp_minus_one)
            * &BigUint::from(exp_minus_two)
            * &base_power_three
            / BigUint::from(6u64);

        one + self.to_decimal(first_term + &second_term + &third_term, precision)
    }

    /// Grows `index` with a linear law. The index is returned unchanged when no period elapsed.
    fn compute_linear_interest_index(
        &self,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        exp: u64,
        periods_per_year: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if exp == 0 {
            return index.clone();
        }

        let precision = index.scale();
        let factor = self.linear_interest_factor(rate, exp, periods_per_year, precision);

        self.mul_down(index, &factor, precision)
    }

    /// Grows `index` with a compounded law. The index is returned unchanged when no period elapsed.
    fn compute_compounded_interest_index(
        &self,
        index: &ManagedDecimal<Self::Api, NumDecimals>,
        rate: &ManagedDecimal<Self::Api, NumDecimals>,
        exp: u64,
        periods_per_year: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if exp == 0 {
            return index.clone();
        }

        let precision = index.scale();
        let factor = self.compounded_interest_factor(rate, exp, periods_per_year, precision);

        self.mul_down(index, &factor, precision)
    }
}
