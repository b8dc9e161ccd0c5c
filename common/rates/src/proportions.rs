use common_errors::ERROR_IDLE_SUPPLY_WITHOUT_P2P_SUPPLY;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait ProportionModule: common_math::SharedMathModule {
    /// Share of the P2P supply that is idle, expressed at `indexes_offset` precision.
    ///
    /// **Formula**:
    /// - `total_p2p_supplied = p2p_supply_amount * p2p_supply_index / 10^offset`
    /// - `proportion_idle = min(idle_supply * 10^offset / total_p2p_supplied, 10^offset)`
    /// - Zero when there is no idle supply.
    ///
    /// Idle supply with an empty P2P supply side can not be priced and aborts.
    fn compute_proportion_idle(
        &self,
        indexes_offset: NumDecimals,
        idle_supply: &BigUint,
        p2p_supply_amount: &BigUint,
        p2p_supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if idle_supply == &BigUint::zero() {
            return self.unit_zero(indexes_offset);
        }

        let offset = self.pow10(indexes_offset);
        let total_p2p_supplied = p2p_supply_amount * p2p_supply_index.into_raw_units() / &offset;
        require!(
            total_p2p_supplied != BigUint::zero(),
            ERROR_IDLE_SUPPLY_WITHOUT_P2P_SUPPLY
        );

        let proportion_idle = idle_supply * &offset / &total_p2p_supplied;
        if proportion_idle > offset {
            return self.to_decimal(offset, indexes_offset);
        }

        self.to_decimal(proportion_idle, indexes_offset)
    }

    /// Share of one side's P2P liquidity still sitting on the pool, at `pool_index` precision.
    ///
    /// **Formula**:
    /// - `proportion_delta = min(delta * pool_index / (amount * p2p_index), 1 - proportion_idle)`
    /// - Zero when `amount` is zero, or when both `delta` and `proportion_idle` are zero.
    ///
    /// The cap keeps `proportion_delta + proportion_idle <= 1`.
    fn compute_proportion_delta(
        &self,
        p2p_delta: &BigUint,
        p2p_amount: &BigUint,
        pool_index: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index: &ManagedDecimal<Self::Api, NumDecimals>,
        proportion_idle: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let precision = pool_index.scale();
        let proportion_idle = proportion_idle.rescale(precision);

        if p2p_amount == &BigUint::zero()
            || (p2p_delta == &BigUint::zero() && self.is_zero(&proportion_idle))
        {
            return self.unit_zero(precision);
        }

        let scaled_delta = self.mul_down(
            &self.to_decimal(p2p_delta.clone(), precision),
            pool_index,
            precision,
        );
        let scaled_amount = self.mul_down(
            &self.to_decimal(p2p_amount.clone(), precision),
            p2p_index,
            precision,
        );
        let proportion_delta = self.div_down(&scaled_delta, &scaled_amount, precision);

        self.get_min(proportion_delta, self.unit_one(precision) - proportion_idle)
    }
}
