use common_structs::GrowthFactors;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait GrowthFactorModule: common_math::SharedMathModule {
    /// Growth of the pool indexes since the last observation and the matching P2P growth.
    ///
    /// **Formula**:
    /// - `pool_supply_growth = new_pool_supply_index / last_pool_supply_index`
    /// - `pool_borrow_growth = new_pool_borrow_index / last_pool_borrow_index`
    /// - When `pool_supply_growth <= pool_borrow_growth`:
    ///   - `p2p_growth = weighted_avg(pool_supply_growth, pool_borrow_growth, p2p_index_cursor)`
    ///   - `p2p_supply_growth = p2p_growth - reserve_factor * (p2p_growth - pool_supply_growth)`
    ///   - `p2p_borrow_growth = p2p_growth + reserve_factor * (pool_borrow_growth - p2p_growth)`
    /// - Otherwise both P2P growth factors equal `pool_borrow_growth`.
    fn compute_growth_factors(
        &self,
        new_pool_supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        new_pool_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        last_pool_supply_index: &ManagedDecimal<Self::Api, NumDecimals>,
        last_pool_borrow_index: &ManagedDecimal<Self::Api, NumDecimals>,
        p2p_index_cursor: &ManagedDecimal<Self::Api, NumDecimals>,
        reserve_factor: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> GrowthFactors<Self::Api> {
        let precision = new_pool_supply_index.scale();
        let pool_supply_growth =
            self.div_down(new_pool_supply_index, last_pool_supply_index, precision);
        let pool_borrow_growth =
            self.div_down(new_pool_borrow_index, last_pool_borrow_index, precision);

        if pool_supply_growth > pool_borrow_growth {
            // Tokens sent straight to the pool
            return GrowthFactors {
                p2p_supply_growth: pool_borrow_growth.clone(),
                p2p_borrow_growth: pool_borrow_growth.clone(),
                pool_supply_growth,
                pool_borrow_growth,
            };
        }

        let p2p_growth =
            self.weighted_avg(&pool_supply_growth, &pool_borrow_growth, p2p_index_cursor);
        let supply_spread = p2p_growth.clone() - pool_supply_growth.clone();
        let borrow_spread = pool_borrow_growth.clone() - p2p_growth.clone();

        let p2p_supply_growth =
            p2p_growth.clone() - self.percent_mul(&supply_spread, reserve_factor);
        let p2p_borrow_growth = p2p_growth + self.percent_mul(&borrow_spread, reserve_factor);

        GrowthFactors {
            pool_supply_growth,
            pool_borrow_growth,
            p2p_supply_growth,
            p2p_borrow_growth,
        }
    }
}
