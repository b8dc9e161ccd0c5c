#![no_std]

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: usize = 27;

pub const WAD: u128 = 1_000_000_000_000_000_000;
pub const WAD_PRECISION: usize = 18;

pub const BPS: usize = 10_000; // 100%
pub const BPS_PRECISION: usize = 4;

pub const SECONDS_PER_DAY: u64 = 86_400;
/// Aave pools accrue per second over a 365 days year
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Compound pools accrue per block
pub const BLOCKS_PER_YEAR: u64 = 2_632_320;

/// Decimal exponent of the scaled amounts and the idle proportion of a Ray based pool
pub const AAVE_INDEXES_OFFSET: usize = 27;

/// Decimal exponent of the scaled amounts and the idle proportion of a Wad based pool
pub const COMPOUND_INDEXES_OFFSET: usize = 18;
