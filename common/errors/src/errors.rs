#![no_std]

pub static ERROR_MARKET_NOT_FOUND: &[u8] = b"Market not found.";

pub static ERROR_MARKET_ALREADY_EXISTS: &[u8] = b"Market already tracked.";

pub static ERROR_DIVISION_BY_ZERO: &[u8] = b"Division by zero.";

pub static ERROR_INVALID_POOL_INDEX: &[u8] = b"Pool index must be greater than zero.";

pub static ERROR_INVALID_P2P_INDEX: &[u8] = b"Peer-to-peer index must be greater than zero.";

pub static ERROR_INVALID_RESERVE_FACTOR: &[u8] = b"Reserve factor can not exceed 100%.";

pub static ERROR_INVALID_P2P_INDEX_CURSOR: &[u8] =
    b"Peer-to-peer index cursor can not exceed 100%.";

pub static ERROR_IDLE_SUPPLY_WITHOUT_P2P_SUPPLY: &[u8] =
    b"Idle supply can not be priced without peer-to-peer supply.";

pub static ERROR_OBSERVATION_OUT_OF_ORDER: &[u8] =
    b"Pool observation is older than the last processed one.";
