//! Endpoints and query parameter names of the random service.

/// `GET /` returns a value of [`DEFAULT_BIT_LENGTH`] bits.
pub const DEFAULT_PATH: &str = "/";
/// `GET /random?length=..[&min=..&max=..]`.
pub const RANDOM_PATH: &str = "/random";

pub const DEFAULT_BIT_LENGTH: u64 = 256;

pub const LENGTH_PARAM: &str = "length";
pub const MIN_PARAM: &str = "min";
pub const MAX_PARAM: &str = "max";
