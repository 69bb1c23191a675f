pub mod rate_limit;

pub use rate_limit::{RateLimiter, enforce_rate_limit};
