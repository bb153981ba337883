//! Claims: typed construction, ordered collection, validity rules

pub mod registry;
pub mod set;
pub mod validation;

pub use registry::{Claim, StandardClaim, Validator, build};
pub use set::{ClaimMap, ClaimSet};
pub use validation::{check_at, current_timestamp};
