//! Value objects.

mod gender;
mod status;

pub use gender::*;
pub use status::*;
