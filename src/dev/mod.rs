//! Development helpers

mod seed;

pub use seed::{seed, test_data};
