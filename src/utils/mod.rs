//! Various unsorted geometrical and logical operators.

pub use self::cleanup::remove_unused_points;
pub use self::cov::cov;
pub use self::sorted_pair::SortedPair;

mod cleanup;
mod cov;
pub mod hashmap;
mod sorted_pair;
