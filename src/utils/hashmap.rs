//! The hash-map used for mesh topology queries.

pub use hashbrown::hash_map::Entry;
pub use hashbrown::HashMap;
