//! Raw source metrics.

pub mod loc_counter;

pub use loc_counter::{LocCount, LocCounter};
