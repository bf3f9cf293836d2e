//! Boundary with the outside data shapes: tariff files and the utility's reading exports.

pub mod readings;
pub mod store;
pub mod tariff;

pub use self::store::ReadingStore;
