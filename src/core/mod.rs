//! Core business logic abstractions

pub mod assets;
pub mod config;
pub mod country;
pub mod log;
pub mod price;
pub mod store;
pub mod units;
pub mod zakat;

// Re-export main types for cleaner imports
pub use assets::{AssetEntry, AssetGroups, Category, EntryUpdate, NewEntry};
pub use country::Country;
pub use price::{MetalPriceProvider, MetalPrices};
pub use units::MetalUnit;
pub use zakat::ZakatSummary;
