pub mod convert;
pub mod country;
pub mod entries;
pub mod prices;
pub mod setup;
pub mod summary;
pub mod ui;
