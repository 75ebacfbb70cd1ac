pub mod activity;
pub mod aggregate;
pub mod budget;
pub mod date;
pub mod format;
pub mod normalize;
pub mod period;
pub mod summary;
pub mod types;
