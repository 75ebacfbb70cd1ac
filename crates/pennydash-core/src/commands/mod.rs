pub mod budget;
pub mod categories;
pub(crate) mod common;
pub mod recent;
pub mod series;
pub mod summary;
