//! Per-city station catalogs.
//!
//! Each supported city has a static station table and a line colour
//! table, read once at startup and shared read-only afterwards. City
//! metadata (names, map centre) is compiled in.

mod city;
mod error;
mod store;

pub use city::{CityConfig, CityId, MapCenter};
pub use error::CatalogError;
pub use store::{Catalog, CityCatalog};
