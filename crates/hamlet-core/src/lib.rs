//! hamlet-core: seeded settlement layout generation
//!
//! This crate contains all generation logic with no I/O dependencies beyond
//! optional config file loading. A layout is a tile grid holding a branching
//! street network, walled buildings with doors, and decorative ground cover,
//! all derived from a single integer seed.

pub mod building;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod retry;
pub mod sketch;
pub mod street;
pub mod town;

mod consts;
mod rng;

pub use config::{BuildingConfig, RetryConfig, StreetConfig, TownConfig};
pub use consts::*;
pub use error::{ConfigError, GenError, GenResult};
pub use grid::{Cell, Grid, Point, Tile};
pub use retry::{Generated, generate_with_retries};
pub use rng::TownRng;
pub use town::Town;
