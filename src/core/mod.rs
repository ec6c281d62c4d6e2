pub mod config;
pub mod error;
pub mod types;

pub use config::RenderConfig;
pub use error::{Result, TaqwimError};
pub use types::{Coordinates, Moment};
