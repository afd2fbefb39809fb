pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod validation;

pub use error::{Error, Result};
