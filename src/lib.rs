pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod render;

pub use config::DashboardConfig;
pub use error::{DashError, Result};
pub use pipeline::{run, RunReport};
