pub mod config;
pub mod core;
pub mod domain;
pub mod pptx;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use core::{engine::ReportEngine, pipeline::ReportPipeline};
pub use pptx::Presentation;
pub use utils::error::{ReportError, Result};
