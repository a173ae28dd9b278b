pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings};
pub use core::{
    engine::{RouteEngine, RunOutcome},
    graph::AirportGraph,
    pipeline::TicketPipeline,
    report::RouteReport,
};
pub use utils::error::{Result, RouteError};
