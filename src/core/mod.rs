pub mod engine;
pub mod graph;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use crate::domain::model::{Airport, Flight, PathSearch, Route, Ticket};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
