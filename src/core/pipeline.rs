use crate::core::graph::AirportGraph;
use crate::core::report::RouteReport;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{OutputFormat, Ticket, TicketFile};
use crate::utils::error::{Result, RouteError};
use serde::Deserialize;
use std::path::Path;

pub struct TicketPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TicketPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render(&self, format: OutputFormat, report: &RouteReport) -> Result<String> {
        match format {
            OutputFormat::Json => report.to_json(),
            OutputFormat::Csv => report.to_csv(),
            OutputFormat::Dot => Ok(report.graph_dot.clone()),
        }
    }
}

/// Parses a tickets document. The root must be an object with a `tickets` array.
pub fn parse_tickets(file: &str, data: &[u8]) -> Result<Vec<Ticket>> {
    let root: serde_json::Value = serde_json::from_slice(data)?;
    tracing::debug!("File {} is deserialized into a general JSON value", file);

    if root.get("tickets").is_none() {
        return Err(RouteError::MissingTicketsError {
            file: file.to_string(),
        });
    }

    Ok(TicketFile::deserialize(&root)?.tickets)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TicketPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Ticket>> {
        let file = self.config.tickets_file();
        tracing::debug!("Reading tickets from: {}", file);

        let data = self.storage.read_file(file).await?;
        parse_tickets(file, &data)
    }

    async fn transform(&self, tickets: Vec<Ticket>) -> Result<RouteReport> {
        tracing::info!("Building Airport graph...");
        let graph = AirportGraph::from_tickets(&tickets)?;
        tracing::info!(
            "Airport graph is complete: {} airports, {} flights",
            graph.airport_count(),
            graph.flight_count()
        );

        let origin = self.config.origin();
        let destination = self.config.destination();

        let fastest = graph.shortest_path(origin, destination)?;
        let routes = graph.all_paths(origin, destination, &self.config.path_search())?;

        let report = RouteReport::new(
            origin,
            destination,
            graph.airport_count(),
            graph.flight_count(),
            fastest.as_ref(),
            &routes,
        );

        if self.config.output_formats().contains(&OutputFormat::Dot) {
            Ok(report.with_graph_dot(graph.to_dot()))
        } else {
            Ok(report)
        }
    }

    async fn load(&self, report: &RouteReport) -> Result<Vec<String>> {
        for line in report.summary_lines() {
            tracing::info!("{}", line);
        }

        let formats = self.config.output_formats();
        if formats.is_empty() {
            return Ok(Vec::new());
        }

        let output_dir = self
            .config
            .output_dir()
            .ok_or_else(|| RouteError::MissingConfigError {
                field: "output_dir".to_string(),
            })?;

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let path = Path::new(output_dir).join(format.file_name());
            let path = path.to_string_lossy().into_owned();
            let content = self.render(*format, report)?;

            tracing::debug!("Writing {} ({} bytes)", path, content.len());
            self.storage.write_file(&path, content.as_bytes()).await?;
            written.push(path);
        }

        Ok(written)
    }
}
