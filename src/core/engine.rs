use crate::core::report::RouteReport;
use crate::core::Pipeline;
use crate::utils::error::Result;

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RouteReport,
    pub written: Vec<String>,
}

pub struct RouteEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RouteEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::debug!("Reading tickets...");
        let tickets = self.pipeline.extract().await?;
        tracing::info!("Loaded {} tickets", tickets.len());

        let report = self.pipeline.transform(tickets).await?;
        tracing::debug!(
            "Found {} routes between {} and {}",
            report.routes.len(),
            report.origin,
            report.destination
        );

        let written = self.pipeline.load(&report).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(RunOutcome { report, written })
    }
}
