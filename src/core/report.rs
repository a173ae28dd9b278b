use crate::core::stats::{format_amount, format_duration, PriceStats};
use crate::domain::model::Route;
use crate::utils::error::{Result, RouteError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastestRoute {
    pub sequence: String,
    pub minutes: u64,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedRoute {
    pub route: String,
    pub transfers: usize,
    pub duration_minutes: u64,
    pub price: u64,
}

impl From<&Route> for PricedRoute {
    fn from(route: &Route) -> Self {
        Self {
            route: route.sequence(),
            transfers: route.transfers(),
            duration_minutes: route.total_minutes(),
            price: route.total_price(),
        }
    }
}

/// Result of analysing one origin/destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteReport {
    pub origin: String,
    pub destination: String,
    pub airport_count: usize,
    pub flight_count: usize,
    pub fastest: Option<FastestRoute>,
    pub routes: Vec<PricedRoute>,
    pub stats: Option<PriceStats>,
    /// Graphviz rendering of the whole ticket graph. Not part of the JSON report.
    #[serde(skip)]
    pub graph_dot: String,
}

impl RouteReport {
    pub fn new(
        origin: &str,
        destination: &str,
        airport_count: usize,
        flight_count: usize,
        fastest: Option<&Route>,
        routes: &[Route],
    ) -> Self {
        let routes: Vec<PricedRoute> = routes.iter().map(PricedRoute::from).collect();
        let prices: Vec<u64> = routes.iter().map(|r| r.price).collect();

        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            airport_count,
            flight_count,
            fastest: fastest.map(|route| FastestRoute {
                sequence: route.sequence(),
                minutes: route.total_minutes(),
                duration: format_duration(route.total_minutes()),
            }),
            routes,
            stats: PriceStats::from_prices(&prices),
            graph_dot: String::new(),
        }
    }

    pub fn with_graph_dot(mut self, dot: String) -> Self {
        self.graph_dot = dot;
        self
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match &self.fastest {
            Some(fastest) => {
                lines.push(format!(
                    "[1] Shortest airline duration between {} and {} is {}",
                    self.origin, self.destination, fastest.duration
                ));
                lines.push(format!("    Shortest path is {}", fastest.sequence));
            }
            None => lines.push(format!(
                "[1] There is no route between {} and {}",
                self.origin, self.destination
            )),
        }

        lines.push(String::new());
        lines.push(format!(
            "    All possible paths from {} to {}: ",
            self.origin, self.destination
        ));
        for route in &self.routes {
            lines.push(format!("    {} (price: {} RUB)", route.route, route.price));
        }

        match &self.stats {
            Some(stats) => {
                lines.push(format!(
                    "Average is {}, Median is {}",
                    format_amount(stats.average),
                    format_amount(stats.median)
                ));
                lines.push(format!(
                    "[2] Difference between average and median is {}",
                    format_amount(stats.average_median_difference)
                ));
            }
            None => lines.push("[2] No prices to compare".to_string()),
        }

        lines
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for route in &self.routes {
            writer.serialize(route)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| RouteError::ProcessingError {
                message: format!("Failed to flush CSV writer: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| RouteError::ProcessingError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }
}
