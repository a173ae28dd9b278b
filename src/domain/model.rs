use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the `tickets` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub origin: String,
    #[serde(default)]
    pub origin_name: String,
    pub destination: String,
    #[serde(default)]
    pub destination_name: String,
    #[serde(with = "ticket_date")]
    pub departure_date: NaiveDate,
    #[serde(with = "ticket_time")]
    pub departure_time: NaiveTime,
    #[serde(with = "ticket_date")]
    pub arrival_date: NaiveDate,
    #[serde(with = "ticket_time")]
    pub arrival_time: NaiveTime,
    #[serde(default)]
    pub carrier: String,
    #[serde(default)]
    pub stops: u32,
    pub price: u32,
}

impl Ticket {
    pub fn departure(&self) -> NaiveDateTime {
        self.departure_date.and_time(self.departure_time)
    }

    pub fn arrival(&self) -> NaiveDateTime {
        self.arrival_date.and_time(self.arrival_time)
    }

    /// Local wall-clock difference; the file carries no time zones.
    pub fn duration(&self) -> chrono::Duration {
        self.arrival() - self.departure()
    }
}

/// Root object of a tickets file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketFile {
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
}

impl Airport {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl fmt::Display for Airport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// A single ticketed flight; the edge between two airports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub carrier: String,
    pub duration_minutes: u64,
    pub price: u32,
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.carrier.is_empty() {
            write!(f, "{} min, {} RUB", self.duration_minutes, self.price)
        } else {
            write!(
                f,
                "{} {} min, {} RUB",
                self.carrier, self.duration_minutes, self.price
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub airports: Vec<Airport>,
    pub flights: Vec<Flight>,
}

impl Route {
    pub fn total_price(&self) -> u64 {
        self.flights.iter().map(|f| u64::from(f.price)).sum()
    }

    /// Sum of flight durations. Layovers are not counted.
    pub fn total_minutes(&self) -> u64 {
        self.flights.iter().map(|f| f.duration_minutes).sum()
    }

    pub fn sequence(&self) -> String {
        self.airports
            .iter()
            .map(|a| a.code.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn transfers(&self) -> usize {
        self.flights.len().saturating_sub(1)
    }
}

/// Bounds for route enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSearch {
    /// Never visit an airport twice.
    pub simple_only: bool,
    /// Maximum number of flights in one route.
    pub max_path_length: usize,
    /// Enumeration stops once this many routes are collected.
    pub max_routes: usize,
}

impl Default for PathSearch {
    fn default() -> Self {
        Self {
            simple_only: true,
            max_path_length: 1_000,
            max_routes: 1_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
    Dot,
}

impl OutputFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "report.json",
            OutputFormat::Csv => "routes.csv",
            OutputFormat::Dot => "graph.dot",
        }
    }
}

mod ticket_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%d.%m.%y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(|e| {
            serde::de::Error::custom(format!("cannot parse '{}' as dd.MM.yy date: {}", raw, e))
        })
    }
}

mod ticket_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%-H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(|e| {
            serde::de::Error::custom(format!("cannot parse '{}' as H:mm time: {}", raw, e))
        })
    }
}
