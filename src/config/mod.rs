pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{OutputFormat, PathSearch};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_TICKETS_FILE: &str = "tickets.json";
pub const DEFAULT_ORIGIN: &str = "VVO";
pub const DEFAULT_DESTINATION: &str = "TLV";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "airport-routes")]
#[command(about = "Shortest flight and route price statistics from a tickets file")]
pub struct CliConfig {
    /// Tickets JSON file [default: tickets.json]
    #[arg(short, long)]
    pub tickets: Option<String>,

    /// Origin airport code [default: VVO]
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination airport code [default: TLV]
    #[arg(long)]
    pub destination: Option<String>,

    /// Allow routes that pass through an airport more than once
    #[arg(long)]
    pub allow_cycles: bool,

    /// Never revisit an airport, even if the config file allows cycles
    #[arg(long, conflicts_with = "allow_cycles")]
    pub simple_only: bool,

    /// Maximum number of flights per route [default: 1000]
    #[arg(long)]
    pub max_path_length: Option<usize>,

    /// Stop listing routes after this many [default: 1000]
    #[arg(long)]
    pub max_routes: Option<usize>,

    /// Directory for exported files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Exports to write, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub format: Vec<OutputFormat>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective configuration after layering defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tickets_file: String,
    pub origin: String,
    pub destination: String,
    pub search: PathSearch,
    pub output_dir: Option<String>,
    pub formats: Vec<OutputFormat>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tickets_file: DEFAULT_TICKETS_FILE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            search: PathSearch::default(),
            output_dir: None,
            formats: Vec::new(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let mut settings = Self::default();
        settings.apply_toml(config);
        settings
    }

    pub fn apply_toml(&mut self, config: &TomlConfig) {
        if let Some(file) = &config.input.tickets_file {
            self.tickets_file = file.clone();
        }
        if let Some(origin) = &config.search.origin {
            self.origin = origin.clone();
        }
        if let Some(destination) = &config.search.destination {
            self.destination = destination.clone();
        }
        if let Some(allow_cycles) = config.search.allow_cycles {
            self.search.simple_only = !allow_cycles;
        }
        if let Some(max) = config.search.max_path_length {
            self.search.max_path_length = max;
        }
        if let Some(max) = config.search.max_routes {
            self.search.max_routes = max;
        }
        if let Some(dir) = &config.output.directory {
            self.output_dir = Some(dir.clone());
        }
        if let Some(formats) = &config.output.formats {
            self.formats = formats.clone();
        }
        if let Some(format) = config.logging.format {
            self.log_format = format;
        }
        if let Some(verbose) = config.logging.verbose {
            self.verbose = verbose;
        }
    }

    /// CLI flags over the optional `--config` file over built-in defaults.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_toml(&TomlConfig::from_file(path)?),
            None => Self::default(),
        };

        if let Some(tickets) = &cli.tickets {
            settings.tickets_file = tickets.clone();
        }
        if let Some(origin) = &cli.origin {
            settings.origin = origin.clone();
        }
        if let Some(destination) = &cli.destination {
            settings.destination = destination.clone();
        }
        if cli.allow_cycles {
            settings.search.simple_only = false;
        }
        if cli.simple_only {
            settings.search.simple_only = true;
        }
        if let Some(max) = cli.max_path_length {
            settings.search.max_path_length = max;
        }
        if let Some(max) = cli.max_routes {
            settings.search.max_routes = max;
        }
        if let Some(dir) = &cli.output_dir {
            settings.output_dir = Some(dir.clone());
        }
        if !cli.format.is_empty() {
            settings.formats = cli.format.clone();
        }
        if let Some(format) = cli.log_format {
            settings.log_format = format;
        }
        settings.verbose |= cli.verbose;

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn tickets_file(&self) -> &str {
        &self.tickets_file
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn destination(&self) -> &str {
        &self.destination
    }

    fn path_search(&self) -> PathSearch {
        self.search
    }

    fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("tickets_file", &self.tickets_file)?;
        validation::validate_airport_code("origin", &self.origin)?;
        validation::validate_airport_code("destination", &self.destination)?;
        validation::validate_distinct("destination", &self.origin, &self.destination)?;
        validation::validate_positive_number("max_path_length", self.search.max_path_length, 1)?;
        validation::validate_positive_number("max_routes", self.search.max_routes, 1)?;

        if !self.formats.is_empty() {
            let dir = validation::validate_required_field("output_dir", &self.output_dir)?;
            validation::validate_path("output_dir", dir)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RouteError;

    #[test]
    fn test_defaults_target_vvo_to_tlv() {
        let settings = Settings::default();
        assert_eq!(settings.tickets_file, "tickets.json");
        assert_eq!(settings.origin, "VVO");
        assert_eq!(settings.destination, "TLV");
        assert!(settings.search.simple_only);
        assert_eq!(settings.search.max_path_length, 1_000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let config = TomlConfig::from_toml_str(
            "[search]\norigin = \"UFA\"\nallow_cycles = true\n[output]\ndirectory = \"out\"\nformats = [\"csv\"]\n",
        )
        .unwrap();

        let settings = Settings::from_toml(&config);
        assert_eq!(settings.origin, "UFA");
        assert_eq!(settings.destination, "TLV");
        assert!(!settings.search.simple_only);
        assert_eq!(settings.output_dir(), Some("out"));
        assert_eq!(settings.output_formats(), &[OutputFormat::Csv]);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let same = Settings {
            destination: "VVO".to_string(),
            ..Settings::default()
        };
        assert!(same.validate().is_err());

        let lowercase = Settings {
            origin: "vvo".to_string(),
            ..Settings::default()
        };
        assert!(lowercase.validate().is_err());

        let mut zero = Settings::default();
        zero.search.max_path_length = 0;
        assert!(zero.validate().is_err());

        let mut no_routes = Settings::default();
        no_routes.search.max_routes = 0;
        assert!(no_routes.validate().is_err());
    }

    #[test]
    fn test_exports_require_output_dir() {
        let settings = Settings {
            formats: vec![OutputFormat::Json],
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(RouteError::MissingConfigError { .. })
        ));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_everything() {
        let cli = CliConfig::parse_from([
            "airport-routes",
            "--tickets",
            "data/tickets.json",
            "--origin",
            "UFA",
            "--allow-cycles",
            "--max-path-length",
            "4",
            "-o",
            "out",
            "--format",
            "json,dot",
            "-v",
        ]);

        let settings = Settings::from_cli(&cli).unwrap();
        assert_eq!(settings.tickets_file, "data/tickets.json");
        assert_eq!(settings.origin, "UFA");
        assert_eq!(settings.destination, "TLV");
        assert!(!settings.search.simple_only);
        assert_eq!(settings.search.max_path_length, 4);
        assert_eq!(settings.formats, vec![OutputFormat::Json, OutputFormat::Dot]);
        assert!(settings.verbose);
        assert!(settings.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_simple_only_overrides_config_cycles() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[search]\nallow_cycles = true\nmax_routes = 20\n")
            .unwrap();
        let path = temp_file.path().to_string_lossy().into_owned();

        let cli = CliConfig::parse_from(["airport-routes", "-c", &path]);
        let from_file = Settings::from_cli(&cli).unwrap();
        assert!(!from_file.search.simple_only);
        assert_eq!(from_file.search.max_routes, 20);

        let cli = CliConfig::parse_from([
            "airport-routes",
            "-c",
            &path,
            "--simple-only",
            "--max-routes",
            "7",
        ]);
        let settings = Settings::from_cli(&cli).unwrap();
        assert!(settings.search.simple_only);
        assert_eq!(settings.search.max_routes, 7);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_rejects_both_cycle_flags() {
        let result =
            CliConfig::try_parse_from(["airport-routes", "--allow-cycles", "--simple-only"]);
        assert!(result.is_err());
    }
}
