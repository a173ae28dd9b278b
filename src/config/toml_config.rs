use crate::domain::model::OutputFormat;
use crate::utils::error::{Result, RouteError};
use crate::utils::logger::LogFormat;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// File configuration. Every section and key is optional; CLI flags win over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub tickets_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub allow_cycles: Option<bool>,
    pub max_path_length: Option<usize>,
    pub max_routes: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
    pub formats: Option<Vec<OutputFormat>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, source: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RouteError::ConfigParseError {
            path: source.to_string(),
            message: e.to_string(),
        })
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// Replaces `${VAR}` with the environment value; unknown variables stay as written.
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
tickets_file = "data/tickets.json"

[search]
origin = "UFA"
destination = "LRN"
allow_cycles = true
max_path_length = 6
max_routes = 250

[output]
directory = "./reports"
formats = ["json", "dot"]

[logging]
format = "json"
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input.tickets_file.as_deref(), Some("data/tickets.json"));
        assert_eq!(config.search.origin.as_deref(), Some("UFA"));
        assert_eq!(config.search.allow_cycles, Some(true));
        assert_eq!(config.search.max_path_length, Some(6));
        assert_eq!(config.search.max_routes, Some(250));
        assert_eq!(
            config.output.formats,
            Some(vec![OutputFormat::Json, OutputFormat::Dot])
        );
        assert_eq!(config.logging.format, Some(LogFormat::Json));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.input.tickets_file.is_none());
        assert!(config.search.origin.is_none());
        assert!(config.output.formats.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("AIRPORT_ROUTES_TEST_ORIGIN", "UFA");

        let toml_content = r#"
[search]
origin = "${AIRPORT_ROUTES_TEST_ORIGIN}"
destination = "${AIRPORT_ROUTES_TEST_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.search.origin.as_deref(), Some("UFA"));
        assert_eq!(
            config.search.destination.as_deref(),
            Some("${AIRPORT_ROUTES_TEST_UNSET}")
        );

        std::env::remove_var("AIRPORT_ROUTES_TEST_ORIGIN");
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let err = TomlConfig::from_toml_str("[output]\nformats = [\"xml\"]\n").unwrap_err();
        assert!(matches!(err, RouteError::ConfigParseError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\ntickets_file = \"file-test.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.tickets_file.as_deref(), Some("file-test.json"));
    }
}
