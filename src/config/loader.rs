//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, PostgreSQLConfig, RosterConfig};
use super::secret::secret_string;
use crate::domain::errors::RosterError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RosterConfig
/// 4. Applies environment variable overrides (ROSTER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `RosterError::Configuration` if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use roster::config::loader::load_config;
///
/// let config = load_config("roster.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RosterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RosterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RosterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses and validates configuration from a TOML string
///
/// Performs the same substitution, override and validation steps as
/// [`load_config`].
pub fn parse_config(contents: &str) -> Result<RosterConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RosterConfig = toml::from_str(&contents)
        .map_err(|e| RosterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RosterError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RosterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|val| val.parse().ok())
}

/// Applies environment variable overrides using ROSTER_* prefix
///
/// Environment variables follow the pattern: ROSTER_<SECTION>_<KEY>
/// For example: ROSTER_SERVER_PORT, ROSTER_UPSTREAM_BASE_URL.
/// `ROSTER_DATABASE_URL` sets the PostgreSQL connection string, creating the
/// section with defaults if the file omitted it.
fn apply_env_overrides(config: &mut RosterConfig) -> Result<()> {
    // Application
    if let Ok(val) = std::env::var("ROSTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Database target
    if let Ok(val) = std::env::var("ROSTER_DATABASE_TARGET") {
        config.database_target = match val.to_lowercase().as_str() {
            "postgresql" => DatabaseTarget::PostgreSQL,
            "memory" => DatabaseTarget::Memory,
            other => {
                return Err(RosterError::Configuration(format!(
                    "Invalid ROSTER_DATABASE_TARGET '{other}'. Must be one of: postgresql, memory"
                )))
            }
        };
    }

    // Server
    if let Ok(val) = std::env::var("ROSTER_SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(port) = parse_env("ROSTER_SERVER_PORT") {
        config.server.port = port;
    }
    if let Ok(val) = std::env::var("ROSTER_SERVER_CORS_ALLOWED_ORIGINS") {
        config.server.cors_allowed_origins = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Upstream
    if let Ok(val) = std::env::var("ROSTER_UPSTREAM_BASE_URL") {
        config.upstream.base_url = val;
    }
    if let Some(pages) = parse_env("ROSTER_UPSTREAM_TOTAL_PAGES") {
        config.upstream.total_pages = pages;
    }
    if let Some(per_page) = parse_env("ROSTER_UPSTREAM_RESULTS_PER_PAGE") {
        config.upstream.results_per_page = per_page;
    }
    if let Some(attempts) = parse_env("ROSTER_UPSTREAM_MAX_ATTEMPTS") {
        config.upstream.max_attempts = attempts;
    }
    if let Some(delay) = parse_env("ROSTER_UPSTREAM_RETRY_DELAY_MS") {
        config.upstream.retry_delay_ms = delay;
    }
    if let Some(delay) = parse_env("ROSTER_UPSTREAM_PAGE_DELAY_MS") {
        config.upstream.page_delay_ms = delay;
    }

    // PostgreSQL
    if let Ok(val) = std::env::var("ROSTER_DATABASE_URL") {
        match config.postgresql {
            Some(ref mut pg) => pg.connection_string = secret_string(val),
            None => {
                config.postgresql = Some(PostgreSQLConfig {
                    connection_string: secret_string(val),
                    max_connections: 10,
                    connection_timeout_seconds: 30,
                    statement_timeout_seconds: 60,
                })
            }
        }
    }
    if let Some(ref mut pg) = config.postgresql {
        if let Some(max) = parse_env("ROSTER_POSTGRESQL_MAX_CONNECTIONS") {
            pg.max_connections = max;
        }
    }

    // Logging
    if let Ok(val) = std::env::var("ROSTER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ROSTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ROSTER_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${ROSTER_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("ROSTER_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ROSTER_LOADER_MISSING_VAR");
        let input = "password = \"${ROSTER_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ROSTER_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("ROSTER_LOADER_COMMENTED_VAR");
        let input = "# url = \"${ROSTER_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "debug"

[upstream]
base_url = "http://localhost:9999/api/"
total_pages = 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.upstream.base_url, "http://localhost:9999/api/");
        assert_eq!(config.upstream.total_pages, 5);
        assert_eq!(config.upstream.results_per_page, 20);
        assert_eq!(config.database_target, DatabaseTarget::Memory);
    }
}
