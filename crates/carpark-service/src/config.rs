//! Configuration management for the Car Park Service
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use carpark_core::{SpotLayout, YearRange, DEFAULT_LAYOUT};
use std::env;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub host: String,

    /// API server port
    pub port: u16,

    /// Spots created at startup
    pub layout: SpotLayout,

    /// Accepted manufacture years for parked vehicles
    pub years: YearRange,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let layout = env::var("CARPARK_LAYOUT").unwrap_or_else(|_| DEFAULT_LAYOUT.to_string());

        let config = Config {
            host: env::var("CARPARK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("CARPARK_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid CARPARK_PORT")?,

            layout: SpotLayout::parse(&layout).context("Invalid CARPARK_LAYOUT")?,

            years: YearRange::new(
                env::var("CARPARK_MIN_YEAR")
                    .unwrap_or_else(|_| "2004".to_string())
                    .parse()
                    .context("Invalid CARPARK_MIN_YEAR")?,
                env::var("CARPARK_MAX_YEAR")
                    .unwrap_or_else(|_| "2024".to_string())
                    .parse()
                    .context("Invalid CARPARK_MAX_YEAR")?,
            ),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("CARPARK_PORT must be greater than 0");
        }

        if self.years.min > self.years.max {
            anyhow::bail!(
                "CARPARK_MIN_YEAR ({}) must not exceed CARPARK_MAX_YEAR ({})",
                self.years.min,
                self.years.max
            );
        }

        Ok(())
    }

    /// Get the API server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            layout: SpotLayout::parse("A001-A002").unwrap(),
            years: YearRange::default(),
        }
    }

    #[test]
    fn test_address() {
        assert_eq!(config().address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = Config { port: 0, ..config() };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("CARPARK_PORT must be greater than 0"));
    }

    #[test]
    fn test_validate_inverted_years() {
        let config = Config {
            years: YearRange::new(2024, 2004),
            ..config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_defaults() {
        for var in [
            "CARPARK_HOST",
            "CARPARK_PORT",
            "CARPARK_LAYOUT",
            "CARPARK_MIN_YEAR",
            "CARPARK_MAX_YEAR",
        ] {
            env::remove_var(var);
        }

        let config = Config::from_env().expect("Failed to load config");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.layout.len(), 15);
        assert_eq!(config.years, YearRange::default());
    }
}
