//! Router configuration.
//!
//! Cost and slack parameters are plain values handed to the cost
//! calculator and slack provider constructors. They can be built in code or
//! loaded from a JSON document; missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Generalized-cost parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParams {
    /// Penalty for every boarding, in seconds.
    pub board_cost_secs: i32,

    /// Extra penalty for boardings that follow another transit leg, in seconds.
    pub transfer_cost_secs: i32,

    /// Multiplier applied to walking (access, transfer, egress) time.
    pub transfer_reluctance: f64,

    /// Multiplier applied to time spent waiting for a vehicle.
    pub wait_reluctance: f64,
}

impl CostParams {
    /// Create cost parameters.
    pub fn new(
        board_cost_secs: i32,
        transfer_cost_secs: i32,
        transfer_reluctance: f64,
        wait_reluctance: f64,
    ) -> Self {
        Self {
            board_cost_secs,
            transfer_cost_secs,
            transfer_reluctance,
            wait_reluctance,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.board_cost_secs < 0 {
            return Err(ConfigError::Invalid {
                field: "cost.board_cost_secs",
                reason: "must not be negative",
            });
        }
        if self.transfer_cost_secs < 0 {
            return Err(ConfigError::Invalid {
                field: "cost.transfer_cost_secs",
                reason: "must not be negative",
            });
        }
        check_reluctance("cost.transfer_reluctance", self.transfer_reluctance)?;
        check_reluctance("cost.wait_reluctance", self.wait_reluctance)
    }
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            board_cost_secs: 600,
            transfer_cost_secs: 0,
            transfer_reluctance: 2.0,
            wait_reluctance: 1.0,
        }
    }
}

fn check_reluctance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be a finite, non-negative number",
        });
    }
    Ok(())
}

/// Minimum buffers around boarding, alighting and transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlackParams {
    /// Seconds required between arriving at a stop and boarding.
    pub board_slack_secs: i32,

    /// Seconds required after the vehicle arrives before the traveller can move on.
    pub alight_slack_secs: i32,

    /// Minimum seconds between alighting one trip and boarding the next.
    pub transfer_slack_secs: i32,
}

impl SlackParams {
    /// Create slack parameters.
    pub fn new(board_slack_secs: i32, alight_slack_secs: i32, transfer_slack_secs: i32) -> Self {
        Self {
            board_slack_secs,
            alight_slack_secs,
            transfer_slack_secs,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("slack.board_slack_secs", self.board_slack_secs),
            ("slack.alight_slack_secs", self.alight_slack_secs),
            ("slack.transfer_slack_secs", self.transfer_slack_secs),
        ];
        for (field, value) in fields {
            if value < 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        Ok(())
    }
}

impl Default for SlackParams {
    fn default() -> Self {
        Self {
            board_slack_secs: 0,
            alight_slack_secs: 0,
            transfer_slack_secs: 120,
        }
    }
}

/// Complete router configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub cost: CostParams,
    pub slack: SlackParams,
}

impl RouterConfig {
    /// Create a configuration from its parts.
    pub fn new(cost: CostParams, slack: SlackParams) -> Self {
        Self { cost, slack }
    }

    /// Parse and validate a JSON document.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::config::RouterConfig;
    ///
    /// let config = RouterConfig::from_json_str(r#"{ "slack": { "board_slack_secs": 45 } }"#).unwrap();
    /// assert_eq!(config.slack.board_slack_secs, 45);
    /// assert_eq!(config.slack.transfer_slack_secs, 120); // default
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cost.validate()?;
        self.slack.validate()
    }
}
