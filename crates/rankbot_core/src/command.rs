//! Command definitions as written in `commands.json` and as held in the registry.

use derive_getters::Getters;
use rankbot_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Remote data operations a command can be bound to.
///
/// The set is fixed; a configuration naming anything else is rejected at
/// startup.
///
/// # Examples
///
/// ```
/// use rankbot_core::RemoteOperation;
/// use std::str::FromStr;
///
/// let op = RemoteOperation::from_str("riot_rank_info").unwrap();
/// assert_eq!(op, RemoteOperation::RiotRankInfo);
/// assert_eq!(op.to_string(), "riot_rank_info");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RemoteOperation {
    /// Current stream title and game
    TwitchStreamInfo,
    /// Current ranked standing of the tracked player
    RiotRankInfo,
    /// Wins and losses since the stream went live
    StreamStatsInfo,
    /// Champions banned in the player's active game
    CurrentBansInfo,
}

/// The `type` field of a command definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum DefinitionKind {
    /// Reply with fixed text
    #[display("static")]
    Static,
    /// Reply with the result of a remote operation
    #[display("api")]
    Api,
}

/// One entry of the command configuration file, before validation.
///
/// ```json
/// {"type": "api", "endpoint": "riot_rank_info", "cooldown": 30}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Static text or remote operation
    #[serde(rename = "type")]
    pub kind: DefinitionKind,
    /// Reply text for static commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Operation name for api commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Minimum seconds between two dispatches
    #[serde(default)]
    pub cooldown: u64,
}

/// What a command does when dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    /// Reply with fixed text
    Static {
        /// Text sent after the sender mention
        response: String,
    },
    /// Reply with the outcome of a remote operation
    Remote {
        /// Which operation to run
        operation: RemoteOperation,
    },
}

/// A validated command, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CommandSpec {
    kind: CommandKind,
    cooldown: Duration,
}

impl CommandSpec {
    /// A command that replies with fixed text.
    pub fn static_text(response: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            kind: CommandKind::Static {
                response: response.into(),
            },
            cooldown,
        }
    }

    /// A command bound to a remote operation.
    pub fn remote(operation: RemoteOperation, cooldown: Duration) -> Self {
        Self {
            kind: CommandKind::Remote { operation },
            cooldown,
        }
    }
}

impl TryFrom<CommandDefinition> for CommandSpec {
    type Error = ConfigError;

    fn try_from(definition: CommandDefinition) -> Result<Self, Self::Error> {
        let cooldown = Duration::from_secs(definition.cooldown);
        match definition.kind {
            DefinitionKind::Static => {
                let response = definition.response.ok_or_else(|| {
                    ConfigError::new("static command is missing its \"response\" field")
                })?;
                Ok(Self::static_text(response, cooldown))
            }
            DefinitionKind::Api => {
                let endpoint = definition.endpoint.ok_or_else(|| {
                    ConfigError::new("api command is missing its \"endpoint\" field")
                })?;
                let operation = endpoint.parse::<RemoteOperation>().map_err(|_| {
                    ConfigError::new(format!("unknown api endpoint \"{}\"", endpoint))
                })?;
                Ok(Self::remote(operation, cooldown))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(json: &str) -> CommandDefinition {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_static_definition_converts() {
        let spec = CommandSpec::try_from(definition(
            r#"{"type": "static", "response": "hi", "cooldown": 2}"#,
        ))
        .unwrap();

        assert_eq!(
            spec.kind(),
            &CommandKind::Static {
                response: "hi".to_string()
            }
        );
        assert_eq!(*spec.cooldown(), Duration::from_secs(2));
    }

    #[test]
    fn test_api_definition_converts() {
        let spec = CommandSpec::try_from(definition(
            r#"{"type": "api", "endpoint": "current_bans_info", "cooldown": 10}"#,
        ))
        .unwrap();

        assert_eq!(
            spec.kind(),
            &CommandKind::Remote {
                operation: RemoteOperation::CurrentBansInfo
            }
        );
    }

    #[test]
    fn test_missing_cooldown_defaults_to_zero() {
        let spec =
            CommandSpec::try_from(definition(r#"{"type": "static", "response": "x"}"#)).unwrap();
        assert_eq!(*spec.cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_unknown_endpoint_is_rejected() {
        let result = CommandSpec::try_from(definition(
            r#"{"type": "api", "endpoint": "weather", "cooldown": 1}"#,
        ));
        let err = result.unwrap_err();
        assert!(err.message.contains("weather"));
    }

    #[test]
    fn test_static_without_response_is_rejected() {
        let result = CommandSpec::try_from(definition(r#"{"type": "static", "cooldown": 1}"#));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_type_fails_to_deserialize() {
        let result = serde_json::from_str::<CommandDefinition>(r#"{"type": "script"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_cooldown_fails_to_deserialize() {
        let result = serde_json::from_str::<CommandDefinition>(
            r#"{"type": "static", "response": "x", "cooldown": -5}"#,
        );
        assert!(result.is_err());
    }
}
