//! Command lookup by normalized token.

use rankbot_core::{CommandDefinition, CommandSpec, normalize};
use rankbot_error::ConfigError;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Immutable map from normalized command token to its definition.
///
/// Built once at startup. Two configuration keys that normalize to the same
/// token collapse into one entry: the one appearing later in the file.
///
/// # Example
///
/// ```
/// use rankbot_social::CommandRegistry;
///
/// let registry = CommandRegistry::from_json(
///     r#"{"!Hello": {"type": "static", "response": "hi", "cooldown": 2}}"#,
/// )
/// .unwrap();
/// assert!(registry.get("!hello").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandSpec>,
}

impl CommandRegistry {
    /// Read and validate a `commands.json` file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let registry = Self::from_json(&content)?;
        info!(commands = registry.len(), "Loaded command registry");
        Ok(registry)
    }

    /// Parse and validate command definitions from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let OrderedDefinitions(definitions) = serde_json::from_str(content)
            .map_err(|e| ConfigError::new(format!("Invalid command configuration: {}", e)))?;
        Self::from_definitions(definitions)
    }

    /// Validate definitions given as `(raw text, definition)` pairs in file
    /// order.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, CommandDefinition)>,
    {
        let mut commands = HashMap::new();
        for (raw, definition) in definitions {
            let spec = CommandSpec::try_from(definition).map_err(|e| {
                ConfigError::new(format!("Command \"{}\": {}", raw, e.message))
            })?;

            let token = normalize(&raw);
            if token.is_empty() {
                warn!(raw = %raw, "Command text normalizes to nothing, skipping");
                continue;
            }
            if commands.insert(token.clone(), spec).is_some() {
                debug!(raw = %raw, token = %token, "Command token redefined, later entry wins");
            }
        }
        Ok(Self { commands })
    }

    /// Definition for an already-normalized token.
    pub fn get(&self, token: &str) -> Option<&CommandSpec> {
        self.commands.get(token)
    }

    /// Registered tokens, unordered.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Top-level JSON object kept in file order, which `HashMap` would lose.
struct OrderedDefinitions(Vec<(String, CommandDefinition)>);

impl<'de> Deserialize<'de> for OrderedDefinitions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DefinitionsVisitor;

        impl<'de> Visitor<'de> for DefinitionsVisitor {
            type Value = OrderedDefinitions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping command text to a command definition")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, CommandDefinition>()? {
                    entries.push(entry);
                }
                Ok(OrderedDefinitions(entries))
            }
        }

        deserializer.deserialize_map(DefinitionsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankbot_core::{CommandKind, RemoteOperation};
    use std::time::Duration;

    #[test]
    fn test_later_duplicate_wins() {
        let registry = CommandRegistry::from_json(
            r#"{
                "!Rank": {"type": "static", "response": "first"},
                "  !rank ": {"type": "static", "response": "second"}
            }"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("!rank").unwrap().kind(),
            &CommandKind::Static {
                response: "second".to_string()
            }
        );
    }

    #[test]
    fn test_api_command_and_default_cooldown() {
        let registry =
            CommandRegistry::from_json(r#"{"!bans": {"type": "api", "endpoint": "current_bans_info"}}"#)
                .unwrap();
        let spec = registry.get("!bans").unwrap();
        assert_eq!(
            spec.kind(),
            &CommandKind::Remote {
                operation: RemoteOperation::CurrentBansInfo
            }
        );
        assert_eq!(*spec.cooldown(), Duration::ZERO);
    }

    #[test]
    fn test_unknown_endpoint_is_fatal() {
        let err = CommandRegistry::from_json(r#"{"!x": {"type": "api", "endpoint": "weather"}}"#)
            .unwrap_err();
        assert!(err.message.contains("!x"));
        assert!(err.message.contains("weather"));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        assert!(CommandRegistry::from_json(r#"{"!x": {"type": "script"}}"#).is_err());
    }

    #[test]
    fn test_missing_response_is_fatal() {
        assert!(CommandRegistry::from_json(r#"{"!x": {"type": "static"}}"#).is_err());
    }

    #[test]
    fn test_blank_key_is_skipped() {
        let registry = CommandRegistry::from_json(
            r#"{"éé": {"type": "static", "response": "x"}, "!ok": {"type": "static", "response": "y"}}"#,
        )
        .unwrap();
        assert_eq!(registry.tokens().collect::<Vec<_>>(), vec!["!ok"]);
    }
}
