//! Session configuration loading
//!
//! A session file holds the [`RoundTemplateConfig`] in TOML or JSON
//! (chosen by extension). Templates are written flat:
//!
//! ```toml
//! rest_between_rounds_seconds = 60
//! repeat_rounds = false
//!
//! [[round_templates]]
//! round_number = 1
//! type = "circuit_round"
//! work_duration_sec = 40
//! rest_duration_sec = 20
//! exercises_per_round = 5
//!
//! [[round_templates]]
//! round_number = 2
//! type = "amrap_round"
//! exercises_per_round = 4
//! ```

use crate::error::{Result, SetlistError};
use pulse_common::RoundTemplateConfig;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Load and sanity-check a session file
pub fn load_session_config(path: &Path) -> Result<RoundTemplateConfig> {
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let config = if is_json {
        parse_json(&content)
    } else {
        parse_toml(&content)
    }
    .map_err(|e| SetlistError::Parse(format!("{}: {}", path.display(), e)))?;

    check_unique_round_numbers(&config)?;

    info!(
        "Loaded session config from {} ({} templates, repeat_rounds={})",
        path.display(),
        config.round_templates.len(),
        config.repeat_rounds
    );

    Ok(config)
}

fn parse_json(content: &str) -> std::result::Result<RoundTemplateConfig, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

fn parse_toml(content: &str) -> std::result::Result<RoundTemplateConfig, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Two templates for one round number would make the lookup ambiguous
fn check_unique_round_numbers(config: &RoundTemplateConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for template in &config.round_templates {
        if !seen.insert(template.round_number) {
            return Err(SetlistError::Configuration(format!(
                "duplicate round template for round {}",
                template.round_number
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_common::RoundVariant;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(
            &path,
            r#"
rest_between_rounds_seconds = 60
repeat_rounds = true

[[round_templates]]
round_number = 1
type = "circuit_round"
work_duration_sec = 40
rest_duration_sec = 20
exercises_per_round = 5

[[round_templates]]
round_number = 2
type = "stations_round"
exercises_per_round = 4
"#,
        )
        .unwrap();

        let config = load_session_config(&path).unwrap();
        assert!(config.repeat_rounds);
        assert_eq!(config.effective_round_count(), 4);
        assert_eq!(
            config.round_templates[1].variant,
            RoundVariant::StationsRound { exercises_per_round: 4 }
        );
    }

    #[test]
    fn test_load_json_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.JSON");
        std::fs::write(
            &path,
            r#"{"rest_between_rounds_seconds": 30,
                "round_templates": [
                    {"round_number": 1, "type": "amrap_round", "exercises_per_round": 3}]}"#,
        )
        .unwrap();

        let config = load_session_config(&path).unwrap();
        assert_eq!(config.rest_between_rounds_seconds, 30);
        assert_eq!(config.round_templates.len(), 1);
    }

    #[test]
    fn test_unknown_round_type_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(
            &path,
            r#"
rest_between_rounds_seconds = 60

[[round_templates]]
round_number = 1
type = "tabata_round"
exercises_per_round = 8
"#,
        )
        .unwrap();

        let err = load_session_config(&path).unwrap_err();
        assert!(matches!(err, SetlistError::Parse(_)));
    }

    #[test]
    fn test_duplicate_round_numbers_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{"rest_between_rounds_seconds": 30, "round_templates": [
                {"round_number": 1, "type": "amrap_round", "exercises_per_round": 3},
                {"round_number": 1, "type": "stations_round", "exercises_per_round": 3}]}"#,
        )
        .unwrap();

        let err = load_session_config(&path).unwrap_err();
        assert!(err.is_configuration());
    }
}
