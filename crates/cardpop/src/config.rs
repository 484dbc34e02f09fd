#![forbid(unsafe_code)]

//! Loading [`PopoverConfig`] from JSON files.

use std::path::Path;

use cardpop_presentation::config::PopoverConfig;

use crate::error::{Error, LoadError, Result};

/// Parse and validate a JSON configuration document.
///
/// `origin` only labels errors.
pub fn parse_config(json: &str, origin: &Path) -> Result<PopoverConfig> {
    let config: PopoverConfig = serde_json::from_str(json).map_err(|err| LoadError::Parse {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<PopoverConfig> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&json, path)?;
    cardpop_core::debug!(
        target: "cardpop::config",
        path = %path.display(),
        "loaded popover configuration"
    );
    Ok(config)
}

/// [`load_config`], falling back to defaults where the error allows it.
///
/// Returns the error alongside the defaults so the caller can report it.
pub fn load_config_or_default(path: &Path) -> Result<(PopoverConfig, Option<Error>)> {
    match load_config(path) {
        Ok(config) => Ok((config, None)),
        Err(err) if err.is_recoverable() => {
            cardpop_core::warn!(
                target: "cardpop::config",
                error = %err,
                action = %err.degradation(),
                "falling back to default configuration"
            );
            Ok((PopoverConfig::default(), Some(err)))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use cardpop_presentation::SourceDirection;

    use super::*;
    use crate::error::DegradationAction;

    #[test]
    fn parses_valid_document() {
        let config = parse_config(r#"{ "source_direction": "top" }"#, Path::new("inline"))
            .expect("valid");
        assert_eq!(config.source_direction, Some(SourceDirection::Top));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = parse_config(r#"{ "frame_update_duration": 0 }"#, Path::new("inline"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn reports_malformed_json() {
        let err = parse_config("{ nope", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, Error::Load(LoadError::Parse { .. })));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "dismiss_label": "Close", "prefers_blurred_background": false }}"#)
            .unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.effective_dismiss_label(), Some("Close"));
        assert!(!config.prefers_blurred_background);
    }

    #[test]
    fn missing_file_falls_back() {
        let path = PathBuf::from("/definitely/not/here/popover.json");
        let (config, err) = load_config_or_default(&path).unwrap();
        assert_eq!(config, PopoverConfig::default());
        assert_eq!(
            err.map(|e| e.degradation()),
            Some(DegradationAction::UseDefaults)
        );
    }
}
