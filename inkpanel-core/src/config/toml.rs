//! Minimal TOML reader for the display section
//!
//! Handles only the subset needed here. It does NOT support the full TOML
//! spec.
//!
//! Supported:
//! - `[section]` headers; sections other than `[display]` are skipped
//! - `key = value` with quoted strings and integers
//! - Comments (`# ...`), including trailing ones
//!
//! ```toml
//! [display]
//! model = "5.79in"
//! rotation = 90
//! full_update_every = 10
//! update_mode = "auto"   # or "full" / "partial"
//! ```

use super::types::{ConfigError, DisplayConfig, PanelModel};
use crate::framebuffer::Rotation;
use crate::state::UpdateMode;

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Other,
}

/// Parse the `[display]` section of a configuration file.
///
/// Keys not given keep their defaults.
pub fn parse_config(input: &str) -> Result<DisplayConfig, ConfigError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if section != Section::Display {
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        apply_value(&mut config, key, value)?;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("config: parsed {}", config);

    Ok(config)
}

fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let name = line
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .map(str::trim)
        .ok_or(ConfigError::InvalidSection)?;

    match name {
        "display" => Ok(Section::Display),
        "" => Err(ConfigError::InvalidSection),
        _ => Ok(Section::Other),
    }
}

fn apply_value(config: &mut DisplayConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "model" => {
            let name = parse_string(value)?;
            config.model = PanelModel::from_name(name).ok_or(ConfigError::UnknownModel)?;
        }
        "rotation" => {
            let degrees: u16 = parse_int(value).map_err(|_| ConfigError::InvalidRotation)?;
            config.rotation = Rotation::from_degrees(degrees).ok_or(ConfigError::InvalidRotation)?;
        }
        "full_update_every" => {
            let every: u16 = parse_int(value)?;
            if every == 0 {
                return Err(ConfigError::InvalidValue);
            }
            config.full_update_every = every;
        }
        "update_mode" => {
            config.update_mode = match parse_string(value)? {
                "auto" => None,
                "full" => Some(UpdateMode::Full),
                "partial" => Some(UpdateMode::Partial),
                _ => return Err(ConfigError::InvalidValue),
            };
        }
        _ => {
            #[cfg(feature = "defmt")]
            defmt::warn!("config: unknown display key {}", key);
            return Err(ConfigError::UnknownKey);
        }
    }
    Ok(())
}

/// Parse a key = value line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Remove trailing comments outside strings
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip the quotes from a string value
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ConfigError::InvalidValue)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("rotation = 90"), Some(("rotation", "90")));
        assert_eq!(
            parse_key_value("model = \"5.79in\" # wide panel"),
            Some(("model", "\"5.79in\""))
        );
        assert_eq!(parse_key_value("rotation ="), None);
        assert_eq!(parse_key_value("no equals"), None);
    }

    #[test]
    fn test_parse_full_section() {
        let input = r#"
# Panel setup
[display]
model = "5.79in"
rotation = 270
full_update_every = 5
update_mode = "partial"
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.model, PanelModel::Epd5in79);
        assert_eq!(config.rotation, Rotation::Deg270);
        assert_eq!(config.full_update_every, 5);
        assert_eq!(config.update_mode, Some(UpdateMode::Partial));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = parse_config("[display]\nrotation = 180\n").unwrap();
        assert_eq!(config.rotation, Rotation::Deg180);
        assert_eq!(config.model, PanelModel::Epd4in2);
        assert_eq!(config.full_update_every, 10);
        assert_eq!(config.update_mode, None);
    }

    #[test]
    fn test_other_sections_skipped() {
        let input = r#"
[wifi]
ssid = "garden"
rotation = 45

[display]
model = "4.2in"
"#;
        let config = parse_config(input).unwrap();
        assert_eq!(config.rotation, Rotation::Deg0);
    }

    #[test]
    fn test_invalid_rotation() {
        assert_eq!(
            parse_config("[display]\nrotation = 45"),
            Err(ConfigError::InvalidRotation)
        );
        assert_eq!(
            parse_config("[display]\nrotation = -90"),
            Err(ConfigError::InvalidRotation)
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[display]\nmodel = \"7.5in\""),
            Err(ConfigError::UnknownModel)
        );
        assert_eq!(
            parse_config("[display]\nfull_update_every = 0"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nupdate_mode = \"fast\""),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[display]\nbrightness = 3"),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(parse_config("[]"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_auto_mode_clears_forced() {
        let input = "[display]\nupdate_mode = \"full\"\nupdate_mode = \"auto\"";
        let config = parse_config(input).unwrap();
        assert_eq!(config.update_mode, None);
    }
}
