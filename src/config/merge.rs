//! Merge a YAML configuration document with per-field overrides
//!
//! The result is the exact body of the configuration PUT. The API applies
//! that PUT as a partial update, so only fields the caller asked to change may
//! appear in it.

use serde_json::{Map, Value};
use tracing::warn;

use super::parse::{parse_bool, parse_default_value};
use crate::error::{FmError, Result};

pub const ENABLED: &str = "enabled";
pub const DEFAULT_VALUE: &str = "defaultValue";
pub const CONDITIONS: &str = "conditions";
pub const VARIANTS_ENABLED: &str = "variantsEnabled";
pub const STICKINESS_PROPERTY: &str = "stickinessProperty";

const KNOWN_FIELDS: [&str; 5] =
    [ENABLED, DEFAULT_VALUE, CONDITIONS, VARIANTS_ENABLED, STICKINESS_PROPERTY];

/// Individually specified fields. Each one present replaces the same key
/// from the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub enabled: Option<bool>,
    pub default_value: Option<Value>,
    pub variants_enabled: Option<bool>,
    pub stickiness_property: Option<String>,
}

impl ConfigOverrides {
    /// Build overrides from raw CLI text. Empty strings count as not given.
    pub fn from_text(
        enabled: Option<&str>,
        default_value: Option<&str>,
        variants_enabled: Option<&str>,
        stickiness_property: Option<&str>,
    ) -> Result<Self> {
        fn given(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }
        Ok(Self {
            enabled: given(enabled).map(|v| parse_bool("enabled", v)).transpose()?,
            default_value: given(default_value).map(parse_default_value),
            variants_enabled: given(variants_enabled)
                .map(|v| parse_bool("variants-enabled", v))
                .transpose()?,
            stickiness_property: given(stickiness_property).map(str::to_string),
        })
    }

    fn apply(&self, target: &mut Map<String, Value>) {
        if let Some(enabled) = self.enabled {
            target.insert(ENABLED.to_string(), Value::Bool(enabled));
        }
        if let Some(value) = &self.default_value {
            target.insert(DEFAULT_VALUE.to_string(), value.clone());
        }
        if let Some(variants_enabled) = self.variants_enabled {
            target.insert(VARIANTS_ENABLED.to_string(), Value::Bool(variants_enabled));
        }
        if let Some(property) = &self.stickiness_property {
            target.insert(STICKINESS_PROPERTY.to_string(), Value::String(property.clone()));
        }
    }
}

/// Parse the `--config` YAML document into a JSON object.
///
/// Blank or null documents yield an empty object. Anything other than a
/// mapping is rejected.
pub fn parse_config_document(text: &str) -> Result<Map<String, Value>> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_yaml::from_str::<Value>(text)? {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => {
            for key in map.keys().filter(|k| !KNOWN_FIELDS.contains(&k.as_str())) {
                warn!("passing through unrecognized configuration field '{}'", key);
            }
            Ok(map)
        }
        _ => Err(FmError::validation(
            "config must be a YAML mapping of configuration fields",
        )),
    }
}

/// Combine the optional document with the overrides; overrides win.
///
/// Fails with a validation error when nothing would change.
pub fn merge_flag_config(
    document: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<Map<String, Value>> {
    let mut merged = match document {
        Some(text) => parse_config_document(text)?,
        None => Map::new(),
    };
    overrides.apply(&mut merged);

    if merged.is_empty() {
        return Err(FmError::validation("no configuration changes specified"));
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use similar_asserts::assert_eq;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[test]
    fn override_wins_over_document() {
        let overrides = ConfigOverrides { enabled: Some(false), ..Default::default() };
        let merged =
            merge_flag_config(Some("enabled: true\ndefaultValue: x\n"), &overrides).unwrap();
        assert_eq!(merged, object(json!({ "enabled": false, "defaultValue": "x" })));
    }

    #[test]
    fn document_alone_is_sent_verbatim() {
        let doc = "enabled: true\nconditions:\n  - name: beta\n    value: true\n\
                   stickinessProperty: userId\n";
        let merged = merge_flag_config(Some(doc), &ConfigOverrides::default()).unwrap();
        assert_eq!(
            merged,
            object(json!({
                "enabled": true,
                "conditions": [{ "name": "beta", "value": true }],
                "stickinessProperty": "userId"
            }))
        );
    }

    #[test]
    fn overrides_alone_build_payload() {
        let overrides =
            ConfigOverrides::from_text(Some("true"), Some("42"), Some("false"), Some("accountId"))
                .unwrap();
        let merged = merge_flag_config(None, &overrides).unwrap();
        assert_eq!(
            merged,
            object(json!({
                "enabled": true,
                "defaultValue": 42,
                "variantsEnabled": false,
                "stickinessProperty": "accountId"
            }))
        );
    }

    #[test]
    fn default_value_override_replaces_structured_document_value() {
        let doc = "defaultValue:\n  - variant: a\n    weight: 100\n";
        let overrides = ConfigOverrides::from_text(None, Some("hello"), None, None).unwrap();
        let merged = merge_flag_config(Some(doc), &overrides).unwrap();
        assert_eq!(merged, object(json!({ "defaultValue": "hello" })));
    }

    #[test]
    fn empty_change_set_is_rejected() {
        let err = merge_flag_config(None, &ConfigOverrides::default()).unwrap_err();
        assert_eq!(err.to_string(), "no configuration changes specified");

        let err = merge_flag_config(Some("  \n"), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, FmError::Validation(_)));

        let err = merge_flag_config(Some("{}"), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, FmError::Validation(_)));
    }

    #[test]
    fn empty_strings_are_not_overrides() {
        let overrides = ConfigOverrides::from_text(Some(""), Some(""), None, Some("")).unwrap();
        assert_eq!(overrides, ConfigOverrides::default());
    }

    #[test]
    fn invalid_bool_override_is_rejected() {
        let err = ConfigOverrides::from_text(Some("maybe"), None, None, None).unwrap_err();
        assert!(err.to_string().contains("invalid enabled value 'maybe'"));
    }

    #[test]
    fn non_mapping_document_is_rejected() {
        assert!(matches!(parse_config_document("- a\n- b\n"), Err(FmError::Validation(_))));
        assert!(matches!(
            parse_config_document("enabled: [unclosed"),
            Err(FmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let merged = parse_config_document("enabled: false\nrolloutPercent: 10\n").unwrap();
        assert_eq!(merged.get("rolloutPercent"), Some(&json!(10)));
    }
}
