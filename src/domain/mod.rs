//! Wire types for the CloudBees feature management API
//!
//! Every field is camelCase on the wire and falls back to its default when the
//! server omits it or sends `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::FmError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Environment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_disabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub endpoint_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repository_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default_branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organization_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linked_component_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub linked_environment_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flag {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flag_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variants: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_permanent: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub resource_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub casc_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlagConfiguration {
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    pub default_value: Value,
    pub conditions: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub variants_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stickiness_property: Option<String>,
}

/// Decode an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Configuration of one flag in one environment, as emitted by `get-flag-config`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagConfigurationDetail {
    pub flag_id: String,
    pub flag_name: String,
    pub configuration: FlagConfiguration,
}

/// Body of `POST /v2/applications/{app}/flags`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagRequest {
    pub name: String,
    pub flag_type: String,
    pub variants: Vec<String>,
    pub description: String,
    pub is_permanent: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvironmentsResponse {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListApplicationsResponse {
    #[serde(default)]
    pub service: Vec<Application>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFlagsResponse {
    #[serde(default)]
    pub flags: Vec<Flag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlagResponse {
    pub flag: Flag,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlagConfigurationResponse {
    #[serde(default)]
    pub configuration: FlagConfiguration,
}

/// Value type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagType {
    Boolean,
    String,
    Number,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::String => "String",
            Self::Number => "Number",
        }
    }

    /// Variants a new flag gets when none are given.
    pub fn default_variants(&self) -> Vec<String> {
        let variants: [&str; 2] = match self {
            Self::Boolean => ["true", "false"],
            Self::String => ["option1", "option2"],
            Self::Number => ["0", "1"],
        };
        variants.iter().map(|v| v.to_string()).collect()
    }
}

impl fmt::Display for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagType {
    type Err = FmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(Self::Boolean),
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            _ => Err(FmError::validation(format!(
                "invalid flag-type '{s}', must be one of Boolean, String, Number"
            ))),
        }
    }
}
