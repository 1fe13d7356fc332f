//! Stack models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Body of a "create stack" request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStackRequest {
    pub stack_name: String,
}

/// Versioned envelope returned by the stack export endpoint.
///
/// The payload stays undecoded until its version is known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UntypedDeployment {
    #[serde(default)]
    pub version: i64,

    #[serde(default)]
    pub deployment: Value,
}

/// Deployment state, schema version 3.
///
/// Missing and null fields both decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentV3 {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<ResourceV3>,
}

/// Resource entry of a version 3 deployment state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceV3 {
    #[serde(default, deserialize_with = "null_as_default")]
    pub urn: String,

    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub resource_type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
