//! Stack state export decoding
//!
//! The export endpoint wraps the serialized state in a versioned envelope.
//! Only schema version 3 is decoded; other versions are carried through as
//! [`StateExport::Unsupported`] and yield no outputs.

use openapi_client::models::{DeploymentV3, UntypedDeployment};
use serde_json::{Map, Value};

use crate::errors::ApiError;

/// Schema version of the deployment state this driver understands
pub const SUPPORTED_SCHEMA_VERSION: i64 = 3;

/// Type token of the resource representing the stack itself
pub const STACK_RESOURCE_TYPE: &str = "pulumi:pulumi:Stack";

/// Output map of a resource
pub type Outputs = Map<String, Value>;

/// Decoded state export
#[derive(Debug, Clone, PartialEq)]
pub enum StateExport {
    V3(DeploymentV3),
    Unsupported { version: i64 },
}

impl StateExport {
    /// Decode an export envelope.
    ///
    /// A version mismatch is not an error, and a null payload is an empty
    /// state. A supported version whose payload fails to decode is
    /// `MalformedState`.
    pub fn decode(envelope: UntypedDeployment) -> Result<Self, ApiError> {
        if envelope.version != SUPPORTED_SCHEMA_VERSION {
            return Ok(StateExport::Unsupported {
                version: envelope.version,
            });
        }

        if envelope.deployment.is_null() {
            return Ok(StateExport::V3(DeploymentV3::default()));
        }
        let state = serde_json::from_value(envelope.deployment).map_err(ApiError::MalformedState)?;
        Ok(StateExport::V3(state))
    }

    /// Outputs of the root stack resource, if the state has one
    pub fn stack_outputs(self) -> Option<Outputs> {
        match self {
            StateExport::V3(state) => state
                .resources
                .into_iter()
                .find(|r| r.resource_type == STACK_RESOURCE_TYPE)
                .map(|r| r.outputs),
            StateExport::Unsupported { .. } => None,
        }
    }
}

/// Decode an envelope and extract the root stack resource's outputs
pub fn stack_outputs(envelope: UntypedDeployment) -> Result<Option<Outputs>, ApiError> {
    Ok(StateExport::decode(envelope)?.stack_outputs())
}
