//! The `GetMultipleHNAPs` batch envelope.
//!
//! Request:  `{"GetMultipleHNAPs": {"<Action>": "", ...}}`
//! Response: `{"GetMultipleHNAPsResponse": {"<Action>Response": {...}, ...}}`

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::hnap::actions::GET_MULTIPLE_HNAPS;

const RESPONSE_SUFFIX: &str = "Response";

/// Builds the batch request body naming every action in `actions`.
pub fn batch_request(actions: &[&str]) -> Value {
    let inner: Map<String, Value> = actions
        .iter()
        .map(|action| (action.to_string(), Value::String(String::new())))
        .collect();

    let mut root = Map::new();
    root.insert(GET_MULTIPLE_HNAPS.to_string(), Value::Object(inner));
    Value::Object(root)
}

/// Names under which the device may file the reply to `action`, in lookup
/// order.
pub fn lookup_candidates(action: &str) -> [String; 2] {
    [action.to_string(), format!("{action}{RESPONSE_SUFFIX}")]
}

/// De-multiplexed batch response.
#[derive(Debug)]
pub struct HnapEnvelope {
    responses: Map<String, Value>,
}

impl HnapEnvelope {
    pub fn from_body(body: &str) -> Result<Self, ProtocolError> {
        let mut root: Value = serde_json::from_str(body)
            .map_err(|e| ProtocolError::malformed(format!("envelope is not JSON: {e}")))?;

        let key = format!("{GET_MULTIPLE_HNAPS}{RESPONSE_SUFFIX}");
        match root.get_mut(&key).map(Value::take) {
            Some(Value::Object(responses)) => {
                let result_key = format!("{GET_MULTIPLE_HNAPS}Result");
                if let Some(result) = responses.get(&result_key).and_then(Value::as_str) {
                    if result != "OK" {
                        tracing::warn!(result, "batch response did not report OK");
                    }
                }
                Ok(Self { responses })
            }
            Some(_) => Err(ProtocolError::malformed(format!("'{key}' is not an object"))),
            None => Err(ProtocolError::malformed(format!("'{key}' missing"))),
        }
    }

    /// Raw sub-payload for `action`, trying `action` then `action + "Response"`.
    pub fn get(&self, action: &str) -> Result<&Value, ProtocolError> {
        lookup_candidates(action)
            .iter()
            .find_map(|name| self.responses.get(name))
            .ok_or_else(|| ProtocolError::missing_action(action))
    }

    /// Deserializes the sub-payload for `action`.
    pub fn decode<T: DeserializeOwned>(&self, action: &str) -> Result<T, ProtocolError> {
        let value = self.get(action)?;
        T::deserialize(value)
            .map_err(|e| ProtocolError::malformed(format!("{action}: {e}")))
    }
}
