//! HTTP client for the registry's Move view functions.
//!
//! Every read is a `POST {node}/v1/view` carrying the fully qualified
//! function name and its arguments. The fullnode answers with a JSON array
//! of return values, or with an error body when the function aborted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use veridia_types::{LandId, LandRecord, LandStatus};

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::reader::RegistryReader;

const GET_LAND_INFO: &str = "get_land_info";
const LAND_EXISTS: &str = "land_exists";
const GET_LAND_STATUS: &str = "get_land_status";
const GET_NEXT_LAND_ID: &str = "get_next_land_id";

/// Body of a view-function request.
#[derive(Debug, Serialize)]
struct ViewRequest {
    function: String,
    type_arguments: Vec<String>,
    arguments: Vec<String>,
}

/// Error body returned by the fullnode on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct NodeErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    error_code: Option<String>,
}

/// What a view function call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome {
    /// The function returned these values.
    Returned(Vec<Value>),
    /// The function aborted (e.g. the parcel or registry does not exist).
    Aborted(String),
}

/// Client for the registry's view functions on an Aptos fullnode.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ViewClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    view_url: String,
    module_name: String,
}

impl ViewClient {
    pub fn new(config: &RegistryConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            http_client: config.http_client()?,
            view_url: view_endpoint(&config.resolved_node_url()),
            module_name: config.module_name.clone(),
        })
    }

    /// The full URL view requests are posted to.
    pub fn view_url(&self) -> &str {
        &self.view_url
    }

    /// Fully qualified Move function id, `<contract>::<module>::<name>`.
    pub fn function_id(&self, contract: &str, name: &str) -> String {
        format!("{contract}::{}::{name}", self.module_name)
    }

    /// Call a view function published under `contract`.
    ///
    /// Integer arguments must be passed as decimal strings, as the fullnode
    /// expects for `u64`.
    pub async fn call_view(
        &self,
        contract: &str,
        function: &str,
        arguments: Vec<String>,
    ) -> Result<ViewOutcome, RegistryError> {
        let request = ViewRequest {
            function: self.function_id(contract, function),
            type_arguments: Vec::new(),
            arguments,
        };
        tracing::debug!(
            function = %request.function,
            url = %self.view_url,
            "calling view function"
        );

        let response = self
            .http_client
            .post(&self.view_url)
            .json(&request)
            .send()
            .await
            .map_err(RegistryError::from_transport)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(RegistryError::from_transport)?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(ViewOutcome::Returned(Vec::new()));
            }
            let values: Vec<Value> = serde_json::from_str(&text).map_err(|e| {
                RegistryError::InvalidResponse(format!("view result is not a JSON array: {e}"))
            })?;
            return Ok(ViewOutcome::Returned(values));
        }

        let body: NodeErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = if body.message.is_empty() {
            text.trim().to_string()
        } else {
            body.message.clone()
        };
        classify_failure(status.as_u16(), body.error_code.as_deref(), message)
    }
}

#[async_trait]
impl RegistryReader for ViewClient {
    async fn get_land(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandRecord>, RegistryError> {
        let args = vec![contract.to_string(), land_id.to_string()];
        match self.call_view(contract, GET_LAND_INFO, args).await? {
            ViewOutcome::Aborted(reason) => {
                tracing::debug!(%land_id, %reason, "get_land_info aborted, treating as absent");
                Ok(None)
            }
            ViewOutcome::Returned(values) if values.is_empty() => Ok(None),
            ViewOutcome::Returned(values) => {
                let record = parse_land_info(&values)?;
                if record.id != land_id {
                    return Err(RegistryError::InvalidResponse(format!(
                        "asked for land {land_id}, registry answered with land {}",
                        record.id
                    )));
                }
                Ok(Some(record))
            }
        }
    }

    async fn land_exists(&self, contract: &str, land_id: LandId) -> Result<bool, RegistryError> {
        let args = vec![contract.to_string(), land_id.to_string()];
        match self.call_view(contract, LAND_EXISTS, args).await? {
            ViewOutcome::Aborted(_) => Ok(false),
            ViewOutcome::Returned(values) => match values.first() {
                Some(v) => value_as_bool(v, "exists"),
                None => Ok(false),
            },
        }
    }

    async fn land_status(
        &self,
        contract: &str,
        land_id: LandId,
    ) -> Result<Option<LandStatus>, RegistryError> {
        let args = vec![contract.to_string(), land_id.to_string()];
        match self.call_view(contract, GET_LAND_STATUS, args).await? {
            ViewOutcome::Aborted(_) => Ok(None),
            ViewOutcome::Returned(values) => match values.first() {
                Some(v) => {
                    let code = value_as_u64(v, "status")?;
                    LandStatus::from_code(code)
                        .map(Some)
                        .map_err(|e| RegistryError::InvalidResponse(e.to_string()))
                }
                None => Ok(None),
            },
        }
    }

    /// An undeployed or uninitialised registry hands out [`LandId::FIRST`].
    async fn next_land_id(&self, contract: &str) -> Result<LandId, RegistryError> {
        let outcome = match self
            .call_view(contract, GET_NEXT_LAND_ID, vec![contract.to_string()])
            .await
        {
            Ok(outcome) => outcome,
            Err(RegistryError::ContractNotFound(reason)) => {
                tracing::warn!(%contract, %reason, "registry not deployed, using first land id");
                return Ok(LandId::FIRST);
            }
            Err(e) => return Err(e),
        };

        match outcome {
            ViewOutcome::Aborted(reason) => {
                tracing::warn!(%contract, %reason, "registry not initialised, using first land id");
                Ok(LandId::FIRST)
            }
            ViewOutcome::Returned(values) => match values.first() {
                Some(v) => {
                    let next = value_as_u64(v, "next_land_id")?;
                    Ok(LandId::new(next).unwrap_or(LandId::FIRST))
                }
                None => {
                    tracing::warn!(%contract, "empty get_next_land_id result, using first land id");
                    Ok(LandId::FIRST)
                }
            },
        }
    }
}

/// `{node}/v1/view`, tolerating a node URL that already ends in `/v1`.
fn view_endpoint(node_url: &str) -> String {
    let base = node_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{base}/view")
    } else {
        format!("{base}/v1/view")
    }
}

/// Map a non-2xx fullnode answer to an outcome or an error.
fn classify_failure(
    status: u16,
    error_code: Option<&str>,
    message: String,
) -> Result<ViewOutcome, RegistryError> {
    let aborted = error_code == Some("vm_error") || message.to_ascii_lowercase().contains("abort");
    match status {
        400 if aborted => Ok(ViewOutcome::Aborted(message)),
        404 => Err(RegistryError::ContractNotFound(message)),
        _ => Err(RegistryError::Http { status, message }),
    }
}

/// Decode the `get_land_info` tuple
/// `(id, owner, jurisdiction, metadata_hash, status, registered_at)`.
pub fn parse_land_info(values: &[Value]) -> Result<LandRecord, RegistryError> {
    if values.len() < 6 {
        return Err(RegistryError::InvalidResponse(format!(
            "get_land_info returned {} values, expected 6",
            values.len()
        )));
    }

    let id = LandId::new(value_as_u64(&values[0], "id")?)
        .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;
    let status = LandStatus::from_code(value_as_u64(&values[4], "status")?)
        .map_err(|e| RegistryError::InvalidResponse(e.to_string()))?;

    Ok(LandRecord {
        id,
        owner: value_as_string(&values[1], "owner")?,
        jurisdiction: value_as_string(&values[2], "jurisdiction")?,
        metadata_hash: value_as_string(&values[3], "metadata_hash")?,
        status,
        registered_at_micros: value_as_u64(&values[5], "registered_at")?,
    })
}

// Move integers wider than 32 bits arrive as strings, narrower ones as numbers.
fn value_as_u64(value: &Value, field: &str) -> Result<u64, RegistryError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        RegistryError::InvalidResponse(format!("{field}: expected unsigned integer, got {value}"))
    })
}

fn value_as_string(value: &Value, field: &str) -> Result<String, RegistryError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(RegistryError::InvalidResponse(format!(
            "{field}: expected string, got {other}"
        ))),
    }
}

fn value_as_bool(value: &Value, field: &str) -> Result<bool, RegistryError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s == "true" => Ok(true),
        Value::String(s) if s == "false" => Ok(false),
        other => Err(RegistryError::InvalidResponse(format!(
            "{field}: expected bool, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn view_endpoint_appends_v1_once() {
        assert_eq!(
            view_endpoint("https://fullnode.devnet.aptoslabs.com"),
            "https://fullnode.devnet.aptoslabs.com/v1/view"
        );
        assert_eq!(
            view_endpoint("https://fullnode.devnet.aptoslabs.com/v1/"),
            "https://fullnode.devnet.aptoslabs.com/v1/view"
        );
    }

    #[test]
    fn function_id_uses_module_name() {
        let client = ViewClient::new(&RegistryConfig::default()).unwrap();
        assert_eq!(
            client.function_id("0x1", GET_LAND_INFO),
            "0x1::land_registry::get_land_info"
        );
    }

    #[test]
    fn parse_land_info_accepts_strings_and_numbers() {
        let values = vec![
            json!("42"),
            json!("0xabc"),
            json!("Lagos, Nigeria"),
            json!("bafybeigdyrzt"),
            json!(1),
            json!("1700000000000000"),
        ];
        let record = parse_land_info(&values).unwrap();
        assert_eq!(record.id.get(), 42);
        assert_eq!(record.owner, "0xabc");
        assert_eq!(record.jurisdiction, "Lagos, Nigeria");
        assert_eq!(record.metadata_hash, "bafybeigdyrzt");
        assert_eq!(record.status, LandStatus::Frozen);
        assert_eq!(record.registered_at_micros, 1_700_000_000_000_000);
    }

    #[test]
    fn parse_land_info_rejects_short_tuple() {
        let err = parse_land_info(&[json!("1"), json!("0x1")]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResponse(_)));
    }

    #[test]
    fn parse_land_info_rejects_bad_fields() {
        let mut values = vec![
            json!("0"),
            json!("0xabc"),
            json!("Lagos"),
            json!("bafy"),
            json!(0),
            json!("1"),
        ];
        assert!(parse_land_info(&values).is_err(), "id 0 is invalid");
        values[0] = json!("3");
        values[4] = json!(7);
        assert!(parse_land_info(&values).is_err(), "status 7 is invalid");
        values[4] = json!(0);
        values[1] = json!(12);
        assert!(parse_land_info(&values).is_err(), "owner must be a string");
    }

    #[test]
    fn classify_failure_distinguishes_abort_and_missing_module() {
        assert_eq!(
            classify_failure(400, Some("vm_error"), "Move abort".into()),
            Ok(ViewOutcome::Aborted("Move abort".into()))
        );
        assert_eq!(
            classify_failure(400, None, "execution ABORTED with code 1".into()),
            Ok(ViewOutcome::Aborted("execution ABORTED with code 1".into()))
        );
        assert!(matches!(
            classify_failure(404, Some("module_not_found"), "no module".into()),
            Err(RegistryError::ContractNotFound(_))
        ));
        assert!(matches!(
            classify_failure(400, Some("invalid_input"), "bad arg".into()),
            Err(RegistryError::Http { status: 400, .. })
        ));
        assert!(matches!(
            classify_failure(503, None, "busy".into()),
            Err(RegistryError::Http { status: 503, .. })
        ));
    }

    #[test]
    fn bool_values() {
        assert!(value_as_bool(&json!(true), "x").unwrap());
        assert!(!value_as_bool(&json!("false"), "x").unwrap());
        assert!(value_as_bool(&json!(1), "x").is_err());
    }
}
