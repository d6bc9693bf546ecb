use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Protocol version spoken by bitcoind-derived daemons
pub const JSONRPC_VERSION: &str = "1.0";

/// Request id sent with every upstream call; the daemon echoes it back.
pub const CLIENT_ID: &str = "omni-relay";

/// JSON-RPC 1.0 request structure
///
/// Built per call and discarded once the request is sent.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    /// JSON-RPC protocol version (always "1.0")
    pub jsonrpc: &'static str,

    /// Request identifier
    pub id: &'static str,

    /// Method name to call
    pub method: &'a str,

    /// Positional method parameters
    pub params: Vec<Value>,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: CLIENT_ID,
            method,
            params,
        }
    }
}

/// Error object inside a daemon reply
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct JsonRpcErrorDetail {
    /// Error code
    pub code: i64,

    /// Error message
    pub message: String,
}

/// Returns the `result` member of a daemon reply, if it has a non-null one.
pub fn envelope_result(response: &Value) -> Option<&Value> {
    response.get("result").filter(|result| !result.is_null())
}

/// Returns the `error` member of a daemon reply, if it has a non-null one.
///
/// Error objects that do not carry a code and message still count as errors;
/// they are reported with code 0 and the raw object as message.
pub fn envelope_error(response: &Value) -> Option<JsonRpcErrorDetail> {
    let error = response.get("error").filter(|error| !error.is_null())?;
    Some(
        serde_json::from_value(error.clone()).unwrap_or_else(|_| JsonRpcErrorDetail {
            code: 0,
            message: error.to_string(),
        }),
    )
}

/// Body of `POST /send`
#[derive(Debug, Deserialize)]
pub struct SendRequest {
    /// Destination address
    pub to_address: String,

    /// Amount to send, as a JSON string or number
    pub amount: Amount,
}

/// Token amount as the client supplied it
///
/// The daemon takes amounts as decimal strings, so numbers are rendered
/// with their JSON text (digits kept exactly as sent) and strings pass
/// through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Amount::Text(text)),
            Value::Number(number) => Ok(Amount::Number(number)),
            other => Err(D::Error::custom(format!(
                "amount must be a string or a number, got {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Amount::Text(text) => f.write_str(text),
            Amount::Number(number) => write!(f, "{}", number),
        }
    }
}
