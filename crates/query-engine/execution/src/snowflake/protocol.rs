//! Wire types of the Snowflake session protocol.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::result::Column;

pub const LOGIN_PATH: &str = "/session/v1/login-request";
pub const QUERY_PATH: &str = "/queries/v1/query-request";
pub const SESSION_PATH: &str = "/session";

pub const ACCEPT_SNOWFLAKE: &str = "application/snowflake";

/// Response codes of a statement that has not finished yet.
const QUERY_IN_PROGRESS: &str = "333333";
const QUERY_IN_PROGRESS_ASYNC: &str = "333334";

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub data: LoginRequestData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LoginRequestData<'a> {
    pub client_app_id: &'a str,
    pub client_app_version: &'a str,
    pub account_name: &'a str,
    pub login_name: &'a str,
    pub password: &'a str,
    pub session_parameters: BTreeMap<&'a str, Value>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponseData {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub sql_text: &'a str,
    pub async_exec: bool,
    pub sequence_id: u64,
    pub is_internal: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponseData {
    #[serde(default)]
    pub rowtype: Vec<RowType>,
    #[serde(default)]
    pub rowset: Vec<Vec<Value>>,
    #[serde(default)]
    pub rowset_base64: Option<String>,
    #[serde(default)]
    pub query_result_format: Option<String>,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub chunk_headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub qrmk: Option<String>,
    #[serde(default)]
    pub query_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RowType {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
    #[serde(default)]
    pub scale: Option<i64>,
}

impl From<RowType> for Column {
    fn from(row_type: RowType) -> Self {
        Column {
            name: row_type.name,
            r#type: row_type.r#type,
            scale: row_type.scale,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub url: String,
    #[serde(default)]
    pub row_count: u64,
}

/// The envelope every session and query endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self.code.as_deref(),
            Some(QUERY_IN_PROGRESS | QUERY_IN_PROGRESS_ASYNC)
        )
    }

    /// Where to poll for the outcome of a statement that is still running.
    pub fn result_url(&self) -> Option<&str> {
        self.data.get("getResultUrl").and_then(Value::as_str)
    }

    pub fn into_result(self) -> Result<Value, Error> {
        if self.success {
            Ok(self.data)
        } else {
            Err(Error::Warehouse {
                code: self.code.unwrap_or_default(),
                message: self
                    .message
                    .unwrap_or_else(|| "request failed without a message".to_string()),
            })
        }
    }

    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, Error> {
        let data = self.into_result()?;
        serde_json::from_value(data).map_err(|err| Error::UnexpectedResponse(err.to_string()))
    }
}

/// Parse a downloaded result chunk. Chunks hold comma separated rows without the enclosing
/// brackets.
pub fn parse_chunk(body: &str) -> Result<Vec<Vec<Value>>, Error> {
    serde_json::from_str(&format!("[{body}]"))
        .map_err(|err| Error::UnexpectedResponse(format!("malformed result chunk: {err}")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn failed_envelopes_become_warehouse_errors() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "code": "390100",
            "message": "Incorrect username or password was specified.",
            "data": { "nextAction": "RETRY_LOGIN" }
        }))
        .unwrap();

        let err = envelope.into_data::<LoginResponseData>().unwrap_err();

        assert_eq!(
            err.to_string().as_str(),
            "390100: Incorrect username or password was specified."
        );
    }

    #[test]
    fn recognises_statements_still_running() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "code": "333334",
            "data": { "getResultUrl": "/queries/01a2/result", "queryId": "01a2" }
        }))
        .unwrap();

        assert!(envelope.is_in_progress());
        assert_eq!(envelope.result_url(), Some("/queries/01a2/result"));
    }

    #[test]
    fn chunks_are_rows_without_brackets() {
        let rows = parse_chunk("[\"1\",\"a\"],\n[null,\"b\"]").unwrap();
        assert_eq!(rows, vec![vec![json!("1"), json!("a")], vec![json!(null), json!("b")]]);
    }

    #[test]
    fn login_request_uses_upper_case_keys() {
        let request = LoginRequest {
            data: LoginRequestData {
                client_app_id: "Go",
                client_app_version: "1.6.22",
                account_name: "xy12345",
                login_name: "alice",
                password: "hunter2",
                session_parameters: BTreeMap::new(),
            },
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["data"]["LOGIN_NAME"], json!("alice"));
        assert_eq!(value["data"]["ACCOUNT_NAME"], json!("xy12345"));
        assert_eq!(value["data"]["CLIENT_APP_ID"], json!("Go"));
    }
}
