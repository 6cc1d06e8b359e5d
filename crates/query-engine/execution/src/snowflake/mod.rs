//! A [`Warehouse`] backed by Snowflake.
//!
//! Sessions are opened with a password login against the account's host, statements are run
//! through the query endpoint, and the session is deleted when it is closed. Large result sets
//! are split by the warehouse into chunks which are downloaded before the result is returned.

mod protocol;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use query_engine_sql::sql::string::Statement;
use snowflake_gateway_configuration::ConnectionParameters;

use crate::error::Error;
use crate::result::{Column, QueryResult};
use crate::warehouse::{Session, Warehouse};

use protocol::{
    Envelope, LoginRequest, LoginRequestData, LoginResponseData, QueryRequest, QueryResponseData,
    ACCEPT_SNOWFLAKE, LOGIN_PATH, QUERY_PATH, SESSION_PATH,
};

// the server picks the result encoding from the client id and its session parameters.
const CLIENT_APP_ID: &str = "Go";
const CLIENT_APP_VERSION: &str = "1.6.22";
const RESULT_FORMAT_PARAMETER: &str = "GO_QUERY_RESULT_FORMAT";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Opens Snowflake sessions using static connection parameters.
#[derive(Debug, Clone)]
pub struct Snowflake {
    client: reqwest::Client,
    parameters: ConnectionParameters,
    base_url: Option<Url>,
}

impl Snowflake {
    pub fn new(parameters: ConnectionParameters) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snowflake-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Snowflake {
            client,
            parameters,
            base_url: None,
        })
    }

    /// Talk to this host instead of the one derived from the account identifier.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn base_url(&self, account: &str) -> Result<Url, Error> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(&format!(
                "https://{account}.snowflakecomputing.com"
            ))?),
        }
    }
}

/// The account name is the identifier without its region or cloud suffix.
fn account_name(account: &str) -> &str {
    account.split('.').next().unwrap_or(account)
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, Error> {
    value.as_deref().ok_or(Error::MissingParameter(name))
}

#[async_trait]
impl Warehouse for Snowflake {
    async fn connect(&self) -> Result<Box<dyn Session>, Error> {
        let parameters = &self.parameters;
        let account = required(&parameters.account, "account")?;
        let user = required(&parameters.user, "user")?;
        let password = required(&parameters.password, "password")?;
        let base_url = self.base_url(account)?;

        let mut login_url = base_url.join(LOGIN_PATH)?;
        {
            let mut query = login_url.query_pairs_mut();
            query.append_pair("request_id", &Uuid::new_v4().to_string());
            if let Some(warehouse) = &parameters.warehouse {
                query.append_pair("warehouse", warehouse);
            }
            if let Some(database) = &parameters.database {
                query.append_pair("databaseName", database);
            }
            if let Some(schema) = &parameters.schema {
                query.append_pair("schemaName", schema);
            }
        }

        let request = LoginRequest {
            data: LoginRequestData {
                client_app_id: CLIENT_APP_ID,
                client_app_version: CLIENT_APP_VERSION,
                account_name: account_name(account),
                login_name: user,
                password,
                session_parameters: BTreeMap::from([(
                    RESULT_FORMAT_PARAMETER,
                    Value::from("json"),
                )]),
            },
        };

        let envelope: Envelope = self
            .client
            .post(login_url)
            .header(ACCEPT, ACCEPT_SNOWFLAKE)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let LoginResponseData { token } = envelope.into_data()?;

        tracing::info!(account, user, "opened warehouse session");

        Ok(Box::new(SnowflakeSession {
            client: self.client.clone(),
            base_url,
            token: Some(token),
            sequence_id: 0,
        }))
    }
}

/// A logged-in Snowflake session.
pub struct SnowflakeSession {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    sequence_id: u64,
}

impl SnowflakeSession {
    fn authorization(&self) -> Result<String, Error> {
        match &self.token {
            Some(token) => Ok(format!("Snowflake Token=\"{token}\"")),
            None => Err(Error::UnexpectedResponse(
                "session has already been closed".to_string(),
            )),
        }
    }

    async fn poll(&self, result_url: &str) -> Result<Envelope, Error> {
        tokio::time::sleep(POLL_INTERVAL).await;
        let envelope = self
            .client
            .get(self.base_url.join(result_url)?)
            .header(ACCEPT, ACCEPT_SNOWFLAKE)
            .header(AUTHORIZATION, self.authorization()?)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope)
    }

    async fn download_chunks(&self, data: &QueryResponseData) -> Result<Vec<Vec<Value>>, Error> {
        let mut rows = vec![];
        for chunk in &data.chunks {
            let mut request = self.client.get(&chunk.url);
            if let Some(headers) = &data.chunk_headers {
                for (name, value) in headers {
                    request = request.header(name.as_str(), value.as_str());
                }
            } else if let Some(qrmk) = &data.qrmk {
                request = request
                    .header("x-amz-server-side-encryption-customer-algorithm", "AES256")
                    .header("x-amz-server-side-encryption-customer-key", qrmk.as_str());
            }

            let body = request.send().await?.error_for_status()?.text().await?;
            let chunk_rows = protocol::parse_chunk(&body)?;
            tracing::debug!(
                expected = chunk.row_count,
                received = chunk_rows.len(),
                "downloaded result chunk"
            );
            rows.extend(chunk_rows);
        }
        Ok(rows)
    }
}

#[async_trait]
impl Session for SnowflakeSession {
    async fn execute(&mut self, statement: &Statement) -> Result<QueryResult, Error> {
        self.sequence_id += 1;

        let mut url = self.base_url.join(QUERY_PATH)?;
        url.query_pairs_mut()
            .append_pair("requestId", &Uuid::new_v4().to_string());

        let request = QueryRequest {
            sql_text: statement.sql(),
            async_exec: false,
            sequence_id: self.sequence_id,
            is_internal: false,
        };

        let mut envelope: Envelope = self
            .client
            .post(url)
            .header(ACCEPT, ACCEPT_SNOWFLAKE)
            .header(AUTHORIZATION, self.authorization()?)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        while envelope.is_in_progress() {
            let result_url = envelope
                .result_url()
                .ok_or_else(|| {
                    Error::UnexpectedResponse(
                        "running statement without a result url".to_string(),
                    )
                })?
                .to_string();
            envelope = self.poll(&result_url).await?;
        }

        let data: QueryResponseData = envelope.into_data()?;

        if let Some(format) = &data.query_result_format {
            if !format.eq_ignore_ascii_case("json") {
                return Err(Error::UnsupportedResultFormat(format.clone()));
            }
        }
        if data.rowset_base64.as_deref().is_some_and(|rows| !rows.is_empty()) {
            return Err(Error::UnsupportedResultFormat("arrow".to_string()));
        }

        let chunk_rows = self.download_chunks(&data).await?;

        let QueryResponseData {
            rowtype,
            mut rowset,
            query_id,
            ..
        } = data;
        rowset.extend(chunk_rows);

        tracing::debug!(
            query_id = query_id.as_deref().unwrap_or_default(),
            rows = rowset.len(),
            "fetched result set"
        );

        let columns = rowtype.into_iter().map(Column::from).collect();
        Ok(QueryResult::decode(columns, rowset))
    }

    async fn close(&mut self) -> Result<(), Error> {
        let Some(token) = self.token.take() else {
            return Ok(());
        };

        let mut url = self.base_url.join(SESSION_PATH)?;
        url.query_pairs_mut().append_pair("delete", "true");

        let envelope: Envelope = self
            .client
            .post(url)
            .header(ACCEPT, ACCEPT_SNOWFLAKE)
            .header(AUTHORIZATION, format!("Snowflake Token=\"{token}\""))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        envelope.into_result()?;
        Ok(())
    }
}
