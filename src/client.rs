use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::{LinearError, Result};

pub const API_ENDPOINT: &str = "https://api.linear.app/graphql";

/// Single-endpoint GraphQL transport. One instance per task run.
pub struct LinearClient {
    http: Client,
    endpoint: Url,
    token: String,
}

/// JSON body of a GraphQL call.
#[derive(Serialize, Debug)]
pub struct GraphqlRequest<'a, V: Serialize = serde_json::Value> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<V>,
}

impl<'a> GraphqlRequest<'a> {
    /// A read query without variables.
    pub fn query(query: &'a str) -> Self {
        Self {
            query,
            variables: None,
        }
    }
}

impl<V: Serialize> GraphqlRequest<'_, V> {
    pub fn to_body(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Status code and body exactly as the server sent them.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a 2xx response, `UnexpectedStatus` otherwise.
    pub fn into_success_body(self) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(LinearError::UnexpectedStatus {
                status: self.status,
                body: self.body,
            })
        }
    }
}

impl LinearClient {
    pub fn new(token: String, endpoint: Url) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            token,
        }
    }

    /// POST an already serialized `{query, variables}` body.
    ///
    /// The token goes into `Authorization` verbatim, with no scheme prefix.
    /// Non-2xx statuses are returned, not raised.
    pub async fn send(&self, body: String) -> Result<RawResponse> {
        debug!(endpoint = %self.endpoint, bytes = body.len(), "sending GraphQL request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", &self.token)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, "received GraphQL response");

        Ok(RawResponse { status, body })
    }
}
