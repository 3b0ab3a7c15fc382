//! GraphQL response shapes and the decoders for the three queries the tasks send.
//!
//! Unknown fields are ignored everywhere. An absent `data` path is reported as
//! an error, never dereferenced.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LinearError, Result};

#[derive(Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<Value>>,
}

#[derive(Deserialize)]
pub struct Connection<T> {
    pub nodes: Vec<T>,
}

/// A team or a label as returned in a `nodes` list.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedNode {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct TeamsData {
    teams: Option<Connection<NamedNode>>,
}

#[derive(Deserialize)]
struct LabelsData {
    #[serde(rename = "issueLabels")]
    issue_labels: Option<Connection<NamedNode>>,
}

#[derive(Deserialize)]
struct IssueCreateData {
    #[serde(rename = "issueCreate")]
    issue_create: Option<IssueCreatePayload>,
}

#[derive(Deserialize)]
struct IssueCreatePayload {
    success: Option<bool>,
    issue: Option<IssueRef>,
}

#[derive(Deserialize)]
struct IssueRef {
    id: Option<String>,
}

/// Outcome of the `issueCreate` mutation.
///
/// `issue_id` is only set when `success` is true and no GraphQL errors came back.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueCreateResult {
    pub success: bool,
    pub issue_id: Option<String>,
    pub errors: Option<Vec<Value>>,
}

/// Human-readable messages out of opaque GraphQL error objects.
pub fn error_messages(errors: &[Value]) -> Vec<String> {
    errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| e.to_string())
        })
        .collect()
}

fn non_empty(errors: Option<Vec<Value>>) -> Option<Vec<Value>> {
    errors.filter(|e| !e.is_empty())
}

/// Decode the envelope of a read query. GraphQL errors win over `data`.
fn read_data<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: GraphqlEnvelope<T> = serde_json::from_str(body)?;

    if let Some(errors) = non_empty(envelope.errors) {
        return Err(LinearError::GraphQL {
            messages: error_messages(&errors),
        });
    }

    envelope.data.ok_or(LinearError::MissingField("data"))
}

pub fn decode_teams(body: &str) -> Result<Vec<NamedNode>> {
    let data: TeamsData = read_data(body)?;
    data.teams
        .map(|teams| teams.nodes)
        .ok_or(LinearError::MissingField("data.teams"))
}

pub fn decode_labels(body: &str) -> Result<Vec<NamedNode>> {
    let data: LabelsData = read_data(body)?;
    data.issue_labels
        .map(|labels| labels.nodes)
        .ok_or(LinearError::MissingField("data.issueLabels"))
}

/// Decode the mutation result. GraphQL errors and `success: false` are
/// returned as results, a broken contract is an error.
pub fn decode_issue_create(body: &str) -> Result<IssueCreateResult> {
    let envelope: GraphqlEnvelope<IssueCreateData> = serde_json::from_str(body)?;

    if let Some(errors) = non_empty(envelope.errors) {
        return Ok(IssueCreateResult {
            success: false,
            issue_id: None,
            errors: Some(errors),
        });
    }

    let payload = envelope
        .data
        .ok_or(LinearError::MissingField("data"))?
        .issue_create
        .ok_or(LinearError::MissingField("data.issueCreate"))?;

    let success = payload
        .success
        .ok_or(LinearError::MissingField("data.issueCreate.success"))?;

    if !success {
        return Ok(IssueCreateResult {
            success: false,
            issue_id: None,
            errors: None,
        });
    }

    let issue_id = payload
        .issue
        .and_then(|issue| issue.id)
        .ok_or(LinearError::MissingField("data.issueCreate.issue.id"))?;

    Ok(IssueCreateResult {
        success: true,
        issue_id: Some(issue_id),
        errors: None,
    })
}
