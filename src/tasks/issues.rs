use serde::Serialize;
use tracing::{info, warn};

use super::labels::resolve_label_ids;
use super::teams::resolve_team_id;
use super::RunContext;
use crate::client::GraphqlRequest;
use crate::error::{LinearError, Result};
use crate::responses::{decode_issue_create, error_messages};

pub const ISSUE_CREATE_MUTATION: &str =
    "mutation ($input: IssueCreateInput!) { issueCreate(input: $input) { success issue { id } } }";

/// Open an issue in the named team.
#[derive(Debug, Clone)]
pub struct CreateIssue {
    pub token: String,
    /// Team name, matched case-insensitively.
    pub team: String,
    pub title: String,
    pub description: String,
    /// Label names, matched case-sensitively. Unknown names are skipped.
    pub labels: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueOutput {
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
}

impl CreateIssueOutput {
    fn failed() -> Self {
        Self {
            is_success: false,
            issue_id: None,
        }
    }
}

/// `variables.input` of the create mutation.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreateInput {
    pub team_id: String,
    pub title: String,
    pub description: String,
    /// Omitted from the payload when there is nothing to send; never `[]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,
}

impl IssueCreateInput {
    pub fn new(team_id: &str, title: &str, description: &str, label_ids: Vec<String>) -> Self {
        Self {
            team_id: team_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            label_ids: (!label_ids.is_empty()).then_some(label_ids),
        }
    }
}

#[derive(Serialize)]
struct IssueCreateVariables {
    input: IssueCreateInput,
}

/// Serialized `{query, variables}` body of the create mutation.
pub fn build_create_request(
    team_id: &str,
    title: &str,
    description: &str,
    label_ids: Vec<String>,
) -> Result<String> {
    GraphqlRequest {
        query: ISSUE_CREATE_MUTATION,
        variables: Some(IssueCreateVariables {
            input: IssueCreateInput::new(team_id, title, description, label_ids),
        }),
    }
    .to_body()
}

impl CreateIssue {
    /// Lookup failures are raised. A create the API refused is reported as
    /// `is_success: false`.
    pub async fn run(&self, ctx: &RunContext) -> Result<CreateIssueOutput> {
        let renderer = ctx.renderer();
        let team = renderer.render(&self.team)?;
        let title = renderer.render(&self.title)?;
        let description = renderer.render(&self.description)?;
        let labels = renderer.render_list(&self.labels)?;

        let client = ctx.client(&self.token)?;

        let team_name = Some(team.as_str()).filter(|t| !t.is_empty());
        let team_id = resolve_team_id(&client, team_name)
            .await?
            .ok_or_else(|| LinearError::TeamNotFound(team.clone()))?;
        let label_ids = resolve_label_ids(&client, &labels).await?;

        let body = build_create_request(&team_id, &title, &description, label_ids)?;
        let response = client.send(body).await?;

        if !response.is_success() {
            warn!(status = response.status, body = %response.body, "issue creation was rejected");
            return Ok(CreateIssueOutput::failed());
        }

        let result = decode_issue_create(&response.body)?;

        if let Some(errors) = &result.errors {
            warn!(errors = ?error_messages(errors), "issue creation returned GraphQL errors");
            return Ok(CreateIssueOutput::failed());
        }

        match result.issue_id {
            Some(id) if result.success => {
                info!("Issue created with ID: {id}");
                Ok(CreateIssueOutput {
                    is_success: true,
                    issue_id: Some(id),
                })
            }
            _ => {
                warn!("issue creation reported success=false");
                Ok(CreateIssueOutput::failed())
            }
        }
    }
}
