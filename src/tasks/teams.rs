use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::{filter_by_name, read_query, RunContext};
use crate::client::LinearClient;
use crate::error::Result;
use crate::responses::{decode_teams, NamedNode};

pub const TEAMS_QUERY: &str = "query { teams { nodes { id name } } }";

/// Retrieve team ids by name.
#[derive(Debug, Clone)]
pub struct SearchTeams {
    pub token: String,
    /// Absent or empty returns every team.
    pub team_names: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchTeamsOutput {
    pub teams_ids: BTreeMap<String, String>,
}

impl SearchTeams {
    pub async fn run(&self, ctx: &RunContext) -> Result<SearchTeamsOutput> {
        let names = ctx.renderer().render_opt_list(self.team_names.as_deref())?;
        let client = ctx.client(&self.token)?;

        let teams = fetch_teams(&client).await?;
        let teams_ids = filter_by_name(teams, names.as_deref());
        debug!(count = teams_ids.len(), "matched teams");

        Ok(SearchTeamsOutput { teams_ids })
    }
}

pub async fn fetch_teams(client: &LinearClient) -> Result<Vec<NamedNode>> {
    let body = read_query(client, TEAMS_QUERY).await?;
    decode_teams(&body)
}

/// Case-insensitive exact match, first team in response order wins.
pub fn match_team_id(teams: &[NamedNode], name: Option<&str>) -> Option<String> {
    let name_lower = name?.to_lowercase();

    teams
        .iter()
        .find(|t| t.name.to_lowercase() == name_lower)
        .map(|t| t.id.clone())
}

/// Resolve a team name to its id. No name means no id and no request.
pub async fn resolve_team_id(client: &LinearClient, name: Option<&str>) -> Result<Option<String>> {
    let Some(name) = name else {
        return Ok(None);
    };

    let teams = fetch_teams(client).await?;
    let id = match_team_id(&teams, Some(name));
    debug!(team = name, resolved = id.is_some(), "resolved team");

    Ok(id)
}
