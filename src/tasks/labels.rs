use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::{filter_by_name, read_query, RunContext};
use crate::client::LinearClient;
use crate::error::Result;
use crate::responses::{decode_labels, NamedNode};

pub const LABELS_QUERY: &str = "query { issueLabels { nodes { id name } } }";

/// Retrieve label ids by name. Names are case sensitive.
#[derive(Debug, Clone)]
pub struct SearchLabels {
    pub token: String,
    /// Absent or empty returns every label.
    pub labels: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchLabelsOutput {
    pub labels_ids: BTreeMap<String, String>,
}

impl SearchLabels {
    pub async fn run(&self, ctx: &RunContext) -> Result<SearchLabelsOutput> {
        let names = ctx.renderer().render_opt_list(self.labels.as_deref())?;
        let client = ctx.client(&self.token)?;

        let labels = fetch_labels(&client).await?;
        let labels_ids = filter_by_name(labels, names.as_deref());
        debug!(count = labels_ids.len(), "matched labels");

        Ok(SearchLabelsOutput { labels_ids })
    }
}

pub async fn fetch_labels(client: &LinearClient) -> Result<Vec<NamedNode>> {
    let body = read_query(client, LABELS_QUERY).await?;
    decode_labels(&body)
}

/// Ids of the labels named in `names`, in response order.
///
/// Unlike the search task, an empty `names` selects nothing.
pub fn match_label_ids(labels: &[NamedNode], names: &[String]) -> Vec<String> {
    if names.is_empty() {
        return Vec::new();
    }

    labels
        .iter()
        .filter(|l| names.contains(&l.name))
        .map(|l| l.id.clone())
        .collect()
}

/// Resolve label names to ids. Unknown names are dropped.
pub async fn resolve_label_ids(client: &LinearClient, names: &[String]) -> Result<Vec<String>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let labels = fetch_labels(client).await?;

    for name in names {
        if !labels.iter().any(|l| &l.name == name) {
            debug!(label = %name, "label not found, skipping");
        }
    }

    Ok(match_label_ids(&labels, names))
}
