//! The three workflow tasks and what they share.

pub mod issues;
pub mod labels;
pub mod teams;

use std::collections::BTreeMap;

use url::Url;

use crate::client::{GraphqlRequest, LinearClient};
use crate::error::Result;
use crate::render::Render;
use crate::responses::NamedNode;

pub use issues::{CreateIssue, CreateIssueOutput};
pub use labels::{SearchLabels, SearchLabelsOutput};
pub use teams::{SearchTeams, SearchTeamsOutput};

/// What a task needs from its caller: a renderer for inputs and where to send requests.
pub struct RunContext {
    renderer: Box<dyn Render>,
    endpoint: Url,
}

impl RunContext {
    pub fn new(renderer: impl Render + 'static, endpoint: Url) -> Self {
        Self {
            renderer: Box::new(renderer),
            endpoint,
        }
    }

    pub fn renderer(&self) -> &dyn Render {
        self.renderer.as_ref()
    }

    /// Fresh client for one task run, with the rendered token.
    pub fn client(&self, token: &str) -> Result<LinearClient> {
        let token = self.renderer.render(token)?;
        Ok(LinearClient::new(token, self.endpoint.clone()))
    }
}

/// Run a static read query and return the body of a 2xx response.
pub(crate) async fn read_query(client: &LinearClient, query: &str) -> Result<String> {
    let body = GraphqlRequest::query(query).to_body()?;
    client.send(body).await?.into_success_body()
}

/// Name to id mapping for the search tasks.
///
/// An absent or empty filter keeps every node. Otherwise names must match
/// exactly. On duplicate names the first node in response order wins.
pub fn filter_by_name(nodes: Vec<NamedNode>, names: Option<&[String]>) -> BTreeMap<String, String> {
    let names = names.filter(|n| !n.is_empty());
    let mut ids = BTreeMap::new();

    for node in nodes {
        if names.is_some_and(|names| !names.contains(&node.name)) {
            continue;
        }
        ids.entry(node.name).or_insert(node.id);
    }

    ids
}


#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: &str) -> NamedNode {
        NamedNode {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn no_filter_keeps_everything() {
        let nodes = vec![node("L1", "Bug"), node("L2", "Infra")];

        let all = filter_by_name(nodes.clone(), None);
        assert_eq!(all.len(), 2);
        assert_eq!(all["Bug"], "L1");
        assert_eq!(all["Infra"], "L2");

        let empty: Vec<String> = Vec::new();
        assert_eq!(filter_by_name(nodes, Some(empty.as_slice())), all);
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let nodes = vec![node("L1", "Bug"), node("L2", "bug"), node("L3", "Infra")];
        let names = vec!["bug".to_string(), "Missing".to_string()];

        let ids = filter_by_name(nodes, Some(names.as_slice()));
        assert_eq!(ids.len(), 1);
        assert_eq!(ids["bug"], "L2");
    }

    #[test]
    fn duplicate_names_keep_first_node() {
        let nodes = vec![node("T1", "Core"), node("T2", "Core")];
        let ids = filter_by_name(nodes, None);
        assert_eq!(ids["Core"], "T1");
    }

    #[test]
    fn client_renders_token() {
        let ctx = RunContext::new(
            crate::render::Context::new().with_var("secret", "abc"),
            Url::parse("http://localhost/graphql").unwrap(),
        );
        assert!(ctx.client("{{ secret }}").is_ok());
        assert!(ctx.client("{{ nope }}").is_err());
    }
}
