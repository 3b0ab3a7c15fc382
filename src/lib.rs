//! Workflow tasks backed by the Linear GraphQL API: create an issue from
//! team and label names, and look up team or label ids by name.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod responses;
pub mod tasks;

pub use client::LinearClient;
pub use error::{LinearError, Result};
pub use render::{Context, Render};
pub use tasks::{
    CreateIssue, CreateIssueOutput, RunContext, SearchLabels, SearchLabelsOutput, SearchTeams,
    SearchTeamsOutput,
};
