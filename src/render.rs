//! Rendering of task inputs before they reach the Linear calls.
//!
//! Every user-facing field (token included) is a template. `{{ name }}` is
//! replaced by a context variable, and `{{ env.NAME }}` by the process
//! environment variable `NAME`, which is how secrets get injected.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LinearError, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}\}").unwrap());

pub trait Render {
    fn render(&self, template: &str) -> Result<String>;

    fn render_list(&self, templates: &[String]) -> Result<Vec<String>> {
        templates.iter().map(|t| self.render(t)).collect()
    }

    fn render_opt_list(&self, templates: Option<&[String]>) -> Result<Option<Vec<String>>> {
        templates.map(|t| self.render_list(t)).transpose()
    }
}

/// Variable-map renderer.
#[derive(Debug, Clone, Default)]
pub struct Context {
    vars: HashMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Later entries override earlier ones.
    pub fn extend<I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.vars.extend(vars);
    }

    fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.vars.get(name) {
            return Some(value.clone());
        }
        name.strip_prefix("env.")
            .and_then(|key| std::env::var(key).ok())
    }
}

impl Render for Context {
    fn render(&self, template: &str) -> Result<String> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = self.lookup(name.as_str()).ok_or_else(|| LinearError::Render {
                template: template.to_string(),
                variable: name.as_str().to_string(),
            })?;

            rendered.push_str(&template[last..whole.start()]);
            rendered.push_str(&value);
            last = whole.end();
        }

        rendered.push_str(&template[last..]);
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        let ctx = Context::new();
        assert_eq!(ctx.render("Workflow failed").unwrap(), "Workflow failed");
        assert_eq!(ctx.render("").unwrap(), "");
        assert_eq!(ctx.render("{ not a template }").unwrap(), "{ not a template }");
    }

    #[test]
    fn substitutes_variables_with_or_without_spaces() {
        let ctx = Context::new()
            .with_var("execution.id", "42")
            .with_var("flow", "nightly");
        assert_eq!(
            ctx.render("{{ execution.id }} of {{flow}} has failed").unwrap(),
            "42 of nightly has failed"
        );
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let err = Context::new().render("team {{ missing }}").unwrap_err();
        match err {
            LinearError::Render { template, variable } => {
                assert_eq!(template, "team {{ missing }}");
                assert_eq!(variable, "missing");
            }
            other => panic!("expected Render error, got {other:?}"),
        }
    }

    #[test]
    fn env_prefix_reads_process_environment() {
        std::env::set_var("LINEAR_TASKS_RENDER_TEST_TOKEN", "lin_api_123");
        let ctx = Context::new();
        assert_eq!(
            ctx.render("{{ env.LINEAR_TASKS_RENDER_TEST_TOKEN }}").unwrap(),
            "lin_api_123"
        );
    }

    #[test]
    fn explicit_vars_shadow_environment() {
        std::env::set_var("LINEAR_TASKS_RENDER_TEST_SHADOW", "from-env");
        let ctx = Context::new().with_var("env.LINEAR_TASKS_RENDER_TEST_SHADOW", "from-var");
        assert_eq!(
            ctx.render("{{ env.LINEAR_TASKS_RENDER_TEST_SHADOW }}").unwrap(),
            "from-var"
        );
    }

    #[test]
    fn extend_overrides_existing_values() {
        let mut ctx = Context::new().with_var("team", "Core");
        ctx.extend([("team".to_string(), "Infra".to_string())]);
        assert_eq!(ctx.render("{{ team }}").unwrap(), "Infra");
    }

    #[test]
    fn lists_render_element_wise() {
        let ctx = Context::new().with_var("kind", "Bug");
        let labels = vec!["{{ kind }}".to_string(), "Infra".to_string()];
        assert_eq!(ctx.render_list(&labels).unwrap(), vec!["Bug", "Infra"]);
        assert_eq!(ctx.render_opt_list(None).unwrap(), None);
    }
}
