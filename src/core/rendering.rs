//! Report rendering
//!
//! The job hands a template id, the requested format, and the aggregated
//! data to a rendering collaborator and stores whatever comes back. Hosts
//! can plug in their own `ReportRenderer` (e.g. a document service); the
//! bundled `TemplateRenderer` renders embedded `minijinja` templates.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use minijinja::Environment;

use crate::core::types::ReportFormat;
use crate::utils::error::{EngineError, Result};

/// Everything a renderer gets to see about one report run
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Registry tag of the strategy that produced the data
    pub strategy_name: String,
    /// Human-readable report description
    pub description: String,
    /// Aggregated result from the strategy's query
    pub data: serde_json::Value,
    /// Creation time of the report row, for output labelling
    pub created_at: DateTime<Utc>,
}

/// Rendering collaborator interface
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Produce the final output for a report run.
    ///
    /// Fails with `EngineError::Render` when the template is unknown or the
    /// data does not fit it.
    async fn render(
        &self,
        template_id: &str,
        format: ReportFormat,
        context: &RenderContext,
    ) -> Result<String>;
}

const COST_SUMMARY_CSV: &str = "\
{{ description }}
Requests for {{ data.current_fiscal_year.name }} (previous year {{ data.previous_fiscal_year.name }}), generated {{ created_at }}
Department,Division,Contingent 1,Hourly Faculty,Students,Other Support
{%- for row in data.summary_data %}
{{ row.department }},{{ row.division }},{{ row.c1|dollars }},{{ row.hourly_faculty|dollars }},{{ row.students|dollars }},{{ row.other_support|dollars }}
{%- endfor %}
";

const STATUS_SUMMARY_CSV: &str = "\
{{ description }}
Status,Count
{%- for row in data.summary_data %}
{{ row.status }},{{ row.count }}
{%- endfor %}
";

const STATUS_SUMMARY_HTML: &str = r#"<!doctype html>
<html lang="en"><meta charset="utf-8">
<title>{{ description }}</title>
<h1>{{ description }}</h1>
<p>Generated {{ created_at }}</p>
<table>
<tr><th>Status</th><th>Count</th></tr>
{%- for row in data.summary_data %}
<tr><td>{{ row.status }}</td><td>{{ row.count }}</td></tr>
{%- endfor %}
</table>
</html>
"#;

/// Template-based renderer with the built-in report templates embedded
///
/// Templates are keyed `"{template_id}.{format}"`.
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer with the built-in templates registered
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.add_filter("dollars", dollars);

        // Registration of embedded templates cannot fail at runtime; a bad
        // template is a programming error caught by the tests below.
        for (name, source) in [
            ("labor_requests_cost_summary.csv", COST_SUMMARY_CSV),
            ("review_status_summary.csv", STATUS_SUMMARY_CSV),
            ("review_status_summary.html", STATUS_SUMMARY_HTML),
        ] {
            if let Err(e) = env.add_template(name, source) {
                unreachable!("embedded template '{name}' failed to parse: {e}");
            }
        }

        Self { env }
    }

    /// Register an additional template under `"{template_id}.{format}"`
    pub fn add_template(
        &mut self,
        template_id: &str,
        format: ReportFormat,
        source: String,
    ) -> Result<()> {
        let name = format!("{template_id}.{format}");
        self.env
            .add_template_owned(name, source)
            .map_err(|e| EngineError::render(format!("invalid template: {e}")))
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRenderer for TemplateRenderer {
    async fn render(
        &self,
        template_id: &str,
        format: ReportFormat,
        context: &RenderContext,
    ) -> Result<String> {
        let name = format!("{template_id}.{format}");
        let template = self
            .env
            .get_template(&name)
            .map_err(|_| EngineError::render(format!("no template registered for '{name}'")))?;

        template
            .render(minijinja::context! {
                strategy => context.strategy_name,
                description => context.description,
                data => context.data,
                created_at => context.created_at.to_rfc3339(),
            })
            .map_err(|e| EngineError::render(format!("template '{name}' failed: {e}")))
    }
}

/// Format integer cents as a dollar string ("120000" cents -> "1200.00")
/// using integer math only, so output is reproducible byte-for-byte.
fn dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}
