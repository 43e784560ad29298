//! Document rendering
//!
//! The rendering collaborator receives the structured payload plus the
//! narrative text and owns all layout. The shipped implementation produces
//! a Markdown document; the core imposes no page or format contract.

use crate::error::Result;
use minijinja::{Environment, context};
use minijinja::value::Value;
use trend_core::ReportPayload;

/// Trait for document renderers
pub trait DocumentRenderer: Send + Sync {
    /// Render the payload and narrative into one document
    fn render(&self, payload: &ReportPayload, narrative: &str) -> Result<String>;

    /// Get the renderer name (e.g., "markdown")
    fn name(&self) -> &str;
}

const MARKDOWN_TEMPLATE: &str = r"# Market Trend Report

Generated: {{ payload.generated_at }}

| Symbol | Name | Price | Change |
|--------|------|-------|--------|
{%- for asset in payload.assets %}
| {{ asset.symbol }} | {{ asset.name }} | {{ asset.price }} | {{ asset.change }} |
{%- endfor %}

## Narrative

{{ narrative }}

## Detail
{% for asset in payload.assets %}
### {{ asset.name }} ({{ asset.symbol }})

- Last price: {{ asset.price }}
- Change this period: {{ asset.change }}
{%- for name, value in asset.indicators|items %}
- {{ name }}: {{ value }}
{%- endfor %}
{%- if asset.delta %}
- Previous report price: {{ asset.delta.prior_price }}
- Movement since: {{ asset.delta.absolute_error }} ({{ asset.delta.relative_error }} relative)
{%- endif %}
{% endfor %}";

/// Markdown document renderer
#[derive(Debug, Default, Clone)]
pub struct MarkdownRenderer {}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {}
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(&self, payload: &ReportPayload, narrative: &str) -> Result<String> {
        let mut env = Environment::new();
        env.add_template("report", MARKDOWN_TEMPLATE)?;
        let template = env.get_template("report")?;

        let rendered = template.render(context! {
            payload => Value::from_serialize(payload),
            narrative => narrative,
        })?;
        Ok(rendered)
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;
    use trend_core::{AssetSnapshot, payload};

    fn sample_payload() -> ReportPayload {
        let snapshots = vec![
            AssetSnapshot {
                symbol: "AAA".to_string(),
                display_name: "Asset A".to_string(),
                as_of: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
                last_price: 110.0,
                price_change: 2.0,
                indicators: BTreeMap::from([("ma_20".to_string(), 104.5)]),
            },
            AssetSnapshot {
                symbol: "BBB".to_string(),
                display_name: "Asset B".to_string(),
                as_of: Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
                last_price: 50.0,
                price_change: -1.0,
                indicators: BTreeMap::new(),
            },
        ];
        payload::assemble(
            &snapshots,
            Vec::new(),
            Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_markdown_contains_table_and_narrative() {
        let document = MarkdownRenderer::new()
            .render(&sample_payload(), "Quiet week across the board.")
            .unwrap();
        assert!(document.starts_with("# Market Trend Report"));
        assert!(document.contains("| AAA | Asset A | 110"));
        assert!(document.contains("Quiet week across the board."));
        assert!(document.contains("ma_20: 104.5"));
    }

    #[test]
    fn test_assets_render_in_payload_order() {
        let document = MarkdownRenderer::new()
            .render(&sample_payload(), "n/a")
            .unwrap();
        let first = document.find("Asset A").unwrap();
        let second = document.find("Asset B").unwrap();
        assert!(first < second);
    }
}
