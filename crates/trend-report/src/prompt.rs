//! Analyst prompt construction
//!
//! Renders the structured payload and the prior cycle's excerpt into the
//! prompt handed to the narrative provider. The prompt asks the model to
//! reconcile its previous reading against what actually happened before
//! describing the current trend.

use crate::error::Result;
use minijinja::{Environment, context};
use minijinja::value::Value;
use trend_core::ReportPayload;

/// System prompt framing the analyst role
pub const ANALYST_SYSTEM: &str = "You are a careful financial market analyst. \
You write concise trend reports grounded strictly in the data you are given, \
and you openly correct your prior read when the numbers moved against it.";

const ANALYST_TEMPLATE: &str = r"Write the market trend report for {{ payload.generated_at }}.

Current data, one block per asset:
{% for asset in payload.assets %}
### {{ asset.name }} ({{ asset.symbol }})
- last price: {{ asset.price }}
- change this period: {{ asset.change }}
{%- if asset.indicators %}
- indicators:
{%- for name, value in asset.indicators|items %}
    - {{ name }}: {{ value }}
{%- endfor %}
{%- endif %}
{%- if asset.delta %}
- versus the previous report: prior price {{ asset.delta.prior_price }}, movement {{ asset.delta.absolute_error }} ({{ asset.delta.relative_error }} relative)
{%- if asset.delta.direction_agreement is defined %}
- prior directional call was {% if asset.delta.direction_agreement %}confirmed{% else %}contradicted{% endif %}
{%- endif %}
{%- else %}
- first appearance in this report cycle
{%- endif %}
{% endfor %}
{%- if prior_excerpt %}
Excerpt from the previous report, for continuity and self-correction:
---
{{ prior_excerpt }}
---
{%- endif %}

Instructions:
1. Open with a two-sentence overview of the broad trend.
2. For each asset, describe the current trend using the indicator values.
3. Where a delta is present, compare against the previous report and note
   what changed; if the move contradicts the previous reading, say so.
4. Do not invent data that is not listed above.";

/// Render the analyst prompt for one run
pub fn analyst_prompt(payload: &ReportPayload, prior_excerpt: Option<&str>) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("analyst", ANALYST_TEMPLATE)?;
    let template = env.get_template("analyst")?;

    let rendered = template.render(context! {
        payload => Value::from_serialize(payload),
        prior_excerpt => prior_excerpt,
    })?;
    Ok(rendered)
}
