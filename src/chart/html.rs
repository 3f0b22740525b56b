//! Standalone HTML export
//!
//! Wraps the chart options in a single page that loads Chart.js from a CDN.

use super::renderer::ChartState;

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Render a self-contained HTML page for a chart
pub fn page(state: &ChartState) -> Result<String, serde_json::Error> {
    // `</` inside the JSON would end the script element early
    let options = serde_json::to_string(&state.options)?.replace("</", "<\\/");
    let title = escape(&state.options.options.plugins.title.text);
    let notice = state
        .notice
        .as_ref()
        .map(|n| format!("<div class=\"notice\">{}</div>\n", escape(&n.message)))
        .unwrap_or_default();

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
<style>
body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; }}
.notice {{ background: #fff3cd; border: 1px solid #ffe08a; padding: .75rem 1rem; margin-bottom: 1rem; }}
</style>
</head>
<body>
{notice}<canvas id="indicadores-chart"></canvas>
<script>
const options = {options};
options.options.plugins.tooltip.callbacks = {{
  label: (ctx) => options.options.plugins.tooltip.labels[ctx.dataIndex]
}};
new Chart(document.getElementById("indicadores-chart"), options);
</script>
</body>
</html>
"#,
        title = title,
        cdn = CHART_JS_CDN,
        notice = notice,
        options = options,
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
