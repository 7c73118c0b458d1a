//! URL breakdown and HTML/Markdown previews.

use std::sync::LazyLock;

use pulldown_cmark::{Options, Parser, html::push_html};
use regex::Regex;
use serde_json::{Map, Value, json};
use toolbox_model::{Result, ToolError};
use url::Url;

/// Break a URL into its components; repeated query keys become arrays.
pub fn url_parser(input: &str) -> Result<String> {
    let url = Url::parse(input.trim()).map_err(|e| ToolError::validation("Invalid URL", e))?;

    let mut params = Map::new();
    for (key, value) in url.query_pairs() {
        let value = Value::String(value.into_owned());
        match params.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                params.insert(key.into_owned(), value);
            }
        }
    }

    let parsed = json!({
        "protocol": format!("{}:", url.scheme()),
        "hostname": url.host_str().unwrap_or_default(),
        "port": url.port().map(|p| p.to_string()).unwrap_or_default(),
        "pathname": url.path(),
        "search": url.query().map(|q| format!("?{q}")).unwrap_or_default(),
        "hash": url.fragment().map(|f| format!("#{f}")).unwrap_or_default(),
        "params": params,
    });
    serde_json::to_string_pretty(&parsed).map_err(|e| ToolError::failed("Invalid URL", e))
}

static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script regex"));

static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid handler regex")
});

static JAVASCRIPT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid url regex"));

/// Render HTML with scripts, inline event handlers and `javascript:` URLs
/// removed.
pub fn html_preview(input: &str) -> Result<String> {
    let sanitized = SCRIPT.replace_all(input, "");
    let sanitized = EVENT_HANDLER.replace_all(&sanitized, "");
    let sanitized = JAVASCRIPT_URL.replace_all(&sanitized, "");
    Ok(format!("<div class=\"html-preview\">{sanitized}</div>"))
}

/// Render CommonMark (with tables, strikethrough and task lists) to HTML.
pub fn markdown_preview(input: &str) -> Result<String> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let mut html = String::new();
    push_html(&mut html, Parser::new_ext(input, options));
    Ok(format!("<div class=\"markdown-preview-container\">{html}</div>"))
}
