//! Formatters: reindent or normalise text without changing its meaning.

use std::collections::HashSet;
use std::sync::LazyLock;

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use regex::Regex;
use toolbox_model::{Result, ToolError};

/// Pretty print a JSON object with 2-space indentation, keeping key order.
pub fn json(input: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| ToolError::validation("Invalid JSON", e))?;
    if !value.is_object() {
        return Err(ToolError::validation(
            "Invalid JSON",
            "expected a JSON object at the top level",
        ));
    }
    serde_json::to_string_pretty(&value).map_err(|e| ToolError::validation("Invalid JSON", e))
}

/// Reindent an XML document with 2 spaces per level.
pub fn xml(input: &str) -> Result<String> {
    let invalid = |e: &dyn std::fmt::Display| ToolError::validation("Invalid XML", e);

    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let mut depth = 0usize;
    let mut seen_element = false;

    loop {
        let event = reader.read_event().map_err(|e| invalid(&e))?;
        match &event {
            Event::Eof => break,
            Event::Start(_) => {
                depth += 1;
                seen_element = true;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Empty(_) => seen_element = true,
            _ => {}
        }
        writer.write_event(event).map_err(|e| invalid(&e))?;
    }

    if !seen_element {
        return Err(invalid(&"document has no root element"));
    }
    if depth > 0 {
        return Err(invalid(&format!("{depth} unclosed element(s)")));
    }
    String::from_utf8(writer.into_inner()).map_err(|e| invalid(&e))
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is copied through untouched.
const RAW_ELEMENTS: [&str; 5] = ["pre", "code", "script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum HtmlToken<'a> {
    Open { name: String, raw: &'a str },
    Close { name: String, raw: &'a str },
    /// Doctype, comment, void or self-closing tag.
    Standalone(&'a str),
    Text(&'a str),
}

/// Reindent HTML with 2 spaces per nesting level.
///
/// An element holding only text stays on one line. Contents of `pre`,
/// `code`, `script`, `style` and `textarea` are kept verbatim.
pub fn html(input: &str) -> Result<String> {
    let tokens = tokenize_html(input)?;
    let mut lines: Vec<String> = Vec::new();
    let mut depth = 0usize;
    let mut index = 0;

    while index < tokens.len() {
        let indent = "  ".repeat(depth);
        match &tokens[index] {
            HtmlToken::Open { name, raw } => {
                // <tag>text</tag> and <tag></tag> collapse onto one line.
                match (tokens.get(index + 1), tokens.get(index + 2)) {
                    (Some(HtmlToken::Close { name: close, raw: end }), _) if close == name => {
                        lines.push(format!("{indent}{raw}{end}"));
                        index += 2;
                        continue;
                    }
                    (
                        Some(HtmlToken::Text(text)),
                        Some(HtmlToken::Close { name: close, raw: end }),
                    ) if close == name => {
                        let text = if RAW_ELEMENTS.contains(&name.as_str()) {
                            *text
                        } else {
                            text.trim()
                        };
                        lines.push(format!("{indent}{raw}{text}{end}"));
                        index += 3;
                        continue;
                    }
                    _ => {}
                }
                lines.push(format!("{indent}{raw}"));
                depth += 1;
            }
            HtmlToken::Close { raw, .. } => {
                depth = depth.saturating_sub(1);
                lines.push(format!("{}{raw}", "  ".repeat(depth)));
            }
            HtmlToken::Standalone(raw) => lines.push(format!("{indent}{raw}")),
            HtmlToken::Text(text) => {
                for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    lines.push(format!("{indent}{line}"));
                }
            }
        }
        index += 1;
    }
    Ok(lines.join("\n"))
}

fn tokenize_html(input: &str) -> Result<Vec<HtmlToken<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let Some(start) = rest.find('<') else {
            push_text(&mut tokens, rest);
            break;
        };
        push_text(&mut tokens, &rest[..start]);
        rest = &rest[start..];

        if rest.starts_with("<!--") {
            let end = rest
                .find("-->")
                .ok_or_else(|| ToolError::validation("Invalid HTML", "unterminated comment"))?;
            tokens.push(HtmlToken::Standalone(&rest[..end + 3]));
            rest = &rest[end + 3..];
            continue;
        }

        let end = rest.find('>').ok_or_else(|| {
            ToolError::validation("Invalid HTML", format!("unterminated tag '{}'", first_line(rest)))
        })?;
        let raw = &rest[..=end];
        rest = &rest[end + 1..];

        let inner = raw[1..raw.len() - 1].trim();
        if let Some(name) = inner.strip_prefix('/') {
            tokens.push(HtmlToken::Close {
                name: tag_name(name),
                raw,
            });
            continue;
        }
        let name = tag_name(inner);
        let standalone = inner.starts_with('!') || inner.starts_with('?') || inner.ends_with('/');
        if standalone || VOID_ELEMENTS.contains(&name.as_str()) {
            tokens.push(HtmlToken::Standalone(raw));
        } else if RAW_ELEMENTS.contains(&name.as_str()) {
            tokens.push(HtmlToken::Open {
                name: name.clone(),
                raw,
            });
            let closing = format!("</{name}");
            let close_at = rest.to_ascii_lowercase().find(&closing).ok_or_else(|| {
                ToolError::validation("Invalid HTML", format!("<{name}> is never closed"))
            })?;
            if close_at > 0 {
                tokens.push(HtmlToken::Text(&rest[..close_at]));
            }
            rest = &rest[close_at..];
        } else {
            tokens.push(HtmlToken::Open { name, raw });
        }
    }
    Ok(tokens)
}

fn push_text<'a>(tokens: &mut Vec<HtmlToken<'a>>, text: &'a str) {
    if !text.trim().is_empty() {
        tokens.push(HtmlToken::Text(text));
    }
}

fn tag_name(inner: &str) -> String {
    inner
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

static SQL_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(LEFT\s+JOIN|RIGHT\s+JOIN|INNER\s+JOIN|OUTER\s+JOIN|UNION\s+ALL|GROUP\s+BY|ORDER\s+BY|SELECT|FROM|WHERE|JOIN|ON|AND|OR|HAVING|LIMIT|OFFSET|UNION|INTERSECT|EXCEPT)\b",
    )
    .expect("valid clause regex")
});

static SQL_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("valid comma regex"));

static SQL_OPEN_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*").expect("valid paren regex"));

static SQL_CLOSE_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\)").expect("valid paren regex"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClauseBreak {
    /// Keyword starts a new line.
    Line,
    /// Keyword starts an indented continuation line.
    Continuation,
    /// Set operation on its own line, separated by a blank line.
    SetOperation,
}

fn clause_break(keyword: &str) -> ClauseBreak {
    match keyword {
        "ON" | "AND" | "OR" => ClauseBreak::Continuation,
        "UNION" | "UNION ALL" | "INTERSECT" | "EXCEPT" => ClauseBreak::SetOperation,
        _ => ClauseBreak::Line,
    }
}

/// Keyword-driven SQL layout.
///
/// Main clauses start new lines and join conditions and boolean connectives
/// are indented one level. Lines inside an open parenthesis are indented by
/// the nesting depth.
pub fn sql(input: &str) -> Result<String> {
    let collapsed = WHITESPACE.replace_all(input.trim(), " ");
    let spaced = SQL_COMMA.replace_all(&collapsed, ", ");
    let spaced = SQL_OPEN_PAREN.replace_all(&spaced, "(");
    let spaced = SQL_CLOSE_PAREN.replace_all(&spaced, ")");

    // (continuation, text)
    let mut lines: Vec<(bool, String)> = Vec::new();
    let mut current = (false, String::new());
    let mut last = 0;
    for found in SQL_CLAUSE.find_iter(&spaced) {
        current.1.push_str(&spaced[last..found.start()]);
        last = found.end();
        flush_line(&mut lines, &mut current);

        let keyword = WHITESPACE
            .replace_all(found.as_str(), " ")
            .to_ascii_uppercase();
        match clause_break(&keyword) {
            ClauseBreak::Line => current = (false, keyword),
            ClauseBreak::Continuation => current = (true, keyword),
            ClauseBreak::SetOperation => {
                lines.push((false, String::new()));
                lines.push((false, keyword));
                current = (false, String::new());
            }
        }
    }
    current.1.push_str(&spaced[last..]);
    flush_line(&mut lines, &mut current);

    let mut depth: i64 = 0;
    let formatted: Vec<String> = lines
        .into_iter()
        .map(|(continuation, text)| {
            let level = depth.max(0) as usize + usize::from(continuation);
            depth += text.matches('(').count() as i64 - text.matches(')').count() as i64;
            if text.is_empty() {
                String::new()
            } else {
                format!("{}{text}", "  ".repeat(level))
            }
        })
        .collect();
    Ok(formatted.join("\n").trim().to_string())
}

fn flush_line(lines: &mut Vec<(bool, String)>, current: &mut (bool, String)) {
    let text = current.1.trim();
    if !text.is_empty() {
        lines.push((current.0, text.to_string()));
    }
    *current = (false, String::new());
}

/// Trim lines, drop empty ones, remove duplicates and sort.
pub fn line_sort(input: &str) -> Result<String> {
    let mut seen = HashSet::new();
    let mut lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && seen.insert(*line))
        .collect();
    lines.sort_unstable();
    Ok(lines.join("\n"))
}

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("valid number regex")
});

/// Parse the leading number in `input` and print its canonical form.
pub fn number(input: &str) -> Result<String> {
    let invalid = || ToolError::failed("Failed to format number", "Invalid number");
    let found = NUMBER_PREFIX
        .find(input.trim_start())
        .ok_or_else(invalid)?
        .as_str();
    let value = match found.trim_start_matches(['+', '-']) {
        "Infinity" if found.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => found.parse::<f64>().map_err(|_| invalid())?,
    };
    Ok(canonical_number(value))
}

fn canonical_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-7..1e21).contains(&magnitude) {
        // Exponent form like `1e+21`.
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_indented_with_two_spaces() {
        let formatted = json(r#"{"a":1,"b":[true,null]}"#).expect("format");
        insta::assert_snapshot!(formatted, @r#"
        {
          "a": 1,
          "b": [
            true,
            null
          ]
        }
        "#);
    }

    #[test]
    fn json_keeps_key_order() {
        let formatted = json(r#"{"z":1,"a":2}"#).expect("format");
        assert!(formatted.find("\"z\"") < formatted.find("\"a\""));
    }

    #[test]
    fn json_errors_carry_context() {
        let error = json("{nope").expect_err("invalid");
        assert!(error.to_string().starts_with("Invalid JSON: "));
        let error = json("[1, 2]").expect_err("not an object");
        assert!(error.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn xml_is_reindented() {
        let formatted = xml("<root><a x=\"1\">text</a><b/></root>").expect("format");
        insta::assert_snapshot!(formatted, @r#"
        <root>
          <a x="1">text</a>
          <b/>
        </root>
        "#);
    }

    #[test]
    fn xml_rejects_mismatched_and_unclosed_tags() {
        assert!(
            xml("<a><b></a>")
                .expect_err("mismatch")
                .to_string()
                .starts_with("Invalid XML: ")
        );
        assert!(xml("<a><b></b>").is_err());
        assert!(xml("   ").is_err());
    }

    #[test]
    fn html_nests_and_keeps_inline_text() {
        let formatted = html(
            "<!DOCTYPE html><html><head><title>Example</title></head>\
             <body><div>Hi<br><img src=\"a.png\"></div><pre> keep </pre></body></html>",
        )
        .expect("format");
        insta::assert_snapshot!(formatted, @r#"
        <!DOCTYPE html>
        <html>
          <head>
            <title>Example</title>
          </head>
          <body>
            <div>
              Hi
              <br>
              <img src="a.png">
            </div>
            <pre> keep </pre>
          </body>
        </html>
        "#);
    }

    #[test]
    fn html_keeps_raw_element_contents() {
        let formatted = html("<div><pre>  a\n   b</pre><script>if (a < b) {}</script></div>")
            .expect("format");
        assert!(formatted.contains("<pre>  a\n   b</pre>"));
        assert!(formatted.contains("<script>if (a < b) {}</script>"));
    }

    #[test]
    fn html_reports_unterminated_tags() {
        let error = html("<div class=\"x\"").expect_err("unterminated");
        assert!(error.to_string().starts_with("Invalid HTML: "));
    }

    #[test]
    fn sql_breaks_on_clauses() {
        let formatted = sql(
            "select a.id, b.name from a left join b on a.id = b.id where a.x = 1 and b.y = 2 order by a.id",
        )
        .expect("format");
        insta::assert_snapshot!(formatted, @r"
        SELECT a.id, b.name
        FROM a
        LEFT JOIN b
          ON a.id = b.id
        WHERE a.x = 1
          AND b.y = 2
        ORDER BY a.id
        ");
    }

    #[test]
    fn sql_indents_subqueries() {
        let formatted =
            sql("SELECT * FROM t WHERE id IN (SELECT id FROM u) UNION ALL SELECT 1").expect("format");
        insta::assert_snapshot!(formatted, @r"
        SELECT *
        FROM t
        WHERE id IN (
          SELECT id
          FROM u)

        UNION ALL
        SELECT 1
        ");
    }

    #[test]
    fn line_sort_trims_dedupes_and_sorts() {
        assert_eq!(line_sort(" b\na\n\nb \nc").unwrap(), "a\nb\nc");
    }

    #[test]
    fn number_uses_leading_prefix() {
        assert_eq!(number("42").unwrap(), "42");
        assert_eq!(number("  3.1400px").unwrap(), "3.14");
        assert_eq!(number("1e21").unwrap(), "1e+21");
        assert_eq!(number("-0.5").unwrap(), "-0.5");
        assert_eq!(
            number("abc").unwrap_err().to_string(),
            "Failed to format number: Invalid number"
        );
    }
}
