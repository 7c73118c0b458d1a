//! Text analysis: character statistics, regex testing and line diffs.

use std::collections::HashMap;
use std::fmt::Write as _;

use html_escape::encode_text;
use regex::RegexBuilder;
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use toolbox_model::{Result, ToolError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StringReport {
    length: usize,
    lines: usize,
    words: usize,
    bytes: usize,
    char_stats: Vec<CharStat>,
}

#[derive(Debug, Serialize)]
struct CharStat {
    char: String,
    count: usize,
    hex: String,
    dec: u32,
    percent: String,
}

/// Length, line, word and byte counts plus the ten most frequent characters.
pub fn string_inspector(input: &str) -> Result<String> {
    let length = input.chars().count();

    // Count in first-seen order so ties keep input order after sorting.
    let mut order: Vec<char> = Vec::new();
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in input.chars() {
        let count = counts.entry(c).or_insert(0);
        if *count == 0 {
            order.push(c);
        }
        *count += 1;
    }
    let mut stats: Vec<(char, usize)> = order.into_iter().map(|c| (c, counts[&c])).collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1));

    let report = StringReport {
        length,
        lines: input.split('\n').count(),
        words: input.split_whitespace().count(),
        bytes: input.len(),
        char_stats: stats
            .into_iter()
            .take(10)
            .map(|(c, count)| CharStat {
                char: c.to_string(),
                count,
                hex: format!("{:04x}", c as u32),
                dec: c as u32,
                percent: format!("{:.2}", count as f64 * 100.0 / length as f64),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report).map_err(|e| ToolError::failed("Failed to analyze string", e))
}

/// Separator line between two parts of a multi-part input.
const SEPARATOR: &str = "---";

fn split_parts(input: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == SEPARATOR {
            return Some((&input[..offset], &input[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Test a regular expression against a string.
///
/// Input is the pattern (bare or `/pattern/flags`), a `---` line, then the
/// test string. Flags: `g` (all matches), `i`, `m`, `s`, `x`. Output is the
/// test string with matches highlighted followed by a match table.
pub fn regex(input: &str) -> Result<String> {
    let (pattern_part, subject) = split_parts(input).ok_or_else(|| {
        ToolError::validation(
            "Invalid input",
            "Please enter a pattern and a test string separated by a --- line",
        )
    })?;
    let pattern_part = pattern_part.trim();
    let subject = subject.trim_end_matches(['\r', '\n']);
    if pattern_part.is_empty() || subject.is_empty() {
        return Err(ToolError::validation(
            "Invalid input",
            "Please enter both a pattern and a test string",
        ));
    }

    let (pattern, flags) = match pattern_part.strip_prefix('/').and_then(|p| p.rsplit_once('/')) {
        Some((pattern, flags)) => (pattern, flags),
        None => (pattern_part, "g"),
    };

    let mut builder = RegexBuilder::new(pattern);
    let mut global = false;
    for flag in flags.chars() {
        match flag {
            'g' => global = true,
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            other => {
                return Err(ToolError::validation(
                    "Invalid regular expression",
                    format!("unknown flag '{other}'"),
                ));
            }
        }
    }
    let regex = builder
        .build()
        .map_err(|e| ToolError::validation("Invalid regular expression", e))?;

    let limit = if global { usize::MAX } else { 1 };
    let matches: Vec<regex::Captures<'_>> = regex
        .captures_iter(subject)
        .filter(|caps| caps.get(0).is_some_and(|m| !m.is_empty()))
        .take(limit)
        .collect();

    let mut highlighted = String::new();
    let mut last = 0;
    for caps in &matches {
        let Some(whole) = caps.get(0) else { continue };
        highlighted.push_str(&encode_text(&subject[last..whole.start()]));
        let _ = write!(
            highlighted,
            "<span class=\"regex-match\">{}</span>",
            encode_text(whole.as_str())
        );
        last = whole.end();
    }
    highlighted.push_str(&encode_text(&subject[last..]));

    let mut html = format!(
        "<div class=\"regex-result\"><pre class=\"regex-highlight\">{highlighted}</pre>\
         <div class=\"regex-summary\">{} match(es)</div>",
        matches.len()
    );
    if !matches.is_empty() {
        html.push_str("<table class=\"regex-matches\"><tr><th>#</th><th>Match</th><th>Index</th><th>Groups</th></tr>");
        for (number, caps) in matches.iter().enumerate() {
            let Some(whole) = caps.get(0) else { continue };
            let groups: Vec<String> = caps
                .iter()
                .skip(1)
                .map(|group| {
                    group.map_or_else(
                        || "undefined".to_string(),
                        |g| encode_text(g.as_str()).into_owned(),
                    )
                })
                .collect();
            let _ = write!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                number + 1,
                encode_text(whole.as_str()),
                whole.start(),
                groups.join(", ")
            );
        }
        html.push_str("</table>");
    }
    html.push_str("</div>");
    Ok(html)
}

fn diff_lines(html: &mut String, class: &str, marker: char, value: &str) {
    let _ = write!(html, "<div class=\"diff-line {class}\">");
    for line in value.trim_end_matches('\n').split('\n') {
        let _ = write!(html, "<div class=\"line\">{marker} {}</div>", encode_text(line));
    }
    html.push_str("</div>");
}

/// Side-by-side line diff of `old` and `new` separated by a `---` line.
pub fn text_diff(input: &str) -> Result<String> {
    let missing = || {
        ToolError::failed(
            "Failed to generate diff",
            "Please provide both old and new text separated by ---",
        )
    };
    let (old, new) = split_parts(input).ok_or_else(missing)?;
    let (old, new) = (old.trim(), new.trim());
    if old.is_empty() || new.is_empty() {
        return Err(missing());
    }

    let diff = TextDiff::from_lines(old, new);
    let mut left = String::new();
    let mut right = String::new();
    for change in diff.iter_all_changes() {
        let value = change.value();
        match change.tag() {
            ChangeTag::Delete => diff_lines(&mut left, "removed", '-', value),
            ChangeTag::Insert => diff_lines(&mut right, "added", '+', value),
            ChangeTag::Equal => {
                diff_lines(&mut left, "unchanged", ' ', value);
                diff_lines(&mut right, "unchanged", ' ', value);
            }
        }
    }

    Ok(format!(
        "<div class=\"diff-container\">\
         <div class=\"diff-panel\"><div class=\"diff-header\">Original</div><div class=\"diff-content\">{left}</div></div>\
         <div class=\"diff-panel\"><div class=\"diff-header\">Modified</div><div class=\"diff-content\">{right}</div></div>\
         </div>"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn string_stats() {
        let output = string_inspector("hello world\nbye").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["length"], 15);
        assert_eq!(value["lines"], 2);
        assert_eq!(value["words"], 3);
        assert_eq!(value["bytes"], 15);
        let top = &value["charStats"][0];
        assert_eq!(top["char"], "l");
        assert_eq!(top["count"], 3);
        assert_eq!(top["hex"], "006c");
        assert_eq!(top["percent"], "20.00");
        assert_eq!(value["charStats"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn regex_highlights_all_matches_by_default() {
        let output = regex("\\d+\n---\na1b22<c>333").unwrap();
        assert!(output.contains(
            "a<span class=\"regex-match\">1</span>b<span class=\"regex-match\">22</span>&lt;c&gt;<span class=\"regex-match\">333</span>"
        ));
        assert!(output.contains("3 match(es)"));
    }

    #[test]
    fn regex_flags_and_groups() {
        let output = regex("/(h)(x)?/i\n---\nHah").unwrap();
        assert!(output.contains("1 match(es)"));
        assert!(output.contains("<td>H</td><td>0</td><td>H, undefined</td>"));
        assert!(regex("/a/q\n---\na").is_err());
        assert!(
            regex("(\n---\na")
                .unwrap_err()
                .to_string()
                .starts_with("Invalid regular expression: ")
        );
        assert!(regex("no separator").is_err());
    }

    #[test]
    fn diff_marks_changed_lines() {
        let output = text_diff("a\nb\nc\n---\na\nB\nc").unwrap();
        assert!(output.contains("<div class=\"diff-line removed\"><div class=\"line\">- b</div></div>"));
        assert!(output.contains("<div class=\"diff-line added\"><div class=\"line\">+ B</div></div>"));
        assert!(output.contains("<div class=\"line\">  a</div>"));
        assert_eq!(
            text_diff("only old\n---\n").unwrap_err().to_string(),
            "Failed to generate diff: Please provide both old and new text separated by ---"
        );
    }
}
