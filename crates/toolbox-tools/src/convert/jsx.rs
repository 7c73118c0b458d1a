//! HTML to JSX conversion.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use toolbox_model::{Result, ToolError};

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("valid comment regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-zA-Z][\w:-]*)((?:\s+[^\s=/>]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+))?)*)\s*(/?)>"#)
        .expect("valid tag regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+)))?"#)
        .expect("valid attribute regex")
});

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

fn jsx_attribute_name(name: &str) -> String {
    let renamed = match name.to_ascii_lowercase().as_str() {
        "class" => "className",
        "for" => "htmlFor",
        "tabindex" => "tabIndex",
        "readonly" => "readOnly",
        "maxlength" => "maxLength",
        "minlength" => "minLength",
        "colspan" => "colSpan",
        "rowspan" => "rowSpan",
        "cellpadding" => "cellPadding",
        "cellspacing" => "cellSpacing",
        "contenteditable" => "contentEditable",
        "crossorigin" => "crossOrigin",
        "autocomplete" => "autoComplete",
        "autofocus" => "autoFocus",
        "enctype" => "encType",
        "srcset" => "srcSet",
        "usemap" => "useMap",
        "frameborder" => "frameBorder",
        "accept-charset" => "acceptCharset",
        "http-equiv" => "httpEquiv",
        lower if lower.starts_with("on") && lower.len() > 2 => {
            let (prefix, event) = lower.split_at(2);
            let mut chars = event.chars();
            return match chars.next() {
                Some(first) => format!("{prefix}{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => lower.to_string(),
            };
        }
        _ => return name.to_string(),
    };
    renamed.to_string()
}

/// `font-size: 12px; color: red` → `{{ fontSize: "12px", color: "red" }}`.
fn style_object(style: &str) -> String {
    let entries: Vec<String> = style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .map(|(property, value)| {
            let property = property.trim();
            let key = if property.starts_with("--") {
                format!("\"{property}\"")
            } else {
                camel_property(property)
            };
            format!("{key}: \"{}\"", value.trim().replace('"', "\\\""))
        })
        .collect();
    format!("{{{{ {} }}}}", entries.join(", "))
}

fn camel_property(property: &str) -> String {
    let mut result = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.trim_start_matches('-').chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            result.extend(c.to_uppercase());
            upper = false;
        } else {
            result.push(c);
        }
    }
    result
}

fn convert_tag(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    let attributes = caps.get(2).map_or("", |m| m.as_str());
    let self_closing = !caps[3].is_empty() || VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str());

    let mut tag = format!("<{name}");
    for attribute in ATTRIBUTE.captures_iter(attributes) {
        let jsx_name = jsx_attribute_name(&attribute[1]);
        let value = attribute
            .get(2)
            .or_else(|| attribute.get(3))
            .or_else(|| attribute.get(4))
            .map(|m| m.as_str());
        // Writing to a String never fails.
        let _ = match value {
            Some(style) if jsx_name == "style" => write!(tag, " style={}", style_object(style)),
            Some(value) => write!(tag, " {jsx_name}=\"{}\"", value.replace('"', "&quot;")),
            None => write!(tag, " {jsx_name}"),
        };
    }
    tag.push_str(if self_closing { " />" } else { ">" });
    tag
}

/// Convert an HTML fragment to JSX.
///
/// Renames attributes (`class`, `for`, event handlers, ...), closes void
/// elements, turns inline styles into objects and comments into JSX
/// comments.
pub fn html_jsx(input: &str) -> Result<String> {
    if input.trim().is_empty() {
        return Err(ToolError::failed("Failed to convert HTML to JSX", "input is empty"));
    }
    let commented = COMMENT.replace_all(input, |caps: &Captures<'_>| {
        format!("{{/*{}*/}}", &caps[1])
    });
    Ok(TAG.replace_all(&commented, convert_tag).into_owned())
}
