//! Identifier case conversion.

use serde::Serialize;
use toolbox_model::{Result, ToolError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Cases {
    camel_case: String,
    pascal_case: String,
    snake_case: String,
    kebab_case: String,
    constant_case: String,
}

/// Split into words on separators and lower-to-upper boundaries.
///
/// `parseHTTPResponse_code` → `parse`, `HTTP`, `Response`, `code`.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(previous) = current.chars().last() {
            let next = chars.get(index + 1).copied();
            let lower_to_upper = previous.is_lowercase() && c.is_uppercase();
            let acronym_end = previous.is_uppercase()
                && c.is_uppercase()
                && next.is_some_and(char::is_lowercase);
            let digit_boundary = previous.is_ascii_digit() != c.is_ascii_digit();
            if lower_to_upper || acronym_end || digit_boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Render `input` in camel, pascal, snake, kebab and constant case as JSON.
pub fn string_case(input: &str) -> Result<String> {
    let words = words(input);
    let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let pascal: String = words.iter().map(|w| capitalize(w)).collect();
    let camel = match lower.first() {
        Some(first) => {
            let rest: String = words.iter().skip(1).map(|w| capitalize(w)).collect();
            format!("{first}{rest}")
        }
        None => String::new(),
    };

    let cases = Cases {
        camel_case: camel,
        pascal_case: pascal,
        snake_case: lower.join("_"),
        kebab_case: lower.join("-"),
        constant_case: lower.join("_").to_uppercase(),
    };
    serde_json::to_string_pretty(&cases).map_err(|e| ToolError::failed("Failed to convert case", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_case_and_separators() {
        assert_eq!(
            words("parseHTTPResponse_code v2"),
            ["parse", "HTTP", "Response", "code", "v", "2"]
        );
        assert!(words(" -_ ").is_empty());
    }

    #[test]
    fn every_case_is_rendered() {
        let output = string_case("hello world-example").unwrap();
        insta::assert_snapshot!(output, @r#"
        {
          "camelCase": "helloWorldExample",
          "pascalCase": "HelloWorldExample",
          "snakeCase": "hello_world_example",
          "kebabCase": "hello-world-example",
          "constantCase": "HELLO_WORLD_EXAMPLE"
        }
        "#);
    }
}
