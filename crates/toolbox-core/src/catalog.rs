//! The built-in tool catalog.

use std::sync::Arc;

use futures_util::FutureExt;
use toolbox_model::{Category, Mode, OutputKind};
use toolbox_tools::panels::color::DEFAULT_COLOR;
use toolbox_tools::{PanelKind, convert, format, generate, inspect, qr};

use crate::definition::ToolDefinition;

/// Every tool shipped with the toolbox, in sidebar order.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    let mut tools = formatters();
    tools.extend(converters());
    tools.extend(generators());
    tools.extend(inspectors());
    tools
}

fn formatters() -> Vec<ToolDefinition> {
    use Category::Formatter;
    vec![
        ToolDefinition::sync("json", "JSON Formatter", Formatter, |input, _| format::json(input))
            .with_action("Format JSON")
            .with_language("json")
            .with_placeholder("{\n  \"example\": \"Paste your JSON here\"\n}"),
        ToolDefinition::sync("xml", "XML Formatter", Formatter, |input, _| format::xml(input))
            .with_action("Format XML")
            .with_language("xml")
            .with_placeholder(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<root>\n  <example>Paste your XML here</example>\n</root>",
            ),
        ToolDefinition::sync("html", "HTML Formatter", Formatter, |input, _| format::html(input))
            .with_action("Format HTML")
            .with_language("html")
            .with_placeholder(
                "<!DOCTYPE html>\n<html>\n<head>\n  <title>Example</title>\n</head>\n<body>\n  <div>Paste your HTML here</div>\n</body>\n</html>",
            ),
        ToolDefinition::sync("sql", "SQL Formatter", Formatter, |input, _| format::sql(input))
            .with_action("Format SQL")
            .with_language("sql")
            .with_placeholder("SELECT column1, column2\nFROM table\nWHERE condition;"),
        ToolDefinition::sync("line-sort", "Line Sort & Dedupe", Formatter, |input, _| {
            format::line_sort(input)
        })
        .with_action("Sort & Dedupe")
        .with_placeholder("Enter lines to sort and remove duplicates"),
        ToolDefinition::sync("number", "Number Formatter", Formatter, |input, _| {
            format::number(input)
        })
        .with_action("Format Number")
        .with_placeholder("Enter a number"),
    ]
}

fn converters() -> Vec<ToolDefinition> {
    use Category::Converter;
    vec![
        ToolDefinition::sync("base64", "Base64 Encode/Decode", Converter, convert::base64)
            .with_modes("Encode", "Decode")
            .with_action("Convert")
            .with_placeholders("Enter text to encode as Base64", "Enter Base64 string to decode"),
        ToolDefinition::sync("url", "URL Encode/Decode", Converter, convert::url)
            .with_modes("Encode", "Decode")
            .with_action("Convert")
            .with_placeholders("Enter text to URL encode", "Enter URL encoded string to decode"),
        ToolDefinition::sync("yaml-json", "YAML ⇄ JSON", Converter, convert::yaml_json)
            .with_modes("YAML → JSON", "JSON → YAML")
            .with_action("Convert")
            .with_languages("yaml", "json")
            .with_placeholders(
                "name: John\nage: 30\nhobbies:\n  - reading\n  - coding",
                "{\n  \"name\": \"John\",\n  \"age\": 30,\n  \"hobbies\": [\"reading\", \"coding\"]\n}",
            ),
        ToolDefinition::sync("csv-json", "CSV ⇄ JSON", Converter, convert::csv_json)
            .with_modes("CSV → JSON", "JSON → CSV")
            .with_action("Convert")
            .with_languages("plaintext", "json")
            .with_placeholders(
                "name,age\nJohn,30\nJane,25",
                "[\n  {\"name\": \"John\", \"age\": 30},\n  {\"name\": \"Jane\", \"age\": 25}\n]",
            ),
        ToolDefinition::sync("hex-ascii", "Hex ⇄ ASCII", Converter, convert::hex_ascii)
            .with_modes("ASCII → HEX", "HEX → ASCII")
            .with_action("Convert")
            .with_placeholders(
                "Enter ASCII text to convert to hex",
                "Enter hex string to convert to ASCII",
            ),
        ToolDefinition::sync("html-entity", "HTML Entities", Converter, convert::html_entity)
            .with_modes("Text → HTML Entities", "HTML Entities → Text")
            .with_action("Convert")
            .with_placeholders("Enter text to encode HTML entities", "Enter HTML entities to decode"),
        ToolDefinition::sync("backslash", "Backslash Escape", Converter, convert::backslash)
            .with_modes("Escape", "Unescape")
            .with_action("Convert")
            .with_placeholders("Enter text to escape backslashes", "Enter escaped text to unescape"),
        ToolDefinition::sync("timestamp", "Timestamp Converter", Converter, |input, _| {
            convert::timestamp(input)
        })
        .with_action("Convert")
        .with_placeholder(
            "Enter a UNIX timestamp (e.g., 1640995200)\nor a date string (e.g., \"2022-01-01\" or \"now\")",
        ),
        ToolDefinition::sync("string-case", "String Case", Converter, |input, _| {
            convert::string_case(input)
        })
        .with_action("Convert Cases")
        .with_language("json")
        .with_placeholder("Enter text to convert to different cases"),
        ToolDefinition::sync("html-jsx", "HTML to JSX", Converter, |input, _| {
            convert::html_jsx(input)
        })
        .with_action("Convert to JSX")
        .with_language("html")
        .with_placeholder(
            "<div class=\"example\">\n  <h1>Hello World</h1>\n  <p>Enter your HTML here</p>\n</div>",
        ),
        ToolDefinition::asynchronous(
            "qrcode",
            "QR Code",
            Converter,
            Arc::new(|input: String, mode: Mode| qr::qrcode(input, mode).boxed()),
        )
        .with_modes("Text → QR Code", "QR Code → Text")
        .with_action("Convert")
        .with_output(OutputKind::CustomHtml)
        .with_placeholders(
            "Enter text to generate QR code",
            "Select or drag & drop a QR code image",
        ),
        ToolDefinition::panel("base64-image", "Base64 Image", Converter, PanelKind::Base64Image)
            .with_modes("Image → Base64", "Base64 → Image")
            .with_action("Convert")
            .with_placeholders(
                "Select or drag & drop an image file",
                "Paste a base64 image data URL",
            ),
        ToolDefinition::panel("number-base", "Number Base", Converter, PanelKind::NumberBase)
            .with_action("Convert")
            .with_placeholder("Enter a number (e.g., 255, 0xff, 0b1010)"),
    ]
}

fn generators() -> Vec<ToolDefinition> {
    use Category::Generator;
    vec![
        ToolDefinition::sync("hash", "Hash Generator", Generator, |input, _| {
            generate::hash(input)
        })
        .with_action("Generate Hashes")
        .with_placeholder("Enter text to generate hashes"),
        ToolDefinition::sync("lorem-ipsum", "Lorem Ipsum", Generator, |input, _| {
            generate::lorem_ipsum(input)
        })
        .with_action("Generate")
        .with_language("json")
        .with_placeholder("{\n  \"paragraphs\": 3\n}"),
        ToolDefinition::sync("random-string", "Random String", Generator, |input, _| {
            generate::random_string(input)
        })
        .with_action("Generate")
        .with_language("json")
        .with_placeholder(
            "{\n  \"length\": 32,\n  \"lowercase\": true,\n  \"uppercase\": true,\n  \"numbers\": true,\n  \"special\": false\n}",
        ),
        ToolDefinition::sync("uuid", "UUID Generator", Generator, generate::uuid)
            .with_modes("Generate", "Validate")
            .with_action("Run")
            .with_languages("json", "plaintext")
            .with_placeholders("{\n  \"count\": 1\n}", "Enter a UUID to validate"),
    ]
}

fn inspectors() -> Vec<ToolDefinition> {
    use Category::Inspector;
    vec![
        ToolDefinition::sync("jwt", "JWT Decoder", Inspector, |input, _| inspect::jwt(input))
            .with_action("Decode JWT")
            .with_language("json")
            .with_placeholder("Paste your JWT token here"),
        ToolDefinition::sync("url-parser", "URL Parser", Inspector, |input, _| {
            inspect::url_parser(input)
        })
        .with_action("Parse URL")
        .with_placeholder("Enter a URL to parse (e.g., https://example.com/path?param=value)"),
        ToolDefinition::sync("string-inspector", "String Inspector", Inspector, |input, _| {
            inspect::string_inspector(input)
        })
        .with_action("Analyze")
        .with_placeholder("Enter text to analyze its properties"),
        ToolDefinition::sync("cron", "Cron Parser", Inspector, |input, _| inspect::cron(input))
            .with_action("Parse Cron")
            .with_placeholder("Enter cron expression (e.g., */5 * * * *)"),
        ToolDefinition::sync("certificate", "Certificate Decoder", Inspector, |input, _| {
            inspect::certificate(input)
        })
        .with_action("Decode Certificate")
        .with_placeholder(
            "-----BEGIN CERTIFICATE-----\nPaste your X.509 certificate here\n-----END CERTIFICATE-----",
        ),
        ToolDefinition::sync("regex", "Regex Tester", Inspector, |input, _| inspect::regex(input))
            .with_action("Test Regex")
            .with_output(OutputKind::CustomHtml)
            .with_placeholder("Enter a pattern and a test string"),
        ToolDefinition::sync("text-diff", "Text Diff", Inspector, |input, _| {
            inspect::text_diff(input)
        })
        .with_action("Compare")
        .with_output(OutputKind::CustomHtml)
        .with_placeholder("Enter old text here\n---\nEnter new text here"),
        ToolDefinition::sync("html-preview", "HTML Preview", Inspector, |input, _| {
            inspect::html_preview(input)
        })
        .with_action("Preview")
        .with_language("html")
        .with_output(OutputKind::CustomHtml)
        .with_placeholder("<h1>Hello World</h1>\n<p>Enter your HTML here to preview</p>"),
        ToolDefinition::sync("markdown-preview", "Markdown Preview", Inspector, |input, _| {
            inspect::markdown_preview(input)
        })
        .with_action("Preview")
        .with_language("markdown")
        .with_output(OutputKind::CustomHtml)
        .with_placeholder("# Hello World\n\nEnter your **Markdown** here.\n\n- List item 1\n- List item 2"),
        ToolDefinition::panel("color", "Color Converter", Inspector, PanelKind::Color)
            .with_action("Convert")
            .with_placeholder(DEFAULT_COLOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        let tools = builtin_tools();
        let mut ids: Vec<&str> = tools.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tools.len());
    }

    #[test]
    fn sync_adapters_reach_the_tools() {
        let tools = builtin_tools();
        let run = |id: &str, input: &str, mode: Mode| {
            let tool = tools.iter().find(|t| t.id == id).unwrap();
            match &tool.driver {
                crate::Driver::Sync(transform) => transform(input, mode),
                other => panic!("{id} is {other:?}"),
            }
        };
        assert_eq!(run("base64", "hi", Mode::Encode).unwrap(), "aGk=");
        assert_eq!(run("base64", "aGk=", Mode::Decode).unwrap(), "hi");
        assert_eq!(run("line-sort", "b\na\nb", Mode::Decode).unwrap(), "a\nb");
        assert!(run("json", "[", Mode::Encode).is_err());
    }
}
