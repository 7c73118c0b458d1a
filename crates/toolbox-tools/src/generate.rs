//! Generators: hashes, placeholder text, random strings and UUIDs.
//!
//! Option-driven generators read their options as JSON from the editor. An
//! empty editor means "use the defaults".

use std::sync::LazyLock;

use md5::Md5;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use toolbox_model::{LoremOptions, Mode, RandomStringOptions, Result, ToolError, UuidOptions};

#[derive(Serialize)]
struct Hashes {
    md5: String,
    sha1: String,
    sha256: String,
    sha512: String,
}

/// MD5, SHA-1, SHA-256 and SHA-512 of the trimmed input, as JSON.
pub fn hash(input: &str) -> Result<String> {
    let bytes = input.trim().as_bytes();
    let hashes = Hashes {
        md5: hex::encode(Md5::digest(bytes)),
        sha1: hex::encode(Sha1::digest(bytes)),
        sha256: hex::encode(Sha256::digest(bytes)),
        sha512: hex::encode(Sha512::digest(bytes)),
    };
    serde_json::to_string_pretty(&hashes).map_err(|e| ToolError::failed("Failed to generate hashes", e))
}

fn parse_options<T: DeserializeOwned + Default>(input: &str) -> serde_json::Result<T> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(input)
}

const LOREM_WORDS: [&str; 35] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "ut", "aliquip", "ex", "ea", "commodo", "consequat",
];

fn sentence(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(5..20);
    let words: Vec<&str> = (0..count)
        .filter_map(|_| LOREM_WORDS.choose(rng).copied())
        .collect();
    let mut sentence = words.join(" ");
    if let Some(initial) = sentence.chars().next() {
        sentence.replace_range(..initial.len_utf8(), &initial.to_uppercase().to_string());
    }
    sentence.push('.');
    sentence
}

fn paragraph(rng: &mut impl Rng) -> String {
    let count = rng.gen_range(3..8);
    (0..count).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// Placeholder text. Options: `{"paragraphs": n}`.
pub fn lorem_ipsum(input: &str) -> Result<String> {
    let options: LoremOptions = parse_options(input).map_err(|_| {
        ToolError::message(r#"Invalid parameters. Expected format: {"paragraphs": number}"#)
    })?;
    let mut rng = rand::thread_rng();
    Ok((0..options.paragraphs.max(1))
        .map(|_| paragraph(&mut rng))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMBERS: &str = "0123456789";
const SPECIAL: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters drawn from for `options`; falls back to alphanumerics when no
/// class is selected.
pub fn charset(options: &RandomStringOptions) -> Vec<char> {
    let classes = [
        (options.lowercase, LOWERCASE),
        (options.uppercase, UPPERCASE),
        (options.numbers, NUMBERS),
        (options.special, SPECIAL),
    ];
    let mut chars: String = classes
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, class)| *class)
        .collect();
    if chars.is_empty() {
        chars = [LOWERCASE, UPPERCASE, NUMBERS].concat();
    }
    chars.chars().collect()
}

/// Random string. Options: `{"length", "lowercase", "uppercase", "numbers",
/// "special"}`.
pub fn random_string(input: &str) -> Result<String> {
    let options: RandomStringOptions = parse_options(input)
        .map_err(|e| ToolError::validation("Invalid options", e))?;
    let chars = charset(&options);
    let mut rng = rand::thread_rng();
    Ok((0..options.length)
        .filter_map(|_| chars.choose(&mut rng))
        .collect())
}

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("valid uuid regex")
});

/// Encode: generate `count` v4 UUIDs (options JSON or a bare number), one
/// per line. Decode: check that the input is a v4 UUID.
pub fn uuid(input: &str, mode: Mode) -> Result<String> {
    let input = input.trim();
    match mode {
        Mode::Encode => {
            let options = match input.parse::<usize>() {
                Ok(count) => UuidOptions { count },
                Err(_) => parse_options(input)
                    .map_err(|e| ToolError::validation("Invalid options", e))?,
            };
            Ok((0..options.count.max(1))
                .map(|_| uuid::Uuid::new_v4().to_string())
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Mode::Decode => {
            if UUID_V4.is_match(input) {
                Ok(format!("Valid UUID v4: {}", input.to_ascii_lowercase()))
            } else {
                Err(ToolError::validation("Invalid UUID", "expected a version 4 UUID"))
            }
        }
    }
}
