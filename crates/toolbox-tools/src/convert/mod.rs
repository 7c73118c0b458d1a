//! Converters between text representations.

mod case;
mod data;
mod encoding;
mod jsx;
mod time;

pub use case::{string_case, words};
pub use data::{csv_json, yaml_json};
pub(crate) use encoding::decode_base64_lenient;
pub use encoding::{backslash, base64, hex_ascii, html_entity, url};
pub use jsx::html_jsx;
pub use time::{timestamp, timestamp_at};
