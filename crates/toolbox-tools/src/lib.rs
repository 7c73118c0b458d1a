//! Tool transforms for the developer toolbox.
//!
//! Every tool is a plain function from editor text (and, for bidirectional
//! tools, a [`Mode`](toolbox_model::Mode)) to output text:
//!
//! - **format**: JSON, XML, HTML and SQL pretty printers, line sorting, numbers
//! - **convert**: encodings (base64, URL, hex, entities, escapes), data
//!   formats (YAML, CSV), timestamps, string case and HTML to JSX
//! - **generate**: hashes, lorem ipsum, random strings, UUIDs
//! - **inspect**: JWT, URL, cron, certificate, regex, diff and previews
//! - **qr**: the async QR code tool
//! - **panels**: pure derivations behind the live panels

pub mod convert;
pub mod format;
pub mod generate;
pub mod inspect;
pub mod panels;
pub mod qr;

pub use panels::{PanelKind, PanelSection, PanelView};
