//! Tool registry and transform engine for the developer toolbox.
//!
//! - **registry**: the validated, immutable set of [`ToolDefinition`]s
//! - **engine**: invocation dispatch with stale-result suppression and the
//!   mode toggle
//! - **panel**: [`ReactivePanel`]s for tools that bypass the editor
//! - **render**: the [`OutputRenderer`] collaborator
//!
//! ```ignore
//! let registry = Arc::new(ToolRegistry::builtin()?);
//! let engine = TransformEngine::new(registry, "json");
//! let invocation = engine.invoke("json", r#"{"a":1}"#, Mode::Encode).await;
//! engine.render(invocation, &mut renderer);
//! ```

pub mod catalog;
pub mod definition;
pub mod engine;
pub mod error;
pub mod panel;
pub mod registry;
pub mod render;
pub mod session;

pub use definition::{AsyncTransform, Driver, SyncTransform, ToolDefinition};
pub use engine::{Invocation, ModeRefresh, TransformEngine};
pub use error::RegistryError;
pub use panel::{PanelState, ReactivePanel};
pub use registry::ToolRegistry;
pub use render::{BufferRenderer, OutputRenderer, ToolMetadata};
pub use session::Session;
