//! The transform engine.
//!
//! Every call to [`TransformEngine::invoke`] claims a new invocation token
//! before it returns. When the transform finishes, the result is only
//! reported as current if no newer invocation has started in the meantime;
//! otherwise it comes back as [`Invocation::Stale`] and the host drops it.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use toolbox_model::{Mode, Result, ToolError, TransformOutput, TransformResult};

use crate::definition::{Driver, ToolDefinition};
use crate::registry::ToolRegistry;
use crate::render::{OutputRenderer, ToolMetadata};
use crate::session::Session;

/// What an invocation resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// The newest invocation finished.
    Current(TransformResult),
    /// A newer invocation started before this one finished.
    Stale { token: u64, latest: u64 },
}

impl Invocation {
    pub fn is_stale(&self) -> bool {
        matches!(self, Invocation::Stale { .. })
    }

    /// The result, if it is still current.
    pub fn into_result(self) -> Option<TransformResult> {
        match self {
            Invocation::Current(result) => Some(result),
            Invocation::Stale { .. } => None,
        }
    }
}

/// Outcome of a mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeRefresh {
    pub metadata: ToolMetadata,
    /// New editor content when the old content was empty or still the
    /// previous mode's placeholder. `None` keeps what the user typed.
    pub content: Option<String>,
}

/// Dispatches tool invocations for one session.
#[derive(Debug)]
pub struct TransformEngine {
    registry: Arc<ToolRegistry>,
    session: Session,
}

impl TransformEngine {
    /// Start a session on `tool_id`.
    ///
    /// # Panics
    ///
    /// Panics if `tool_id` is not registered.
    pub fn new(registry: Arc<ToolRegistry>, tool_id: &str) -> Self {
        let id = registry.get(tool_id).id;
        Self {
            registry,
            session: Session::new(id),
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_tool(&self) -> &ToolDefinition {
        self.registry.get(self.session.current_tool())
    }

    pub fn metadata(&self) -> ToolMetadata {
        ToolMetadata::of(self.current_tool(), self.session.mode())
    }

    /// Run `tool_id` on `input` in `mode`.
    ///
    /// The token is claimed and sync transforms run before this returns;
    /// async transforms run when the returned future is polled. The future
    /// does not borrow the engine.
    ///
    /// # Panics
    ///
    /// Panics if `tool_id` is not registered.
    pub fn invoke(
        &self,
        tool_id: &str,
        input: impl Into<String>,
        mode: Mode,
    ) -> impl Future<Output = Invocation> + Send + 'static {
        let tool = self.registry.get(tool_id);
        let token = self.session.next_token();
        let latest = self.session.token_handle();
        let id = tool.id;
        let kind = tool.output_kind;
        let input = input.into();
        tracing::debug!(tool = id, token, %mode, "invoke");

        let pending: BoxFuture<'static, Result<String>> = match &tool.driver {
            Driver::Sync(transform) => future::ready(transform(&input, mode)).boxed(),
            Driver::Async(transform) => transform(input, mode),
            Driver::Panel(_) => future::ready(Err(ToolError::message(format!(
                "{id} is driven by a live panel"
            ))))
            .boxed(),
        };

        async move {
            let outcome = pending.await;
            let newest = latest.load(Ordering::SeqCst);
            if newest != token {
                tracing::debug!(tool = id, token, latest = newest, "discarding stale result");
                return Invocation::Stale {
                    token,
                    latest: newest,
                };
            }
            match outcome {
                Ok(content) => Invocation::Current(Ok(TransformOutput::new(content, kind))),
                Err(error) => {
                    tracing::warn!(tool = id, kind = ?error.kind(), "{error}");
                    Invocation::Current(Err(error.into()))
                }
            }
        }
    }

    /// Run the current tool in the current mode.
    pub fn invoke_current(
        &self,
        input: impl Into<String>,
    ) -> impl Future<Output = Invocation> + Send + 'static {
        self.invoke(self.session.current_tool(), input, self.session.mode())
    }

    /// Forward a current result to `renderer`. Returns `false` for stale
    /// results, which are dropped.
    pub fn render(&self, invocation: Invocation, renderer: &mut dyn OutputRenderer) -> bool {
        match invocation {
            Invocation::Current(Ok(output)) => {
                renderer.render_output(&output);
                true
            }
            Invocation::Current(Err(error)) => {
                renderer.render_error(&error);
                true
            }
            Invocation::Stale { token, latest } => {
                tracing::trace!(token, latest, "stale result not rendered");
                false
            }
        }
    }

    /// Switch the session to `mode`.
    ///
    /// Does not invoke the tool. `editor_content` is replaced by the new
    /// placeholder only when it is empty or still exactly the previous
    /// mode's placeholder.
    pub fn set_mode(
        &mut self,
        mode: Mode,
        editor_content: &str,
        renderer: &mut dyn OutputRenderer,
    ) -> ModeRefresh {
        let tool = self.registry.get(self.session.current_tool());
        let previous = tool.placeholder(self.session.mode());
        self.session.set_mode(mode);

        let metadata = ToolMetadata::of(tool, mode);
        let untouched = editor_content.trim().is_empty() || editor_content == previous;
        let content = untouched.then(|| metadata.placeholder.to_string());
        tracing::debug!(tool = tool.id, %mode, replaced = untouched, "mode changed");
        renderer.refresh_metadata(&metadata);
        ModeRefresh { metadata, content }
    }

    /// Make `tool_id` the current tool and refresh the renderer.
    ///
    /// # Panics
    ///
    /// Panics if `tool_id` is not registered.
    pub fn select_tool(&mut self, tool_id: &str, renderer: &mut dyn OutputRenderer) -> ToolMetadata {
        let tool = self.registry.get(tool_id);
        self.session.set_tool(tool.id);
        let metadata = ToolMetadata::of(tool, self.session.mode());
        tracing::debug!(tool = tool.id, "tool selected");
        renderer.refresh_metadata(&metadata);
        metadata
    }
}
