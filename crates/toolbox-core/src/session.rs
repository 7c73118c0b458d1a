//! Per-window session state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use toolbox_model::Mode;

/// Current tool, current mode and the invocation token of one window.
///
/// Only the engine mutates a session. Pending invocations hold a clone of
/// the token counter and only ever read it.
#[derive(Debug)]
pub struct Session {
    current_tool: &'static str,
    mode: Mode,
    token: Arc<AtomicU64>,
}

impl Session {
    pub fn new(tool_id: &'static str) -> Self {
        Self {
            current_tool: tool_id,
            mode: Mode::Encode,
            token: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn current_tool(&self) -> &'static str {
        self.current_tool
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Token of the most recent invocation (0 before the first).
    pub fn latest_token(&self) -> u64 {
        self.token.load(Ordering::SeqCst)
    }

    pub(crate) fn set_tool(&mut self, tool_id: &'static str) {
        self.current_tool = tool_id;
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Claim the next token.
    pub(crate) fn next_token(&self) -> u64 {
        self.token.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn token_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_monotonically() {
        let session = Session::new("json");
        assert_eq!(session.latest_token(), 0);
        assert_eq!(session.next_token(), 1);
        assert_eq!(session.next_token(), 2);
        assert_eq!(session.latest_token(), 2);
        assert_eq!(session.token_handle().load(Ordering::SeqCst), 2);
    }

    #[test]
    fn sessions_do_not_share_tokens() {
        let first = Session::new("json");
        let second = Session::new("json");
        first.next_token();
        assert_eq!(second.latest_token(), 0);
        assert_eq!(first.mode(), Mode::Encode);
    }
}
