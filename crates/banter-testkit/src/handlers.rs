//! Canned handlers with predictable behavior
//!
//! Each fixture implements [`CommandHandler`] with a behavior stated in its
//! name, so scenario tests read as intent rather than setup.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use banter_core::prelude::*;

/// Ignores its (zero) arguments and replies with a fixed message.
pub struct FixedReplyHandler {
    reply: String,
}

impl FixedReplyHandler {
    /// A boxed zero-arity handler replying with `reply`.
    pub fn arc(reply: impl Into<String>) -> Arc<dyn CommandHandler> {
        Arc::new(Self {
            reply: reply.into(),
        })
    }
}

#[async_trait]
impl CommandHandler for FixedReplyHandler {
    fn arity(&self) -> usize {
        0
    }

    async fn run(&self, _invocation: Invocation) -> Result<Option<String>, HandlerError> {
        Ok(Some(self.reply.clone()))
    }
}

/// Echoes a repeatable text run back, space-joined.
///
/// Pair with a single `"STRING..."` slot.
pub struct EchoHandler;

#[async_trait]
impl CommandHandler for EchoHandler {
    fn arity(&self) -> usize {
        1
    }

    async fn run(&self, invocation: Invocation) -> Result<Option<String>, HandlerError> {
        let words: Vec<&str> = invocation
            .args
            .values(0)
            .unwrap_or_default()
            .iter()
            .filter_map(CommandValue::as_text)
            .collect();
        Ok(Some(words.join(" ")))
    }
}

/// Always fails with the given message. Zero arity.
pub struct FailingHandler {
    message: String,
}

impl FailingHandler {
    /// A boxed handler failing with `message`.
    pub fn arc(message: impl Into<String>) -> Arc<dyn CommandHandler> {
        Arc::new(Self {
            message: message.into(),
        })
    }
}

#[async_trait]
impl CommandHandler for FailingHandler {
    fn arity(&self) -> usize {
        0
    }

    async fn run(&self, _invocation: Invocation) -> Result<Option<String>, HandlerError> {
        Err(HandlerError::from(self.message.clone()))
    }
}

/// Always panics with the given message. Zero arity.
pub struct PanickingHandler {
    message: String,
}

impl PanickingHandler {
    /// A boxed handler panicking with `message`.
    pub fn arc(message: impl Into<String>) -> Arc<dyn CommandHandler> {
        Arc::new(Self {
            message: message.into(),
        })
    }
}

#[async_trait]
impl CommandHandler for PanickingHandler {
    fn arity(&self) -> usize {
        0
    }

    async fn run(&self, _invocation: Invocation) -> Result<Option<String>, HandlerError> {
        panic!("{}", self.message);
    }
}

/// Records every invocation it receives for later inspection.
///
/// Keep a concrete `Arc<RecordingHandler>` to read the record; a clone of it
/// coerces to `Arc<dyn CommandHandler>` for the signature declaration.
pub struct RecordingHandler {
    arity: usize,
    seen: Mutex<Vec<Invocation>>,
}

impl RecordingHandler {
    /// A recorder declaring the given arity.
    pub fn arc(arity: usize) -> Arc<Self> {
        Arc::new(Self {
            arity,
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Snapshot of the invocations received so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.seen.lock().clone()
    }

    /// Number of invocations received so far.
    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }
}

#[async_trait]
impl CommandHandler for RecordingHandler {
    fn arity(&self) -> usize {
        self.arity
    }

    async fn run(&self, invocation: Invocation) -> Result<Option<String>, HandlerError> {
        self.seen.lock().push(invocation);
        Ok(None)
    }
}
