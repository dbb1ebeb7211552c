//! Factories for registries, pipelines, contexts, and command declarations
//!
//! The quick constructors here cover the setup almost every engine test
//! starts with. Command factories return a [`CommandBuilder`] so tests can
//! keep chaining before calling `build`.

use std::sync::Arc;

use banter_core::prelude::*;

use crate::handlers::{EchoHandler, FailingHandler, FixedReplyHandler, PanickingHandler};

/// A shared registry pre-loaded with the built-in converter set.
pub fn registry_with_builtins() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::with_builtins())
}

/// A shared empty registry, for converter-registration tests.
pub fn empty_registry() -> Arc<TypeRegistry> {
    Arc::new(TypeRegistry::new())
}

/// A pipeline over a fresh built-in registry with the default config.
pub fn test_pipeline() -> CommandPipeline {
    CommandPipeline::new(registry_with_builtins())
}

/// A pipeline over a fresh built-in registry with the given config.
pub fn test_pipeline_with(config: ParserConfig) -> CommandPipeline {
    CommandPipeline::new(registry_with_builtins()).with_config(config)
}

/// The default test sender and channel.
pub fn test_context() -> InvocationContext {
    InvocationContext::new("tester", "test-channel")
}

/// A context with explicit sender and channel.
pub fn context_for(sender: &str, channel: &str) -> InvocationContext {
    InvocationContext::new(sender, channel)
}

/// A zero-arg command replying with a fixed message.
pub fn reply_command(name: &str, reply: &str) -> CommandBuilder {
    CommandBuilder::new(name).with_signature(SignatureDecl::new(&[], FixedReplyHandler::arc(reply)))
}

/// A command with one repeatable `STRING...` slot that echoes its run.
pub fn echo_command(name: &str) -> CommandBuilder {
    CommandBuilder::new(name)
        .with_signature(SignatureDecl::new(&["STRING..."], Arc::new(EchoHandler)))
}

/// A zero-arg command whose handler fails with `message`.
pub fn failing_command(name: &str, message: &str) -> CommandBuilder {
    CommandBuilder::new(name).with_signature(SignatureDecl::new(&[], FailingHandler::arc(message)))
}

/// A zero-arg command whose handler panics with `message`.
pub fn panicking_command(name: &str, message: &str) -> CommandBuilder {
    CommandBuilder::new(name)
        .with_signature(SignatureDecl::new(&[], PanickingHandler::arc(message)))
}
