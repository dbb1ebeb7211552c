//! Invocation pipeline - parse, resolve, map, invoke
//!
//! [`CommandPipeline::resolve`] is the single entry point the dispatch layer
//! calls once per inbound command message. It runs the stages in order: split
//! the raw tail into options and positional tokens, select the first
//! signature that consumes the tokens, hand the converted arguments to the
//! bound handler, and tag the result.
//!
//! Handler failure is kept apart from resolution failure: an `Err` return or
//! a panic inside the handler surfaces as [`ResolutionError::Execution`]
//! wrapping the cause, never as `NoSignatureMatched`.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, warn};

use crate::command::CommandDescriptor;
use crate::config::ParserConfig;
use crate::context::{Invocation, InvocationContext};
use crate::error::{HandlerError, ResolutionError};
use crate::options;
use crate::registry::TypeRegistry;

/// The result of a successfully executed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Canonical name of the executed command.
    pub command: String,
    /// Rendered shape of the signature that matched.
    pub shape: String,
    /// The handler's optional message back to the channel.
    pub reply: Option<String>,
}

/// Orchestrates option parsing, signature resolution, argument mapping, and
/// handler invocation.
///
/// The pipeline is cheap to clone and safe to share across concurrent
/// dispatch tasks; per-invocation state lives on the stack of `resolve`.
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    registry: Arc<TypeRegistry>,
    config: ParserConfig,
}

impl CommandPipeline {
    /// A pipeline over `registry` with the default [`ParserConfig`].
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self {
            registry,
            config: ParserConfig::default(),
        }
    }

    /// Replace the parser configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The shared type registry.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// The active parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Resolve and execute one invocation of `descriptor`.
    ///
    /// `raw_tail` is the message text after the command word, exactly as the
    /// dispatch layer received it. Alias lookup has already happened; the
    /// descriptor is the command to run.
    pub async fn resolve(
        &self,
        descriptor: &CommandDescriptor,
        context: &InvocationContext,
        raw_tail: &str,
    ) -> Result<ExecutionOutcome, ResolutionError> {
        let command = descriptor.name();
        let parsed = options::parse(command, raw_tail, descriptor.options(), &self.config)?;

        let Some((signature, args)) = descriptor.resolve_signature(&self.registry, &parsed.positionals)
        else {
            debug!(
                command,
                tokens = parsed.positionals.len(),
                "no signature matched"
            );
            return Err(ResolutionError::no_signature_matched(
                command,
                parsed.positionals,
            ));
        };

        let shape = signature.shape();
        debug!(command, shape = %shape, "signature resolved");

        let invocation = Invocation {
            context: context.clone(),
            command: command.to_string(),
            raw_tail: raw_tail.to_string(),
            options: parsed.options,
            tokens: parsed.positionals,
            args,
            shape: shape.clone(),
        };

        // Nothing the handler can reach is left inconsistent by an unwind:
        // the registry and descriptor are read-only here and the invocation
        // is owned by the handler.
        let handler = Arc::clone(signature.handler());
        let run = AssertUnwindSafe(handler.run(invocation)).catch_unwind().await;

        match run {
            Ok(Ok(reply)) => Ok(ExecutionOutcome {
                command: command.to_string(),
                shape,
                reply,
            }),
            Ok(Err(source)) => {
                warn!(command, error = %source, "handler failed");
                Err(ResolutionError::execution(command, source))
            }
            Err(payload) => {
                let source = describe_panic(payload.as_ref());
                warn!(command, error = %source, "handler panicked");
                Err(ResolutionError::execution(command, source))
            }
        }
    }
}

fn describe_panic(payload: &(dyn Any + Send)) -> HandlerError {
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {text}")
    } else if let Some(text) = payload.downcast_ref::<String>() {
        format!("handler panicked: {text}")
    } else {
        "handler panicked".to_string()
    };
    HandlerError::from(message)
}
