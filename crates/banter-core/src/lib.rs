//! Banter Core - command resolution and argument mapping for chat bots
//!
//! This crate turns the free-form tail of a chat command into a typed handler
//! call. Data flows one direction:
//!
//! ```text
//! raw text -> options + positional tokens -> matched signature
//!          -> typed argument list -> handler call -> tagged outcome
//! ```
//!
//! # Components
//!
//! - [`TypeRegistry`]: symbolic type names ("STRING", "USER") bound to
//!   [`Converter`]s that test and transform raw tokens. Extensible at load
//!   time; the only shared mutable state in the engine.
//! - [`options`]: shell-like tokenization plus option extraction against a
//!   per-command allow-list.
//! - [`Signature`]: an ordered list of typed argument slots bound to a
//!   [`CommandHandler`]; decides whether a token sequence fits and converts
//!   it.
//! - [`CommandDescriptor`]: a command's aliases, allowed options, and its
//!   signatures in declaration order. Resolution is first-match-wins over
//!   that order.
//! - [`CommandPipeline`]: the per-message entry point running parse, resolve,
//!   map, and invoke, with handler failure isolated from resolution failure.
//! - [`CommandCatalog`]: load-phase installation where one bad declaration is
//!   recorded and skipped instead of aborting the load.
//!
//! The gateway connection, alias lookup and its case rules, access control,
//! and user-facing message formatting all live in the embedding application.
//!
//! # Example
//!
//! ```
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//!
//! use banter_core::prelude::*;
//!
//! let registry = Arc::new(TypeRegistry::with_builtins());
//! let pipeline = CommandPipeline::new(Arc::clone(&registry));
//!
//! let ban = CommandBuilder::new("ban")
//!     .with_option(OptionSpec::flag("FORCE"))
//!     .with_signature(SignatureDecl::new(
//!         &["USER", "STRING..."],
//!         handler_fn(2, |invocation: Invocation| async move {
//!             let user = invocation.args.value(0).and_then(CommandValue::as_user);
//!             Ok(user.map(|user| format!("banned {user}")))
//!         }),
//!     ))
//!     .build(&registry)?;
//!
//! let context = InvocationContext::new("moderator", "ops");
//! let outcome = pipeline
//!     .resolve(&ban, &context, "@spammer flooding the channel")
//!     .await?;
//! assert_eq!(outcome.reply.as_deref(), Some("banned @spammer"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// === Core Modules ===

/// Typed values produced by converters
pub mod value;

/// Symbolic type names bound to token converters
pub mod registry;

/// The built-in converter set
pub mod converters;

/// Tokenization and option-matching configuration
pub mod config;

/// Option parsing and shell-like tokenization
pub mod options;

/// Typed argument shapes bound to handlers
pub mod signature;

/// Command identity, allowed options, and ordered signatures
pub mod command;

/// Invocation context and the per-run invocation record
pub mod context;

/// Load-phase command catalog with per-declaration recovery
pub mod catalog;

/// The parse, resolve, map, invoke pipeline
pub mod pipeline;

/// Declaration and resolution error taxonomy
pub mod error;

/// Curated imports for embedding the engine
pub mod prelude;

// === Public API Re-exports ===

// Errors
pub use error::{DeclarationError, HandlerError, ResolutionError};

// Values and conversion
pub use converters::install_builtins;
pub use registry::{Converter, TypeRegistry};
pub use value::{ChannelRef, CommandValue, DynamicValue, UserRef, ValueKind};

// Parsing
pub use config::ParserConfig;
pub use options::{OptionSpec, ParsedInput, ParsedOptions};

// Signatures and handlers
pub use signature::{
    handler_fn, ArgSlot, CommandHandler, MappedArg, MappedArgs, Signature, SignatureDecl,
};

// Commands and the load phase
pub use catalog::{CommandCatalog, RejectedCommand};
pub use command::{CommandBuilder, CommandDescriptor};

// Invocation
pub use context::{ChannelId, Invocation, InvocationContext, SenderId};
pub use pipeline::{CommandPipeline, ExecutionOutcome};
