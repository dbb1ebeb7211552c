//! Banter Core prelude.
//!
//! Curated re-exports for declaring commands and driving the pipeline without
//! pulling in extra modules.

pub use crate::catalog::{CommandCatalog, RejectedCommand};
pub use crate::command::{CommandBuilder, CommandDescriptor};
pub use crate::config::ParserConfig;
pub use crate::context::{ChannelId, Invocation, InvocationContext, SenderId};
pub use crate::converters::install_builtins;
pub use crate::error::{DeclarationError, HandlerError, ResolutionError};
pub use crate::options::{OptionSpec, ParsedOptions};
pub use crate::pipeline::{CommandPipeline, ExecutionOutcome};
pub use crate::registry::{Converter, TypeRegistry};
pub use crate::signature::{
    handler_fn, CommandHandler, MappedArg, MappedArgs, Signature, SignatureDecl,
};
pub use crate::value::{ChannelRef, CommandValue, DynamicValue, UserRef, ValueKind};
