//! Command catalog - load-phase installation with per-declaration recovery
//!
//! The catalog collects the commands a module loader declares. One bad
//! declaration must not take down the load phase, so `install` never fails:
//! it keeps successes and records failures as [`RejectedCommand`] entries for
//! the load report.
//!
//! The catalog stores descriptors in installation order and compares aliases
//! exactly. Case-folding alias lookup is the dispatch collaborator's concern;
//! it builds its own lookup from [`CommandCatalog::commands`].

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::command::{CommandBuilder, CommandDescriptor};
use crate::error::DeclarationError;
use crate::registry::TypeRegistry;

/// A declaration the catalog refused, kept for the load report.
#[derive(Debug)]
pub struct RejectedCommand {
    /// Canonical name of the rejected declaration.
    pub command: String,
    /// Why it was rejected.
    pub error: DeclarationError,
}

/// The set of installed commands, plus the declarations that failed.
#[derive(Debug, Default)]
pub struct CommandCatalog {
    commands: IndexMap<String, Arc<CommandDescriptor>>,
    rejected: Vec<RejectedCommand>,
}

impl CommandCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build `builder` against `registry` and install the result.
    ///
    /// On success the descriptor is stored and returned. On failure,
    /// including an alias colliding with an already-installed command, the
    /// declaration is recorded in [`rejected`](Self::rejected) and `None` is
    /// returned; the catalog itself stays usable.
    pub fn install(
        &mut self,
        registry: &TypeRegistry,
        builder: CommandBuilder,
    ) -> Option<Arc<CommandDescriptor>> {
        let name = builder.name().to_string();
        match self.try_install(registry, builder) {
            Ok(descriptor) => Some(descriptor),
            Err(error) => {
                warn!(command = %name, %error, "command declaration rejected");
                self.rejected.push(RejectedCommand {
                    command: name,
                    error,
                });
                None
            }
        }
    }

    fn try_install(
        &mut self,
        registry: &TypeRegistry,
        builder: CommandBuilder,
    ) -> Result<Arc<CommandDescriptor>, DeclarationError> {
        let descriptor = builder.build(registry)?;

        for alias in descriptor.aliases() {
            let taken = self
                .commands
                .values()
                .any(|existing| existing.aliases().iter().any(|known| known == alias));
            if taken {
                return Err(DeclarationError::duplicate_command(alias));
            }
        }

        let descriptor = Arc::new(descriptor);
        debug!(
            command = descriptor.name(),
            aliases = descriptor.aliases().len(),
            signatures = descriptor.signatures().len(),
            "command installed"
        );
        self.commands
            .insert(descriptor.name().to_string(), Arc::clone(&descriptor));
        Ok(descriptor)
    }

    /// Installed descriptors, in installation order.
    pub fn commands(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.commands.values()
    }

    /// Find an installed command by any of its aliases (exact comparison).
    pub fn find(&self, alias: &str) -> Option<&Arc<CommandDescriptor>> {
        self.commands
            .values()
            .find(|descriptor| descriptor.aliases().iter().any(|known| known == alias))
    }

    /// Declarations the catalog refused, in installation-attempt order.
    pub fn rejected(&self) -> &[RejectedCommand] {
        &self.rejected
    }

    /// Number of installed commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing has been installed.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
