//! Banter Testing Infrastructure
//!
//! Common test fixtures for crates embedding the command engine: factories
//! for registries, pipelines, contexts, and command declarations; canned
//! handlers with predictable behavior; proptest strategies for tails and
//! tokens; and opt-in tracing for test diagnostics.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! banter-testkit = { path = "../banter-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use banter_testkit::*;
//!
//! # async fn demo() {
//! let pipeline = test_pipeline();
//! let echo = echo_command("echo")
//!     .build(pipeline.registry())
//!     .unwrap();
//! let outcome = pipeline
//!     .resolve(&echo, &test_context(), "hello world")
//!     .await
//!     .unwrap();
//! assert_eq!(outcome.reply.as_deref(), Some("hello world"));
//! # }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod diagnostics;
pub mod factories;
pub mod handlers;
pub mod strategies;

// Re-export commonly used items
pub use diagnostics::init_test_tracing;
pub use factories::*;
pub use handlers::*;

// Re-export the engine's public surface for convenience
pub use banter_core::prelude::*;
