//! The variable-resolution and placeholder-substitution engine.
//!
//! Two cooperating pure functions form the core of the crate:
//!
//! - [`resolve`] expands `${VAR}` cross-references *inside* the configuration
//!   map, iterating to a fixpoint under a bounded number of passes.
//! - [`substitute`] applies the resolved configuration to an arbitrary
//!   template document via `${VAR:-default}` placeholders.
//!
//! Neither function performs I/O or can fail: unresolved references degrade
//! to residual `${...}` text, malformed tokens pass through untouched, and a
//! missing key in a template falls back to the placeholder's default. The
//! surrounding driver ([`crate::tasks`]) owns all filesystem effects.

mod placeholder;
mod resolve;
mod substitute;

pub use resolve::{MAX_PASSES, ResolvedConfig, resolve};
pub use substitute::substitute;
