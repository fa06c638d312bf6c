//! Wiring between the command line and the screening library.
//!
//! This module opens the score cache and prepares the adapters and reference
//! data a screening run needs.

pub(crate) mod cache_manager;
pub(crate) mod setup;
