//! Configuration module for the petty cash ledger
//!
//! Resolves where the ledger keeps its data and where backups are written,
//! and installs the logging subscriber used by the binary.

pub mod logging;
pub mod paths;

pub use logging::init_tracing;
pub use paths::PettyCashPaths;
