//! Service layer for the petty cash ledger
//!
//! Interaction rules that sit between the stored data and the presentation:
//! which transactions are selected and which bulk actions that permits.

pub mod selection;

pub use selection::{Selection, UiRegion};
