//! Viewer session
//!
//! Ties the frame pipeline, the serial channel and the live configuration
//! together behind a single action dispatcher.

mod action;
mod error;
mod session;
mod tx_draft;


pub use action::{Action, ActionOutcome};
pub use error::{Result, ViewerError};
pub use session::Viewer;
pub use tx_draft::TxDraft;
