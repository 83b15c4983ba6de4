//! Worker primitives shared by the palette engine.
//!
//! Everything here runs on the caller's Tokio runtime when one is active.
//! Superseded work is never aborted: callers tag it with a
//! [`GenerationTicket`] and drop its output when the ticket goes stale.

mod batch;
mod class;
mod generation;
mod spawn;

pub use batch::TaskBatch;
pub use class::TaskClass;
pub use generation::{GenerationClock, GenerationTicket};
pub use spawn::spawn;
