//! Session persistence for LeetMentor.
//!
//! The store exclusively owns all session records for the lifetime of the
//! process; the translator converts between the persisted representation
//! and the pipeline's working form.

pub mod store;
pub mod translate;

pub use store::SessionStore;
pub use translate::{apply_turn, session_to_turn};
