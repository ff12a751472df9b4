//! Chat turn handling for parking and bus questions.
//!
//! Answers come from the loaded datasets only; anything else is reported as
//! [`Reply::Fallback`] so the caller can decide how to answer it.

mod assistant;
pub mod intent;
mod session;

pub use assistant::{Assistant, DEFAULT_FALLBACK_MESSAGE, EMPTY_MESSAGE_PROMPT, Reply};
pub use session::{DEFAULT_SESSION_ID, Mode, SessionContext, SessionStore};
