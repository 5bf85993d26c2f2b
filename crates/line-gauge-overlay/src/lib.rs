//! Hover-overlay shell for `line-gauge`: the session state machine and the
//! info-card content model.
//!
//! The engine crate measures; this crate decides when measurements happen
//! and what the floating card shows. Everything environment-specific
//! (event listening, node marking, card rendering) sits behind
//! [`OverlayHost`], so the same session logic drives a browser binding or
//! a test mock.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod card;
mod session;

pub use card::{CardContent, CardStats};
pub use session::{OverlayHost, OverlaySession, PointerPos, SessionState};
