#![forbid(unsafe_code)]

//! Domain core for the Craftify learning platform: validated course and
//! quiz models plus the timed quiz session state machine. Pure and
//! synchronous; IO, persistence, and scheduling live in the outer crates.

pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use error::Error;
pub use session::{Navigator, Phase, QuizSession, TickOutcome};
pub use time::Clock;
