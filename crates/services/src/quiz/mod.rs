mod runner;
mod view;

// Public API of the quiz subsystem.
pub use runner::QuizRunner;
pub use view::QuizSnapshot;
