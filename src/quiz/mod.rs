//! Quiz module
//!
//! A quiz session lives on the client: it remembers which questions were
//! already asked and which category was picked. Each `POST /quizzes` is one
//! step of that session. The selector removes the asked questions, applies
//! the category filter (id 0 means every category) and draws one of the
//! remaining questions uniformly at random. When nothing remains the step
//! reports [`QuizStep::Exhausted`] and the client ends the session.

mod selector;
mod types;

pub use selector::{candidates, select_next};
pub use types::{CategoryFilter, QuizCategory, QuizRequest, QuizRound, QuizStep, ALL_CATEGORIES};
