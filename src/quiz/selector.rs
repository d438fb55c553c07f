//! Random next-question selection

use super::types::{QuizRound, QuizStep};
use crate::types::Question;
use rand::seq::SliceRandom;
use rand::Rng;

/// Questions still eligible for `round`, in input order
pub fn candidates<'a>(questions: &'a [Question], round: &QuizRound) -> Vec<&'a Question> {
    questions.iter().filter(|q| round.is_candidate(q)).collect()
}

/// Pick the next quiz question uniformly among the remaining candidates
pub fn select_next<R: Rng + ?Sized>(
    questions: &[Question],
    round: &QuizRound,
    rng: &mut R,
) -> QuizStep {
    let remaining = candidates(questions, round);

    tracing::debug!(
        candidates = remaining.len(),
        excluded = round.excluded.len(),
        "Selecting quiz question"
    );

    match remaining.choose(rng) {
        Some(question) => QuizStep::Question((*question).clone()),
        None => QuizStep::Exhausted,
    }
}
