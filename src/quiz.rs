use std::time::Duration;

use crate::model::QuizQuestion;
use crate::rounds::{ChoiceRunner, PendingAnswer, RoundListener, Settle, SettleTicket};

/// Runs the trivia round over questions in the order they were authored.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<QuizQuestion>,
    runner: ChoiceRunner,
}

impl QuizEngine {
    pub fn new(questions: Vec<QuizQuestion>, settle_delay: Duration) -> Self {
        let runner = ChoiceRunner::new(questions.len(), settle_delay);
        Self { questions, runner }
    }

    /// The question on screen, or `None` when there are no questions.
    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.runner.is_complete() {
            return None;
        }
        self.questions.get(self.runner.index())
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.runner.index()
    }

    pub fn total(&self) -> usize {
        self.runner.total()
    }

    pub fn score(&self) -> u32 {
        self.runner.score()
    }

    pub fn pending(&self) -> Option<PendingAnswer> {
        self.runner.pending()
    }

    pub fn is_complete(&self) -> bool {
        self.runner.is_complete()
    }

    /// True when there is nothing to ask and the round can only be skipped.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Answers the current question with the option at `option_index`.
    ///
    /// Returns the ticket to settle after the feedback delay, or `None` when the answer was
    /// rejected: another answer is still pending, the round is over, or the index is out of range.
    pub fn submit_answer(
        &mut self,
        option_index: usize,
        listener: &mut dyn RoundListener,
    ) -> Option<SettleTicket> {
        if !self.runner.accepts_answer() {
            return None;
        }

        let question = self.questions.get(self.runner.index())?;
        let Some(option) = question.options.get(option_index) else {
            log::warn!(
                "question {} has no option at index {option_index}",
                question.id
            );
            return None;
        };

        let correct = option.is_correct;
        self.runner.answer(option_index, correct, listener)
    }

    pub fn settle(&mut self, ticket: SettleTicket, listener: &mut dyn RoundListener) -> Settle {
        let settled = self.runner.settle(ticket, listener);
        if let Settle::Advanced { round } = settled {
            log::debug!("quiz advanced to question {}", round + 1);
        }
        settled
    }

    /// Invalidates outstanding tickets, e.g. when leaving the screen mid-delay.
    pub fn cancel(&mut self) {
        self.runner.cancel();
    }

    /// Completes an empty round with `(0, 0)`. Does nothing when questions exist.
    pub fn skip(&mut self, listener: &mut dyn RoundListener) -> bool {
        self.runner.skip(listener)
    }
}
