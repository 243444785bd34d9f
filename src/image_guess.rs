use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::{GameImage, QuizOption};
use crate::rounds::{ChoiceRunner, PendingAnswer, RoundListener, Settle, SettleTicket};
use crate::shuffle::shuffled;

/// Runs the "name this plant" round.
///
/// Rounds are shuffled once at construction. The options of each round are shuffled again when
/// that round becomes current, so the right answer never sits at a predictable position.
#[derive(Debug, Clone)]
pub struct ImageGuessEngine {
    rounds: Vec<GameImage>,
    options: Vec<QuizOption>,
    runner: ChoiceRunner,
    rng: StdRng,
}

impl ImageGuessEngine {
    /// Builds the round from already filtered plant images (see
    /// [`GameData::plants_for_guessing`](crate::GameData::plants_for_guessing)).
    pub fn new<R: rand::Rng + ?Sized>(
        rng: &mut R,
        plants: &[GameImage],
        settle_delay: Duration,
    ) -> Self {
        let mut own_rng = StdRng::seed_from_u64(rng.next_u64());
        let rounds = shuffled(&mut own_rng, plants);
        let runner = ChoiceRunner::new(rounds.len(), settle_delay);

        let mut engine = Self {
            rounds,
            options: Vec::new(),
            runner,
            rng: own_rng,
        };
        engine.shuffle_current_options();
        engine
    }

    fn shuffle_current_options(&mut self) {
        self.options = match self.rounds.get(self.runner.index()) {
            Some(image) => shuffled(&mut self.rng, image.options.as_deref().unwrap_or_default()),
            None => Vec::new(),
        };
    }

    pub fn current(&self) -> Option<&GameImage> {
        if self.runner.is_complete() {
            return None;
        }
        self.rounds.get(self.runner.index())
    }

    /// Options of the current round in display order.
    pub fn options(&self) -> &[QuizOption] {
        &self.options
    }

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

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Answers with the option at `option_index` of [`options`](Self::options).
    pub fn submit_answer(
        &mut self,
        option_index: usize,
        listener: &mut dyn RoundListener,
    ) -> Option<SettleTicket> {
        if !self.runner.accepts_answer() {
            return None;
        }

        let Some(option) = self.options.get(option_index) else {
            log::warn!("image round has no option at index {option_index}");
            return None;
        };

        let correct = option.is_correct;
        self.runner.answer(option_index, correct, listener)
    }

    pub fn settle(&mut self, ticket: SettleTicket, listener: &mut dyn RoundListener) -> Settle {
        let settled = self.runner.settle(ticket, listener);
        if let Settle::Advanced { round } = settled {
            self.shuffle_current_options();
            log::debug!("image guessing advanced to round {}", round + 1);
        }
        settled
    }

    pub fn cancel(&mut self) {
        self.runner.cancel();
    }

    pub fn skip(&mut self, listener: &mut dyn RoundListener) -> bool {
        self.runner.skip(listener)
    }
}
