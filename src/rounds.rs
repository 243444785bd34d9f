use std::time::Duration;

/// Final result of one game mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundOutcome {
    pub score: u32,
    pub total: u32,
}

impl RoundOutcome {
    /// Outcome reported when a mode has nothing to play.
    pub const SKIPPED: Self = Self { score: 0, total: 0 };

    pub fn new(score: u32, total: u32) -> Self {
        Self { score, total }
    }
}

/// Receives feedback and completion from a running mode.
///
/// `on_correct_answer` may fire any number of times during a mode and must not fail.
/// `on_complete` fires at most once per engine.
pub trait RoundListener {
    fn on_correct_answer(&mut self);
    fn on_complete(&mut self, outcome: RoundOutcome);
}

/// Listener that records what it was told. Handy for driving an engine and reacting afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundEvents {
    pub correct_answers: u32,
    pub completions: Vec<RoundOutcome>,
}

impl RoundEvents {
    pub fn completed(&self) -> Option<RoundOutcome> {
        self.completions.last().copied()
    }
}

impl RoundListener for RoundEvents {
    fn on_correct_answer(&mut self) {
        self.correct_answers += 1;
    }

    fn on_complete(&mut self, outcome: RoundOutcome) {
        self.completions.push(outcome);
    }
}

/// The answer currently shown as feedback while input is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAnswer {
    pub selected: usize,
    pub correct: bool,
}

/// Handle for the delayed advance that follows an answer.
///
/// The ticket is bound to the round it was issued for. Settling it after that round moved on,
/// or after [`cancel`](crate::QuizEngine::cancel), does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    round: usize,
    generation: u64,
    delay: Duration,
}

impl SettleTicket {
    /// How long feedback stays on screen before the ticket should be settled.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn round(&self) -> usize {
        self.round
    }
}

/// Result of settling a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The ticket no longer matches the live round.
    Stale,
    /// Input is unlocked and the given round is now current.
    Advanced { round: usize },
    /// The last round was settled and the listener was told.
    Completed(RoundOutcome),
}

/// Index, score and lock bookkeeping for a fixed sequence of single-answer rounds.
#[derive(Debug, Clone)]
pub(crate) struct ChoiceRunner {
    total: usize,
    index: usize,
    score: u32,
    pending: Option<PendingAnswer>,
    generation: u64,
    completed: bool,
    settle_delay: Duration,
}

impl ChoiceRunner {
    pub(crate) fn new(total: usize, settle_delay: Duration) -> Self {
        Self {
            total,
            index: 0,
            score: 0,
            pending: None,
            generation: 0,
            completed: false,
            settle_delay,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn pending(&self) -> Option<PendingAnswer> {
        self.pending
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.completed
    }

    /// True while an answer may be accepted for the current round.
    pub(crate) fn accepts_answer(&self) -> bool {
        !self.completed && self.total > 0 && self.pending.is_none()
    }

    pub(crate) fn answer(
        &mut self,
        selected: usize,
        correct: bool,
        listener: &mut dyn RoundListener,
    ) -> Option<SettleTicket> {
        if !self.accepts_answer() {
            return None;
        }

        self.pending = Some(PendingAnswer { selected, correct });
        if correct {
            self.score += 1;
            listener.on_correct_answer();
        }

        Some(SettleTicket {
            round: self.index,
            generation: self.generation,
            delay: self.settle_delay,
        })
    }

    pub(crate) fn settle(
        &mut self,
        ticket: SettleTicket,
        listener: &mut dyn RoundListener,
    ) -> Settle {
        if self.completed
            || self.pending.is_none()
            || ticket.generation != self.generation
            || ticket.round != self.index
        {
            log::debug!("ignoring stale settle for round {}", ticket.round);
            return Settle::Stale;
        }

        self.pending = None;
        self.generation += 1;

        if self.index + 1 < self.total {
            self.index += 1;
            Settle::Advanced { round: self.index }
        } else {
            self.completed = true;
            let outcome = RoundOutcome::new(self.score, self.total as u32);
            listener.on_complete(outcome);
            Settle::Completed(outcome)
        }
    }

    /// Invalidates every outstanding ticket. The pending answer, if any, stays locked.
    pub(crate) fn cancel(&mut self) {
        self.generation += 1;
    }

    pub(crate) fn skip(&mut self, listener: &mut dyn RoundListener) -> bool {
        if self.completed || self.total > 0 {
            return false;
        }

        self.completed = true;
        listener.on_complete(RoundOutcome::SKIPPED);
        true
    }
}
