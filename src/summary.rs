use crate::session::{Mode, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeResult {
    pub mode: Mode,
    pub score: u32,
    pub total: u32,
}

/// Figures shown on the end screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub modes: Vec<ModeResult>,
    pub total_score: u32,
    pub total_possible: u32,
    /// Fraction of the possible points, `0.0` when nothing could be scored.
    pub ratio: f64,
    pub earned_trophy: bool,
}

impl SessionSummary {
    pub fn from_state(state: &SessionState, trophy_threshold: f64) -> Self {
        let modes: Vec<ModeResult> = Mode::ALL
            .into_iter()
            .map(|mode| ModeResult {
                mode,
                score: state.scores.get(mode),
                total: state.totals.get(mode),
            })
            .collect();

        let total_score = state.scores.sum();
        let total_possible = state.totals.sum();
        let ratio = if total_possible > 0 {
            f64::from(total_score) / f64::from(total_possible)
        } else {
            0.0
        };

        Self {
            modes,
            total_score,
            total_possible,
            ratio,
            earned_trophy: ratio >= trophy_threshold,
        }
    }

    pub fn percentage(&self) -> u32 {
        (self.ratio * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameState, ModeTally};

    fn finished(scores: ModeTally, totals: ModeTally) -> SessionState {
        SessionState {
            game_state: GameState::End,
            scores,
            totals,
        }
    }

    #[test]
    fn adds_up_every_mode() {
        let state = finished(
            ModeTally {
                quiz: 4,
                image_guessing: 2,
                matching: 1,
            },
            ModeTally {
                quiz: 5,
                image_guessing: 3,
                matching: 2,
            },
        );

        let summary = SessionSummary::from_state(&state, 0.7);

        assert_eq!(summary.total_score, 7);
        assert_eq!(summary.total_possible, 10);
        assert_eq!(summary.percentage(), 70);
        assert!(summary.earned_trophy);
        assert_eq!(
            summary.modes[1],
            ModeResult {
                mode: Mode::ImageGuessing,
                score: 2,
                total: 3
            }
        );
    }

    #[test]
    fn below_threshold_earns_no_trophy() {
        let state = finished(
            ModeTally {
                quiz: 1,
                image_guessing: 0,
                matching: 0,
            },
            ModeTally {
                quiz: 3,
                image_guessing: 0,
                matching: 0,
            },
        );

        let summary = SessionSummary::from_state(&state, 0.7);

        assert_eq!(summary.percentage(), 33);
        assert!(!summary.earned_trophy);
    }

    #[test]
    fn skipped_session_scores_zero_percent() {
        let summary = SessionSummary::from_state(&SessionState::default(), 0.7);

        assert_eq!(summary.total_possible, 0);
        assert_eq!(summary.ratio, 0.0);
        assert!(!summary.earned_trophy);
    }
}
