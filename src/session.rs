use std::fmt;

use crate::model::GameData;
use crate::rounds::RoundOutcome;

/// Which screen is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Intro,
    Setup,
    Edit,
    Quiz,
    ImageGuessing,
    Matching,
    End,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameState::Intro => "intro",
            GameState::Setup => "setup",
            GameState::Edit => "edit",
            GameState::Quiz => "quiz",
            GameState::ImageGuessing => "image-guessing",
            GameState::Matching => "matching",
            GameState::End => "end",
        };
        f.write_str(label)
    }
}

/// The three scored game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Quiz,
    ImageGuessing,
    Matching,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Quiz, Mode::ImageGuessing, Mode::Matching];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Quiz => "Quiz",
            Mode::ImageGuessing => "Guess the Image",
            Mode::Matching => "Matching",
        }
    }
}

/// One number per mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeTally {
    pub quiz: u32,
    pub image_guessing: u32,
    pub matching: u32,
}

impl ModeTally {
    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Quiz => self.quiz,
            Mode::ImageGuessing => self.image_guessing,
            Mode::Matching => self.matching,
        }
    }

    fn set(&mut self, mode: Mode, value: u32) {
        match mode {
            Mode::Quiz => self.quiz = value,
            Mode::ImageGuessing => self.image_guessing = value,
            Mode::Matching => self.matching = value,
        }
    }

    pub fn sum(&self) -> u32 {
        self.quiz + self.image_guessing + self.matching
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    AnimationComplete,
    StartGame,
    EnterEditMode,
    /// Leaves the editor, replacing the dataset when edited data is supplied.
    ExitEditMode(Option<GameData>),
    CompleteQuiz(RoundOutcome),
    CompleteImageGuessing(RoundOutcome),
    CompleteMatching(RoundOutcome),
    Restart,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::AnimationComplete => "AnimationComplete",
            Event::StartGame => "StartGame",
            Event::EnterEditMode => "EnterEditMode",
            Event::ExitEditMode(_) => "ExitEditMode",
            Event::CompleteQuiz(_) => "CompleteQuiz",
            Event::CompleteImageGuessing(_) => "CompleteImageGuessing",
            Event::CompleteMatching(_) => "CompleteMatching",
            Event::Restart => "Restart",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    pub game_state: GameState,
    pub scores: ModeTally,
    pub totals: ModeTally,
}

impl SessionState {
    /// Sum of the scores earned so far.
    pub fn running_score(&self) -> u32 {
        self.scores.sum()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("event {event} is not valid in state {state}")]
    UnexpectedEvent { state: GameState, event: &'static str },
    #[error("score {score} exceeds total {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },
}

/// Computes the state that follows `event`.
///
/// # Errors
/// Returns [`TransitionError::UnexpectedEvent`] when `event` is not valid from the current screen
/// and [`TransitionError::ScoreExceedsTotal`] for an impossible completion.
pub fn transition(state: &SessionState, event: &Event) -> Result<SessionState, TransitionError> {
    use GameState::*;

    let mut next = *state;

    match (state.game_state, event) {
        (Intro, Event::AnimationComplete) => next.game_state = Setup,
        (Setup, Event::StartGame) => {
            next.scores = ModeTally::default();
            next.totals = ModeTally::default();
            next.game_state = Quiz;
        }
        (Setup, Event::EnterEditMode) => next.game_state = Edit,
        (Edit, Event::ExitEditMode(_)) => next.game_state = Setup,
        (Quiz, Event::CompleteQuiz(outcome)) => {
            record(&mut next, Mode::Quiz, *outcome)?;
            next.game_state = ImageGuessing;
        }
        (ImageGuessing, Event::CompleteImageGuessing(outcome)) => {
            record(&mut next, Mode::ImageGuessing, *outcome)?;
            next.game_state = Matching;
        }
        (Matching, Event::CompleteMatching(outcome)) => {
            record(&mut next, Mode::Matching, *outcome)?;
            next.game_state = End;
        }
        (End, Event::Restart) => {
            next.scores = ModeTally::default();
            next.totals = ModeTally::default();
            next.game_state = Setup;
        }
        (current, event) => {
            return Err(TransitionError::UnexpectedEvent {
                state: current,
                event: event.name(),
            });
        }
    }

    Ok(next)
}

fn record(state: &mut SessionState, mode: Mode, outcome: RoundOutcome) -> Result<(), TransitionError> {
    if outcome.score > outcome.total {
        return Err(TransitionError::ScoreExceedsTotal {
            score: outcome.score,
            total: outcome.total,
        });
    }
    state.scores.set(mode, outcome.score);
    state.totals.set(mode, outcome.total);
    Ok(())
}

/// Where the dataset stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataStatus {
    #[default]
    Loading,
    Failed(String),
    Ready(GameData),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("game data is still loading")]
    DataLoading,
    #[error("game data could not be loaded: {0}")]
    DataUnavailable(String),
}

/// Owns the session state and the dataset for the lifetime of the page.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    state: SessionState,
    data: DataStatus,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: GameData) -> Self {
        Self {
            state: SessionState::default(),
            data: DataStatus::Ready(data),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn game_state(&self) -> GameState {
        self.state.game_state
    }

    pub fn data_status(&self) -> &DataStatus {
        &self.data
    }

    pub fn data(&self) -> Option<&GameData> {
        match &self.data {
            DataStatus::Ready(data) => Some(data),
            DataStatus::Loading | DataStatus::Failed(_) => None,
        }
    }

    pub fn data_loaded(&mut self, data: GameData) {
        log::info!(
            "game data ready: {} questions, {} images, {} pairs",
            data.questions.len(),
            data.images.len(),
            data.pairs.len()
        );
        self.data = DataStatus::Ready(data);
    }

    /// Records a load failure. Previously loaded data, if any, is kept.
    pub fn data_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("game data failed to load: {message}");
        if !matches!(self.data, DataStatus::Ready(_)) {
            self.data = DataStatus::Failed(message);
        }
    }

    fn require_data(&self) -> Result<(), SessionError> {
        match &self.data {
            DataStatus::Ready(_) => Ok(()),
            DataStatus::Loading => Err(SessionError::DataLoading),
            DataStatus::Failed(message) => Err(SessionError::DataUnavailable(message.clone())),
        }
    }

    /// Applies `event` and returns the new screen.
    ///
    /// # Errors
    /// Starting a game or entering the editor is refused while the dataset is not available.
    ///
    /// # Panics
    /// Panics when `event` is not valid for the current screen or reports a score above its
    /// total. Both indicate a bug in the caller, not bad user input.
    pub fn dispatch(&mut self, event: Event) -> Result<GameState, SessionError> {
        let next = match transition(&self.state, &event) {
            Ok(next) => next,
            Err(error) => panic!("invalid session transition: {error}"),
        };

        if matches!(event, Event::StartGame | Event::EnterEditMode) {
            self.require_data()?;
        }

        log::debug!(
            "{} -> {} on {}",
            self.state.game_state,
            next.game_state,
            event.name()
        );

        if let Event::ExitEditMode(Some(data)) = event {
            self.data_loaded(data);
        }
        self.state = next;

        Ok(self.state.game_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_game_data;

    fn controller_at(state: GameState) -> SessionController {
        let mut controller = SessionController::with_data(demo_game_data());
        let path: &[Event] = match state {
            GameState::Intro => &[],
            GameState::Setup => &[Event::AnimationComplete],
            GameState::Edit => &[Event::AnimationComplete, Event::EnterEditMode],
            GameState::Quiz => &[Event::AnimationComplete, Event::StartGame],
            _ => panic!("helper only covers the first screens"),
        };
        for event in path {
            controller.dispatch(event.clone()).expect("data is ready");
        }
        controller
    }

    fn play_through(controller: &mut SessionController, outcomes: [RoundOutcome; 3]) {
        controller
            .dispatch(Event::CompleteQuiz(outcomes[0]))
            .expect("quiz completes");
        controller
            .dispatch(Event::CompleteImageGuessing(outcomes[1]))
            .expect("image guessing completes");
        controller
            .dispatch(Event::CompleteMatching(outcomes[2]))
            .expect("matching completes");
    }

    #[test]
    fn starts_on_the_intro_screen() {
        let controller = SessionController::new();

        assert_eq!(controller.game_state(), GameState::Intro);
        assert_eq!(controller.data_status(), &DataStatus::Loading);
    }

    #[test]
    fn full_session_records_each_mode() {
        let mut controller = controller_at(GameState::Quiz);

        play_through(
            &mut controller,
            [
                RoundOutcome::new(3, 5),
                RoundOutcome::new(1, 2),
                RoundOutcome::new(4, 4),
            ],
        );

        let state = controller.state();
        assert_eq!(state.game_state, GameState::End);
        assert_eq!(
            state.scores,
            ModeTally {
                quiz: 3,
                image_guessing: 1,
                matching: 4
            }
        );
        assert_eq!(
            state.totals,
            ModeTally {
                quiz: 5,
                image_guessing: 2,
                matching: 4
            }
        );
        assert_eq!(state.running_score(), 8);
    }

    #[test]
    fn restart_zeroes_scores_and_returns_to_setup() {
        let mut controller = controller_at(GameState::Quiz);
        play_through(
            &mut controller,
            [
                RoundOutcome::new(2, 2),
                RoundOutcome::new(1, 1),
                RoundOutcome::new(3, 3),
            ],
        );

        assert_eq!(controller.dispatch(Event::Restart), Ok(GameState::Setup));
        assert_eq!(controller.state().scores, ModeTally::default());
        assert_eq!(controller.state().totals, ModeTally::default());
    }

    #[test]
    fn start_game_is_refused_until_data_arrives() {
        let mut controller = SessionController::new();
        controller
            .dispatch(Event::AnimationComplete)
            .expect("intro needs no data");

        assert_eq!(
            controller.dispatch(Event::StartGame),
            Err(SessionError::DataLoading)
        );
        assert_eq!(controller.game_state(), GameState::Setup);

        controller.data_failed("network down");
        assert_eq!(
            controller.dispatch(Event::StartGame),
            Err(SessionError::DataUnavailable("network down".to_string()))
        );

        controller.data_loaded(demo_game_data());
        assert_eq!(controller.dispatch(Event::StartGame), Ok(GameState::Quiz));
    }

    #[test]
    fn exit_edit_mode_replaces_dataset_when_given() {
        let mut controller = controller_at(GameState::Edit);
        let edited = GameData::default();

        controller
            .dispatch(Event::ExitEditMode(Some(edited.clone())))
            .expect("leaving the editor");

        assert_eq!(controller.game_state(), GameState::Setup);
        assert_eq!(controller.data(), Some(&edited));
    }

    #[test]
    fn exit_edit_mode_without_changes_keeps_dataset() {
        let mut controller = controller_at(GameState::Edit);

        controller
            .dispatch(Event::ExitEditMode(None))
            .expect("leaving the editor");

        assert_eq!(controller.data(), Some(&demo_game_data()));
    }

    #[test]
    fn load_failure_after_success_keeps_data() {
        let mut controller = SessionController::with_data(demo_game_data());

        controller.data_failed("reload failed");

        assert!(controller.data().is_some());
    }

    #[test]
    #[should_panic(expected = "invalid session transition")]
    fn unexpected_event_panics() {
        let mut controller = controller_at(GameState::Setup);
        let _ = controller.dispatch(Event::CompleteMatching(RoundOutcome::new(1, 1)));
    }

    #[test]
    #[should_panic(expected = "invalid session transition")]
    fn starting_from_intro_panics_even_while_loading() {
        let mut controller = SessionController::new();
        assert_eq!(controller.data_status(), &DataStatus::Loading);
        let _ = controller.dispatch(Event::StartGame);
    }

    #[test]
    #[should_panic(expected = "exceeds total")]
    fn impossible_score_panics() {
        let mut controller = controller_at(GameState::Quiz);
        let _ = controller.dispatch(Event::CompleteQuiz(RoundOutcome::new(4, 3)));
    }

    #[test]
    fn transition_is_pure_and_reports_errors() {
        let state = SessionState::default();

        let error = transition(&state, &Event::Restart).expect_err("restart from intro");

        assert_eq!(
            error,
            TransitionError::UnexpectedEvent {
                state: GameState::Intro,
                event: "Restart",
            }
        );
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn every_state_rejects_foreign_events() {
        let states = [
            GameState::Intro,
            GameState::Setup,
            GameState::Edit,
            GameState::Quiz,
            GameState::ImageGuessing,
            GameState::Matching,
            GameState::End,
        ];
        let events = [
            Event::AnimationComplete,
            Event::StartGame,
            Event::EnterEditMode,
            Event::ExitEditMode(None),
            Event::CompleteQuiz(RoundOutcome::SKIPPED),
            Event::CompleteImageGuessing(RoundOutcome::SKIPPED),
            Event::CompleteMatching(RoundOutcome::SKIPPED),
            Event::Restart,
        ];

        let mut accepted = 0;
        for game_state in states {
            for event in &events {
                let state = SessionState {
                    game_state,
                    ..SessionState::default()
                };
                if transition(&state, event).is_ok() {
                    accepted += 1;
                }
            }
        }

        assert_eq!(accepted, 8);
    }

    #[test]
    fn scores_never_exceed_totals_after_completion() {
        let mut state = SessionState {
            game_state: GameState::Quiz,
            ..SessionState::default()
        };

        for event in [
            Event::CompleteQuiz(RoundOutcome::new(0, 0)),
            Event::CompleteImageGuessing(RoundOutcome::new(2, 7)),
            Event::CompleteMatching(RoundOutcome::new(5, 5)),
        ] {
            state = transition(&state, &event).expect("valid completion");
            for mode in Mode::ALL {
                assert!(state.scores.get(mode) <= state.totals.get(mode));
            }
        }
    }
}
