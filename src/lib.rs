pub mod config;
pub mod dataset;
pub mod demo;
pub mod editor;
pub mod image_guess;
pub mod matching;
pub mod model;
pub mod quiz;
pub mod rounds;
pub mod session;
pub mod shuffle;
pub mod summary;
pub mod text;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use config::GameConfig;
pub use dataset::{DatasetFileError, EXPORT_FILE_NAME, ImportError};
pub use demo::demo_game_data;
pub use editor::{DataEditor, EditorError};
pub use image_guess::ImageGuessEngine;
pub use matching::{MatchItem, MatchResult, MatchingEngine, ReviewRow, SelectOutcome};
pub use model::{DataError, GameData, GameImage, ImageKind, LeafTreePair, QuizOption, QuizQuestion};
pub use quiz::QuizEngine;
pub use rounds::{PendingAnswer, RoundEvents, RoundListener, RoundOutcome, Settle, SettleTicket};
pub use session::{
    DataStatus, Event, GameState, Mode, ModeTally, SessionController, SessionError, SessionState,
    TransitionError, transition,
};
pub use shuffle::shuffled;
pub use summary::{ModeResult, SessionSummary};
pub use text::{TextSpan, emphasis_spans};
