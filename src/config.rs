use std::time::Duration;

/// Tunables for a game session. Every field falls back to its default when missing.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Feedback pause after a quiz answer.
    pub quiz_settle_ms: u64,
    /// Feedback pause after an image guess.
    pub image_settle_ms: u64,
    /// How long the confetti stays up after a correct answer.
    pub confetti_ms: u64,
    /// Share of the possible points needed for the trophy on the end screen.
    pub trophy_threshold: f64,
    /// Where the browser front end fetches the dataset from.
    pub data_url: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            quiz_settle_ms: 1200,
            image_settle_ms: 1500,
            confetti_ms: 4000,
            trophy_threshold: 0.7,
            data_url: "data/floramaster-data.json".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn quiz_settle_delay(&self) -> Duration {
        Duration::from_millis(self.quiz_settle_ms)
    }

    pub fn image_settle_delay(&self) -> Duration {
        Duration::from_millis(self.image_settle_ms)
    }

    pub fn confetti_duration(&self) -> Duration {
        Duration::from_millis(self.confetti_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_pacing() {
        let config = GameConfig::default();

        assert_eq!(config.quiz_settle_delay(), Duration::from_millis(1200));
        assert_eq!(config.image_settle_delay(), Duration::from_millis(1500));
        assert_eq!(config.confetti_duration(), Duration::from_secs(4));
        assert_eq!(config.trophy_threshold, 0.7);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = GameConfig::from_json(r#"{ "quizSettleMs": 300 }"#)
            .expect("partial config should parse");

        assert_eq!(config.quiz_settle_ms, 300);
        assert_eq!(config.image_settle_ms, 1500);
        assert_eq!(config.data_url, "data/floramaster-data.json");
    }
}
