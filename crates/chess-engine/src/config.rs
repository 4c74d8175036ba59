//! Rule configuration.

use serde::{Deserialize, Serialize};

/// Tunable rule behavior.
///
/// Every field has a default, so a partial TOML `[rules]` table (or none at
/// all) deserializes into a complete configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Report `Stalemate` when the side to move has no legal move and is not
    /// in check. When off, such a position keeps `CheckStatus::None`.
    pub detect_stalemate: bool,

    /// Allow a king that is currently in check to castle.
    pub castle_out_of_check: bool,

    /// Reject select and move intents once the game reached checkmate or
    /// stalemate.
    pub lock_finished_games: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            detect_stalemate: true,
            castle_out_of_check: false,
            lock_finished_games: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_standard_rules() {
        let config = RulesConfig::default();
        assert!(config.detect_stalemate);
        assert!(!config.castle_out_of_check);
        assert!(config.lock_finished_games);
    }

    #[test]
    fn partial_input_keeps_defaults() {
        let config: RulesConfig = serde_json::from_str(r#"{"detect_stalemate": false}"#).unwrap();
        assert!(!config.detect_stalemate);
        assert!(config.lock_finished_games);
    }
}
