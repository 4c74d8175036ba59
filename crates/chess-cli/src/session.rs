//! An interactive game session: applies commands and renders the result.

use anyhow::Context;
use chess_core::Square;
use chess_engine::{CheckStatus, Game, Intent, IntentResult, Phase, Snapshot, Transition};

use crate::command::{Command, HELP};
use crate::config::CliConfig;

/// What the prompt loop should do after a command.
#[derive(Debug, PartialEq)]
pub enum Reply {
    /// Print the text and read the next command.
    Show(String),
    Quit,
}

/// Holds the game and the display options for one terminal session.
pub struct Session {
    game: Game,
    config: CliConfig,
}

impl Session {
    pub fn new(config: CliConfig) -> Self {
        Session {
            game: Game::with_config(config.rules),
            config,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs one command. Rejected intents are reported in the reply text;
    /// only file errors surface as `Err`.
    pub fn handle(&mut self, command: Command) -> anyhow::Result<Reply> {
        let result = match command {
            Command::Empty => return Ok(Reply::Show(String::new())),
            Command::Quit => return Ok(Reply::Quit),
            Command::Help => return Ok(Reply::Show(HELP.to_string())),
            Command::Board => return Ok(Reply::Show(self.render(&self.game.snapshot()))),
            Command::New => {
                self.game.reset();
                tracing::info!("new game");
                return Ok(Reply::Show(self.render(&self.game.snapshot())));
            }
            Command::Save(path) => {
                let json = self.game.to_json()?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                tracing::info!("game saved to {:?}", path);
                return Ok(Reply::Show(format!("saved to {}", path.display())));
            }
            Command::Load(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                self.game = Game::from_json(&json, self.config.rules)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                tracing::info!("game loaded from {:?}", path);
                return Ok(Reply::Show(self.render(&self.game.snapshot())));
            }
            Command::Click(square) => self.game.click(square),
            Command::Select(square) => self.game.apply_intent(Intent::SelectSquare(square)),
            Command::Move(square) => self.game.apply_intent(Intent::MoveTo(square)),
            Command::Promote(kind) => self.game.apply_intent(Intent::ChoosePromotion(kind)),
            Command::Deselect => self.game.apply_intent(Intent::Deselect),
        };
        Ok(Reply::Show(self.describe(&result)))
    }

    fn describe(&self, result: &IntentResult) -> String {
        let header = match &result.outcome {
            Ok(Transition::Moved(record)) => match record.captured {
                Some(captured) => format!(
                    "{} {} {}\ncaptured {}\n",
                    record.color, record.kind, record.mov, captured
                ),
                None => format!("{} {} {}\n", record.color, record.kind, record.mov),
            },
            Ok(Transition::Promoted { square, kind }) => {
                format!("pawn on {} promoted to {}\n", square, kind)
            }
            Ok(_) => String::new(),
            Err(err) => return format!("rejected: {}\n", err),
        };
        header + &self.render(&result.snapshot)
    }

    /// Draws the board with the selection and its destinations marked.
    pub fn render(&self, snapshot: &Snapshot) -> String {
        let unicode = self.config.display.unicode;
        let mut out = String::new();
        for rank in 0..8u8 {
            out.push_str(&format!("{} ", 8 - rank));
            for file in 0..8u8 {
                let Some(sq) = Square::new(file, rank) else {
                    continue;
                };
                let cell = match snapshot.board.piece_at(sq) {
                    Some(piece) if unicode => piece.symbol(),
                    Some(piece) => piece.to_char(),
                    None if snapshot.legal_destinations.contains(sq) => '*',
                    None => '.',
                };
                let (open, close) = if snapshot.selection == Some(sq) {
                    ('[', ']')
                } else if snapshot.legal_destinations.contains(sq) && cell != '*' {
                    ('(', ')')
                } else {
                    (' ', ' ')
                };
                out.push(open);
                out.push(cell);
                out.push(close);
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        out.push_str(&status_line(snapshot));
        out
    }
}

fn status_line(snapshot: &Snapshot) -> String {
    match (snapshot.check_status, snapshot.phase) {
        (CheckStatus::Checkmate, _) => {
            format!("checkmate, {} wins", snapshot.turn.opposite())
        }
        (CheckStatus::Stalemate, _) => "stalemate".to_string(),
        (_, Phase::PromotionPending) => format!(
            "{} to choose a promotion piece (q, r, b, n)",
            snapshot.turn
        ),
        (CheckStatus::Check(king), _) => format!("{} to move, king on {} in check", snapshot.turn, king),
        (CheckStatus::None, _) => format!("{} to move", snapshot.turn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut Session, line: &str) -> String {
        match session.handle(Command::parse(line).unwrap()).unwrap() {
            Reply::Show(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_click_then_move() {
        let mut session = Session::new(CliConfig::default());
        let text = run(&mut session, "e2");
        assert!(text.contains("[♙]"));
        assert!(text.contains(" * "));

        let text = run(&mut session, "e4");
        assert!(text.contains("White Pawn e2e4"));
        assert!(text.contains("Black to move"));
    }

    #[test]
    fn test_rejected_intent_is_reported() {
        let mut session = Session::new(CliConfig::default());
        let text = run(&mut session, "select e7");
        assert!(text.starts_with("rejected:"));
        assert_eq!(session.game().phase(), Phase::Idle);
    }

    #[test]
    fn test_ascii_rendering() {
        let mut config = CliConfig::default();
        config.display.unicode = false;
        let session = Session::new(config);
        let text = session.render(&session.game().snapshot());
        assert!(text.starts_with("8  r  n  b  q  k  b  n  r \n"));
        assert!(text.ends_with("White to move"));
    }

    #[test]
    fn test_quit() {
        let mut session = Session::new(CliConfig::default());
        assert_eq!(session.handle(Command::Quit).unwrap(), Reply::Quit);
    }
}
