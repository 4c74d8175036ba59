//! Line command parsing.

use std::path::PathBuf;

use chess_core::{ParseSquareError, PieceKind, Square};
use thiserror::Error;

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Square(#[from] ParseSquareError),

    #[error("'{0}' expects an argument")]
    MissingArgument(&'static str),

    #[error("unknown promotion piece '{0}', expected one of q, r, b, n")]
    BadPromotion(String),

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
}

/// Commands typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Click a square: select, deselect or move depending on the state.
    Click(Square),
    Select(Square),
    Move(Square),
    Promote(PieceKind),
    Deselect,
    Board,
    Save(PathBuf),
    Load(PathBuf),
    New,
    Help,
    Quit,
    /// Blank line.
    Empty,
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();

        match cmd.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "select" | "s" => Ok(Command::Select(square_arg("select", arg)?)),
            "move" | "m" => Ok(Command::Move(square_arg("move", arg)?)),
            "promote" | "p" => {
                let arg = arg.ok_or(CommandError::MissingArgument("promote"))?;
                Ok(Command::Promote(parse_promotion(arg)?))
            }
            "deselect" | "d" => Ok(Command::Deselect),
            "board" | "b" => Ok(Command::Board),
            "save" => Ok(Command::Save(path_arg("save", arg)?)),
            "load" => Ok(Command::Load(path_arg("load", arg)?)),
            "new" => Ok(Command::New),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other if other.len() == 2 => Ok(Command::Click(other.parse()?)),
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }
}

fn square_arg(cmd: &'static str, arg: Option<&str>) -> Result<Square, CommandError> {
    Ok(arg.ok_or(CommandError::MissingArgument(cmd))?.parse()?)
}

fn path_arg(cmd: &'static str, arg: Option<&str>) -> Result<PathBuf, CommandError> {
    arg.map(PathBuf::from)
        .ok_or(CommandError::MissingArgument(cmd))
}

fn parse_promotion(arg: &str) -> Result<PieceKind, CommandError> {
    let mut chars = arg.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_char(c).map(|(kind, _)| kind),
        _ => PieceKind::PROMOTIONS
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(arg)),
    };
    kind
        .filter(|kind| kind.is_promotion_target())
        .ok_or_else(|| CommandError::BadPromotion(arg.to_string()))
}

/// Short usage text for the `help` command.
pub const HELP: &str = "\
commands:
  <square>          click a square (e.g. e2), selecting or moving
  select <square>   select a piece
  move <square>     move the selected piece
  promote <q|r|b|n> choose the promotion piece
  deselect          drop the selection
  board             redraw the board
  save <path>       save the game as JSON
  load <path>       load a saved game
  new               start a new game
  quit              leave";
