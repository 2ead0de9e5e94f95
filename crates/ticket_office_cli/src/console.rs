//! Console command grammar.

use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Kinds,
    Use(String),
    Show,
    /// Field number (1-based) and the text to put in it.
    Set(usize, String),
    /// Field number and option number, both 1-based.
    Pick(usize, usize),
    Clear(usize),
    Add,
    Remove(Uuid),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidId(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::MissingArgument(what) => write!(f, "missing {what}"),
            Self::InvalidNumber(text) => write!(f, "`{text}` is not a positive number"),
            Self::InvalidId(text) => write!(f, "`{text}` is not a record id"),
        }
    }
}

pub const HELP: &str = "\
commands:
  kinds                  list collections
  use <Collection>       switch collection (unsaved input is discarded)
  show                   print rows and form
  set <field#> <text>    type into a text field
  pick <field#> <opt#>   choose an option of a selector
  clear <field#>         unselect a selector
  add                    insert the form as a new record
  rm <id>                delete a row
  help | quit";

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Err(ParseError::Empty),
        "kinds" => Ok(Command::Kinds),
        "use" => Ok(Command::Use(required(rest, "collection name")?.to_string())),
        "show" => Ok(Command::Show),
        "set" => {
            let (field, text) = match rest.split_once(char::is_whitespace) {
                Some((field, text)) => (field, text.trim()),
                None => (required(rest, "field number")?, ""),
            };
            Ok(Command::Set(position(field)?, text.to_string()))
        }
        "pick" => {
            let mut parts = rest.split_whitespace();
            let field = parts.next().ok_or(ParseError::MissingArgument("field number"))?;
            let option = parts.next().ok_or(ParseError::MissingArgument("option number"))?;
            Ok(Command::Pick(position(field)?, position(option)?))
        }
        "clear" => Ok(Command::Clear(position(required(rest, "field number")?)?)),
        "add" => Ok(Command::Add),
        "rm" => {
            let text = required(rest, "record id")?;
            Uuid::parse_str(text)
                .map(Command::Remove)
                .map_err(|_| ParseError::InvalidId(text.to_string()))
        }
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn required<'a>(rest: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::MissingArgument(what))
    } else {
        Ok(rest)
    }
}

/// Parses a 1-based number into a 0-based index.
fn position(text: &str) -> Result<usize, ParseError> {
    match text.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(ParseError::InvalidNumber(text.to_string())),
    }
}
