use std::{error::Error, fmt, fmt::Display, io};

use crate::frontend::position::Position;

#[derive(Debug)]
pub enum SeedError {
    Io { path: String, source: io::Error },
    UnexpectedCharacter { pos: Position, ch: char },
    UnterminatedString { pos: Position },
    DanglingEscape { pos: Position },
    SyntaxError { pos: Position, msg: String },
    Graphviz { source: io::Error },
}

impl SeedError {
    pub fn io(path: &str, source: io::Error) -> Self {
        SeedError::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Source position the error refers to, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            SeedError::Io { .. } | SeedError::Graphviz { .. } => None,
            SeedError::UnexpectedCharacter { pos, .. }
            | SeedError::UnterminatedString { pos }
            | SeedError::DanglingEscape { pos }
            | SeedError::SyntaxError { pos, .. } => Some(*pos),
        }
    }
}

impl Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Io { path, source } if source.kind() == io::ErrorKind::NotFound => {
                write!(f, "file `{}` does not exist", path)
            }
            SeedError::Io { path, source } => write!(f, "`{}`: {}", path, source),
            SeedError::UnexpectedCharacter { pos, ch } => {
                write!(f, "{}: unexpected character `{}`({})", pos, ch.escape_default(), *ch as u32)
            }
            SeedError::UnterminatedString { pos } => {
                write!(f, "{}: missing closing quote for string literal", pos)
            }
            SeedError::DanglingEscape { pos } => {
                write!(f, "{}: expected character after `\\`", pos)
            }
            SeedError::SyntaxError { pos, msg } => write!(f, "{}: {}", pos, msg),
            SeedError::Graphviz { source } => write!(f, "failed to run Graphviz `dot`: {}", source),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SeedError::Io { source, .. } | SeedError::Graphviz { source } => Some(source),
            _ => None,
        }
    }
}
