use thiserror::Error;
use tracing::debug;

/// One of the six numbered menu options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Update,
    Delete,
    Get,
    List,
    SaveAndExit,
}

impl TryFrom<i64> for MenuChoice {
    type Error = ChoiceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Add),
            2 => Ok(Self::Update),
            3 => Ok(Self::Delete),
            4 => Ok(Self::Get),
            5 => Ok(Self::List),
            6 => Ok(Self::SaveAndExit),
            other => Err(ChoiceError::OutOfRange(other)),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ChoiceError {
    #[error("not a number: '{0}'")]
    NotANumber(String),

    #[error("no menu option {0}")]
    OutOfRange(i64),
}

/// Parse a menu selection line
///
/// # Errors
///
/// Returns `ChoiceError::NotANumber` if the trimmed line is not an integer,
/// or `ChoiceError::OutOfRange` if it is not between 1 and 6.
pub fn parse_menu_choice(line: &str) -> Result<MenuChoice, ChoiceError> {
    let trimmed = line.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ChoiceError::NotANumber(trimmed.to_string()))?;
    MenuChoice::try_from(value)
}

/// Trim surrounding whitespace (including the line terminator) from a field
#[must_use]
pub fn parse_text_field(line: &str) -> String {
    line.trim().to_string()
}

/// Parse a publication year, falling back to zero
#[must_use]
pub fn parse_year(line: &str) -> i64 {
    let trimmed = line.trim();
    trimmed.parse().unwrap_or_else(|_| {
        debug!(input = trimmed, "Publication year is not an integer, using 0");
        0
    })
}
