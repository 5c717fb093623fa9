use std::fmt::Display;

use thiserror::Error;

use crate::Location;

/// Board definition errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{at}: {category} given twice ('{first}' and '{second}')")]
    Conflict {
        category: Category,
        first: String,
        second: String,
        at: Origin,
    },
    #[error("{at}: invalid pin keyword '{found}'")]
    UnknownToken { found: String, at: Origin },
    #[error("{at}: default must specify {}", .category.choices())]
    IncompleteDefault { category: Category, at: Origin },
    #[error("{at}: {reason}")]
    InvalidLocation { reason: LocationError, at: Origin },
    #[error("no matching mcu type definition found for '{0}'")]
    NoMatch(String),
    #[error("invalid supply voltage {0}")]
    InvalidVoltage(String),
    #[error("{at}: pin {name} {duplicate}")]
    DuplicateAssignment {
        name: String,
        duplicate: Duplicate,
        at: Origin,
    },
}

/// Attribute category a specifier token belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Location,
    Mode,
    IdleState,
    OutputType,
    Speed,
    Pull,
}

impl Category {
    /// Keywords accepted for this category, for diagnostics.
    pub fn choices(&self) -> &'static str {
        match self {
            Category::Location => "a location such as PA0",
            Category::Mode => "either INPUT, OUTPUT, ANALOG or an AF",
            Category::IdleState => "either STARTLOW or STARTHIGH",
            Category::OutputType => "either PUSHPULL or OPENDRAIN",
            Category::Speed => "either VERYLOWSPEED, LOWSPEED, MEDIUMSPEED or HIGHSPEED",
            Category::Pull => "either FLOATING, PULLUP or PULLDOWN",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Location => "location",
            Category::Mode => "mode",
            Category::IdleState => "idle state",
            Category::OutputType => "output type",
            Category::Speed => "speed",
            Category::Pull => "pull",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("a default cannot name a pin location")]
    Forbidden,
    #[error("no location given, expected a location such as PA0")]
    Missing,
    #[error("port {0} does not exist on this mcu")]
    UnknownPort(char),
    #[error("pin number {number} is out of range, ports have {pins_per_port} pins")]
    OutOfRange { number: u32, pins_per_port: u8 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Duplicate {
    #[error("is defined more than once")]
    Name,
    #[error("uses {location}, already assigned to {previous}")]
    Location { location: Location, previous: String },
}

/// The specifier text an error refers to, and its source line when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub text: String,
    pub line: Option<usize>,
}

impl Origin {
    pub fn new(text: &str, line: Option<usize>) -> Self {
        Self {
            text: text.to_owned(),
            line,
        }
    }
}

impl Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "at line {} - '{}'", line, self.text),
            None => write!(f, "in '{}'", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Some(4), "at line 4 - 'PA5,FOO': invalid pin keyword 'FOO'")]
    #[case(None, "in 'PA5,FOO': invalid pin keyword 'FOO'")]
    fn unknown_token_message_names_origin(#[case] line: Option<usize>, #[case] expected: &str) {
        let err = ParseError::UnknownToken {
            found: "FOO".to_owned(),
            at: Origin::new("PA5,FOO", line),
        };
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn incomplete_default_lists_choices() {
        let err = ParseError::IncompleteDefault {
            category: Category::Speed,
            at: Origin::new("INPUT", None),
        };
        assert_eq!(
            err.to_string(),
            "in 'INPUT': default must specify either VERYLOWSPEED, LOWSPEED, MEDIUMSPEED or HIGHSPEED"
        );
    }
}
