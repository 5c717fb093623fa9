//! Turns a board's declarative pin configuration into a validated table of
//! GPIO pin descriptors for a microcontroller family.
//!
//! A board definition names an mcu type, a default pin specifier and a list of
//! named pins, each with a specifier such as `"PA5,OUTPUT,STARTHIGH,PULLUP"`.
//! Converting a [`raw::BoardDefinition`] into a [`Board`] resolves the mcu
//! family, validates the default and assembles the [`PinTable`] a header
//! renderer walks.

use std::fmt::Display;

mod error;
pub mod mcu;
mod parse;
pub mod raw;
pub mod specifier;
mod table;

pub use error::{Category, Duplicate, LocationError, Origin, ParseError};
pub use mcu::{Catalog, FamilyProfile};
pub use parse::Board;
pub use specifier::{PinOverrides, Specifier};
pub use table::{BuildOptions, DuplicatePolicy, PinTable};

/// Highest alternate function selector a pin can be routed to
pub const MAX_ALTERNATE_FUNCTION: u8 = 15;

/// Annotation carried by pins that were not given a purpose
pub const UNUSED_ANNOTATION: &str = "unused";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Input,
    Output,
    Analog,
    /// Routed to a peripheral through the given alternate function
    Alternate(u8),
}

/// Driven level right after initialization
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdleState {
    Low,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    PushPull,
    OpenDrain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    VeryLow,
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    Floating,
    PullUp,
    PullDown,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Input => f.write_str("INPUT"),
            Mode::Output => f.write_str("OUTPUT"),
            Mode::Analog => f.write_str("ANALOG"),
            Mode::Alternate(_) => f.write_str("ALTERNATE"),
        }
    }
}

impl Display for IdleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdleState::Low => f.write_str("LOW"),
            IdleState::High => f.write_str("HIGH"),
        }
    }
}

impl Display for OutputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputType::PushPull => f.write_str("PUSHPULL"),
            OutputType::OpenDrain => f.write_str("OPENDRAIN"),
        }
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speed::VeryLow => f.write_str("VERYLOW"),
            Speed::Low => f.write_str("LOW"),
            Speed::Medium => f.write_str("MEDIUM"),
            Speed::High => f.write_str("HIGH"),
        }
    }
}

impl Display for Pull {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pull::Floating => f.write_str("FLOATING"),
            Pull::PullUp => f.write_str("PULLUP"),
            Pull::PullDown => f.write_str("PULLDOWN"),
        }
    }
}

/// A fully resolved pin configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAttributes {
    pub mode: Mode,
    pub idle_state: IdleState,
    pub output_type: OutputType,
    pub speed: Speed,
    pub pull: Pull,
    /// Lowercase keywords this configuration was written with, passed
    /// through to the renderer
    pub annotation: String,
}

impl PinAttributes {
    /// The alternate function selector, 0 unless the pin is in alternate mode.
    pub fn alternate_function(&self) -> u8 {
        match self.mode {
            Mode::Alternate(af) => af,
            _ => 0,
        }
    }
}

/// A GPIO port letter
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(pub char);

impl Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A physical pin, e.g. `PA5`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub port: Port,
    pub number: u8,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}{}", self.port, self.number)
    }
}

/// A pin slot in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    pub name: String,
    pub port: Port,
    pub number: u8,
    pub attributes: PinAttributes,
}

impl Pin {
    pub fn location(&self) -> Location {
        Location {
            port: self.port,
            number: self.number,
        }
    }
}
