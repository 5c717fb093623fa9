//! The pin specifier mini-language.
//!
//! A specifier is a comma separated list of case-insensitive keywords, at most
//! one per [`Category`]:
//!
//! | category    | keywords                                             |
//! |-------------|------------------------------------------------------|
//! | location    | `P<port><number>`, e.g. `PA5`                        |
//! | mode        | `INPUT`, `OUTPUT`, `ANALOG`, `AF0` .. `AF15`         |
//! | idle state  | `STARTLOW`, `STARTHIGH`                              |
//! | output type | `PUSHPULL`, `OPENDRAIN`                              |
//! | speed       | `VERYLOWSPEED`, `LOWSPEED`, `MEDIUMSPEED`, `HIGHSPEED` |
//! | pull        | `FLOATING`, `PULLUP`, `PULLDOWN`                     |

use crate::{
    error::{Category, Origin},
    FamilyProfile, IdleState, Location, LocationError, Mode, OutputType, ParseError,
    PinAttributes, Pull, Speed,
};

mod lexer;
mod parser;

/// The attributes a specifier sets explicitly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinOverrides {
    pub mode: Option<Mode>,
    pub idle_state: Option<IdleState>,
    pub output_type: Option<OutputType>,
    pub speed: Option<Speed>,
    pub pull: Option<Pull>,
}

impl PinOverrides {
    /// Turns a complete override set into attributes, or names the first
    /// missing category.
    pub fn complete(&self, annotation: &str) -> Result<PinAttributes, Category> {
        Ok(PinAttributes {
            mode: self.mode.ok_or(Category::Mode)?,
            idle_state: self.idle_state.ok_or(Category::IdleState)?,
            output_type: self.output_type.ok_or(Category::OutputType)?,
            speed: self.speed.ok_or(Category::Speed)?,
            pull: self.pull.ok_or(Category::Pull)?,
            annotation: annotation.to_owned(),
        })
    }

    /// `base` with every category set here replaced.
    pub fn apply_to(&self, base: &PinAttributes, annotation: &str) -> PinAttributes {
        PinAttributes {
            mode: self.mode.unwrap_or(base.mode),
            idle_state: self.idle_state.unwrap_or(base.idle_state),
            output_type: self.output_type.unwrap_or(base.output_type),
            speed: self.speed.unwrap_or(base.speed),
            pull: self.pull.unwrap_or(base.pull),
            annotation: annotation.to_owned(),
        }
    }
}

/// A parsed specifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifier {
    pub location: Option<Location>,
    pub overrides: PinOverrides,
    /// Lowercase non-location keywords, space separated, in input order
    pub annotation: String,
}

impl Specifier {
    /// Parses `input` against the pin layout of `family`.
    ///
    /// `line` is only used to point diagnostics at the board definition.
    pub fn parse(
        input: &str,
        family: &FamilyProfile,
        line: Option<usize>,
    ) -> Result<Self, ParseError> {
        parser::Parser::new(input, family, line).parse()
    }

    /// Parses a named pin's specifier, which must give a location, and merges
    /// it onto `default`.
    pub fn parse_pin(
        input: &str,
        family: &FamilyProfile,
        line: Option<usize>,
        default: &PinAttributes,
    ) -> Result<(Location, PinAttributes), ParseError> {
        let spec = Self::parse(input, family, line)?;
        let location = spec.location.ok_or_else(|| ParseError::InvalidLocation {
            reason: LocationError::Missing,
            at: Origin::new(input, line),
        })?;
        Ok((location, spec.merge_onto(default)))
    }

    pub fn merge_onto(&self, default: &PinAttributes) -> PinAttributes {
        self.overrides.apply_to(default, &self.annotation)
    }
}
