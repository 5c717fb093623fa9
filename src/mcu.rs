//! Mcu family catalog and fuzzy matching of part numbers against it.

use log::{debug, trace};

use crate::{Location, LocationError, ParseError, Port};

/// Label character that matches any character of an mcu type
pub const WILDCARD: char = 'x';

/// GPIO layout shared by a family of parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyProfile {
    /// Family label, lowercase `x` marks a wildcard position
    pub label: &'static str,
    pub ports: &'static [Port],
    pub pins_per_port: u8,
}

impl FamilyProfile {
    pub fn port_index(&self, port: Port) -> Option<usize> {
        self.ports.iter().position(|p| *p == port)
    }

    /// Checks that `port`/`number` names a pin of this family.
    pub fn locate(&self, port: char, number: u32) -> Result<Location, LocationError> {
        let port = Port(port);
        if self.port_index(port).is_none() {
            return Err(LocationError::UnknownPort(port.0));
        }
        match u8::try_from(number) {
            Ok(number) if number < self.pins_per_port => Ok(Location { port, number }),
            _ => Err(LocationError::OutOfRange {
                number,
                pins_per_port: self.pins_per_port,
            }),
        }
    }

    /// Number of label positions that must match exactly
    fn fixed_len(&self) -> usize {
        self.label.chars().filter(|c| *c != WILDCARD).count()
    }

    /// Positional similarity of `mcu_type` to the label.
    ///
    /// Every compared position scores +1 on a case-insensitive match and -1
    /// otherwise, wildcard positions score nothing. Comparison stops at the end
    /// of the shorter string.
    pub fn score(&self, mcu_type: &str) -> i32 {
        mcu_type
            .chars()
            .zip(self.label.chars())
            .map(|(c, l)| {
                if l == WILDCARD {
                    0
                } else if c.eq_ignore_ascii_case(&l) {
                    1
                } else {
                    -1
                }
            })
            .sum()
    }
}

const STM32F0_PORTS: [Port; 5] = [Port('A'), Port('B'), Port('C'), Port('D'), Port('F')];
const STM32F4_PORTS: [Port; 9] = [
    Port('A'),
    Port('B'),
    Port('C'),
    Port('D'),
    Port('E'),
    Port('F'),
    Port('G'),
    Port('H'),
    Port('I'),
];
const STM32L0_PORTS: [Port; 3] = [Port('A'), Port('B'), Port('C')];

const BUILTIN_FAMILIES: &[FamilyProfile] = &[
    FamilyProfile {
        label: "STM32F0xxxx",
        ports: &STM32F0_PORTS,
        pins_per_port: 16,
    },
    FamilyProfile {
        label: "STM32F4xxxx",
        ports: &STM32F4_PORTS,
        pins_per_port: 16,
    },
    FamilyProfile {
        label: "STM32L0xxxx",
        ports: &STM32L0_PORTS,
        pins_per_port: 16,
    },
];

/// A table of known mcu families
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    families: &'a [FamilyProfile],
}

impl Catalog<'static> {
    pub const BUILTIN: Self = Catalog {
        families: BUILTIN_FAMILIES,
    };
}

impl<'a> Catalog<'a> {
    pub const fn new(families: &'a [FamilyProfile]) -> Self {
        Self { families }
    }

    pub fn families(&self) -> &'a [FamilyProfile] {
        self.families
    }

    /// Picks the family whose label best matches `mcu_type`.
    ///
    /// Ties go to the label with more non-wildcard characters, then to the
    /// alphabetically first label. A best score of zero or less is no match.
    pub fn resolve(&self, mcu_type: &str) -> Result<&'a FamilyProfile, ParseError> {
        let best = self
            .families
            .iter()
            .map(|family| {
                let score = family.score(mcu_type);
                trace!("mcu type {} scores {} against {}", mcu_type, score, family.label);
                (score, family)
            })
            .max_by(|(score_a, a), (score_b, b)| {
                score_a
                    .cmp(score_b)
                    .then(a.fixed_len().cmp(&b.fixed_len()))
                    .then(b.label.cmp(a.label))
            });

        match best {
            Some((score, family)) if score > 0 => {
                debug!("resolved mcu type {} to family {}", mcu_type, family.label);
                Ok(family)
            }
            _ => Err(ParseError::NoMatch(mcu_type.to_owned())),
        }
    }
}

impl Default for Catalog<'static> {
    fn default() -> Self {
        Catalog::BUILTIN
    }
}
