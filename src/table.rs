use std::collections::{BTreeMap, HashMap};

use log::{trace, warn};

use crate::{
    error::{Duplicate, Origin},
    raw, FamilyProfile, Location, ParseError, Pin, PinAttributes, Port, Specifier,
};

/// What to do when two named pins share a name or a location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with [`ParseError::DuplicateAssignment`]
    #[default]
    Reject,
    /// The later pin overwrites the earlier one
    LastWins,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub duplicates: DuplicatePolicy,
}

/// Every pin of an mcu family, with the named ones indexed by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinTable {
    family: FamilyProfile,
    /// One row per port, in family port order
    grid: Box<[Box<[Pin]>]>,
    named: BTreeMap<String, Pin>,
}

impl PinTable {
    /// A table where every pin is unnamed (`PIN<n>`) and has `default` attributes.
    pub fn new(family: &FamilyProfile, default: &PinAttributes) -> Self {
        let grid = family
            .ports
            .iter()
            .map(|port| {
                (0..family.pins_per_port)
                    .map(|number| Pin {
                        name: format!("PIN{}", number),
                        port: *port,
                        number,
                        attributes: default.clone(),
                    })
                    .collect::<Box<[Pin]>>()
            })
            .collect();
        Self {
            family: *family,
            grid,
            named: BTreeMap::new(),
        }
    }

    /// Builds the table for `family`, applying the named pins in order.
    ///
    /// Stops at the first pin that fails to parse.
    pub fn build(
        family: &FamilyProfile,
        default: &PinAttributes,
        pins: &[raw::PinEntry<'_>],
        options: &BuildOptions,
    ) -> Result<Self, ParseError> {
        let mut table = Self::new(family, default);
        let mut owners: HashMap<Location, String> = HashMap::new();

        for entry in pins {
            let name = entry.name.to_uppercase();
            let (location, attributes) =
                Specifier::parse_pin(entry.specifier, family, entry.line, default)?;
            let at = || Origin::new(entry.specifier, entry.line);

            let duplicate = if table.named.contains_key(&name) {
                Some(Duplicate::Name)
            } else {
                owners.get(&location).map(|previous| Duplicate::Location {
                    location,
                    previous: previous.clone(),
                })
            };
            if let Some(duplicate) = duplicate {
                match options.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(ParseError::DuplicateAssignment {
                            name,
                            duplicate,
                            at: at(),
                        })
                    }
                    DuplicatePolicy::LastWins => {
                        warn!("{}: pin {} {}, overwriting", at(), name, duplicate)
                    }
                }
            }

            trace!("assigning {} to {}", location, name);
            let pin = Pin {
                name: name.clone(),
                port: location.port,
                number: location.number,
                attributes,
            };
            let Some(slot) = table.slot_mut(location) else {
                unreachable!("{} was located in {}", location, family.label);
            };
            *slot = pin.clone();
            owners.insert(location, name.clone());
            table.named.insert(name, pin);
        }

        Ok(table)
    }

    fn slot_mut(&mut self, location: Location) -> Option<&mut Pin> {
        let index = self.family.port_index(location.port)?;
        self.grid
            .get_mut(index)?
            .get_mut(usize::from(location.number))
    }

    pub fn family(&self) -> &FamilyProfile {
        &self.family
    }

    /// Named pins, sorted by name
    pub fn names(&self) -> impl Iterator<Item = &Pin> {
        self.named.values()
    }

    pub fn get(&self, name: &str) -> Option<&Pin> {
        self.named.get(&name.to_uppercase())
    }

    /// Port letters, sorted
    pub fn ports(&self) -> Vec<Port> {
        let mut ports = self.family.ports.to_vec();
        ports.sort();
        ports
    }

    /// All pins of `port` in pin number order, named or not.
    pub fn port(&self, port: char) -> Option<&[Pin]> {
        let index = self.family.port_index(Port(port.to_ascii_uppercase()))?;
        self.grid.get(index).map(|pins| &pins[..])
    }
}
