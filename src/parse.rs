use log::debug;

use crate::{
    error::Origin, raw, BuildOptions, Catalog, FamilyProfile, LocationError, ParseError,
    PinAttributes, PinTable, Specifier, UNUSED_ANNOTATION,
};

impl PinAttributes {
    /// Loads the board wide default specifier.
    ///
    /// Every category except the location must be given, and the location
    /// must not be. A location the family does not have fails while parsing,
    /// before completeness is checked.
    pub fn from_default(
        input: &str,
        family: &FamilyProfile,
        line: Option<usize>,
    ) -> Result<Self, ParseError> {
        let spec = Specifier::parse(input, family, line)?;
        let attributes = spec
            .overrides
            .complete(UNUSED_ANNOTATION)
            .map_err(|category| ParseError::IncompleteDefault {
                category,
                at: Origin::new(input, line),
            })?;
        if spec.location.is_some() {
            return Err(ParseError::InvalidLocation {
                reason: LocationError::Forbidden,
                at: Origin::new(input, line),
            });
        }
        debug!("default pin configuration: {:?}", attributes);
        Ok(attributes)
    }
}

/// A validated board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub mcu_type: String,
    /// Supply voltage in hundredths of a volt, 3.3V is 330
    pub voltage: u32,
    pub family: FamilyProfile,
    pub default: PinAttributes,
    pub pins: PinTable,
}

/// Converts volts to hundredths of a volt, rounded to the nearest.
fn centivolts(voltage: f64) -> Result<u32, ParseError> {
    let centivolts = (voltage * 100.0).round();
    if !(0.0..=f64::from(u32::MAX)).contains(&centivolts) {
        return Err(ParseError::InvalidVoltage(voltage.to_string()));
    }
    Ok(centivolts as u32)
}

impl Board {
    pub fn from_definition(
        definition: &raw::BoardDefinition<'_>,
        catalog: &Catalog<'_>,
        options: &BuildOptions,
    ) -> Result<Self, ParseError> {
        let raw::BoardDefinition {
            mcu_type,
            voltage,
            default,
            pins,
        } = definition;

        let voltage = centivolts(*voltage)?;
        let family = *catalog.resolve(mcu_type)?;
        let default = PinAttributes::from_default(default, &family, None)?;
        let pins = PinTable::build(&family, &default, pins, options)?;

        Ok(Board {
            mcu_type: mcu_type.to_string(),
            voltage,
            family,
            default,
            pins,
        })
    }
}

impl<'a> TryFrom<raw::BoardDefinition<'a>> for Board {
    type Error = ParseError;

    fn try_from(value: raw::BoardDefinition<'a>) -> Result<Self, Self::Error> {
        Board::from_definition(&value, &Catalog::BUILTIN, &BuildOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{Category, Duplicate},
        IdleState, Location, Mode, OutputType, Port, Pull, Speed,
    };
    use rstest::*;

    const DEFAULT: &str = "INPUT,STARTLOW,PUSHPULL,LOWSPEED,PULLDOWN";

    fn family() -> FamilyProfile {
        *Catalog::BUILTIN.resolve("STM32L053").unwrap()
    }

    fn board<'a>(mcu_type: &'a str, pins: Vec<raw::PinEntry<'a>>) -> raw::BoardDefinition<'a> {
        raw::BoardDefinition {
            mcu_type,
            voltage: 3.3,
            default: DEFAULT,
            pins,
        }
    }

    #[test]
    fn complete_default_is_marked_unused() {
        let attributes = PinAttributes::from_default(DEFAULT, &family(), None).unwrap();
        assert_eq!(
            attributes,
            PinAttributes {
                mode: Mode::Input,
                idle_state: IdleState::Low,
                output_type: OutputType::PushPull,
                speed: Speed::Low,
                pull: Pull::PullDown,
                annotation: "unused".to_owned(),
            }
        );
    }

    #[rstest]
    #[case("STARTLOW,PUSHPULL,LOWSPEED,PULLDOWN", Category::Mode)]
    #[case("INPUT,PUSHPULL,LOWSPEED,PULLDOWN", Category::IdleState)]
    #[case("INPUT,STARTLOW,LOWSPEED,PULLDOWN", Category::OutputType)]
    #[case("INPUT,STARTLOW,PUSHPULL,PULLDOWN", Category::Speed)]
    #[case("INPUT,STARTLOW,PUSHPULL,LOWSPEED", Category::Pull)]
    #[case("PULLUP", Category::Mode)]
    #[case("", Category::Mode)]
    fn default_must_be_complete(#[case] input: &str, #[case] category: Category) {
        let err = PinAttributes::from_default(input, &family(), None).unwrap_err();
        assert_eq!(
            err,
            ParseError::IncompleteDefault {
                category,
                at: Origin::new(input, None),
            }
        );
    }

    #[test]
    fn default_cannot_name_a_location() {
        let input = "PA0,INPUT,STARTLOW,PUSHPULL,LOWSPEED,PULLDOWN";
        let err = PinAttributes::from_default(input, &family(), None).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLocation {
                reason: LocationError::Forbidden,
                at: Origin::new(input, None),
            }
        );
    }

    #[test]
    fn incomplete_default_reported_before_location() {
        let err = PinAttributes::from_default("PA0,INPUT", &family(), None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::IncompleteDefault {
                category: Category::IdleState,
                ..
            }
        ));
    }

    #[rstest]
    #[case("PZ0", LocationError::UnknownPort('Z'))]
    #[case("PA16,INPUT", LocationError::OutOfRange { number: 16, pins_per_port: 16 })]
    fn bad_default_location_fails_while_parsing(
        #[case] input: &str,
        #[case] reason: LocationError,
    ) {
        let err = PinAttributes::from_default(input, &family(), None).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLocation {
                reason,
                at: Origin::new(input, None),
            }
        );
    }

    #[test]
    fn board_definition_builds_table() {
        let definition = board(
            "STM32F401CCU6",
            vec![
                raw::PinEntry {
                    name: "led",
                    specifier: "PC13,OUTPUT,STARTHIGH",
                    line: Some(7),
                },
                raw::PinEntry {
                    name: "usart1_tx",
                    specifier: "PA9,AF7,HIGHSPEED",
                    line: Some(8),
                },
            ],
        );
        let board = Board::try_from(definition).unwrap();

        assert_eq!(board.mcu_type, "STM32F401CCU6");
        assert_eq!(board.voltage, 330);
        assert_eq!(board.family.label, "STM32F4xxxx");
        assert_eq!(board.pins.ports().len(), 9);
        assert_eq!(board.default.annotation, "unused");

        let tx = board.pins.get("USART1_TX").unwrap();
        assert_eq!(
            tx.location(),
            Location {
                port: Port('A'),
                number: 9
            }
        );
        assert_eq!(tx.attributes.alternate_function(), 7);
        assert_eq!(tx.attributes.speed, Speed::High);
        assert_eq!(tx.attributes.pull, Pull::PullDown);
        assert_eq!(tx.attributes.annotation, "af7 highspeed");

        let untouched = &board.pins.port('I').unwrap()[15];
        assert_eq!(untouched.name, "PIN15");
        assert_eq!(untouched.attributes, board.default);
    }

    #[rstest]
    #[case(3.3, Ok(330))]
    #[case(5.0, Ok(500))]
    #[case(1.8, Ok(180))]
    #[case(0.0, Ok(0))]
    #[case(-3.3, Err(ParseError::InvalidVoltage("-3.3".to_owned())))]
    #[case(f64::NAN, Err(ParseError::InvalidVoltage("NaN".to_owned())))]
    fn voltage_is_kept_in_centivolts(
        #[case] voltage: f64,
        #[case] expected: Result<u32, ParseError>,
    ) {
        assert_eq!(centivolts(voltage), expected);
    }

    #[test]
    fn invalid_voltage_rejects_board() {
        let definition = raw::BoardDefinition {
            voltage: -1.0,
            ..board("STM32F401CCU6", vec![])
        };
        let err = Board::try_from(definition).unwrap_err();
        assert_eq!(err, ParseError::InvalidVoltage("-1".to_owned()));
    }

    #[test]
    fn unknown_mcu_is_rejected() {
        let err = Board::try_from(board("RP2040", vec![])).unwrap_err();
        assert_eq!(err, ParseError::NoMatch("RP2040".to_owned()));
    }

    #[test]
    fn port_outside_family_is_rejected() {
        // STM32L0 parts have no port D
        let definition = board(
            "STM32L053R8",
            vec![raw::PinEntry {
                name: "led",
                specifier: "PD2,OUTPUT",
                line: Some(4),
            }],
        );
        let err = Board::try_from(definition).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidLocation {
                reason: LocationError::UnknownPort('D'),
                at: Origin::new("PD2,OUTPUT", Some(4)),
            }
        );
    }

    #[test]
    fn last_wins_is_opt_in() {
        let pins = vec![
            raw::PinEntry {
                name: "led",
                specifier: "PA5,OUTPUT",
                line: Some(1),
            },
            raw::PinEntry {
                name: "led",
                specifier: "PA6,OUTPUT",
                line: Some(2),
            },
        ];
        let definition = board("STM32L053R8", pins);

        let err = Board::try_from(definition.clone()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateAssignment {
                duplicate: Duplicate::Name,
                ..
            }
        ));

        let options = BuildOptions {
            duplicates: crate::DuplicatePolicy::LastWins,
        };
        let board = Board::from_definition(&definition, &Catalog::BUILTIN, &options).unwrap();
        assert_eq!(board.pins.get("LED").unwrap().number, 6);
    }
}
