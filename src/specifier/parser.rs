use log::trace;

use crate::{
    error::{Category, Origin},
    FamilyProfile, ParseError,
};

use super::{lexer::Token, Specifier};

pub(super) struct Parser<'a> {
    input: &'a str,
    family: &'a FamilyProfile,
    line: Option<usize>,
    seen: Vec<(Category, String)>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &'a str, family: &'a FamilyProfile, line: Option<usize>) -> Self {
        Self {
            input,
            family,
            line,
            seen: Vec::new(),
        }
    }

    fn origin(&self) -> Origin {
        Origin::new(self.input, self.line)
    }

    /// Records `word` as the only keyword of `category`.
    fn claim(&mut self, category: Category, word: &str) -> Result<(), ParseError> {
        if let Some((_, first)) = self.seen.iter().find(|(c, _)| *c == category) {
            return Err(ParseError::Conflict {
                category,
                first: first.clone(),
                second: word.to_owned(),
                at: self.origin(),
            });
        }
        self.seen.push((category, word.to_owned()));
        Ok(())
    }

    pub(super) fn parse(mut self) -> Result<Specifier, ParseError> {
        let mut spec = Specifier::default();
        let mut annotation = Vec::new();

        for word in self.input.split(',').map(str::trim) {
            if word.is_empty() {
                continue;
            }
            let word = word.to_uppercase();
            let Some(token) = Token::classify(&word) else {
                return Err(ParseError::UnknownToken {
                    found: word,
                    at: self.origin(),
                });
            };
            trace!("{:?} classified as {}", word, token.category());
            self.claim(token.category(), &word)?;

            let overrides = &mut spec.overrides;
            match token {
                Token::Location { port, number } => {
                    let location = self.family.locate(port, number).map_err(|reason| {
                        ParseError::InvalidLocation {
                            reason,
                            at: self.origin(),
                        }
                    })?;
                    spec.location = Some(location);
                    continue;
                }
                Token::Mode(mode) => overrides.mode = Some(mode),
                Token::IdleState(idle_state) => overrides.idle_state = Some(idle_state),
                Token::OutputType(output_type) => overrides.output_type = Some(output_type),
                Token::Speed(speed) => overrides.speed = Some(speed),
                Token::Pull(pull) => overrides.pull = Some(pull),
            }
            annotation.push(word.to_lowercase());
        }

        spec.annotation = annotation.join(" ");
        Ok(spec)
    }
}
