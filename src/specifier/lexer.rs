use logos::{Lexer, Logos};

use crate::{error::Category, IdleState, Mode, OutputType, Pull, Speed, MAX_ALTERNATE_FUNCTION};

/// A single classified specifier keyword
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Token {
    Location { port: char, number: u32 },
    Mode(Mode),
    IdleState(IdleState),
    OutputType(OutputType),
    Speed(Speed),
    Pull(Pull),
}

impl Token {
    /// Classifies one trimmed, upper-cased keyword.
    ///
    /// The keyword must lex as exactly one token covering all of `word`, so
    /// `INPUTS` or `PA5X` are rejected rather than split.
    pub(super) fn classify(word: &str) -> Option<Self> {
        let mut lexer = LogosToken::lexer(word);
        let token = lexer.next()?.ok()?;
        if lexer.span() != (0..word.len()) || lexer.next().is_some() {
            return None;
        }
        let token = match token {
            LogosToken::Unrecognized => return None,
            LogosToken::Location((port, number)) => Token::Location { port, number },
            LogosToken::Input => Token::Mode(Mode::Input),
            LogosToken::Output => Token::Mode(Mode::Output),
            LogosToken::Analog => Token::Mode(Mode::Analog),
            LogosToken::AlternateFunction(af) => Token::Mode(Mode::Alternate(af)),
            LogosToken::StartLow => Token::IdleState(IdleState::Low),
            LogosToken::StartHigh => Token::IdleState(IdleState::High),
            LogosToken::PushPull => Token::OutputType(OutputType::PushPull),
            LogosToken::OpenDrain => Token::OutputType(OutputType::OpenDrain),
            LogosToken::VeryLowSpeed => Token::Speed(Speed::VeryLow),
            LogosToken::LowSpeed => Token::Speed(Speed::Low),
            LogosToken::MediumSpeed => Token::Speed(Speed::Medium),
            LogosToken::HighSpeed => Token::Speed(Speed::High),
            LogosToken::Floating => Token::Pull(Pull::Floating),
            LogosToken::PullUp => Token::Pull(Pull::PullUp),
            LogosToken::PullDown => Token::Pull(Pull::PullDown),
        };
        Some(token)
    }

    pub(super) fn category(&self) -> Category {
        match self {
            Token::Location { .. } => Category::Location,
            Token::Mode(_) => Category::Mode,
            Token::IdleState(_) => Category::IdleState,
            Token::OutputType(_) => Category::OutputType,
            Token::Speed(_) => Category::Speed,
            Token::Pull(_) => Category::Pull,
        }
    }
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
enum LogosToken {
    #[regex(r"P[A-Z][0-9]+", location)]
    Location((char, u32)),
    #[token("INPUT")]
    Input,
    #[token("OUTPUT")]
    Output,
    #[token("ANALOG")]
    Analog,
    #[regex(r"AF[0-9]+", alternate_function)]
    AlternateFunction(u8),
    #[token("STARTLOW")]
    StartLow,
    #[token("STARTHIGH")]
    StartHigh,
    #[token("PUSHPULL")]
    PushPull,
    #[token("OPENDRAIN")]
    OpenDrain,
    #[token("VERYLOWSPEED")]
    VeryLowSpeed,
    #[token("LOWSPEED")]
    LowSpeed,
    #[token("MEDIUMSPEED")]
    MediumSpeed,
    #[token("HIGHSPEED")]
    HighSpeed,
    #[token("FLOATING")]
    Floating,
    #[token("PULLUP")]
    PullUp,
    #[token("PULLDOWN")]
    PullDown,
    /// Anything else, so a keyword followed by junk lexes as one bad token
    #[regex(r"[^,]+", priority = 1)]
    Unrecognized,
}

fn location(lex: &mut Lexer<'_, LogosToken>) -> Option<(char, u32)> {
    let slice = lex.slice();
    let port = slice[1..].chars().next()?;
    // Too many digits for u32 is still a location, just out of range
    let number = slice[2..].parse().unwrap_or(u32::MAX);
    Some((port, number))
}

fn alternate_function(lex: &mut Lexer<'_, LogosToken>) -> Option<u8> {
    lex.slice()[2..]
        .parse()
        .ok()
        .filter(|af| *af <= MAX_ALTERNATE_FUNCTION)
}
