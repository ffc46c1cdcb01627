use crate::{Input, Parse, ParseError, Parser, Position};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Step {
    #[default]
    Start,
    Integer,
    Fraction,
    ExponentSign,
    Exponent,
}

/// Parses a decimal number: optional sign, digits, optional fraction and
/// optional exponent.
///
/// Leading whitespace and commas are skipped. The number ends at the first
/// character that can't continue it, so `"0.6.5"` reads as `0.6` followed by
/// `.5` and `"1-2"` as `1` followed by `-2`.
#[derive(Clone, Debug, Default)]
pub struct NumberParser {
    step: Step,
    buffer: String,
    mantissa: bool,
    exponent: bool,
    position: Position,
}

impl NumberParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn error(self, input: &Input) -> ParseError {
        let mut src = self.buffer;
        if let Some(c) = input.head() {
            src.push(c);
        }
        ParseError::Number {
            src,
            position: self.position,
        }
    }

    fn finish(self, input: &Input) -> Parse<f64, Self> {
        let complete = match self.step {
            Step::ExponentSign | Step::Exponent => self.mantissa && self.exponent,
            _ => self.mantissa,
        };
        if !complete {
            return Parse::Error(self.error(input));
        }

        match self.buffer.parse::<f64>() {
            Ok(value) => Parse::Done(value),
            Err(_) => Parse::Error(self.error(input)),
        }
    }

    fn push(&mut self, c: char, input: &mut Input) {
        self.buffer.push(c);
        input.step();
    }
}

impl Parser for NumberParser {
    type Output = f64;

    fn parse(mut self, input: &mut Input) -> Parse<f64, Self> {
        loop {
            let Some(c) = input.head() else {
                if !input.is_last() {
                    return Parse::Cont(self);
                }
                if self.step == Step::Start {
                    return Parse::Error(ParseError::UnexpectedEnd {
                        position: input.position(),
                    });
                }
                return self.finish(input);
            };

            match self.step {
                Step::Start => {
                    if c.is_whitespace() || c == ',' {
                        input.step();
                        continue;
                    }

                    self.position = input.position();
                    match c {
                        '-' => self.push(c, input),
                        '+' => input.step(),
                        '.' | '0'..='9' => {}
                        _ => return Parse::Error(self.error(input)),
                    }
                    self.step = Step::Integer;
                }
                Step::Integer => match c {
                    '0'..='9' => {
                        self.mantissa = true;
                        self.push(c, input);
                    }
                    '.' => {
                        self.push(c, input);
                        self.step = Step::Fraction;
                    }
                    'e' | 'E' => {
                        self.push('e', input);
                        self.step = Step::ExponentSign;
                    }
                    _ => return self.finish(input),
                },
                Step::Fraction => match c {
                    '0'..='9' => {
                        self.mantissa = true;
                        self.push(c, input);
                    }
                    'e' | 'E' => {
                        self.push('e', input);
                        self.step = Step::ExponentSign;
                    }
                    _ => return self.finish(input),
                },
                Step::ExponentSign => {
                    if c == '-' || c == '+' {
                        self.push(c, input);
                    }
                    self.step = Step::Exponent;
                }
                Step::Exponent => match c {
                    '0'..='9' => {
                        self.exponent = true;
                        self.push(c, input);
                    }
                    _ => return self.finish(input),
                },
            }
        }
    }
}

#[cfg(test)]
fn parse_number(src: &str) -> Result<f64, ParseError> {
    NumberParser::new().parse_str(src)
}

#[test]
fn numbers() {
    assert_eq!(parse_number("0"), Ok(0.0));
    assert_eq!(parse_number("  ,12"), Ok(12.0));
    assert_eq!(parse_number("-1.5"), Ok(-1.5));
    assert_eq!(parse_number("+3"), Ok(3.0));
    assert_eq!(parse_number(".5"), Ok(0.5));
    assert_eq!(parse_number("1."), Ok(1.0));
    assert_eq!(parse_number("1e-2"), Ok(0.01));
    assert_eq!(parse_number("-1E3"), Ok(-1000.0));
    assert_eq!(parse_number("1.e-9"), Ok(1e-9));
    assert_eq!(parse_number("1e+2"), Ok(100.0));
}

#[test]
fn number_ends_at_first_invalid_character() {
    let mut input = Input::complete("0.6.5");
    assert_eq!(NumberParser::new().parse(&mut input).finish(&input), Ok(0.6));
    assert_eq!(input.rest(), ".5");

    let mut input = Input::complete("1-2");
    assert_eq!(NumberParser::new().parse(&mut input).finish(&input), Ok(1.0));
    assert_eq!(input.rest(), "-2");
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| matches!(parse_number(src), Err(ParseError::Number { .. }));

    assert!(bad_number("--1"));
    assert!(bad_number("1ee2"));
    assert!(bad_number("1e--1"));
    assert!(bad_number("*2"));
    assert!(bad_number("e"));
    assert!(bad_number("1e"));
    assert!(bad_number("."));
    assert!(bad_number("-"));
    assert_eq!(
        parse_number("  "),
        Err(ParseError::UnexpectedEnd {
            position: Position {
                offset: 2,
                line: 0,
                column: 2
            }
        })
    );
}

#[test]
fn resumes_in_the_middle_of_a_number() {
    let chunks = ["-1", "2.", "5e", "1"];
    let mut state = Parse::Cont(NumberParser::new());
    let mut position = Position::default();
    for (i, chunk) in chunks.iter().enumerate() {
        let mut input = Input::resume(chunk, i == chunks.len() - 1, position);
        state = state.feed(&mut input);
        position = input.position();
    }
    assert_eq!(state.finish(&Input::resume("", true, position)), Ok(-125.0));
}
