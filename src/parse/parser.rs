use super::error::{DieParseError, ParseErrorKind};
use super::lexer::*;
use crate::common::*;
use crate::dice::{DieType, MultiDie};
use crate::expr::*;
use logos_iter::LogosIter;
use std::ops::Range;

type PResult<T> = Result<T, DieParseError>;

pub(crate) struct Parser<'a> {
    lexer: Lexer<'a>,
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: lexer(input),
            input,
        }
    }

    pub fn parse(mut self) -> PResult<Expression> {
        self.check_not_empty()?;
        self.parse_expression()
    }

    pub fn parse_multi_die(mut self) -> PResult<MultiDie> {
        self.check_not_empty()?;
        if !self.matches(TokenKind::Dice) {
            return self.unexpected_token(vec![TokenKind::Dice]);
        }
        let die = self.parse_dice()?;
        self.expect_end(Vec::new())?;
        Ok(die)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.lexer
            .peek()
            .map_or(false, |peeked| options.contains(peeked))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.advance();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    /// The source text of the token that was just consumed.
    fn current_slice(&mut self) -> &'a str {
        let input = self.input;
        &input[self.lexer.span()]
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        let span = self.lexer.span();
        self.error_at(span, kind)
    }

    fn error_at<T>(&self, span: Range<usize>, kind: ParseErrorKind) -> PResult<T> {
        Err(DieParseError {
            kind,
            slice: self.input[span.clone()].to_owned(),
            span,
            input: self.input.to_owned(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        match self.advance() {
            None => {
                let end = self.input.len();
                self.error_at(end..end, ParseErrorKind::UnexpectedEnd { expected })
            }
            Some(TokenKind::Error | TokenKind::Word) => {
                let span = self.lexer.span();
                let word = self.word_at(span.clone());
                self.error_at(
                    span.start..span.start + word.len(),
                    ParseErrorKind::Unrecognized(word.to_owned()),
                )
            }
            Some(_) => {
                let found = self.current_slice().to_owned();
                self.error(ParseErrorKind::UnexpectedToken { found, expected })
            }
        }
    }

    // Widens an unrecognized token to the whitespace-delimited word it starts,
    // so the user sees `WTF` rather than `W`.
    fn word_at(&self, span: Range<usize>) -> &'a str {
        let input = self.input;
        let rest = &input[span.start..];
        let len = rest
            .find(char::is_whitespace)
            .unwrap_or(rest.len())
            .max(span.end - span.start);
        &rest[..len]
    }

    fn check_not_empty(&self) -> PResult<()> {
        if self.input.trim().is_empty() {
            self.error_at(0..self.input.len(), ParseErrorKind::Empty)
        } else {
            Ok(())
        }
    }

    fn expect_end(&mut self, expected: Vec<TokenKind>) -> PResult<()> {
        if self.lexer.peek().is_some() {
            self.unexpected_token(expected)
        } else {
            Ok(())
        }
    }

    fn parse_expression(&mut self) -> PResult<Expression> {
        let first_term = self.parse_labeled_term()?;
        let mut last_labeled = first_term.label.is_some();
        let mut term_ops = Vec::new();

        while self.matches_any(TokenKind::OPERATORS) {
            let operation = match self.advance() {
                Some(TokenKind::Plus) => Operation::Add,
                _ => Operation::Sub,
            };
            let labeled_term = self.parse_labeled_term()?;
            last_labeled = labeled_term.label.is_some();
            term_ops.push(TermOperation::new(operation, labeled_term));
        }

        let mut expected = TokenKind::OPERATORS.to_vec();
        if !last_labeled {
            expected.push(TokenKind::Label);
        }
        self.expect_end(expected)?;

        Ok(Expression::from_parts(first_term, term_ops))
    }

    fn parse_labeled_term(&mut self) -> PResult<LabeledTerm> {
        let term = match self.lexer.peek().copied() {
            Some(TokenKind::Integer) => Term::Int(self.parse_integer()?),
            Some(TokenKind::Dice) => Term::MultiDie(self.parse_dice()?),
            _ => return self.unexpected_token(TokenKind::TERMS.to_vec()),
        };

        let label = if self.matches(TokenKind::Label) {
            Some(self.parse_label()?)
        } else {
            None
        };

        Ok(LabeledTerm { term, label })
    }

    fn parse_integer(&mut self) -> PResult<Int> {
        self.consume(TokenKind::Integer)?;
        let slice = self.current_slice();
        slice
            .parse()
            .or_else(|_| self.error(ParseErrorKind::IntegerOutOfRange(slice.to_owned())))
    }

    fn parse_dice(&mut self) -> PResult<MultiDie> {
        self.consume(TokenKind::Dice)?;
        let slice = self.current_slice();

        let (multiplier, sides) = match slice.split_once(|c: char| c == 'd' || c == 'D') {
            Some(parts) => parts,
            None => return self.error(ParseErrorKind::Unrecognized(slice.to_owned())),
        };
        let multiplier = if multiplier.is_empty() {
            1
        } else {
            match multiplier.parse::<UInt>() {
                Ok(x) => x,
                Err(_) => return self.error(ParseErrorKind::IntegerOutOfRange(multiplier.to_owned())),
            }
        };
        let sides = match sides.parse::<UInt>() {
            Ok(x) => x,
            Err(_) => return self.error(ParseErrorKind::IntegerOutOfRange(sides.to_owned())),
        };

        DieType::try_from(sides)
            .and_then(|die| MultiDie::new(die, multiplier))
            .or_else(|reason| {
                self.error(ParseErrorKind::InvalidDie {
                    die: slice.to_owned(),
                    reason,
                })
            })
    }

    fn parse_label(&mut self) -> PResult<Label> {
        self.consume(TokenKind::Label)?;
        let slice = self.current_slice();
        Label::new(&slice[1..slice.len() - 1]).or_else(|reason| {
            self.error(ParseErrorKind::InvalidLabel {
                label: slice.to_owned(),
                reason,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidConfiguration;
    use crate::expr::LabelError;

    fn parse(s: &str) -> PResult<Expression> {
        Parser::new(s).parse()
    }

    fn check(s: &str, first: LabeledTerm, rest: Vec<TermOperation>) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed, Expression::new(first, rest).unwrap());
    }

    fn check_err(s: &str, expected: ParseErrorKind) {
        let err = parse(s).unwrap_err();
        assert_eq!(err.kind, expected, "{}", err);
        assert_eq!(err.input, s);
    }

    fn d(n: UInt, die: DieType) -> LabeledTerm {
        LabeledTerm::new(MultiDie::new(die, n).unwrap())
    }

    fn labeled(term: LabeledTerm, label: &str) -> LabeledTerm {
        LabeledTerm::labeled(term.term, label).unwrap()
    }

    #[test]
    fn test_parse_integer() {
        check("6", LabeledTerm::new(6), vec![]);
        check("101  (stu)", labeled(LabeledTerm::new(101), "stu"), vec![]);
        check("99 (mno mno mno)", labeled(LabeledTerm::new(99), "mno mno mno"), vec![]);
    }

    #[test]
    fn test_parse_dice() {
        for die in DieType::ALL {
            check(&format!("D{}", die.sides()), d(1, die), vec![]);
        }
        check("d6", d(1, DieType::D6), vec![]);
        check("1d6", d(1, DieType::D6), vec![]);
        check("1D6", d(1, DieType::D6), vec![]);
        check("2D6", d(2, DieType::D6), vec![]);
        check("D6(def)", labeled(d(1, DieType::D6), "def"), vec![]);
        check("2D10  (vwxyz)", labeled(d(2, DieType::D10), "vwxyz"), vec![]);
    }

    #[test]
    fn test_parse_expression() {
        check(
            "3D6 -1",
            d(3, DieType::D6),
            vec![TermOperation::sub(LabeledTerm::new(1))],
        );
        check(
            "3D6 - 1",
            d(3, DieType::D6),
            vec![TermOperation::sub(LabeledTerm::new(1))],
        );
        check(
            "D8 (Sword) - 1 (STR) + D4",
            labeled(d(1, DieType::D8), "Sword"),
            vec![
                TermOperation::sub(labeled(LabeledTerm::new(1), "STR")),
                TermOperation::add(d(1, DieType::D4)),
            ],
        );
        check(
            "  D20-2(INT)+D4 (Acid)+2d6(Fire)  ",
            d(1, DieType::D20),
            vec![
                TermOperation::sub(labeled(LabeledTerm::new(2), "INT")),
                TermOperation::add(labeled(d(1, DieType::D4), "Acid")),
                TermOperation::add(labeled(d(2, DieType::D6), "Fire")),
            ],
        );
    }

    #[test]
    fn test_err_unrecognized() {
        check_err("WTF", ParseErrorKind::Unrecognized("WTF".into()));
        check_err("3D6 + WTF", ParseErrorKind::Unrecognized("WTF".into()));
        check_err("2d20x", ParseErrorKind::Unrecognized("2d20x".into()));
        check_err("3 * 2", ParseErrorKind::Unrecognized("*".into()));

        let err = parse("WTF").unwrap_err();
        assert_eq!(err.slice, "WTF");
        assert_eq!(err.span, 0..3);
        assert!(err.to_string().contains("`WTF`"), "{}", err);
    }

    #[test]
    fn test_err_invalid_die() {
        check_err(
            "D99",
            ParseErrorKind::InvalidDie {
                die: "D99".into(),
                reason: InvalidConfiguration::UnsupportedSides { sides: 99 },
            },
        );
        check_err(
            "0D10",
            ParseErrorKind::InvalidDie {
                die: "0D10".into(),
                reason: InvalidConfiguration::MultiplierTooSmall(0),
            },
        );
        check_err(
            "1001d6",
            ParseErrorKind::InvalidDie {
                die: "1001d6".into(),
                reason: InvalidConfiguration::MultiplierTooLarge(1001),
            },
        );
        let err = parse("2 + 3D7").unwrap_err();
        assert_eq!(err.slice, "3D7");
        assert!(
            err.to_string()
                .ends_with("`3D7`: 7-sided dice not supported. Must be one of: 4, 6, 8, 10, 12, 20, 100"),
            "{}",
            err
        );
    }

    #[test]
    fn test_err_label() {
        check_err(
            "D6 (abcdefghijklmnopqrstuvwxyz)",
            ParseErrorKind::InvalidLabel {
                label: "(abcdefghijklmnopqrstuvwxyz)".into(),
                reason: LabelError::TooLong(26),
            },
        );
        check_err(
            "D6 ()",
            ParseErrorKind::InvalidLabel {
                label: "()".into(),
                reason: LabelError::Empty,
            },
        );
        check_err(
            "D6 (a.b)",
            ParseErrorKind::InvalidLabel {
                label: "(a.b)".into(),
                reason: LabelError::InvalidChar('.'),
            },
        );
        check_err(
            "D6 (STR) (DEX)",
            ParseErrorKind::UnexpectedToken {
                found: "(DEX)".into(),
                expected: vec![TokenKind::Plus, TokenKind::Minus],
            },
        );
    }

    #[test]
    fn test_err_structure() {
        check_err("", ParseErrorKind::Empty);
        check_err("   ", ParseErrorKind::Empty);
        check_err(
            "3D6 +",
            ParseErrorKind::UnexpectedEnd {
                expected: vec![TokenKind::Integer, TokenKind::Dice],
            },
        );
        check_err(
            "-1",
            ParseErrorKind::UnexpectedToken {
                found: "-".into(),
                expected: vec![TokenKind::Integer, TokenKind::Dice],
            },
        );
        check_err(
            "3 D6",
            ParseErrorKind::UnexpectedToken {
                found: "D6".into(),
                expected: vec![TokenKind::Plus, TokenKind::Minus, TokenKind::Label],
            },
        );
        check_err(
            "1 + + 2",
            ParseErrorKind::UnexpectedToken {
                found: "+".into(),
                expected: vec![TokenKind::Integer, TokenKind::Dice],
            },
        );
        check_err(
            "99999999999999999999",
            ParseErrorKind::IntegerOutOfRange("99999999999999999999".into()),
        );
    }

    #[test]
    fn test_parse_multi_die() {
        assert_eq!(
            Parser::new("3d8").parse_multi_die(),
            Ok(MultiDie::new(DieType::D8, 3).unwrap())
        );
        let err = Parser::new("D20 + 1").parse_multi_die().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                found: "+".into(),
                expected: vec![],
            }
        );
        let err = Parser::new("20").parse_multi_die().unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                found: "20".into(),
                expected: vec![TokenKind::Dice],
            }
        );
    }
}
