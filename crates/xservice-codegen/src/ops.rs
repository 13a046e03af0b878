//! Go operators usable in generated statements

use std::fmt;
use xservice_core::{GenError, GenResult};

/// A Go operator token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    LogicalOr,
    LogicalAnd,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Quo,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
    Assign,
    Define,
    Not,
    Arrow,
}

const SYMBOLS: [(Operator, &str); 23] = [
    (Operator::LogicalOr, "||"),
    (Operator::LogicalAnd, "&&"),
    (Operator::Equal, "=="),
    (Operator::NotEqual, "!="),
    (Operator::Less, "<"),
    (Operator::LessEqual, "<="),
    (Operator::Greater, ">"),
    (Operator::GreaterEqual, ">="),
    (Operator::Add, "+"),
    (Operator::Sub, "-"),
    (Operator::Or, "|"),
    (Operator::Xor, "^"),
    (Operator::Mul, "*"),
    (Operator::Quo, "/"),
    (Operator::Rem, "%"),
    (Operator::Shl, "<<"),
    (Operator::Shr, ">>"),
    (Operator::And, "&"),
    (Operator::AndNot, "&^"),
    (Operator::Assign, "="),
    (Operator::Define, ":="),
    (Operator::Not, "!"),
    (Operator::Arrow, "<-"),
];

impl Operator {
    pub fn symbol(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(op, _)| *op == self)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        SYMBOLS.iter().find(|(_, s)| *s == symbol).map(|(op, _)| *op)
    }

    /// Binary precedence, 0 for tokens that are not binary operators
    pub fn precedence(self) -> u8 {
        match self {
            Operator::LogicalOr => 1,
            Operator::LogicalAnd => 2,
            Operator::Equal
            | Operator::NotEqual
            | Operator::Less
            | Operator::LessEqual
            | Operator::Greater
            | Operator::GreaterEqual => 3,
            Operator::Add | Operator::Sub | Operator::Or | Operator::Xor => 4,
            Operator::Mul
            | Operator::Quo
            | Operator::Rem
            | Operator::Shl
            | Operator::Shr
            | Operator::And
            | Operator::AndNot => 5,
            Operator::Assign | Operator::Define | Operator::Not | Operator::Arrow => 0,
        }
    }

    /// Accept only comparison and logical operators
    pub(crate) fn check_condition(self) -> GenResult<Self> {
        if (1..=3).contains(&self.precedence()) {
            Ok(self)
        } else {
            Err(self.invalid("if"))
        }
    }

    /// Accept any binary operator
    pub(crate) fn check_binary(self) -> GenResult<Self> {
        if self.precedence() > 0 {
            Ok(self)
        } else {
            Err(self.invalid("operation"))
        }
    }

    fn invalid(self, scope: &'static str) -> GenError {
        GenError::InvalidOperator {
            op: self.symbol().to_string(),
            scope,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use test_case::test_case;

    #[test_case("==", Operator::Equal ; "equal")]
    #[test_case("&^", Operator::AndNot ; "and not")]
    #[test_case(":=", Operator::Define ; "define")]
    fn Operator___from_symbol___round_trips(symbol: &str, expected: Operator) {
        let op = Operator::from_symbol(symbol).unwrap();

        assert_eq!(op, expected);
        assert_eq!(op.to_string(), symbol);
    }

    #[test]
    fn Operator___from_symbol_unknown___none() {
        assert_eq!(Operator::from_symbol("=>"), None);
    }

    #[test_case(Operator::Equal, true ; "comparison")]
    #[test_case(Operator::LogicalAnd, true ; "logical")]
    #[test_case(Operator::Add, false ; "arithmetic")]
    #[test_case(Operator::Assign, false ; "assignment")]
    fn Operator___check_condition___only_comparisons(op: Operator, accepted: bool) {
        assert_eq!(op.check_condition().is_ok(), accepted);
    }

    #[test]
    fn Operator___check_binary_on_define___invalid_operator_error() {
        let err = Operator::Define.check_binary().unwrap_err();

        assert_eq!(err.to_string(), "operation is invalid in operation scope (:=)");
    }
}
