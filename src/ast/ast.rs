use std::fmt::Display;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Minus,
    Star,
    SlashSlash,
    Percent,
    Greater,
    Less,
    LessEquals,
    GreaterEquals,
    Equals,
    And,
    Or,
    Is,
}

/// Operators grouped by the typing rule they share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Arithmetic,
    Relational,
    Equality,
    Logical,
    Identity,
}

impl Op {
    pub fn from_symbol(symbol: &str) -> Option<Op> {
        let op = match symbol {
            "+" => Op::Plus,
            "-" => Op::Minus,
            "*" => Op::Star,
            "//" => Op::SlashSlash,
            "%" => Op::Percent,
            ">" => Op::Greater,
            "<" => Op::Less,
            "<=" => Op::LessEquals,
            ">=" => Op::GreaterEquals,
            "==" => Op::Equals,
            "and" => Op::And,
            "or" => Op::Or,
            "is" => Op::Is,
            _ => return None,
        };

        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::SlashSlash => "//",
            Op::Percent => "%",
            Op::Greater => ">",
            Op::Less => "<",
            Op::LessEquals => "<=",
            Op::GreaterEquals => ">=",
            Op::Equals => "==",
            Op::And => "and",
            Op::Or => "or",
            Op::Is => "is",
        }
    }

    pub fn class(&self) -> OpClass {
        match self {
            Op::Plus | Op::Minus | Op::Star | Op::SlashSlash | Op::Percent => OpClass::Arithmetic,
            Op::Greater | Op::Less | Op::LessEquals | Op::GreaterEquals => OpClass::Relational,
            Op::Equals => OpClass::Equality,
            Op::And | Op::Or => OpClass::Logical,
            Op::Is => OpClass::Identity,
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
