use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators a resolved path can be tested with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    #[default]
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
    /// LIKE pattern match
    Like,
    /// NOT LIKE pattern match
    NotLike,
    /// IN list
    In,
    /// NOT IN list
    NotIn,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
}

/// `$`-prefixed keys accepted in nested JSON operator objects.
pub const OPERATOR_KEYS: [(&str, Operator); 12] = [
    ("$eq", Operator::Eq),
    ("$ne", Operator::Ne),
    ("$gt", Operator::Gt),
    ("$gte", Operator::Gte),
    ("$lt", Operator::Lt),
    ("$lte", Operator::Lte),
    ("$like", Operator::Like),
    ("$notLike", Operator::NotLike),
    ("$in", Operator::In),
    ("$notIn", Operator::NotIn),
    ("$isNull", Operator::IsNull),
    ("$isNotNull", Operator::IsNotNull),
];

impl Operator {
    /// SQL spelling, shared by every supported dialect.
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// Look up a nested-object operator key such as `$gte`.
    pub fn from_key(key: &str) -> Option<Operator> {
        OPERATOR_KEYS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, op)| *op)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    pub fn is_null_test(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }

    /// Operators that read as "not equal to", used to pick IS NOT NULL.
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            Operator::Ne | Operator::NotIn | Operator::NotLike | Operator::IsNotNull
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_symbol())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Operator::Eq,
            "ne" | "!=" | "<>" => Operator::Ne,
            "gt" | ">" => Operator::Gt,
            "gte" | ">=" => Operator::Gte,
            "lt" | "<" => Operator::Lt,
            "lte" | "<=" => Operator::Lte,
            "like" => Operator::Like,
            "notlike" | "not-like" => Operator::NotLike,
            "in" => Operator::In,
            "notin" | "not-in" => Operator::NotIn,
            "isnull" | "is-null" => Operator::IsNull,
            "isnotnull" | "is-not-null" => Operator::IsNotNull,
            other => return Err(format!("unknown operator: {}", other)),
        };
        Ok(op)
    }
}
