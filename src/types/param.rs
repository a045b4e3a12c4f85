use std::fmt;

use num_bigint::BigInt;

/// A parameter passed to an expression predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Param {
    /// A 64-bit signed integer.
    Int(i64),
    /// A UTF-8 string, typically an address or a role name.
    Str(String),
    /// An arbitrary-precision integer for values that exceed 64 bits.
    BigInt(BigInt),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<u64> for Param {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Param::Int(v),
            Err(_) => Param::BigInt(BigInt::from(v)),
        }
    }
}

impl From<u128> for Param {
    fn from(v: u128) -> Self {
        Param::BigInt(BigInt::from(v))
    }
}

impl From<BigInt> for Param {
    fn from(v: BigInt) -> Self {
        Param::BigInt(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Str(v.to_owned())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Str(v)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(v) => write!(f, "{v}"),
            Param::Str(v) => write!(f, "{v}"),
            Param::BigInt(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_i64() {
        assert_eq!(Param::from(42_i64), Param::Int(42));
    }

    #[test]
    fn from_small_u64_stays_int() {
        assert_eq!(Param::from(7_u64), Param::Int(7));
    }

    #[test]
    fn from_large_u64_widens() {
        assert_eq!(Param::from(u64::MAX), Param::BigInt(BigInt::from(u64::MAX)));
    }

    #[test]
    fn from_u128() {
        let v = u128::from(u64::MAX) + 1;
        assert_eq!(Param::from(v), Param::BigInt(BigInt::from(v)));
    }

    #[test]
    fn from_str() {
        assert_eq!(Param::from("0xabc"), Param::Str("0xabc".to_owned()));
    }

    #[test]
    fn display() {
        assert_eq!(Param::Int(-3).to_string(), "-3");
        assert_eq!(Param::Str("ADMIN".into()).to_string(), "ADMIN");
        assert_eq!(
            Param::from(u128::MAX).to_string(),
            "340282366920938463463374607431768211455"
        );
    }
}
