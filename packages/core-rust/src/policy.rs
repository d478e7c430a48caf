//! Runtime names for bridge policies.
//!
//! Each bridge adapter is its own type, so the policy is fixed once the adapter
//! is built. [`PolicyKind`] names that choice at runtime: adapters report it via
//! [`Bridged::policy`](crate::Bridged::policy), tracing events carry it as a
//! field, and callers that pick a policy from their own configuration can parse
//! it from a string or deserialize it with serde.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Input position returned by the operand fallback of same-typed n-ary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// First input.
    Left,
    /// Second input of a ternary operator.
    Middle,
    /// Last input.
    Right,
}

impl Operand {
    /// Lowercase name used by `Display`, `FromStr`, and serde.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            other => Err(ParseError::UnknownOperand(other.to_string())),
        }
    }
}

/// The failure-handling strategy applied by a bridge adapter.
///
/// Serializes as the same string `Display` produces, e.g. `"ignore-all"` or
/// `"fallback-operand(left)"`, so a name read from configuration parses the
/// same way through `FromStr` and serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PolicyKind {
    /// Checked failures are wrapped and returned.
    Nest,
    /// Checked failures select a fallback operation.
    Recover,
    /// Any failure, panics included, switches to a fixed fallback operation.
    OrElse,
    /// Checked failures are escalated to a caller-chosen error.
    OrThrow,
    /// Checked failures of a consumer are swallowed.
    Ignore,
    /// Every failure of a consumer is swallowed, panics included.
    IgnoreAll,
    /// Checked failures yield a constant.
    FallbackValue,
    /// Checked failures yield a freshly supplied value.
    FallbackSupplier,
    /// Checked failures yield one of the inputs.
    FallbackOperand(Operand),
}

impl PolicyKind {
    /// Whether adapters with this policy catch panics from the inner operation.
    #[must_use]
    pub const fn catches_panics(self) -> bool {
        matches!(self, Self::OrElse | Self::IgnoreAll)
    }

    /// Whether the adapted operation can still report a failure through its
    /// return type.
    ///
    /// `Recover` answers `false`: the handler's fallback always produces a
    /// value. [`TryRecover`](crate::bridge::TryRecover) also reports `Recover`
    /// but returns `Result` for a declined recovery, which is misuse rather than
    /// a failure of the wrapped operation.
    #[must_use]
    pub const fn is_fallible(self) -> bool {
        matches!(self, Self::Nest | Self::OrThrow)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nest => "nest",
            Self::Recover => "recover",
            Self::OrElse => "or-else",
            Self::OrThrow => "or-throw",
            Self::Ignore => "ignore",
            Self::IgnoreAll => "ignore-all",
            Self::FallbackValue => "fallback-value",
            Self::FallbackSupplier => "fallback-supplier",
            Self::FallbackOperand(operand) => return write!(f, "fallback-operand({operand})"),
        };
        f.write_str(name)
    }
}

impl FromStr for PolicyKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim() {
            "nest" => Self::Nest,
            "recover" => Self::Recover,
            "or-else" => Self::OrElse,
            "or-throw" => Self::OrThrow,
            "ignore" => Self::Ignore,
            "ignore-all" => Self::IgnoreAll,
            "fallback-value" => Self::FallbackValue,
            "fallback-supplier" => Self::FallbackSupplier,
            other => {
                let operand = other
                    .strip_prefix("fallback-operand(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .ok_or_else(|| ParseError::UnknownPolicy(other.to_string()))?;
                Self::FallbackOperand(operand.parse()?)
            }
        };
        Ok(kind)
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PolicyKind> for String {
    fn from(kind: PolicyKind) -> Self {
        kind.to_string()
    }
}
