use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Failed to read an id from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to parse {kind} from string")]
pub struct ParseIdError {
    kind: &'static str,
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            #[must_use]
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            #[must_use]
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self).map_err(|_| ParseIdError {
                    kind: stringify!($name),
                })
            }
        }
    };
}

numeric_id!(
    /// Server-assigned problem id, stable across fetches of the same problem.
    ProblemId
);

numeric_id!(
    /// Server-assigned id of one recorded review.
    ReviewId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_id_round_trips_through_display() {
        let id = ProblemId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<ProblemId>().unwrap(), id);
        assert_eq!(format!("{id:?}"), "ProblemId(42)");
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = "forty-two".parse::<ProblemId>().unwrap_err();
        assert_eq!(err.to_string(), "failed to parse ProblemId from string");
        assert!("-1".parse::<ReviewId>().is_err());
    }
}
