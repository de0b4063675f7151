//! Row identifiers.
//!
//! Users, journeys and requests are keyed by integer row ids assigned by the
//! store. Each gets its own newtype so a journey id can never be passed
//! where a user id is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

row_id!(
    /// Identifier of a user in the identity store.
    UserId,
    "UserId"
);

row_id!(
    /// Identifier of a journey row.
    JourneyId,
    "JourneyId"
);

row_id!(
    /// Identifier of a request row.
    RequestId,
    "RequestId"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        assert_eq!(UserId(7).to_string(), "7");
        assert_eq!(format!("{:?}", JourneyId(3)), "JourneyId(3)");
        assert_eq!(format!("{:?}", RequestId(12)), "RequestId(12)");
    }

    #[test]
    fn parse_from_header_value() {
        assert_eq!("42".parse::<UserId>().unwrap(), UserId(42));
        assert_eq!(" 42 ".parse::<UserId>().unwrap(), UserId(42));
        assert!("abc".parse::<UserId>().is_err());
        assert!("-1".parse::<UserId>().is_err());
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&JourneyId(5)).unwrap(), "5");
        let id: RequestId = serde_json::from_str("9").unwrap();
        assert_eq!(id, RequestId(9));
    }
}
