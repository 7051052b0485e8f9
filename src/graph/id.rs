//! Identity types for the flow graph.
//!
//! Ids are newtypes over `u32` handed out by the [`GraphStore`](super::GraphStore)
//! counters. They display and serialize as `n<k>` / `e<k>`, which is the shape
//! the surrounding application persists.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Failure to parse an id string such as `n12`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} id '{input}'")]
pub struct ParseIdError {
    kind: &'static str,
    input: String,
}

/// Plain decimal digits without sign or leading zeros, so parsing never
/// rewrites an id.
fn is_canonical_number(digits: &str) -> bool {
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
}

macro_rules! graph_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({}{})"), $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix($prefix)
                    .filter(|digits| is_canonical_number(digits))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .map($name)
                    .ok_or_else(|| ParseIdError {
                        kind: $kind,
                        input: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

graph_id!(
    /// Identifier of a node, unique within its graph.
    NodeId,
    "n",
    "node"
);

graph_id!(
    /// Identifier of an edge, unique within its graph.
    EdgeId,
    "e",
    "edge"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(NodeId(1).to_string(), "n1");
        assert_eq!(EdgeId(42).to_string(), "e42");
        assert_eq!("n7".parse::<NodeId>(), Ok(NodeId(7)));
        assert_eq!("e3".parse::<EdgeId>(), Ok(EdgeId(3)));
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        assert!("e1".parse::<NodeId>().is_err());
        assert!("n".parse::<NodeId>().is_err());
        assert!("n-1".parse::<NodeId>().is_err());
        assert!("n+5".parse::<NodeId>().is_err());
        assert!("n007".parse::<NodeId>().is_err());
        assert!("e 1".parse::<EdgeId>().is_err());
        assert_eq!("n0".parse::<NodeId>(), Ok(NodeId(0)));
        let err = "x9".parse::<EdgeId>().unwrap_err();
        assert_eq!(err.to_string(), "invalid edge id 'x9'");
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&NodeId(5)).unwrap();
        assert_eq!(json, "\"n5\"");
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NodeId(5));
        assert!(serde_json::from_str::<NodeId>("\"node5\"").is_err());
        assert!(serde_json::from_str::<NodeId>("\"n05\"").is_err());
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", NodeId(2)), "NodeId(n2)");
    }
}
