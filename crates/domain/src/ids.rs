use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// String-backed identifiers.
///
/// Quest and skill ids are persisted as plain strings (`"q1"`, `"s2"`), so
/// they wrap a `String` rather than a `Uuid`. Fresh ids are derived from a
/// UUID supplied by the caller.
macro_rules! define_key {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Builds an id from a UUID, e.g. `q-67e55044...`.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(format!(concat!($prefix, "-{}"), uuid.simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_key!(QuestId, "q");
define_key!(SkillId, "s");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quest_id_from_uuid_is_prefixed() {
        let id = QuestId::from_uuid(Uuid::nil());
        assert_eq!(id.as_str(), "q-00000000000000000000000000000000");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = SkillId::new("s1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"s1\"");
        let parsed: SkillId = serde_json::from_str("\"s1\"").unwrap();
        assert_eq!(parsed, id);
    }
}
