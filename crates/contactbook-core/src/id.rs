use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

use crate::ValidationError;

/// The store hands out either numeric or string ids, depending on how the record was created.
/// Both are accepted and kept in their textual form.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let s = id.into();
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.contains('/') {
                    return Err(ValidationError::InvalidId);
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = StringOrNumber::deserialize(deserializer)?.into_string();
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

store_id!(
    /// Identifier of a contact, assigned by the remote store
    ContactId
);
store_id!(
    /// Identifier of a contact group, assigned by the remote store
    GroupId
);

/// Deserializes an optional group reference, treating an empty string as "no group", since the
/// store keeps whatever the form sent.
pub(crate) fn deserialize_optional_group<'de, D>(
    deserializer: D,
) -> Result<Option<GroupId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => {
            let s = raw.into_string();
            if s.trim().is_empty() {
                Ok(None)
            } else {
                GroupId::new(s).map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", "42")]
    #[case(" 7 ", "7")]
    #[case("a1b2", "a1b2")]
    fn new_contact_id(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(ContactId::new(input).unwrap().as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("1/2")]
    fn invalid_contact_id(#[case] input: &str) {
        assert_eq!(ContactId::new(input), Err(ValidationError::InvalidId));
    }

    #[test]
    fn deserialize_number_and_string() {
        let from_number: ContactId = serde_json::from_str("42").unwrap();
        let from_string: ContactId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn deserialize_rejects_empty() {
        assert!(serde_json::from_str::<GroupId>("\"\"").is_err());
    }
}
