//! Tri-state field wrapper for merge-patch payloads.
//!
//! JSON merge patches need to tell a missing key apart from an explicit
//! `null`. `Option<T>` collapses the two, so patch payloads use [`Patch`]
//! with `#[serde(default)]`: a missing key stays [`Patch::Absent`], a `null`
//! becomes [`Patch::Null`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not present in the payload.
    #[default]
    Absent,
    /// The key was present with an explicit `null`.
    Null,
    /// The key carried a value.
    Value(T),
}

impl<T> Patch<T> {
    /// Consumes the patch and returns the carried value, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Absent | Patch::Null => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key exists; `#[serde(default)]` covers Absent.
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Value(value) => serializer.serialize_some(value),
            Patch::Absent | Patch::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct TestStruct {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        field: Patch<String>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let result: TestStruct = serde_json::from_str("{}").unwrap();
        assert_eq!(result.field, Patch::Absent);
    }

    #[test]
    fn test_null_is_null() {
        let result: TestStruct = serde_json::from_str(r#"{"field": null}"#).unwrap();
        assert_eq!(result.field, Patch::Null);
    }

    #[test]
    fn test_value_is_value() {
        let result: TestStruct = serde_json::from_str(r#"{"field": "hello"}"#).unwrap();
        assert_eq!(result.field, Patch::Value("hello".to_string()));
        assert_eq!(result.field.into_value().as_deref(), Some("hello"));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result: Result<TestStruct, _> = serde_json::from_str(r#"{"field": 12}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_absent_and_writes_null() {
        let absent = TestStruct {
            field: Patch::Absent,
        };
        let null = TestStruct { field: Patch::Null };

        assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
        assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"field":null}"#);
    }
}
