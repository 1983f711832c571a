//! Serde helpers shared by partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Deserialise a field that distinguishes "absent" from "explicitly null".
///
/// Partial updates use `Option<Option<T>>`: the outer option tracks field
/// presence (`#[serde(default)]` keeps it `None` when absent), the inner one
/// carries the new value, with JSON `null` clearing it.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Patch {
        #[serde(default, deserialize_with = "super::double_option")]
        value: Option<Option<i64>>,
    }

    #[test]
    fn absent_field_is_outer_none() {
        let patch: Patch = serde_json::from_str("{}").expect("parse");
        assert_eq!(patch.value, None);
    }

    #[test]
    fn explicit_null_is_inner_none() {
        let patch: Patch = serde_json::from_str(r#"{"value": null}"#).expect("parse");
        assert_eq!(patch.value, Some(None));
    }

    #[test]
    fn value_is_carried_through() {
        let patch: Patch = serde_json::from_str(r#"{"value": 7}"#).expect("parse");
        assert_eq!(patch.value, Some(Some(7)));
    }
}
