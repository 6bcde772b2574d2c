use serde::{Deserialize, Deserializer};

/// Deserializer for partial-update fields.
///
/// Combined with `#[serde(default)]` it distinguishes an absent field
/// (`None`) from an explicit `null` (`Some(None)`).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "double_option")]
        floor: Option<Option<i32>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.floor, None);

        let null: Probe = serde_json::from_str(r#"{"floor":null}"#).unwrap();
        assert_eq!(null.floor, Some(None));

        let value: Probe = serde_json::from_str(r#"{"floor":4}"#).unwrap();
        assert_eq!(value.floor, Some(Some(4)));
    }
}
