//! Field decoders for provider payloads. A field with the wrong JSON type
//! decodes as `None` instead of failing the whole response.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings pass through, numbers are stringified (ESPN sometimes sends
/// `"score": 3`), anything else is `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A nested object, or `None` when it is missing or does not fit `T`.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// An array whose elements that do not fit `T` are dropped. A non-array
/// value is `None`.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize, Debug, Default, PartialEq)]
    struct Inner {
        #[serde(default, deserialize_with = "text")]
        name: Option<String>,
    }

    #[derive(Deserialize, Debug, Default)]
    struct Outer {
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "object")]
        inner: Option<Inner>,
        #[serde(default, deserialize_with = "list")]
        items: Option<Vec<Inner>>,
    }

    #[test]
    fn text_accepts_strings_and_numbers_only() {
        let o: Outer = serde_json::from_value(json!({ "label": 3 })).unwrap();
        assert_eq!(o.label.as_deref(), Some("3"));
        let o: Outer = serde_json::from_value(json!({ "label": 2.5 })).unwrap();
        assert_eq!(o.label.as_deref(), Some("2.5"));
        let o: Outer = serde_json::from_value(json!({ "label": { "x": 1 } })).unwrap();
        assert_eq!(o.label, None);
        let o: Outer = serde_json::from_value(json!({ "label": null })).unwrap();
        assert_eq!(o.label, None);
    }

    #[test]
    fn object_of_wrong_shape_is_none() {
        let o: Outer = serde_json::from_value(json!({ "inner": "oops" })).unwrap();
        assert_eq!(o.inner, None);
        let o: Outer = serde_json::from_value(json!({ "inner": { "name": "x" } })).unwrap();
        assert_eq!(o.inner, Some(Inner { name: Some("x".into()) }));
    }

    #[test]
    fn list_drops_elements_that_do_not_fit() {
        let o: Outer =
            serde_json::from_value(json!({ "items": [{ "name": "a" }, 7, null, { "name": [] }] }))
                .unwrap();
        assert_eq!(
            o.items,
            Some(vec![Inner { name: Some("a".into()) }, Inner { name: None }])
        );
        let o: Outer = serde_json::from_value(json!({ "items": "nope" })).unwrap();
        assert_eq!(o.items, None);
    }
}
