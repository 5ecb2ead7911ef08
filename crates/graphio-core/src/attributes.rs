//! Attribute maps carried by graph events

use std::collections::BTreeMap;

use serde_json::Value;

/// Ordered mapping from attribute name to an opaque value
///
/// Events carry `Option<AttributeMap>`: `None` means the format has no
/// attributes for the element, which is not the same as an empty map.
pub type AttributeMap = BTreeMap<String, Value>;

/// Build an attribute map from name/value pairs
pub fn attributes<K, V, I>(pairs: I) -> AttributeMap
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Merge `incoming` into `target`, overwriting values with the same name
pub fn merge(target: &mut AttributeMap, incoming: Option<&AttributeMap>) {
    if let Some(incoming) = incoming {
        for (name, value) in incoming {
            target.insert(name.clone(), value.clone());
        }
    }
}

/// Render a value as bare text: strings without quotes, everything else as JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites() {
        let mut target = attributes([("color", "red"), ("label", "a")]);
        let incoming = attributes([("color", json!("blue")), ("weight", json!(2.5))]);

        merge(&mut target, Some(&incoming));

        assert_eq!(target["color"], json!("blue"));
        assert_eq!(target["label"], json!("a"));
        assert_eq!(target["weight"], json!(2.5));
    }

    #[test]
    fn test_merge_absent_is_noop() {
        let mut target = attributes([("color", "red")]);
        merge(&mut target, None);
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("plain")), "plain");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&json!(true)), "true");
    }
}
