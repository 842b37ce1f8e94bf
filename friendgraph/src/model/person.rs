use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

pub type PersonId = String;

const UNKNOWN_NAME: &str = "Unknown";

/// A single person as reported by a friend list request.
///
/// `friends_ids` is empty until the person has been annotated by the
/// [crate::Collector] with their own friend list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Remaining profile fields. Never contains `null` values.
    pub attributes: Map<String, Value>,
    pub friends_ids: Vec<PersonId>,
}

impl Person {
    pub fn new(id: impl ToString) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Reads a person from a single JSON object, either an API `items` entry or an entry of a
    /// previously saved records file. Integer ids are converted to strings and `null` fields
    /// are dropped.
    ///
    /// Returns `None` if `item` is not an object or has no usable `id`.
    pub fn from_item(item: Value) -> Option<Self> {
        let Value::Object(mut fields) = item else {
            return None;
        };
        let id = id_string(fields.remove("id")?)?;
        let first_name = take_string(&mut fields, "first_name");
        let last_name = take_string(&mut fields, "last_name");
        let friends_ids = match fields.remove("friends_ids") {
            Some(Value::Array(ids)) => ids.into_iter().filter_map(id_string).collect(),
            _ => vec![],
        };
        fields.remove("friends_count");
        fields.retain(|_, value| !value.is_null());
        Some(Self {
            id,
            first_name,
            last_name,
            attributes: fields,
            friends_ids,
        })
    }

    /// Inverse of [Person::from_item]. Numeric ids are written back as JSON numbers and
    /// `friends_count` is derived from `friends_ids`.
    pub fn to_item(&self) -> Value {
        let mut item = Map::new();
        item.insert("id".to_string(), id_value(&self.id));
        if let Some(first_name) = &self.first_name {
            item.insert("first_name".to_string(), Value::from(first_name.as_str()));
        }
        if let Some(last_name) = &self.last_name {
            item.insert("last_name".to_string(), Value::from(last_name.as_str()));
        }
        for (key, value) in &self.attributes {
            item.insert(key.clone(), value.clone());
        }
        item.insert(
            "friends_ids".to_string(),
            Value::Array(self.friends_ids.iter().map(|id| Value::from(id.as_str())).collect()),
        );
        item.insert(
            "friends_count".to_string(),
            Value::from(self.friends_ids.len()),
        );
        Value::Object(item)
    }

    pub fn with_first_name(mut self, first_name: impl ToString) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    pub fn with_last_name(mut self, last_name: impl ToString) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }

    /// Sets a profile attribute. `null` values are ignored.
    pub fn with_attribute(mut self, key: impl ToString, value: Value) -> Self {
        if !value.is_null() {
            self.attributes.insert(key.to_string(), value);
        }
        self
    }

    pub fn with_friends(mut self, friends_ids: Vec<PersonId>) -> Self {
        self.friends_ids = friends_ids;
        self
    }

    /// Drops every profile attribute whose key is not in `keys`.
    pub fn retain_attributes<S: AsRef<str>>(&mut self, keys: &[S]) {
        self.attributes
            .retain(|key, _| keys.iter().any(|k| k.as_ref() == key));
    }

    /// `"{first_name} {last_name}"` with missing parts replaced by `Unknown`.
    pub fn name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(UNKNOWN_NAME),
            self.last_name.as_deref().unwrap_or(UNKNOWN_NAME)
        )
    }

    /// Attributes attached to this person's node in the graph.
    pub fn node_attributes(&self) -> BTreeMap<String, Value> {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), Value::from(self.name()));
        if let Some(first_name) = &self.first_name {
            attributes.insert("first_name".to_string(), Value::from(first_name.as_str()));
        }
        if let Some(last_name) = &self.last_name {
            attributes.insert("last_name".to_string(), Value::from(last_name.as_str()));
        }
        for (key, value) in &self.attributes {
            if !value.is_null() {
                attributes.insert(key.clone(), value.clone());
            }
        }
        attributes
    }
}

fn id_string(value: Value) -> Option<PersonId> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn id_value(id: &str) -> Value {
    match id.parse::<i64>() {
        Ok(number) => Value::Number(Number::from(number)),
        Err(_) => Value::from(id),
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::Person;

    mod from_item {
        use serde_json::json;

        use crate::model::Person;

        #[test]
        fn numeric_id_becomes_string() {
            let person = Person::from_item(json!({ "id": 42 })).unwrap();
            assert_eq!(person.id, "42");
        }

        #[test]
        fn missing_id_is_rejected() {
            assert_eq!(Person::from_item(json!({ "first_name": "Ann" })), None);
            assert_eq!(Person::from_item(json!({ "id": null })), None);
            assert_eq!(Person::from_item(json!([1, 2])), None);
        }

        #[test]
        fn nulls_are_dropped() {
            let person = Person::from_item(json!({
                "id": 1,
                "first_name": "Ann",
                "last_name": null,
                "bdate": null,
                "sex": 1,
            }))
            .unwrap();
            assert_eq!(person.first_name.as_deref(), Some("Ann"));
            assert_eq!(person.last_name, None);
            assert!(!person.attributes.contains_key("bdate"));
            assert_eq!(person.attributes.get("sex"), Some(&json!(1)));
        }

        #[test]
        fn reads_saved_friend_lists() {
            let person = Person::from_item(json!({
                "id": 1,
                "friends_ids": ["2", 3, null],
                "friends_count": 3,
            }))
            .unwrap();
            assert_eq!(person.friends_ids, vec!["2", "3"]);
            assert!(!person.attributes.contains_key("friends_count"));
        }
    }

    #[test]
    fn to_item_writes_numeric_id_and_count() {
        let person = Person::new("7")
            .with_first_name("Ann")
            .with_friends(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(
            person.to_item(),
            json!({
                "id": 7,
                "first_name": "Ann",
                "friends_ids": ["1", "2"],
                "friends_count": 2,
            })
        );
    }

    #[test]
    fn name_defaults_to_unknown() {
        assert_eq!(Person::new("1").name(), "Unknown Unknown");
        assert_eq!(
            Person::new("1").with_last_name("Smith").name(),
            "Unknown Smith"
        );
    }

    #[test]
    fn node_attributes_never_contain_nulls() {
        let mut person = Person::new("1")
            .with_first_name("Ann")
            .with_attribute("domain", json!("ann"))
            .with_attribute("bdate", json!(null));
        // Bypass the builder methods to make sure nulls are still filtered.
        person.attributes.insert("city".to_string(), json!(null));
        let attributes = person.node_attributes();
        assert!(attributes.values().all(|value| !value.is_null()));
        assert_eq!(attributes.get("name"), Some(&json!("Ann Unknown")));
        assert_eq!(attributes.get("domain"), Some(&json!("ann")));
        assert!(!attributes.contains_key("last_name"));
        assert!(!attributes.contains_key("city"));
    }

    #[test]
    fn retain_attributes() {
        let mut person = Person::new("1")
            .with_attribute("sex", json!(2))
            .with_attribute("track_code", json!("abc"));
        person.retain_attributes(&["sex", "bdate"]);
        assert_eq!(person.attributes.len(), 1);
        assert!(person.attributes.contains_key("sex"));
    }
}
