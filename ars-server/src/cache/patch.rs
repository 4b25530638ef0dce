//! Patches applied to cached list values (JSON arrays of records with `id`)

use serde::Serialize;
use serde_json::Value;

/// Placeholder id for records not yet written
pub const PENDING_ID: i64 = 0;

/// Append a record to a cached list
pub fn append(list: &mut Value, record: impl Serialize) {
    if let (Some(items), Ok(record)) = (list.as_array_mut(), serde_json::to_value(record)) {
        items.push(record);
    }
}

/// Insert a record at the front of a cached list
pub fn prepend(list: &mut Value, record: impl Serialize) {
    if let (Some(items), Ok(record)) = (list.as_array_mut(), serde_json::to_value(record)) {
        items.insert(0, record);
    }
}

/// Merge the non-null fields of `changes` into the record with `id`
pub fn merge_by_id(list: &mut Value, id: i64, changes: impl Serialize) {
    let Ok(Value::Object(changes)) = serde_json::to_value(changes) else {
        return;
    };
    let Some(items) = list.as_array_mut() else {
        return;
    };
    for item in items.iter_mut().filter(|item| record_id(item) == Some(id)) {
        if let Some(fields) = item.as_object_mut() {
            for (k, v) in changes.iter().filter(|(_, v)| !v.is_null()) {
                fields.insert(k.clone(), v.clone());
            }
        }
    }
}

/// Remove the record with `id`
pub fn remove_by_id(list: &mut Value, id: i64) {
    if let Some(items) = list.as_array_mut() {
        items.retain(|item| record_id(item) != Some(id));
    }
}

fn record_id(item: &Value) -> Option<i64> {
    item.get("id").and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_skips_nulls() {
        let mut list = json!([{"id": 1, "name": "A", "price": 10.0}, {"id": 2, "name": "B"}]);
        merge_by_id(&mut list, 1, json!({"name": "A2", "price": null}));
        assert_eq!(list, json!([{"id": 1, "name": "A2", "price": 10.0}, {"id": 2, "name": "B"}]));
    }

    #[test]
    fn test_append_prepend_remove() {
        let mut list = json!([{"id": 1}]);
        append(&mut list, json!({"id": 2}));
        prepend(&mut list, json!({"id": PENDING_ID, "name": "new"}));
        assert_eq!(list, json!([{"id": 0, "name": "new"}, {"id": 1}, {"id": 2}]));
        remove_by_id(&mut list, 1);
        assert_eq!(list, json!([{"id": 0, "name": "new"}, {"id": 2}]));
    }

    #[test]
    fn test_non_array_is_left_alone() {
        let mut value = json!({"total": 1});
        append(&mut value, json!({"id": 2}));
        remove_by_id(&mut value, 2);
        assert_eq!(value, json!({"total": 1}));
    }
}
