use serde_json::Value;

use super::resource::Record;

/// Overlay the fields present in `patch` onto `current`.
///
/// Keys missing from `patch` keep their cached value; a non-object patch
/// replaces the record outright.
pub fn merge_record<R: Record>(current: &R, patch: Value) -> Result<R, serde_json::Error> {
    let Value::Object(fields) = patch else {
        return serde_json::from_value(patch);
    };
    let mut merged = serde_json::to_value(current)?;
    if let Value::Object(target) = &mut merged {
        target.extend(fields);
    }
    serde_json::from_value(merged)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::role::Role;

    fn role() -> Role {
        serde_json::from_value(json!({
            "id": 4,
            "name": "Support",
            "description": "Front line",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
            "createdById": 1
        }))
        .unwrap()
    }

    #[test]
    fn absent_fields_are_kept() {
        let merged = merge_record(&role(), json!({ "id": 4, "name": "Escalations" })).unwrap();
        assert_eq!(merged.name, "Escalations");
        assert_eq!(merged.description.as_deref(), Some("Front line"));
        assert_eq!(merged.created_by_id, Some(1));
    }

    #[test]
    fn explicit_null_clears_optional_field() {
        let merged = merge_record(&role(), json!({ "description": null })).unwrap();
        assert_eq!(merged.description, None);
    }

    #[test]
    fn ill_typed_patch_is_an_error() {
        assert!(merge_record(&role(), json!({ "name": 12 })).is_err());
    }
}
