//! Change summaries for audit entries
//!
//! Compares two JSON snapshots and lists the changed fields as
//! `path: old -> new`. Objects and equal-length arrays are walked, so an
//! edited service shows up as `services[1].price: 100 -> 120`; arrays that
//! grew or shrank are summarized by their length.

use serde_json::Value;

const MAX_TEXT_CHARS: usize = 40;

/// Summarize what changed between two snapshots, or `None` if nothing did
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_val) in old {
                let field = join_path(path, key);
                match new.get(key) {
                    Some(new_val) => collect_changes(old_val, new_val, &field, changes),
                    None => changes.push(format!("{}: {} -> (removed)", field, render(old_val))),
                }
            }
            for (key, new_val) in new {
                if !old.contains_key(key) {
                    let field = join_path(path, key);
                    changes.push(format!("{}: (added) -> {}", field, render(new_val)));
                }
            }
        }
        (Value::Array(old), Value::Array(new)) if old.len() == new.len() => {
            for (i, (old_item, new_item)) in old.iter().zip(new).enumerate() {
                collect_changes(old_item, new_item, &format!("{}[{}]", path, i), changes);
            }
        }
        _ => {
            let label = if path.is_empty() { "value" } else { path };
            changes.push(format!("{}: {} -> {}", label, render(before), render(after)));
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > MAX_TEXT_CHARS => {
            let head: String = s.chars().take(MAX_TEXT_CHARS - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contact_change() {
        let before = json!({"name": "Anna", "phone": "600100200"});
        let after = json!({"name": "Anna", "phone": "600100201"});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "phone: \"600100200\" -> \"600100201\"");
    }

    #[test]
    fn test_nested_service_change() {
        let before = json!({"services": [{"type": "Cut", "price": 100}, {"type": "Color", "price": 200}]});
        let after = json!({"services": [{"type": "Cut", "price": 100}, {"type": "Color", "price": 180}]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "services[1].price: 200 -> 180");
    }

    #[test]
    fn test_grown_list_is_summarized() {
        let before = json!({"payments": []});
        let after = json!({"payments": [{"amount": 50}]});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "payments: 0 items -> 1 items");
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"name": "Ewa", "legacy": true});
        let after = json!({"name": "Ewa", "notes": "VIP"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("legacy: true -> (removed)"));
        assert!(diff.contains("notes: (added) -> \"VIP\""));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Ewa", "services": [{"type": "Cut"}]});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_long_text_is_truncated_on_char_boundary() {
        let before = json!({"notes": "żółć ".repeat(20)});
        let after = json!({"notes": ""});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(
            generate_diff(&json!(1), &json!(2)).as_deref(),
            Some("value: 1 -> 2")
        );
    }
}
