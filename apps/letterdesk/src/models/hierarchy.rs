use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Employee id to employee record, as edited in the hierarchy view.
/// Keeps insertion order (serde_json `preserve_order`).
pub type EmployeeMapping = Map<String, Value>;

/// Stored shape of a user's hierarchy. The mapping is flattened into an
/// ordered pair list so the JSON column stays a plain array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyDocument {
    pub hierarchy: Value,
    pub employees: Vec<(String, Value)>,
    pub updated_at: DateTime<Utc>,
}

impl HierarchyDocument {
    pub fn new(hierarchy: Value, employees: &EmployeeMapping, updated_at: DateTime<Utc>) -> Self {
        Self {
            hierarchy,
            employees: employees
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            updated_at,
        }
    }
}

/// What `load` hands back to callers: the graph plus the rebuilt mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchySnapshot {
    pub hierarchy: Value,
    pub employees: EmployeeMapping,
}

impl From<HierarchyDocument> for HierarchySnapshot {
    fn from(doc: HierarchyDocument) -> Self {
        Self {
            hierarchy: doc.hierarchy,
            employees: doc.employees.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_serializes_employees_as_pairs() {
        let mut employees = EmployeeMapping::new();
        employees.insert("e1".to_string(), json!({"name": "Jane"}));
        let doc = HierarchyDocument::new(json!({"root": "e1"}), &employees, Utc::now());

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["employees"], json!([["e1", {"name": "Jane"}]]));
        assert!(value["updated_at"].is_string());
    }

    #[test]
    fn test_snapshot_rebuilds_mapping_from_pairs() {
        let doc = HierarchyDocument {
            hierarchy: json!({}),
            employees: vec![
                ("b".to_string(), json!(2)),
                ("a".to_string(), json!(1)),
            ],
            updated_at: Utc::now(),
        };
        let snapshot = HierarchySnapshot::from(doc);
        assert_eq!(snapshot.employees.len(), 2);
        assert_eq!(snapshot.employees["a"], json!(1));
        let keys: Vec<&str> = snapshot.employees.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_pairs_follow_insertion_order() {
        let mut employees = EmployeeMapping::new();
        employees.insert("e9".to_string(), json!({"name": "Zed"}));
        employees.insert("e1".to_string(), json!({"name": "Amy"}));
        let doc = HierarchyDocument::new(json!({}), &employees, Utc::now());

        let ids: Vec<&str> = doc.employees.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["e9", "e1"]);
    }

    #[test]
    fn test_request_order_survives_deserialization() {
        let employees: EmployeeMapping =
            serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let doc = HierarchyDocument::new(json!({}), &employees, Utc::now());
        let ids: Vec<&str> = doc.employees.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }
}
