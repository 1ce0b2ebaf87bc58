pub mod defaults;
pub mod entry;
pub mod enums;
pub mod error;
pub mod naming;
pub mod rules;

pub use defaults::BUILTIN_VERSION;
pub use entry::MappingEntry;
pub use enums::{Aggregation, BusinessGroup, DataKind, FieldRole, MatchOrigin};
pub use error::{ModelError, Result};
pub use naming::{NamingConvention, NamingViolation};
pub use rules::{
    KeywordSets, PatternRule, RuleClass, RuleSet, Trigger, contains_keyword, find_keyword,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_accepts_legacy_field_names() {
        let json = r#"{
            "cn_name": "签单保费",
            "field_name": "written_premium",
            "group": "finance",
            "dtype": "float",
            "role": "measure",
            "aggregation": "sum",
            "is_mapped": true
        }"#;
        let entry: MappingEntry = serde_json::from_str(json).expect("parse legacy entry");
        assert_eq!(entry.source_name, "签单保费");
        assert_eq!(entry.canonical_name, "written_premium");
        assert_eq!(entry.kind, DataKind::Number);
        assert_eq!(entry.role, FieldRole::Measure);
        assert!(entry.is_resolved);
        assert_eq!(entry.origin, MatchOrigin::Unknown);
    }

    #[test]
    fn entry_serializes_without_empty_notes() {
        let entry = MappingEntry {
            source_name: "机构".to_string(),
            canonical_name: "organization".to_string(),
            group: BusinessGroup::Organization,
            kind: DataKind::String,
            role: FieldRole::Dimension,
            aggregation: Aggregation::None,
            description: String::new(),
            notes: Vec::new(),
            is_resolved: true,
            origin: MatchOrigin::Exact,
        };
        insta::assert_json_snapshot!(entry, @r#"
        {
          "source_name": "机构",
          "canonical_name": "organization",
          "group": "organization",
          "kind": "string",
          "role": "dimension",
          "aggregation": "none",
          "description": "",
          "is_resolved": true,
          "origin": "exact"
        }
        "#);
    }
}
