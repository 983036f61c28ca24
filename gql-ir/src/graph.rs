//! The aggregate type graph.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::{DictionaryType, ElementKind, EnumType, FieldShape, RecordType};

/// Named records, dictionaries and enums discovered by one build pass.
///
/// Each collection keeps registration order. Equality compares contents
/// regardless of order; use the `*_names` accessors to check ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaGraph {
    #[serde(serialize_with = "serialize_values")]
    records: IndexMap<String, RecordType>,
    #[serde(serialize_with = "serialize_values")]
    dictionaries: IndexMap<String, DictionaryType>,
    #[serde(serialize_with = "serialize_values")]
    enums: IndexMap<String, EnumType>,
}

fn serialize_values<S, T>(map: &IndexMap<String, T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(map.values())
}

/// A field whose declared type names no entry in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Record or dictionary holding the reference.
    pub owner: String,
    /// Field name, or `key`/`value` for dictionaries.
    pub member: String,
    pub type_name: String,
}

impl SchemaGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. Returns false (and keeps the existing entry) if the
    /// name is taken.
    pub fn insert_record(&mut self, record: RecordType) -> bool {
        if self.records.contains_key(&record.name) {
            return false;
        }
        self.records.insert(record.name.clone(), record);
        true
    }

    /// Insert a dictionary. Returns false if the name is taken.
    pub fn insert_dictionary(&mut self, dictionary: DictionaryType) -> bool {
        if self.dictionaries.contains_key(&dictionary.name) {
            return false;
        }
        self.dictionaries
            .insert(dictionary.name.clone(), dictionary);
        true
    }

    /// Insert an enum. Returns false if the name is taken.
    pub fn insert_enum(&mut self, enum_type: EnumType) -> bool {
        if self.enums.contains_key(&enum_type.name) {
            return false;
        }
        self.enums.insert(enum_type.name.clone(), enum_type);
        true
    }

    pub fn contains_record(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn contains_dictionary(&self, name: &str) -> bool {
        self.dictionaries.contains_key(name)
    }

    pub fn contains_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Returns true if any collection holds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.contains_record(name) || self.contains_dictionary(name) || self.contains_enum(name)
    }

    pub fn record(&self, name: &str) -> Option<&RecordType> {
        self.records.get(name)
    }

    pub fn dictionary(&self, name: &str) -> Option<&DictionaryType> {
        self.dictionaries.get(name)
    }

    pub fn enum_type(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }

    pub fn enum_type_mut(&mut self, name: &str) -> Option<&mut EnumType> {
        self.enums.get_mut(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordType> {
        self.records.values()
    }

    pub fn dictionaries(&self) -> impl Iterator<Item = &DictionaryType> {
        self.dictionaries.values()
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumType> {
        self.enums.values()
    }

    /// Record names in registration order.
    pub fn record_names(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    /// Dictionary names in registration order.
    pub fn dictionary_names(&self) -> Vec<&str> {
        self.dictionaries.keys().map(String::as_str).collect()
    }

    /// Enum names in registration order.
    pub fn enum_names(&self) -> Vec<&str> {
        self.enums.keys().map(String::as_str).collect()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.records.len() + self.dictionaries.len() + self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of graph entries referenced by fields and dictionary members,
    /// deduplicated, in first-reference order.
    pub fn referenced_names(&self) -> Vec<&str> {
        let record_refs = self
            .records
            .values()
            .flat_map(|r| &r.fields)
            .filter(|f| f.shape.references_entry())
            .map(|f| f.declared_type_name.as_str());
        let dictionary_refs = self
            .dictionaries
            .values()
            .flat_map(|d| [&d.key, &d.value])
            .filter(|t| t.shape.references_entry())
            .map(|t| t.type_name.as_str());

        let mut names: Vec<&str> = Vec::new();
        for name in record_refs.chain(dictionary_refs) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Every reference from a field or dictionary member to a record,
    /// dictionary or enum that the graph does not hold.
    pub fn unresolved_references(&self) -> Vec<UnresolvedReference> {
        let mut unresolved = Vec::new();

        for record in self.records.values() {
            for field in &record.fields {
                if !self.resolves(&field.shape, &field.declared_type_name) {
                    unresolved.push(UnresolvedReference {
                        owner: record.name.clone(),
                        member: field.name.clone(),
                        type_name: field.declared_type_name.clone(),
                    });
                }
            }
        }

        for dictionary in self.dictionaries.values() {
            for (member, ty) in [("key", &dictionary.key), ("value", &dictionary.value)] {
                if !self.resolves(&ty.shape, &ty.type_name) {
                    unresolved.push(UnresolvedReference {
                        owner: dictionary.name.clone(),
                        member: member.to_string(),
                        type_name: ty.type_name.clone(),
                    });
                }
            }
        }

        unresolved
    }

    fn resolves(&self, shape: &FieldShape, type_name: &str) -> bool {
        match shape.element_kind() {
            ElementKind::Scalar => true,
            ElementKind::Composite => self.contains_record(type_name),
            ElementKind::Dictionary => self.contains_dictionary(type_name),
            ElementKind::Enum => self.contains_enum(type_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EnumValue, FieldDescriptor, TypeRef};

    fn user() -> RecordType {
        RecordType::new(
            "User",
            vec![
                FieldDescriptor::new("id", "string", FieldShape::Scalar),
                FieldDescriptor::new("roles", "Roles", FieldShape::list_of(ElementKind::Enum)),
            ],
        )
    }

    #[test]
    fn test_insert_is_first_wins() {
        let mut graph = SchemaGraph::new();
        assert!(graph.insert_record(user()));
        assert!(!graph.insert_record(RecordType::new("User", vec![])));

        assert_eq!(graph.record("User").unwrap().fields.len(), 2);
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_unresolved_references() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(user());

        let unresolved = graph.unresolved_references();
        assert_eq!(
            unresolved,
            vec![UnresolvedReference {
                owner: "User".into(),
                member: "roles".into(),
                type_name: "Roles".into(),
            }]
        );

        graph.insert_enum(EnumType::new("Roles"));
        assert!(graph.unresolved_references().is_empty());
    }

    #[test]
    fn test_unresolved_dictionary_value() {
        let mut graph = SchemaGraph::new();
        graph.insert_dictionary(DictionaryType::new(
            "ProjectMeta",
            TypeRef::scalar("string"),
            TypeRef::new("ProjectMetaMap1", FieldShape::Dictionary),
        ));

        let unresolved = graph.unresolved_references();
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].member, "value");
    }

    #[test]
    fn test_referenced_names() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(RecordType::new(
            "Project",
            vec![
                FieldDescriptor::new("owner", "User", FieldShape::Composite),
                FieldDescriptor::new("editors", "User", FieldShape::list_of(ElementKind::Composite)),
                FieldDescriptor::new("meta", "ProjectMeta", FieldShape::Dictionary),
                FieldDescriptor::new("name", "string", FieldShape::Scalar),
            ],
        ));
        assert_eq!(graph.referenced_names(), vec!["User", "ProjectMeta"]);
    }

    #[test]
    fn test_enum_mut_and_contains() {
        let mut graph = SchemaGraph::new();
        graph.insert_enum(EnumType::new("Roles"));
        graph
            .enum_type_mut("Roles")
            .unwrap()
            .values
            .push(EnumValue::new("USER", "user"));

        assert!(graph.contains("Roles"));
        assert!(!graph.contains("User"));
        assert!(!graph.enum_type("Roles").unwrap().is_placeholder());
    }

    #[test]
    fn test_names_keep_registration_order() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(RecordType::new("B", vec![]));
        graph.insert_record(RecordType::new("A", vec![]));
        assert_eq!(graph.record_names(), vec!["B", "A"]);
    }

    #[test]
    fn test_serializes_entries_as_sequences() {
        let mut graph = SchemaGraph::new();
        graph.insert_record(RecordType::new("A", vec![]));

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["records"][0]["name"], "A");
        assert!(json["dictionaries"].as_array().unwrap().is_empty());
    }
}
