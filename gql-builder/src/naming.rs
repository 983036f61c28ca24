//! Names synthesized for types that have none.

use crate::AnonymousNaming;

/// Convert a field name to PascalCase (e.g. `meta_data` -> `MetaData`).
///
/// Already capitalized segments are kept as is, so `ID` stays `ID`.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Name of an anonymous record held by `field` of `owner`.
///
/// `ordinal` counts the owner's anonymous records from 1.
pub(crate) fn anonymous_record(
    naming: AnonymousNaming,
    owner: &str,
    field: &str,
    ordinal: usize,
) -> String {
    match naming {
        AnonymousNaming::Underscore => format!("{owner}_{}", to_pascal_case(field)),
        AnonymousNaming::Indexed => format!("{owner}Struct{ordinal}"),
    }
}

/// Name of the dictionary held by `field` of `owner`.
pub(crate) fn field_dictionary(owner: &str, field: &str) -> String {
    format!("{owner}{}", to_pascal_case(field))
}

/// Name of a dictionary nested as the value of dictionary `name`.
pub(crate) fn nested_dictionary(name: &str, depth: usize) -> String {
    format!("{name}Map{depth}")
}

/// Name of an anonymous record held as the value of dictionary `name`.
pub(crate) fn dictionary_record(name: &str, depth: usize) -> String {
    format!("{name}Struct{depth}")
}

/// Name of a dictionary added without one.
pub(crate) fn unnamed_dictionary(depth: usize) -> String {
    format!("Map{depth}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("meta"), "Meta");
        assert_eq!(to_pascal_case("meta_data"), "MetaData");
        assert_eq!(to_pascal_case("Meta"), "Meta");
        assert_eq!(to_pascal_case("ID"), "ID");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_anonymous_record() {
        assert_eq!(
            anonymous_record(AnonymousNaming::Underscore, "UserDocument", "meta", 1),
            "UserDocument_Meta"
        );
        assert_eq!(
            anonymous_record(AnonymousNaming::Indexed, "UserDocument", "meta", 2),
            "UserDocumentStruct2"
        );
    }

    #[test]
    fn test_dictionary_names() {
        assert_eq!(field_dictionary("Project", "meta"), "ProjectMeta");
        assert_eq!(nested_dictionary("StringMapStringString", 1), "StringMapStringStringMap1");
        assert_eq!(dictionary_record("ProjectMeta", 1), "ProjectMetaStruct1");
        assert_eq!(unnamed_dictionary(0), "Map0");
    }
}
