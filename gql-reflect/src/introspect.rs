//! The [`Introspect`] trait and its implementations for std types.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    rc::Rc,
    sync::Arc,
};

use indexmap::{IndexMap, IndexSet};

use crate::{ScalarKind, TypeShape};

/// Types that can describe their own structure.
///
/// Records implement this by returning [`TypeShape::record`] with a closure
/// listing their fields:
///
/// ```
/// use gqlschema_reflect::{FieldInfo, Introspect, TypeShape};
///
/// struct User {
///     id: String,
///     friends: Vec<User>,
/// }
///
/// impl Introspect for User {
///     fn type_shape() -> TypeShape {
///         TypeShape::record("User", || {
///             vec![
///                 FieldInfo::of::<String>("ID").annotate("json", "id"),
///                 FieldInfo::of::<Vec<User>>("Friends").annotate("json", "friends"),
///             ]
///         })
///     }
/// }
///
/// assert_eq!(User::type_shape().to_string(), "User");
/// ```
pub trait Introspect {
    fn type_shape() -> TypeShape;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Introspect for $ty {
                fn type_shape() -> TypeShape {
                    TypeShape::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

impl_scalar! {
    String => String,
    str => String,
    char => Char,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

// Pointer-like wrappers are transparent.
macro_rules! impl_transparent {
    ($($ty:ident),*) => {
        $(
            impl<T: Introspect + ?Sized> Introspect for $ty<T> {
                fn type_shape() -> TypeShape {
                    T::type_shape()
                }
            }
        )*
    };
}

impl_transparent!(Box, Rc, Arc);

impl<T: Introspect + ?Sized> Introspect for &T {
    fn type_shape() -> TypeShape {
        T::type_shape()
    }
}

impl<T: Introspect> Introspect for Option<T> {
    fn type_shape() -> TypeShape {
        TypeShape::optional(T::type_shape())
    }
}

macro_rules! impl_list {
    ($($ty:ident),*) => {
        $(
            impl<T: Introspect> Introspect for $ty<T> {
                fn type_shape() -> TypeShape {
                    TypeShape::list(T::type_shape())
                }
            }
        )*
    };
}

impl_list!(Vec, VecDeque, HashSet, BTreeSet, IndexSet);

impl<T: Introspect> Introspect for [T] {
    fn type_shape() -> TypeShape {
        TypeShape::list(T::type_shape())
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn type_shape() -> TypeShape {
        TypeShape::list(T::type_shape())
    }
}

macro_rules! impl_dictionary {
    ($($ty:ident),*) => {
        $(
            impl<K: Introspect, V: Introspect> Introspect for $ty<K, V> {
                fn type_shape() -> TypeShape {
                    TypeShape::dictionary(K::type_shape(), V::type_shape())
                }
            }
        )*
    };
}

impl_dictionary!(HashMap, BTreeMap, IndexMap);

#[cfg(test)]
mod tests {
    use super::*;

    fn display<T: Introspect + ?Sized>() -> String {
        T::type_shape().to_string()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(display::<String>(), "string");
        assert_eq!(display::<str>(), "string");
        assert_eq!(display::<&str>(), "string");
        assert_eq!(display::<u16>(), "u16");
        assert_eq!(display::<f32>(), "f32");
    }

    #[test]
    fn test_wrappers() {
        assert_eq!(display::<Option<Box<i32>>>(), "Option<i32>");
        assert_eq!(display::<Arc<Option<bool>>>(), "Option<bool>");
        assert_eq!(display::<Vec<Option<String>>>(), "Vec<Option<string>>");
        assert_eq!(display::<BTreeSet<u8>>(), "Vec<u8>");
        assert_eq!(display::<[char; 4]>(), "Vec<char>");
    }

    #[test]
    fn test_dictionaries() {
        assert_eq!(
            display::<HashMap<String, BTreeMap<String, String>>>(),
            "Map<string, Map<string, string>>"
        );
        assert_eq!(display::<IndexMap<String, Vec<i64>>>(), "Map<string, Vec<i64>>");
    }
}
