//! Canonical encoding of runtime values.
//!
//! A [`Collection`] stores every value as the literal text found in source,
//! so runtime values are encoded into the same text before comparing. For
//! primitives that is their `{:?}` form (`"hello"` for a string, quoted and
//! escaped exactly as a literal). Structs with a field tagged
//! `#[typedecl(identifier)]` are encoded by that field alone.

use std::fmt;

use crate::types::Collection;

/// A runtime value that can be compared with scanned declarations.
///
/// Implemented for primitives, strings, references, and boxes. Use
/// `#[derive(Declared)]` from `typedecl-derive` for your own types.
pub trait Declared {
    /// Fully qualified type name of the value.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The field tagged `#[typedecl(identifier)]`, if the type has one.
    fn identifier(&self) -> Option<Identifier<'_>> {
        None
    }

    /// The value's literal form, used whenever no identifier applies.
    fn repr(&self) -> String;
}

/// A struct field that identifies its value.
#[derive(Clone, Copy)]
pub struct Identifier<'a> {
    pub field: &'static str,
    pub value: &'a dyn fmt::Debug,
}

impl<'a> Identifier<'a> {
    pub fn new(field: &'static str, value: &'a dyn fmt::Debug) -> Self {
        Self { field, value }
    }

    pub fn encode(&self) -> String {
        format!("{:?}", self.value)
    }
}

impl fmt::Debug for Identifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identifier")
            .field("field", &self.field)
            .field("value", &format_args!("{:?}", self.value))
            .finish()
    }
}

macro_rules! declared_via_debug {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Declared for $ty {
                fn repr(&self) -> String {
                    format!("{:?}", self)
                }
            }
        )*
    };
}

declared_via_debug!(
    bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);

impl<T: Declared + ?Sized> Declared for &T {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn identifier(&self) -> Option<Identifier<'_>> {
        (**self).identifier()
    }

    fn repr(&self) -> String {
        (**self).repr()
    }
}

impl<T: Declared + ?Sized> Declared for Box<T> {
    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn identifier(&self) -> Option<Identifier<'_>> {
        (**self).identifier()
    }

    fn repr(&self) -> String {
        (**self).repr()
    }
}

/// Encode `value` the way a declaration of `collection`'s type is scanned.
///
/// The identifier field is used only when the collection is keyed by that
/// same field and the value's type is the collection's type; everything else
/// falls back to [`Declared::repr`].
pub fn canonical(value: &dyn Declared, collection: &Collection) -> String {
    if let (Some(field_name), Some(id)) = (collection.field_name.as_deref(), value.identifier()) {
        if id.field == field_name
            && collection
                .type_name
                .ends_with(&short_type_name(value.type_name()))
        {
            return id.encode();
        }
    }
    value.repr()
}

/// `scan::full::FlagStruct<T>` → `full::FlagStruct`.
pub fn short_type_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let segments: Vec<&str> = base.split("::").collect();
    let start = segments.len().saturating_sub(2);
    segments[start..].join("::")
}
