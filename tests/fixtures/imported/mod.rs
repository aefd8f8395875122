//! Struct values whose type is defined in a child module.
#![allow(dead_code)]

mod kinds;

pub use self::kinds::Kind;

pub const FIRST: Kind = Kind {
    id: "first",
    weight: 1,
};
pub const SECOND: Kind = Kind {
    id: "second",
    weight: 2,
};

pub fn all_kinds() -> Vec<Kind> {
    vec![FIRST, SECOND]
}
