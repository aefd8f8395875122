//! Features borrowing their names, declared with an explicit lifetime.
#![allow(dead_code)]

use typedecl_derive::Declared;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Declared)]
pub struct Feature<'a> {
    #[typedecl(identifier)]
    pub name: &'a str,
    pub enabled: bool,
}

pub const CHECKOUT: Feature<'static> = Feature {
    name: "checkout",
    enabled: true,
};
pub const SEARCH: Feature<'static> = Feature {
    name: "search",
    enabled: false,
};

pub static ALL_FEATURES: [Feature<'static>; 2] = [CHECKOUT, SEARCH];

pub fn all_features() -> Vec<Feature<'static>> {
    ALL_FEATURES.to_vec()
}

pub fn missing_features() -> Vec<Feature<'static>> {
    vec![CHECKOUT]
}
