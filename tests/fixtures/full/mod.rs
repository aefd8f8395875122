//! Deploy flags in the shape a real module keeps them: the declarations the
//! scanner reads, and the functions tests diff them against.
#![allow(dead_code)]

use typedecl_derive::Declared;

pub type Flag = &'static str;

pub const DEPLOY_ALL_THE_THINGS: Flag = "deploy-all-the-things";
pub const DEPLOY_ONE_THING: Flag = "deploy-one-thing";

/// Flags and code in agreement.
pub fn all_flags() -> Vec<Flag> {
    vec![DEPLOY_ALL_THE_THINGS, DEPLOY_ONE_THING]
}

/// Returns a value nobody declared.
pub fn extra_flags() -> Vec<Flag> {
    vec![DEPLOY_ALL_THE_THINGS, DEPLOY_ONE_THING, "m000"]
}

/// Forgets one of the declared flags.
pub fn missing_flags() -> Vec<Flag> {
    vec![DEPLOY_ALL_THE_THINGS]
}

#[derive(Debug, Clone, PartialEq, Eq, Declared)]
pub struct FlagStruct {
    #[typedecl(identifier)]
    pub name: &'static str,
    pub default_on: bool,
}

pub static FLAG_DEFAULT_ON: FlagStruct = FlagStruct {
    name: "flag-default-on",
    default_on: true,
};

pub fn all_flag_struct() -> Vec<FlagStruct> {
    vec![FLAG_DEFAULT_ON.clone()]
}

pub fn missing_flag_struct() -> Vec<FlagStruct> {
    vec![]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Declared)]
pub struct Level(pub &'static str);

pub const LOW: Level = Level("low");
pub const HIGH: Level = Level("high");

pub fn all_levels() -> [Level; 2] {
    [LOW, HIGH]
}
