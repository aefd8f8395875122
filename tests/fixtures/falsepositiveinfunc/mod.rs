//! Values of `Flag` that are not top-level declarations must not be picked up.
#![allow(dead_code)]

pub type Flag = &'static str;

pub const DEPLOY_ALL_THE_THINGS: Flag = "deploy-all-the-things";

pub static ANOTHER_EXAMPLE: Flag = "hello-there";

// Aggregates of the type are not values of it.
pub static SLICED_EXAMPLE: [Flag; 2] = ["hello", "there"];
pub const REFERENCED: &[Flag] = &[DEPLOY_ALL_THE_THINGS];

pub fn false_positive() -> Vec<Flag> {
    const LOCAL: Flag = "local";
    let single: Flag = "single";
    let mut my_var: Vec<Flag> = Vec::new();
    my_var.push(single);
    my_var.push(LOCAL);
    my_var
}

pub fn in_closure() -> Flag {
    let pick = || {
        let chosen: Flag = "closure";
        chosen
    };
    pick()
}

struct Example;

impl Example {
    const DEFAULT: Flag = "m000";

    fn method(&self) -> Flag {
        "m000"
    }
}

trait Flagged {
    const FLAG: Flag = "trait-default";
}

mod nested {
    pub const NESTED: super::Flag = "nested";
}
