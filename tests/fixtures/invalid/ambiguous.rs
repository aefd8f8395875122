pub struct Feature {
    #[typedecl(identifier)]
    pub name: &'static str,
    #[typedecl(identifier)]
    pub alias: &'static str,
}

pub const CHECKOUT: Feature = Feature {
    name: "checkout",
    alias: "co",
};
