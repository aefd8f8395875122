pub struct Feature {
    #[typedecl(identifier)]
    pub name: &'static str,
}

const NAME: &str = "checkout";

pub const CHECKOUT: Feature = Feature { name: NAME };
