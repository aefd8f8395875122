pub struct Feature {
    pub name: &'static str,
}

pub const CHECKOUT: Feature = Feature { name: "checkout" };
