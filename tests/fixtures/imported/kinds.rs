use typedecl_derive::Declared;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Declared)]
pub struct Kind {
    #[typedecl(identifier)]
    pub id: &'static str,
    pub weight: u8,
}
