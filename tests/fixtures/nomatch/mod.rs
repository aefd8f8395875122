pub type Other = u8;

pub const SOMETHING: Other = 1;
