pub type Flag = &'static str;

pub const FLAG_SOMETHING_ELSE: Flag = "flag-whomever";
pub const FLAG_SOMETHING_COULD_BE: Flag = "flag-whatever";
