pub type Flag = &'static str;

pub const PLAIN: Flag = "plain";
pub const MADE: Flag = make_flag();

const fn make_flag() -> Flag {
    "made"
}
