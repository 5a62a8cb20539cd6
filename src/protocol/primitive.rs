/// Text to primitive conversion used by typed header lookup.
pub trait Primitive: Sized {
    /// Name reported when conversion fails.
    const TYPE_NAME: &'static str;

    fn parse_primitive(text: &str) -> Option<Self>;
}

macro_rules! from_str_primitive {
    ($($t:ty),* $(,)?) => {
        $(impl Primitive for $t {
            const TYPE_NAME: &'static str = stringify!($t);

            fn parse_primitive(text: &str) -> Option<Self> { text.parse().ok() }
        })*
    };
}

from_str_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, char);

impl Primitive for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_primitive(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }
}

impl Primitive for String {
    const TYPE_NAME: &'static str = "String";

    fn parse_primitive(text: &str) -> Option<Self> { Some(text.to_owned()) }
}
