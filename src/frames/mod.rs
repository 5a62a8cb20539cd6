mod decode;
mod encode;
pub(crate) mod escape;
mod frame;

pub use escape::{escape, unescape};
pub use frame::Frame;
