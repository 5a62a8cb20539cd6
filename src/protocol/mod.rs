mod command;
mod headers;
mod primitive;

pub use command::Command;
pub use headers::{Headers, headers};
pub use primitive::Primitive;
