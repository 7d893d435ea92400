pub mod args;
pub mod conversions;
pub mod errors;

pub use args::{arg, array_arg, native, this_object};
pub use errors::invalid_argument;
