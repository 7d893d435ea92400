pub mod classes;
pub mod functions;
pub mod registry;

pub use classes::{exception, std_class};
pub use functions::{array, input, output, string, variable};
pub use registry::{BuiltinRegistry, ClassFactory, FunctionGroupFactory, Internals};
