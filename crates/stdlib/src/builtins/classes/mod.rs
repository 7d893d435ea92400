pub mod exception;
pub mod std_class;
