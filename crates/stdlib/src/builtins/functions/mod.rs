pub mod array;
pub mod input;
pub mod output;
pub mod string;
pub mod variable;

pub use array::{array_keys, array_values, count, implode, in_array};
pub use output::{print, var_dump};
pub use string::{str_repeat, strlen, strrev, strtolower, strtoupper};
pub use variable::{gettype, intval, is_array, is_int, is_null, is_string, strval};
