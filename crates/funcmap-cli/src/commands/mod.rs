//! Command implementations for the funcmap CLI

mod call;
mod list;

pub use call::{execute as call, parse_arg};
pub use list::execute as list;
