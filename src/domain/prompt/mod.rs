pub mod builder;

pub use builder::{UNKNOWN, build_prompt, build_question, cap_chars, group_thousands};
