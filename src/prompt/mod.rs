//! Compiles form data into the instructions sent to the text-generation service.
//!
//! Every function here is pure: identical inputs produce identical prompts.

mod dates;
mod detail;
mod email;
mod translation;

pub use dates::{format_long_date, inclusive_days, parse_date};
pub use detail::render_details;
pub use email::{compile_body_prompt, compile_subject_prompt};
pub use translation::{compile_translation_prompt, parse_translation_reply};
