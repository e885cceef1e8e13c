//! AMP output: markup conversion and page generation.

pub mod convert;
pub mod page;
pub mod rules;

pub use convert::{convert_tree, to_amp_html};
pub use page::{emit_amp_pages, is_amp_candidate, render_amp_page};
