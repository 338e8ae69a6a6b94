pub mod html;

pub use crate::html::{extract_links, extract_text, Page};
