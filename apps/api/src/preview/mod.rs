// Preview: read-only projection of the resume into a printable page.

pub mod handlers;
pub mod html;
pub mod render;

pub use html::to_html;
pub use render::{render, PreviewDocument};
