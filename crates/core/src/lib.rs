pub mod models;
pub mod text;

pub use models::*;
pub use text::normalize_text;
