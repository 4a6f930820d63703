//! Bundled field implementations

mod text;
mod toggle;

pub use text::TextField;
pub use toggle::ToggleField;
