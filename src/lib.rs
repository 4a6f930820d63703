//! Form aggregation for Ratatui terminal UIs
//!
//! This crate composes independently rendered field views into a single
//! form: it collects their values into one nested JSON object, tracks
//! aggregate validity, and intercepts a submit key binding while mounted.
//!
//! - `form`: the [`FormView`] aggregator and [`SubmitOutcome`]
//! - `field`: the [`FieldView`] trait field implementations provide
//! - `fields`: bundled [`TextField`] and [`ToggleField`] implementations
//! - `path`: dot/bracket path assignment into JSON objects
//!
//! ```
//! use formview::{FormOptions, FormView, TextField, ToggleField};
//!
//! let options = FormOptions::new()
//!     .field(TextField::new("user.email", "Email").required())
//!     .field(ToggleField::new("newsletter", "Subscribe"))
//!     .on_submit(|data| println!("{data}"));
//!
//! let mut form = FormView::new(options)?;
//! form.mount()?;
//! assert!(!form.is_valid());
//! # Ok::<(), formview::FormError>(())
//! ```

mod error;
mod field;
mod fields;
mod form;
mod options;
mod registry;

pub mod path;
pub mod platform;

pub use error::FormError;
pub use field::FieldView;
pub use fields::{TextField, ToggleField};
pub use form::{FormView, SubmitOutcome};
pub use options::{
    ChangeCallback, CleanFn, FieldsFn, FormOptions, SubmitBinding, SubmitCallback, ValidCallback,
};
pub use registry::FieldRegistry;

#[cfg(test)]
pub use field::MockFieldView;
