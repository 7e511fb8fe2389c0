//! State model for the Sales Scout UI.
//!
//! All types are GPUI-independent for testability.

mod edit_buffer;

pub use edit_buffer::EditBuffer;
