//! Window backend: responsibility and boundaries
//!
//! This module and its submodules expose ONLY raw window-system primitives
//! (enumeration, title/process lookup, restore, input attachment, z-order and
//! foreground requests). Matching policy lives in `window_matcher`, the
//! focus-stealing sequence in `focus_executor`.

mod dry_run;
#[cfg(windows)]
mod win32;
mod r#trait;

#[cfg(test)]
pub use self::dry_run::{BackendCall, DryRunBackend};
pub use self::r#trait::{create_window_backend, WindowBackend};
