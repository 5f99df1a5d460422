pub mod search_term;
pub mod window;

pub use search_term::SearchTerm;
pub use window::{ThreadId, WindowHandle, WindowInfo};
