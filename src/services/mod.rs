pub mod cascade;
pub mod co_triggers;
pub mod focus_executor;
pub mod window_backend;
pub mod window_matcher;

pub use cascade::FocusRunner;
pub use co_triggers::CoTriggerMap;
pub use window_backend::create_window_backend;
