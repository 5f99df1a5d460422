pub mod exe_dir;
pub mod target;

pub use exe_dir::find_exe_dir;
pub use target::parse_target;

// ✅ Макросы условного логирования: не форматируем строки, если уровень выключен
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! trace_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!($($arg)*);
        }
    };
}
