use thiserror::Error;

#[derive(Error, Debug)]
pub enum FocusError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка разбора JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ошибка Win32: {0}")]
    Win32(String),

    #[error("Не удалось получить процесс {pid}: {reason}")]
    ProcessLookup { pid: u32, reason: String },

    #[error("Платформа не поддерживается: {0}")]
    UnsupportedPlatform(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl FocusError {
    pub fn process_lookup<T>(pid: u32, reason: impl Into<String>) -> Result<T> {
        Err(FocusError::ProcessLookup {
            pid,
            reason: reason.into(),
        })
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for FocusError {
    fn from(err: windows::core::Error) -> Self {
        FocusError::Win32(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FocusError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! focus_error {
    (unsupported, $($arg:tt)*) => {
        $crate::error::FocusError::UnsupportedPlatform(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::FocusError::Internal(format!($($arg)*))
    };
}
