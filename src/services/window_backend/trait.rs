use crate::error::Result;
use crate::models::{ThreadId, WindowHandle};

/// Примитивы оконной системы, нужные поиску окна и краже фокуса.
///
/// Все методы, кроме перечисления и имени процесса, не возвращают ошибок:
/// директивы оконной системы выполняются по принципу best-effort, результат
/// `bool` лишь сообщает, приняла ли их ОС.
pub trait WindowBackend {
    /// Снимок всех окон верхнего уровня в порядке, который отдаёт ОС
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>>;

    fn is_visible(&self, window: WindowHandle) -> bool;

    /// Заголовок окна; пустая строка, если заголовка нет
    fn title(&self, window: WindowHandle) -> String;

    /// Короткое имя процесса-владельца (без пути и расширения).
    /// Ошибка означает, что процесс уже завершился или недоступен.
    fn process_name(&self, window: WindowHandle) -> Result<String>;

    fn is_minimized(&self, window: WindowHandle) -> bool;

    fn restore(&self, window: WindowHandle) -> bool;

    fn current_thread_id(&self) -> ThreadId;

    /// Поток, владеющий текущим foreground-окном (0, если такого окна нет)
    fn foreground_thread_id(&self) -> ThreadId;

    fn window_thread_id(&self, window: WindowHandle) -> ThreadId;

    /// Подключить (`attach = true`) или отключить очередь ввода потока `from` к потоку `to`
    fn attach_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool;

    fn bring_to_top(&self, window: WindowHandle) -> bool;

    fn set_foreground(&self, window: WindowHandle) -> bool;
}

/// Factory function to create an appropriate window backend based on the dry_run flag
pub fn create_window_backend(dry_run: bool) -> Result<Box<dyn WindowBackend>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunBackend::new()));
    }

    #[cfg(windows)]
    {
        Ok(Box::new(super::win32::Win32Backend::new()))
    }

    #[cfg(not(windows))]
    {
        Err(crate::focus_error!(
            unsupported,
            "управление фокусом окон доступно только в Windows ({}), используйте dry_run",
            std::env::consts::OS
        ))
    }
}
