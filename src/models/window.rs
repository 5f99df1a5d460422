use std::fmt;

/// Идентификатор потока ОС. 0 означает "потока нет"
pub type ThreadId = u32;

/// Непрозрачный идентификатор окна верхнего уровня (HWND на Windows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub fn new(raw: isize) -> Self {
        Self(raw)
    }

    #[cfg(windows)]
    pub fn raw(self) -> isize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Информация об окне
///
/// Живёт только в пределах одного прохода перечисления (или внутри
/// эмулируемого рабочего стола dry-run режима).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: Option<u32>,
    pub process_name: Option<String>,
    pub thread_id: ThreadId,
    pub visible: bool,
    pub minimized: bool,
}

impl WindowInfo {
    pub fn new(handle: isize, title: impl Into<String>) -> Self {
        Self {
            handle: WindowHandle::new(handle),
            title: title.into(),
            pid: None,
            process_name: None,
            thread_id: 0,
            visible: true,
            minimized: false,
        }
    }

    pub fn with_process(mut self, pid: u32, name: impl Into<String>) -> Self {
        self.pid = Some(pid);
        self.process_name = Some(name.into());
        self
    }

    pub fn with_thread(mut self, thread_id: ThreadId) -> Self {
        self.thread_id = thread_id;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn minimized(mut self) -> Self {
        self.minimized = true;
        self
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.process_name {
            Some(process) => write!(f, "\"{}\" ({}, {})", self.title, process, self.handle),
            None => write!(f, "\"{}\" ({})", self.title, self.handle),
        }
    }
}
