use crate::error::{FocusError, Result};
use crate::models::{ThreadId, WindowHandle};
use std::path::Path;
use tracing::debug;
use windows::core::PWSTR;
use windows::Win32::Foundation::{CloseHandle, BOOL, HANDLE, HWND, LPARAM, TRUE};
use windows::Win32::System::Threading::{
    AttachThreadInput, GetCurrentThreadId, OpenProcess, QueryFullProcessImageNameW,
    PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    BringWindowToTop, EnumWindows, GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, IsWindowVisible, SetForegroundWindow, ShowWindow,
    SW_RESTORE,
};

/// Бэкенд поверх user32/kernel32
pub struct Win32Backend;

impl Win32Backend {
    pub fn new() -> Self {
        Self
    }

    fn hwnd(window: WindowHandle) -> HWND {
        HWND(window.raw() as *mut _)
    }

    fn owner_pid(window: WindowHandle) -> u32 {
        let mut pid: u32 = 0;
        unsafe {
            GetWindowThreadProcessId(Self::hwnd(window), Some(&mut pid as *mut u32));
        }
        pid
    }
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<WindowHandle>);
    windows.push(WindowHandle::new(hwnd.0 as isize));
    TRUE
}

/// Дескриптор процесса, закрываемый при выходе из области видимости
struct ProcessHandle(HANDLE);

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

impl super::WindowBackend for Win32Backend {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        let mut windows: Vec<WindowHandle> = Vec::new();
        unsafe {
            EnumWindows(
                Some(collect_window),
                LPARAM(&mut windows as *mut Vec<WindowHandle> as isize),
            )?;
        }
        debug!("EnumWindows вернул {} окон", windows.len());
        Ok(windows)
    }

    fn is_visible(&self, window: WindowHandle) -> bool {
        unsafe { IsWindowVisible(Self::hwnd(window)).as_bool() }
    }

    fn title(&self, window: WindowHandle) -> String {
        let hwnd = Self::hwnd(window);
        unsafe {
            let length = GetWindowTextLengthW(hwnd);
            if length <= 0 {
                return String::new();
            }

            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            if copied <= 0 {
                return String::new();
            }
            String::from_utf16_lossy(&buffer[..copied as usize])
        }
    }

    fn process_name(&self, window: WindowHandle) -> Result<String> {
        let pid = Self::owner_pid(window);
        if pid == 0 {
            return FocusError::process_lookup(pid, "окно не принадлежит процессу");
        }

        let process = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }
            .map(ProcessHandle)
            .map_err(|e| FocusError::ProcessLookup {
                pid,
                reason: e.to_string(),
            })?;

        let mut path = vec![0u16; 1024];
        let mut size = path.len() as u32;
        unsafe {
            QueryFullProcessImageNameW(
                process.0,
                PROCESS_NAME_WIN32,
                PWSTR(path.as_mut_ptr()),
                &mut size,
            )
        }
        .map_err(|e| FocusError::ProcessLookup {
            pid,
            reason: e.to_string(),
        })?;

        let path = String::from_utf16_lossy(&path[..size as usize]);
        // Как Process.ProcessName: имя исполняемого файла без расширения
        Path::new(&path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .ok_or_else(|| FocusError::ProcessLookup {
                pid,
                reason: format!("не удалось извлечь имя из пути {}", path),
            })
    }

    fn is_minimized(&self, window: WindowHandle) -> bool {
        unsafe { IsIconic(Self::hwnd(window)).as_bool() }
    }

    fn restore(&self, window: WindowHandle) -> bool {
        unsafe { ShowWindow(Self::hwnd(window), SW_RESTORE).as_bool() }
    }

    fn current_thread_id(&self) -> ThreadId {
        unsafe { GetCurrentThreadId() }
    }

    fn foreground_thread_id(&self) -> ThreadId {
        unsafe {
            let foreground = GetForegroundWindow();
            if foreground.0.is_null() {
                return 0;
            }
            GetWindowThreadProcessId(foreground, None)
        }
    }

    fn window_thread_id(&self, window: WindowHandle) -> ThreadId {
        unsafe { GetWindowThreadProcessId(Self::hwnd(window), None) }
    }

    fn attach_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool {
        unsafe { AttachThreadInput(from, to, attach).as_bool() }
    }

    fn bring_to_top(&self, window: WindowHandle) -> bool {
        unsafe { BringWindowToTop(Self::hwnd(window)).is_ok() }
    }

    fn set_foreground(&self, window: WindowHandle) -> bool {
        unsafe { SetForegroundWindow(Self::hwnd(window)).as_bool() }
    }
}
