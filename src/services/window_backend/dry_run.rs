use crate::error::{FocusError, Result};
use crate::models::{ThreadId, WindowHandle, WindowInfo};
use parking_lot::RwLock;
use std::fmt;
use tokio::time::Instant;
use tracing::{debug, info};

/// Директива, которую получил эмулируемый рабочий стол
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Title(WindowHandle),
    ProcessName(WindowHandle),
    Restore(WindowHandle),
    Attach { from: ThreadId, to: ThreadId },
    Detach { from: ThreadId, to: ThreadId },
    BringToTop(WindowHandle),
    SetForeground(WindowHandle),
}

impl fmt::Display for BackendCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendCall::Title(window) => write!(f, "title {}", window),
            BackendCall::ProcessName(window) => write!(f, "process_name {}", window),
            BackendCall::Restore(window) => write!(f, "restore {}", window),
            BackendCall::Attach { from, to } => write!(f, "attach {} -> {}", from, to),
            BackendCall::Detach { from, to } => write!(f, "detach {} -> {}", from, to),
            BackendCall::BringToTop(window) => write!(f, "bring_to_top {}", window),
            BackendCall::SetForeground(window) => write!(f, "set_foreground {}", window),
        }
    }
}

struct Desktop {
    windows: Vec<WindowInfo>,
    foreground_thread: ThreadId,
}

/// Эмуляция рабочего стола: никаких реальных действий, только журнал директив
pub struct DryRunBackend {
    desktop: RwLock<Desktop>,
    current_thread: ThreadId,
    deny_foreground: bool,
    calls: RwLock<Vec<(Instant, BackendCall)>>,
}

impl DryRunBackend {
    pub fn new() -> Self {
        let fake_windows = vec![
            WindowInfo::new(0x101, "Terminal - dry_run")
                .with_process(4100, "wezterm")
                .with_thread(41),
            WindowInfo::new(0x102, "notes.md - Editor - dry_run")
                .with_process(4200, "editor")
                .with_thread(42),
            WindowInfo::new(0x103, "Browser - dry_run")
                .with_process(4300, "firefox")
                .with_thread(43),
            WindowInfo::new(0x104, "Mail - dry_run")
                .with_process(4400, "thunderbird")
                .with_thread(44)
                .minimized(),
            WindowInfo::new(0x105, "Tray - dry_run")
                .with_process(4500, "tray")
                .with_thread(45)
                .hidden(),
        ];

        Self::with_windows(fake_windows).with_foreground_thread(41)
    }

    pub fn with_windows(windows: Vec<WindowInfo>) -> Self {
        Self {
            desktop: RwLock::new(Desktop {
                windows,
                foreground_thread: 0,
            }),
            current_thread: 1,
            deny_foreground: false,
            calls: RwLock::new(Vec::new()),
        }
    }

    pub fn with_foreground_thread(self, thread_id: ThreadId) -> Self {
        self.desktop.write().foreground_thread = thread_id;
        self
    }

    /// Эмулировать политику, отклоняющую запрос foreground даже после attach
    #[cfg(test)]
    pub fn denying_foreground(mut self) -> Self {
        self.deny_foreground = true;
        self
    }

    #[cfg(test)]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.read().iter().map(|(_, call)| *call).collect()
    }

    /// Журнал директив вместе с моментом (по часам tokio), когда они пришли
    #[cfg(test)]
    pub fn timed_calls(&self) -> Vec<(Instant, BackendCall)> {
        self.calls.read().clone()
    }

    #[cfg(test)]
    pub fn window(&self, window: WindowHandle) -> Option<WindowInfo> {
        self.find(window)
    }

    fn record(&self, call: BackendCall) {
        debug!("Dry-run директива: {}", call);
        self.calls.write().push((Instant::now(), call));
    }

    fn find(&self, window: WindowHandle) -> Option<WindowInfo> {
        self.desktop
            .read()
            .windows
            .iter()
            .find(|w| w.handle == window)
            .cloned()
    }
}

impl super::WindowBackend for DryRunBackend {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        Ok(self.desktop.read().windows.iter().map(|w| w.handle).collect())
    }

    fn is_visible(&self, window: WindowHandle) -> bool {
        self.find(window).is_some_and(|w| w.visible)
    }

    fn title(&self, window: WindowHandle) -> String {
        self.record(BackendCall::Title(window));
        self.find(window).map(|w| w.title).unwrap_or_default()
    }

    fn process_name(&self, window: WindowHandle) -> Result<String> {
        self.record(BackendCall::ProcessName(window));
        let info = self
            .find(window)
            .ok_or_else(|| crate::focus_error!(internal, "окно {} не существует", window))?;

        match info.process_name {
            Some(name) => Ok(name),
            None => FocusError::process_lookup(info.pid.unwrap_or(0), "процесс уже завершился"),
        }
    }

    fn is_minimized(&self, window: WindowHandle) -> bool {
        self.find(window).is_some_and(|w| w.minimized)
    }

    fn restore(&self, window: WindowHandle) -> bool {
        self.record(BackendCall::Restore(window));
        info!("Dry-run: восстанавливаем окно {}", window);

        let mut desktop = self.desktop.write();
        match desktop.windows.iter_mut().find(|w| w.handle == window) {
            Some(w) => {
                w.minimized = false;
                true
            }
            None => false,
        }
    }

    fn current_thread_id(&self) -> ThreadId {
        self.current_thread
    }

    fn foreground_thread_id(&self) -> ThreadId {
        self.desktop.read().foreground_thread
    }

    fn window_thread_id(&self, window: WindowHandle) -> ThreadId {
        self.find(window).map(|w| w.thread_id).unwrap_or(0)
    }

    fn attach_input(&self, from: ThreadId, to: ThreadId, attach: bool) -> bool {
        if attach {
            self.record(BackendCall::Attach { from, to });
        } else {
            self.record(BackendCall::Detach { from, to });
        }
        from != 0 && to != 0
    }

    fn bring_to_top(&self, window: WindowHandle) -> bool {
        self.record(BackendCall::BringToTop(window));
        info!("Dry-run: поднимаем окно {} наверх z-order", window);

        let mut desktop = self.desktop.write();
        match desktop.windows.iter().position(|w| w.handle == window) {
            Some(index) => {
                let raised = desktop.windows.remove(index);
                desktop.windows.insert(0, raised);
                true
            }
            None => false,
        }
    }

    fn set_foreground(&self, window: WindowHandle) -> bool {
        self.record(BackendCall::SetForeground(window));
        if self.deny_foreground {
            info!("Dry-run: запрос foreground для {} отклонён", window);
            return false;
        }

        let thread_id = self.window_thread_id(window);
        if thread_id == 0 {
            return false;
        }
        info!("Dry-run: окно {} получает фокус", window);
        self.desktop.write().foreground_thread = thread_id;
        true
    }
}
