use crate::models::{ThreadId, WindowHandle};
use crate::services::window_backend::WindowBackend;
use std::fmt;
use tracing::{debug, info};

/// Что удалось сделать при попытке забрать фокус.
///
/// Вызывающему коду результат не нужен (фокус - best-effort), но по нему
/// удобно проверять последовательность действий.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOutcome {
    pub restored: bool,
    pub attached_foreground: bool,
    pub attached_target: bool,
    pub brought_to_top: bool,
    pub foreground_granted: bool,
}

impl fmt::Display for FocusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "restore={} attach(fg={}, target={}) top={} foreground={}",
            self.restored,
            self.attached_foreground,
            self.attached_target,
            self.brought_to_top,
            self.foreground_granted
        )
    }
}

/// Подключение очереди ввода текущего потока к чужому потоку.
/// Отключается в `Drop`, на любом пути выхода.
struct InputAttachment<'a> {
    backend: &'a dyn WindowBackend,
    from: ThreadId,
    to: ThreadId,
}

impl<'a> InputAttachment<'a> {
    fn attach(backend: &'a dyn WindowBackend, from: ThreadId, to: ThreadId) -> Option<Self> {
        if to == 0 || to == from {
            return None;
        }

        if backend.attach_input(from, to, true) {
            debug!("Очередь ввода потока {} подключена к потоку {}", from, to);
            Some(Self { backend, from, to })
        } else {
            debug!("AttachThreadInput({} -> {}) отклонён", from, to);
            None
        }
    }
}

impl Drop for InputAttachment<'_> {
    fn drop(&mut self) {
        if !self.backend.attach_input(self.from, self.to, false) {
            debug!("Не удалось отключить поток {} от потока {}", self.from, self.to);
        }
    }
}

/// Вывести окно на передний план в обход защиты от кражи фокуса
pub fn steal(backend: &dyn WindowBackend, window: WindowHandle) -> FocusOutcome {
    let mut outcome = FocusOutcome::default();
    if window.is_null() {
        return outcome;
    }

    if backend.is_minimized(window) {
        outcome.restored = backend.restore(window);
        debug!("Окно {} было свёрнуто, restore: {}", window, outcome.restored);
    }

    let current_thread = backend.current_thread_id();
    let foreground_thread = backend.foreground_thread_id();
    let target_thread = backend.window_thread_id(window);

    debug!(
        "Потоки: текущий={}, foreground={}, целевой={}",
        current_thread, foreground_thread, target_thread
    );

    {
        let foreground_attachment =
            InputAttachment::attach(backend, current_thread, foreground_thread);
        // Одного подключения достаточно, если окно уже принадлежит foreground-потоку
        let target_attachment = if target_thread == foreground_thread {
            None
        } else {
            InputAttachment::attach(backend, current_thread, target_thread)
        };

        outcome.attached_foreground = foreground_attachment.is_some();
        outcome.attached_target = target_attachment.is_some();

        outcome.brought_to_top = backend.bring_to_top(window);
        outcome.foreground_granted = backend.set_foreground(window);

        // Отключаем в обратном порядке: сначала целевой поток, затем foreground
        drop(target_attachment);
        drop(foreground_attachment);
    }

    if outcome.foreground_granted {
        info!("Окно {} получило фокус", window);
    } else {
        info!("ОС отклонила запрос фокуса для окна {}", window);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WindowInfo;
    use crate::services::window_backend::{BackendCall, DryRunBackend};

    const CURRENT: ThreadId = 1;

    fn h(raw: isize) -> WindowHandle {
        WindowHandle::new(raw)
    }

    #[test]
    fn test_full_sequence_with_foreign_threads() {
        let backend = DryRunBackend::with_windows(vec![
            WindowInfo::new(1, "Terminal").with_thread(10),
            WindowInfo::new(2, "Editor").with_thread(20),
        ])
        .with_foreground_thread(10);

        let outcome = steal(&backend, h(2));

        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::Attach { from: CURRENT, to: 10 },
                BackendCall::Attach { from: CURRENT, to: 20 },
                BackendCall::BringToTop(h(2)),
                BackendCall::SetForeground(h(2)),
                BackendCall::Detach { from: CURRENT, to: 20 },
                BackendCall::Detach { from: CURRENT, to: 10 },
            ]
        );
        assert!(outcome.attached_foreground && outcome.attached_target);
        assert!(outcome.foreground_granted);
        assert!(!outcome.restored);
        assert_eq!(backend.foreground_thread_id(), 20);
    }

    #[test]
    fn test_minimized_window_restored_before_foreground_request() {
        let backend = DryRunBackend::with_windows(vec![
            WindowInfo::new(1, "Mail").with_thread(20).minimized(),
        ])
        .with_foreground_thread(10);

        let outcome = steal(&backend, h(1));
        let calls = backend.calls();

        assert!(outcome.restored);
        assert_eq!(calls.first(), Some(&BackendCall::Restore(h(1))));
        let restore = calls.iter().position(|c| *c == BackendCall::Restore(h(1)));
        let foreground = calls.iter().position(|c| *c == BackendCall::SetForeground(h(1)));
        assert!(restore < foreground);
        assert_eq!(backend.window(h(1)).map(|w| w.minimized), Some(false));
    }

    #[test]
    fn test_detach_happens_even_when_foreground_rejected() {
        let backend = DryRunBackend::with_windows(vec![WindowInfo::new(1, "Admin").with_thread(20)])
            .with_foreground_thread(10)
            .denying_foreground();

        let outcome = steal(&backend, h(1));
        let calls = backend.calls();

        assert!(!outcome.foreground_granted);
        assert!(calls.contains(&BackendCall::Detach { from: CURRENT, to: 10 }));
        assert!(calls.contains(&BackendCall::Detach { from: CURRENT, to: 20 }));
    }

    #[test]
    fn test_no_attach_to_own_thread_or_missing_foreground() {
        let backend = DryRunBackend::with_windows(vec![WindowInfo::new(1, "Own").with_thread(CURRENT)]);

        let outcome = steal(&backend, h(1));

        assert!(!outcome.attached_foreground);
        assert!(!outcome.attached_target);
        assert_eq!(
            backend.calls(),
            vec![BackendCall::BringToTop(h(1)), BackendCall::SetForeground(h(1))]
        );
    }

    #[test]
    fn test_single_attach_when_target_owns_foreground() {
        let backend = DryRunBackend::with_windows(vec![WindowInfo::new(1, "Browser").with_thread(30)])
            .with_foreground_thread(30);

        let outcome = steal(&backend, h(1));
        let attaches = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c, BackendCall::Attach { .. }))
            .count();

        assert_eq!(attaches, 1);
        assert!(outcome.attached_foreground);
        assert!(!outcome.attached_target);
    }
}
