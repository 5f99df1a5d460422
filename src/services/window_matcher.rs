use crate::models::{SearchTerm, WindowHandle};
use crate::services::window_backend::WindowBackend;
use crate::trace_if_enabled;
use std::fmt;
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// По какому тексту окна сработало совпадение
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    ProcessName,
}

/// Результат одного прохода перечисления окон
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Строка поиска совпала с целым словом; перечисление остановлено
    Exact { handle: WindowHandle, field: MatchField },
    /// Первое окно, содержащее строку поиска как подстроку
    Partial { handle: WindowHandle, field: MatchField },
    NotFound,
}

impl MatchOutcome {
    pub fn handle(&self) -> Option<WindowHandle> {
        match self {
            MatchOutcome::Exact { handle, .. } | MatchOutcome::Partial { handle, .. } => {
                Some(*handle)
            }
            MatchOutcome::NotFound => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Exact { handle, field } => {
                write!(f, "точное совпадение {} ({:?})", handle, field)
            }
            MatchOutcome::Partial { handle, field } => {
                write!(f, "частичное совпадение {} ({:?})", handle, field)
            }
            MatchOutcome::NotFound => write!(f, "окно не найдено"),
        }
    }
}

/// Состояние поиска в пределах одного прохода
#[derive(Debug, Default)]
struct MatchState {
    exact: Option<(WindowHandle, MatchField)>,
    fallback: Option<(WindowHandle, MatchField)>,
}

impl MatchState {
    /// Сопоставить текст окна со строкой поиска.
    /// `Break` - найдено точное совпадение, дальше окна не смотрим.
    fn observe(
        &mut self,
        term: &SearchTerm,
        text: &str,
        handle: WindowHandle,
        field: MatchField,
    ) -> ControlFlow<()> {
        if term.is_whole_word_of(text) {
            self.exact = Some((handle, field));
            return ControlFlow::Break(());
        }

        // Первое частичное совпадение побеждает, дальше не перезаписываем
        if self.fallback.is_none() && term.is_part_of(text) {
            self.fallback = Some((handle, field));
        }

        ControlFlow::Continue(())
    }

    fn into_outcome(self) -> MatchOutcome {
        match (self.exact, self.fallback) {
            (Some((handle, field)), _) => MatchOutcome::Exact { handle, field },
            (None, Some((handle, field))) => MatchOutcome::Partial { handle, field },
            (None, None) => MatchOutcome::NotFound,
        }
    }
}

/// Найти окно по строке поиска: сначала целое слово в заголовке или имени
/// процесса, иначе первое окно с подстрокой.
pub fn resolve(backend: &dyn WindowBackend, term: &SearchTerm) -> MatchOutcome {
    let windows = match backend.top_level_windows() {
        Ok(windows) => windows,
        Err(e) => {
            warn!("Не удалось перечислить окна: {}", e);
            return MatchOutcome::NotFound;
        }
    };

    let mut state = MatchState::default();

    for handle in windows {
        if !backend.is_visible(handle) {
            continue;
        }

        let title = backend.title(handle);
        if title.is_empty() {
            continue;
        }

        trace_if_enabled!("Проверяем окно {} \"{}\"", handle, title);

        if state
            .observe(term, &title, handle, MatchField::Title)
            .is_break()
        {
            break;
        }

        match backend.process_name(handle) {
            Ok(process) => {
                if state
                    .observe(term, &process, handle, MatchField::ProcessName)
                    .is_break()
                {
                    break;
                }
            }
            // Процесс мог завершиться между перечислением и запросом
            Err(e) => debug!("Пропускаем процесс окна {}: {}", handle, e),
        }
    }

    let outcome = state.into_outcome();
    debug!("Поиск \"{}\": {}", term, outcome);
    outcome
}

/// То же, что `resolve`, но для сырой строки. Пустая строка не совпадает ни с чем.
pub fn resolve_name(backend: &dyn WindowBackend, raw: &str) -> MatchOutcome {
    match SearchTerm::new(raw) {
        Some(term) => resolve(backend, &term),
        None => {
            debug!("Пустая строка поиска, окно не ищем");
            MatchOutcome::NotFound
        }
    }
}
