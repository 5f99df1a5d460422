use crate::models::SearchTerm;
use crate::services::co_triggers::CoTriggerSource;
use crate::services::focus_executor::{self, FocusOutcome};
use crate::services::window_backend::WindowBackend;
use crate::services::window_matcher::{self, MatchOutcome};
use tokio::time::{sleep, Duration};
use tracing::info;

/// Итог обработки одного имени окна
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub name: String,
    pub matched: MatchOutcome,
    pub focus: Option<FocusOutcome>,
}

/// Итог запуска: основное окно и каскад ко-триггеров
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub primary: StepReport,
    pub cascade: Vec<StepReport>,
}

/// Фокус основного окна и следом - всех его ко-триггеров по очереди
pub struct FocusRunner<'a> {
    backend: &'a dyn WindowBackend,
    co_triggers: &'a dyn CoTriggerSource,
    delay: Duration,
}

impl<'a> FocusRunner<'a> {
    pub fn new(
        backend: &'a dyn WindowBackend,
        co_triggers: &'a dyn CoTriggerSource,
        delay: Duration,
    ) -> Self {
        Self {
            backend,
            co_triggers,
            delay,
        }
    }

    pub async fn run(&self, target: &str) -> RunReport {
        let primary = self.focus_by_name(target);

        // Каскад выполняется, даже если основное окно не найдено
        let names = match SearchTerm::new(target) {
            Some(term) => self.co_triggers.co_triggers(term.key()),
            None => Vec::new(),
        };

        if !names.is_empty() {
            info!("Ко-триггеры для \"{}\": {}", target, names.join(", "));
        }

        let mut cascade = Vec::with_capacity(names.len());
        for name in names {
            sleep(self.delay).await;
            cascade.push(self.focus_by_name(&name));
        }

        RunReport { primary, cascade }
    }

    /// Найти окно и забрать фокус - один и тот же путь для основного окна и ко-триггеров
    pub fn focus_by_name(&self, name: &str) -> StepReport {
        let matched = window_matcher::resolve_name(self.backend, name);
        let focus = matched.handle().map(|handle| {
            info!("\"{}\": {}, забираем фокус", name, matched);
            focus_executor::steal(self.backend, handle)
        });

        if focus.is_none() {
            info!("\"{}\": окно не найдено", name);
        }

        StepReport {
            name: name.to_string(),
            matched,
            focus,
        }
    }
}
