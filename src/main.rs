// Запуск через URL-протокол focus: не должен открывать консольное окно
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
mod config;
mod error;
mod models;
mod services;
mod utils;

use config::{Config, LoggingConfig};
use services::{create_window_backend, CoTriggerMap, FocusRunner};

#[derive(Parser, Debug)]
#[command(name = "focus-window")]
#[command(about = "Утилита для принудительного переключения фокуса на окно по имени")]
struct Args {
    /// Имя окна или процесса, допускается форма `focus:имя`
    target: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let Some(raw_target) = args.target else {
        Args::command().print_help()?;
        return Ok(());
    };

    // Загрузка конфигурации (ошибка не фатальна, логирование ещё не поднято)
    let config_path = Config::default_path();
    let (config, config_error) = match Config::load(config_path.as_ref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Инициализация системы логирования
    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Не удалось инициализировать логирование: {:#}", e);
    }

    info!("Запуск focus-window v{}", env!("CARGO_PKG_VERSION"));

    if let Some(e) = config_error {
        warn!("Конфигурация не загружена, используем значения по умолчанию: {:#}", e);
    }

    if config.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let target = utils::parse_target(&raw_target);
    info!("Цель: \"{}\"", target);

    let backend = match create_window_backend(config.dry_run) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Бэкенд окон недоступен: {}", e);
            return Ok(());
        }
    };

    let co_triggers = CoTriggerMap::discover(&config.cascade);
    let runner = FocusRunner::new(backend.as_ref(), &co_triggers, config.cascade.delay());
    let report = runner.run(&target).await;

    for step in std::iter::once(&report.primary).chain(&report.cascade) {
        match step.focus {
            Some(focus) => debug!("\"{}\": {}, {}", step.name, step.matched, focus),
            None => debug!("\"{}\": {}", step.name, step.matched),
        }
    }

    info!("focus-window завершил работу");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))?;

    let stderr_layer = match logging.format.as_str() {
        "full" => fmt::layer().with_writer(std::io::stderr).boxed(),
        _ => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    let file_layer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Не удалось открыть файл журнала {:?}", path))?;
            Some(fmt::layer().with_writer(Mutex::new(file)).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
