use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Найти каталог, в котором лежит исполняемый файл
///
/// Порядок: `current_exe()`, затем первый аргумент процесса относительно
/// рабочего каталога.
pub fn find_exe_dir() -> Option<PathBuf> {
    if let Some(dir) = from_current_exe() {
        debug!("Каталог исполняемого файла (current_exe): {:?}", dir);
        return Some(dir);
    }

    if let Some(dir) = from_first_arg() {
        debug!("Каталог исполняемого файла (argv[0]): {:?}", dir);
        return Some(dir);
    }

    debug!("Не удалось определить каталог исполняемого файла");
    None
}

fn from_current_exe() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    // current_exe может вернуть символическую ссылку
    let exe = exe.canonicalize().unwrap_or(exe);
    non_empty_parent(&exe)
}

fn from_first_arg() -> Option<PathBuf> {
    let arg = PathBuf::from(env::args_os().next()?);
    let exe = if arg.is_absolute() {
        arg
    } else {
        env::current_dir().ok()?.join(arg)
    };
    non_empty_parent(&exe)
}

fn non_empty_parent(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
