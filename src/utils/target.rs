/// Префикс URL-протокола, через который утилиту обычно запускают
pub const PROTOCOL_PREFIX: &str = "focus:";

/// Извлечь имя окна из аргумента запуска: `focus://notes/` -> `notes`
pub fn parse_target(raw: &str) -> String {
    let without_prefix = raw.strip_prefix(PROTOCOL_PREFIX).unwrap_or(raw);
    without_prefix.trim_matches('/').trim().to_string()
}
