use std::fmt;

/// Нормализованная строка поиска окна
///
/// Хранит исходный (обрезанный) вид для логов и приведённый к нижнему
/// регистру вид для сравнений. Пустая строка поиска не создаётся вовсе:
/// любой заголовок "содержит" пустую строку, и частичное совпадение
/// вырождается.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    original: String,
    folded: String,
}

impl SearchTerm {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self {
            original: trimmed.to_string(),
            folded: trimmed.to_lowercase(),
        })
    }

    /// Ключ для поиска ко-триггеров
    pub fn key(&self) -> &str {
        &self.folded
    }

    /// Совпадает ли строка поиска целиком с одним из слов текста (разделитель - пробел)
    pub fn is_whole_word_of(&self, text: &str) -> bool {
        text.split(' ')
            .filter(|word| !word.is_empty())
            .any(|word| word.to_lowercase() == self.folded)
    }

    /// Входит ли строка поиска в текст как подстрока (без учёта регистра)
    pub fn is_part_of(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.folded)
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_is_rejected() {
        assert!(SearchTerm::new("").is_none());
        assert!(SearchTerm::new("   ").is_none());
    }

    #[test]
    fn test_term_is_trimmed_and_folded() {
        let term = SearchTerm::new("  Notepad ").unwrap();
        assert_eq!(term.to_string(), "Notepad");
        assert_eq!(term.key(), "notepad");
    }

    #[test]
    fn test_whole_word_matching() {
        let term = SearchTerm::new("code").unwrap();

        assert!(term.is_whole_word_of("main.rs - Visual Studio Code"));
        assert!(term.is_whole_word_of("CODE"));
        assert!(term.is_whole_word_of("  code  "));
        assert!(!term.is_whole_word_of("vscode"));
        assert!(!term.is_whole_word_of("code-review"));
        assert!(!term.is_whole_word_of(""));
    }

    #[test]
    fn test_partial_matching() {
        let term = SearchTerm::new("Code").unwrap();

        assert!(term.is_part_of("vscode"));
        assert!(term.is_part_of("Barcode Scanner"));
        assert!(!term.is_part_of("Terminal"));
    }
}
