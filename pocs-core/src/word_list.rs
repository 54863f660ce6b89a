use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;

const BUILTIN_WORDS: &[&str] = &[
    "ORDINATEUR",
    "DEVELOPPEMENT",
    "PROGRAMMATION",
    "PYTHON",
    "RESEAU",
    "SERVEUR",
    "ALGORITHME",
    "DONNEES",
    "INTERFACE",
    "APPLICATION",
    "BASE",
    "SECURITE",
    "CLOUD",
    "VIRTUALISATION",
];

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("word list is empty")]
    Empty,
    #[error("invalid word '{word}': only the letters A-Z are allowed")]
    InvalidWord { word: String },
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Secrets the hangman game draws from. Never empty, every word upper-case A-Z.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| normalize_word(word.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if words.is_empty() {
            return Err(WordListError::Empty);
        }

        Ok(Self { words })
    }

    /// The built-in list of French computing words
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_WORDS.iter().map(|word| word.to_string()).collect(),
        }
    }

    /// Parse one word per line; blank lines and `#` comments are skipped
    pub fn from_word_list(word_list: &str) -> Result<Self, WordListError> {
        Self::new(
            word_list
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WordListError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_word_list(&contents)
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // `new` and `builtin` guarantee at least one word
        self.words
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(BUILTIN_WORDS[0])
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_uppercase();
        self.words.iter().any(|w| *w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self::builtin()
    }
}

pub(crate) fn normalize_word(word: &str) -> Result<String, WordListError> {
    let word = word.trim().to_uppercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(WordListError::InvalidWord { word });
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtin_list() {
        let words = WordList::builtin();
        assert_eq!(words.len(), 14);
        assert!(words.contains("python"));
        assert!(words.contains("VIRTUALISATION"));
        assert!(!words.contains("RUST"));
    }

    #[test]
    fn test_parse_word_list() {
        let word_list = "# comment\npython\n\n   \n  Cloud  \nbase";
        let words = WordList::from_word_list(word_list).unwrap();

        assert_eq!(words.len(), 3);
        assert_eq!(words.words(), &["PYTHON", "CLOUD", "BASE"]);
    }

    #[test]
    fn test_empty_word_list() {
        let result = WordList::from_word_list("# only a comment\n\n");
        assert!(matches!(result, Err(WordListError::Empty)));

        let result = WordList::new(Vec::<String>::new());
        assert!(matches!(result, Err(WordListError::Empty)));
    }

    #[test]
    fn test_invalid_words_rejected() {
        for bad in ["hello123", "two words", "réseau", "c++"] {
            let result = WordList::new([bad]);
            assert!(
                matches!(result, Err(WordListError::InvalidWord { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_choose_returns_listed_word() {
        let words = WordList::new(["alpha", "beta", "gamma"]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let word = words.choose(&mut rng);
            assert!(words.contains(word));
        }
    }

    #[test]
    fn test_choose_covers_every_word() {
        let words = WordList::new(["alpha", "beta", "gamma"]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            seen.insert(words.choose(&mut rng).to_string());
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let result = WordList::from_file("/definitely/not/here/words.txt");
        assert!(matches!(result, Err(WordListError::Io(_))));
    }
}
