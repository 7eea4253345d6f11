use std::fmt::Display;

/// Structured form of a schema identifier: the list of lower-case words it is made of.
///
/// `disk_attachment` becomes `["disk", "attachment"]`. Names order word by word, which is
/// the order used when concepts are listed for display.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    pub fn new(words: Vec<String>) -> Self {
        Name { words }
    }

    /// Splits `text` on `separator`, dropping empty segments.
    pub fn parse_using_separator(text: &str, separator: char) -> Self {
        let words = text
            .split(separator)
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        Name { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                write!(f, "_")?;
            }
            write!(f, "{word}")?;
        }
        Ok(())
    }
}
