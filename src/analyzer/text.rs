//! Tokenization and counting heuristics for English-oriented readability

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Raw counts for a block of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl TextStats {
    pub fn avg_sentence_length(&self) -> f64 {
        if self.sentences == 0 {
            return 0.0;
        }
        self.words as f64 / self.sentences as f64
    }

    pub fn avg_syllables_per_word(&self) -> f64 {
        if self.words == 0 {
            return 0.0;
        }
        self.syllables as f64 / self.words as f64
    }
}

/// Count words, sentences and syllables in one pass over the tokens
pub fn measure(text: &str) -> TextStats {
    let words = tokenize(text);
    TextStats {
        words: words.len(),
        sentences: count_sentences(text),
        syllables: words.iter().map(|w| count_syllables(w)).sum(),
    }
}

/// Lowercase, turn anything that is not a letter, digit or whitespace into a
/// space, and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Vowel-group syllable estimate.
///
/// Each vowel that follows a non-vowel (or starts the word) opens a group; a
/// trailing "e" is treated as silent. Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let mut count = 0usize;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = VOWELS.contains(&c);
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }

    if word.ends_with('e') {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// Number of non-blank fragments between runs of `.`, `!` and `?`
pub fn count_sentences(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count()
}
