pub mod mock_stt;
pub mod mock_tts;
pub mod mock_tutor;

use kalike::wordbank::Word;

/// Shorthand for building vocabulary in tests
pub fn word(kannada: &str, english: &str) -> Word {
    Word {
        kannada: kannada.to_string(),
        transliteration: String::new(),
        english: english.to_string(),
        category: None,
    }
}
