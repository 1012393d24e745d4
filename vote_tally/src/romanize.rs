use pinyin::ToPinyin;

/// Romanization capability used by the fuzzy matcher.
///
/// The matcher treats a missing romanization as reduced precision, not
/// as an error: literal substring matching still applies.
pub trait Romanizer {
    /// The romanized syllables of `text`, in lowercase, or `None` when
    /// no romanization is available for this text.
    fn syllables(&self, text: &str) -> Option<Vec<String>>;
}

/// Pinyin-backed romanizer for Han script names.
///
/// Each Han character contributes one syllable ("张三" gives
/// `["zhang", "san"]`). Characters without a pinyin reading are kept
/// verbatim, so mixed names still romanize.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinRomanizer;

impl Romanizer for PinyinRomanizer {
    fn syllables(&self, text: &str) -> Option<Vec<String>> {
        let mut syllables: Vec<String> = Vec::new();
        let mut any_pinyin = false;
        for (ch, py) in text.chars().zip(text.to_pinyin()) {
            match py {
                Some(p) => {
                    any_pinyin = true;
                    syllables.push(p.plain().to_string());
                }
                None => syllables.push(ch.to_lowercase().to_string()),
            }
        }
        if any_pinyin {
            Some(syllables)
        } else {
            None
        }
    }
}

/// The no-op capability: always reports romanization as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRomanizer;

impl Romanizer for NullRomanizer {
    fn syllables(&self, _text: &str) -> Option<Vec<String>> {
        None
    }
}
