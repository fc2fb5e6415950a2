const HIRAGANA_FIRST: char = 'ぁ';
const HIRAGANA_LAST: char = 'ん';
const KATAKANA_OFFSET: u32 = 0x60;

/// Shifts every character in `ぁ..=ん` to its katakana counterpart.
///
/// Only the basic syllabary is covered: `ゔ`, `ゕ`, `ゖ`, the iteration marks
/// and combining sound marks pass through untouched.
pub fn hiragana_to_katakana(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if (HIRAGANA_FIRST..=HIRAGANA_LAST).contains(&ch) {
                char::from_u32(ch as u32 + KATAKANA_OFFSET).unwrap_or(ch)
            } else {
                ch
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_basic_hiragana() {
        assert_eq!(hiragana_to_katakana("あいう"), "アイウ");
        assert_eq!(hiragana_to_katakana("やまだ たろう"), "ヤマダ タロウ");
    }

    #[test]
    fn leaves_other_text_unchanged() {
        assert_eq!(hiragana_to_katakana("ABC123"), "ABC123");
        assert_eq!(hiragana_to_katakana("山田カナ"), "山田カナ");
    }

    #[test]
    fn small_kana_inside_range_are_shifted() {
        assert_eq!(hiragana_to_katakana("きょう"), "キョウ");
    }

    #[test]
    fn characters_past_n_are_not_converted() {
        assert_eq!(hiragana_to_katakana("ゔゝゞ"), "ゔゝゞ");
    }
}
