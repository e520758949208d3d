//! Korean currency words for the amount line of a printed quotation.
//!
//! Digits are read in groups of four (만, 억, 조). Within a group the place
//! markers are 천, 백 and 십, and a leading 1 before a marker is left
//! unspoken: 1,100 is 천백, not 일천일백.

const DIGITS: [&str; 10] = ["", "일", "이", "삼", "사", "오", "육", "칠", "팔", "구"];
const GROUP_UNITS: [&str; 5] = ["", "만", "억", "조", "경"];
const PLACES: [(u64, &str); 3] = [(1_000, "천"), (100, "백"), (10, "십")];

/// Spell a whole-won amount, e.g. `12_505_100` → `천이백오십만오천백원정`.
///
/// ```rust
/// use calc_core::words::korean_currency_words;
///
/// assert_eq!(korean_currency_words(0), "영원정");
/// assert_eq!(korean_currency_words(1_100), "천백원정");
/// assert_eq!(korean_currency_words(23_000), "이만삼천원정");
/// ```
pub fn korean_currency_words(amount: u64) -> String {
    if amount == 0 {
        return "영원정".to_string();
    }

    let mut result = String::new();
    let mut rest = amount;
    let mut group_index = 0;

    while rest > 0 {
        let group = rest % 10_000;
        if group > 0 {
            let mut words = spell_group(group);
            words.push_str(GROUP_UNITS[group_index]);
            result.insert_str(0, &words);
        }
        rest /= 10_000;
        group_index += 1;
    }

    result.push_str("원정");
    result
}

/// Spell a rounded won amount; negative amounts spell their magnitude.
pub fn korean_currency_words_f64(amount: f64) -> String {
    korean_currency_words(amount.abs().round() as u64)
}

fn spell_group(group: u64) -> String {
    let mut words = String::new();
    for (place, marker) in PLACES {
        let digit = (group / place % 10) as usize;
        if digit > 1 {
            words.push_str(DIGITS[digit]);
        }
        if digit > 0 {
            words.push_str(marker);
        }
    }
    words.push_str(DIGITS[(group % 10) as usize]);
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(korean_currency_words(1), "일원정");
        assert_eq!(korean_currency_words(10), "십원정");
        assert_eq!(korean_currency_words(15), "십오원정");
        assert_eq!(korean_currency_words(250), "이백오십원정");
        assert_eq!(korean_currency_words(9_999), "구천구백구십구원정");
    }

    #[test]
    fn test_group_units() {
        assert_eq!(korean_currency_words(10_000), "일만원정");
        assert_eq!(korean_currency_words(10_001), "일만일원정");
        assert_eq!(korean_currency_words(12_505_100), "천이백오십만오천백원정");
        assert_eq!(korean_currency_words(100_000_000), "일억원정");
        assert_eq!(korean_currency_words(300_000_050), "삼억오십원정");
        assert_eq!(korean_currency_words(1_000_000_000_000), "일조원정");
    }

    #[test]
    fn test_f64_variant_rounds() {
        assert_eq!(korean_currency_words_f64(2_073_600.0000000005), "이백칠만삼천육백원정");
        assert_eq!(korean_currency_words_f64(-10.4), "십원정");
    }
}
