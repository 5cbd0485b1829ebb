//! Canonical search keys / 规范化搜索键
//!
//! Both page text and queries go through [`canonicalize`] so that a substring
//! check on the canonical forms ignores case, accents, punctuation and spacing.
//! 索引内容与查询使用同一函数，保证两侧变换完全一致

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

/// Map text to its canonical search key / 将文本映射为规范化搜索键
///
/// - NFKD decomposition (accents and ligatures split off) / 兼容分解
/// - keep letters (L*) and decimal digits (Nd) only; combining marks and
///   everything else are dropped, nothing is replaced by a separator / 仅保留字母和数字
/// - lowercase / 转小写
///
/// `"Año tras=añoÇ"` becomes `"anotrasanoc"`.
pub fn canonicalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| is_search_char(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| is_search_char(*c))
        .collect()
}

/// Whether `text` is already a canonical key / 是否已是规范化形式
pub fn is_canonical(text: &str) -> bool {
    canonicalize(text) == text
}

/// Letter or decimal digit, by general category / 字母或十进制数字
#[inline]
fn is_search_char(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_example() {
        assert_eq!(canonicalize("Año tras=añoÇ"), "anotrasanoc");
        assert_eq!(
            canonicalize("The quick brown fox jumps over the lazy dog"),
            "thequickbrownfoxjumpsoverthelazydog"
        );
    }

    #[test]
    fn test_canonicalize_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("  --,;!?  \n\t"), "");
    }

    #[test]
    fn test_strips_accents() {
        assert_eq!(canonicalize("Año"), canonicalize("Ano"));
        assert_eq!(canonicalize("Crème Brûlée"), "cremebrulee");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(canonicalize("YOuVe"), canonicalize("youve"));
        assert_eq!(canonicalize("you've"), "youve");
    }

    #[test]
    fn test_compatibility_forms() {
        // ligature and fullwidth digits decompose to plain letters/digits
        assert_eq!(canonicalize("ﬁnal"), "final");
        assert_eq!(canonicalize("Ｐａｇｅ １０７"), "page107");
    }

    #[test]
    fn test_drops_combining_marks() {
        // vowelled and unvowelled Arabic / Hebrew compare equal
        assert_eq!(canonicalize("كَتَبَ"), "كتب");
        assert_eq!(canonicalize("כָּתַב"), canonicalize("כתב"));
        // U+0345 is Alphabetic but still a combining mark
        assert_eq!(canonicalize("ᾳ"), "α");
        assert_eq!(canonicalize("नमस्ते"), "नमसत");
    }

    #[test]
    fn test_keeps_only_decimal_digits() {
        // 〇 and Ⅻ-style letter numbers are not decimal digits
        assert_eq!(canonicalize("〇"), "");
        assert_eq!(canonicalize("page ② ¾ 42"), "page23442");
    }

    #[test]
    fn test_keeps_non_latin_letters() {
        assert_eq!(canonicalize("测试 文件"), "测试文件");
        assert_eq!(canonicalize("ΑΘΗΝΑ"), "αθηνα");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "All of the things that you say--,",
            "Deeper than roses (all my heart knows this),",
            "Año tras=añoÇ",
            "İstanbul ǅ ﬃ ² ½",
            "",
        ];
        for s in samples {
            let once = canonicalize(s);
            assert_eq!(canonicalize(&once), once, "not idempotent for {:?}", s);
            assert!(is_canonical(&once));
        }
    }

    #[test]
    fn test_output_alphabet() {
        let out = canonicalize("Dreams you've been KEEPING, 12 songs; Ça va? ß Ǆ كَتَبَ ᾳ 〇 שָׁלוֹם");
        assert!(!out.is_empty());
        for c in out.chars() {
            assert!(is_search_char(c), "unexpected {:?}", c);
            assert!(
                !matches!(
                    get_general_category(c),
                    GeneralCategory::UppercaseLetter | GeneralCategory::TitlecaseLetter
                ),
                "not lowercased {:?}",
                c
            );
        }
    }
}
