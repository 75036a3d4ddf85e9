// Word case classification

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Casing pattern of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No cased letters at all ("123", "--").
    NoLetters,
    /// "cat"
    AllLower,
    /// "Cat"
    FirstUpper,
    /// Anything else, for example "cAt" or "McIntosh".
    Complex,
    /// "CAT"
    AllUpper,
}

/// Classify the casing of `word`. Uncased characters are ignored.
pub fn detect_case(word: &[char]) -> CaseType {
    let Some((&first, rest)) = word.split_first() else {
        return CaseType::NoLetters;
    };
    let upper_rest = rest.iter().filter(|&&c| is_upper(c)).count();
    let lower_rest = rest.iter().filter(|&&c| is_lower(c)).count();
    let first_upper = is_upper(first);
    let first_lower = is_lower(first);

    if !first_upper && !first_lower && upper_rest == 0 && lower_rest == 0 {
        return CaseType::NoLetters;
    }
    if !first_lower && lower_rest == 0 {
        return CaseType::AllUpper;
    }
    if upper_rest > 0 {
        return CaseType::Complex;
    }
    if first_upper {
        CaseType::FirstUpper
    } else {
        CaseType::AllLower
    }
}

/// Rewrite `word` in place to follow `case`.
///
/// `NoLetters` and `Complex` carry no target pattern and leave the word as is.
pub fn apply_case(word: &mut [char], case: CaseType) {
    match case {
        CaseType::NoLetters | CaseType::Complex => {}
        CaseType::AllLower => word.iter_mut().for_each(|c| *c = simple_lower(*c)),
        CaseType::AllUpper => word.iter_mut().for_each(|c| *c = simple_upper(*c)),
        CaseType::FirstUpper => {
            if let Some((first, rest)) = word.split_first_mut() {
                *first = simple_upper(*first);
                rest.iter_mut().for_each(|c| *c = simple_lower(*c));
            }
        }
    }
}

/// Copy of `word` rewritten to `case`.
pub fn with_case(word: &[char], case: CaseType) -> Vec<char> {
    let mut out = word.to_vec();
    apply_case(&mut out, case);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn string(cs: &[char]) -> String {
        cs.iter().collect()
    }

    #[test]
    fn empty_word_has_no_letters() {
        assert_eq!(detect_case(&[]), CaseType::NoLetters);
        assert_eq!(detect_case(&chars("42")), CaseType::NoLetters);
        assert_eq!(detect_case(&chars("-'")), CaseType::NoLetters);
    }

    #[test]
    fn simple_patterns() {
        assert_eq!(detect_case(&chars("cat")), CaseType::AllLower);
        assert_eq!(detect_case(&chars("Cat")), CaseType::FirstUpper);
        assert_eq!(detect_case(&chars("CAT")), CaseType::AllUpper);
        assert_eq!(detect_case(&chars("C")), CaseType::AllUpper);
        assert_eq!(detect_case(&chars("cAt")), CaseType::Complex);
        assert_eq!(detect_case(&chars("McIntosh")), CaseType::Complex);
    }

    #[test]
    fn digits_do_not_change_pattern() {
        assert_eq!(detect_case(&chars("mp3")), CaseType::AllLower);
        assert_eq!(detect_case(&chars("MP3")), CaseType::AllUpper);
        assert_eq!(detect_case(&chars("3rd")), CaseType::AllLower);
        assert_eq!(detect_case(&chars("3D")), CaseType::AllUpper);
    }

    #[test]
    fn non_ascii_letters() {
        assert_eq!(detect_case(&chars("\u{00E4}iti")), CaseType::AllLower);
        assert_eq!(detect_case(&chars("\u{00C4}iti")), CaseType::FirstUpper);
        assert_eq!(detect_case(&chars("\u{00C4}\u{00D6}")), CaseType::AllUpper);
    }

    #[test]
    fn apply_case_rewrites() {
        assert_eq!(string(&with_case(&chars("DOG"), CaseType::AllLower)), "dog");
        assert_eq!(string(&with_case(&chars("dog"), CaseType::AllUpper)), "DOG");
        assert_eq!(string(&with_case(&chars("dOG"), CaseType::FirstUpper)), "Dog");
        assert_eq!(string(&with_case(&chars("dOg"), CaseType::Complex)), "dOg");
    }

    #[test]
    fn apply_case_on_empty_word() {
        let mut w: Vec<char> = Vec::new();
        apply_case(&mut w, CaseType::FirstUpper);
        assert!(w.is_empty());
    }
}
