//! Text normalisation for submitted form fields.

/// Capitalise the first letter of every word and lowercase the rest.
///
/// A word starts after any character that is not alphabetic, so
/// `"o'neil-smith"` becomes `"O'Neil-Smith"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Canonical form of an email address: surrounding whitespace removed and
/// lowercased. Uniqueness is checked on this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email(" A@PAUSD.US "), "a@pausd.us");
    }

    #[test]
    fn capitalises_each_word() {
        assert_eq!(title_case("jane doe"), "Jane Doe");
        assert_eq!(title_case("GUNN"), "Gunn");
        assert_eq!(title_case("gunn"), "Gunn");
    }

    #[test]
    fn word_boundaries_after_punctuation() {
        assert_eq!(title_case("o'neil-smith"), "O'Neil-Smith");
    }

    #[test]
    fn empty_and_whitespace() {
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("  a  b "), "  A  B ");
    }
}
