// ASCII punctuation plus the em dash and right single quotation mark that
// statute PDFs use in running text.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\u{2014}\u{2019}";

/// Canonical text form shared by section titles and body text: punctuation
/// becomes whitespace, whitespace runs collapse to a single space, everything
/// is lowercased and trimmed.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut pending_space = false;

    for character in text.chars() {
        let character = if PUNCTUATION.contains(character) {
            ' '
        } else {
            character
        };

        if character.is_whitespace() {
            pending_space = !normalized.is_empty();
            continue;
        }

        if pending_space {
            normalized.push(' ');
            pending_space = false;
        }
        for lowered in character.to_lowercase() {
            normalized.push(lowered);
        }
    }

    normalized
}
