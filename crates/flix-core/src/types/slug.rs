//! Title slug derivation.

/// Derive a routing slug from a title.
///
/// Lowercases, folds accented Latin letters to their ASCII base, drops
/// everything that is not an ASCII word character or whitespace, then
/// replaces each whitespace run with a single `-`.
///
/// Slugs are not guaranteed unique: two titles that fold to the same text
/// produce the same slug, and lookup by slug returns the first match.
///
/// # Example
///
/// ```
/// use flix_core::slugify;
///
/// assert_eq!(slugify("Jogos Vorazes: A Esperança"), "jogos-vorazes-a-esperanca");
/// ```
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_dash = true;
            continue;
        }

        let c = fold(c);
        if !(c.is_ascii_alphanumeric() || c == '_') {
            continue;
        }

        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push(c);
    }

    out
}

fn fold(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title() {
        assert_eq!(slugify("Sex Education"), "sex-education");
    }

    #[test]
    fn folds_portuguese_accents() {
        assert_eq!(slugify("Animação em Família"), "animacao-em-familia");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slugify("Mission: Impossible - Fallout!"), "mission-impossible-fallout");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  The   Matrix  "), "the-matrix");
    }

    #[test]
    fn keeps_digits_and_underscores() {
        assert_eq!(slugify("Blade Runner 2049"), "blade-runner-2049");
        assert_eq!(slugify("snake_case title"), "snake_case-title");
    }

    #[test]
    fn empty_when_nothing_survives() {
        assert_eq!(slugify("!!!"), "");
    }
}
