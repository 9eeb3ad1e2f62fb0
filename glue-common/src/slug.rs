//! URL slugs for participant profiles
//!
//! # Examples
//!
//! ```
//! use glue_common::slug::{candidates, slugify};
//!
//! assert_eq!(slugify("Café du Monde!"), "cafe-du-monde");
//!
//! let tries: Vec<String> = candidates("atelier", 3).collect();
//! assert_eq!(tries, vec!["atelier", "atelier-2", "atelier-3"]);
//! ```

/// Upper bound on suffixed candidates tried before giving up
pub const MAX_SLUG_ATTEMPTS: usize = 20;

const MAX_SLUG_LEN: usize = 80;

/// Lowercase ASCII slug: letters and digits joined by single hyphens
///
/// Accented Latin letters are folded to their base letter; anything else is
/// a separator. Returns `"participant"` when nothing usable remains.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    let mut buf = [0u8; 4];

    for c in input.chars().flat_map(char::to_lowercase) {
        let folded = if c.is_ascii_alphanumeric() {
            &*c.encode_utf8(&mut buf)
        } else {
            match fold_accent(c) {
                Some(base) => base,
                None => {
                    pending_hyphen = !slug.is_empty();
                    continue;
                }
            }
        };
        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        slug.push_str(folded);
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        "participant".to_string()
    } else {
        slug
    }
}

/// `base`, then `base-2`, `base-3`, … up to `max` candidates in total
pub fn candidates(base: &str, max: usize) -> impl Iterator<Item = String> + '_ {
    (1..=max).map(move |n| {
        if n == 1 {
            base.to_string()
        } else {
            format!("{}-{}", base, n)
        }
    })
}

fn fold_accent(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Studio  42 -- Ixelles "), "studio-42-ixelles");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Café du Monde!"), "cafe-du-monde");
        assert_eq!(slugify("Œuvre Élégante"), "oeuvre-elegante");
        assert_eq!(slugify("Straße"), "strasse");
    }

    #[test]
    fn test_slugify_empty_input() {
        assert_eq!(slugify(""), "participant");
        assert_eq!(slugify("!!!"), "participant");
    }

    #[test]
    fn test_slugify_length_cap() {
        let long = "a ".repeat(100);
        let slug = slugify(&long);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_candidates_bounded() {
        let all: Vec<String> = candidates("glue", MAX_SLUG_ATTEMPTS).collect();
        assert_eq!(all.len(), MAX_SLUG_ATTEMPTS);
        assert_eq!(all[0], "glue");
        assert_eq!(all[1], "glue-2");
        assert_eq!(all.last().unwrap(), &format!("glue-{}", MAX_SLUG_ATTEMPTS));
    }
}
