use regex::Regex;
use std::sync::OnceLock;

static CAPITALIZED_RUN: OnceLock<Regex> = OnceLock::new();
static LOWER_UPPER: OnceLock<Regex> = OnceLock::new();

fn capitalized_run() -> &'static Regex {
    CAPITALIZED_RUN.get_or_init(|| {
        Regex::new(r"([A-Za-z0-9])([A-Z][a-z]+)").expect("capitalized-run pattern is valid")
    })
}

fn lower_upper() -> &'static Regex {
    LOWER_UPPER.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("lower-upper pattern is valid"))
}

/// Turns a camelCase setting key into a display title
/// (e.g. `passwordMinimumLength` -> `Password Minimum Length`).
///
/// Path separators survive untouched, so `settings / minLength` becomes
/// `Settings / Min Length`. Applying it twice yields the same string.
pub fn format_key(key: &str) -> String {
    let spaced = capitalized_run().replace_all(key, "${1} ${2}");
    let spaced = lower_upper().replace_all(&spaced, "${1} ${2}");
    title_case(&spaced)
}

/// Upper-cases the first character of every alphanumeric word and lower-cases the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphanumeric() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
