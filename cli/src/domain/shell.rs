//! POSIX shell quoting for command display and remote command strings.

use std::borrow::Cow;

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '=' | '@' | '%' | '+' | ',')
}

/// Quote `s` for a POSIX shell. Strings made only of safe characters are
/// returned unchanged; everything else is single-quoted with embedded `'`
/// written as `'\''`.
#[must_use]
pub fn quote(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_safe) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(format!("'{}'", s.replace('\'', r"'\''")))
}

/// Quote a path that is expanded by the remote shell. A leading `~` or
/// `~user` prefix stays bare so the remote shell substitutes the home
/// directory; the rest of the path is quoted.
#[must_use]
pub fn quote_remote_path(path: &str) -> Cow<'_, str> {
    let Some(after_tilde) = path.strip_prefix('~') else {
        return quote(path);
    };
    let (user, rest) = after_tilde.split_once('/').unwrap_or((after_tilde, ""));
    // `~-` and `~+` are directory-stack expansions, not home directories.
    let user_ok = !user.starts_with('-')
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if !user_ok {
        return quote(path);
    }
    if rest.is_empty() {
        return Cow::Borrowed(path);
    }
    match quote(rest) {
        Cow::Borrowed(_) => Cow::Borrowed(path),
        Cow::Owned(q) => Cow::Owned(format!("~{user}/{q}")),
    }
}

/// Join already-split words into one shell command line.
#[must_use]
pub fn join<'a>(words: impl IntoIterator<Item = &'a str>) -> String {
    words.into_iter().map(quote).collect::<Vec<_>>().join(" ")
}
