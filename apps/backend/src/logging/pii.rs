use std::fmt;

use lazy_regex::{lazy_regex, Lazy, Regex};

// Emails keep their first character and domain.
static EMAIL: Lazy<Regex> = lazy_regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b");

// `password=...` / `"password":"..."` pairs, as they show up in form bodies and SQL params.
static PASSWORD_PAIR: Lazy<Regex> =
    lazy_regex!(r#"(?i)("?(?:password|hashed_password)"?\s*[:=]\s*"?)[^"&\s,]+"#);

// Bearer tokens and JWTs (three dot-separated base64url segments).
static JWT: Lazy<Regex> = lazy_regex!(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b");

// bcrypt hashes: $2a$/$2b$/$2y$ + cost + 53 chars.
static BCRYPT: Lazy<Regex> = lazy_regex!(r"\$2[aby]?\$\d{2}\$[./A-Za-z0-9]{53}");

static BASE64_TOKEN: Lazy<Regex> = lazy_regex!(r"\b[A-Za-z0-9+/]{24,}={0,2}");

/// Masks credentials and personal data before a string reaches the logs.
///
/// Order matters: structured secrets (password pairs, bcrypt hashes, JWTs)
/// are replaced first so the generic token pattern does not split them.
pub fn redact(input: &str) -> String {
    let out = PASSWORD_PAIR.replace_all(input, "${1}[REDACTED]");
    let out = BCRYPT.replace_all(&out, "[REDACTED_HASH]");
    let out = JWT.replace_all(&out, "[REDACTED_TOKEN]");
    let out = EMAIL.replace_all(&out, |caps: &lazy_regex::regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) => match local.chars().next() {
                Some(first) => format!("{first}***@{domain}"),
                None => format!("@{domain}"),
            },
            None => full.to_string(),
        }
    });
    BASE64_TOKEN
        .replace_all(&out, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
