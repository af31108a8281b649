//! Pattern search over Steam's KeyValues text files (`.vdf`, `.acf`).
//!
//! No grammar is applied: each field is found independently, so a truncated or
//! half-written file still yields whatever fields are readable. Library index
//! keys are only recognized at the start of a line, which keeps values from
//! being read as keys. Manifest keys may appear anywhere on a line.

use once_cell::sync::Lazy;
use regex::Regex;

static LIBRARY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^[ \t]*"(?:path|\d+)"[ \t]+"((?:[^"\\]|\\.)*)""#).unwrap());

static APP_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)"appid"[ \t]+"?(\d+)"#).unwrap());

static APP_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)"name"[ \t]+"((?:[^"\\]|\\.)*)""#).unwrap());

static INSTALL_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)"installdir"[ \t]+"((?:[^"\\]|\\.)*)""#).unwrap());

/// First `appid`, quoted (`"appid" "220"`) or bare (`"appid" 220`)
pub fn app_id(text: &str) -> Option<u64> {
    APP_ID
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// First `name` value
pub fn app_name(text: &str) -> Option<String> {
    first_string(&APP_NAME, text)
}

/// First `installdir` value
pub fn install_dir(text: &str) -> Option<String> {
    first_string(&INSTALL_DIR, text)
}

fn first_string(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|caps| unescape(&caps[1]))
}

/// Every quoted value whose key is `path` or purely numeric, in file order
pub fn library_paths(text: &str) -> Vec<String> {
    LIBRARY_PATH
        .captures_iter(text)
        .map(|caps| unescape(&caps[1]))
        .collect()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
