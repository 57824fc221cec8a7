use once_cell::sync::Lazy;
use regex::Regex;

/// `identifier.identifier(` — a call-like token, not a verified call
static CALL_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\.(\w+)\(").expect("static call pattern"));

/// Lexical call-site scanner.
///
/// Finds `receiver.method(` shaped tokens in raw source text and reports
/// them as `"receiver.method"` candidates, in order of appearance. This is a
/// token-level heuristic by design: it misses calls split across lines or
/// made through aliases (false negatives) and picks up shadowed or unrelated
/// names (false positives). Resolution against the ingested chunk set is the
/// builder's job; unresolved candidates are simply dropped there.
pub struct LexicalCallScanner;

impl LexicalCallScanner {
    /// Scan code text for call candidates. Duplicates are preserved.
    #[must_use]
    pub fn scan(code: &str) -> Vec<String> {
        CALL_CANDIDATE
            .captures_iter(code)
            .map(|caps| format!("{}.{}", &caps[1], &caps[2]))
            .collect()
    }
}
