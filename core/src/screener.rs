use std::fs;
use std::path::Path;

/// The fixed, closed deny list of banned substrings. Purely textual,
/// case-sensitive; no lexical or comment awareness. Preserve this exact set
/// and exact substring semantics — it is a coarse smoke test, not security.
/// The real isolation lives in the sandboxed runner.
const DENY_LIST: &[&str] = &[
    "system(",
    "fork(",
    "exec",
    "popen(",
    "remove(",
    "rename(",
    "kill(",
    "chmod(",
    "chown(",
    "ptrace",
];

/// Outcome of screening one source file.
pub enum ScreenOutcome {
    /// No deny-list token found anywhere in the source.
    Passed,
    /// The source contains `token` (the first one found, scanning top to
    /// bottom, left to right).
    Banned { token: &'static str },
    /// The source file could not be opened.
    OpenFailed { message: String },
}

/// Scans `source_path` against the deny list, short-circuiting on the first
/// hit. The whole file is read at once; "line-oriented" in the component
/// design describes the mental model, not a requirement to re-open the file
/// per line, since a substring check is insensitive to where line breaks
/// fall.
pub fn screen(source_path: &Path) -> ScreenOutcome {
    let contents = match fs::read(source_path) {
        Ok(contents) => contents,
        Err(err) => {
            return ScreenOutcome::OpenFailed {
                message: format!("could not open {}: {err}", source_path.display()),
            };
        }
    };

    for &token in DENY_LIST {
        if contains_subslice(&contents, token.as_bytes()) {
            return ScreenOutcome::Banned { token };
        }
    }

    ScreenOutcome::Passed
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
