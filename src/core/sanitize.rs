// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Drop every '-' (species names use them freely: "NH3-wHFS", "H2C-O").
pub fn strip_hyphens(s: &str) -> String {
    s.chars().filter(|&c| c != '-').collect()
}

/// Keep only the first whitespace-separated token, e.g. "2521.8958 (2141.5, 380.3)" → "2521.8958".
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}
