//! Name normalization utilities
//!
//! Build scripts write class and package names in their external, dotted form
//! (`com.example.App`). The processing engine matches against the internal,
//! slash-separated form (`com/example/App`). Conversion happens exactly once,
//! where a human-authored name enters the configuration.

/// Convert an external (dotted) name to its internal (slashed) form.
///
/// Every `.` becomes `/`. Everything else is kept verbatim, including the
/// wildcard tokens `*`, `**` and `?`, the negation prefix `!`, `$`, digits and
/// underscores. No validation happens here.
///
/// The conversion is not idempotent on names that already contain `/`, so it
/// must only be applied to names coming straight from the caller.
///
/// # Examples
///
/// ```rust
/// use keeprules::utils::names::internal_name;
///
/// assert_eq!(internal_name("com.example.App"), "com/example/App");
/// assert_eq!(internal_name("com.example.**"), "com/example/**");
/// assert_eq!(internal_name(""), "");
/// ```
pub fn internal_name(external: &str) -> String {
    external.replace('.', "/")
}

/// Split a filter string at its top-level commas.
///
/// Commas nested in `()`, `<>`, `[]` or `{}` do not split, nor do commas in a
/// token that starts with a single or double quote. A quote elsewhere in a
/// token is plain text, and so is a quote that is never closed. Tokens are
/// trimmed, empty tokens are dropped, and a token wrapped in matching quotes
/// loses its quotes. Duplicates are kept.
///
/// # Examples
///
/// ```rust
/// use keeprules::utils::names::split_top_level;
///
/// assert_eq!(
///     split_top_level("com/a/**, !com/a/internal/**"),
///     vec!["com/a/**", "!com/a/internal/**"]
/// );
/// assert_eq!(split_top_level("m(int,long),x"), vec!["m(int,long)", "x"]);
/// ```
pub fn split_top_level(filter: &str) -> Vec<String> {
    // An unterminated quote falls back to splitting with quotes as plain text
    split_tokens(filter, true)
        .or_else(|| split_tokens(filter, false))
        .unwrap_or_default()
}

/// `None` if a quote opened at the start of a token is never closed
fn split_tokens(filter: &str, honor_quotes: bool) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;

    for c in filter.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '\'' | '"' if honor_quotes && current.trim().is_empty() => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' | '<' | '[' | '{' => {
                    depth += 1;
                    current.push(c);
                }
                ')' | '>' | ']' | '}' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    push_token(&mut tokens, &current);
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }
    if quote.is_some() {
        return None;
    }
    push_token(&mut tokens, &current);

    Some(tokens)
}

fn push_token(tokens: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    tokens.push(unquote(trimmed).to_string());
}

fn unquote(token: &str) -> &str {
    for q in ['\'', '"'] {
        if token.len() >= 2 && token.starts_with(q) && token.ends_with(q) {
            return &token[1..token.len() - 1];
        }
    }
    token
}
