//! Regex finitization.
//!
//! Rule `before_pattern`s get placed inside a lookbehind when building an
//! exception pattern (see [`crate::engine::rule_manager`]), and most regex
//! engines — `fancy-regex` included, once you care about performance rather
//! than just correctness — want that lookbehind to be bounded. `finitize`
//! rewrites `*`, `+` and `{n,}` to their bounded equivalents and expands
//! `\Q...\E` literal-quote blocks, operating on the pattern source text
//! rather than anything already compiled.

use once_cell::sync::Lazy;

static STAR_PATTERN: Lazy<fancy_regex::Regex> =
    Lazy::new(|| fancy_regex::Regex::new(r"(?<=(?<!\\)(?:\\\\){0,100})\*").unwrap());

static PLUS_PATTERN: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(r"(?<=(?<!\\)(?:\\\\){0,100})(?<![\?\*\+]|\{[0-9],?[0-9]?\}?\})\+").unwrap()
});

static RANGE_PATTERN: Lazy<fancy_regex::Regex> =
    Lazy::new(|| fancy_regex::Regex::new(r"(?<=(?<!\\)(?:\\\\){0,100})\{\s*([0-9]+)\s*,\s*\}").unwrap());

/// Replaces `\Q...\E` block quotes with their backslash-escaped equivalent,
/// e.g. `\Qabc\E` becomes `\a\b\c`.
pub fn remove_block_quotes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut quote = false;
    let mut previous_char: char = '\0';

    for current_char in pattern.chars() {
        if quote {
            if previous_char == '\\' && current_char == 'E' {
                quote = false;
                // Remove the "\\" pushed for the previous (escaped) iteration.
                out.pop();
                out.pop();
            } else {
                out.push('\\');
                out.push(current_char);
            }
        } else if previous_char == '\\' && current_char == 'Q' {
            quote = true;
            // Remove the "\" pushed for the previous iteration.
            out.pop();
        } else {
            out.push(current_char);
        }
        previous_char = current_char;
    }

    out
}

/// Rewrites `pattern` so every quantifier is bounded above by `infinity`,
/// after first expanding `\Q...\E` blocks via [`remove_block_quotes`].
///
/// The result matches a subset of what `pattern` matches (finitize
/// monotonicity): every match of the rewritten pattern is also a match of the
/// original.
pub fn finitize(pattern: &str, infinity: usize) -> String {
    let pattern = remove_block_quotes(pattern);
    let pattern = replace_all(&STAR_PATTERN, &pattern, &format!("{{0,{infinity}}}"));
    let pattern = replace_all(&PLUS_PATTERN, &pattern, &format!("{{1,{infinity}}}"));
    replace_all_with_group(&RANGE_PATTERN, &pattern, |caps| format!("{{{},{infinity}}}", &caps[1]))
}

/// `fancy_regex::Regex` has no built-in `replace_all`; this is the simple
/// fixed-replacement version.
fn replace_all(re: &fancy_regex::Regex, text: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        let m = m.expect("finitize guard patterns never fail to evaluate");
        out.push_str(&text[last..m.start()]);
        out.push_str(replacement);
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Same as [`replace_all`] but the replacement is computed from the match's
/// captures (used for `{n,}` -> `{n,N}`, which needs to keep `n`).
fn replace_all_with_group(re: &fancy_regex::Regex, text: &str, build: impl Fn(&fancy_regex::Captures) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let caps = caps.expect("finitize guard patterns never fail to evaluate");
        let m = caps.get(0).expect("whole match always present");
        out.push_str(&text[last..m.start()]);
        out.push_str(&build(&caps));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}
