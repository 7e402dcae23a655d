//! # Dedent
//!
//! Strips the indentation shared by every line of a snippet so that code
//! pasted from an indented block runs at top level.
//!
//! Only spaces and tabs count as indentation, and they are never equated:
//! `"\t"` and `"    "` have no common margin. Lines made only of spaces and
//! tabs are emptied and ignored when computing the margin.

/// Removes the longest common leading whitespace from all non-blank lines.
pub fn dedent(text: &str) -> String {
    let margin = common_margin(text);
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let (body, ending) = split_ending(line);
        if !is_blank(body) {
            out.push_str(&body[margin.len()..]);
        }
        out.push_str(ending);
    }

    out
}

fn common_margin(text: &str) -> &str {
    let mut margin: Option<&str> = None;

    for line in text.split_inclusive('\n') {
        let (body, _) = split_ending(line);
        if is_blank(body) {
            continue;
        }
        let indent = leading_whitespace(body);
        margin = Some(match margin {
            None => indent,
            Some(current) => common_prefix(current, indent),
        });
        if margin == Some("") {
            break;
        }
    }

    margin.unwrap_or("")
}

fn split_ending(line: &str) -> (&str, &str) {
    match line.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (line, ""),
    }
}

fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_blank(body: &str) -> bool {
    body.chars().all(is_indent)
}

fn leading_whitespace(body: &str) -> &str {
    let rest = body.trim_start_matches(is_indent);
    &body[..body.len() - rest.len()]
}

// Both inputs are pure ASCII indentation, so byte positions are char boundaries.
fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
