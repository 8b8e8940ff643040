use once_cell::sync::Lazy;
use regex::Regex;

// @module: Article text cleanup

// @const: Runs of two or more spaces
static MULTI_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Clean raw article text for sentence segmentation
///
/// Drops blank lines and section-heading lines (`== History ==`), joins the
/// rest with single spaces, removes every balanced parenthetical group and
/// collapses the resulting space runs. The result is trimmed, and a heading
/// marker left at the start once a group is removed (`(x) = y`) goes too, so
/// sanitizing the output again changes nothing.
pub fn sanitize(text: &str) -> String {
    let joined = remove_blank_lines_and_markup(text);
    let without_groups = remove_parenthetical_groups(&joined);
    let collapsed = MULTI_SPACE_REGEX.replace_all(&without_groups, " ");
    collapsed
        .trim_start_matches(|c: char| c == '=' || c.is_whitespace())
        .trim_end()
        .to_string()
}

/// Keep only body lines and join them with single spaces
pub fn remove_blank_lines_and_markup(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('=')
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove balanced `( ... )` groups at any nesting depth
///
/// Unmatched parentheses are left in place as ordinary text.
pub fn remove_parenthetical_groups(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    // Byte offsets in `output` where each still-open group began
    let mut open_groups: Vec<usize> = Vec::new();

    for ch in text.chars() {
        match ch {
            '(' => {
                open_groups.push(output.len());
                output.push(ch);
            }
            ')' => match open_groups.pop() {
                Some(start) => output.truncate(start),
                None => output.push(ch),
            },
            _ => output.push(ch),
        }
    }

    output
}
