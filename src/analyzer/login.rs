//! Login form heuristics

use crate::analyzer::parser::{attr, select_within, ParsedDocument};

/// Tokens that mark an input as part of a login form
pub const LOGIN_KEYWORDS: [&str; 9] = [
    "login",
    "username",
    "email",
    "user",
    "password",
    "pass",
    "signin",
    "auth",
    "credential",
];

/// Attributes inspected for login keywords
const INSPECTED_ATTRIBUTES: [&str; 3] = ["name", "id", "placeholder"];

/// Returns true if any form on the page looks like a login form
///
/// A form qualifies if it contains a password input, or if any of its inputs
/// has a `name`, `id` or `placeholder` containing one of [`LOGIN_KEYWORDS`]
/// (case-insensitive substring match).
pub fn detect_login_form(document: &ParsedDocument) -> bool {
    document.find_by_tag("form").into_iter().any(|form| {
        let inputs = select_within(form, "input");

        let has_password = inputs.iter().any(|input| {
            attr(*input, "type").is_some_and(|t| t.trim().eq_ignore_ascii_case("password"))
        });

        has_password
            || inputs.iter().any(|input| {
                INSPECTED_ATTRIBUTES
                    .iter()
                    .filter_map(|name| attr(*input, name))
                    .any(matches_login_keyword)
            })
    })
}

fn matches_login_keyword(value: &str) -> bool {
    let value = value.to_lowercase();
    LOGIN_KEYWORDS.iter().any(|keyword| value.contains(keyword))
}
