//! Account identifier display formatting.

/// Number of leading characters kept in a shortened address.
const HEAD_LEN: usize = 6;
/// Number of trailing characters kept in a shortened address.
const TAIL_LEN: usize = 4;

/// Shorten an account identifier for display: first six characters,
/// `...`, last four characters.
///
/// Purely positional; the identifier is not validated. A missing or empty
/// identifier renders as the empty string, and identifiers too short to
/// shorten are returned unchanged.
pub fn display_address(account: Option<&str>) -> String {
    let Some(account) = account else {
        return String::new();
    };
    if account.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = account.chars().collect();
    if chars.len() <= HEAD_LEN + TAIL_LEN {
        return account.to_string();
    }
    let head: String = chars.iter().take(HEAD_LEN).collect();
    let tail: String = chars.iter().skip(chars.len() - TAIL_LEN).collect();
    format!("{head}...{tail}")
}
