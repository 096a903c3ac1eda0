//! City-name canonicalization.

use regex::Regex;
use std::sync::LazyLock;

/// Display city for records with no usable city.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// `ST` or `ST.` as the first token, including the run-on `ST.LOUIS` form.
/// Bare `ST` must be followed by whitespace or the end of the string.
static LEADING_SAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ST(?:\.\s*|\s+|$)").expect("leading saint pattern"));

/// `ST` or `ST.` standing alone between two spaces.
static INTERIOR_SAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ST\.? ").expect("interior saint pattern"));

/// Canonicalizes a raw city into the form used for cluster keys.
///
/// Blank or missing input maps to [`UNKNOWN_LOCATION`]. Everything else is
/// trimmed, whitespace-collapsed and uppercased, then `ST`/`ST.` tokens are
/// expanded to `SAINT`: the leading token first, then interior tokens.
///
/// ```
/// use pm_route_planner::clustering::normalize::normalize;
///
/// assert_eq!(normalize(Some("  st.   louis ")), "SAINT LOUIS");
/// assert_eq!(normalize(Some("Port St Lucie")), "PORT SAINT LUCIE");
/// assert_eq!(normalize(None), "Unknown Location");
/// ```
pub fn normalize(raw: Option<&str>) -> String {
    let collapsed = match raw {
        Some(raw) => collapse_whitespace(raw).to_uppercase(),
        None => String::new(),
    };

    // The fallback has to survive a second pass unchanged.
    if collapsed.is_empty() || collapsed == UNKNOWN_LOCATION.to_uppercase() {
        return UNKNOWN_LOCATION.to_string();
    }

    let mut city = LEADING_SAINT.replace(&collapsed, "SAINT ").into_owned();

    // replace_all consumes the separating space, so "A ST ST B" needs two passes.
    while INTERIOR_SAINT.is_match(&city) {
        city = INTERIOR_SAINT.replace_all(&city, " SAINT ").into_owned();
    }

    collapse_whitespace(&city)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
