//! Pure search filter over the mirrored roster.
//!
//! Re-evaluated by the view binding on every render from the current
//! snapshot and the current query string; holds no state of its own.

use crate::domain::User;

/// Narrow `users` to the records matching `query`.
///
/// The match is a case-insensitive substring test against any of the name,
/// employee id, or trade fields. Relative order is preserved, an empty query
/// matches everything, and a record whose field is empty (because the
/// writing client omitted it) simply cannot match on that field.
///
/// # Examples
/// ```
/// use roster_console::domain::search::filter_roster;
///
/// let roster: Vec<roster_console::domain::User> = Vec::new();
/// assert!(filter_roster(&roster, "elec").is_empty());
/// ```
#[must_use]
pub fn filter_roster(users: &[User], query: &str) -> Vec<User> {
    if query.is_empty() {
        return users.to_vec();
    }

    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| {
            contains_needle(&user.name, &needle)
                || contains_needle(user.employee_id.as_ref(), &needle)
                || contains_needle(&user.trade, &needle)
        })
        .cloned()
        .collect()
}

fn contains_needle(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}
