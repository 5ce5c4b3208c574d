use serde::Deserialize;

/// Optional filters on the listing. `search` matches names and
/// descriptions, `location` matches locations; both are
/// case-insensitive substring matches.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub location: Option<String>,
}
