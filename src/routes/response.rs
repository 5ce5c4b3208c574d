use serde::Serialize;

use crate::home::Home;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Count {
        count: usize,
    },
    Deleted {
        id: String,
        deleted: bool,
    },
    Healthz {
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,
    },
    Homes {
        homes: Vec<Home>,
    },
}
