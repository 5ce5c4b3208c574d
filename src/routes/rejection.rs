use serde::Serialize;
use warp::reject;

use crate::errors::BackendError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

/// Which operation a rejected request was performing, echoed back in
/// the error body. Queries (`list`, `count`, `retrieve`) never fail
/// this way and have no context.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Context {
    Create,
    Delete { id: String },
    Donation { home: String },
    Review { home: String },
    Update { id: String },
    Visit { home: String },
}

impl Context {
    pub fn create() -> Context {
        Context::Create
    }

    pub fn delete(id: String) -> Context {
        Context::Delete { id }
    }

    pub fn donation(home: String) -> Context {
        Context::Donation { home }
    }

    pub fn review(home: String) -> Context {
        Context::Review { home }
    }

    pub fn update(id: String) -> Context {
        Context::Update { id }
    }

    pub fn visit(home: String) -> Context {
        Context::Visit { home }
    }
}
