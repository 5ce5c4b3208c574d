use std::time::{Duration, Instant};

use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::home::{HomeChanges, HomeDraft, ReviewDraft};
use crate::log::debug;
use crate::routes::{
    query::ListQuery,
    rejection::{Context, Rejection},
    request::{DonationRequest, VisitRequest},
    response::SuccessResponse,
};

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn list(environment: Environment, query: ListQuery) -> RouteResult {
    timed! {
        debug!(environment.logger, "Listing homes..."; "search" => ?query.search, "location" => ?query.location);

        let search = query.search.as_deref().map(str::to_lowercase);
        let location = query.location.as_deref().map(str::to_lowercase);

        let homes = environment
            .homes
            .lock()
            .await
            .list()
            .iter()
            .filter(|home| {
                search.as_deref().map_or(true, |s| {
                    home.name.to_lowercase().contains(s)
                        || home.description.to_lowercase().contains(s)
                })
            })
            .filter(|home| {
                location
                    .as_deref()
                    .map_or(true, |l| home.location.to_lowercase().contains(l))
            })
            .cloned()
            .collect();

        json(&SuccessResponse::Homes { homes })
    }
}

pub async fn count(environment: Environment) -> RouteResult {
    timed! {
        let count = environment.homes.lock().await.count();

        json(&SuccessResponse::Count { count })
    }
}

pub async fn create(environment: Environment, draft: HomeDraft) -> RouteResult {
    timed! {
        debug!(environment.logger, "Creating home..."; "name" => &draft.name);

        let home = environment
            .homes
            .lock()
            .await
            .add(draft)
            .map_err(|e| Rejection::new(Context::create(), e))?;

        let location = environment.urls.home(&home.id);

        with_header(
            with_status(json(&home), StatusCode::CREATED),
            "location",
            location.as_str(),
        )
    }
}

pub async fn retrieve(environment: Environment, id: String) -> RouteResult {
    timed! {
        debug!(environment.logger, "Retrieving home..."; "id" => &id);

        let store = environment.homes.lock().await;

        match store.get(&id) {
            Some(home) => with_status(json(home), StatusCode::OK),
            None => with_status(json(&()), StatusCode::NOT_FOUND),
        }
    }
}

pub async fn update(environment: Environment, id: String, changes: HomeChanges) -> RouteResult {
    timed! {
        debug!(environment.logger, "Updating home..."; "id" => &id);

        let home = environment
            .homes
            .lock()
            .await
            .update(&id, changes)
            .map_err(|e| Rejection::new(Context::update(id.clone()), e))?;

        json(&home)
    }
}

pub async fn delete(environment: Environment, id: String) -> RouteResult {
    timed! {
        debug!(environment.logger, "Deleting home..."; "id" => &id);

        let deleted = environment
            .homes
            .lock()
            .await
            .remove(&id)
            .map_err(|e| Rejection::new(Context::delete(id.clone()), e))?;

        json(&SuccessResponse::Deleted { id, deleted })
    }
}

pub async fn review(environment: Environment, id: String, draft: ReviewDraft) -> RouteResult {
    timed! {
        debug!(environment.logger, "Adding review..."; "home" => &id, "rating" => draft.rating);

        let home = environment
            .homes
            .lock()
            .await
            .add_review(&id, draft)
            .map_err(|e| Rejection::new(Context::review(id.clone()), e))?;

        json(&home)
    }
}

pub async fn donation(
    environment: Environment,
    id: String,
    request: DonationRequest,
) -> RouteResult {
    timed! {
        debug!(environment.logger, "Recording donation..."; "home" => &id, "amount" => request.amount);

        let home = environment
            .homes
            .lock()
            .await
            .record_donation(&id, request.amount)
            .map_err(|e| Rejection::new(Context::donation(id.clone()), e))?;

        json(&home)
    }
}

pub async fn visit(environment: Environment, id: String, request: VisitRequest) -> RouteResult {
    timed! {
        debug!(environment.logger, "Recording visit..."; "home" => &id, "date" => &request.date);

        let home = environment
            .homes
            .lock()
            .await
            .record_visit(&id, &request.date)
            .map_err(|e| Rejection::new(Context::visit(id.clone()), e))?;

        json(&home)
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
