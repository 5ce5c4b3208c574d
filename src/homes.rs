use uuid::Uuid;

use crate::errors::BackendError;
use crate::home::{Home, HomeChanges, HomeDraft, Review, ReviewDraft};
use crate::seed;
use crate::store::Blob;

/// The authoritative collection of listings.
///
/// Every mutation rewrites the whole collection into the durable blob
/// before returning. If the write fails, the in-memory mutation is
/// rolled back, so memory and blob never diverge.
pub struct HomesStore {
    homes: Vec<Home>,
    blob: Box<dyn Blob>,
}

impl HomesStore {
    /// Opens the collection held in `blob`. An empty blob is seeded
    /// with the demonstration listings and persisted immediately;
    /// reopening an already-seeded blob leaves its contents untouched.
    pub fn open(blob: Box<dyn Blob>) -> Result<Self, BackendError> {
        let store = match blob.load()? {
            Some(raw) => {
                let homes = serde_json::from_slice(&raw)
                    .map_err(|source| BackendError::MalformedCollection { source })?;

                HomesStore { homes, blob }
            }
            None => {
                let store = HomesStore {
                    homes: seed::demo_homes(),
                    blob,
                };
                store.persist()?;

                store
            }
        };

        Ok(store)
    }

    /// Returns the current listings in insertion order.
    pub fn list(&self) -> &[Home] {
        &self.homes
    }

    pub fn count(&self) -> usize {
        self.homes.len()
    }

    pub fn get(&self, id: &str) -> Option<&Home> {
        self.homes.iter().find(|h| h.id == id)
    }

    /// Appends a new listing built from `draft` and returns it. The ID
    /// is freshly generated and never reused.
    pub fn add(&mut self, draft: HomeDraft) -> Result<Home, BackendError> {
        let id = Uuid::new_v4().to_string();

        self.mutate(move |homes| {
            let home = Home::from_draft(id, draft);
            homes.push(home.clone());

            Ok(home)
        })
    }

    /// Shallow-merges `changes` into the matching listing and returns
    /// the result.
    pub fn update(&mut self, id: &str, changes: HomeChanges) -> Result<Home, BackendError> {
        self.mutate(|homes| {
            let home = find(homes, id)?;
            home.apply(changes);

            Ok(home.clone())
        })
    }

    /// Deletes the matching listing. Returns whether a deletion
    /// occurred; the collection is persisted either way.
    pub fn remove(&mut self, id: &str) -> Result<bool, BackendError> {
        self.mutate(|homes| {
            let before = homes.len();
            homes.retain(|h| h.id != id);

            Ok(homes.len() < before)
        })
    }

    /// Appends a review to the matching listing and recomputes its
    /// rating from scratch. Ratings outside the 1–5 scale are rejected
    /// before anything is touched.
    pub fn add_review(&mut self, home_id: &str, draft: ReviewDraft) -> Result<Home, BackendError> {
        if draft.rating < 1 || draft.rating > 5 {
            return Err(BackendError::InvalidRating {
                rating: draft.rating,
            });
        }

        let id = Uuid::new_v4().to_string();

        self.mutate(move |homes| {
            let home = find(homes, home_id)?;

            home.reviews.push(Review {
                id,
                user: draft.user,
                rating: draft.rating,
                comment: draft.comment,
                date: draft.date,
            });
            home.rating = mean_rating(&home.reviews);

            Ok(home.clone())
        })
    }

    /// Adds `amount` to the matching listing's donation total. Only
    /// positive amounts are accepted.
    pub fn record_donation(&mut self, home_id: &str, amount: f64) -> Result<Home, BackendError> {
        if amount <= 0.0 {
            return Err(BackendError::InvalidDonationAmount { amount });
        }

        self.mutate(|homes| {
            let home = find(homes, home_id)?;
            home.donations_received += amount;

            Ok(home.clone())
        })
    }

    /// Counts one more scheduled visit against the matching listing.
    /// The booked date is accepted for API compatibility; only the
    /// counter moves, and `available_visit_dates` stays as it is.
    pub fn record_visit(&mut self, home_id: &str, _date: &str) -> Result<Home, BackendError> {
        self.mutate(|homes| {
            let home = find(homes, home_id)?;
            home.visits += 1;

            Ok(home.clone())
        })
    }

    /// Applies `op` to the collection and persists the result. Any
    /// failure, in `op` or in the write, restores the previous state.
    fn mutate<T>(
        &mut self,
        op: impl FnOnce(&mut Vec<Home>) -> Result<T, BackendError>,
    ) -> Result<T, BackendError> {
        let snapshot = self.homes.clone();

        let value = match op(&mut self.homes) {
            Ok(value) => value,
            Err(e) => {
                self.homes = snapshot;
                return Err(e);
            }
        };

        if let Err(e) = self.persist() {
            self.homes = snapshot;
            return Err(e);
        }

        Ok(value)
    }

    fn persist(&self) -> Result<(), BackendError> {
        let raw = serde_json::to_vec(&self.homes)
            .map_err(|source| BackendError::SerializeCollection { source })?;

        self.blob.save(&raw)
    }
}

fn find<'a>(homes: &'a mut Vec<Home>, id: &str) -> Result<&'a mut Home, BackendError> {
    homes
        .iter_mut()
        .find(|h| h.id == id)
        .ok_or_else(|| BackendError::HomeNotFound { id: id.to_owned() })
}

/// The arithmetic mean of all ratings, rounded to one decimal place
/// (half away from zero), or `0` for an empty list.
fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }

    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let mean = f64::from(sum) / reviews.len() as f64;

    (mean * 10.0).round() / 10.0
}
