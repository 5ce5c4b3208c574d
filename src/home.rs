use serde::{Deserialize, Serialize};

/// A single children's-home listing in the collection.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    /// The ID of the listing. Assigned at creation time and never reused.
    pub id: String,

    /// The name of the home.
    pub name: String,

    /// The town or region the home operates in.
    pub location: String,

    /// The description shown on the listing.
    pub description: String,

    /// The URL of the listing's photo.
    pub image: String,

    /// The number of children currently housed.
    pub children: u32,

    /// The number of children the home can house.
    pub capacity: u32,

    /// The needs the home has flagged as urgent, in the order they were
    /// entered.
    pub urgent_needs: Vec<String>,

    /// The total amount donated so far.
    pub donations_received: f64,

    /// The fundraising target, used for progress display only.
    pub donation_goal: f64,

    /// The number of visits scheduled so far.
    pub visits: u64,

    /// The mean of all review ratings, rounded to one decimal place.
    /// `0` while there are no reviews. Derived; recomputed on every
    /// review submission.
    pub rating: f64,

    /// The reviews submitted against this home, oldest first.
    pub reviews: Vec<Review>,

    /// How to reach the home.
    pub contact: Contact,

    /// The dates on which the home accepts visitors.
    pub available_visit_dates: Vec<String>,
}

/// A single rating and comment submitted against a home.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// The ID of the review. Assigned when the review is accepted.
    pub id: String,

    /// The display name of the reviewer.
    pub user: String,

    /// The rating given, from 1 to 5.
    pub rating: u8,

    /// The comment left alongside the rating.
    pub comment: String,

    /// The date of the review as an ISO date string.
    pub date: String,
}

/// Contact details for a home.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// The caller-supplied fields of a new listing. Everything else
/// (`id`, counters, rating, reviews, visit dates) is store-assigned.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDraft {
    pub name: String,

    pub location: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub children: u32,

    #[serde(default)]
    pub capacity: u32,

    #[serde(default)]
    pub urgent_needs: Vec<String>,

    #[serde(default)]
    pub donation_goal: f64,

    #[serde(default)]
    pub contact: Contact,
}

/// A partial update to a listing. Fields left unset are untouched;
/// the merge is shallow. Derived and store-owned fields (`rating`,
/// `reviews`, `visits`, `id`) cannot be written this way.
/// `donations_received` is editable here to allow administrative
/// corrections.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeChanges {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub children: Option<u32>,

    #[serde(default)]
    pub capacity: Option<u32>,

    #[serde(default)]
    pub urgent_needs: Option<Vec<String>>,

    #[serde(default)]
    pub donations_received: Option<f64>,

    #[serde(default)]
    pub donation_goal: Option<f64>,

    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub available_visit_dates: Option<Vec<String>>,
}

/// The caller-supplied fields of a new review.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub user: String,

    pub rating: u8,

    #[serde(default)]
    pub comment: String,

    pub date: String,
}

impl Home {
    /// Builds a fresh listing from a draft, with all store-assigned
    /// fields at their creation defaults.
    pub(crate) fn from_draft(id: String, draft: HomeDraft) -> Self {
        Home {
            id,
            name: draft.name,
            location: draft.location,
            description: draft.description,
            image: draft.image,
            children: draft.children,
            capacity: draft.capacity,
            urgent_needs: draft.urgent_needs,
            donations_received: 0.0,
            donation_goal: draft.donation_goal,
            visits: 0,
            rating: 0.0,
            reviews: vec![],
            contact: draft.contact,
            available_visit_dates: vec![],
        }
    }

    pub(crate) fn apply(&mut self, changes: HomeChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        if let Some(children) = changes.children {
            self.children = children;
        }
        if let Some(capacity) = changes.capacity {
            self.capacity = capacity;
        }
        if let Some(urgent_needs) = changes.urgent_needs {
            self.urgent_needs = urgent_needs;
        }
        if let Some(donations_received) = changes.donations_received {
            self.donations_received = donations_received;
        }
        if let Some(donation_goal) = changes.donation_goal {
            self.donation_goal = donation_goal;
        }
        if let Some(contact) = changes.contact {
            self.contact = contact;
        }
        if let Some(available_visit_dates) = changes.available_visit_dates {
            self.available_visit_dates = available_visit_dates;
        }
    }
}
