use serde::Deserialize;

/// The body of a donation submission. The identity of the donor is the
/// caller's concern; the store only accumulates amounts.
#[derive(Debug, Deserialize)]
pub struct DonationRequest {
    pub amount: f64,
}

/// The body of a visit booking.
#[derive(Debug, Deserialize)]
pub struct VisitRequest {
    pub date: String,
}
