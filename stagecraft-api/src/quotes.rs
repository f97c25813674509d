use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;
use stagecraft_catalog::quote::{calculate_staging_quote, QuoteBreakdown, QuoteDetails, QuoteRates};
use stagecraft_core::currency::format_usd;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/quotes", post(create_quote))
        .route("/v1/quotes/rates", get(get_rates))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub breakdown: QuoteBreakdown,
    pub display: QuoteDisplay,
}

/// Pre-formatted currency strings so the site renders amounts verbatim
#[derive(Debug, Serialize)]
pub struct QuoteDisplay {
    pub total_estimate: String,
    pub price_range_min: String,
    pub price_range_max: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/quotes
/// Price a staging request and return the itemized breakdown
async fn create_quote(Json(details): Json<QuoteDetails>) -> Result<Json<QuoteResponse>, AppError> {
    details.validate()?;

    let breakdown = calculate_staging_quote(&details);
    let display = QuoteDisplay {
        total_estimate: format_usd(breakdown.total_estimate),
        price_range_min: format_usd(breakdown.price_range.min),
        price_range_max: format_usd(breakdown.price_range.max),
    };

    Ok(Json(QuoteResponse { breakdown, display }))
}

/// GET /v1/quotes/rates
/// The published rate card, for the pricing page
async fn get_rates() -> Json<QuoteRates> {
    Json(QuoteRates::default())
}
