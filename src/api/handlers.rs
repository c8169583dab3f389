use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{CustomerId, Recommendation};
use crate::services;

use super::AppState;

// Response types

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SegmentResponse {
    pub customer_id: CustomerId,
    pub segment: String,
}

/// Response of the recommendation endpoint.
///
/// An empty match is a normal response carrying an explanatory message, not
/// an error status.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Matches {
        input_product: String,
        recommendations: Vec<Recommendation>,
    },
    Empty {
        message: String,
    },
}

// Handlers

/// Landing message pointing at the lookup endpoints
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the Customer Analytics API. Use /customer/{id} or /recommend/{product}"
            .to_string(),
    })
}

/// Look up the precomputed segment for a customer
pub async fn customer_segment(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> AppResult<Json<SegmentResponse>> {
    let segment = services::customer_segment(state.segments(), customer_id)?;
    Ok(Json(SegmentResponse {
        customer_id,
        segment,
    }))
}

/// Recommend products frequently bought together with the queried product
pub async fn recommend(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
) -> Json<RecommendResponse> {
    let recommendations: Vec<Recommendation> =
        services::top_recommendations(state.rules(), &product_name);

    if recommendations.is_empty() {
        return Json(RecommendResponse::Empty {
            message: "No recommendations found for this product.".to_string(),
        });
    }

    Json(RecommendResponse::Matches {
        input_product: product_name,
        recommendations,
    })
}
