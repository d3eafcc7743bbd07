use std::str::FromStr;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use nearpro_core::{
    Category, Coordinate, ProfessionalRecord, SearchQuery, SearchResult, ValidationError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{
    map_db_error, map_search_error, validation_error, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

/// Raw nearby-search parameters. Everything arrives as text so that bad input
/// is reported through the standard error envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NearbyParams {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub radius: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<String>,
    pub max_price: Option<String>,
}

impl NearbyParams {
    pub(super) fn into_query(self) -> Result<SearchQuery, ValidationError> {
        let latitude: f64 = required("latitude", self.latitude.as_deref())?;
        let longitude: f64 = required("longitude", self.longitude.as_deref())?;
        let mut query = SearchQuery::new(Coordinate::new(latitude, longitude)?);

        if let Some(radius) = optional::<u32>("radius", self.radius.as_deref())? {
            query = query.with_radius_meters(radius)?;
        }
        if let Some(category) = non_blank(self.category.as_deref()) {
            query = query.with_category(category.parse::<Category>()?);
        }
        if let Some(min_rating) = optional::<f64>("minRating", self.min_rating.as_deref())? {
            query = query.with_min_rating(min_rating)?;
        }
        if let Some(max_price) = optional::<Decimal>("maxPrice", self.max_price.as_deref())? {
            query = query.with_max_price(max_price)?;
        }
        Ok(query)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn optional<T: FromStr>(field: &'static str, raw: Option<&str>) -> Result<Option<T>, ValidationError> {
    non_blank(raw)
        .map(|value| {
            value.parse::<T>().map_err(|_| ValidationError::Malformed {
                field,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn required<T: FromStr>(field: &'static str, raw: Option<&str>) -> Result<T, ValidationError> {
    optional(field, raw)?.ok_or(ValidationError::MissingParameter(field))
}

#[derive(Debug, Serialize)]
pub(super) struct NearbyResponse {
    professionals: Vec<SearchResult>,
    meta: ResponseMeta,
}

#[derive(Debug, Deserialize)]
pub(super) struct AvailabilityBody {
    available: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct LocationBody {
    latitude: f64,
    longitude: f64,
}

pub(super) async fn find_nearby(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let Query(params) = params
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))?;
    let query = params
        .into_query()
        .map_err(|e| validation_error(req_id.0.clone(), &e))?;

    let professionals = state
        .search
        .find_nearby(&query)
        .await
        .map_err(|e| map_search_error(req_id.0.clone(), &e))?;

    Ok(Json(NearbyResponse {
        professionals,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_professional(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<ProfessionalRecord>>, ApiError> {
    let id = path_id(&req_id, id)?;
    let row = nearpro_db::get_professional(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &nearpro_db::DbError::from(e)))?
        .filter(|row| row.is_active)
        .ok_or_else(|| not_found(&req_id, id))?;

    respond_with_row(req_id, row)
}

pub(super) async fn update_availability(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AvailabilityBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfessionalRecord>>, ApiError> {
    let id = path_id(&req_id, id)?;
    let Json(body) = json_body(&req_id, body)?;

    let row = nearpro_db::set_availability(&state.pool, id, body.available)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| not_found(&req_id, id))?;

    tracing::info!(id, available = body.available, "availability updated");
    respond_with_row(req_id, row)
}

pub(super) async fn update_location(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<LocationBody>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfessionalRecord>>, ApiError> {
    let id = path_id(&req_id, id)?;
    let Json(body) = json_body(&req_id, body)?;
    let location = Coordinate::new(body.latitude, body.longitude)
        .map_err(|e| validation_error(req_id.0.clone(), &e))?;

    let row = nearpro_db::set_location(&state.pool, id, location)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| not_found(&req_id, id))?;

    tracing::info!(id, "location updated");
    respond_with_row(req_id, row)
}

pub(super) async fn deactivate_professional(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&req_id, id)?;
    match nearpro_db::deactivate_professional(&state.pool, id).await {
        Ok(()) => {
            tracing::info!(id, "professional deactivated");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(nearpro_db::DbError::NotFound) => Err(not_found(&req_id, id)),
        Err(e) => Err(map_db_error(req_id.0, &e)),
    }
}

fn path_id(req_id: &RequestId, id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))
}

fn json_body<T>(
    req_id: &RequestId,
    body: Result<Json<T>, JsonRejection>,
) -> Result<Json<T>, ApiError> {
    body.map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.body_text()))
}

fn not_found(req_id: &RequestId, id: i64) -> ApiError {
    ApiError::new(
        req_id.0.clone(),
        "not_found",
        format!("professional {id} not found"),
    )
}

fn respond_with_row(
    req_id: RequestId,
    row: nearpro_db::ProfessionalRow,
) -> Result<Json<ApiResponse<ProfessionalRecord>>, ApiError> {
    let data =
        ProfessionalRecord::try_from(row).map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(lat: &str, lon: &str) -> NearbyParams {
        NearbyParams {
            latitude: Some(lat.to_string()),
            longitude: Some(lon.to_string()),
            ..NearbyParams::default()
        }
    }

    #[test]
    fn defaults_apply_when_only_coordinates_given() {
        let query = params("-33.4489", "-70.6693").into_query().expect("valid");
        assert_eq!(query.radius_meters(), nearpro_core::DEFAULT_RADIUS_METERS);
        assert!(query.category().is_none());
        assert!(query.min_rating().is_none());
        assert!(query.max_price().is_none());
    }

    #[test]
    fn missing_latitude_is_reported_by_name() {
        let mut p = params("0", "0");
        p.latitude = None;
        assert_eq!(
            p.into_query().unwrap_err(),
            ValidationError::MissingParameter("latitude")
        );
    }

    #[test]
    fn unparseable_number_is_malformed() {
        let err = params("north", "0").into_query().unwrap_err();
        assert!(matches!(err, ValidationError::Malformed { field: "latitude", .. }));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let err = params("91", "0").into_query().unwrap_err();
        assert_eq!(err, ValidationError::InvalidLatitude(91.0));
    }

    #[test]
    fn all_filters_are_parsed() {
        let mut p = params("-33.4489", "-70.6693");
        p.radius = Some("2500".to_string());
        p.category = Some("tattoo_artist".to_string());
        p.min_rating = Some("4.5".to_string());
        p.max_price = Some("10000".to_string());

        let query = p.into_query().expect("valid");
        assert_eq!(query.radius_meters(), 2500);
        assert_eq!(query.category(), Some(Category::TattooArtist));
        assert_eq!(query.min_rating(), Some(4.5));
        assert_eq!(query.max_price(), Some(Decimal::from(10_000)));
    }

    #[test]
    fn blank_optional_parameters_are_ignored() {
        let mut p = params("0", "0");
        p.category = Some(String::new());
        p.radius = Some("  ".to_string());
        let query = p.into_query().expect("valid");
        assert!(query.category().is_none());
        assert_eq!(query.radius_meters(), nearpro_core::DEFAULT_RADIUS_METERS);
    }

    #[test]
    fn radius_below_minimum_is_rejected() {
        let mut p = params("0", "0");
        p.radius = Some("99".to_string());
        assert!(matches!(
            p.into_query().unwrap_err(),
            ValidationError::RadiusTooSmall { radius: 99, .. }
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut p = params("0", "0");
        p.category = Some("PLUMBER".to_string());
        assert_eq!(
            p.into_query().unwrap_err(),
            ValidationError::UnknownCategory("PLUMBER".to_string())
        );
    }

    #[test]
    fn negative_max_price_is_rejected() {
        let mut p = params("0", "0");
        p.max_price = Some("-1".to_string());
        assert!(matches!(
            p.into_query().unwrap_err(),
            ValidationError::NegativeMaxPrice(_)
        ));
    }
}
