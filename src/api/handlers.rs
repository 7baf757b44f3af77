use crate::api::error::ApiError;
use crate::core::Portal;
use crate::domain::model::LookupResponse;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const BANNER: &str = "OSINT Portal API";

type LookupResult = Result<Json<LookupResponse>, ApiError>;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": BANNER }))
}

pub async fn lookup_domain(State(portal): State<Arc<Portal>>, Path(domain): Path<String>) -> LookupResult {
    Ok(Json(portal.domain(&domain).await?))
}

pub async fn lookup_email(State(portal): State<Arc<Portal>>, Path(email): Path<String>) -> LookupResult {
    Ok(Json(portal.email(&email).await?))
}

pub async fn lookup_ip(State(portal): State<Arc<Portal>>, Path(ip): Path<String>) -> LookupResult {
    Ok(Json(portal.ip(&ip).await?))
}

pub async fn lookup_username(State(portal): State<Arc<Portal>>, Path(username): Path<String>) -> LookupResult {
    Ok(Json(portal.username(&username).await?))
}

pub async fn intel_hibp(State(portal): State<Arc<Portal>>, Path(email): Path<String>) -> LookupResult {
    Ok(Json(portal.hibp(&email).await?))
}

pub async fn intel_ipinfo(State(portal): State<Arc<Portal>>, Path(ip): Path<String>) -> LookupResult {
    Ok(Json(portal.ipinfo(&ip).await?))
}

pub async fn intel_shodan(State(portal): State<Arc<Portal>>, Path(ip): Path<String>) -> LookupResult {
    Ok(Json(portal.shodan(&ip).await?))
}
