use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use vendorq_core::{CategoryFilter, Error};
use vendorq_similarity::{QualificationQuery, VendorQualifier};
use vendorq_storage::CatalogStore;

const DEFAULT_FEATURE_LIMIT: usize = 20;

/// Shared state for all handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<CatalogStore>,
    pub qualifier: VendorQualifier,
}

impl ApiState {
    pub fn new(store: Arc<CatalogStore>, qualifier: VendorQualifier) -> Self {
        Self { store, qualifier }
    }
}

#[derive(Deserialize)]
struct CategoryQuery {
    category: Option<String>,
}

#[derive(Deserialize)]
struct FeaturesQuery {
    category: Option<String>,
    limit: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: ApiState, host: &str, port: u16) -> std::io::Result<()> {
        info!("Starting REST API on {}:{}", host, port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(routes)
        })
        .bind((host, port))?
        .run()
        .await
    }
}

/// Register every endpoint on `cfg`
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health))
        .route("/vendor_qualification", web::post().to(vendor_qualification))
        .route("/categories", web::get().to(categories))
        .route("/vendors", web::get().to(vendors))
        .route("/features", web::get().to(features))
        .route("/catalog/reload", web::post().to(reload_catalog));
}

fn error_response(e: &Error) -> HttpResponse {
    let body = json!({ "error": e.to_string() });
    match e {
        Error::InvalidQuery(_) | Error::InvalidConfig(_) => HttpResponse::BadRequest().json(body),
        Error::CatalogUnavailable(_) => HttpResponse::ServiceUnavailable().json(body),
        Error::Io(_) | Error::Serialization(_) => {
            error!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

async fn vendor_qualification(
    state: web::Data<ApiState>,
    req: web::Json<QualificationQuery>,
) -> ActixResult<HttpResponse> {
    let catalog = match state.store.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Ok(error_response(&e)),
    };

    let qualifier = state.qualifier.clone();
    let query = req.into_inner();
    let outcome = web::block(move || qualifier.qualify(&catalog, &query)).await?;

    match outcome {
        Ok(outcome) => Ok(HttpResponse::Ok().json(outcome)),
        Err(e) => {
            warn!("Rejected qualification query: {}", e);
            Ok(error_response(&e))
        }
    }
}

async fn categories(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let catalog = match state.store.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Ok(error_response(&e)),
    };

    let categories = catalog.categories();
    Ok(HttpResponse::Ok().json(json!({
        "total_categories": categories.len(),
        "available_categories": categories,
        "total_products": catalog.product_count(),
    })))
}

async fn vendors(
    state: web::Data<ApiState>,
    query: web::Query<CategoryQuery>,
) -> ActixResult<HttpResponse> {
    let catalog = match state.store.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Ok(error_response(&e)),
    };

    let filter = CategoryFilter::from_option(query.category.as_deref());
    let vendors = catalog.vendors(&filter);
    Ok(HttpResponse::Ok().json(json!({
        "total_vendors": vendors.len(),
        "vendors": vendors,
        "category_filter": query.category,
    })))
}

async fn features(
    state: web::Data<ApiState>,
    query: web::Query<FeaturesQuery>,
) -> ActixResult<HttpResponse> {
    let catalog = match state.store.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Ok(error_response(&e)),
    };

    let filter = CategoryFilter::from_option(query.category.as_deref());
    let common = catalog.common_features(&filter, query.limit.unwrap_or(DEFAULT_FEATURE_LIMIT));
    Ok(HttpResponse::Ok().json(json!({
        "common_features": common.common_features,
        "total_unique_features": common.total_unique_features,
        "category_filter": query.category,
    })))
}

async fn health(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let body = match state.store.snapshot() {
        Ok(catalog) => json!({
            "status": "healthy",
            "catalog_status": "loaded",
            "total_products": catalog.product_count(),
            "total_features": catalog.feature_count(),
        }),
        Err(_) => json!({
            "status": "degraded",
            "catalog_status": "unavailable",
            "total_products": 0,
            "total_features": 0,
        }),
    };
    Ok(HttpResponse::Ok().json(body))
}

async fn reload_catalog(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let store = state.store.clone();
    match web::block(move || store.reload()).await? {
        Ok(catalog) => Ok(HttpResponse::Ok().json(json!({
            "status": "reloaded",
            "total_products": catalog.product_count(),
            "total_features": catalog.feature_count(),
        }))),
        Err(e) => {
            warn!("Catalog reload failed: {}", e);
            Ok(error_response(&e))
        }
    }
}

async fn root(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    let config = state.qualifier.config();
    Ok(HttpResponse::Ok().json(json!({
        "message": "Vendor Qualification API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Capability similarity based vendor qualification and ranking",
        "endpoints": {
            "POST /vendor_qualification": "Qualify and rank vendors",
            "GET /categories": "Available software categories",
            "GET /vendors": "Vendors, optionally filtered by category",
            "GET /features": "Most common features",
            "GET /health": "Health check",
            "POST /catalog/reload": "Reload the catalog file",
        },
        "example_query": {
            "software_category": "CRM Software",
            "capabilities": ["Lead Management", "Email Marketing"],
            "similarity_threshold": config.similarity_threshold,
            "top_n": config.top_n,
            "include_explanations": true,
        },
    })))
}
