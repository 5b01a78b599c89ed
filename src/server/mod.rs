//! HTTP server exposing the content API, search, and feed
//!
//! Every request re-reads the content tree from disk; there is no shared
//! mutable state, so concurrent requests never contend on anything.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::content::{related::related_content, ContentStore, ContentType};
use crate::search::SearchIndex;
use crate::{feed, Folio};

/// Server state
struct ServerState {
    folio: Folio,
    store: ContentStore,
}

/// Start the content server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        store: ContentStore::new(&folio.content_dir),
    });

    let app = Router::new()
        .route("/feed.xml", get(feed_handler))
        .route("/api/search", get(search_handler))
        .route("/api/content/:type", get(list_handler))
        .route("/api/content/:type/:slug", get(item_handler))
        .route("/api/content/:type/:slug/related", get(related_handler))
        .fallback_service(ServeDir::new(&folio.static_dir))
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// GET /feed.xml
async fn feed_handler(State(state): State<Arc<ServerState>>) -> Response {
    match feed::feed_items(&state.store) {
        Ok(items) => {
            let xml = feed::generate(&state.folio.config, &items);
            ([(header::CONTENT_TYPE, "application/xml")], xml).into_response()
        }
        Err(e) => internal_error(e),
    }
}

/// GET /api/search[?q=term]
///
/// Without a query the full dataset is returned; with one, matches are
/// capped the same way the inline search modal caps them.
async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let items = match state.store.all() {
        Ok(items) => items,
        Err(e) => return internal_error(e),
    };
    let index = SearchIndex::build(&items);

    match params.q.as_deref() {
        Some(q) if !q.trim().is_empty() => Json(index.query(q)).into_response(),
        _ => Json(index.entries().to_vec()).into_response(),
    }
}

/// GET /api/content/{type}
async fn list_handler(
    State(state): State<Arc<ServerState>>,
    Path(ty): Path<String>,
) -> Response {
    let Ok(ty) = ty.parse::<ContentType>() else {
        return not_found();
    };
    match state.store.list_by_type(ty) {
        Ok(items) => Json(items).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/content/{type}/{slug}
async fn item_handler(
    State(state): State<Arc<ServerState>>,
    Path((ty, slug)): Path<(String, String)>,
) -> Response {
    let Ok(ty) = ty.parse::<ContentType>() else {
        return not_found();
    };
    match state.store.get_one(ty, &slug) {
        Ok(Some(item)) => Json(item).into_response(),
        Ok(None) => not_found(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/content/{type}/{slug}/related
async fn related_handler(
    State(state): State<Arc<ServerState>>,
    Path((ty, slug)): Path<(String, String)>,
) -> Response {
    let Ok(ty) = ty.parse::<ContentType>() else {
        return not_found();
    };
    match state.store.list_by_type(ty) {
        Ok(items) => {
            let related: Vec<_> = related_content(&items, &slug)
                .into_iter()
                .cloned()
                .collect();
            Json(related).into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
