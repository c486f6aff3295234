//! JSON API over the post repository

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{DocumentSource, Post, PostSummary, Repository};
use crate::Inkpress;

/// Number of related posts returned per request
const RELATED_LIMIT: usize = 3;

/// Server state
struct ServerState<S> {
    repo: Repository<S>,
    per_page: usize,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Start the API server
pub async fn start(site: &Inkpress, ip: &str, port: u16) -> Result<()> {
    let app = router(site.repository(), site.config.per_page).nest_service(
        &format!("/{}", site.config.content_dir.trim_matches('/')),
        ServeDir::new(&site.content_dir),
    );

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("{} API running at http://{}:{}", site.config.title, ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// API routes over any document source
pub fn router<S: DocumentSource>(repo: Repository<S>, per_page: usize) -> Router {
    let state = Arc::new(ServerState {
        repo,
        per_page: per_page.max(1),
    });

    Router::new()
        .route("/api/posts", get(list_posts::<S>))
        .route("/api/posts/*slug", get(get_post::<S>))
        .route("/api/related/*slug", get(related_posts::<S>))
        .route("/api/categories", get(list_categories::<S>))
        .route("/api/categories/:category", get(category_posts::<S>))
        .route("/api/search", get(search_posts::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn summaries(posts: &[Post]) -> Vec<PostSummary<'_>> {
    posts.iter().map(Post::summary).collect()
}

fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

async fn list_posts<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let posts = state.repo.list_all_posts().await;
    let total = posts.len();
    let page = query.page.unwrap_or(1).max(1);
    let pages = total.div_ceil(state.per_page);

    let start = (page - 1).saturating_mul(state.per_page).min(total);
    let end = (start + state.per_page).min(total);

    Json(json!({
        "posts": summaries(&posts[start..end]),
        "page": page,
        "pages": pages,
        "total": total,
    }))
    .into_response()
}

async fn get_post<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
) -> Response {
    match state.repo.get_post_by_slug(slug.trim_start_matches('/')).await {
        Some(post) => Json(post).into_response(),
        None => not_found("Post not found"),
    }
}

async fn related_posts<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Path(slug): Path<String>,
) -> Response {
    let posts = state
        .repo
        .related_posts(slug.trim_start_matches('/'), RELATED_LIMIT)
        .await;
    Json(summaries(&posts)).into_response()
}

async fn list_categories<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
) -> Response {
    Json(state.repo.categories().await).into_response()
}

async fn category_posts<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Path(category): Path<String>,
) -> Response {
    let posts = state.repo.get_posts_by_category(&category).await;
    Json(summaries(&posts)).into_response()
}

async fn search_posts<S: DocumentSource>(
    State(state): State<Arc<ServerState<S>>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let posts = state.repo.search_posts(&query.q).await;
    Json(summaries(&posts)).into_response()
}
