//! Test utilities and fixtures for genius-mcp-server tests.
//!
//! Provides a tiny local HTTP server standing in for the Genius API and for
//! song pages, plus configuration and payload fixtures.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{spawn_stub, StubRoute};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let base = spawn_stub(vec![StubRoute::html("/page", 200, "<html></html>")]).await;
//!     // point a client at `base`
//! }
//! ```

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::core::config::GeniusConfig;

/// A canned response served for an exact request path.
#[derive(Debug, Clone)]
pub struct StubRoute {
    path: String,
    status: u16,
    content_type: &'static str,
    body: String,
    required_headers: Vec<(String, String)>,
}

impl StubRoute {
    /// Serve a JSON body.
    pub fn json(path: &str, status: u16, body: Value) -> Self {
        Self {
            path: path.to_string(),
            status,
            content_type: "application/json",
            body: body.to_string(),
            required_headers: Vec::new(),
        }
    }

    /// Serve an HTML page.
    pub fn html(path: &str, status: u16, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status,
            content_type: "text/html; charset=utf-8",
            body: body.to_string(),
            required_headers: Vec::new(),
        }
    }

    /// Answer 401 unless the request carries this exact header value.
    pub fn require_header(mut self, name: &str, value: &str) -> Self {
        self.required_headers
            .push((name.to_string(), value.to_string()));
        self
    }
}

fn respond(routes: &[StubRoute], req: &Request) -> Response {
    let Some(route) = routes.iter().find(|r| r.path == req.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    for (name, expected) in &route.required_headers {
        let actual = req
            .headers()
            .get(name.as_str())
            .and_then(|v| v.to_str().ok());
        if actual != Some(expected.as_str()) {
            return StatusCode::UNAUTHORIZED.into_response();
        }
    }

    let status = StatusCode::from_u16(route.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, route.content_type)],
        route.body.clone(),
    )
        .into_response()
}

/// Start a stub server on an ephemeral port; the routes may refer to its
/// own base URL. Unknown paths answer 404.
///
/// Returns the base URL, e.g. `http://127.0.0.1:41234`.
pub async fn spawn_stub_with<F>(build_routes: F) -> String
where
    F: FnOnce(&str) -> Vec<StubRoute>,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let base = format!(
        "http://{}",
        listener.local_addr().expect("Stub server has no address")
    );

    let routes = Arc::new(build_routes(&base));
    let app = Router::new().fallback(move |req: Request| {
        let routes = Arc::clone(&routes);
        async move { respond(&routes, &req) }
    });

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    base
}

/// Start a stub server with fixed routes.
pub async fn spawn_stub(routes: Vec<StubRoute>) -> String {
    spawn_stub_with(move |_| routes).await
}

/// Genius configuration pointing at a stub server, with a dummy token.
pub fn test_genius_config(api_base: &str) -> GeniusConfig {
    GeniusConfig {
        access_token: Some("test-token".to_string()),
        api_base: api_base.to_string(),
        timeout_secs: 5,
    }
}

/// A `GET /songs/{id}` body whose page lives at `page_url`.
pub fn song_body(id: u64, page_url: &str) -> Value {
    json!({
        "meta": { "status": 200 },
        "response": { "song": {
            "id": id,
            "title": "Sorry",
            "artist_names": "Justin Bieber",
            "full_title": "Sorry by Justin Bieber",
            "url": page_url,
            "release_date_for_display": "October 22, 2015",
            "lyrics_state": "complete",
            "primary_artist": {
                "id": 357,
                "name": "Justin Bieber",
                "url": "https://genius.com/artists/Justin-bieber"
            },
            "album": null,
            "producer_artists": [{ "name": "Skrillex", "url": "https://genius.com/artists/Skrillex" }],
            "writer_artists": [],
            "song_relationships": [
                { "relationship_type": "samples", "type": "samples", "songs": [] }
            ]
        }}
    })
}

/// A song page with a single lyrics container.
pub fn lyrics_page(lyrics_html: &str) -> String {
    format!(
        r#"<html><body><div id="lyrics-root"><div class="Lyrics__Container-sc-1">{lyrics_html}</div></div></body></html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_serves_routes_and_404s() {
        let base = spawn_stub(vec![StubRoute::html("/here", 200, "ok")]).await;
        let client = reqwest::Client::new();

        let found = client.get(format!("{base}/here")).send().await.unwrap();
        assert_eq!(found.status(), 200);
        assert_eq!(found.text().await.unwrap(), "ok");

        let missing = client.get(format!("{base}/gone")).send().await.unwrap();
        assert_eq!(missing.status(), 404);
    }

    #[tokio::test]
    async fn test_stub_routes_can_reference_base() {
        let base = spawn_stub_with(|base| {
            vec![StubRoute::json("/self", 200, json!({ "base": base }))]
        })
        .await;

        let body: Value = reqwest::get(format!("{base}/self"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["base"], base.as_str());
    }
}
