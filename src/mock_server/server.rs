//! Mock Action Network API server.
//!
//! Provides an axum-based HTTP server that simulates the Action Network
//! API, discovery document included.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;

/// A mock Action Network API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic hypermedia API: the discovery document, the link
/// relations, and the pagination chains all point back at the server
/// itself.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns
    /// immediately. Use `url()` to get the server's discovery endpoint.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        // Hypermedia links are rendered against the bound address
        shared_state.write().await.base_url = url.clone();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the discovery endpoint URL of the mock server.
    ///
    /// Use this URL when connecting an `AnClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        let mut state = MockState::new();

        state.people = scenario.people;
        state.donations = scenario.donations;
        state.tags = scenario.tags;
        for (tag_id, taggings) in scenario.taggings {
            state.taggings.insert(tag_id, taggings);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Discovery document
            .route("/", get(handlers::discovery))
            // People routes
            .route(
                "/people",
                get(handlers::list_people).post(handlers::create_person),
            )
            .route(
                "/people/:id",
                get(handlers::get_person).put(handlers::update_person),
            )
            // Donation routes
            .route("/donations", get(handlers::list_donations))
            // Tag routes
            .route("/tags", get(handlers::list_tags))
            .route("/tags/:id", get(handlers::get_tag))
            .route("/tags/:id/taggings", get(handlers::list_taggings))
            .with_state(state)
    }
}
