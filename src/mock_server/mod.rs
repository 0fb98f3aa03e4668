//! Mock Action Network API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Action
//! Network API for integration and end-to-end testing. Unlike wiremock,
//! which mocks at the HTTP level per-test, this server maintains state
//! across requests and serves real pagination chains, enabling realistic
//! workflow testing: discovery handshake, link resolution, and multi-page
//! collection walks.
//!
//! # Example
//!
//! ```ignore
//! use anapi::mock_server::MockServer;
//! use anapi::{AnClient, Donation, List};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = AnClient::connect("test-token", server.url()).await.unwrap();
//!
//!     // Server comes with default fixtures
//!     let donations = Donation::list_all(&client).await.unwrap();
//!     assert!(!donations.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
