//! GraphQL client for the scenetag plugin adapter.
//!
//! [`GraphqlClient`] executes queries and mutations against the host's
//! single GraphQL endpoint. [`RemoteApi`] is the abstraction the plugin
//! operations are written against, and [`MockApi`] is the in-memory
//! implementation backing the operation tests.

mod api;
mod graphql;
mod mock;

pub use api::{RemoteApi, Scene, Tag};
pub use graphql::GraphqlClient;
pub use mock::{MockApi, RecordedCall};
