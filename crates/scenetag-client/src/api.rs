//! Remote API abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use scenetag_core::Result;

/// A tag on the remote service. Only the fields the plugin reads are
/// modeled; the remote owns everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Opaque remote identifier.
    pub id: String,
    /// Display name, unique per the remote's own rules.
    pub name: String,
}

/// A scene on the remote service: its identifier and the identifiers of
/// the tags currently attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Opaque remote identifier.
    pub id: String,
    /// IDs of the tags attached to this scene, in remote order.
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// Abstraction over the remote tag/scene API.
///
/// Implemented by [`GraphqlClient`](crate::GraphqlClient) against the real
/// endpoint and by [`MockApi`](crate::MockApi) for tests. Each call is
/// independent: no retries, no caching, first failure is terminal for the
/// running operation.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Look up a tag ID by exact name. Queries the full tag set (no
    /// pagination) and returns the first match, or `None`.
    async fn find_tag_id(&self, name: &str) -> Result<Option<String>>;

    /// Create a tag with the given name and return its new ID.
    async fn create_tag(&self, name: &str) -> Result<String>;

    /// Destroy a tag by ID. Performs no existence check; callers that
    /// need idempotence resolve the tag first.
    async fn destroy_tag(&self, id: &str) -> Result<()>;

    /// Fetch exactly one randomly-ordered scene, or `None` when the
    /// remote scene count is zero.
    async fn find_random_scene(&self) -> Result<Option<Scene>>;

    /// Replace a scene's tag list wholesale. Callers must pass the full
    /// desired tag-ID sequence; nothing is merged remotely.
    async fn update_scene(&self, id: &str, tag_ids: Vec<String>) -> Result<()>;
}
