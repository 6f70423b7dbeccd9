//! In-memory [`RemoteApi`] implementation for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{RemoteApi, Scene, Tag};
use scenetag_core::{Error, Result};

/// One call observed by [`MockApi`], in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `find_tag_id` with the queried name.
    FindTagId { name: String },
    /// `create_tag` with the requested name.
    CreateTag { name: String },
    /// `destroy_tag` with the target ID.
    DestroyTag { id: String },
    /// `find_random_scene`.
    FindRandomScene,
    /// `update_scene` with the full replacement tag list.
    UpdateScene { id: String, tag_ids: Vec<String> },
}

impl RecordedCall {
    /// Whether this call mutates remote state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateTag { .. } | Self::DestroyTag { .. } | Self::UpdateScene { .. }
        )
    }
}

struct MockState {
    tags: Vec<Tag>,
    scenes: Vec<Scene>,
    calls: Vec<RecordedCall>,
    next_id: u64,
}

/// Remote API backed by in-memory state.
///
/// Useful for testing operations without a running endpoint. Clones share
/// state, and every call is recorded so tests can assert on the exact
/// mutation sequence.
#[derive(Clone)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    /// Create a mock with the given remote state.
    pub fn new(tags: Vec<Tag>, scenes: Vec<Scene>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                tags,
                scenes,
                calls: Vec::new(),
                next_id: 1000,
            })),
        }
    }

    /// Create a mock with no tags and no scenes.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// All calls observed so far, in order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Calls observed so far that mutate remote state.
    pub async fn mutations(&self) -> Vec<RecordedCall> {
        self.state
            .lock()
            .await
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Current state of a scene, if it exists.
    pub async fn scene(&self, id: &str) -> Option<Scene> {
        self.state
            .lock()
            .await
            .scenes
            .iter()
            .find(|scene| scene.id == id)
            .cloned()
    }

    /// Current remote tags.
    pub async fn tags(&self) -> Vec<Tag> {
        self.state.lock().await.tags.clone()
    }
}

#[async_trait]
impl RemoteApi for MockApi {
    async fn find_tag_id(&self, name: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::FindTagId {
            name: name.to_string(),
        });
        Ok(state
            .tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| tag.id.clone()))
    }

    async fn create_tag(&self, name: &str) -> Result<String> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::CreateTag {
            name: name.to_string(),
        });
        let id = state.next_id.to_string();
        state.next_id += 1;
        state.tags.push(Tag {
            id: id.clone(),
            name: name.to_string(),
        });
        Ok(id)
    }

    async fn destroy_tag(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::DestroyTag { id: id.to_string() });
        state.tags.retain(|tag| tag.id != id);
        Ok(())
    }

    async fn find_random_scene(&self) -> Result<Option<Scene>> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::FindRandomScene);
        // Deterministic stand-in for the remote's random ordering.
        Ok(state.scenes.first().cloned())
    }

    async fn update_scene(&self, id: &str, tag_ids: Vec<String>) -> Result<()> {
        let mut state = self.state.lock().await;
        state.calls.push(RecordedCall::UpdateScene {
            id: id.to_string(),
            tag_ids: tag_ids.clone(),
        });
        match state.scenes.iter_mut().find(|scene| scene.id == id) {
            Some(scene) => {
                scene.tag_ids = tag_ids;
                Ok(())
            }
            None => Err(Error::graphql(format!("scene {id} does not exist"))),
        }
    }
}
