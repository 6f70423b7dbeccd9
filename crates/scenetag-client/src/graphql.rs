//! GraphQL transport and the real [`RemoteApi`] implementation.

use async_trait::async_trait;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_TYPE, COOKIE, DNT, HeaderMap, HeaderValue,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::{RemoteApi, Scene};
use scenetag_core::{ConnectionInfo, Error, Result};

// ---------------------------------------------------------------------------
// Query documents
// ---------------------------------------------------------------------------

const ALL_TAGS_QUERY: &str = r"
query {
  allTags {
    id
    name
  }
}";

const TAG_CREATE_MUTATION: &str = r"
mutation tagCreate($input: TagCreateInput!) {
  tagCreate(input: $input) {
    id
  }
}";

const TAG_DESTROY_MUTATION: &str = r"
mutation tagDestroy($input: TagDestroyInput!) {
  tagDestroy(input: $input)
}";

const FIND_SCENES_QUERY: &str = r"
query findScenes($filter: FindFilterType!) {
  findScenes(filter: $filter) {
    count
    scenes {
      id
      tags {
        id
      }
    }
  }
}";

const SCENE_UPDATE_MUTATION: &str = r"
mutation sceneUpdate($input: SceneUpdateInput!) {
  sceneUpdate(input: $input) {
    id
  }
}";

// ---------------------------------------------------------------------------
// GraphqlClient
// ---------------------------------------------------------------------------

/// Client for the host's GraphQL endpoint.
///
/// Holds the endpoint URL derived from [`ConnectionInfo`] and the session
/// credential for the process lifetime. Carries no retry or caching
/// state; every call is independent.
pub struct GraphqlClient {
    url: String,
    session_cookie: Option<String>,
    client: reqwest::Client,
}

/// The fixed header set attached to every request.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers
}

impl GraphqlClient {
    /// Create a client for the endpoint described by `conn`.
    ///
    /// The connection info is consumed: exactly one client owns it for
    /// the process lifetime.
    pub fn new(conn: ConnectionInfo) -> Result<Self> {
        let url = format!("{}://localhost:{}/graphql", conn.scheme, conn.port);
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .map_err(|e| Error::connection(e.to_string()))?;

        Ok(Self {
            url,
            session_cookie: conn.session_cookie,
            client,
        })
    }

    /// Execute a query or mutation and return the response `data` field.
    ///
    /// `variables` is omitted from the request body entirely when not
    /// supplied (never sent as `null`). A non-2xx response fails with
    /// [`Error::Transport`] without parsing the body as GraphQL; a 2xx
    /// response with a non-empty `errors` array fails with
    /// [`Error::GraphQl`] carrying every reported message. A response
    /// with neither `data` nor `errors` yields an empty object.
    pub async fn execute(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        if query.trim().is_empty() {
            return Err(Error::invalid_request("refusing to send an empty query"));
        }

        let mut body = json!({ "query": query });
        if let Some(vars) = variables {
            body["variables"] = vars;
        }

        log::debug!("POST {}", self.url);

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, format!("session={cookie}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response body".to_string());
            return Err(Error::transport(status.as_u16(), body));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;
        let envelope: Value = serde_json::from_str(&text)?;

        if let Some(errors) = envelope.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages: Vec<String> = errors
                    .iter()
                    .map(|err| match err.get("message").and_then(Value::as_str) {
                        Some(message) => message.to_string(),
                        None => err.to_string(),
                    })
                    .collect();
                return Err(Error::graphql(messages.join("; ")));
            }
        }

        match envelope.get("data") {
            None | Some(Value::Null) => Ok(json!({})),
            Some(data) => Ok(data.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Response rows
// ---------------------------------------------------------------------------

// Remote IDs are opaque: some deployments serve them as strings, some as
// integers. They are normalized to strings at this boundary.
fn id_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::graphql(format!("expected an opaque ID, got {other}"))),
    }
}

#[derive(Deserialize)]
struct AllTagsData {
    #[serde(rename = "allTags", default)]
    all_tags: Vec<TagRow>,
}

#[derive(Deserialize)]
struct TagRow {
    id: Value,
    name: String,
}

#[derive(Deserialize)]
struct TagCreateData {
    #[serde(rename = "tagCreate")]
    tag_create: IdRow,
}

#[derive(Deserialize)]
struct IdRow {
    id: Value,
}

#[derive(Deserialize)]
struct FindScenesData {
    #[serde(rename = "findScenes")]
    find_scenes: ScenePage,
}

#[derive(Deserialize)]
struct ScenePage {
    count: u64,
    #[serde(default)]
    scenes: Vec<SceneRow>,
}

#[derive(Deserialize)]
struct SceneRow {
    id: Value,
    #[serde(default)]
    tags: Vec<IdRow>,
}

#[async_trait]
impl RemoteApi for GraphqlClient {
    async fn find_tag_id(&self, name: &str) -> Result<Option<String>> {
        let data = self.execute(ALL_TAGS_QUERY, None).await?;
        let tags: AllTagsData = serde_json::from_value(data)?;

        for tag in &tags.all_tags {
            if tag.name == name {
                return id_string(&tag.id).map(Some);
            }
        }
        Ok(None)
    }

    async fn create_tag(&self, name: &str) -> Result<String> {
        let variables = json!({ "input": { "name": name } });
        let data = self.execute(TAG_CREATE_MUTATION, Some(variables)).await?;
        let created: TagCreateData = serde_json::from_value(data)?;
        id_string(&created.tag_create.id)
    }

    async fn destroy_tag(&self, id: &str) -> Result<()> {
        let variables = json!({ "input": { "id": id } });
        self.execute(TAG_DESTROY_MUTATION, Some(variables)).await?;
        Ok(())
    }

    async fn find_random_scene(&self) -> Result<Option<Scene>> {
        let variables = json!({ "filter": { "per_page": 1, "sort": "random" } });
        let data = self.execute(FIND_SCENES_QUERY, Some(variables)).await?;
        let found: FindScenesData = serde_json::from_value(data)?;

        if found.find_scenes.count == 0 {
            return Ok(None);
        }

        match found.find_scenes.scenes.into_iter().next() {
            Some(row) => {
                let tag_ids = row
                    .tags
                    .iter()
                    .map(|tag| id_string(&tag.id))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(Scene {
                    id: id_string(&row.id)?,
                    tag_ids,
                }))
            }
            None => Ok(None),
        }
    }

    async fn update_scene(&self, id: &str, tag_ids: Vec<String>) -> Result<()> {
        let variables = json!({ "input": { "id": id, "tag_ids": tag_ids } });
        self.execute(SCENE_UPDATE_MUTATION, Some(variables)).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
