//! Operation dispatch.
//!
//! A mode string from the input envelope selects exactly one operation.
//! Operations run in a single pass with no retries; the first failure
//! propagates unmodified to the protocol boundary.

use std::time::Duration;

use crate::logger::ProgressSink;
use scenetag_client::RemoteApi;
use scenetag_core::{Error, Result};

/// Name of the tag these operations manage on the remote.
pub const MANAGED_TAG: &str = "Spotlight";

const LONG_TASK_STEPS: u32 = 100;

/// Pause between steps of the simulated tasks.
const STEP_PAUSE: Duration = Duration::from_secs(1);

/// The closed set of operations a plugin invocation can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Attach the managed tag to a random scene (the default).
    Add,
    /// Destroy the managed tag if it exists.
    Remove,
    /// Bounded simulated long-running task with progress reporting.
    Long,
    /// Unbounded task exercising the host's cancellation path.
    Indef,
}

impl Mode {
    /// Parse the mode string from the input envelope.
    ///
    /// An absent or empty mode selects the default operation. An
    /// unrecognized mode is a reported error, never a silent success.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "" | "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "long" => Ok(Self::Long),
            "indef" => Ok(Self::Indef),
            other => Err(Error::malformed_input(format!(
                "unrecognized mode {other:?}"
            ))),
        }
    }
}

/// Run one operation to completion.
pub async fn dispatch(
    mode: Mode,
    api: &dyn RemoteApi,
    progress: &dyn ProgressSink,
) -> Result<()> {
    match mode {
        Mode::Add => add_tag(api).await,
        Mode::Remove => remove_tag(api).await,
        Mode::Long => long_task(progress).await,
        Mode::Indef => indefinite_task().await,
    }
}

async fn add_tag(api: &dyn RemoteApi) -> Result<()> {
    let tag_id = match api.find_tag_id(MANAGED_TAG).await? {
        Some(id) => id,
        None => api.create_tag(MANAGED_TAG).await?,
    };

    let scene = api
        .find_random_scene()
        .await?
        .ok_or_else(|| Error::no_target("no scenes to add the tag to"))?;

    // Remove any existing occurrence first so the id lands exactly once.
    let mut tag_ids = scene.tag_ids;
    tag_ids.retain(|id| *id != tag_id);
    tag_ids.push(tag_id);

    log::info!("adding tag to scene {}", scene.id);
    api.update_scene(&scene.id, tag_ids).await
}

async fn remove_tag(api: &dyn RemoteApi) -> Result<()> {
    match api.find_tag_id(MANAGED_TAG).await? {
        None => {
            log::info!("tag does not exist, nothing to remove");
            Ok(())
        }
        Some(id) => {
            log::info!("destroying tag");
            api.destroy_tag(&id).await
        }
    }
}

async fn long_task(progress: &dyn ProgressSink) -> Result<()> {
    log::info!("doing long task");
    for step in 1..=LONG_TASK_STEPS {
        tokio::time::sleep(STEP_PAUSE).await;
        progress.report(f64::from(step) / f64::from(LONG_TASK_STEPS));
    }
    Ok(())
}

async fn indefinite_task() -> Result<()> {
    log::warn!("sleeping indefinitely");
    // No success path: the host cancels the process externally.
    loop {
        tokio::time::sleep(STEP_PAUSE).await;
    }
}
