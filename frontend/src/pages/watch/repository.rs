use crate::api::{ApiClient, ApiError, VideoResponse};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use uuid::Uuid;

/// Outcome of opening the watch page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WatchState {
    Ready { video: VideoResponse, stream_url: String },
    /// Not the owner and not purchased.
    Denied,
}

#[derive(Clone)]
pub struct WatchRepository {
    client: Rc<ApiClient>,
}

impl WatchRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    /// Loads the video and a signed stream URL. Owners skip the purchase
    /// check; everyone else needs access, and a 403 on the stream is
    /// treated the same as a missing purchase.
    pub async fn open(&self, id: Uuid, viewer_id: Option<String>) -> Result<WatchState, ApiError> {
        let video = self.client.get_video(id).await?;
        let is_owner = viewer_id
            .map(|viewer| viewer.eq_ignore_ascii_case(&video.creator_id.to_string()))
            .unwrap_or(false);
        if !is_owner && !self.client.check_access(id).await?.has_access {
            return Ok(WatchState::Denied);
        }
        match self.client.stream_url(id).await {
            Ok(stream_url) => Ok(WatchState::Ready { video, stream_url }),
            Err(err) if err.is_forbidden() => Ok(WatchState::Denied),
            Err(err) => Err(err),
        }
    }

    /// A fresh signed URL for the same video, `None` if the backend says no.
    pub async fn renew(&self, id: Uuid) -> Option<String> {
        match self.client.stream_url(id).await {
            Ok(url) => Some(url),
            Err(err) => {
                log::warn!("Stream URL renewal for {} failed: {}", id, err);
                None
            }
        }
    }
}
