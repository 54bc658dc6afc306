use std::rc::Rc;

use thiserror::Error;
use uuid::Uuid;

use super::{
    client::{parse_json, ApiClient, ApiResponse},
    types::{ApiError, VideoResponse},
};
use crate::{
    config::{ACCEPTED_VIDEO_TYPES, MAX_UPLOAD_BYTES},
    utils::format::format_file_size,
};

/// Receives upload progress as a whole percentage.
pub type ProgressCallback = Rc<dyn Fn(u32)>;

/// A file picked for upload. In the browser it wraps the DOM `File`; the
/// host build carries the bytes so the multipart path can run in tests.
#[derive(Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    #[cfg(target_arch = "wasm32")]
    pub handle: web_sys::File,
    #[cfg(not(target_arch = "wasm32"))]
    pub bytes: Vec<u8>,
}

impl UploadFile {
    #[cfg(target_arch = "wasm32")]
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
            handle: file,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_bytes(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No file selected")]
    Missing,
    #[error("The selected file is empty")]
    Empty,
    #[error("Unsupported file type \"{0}\". Use MP4, MOV, WebM or AVI.")]
    UnsupportedType(String),
    #[error("File is too large ({}). Maximum size is {}.", size_label(.0), format_file_size(MAX_UPLOAD_BYTES))]
    TooLarge(u64),
}

fn size_label(bytes: &u64) -> String {
    format_file_size(*bytes)
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        ApiError::validation(rejection.to_string())
    }
}

/// Client-side checks run before anything is sent. The backend re-checks.
pub fn validate_upload(file: Option<&UploadFile>) -> Result<(), UploadRejection> {
    let file = file.ok_or(UploadRejection::Missing)?;
    if !ACCEPTED_VIDEO_TYPES.contains(&file.mime.as_str()) {
        return Err(UploadRejection::UnsupportedType(file.mime.clone()));
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge(file.size));
    }
    if file.size == 0 {
        return Err(UploadRejection::Empty);
    }
    Ok(())
}

impl ApiClient {
    /// `PUT /videos/{id}/upload` as multipart field `file`, reporting
    /// progress through `on_progress`.
    pub async fn upload_video(
        &self,
        id: Uuid,
        file: &UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<VideoResponse, ApiError> {
        validate_upload(Some(file))?;
        let url = format!("{}/videos/{}/upload", self.resolved_base_url().await, id);
        log::info!("Uploading {} ({})", file.name, format_file_size(file.size));

        on_progress(0);
        let response = self
            .with_refresh(|| self.send_upload(&url, file, on_progress.clone()))
            .await?;
        let video = parse_json(response).await?;
        on_progress(100);
        Ok(video)
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_upload(
        &self,
        url: &str,
        file: &UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<ApiResponse, ApiError> {
        xhr::put_multipart(url, self.bearer_header(), file, on_progress).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send_upload(
        &self,
        url: &str,
        file: &UploadFile,
        _on_progress: ProgressCallback,
    ) -> Result<ApiResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| ApiError::validation(format!("Invalid file type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);
        self.dispatch(self.authorized(self.http_client().put(url).multipart(form)))
            .await
    }
}

// reqwest cannot report upload progress in the browser, so the upload goes
// through XMLHttpRequest and the buffered result rejoins the pipeline.
#[cfg(target_arch = "wasm32")]
mod xhr {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use reqwest::StatusCode;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{FormData, ProgressEvent, XmlHttpRequest};

    use super::{ApiError, ApiResponse, ProgressCallback, UploadFile};

    fn js_error(context: &str, err: JsValue) -> ApiError {
        ApiError::request_failed(format!("{}: {:?}", context, err))
    }

    pub(super) async fn put_multipart(
        url: &str,
        bearer: Option<String>,
        file: &UploadFile,
        on_progress: ProgressCallback,
    ) -> Result<ApiResponse, ApiError> {
        let xhr = XmlHttpRequest::new().map_err(|e| js_error("Upload unavailable", e))?;
        xhr.open_with_async("PUT", url, true)
            .map_err(|e| js_error("Upload failed", e))?;
        if let Some(bearer) = bearer {
            xhr.set_request_header("Authorization", &bearer)
                .map_err(|e| js_error("Upload failed", e))?;
        }

        let form = FormData::new().map_err(|e| js_error("Upload failed", e))?;
        form.append_with_blob_and_filename("file", &file.handle, &file.name)
            .map_err(|e| js_error("Upload failed", e))?;

        let (tx, rx) = oneshot::channel::<Result<(), ApiError>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            if event.length_computable() && event.total() > 0.0 {
                let percent = (event.loaded() / event.total() * 100.0).round();
                on_progress(percent.clamp(0.0, 100.0) as u32);
            }
        });
        let loaded = {
            let tx = tx.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Ok(()));
                }
            })
        };
        let failed = {
            let tx = tx.clone();
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(ApiError::request_failed("Upload failed: network error")));
                }
            })
        };

        let upload = xhr.upload().map_err(|e| js_error("Upload failed", e))?;
        upload.set_onprogress(Some(progress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(loaded.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(failed.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(failed.as_ref().unchecked_ref()));
        xhr.send_with_opt_form_data(Some(&form))
            .map_err(|e| js_error("Upload failed", e))?;

        let outcome = rx
            .await
            .unwrap_or_else(|_| Err(ApiError::request_failed("Upload interrupted")));
        upload.set_onprogress(None);
        xhr.set_onload(None);
        xhr.set_onerror(None);
        xhr.set_onabort(None);
        outcome?;

        let status = xhr.status().map_err(|e| js_error("Upload failed", e))?;
        let body = xhr
            .response_text()
            .map_err(|e| js_error("Upload failed", e))?
            .unwrap_or_default();
        Ok(ApiResponse::Buffered {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        })
    }
}
