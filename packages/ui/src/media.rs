//! Reading picked files and measuring videos in the UI.

use std::time::Duration;

use dioxus::prelude::*;
use store::MediaFile;

/// Video duration source for the current platform.
#[cfg(target_arch = "wasm32")]
pub type MediaDuration = browser::BrowserDuration;
#[cfg(not(target_arch = "wasm32"))]
pub type MediaDuration = store::Mp4Duration;

/// Read every file picked in an `<input type="file">` change event.
pub async fn read_picked_files(evt: &FormEvent) -> Vec<MediaFile> {
    let Some(engine) = evt.files() else {
        return Vec::new();
    };
    let mut files = Vec::new();
    for name in engine.files() {
        match engine.read_file(&name).await {
            Some(bytes) => {
                let mime = mime_guess::from_path(&name).first_or_octet_stream();
                files.push(MediaFile::new(name, mime.essence_str(), bytes));
            }
            None => tracing::warn!(file = %name, "could not read picked file"),
        }
    }
    files
}

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use store::{DurationSource, MediaFile, Mp4Duration};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlVideoElement, Url};

    /// Loads the file's metadata into an off-DOM `<video>` element.
    ///
    /// Falls back to reading the MP4 header when the browser can not decode
    /// the file.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct BrowserDuration;

    impl DurationSource for BrowserDuration {
        async fn duration_secs(&self, file: &MediaFile) -> Option<f64> {
            match video_duration(file).await {
                Some(secs) => Some(secs),
                None => Mp4Duration.duration_secs(file).await,
            }
        }
    }

    async fn video_duration(file: &MediaFile) -> Option<f64> {
        let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&file.mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
        let url = Url::create_object_url_with_blob(&blob).ok()?;

        let video: HtmlVideoElement = web_sys::window()?
            .document()?
            .create_element("video")
            .ok()?
            .dyn_into()
            .ok()?;
        video.set_preload("metadata");

        let (tx, rx) = oneshot::channel::<()>();
        let tx = Rc::new(RefCell::new(Some(tx)));
        let settle = move || {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut()>::new(move || {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(());
                }
            })
        };
        let on_loaded = settle();
        let on_error = settle();
        video.set_onloadedmetadata(Some(on_loaded.as_ref().unchecked_ref()));
        video.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        video.set_src(&url);

        let _ = rx.await;
        let secs = video.duration();

        video.set_onloadedmetadata(None);
        video.set_onerror(None);
        video.set_src("");
        let _ = Url::revoke_object_url(&url);

        secs.is_finite().then_some(secs)
    }
}
