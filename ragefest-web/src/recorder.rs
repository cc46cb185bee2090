//! Microphone capture through `MediaRecorder`.
use crate::dom::{js_error_message, window};
use crate::media::{MediaError, object_url_for};
use js_sys::{Array, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, MediaRecorder, MediaRecorderOptions, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, RecordingState,
};
use yew::Callback;

const LOG_TARGET: &str = "ragefest::recorder";
const CHUNK_INTERVAL_MS: i32 = 1000;
const PREFERRED_MIME: &str = "audio/webm";
const FALLBACK_MIME: &str = "audio/mp4";

/// Container type to request from the recorder.
#[must_use]
pub const fn pick_mime(webm_supported: bool) -> &'static str {
    if webm_supported {
        PREFERRED_MIME
    } else {
        FALLBACK_MIME
    }
}

/// A running capture. Must outlive the stop callback, which owns the take.
pub struct VoiceRecorder {
    recorder: MediaRecorder,
    _on_data: Closure<dyn FnMut(BlobEvent)>,
    _on_stop: Closure<dyn FnMut()>,
}

impl VoiceRecorder {
    /// Ask for the microphone and start recording.
    ///
    /// `on_finished` receives the object URL of the finished take once the
    /// recorder flushes after [`VoiceRecorder::stop`].
    ///
    /// # Errors
    ///
    /// Returns an error when the microphone is unavailable or permission is denied.
    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    pub async fn start(on_finished: Callback<String>) -> Result<Self, MediaError> {
        let stream = request_microphone().await?;
        let mime = pick_mime(MediaRecorder::is_type_supported(PREFERRED_MIME));
        let options = MediaRecorderOptions::new();
        options.set_mime_type(mime);
        let recorder =
            MediaRecorder::new_with_media_stream_and_media_recorder_options(&stream, &options)?;

        let chunks: Rc<RefCell<Vec<Blob>>> = Rc::default();
        let on_data = {
            let chunks = Rc::clone(&chunks);
            Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
                if let Some(blob) = event.data().filter(|blob| blob.size() > 0.0) {
                    chunks.borrow_mut().push(blob);
                }
            })
        };
        let on_stop = {
            let chunks = Rc::clone(&chunks);
            let stream = stream.clone();
            Closure::<dyn FnMut()>::new(move || {
                let parts: Vec<Blob> = chunks.borrow_mut().drain(..).collect();
                stop_tracks(&stream);
                match assemble(&parts, mime) {
                    Ok(url) => on_finished.emit(url),
                    Err(err) => log::warn!(target: LOG_TARGET, "could not finish take: {err}"),
                }
            })
        };
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));
        recorder.start_with_time_slice(CHUNK_INTERVAL_MS)?;
        log::debug!(target: LOG_TARGET, "recording started ({mime})");

        Ok(Self {
            recorder,
            _on_data: on_data,
            _on_stop: on_stop,
        })
    }

    /// Finish the take; the result arrives through the start callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is already inactive.
    pub fn stop(&self) -> Result<(), MediaError> {
        self.recorder.stop()?;
        log::debug!(target: LOG_TARGET, "recording stopped");
        Ok(())
    }
}

impl Drop for VoiceRecorder {
    /// Abandons an unfinished take and releases the microphone.
    fn drop(&mut self) {
        self.recorder.set_ondataavailable(None);
        self.recorder.set_onstop(None);
        if self.recorder.state() != RecordingState::Inactive {
            if let Err(err) = self.recorder.stop() {
                log::debug!(target: LOG_TARGET, "stop on drop failed: {}", js_error_message(&err));
            }
            stop_tracks(&self.recorder.stream());
            log::debug!(target: LOG_TARGET, "unfinished take abandoned");
        }
    }
}

#[allow(clippy::future_not_send)]
async fn request_microphone() -> Result<MediaStream, MediaError> {
    let devices = window()
        .ok_or(MediaError::Unavailable("window"))?
        .navigator()
        .media_devices()
        .map_err(|_| MediaError::Unavailable("microphone"))?;

    let audio = Object::new();
    Reflect::set(&audio, &"echoCancellation".into(), &JsValue::TRUE)?;
    Reflect::set(&audio, &"noiseSuppression".into(), &JsValue::TRUE)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&audio);

    let stream = JsFuture::from(devices.get_user_media_with_constraints(&constraints)?).await?;
    Ok(stream.dyn_into::<MediaStream>()?)
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn assemble(parts: &[Blob], mime: &str) -> Result<String, MediaError> {
    let sequence = parts.iter().collect::<Array>();
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    let blob = Blob::new_with_blob_sequence_and_options(&sequence, &bag)?;
    object_url_for(&blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_webm_when_supported() {
        assert_eq!(pick_mime(true), "audio/webm");
        assert_eq!(pick_mime(false), "audio/mp4");
    }
}
