//! Browser media glue: object-URL lifetime, sound playback and the
//! synthesized fallback tone.
use crate::dom::{console_error, js_error_message};
use crate::game::{Attack, MediaReleaser, ToneSpec};
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, Blob, HtmlAudioElement, OscillatorType, Url};

const LOG_TARGET: &str = "ragefest::media";
/// Gain the fallback tone decays to; exponential ramps cannot reach zero.
const TONE_FLOOR_GAIN: f32 = 0.01;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("{0} is not available in this browser")]
    Unavailable(&'static str),
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for MediaError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// Revokes object URLs handed back by the session store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobReleaser;

impl MediaReleaser for BlobReleaser {
    fn release(&self, handle: &str) {
        match Url::revoke_object_url(handle) {
            Ok(()) => log::debug!(target: LOG_TARGET, "revoked {handle}"),
            Err(err) => {
                let message = js_error_message(&err);
                log::warn!(target: LOG_TARGET, "failed to revoke {handle}: {message}");
            }
        }
    }
}

/// Mint a local handle for `blob`. The session store owns it from then on.
///
/// # Errors
///
/// Returns an error if the browser refuses to create the URL.
pub fn object_url_for(blob: &Blob) -> Result<String, MediaError> {
    Ok(Url::create_object_url_with_blob(blob)?)
}

/// Timeline of one fallback tone, in audio-context seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSchedule {
    pub start: f64,
    pub stop: f64,
    pub frequency_hz: f32,
    pub gain: f32,
}

#[must_use]
pub fn tone_schedule(spec: &ToneSpec, now: f64) -> ToneSchedule {
    ToneSchedule {
        start: now,
        stop: now + f64::from(spec.duration_ms) / 1000.0,
        frequency_hz: spec.frequency_hz,
        gain: spec.gain.max(TONE_FLOOR_GAIN),
    }
}

/// Play a short square-wave tone through a fresh audio context.
///
/// # Errors
///
/// Returns an error if Web Audio is unavailable or any node fails to connect.
pub fn play_tone(spec: &ToneSpec) -> Result<(), MediaError> {
    let ctx = AudioContext::new().map_err(|_| MediaError::Unavailable("Web Audio"))?;
    let schedule = tone_schedule(spec, ctx.current_time());
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;

    oscillator.set_type(OscillatorType::Square);
    oscillator
        .frequency()
        .set_value_at_time(schedule.frequency_hz, schedule.start)?;
    gain.gain().set_value_at_time(schedule.gain, schedule.start)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(TONE_FLOOR_GAIN, schedule.stop)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    oscillator.start_with_when(schedule.start)?;
    oscillator.stop_with_when(schedule.stop)?;
    Ok(())
}

/// Load and play `url` at `volume` (0.0 to 1.0).
///
/// # Errors
///
/// Returns an error if the element cannot be created or playback is refused.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn play_url(url: &str, volume: f32) -> Result<HtmlAudioElement, MediaError> {
    let audio = HtmlAudioElement::new_with_src(url)?;
    audio.set_volume(f64::from(volume.clamp(0.0, 1.0)));
    JsFuture::from(audio.play()?).await?;
    Ok(audio)
}

/// Fire-and-forget attack sound, falling back to the attack's tone.
pub fn play_attack_sound(attack: &Attack, volume: f32) {
    let sound = attack.sound.clone();
    let tone = attack.fallback_tone;
    let id = attack.id.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = play_url(&sound, volume).await {
            log::debug!(target: LOG_TARGET, "{id} sound failed ({err}), using fallback tone");
            if let Err(err) = play_tone(&tone) {
                log::warn!(target: LOG_TARGET, "fallback tone failed: {err}");
            }
        }
    });
}

/// Fire-and-forget playback of a single clip; failures reach the console.
pub fn play_clip(url: &str, volume: f32) {
    let url = url.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = play_url(&url, volume).await {
            console_error(&format!("Error playing {url}: {err}"));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_schedule_spans_the_duration() {
        let kick = ToneSpec {
            frequency_hz: 80.0,
            gain: 0.4,
            duration_ms: 400,
        };
        let schedule = tone_schedule(&kick, 2.0);
        assert!((schedule.start - 2.0).abs() < f64::EPSILON);
        assert!((schedule.stop - 2.4).abs() < 1e-9);
        assert!((schedule.gain - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn silent_tone_still_ramps_from_the_floor() {
        let spec = ToneSpec {
            gain: 0.0,
            ..ToneSpec::default()
        };
        let schedule = tone_schedule(&spec, 0.0);
        assert!((schedule.gain - TONE_FLOOR_GAIN).abs() < f32::EPSILON);
    }

    #[test]
    fn media_errors_render_their_cause() {
        assert_eq!(
            MediaError::Unavailable("MediaRecorder").to_string(),
            "MediaRecorder is not available in this browser"
        );
    }
}
