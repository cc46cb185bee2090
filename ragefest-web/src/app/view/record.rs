use super::{ScreenProps, continue_from, go_to};
use crate::game::{ClockTick, GameAction, Screen};
use crate::media::play_url;
use crate::pages::record_voice::{CapturePhase, RecordVoicePage};
use crate::recorder::VoiceRecorder;
use crate::toast::ToastKind;
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use std::rc::Rc;
use yew::prelude::*;

const LOG_TARGET: &str = "ragefest::recorder";
const TICK_MS: u32 = 1_000;
const MSG_MIC_DENIED: &str =
    "Could not access microphone. Please allow microphone access and try again.";

#[function_component(RecordVoiceScreen)]
pub fn record_voice_screen(props: &ScreenProps) -> Html {
    let session = props.session.clone();
    let clock = use_mut_ref({
        let clock = session.config().recording_clock();
        move || clock
    });
    let recorder = use_mut_ref(|| None::<VoiceRecorder>);
    let ticker = use_mut_ref(|| None::<Interval>);
    let playback = use_mut_ref(|| None::<EventListener>);
    let redraw = use_force_update();
    let phase = use_state({
        let recorded = session.voice_reference().is_some();
        move || {
            if recorded {
                CapturePhase::Recorded
            } else {
                CapturePhase::Ready
            }
        }
    });
    let is_playing = use_state(|| false);

    {
        let recorder = Rc::clone(&recorder);
        let ticker = Rc::clone(&ticker);
        use_effect_with((), move |_| {
            move || {
                ticker.borrow_mut().take();
                recorder.borrow_mut().take();
            }
        });
    }

    let on_stop = {
        let recorder = Rc::clone(&recorder);
        let ticker = Rc::clone(&ticker);
        Callback::from(move |()| {
            ticker.borrow_mut().take();
            if let Some(active) = recorder.borrow().as_ref() {
                if let Err(err) = active.stop() {
                    log::warn!(target: LOG_TARGET, "stop failed: {err}");
                }
            }
        })
    };

    let on_finished = {
        let session = session.clone();
        let phase = phase.clone();
        Callback::from(move |url: String| {
            session.dispatch(GameAction::SetVoiceRecording(url));
            phase.set(CapturePhase::Recorded);
            session.notify(ToastKind::Success, "Recording completed!");
        })
    };

    let on_start = {
        let session = session.clone();
        let recorder = Rc::clone(&recorder);
        let ticker = Rc::clone(&ticker);
        let clock = Rc::clone(&clock);
        let phase = phase.clone();
        let redraw = redraw.clone();
        let on_stop = on_stop.clone();
        Callback::from(move |()| {
            let session = session.clone();
            let recorder = Rc::clone(&recorder);
            let ticker = Rc::clone(&ticker);
            let clock = Rc::clone(&clock);
            let phase = phase.clone();
            let redraw = redraw.clone();
            let on_stop = on_stop.clone();
            let on_finished = on_finished.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match VoiceRecorder::start(on_finished).await {
                    Ok(active) => {
                        *recorder.borrow_mut() = Some(active);
                        clock.borrow_mut().reset();
                        let limit = clock.borrow().limit_secs();
                        let interval = Interval::new(TICK_MS, move || {
                            let tick = clock.borrow_mut().tick();
                            redraw.force_update();
                            if tick == ClockTick::LimitReached {
                                // Stopping drops this interval; leave its callback first.
                                let on_stop = on_stop.clone();
                                wasm_bindgen_futures::spawn_local(async move { on_stop.emit(()) });
                            }
                        });
                        *ticker.borrow_mut() = Some(interval);
                        phase.set(CapturePhase::Recording);
                        session.notify(
                            ToastKind::Success,
                            format!("Recording started! Speak for up to {limit} seconds."),
                        );
                    }
                    Err(err) => {
                        log::error!(target: LOG_TARGET, "microphone unavailable: {err}");
                        crate::dom::console_error(&format!("Error accessing microphone: {err}"));
                        session.notify(ToastKind::Error, MSG_MIC_DENIED);
                    }
                }
            });
        })
    };

    let on_play = {
        let session = session.clone();
        let is_playing = is_playing.clone();
        let playback = Rc::clone(&playback);
        Callback::from(move |()| {
            let Some(url) = session.voice_reference() else {
                return;
            };
            let volume = session.config().playback_volume;
            let session = session.clone();
            let is_playing = is_playing.clone();
            let playback = Rc::clone(&playback);
            wasm_bindgen_futures::spawn_local(async move {
                match play_url(&url, volume).await {
                    Ok(audio) => {
                        is_playing.set(true);
                        let done = is_playing.clone();
                        *playback.borrow_mut() =
                            Some(EventListener::once(&audio, "ended", move |_| done.set(false)));
                    }
                    Err(err) => {
                        crate::dom::console_error(&format!("Error playing audio: {err}"));
                        session.notify(ToastKind::Error, "Could not play recording");
                    }
                }
            });
        })
    };

    let on_record_again = {
        let session = session.clone();
        let clock = Rc::clone(&clock);
        let phase = phase.clone();
        Callback::from(move |()| {
            session.dispatch(GameAction::ClearVoiceRecording);
            clock.borrow_mut().reset();
            phase.set(CapturePhase::Ready);
            session.notify(ToastKind::Info, "Recording cleared. You can record again.");
        })
    };

    let Some(buddy) = session.buddy() else {
        return Html::default();
    };
    let clock = *clock.borrow();
    html! {
        <RecordVoicePage
            {buddy}
            placeholder={AttrValue::from(session.config().placeholder_image.clone())}
            {clock}
            phase={*phase}
            is_playing={*is_playing}
            {on_start}
            {on_stop}
            {on_play}
            {on_record_again}
            on_back={go_to(&props.on_navigate, Screen::RecordVoice.back())}
            on_continue={continue_from(&session, &props.on_navigate, Screen::RecordVoice)}
        />
    }
}
