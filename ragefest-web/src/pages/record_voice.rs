use crate::components::button::RageButton;
use crate::components::layout::Layout;
use crate::game::{BuddySelection, RecordingClock};
use crate::paths::media_src;
use yew::prelude::*;

/// Where the capture controls are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Ready,
    Recording,
    Recorded,
}

#[derive(Properties, PartialEq, Clone)]
pub struct RecordVoicePageProps {
    pub buddy: BuddySelection,
    pub placeholder: AttrValue,
    pub clock: RecordingClock,
    pub phase: CapturePhase,
    #[prop_or_default]
    pub is_playing: bool,
    pub on_start: Callback<()>,
    pub on_stop: Callback<()>,
    pub on_play: Callback<()>,
    pub on_record_again: Callback<()>,
    pub on_back: Callback<()>,
    pub on_continue: Callback<()>,
}

#[function_component(RecordVoicePage)]
pub fn record_voice_page(props: &RecordVoicePageProps) -> Html {
    let clock = props.clock;
    let onerror = {
        let placeholder = props.placeholder.clone();
        Callback::from(move |e: Event| {
            let img: web_sys::HtmlImageElement = e.target_unchecked_into();
            if img.src() != placeholder.as_str() {
                img.set_src(&placeholder);
            }
        })
    };

    let controls = match props.phase {
        CapturePhase::Ready => html! {
            <RageButton label="Start Recording" onclick={props.on_start.clone()} class="w-full" />
        },
        CapturePhase::Recording => html! {
            <RageButton label="Stop Recording" onclick={props.on_stop.clone()} class="w-full bg-red-600" />
        },
        CapturePhase::Recorded => html! {
            <div class="controls">
                <RageButton
                    label={if props.is_playing { "Playing..." } else { "Play Recording" }}
                    onclick={props.on_play.clone()}
                    disabled={props.is_playing}
                />
                <RageButton label="Record Again" outline=true onclick={props.on_record_again.clone()} />
            </div>
        },
    };

    html! {
        <Layout title="RECORD YOUR RAGE">
            <section class="rage-card record-voice">
                <h3>{ "Get Your Rage Out On:" }</h3>
                <div class="buddy-container buddy-thumb">
                    <img src={media_src(props.buddy.image_reference())} alt={props.buddy.display_label().to_string()} {onerror} />
                </div>
                <p class="muted">
                    { format!("Record your voice for up to {} seconds to add to your rage!", clock.limit_secs()) }
                </p>
                <div class="record-timer">{ format!("{}s / {}s", clock.elapsed_secs(), clock.limit_secs()) }</div>
                <div class="progress">
                    <div class="progress-indicator bg-rage" style={format!("width: {}%", clock.progress_pct())}></div>
                </div>
                { controls }
                <div class="controls">
                    <RageButton label="Back" outline=true onclick={props.on_back.clone()} />
                    <RageButton
                        label="Continue to Game"
                        onclick={props.on_continue.clone()}
                        disabled={props.phase == CapturePhase::Recording}
                    />
                </div>
            </section>
        </Layout>
    }
}
