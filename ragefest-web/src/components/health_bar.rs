use crate::game::{HealthBand, HealthState};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub health: HealthState,
}

const fn band_class(band: HealthBand) -> &'static str {
    match band {
        HealthBand::Healthy => "bg-green-500",
        HealthBand::Wounded => "bg-yellow-500",
        HealthBand::Critical => "bg-rage-danger",
    }
}

/// Health counter, status label and colored progress bar.
#[function_component(HealthBar)]
pub fn health_bar(props: &Props) -> Html {
    let health = props.health;
    let pct = health.percent();
    let label = health.status_label();
    let label_class = if label.is_some() {
        "text-rage-danger font-bold"
    } else {
        "text-muted-foreground"
    };
    html! {
        <div class="health-bar">
            <div class="health-bar-header">
                <span class="health-count">{ format!("{} / {}", health.current(), health.maximum()) }</span>
                <span class={classes!("health-label", label_class)}>{ label.unwrap_or_default() }</span>
            </div>
            <div class="progress" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={pct.to_string()}>
                <div class={classes!("progress-indicator", band_class(health.band()))} style={format!("width: {pct}%")}></div>
            </div>
        </div>
    }
}
