use crate::components::button::RageButton;
use crate::components::layout::Layout;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HomePageProps {
    pub on_begin: Callback<()>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    html! {
        <Layout>
            <section class="rage-card home-card">
                <h1 class="title-gradient">{ "BUDDY BEAT" }</h1>
                <h2 class="subtitle">{ "RAGE FEST" }</h2>
                <p class="muted">{ "Upload a buddy. Record your rage. Beat the frustration out!" }</p>
                <RageButton label="BEGIN RAGE" onclick={props.on_begin.clone()} class="w-full animate-pulse-rage" />
            </section>
            <p class="footnote">{ "Unleash your frustration, virtually!" }</p>
        </Layout>
    }
}
