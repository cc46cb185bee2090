use crate::components::button::RageButton;
use crate::components::layout::Layout;
use yew::prelude::*;

/// Not-found page for paths that match no screen.
#[derive(Properties, PartialEq)]
pub struct Props {
    pub path: AttrValue,
    pub on_go_home: Callback<()>,
}

#[function_component(NotFound)]
pub fn not_found(props: &Props) -> Html {
    use_effect_with(props.path.clone(), |path| {
        let message = format!("404 Error: User attempted to access non-existent route: {path}");
        log::error!(target: "ragefest::navigation", "{message}");
        crate::dom::console_error(&message);
    });

    html! {
        <Layout>
            <section class="rage-card not-found" aria-live="assertive">
                <h1 class="text-rage-danger">{ "404" }</h1>
                <p>{ "Buddy Not Found!" }</p>
                <RageButton label="Return to Home" onclick={props.on_go_home.clone()} />
            </section>
        </Layout>
    }
}
