#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use crate::toast::Toast;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod battle;
pub mod bootstrap;
pub mod routing;
pub mod state;
pub mod view;

pub use state::Session;

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <SessionRoot />
        </BrowserRouter>
    }
}

/// Owns the session for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
#[function_component(SessionRoot)]
fn session_root() -> Html {
    let session = state::use_session();
    let on_dismiss = {
        let session = session.clone();
        Callback::from(move |id: u32| session.dismiss(id))
    };
    html! {
        <>
            <AppInner session={session.clone()} />
            <Toast toasts={session.toasts()} {on_dismiss} />
        </>
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Properties, PartialEq)]
struct AppInnerProps {
    session: Session,
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
fn app_inner(props: &AppInnerProps) -> Html {
    let session = &props.session;
    let navigator = use_navigator();
    let route = use_route::<Route>();

    routing::use_route_guard(session, route.clone(), navigator.clone());

    let on_navigate = Callback::from(move |to: Route| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&to);
        }
    });
    view::render_screen(session, route.as_ref(), &on_navigate)
}
