mod battle;
mod record;
mod select;

pub use battle::BattleScreen;
pub use record::RecordVoiceScreen;
pub use select::SelectBuddyScreen;

use crate::app::state::Session;
use crate::game::Screen;
use crate::pages::home::HomePage;
use crate::pages::not_found::NotFound;
use crate::router::Route;
use yew::prelude::*;
use yew_router::Routable;

/// Props shared by every screen: the session plus a way to move on.
#[derive(Properties, PartialEq, Clone)]
pub struct ScreenProps {
    pub session: Session,
    pub on_navigate: Callback<Route>,
}

/// Callback that sends the player to `screen`.
pub(crate) fn go_to(on_navigate: &Callback<Route>, screen: Screen) -> Callback<()> {
    let on_navigate = on_navigate.clone();
    Callback::from(move |()| on_navigate.emit(Route::from_screen(screen)))
}

/// Callback for a screen's "Continue" button; refusals stay on screen.
pub(crate) fn continue_from(
    session: &Session,
    on_navigate: &Callback<Route>,
    from: Screen,
) -> Callback<()> {
    let session = session.clone();
    let on_navigate = on_navigate.clone();
    Callback::from(move |()| {
        if let Some(next) = session.advance(from) {
            on_navigate.emit(Route::from_screen(next));
        }
    })
}

pub fn render_screen(
    session: &Session,
    route: Option<&Route>,
    on_navigate: &Callback<Route>,
) -> Html {
    let session = session.clone();
    let on_navigate = on_navigate.clone();
    match route.map_or(Screen::NotFound, Route::to_screen) {
        Screen::Home => html! {
            <HomePage on_begin={continue_from(&session, &on_navigate, Screen::Home)} />
        },
        Screen::SelectBuddy => html! { <SelectBuddyScreen {session} {on_navigate} /> },
        Screen::RecordVoice => html! { <RecordVoiceScreen {session} {on_navigate} /> },
        Screen::Battle => html! { <BattleScreen {session} {on_navigate} /> },
        Screen::NotFound => {
            let path = crate::dom::current_path().unwrap_or_else(|| Route::NotFound.to_path());
            html! {
                <NotFound path={AttrValue::from(path)} on_go_home={go_to(&on_navigate, Screen::Home)} />
            }
        }
    }
}
