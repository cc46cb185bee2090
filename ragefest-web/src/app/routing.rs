#[cfg(any(target_arch = "wasm32", test))]
use crate::game::{GameStore, GuardOutcome, MediaReleaser, Screen, guard};
#[cfg(any(target_arch = "wasm32", test))]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use crate::{app::state::Session, toast::ToastKind};
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

/// What the router should do with an incoming route.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Show(Screen),
    Redirect {
        to: Route,
        message: Option<&'static str>,
        /// Zero for an immediate redirect.
        delay_ms: u32,
    },
}

/// Resolve `route` against the store. Only the battle screen waits
/// `grace_ms` before bouncing.
#[cfg(any(target_arch = "wasm32", test))]
pub fn decide<R: MediaReleaser>(
    route: &Route,
    store: &GameStore<R>,
    grace_ms: u32,
) -> RouteDecision {
    let screen = route.to_screen();
    if route.is_alias() {
        return RouteDecision::Redirect {
            to: Route::from_screen(screen),
            message: None,
            delay_ms: 0,
        };
    }
    match guard(screen, store) {
        GuardOutcome::Allow => RouteDecision::Show(screen),
        GuardOutcome::Redirect { to, reason } => RouteDecision::Redirect {
            to: Route::from_screen(to),
            message: Some(reason.message()),
            delay_ms: if screen == Screen::Battle { grace_ms } else { 0 },
        },
    }
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_route_guard(session: &Session, route: Option<Route>, navigator: Option<Navigator>) {
    let session = session.clone();
    use_effect_with(route, move |route| {
        let mut pending = None;
        if let (Some(route), Some(nav)) = (route.as_ref(), navigator) {
            let grace = session.config().guard_grace_ms;
            match session.with_store(|store| decide(route, store, grace)) {
                RouteDecision::Show(screen) => session.enter(screen),
                RouteDecision::Redirect {
                    to,
                    message,
                    delay_ms,
                } => {
                    let redirect = move || {
                        if let Some(message) = message {
                            session.notify(ToastKind::Error, message);
                        }
                        nav.replace(&to);
                    };
                    if delay_ms == 0 {
                        redirect();
                    } else {
                        pending = Some(gloo::timers::callback::Timeout::new(delay_ms, redirect));
                    }
                }
            }
        }
        move || drop(pending)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BuddySelection, constants::MSG_SELECT_BUDDY_FIRST};

    #[test]
    fn legacy_battle_path_redirects_immediately() {
        let store = GameStore::detached();
        assert_eq!(
            decide(&Route::PlayPage, &store, 500),
            RouteDecision::Redirect {
                to: Route::PlayGame,
                message: None,
                delay_ms: 0
            }
        );
    }

    #[test]
    fn battle_without_buddy_bounces_home_after_grace() {
        let store = GameStore::detached();
        assert_eq!(
            decide(&Route::PlayGame, &store, 500),
            RouteDecision::Redirect {
                to: Route::Home,
                message: Some(MSG_SELECT_BUDDY_FIRST),
                delay_ms: 500
            }
        );
        assert_eq!(
            decide(&Route::RecordVoice, &store, 500),
            RouteDecision::Redirect {
                to: Route::SelectBuddy,
                message: Some(MSG_SELECT_BUDDY_FIRST),
                delay_ms: 0
            }
        );
    }

    #[test]
    fn open_screens_are_shown() {
        let mut store = GameStore::detached();
        assert_eq!(decide(&Route::Home, &store, 0), RouteDecision::Show(Screen::Home));
        assert_eq!(
            decide(&Route::NotFound, &store, 0),
            RouteDecision::Show(Screen::NotFound)
        );
        store.set_buddy(BuddySelection::new("buddy-1", "https://x/a.png", "A").unwrap());
        assert_eq!(
            decide(&Route::PlayGame, &store, 500),
            RouteDecision::Show(Screen::Battle)
        );
    }
}
