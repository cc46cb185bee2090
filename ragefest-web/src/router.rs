use crate::game::Screen;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/select-buddy")]
    SelectBuddy,
    #[at("/record-voice")]
    RecordVoice,
    #[at("/play-game")]
    PlayGame,
    /// Legacy link; replaced by [`Route::PlayGame`] on arrival.
    #[at("/play-page")]
    PlayPage,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_screen(screen: Screen) -> Self {
        match screen {
            Screen::Home => Self::Home,
            Screen::SelectBuddy => Self::SelectBuddy,
            Screen::RecordVoice => Self::RecordVoice,
            Screen::Battle => Self::PlayGame,
            Screen::NotFound => Self::NotFound,
        }
    }

    #[must_use]
    pub const fn to_screen(&self) -> Screen {
        match self {
            Self::Home => Screen::Home,
            Self::SelectBuddy => Screen::SelectBuddy,
            Self::RecordVoice => Screen::RecordVoice,
            Self::PlayGame | Self::PlayPage => Screen::Battle,
            Self::NotFound => Screen::NotFound,
        }
    }

    /// Whether the route only exists to forward to its canonical path.
    #[must_use]
    pub const fn is_alias(&self) -> bool {
        matches!(self, Self::PlayPage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screens_round_trip_through_routes() {
        for screen in Screen::ALL {
            assert_eq!(Route::from_screen(screen).to_screen(), screen);
        }
    }

    #[test]
    fn legacy_path_is_an_alias_of_the_battle() {
        assert_eq!(Route::recognize("/play-page"), Some(Route::PlayPage));
        assert!(Route::PlayPage.is_alias());
        assert_eq!(Route::PlayPage.to_screen(), Screen::Battle);
        assert_eq!(Route::PlayGame.to_path(), Screen::Battle.path());
    }

    #[test]
    fn not_found_is_the_fallback_route() {
        assert_eq!(Route::not_found_route(), Some(Route::NotFound));
    }
}
