use crate::game::{GameContent, GameEngine, GameStore, MediaReleaser, SessionConfig};
use once_cell::sync::Lazy;

static BUNDLED: Lazy<GameContent> = Lazy::new(load_content);

fn load_content() -> GameContent {
    match GameEngine::default().content() {
        Ok(content) => content,
        Err(err) => {
            log::warn!(target: "ragefest::bootstrap", "bundled content rejected: {err:#}");
            crate::dom::console_error(&format!("Error loading game content: {err:#}"));
            GameContent::default()
        }
    }
}

/// Validated bundled content, parsed once per page load.
#[must_use]
pub fn content() -> GameContent {
    BUNDLED.clone()
}

/// Session store for `config`, falling back to default health when the
/// config cannot size one.
pub fn new_store<R: MediaReleaser + Copy>(config: &SessionConfig, releaser: R) -> GameStore<R> {
    GameStore::from_config(config, releaser).unwrap_or_else(|err| {
        log::warn!(target: "ragefest::bootstrap", "{err}; using default health");
        GameStore::with_releaser(releaser)
    })
}
