use crate::app::bootstrap;
use crate::game::{
    AttackCatalog, BuddyCatalog, BuddySelection, DamageOutcome, GameAction, GameContent,
    GameStore, GuardReason, HealthState, MediaHandle, MediaReleaser, Screen, SessionConfig,
    advance, on_enter,
};
use crate::media::BlobReleaser;
use crate::toast::{ToastAction, ToastKind, ToastQueue};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

pub type SessionStore = GameStore<BlobReleaser>;

const LOG_TARGET: &str = "ragefest::session";

/// The single session, handed to every screen as a prop.
///
/// The store sits behind `Rc<RefCell>` so every screen talks to the same
/// instance; `revision` mirrors the store's counter so consumers re-render
/// when it moves.
#[derive(Clone)]
pub struct Session {
    store: Rc<RefCell<SessionStore>>,
    content: Rc<GameContent>,
    attacks: Rc<AttackCatalog>,
    buddies: Rc<BuddyCatalog>,
    revision: UseStateHandle<u64>,
    toasts: UseReducerHandle<ToastQueue>,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
            && *self.revision == *other.revision
            && *self.toasts == *other.toasts
    }
}

#[hook]
pub fn use_session() -> Session {
    let content = use_memo((), |_| bootstrap::content());
    let store = {
        let content = Rc::clone(&content);
        use_mut_ref(move || bootstrap::new_store(&content.config, BlobReleaser))
    };
    let attacks = use_memo((), {
        let content = Rc::clone(&content);
        move |_| content.attacks.clone()
    });
    let buddies = use_memo((), {
        let content = Rc::clone(&content);
        move |_| content.buddies.clone()
    });
    Session {
        store,
        content,
        attacks,
        buddies,
        revision: use_state(|| 0_u64),
        toasts: use_reducer(ToastQueue::default),
    }
}

impl Session {
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.content.config
    }

    #[must_use]
    pub fn attacks(&self) -> Rc<AttackCatalog> {
        Rc::clone(&self.attacks)
    }

    #[must_use]
    pub fn buddies(&self) -> Rc<BuddyCatalog> {
        Rc::clone(&self.buddies)
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        *self.revision
    }

    #[must_use]
    pub fn buddy(&self) -> Option<BuddySelection> {
        self.store.borrow().buddy().cloned()
    }

    #[must_use]
    pub fn voice_reference(&self) -> Option<String> {
        self.store
            .borrow()
            .voice_recording()
            .map(|rec| rec.audio_reference().to_string())
    }

    #[must_use]
    pub fn health(&self) -> HealthState {
        *self.store.borrow().health_state()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.store.borrow().is_game_over()
    }

    /// Read the store without mutating it.
    pub fn with_store<T>(&self, read: impl FnOnce(&SessionStore) -> T) -> T {
        read(&*self.store.borrow())
    }

    /// Apply `action`; rejected actions surface as an error toast.
    pub fn dispatch(&self, action: GameAction) -> bool {
        let result = self.store.borrow_mut().dispatch(action);
        match result {
            Ok(changed) => {
                if changed {
                    self.sync();
                }
                changed
            }
            Err(err) => {
                log::warn!(target: LOG_TARGET, "action rejected: {err}");
                self.notify(ToastKind::Error, err.to_string());
                false
            }
        }
    }

    /// Apply the catalog attack `attack_id`.
    pub fn attack(&self, attack_id: &str) -> Option<DamageOutcome> {
        let attack = match self.attacks.find(attack_id) {
            Ok(attack) => attack.clone(),
            Err(err) => {
                log::warn!(target: LOG_TARGET, "{err}");
                return None;
            }
        };
        let outcome = self.store.borrow_mut().attack(&attack);
        match outcome {
            Ok(outcome) => {
                self.sync();
                Some(outcome)
            }
            Err(err) => {
                self.notify(ToastKind::Error, err.to_string());
                None
            }
        }
    }

    /// The "Continue" step from `from`; a refusal is shown as a toast.
    pub fn advance(&self, from: Screen) -> Option<Screen> {
        let next = advance(from, &*self.store.borrow());
        next.map_err(|reason: GuardReason| self.notify(ToastKind::Error, reason.message()))
            .ok()
    }

    /// Run the arrival side effects of `screen`.
    pub fn enter(&self, screen: Screen) {
        {
            let mut store = self.store.borrow_mut();
            on_enter(screen, &mut *store);
        }
        self.sync();
    }

    /// Free a handle that never made it into the store.
    pub fn discard(&self, handle: &str) {
        let in_use = self.with_store(|store| {
            store.buddy().map(BuddySelection::image_reference) == Some(handle)
                || store
                    .voice_recording()
                    .is_some_and(|rec| rec.audio_reference() == handle)
        });
        let local = MediaHandle::parse(handle).is_some_and(|h| h.is_local());
        if local && !in_use {
            self.store.borrow().releaser().release(handle);
        }
    }

    pub fn notify(&self, kind: ToastKind, message: impl Into<AttrValue>) {
        self.toasts.dispatch(ToastAction::Push(kind, message.into()));
    }

    pub fn dismiss(&self, id: u32) {
        self.toasts.dispatch(ToastAction::Dismiss(id));
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<crate::toast::ToastItem> {
        self.toasts.items().to_vec()
    }

    fn sync(&self) {
        let revision = self.store.borrow().revision();
        if revision != *self.revision {
            log::debug!(target: LOG_TARGET, "revision {revision}");
            self.revision.set(revision);
        }
    }
}
