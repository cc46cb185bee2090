use super::{ScreenProps, continue_from, go_to};
use crate::app::state::Session;
use crate::game::constants::{MSG_SELECT_OR_UPLOAD, UPLOADED_BUDDY_ID};
use crate::game::numbers::whole_bytes;
use crate::game::{GameAction, GameError, Screen};
use crate::media::object_url_for;
use crate::pages::select_buddy::{SelectBuddyPage, upload_too_large_message};
use crate::toast::ToastKind;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::File;
use yew::prelude::*;

const LOG_TARGET: &str = "ragefest::session";

/// Picking happens locally; the store only hears about the buddy on Continue.
#[function_component(SelectBuddyScreen)]
pub fn select_buddy_screen(props: &ScreenProps) -> Html {
    let session = props.session.clone();
    let committed = session.buddy();
    let selected = use_state({
        let id = committed.as_ref().map(|b| AttrValue::from(b.id().to_string()));
        move || id
    });
    // Upload preview; a committed upload is shown again when coming back.
    let uploaded = use_state({
        let src = committed
            .as_ref()
            .filter(|b| b.id() == UPLOADED_BUDDY_ID)
            .map(|b| b.image_reference().to_string());
        move || src
    });
    // Upload not yet handed to the store; discarded on unmount.
    let pending = use_mut_ref(|| None::<String>);

    {
        let session = session.clone();
        let pending = Rc::clone(&pending);
        use_effect_with((), move |_| {
            move || {
                if let Some(handle) = pending.borrow_mut().take() {
                    session.discard(&handle);
                }
            }
        });
    }

    let on_pick = {
        let selected = selected.clone();
        Callback::from(move |id: AttrValue| selected.set(Some(id)))
    };

    let on_upload = {
        let session = session.clone();
        let selected = selected.clone();
        let uploaded = uploaded.clone();
        let pending = Rc::clone(&pending);
        Callback::from(move |file: File| {
            accept_upload(&session, &file, &pending, &uploaded, &selected);
        })
    };

    let on_continue = {
        let session = session.clone();
        let selected = selected.clone();
        let uploaded = uploaded.clone();
        let pending = Rc::clone(&pending);
        let advance = continue_from(&session, &props.on_navigate, Screen::SelectBuddy);
        Callback::from(move |()| {
            let choice = match selected.as_deref() {
                Some(UPLOADED_BUDDY_ID) => (*uploaded).as_deref().map(|handle| {
                    session.config().upload_policy().uploaded_selection(handle)
                }),
                Some(id) => Some(session.buddies().selection(id)),
                None => None,
            };
            match choice {
                Some(Ok(selection)) => {
                    if selection.id() == UPLOADED_BUDDY_ID {
                        // The store owns the upload from here on.
                        pending.borrow_mut().take();
                    }
                    session.dispatch(GameAction::SetBuddy(selection));
                    advance.emit(());
                }
                Some(Err(err)) => session.notify(ToastKind::Error, err.to_string()),
                None => session.notify(ToastKind::Error, MSG_SELECT_OR_UPLOAD),
            }
        })
    };

    html! {
        <SelectBuddyPage
            buddies={session.buddies()}
            selected_id={(*selected).clone()}
            uploaded_src={(*uploaded).clone().map(AttrValue::from)}
            upload_limit_bytes={session.config().upload_max_bytes}
            {on_pick}
            {on_upload}
            on_back={go_to(&props.on_navigate, Screen::SelectBuddy.back())}
            {on_continue}
        />
    }
}

fn accept_upload(
    session: &Session,
    file: &File,
    pending: &Rc<RefCell<Option<String>>>,
    uploaded: &UseStateHandle<Option<String>>,
    selected: &UseStateHandle<Option<AttrValue>>,
) {
    let policy = session.config().upload_policy();
    if let Err(err) = policy.validate(whole_bytes(file.size()), &file.type_()) {
        log::info!(target: LOG_TARGET, "upload refused: {err}");
        let message = match err {
            GameError::UploadTooLarge { max, .. } => upload_too_large_message(max),
            other => other.to_string(),
        };
        session.notify(ToastKind::Error, message);
        return;
    }
    match object_url_for(file) {
        Ok(handle) => {
            if let Some(previous) = pending.replace(Some(handle.clone())) {
                session.discard(&previous);
            }
            uploaded.set(Some(handle));
            selected.set(Some(AttrValue::from(UPLOADED_BUDDY_ID)));
        }
        Err(err) => {
            log::warn!(target: LOG_TARGET, "could not read upload: {err}");
            session.notify(ToastKind::Error, err.to_string());
        }
    }
}
