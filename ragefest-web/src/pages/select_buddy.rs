use crate::components::button::RageButton;
use crate::components::layout::Layout;
use crate::game::BuddyCatalog;
use crate::game::constants::UPLOADED_BUDDY_ID;
use crate::paths::media_src;
use std::rc::Rc;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct SelectBuddyPageProps {
    pub buddies: Rc<BuddyCatalog>,
    /// Id currently highlighted; nothing reaches the store until Continue.
    #[prop_or_default]
    pub selected_id: Option<AttrValue>,
    /// Preview of a pending upload.
    #[prop_or_default]
    pub uploaded_src: Option<AttrValue>,
    pub upload_limit_bytes: u64,
    pub on_pick: Callback<AttrValue>,
    pub on_upload: Callback<File>,
    pub on_back: Callback<()>,
    pub on_continue: Callback<()>,
}

impl PartialEq for SelectBuddyPageProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.buddies, &other.buddies)
            && self.selected_id == other.selected_id
            && self.uploaded_src == other.uploaded_src
            && self.upload_limit_bytes == other.upload_limit_bytes
    }
}

fn size_label(bytes: u64) -> String {
    let mb = bytes / 1_000_000;
    if mb > 0 && bytes % 1_000_000 == 0 {
        format!("{mb}MB")
    } else {
        format!("{} KB", bytes / 1_000)
    }
}

#[must_use]
pub fn upload_limit_label(bytes: u64) -> String {
    format!("Max size: {}", size_label(bytes))
}

/// Toast text for an upload over `max_bytes`.
#[must_use]
pub fn upload_too_large_message(max_bytes: u64) -> String {
    format!("Image size must be less than {}", size_label(max_bytes))
}

#[function_component(SelectBuddyPage)]
pub fn select_buddy_page(props: &SelectBuddyPageProps) -> Html {
    let file_input = use_node_ref();
    let open_picker = {
        let file_input = file_input.clone();
        Callback::from(move |()| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };
    let on_change = {
        let on_upload = props.on_upload.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                on_upload.emit(file);
            }
            input.set_value("");
        })
    };

    let is_selected = |id: &str| props.selected_id.as_deref() == Some(id);

    html! {
        <Layout title="SELECT YOUR BUDDY">
            <section class="rage-card select-buddy">
                <div class="upload">
                    <RageButton label="Upload Your Own Buddy" outline=true onclick={open_picker} class="upload-button" />
                    <span class="muted">{ upload_limit_label(props.upload_limit_bytes) }</span>
                    <input ref={file_input} type="file" accept="image/*" class="hidden" onchange={on_change} />
                    if let Some(src) = props.uploaded_src.clone() {
                        <div class={classes!("buddy-container", "upload-preview", is_selected(UPLOADED_BUDDY_ID).then_some("ring-rage"))}>
                            <img src={src} alt="Uploaded Buddy" onclick={{
                                let on_pick = props.on_pick.clone();
                                Callback::from(move |_| on_pick.emit(AttrValue::from(UPLOADED_BUDDY_ID)))
                            }} />
                        </div>
                    }
                </div>
                <h3>{ "Or Choose a Premade Buddy" }</h3>
                <ul class="buddy-grid" role="radiogroup">
                    { for props.buddies.iter().map(|buddy| {
                        let id = AttrValue::from(buddy.id.clone());
                        let selected = is_selected(&buddy.id);
                        let onclick = {
                            let on_pick = props.on_pick.clone();
                            let id = id.clone();
                            Callback::from(move |_| on_pick.emit(id.clone()))
                        };
                        html! {
                            <li key={buddy.id.clone()} role="radio" aria-checked={selected.to_string()}
                                class={classes!("buddy-container", selected.then_some("ring-rage"))}>
                                <img src={media_src(&buddy.src)} alt={buddy.alt.clone()} {onclick} />
                            </li>
                        }
                    }) }
                </ul>
                <div class="controls">
                    <RageButton label="Back" outline=true onclick={props.on_back.clone()} />
                    <RageButton label="Continue" onclick={props.on_continue.clone()} />
                </div>
            </section>
        </Layout>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_limit_formats_megabytes() {
        assert_eq!(upload_limit_label(5_000_000), "Max size: 5MB");
        assert_eq!(upload_limit_label(750_000), "Max size: 750 KB");
        assert_eq!(
            upload_too_large_message(5_000_000),
            "Image size must be less than 5MB"
        );
    }
}
