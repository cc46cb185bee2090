//! Short-lived user notifications.
use std::rc::Rc;
use yew::prelude::*;

const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    const fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-error",
            Self::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastItem {
    pub id: u32,
    pub kind: ToastKind,
    pub message: AttrValue,
}

/// Newest-last queue; the oldest toast drops off once the cap is reached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToastQueue {
    items: Vec<ToastItem>,
    next_id: u32,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<AttrValue>) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.items.push(ToastItem {
            id,
            kind,
            message: message.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|item| item.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub enum ToastAction {
    Push(ToastKind, AttrValue),
    Dismiss(u32),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.push(kind, message);
            }
            ToastAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ToastProps {
    pub toasts: Vec<ToastItem>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<u32>>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    html! {
        <div class="toast toast-end toast-top" role="status" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let dismiss_btn = props.on_dismiss.as_ref().map(|cb| {
                    let id = toast.id;
                    let cb = cb.clone();
                    let on_click = Callback::from(move |_| cb.emit(id));
                    html! { <button class="btn btn-ghost btn-xs" aria-label="Dismiss" onclick={on_click}>{"✕"}</button> }
                }).unwrap_or_default();
                html! {
                    <div key={toast.id} class={classes!("alert", toast.kind.alert_class())}>
                        <span>{ toast.message.clone() }</span>
                        { dismiss_btn }
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn queue_caps_and_dismisses() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Info, "one");
        queue.push(ToastKind::Info, "two");
        let third = queue.push(ToastKind::Error, "three");
        queue.push(ToastKind::Success, "four");
        assert_eq!(queue.items().len(), MAX_VISIBLE);
        assert!(queue.items().iter().all(|t| t.id != first));
        queue.dismiss(third);
        assert!(queue.items().iter().all(|t| t.id != third));
    }

    #[test]
    fn reducer_applies_push_and_dismiss() {
        let queue = Rc::new(ToastQueue::default());
        let queue = queue.reduce(ToastAction::Push(ToastKind::Success, "Recording completed!".into()));
        let id = queue.items()[0].id;
        let queue = queue.reduce(ToastAction::Dismiss(id));
        assert!(queue.is_empty());
    }

    #[test]
    fn toast_renders_kind_and_message() {
        let mut queue = ToastQueue::default();
        queue.push(ToastKind::Error, "Please record your voice first!");
        let props = ToastProps {
            toasts: queue.items().to_vec(),
            on_dismiss: Some(Callback::noop()),
        };
        let html = block_on(LocalServerRenderer::<Toast>::with_props(props).render());
        assert!(html.contains("alert-error"));
        assert!(html.contains("Please record your voice first!"));
        assert!(html.contains("Dismiss"));
    }
}
