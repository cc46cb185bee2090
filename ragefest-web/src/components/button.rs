use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<()>,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub outline: bool,
    #[prop_or_default]
    pub class: Classes,
}

/// Primary action button. Clicks never bubble to enclosing handlers.
#[function_component(RageButton)]
pub fn rage_button(p: &Props) -> Html {
    let onclick = {
        let cb = p.onclick.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            cb.emit(());
        })
    };
    let class = classes!(
        if p.outline { "btn-outline" } else { "rage-button" },
        p.class.clone()
    );
    html! {
        <button type="button" {class} {onclick} disabled={p.disabled}>{ p.label.clone() }</button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn button_renders_label_and_disabled_state() {
        let props = Props {
            label: AttrValue::from("Continue"),
            onclick: Callback::noop(),
            disabled: true,
            outline: false,
            class: Classes::new(),
        };
        let html = block_on(LocalServerRenderer::<RageButton>::with_props(props).render());
        assert!(html.contains("Continue"));
        assert!(html.contains("disabled"));
        assert!(html.contains("rage-button"));
    }
}
