use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub title: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &Props) -> Html {
    html! {
        <main class="rage-container" id="main">
            if let Some(title) = props.title.clone() {
                <h1 class="page-title">{ title }</h1>
            }
            { props.children.clone() }
        </main>
    }
}
