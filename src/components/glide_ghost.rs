use yew::prelude::*;

use crate::state::MoveAnimation;

#[derive(Properties, PartialEq, Clone)]
pub struct GlideGhostProps {
    pub glide: MoveAnimation,
    pub glide_ms: u32,
}

/// Fixed-position copy of a token, portalled into `<body>` so it can travel
/// across cells without being clipped or re-parented.
#[function_component(GlideGhost)]
pub fn glide_ghost(props: &GlideGhostProps) -> Html {
    let ghost = html! {
        <img
            class="token token-ghost"
            src={props.glide.source.clone()}
            draggable="false"
            style={props.glide.ghost_style(props.glide_ms)}
        />
    };
    match web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) {
        Some(body) => create_portal(ghost, body.into()),
        None => ghost,
    }
}
