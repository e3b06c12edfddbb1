use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::model::{BoardAction, BoardState, Token, TokenId};
use crate::state::DragVia;

pub fn token_dom_id(id: TokenId) -> String {
    format!("token-{}", id.0)
}

#[derive(Properties, PartialEq, Clone)]
pub struct TokenImageProps {
    pub token: Token,
    pub cell: usize,
    /// Taken out of layout while a native drag carries it.
    pub collapsed: bool,
    /// Invisible but laid out while its ghost glides.
    pub hidden: bool,
    pub draggable: bool,
    pub dispatch: UseReducerDispatcher<BoardState>,
}

/// A draggable token image wired to the native drag lifecycle.
#[function_component(TokenImage)]
pub fn token_image(props: &TokenImageProps) -> Html {
    // Deferred hide; dropping the handle cancels it.
    let pending_hide = use_mut_ref(|| None::<Timeout>);

    let ondragstart = {
        let dispatch = props.dispatch.clone();
        let pending_hide = pending_hide.clone();
        let cell = props.cell;
        let token = props.token.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(dt) = e.data_transfer() {
                let _ = dt.set_data("text/plain", &token.source);
            }
            dispatch.dispatch(BoardAction::BeginDrag { cell, via: DragVia::Pointer });
            // Zero-delay so the platform snapshots the drag image before it disappears.
            let dispatch = dispatch.clone();
            let id = token.id;
            *pending_hide.borrow_mut() = Some(Timeout::new(0, move || {
                dispatch.dispatch(BoardAction::HideDragged { token: id });
            }));
        })
    };
    let ondragend = {
        let dispatch = props.dispatch.clone();
        let pending_hide = pending_hide.clone();
        Callback::from(move |_e: DragEvent| {
            pending_hide.borrow_mut().take();
            dispatch.dispatch(BoardAction::EndPointerDrag);
        })
    };

    let style = if props.collapsed {
        "display:none;"
    } else if props.hidden {
        "visibility:hidden;"
    } else {
        "display:block;"
    };

    html! {
        <img
            id={token_dom_id(props.token.id)}
            class="token"
            src={props.token.source.clone()}
            draggable={if props.draggable { "true" } else { "false" }}
            style={style}
            {ondragstart}
            {ondragend}
        />
    }
}
