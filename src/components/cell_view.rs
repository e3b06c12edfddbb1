use yew::prelude::*;

use super::token::TokenImage;
use crate::model::{BoardAction, BoardState, Cell};

#[derive(Properties, PartialEq, Clone)]
pub struct CellViewProps {
    pub index: usize,
    pub cell: Cell,
    /// Empty and not reserved by a pending glide.
    pub accepts: bool,
    pub token_collapsed: bool,
    pub token_hidden: bool,
    pub draggable: bool,
    pub dispatch: UseReducerDispatcher<BoardState>,
}

#[function_component(CellView)]
pub fn cell_view(props: &CellViewProps) -> Html {
    let ondragover = {
        let accepts = props.accepts;
        Callback::from(move |e: DragEvent| {
            // Only an empty cell signals it can take the drop.
            if accepts {
                e.prevent_default();
            }
        })
    };
    let ondrop = {
        let dispatch = props.dispatch.clone();
        let index = props.index;
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dispatch.dispatch(BoardAction::DropOnCell { cell: index });
        })
    };
    let ondblclick = {
        let dispatch = props.dispatch.clone();
        let index = props.index;
        Callback::from(move |_e: MouseEvent| {
            dispatch.dispatch(BoardAction::ToggleOverlay { cell: index });
        })
    };

    html! {
        <div class="cell" data-index={props.index.to_string()} {ondragover} {ondrop} {ondblclick}>
            {
                if let Some(token) = &props.cell.token {
                    html! { <TokenImage
                        token={token.clone()}
                        cell={props.index}
                        collapsed={props.token_collapsed}
                        hidden={props.token_hidden}
                        draggable={props.draggable}
                        dispatch={props.dispatch.clone()}
                    /> }
                } else {
                    html! {}
                }
            }
            { if props.cell.overlay { html! { <div class="cell-overlay"></div> } } else { html! {} } }
        </div>
    }
}
