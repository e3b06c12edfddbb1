use super::{board_view::BoardView, controls_panel::ControlsPanel};
use crate::config::BoardConfig;
use crate::model::{BoardAction, BoardState};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let board = use_reducer(|| BoardState::new(BoardConfig::from_document()));

    let on_resize = {
        let board = board.clone();
        Callback::from(move |delta: i32| board.dispatch(BoardAction::ChangeGridSize { delta }))
    };
    let on_toggle_pan = {
        let board = board.clone();
        Callback::from(move |_| board.dispatch(BoardAction::TogglePan))
    };

    html! {
        <div id="board-root">
            <ControlsPanel
                dimension={board.dimension}
                pan_label={board.pan.button_label()}
                {on_resize}
                {on_toggle_pan}
            />
            <BoardView board={board.clone()} />
        </div>
    }
}
