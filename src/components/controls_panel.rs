use yew::prelude::*;

use crate::model::{MAX_DIMENSION, MIN_DIMENSION};

pub const PAN_TOGGLE_ID: &str = "pan-toggle";

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub dimension: u32,
    pub pan_label: AttrValue,
    pub on_resize: Callback<i32>,
    pub on_toggle_pan: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let shrink_cb = {
        let cb = props.on_resize.clone();
        Callback::from(move |_| cb.emit(-1))
    };
    let grow_cb = {
        let cb = props.on_resize.clone();
        Callback::from(move |_| cb.emit(1))
    };
    let pan_cb = {
        let cb = props.on_toggle_pan.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div class="controls" style="display:flex; gap:6px; align-items:center; padding:8px;">
        <button onclick={shrink_cb} disabled={props.dimension <= MIN_DIMENSION}>{"-"}</button>
        <span style="min-width:56px; text-align:center;">{ format!("{0} x {0}", props.dimension) }</span>
        <button onclick={grow_cb} disabled={props.dimension >= MAX_DIMENSION}>{"+"}</button>
        <span style="width:8px;"></span>
        <button id={PAN_TOGGLE_ID} onclick={pan_cb}>{ props.pan_label.clone() }</button>
    </div>}
}
