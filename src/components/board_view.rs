use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Element, HtmlElement, TouchEvent};
use yew::prelude::*;

use super::{cell_view::CellView, glide_ghost::GlideGhost, token::token_dom_id};
use crate::model::{BoardAction, BoardState, GlideTarget, TokenId};
use crate::state::{DragVia, Rect};
use crate::util::{background_position, clog};

pub const GRID_ID: &str = "grid";

// Hit-testing helpers
fn element_at(x: f64, y: f64) -> Option<Element> {
    web_sys::window()?.document()?.element_from_point(x as f32, y as f32)
}

/// The cell under a viewport point, with its row-major index.
fn cell_at(x: f64, y: f64) -> Option<(usize, Element)> {
    let cell = element_at(x, y)?.closest(".cell").ok().flatten()?;
    let index = cell.get_attribute("data-index")?.parse().ok()?;
    Some((index, cell))
}

fn is_token(el: &Element) -> bool {
    el.closest(".token").ok().flatten().is_some()
}

fn measure(id: &str) -> Option<Rect> {
    let el = web_sys::window()?.document()?.get_element_by_id(id)?;
    Some(Rect::from_dom(&el.get_bounding_client_rect()))
}

/// Frame and settle handles of one glide; dropping them cancels the callbacks.
#[derive(Default)]
#[allow(dead_code)] // held only for their Drop
struct GlideHandles {
    frame: Option<AnimationFrame>,
    settle: Option<Timeout>,
}

#[derive(Default)]
struct GlideSchedule {
    generation: u64,
    handles: HashMap<u64, Rc<RefCell<GlideHandles>>>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct BoardViewProps {
    pub board: UseReducerHandle<BoardState>,
}

#[function_component(BoardView)]
pub fn board_view(props: &BoardViewProps) -> Html {
    let grid_ref = use_node_ref();
    let board_ref = use_mut_ref(|| props.board.clone());
    let schedule = use_mut_ref(GlideSchedule::default);
    // Listeners installed once read the latest handle through this cell.
    *board_ref.borrow_mut() = props.board.clone();

    // Touch drag, double tap and pan listeners on the grid; pointer pan tracking on the window.
    {
        let grid_ref = grid_ref.clone();
        let board_ref = board_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no global `window` exists");
            let grid: HtmlElement = grid_ref
                .cast::<HtmlElement>()
                .expect("grid_ref not attached to the grid element");
            let opts = AddEventListenerOptions::new();
            opts.set_passive(false);

            let touch_start_cb = {
                let board_ref = board_ref.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let Some(t0) = e.touches().item(0) else { return };
                    let x = t0.client_x() as f64;
                    let y = t0.client_y() as f64;
                    let handle = board_ref.borrow().clone();
                    if handle.pan.enabled {
                        handle.dispatch(BoardAction::PanPress { x, y });
                        return;
                    }
                    let on_token = element_at(x, y).is_some_and(|el| is_token(&el));
                    if !on_token {
                        return;
                    }
                    if let Some((cell, _)) = cell_at(x, y) {
                        handle.dispatch(BoardAction::BeginDrag { cell, via: DragVia::Touch });
                    }
                }) as Box<dyn FnMut(_)>)
            };
            grid.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                touch_start_cb.as_ref().unchecked_ref(),
                &opts,
            )
            .ok();

            let touch_move_cb = {
                let board_ref = board_ref.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let handle = board_ref.borrow().clone();
                    if !handle.pan.captures_touch_move() {
                        return;
                    }
                    if let Some(t0) = e.touches().item(0) {
                        handle.dispatch(BoardAction::PanMove {
                            x: t0.client_x() as f64,
                            y: t0.client_y() as f64,
                        });
                    }
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            grid.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                touch_move_cb.as_ref().unchecked_ref(),
                &opts,
            )
            .ok();

            let touch_end_cb = {
                let board_ref = board_ref.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let handle = board_ref.borrow().clone();
                    if handle.pan.enabled {
                        handle.dispatch(BoardAction::PanRelease);
                        return;
                    }
                    let Some(t0) = e.changed_touches().item(0) else {
                        handle.dispatch(BoardAction::EndTouchDrag { target: None });
                        return;
                    };
                    let hit = cell_at(t0.client_x() as f64, t0.client_y() as f64);
                    let dragged = handle.drag.current().filter(|d| d.via == DragVia::Touch);
                    let moved = dragged
                        .is_some_and(|d| hit.as_ref().is_some_and(|(c, _)| *c != d.from));
                    if let Some(dragged) = dragged {
                        let target = hit
                            .as_ref()
                            .filter(|(c, _)| moved && handle.cell_accepts_drop(*c))
                            .and_then(|(c, el)| glide_target(dragged.token, *c, el));
                        handle.dispatch(BoardAction::EndTouchDrag { target });
                    }
                    if moved {
                        return;
                    }
                    // Released where it started: count it as a tap.
                    let Some((cell, _)) = hit else { return };
                    let now_ms = js_sys::Date::now();
                    let mut probe = handle.taps.clone();
                    if probe.tap(cell, now_ms, handle.config.double_tap_ms) {
                        // Keep the browser from synthesizing a dblclick that would undo the toggle.
                        e.prevent_default();
                    }
                    handle.dispatch(BoardAction::Tap { cell, now_ms });
                }) as Box<dyn FnMut(_)>)
            };
            grid.add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
                .ok();

            let mousemove_cb = {
                let board_ref = board_ref.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let handle = board_ref.borrow().clone();
                    if !handle.pan.enabled {
                        return;
                    }
                    handle.dispatch(BoardAction::PanMove {
                        x: e.client_x() as f64,
                        y: e.client_y() as f64,
                    });
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
                .ok();

            let mouseup_cb = {
                let board_ref = board_ref.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    let handle = board_ref.borrow().clone();
                    if handle.pan.enabled {
                        handle.dispatch(BoardAction::PanRelease);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            move || {
                let _ = grid.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = grid.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = grid.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (&touch_start_cb, &touch_move_cb, &touch_end_cb, &mousemove_cb, &mouseup_cb);
            }
        });
    }

    // Glide scheduling: next frame applies the transform, then the settle timer commits.
    {
        let schedule = schedule.clone();
        let dispatcher = props.board.dispatcher();
        let generation = props.board.generation;
        let glide_ms = props.board.config.glide_ms;
        let ids: Vec<u64> = props.board.glides.iter().map(|g| g.id).collect();
        use_effect_with((generation, ids), move |(generation, ids)| {
            let mut sched = schedule.borrow_mut();
            if sched.generation != *generation {
                if !sched.handles.is_empty() {
                    clog(&format!("cancelled {} scheduled glide(s)", sched.handles.len()));
                }
                sched.handles.clear();
                sched.generation = *generation;
            }
            sched.handles.retain(|id, _| ids.contains(id));
            for &id in ids {
                if sched.handles.contains_key(&id) {
                    continue;
                }
                let handles = Rc::new(RefCell::new(GlideHandles::default()));
                let frame = {
                    let dispatcher = dispatcher.clone();
                    let weak = Rc::downgrade(&handles);
                    request_animation_frame(move |_| {
                        dispatcher.dispatch(BoardAction::GlideFrame { id });
                        let dispatcher = dispatcher.clone();
                        let settle = Timeout::new(glide_ms, move || {
                            dispatcher.dispatch(BoardAction::FinishGlide { id });
                        });
                        // Cancelled glides have released their handles; the timer then dies here.
                        if let Some(h) = weak.upgrade() {
                            h.borrow_mut().settle = Some(settle);
                        }
                    })
                };
                handles.borrow_mut().frame = Some(frame);
                sched.handles.insert(id, handles);
            }
            || ()
        });
    }

    let board = &*props.board;
    let dispatcher = props.board.dispatcher();
    let onmousedown = {
        let dispatcher = dispatcher.clone();
        let panning = board.pan.enabled;
        Callback::from(move |e: MouseEvent| {
            if !panning {
                return;
            }
            e.prevent_default();
            dispatcher.dispatch(BoardAction::PanPress {
                x: e.client_x() as f64,
                y: e.client_y() as f64,
            });
        })
    };

    let style = format!(
        "grid-template-columns: repeat({}, 1fr); background-position: {}; cursor: {};",
        board.dimension,
        background_position(board.pan.pos_x, board.pan.pos_y),
        board.pan.cursor(),
    );
    let draggable = !board.pan.enabled;
    let token_flags = |id: TokenId| (board.drag.is_hidden(id), board.gliding_token(id));

    html! {
        <>
            <div id={GRID_ID} ref={grid_ref} style={style} {onmousedown}>
                { for board.cells.iter().enumerate().map(|(index, cell)| {
                    let (collapsed, hidden) = cell
                        .token
                        .as_ref()
                        .map(|t| token_flags(t.id))
                        .unwrap_or((false, false));
                    html! { <CellView
                        key={format!("{}-{}", board.generation, index)}
                        index={index}
                        cell={cell.clone()}
                        accepts={board.cell_accepts_drop(index)}
                        token_collapsed={collapsed}
                        token_hidden={hidden}
                        draggable={draggable}
                        dispatch={dispatcher.clone()}
                    /> }
                }) }
            </div>
            { for board.glides.iter().map(|g| html! {
                <GlideGhost key={g.id.to_string()} glide={g.clone()} glide_ms={board.config.glide_ms} />
            }) }
        </>
    }
}

fn glide_target(token: TokenId, cell: usize, cell_el: &Element) -> Option<GlideTarget> {
    let token_rect = measure(&token_dom_id(token))?;
    let cell_rect = Rect::from_dom(&cell_el.get_bounding_client_rect());
    Some(GlideTarget { cell, token_rect, cell_rect })
}
