//! Board model: the authoritative grid of cells, tokens and overlays.
//! The DOM is rendered from this state; every interaction is a `BoardAction`.

use std::rc::Rc;
use yew::Reducible;

use crate::config::BoardConfig;
use crate::state::{DragState, DragVia, GlidePhase, MoveAnimation, Pan, Rect, TapTracker};
use crate::util::clog;

pub const MIN_DIMENSION: u32 = 2;
pub const MAX_DIMENSION: u32 = 16;

/// Clamps any requested dimension into `[MIN_DIMENSION, MAX_DIMENSION]`.
pub fn clamp_dimension(requested: i64) -> u32 {
    requested.clamp(MIN_DIMENSION as i64, MAX_DIMENSION as i64) as u32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    /// Image source the token is drawn with.
    pub source: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub token: Option<Token>,
    pub overlay: bool,
}

impl Cell {
    /// No token and no overlay marker.
    pub fn is_bare(&self) -> bool {
        self.token.is_none() && !self.overlay
    }
}

/// A token's source and row-major cell index, captured before a rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub source: String,
    pub position: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    Placed,
    NoDrag,
    SameCell,
    Occupied,
    OutOfRange,
    /// The dragged token no longer exists on the board.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlideOutcome {
    Started(u64),
    Rejected(DropOutcome),
    Committed,
    /// Source or target changed while the ghost was in flight.
    Abandoned,
    /// Unknown id: already finished or cancelled by a rebuild.
    Unknown,
}

/// Where a touch drag was released, with both boxes measured in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlideTarget {
    pub cell: usize,
    pub token_rect: Rect,
    pub cell_rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardState {
    pub dimension: u32,
    /// Row-major cells; length = dimension * dimension.
    pub cells: Vec<Cell>,
    pub drag: DragState,
    pub glides: Vec<MoveAnimation>,
    pub pan: Pan,
    pub taps: TapTracker,
    /// Bumped on every rebuild; views key scheduled work on it.
    pub generation: u64,
    pub config: BoardConfig,
    next_token: u32,
    next_glide: u64,
}

impl BoardState {
    pub fn new(config: BoardConfig) -> Self {
        let config = config.sanitized();
        let mut board = Self {
            dimension: config.initial_dimension,
            cells: Vec::new(),
            drag: DragState::default(),
            glides: Vec::new(),
            pan: Pan::new(config.initial_pan, config.pan_damping),
            taps: TapTracker::default(),
            generation: 0,
            config,
            next_token: 0,
            next_glide: 0,
        };
        let dimension = board.dimension;
        board.rebuild(dimension, &[]);
        board
    }

    /// Destroys every cell and recreates `dimension`² empty ones, then replays
    /// `saved`; with nothing saved the default sources are placed first-fit.
    /// Any live drag and every in-flight glide is cancelled.
    pub fn rebuild(&mut self, dimension: u32, saved: &[Placement]) {
        self.dimension = dimension.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let n = (self.dimension * self.dimension) as usize;
        self.cells = vec![Cell::default(); n];
        self.generation += 1;
        if let Some(d) = self.drag.clear() {
            clog(&format!("rebuild cancelled drag of token {}", d.token.0));
        }
        if !self.glides.is_empty() {
            clog(&format!("rebuild cancelled {} glide(s)", self.glides.len()));
            self.glides.clear();
        }
        self.taps.reset();
        if saved.is_empty() {
            let sources = self.config.token_sources.clone();
            self.place_default(&sources);
        } else {
            self.replay(saved);
        }
    }

    /// Adjusts the dimension by `delta` (clamped) and rebuilds, preserving
    /// tokens whose index still exists.
    pub fn change_grid_size(&mut self, delta: i32) {
        self.set_dimension(self.dimension as i64 + delta as i64);
    }

    pub fn set_dimension(&mut self, requested: i64) {
        let saved = self.snapshot_placements();
        let dimension = clamp_dimension(requested);
        clog(&format!("grid {0}x{0} -> {1}x{1}", self.dimension, dimension));
        self.rebuild(dimension, &saved);
    }

    pub fn snapshot_placements(&self) -> Vec<Placement> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(position, c)| {
                c.token.as_ref().map(|t| Placement { source: t.source.clone(), position })
            })
            .collect()
    }

    fn mint_token(&mut self, source: &str) -> Token {
        let id = TokenId(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        Token { id, source: source.to_string() }
    }

    fn replay(&mut self, saved: &[Placement]) {
        for p in saved {
            let free = self.cells.get(p.position).is_some_and(|c| c.token.is_none());
            if !free {
                continue;
            }
            let token = self.mint_token(&p.source);
            self.cells[p.position].token = Some(token);
        }
    }

    /// Linear scan in index order: each source goes into the first bare cell.
    /// Sources left over once the board is full are not placed.
    pub fn place_default(&mut self, sources: &[String]) {
        for source in sources {
            let Some(idx) = self.cells.iter().position(Cell::is_bare) else {
                break;
            };
            let token = self.mint_token(source);
            self.cells[idx].token = Some(token);
        }
    }

    pub fn find_token(&self, id: TokenId) -> Option<usize> {
        self.cells
            .iter()
            .position(|c| c.token.as_ref().is_some_and(|t| t.id == id))
    }

    /// Target of a glide that has not committed yet.
    pub fn is_reserved(&self, cell: usize) -> bool {
        self.glides.iter().any(|g| g.to == cell)
    }

    pub fn cell_accepts_drop(&self, cell: usize) -> bool {
        self.cells.get(cell).is_some_and(|c| c.token.is_none()) && !self.is_reserved(cell)
    }

    pub fn is_token_hidden(&self, id: TokenId) -> bool {
        self.drag.is_hidden(id) || self.glides.iter().any(|g| g.token == id)
    }

    pub fn gliding_token(&self, id: TokenId) -> bool {
        self.glides.iter().any(|g| g.token == id)
    }

    /// Records the token in `cell` as the dragged token. Refused in pan mode,
    /// on empty cells, and for tokens that are already gliding.
    pub fn begin_drag(&mut self, cell: usize, via: DragVia) -> bool {
        if self.pan.enabled {
            return false;
        }
        let Some(id) = self.cells.get(cell).and_then(|c| c.token.as_ref()).map(|t| t.id) else {
            return false;
        };
        if self.gliding_token(id) {
            return false;
        }
        self.drag.begin(id, cell, via);
        true
    }

    pub fn hide_dragged(&mut self, token: TokenId) -> bool {
        self.drag.hide(token)
    }

    /// Native drag end: visibility restored and reference cleared, whatever happened.
    pub fn end_pointer_drag(&mut self) -> bool {
        self.drag.clear().is_some()
    }

    /// Native drop: re-parents the dragged token into `cell` if it is free.
    /// A placed drop also ends the drag: the re-rendered token is a new
    /// element, so the old one's `dragend` never reaches the app.
    pub fn drop_on(&mut self, cell: usize) -> DropOutcome {
        let Some(d) = self.drag.current() else {
            return DropOutcome::NoDrag;
        };
        if cell >= self.cells.len() {
            return DropOutcome::OutOfRange;
        }
        let Some(from) = self.find_token(d.token) else {
            return DropOutcome::Stale;
        };
        if from == cell {
            return DropOutcome::SameCell;
        }
        if !self.cell_accepts_drop(cell) {
            return DropOutcome::Occupied;
        }
        let token = self.cells[from].token.take();
        self.cells[cell].token = token;
        self.drag.clear();
        DropOutcome::Placed
    }

    /// Touch release. Starts a glide when `target` is a free cell; the dragged
    /// token reference is cleared either way.
    pub fn end_touch_drag(&mut self, target: Option<GlideTarget>) -> GlideOutcome {
        let Some(d) = self.drag.clear() else {
            return GlideOutcome::Rejected(DropOutcome::NoDrag);
        };
        let Some(target) = target else {
            return GlideOutcome::Rejected(DropOutcome::OutOfRange);
        };
        if target.cell >= self.cells.len() {
            return GlideOutcome::Rejected(DropOutcome::OutOfRange);
        }
        let Some(from) = self.find_token(d.token) else {
            return GlideOutcome::Rejected(DropOutcome::Stale);
        };
        if from == target.cell {
            return GlideOutcome::Rejected(DropOutcome::SameCell);
        }
        if !self.cell_accepts_drop(target.cell) {
            return GlideOutcome::Rejected(DropOutcome::Occupied);
        }
        let source = self.cells[from]
            .token
            .as_ref()
            .map(|t| t.source.clone())
            .unwrap_or_default();
        let id = self.next_glide;
        self.next_glide += 1;
        self.glides.push(MoveAnimation {
            id,
            token: d.token,
            source,
            from,
            to: target.cell,
            start: target.token_rect,
            delta: target.token_rect.delta_to(&target.cell_rect),
            phase: GlidePhase::Placed,
        });
        GlideOutcome::Started(id)
    }

    /// First animation frame after the ghost was placed: start the transform.
    pub fn glide_frame(&mut self, id: u64) -> bool {
        match self.glides.iter_mut().find(|g| g.id == id) {
            Some(g) if g.phase == GlidePhase::Placed => {
                g.phase = GlidePhase::Gliding;
                true
            }
            _ => false,
        }
    }

    /// Settle delay elapsed: move the real token and drop the ghost.
    pub fn finish_glide(&mut self, id: u64) -> GlideOutcome {
        let Some(pos) = self.glides.iter().position(|g| g.id == id) else {
            return GlideOutcome::Unknown;
        };
        let glide = self.glides.remove(pos);
        let still_at_source = self.cells[glide.from]
            .token
            .as_ref()
            .is_some_and(|t| t.id == glide.token);
        let target_free = self.cells.get(glide.to).is_some_and(|c| c.token.is_none());
        if !still_at_source || !target_free {
            return GlideOutcome::Abandoned;
        }
        let token = self.cells[glide.from].token.take();
        self.cells[glide.to].token = token;
        GlideOutcome::Committed
    }

    pub fn toggle_overlay(&mut self, cell: usize) -> bool {
        match self.cells.get_mut(cell) {
            Some(c) => {
                c.overlay = !c.overlay;
                true
            }
            None => false,
        }
    }

    /// Touch release on a cell with no drag in progress; a double tap toggles its overlay.
    pub fn tap(&mut self, cell: usize, now_ms: f64) -> bool {
        if cell >= self.cells.len() {
            return false;
        }
        let window = self.config.double_tap_ms;
        if self.taps.tap(cell, now_ms, window) {
            self.toggle_overlay(cell)
        } else {
            false
        }
    }

    pub fn toggle_pan(&mut self) {
        self.pan.toggle();
        if self.pan.enabled {
            self.drag.clear();
        }
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum BoardAction {
    ChangeGridSize { delta: i32 },
    BeginDrag { cell: usize, via: DragVia },
    HideDragged { token: TokenId },
    EndPointerDrag,
    DropOnCell { cell: usize },
    EndTouchDrag { target: Option<GlideTarget> },
    GlideFrame { id: u64 },
    FinishGlide { id: u64 },
    ToggleOverlay { cell: usize },
    Tap { cell: usize, now_ms: f64 },
    TogglePan,
    PanPress { x: f64, y: f64 },
    PanMove { x: f64, y: f64 },
    PanRelease,
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use BoardAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            ChangeGridSize { delta } => {
                new.change_grid_size(delta);
                true
            }
            BeginDrag { cell, via } => new.begin_drag(cell, via),
            HideDragged { token } => new.hide_dragged(token),
            EndPointerDrag => new.end_pointer_drag(),
            DropOnCell { cell } => match new.drop_on(cell) {
                DropOutcome::Placed => true,
                other => {
                    clog(&format!("drop on cell {cell} rejected: {other:?}"));
                    false
                }
            },
            EndTouchDrag { target } => {
                let had_drag = new.drag.current().is_some();
                match new.end_touch_drag(target) {
                    GlideOutcome::Started(_) => true,
                    other => {
                        if had_drag {
                            clog(&format!("touch drag discarded: {other:?}"));
                        }
                        had_drag
                    }
                }
            }
            GlideFrame { id } => new.glide_frame(id),
            FinishGlide { id } => match new.finish_glide(id) {
                GlideOutcome::Unknown => {
                    clog(&format!("stale glide {id} ignored"));
                    false
                }
                _ => true,
            },
            ToggleOverlay { cell } => new.toggle_overlay(cell),
            Tap { cell, now_ms } => {
                let before = new.taps.clone();
                new.tap(cell, now_ms) || new.taps != before
            }
            TogglePan => {
                new.toggle_pan();
                true
            }
            PanPress { x, y } => {
                new.pan.press(x, y);
                new.pan.dragging
            }
            PanMove { x, y } => new.pan.move_to(x, y),
            PanRelease => {
                let was = new.pan.dragging;
                new.pan.release();
                was
            }
        };
        if !changed {
            return self;
        }
        Rc::new(new)
    }
}
