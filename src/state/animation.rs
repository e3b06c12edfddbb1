// Touch move glide: a ghost copy travels over the board while the real token
// stays hidden in its source cell until the settle delay elapses.
use crate::model::TokenId;

/// Viewport-space box, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_dom(r: &web_sys::DomRect) -> Self {
        Self {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }

    /// Offset that moves this box's top-left corner onto `other`'s.
    pub fn delta_to(&self, other: &Rect) -> (f64, f64) {
        (other.left - self.left, other.top - self.top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlidePhase {
    /// Ghost sits exactly over the hidden token.
    Placed,
    /// Transform applied; the CSS transition carries the ghost to the target.
    Gliding,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveAnimation {
    pub id: u64,
    pub token: TokenId,
    pub source: String,
    pub from: usize,
    pub to: usize,
    pub start: Rect,
    pub delta: (f64, f64),
    pub phase: GlidePhase,
}

impl MoveAnimation {
    pub fn ghost_style(&self, glide_ms: u32) -> String {
        let mut style = format!(
            "position:fixed; left:{}px; top:{}px; width:{}px; height:{}px; transition:transform {}s ease; pointer-events:none; z-index:1000;",
            self.start.left,
            self.start.top,
            self.start.width,
            self.start.height,
            glide_ms as f64 / 1000.0,
        );
        if self.phase == GlidePhase::Gliding {
            style.push_str(&format!(" transform:translate({}px, {}px);", self.delta.0, self.delta.1));
        }
        style
    }
}
