//! Board configuration.
//!
//! Defaults reproduce the stock board: a 12x12 grid seeded with four tokens.
//! A host page may override any field with a JSON block:
//!
//! ```html
//! <script type="application/json" id="board-config">{ "initial_dimension": 8 }</script>
//! ```

use serde::{Deserialize, Serialize};

use crate::model::{MAX_DIMENSION, MIN_DIMENSION};
use crate::util::{clog, cwarn};

pub const CONFIG_ELEMENT_ID: &str = "board-config";

pub const DEFAULT_TOKEN_SOURCES: [&str; 4] = [
    "assets/token-1.png",
    "assets/token-2.png",
    "assets/token-3.png",
    "assets/token-4.png",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub initial_dimension: u32,
    /// Default population, placed first-fit on the initial build.
    pub token_sources: Vec<String>,
    /// Pointer delta to background percent.
    pub pan_damping: f64,
    /// Settle delay of a touch move glide.
    pub glide_ms: u32,
    /// Max gap between two taps on one cell to count as a double tap.
    pub double_tap_ms: f64,
    pub initial_pan: [f64; 2],
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            initial_dimension: 12,
            token_sources: DEFAULT_TOKEN_SOURCES.iter().map(|s| s.to_string()).collect(),
            pan_damping: 0.1,
            glide_ms: 300,
            double_tap_ms: 300.0,
            initial_pan: [50.0, 50.0],
        }
    }
}

impl BoardConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<BoardConfig>(raw).map(BoardConfig::sanitized)
    }

    /// Pull values back into their valid ranges instead of rejecting them.
    pub fn sanitized(mut self) -> Self {
        self.initial_dimension = self.initial_dimension.clamp(MIN_DIMENSION, MAX_DIMENSION);
        if !self.pan_damping.is_finite() || self.pan_damping < 0.0 {
            self.pan_damping = 0.0;
        }
        if !self.double_tap_ms.is_finite() || self.double_tap_ms < 0.0 {
            self.double_tap_ms = 0.0;
        }
        for v in self.initial_pan.iter_mut() {
            *v = if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 };
        }
        self
    }

    /// Reads the optional config block from the host page.
    pub fn from_document() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => {
                clog(&format!("board config loaded: {}x{} grid", cfg.initial_dimension, cfg.initial_dimension));
                cfg
            }
            Err(err) => {
                cwarn(&format!("board config ignored: {err}"));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_board() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.initial_dimension, 12);
        assert_eq!(cfg.token_sources.len(), 4);
        assert_eq!(cfg.token_sources[0], "assets/token-1.png");
        assert_eq!(cfg.glide_ms, 300);
        assert_eq!(cfg.initial_pan, [50.0, 50.0]);
        assert!((cfg.pan_damping - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg = BoardConfig::from_json(r#"{ "initial_dimension": 6 }"#).unwrap();
        assert_eq!(cfg.initial_dimension, 6);
        assert_eq!(cfg.token_sources, BoardConfig::default().token_sources);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = BoardConfig::from_json(
            r#"{ "initial_dimension": 40, "pan_damping": -1.0, "initial_pan": [-5.0, 250.0] }"#,
        )
        .unwrap();
        assert_eq!(cfg.initial_dimension, MAX_DIMENSION);
        assert_eq!(cfg.pan_damping, 0.0);
        assert_eq!(cfg.initial_pan, [0.0, 100.0]);

        let small = BoardConfig::from_json(r#"{ "initial_dimension": 0 }"#).unwrap();
        assert_eq!(small.initial_dimension, MIN_DIMENSION);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BoardConfig::from_json("{ not json").is_err());
        assert!(BoardConfig::from_json(r#"{ "token_sources": 3 }"#).is_err());
    }
}
