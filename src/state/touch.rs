// Double-tap detection for touch releases on grid cells.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TapTracker {
    pub last_cell: Option<usize>,
    pub last_at_ms: f64,
}

impl TapTracker {
    /// Records a tap on `cell` at `now_ms`; returns true when it completes a double tap.
    /// A completed double tap resets the tracker so a third tap starts over.
    pub fn tap(&mut self, cell: usize, now_ms: f64, window_ms: f64) -> bool {
        let double = self.last_cell == Some(cell) && now_ms - self.last_at_ms <= window_ms;
        if double {
            self.reset();
        } else {
            self.last_cell = Some(cell);
            self.last_at_ms = now_ms;
        }
        double
    }

    pub fn reset(&mut self) {
        self.last_cell = None;
        self.last_at_ms = 0.0;
    }
}
