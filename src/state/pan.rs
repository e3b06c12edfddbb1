// Background pan state: idle <-> panning, with a dragging sub-state while panning.
#[derive(Debug, Clone, PartialEq)]
pub struct Pan {
    pub enabled: bool,
    pub dragging: bool,
    pub last_x: f64,
    pub last_y: f64,
    pub pos_x: f64,
    pub pos_y: f64,
    pub damping: f64,
}

impl Default for Pan {
    fn default() -> Self {
        Self {
            enabled: false,
            dragging: false,
            last_x: 0.0,
            last_y: 0.0,
            pos_x: 50.0,
            pos_y: 50.0,
            damping: 0.1,
        }
    }
}

impl Pan {
    pub fn new(pos: [f64; 2], damping: f64) -> Self {
        Self {
            pos_x: pos[0],
            pos_y: pos[1],
            damping,
            ..Self::default()
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.dragging = false;
        }
    }

    pub fn press(&mut self, x: f64, y: f64) {
        if !self.enabled {
            return;
        }
        self.dragging = true;
        self.last_x = x;
        self.last_y = y;
    }

    /// Incremental delta since the last recorded point, damped and clamped.
    /// Returns whether the background moved.
    pub fn move_to(&mut self, x: f64, y: f64) -> bool {
        if !self.enabled || !self.dragging {
            return false;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.pos_x = (self.pos_x + dx * self.damping).clamp(0.0, 100.0);
        self.pos_y = (self.pos_y + dy * self.damping).clamp(0.0, 100.0);
        self.last_x = x;
        self.last_y = y;
        true
    }

    /// Only an active pan drag takes touch moves away from page scrolling.
    pub fn captures_touch_move(&self) -> bool {
        self.enabled && self.dragging
    }

    pub fn release(&mut self) {
        if !self.enabled {
            return;
        }
        self.dragging = false;
    }

    pub fn cursor(&self) -> &'static str {
        match (self.enabled, self.dragging) {
            (false, _) => "default",
            (true, true) => "grabbing",
            (true, false) => "grab",
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.enabled { "Stop Moving Background" } else { "Move Background" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn drag_shifts_by_damped_delta() {
        let mut pan = Pan::default();
        pan.toggle();
        pan.press(100.0, 100.0);
        assert!(pan.move_to(110.0, 105.0));
        assert!(approx(pan.pos_x, 51.0));
        assert!(approx(pan.pos_y, 50.5));
        assert_eq!((pan.last_x, pan.last_y), (110.0, 105.0));
    }

    #[test]
    fn delta_is_incremental_between_moves() {
        let mut pan = Pan::default();
        pan.toggle();
        pan.press(0.0, 0.0);
        pan.move_to(10.0, 0.0);
        pan.move_to(20.0, 0.0);
        assert!(approx(pan.pos_x, 52.0));
    }

    #[test]
    fn position_is_clamped() {
        let mut pan = Pan::default();
        pan.toggle();
        pan.press(0.0, 0.0);
        pan.move_to(10_000.0, -10_000.0);
        assert_eq!(pan.pos_x, 100.0);
        assert_eq!(pan.pos_y, 0.0);
    }

    #[test]
    fn idle_mode_ignores_pointer() {
        let mut pan = Pan::default();
        pan.press(0.0, 0.0);
        assert!(!pan.dragging);
        assert!(!pan.move_to(50.0, 50.0));
        assert_eq!((pan.pos_x, pan.pos_y), (50.0, 50.0));
    }

    #[test]
    fn release_keeps_mode_enabled() {
        let mut pan = Pan::default();
        pan.toggle();
        pan.press(1.0, 1.0);
        assert_eq!(pan.cursor(), "grabbing");
        pan.release();
        assert!(pan.enabled);
        assert!(!pan.dragging);
        assert_eq!(pan.cursor(), "grab");
        assert!(!pan.move_to(30.0, 30.0));
    }

    #[test]
    fn touch_moves_scroll_page_unless_dragging() {
        let mut pan = Pan::default();
        assert!(!pan.captures_touch_move());
        pan.toggle();
        assert!(!pan.captures_touch_move());
        pan.press(5.0, 5.0);
        assert!(pan.captures_touch_move());
        pan.release();
        assert!(!pan.captures_touch_move());
    }

    #[test]
    fn toggle_off_ends_drag_and_resets_cursor() {
        let mut pan = Pan::default();
        pan.toggle();
        assert_eq!(pan.button_label(), "Stop Moving Background");
        pan.press(1.0, 1.0);
        pan.toggle();
        assert!(!pan.dragging);
        assert_eq!(pan.cursor(), "default");
        assert_eq!(pan.button_label(), "Move Background");
    }
}
