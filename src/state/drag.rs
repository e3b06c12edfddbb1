use crate::model::TokenId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragVia {
    /// Native drag-and-drop events.
    Pointer,
    /// Manually tracked touch start/end.
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dragged {
    pub token: TokenId,
    /// Cell the token sat in when the drag started.
    pub from: usize,
    pub via: DragVia,
    /// Set once the platform has captured its drag image.
    pub hidden: bool,
}

/// The single dragged token reference. At most one drag is live at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    current: Option<Dragged>,
}

impl DragState {
    pub fn begin(&mut self, token: TokenId, from: usize, via: DragVia) {
        self.current = Some(Dragged { token, from, via, hidden: false });
    }

    pub fn current(&self) -> Option<Dragged> {
        self.current
    }

    pub fn is_hidden(&self, token: TokenId) -> bool {
        matches!(self.current, Some(d) if d.token == token && d.hidden)
    }

    /// Hides the dragged token if `token` is still the one being dragged.
    pub fn hide(&mut self, token: TokenId) -> bool {
        match self.current.as_mut() {
            Some(d) if d.token == token => {
                d.hidden = true;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) -> Option<Dragged> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_replaces_first() {
        let mut d = DragState::default();
        d.begin(TokenId(1), 0, DragVia::Pointer);
        d.begin(TokenId(2), 5, DragVia::Touch);
        let cur = d.current().unwrap();
        assert_eq!(cur.token, TokenId(2));
        assert_eq!(cur.from, 5);
        assert!(!cur.hidden);
    }

    #[test]
    fn hide_only_applies_to_current_token() {
        let mut d = DragState::default();
        assert!(!d.hide(TokenId(1)));
        d.begin(TokenId(1), 0, DragVia::Pointer);
        assert!(!d.hide(TokenId(9)));
        assert!(d.hide(TokenId(1)));
        assert!(d.is_hidden(TokenId(1)));
        assert!(d.clear().is_some());
        assert!(d.clear().is_none());
        assert!(!d.is_hidden(TokenId(1)));
    }
}
