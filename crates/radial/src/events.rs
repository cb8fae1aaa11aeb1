use crate::menu::Focus;
use std::fmt;

/// Raised when the menu is clicked while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuActivated {
    pub focused_center: bool,
    /// `None` when the center or nothing was focused.
    pub index: Option<usize>,
}

impl MenuActivated {
    pub fn from_focus(focus: Focus) -> Self {
        Self {
            focused_center: focus.is_center(),
            index: focus.wedge_index(),
        }
    }

    /// Wedge index with `-1` standing in for "no wedge", for hosts that
    /// speak the flat integer convention.
    pub fn menu_index(&self) -> isize {
        self.index.map_or(-1, |i| i as isize)
    }
}

impl fmt::Display for MenuActivated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.focused_center, self.index) {
            (true, _) => write!(f, "center"),
            (false, Some(i)) => write!(f, "item {}", i),
            (false, None) => write!(f, "nothing"),
        }
    }
}

/// What the host should do after feeding an event into the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct MenuUpdate {
    pub should_redraw: bool,
    pub activated: Option<MenuActivated>,
}

impl MenuUpdate {
    pub fn new(should_redraw: bool, activated: Option<MenuActivated>) -> Self {
        Self {
            should_redraw,
            activated,
        }
    }

    pub fn redraw(should_redraw: bool) -> Self {
        Self::new(should_redraw, None)
    }
}
