// src/view/modal.rs

use serde::{Deserialize, Serialize};

/// Next visibility of the "learn more" modal.
///
/// Either button flips the current state; which one fired is ignored. The
/// counters only tell whether any click has happened yet, so the page-load
/// call with both at zero leaves the modal as it is.
pub fn toggle_modal(open_clicks: u64, close_clicks: u64, is_open: bool) -> bool {
    if open_clicks > 0 || close_clicks > 0 {
        !is_open
    } else {
        is_open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    OpenRequested,
    CloseRequested,
}

/// Body of `POST /api/modal`; also the browser-side state of the modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalToggle {
    #[serde(default)]
    pub open_clicks: u64,
    #[serde(default)]
    pub close_clicks: u64,
    #[serde(default)]
    pub is_open: bool,
}

impl ModalToggle {
    /// Closed, no clicks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a click on one of the buttons and return the new visibility.
    pub fn apply(&mut self, event: ModalEvent) -> bool {
        match event {
            ModalEvent::OpenRequested => self.open_clicks += 1,
            ModalEvent::CloseRequested => self.close_clicks += 1,
        }
        self.is_open = toggle_modal(self.open_clicks, self.close_clicks, self.is_open);
        self.is_open
    }

    /// What the server answers for this state.
    pub fn next(&self) -> bool {
        toggle_modal(self.open_clicks, self.close_clicks, self.is_open)
    }
}
