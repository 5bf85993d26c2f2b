//! Overlay session: an explicit state machine for the hover-measurement
//! shell, replacing ad-hoc module-level card state.
//!
//! Lifecycle: `Inactive → Tracking` on [`start`](OverlaySession::start),
//! `Tracking → Displaying` when the pointer enters a measurable subject,
//! back to `Tracking` when it leaves, and back to `Inactive` on
//! [`cancel`](OverlaySession::cancel), the Escape path. The card lingers
//! between hovers (it is updated in place on the next subject, the way the
//! original shell reuses its floating card) and follows the pointer while
//! it exists. All environment effects go through [`OverlayHost`].

use log::{debug, warn};

use line_gauge::{compute_stats, GaugeError};

use crate::card::{CardContent, CardStats};

/// Viewport pointer position.
pub type PointerPos = (f64, f64);

/// Vertical gap between the pointer and the card's top edge.
const CARD_POINTER_OFFSET_PX: f64 = 10.0;

/// Environment surface for one overlay session.
///
/// A real binding implements this over its document: marker attributes for
/// the highlight outline, an injected global stylesheet, a floating card
/// node, and a [`line_gauge::TextHost`]/[`line_gauge::LayoutOracle`] pair
/// behind [`measure`](Self::measure).
pub trait OverlayHost {
    /// Hover target identity (an element reference in a real binding).
    type Target: Clone + PartialEq;

    /// Targets the overlay never measures (document roots and similar).
    fn is_ignorable(&self, target: &Self::Target) -> bool;

    /// Short descriptor for the card header, e.g. `p#intro.note`.
    fn describe(&self, target: &Self::Target) -> String;

    /// Apply the subject marker to `target` (drives the highlight style).
    fn mark_subject(&mut self, target: &Self::Target);

    /// Remove the subject marker from `target`.
    fn clear_subject(&mut self, target: &Self::Target);

    /// Install the global highlight style for marked subjects.
    fn install_highlight_style(&mut self);

    /// Remove the global highlight style.
    fn remove_highlight_style(&mut self);

    /// Run one measurement pass over `target`'s container.
    fn measure(&mut self, target: &Self::Target) -> Result<Vec<usize>, GaugeError>;

    /// Create the card, or update it in place, with `content` at `at`.
    fn show_card(&mut self, content: &CardContent, at: PointerPos);

    /// Move the existing card to `at`.
    fn move_card(&mut self, at: PointerPos);

    /// Destroy the card.
    fn remove_card(&mut self);
}

/// Session lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Not started or cancelled; no styles, no card, no marker.
    #[default]
    Inactive,
    /// Started; waiting for the pointer to enter a measurable subject.
    Tracking,
    /// A card is on screen for the current subject.
    Displaying,
}

/// One overlay session over an injected host.
pub struct OverlaySession<H: OverlayHost> {
    host: H,
    state: SessionState,
    subject: Option<H::Target>,
    card_shown: bool,
}

impl<H: OverlayHost> OverlaySession<H> {
    /// Create an inactive session around `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            state: SessionState::Inactive,
            subject: None,
            card_shown: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Host access for bindings that need it between events.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Start tracking: installs the highlight style. No-op when already
    /// started.
    pub fn start(&mut self) {
        if self.state != SessionState::Inactive {
            return;
        }
        self.host.install_highlight_style();
        self.state = SessionState::Tracking;
    }

    /// Pointer entered `target`.
    ///
    /// Ignorable targets leave the state untouched. Otherwise the target
    /// becomes the subject: it is marked, measured, and the card is shown
    /// at the pointer. A failed pass keeps the session alive and shows the
    /// card without stats, the same as a subject with no text.
    pub fn pointer_over(&mut self, target: &H::Target, at: PointerPos) {
        if self.state == SessionState::Inactive {
            return;
        }
        if self.host.is_ignorable(target) {
            debug!("ignoring hover target");
            return;
        }

        self.host.mark_subject(target);
        self.subject = Some(target.clone());

        let stats = match self.host.measure(target) {
            Ok(lengths) => compute_stats(&lengths).map(CardStats::from),
            Err(err) => {
                warn!("measurement pass failed: {}", err);
                None
            }
        };
        let content = CardContent {
            subject: self.host.describe(target),
            stats,
        };
        self.host.show_card(&content, card_position(at));
        self.card_shown = true;
        self.state = SessionState::Displaying;
    }

    /// Pointer moved; the card follows while it exists.
    pub fn pointer_move(&mut self, at: PointerPos) {
        if self.card_shown {
            self.host.move_card(card_position(at));
        }
    }

    /// Pointer left `target`; its subject marker is cleared. The card
    /// stays until the next hover or cancel.
    pub fn pointer_out(&mut self, target: &H::Target) {
        self.host.clear_subject(target);
        if self.subject.as_ref() == Some(target) {
            self.subject = None;
            if self.state == SessionState::Displaying {
                self.state = SessionState::Tracking;
            }
        }
    }

    /// Cancel the session (the Escape path). Clears any marker, removes
    /// the card and highlight style. Idempotent.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Inactive {
            return;
        }
        if let Some(subject) = self.subject.take() {
            self.host.clear_subject(&subject);
        }
        if self.card_shown {
            self.host.remove_card();
            self.card_shown = false;
        }
        self.host.remove_highlight_style();
        self.state = SessionState::Inactive;
    }
}

fn card_position(at: PointerPos) -> PointerPos {
    (at.0, at.1 + CARD_POINTER_OFFSET_PX)
}
