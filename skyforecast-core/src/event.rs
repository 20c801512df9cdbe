//! Terminal events, the crossterm poller, and mouse hit regions

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// The event payload handed to components
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse click/drag/move event
    Mouse(MouseEvent),
    /// Scroll wheel with position and delta (+1 down, -1 up)
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Screen position of a left/right/middle button press, if this is one.
    pub fn mouse_down_at(&self) -> Option<(u16, u16)> {
        match self {
            EventKind::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some((mouse.column, mouse.row))
            }
            _ => None,
        }
    }
}

/// Whether `(column, row)` lies inside `area`.
pub fn rect_contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Screen areas registered by currently visible components.
///
/// A component registers its area while it is rendered and deregisters when
/// it is hidden, so a hit-test against an id only succeeds during the
/// component's visible lifetime. The page uses this for "click outside
/// closes the dropdown".
#[derive(Debug, Clone)]
pub struct HitRegions<Id> {
    areas: HashMap<Id, Rect>,
}

impl<Id> Default for HitRegions<Id> {
    fn default() -> Self {
        Self {
            areas: HashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash> HitRegions<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or move) the area of a component.
    pub fn register(&mut self, id: Id, area: Rect) {
        self.areas.insert(id, area);
    }

    /// Remove a component's area. No-op if it was never registered.
    pub fn deregister(&mut self, id: Id) {
        self.areas.remove(&id);
    }

    pub fn is_registered(&self, id: Id) -> bool {
        self.areas.contains_key(&id)
    }

    pub fn area(&self, id: Id) -> Option<Rect> {
        self.areas.get(&id).copied()
    }

    /// Find the smallest registered area under the point.
    ///
    /// Nested regions (a dropdown inside the hero section) resolve to the
    /// innermost one.
    pub fn hit(&self, column: u16, row: u16) -> Option<Id> {
        self.areas
            .iter()
            .filter(|(_, area)| rect_contains(**area, column, row))
            .min_by_key(|(_, area)| area.area())
            .map(|(id, _)| *id)
    }
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm in short slices and forwards key, mouse and resize events
/// through `tx`. Stops when the token is cancelled or the receiver is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut processed = 0;
                    while processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        processed += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) => RawEvent::Key(key),
                            Ok(event::Event::Mouse(mouse)) => RawEvent::Mouse(mouse),
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            Ok(_) => continue,
                            Err(e) => {
                                debug!(error = %e, "Failed to read terminal event");
                                continue;
                            }
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}
