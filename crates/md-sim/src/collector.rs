//! Fan-in of worker events into one ordered log.

use std::sync::mpsc::{self, Receiver, Sender};

use md_core::{EventLog, MoveEvent};

use crate::SimObserver;

/// Create the multi-producer channel workers send events on.
pub fn event_channel() -> (Sender<MoveEvent>, Receiver<MoveEvent>) {
    mpsc::channel()
}

/// Single consumer of the event channel.
///
/// Appends events in arrival order with no filtering or reordering, and
/// forwards each one to the observer.  Draining ends when every sender has
/// been dropped, i.e. when every worker has finished.
pub struct EventCollector<'o, O: SimObserver> {
    rx:       Receiver<MoveEvent>,
    observer: &'o mut O,
    log:      EventLog,
}

impl<'o, O: SimObserver> EventCollector<'o, O> {
    pub fn new(rx: Receiver<MoveEvent>, observer: &'o mut O) -> Self {
        Self { rx, observer, log: EventLog::new() }
    }

    /// Block until all senders hang up; return the assembled log.
    pub fn drain(mut self) -> EventLog {
        for event in self.rx.iter() {
            self.observer.on_event(&event);
            self.log.push(event);
        }
        self.log
    }
}
