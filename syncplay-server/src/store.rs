//! Canonical playback state store
//!
//! Sole owner and arbiter of `PlaybackState`. Every operation is a single
//! synchronous step with total behavior: malformed or out-of-range input
//! degrades to a clamp or a no-op, never a panic or a partial update. The
//! store performs no I/O and holds no locks; atomicity comes from the hub
//! dispatching one message at a time.
//!
//! The clock fields are advisory telemetry. The store never advances
//! `current_time` on its own; it only records what the most recent
//! heartbeat or seek reported.

use syncplay_common::{PlaybackState, Track, MAX_QUEUE_SIZE};

/// Result of `append_track`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Append {
    /// Whether the track was admitted (false: queue at capacity)
    pub added: bool,
    /// Whether the queue was empty before the append (caller may autoplay)
    pub was_first: bool,
}

/// Result of `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advanced {
    /// Whether the cursor actually moved
    pub moved: bool,
    /// For `Next`: whether a track existed beyond the cursor. Always true
    /// for `Prev` (backing off the start is a plain no-op, not terminal).
    pub has_next: bool,
}

/// Cursor movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Owns the single canonical `PlaybackState`.
pub struct PlaybackStore {
    state: PlaybackState,
}

impl PlaybackStore {
    /// New store with the empty jukebox state: no queue, stopped.
    pub fn new() -> Self {
        Self {
            state: PlaybackState::new(),
        }
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    /// Borrow the current state.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Full queue replacement, truncated to `MAX_QUEUE_SIZE`.
    ///
    /// Resets the cursor to 0 (zeroing the clock) if it would land out of
    /// range. Leaves `is_playing` alone unless the queue became empty.
    pub fn replace_queue(&mut self, mut tracks: Vec<Track>) -> &PlaybackState {
        tracks.truncate(MAX_QUEUE_SIZE);
        self.state.queue = tracks;

        if self.state.current_index >= self.state.queue.len() {
            self.state.current_index = 0;
            self.state.current_time = 0.0;
        }
        if self.state.queue.is_empty() {
            self.state.is_playing = false;
        }
        &self.state
    }

    /// Append one track, refusing once the queue is at capacity.
    pub fn append_track(&mut self, track: Track) -> Append {
        if self.state.queue.len() >= MAX_QUEUE_SIZE {
            return Append {
                added: false,
                was_first: false,
            };
        }
        let was_first = self.state.queue.is_empty();
        self.state.queue.push(track);
        Append {
            added: true,
            was_first,
        }
    }

    /// Empty the queue and reset cursor, clock, and transport flag.
    pub fn clear(&mut self) -> &PlaybackState {
        self.state = PlaybackState::new();
        &self.state
    }

    /// Move the cursor to `index`, zeroing the clock.
    ///
    /// Returns `None` for out-of-range indices (pure no-op), otherwise
    /// `Some(moved)`. Re-selecting the current track still zeroes the clock
    /// (restart-from-top) but reports `moved = false`.
    pub fn select_index(&mut self, index: usize) -> Option<bool> {
        if index >= self.state.queue.len() {
            return None;
        }
        let moved = index != self.state.current_index;
        self.state.current_index = index;
        self.state.current_time = 0.0;
        Some(moved)
    }

    /// Move the cursor one step.
    ///
    /// `Next` past the last track is terminal: the cursor stays, playback
    /// stops, no wraparound. `Prev` at the first track is a no-op and never
    /// touches `is_playing`.
    pub fn advance(&mut self, direction: Direction) -> Advanced {
        match direction {
            Direction::Next => {
                let next = self.state.current_index + 1;
                if next < self.state.queue.len() {
                    self.state.current_index = next;
                    self.state.current_time = 0.0;
                    Advanced {
                        moved: true,
                        has_next: true,
                    }
                } else {
                    self.state.is_playing = false;
                    Advanced {
                        moved: false,
                        has_next: false,
                    }
                }
            }
            Direction::Prev => {
                let moved = if self.state.current_index > 0 {
                    self.state.current_index -= 1;
                    self.state.current_time = 0.0;
                    true
                } else {
                    false
                };
                Advanced {
                    moved,
                    has_next: true,
                }
            }
        }
    }

    /// Set the transport flag. Starting playback on an empty queue is a
    /// no-op so the empty-queue invariant holds.
    pub fn set_playing(&mut self, playing: bool) -> &PlaybackState {
        if playing && self.state.queue.is_empty() {
            return &self.state;
        }
        self.state.is_playing = playing;
        &self.state
    }

    /// Record a reported playhead position, clamped to `>= 0`. Non-finite
    /// values are ignored.
    pub fn set_time(&mut self, time: f64) -> &PlaybackState {
        if time.is_finite() {
            self.state.current_time = time.max(0.0);
        }
        &self.state
    }

    /// Record a reported track length, clamped to `>= 0`. Non-finite
    /// values are ignored.
    pub fn set_duration(&mut self, duration: f64) -> &PlaybackState {
        if duration.is_finite() {
            self.state.duration = duration.max(0.0);
        }
        &self.state
    }

    /// Apply a periodic time/duration heartbeat from the active client.
    /// Touches only the clock fields, never the queue or cursor.
    pub fn apply_heartbeat(&mut self, time: f64, duration: f64) -> &PlaybackState {
        self.set_time(time);
        self.set_duration(duration);
        &self.state
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new()
    }
}
