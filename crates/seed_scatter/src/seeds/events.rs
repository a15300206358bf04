//! Event types and sinks for observing seed generation runs.
//!
//! This module defines [`SeedEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::seeds::builder::SeedSetBuilder`]
//! walks its tiles.
use glam::DVec2;

use crate::quadtree::cell::{Cell, Tile};
use crate::seeds::builder::SeedSet;
use crate::seeds::config::SeedConfig;

/// Describes events emitted while generating seeds.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum SeedEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// The run configuration used.
        config: SeedConfig,
        /// Number of coarse tiles covering the domain.
        tile_count: usize,
        /// Resolved run offset shared by every cell.
        run_offset: u32,
    },

    /// Emitted when the whole run finishes.
    RunFinished {
        /// Aggregated result.
        result: SeedSet,
    },

    /// Emitted when a tile starts processing.
    TileStarted {
        /// Index of the tile in processing order.
        index: usize,
        /// The tile.
        tile: Tile,
    },

    /// Emitted when a tile finishes processing.
    TileFinished {
        /// Index of the tile in processing order.
        index: usize,
        /// The tile.
        tile: Tile,
        /// Seeds emitted by this tile.
        points: usize,
        /// Leaf cells sampled in this tile.
        leaves: usize,
    },

    /// Emitted after a leaf cell was sampled.
    LeafSampled {
        /// Index of the tile containing the leaf.
        tile_index: usize,
        /// The leaf cell, relative to its tile.
        cell: Cell,
        /// Continuous target count of the leaf.
        target_count: f64,
        /// Seeds emitted by the leaf.
        emitted: usize,
        /// World-space center of the leaf.
        center: DVec2,
    },

    /// Non-fatal warning generated during sampling.
    Warning {
        /// Context string (e.g. tile id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`SeedEvent`], used by sinks to filter what they want.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedEventKind {
    RunStarted,
    RunFinished,
    TileStarted,
    TileFinished,
    LeafSampled,
    Warning,
}

impl SeedEvent {
    pub fn kind(&self) -> SeedEventKind {
        match self {
            SeedEvent::RunStarted { .. } => SeedEventKind::RunStarted,
            SeedEvent::RunFinished { .. } => SeedEventKind::RunFinished,
            SeedEvent::TileStarted { .. } => SeedEventKind::TileStarted,
            SeedEvent::TileFinished { .. } => SeedEventKind::TileFinished,
            SeedEvent::LeafSampled { .. } => SeedEventKind::LeafSampled,
            SeedEvent::Warning { .. } => SeedEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`SeedEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SeedEvent);

    /// Whether events of `kind` should be built and sent at all.
    ///
    /// Producers check this before constructing an event, so filtering out
    /// [`SeedEventKind::LeafSampled`] keeps the hot loop free of allocations.
    #[inline]
    fn wants(&self, _kind: SeedEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SeedEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SeedEvent) {}

    #[inline]
    fn wants(&self, _kind: SeedEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SeedEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SeedEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SeedEvent),
{
    #[inline]
    fn send(&mut self, event: SeedEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SeedEvent>,
    only: Option<Vec<SeedEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only events whose kind is in `kinds`.
    pub fn only(kinds: impl IntoIterator<Item = SeedEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<SeedEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SeedEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SeedEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    #[inline]
    fn wants(&self, kind: SeedEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: SeedEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: SeedEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> SeedEvent {
        SeedEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_vec_sink_drops_unwanted_kinds() {
        let mut sink = VecSink::only([SeedEventKind::Warning]);
        assert!(sink.wants(SeedEventKind::Warning));
        assert!(!sink.wants(SeedEventKind::LeafSampled));
        sink.send(warning("kept"));
        sink.send(SeedEvent::TileStarted {
            index: 0,
            tile: crate::quadtree::cell::Tile::new(crate::quadtree::cell::TileId(0, 0), 1.0),
        });
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        let sink = ();
        assert!(!sink.wants(SeedEventKind::RunStarted));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            SeedEvent::Warning { .. }
        ));
    }

    #[test]
    fn multi_sink_respects_member_filters() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::only([SeedEventKind::Warning]),
            VecSink::only([SeedEventKind::RunFinished]),
        ]);
        assert!(multi.wants(SeedEventKind::Warning));
        assert!(!multi.wants(SeedEventKind::LeafSampled));
        multi.send(warning("ctx"));
        assert_eq!(multi.sinks[0].len(), 1);
        assert!(multi.sinks[1].is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
