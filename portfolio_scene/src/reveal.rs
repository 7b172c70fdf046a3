//! Visibility-triggered reveal: a two-state machine driven by how much of a
//! tracked region is inside the viewport, plus the staggered progress tracks
//! it animates.
//!
//! Leaving the viewport animates bars back to zero, so re-entering replays
//! the reveal from scratch.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use bevy::prelude::*;

/// Fraction of the region that must be on screen to count as visible.
pub const REVEAL_THRESHOLD: f32 = 0.3;
pub const REVEAL_DURATION_SECS: f32 = 1.0;
/// Extra delay per bar index on reveal.
pub const STAGGER_SECS: f32 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Visible,
}

/// Share of `region`'s area that lies inside `viewport`, in `[0, 1]`.
pub fn intersection_ratio(region: Rect, viewport: Rect) -> f32 {
    let area = region.width() * region.height();
    if area <= 0.0 || !area.is_finite() {
        return 0.0;
    }
    let overlap = region.intersect(viewport);
    if overlap.is_empty() {
        return 0.0;
    }
    (overlap.width() * overlap.height() / area).clamp(0.0, 1.0)
}

fn ease_out(progress: f32) -> f32 {
    1.0 - (1.0 - progress).powi(3)
}

/// One bar's animated width, in percent.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressTrack {
    pub target_percent: f32,
    pub stagger_index: usize,
    from: f32,
    to: f32,
    delay: f32,
    started_at: f32,
}

impl ProgressTrack {
    pub fn new(target_percent: f32, stagger_index: usize) -> Self {
        Self {
            target_percent,
            stagger_index,
            from: 0.0,
            to: 0.0,
            delay: 0.0,
            started_at: 0.0,
        }
    }

    pub fn width_at(&self, now: f32) -> f32 {
        let local = now - self.started_at - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        let progress = local / REVEAL_DURATION_SECS;
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out(progress)
    }

    fn retarget(&mut self, state: RevealState, now: f32) {
        self.from = self.width_at(now);
        self.started_at = now;
        (self.to, self.delay) = match state {
            RevealState::Visible => (
                self.target_percent,
                self.stagger_index as f32 * STAGGER_SECS,
            ),
            RevealState::Hidden => (0.0, 0.0),
        };
    }
}

/// Hidden/Visible state machine with its dependent progress tracks.
#[derive(Clone, Debug)]
pub struct RevealController {
    threshold: f32,
    state: RevealState,
    last_ratio: Option<f32>,
    tracks: Vec<ProgressTrack>,
}

impl RevealController {
    /// A hidden controller animating one track per `(target, stagger index)`.
    pub fn new(tracks: impl IntoIterator<Item = (f32, usize)>) -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            state: RevealState::Hidden,
            last_ratio: None,
            tracks: tracks
                .into_iter()
                .map(|(target, index)| ProgressTrack::new(target, index))
                .collect(),
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn tracks(&self) -> &[ProgressTrack] {
        &self.tracks
    }

    /// Feeds the latest intersection ratio. Returns the new state when the
    /// ratio crossed the threshold, `None` otherwise.
    pub fn observe(&mut self, ratio: f32, now: f32) -> Option<RevealState> {
        if !ratio.is_finite() || self.last_ratio == Some(ratio) {
            return None;
        }
        self.last_ratio = Some(ratio);

        let next = if ratio >= self.threshold {
            RevealState::Visible
        } else {
            RevealState::Hidden
        };
        if next == self.state {
            return None;
        }
        self.state = next;
        for track in &mut self.tracks {
            track.retarget(next, now);
        }
        Some(next)
    }

    pub fn widths_at(&self, now: f32) -> Vec<f32> {
        self.tracks.iter().map(|t| t.width_at(now)).collect()
    }
}

/// Registry of live viewport observations. Handles unregister themselves on
/// drop, so an owner that goes away for any reason releases its observation.
#[derive(Resource, Clone, Default)]
pub struct ViewportObservers {
    inner: Arc<Mutex<ObserverSet>>,
}

#[derive(Debug, Default)]
struct ObserverSet {
    next_id: u64,
    live: HashSet<u64>,
}

impl ViewportObservers {
    pub fn observe(&self) -> ObservationHandle {
        let id = with_set(&self.inner, |set| {
            let id = set.next_id;
            set.next_id += 1;
            set.live.insert(id);
            id
        });
        ObservationHandle {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn active(&self) -> usize {
        with_set(&self.inner, |set| set.live.len())
    }
}

fn with_set<R>(registry: &Mutex<ObserverSet>, f: impl FnOnce(&mut ObserverSet) -> R) -> R {
    let mut guard = registry.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// A live observation. Dropping it stops the observation.
#[derive(Debug)]
pub struct ObservationHandle {
    id: u64,
    registry: Weak<Mutex<ObserverSet>>,
}

impl ObservationHandle {
    pub fn is_live(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| with_set(&registry, |set| set.live.contains(&self.id)))
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        if with_set(&registry, |set| set.live.remove(&self.id)) {
            debug!("portfolio: released viewport observation {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRONTEND: [f32; 4] = [95.0, 90.0, 85.0, 92.0];

    fn frontend_controller() -> RevealController {
        RevealController::new(FRONTEND.iter().enumerate().map(|(i, t)| (*t, i)))
    }

    #[test]
    fn starts_hidden_with_empty_bars() {
        let controller = frontend_controller();
        assert_eq!(controller.state(), RevealState::Hidden);
        assert_eq!(controller.widths_at(10.0), vec![0.0; 4]);
    }

    #[test]
    fn crossing_upwards_reveals_exactly_once() {
        let mut controller = frontend_controller();
        assert_eq!(controller.observe(0.1, 0.0), None);
        assert_eq!(controller.observe(0.29, 0.1), None);
        assert_eq!(controller.observe(0.3, 0.2), Some(RevealState::Visible));
        assert_eq!(controller.observe(0.6, 0.3), None);
        assert_eq!(controller.observe(1.0, 0.4), None);
        assert_eq!(controller.state(), RevealState::Visible);
    }

    #[test]
    fn bars_reach_exact_targets_after_the_animation() {
        let mut controller = frontend_controller();
        controller.observe(0.5, 2.0);
        let settled = 2.0 + 3.0 * STAGGER_SECS + REVEAL_DURATION_SECS + 0.01;
        assert_eq!(controller.widths_at(settled), FRONTEND.to_vec());
    }

    #[test]
    fn bars_are_staggered_by_index() {
        let mut controller = frontend_controller();
        controller.observe(0.5, 0.0);
        let widths = controller.widths_at(0.15);
        assert!(widths[0] > 0.0);
        assert!(widths[1] > 0.0 && widths[1] < widths[0]);
        assert_eq!(widths[2], 0.0);
        assert_eq!(widths[3], 0.0);
    }

    #[test]
    fn leaving_and_reentering_replays_the_reveal() {
        let mut controller = frontend_controller();
        controller.observe(0.5, 0.0);
        assert_eq!(controller.observe(0.1, 5.0), Some(RevealState::Hidden));
        assert_eq!(controller.widths_at(5.0 + REVEAL_DURATION_SECS), vec![0.0; 4]);

        assert_eq!(controller.observe(0.8, 10.0), Some(RevealState::Visible));
        assert_eq!(controller.widths_at(10.0), vec![0.0; 4]);
        assert_eq!(controller.widths_at(12.0), FRONTEND.to_vec());
    }

    #[test]
    fn intersection_ratio_is_area_share() {
        let region = Rect::new(0.0, 0.0, 100.0, 100.0);
        let viewport = Rect::new(0.0, 70.0, 100.0, 500.0);
        assert!((intersection_ratio(region, viewport) - 0.3).abs() < 1e-6);
        assert_eq!(intersection_ratio(region, Rect::new(200.0, 200.0, 300.0, 300.0)), 0.0);
        assert_eq!(intersection_ratio(Rect::new(0.0, 0.0, 0.0, 0.0), viewport), 0.0);
    }

    #[test]
    fn handles_release_on_drop() {
        let observers = ViewportObservers::default();
        let handle = observers.observe();
        assert!(handle.is_live());
        assert_eq!(observers.active(), 1);
        drop(handle);
        assert_eq!(observers.active(), 0);
    }

    #[test]
    fn handles_release_when_owner_panics() {
        let observers = ViewportObservers::default();
        let cloned = observers.clone();
        let result = std::panic::catch_unwind(move || {
            let _handle = cloned.observe();
            panic!("owner torn down abnormally");
        });
        assert!(result.is_err());
        assert_eq!(observers.active(), 0);
    }
}
