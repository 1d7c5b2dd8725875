// Staggered entrance animations. Each section draws per-element delays once
// its trigger fires, so elements "pop in" instead of appearing together.

use serde::Serialize;

use crate::types::SectionId;

/// Source of uniform values in `[0, 1)`.
///
/// Injected so tests get deterministic delays; only the outermost composition
/// uses real randomness.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Values are clamped into `[0, 1)`. An empty list always yields `0.0`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        SequenceSource { values, cursor: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

/// Reproducible pseudo-random values from a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: fastrand::Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        SeededSource {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.f64()
    }
}

/// The host's own randomness: `Math.random()` in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSource;

impl RandomSource for HostSource {
    #[cfg(target_arch = "wasm32")]
    fn next_unit(&mut self) -> f64 {
        js_sys::Math::random()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn next_unit(&mut self) -> f64 {
        fastrand::f64()
    }
}

/// Draw `count` independent delays of `min_ms + u * range_ms`.
pub fn assign_delays(
    count: usize,
    min_ms: f64,
    range_ms: f64,
    source: &mut dyn RandomSource,
) -> Vec<f64> {
    (0..count)
        .map(|_| min_ms + source.next_unit() * range_ms)
        .collect()
}

/// One-shot reveal trigger: armed on mount, fired at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealLatch {
    #[default]
    Armed,
    Fired,
}

impl RevealLatch {
    /// Returns `true` only on the Armed -> Fired edge.
    pub fn fire(&mut self) -> bool {
        match self {
            RevealLatch::Armed => {
                *self = RevealLatch::Fired;
                true
            }
            RevealLatch::Fired => false,
        }
    }

    /// Fire when the observed intersection ratio reaches `threshold`.
    pub fn observe(&mut self, ratio: f64, threshold: f64) -> bool {
        ratio >= threshold && ratio > 0.0 && self.fire()
    }

    pub fn has_fired(&self) -> bool {
        *self == RevealLatch::Fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealTrigger {
    /// Fires as soon as the section mounts.
    Mount,
    /// Fires the first time the section scrolls into view.
    Visibility,
}

/// A set of elements sharing one delay distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealGroup {
    pub name: &'static str,
    pub count: usize,
    pub min_ms: f64,
    pub range_ms: f64,
}

impl RevealGroup {
    const fn new(name: &'static str, count: usize, min_ms: f64, range_ms: f64) -> Self {
        RevealGroup {
            name,
            count,
            min_ms,
            range_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealPlan {
    pub section: SectionId,
    pub trigger: RevealTrigger,
    pub groups: Vec<RevealGroup>,
}

impl RevealPlan {
    /// Per-section presets. `gallery_len` sizes the gallery tile group.
    pub fn for_section(section: SectionId, gallery_len: usize) -> Self {
        let (trigger, groups) = match section {
            SectionId::Gateway => (
                RevealTrigger::Mount,
                vec![RevealGroup::new("elements", 4, 0.0, 1500.0)],
            ),
            SectionId::Loading => (
                RevealTrigger::Mount,
                vec![RevealGroup::new("elements", 3, 0.0, 1000.0)],
            ),
            SectionId::Intro => (
                RevealTrigger::Mount,
                vec![
                    RevealGroup::new("background", 10, 0.0, 1500.0),
                    RevealGroup::new("main", 3, 500.0, 1500.0),
                ],
            ),
            SectionId::Gallery => (
                RevealTrigger::Visibility,
                vec![
                    RevealGroup::new("tiles", gallery_len, 0.0, 1500.0),
                    RevealGroup::new("caption", 4, 1000.0, 1000.0),
                ],
            ),
            SectionId::Note => (
                RevealTrigger::Visibility,
                vec![RevealGroup::new("elements", 3, 0.0, 1500.0)],
            ),
        };
        RevealPlan {
            section,
            trigger,
            groups,
        }
    }

    pub fn draw(&self, source: &mut dyn RandomSource) -> RevealBatch {
        RevealBatch {
            section: self.section,
            groups: self
                .groups
                .iter()
                .map(|group| GroupDelays {
                    name: group.name,
                    delays_ms: assign_delays(group.count, group.min_ms, group.range_ms, source),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDelays {
    pub name: &'static str,
    pub delays_ms: Vec<f64>,
}

/// Delays for every element of a section whose reveal just fired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealBatch {
    pub section: SectionId,
    pub groups: Vec<GroupDelays>,
}

/// A mounted section's plan plus its latch.
#[derive(Debug, Clone)]
pub struct SectionReveal {
    plan: RevealPlan,
    latch: RevealLatch,
}

impl SectionReveal {
    pub fn new(plan: RevealPlan) -> Self {
        SectionReveal {
            plan,
            latch: RevealLatch::Armed,
        }
    }

    pub fn section(&self) -> SectionId {
        self.plan.section
    }

    pub fn has_fired(&self) -> bool {
        self.latch.has_fired()
    }

    /// Fire mount-triggered sections.
    pub fn on_mount(&mut self, source: &mut dyn RandomSource) -> Option<RevealBatch> {
        if self.plan.trigger != RevealTrigger::Mount || !self.latch.fire() {
            return None;
        }
        Some(self.plan.draw(source))
    }

    /// Feed a visibility observation. Ignored once fired.
    pub fn on_visibility(
        &mut self,
        ratio: f64,
        threshold: f64,
        source: &mut dyn RandomSource,
    ) -> Option<RevealBatch> {
        if self.plan.trigger != RevealTrigger::Visibility
            || !self.latch.observe(ratio, threshold)
        {
            return None;
        }
        Some(self.plan.draw(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_follow_min_plus_range() {
        let mut source = SequenceSource::new(vec![0.0, 0.5, 0.25]);
        let delays = assign_delays(4, 1000.0, 1000.0, &mut source);
        assert_eq!(delays, vec![1000.0, 1500.0, 1250.0, 1000.0]);
    }

    #[test]
    fn sequence_values_are_clamped() {
        let mut source = SequenceSource::new(vec![-1.0, 2.0, f64::NAN]);
        assert_eq!(source.next_unit(), 0.0);
        assert!(source.next_unit() < 1.0);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(SequenceSource::new(vec![]).next_unit(), 0.0);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let a = assign_delays(8, 0.0, 1500.0, &mut SeededSource::new(42));
        let b = assign_delays(8, 0.0, 1500.0, &mut SeededSource::new(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|d| (0.0..1500.0).contains(d)));
    }

    #[test]
    fn host_source_stays_in_unit_range() {
        let mut source = HostSource;
        for _ in 0..100 {
            let value = source.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn latch_fires_once() {
        let mut latch = RevealLatch::default();
        assert!(!latch.observe(0.05, 0.1));
        assert!(latch.observe(0.1, 0.1));
        assert!(!latch.observe(1.0, 0.1));
        assert!(!latch.fire());
        assert!(latch.has_fired());
    }

    #[test]
    fn zero_ratio_never_fires_even_with_zero_threshold() {
        let mut latch = RevealLatch::default();
        assert!(!latch.observe(0.0, 0.0));
        assert!(!latch.has_fired());
    }

    #[test]
    fn mount_sections_ignore_visibility() {
        let mut source = SequenceSource::new(vec![0.5]);
        let mut intro = SectionReveal::new(RevealPlan::for_section(SectionId::Intro, 15));
        assert!(intro.on_visibility(1.0, 0.1, &mut source).is_none());

        let batch = intro.on_mount(&mut source).unwrap();
        assert_eq!(batch.groups[0].delays_ms.len(), 10);
        assert_eq!(batch.groups[1].delays_ms, vec![1250.0; 3]);
        assert!(intro.on_mount(&mut source).is_none());
    }

    #[test]
    fn visibility_sections_wait_for_the_observer() {
        let mut source = SequenceSource::new(vec![0.0]);
        let mut gallery = SectionReveal::new(RevealPlan::for_section(SectionId::Gallery, 7));
        assert!(gallery.on_mount(&mut source).is_none());
        assert!(!gallery.has_fired());

        let batch = gallery.on_visibility(0.3, 0.1, &mut source).unwrap();
        assert_eq!(batch.section, SectionId::Gallery);
        assert_eq!(batch.groups[0].name, "tiles");
        assert_eq!(batch.groups[0].delays_ms.len(), 7);
        assert_eq!(batch.groups[1].delays_ms, vec![1000.0; 4]);
        assert!(gallery.on_visibility(0.9, 0.1, &mut source).is_none());
    }

    #[test]
    fn section_that_is_never_seen_stays_armed() {
        let mut source = SequenceSource::new(vec![0.0]);
        let mut note = SectionReveal::new(RevealPlan::for_section(SectionId::Note, 15));
        assert!(note.on_visibility(0.0, 0.1, &mut source).is_none());
        assert!(!note.has_fired());
    }
}
