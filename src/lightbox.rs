// Gallery lightbox: which single item is focused, ring navigation with
// wraparound, and the directional slide the shell plays between foci.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MediaItem};
use crate::types::Direction;

/// Horizontal distance slides travel on and off screen, in pixels.
const SLIDE_DISTANCE_PX: f32 = 1000.0;

/// Current focus. `selected` is `None` while the lightbox is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected: Option<usize>,
    pub direction: Direction,
}

/// Keys the open lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Dismiss,
    Advance,
    Retreat,
}

impl LightboxKey {
    /// Map a DOM `KeyboardEvent.key` value. Other keys are not ours.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(LightboxKey::Dismiss),
            "ArrowRight" => Some(LightboxKey::Advance),
            "ArrowLeft" => Some(LightboxKey::Retreat),
            _ => None,
        }
    }
}

/// Controller over a fixed catalog treated as a closed ring.
#[derive(Debug, Clone)]
pub struct Lightbox {
    catalog: Catalog,
    selection: SelectionState,
}

impl Lightbox {
    pub fn new(catalog: Catalog) -> Self {
        Lightbox {
            catalog,
            selection: SelectionState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_open(&self) -> bool {
        self.selection.selected.is_some()
    }

    /// Focus `index` without a slide direction.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid catalog index.
    pub fn open(&mut self, index: usize) {
        assert!(
            index < self.catalog.len(),
            "lightbox index {index} out of range for {} items",
            self.catalog.len()
        );
        self.selection = SelectionState {
            selected: Some(index),
            direction: Direction::Neutral,
        };
    }

    pub fn close(&mut self) {
        self.selection.selected = None;
    }

    /// No-op while closed.
    pub fn next(&mut self) {
        if let Some(index) = self.selection.selected {
            self.selection = SelectionState {
                selected: Some((index + 1) % self.catalog.len()),
                direction: Direction::Forward,
            };
        }
    }

    /// No-op while closed.
    pub fn prev(&mut self) {
        if let Some(index) = self.selection.selected {
            let len = self.catalog.len();
            self.selection = SelectionState {
                selected: Some((index + len - 1) % len),
                direction: Direction::Backward,
            };
        }
    }

    /// Apply a key press. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: LightboxKey) -> bool {
        if !self.is_open() {
            return false;
        }
        match key {
            LightboxKey::Dismiss => self.close(),
            LightboxKey::Advance => self.next(),
            LightboxKey::Retreat => self.prev(),
        }
        true
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.selection
            .selected
            .and_then(|index| self.catalog.get(index))
    }

    pub fn transition(&self) -> SlideTransition {
        SlideTransition::for_direction(self.selection.direction)
    }

    /// Snapshot for the shell, `None` while closed.
    pub fn view(&self) -> Option<LightboxView> {
        let index = self.selection.selected?;
        let item = self.catalog.get(index)?.clone();
        Some(LightboxView {
            index,
            item,
            direction: self.selection.direction,
            object_position: "center",
            transition: self.transition(),
        })
    }
}

/// What the open lightbox shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightboxView {
    pub index: usize,
    pub item: MediaItem,
    pub direction: Direction,
    /// Full-size images are always centered; grid crops do not carry over.
    pub object_position: &'static str,
    pub transition: SlideTransition,
}

/// One keyframe of the slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlidePose {
    pub x: f32,
    pub opacity: f32,
    pub scale: f32,
}

/// Mirrored enter/exit poses for a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideTransition {
    pub enter: SlidePose,
    pub center: SlidePose,
    pub exit: SlidePose,
    pub slide_ms: u32,
    pub fade_ms: u32,
    pub overlay_fade_ms: u32,
}

impl SlideTransition {
    pub fn for_direction(direction: Direction) -> Self {
        // Forward: new image comes in from the right, old one leaves left.
        let enter_x = if direction == Direction::Forward {
            SLIDE_DISTANCE_PX
        } else {
            -SLIDE_DISTANCE_PX
        };
        let exit_x = if direction == Direction::Backward {
            SLIDE_DISTANCE_PX
        } else {
            -SLIDE_DISTANCE_PX
        };
        SlideTransition {
            enter: SlidePose {
                x: enter_x,
                opacity: 0.0,
                scale: 0.8,
            },
            center: SlidePose {
                x: 0.0,
                opacity: 1.0,
                scale: 1.0,
            },
            exit: SlidePose {
                x: exit_x,
                opacity: 0.0,
                scale: 0.8,
            },
            slide_ms: 400,
            fade_ms: 300,
            overlay_fade_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LayoutHint;
    use proptest::prelude::*;

    fn catalog_of(len: usize) -> Catalog {
        Catalog::new(
            (0..len as u32)
                .map(|id| MediaItem {
                    id,
                    source: format!("/p{id}.jpg"),
                    label: format!("Photo {id}"),
                    layout: LayoutHint::default(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn fifteen_item_scenario_wraps_backwards() {
        let mut lightbox = Lightbox::new(Catalog::builtin());
        lightbox.open(0);
        lightbox.next();
        assert_eq!(lightbox.selection().selected, Some(1));
        assert_eq!(lightbox.selection().direction, Direction::Forward);

        lightbox.prev();
        lightbox.prev();
        assert_eq!(lightbox.selection().selected, Some(14));
        assert_eq!(lightbox.selection().direction, Direction::Backward);
        assert_eq!(lightbox.current().unwrap().id, 15);
    }

    #[test]
    fn open_resets_direction() {
        let mut lightbox = Lightbox::new(catalog_of(3));
        lightbox.open(1);
        lightbox.next();
        lightbox.open(2);
        assert_eq!(lightbox.selection().direction, Direction::Neutral);
    }

    #[test]
    fn close_is_idempotent_and_blocks_navigation() {
        let mut lightbox = Lightbox::new(catalog_of(4));
        lightbox.close();
        lightbox.open(2);
        lightbox.close();
        lightbox.close();
        lightbox.next();
        lightbox.prev();
        assert_eq!(lightbox.selection().selected, None);
        assert!(lightbox.current().is_none());
        assert!(lightbox.view().is_none());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn open_out_of_range_panics() {
        let mut lightbox = Lightbox::new(catalog_of(2));
        lightbox.open(2);
    }

    #[test]
    fn single_item_ring() {
        let mut lightbox = Lightbox::new(catalog_of(1));
        lightbox.open(0);
        lightbox.next();
        assert_eq!(lightbox.selection().selected, Some(0));
        lightbox.prev();
        assert_eq!(lightbox.selection().selected, Some(0));
    }

    #[test]
    fn keys_map_to_operations() {
        let mut lightbox = Lightbox::new(catalog_of(5));
        assert!(!lightbox.handle_key(LightboxKey::Advance));

        lightbox.open(4);
        assert!(lightbox.handle_key(LightboxKey::Advance));
        assert_eq!(lightbox.selection().selected, Some(0));
        assert!(lightbox.handle_key(LightboxKey::Retreat));
        assert_eq!(lightbox.selection().selected, Some(4));
        assert!(lightbox.handle_key(LightboxKey::Dismiss));
        assert!(!lightbox.is_open());

        assert_eq!(LightboxKey::from_dom_key("Escape"), Some(LightboxKey::Dismiss));
        assert_eq!(LightboxKey::from_dom_key("Enter"), None);
    }

    #[test]
    fn slide_directions_mirror() {
        let forward = SlideTransition::for_direction(Direction::Forward);
        assert_eq!(forward.enter.x, 1000.0);
        assert_eq!(forward.exit.x, -1000.0);

        let backward = SlideTransition::for_direction(Direction::Backward);
        assert_eq!(backward.enter.x, -1000.0);
        assert_eq!(backward.exit.x, 1000.0);

        let neutral = SlideTransition::for_direction(Direction::Neutral);
        assert_eq!(neutral.center.x, 0.0);
        assert_eq!(neutral.center.opacity, 1.0);
    }

    #[test]
    fn view_always_centers_the_image() {
        let mut lightbox = Lightbox::new(Catalog::builtin());
        lightbox.open(3);
        let view = lightbox.view().unwrap();
        assert_eq!(view.item.layout.object_position.as_deref(), Some("0% 20%"));
        assert_eq!(view.object_position, "center");
    }

    proptest! {
        #[test]
        fn next_len_times_closes_the_ring(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut lightbox = Lightbox::new(catalog_of(len));
            lightbox.open(start);
            for _ in 0..len {
                lightbox.next();
            }
            prop_assert_eq!(lightbox.selection().selected, Some(start));
        }

        #[test]
        fn prev_undoes_next(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut lightbox = Lightbox::new(catalog_of(len));
            lightbox.open(start);
            lightbox.next();
            lightbox.prev();
            prop_assert_eq!(lightbox.selection().selected, Some(start));
        }

        #[test]
        fn selection_stays_in_bounds(
            len in 1usize..20,
            start in 0usize..20,
            moves in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let mut lightbox = Lightbox::new(catalog_of(len));
            lightbox.open(start % len);
            for forward in moves {
                if forward { lightbox.next() } else { lightbox.prev() }
                let index = lightbox.selection().selected.unwrap();
                prop_assert!(index < len);
            }
        }
    }
}
