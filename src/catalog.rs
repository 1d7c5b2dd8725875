// Static page content: the gallery catalog the lightbox navigates, plus the
// collage, note cards and texts the other sections render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One displayable image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u32,
    /// Asset URL, resolved by the shell.
    pub source: String,
    /// Alt text.
    pub label: String,
    #[serde(default)]
    pub layout: LayoutHint,
}

/// Placement in the 7-column gallery grid. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutHint {
    pub column_start: u8,
    pub column_span: u8,
    pub row_span: u8,
    /// CSS `object-position` for the grid thumbnail only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
}

impl Default for LayoutHint {
    fn default() -> Self {
        LayoutHint {
            column_start: 1,
            column_span: 1,
            row_span: 1,
            object_position: None,
        }
    }
}

/// Non-empty, ordered list of media items with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    items: Vec<MediaItem>,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>) -> Result<Self, EngineError> {
        if items.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(EngineError::DuplicateItemId(item.id));
            }
        }
        Ok(Catalog { items })
    }

    /// The fifteen-photo heart grid.
    pub fn builtin() -> Self {
        // (id, source, column_start, column_span, row_span)
        const GRID: [(u32, &str, u8, u8, u8); 15] = [
            (1, "/p5.jpg", 2, 1, 1),
            (2, "/p2.jpg", 3, 1, 1),
            (3, "/p1.jpg", 5, 2, 2),
            (4, "/p6.jpg", 1, 1, 1),
            (5, "/p7.jpg", 2, 2, 2),
            (6, "/p3.jpg", 4, 1, 1),
            (7, "/p13.jpg", 7, 1, 1),
            (8, "/p8.jpg", 1, 1, 1),
            (9, "/p9.jpg", 4, 1, 1),
            (10, "/p10.jpg", 5, 2, 2),
            (11, "/p11.jpg", 7, 1, 1),
            (12, "/p12.jpg", 2, 1, 1),
            (13, "/p4.jpg", 3, 2, 2),
            (14, "/p14.jpg", 5, 1, 1),
            (15, "/p15.jpg", 4, 1, 1),
        ];

        let items = GRID
            .iter()
            .map(|&(id, source, column_start, column_span, row_span)| MediaItem {
                id,
                source: source.to_string(),
                label: format!("Love {id}"),
                layout: LayoutHint {
                    column_start,
                    column_span,
                    row_span,
                    // Portrait crop keeps the faces in frame.
                    object_position: (id == 4).then(|| "0% 20%".to_string()),
                },
            })
            .collect();

        Catalog { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items. Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }
}

/// Where a scattered collage card sits, in percent of the section box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Placement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
    pub rotate_deg: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageCard {
    pub id: u32,
    pub source: String,
    pub placement: Placement,
}

/// Two photos stacked like polaroids; the back one slides out on hover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStack {
    pub front: String,
    pub back: String,
}

/// A tilted photo next to the letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCard {
    pub source: String,
    pub tilt_deg: f32,
}

/// The letter shown in the note section. Editable in place by the reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Letter {
    #[serde(default)]
    pub salutation: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_sign_off")]
    pub sign_off: String,
    #[serde(default)]
    pub closing_lines: Vec<String>,
}

impl Default for Letter {
    fn default() -> Self {
        Letter {
            salutation: "To my love,".to_string(),
            heading: "My dearest ...".to_string(),
            body: Vec::new(),
            placeholder: default_placeholder(),
            sign_off: default_sign_off(),
            closing_lines: vec!["- With all my love".to_string()],
        }
    }
}

fn default_placeholder() -> String {
    "Write your letter here...".to_string()
}

fn default_sign_off() -> String {
    "Sincerely,".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayContent {
    pub image: String,
    pub question: String,
    pub hint: String,
    pub accept_label: String,
    pub decline_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroContent {
    pub background: Vec<CollageCard>,
    pub stacks: Vec<CardStack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryCaption {
    pub title: String,
    pub subtitle: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteContent {
    pub title: String,
    pub cards: Vec<NoteCard>,
    pub letter: Letter,
}

/// Everything the shell renders besides the gallery grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContent {
    pub gateway: GatewayContent,
    pub loading_message: String,
    pub intro: IntroContent,
    pub gallery_caption: GalleryCaption,
    pub note: NoteContent,
}

impl PageContent {
    pub fn builtin(letter: Letter) -> Self {
        PageContent {
            gateway: GatewayContent {
                image: "/firstpage.jpg".to_string(),
                question: "Will you be my Valentine?".to_string(),
                hint: "There is only one right answer...".to_string(),
                accept_label: "YES!".to_string(),
                decline_label: "No".to_string(),
            },
            loading_message: "Preparing cuteness...".to_string(),
            intro: IntroContent {
                background: collage_cards(),
                stacks: vec![
                    stack("/vd1.jpg", "/vd2.jpg"),
                    stack("/vd10.jpg", "/vd13.jpg"),
                    stack("/vd17.jpg", "/n1.jpg"),
                ],
            },
            gallery_caption: GalleryCaption {
                title: "home".to_string(),
                subtitle: "[my love, my everything!]".to_string(),
                message: "The one who makes my heart skip a beat and feels like my forever home."
                    .to_string(),
            },
            note: NoteContent {
                title: "Note".to_string(),
                cards: vec![
                    NoteCard {
                        source: "/vd4.jpg".to_string(),
                        tilt_deg: -6.0,
                    },
                    NoteCard {
                        source: "/n2.jpg".to_string(),
                        tilt_deg: 6.0,
                    },
                ],
                letter,
            },
        }
    }
}

fn stack(front: &str, back: &str) -> CardStack {
    CardStack {
        front: front.to_string(),
        back: back.to_string(),
    }
}

fn collage_cards() -> Vec<CollageCard> {
    enum Anchor {
        TopLeft(f32, f32),
        TopRight(f32, f32),
        BottomLeft(f32, f32),
        BottomRight(f32, f32),
    }
    use Anchor::*;

    let cards = [
        (1, "/vd12.jpg", TopLeft(-5.0, 0.0), -15.0, 0.8),
        (2, "/vd9.jpg", TopLeft(-10.0, 25.0), -10.0, 0.7),
        (3, "/vd16.jpg", TopRight(-12.0, 25.0), 10.0, 1.0),
        (4, "/vd14.jpg", TopRight(-5.0, 0.0), 15.0, 0.8),
        (5, "/vd5.jpg", TopLeft(30.0, -5.0), 8.0, 0.85),
        (6, "/vd6.jpg", TopRight(35.0, -5.0), -8.0, 0.85),
        (7, "/vd7.jpg", BottomLeft(-5.0, 5.0), 12.0, 0.8),
        (8, "/vd11.jpg", BottomLeft(-10.0, 30.0), -5.0, 0.7),
        (9, "/vd3.jpg", BottomRight(-10.0, 30.0), 8.0, 0.7),
        (10, "/vd15.jpg", BottomRight(-5.0, 2.0), -12.0, 0.8),
    ];

    cards
        .into_iter()
        .map(|(id, source, anchor, rotate_deg, scale)| {
            let mut placement = Placement {
                rotate_deg,
                scale,
                ..Default::default()
            };
            match anchor {
                TopLeft(top, left) => {
                    placement.top = Some(top);
                    placement.left = Some(left);
                }
                TopRight(top, right) => {
                    placement.top = Some(top);
                    placement.right = Some(right);
                }
                BottomLeft(bottom, left) => {
                    placement.bottom = Some(bottom);
                    placement.left = Some(left);
                }
                BottomRight(bottom, right) => {
                    placement.bottom = Some(bottom);
                    placement.right = Some(right);
                }
            }
            CollageCard {
                id,
                source: source.to_string(),
                placement,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32) -> MediaItem {
        MediaItem {
            id,
            source: format!("/img{id}.jpg"),
            label: format!("Image {id}"),
            layout: LayoutHint::default(),
        }
    }

    #[test]
    fn builtin_catalog_has_fifteen_unique_items() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 15);
        assert!(Catalog::new(catalog.items().to_vec()).is_ok());
        assert_eq!(catalog.get(0).unwrap().source, "/p5.jpg");
        assert_eq!(catalog.get(14).unwrap().label, "Love 15");
        assert_eq!(
            catalog.get(3).unwrap().layout.object_position.as_deref(),
            Some("0% 20%")
        );
        assert!(catalog.get(15).is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(Catalog::new(vec![]), Err(EngineError::EmptyCatalog));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![item(1), item(2), item(1)]).unwrap_err();
        assert_eq!(err, EngineError::DuplicateItemId(1));
    }

    #[test]
    fn media_item_layout_defaults_when_missing() {
        let parsed: MediaItem =
            serde_json::from_str(r#"{"id":9,"source":"/a.jpg","label":"A"}"#).unwrap();
        assert_eq!(parsed.layout, LayoutHint::default());
    }

    #[test]
    fn collage_has_ten_anchored_cards() {
        let content = PageContent::builtin(Letter::default());
        assert_eq!(content.intro.background.len(), 10);
        assert_eq!(content.intro.stacks.len(), 3);
        for card in &content.intro.background {
            let p = card.placement;
            assert!(p.top.is_some() != p.bottom.is_some());
            assert!(p.left.is_some() != p.right.is_some());
        }
    }

    #[test]
    fn letter_defaults_fill_missing_fields() {
        let letter: Letter = serde_json::from_str(r#"{"heading":"Hi"}"#).unwrap();
        assert_eq!(letter.heading, "Hi");
        assert_eq!(letter.placeholder, "Write your letter here...");
        assert_eq!(letter.sign_off, "Sincerely,");
    }
}
