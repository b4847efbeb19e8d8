use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::location::SceneLocation;

/// The closed set of element kinds a screenplay line-group can carry.
///
/// `SectionHeading` carries its outline depth (1-6); the level is
/// meaningless for every other variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Shot,
    SectionHeading(u8),
    Synopsis,
    Centered,
    PageBreak,
    Lyric,
    Note,
    Comment,
    Boneyard,
    TitlePageKey,
    TitlePageValue,
    DualDialogueBegin,
    DualDialogueEnd,
}

impl ElementKind {
    pub fn is_section_heading(&self) -> bool {
        matches!(self, ElementKind::SectionHeading(_))
    }

    /// Outline depth for section headings, `None` for everything else.
    pub fn section_level(&self) -> Option<u8> {
        match self {
            ElementKind::SectionHeading(level) => Some(*level),
            _ => None,
        }
    }
}

/// One line-group of screenplay content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenplayElement {
    pub kind: ElementKind,
    /// Literal content with trailing carriage returns stripped; scene
    /// headings additionally have their inline `#...#` markup removed.
    pub text: String,
    pub is_centered: bool,
    pub is_dual_dialogue: bool,
    /// Free-form scene label, only ever present on scene headings.
    pub scene_number: Option<String>,
    /// Stable id minted once at classification, only on scene headings.
    pub scene_id: Option<String>,
}

impl ScreenplayElement {
    pub fn new(kind: ElementKind, text: impl Into<String>) -> Self {
        ScreenplayElement {
            kind,
            text: text.into(),
            is_centered: false,
            is_dual_dialogue: false,
            scene_number: None,
            scene_id: None,
        }
    }

    /// Creates a scene heading and mints its id. This is the only place a
    /// scene id comes from, so one logical scene never gets a second id
    /// within a parse.
    pub fn scene_heading(text: impl Into<String>, scene_number: Option<String>) -> Self {
        ScreenplayElement {
            kind: ElementKind::SceneHeading,
            text: text.into(),
            is_centered: false,
            is_dual_dialogue: false,
            scene_number,
            scene_id: Some(Uuid::new_v4().to_string()),
        }
    }

    pub fn is_kind(&self, kind: ElementKind) -> bool {
        self.kind == kind
    }

    /// A heading that turns out not to be isolated by blank lines loses its
    /// heading status; scene number and id go with it.
    pub fn demote_to_action(&mut self) {
        self.kind = ElementKind::Action;
        self.scene_number = None;
        self.scene_id = None;
    }

    /// Joins a continuation line onto this element's text.
    pub fn append_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }

    /// Structured location data, derived on demand from the heading text.
    /// `None` for anything that is not a scene heading.
    pub fn scene_location(&self) -> Option<SceneLocation> {
        if self.kind == ElementKind::SceneHeading {
            Some(crate::parser::location_parser::parse_scene_location(&self.text))
        } else {
            None
        }
    }
}
