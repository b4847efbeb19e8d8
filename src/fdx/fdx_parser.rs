use log::warn;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::models::{ElementKind, ParsedDocument, ScreenplayElement, TitlePageEntry};

/// Key under which FDX title-page lines are exposed. FDX carries
/// free-form title text rather than key/value directives, so the whole
/// page becomes one entry.
pub const FDX_TITLE_PAGE_KEY: &str = "title page";

#[derive(Error, Debug)]
pub enum FdxError {
    #[error("unable to parse FDX document: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unable to parse FDX document: input ended before all elements closed")]
    Truncated,
    #[error("not a Final Draft document (root element is not FinalDraft)")]
    NotFinalDraft,
}

/// Which `Content` subtree the walker is currently inside. Script and
/// title-page content carry the same paragraph markup but land in
/// different places in the result.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    None,
    Script,
    TitlePage,
}

/// One `Paragraph` being accumulated between its start and end tags.
#[derive(Debug)]
struct OpenParagraph {
    paragraph_type: String,
    level: u8,
    dual_dialogue: bool,
    scene_number: Option<String>,
    text: String,
}

impl OpenParagraph {
    fn from_start(element: &BytesStart) -> Self {
        let paragraph_type = get_attribute(element, b"Type").unwrap_or_default();
        let level = get_attribute(element, b"Level")
            .and_then(|v| v.parse::<u8>().ok())
            .map(|v| v.clamp(1, 6))
            .unwrap_or(1);
        let dual_dialogue = get_attribute(element, b"DualDialogue").is_some();
        OpenParagraph {
            paragraph_type,
            level,
            dual_dialogue,
            scene_number: None,
            text: String::new(),
        }
    }
}

/// Streaming FDX mapper: walks XML events with an explicit stack of open
/// element names, so the title-page/script distinction is always a
/// function of ancestry rather than ambient flags.
pub struct FdxParser {
    stack: Vec<String>,
    section: Section,
    elements: Vec<ScreenplayElement>,
    title_lines: Vec<String>,
}

impl FdxParser {
    pub fn new() -> Self {
        FdxParser {
            stack: Vec::new(),
            section: Section::None,
            elements: Vec::new(),
            title_lines: Vec::new(),
        }
    }

    /// Maps a complete FDX document to elements. Fails on XML that is
    /// not well-formed or whose root is not `FinalDraft`; there is no
    /// partial result.
    pub fn parse(&mut self, xml: &str, filename: &str) -> Result<ParsedDocument, FdxError> {
        self.stack.clear();
        self.section = Section::None;
        self.elements = Vec::new();
        self.title_lines = Vec::new();

        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut saw_root = false;
        let mut paragraph: Option<OpenParagraph> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    let name = element_name(e);
                    if !saw_root {
                        if name != "FinalDraft" {
                            return Err(FdxError::NotFinalDraft);
                        }
                        saw_root = true;
                    }
                    self.enter_element(&name, e, &mut paragraph);
                    self.stack.push(name);
                }
                Ok(Event::Empty(ref e)) => {
                    let name = element_name(e);
                    if !saw_root {
                        if name != "FinalDraft" {
                            return Err(FdxError::NotFinalDraft);
                        }
                        saw_root = true;
                    }
                    // Self-closing: enters and leaves in one event.
                    self.enter_element(&name, e, &mut paragraph);
                    self.leave_element(&name, &mut paragraph);
                }
                Ok(Event::Text(ref e)) => {
                    if self.at_paragraph_text() {
                        if let Some(open) = paragraph.as_mut() {
                            open.text.push_str(&e.unescape()?);
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if self.at_paragraph_text() {
                        if let Some(open) = paragraph.as_mut() {
                            open.text.push_str(&String::from_utf8_lossy(e));
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    let name = self.stack.pop().unwrap_or_default();
                    self.leave_element(&name, &mut paragraph);
                }
                Ok(Event::Eof) => {
                    // The reader accepts a clean cut-off between events;
                    // unclosed ancestry makes it our error to raise.
                    if !self.stack.is_empty() {
                        return Err(FdxError::Truncated);
                    }
                    break;
                }
                Ok(_) => {}
                Err(e) => return Err(FdxError::Xml(e)),
            }
            buf.clear();
        }

        if !saw_root {
            return Err(FdxError::NotFinalDraft);
        }

        let mut document = ParsedDocument::new();
        document.filename = Some(filename.to_string());
        document.elements = std::mem::take(&mut self.elements);
        if !self.title_lines.is_empty() {
            let mut entry = TitlePageEntry::new(FDX_TITLE_PAGE_KEY);
            entry.values = std::mem::take(&mut self.title_lines);
            document.title_page.push(entry);
        }
        Ok(document)
    }

    /// Name of the enclosing element. Both `enter_element` and
    /// `leave_element` run with the parent on top of the stack.
    fn parent(&self) -> Option<&str> {
        self.stack.last().map(|s| s.as_str())
    }

    /// True when character data belongs to the open paragraph: the stack
    /// must end `Content > Paragraph > Text`. Text nested deeper, like a
    /// scene summary under `SceneProperties`, is metadata rather than
    /// script content.
    fn at_paragraph_text(&self) -> bool {
        let depth = self.stack.len();
        depth >= 3
            && self.stack[depth - 1] == "Text"
            && self.stack[depth - 2] == "Paragraph"
            && self.stack[depth - 3] == "Content"
    }

    fn enter_element(
        &mut self,
        name: &str,
        element: &BytesStart,
        paragraph: &mut Option<OpenParagraph>,
    ) {
        match name {
            "Content" => {
                self.section = match self.parent() {
                    Some("TitlePage") => Section::TitlePage,
                    Some("FinalDraft") => Section::Script,
                    _ => self.section,
                };
            }
            // Only paragraphs sitting directly in a `Content` block are
            // content; `SceneProperties` subtrees carry their own nested
            // paragraphs, and those stay out of the element list.
            "Paragraph" if self.section != Section::None && self.parent() == Some("Content") => {
                *paragraph = Some(OpenParagraph::from_start(element));
            }
            "SceneProperties" if self.parent() == Some("Paragraph") => {
                if let Some(open) = paragraph.as_mut() {
                    open.scene_number = get_attribute(element, b"Number");
                }
            }
            _ => {}
        }
    }

    fn leave_element(&mut self, name: &str, paragraph: &mut Option<OpenParagraph>) {
        match name {
            "Paragraph" if self.parent() == Some("Content") => {
                if let Some(open) = paragraph.take() {
                    self.close_paragraph(open);
                }
            }
            "Content" if matches!(self.parent(), Some("FinalDraft") | Some("TitlePage")) => {
                self.section = Section::None;
            }
            _ => {}
        }
    }

    fn close_paragraph(&mut self, open: OpenParagraph) {
        match self.section {
            Section::Script => {
                if let Some(element) = build_element(open) {
                    self.elements.push(element);
                }
            }
            Section::TitlePage => {
                let trimmed = open.text.trim();
                if !trimmed.is_empty() {
                    self.title_lines.push(trimmed.to_string());
                }
            }
            Section::None => {}
        }
    }
}

impl Default for FdxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a script element from a closed paragraph. Empty paragraphs
/// vanish, except page breaks, which are meaningful without text. A
/// scene number only ever survives onto a scene heading.
fn build_element(open: OpenParagraph) -> Option<ScreenplayElement> {
    let (kind, centered) = map_paragraph_type(&open.paragraph_type, open.level);
    let text = open.text.trim();
    if text.is_empty() && kind != ElementKind::PageBreak {
        return None;
    }
    let mut element = if kind == ElementKind::SceneHeading {
        ScreenplayElement::scene_heading(text, open.scene_number)
    } else {
        ScreenplayElement::new(kind, text)
    };
    element.is_centered = centered;
    element.is_dual_dialogue = open.dual_dialogue;
    Some(element)
}

fn map_paragraph_type(paragraph_type: &str, level: u8) -> (ElementKind, bool) {
    match paragraph_type {
        "Scene Heading" => (ElementKind::SceneHeading, false),
        "Action" => (ElementKind::Action, false),
        "Character" => (ElementKind::Character, false),
        "Dialogue" => (ElementKind::Dialogue, false),
        "Parenthetical" => (ElementKind::Parenthetical, false),
        "Transition" => (ElementKind::Transition, false),
        "Shot" => (ElementKind::Shot, false),
        "Synopsis" => (ElementKind::Synopsis, false),
        "Comment" => (ElementKind::Comment, false),
        "Boneyard" => (ElementKind::Boneyard, false),
        "Lyrics" => (ElementKind::Lyric, false),
        "Page Break" => (ElementKind::PageBreak, false),
        "Section Heading" | "New Act" => (ElementKind::SectionHeading(level), false),
        "Centered" => (ElementKind::Action, true),
        other => {
            if !other.is_empty() {
                warn!("unrecognized paragraph type {:?}, treating as action", other);
            }
            (ElementKind::Action, false)
        }
    }
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn get_attribute(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}
