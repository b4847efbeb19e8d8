pub mod document;
pub mod element;
pub mod location;
pub mod title_page;

pub use document::ParsedDocument;
pub use element::{ElementKind, ScreenplayElement};
pub use location::{Lighting, SceneLocation};
pub use title_page::TitlePageEntry;
