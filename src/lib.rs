pub mod fdx;
pub mod models;
pub mod parser;
pub mod utils;

pub use models::{
    ElementKind,
    Lighting,
    ParsedDocument,
    SceneLocation,
    ScreenplayElement,
    TitlePageEntry,
};

pub use parser::{
    parse_scene_location,
    FountainParser,
};

pub use fdx::{
    FdxError,
    FdxParser,
    FDX_TITLE_PAGE_KEY,
};

/// Parses Fountain-format screenplay text.
///
/// # Arguments
///
/// * `script` - the complete document text
///
/// # Returns
///
/// The parsed document; parsing never fails.
pub fn parse_fountain(script: &str) -> ParsedDocument {
    let mut parser = FountainParser::new();
    parser.parse(script)
}

/// Parses a Final Draft (FDX) XML document.
///
/// # Arguments
///
/// * `xml` - the complete XML text
/// * `filename` - display name recorded on the result
///
/// # Returns
///
/// The parsed document, or an error when the XML cannot be read.
pub fn parse_fdx(xml: &str, filename: &str) -> Result<ParsedDocument, FdxError> {
    let mut parser = FdxParser::new();
    parser.parse(xml, filename)
}
