pub mod fountain_parser;
pub mod location_parser;
pub mod title_page;

pub use fountain_parser::FountainParser;
pub use location_parser::parse_scene_location;
pub use title_page::{parse_title_page, TitlePageParse};
