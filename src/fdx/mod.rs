pub mod fdx_parser;

pub use fdx_parser::{FdxError, FdxParser, FDX_TITLE_PAGE_KEY};
