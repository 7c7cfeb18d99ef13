//! Expression language types and parser

mod parse_result;
mod parser;
mod types;

pub use parse_result::ParseResult;
pub use parser::{
    filter_lines, is_identifier, parse, parse_entry, parse_line, parse_lines,
    parse_section_header,
};
pub use types::{Expression, ExpressionKind, LookupTarget};
