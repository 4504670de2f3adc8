//! Line and field level text handling shared by all format parsers

pub mod lines;
pub mod tokenize;

pub use lines::{CommentBlock, Line, LineReader};
pub use tokenize::{
    is_magic_null, parse_floats_delimited, parse_ints_delimited, split_csv, split_fields,
    split_fields_exact, split_fields_nullable, split_tab_fields, TokenizeError,
};
