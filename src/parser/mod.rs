pub mod draw_parser;

pub use draw_parser::{MiniLotoParser, Parser};
