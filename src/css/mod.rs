pub mod matching;
pub mod model;
pub mod parser;
pub mod style;
pub mod tokenizer;

pub use model::{Combinator, CompoundSelector, Selector, SelectorComponent, SelectorList};
pub use parser::{parse_selector_list, ParseError};
pub use style::{InlineStyle, Patch, Position, StylePatch};
