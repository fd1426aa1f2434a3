/// Parser-facing source-text location, carried through unmodified for
/// reporting. This crate never interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub line: u32,
    pub column: u32,
    pub text: Box<str>,
}

impl Cursor {
    pub fn new(line: u32, column: u32, text: impl Into<Box<str>>) -> Self {
        Self {
            line,
            column,
            text: text.into(),
        }
    }
}
