use std::rc::Rc;

use crate::Source;

/// A supplementary note attached to a [`SyntaxError`], used for messages
/// that want to point at more than one location (e.g. "previously defined
/// here"). Grounded on the teacher's `GraphQLErrorNote`/`GraphQLErrorNotes`
/// pair, which this crate reuses verbatim in shape.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLErrorNote {
    pub message: String,
    pub position: Option<usize>,
}

pub type GraphQLErrorNotes = Vec<GraphQLErrorNote>;

/// Every syntax error raised by the lexer or parser. Fatal: neither
/// component attempts recovery once one of these is produced.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{}", self.render())]
pub struct SyntaxError {
    pub source: Rc<Source>,
    pub position: usize,
    pub message: String,
    pub notes: GraphQLErrorNotes,
}

impl SyntaxError {
    pub fn new(source: Rc<Source>, position: usize, message: impl Into<String>) -> Self {
        SyntaxError {
            source,
            position,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, message: impl Into<String>, position: Option<usize>) -> Self {
        self.notes.push(GraphQLErrorNote {
            message: message.into(),
            position,
        });
        self
    }

    pub fn line_column(&self) -> (usize, usize) {
        self.source.get_location(self.position)
    }

    fn render(&self) -> String {
        let (line, column) = self.line_column();
        format!(
            "Syntax Error: {} ({}:{}:{})",
            self.message,
            self.source.name(),
            line,
            column
        )
    }
}

impl PartialEq for SyntaxError {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.message == other.message
    }
}
