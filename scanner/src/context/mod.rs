//! What the cursor sits on.
//!
//! Each scanner is a pure function of `(cursor, line)` returning the span it recognizes, or
//! `None`. [`LineContext`] runs all of them at once.

use tracing::trace;

use crate::Span;

mod import;
mod string;
mod subscript;
mod word;

pub use import::{current_from_import_from, current_from_import_import, current_import};
pub use string::current_string;
pub use subscript::{current_dict, current_dict_key};
pub use word::{current_object, current_object_attribute, current_word};

/// The most specific context found at a cursor, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    DictKey,
    String,
    FromImportImport,
    FromImportFrom,
    Import,
    Attribute,
    Word,
}

/// Every context scanner's answer for one cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineContext {
    pub cursor: usize,
    pub word: Option<Span>,
    pub string: Option<Span>,
    pub dict_key: Option<Span>,
    pub dict: Option<Span>,
    pub object: Option<Span>,
    pub attribute: Option<Span>,
    pub from_import_from: Option<Span>,
    pub from_import_import: Option<Span>,
    pub import: Option<Span>,
}

impl LineContext {
    pub fn detect(cursor: usize, line: &str) -> LineContext {
        let ctx = LineContext {
            cursor,
            word: current_word(cursor, line),
            string: current_string(cursor, line),
            dict_key: current_dict_key(cursor, line),
            dict: current_dict(cursor, line),
            object: current_object(cursor, line),
            attribute: current_object_attribute(cursor, line),
            from_import_from: current_from_import_from(cursor, line),
            from_import_import: current_from_import_import(cursor, line),
            import: current_import(cursor, line),
        };
        trace!(cursor, kind = ?ctx.kind(), "detected line context");
        ctx
    }

    /// The most specific context present.
    ///
    /// A dict key wins over a string (`d["ke|`), a string over everything else, and the
    /// import clauses over plain words.
    pub fn kind(&self) -> Option<ContextKind> {
        if self.dict_key.is_some() {
            Some(ContextKind::DictKey)
        } else if self.string.is_some() {
            Some(ContextKind::String)
        } else if self.from_import_import.is_some() {
            Some(ContextKind::FromImportImport)
        } else if self.from_import_from.is_some() {
            Some(ContextKind::FromImportFrom)
        } else if self.import.is_some() {
            Some(ContextKind::Import)
        } else if self.attribute.is_some() {
            Some(ContextKind::Attribute)
        } else if self.word.is_some() {
            Some(ContextKind::Word)
        } else {
            None
        }
    }

    /// The span belonging to [`LineContext::kind`]. For attribute access this is the whole
    /// chain, which is what completion replaces.
    pub fn span(&self) -> Option<&Span> {
        match self.kind()? {
            ContextKind::DictKey => self.dict_key.as_ref(),
            ContextKind::String => self.string.as_ref(),
            ContextKind::FromImportImport => self.from_import_import.as_ref(),
            ContextKind::FromImportFrom => self.from_import_from.as_ref(),
            ContextKind::Import => self.import.as_ref(),
            ContextKind::Attribute | ContextKind::Word => self.word.as_ref(),
        }
    }
}
