//! Completion candidates for the word under the cursor.

mod matchers;
mod namespace;

pub use namespace::{Namespace, Value, ValueKind};

use scanner::{ContextKind, KEYWORDS, LineContext, Span, TokenKind, lex};

use crate::config::AutocompleteMode;
use matchers::{Candidate, select};

/// Produces the candidates offered at a cursor. Supplied by the host.
pub trait CandidateProvider {
    /// The text a candidate replaces. `None` when there is nothing to complete.
    fn locate(&self, cursor: usize, line: &str) -> Option<Span>;

    /// Candidates for the located text, in offer order.
    fn complete(&self, cursor: usize, line: &str) -> Vec<String>;
}

/// Completes names, attribute chains and import clauses from a [`Namespace`] plus the
/// language keywords.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceCompleter<'ns> {
    namespace: &'ns Namespace,
    mode: AutocompleteMode,
}

impl<'ns> NamespaceCompleter<'ns> {
    pub fn new(namespace: &'ns Namespace, mode: AutocompleteMode) -> Self {
        Self { namespace, mode }
    }

    /// Keywords and bound names; callables get a trailing `(`.
    fn complete_global(&self, query: &str) -> Vec<String> {
        let keywords = KEYWORDS.iter().map(|kw| Candidate {
            name: kw.to_string(),
            label: kw.to_string(),
        });
        let names = self.namespace.iter().map(|(name, value)| Candidate {
            name: name.to_string(),
            label: if value.is_callable() {
                format!("{name}(")
            } else {
                name.to_string()
            },
        });
        select(self.mode, query, visible(query, keywords.chain(names)))
    }

    /// Attributes of the value at `owner`, offered as `prefix` + attribute name.
    fn complete_attributes(
        &self,
        owner: &str,
        query: &str,
        prefix: &str,
        keep: impl Fn(&Value) -> bool,
    ) -> Vec<String> {
        let Some(value) = self.namespace.lookup(owner) else {
            return Vec::new();
        };
        let attributes = value
            .attributes
            .iter()
            .filter(|&(_, attr)| keep(attr))
            .map(|(name, _)| Candidate {
                name: name.clone(),
                label: format!("{prefix}{name}"),
            });
        select(self.mode, query, visible(query, attributes))
    }

    /// A dotted module path: top-level modules, or submodules of the part before the last dot.
    fn complete_module(&self, path: &str) -> Vec<String> {
        match path.rsplit_once('.') {
            Some((owner, query)) => self.complete_attributes(owner, query, &format!("{owner}."), |v| {
                v.kind == ValueKind::Module
            }),
            None => {
                let modules = self
                    .namespace
                    .iter()
                    .filter(|(_, value)| value.kind == ValueKind::Module)
                    .map(|(name, _)| Candidate {
                        name: name.to_string(),
                        label: name.to_string(),
                    });
                select(self.mode, path, visible(path, modules))
            }
        }
    }
}

impl CandidateProvider for NamespaceCompleter<'_> {
    fn locate(&self, cursor: usize, line: &str) -> Option<Span> {
        let ctx = LineContext::detect(cursor, line);
        match target(&ctx)? {
            (ContextKind::DictKey | ContextKind::String, _) => None,
            (_, span) => Some(span.clone()),
        }
    }

    fn complete(&self, cursor: usize, line: &str) -> Vec<String> {
        let ctx = LineContext::detect(cursor, line);
        let Some((kind, span)) = target(&ctx) else {
            return Vec::new();
        };
        let word = span.text.as_str();

        match kind {
            ContextKind::DictKey | ContextKind::String => Vec::new(),
            ContextKind::Import | ContextKind::FromImportFrom => self.complete_module(word),
            ContextKind::FromImportImport => match from_clause_module(line, span.start) {
                Some(module) => self.complete_attributes(&module, word, "", |_| true),
                None => Vec::new(),
            },
            ContextKind::Attribute | ContextKind::Word => match word.rsplit_once('.') {
                Some((owner, query)) => {
                    self.complete_attributes(owner, query, &format!("{owner}."), |_| true)
                }
                None => self.complete_global(word),
            },
        }
    }
}

/// The context completion works on and the span it replaces.
///
/// A namespace has no dict keys to offer, so a subscript holding a bare expression
/// (`lst[fo|`, `d[obj.at|`) completes like the word it contains. String keys stay
/// uncompleted.
fn target(ctx: &LineContext) -> Option<(ContextKind, &Span)> {
    match ctx.kind()? {
        ContextKind::DictKey if ctx.string.is_none() => {
            let word = ctx.word.as_ref()?;
            let kind = if ctx.attribute.is_some() {
                ContextKind::Attribute
            } else {
                ContextKind::Word
            };
            Some((kind, word))
        }
        kind => Some((kind, ctx.span()?)),
    }
}

/// Hides `_`-prefixed names unless the query starts with `_`, and dunder names unless it
/// starts with `__`.
fn visible(query: &str, candidates: impl Iterator<Item = Candidate>) -> impl Iterator<Item = Candidate> {
    let private_ok = query.starts_with('_');
    let dunder_ok = query.starts_with("__");
    candidates.filter(move |c| {
        if c.name.starts_with("__") {
            dunder_ok
        } else {
            !c.name.starts_with('_') || private_ok
        }
    })
}

/// The module named by the `from ... import` clause whose name list contains `before`.
///
/// Relative modules (`from .pkg import x`) resolve against the importing package, which a
/// [`Namespace`] does not model, so they yield `None`.
fn from_clause_module(line: &str, before: usize) -> Option<String> {
    let mut module: Option<String> = None;
    let mut in_module = false;
    for token in lex(line).iter().take_while(|t| t.end <= before) {
        match &token.kind {
            TokenKind::Semi => {
                module = None;
                in_module = false;
            }
            TokenKind::Keyword("from") => {
                module = Some(String::new());
                in_module = true;
            }
            TokenKind::Keyword("import") => in_module = false,
            kind if in_module && !kind.is_trivia() => {
                if let Some(module) = module.as_mut() {
                    module.push_str(token.text(line));
                }
            }
            _ => {}
        }
    }
    module.filter(|m| !m.is_empty() && !m.starts_with('.'))
}
