//! Fixtures: cursor notation, a scripted resolver, a fake editor and sample namespaces.

use std::cell::RefCell;
use std::collections::HashMap;

use scanner::current_word;

use crate::{
    CallableResolver, CandidateProvider, EditorBackend, Namespace, ResolveError, Signature, Span,
    Value,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Splits `ab|c` into the cursor offset and the line.
pub fn cursor(notation: &str) -> (usize, String) {
    let offset = notation
        .find('|')
        .unwrap_or_else(|| panic!("no cursor in {notation:?}"));
    (offset, notation.replacen('|', "", 1))
}

// ----------------------------
// Resolver
// ----------------------------

enum Scripted {
    Signature(Signature),
    Error(ResolveError),
    Panic(&'static str),
}

/// Answers from a script and records every name it was asked for. Unknown names are
/// `NotFound`.
#[derive(Default)]
pub struct FakeResolver {
    answers: HashMap<String, Scripted>,
    calls: RefCell<Vec<String>>,
}

pub fn resolver() -> FakeResolver {
    FakeResolver::default()
}

impl FakeResolver {
    pub fn sig(mut self, name: &str, params: &[&str]) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        let signature = Signature::from_params(short, params);
        self.answers
            .insert(name.to_string(), Scripted::Signature(signature));
        self
    }

    pub fn method(mut self, name: &str, params: &[&str]) -> Self {
        let short = name.rsplit('.').next().unwrap_or(name);
        let signature = Signature::from_params(short, params).bound();
        self.answers
            .insert(name.to_string(), Scripted::Signature(signature));
        self
    }

    pub fn fails(mut self, name: &str, error: ResolveError) -> Self {
        self.answers.insert(name.to_string(), Scripted::Error(error));
        self
    }

    pub fn panics(mut self, name: &str, message: &'static str) -> Self {
        self.answers.insert(name.to_string(), Scripted::Panic(message));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CallableResolver for FakeResolver {
    fn resolve(&self, name: &str) -> Result<Signature, ResolveError> {
        self.calls.borrow_mut().push(name.to_string());
        match self.answers.get(name) {
            Some(Scripted::Signature(signature)) => Ok(signature.clone()),
            Some(Scripted::Error(error)) => Err(error.clone()),
            Some(Scripted::Panic(message)) => panic!("{message}"),
            None => Err(ResolveError::NotFound(name.to_string())),
        }
    }
}

// ----------------------------
// Editor
// ----------------------------

#[derive(Debug, Default)]
pub struct FakeEditor {
    pub line: String,
    pub cursor: usize,
    pub echoed: Vec<String>,
}

pub fn editor(notation: &str) -> FakeEditor {
    let (cursor, line) = cursor(notation);
    FakeEditor {
        line,
        cursor,
        echoed: Vec::new(),
    }
}

impl FakeEditor {
    /// The line with `|` at the cursor.
    pub fn notation(&self) -> String {
        let mut out = self.line.clone();
        out.insert(self.cursor, '|');
        out
    }

    /// Replaces the line as if the user had typed it.
    pub fn type_line(&mut self, notation: &str) {
        let (cursor, line) = cursor(notation);
        self.line = line;
        self.cursor = cursor;
    }
}

impl EditorBackend for FakeEditor {
    fn current_line(&self) -> &str {
        &self.line
    }

    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    fn set_line(&mut self, line: String, cursor: usize) {
        self.line = line;
        self.cursor = cursor;
    }

    fn echo(&mut self, text: &str) {
        self.echoed.push(text.to_string());
    }
}

// ----------------------------
// Candidates
// ----------------------------

/// Offers a fixed list for whatever word is under the cursor.
pub struct StaticProvider(pub Vec<&'static str>);

impl CandidateProvider for StaticProvider {
    fn locate(&self, cursor: usize, line: &str) -> Option<Span> {
        current_word(cursor, line)
    }

    fn complete(&self, cursor: usize, line: &str) -> Vec<String> {
        match current_word(cursor, line) {
            Some(word) => self
                .0
                .iter()
                .filter(|m| m.starts_with(word.text.as_str()))
                .map(|m| m.to_string())
                .collect(),
            None => Vec::new(),
        }
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builtins plus
///
/// ```text
/// class Foo:
///     def __init__(self, x, y=2): ...
///     def bar(self, n): ...
///     def qux(self): ...
///     _secret = ...
/// obj = Foo()
/// import os, os.path, sys
/// ```
pub fn foo_namespace() -> Namespace {
    let foo = Value::class()
        .attr(
            "__init__",
            Value::function(Signature::from_params("__init__", &["self", "x", "y=2"])),
        )
        .attr(
            "bar",
            Value::function(Signature::from_params("bar", &["self", "n"])),
        )
        .attr(
            "qux",
            Value::function(Signature::from_params("qux", &["self"])),
        )
        .attr("_secret", Value::instance());
    let path = Value::module().attr(
        "join",
        Value::function(Signature::from_params("join", &["a", "*p"])),
    );
    let os = Value::module()
        .attr("path", path)
        .attr(
            "getcwd",
            Value::function(Signature::from_params("getcwd", &[])),
        )
        .attr("sep", Value::instance());

    let mut ns = Namespace::with_builtins();
    ns.bind("obj", Value::instance_of(&foo));
    ns.bind("Foo", foo);
    ns.bind("os", os);
    ns.bind("sys", Value::module());
    ns
}
