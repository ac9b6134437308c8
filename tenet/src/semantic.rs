use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Variable bindings established during matching: name to text value.
///
/// Bindings are transient, scoped to one match/select/fire operation, and
/// copied (never mutated in place across alternatives) whenever the
/// selector opens a choice point. A sorted map keeps their rendering
/// deterministic.
pub type Bindings = BTreeMap<String, String>;

/// One token inside a fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Word {
    /// Plain text, matched by equality
    Literal(String),
    /// `$name`: binds on first sight, must agree thereafter
    Variable(String),
    /// `$( ... )`: raw expression source, evaluated under the current
    /// bindings when the word is grounded or matched
    Expression(String),
}

impl Word {
    /// Whether this word is already ground (carries no variable or
    /// expression to resolve)
    pub fn is_ground(&self) -> bool {
        matches!(self, Word::Literal(_))
    }
}

/// An ordered sequence of words; a pattern until simplified
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Fact {
    pub words: Vec<Word>,
}

impl Fact {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn is_ground(&self) -> bool {
        self.words.iter().all(Word::is_ground)
    }
}

/// A fully ground fact: plain text words only
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleFact {
    pub words: Vec<String>,
}

impl SimpleFact {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    /// Canonical textual encoding, used as the working-memory key: two
    /// ground facts are the same entry iff their word sequences are
    /// identical.
    pub fn key(&self) -> String {
        self.words
            .iter()
            .map(|word| format!("[[{}]]", word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A rule: when every predicate fact selects, the result facts are
/// declared under the selection's bindings. Immutable once parsed.
///
/// Named `Production` (as in production system) so it cannot collide with
/// the `Rule` enum pest derives for the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Production {
    pub predicate: Vec<Fact>,
    pub result: Vec<Fact>,
}

/// One parsed script item, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProgramItem {
    /// A standalone declaration, already ground
    Fact(SimpleFact),
    /// A rule definition
    Production(Production),
}

/// A parsed script: ground facts and rules interleaved in declaration
/// order. Order determines forward-chaining priority. Read-only after
/// parsing; the engine only walks it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Program {
    pub items: Vec<ProgramItem>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ground_facts(&self) -> impl Iterator<Item = &SimpleFact> {
        self.items.iter().filter_map(|item| match item {
            ProgramItem::Fact(fact) => Some(fact),
            ProgramItem::Production(_) => None,
        })
    }

    pub fn productions(&self) -> impl Iterator<Item = &Production> {
        self.items.iter().filter_map(|item| match item {
            ProgramItem::Production(production) => Some(production),
            ProgramItem::Fact(_) => None,
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Literal(text) => write!(f, "{}", crate::render::quote_word(text)),
            Word::Variable(name) => write!(f, "${}", name),
            Word::Expression(source) => write!(f, "$({})", source),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self
            .words
            .iter()
            .map(|word| word.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", words.join(" "))
    }
}

impl fmt::Display for SimpleFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self
            .words
            .iter()
            .map(|word| crate::render::quote_word(word))
            .collect::<Vec<_>>();
        write!(f, "{}", words.join(" "))
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let predicate = self
            .predicate
            .iter()
            .map(|fact| fact.to_string())
            .collect::<Vec<_>>();
        let result = self
            .result
            .iter()
            .map(|fact| fact.to_string())
            .collect::<Vec<_>>();
        write!(f, "{}", crate::render::join_production(&predicate, &result))
    }
}

impl fmt::Display for ProgramItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramItem::Fact(fact) => write!(f, "{}", fact),
            ProgramItem::Production(production) => write!(f, "{}", production),
        }
    }
}
