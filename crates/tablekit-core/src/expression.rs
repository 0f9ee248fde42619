//! Expression fragments shared by the builders.
//!
//! Builders never parse expressions. They collect opaque fragments that
//! reference `#name` and `:value` placeholders and join them into the textual
//! grammar the store understands:
//!
//! ```text
//! SET #a = :a, #b = :b ADD #c :c REMOVE #d DELETE #e :e
//! ```
//!
//! Generated placeholders are readable: `first name` becomes `#first_name`.
//! Within one builder, [`Placeholders`] keeps them distinct, so `a-b` and
//! `a_b` get `#a_b` and `#a_b_1`. Maps passed in by callers are merged by
//! overwrite: when two registrations use the same placeholder, the last one
//! wins.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::warn;

use crate::reserved::is_reserved_word;

/// Replace characters that cannot appear in a placeholder with `_`.
fn placeholder_body(attr: &str) -> String {
    attr.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Per-builder registry of placeholder bodies.
///
/// Every attribute name gets one body for as long as the registry lives, and
/// no two names share a body. A name whose sanitized form is already taken
/// gets the first free `_1`, `_2`, ... suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    by_attr: HashMap<String, String>,
    taken: HashSet<String>,
}

impl Placeholders {
    /// Keep `body` away from attribute names, for placeholders the builder
    /// writes itself.
    pub fn reserve(&mut self, body: &str) {
        self.taken.insert(body.to_owned());
    }

    fn body(&mut self, attr: &str) -> &str {
        if !self.by_attr.contains_key(attr) {
            let base = placeholder_body(attr);
            let mut body = base.clone();
            let mut suffix = 0_u32;
            while self.taken.contains(&body) {
                suffix += 1;
                body = format!("{base}_{suffix}");
            }
            self.taken.insert(body.clone());
            self.by_attr.insert(attr.to_owned(), body);
        }
        &self.by_attr[attr]
    }

    /// The `#name` placeholder for an attribute name.
    pub fn name(&mut self, attr: &str) -> String {
        format!("#{}", self.body(attr))
    }

    /// The `:value` placeholder for an attribute's value.
    pub fn value(&mut self, attr: &str) -> String {
        format!(":{}", self.body(attr))
    }
}

/// Returns `true` if `attr` cannot be written into an expression literally:
/// it is reserved, or it is not a bare identifier.
#[must_use]
pub fn needs_placeholder(attr: &str) -> bool {
    let mut chars = attr.chars();
    let bare = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    !bare || is_reserved_word(attr)
}

// ---------------------------------------------------------------------------
// Update clauses
// ---------------------------------------------------------------------------

/// The four kinds of update clause, in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// `SET path = value`
    Set,
    /// `ADD path value`
    Add,
    /// `REMOVE path`
    Remove,
    /// `DELETE path value`
    Delete,
}

impl ClauseKind {
    /// Emission order inside an update expression.
    pub const ORDER: [Self; 4] = [Self::Set, Self::Add, Self::Remove, Self::Delete];

    /// The clause keyword.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Set => "SET",
            Self::Add => "ADD",
            Self::Remove => "REMOVE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Ordered fragment lists, one per clause kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateClauses {
    set: Vec<String>,
    add: Vec<String>,
    remove: Vec<String>,
    delete: Vec<String>,
}

impl UpdateClauses {
    fn list(&self, kind: ClauseKind) -> &Vec<String> {
        match kind {
            ClauseKind::Set => &self.set,
            ClauseKind::Add => &self.add,
            ClauseKind::Remove => &self.remove,
            ClauseKind::Delete => &self.delete,
        }
    }

    fn list_mut(&mut self, kind: ClauseKind) -> &mut Vec<String> {
        match kind {
            ClauseKind::Set => &mut self.set,
            ClauseKind::Add => &mut self.add,
            ClauseKind::Remove => &mut self.remove,
            ClauseKind::Delete => &mut self.delete,
        }
    }

    /// Append a fragment to a clause.
    pub fn push(&mut self, kind: ClauseKind, fragment: impl Into<String>) {
        self.list_mut(kind).push(fragment.into());
    }

    /// Append a fragment unless the clause already holds an identical one.
    pub fn push_unique(&mut self, kind: ClauseKind, fragment: String) {
        let list = self.list_mut(kind);
        if !list.contains(&fragment) {
            list.push(fragment);
        }
    }

    /// Join the non-empty clauses into an update expression, or `None` when
    /// there is nothing to update.
    #[must_use]
    pub fn to_expression(&self) -> Option<String> {
        let parts: Vec<String> = ClauseKind::ORDER
            .iter()
            .filter(|kind| !self.list(**kind).is_empty())
            .map(|kind| format!("{} {}", kind.keyword(), self.list(*kind).join(", ")))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Boolean operator joining condition fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicalOperator {
    /// Both sides must hold.
    #[default]
    And,
    /// Either side must hold.
    Or,
}

impl LogicalOperator {
    /// The operator keyword.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append `expr` to an accumulated condition.
#[must_use]
pub fn join_condition(existing: Option<&str>, expr: &str, op: LogicalOperator) -> String {
    match existing {
        Some(existing) if !existing.is_empty() => format!("{existing} {op} {expr}"),
        _ => expr.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Projection tokens in the order they were requested.
///
/// Each attribute appears at most once, with the token of its first request.
/// Tokens are either the attribute name itself or its `#name` placeholder,
/// whose mapping is kept alongside. Blank names are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    placeholders: Placeholders,
    attrs: HashSet<String>,
    tokens: Vec<String>,
    names: HashMap<String, String>,
}

impl Projection {
    fn admit(&mut self, attr: &str) -> bool {
        if attr.trim().is_empty() {
            warn!("skipping blank projection attribute");
            return false;
        }
        self.attrs.insert(attr.to_owned())
    }

    fn push_token_placeholder(&mut self, attr: &str) {
        let token = self.placeholders.name(attr);
        self.names.insert(token.clone(), attr.to_owned());
        self.tokens.push(token);
    }

    /// Project `attr` literally, falling back to a placeholder when the name
    /// cannot be written bare.
    pub fn push_literal(&mut self, attr: &str) {
        if !self.admit(attr) {
            return;
        }
        if needs_placeholder(attr) {
            self.push_token_placeholder(attr);
        } else {
            self.tokens.push(attr.to_owned());
        }
    }

    /// Project `attr` through its `#name` placeholder.
    pub fn push_placeholder(&mut self, attr: &str) {
        if self.admit(attr) {
            self.push_token_placeholder(attr);
        }
    }

    /// The comma-joined projection expression, or `None` when nothing is
    /// projected.
    #[must_use]
    pub fn expression(&self) -> Option<String> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(self.tokens.join(", "))
        }
    }

    /// Name placeholders referenced by the projection.
    #[must_use]
    pub fn names(&self) -> &HashMap<String, String> {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_placeholders() {
        let mut placeholders = Placeholders::default();
        assert_eq!(placeholders.name("createdAt"), "#createdAt");
        assert_eq!(placeholders.value("createdAt"), ":createdAt");
        assert_eq!(placeholders.name("first name"), "#first_name");
        assert_eq!(placeholders.value("a-b.c"), ":a_b_c");
    }

    #[test]
    fn test_should_keep_sanitized_placeholders_distinct() {
        let mut placeholders = Placeholders::default();
        assert_eq!(placeholders.name("a-b"), "#a_b");
        assert_eq!(placeholders.name("a_b"), "#a_b_1");
        assert_eq!(placeholders.name("a.b"), "#a_b_2");
        assert_eq!(placeholders.value("a_b"), ":a_b_1");
        assert_eq!(placeholders.name("a-b"), "#a_b");

        // A name that happens to look like a suffixed body moves on.
        assert_eq!(placeholders.name("a_b_1"), "#a_b_1_1");

        assert_eq!(placeholders.name("é"), "#_");
        assert_eq!(placeholders.name("ü"), "#__1");
    }

    #[test]
    fn test_should_skip_reserved_bodies() {
        let mut placeholders = Placeholders::default();
        placeholders.reserve("_addOne");
        assert_eq!(placeholders.value("_addOne"), ":_addOne_1");
    }

    #[test]
    fn test_should_detect_names_needing_placeholders() {
        assert!(!needs_placeholder("a1"));
        assert!(!needs_placeholder("created_at"));
        assert!(needs_placeholder("name"));
        assert!(needs_placeholder("first name"));
        assert!(needs_placeholder("1abc"));
        assert!(needs_placeholder(""));
    }

    #[test]
    fn test_should_join_clauses_in_fixed_order() {
        let mut clauses = UpdateClauses::default();
        clauses.push(ClauseKind::Delete, "#tags :gone");
        clauses.push(ClauseKind::Remove, "#old");
        clauses.push(ClauseKind::Set, "#a = :a");
        clauses.push(ClauseKind::Add, "#n :one");
        clauses.push(ClauseKind::Set, "#b = :b");
        clauses.push(ClauseKind::Remove, "#older");
        assert_eq!(
            clauses.to_expression().as_deref(),
            Some("SET #a = :a, #b = :b ADD #n :one REMOVE #old, #older DELETE #tags :gone")
        );
    }

    #[test]
    fn test_should_skip_empty_clauses() {
        let mut clauses = UpdateClauses::default();
        assert_eq!(clauses.to_expression(), None);
        clauses.push(ClauseKind::Remove, "#x");
        assert_eq!(clauses.to_expression().as_deref(), Some("REMOVE #x"));
    }

    #[test]
    fn test_should_not_duplicate_unique_fragments() {
        let mut clauses = UpdateClauses::default();
        clauses.push_unique(ClauseKind::Set, "#a = :a".to_owned());
        clauses.push_unique(ClauseKind::Set, "#b = :b".to_owned());
        clauses.push_unique(ClauseKind::Set, "#a = :a".to_owned());
        assert_eq!(clauses.to_expression().as_deref(), Some("SET #a = :a, #b = :b"));
    }

    #[test]
    fn test_should_join_conditions() {
        let first = join_condition(None, "#rev = :rev", LogicalOperator::And);
        assert_eq!(first, "#rev = :rev");
        let second = join_condition(Some(&first), "attribute_exists(#pk)", LogicalOperator::Or);
        assert_eq!(second, "#rev = :rev OR attribute_exists(#pk)");
    }

    #[test]
    fn test_should_mix_literal_and_placeholder_projection() {
        let mut projection = Projection::default();
        projection.push_literal("a1");
        projection.push_placeholder("a2");
        projection.push_placeholder("a3");
        assert_eq!(projection.expression().as_deref(), Some("a1, #a2, #a3"));
        assert_eq!(projection.names().len(), 2);
        assert_eq!(projection.names()["#a2"], "a2");
    }

    #[test]
    fn test_should_substitute_reserved_literal_projection() {
        let mut projection = Projection::default();
        projection.push_literal("status");
        assert_eq!(projection.expression().as_deref(), Some("#status"));
        assert_eq!(projection.names()["#status"], "status");
    }

    #[test]
    fn test_should_deduplicate_projection() {
        let mut projection = Projection::default();
        projection.push_literal("a1");
        projection.push_literal("a1");
        projection.push_placeholder("a2");
        projection.push_placeholder("a2");
        assert_eq!(projection.expression().as_deref(), Some("a1, #a2"));
    }

    #[test]
    fn test_should_keep_first_token_per_attribute() {
        let mut projection = Projection::default();
        projection.push_literal("a1");
        projection.push_placeholder("a1");
        assert_eq!(projection.expression().as_deref(), Some("a1"));
        assert!(projection.names().is_empty());

        let mut projection = Projection::default();
        projection.push_placeholder("a1");
        projection.push_literal("a1");
        assert_eq!(projection.expression().as_deref(), Some("#a1"));
        assert_eq!(projection.names().len(), 1);
    }

    #[test]
    fn test_should_skip_blank_projection_attributes() {
        let mut projection = Projection::default();
        projection.push_literal("");
        projection.push_placeholder("  ");
        assert_eq!(projection.expression(), None);
        assert!(projection.names().is_empty());
    }

    #[test]
    fn test_should_project_colliding_names_separately() {
        let mut projection = Projection::default();
        projection.push_placeholder("a-b");
        projection.push_placeholder("a_b");
        projection.push_literal("a.b");
        assert_eq!(projection.expression().as_deref(), Some("#a_b, #a_b_1, #a_b_2"));
        assert_eq!(projection.names()["#a_b"], "a-b");
        assert_eq!(projection.names()["#a_b_1"], "a_b");
        assert_eq!(projection.names()["#a_b_2"], "a.b");
    }
}
