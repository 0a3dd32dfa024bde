use serde::{Deserialize, Serialize};

use crate::item::{ItemId, Value};
use crate::reference::EdgeType;
use crate::schema::SchemaRef;

/// A query against the item store.
///
/// Maps to imbib's `PublicationSource` + `LibrarySortOrder` + search/filter:
/// - `.library(id)` → `ItemQuery { predicates: [HasParent(id)] }`
/// - `.flagged(color)` → `ItemQuery { predicates: [HasFlag(Some(color))] }`
/// - `.smartSearch(q)` → `ItemQuery { predicates: [Contains("title", q)] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub schema: Option<SchemaRef>,
    pub predicates: Vec<Predicate>,
    pub sort: Vec<SortDescriptor>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Filter predicate for item queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    // Field comparisons
    Eq(String, Value),
    Neq(String, Value),
    Gt(String, Value),
    Lt(String, Value),
    Gte(String, Value),
    Lte(String, Value),
    Contains(String, String),
    In(String, Vec<Value>),

    // Classification
    HasTag(String),
    HasFlag(Option<String>),
    IsRead(bool),
    IsStarred(bool),

    // Graph
    HasParent(ItemId),
    HasReference(EdgeType, ItemId),
    ReferencedBy(EdgeType, ItemId),

    // Logical
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

/// Sort descriptor for query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortDescriptor {
    /// Field path, e.g. "created", "modified", "payload.title".
    pub field: String,
    pub ascending: bool,
}
