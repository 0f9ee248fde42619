//! Update request builder.
//!
//! An [`Updater`] creates or updates one item by key. Attribute assignments
//! are collected as `SET`/`ADD`/`REMOVE`/`DELETE` fragments and joined into a
//! single update expression when the request is built. Building the request
//! moves the updater into [`Phase::Finalized`]; from then on the settings that
//! shape how later payloads are merged (table, key, marks, audit timestamps)
//! are rejected.
//!
//! ```text
//! Building ──get_params()/execute()──▶ Finalized
//!    │                                     │
//!    └── every mutator                     └── table/key/mark/timestamps fail
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tablekit_model::input::UpdateItemInput;
use tablekit_model::output::UpdateItemOutput;
use tablekit_model::types::{ReturnConsumedCapacity, ReturnItemCollectionMetrics, ReturnValue};
use tablekit_model::{AttributeValue, Item, StoreError};
use tracing::{debug, warn};

use crate::error::{BuilderError, BuilderResult};
use crate::expression::{
    ClauseKind, LogicalOperator, Placeholders, UpdateClauses, join_condition,
};
use crate::key::{into_item, validate_key, validate_table_name};
use crate::marshal::to_item;
use crate::store::Store;
use crate::timestamp::{AuditTimestamp, AuditValue, CREATED_AT, UPDATED_AT};

/// Attribute owned by the optimistic lock.
pub const REV: &str = "rev";

const ADD_ONE: &str = "_addOne";

/// Lifecycle of an [`Updater`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Every mutator is accepted.
    #[default]
    Building,
    /// The request has been built at least once.
    Finalized,
}

/// Update request builder for a single item.
#[derive(Debug, Clone)]
pub struct Updater {
    store: Store,
    table_name: String,
    key: Item,
    clauses: UpdateClauses,
    placeholders: Placeholders,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
    condition: Option<String>,
    marked: HashSet<String>,
    created_at: AuditTimestamp,
    updated_at: AuditTimestamp,
    rev_given: bool,
    return_values: ReturnValue,
    metrics: Option<ReturnItemCollectionMetrics>,
    capacity: Option<ReturnConsumedCapacity>,
    phase: Phase,
}

impl Updater {
    /// Start an update of the item at `key` in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for a blank table name or an
    /// empty key.
    pub fn new<I, K, V>(store: &Store, table: &str, key: I) -> BuilderResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        validate_table_name(table)?;
        let key = into_item(key);
        validate_key(&key)?;
        let config = store.config();
        let mut placeholders = Placeholders::default();
        placeholders.reserve(ADD_ONE);
        Ok(Self {
            store: store.clone(),
            table_name: table.to_owned(),
            key,
            clauses: UpdateClauses::default(),
            placeholders,
            names: HashMap::new(),
            values: HashMap::new(),
            condition: None,
            marked: HashSet::new(),
            created_at: AuditTimestamp::new(config.audit_timestamps),
            updated_at: AuditTimestamp::new(config.audit_timestamps),
            rev_given: false,
            return_values: config.return_values,
            metrics: None,
            capacity: None,
            phase: Phase::Building,
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn ensure_building(&self, method: &str) -> BuilderResult<()> {
        match self.phase {
            Phase::Building => Ok(()),
            Phase::Finalized => Err(BuilderError::finalized(method)),
        }
    }

    // -----------------------------------------------------------------------
    // Guarded settings
    // -----------------------------------------------------------------------

    /// Update an item in another table.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized; validation error for a blank name.
    pub fn table(&mut self, name: &str) -> BuilderResult<&mut Self> {
        self.ensure_building("table")?;
        validate_table_name(name)?;
        name.clone_into(&mut self.table_name);
        Ok(self)
    }

    /// Replace the key of the item to update.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized; validation error for an empty key.
    pub fn key<I, K, V>(&mut self, key: I) -> BuilderResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.ensure_building("key")?;
        let key = into_item(key);
        validate_key(&key)?;
        self.key = key;
        Ok(self)
    }

    /// Flag attributes whose empty values are written as `NULL`.
    ///
    /// Sets cannot be empty in the store, so an empty set assigned to a
    /// marked attribute is replaced by an explicit null.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized.
    pub fn mark<I, S>(&mut self, attrs: I) -> BuilderResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_building("mark")?;
        self.marked.extend(attrs.into_iter().map(Into::into));
        Ok(self)
    }

    /// Stop injecting `createdAt`.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized.
    pub fn disable_created_at(&mut self) -> BuilderResult<&mut Self> {
        self.ensure_building("disable_created_at")?;
        self.created_at.enabled = false;
        Ok(self)
    }

    /// Inject `createdAt` with a fixed value instead of the current instant.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized; validation error for blank text.
    pub fn created_at(&mut self, value: impl Into<AuditValue>) -> BuilderResult<&mut Self> {
        self.ensure_building("created_at")?;
        let value = value.into().normalize(CREATED_AT)?;
        self.created_at.enabled = true;
        self.created_at.value = Some(value);
        Ok(self)
    }

    /// Stop injecting `updatedAt`.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized.
    pub fn disable_updated_at(&mut self) -> BuilderResult<&mut Self> {
        self.ensure_building("disable_updated_at")?;
        self.updated_at.enabled = false;
        Ok(self)
    }

    /// Inject `updatedAt` with a fixed value instead of the current instant.
    ///
    /// # Errors
    ///
    /// Configuration error once finalized; validation error for blank text.
    pub fn updated_at(&mut self, value: impl Into<AuditValue>) -> BuilderResult<&mut Self> {
        self.ensure_building("updated_at")?;
        let value = value.into().normalize(UPDATED_AT)?;
        self.updated_at.enabled = true;
        self.updated_at.value = Some(value);
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Payload
    // -----------------------------------------------------------------------

    /// Only apply the update if the stored `rev` equals `rev`, and increment
    /// it. `None` leaves the request unchanged.
    ///
    /// Once set, `rev` attributes in later [`item`](Self::item) payloads are
    /// dropped. Payloads merged before this call are not affected.
    pub fn rev(&mut self, rev: impl Into<Option<u64>>) -> &mut Self {
        let Some(rev) = rev.into() else {
            return self;
        };
        let name_ph = self.placeholders.name(REV);
        let value_ph = self.placeholders.value(REV);
        let add_one = format!(":{ADD_ONE}");
        if !self.rev_given {
            self.condition = Some(join_condition(
                self.condition.as_deref(),
                &format!("{name_ph} = {value_ph}"),
                LogicalOperator::And,
            ));
            self.clauses.push_unique(
                ClauseKind::Set,
                format!("{name_ph} = {name_ph} + {add_one}"),
            );
            self.rev_given = true;
        }
        self.names.insert(name_ph, REV.to_owned());
        self.values.insert(value_ph, AttributeValue::number(rev));
        self.values.insert(add_one, AttributeValue::number(1));
        self
    }

    /// Assign every attribute of `payload` with `SET #name = :name`.
    ///
    /// Key attributes and empty names are skipped, and so is `rev` once
    /// [`rev`](Self::rev) was called. Names that sanitize to the same
    /// placeholder still get distinct ones (`a-b` as `#a_b`, `a_b` as
    /// `#a_b_1`). The first call also injects the audit timestamps the
    /// payload does not carry itself.
    pub fn item<I, K, V>(&mut self, payload: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let mut has_created_at = false;
        let mut has_updated_at = false;

        for (name, value) in payload {
            let name: String = name.into();
            has_created_at |= name == CREATED_AT;
            has_updated_at |= name == UPDATED_AT;

            if name.is_empty() {
                warn!("skipping payload attribute with an empty name");
                continue;
            }
            if self.key.contains_key(&name) || (self.rev_given && name == REV) {
                continue;
            }

            let value: AttributeValue = value.into();
            let value = if self.marked.contains(&name) && value.is_empty_value() {
                AttributeValue::null()
            } else {
                value
            };
            self.assign(&name, value);
        }

        self.inject_timestamps(has_created_at, has_updated_at);
        self
    }

    /// Like [`item`](Self::item), for anything that serializes to a map.
    ///
    /// Fields that serialize to a top-level `null`, such as `Option::None`,
    /// are left out so they do not overwrite stored attributes. Assign
    /// [`AttributeValue::null`] through [`item`](Self::item) to store an
    /// explicit `NULL`.
    ///
    /// # Errors
    ///
    /// Validation error if `payload` does not serialize to a map.
    pub fn item_from<T: Serialize + ?Sized>(&mut self, payload: &T) -> BuilderResult<&mut Self> {
        let pairs = to_item(payload)?;
        Ok(self.item(pairs))
    }

    fn assign(&mut self, name: &str, value: AttributeValue) {
        let name_ph = self.placeholders.name(name);
        let value_ph = self.placeholders.value(name);
        self.clauses
            .push_unique(ClauseKind::Set, format!("{name_ph} = {value_ph}"));
        self.names.insert(name_ph, name.to_owned());
        self.values.insert(value_ph, value);
    }

    fn inject_timestamps(&mut self, has_created_at: bool, has_updated_at: bool) {
        if self.created_at.is_pending(has_created_at) {
            let name_ph = self.placeholders.name(CREATED_AT);
            let value_ph = self.placeholders.value(CREATED_AT);
            self.clauses.push_unique(
                ClauseKind::Set,
                format!("{name_ph} = if_not_exists({name_ph}, {value_ph})"),
            );
            self.names.insert(name_ph, CREATED_AT.to_owned());
            self.values
                .insert(value_ph, AttributeValue::S(self.created_at.resolve()));
        }
        if self.updated_at.is_pending(has_updated_at) {
            self.assign(UPDATED_AT, AttributeValue::S(self.updated_at.resolve()));
        }
        self.created_at.processed = true;
        self.updated_at.processed = true;
    }

    // -----------------------------------------------------------------------
    // Raw fragments
    // -----------------------------------------------------------------------

    fn push_raw(&mut self, kind: ClauseKind, fragment: &str) {
        if fragment.trim().is_empty() {
            warn!(clause = %kind, "skipping blank update fragment");
            return;
        }
        self.clauses.push(kind, fragment);
    }

    /// Append a raw `SET` fragment, e.g. `#n = #n + :one`.
    ///
    /// Placeholders it references must be registered with
    /// [`names`](Self::names) and [`values`](Self::values).
    pub fn set(&mut self, fragment: &str) -> &mut Self {
        self.push_raw(ClauseKind::Set, fragment);
        self
    }

    /// Append a raw `ADD` fragment.
    pub fn add(&mut self, fragment: &str) -> &mut Self {
        self.push_raw(ClauseKind::Add, fragment);
        self
    }

    /// Append a raw `REMOVE` fragment.
    pub fn remove(&mut self, fragment: &str) -> &mut Self {
        self.push_raw(ClauseKind::Remove, fragment);
        self
    }

    /// Append several raw `REMOVE` fragments.
    pub fn remove_all<I, S>(&mut self, fragments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for fragment in fragments {
            self.push_raw(ClauseKind::Remove, fragment.as_ref());
        }
        self
    }

    /// Append a raw `DELETE` fragment.
    pub fn delete(&mut self, fragment: &str) -> &mut Self {
        self.push_raw(ClauseKind::Delete, fragment);
        self
    }

    /// Register name placeholders. Existing entries are overwritten.
    pub fn names<I, K, V>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.names
            .extend(names.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Register value placeholders. Existing entries are overwritten.
    pub fn values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.values
            .extend(values.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a condition joined to the existing one with `AND`.
    ///
    /// # Errors
    ///
    /// Validation error for a blank expression.
    pub fn condition(&mut self, expr: &str) -> BuilderResult<&mut Self> {
        self.condition_with(expr, LogicalOperator::And)
    }

    /// Add a condition joined to the existing one with `op`.
    ///
    /// # Errors
    ///
    /// Validation error for a blank expression.
    pub fn condition_with(&mut self, expr: &str, op: LogicalOperator) -> BuilderResult<&mut Self> {
        if expr.trim().is_empty() {
            return Err(BuilderError::Validation(
                "The condition expression must be a non-empty string.".to_owned(),
            ));
        }
        self.condition = Some(join_condition(self.condition.as_deref(), expr, op));
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Response shaping
    // -----------------------------------------------------------------------

    /// Which attributes the store returns.
    pub fn return_values(&mut self, mode: ReturnValue) -> &mut Self {
        self.return_values = mode;
        self
    }

    /// Whether item collection metrics are returned.
    pub fn metrics(&mut self, mode: ReturnItemCollectionMetrics) -> &mut Self {
        self.metrics = Some(mode);
        self
    }

    /// Level of consumed-capacity detail returned.
    pub fn capacity(&mut self, mode: ReturnConsumedCapacity) -> &mut Self {
        self.capacity = Some(mode);
        self
    }

    // -----------------------------------------------------------------------
    // Assembly
    // -----------------------------------------------------------------------

    /// Build the `UpdateItem` request and finalize the updater.
    ///
    /// Calling it again without mutations in between returns an equal
    /// request.
    pub fn get_params(&mut self) -> UpdateItemInput {
        self.phase = Phase::Finalized;
        let input = UpdateItemInput {
            table_name: self.table_name.clone(),
            key: self.key.clone(),
            return_values: self.return_values,
            update_expression: self.clauses.to_expression(),
            condition_expression: self.condition.clone(),
            expression_attribute_names: self.names.clone(),
            expression_attribute_values: self.values.clone(),
            return_consumed_capacity: self.capacity,
            return_item_collection_metrics: self.metrics,
        };
        debug!(
            table = %input.table_name,
            update = input.update_expression.as_deref().unwrap_or_default(),
            condition = input.condition_expression.as_deref().unwrap_or_default(),
            "finalized update request"
        );
        input
    }

    /// Build the request and send it through the store's client.
    ///
    /// # Errors
    ///
    /// Returns whatever error the client reports, unchanged. A failed
    /// revision check is a `ConditionalCheckFailedException`.
    pub async fn execute(&mut self) -> Result<UpdateItemOutput, StoreError> {
        let input = self.get_params();
        self.store.client().update_item(input).await
    }
}
