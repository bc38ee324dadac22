//! Typed content queries
//!
//! A `Query` is a single-owner builder: it starts from a set of content
//! types and a version filter, accumulates inner joins against record types
//! with predicates bound to them, one ordering key and a pagination window.
//!
//! ## Execution
//!
//! 1. Scan version rows of the target types (version filter applied in storage)
//! 2. De-duplicate rows by version record identity
//! 3. For each join, load the record for every surviving row and keep the row
//!    only if the record exists and all of the join's predicates hold
//! 4. Stable sort by the active key (ties keep storage order)
//! 5. Apply the window
//! 6. Materialize items
//!
//! Every execution re-reads storage. Storage failures surface as
//! `QuarryError::QueryExecution` and are never retried here.

use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, warn};

use quarry_core::{
    record_ref, ContentStorage, ErasedRecord, QuarryError, QuarryResult, Record, RecordType,
    VersionOptions, VersionRow,
};

use crate::item::ContentItem;
use crate::part::Part;
use crate::registry::ContentTypeRegistry;

type Predicate = Box<dyn Fn(&ErasedRecord) -> bool + Send>;
type Comparator = Box<dyn Fn(&ErasedRecord, &ErasedRecord) -> Ordering + Send>;

/// Number of rows a window keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Take {
    /// Every row after `skip`
    #[default]
    All,
    /// At most this many rows (0 keeps none)
    Count(usize),
}

impl Take {
    fn limit(self) -> usize {
        match self {
            Take::All => usize::MAX,
            Take::Count(n) => n,
        }
    }
}

impl From<usize> for Take {
    fn from(n: usize) -> Self {
        Take::Count(n)
    }
}

/// Typed reference to a join clause of a query
///
/// Returned by `Query::join` and passed back to `filter` and `order_by` to
/// bind predicates and keys to that join.
pub struct JoinHandle<R> {
    index: usize,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for JoinHandle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for JoinHandle<R> {}

impl<R: Record> fmt::Debug for JoinHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JoinHandle<{}>({})", R::NAME, self.index)
    }
}

struct JoinClause {
    record_type: RecordType,
    predicates: SmallVec<[Predicate; 2]>,
}

struct OrderClause {
    join: usize,
    descending: bool,
    compare: Comparator,
}

/// A version row that survived every join, with the joined records
struct Matched {
    row: VersionRow,
    records: SmallVec<[ErasedRecord; 4]>,
}

/// Composable content query
///
/// # Example
///
/// ```
/// use quarry_core::VersionOptions;
/// use quarry_engine::{register_core_parts, CommonPartRecord, ContentManager, ContentTypeDefinition};
///
/// let manager = ContentManager::in_memory();
/// register_core_parts(&manager);
/// manager.register_type(ContentTypeDefinition::new("Page").with_part("CommonPart"));
///
/// let mut query = manager.query(VersionOptions::Published, "Page").unwrap();
/// let common = query.join::<CommonPartRecord>().unwrap();
/// query
///     .order_by_descending(common, |c| c.created_utc)
///     .slice(0, 10);
/// assert!(query.list().unwrap().is_empty());
/// ```
pub struct Query {
    storage: Arc<dyn ContentStorage>,
    types: Arc<ContentTypeRegistry>,
    options: VersionOptions,
    content_types: Vec<String>,
    joins: SmallVec<[JoinClause; 4]>,
    order: Option<OrderClause>,
    skip: usize,
    take: Take,
    slow_query: Duration,
    /// First builder misuse, reported at execution before storage access
    invalid: Option<String>,
}

impl Query {
    pub(crate) fn new(
        storage: Arc<dyn ContentStorage>,
        types: Arc<ContentTypeRegistry>,
        options: VersionOptions,
        content_types: Vec<String>,
        slow_query: Duration,
    ) -> Self {
        Self {
            storage,
            types,
            options,
            content_types,
            joins: SmallVec::new(),
            order: None,
            skip: 0,
            take: Take::All,
            slow_query,
            invalid: None,
        }
    }

    /// Version filter of this query
    pub fn version_options(&self) -> VersionOptions {
        self.options
    }

    /// Content types this query targets
    pub fn content_types(&self) -> &[String] {
        &self.content_types
    }

    /// Add an inner join against record type `R`
    ///
    /// Rows without an `R` record are dropped. Joining the same record type
    /// twice adds a second clause but never duplicates rows.
    ///
    /// # Errors
    ///
    /// Returns `QuarryError::UnmappedRecord` immediately if `R` has no
    /// storage mapping.
    pub fn join<R: Record>(&mut self) -> QuarryResult<JoinHandle<R>> {
        let record_type = RecordType::of::<R>();
        if !self.storage.is_mapped(&record_type) {
            return Err(QuarryError::unmapped_record(R::NAME));
        }
        self.joins.push(JoinClause {
            record_type,
            predicates: SmallVec::new(),
        });
        Ok(JoinHandle {
            index: self.joins.len() - 1,
            _record: PhantomData,
        })
    }

    /// Keep only rows whose joined `R` record satisfies `predicate`
    ///
    /// Predicates on the same join are combined with AND.
    pub fn filter<R, F>(&mut self, join: JoinHandle<R>, predicate: F) -> &mut Self
    where
        R: Record,
        F: Fn(&R) -> bool + Send + 'static,
    {
        if let Some(clause) = self.clause_mut::<R>(join) {
            clause.predicates.push(Box::new(move |erased: &ErasedRecord| {
                record_ref::<R>(erased).is_some_and(|record| predicate(record))
            }));
        }
        self
    }

    /// Order ascending by a key of the joined `R` record
    ///
    /// Replaces any previous ordering.
    pub fn order_by<R, K, F>(&mut self, join: JoinHandle<R>, key: F) -> &mut Self
    where
        R: Record,
        K: Ord,
        F: Fn(&R) -> K + Send + 'static,
    {
        self.set_order(join, key, false)
    }

    /// Order descending by a key of the joined `R` record
    ///
    /// Replaces any previous ordering.
    pub fn order_by_descending<R, K, F>(&mut self, join: JoinHandle<R>, key: F) -> &mut Self
    where
        R: Record,
        K: Ord,
        F: Fn(&R) -> K + Send + 'static,
    {
        self.set_order(join, key, true)
    }

    /// Set the pagination window, applied after ordering
    pub fn slice(&mut self, skip: usize, take: impl Into<Take>) -> &mut Self {
        self.skip = skip;
        self.take = take.into();
        self
    }

    /// Execute and return every item in the window, in order
    ///
    /// # Errors
    ///
    /// Returns builder errors before touching storage, and
    /// `QuarryError::QueryExecution` if storage fails.
    pub fn list(&self) -> QuarryResult<Vec<ContentItem>> {
        self.execute(self.skip, self.take)?
            .into_iter()
            .map(|row| self.materialize(row))
            .collect()
    }

    /// Execute with a one-row window and return that row, if any
    pub fn first_or_default(&self) -> QuarryResult<Option<ContentItem>> {
        let take = match self.take {
            Take::Count(0) => Take::Count(0),
            _ => Take::Count(1),
        };
        match self.execute(self.skip, take)?.into_iter().next() {
            Some(row) => self.materialize(row).map(Some),
            None => Ok(None),
        }
    }

    /// Number of matching rows, ignoring the window
    pub fn count(&self) -> QuarryResult<usize> {
        Ok(self.execute(0, Take::All)?.len())
    }

    /// Consume the query into a lazy stream of projected items
    ///
    /// Storage is scanned when the stream is first advanced; items are then
    /// materialized one at a time.
    pub fn select<T, F>(self, mut projection: F) -> QueryStream<impl FnMut(ContentItem) -> Option<T>>
    where
        F: FnMut(ContentItem) -> T,
    {
        QueryStream::new(self, move |item| Some(projection(item)))
    }

    /// Consume the query into a lazy stream of part facades
    ///
    /// Items whose type does not carry `P` are skipped.
    pub fn select_part<P: Part>(self) -> QueryStream<impl FnMut(ContentItem) -> Option<Arc<P>>> {
        QueryStream::new(self, |item: ContentItem| item.as_part::<P>())
    }

    fn clause_mut<R: Record>(&mut self, join: JoinHandle<R>) -> Option<&mut JoinClause> {
        let bound = self
            .joins
            .get(join.index)
            .is_some_and(|clause| clause.record_type.id() == TypeId::of::<R>());
        if !bound {
            if self.invalid.is_none() {
                self.invalid = Some(format!(
                    "join handle {} for {} does not belong to this query",
                    join.index,
                    R::NAME
                ));
            }
            return None;
        }
        self.joins.get_mut(join.index)
    }

    fn set_order<R, K, F>(&mut self, join: JoinHandle<R>, key: F, descending: bool) -> &mut Self
    where
        R: Record,
        K: Ord,
        F: Fn(&R) -> K + Send + 'static,
    {
        if self.clause_mut::<R>(join).is_some() {
            self.order = Some(OrderClause {
                join: join.index,
                descending,
                compare: Box::new(move |a: &ErasedRecord, b: &ErasedRecord| {
                    match (record_ref::<R>(a), record_ref::<R>(b)) {
                        (Some(a), Some(b)) => key(a).cmp(&key(b)),
                        _ => Ordering::Equal,
                    }
                }),
            });
        }
        self
    }

    /// Run the row pipeline and return the windowed version rows
    fn execute(&self, skip: usize, take: Take) -> QuarryResult<Vec<VersionRow>> {
        if let Some(reason) = &self.invalid {
            return Err(QuarryError::invalid_input(reason.clone()));
        }

        let start = Instant::now();
        let mut rows = self
            .storage
            .scan_versions(&self.content_types, self.options)
            .map_err(QuarryError::query_execution)?;
        let scanned = rows.len();

        let mut seen = FxHashSet::default();
        rows.retain(|row| seen.insert(row.version_id));

        let mut matched = Vec::with_capacity(rows.len());
        'rows: for row in rows {
            let mut records = SmallVec::new();
            for clause in &self.joins {
                let record = match self
                    .storage
                    .load_record(&clause.record_type, &row)
                    .map_err(QuarryError::query_execution)?
                {
                    Some(record) => record,
                    None => continue 'rows,
                };
                if !clause.predicates.iter().all(|p| p(&record)) {
                    continue 'rows;
                }
                records.push(record);
            }
            matched.push(Matched { row, records });
        }

        if let Some(order) = &self.order {
            matched.sort_by(|a, b| {
                let ord = (order.compare)(&a.records[order.join], &b.records[order.join]);
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let total = matched.len();
        let window: Vec<VersionRow> = matched
            .into_iter()
            .skip(skip)
            .take(take.limit())
            .map(|m| m.row)
            .collect();

        let elapsed = start.elapsed();
        debug!(
            target: "quarry::query",
            types = ?self.content_types,
            versions = %self.options,
            joins = self.joins.len(),
            scanned,
            matched = total,
            returned = window.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "Query executed"
        );
        if elapsed > self.slow_query {
            warn!(
                target: "quarry::query",
                types = ?self.content_types,
                elapsed_ms = elapsed.as_millis() as u64,
                "Slow query"
            );
        }

        Ok(window)
    }

    fn materialize(&self, row: VersionRow) -> QuarryResult<ContentItem> {
        ContentItem::load(self.storage.as_ref(), &self.types, row)
            .map_err(QuarryError::query_execution)
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("content_types", &self.content_types)
            .field("options", &self.options)
            .field(
                "joins",
                &self
                    .joins
                    .iter()
                    .map(|j| j.record_type.name())
                    .collect::<Vec<_>>(),
            )
            .field("skip", &self.skip)
            .field("take", &self.take)
            .finish()
    }
}

/// Lazy, single-pass stream over the results of a consumed query
///
/// Yields `QuarryResult` items; after the first error the stream ends.
pub struct QueryStream<F> {
    query: Query,
    rows: Option<std::vec::IntoIter<VersionRow>>,
    project: F,
    done: bool,
}

impl<F> QueryStream<F> {
    fn new(query: Query, project: F) -> Self {
        Self {
            query,
            rows: None,
            project,
            done: false,
        }
    }
}

impl<T, F> Iterator for QueryStream<F>
where
    F: FnMut(ContentItem) -> Option<T>,
{
    type Item = QuarryResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.rows.is_none() {
            match self.query.execute(self.query.skip, self.query.take) {
                Ok(rows) => self.rows = Some(rows.into_iter()),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        loop {
            let row = match self.rows.as_mut().and_then(|rows| rows.next()) {
                Some(row) => row,
                None => {
                    self.done = true;
                    return None;
                }
            };
            match self.query.materialize(row) {
                Ok(item) => {
                    if let Some(value) = (self.project)(item) {
                        return Some(Ok(value));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
