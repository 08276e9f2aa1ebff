//! Packrat memoization keyed by stream position.
//!
//! A [`MemoTable`] maps a position to a bucket of entries, one per cache key.
//! Buckets start as a single entry and turn into a chain once a second key
//! lands on the same position.
//!
//! The table is the one piece of state shared across backtracking branches.
//! Parsers find it through the stream's data payload: the caller owns the
//! `Rc<MemoTable>` and puts a [`MemoHandle`] (a weak reference) in the
//! payload, so cached remaining streams never keep the table alive.

use crate::outcome::Outcome;
use crate::stream::Stream;
use crate::traits::Parser;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Identity of one memoized parser instance.
///
/// Two ids are equal only if they were cloned from the same [`ParserId::new`]
/// call. Cache entries hold a clone, so an id is never reused while entries
/// keyed by it exist.
#[derive(Clone, Default)]
pub struct ParserId(Rc<()>);

impl ParserId {
    pub fn new() -> Self {
        Self::default()
    }

    fn address(&self) -> *const () {
        Rc::as_ptr(&self.0)
    }
}

impl PartialEq for ParserId {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ParserId {}

impl Hash for ParserId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for ParserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParserId({:p})", self.address())
    }
}

/// Second component of a cache key; the first is always the position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Parser(ParserId),
    Named(Rc<str>),
}

struct CacheEntry {
    key: CacheKey,
    succeeded: bool,
    outcome: Box<dyn Any>,
}

enum Bucket {
    Single(CacheEntry),
    Chain(Vec<CacheEntry>),
}

impl Bucket {
    fn entries(&self) -> &[CacheEntry] {
        match self {
            Bucket::Single(entry) => std::slice::from_ref(entry),
            Bucket::Chain(entries) => entries,
        }
    }

    fn entries_mut(&mut self) -> &mut [CacheEntry] {
        match self {
            Bucket::Single(entry) => std::slice::from_mut(entry),
            Bucket::Chain(entries) => entries,
        }
    }

    fn find(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries().iter().find(|entry| &entry.key == key)
    }

    fn insert(&mut self, entry: CacheEntry) {
        if let Some(existing) = self.entries_mut().iter_mut().find(|e| e.key == entry.key) {
            // Successful entries are final.
            assert!(
                !existing.succeeded,
                "memo table: successful entry for {:?} cannot be replaced",
                entry.key
            );
            *existing = entry;
            return;
        }

        let previous = std::mem::replace(self, Bucket::Chain(Vec::new()));
        let mut entries = match previous {
            Bucket::Single(first) => Vec::from([first]),
            Bucket::Chain(entries) => entries,
        };
        entries.push(entry);
        *self = Bucket::Chain(entries);
    }
}

/// The memoization table for one parse.
#[derive(Default)]
pub struct MemoTable {
    buckets: RefCell<HashMap<usize, Bucket>>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A weak handle suitable for storing in a stream's data payload.
    pub fn handle(self: &Rc<Self>) -> MemoHandle {
        MemoHandle(Rc::downgrade(self))
    }

    /// Returns a copy of the outcome cached at `(position, key)`.
    ///
    /// # Panics
    ///
    /// Panics if the entry was stored with different outcome types, which
    /// happens when one named key is shared by parsers of different types.
    pub fn lookup<T, S, E>(&self, position: usize, key: &CacheKey) -> Option<Outcome<T, S, E>>
    where
        T: Clone + 'static,
        S: Clone + 'static,
        E: Clone + 'static,
    {
        let buckets = self.buckets.borrow();
        let entry = buckets.get(&position)?.find(key)?;
        match entry.outcome.downcast_ref::<Outcome<T, S, E>>() {
            Some(outcome) => Some(outcome.clone()),
            None => panic!("memo table: entry for {key:?} at {position} has a different type"),
        }
    }

    /// Records `outcome` at `(position, key)`.
    ///
    /// Replacing an earlier failure is allowed; replacing a success panics.
    pub fn store<T, S, E>(&self, position: usize, key: CacheKey, outcome: &Outcome<T, S, E>)
    where
        T: Clone + 'static,
        S: Clone + 'static,
        E: Clone + 'static,
    {
        let entry = CacheEntry {
            key,
            succeeded: outcome.is_ok(),
            outcome: Box::new(outcome.clone()),
        };
        let mut buckets = self.buckets.borrow_mut();
        match buckets.get_mut(&position) {
            Some(bucket) => bucket.insert(entry),
            None => {
                buckets.insert(position, Bucket::Single(entry));
            }
        }
    }

    /// Number of cached entries across all positions.
    pub fn len(&self) -> usize {
        self.buckets
            .borrow()
            .values()
            .map(|bucket| bucket.entries().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.borrow().is_empty()
    }

    /// Number of entries cached at `position`.
    pub fn bucket_len(&self, position: usize) -> usize {
        self.buckets
            .borrow()
            .get(&position)
            .map_or(0, |bucket| bucket.entries().len())
    }

    pub fn clear(&self) {
        self.buckets.borrow_mut().clear();
    }
}

impl fmt::Debug for MemoTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoTable")
            .field("positions", &self.buckets.borrow().len())
            .field("entries", &self.len())
            .finish()
    }
}

/// Weak reference to a [`MemoTable`], carried in stream data payloads.
#[derive(Debug, Clone, Default)]
pub struct MemoHandle(Weak<MemoTable>);

impl MemoHandle {
    /// The table, if its owner still holds it.
    pub fn table(&self) -> Option<Rc<MemoTable>> {
        self.0.upgrade()
    }
}

/// Finds the memo table from a stream's data payload.
pub trait MemoAccessor<D> {
    fn table(&self, data: &D) -> Option<Rc<MemoTable>>;
}

impl<D, F> MemoAccessor<D> for F
where
    F: Fn(&D) -> Option<Rc<MemoTable>>,
{
    fn table(&self, data: &D) -> Option<Rc<MemoTable>> {
        self(data)
    }
}

/// How a memoized parser keys its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Each memoized parser gets its own identity.
    ByParser,
    /// Every parser memoized with the same name shares entries.
    ByKey(Rc<str>),
}

/// Wraps parsers with cache lookups.
///
/// With `replace_failures` set, a cached failure is not trusted: the parser
/// runs again and the new outcome replaces the old one. Cached successes are
/// always returned as is.
pub struct Memoizer<A> {
    accessor: Rc<A>,
    key: KeyStrategy,
    replace_failures: bool,
}

impl<A> Clone for Memoizer<A> {
    fn clone(&self) -> Self {
        Self {
            accessor: Rc::clone(&self.accessor),
            key: self.key.clone(),
            replace_failures: self.replace_failures,
        }
    }
}

impl<A> Memoizer<A> {
    pub fn by_position_and_parser(accessor: A) -> Self {
        Self {
            accessor: Rc::new(accessor),
            key: KeyStrategy::ByParser,
            replace_failures: false,
        }
    }

    pub fn by_position_and_key(accessor: A, key: impl Into<Rc<str>>) -> Self {
        Self {
            accessor: Rc::new(accessor),
            key: KeyStrategy::ByKey(key.into()),
            replace_failures: false,
        }
    }

    pub fn replace_failures(mut self, replace: bool) -> Self {
        self.replace_failures = replace;
        self
    }

    pub fn strategy(&self) -> &KeyStrategy {
        &self.key
    }

    pub fn replaces_failures(&self) -> bool {
        self.replace_failures
    }

    /// Wraps `parser`. Under [`KeyStrategy::ByParser`] every call yields a
    /// wrapper with a fresh identity.
    ///
    /// When the accessor finds no table the wrapper runs `parser` uncached.
    pub fn memoize<S, P>(&self, parser: P) -> impl Parser<S, Output = P::Output, Error = P::Error>
    where
        S: Stream + 'static,
        A: MemoAccessor<S::Data>,
        P: Parser<S>,
        P::Output: Clone + 'static,
        P::Error: Clone + 'static,
    {
        let key = match &self.key {
            KeyStrategy::ByParser => CacheKey::Parser(ParserId::new()),
            KeyStrategy::ByKey(name) => CacheKey::Named(Rc::clone(name)),
        };
        let accessor = Rc::clone(&self.accessor);
        let replace_failures = self.replace_failures;

        move |stream: S| -> Outcome<P::Output, S, P::Error> {
            let Some(table) = accessor.table(stream.data()) else {
                log::trace!("no memo table reachable, parsing {key:?} uncached");
                return parser.parse(stream);
            };

            let position = stream.position();
            if let Some(cached) = table.lookup::<P::Output, S, P::Error>(position, &key) {
                if cached.is_ok() || !replace_failures {
                    log::trace!("memo hit for {key:?} at {position}");
                    return cached;
                }
                log::trace!("replacing cached failure for {key:?} at {position}");
            }

            let outcome = parser.parse(stream);
            table.store(position, key.clone(), &outcome);
            outcome
        }
    }
}

/// Free-function form of [`Memoizer::memoize`].
pub fn memoize<S, A, P>(memoizer: &Memoizer<A>, parser: P) -> impl Parser<S, Output = P::Output, Error = P::Error>
where
    S: Stream + 'static,
    A: MemoAccessor<S::Data>,
    P: Parser<S>,
    P::Output: Clone + 'static,
    P::Error: Clone + 'static,
{
    memoizer.memoize(parser)
}
