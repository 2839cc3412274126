//! Concurrent in-memory quote store.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use qotd_source::{CandidateSource, CandidateStream, SourceResult, iter_stream};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::model::{MAX_QUOTE_LEN, MAX_SOURCE_NAME_LEN, Quote, Source};

struct QuoteRecord {
    // Insert order, used for enumeration.
    seq: u64,
    quote: Quote,
    sources: HashSet<Uuid>,
}

#[derive(Default)]
struct Inner {
    quotes: DashMap<Uuid, QuoteRecord>,
    // Lowercased text -> quote id. Locked before `quotes` when both are held.
    quote_index: DashMap<String, Uuid>,
    sources: DashMap<Uuid, Source>,
    // Lowercased name -> source id.
    source_index: DashMap<String, Uuid>,
    sequence: AtomicU64,
}

/// Thread-safe in-memory store of quotes and sources.
///
/// Cloning is cheap: clones share the same data.
///
/// Quote texts and source names are trimmed on write and must be unique
/// ignoring case. As a [`CandidateSource`], the store enumerates its quotes in
/// insertion order and checks existence by [`Quote::id`], so a cached quote
/// stays valid after its text is edited.
#[derive(Clone, Default)]
pub struct QuoteStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for QuoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("quotes", &self.inner.quotes.len())
            .field("sources", &self.inner.sources.len())
            .finish()
    }
}

fn normalize(text: &str, limit: usize) -> StoreResult<(String, String)> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StoreError::BlankText);
    }
    if text.chars().count() > limit {
        return Err(StoreError::TooLong { limit });
    }
    Ok((text.to_owned(), text.to_lowercase()))
}

fn sort_quotes(quotes: &mut [Quote]) {
    quotes.sort_by_cached_key(|quote| (quote.text.to_lowercase(), quote.text.clone()));
}

fn sort_sources(sources: &mut [Source]) {
    sources.sort_by_cached_key(|source| (source.name.to_lowercase(), source.name.clone()));
}

impl QuoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored quotes.
    pub fn len(&self) -> usize {
        self.inner.quotes.len()
    }

    /// Returns `true` if no quotes are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.quotes.is_empty()
    }

    /// Removes every quote, source and attribution.
    pub fn clear(&self) {
        self.inner.quote_index.clear();
        self.inner.quotes.clear();
        self.inner.source_index.clear();
        self.inner.sources.clear();
    }

    /// Stores a new quote.
    ///
    /// # Errors
    ///
    /// [`StoreError::BlankText`] for blank text, [`StoreError::TooLong`] past
    /// [`MAX_QUOTE_LEN`] characters, [`StoreError::DuplicateQuote`] when a
    /// quote with the same text (ignoring case) exists.
    pub fn add_quote(&self, text: impl AsRef<str>) -> StoreResult<Quote> {
        let (text, key) = normalize(text.as_ref(), MAX_QUOTE_LEN)?;
        match self.inner.quote_index.entry(key) {
            Entry::Occupied(_) => Err(StoreError::DuplicateQuote(text)),
            Entry::Vacant(slot) => {
                let quote = Quote::new(text);
                let seq = self.inner.sequence.fetch_add(1, Ordering::Relaxed);
                self.inner.quotes.insert(
                    quote.id,
                    QuoteRecord {
                        seq,
                        quote: quote.clone(),
                        sources: HashSet::new(),
                    },
                );
                slot.insert(quote.id);
                debug!(quote = %quote.id, "quote added");
                Ok(quote)
            }
        }
    }

    /// Returns the quote with `id`.
    pub fn quote(&self, id: Uuid) -> StoreResult<Quote> {
        self.inner
            .quotes
            .get(&id)
            .map(|record| record.quote.clone())
            .ok_or(StoreError::QuoteNotFound(id))
    }

    /// Replaces the text of quote `id`, keeping its id and creation time.
    ///
    /// Changing only the case of a quote's own text is allowed.
    pub fn update_quote(&self, id: Uuid, text: impl AsRef<str>) -> StoreResult<Quote> {
        let (text, key) = normalize(text.as_ref(), MAX_QUOTE_LEN)?;
        let old_key = self
            .inner
            .quotes
            .get(&id)
            .map(|record| record.quote.text.to_lowercase())
            .ok_or(StoreError::QuoteNotFound(id))?;

        if old_key != key {
            match self.inner.quote_index.entry(key.clone()) {
                Entry::Occupied(_) => return Err(StoreError::DuplicateQuote(text)),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.inner.quote_index.remove_if(&old_key, |_, owner| *owner == id);
        }

        let Some(mut record) = self.inner.quotes.get_mut(&id) else {
            // Removed concurrently; release the text we just claimed.
            self.inner.quote_index.remove_if(&key, |_, owner| *owner == id);
            return Err(StoreError::QuoteNotFound(id));
        };
        record.quote.text = text;
        debug!(quote = %id, "quote updated");
        Ok(record.quote.clone())
    }

    /// Removes quote `id` together with its attributions.
    pub fn remove_quote(&self, id: Uuid) -> StoreResult<Quote> {
        let (_, record) = self
            .inner
            .quotes
            .remove(&id)
            .ok_or(StoreError::QuoteNotFound(id))?;
        self.inner
            .quote_index
            .remove_if(&record.quote.text.to_lowercase(), |_, owner| *owner == id);
        debug!(quote = %id, "quote removed");
        Ok(record.quote)
    }

    /// All quotes, sorted by text.
    pub fn quotes(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self
            .inner
            .quotes
            .iter()
            .map(|record| record.quote.clone())
            .collect();
        sort_quotes(&mut quotes);
        quotes
    }

    /// Quotes whose text contains `fragment`, ignoring case, sorted by text.
    pub fn search(&self, fragment: &str) -> Vec<Quote> {
        let needle = fragment.trim().to_lowercase();
        let mut quotes: Vec<Quote> = self
            .inner
            .quotes
            .iter()
            .filter(|record| record.quote.text.to_lowercase().contains(&needle))
            .map(|record| record.quote.clone())
            .collect();
        sort_quotes(&mut quotes);
        quotes
    }

    /// Stores a new source.
    ///
    /// # Errors
    ///
    /// [`StoreError::BlankText`] for a blank name, [`StoreError::TooLong`] past
    /// [`MAX_SOURCE_NAME_LEN`] characters, [`StoreError::DuplicateSource`] when
    /// a source with the same name (ignoring case) exists.
    pub fn add_source(&self, name: impl AsRef<str>) -> StoreResult<Source> {
        let (name, key) = normalize(name.as_ref(), MAX_SOURCE_NAME_LEN)?;
        match self.inner.source_index.entry(key) {
            Entry::Occupied(_) => Err(StoreError::DuplicateSource(name)),
            Entry::Vacant(slot) => {
                let source = Source::new(name);
                self.inner.sources.insert(source.id, source.clone());
                slot.insert(source.id);
                debug!(source = %source.id, "source added");
                Ok(source)
            }
        }
    }

    /// Returns the source with `id`.
    pub fn source(&self, id: Uuid) -> StoreResult<Source> {
        self.inner
            .sources
            .get(&id)
            .map(|source| source.value().clone())
            .ok_or(StoreError::SourceNotFound(id))
    }

    /// Renames source `id`.
    pub fn update_source(&self, id: Uuid, name: impl AsRef<str>) -> StoreResult<Source> {
        let (name, key) = normalize(name.as_ref(), MAX_SOURCE_NAME_LEN)?;
        let old_key = self
            .inner
            .sources
            .get(&id)
            .map(|source| source.name.to_lowercase())
            .ok_or(StoreError::SourceNotFound(id))?;

        if old_key != key {
            match self.inner.source_index.entry(key.clone()) {
                Entry::Occupied(_) => return Err(StoreError::DuplicateSource(name)),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.inner.source_index.remove_if(&old_key, |_, owner| *owner == id);
        }

        let Some(mut source) = self.inner.sources.get_mut(&id) else {
            self.inner.source_index.remove_if(&key, |_, owner| *owner == id);
            return Err(StoreError::SourceNotFound(id));
        };
        source.name = name;
        debug!(source = %id, "source updated");
        Ok(source.value().clone())
    }

    /// Removes source `id` and detaches it from every quote.
    pub fn remove_source(&self, id: Uuid) -> StoreResult<Source> {
        let (_, source) = self
            .inner
            .sources
            .remove(&id)
            .ok_or(StoreError::SourceNotFound(id))?;
        self.inner
            .source_index
            .remove_if(&source.name.to_lowercase(), |_, owner| *owner == id);
        for mut record in self.inner.quotes.iter_mut() {
            record.sources.remove(&id);
        }
        debug!(source = %id, "source removed");
        Ok(source)
    }

    /// All sources, sorted by name.
    pub fn sources(&self) -> Vec<Source> {
        let mut sources: Vec<Source> = self
            .inner
            .sources
            .iter()
            .map(|source| source.value().clone())
            .collect();
        sort_sources(&mut sources);
        sources
    }

    /// Sources whose name contains `fragment`, ignoring case, sorted by name.
    pub fn search_sources(&self, fragment: &str) -> Vec<Source> {
        let needle = fragment.trim().to_lowercase();
        let mut sources: Vec<Source> = self
            .inner
            .sources
            .iter()
            .filter(|source| source.name.to_lowercase().contains(&needle))
            .map(|source| source.value().clone())
            .collect();
        sort_sources(&mut sources);
        sources
    }

    /// Attributes quote `quote_id` to source `source_id`.
    ///
    /// Attaching an already attached source is a no-op. Returns the source.
    pub fn attach(&self, quote_id: Uuid, source_id: Uuid) -> StoreResult<Source> {
        let mut record = self
            .inner
            .quotes
            .get_mut(&quote_id)
            .ok_or(StoreError::QuoteNotFound(quote_id))?;
        // Checked under the quote guard so a concurrent `remove_source` sweep
        // cannot miss the new attribution.
        let source = self
            .inner
            .sources
            .get(&source_id)
            .map(|source| source.value().clone())
            .ok_or(StoreError::SourceNotFound(source_id))?;
        record.sources.insert(source_id);
        debug!(quote = %quote_id, source = %source_id, "source attached");
        Ok(source)
    }

    /// Returns source `source_id` if it is attached to quote `quote_id`.
    pub fn attribution(&self, quote_id: Uuid, source_id: Uuid) -> StoreResult<Source> {
        let source = self.source(source_id)?;
        let attached = self
            .inner
            .quotes
            .get(&quote_id)
            .map(|record| record.sources.contains(&source_id))
            .ok_or(StoreError::QuoteNotFound(quote_id))?;
        if attached {
            Ok(source)
        } else {
            Err(StoreError::NotAttached {
                quote_id,
                source_id,
            })
        }
    }

    /// Removes the attribution of quote `quote_id` to source `source_id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotAttached`] when the two exist but are not linked.
    pub fn detach(&self, quote_id: Uuid, source_id: Uuid) -> StoreResult<()> {
        if !self.inner.sources.contains_key(&source_id) {
            return Err(StoreError::SourceNotFound(source_id));
        }
        let mut record = self
            .inner
            .quotes
            .get_mut(&quote_id)
            .ok_or(StoreError::QuoteNotFound(quote_id))?;
        if !record.sources.remove(&source_id) {
            return Err(StoreError::NotAttached {
                quote_id,
                source_id,
            });
        }
        debug!(quote = %quote_id, source = %source_id, "source detached");
        Ok(())
    }

    /// Sources attached to quote `quote_id`, sorted by name.
    pub fn sources_of(&self, quote_id: Uuid) -> StoreResult<Vec<Source>> {
        let ids: Vec<Uuid> = self
            .inner
            .quotes
            .get(&quote_id)
            .map(|record| record.sources.iter().copied().collect())
            .ok_or(StoreError::QuoteNotFound(quote_id))?;
        let mut sources: Vec<Source> = ids
            .into_iter()
            .filter_map(|id| {
                self.inner
                    .sources
                    .get(&id)
                    .map(|source| source.value().clone())
            })
            .collect();
        sort_sources(&mut sources);
        Ok(sources)
    }

    /// Quotes attributed to source `source_id`, sorted by text.
    pub fn quotes_of(&self, source_id: Uuid) -> StoreResult<Vec<Quote>> {
        if !self.inner.sources.contains_key(&source_id) {
            return Err(StoreError::SourceNotFound(source_id));
        }
        let mut quotes: Vec<Quote> = self
            .inner
            .quotes
            .iter()
            .filter(|record| record.sources.contains(&source_id))
            .map(|record| record.quote.clone())
            .collect();
        sort_quotes(&mut quotes);
        Ok(quotes)
    }

    fn snapshot(&self) -> Vec<Quote> {
        let mut records: Vec<(u64, Quote)> = self
            .inner
            .quotes
            .iter()
            .map(|record| (record.seq, record.quote.clone()))
            .collect();
        records.sort_unstable_by_key(|(seq, _)| *seq);
        records.into_iter().map(|(_, quote)| quote).collect()
    }
}

#[async_trait]
impl CandidateSource for QuoteStore {
    type Candidate = Quote;

    fn enumerate_all(&self) -> CandidateStream<'_, Quote> {
        iter_stream(self.snapshot())
    }

    async fn exists(&self, candidate: &Quote) -> SourceResult<bool> {
        Ok(self.inner.quotes.contains_key(&candidate.id))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
