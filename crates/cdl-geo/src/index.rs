use cdl_core::models::{BoundingVolume, IndexEntry};
use rstar::{RTree, RTreeObject, AABB};

/// Index entry with its cached `(x, y, t)` envelope
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    /// The entry itself
    pub entry: IndexEntry,

    /// Bounding box for spatial indexing
    envelope: AABB<[f64; 3]>,
}

impl IndexedEntry {
    /// Create a new indexed entry
    pub fn new(entry: IndexEntry) -> Self {
        let envelope = to_envelope(&entry.volume);
        Self { entry, envelope }
    }
}

impl RTreeObject for IndexedEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

fn to_envelope(volume: &BoundingVolume) -> AABB<[f64; 3]> {
    AABB::from_corners(
        [volume.min_x(), volume.min_y(), volume.min_t()],
        [volume.max_x(), volume.max_y(), volume.max_t()],
    )
}

fn from_envelope(envelope: &AABB<[f64; 3]>) -> Option<BoundingVolume> {
    let lower = envelope.lower();
    let upper = envelope.upper();
    BoundingVolume::new(lower[0], upper[0], lower[1], upper[1], lower[2], upper[2]).ok()
}

/// Spatiotemporal index mapping bounding volumes to raster files.
///
/// Entries may overlap. Queries return every entry whose volume intersects
/// the query volume (closed intervals), in unspecified order.
#[derive(Debug, Clone)]
pub struct SpatiotemporalIndex {
    tree: RTree<IndexedEntry>,
}

impl SpatiotemporalIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Create an index from a collection of entries
    pub fn from_entries(entries: Vec<IndexEntry>) -> Self {
        let indexed: Vec<IndexedEntry> = entries.into_iter().map(IndexedEntry::new).collect();

        Self { tree: RTree::bulk_load(indexed) }
    }

    /// Insert an entry into the index
    pub fn insert(&mut self, entry: IndexEntry) {
        tracing::debug!(path = %entry.path.display(), volume = %entry.volume, "Indexing raster");
        self.tree.insert(IndexedEntry::new(entry));
    }

    /// Entries intersecting `volume`.
    ///
    /// The sequence is lazy: callers that only need the first hit stop the
    /// tree walk there. Each call starts a fresh traversal.
    pub fn query<'a>(&'a self, volume: &BoundingVolume) -> impl Iterator<Item = &'a IndexEntry> + 'a {
        let envelope = to_envelope(volume);
        self.tree.locate_in_envelope_intersecting(&envelope).map(|indexed| &indexed.entry)
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.tree.iter().map(|indexed| &indexed.entry)
    }

    /// Volume enclosing every entry, `None` when the index is empty
    pub fn bounds(&self) -> Option<BoundingVolume> {
        if self.is_empty() {
            return None;
        }
        from_envelope(&self.tree.root().envelope())
    }

    /// Get the total number of entries in the index
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatiotemporalIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating spatiotemporal indexes
pub struct SpatiotemporalIndexBuilder {
    entries: Vec<IndexEntry>,
}

impl SpatiotemporalIndexBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add an entry to the builder
    pub fn add(mut self, entry: IndexEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Add multiple entries to the builder
    pub fn add_many(mut self, entries: Vec<IndexEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    /// Build the index
    pub fn build(self) -> SpatiotemporalIndex {
        SpatiotemporalIndex::from_entries(self.entries)
    }
}

impl Default for SpatiotemporalIndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}
