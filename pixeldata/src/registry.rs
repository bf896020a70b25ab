//! A priority-ordered registry of pixel data codecs, keyed by transfer
//! syntax UID.
//!
//! This sits above [`dicom_transfer_syntax_registry::TransferSyntaxRegistry`],
//! which already tracks which transfer syntaxes *exist* and whether a codec
//! is required for the encapsulated form. This registry instead lets more
//! than one codec claim the same transfer syntax UID and picks a winner by
//! priority, the way a deployment might prefer a native Rust decoder over a
//! GDCM binding, or vice versa, without recompiling either.
//!
//! The first call to [`CodecRegistry::get`] freezes a snapshot of the
//! then-current bindings for fast, lock-free subsequent lookups. A later
//! [`CodecRegistry::register`] call invalidates that snapshot, so the next
//! `get` rebuilds it.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use dicom_encoding::adapters::{DynPixelDataReader, DynPixelDataWriter};

/// The priority tier of a registered codec.
///
/// Ties within a tier are resolved by most recent registration, mirroring
/// the DICOM-rs transfer syntax registry's "later registration wins"
/// behavior for inventory-contributed entries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// A pure (software-only) implementation, e.g. the vendored RLE codec.
    Pure = 0,
    /// A native binding to an external library, e.g. GDCM or a vendor SDK.
    Native = 1,
}

struct Binding {
    priority: Priority,
    sequence: u64,
    reader: Option<DynPixelDataReader>,
    writer: Option<DynPixelDataWriter>,
}

/// A thread-safe registry mapping transfer syntax UID to the
/// highest-priority codec registered for it.
#[derive(Default)]
pub struct CodecRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    bindings: HashMap<&'static str, Vec<Binding>>,
    next_sequence: u64,
    /// Lock-free snapshot of the winning codec per UID, built lazily on
    /// first [`CodecRegistry::get`] and invalidated by the next `register`.
    frozen: Option<Arc<HashMap<&'static str, usize>>>,
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().unwrap();
        f.debug_struct("CodecRegistry")
            .field("transfer_syntaxes", &inner.bindings.keys().collect::<Vec<_>>())
            .field("frozen", &inner.frozen.is_some())
            .finish()
    }
}

impl CodecRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        CodecRegistry {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Register a codec for the given transfer syntax UID at the given
    /// priority. Registering again for the same `(uid, priority)` pair
    /// appends a new, more-recent binding that wins ties within that tier.
    ///
    /// Invalidates any frozen snapshot: the next [`CodecRegistry::get`]
    /// rebuilds it.
    pub fn register(
        &self,
        transfer_syntax_uid: &'static str,
        priority: Priority,
        reader: Option<DynPixelDataReader>,
        writer: Option<DynPixelDataWriter>,
    ) {
        let mut inner = self.inner.write().unwrap();
        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        inner
            .bindings
            .entry(transfer_syntax_uid)
            .or_default()
            .push(Binding {
                priority,
                sequence,
                reader,
                writer,
            });
        inner.frozen = None;
    }

    /// Look up the highest-priority reader registered for a transfer
    /// syntax UID, if any codec registered for it supports decoding.
    pub fn get_reader(&self, transfer_syntax_uid: &str) -> Option<MappedReader<'_>> {
        self.winning_index(transfer_syntax_uid).and_then(|idx| {
            let inner = self.inner.read().unwrap();
            let uid = inner
                .bindings
                .keys()
                .find(|k| **k == transfer_syntax_uid)?;
            let binding = inner.bindings.get(uid)?.get(idx)?;
            binding.reader.as_ref()?;
            Some(MappedReader {
                registry: self,
                uid: transfer_syntax_uid.to_string(),
                index: idx,
            })
        })
    }

    /// Look up the highest-priority writer registered for a transfer
    /// syntax UID, if any codec registered for it supports encoding.
    pub fn has_writer(&self, transfer_syntax_uid: &str) -> bool {
        self.winning_index(transfer_syntax_uid)
            .map(|idx| {
                let inner = self.inner.read().unwrap();
                inner
                    .bindings
                    .get(transfer_syntax_uid)
                    .and_then(|v| v.get(idx))
                    .map(|b| b.writer.is_some())
                    .unwrap_or(false)
            })
            .unwrap_or(false)
    }

    /// Returns true if some codec (of either direction) is registered for
    /// the given transfer syntax UID.
    pub fn contains(&self, transfer_syntax_uid: &str) -> bool {
        self.winning_index(transfer_syntax_uid).is_some()
    }

    fn winning_index(&self, transfer_syntax_uid: &str) -> Option<usize> {
        {
            let inner = self.inner.read().unwrap();
            if let Some(frozen) = &inner.frozen {
                return frozen.get(transfer_syntax_uid).copied();
            }
        }

        // build and install the frozen snapshot
        let mut inner = self.inner.write().unwrap();
        if inner.frozen.is_none() {
            let mut snapshot = HashMap::with_capacity(inner.bindings.len());
            for (uid, bindings) in inner.bindings.iter() {
                if let Some((idx, _)) = bindings
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, b)| (b.priority, b.sequence))
                {
                    snapshot.insert(*uid, idx);
                }
            }
            inner.frozen = Some(Arc::new(snapshot));
        }
        inner.frozen.as_ref().unwrap().get(transfer_syntax_uid).copied()
    }
}

/// A resolved binding to a reader; kept separate from [`DynPixelDataReader`]
/// since the registry owns the trait object behind a lock.
pub struct MappedReader<'a> {
    registry: &'a CodecRegistry,
    uid: String,
    index: usize,
}

impl<'a> MappedReader<'a> {
    /// Run the given closure with access to the resolved reader.
    pub fn with<R>(&self, f: impl FnOnce(&dyn dicom_encoding::adapters::PixelDataReader) -> R) -> Option<R> {
        let inner = self.registry.inner.read().unwrap();
        let binding = inner.bindings.get(self.uid.as_str())?.get(self.index)?;
        binding.reader.as_deref().map(f)
    }
}
