//! Private creator slot bookkeeping.
//!
//! A private data element (odd group, element `(slot << 8) | offset`) is
//! only resolvable once its owning private creator element, at
//! `(group, 0x0010..=0x00FF)`, has been read or registered. [`PrivateCreatorTable`]
//! tracks that binding independently of the dataset's element storage, as
//! described for [`InMemDicomObject::private_creators`](crate::InMemDicomObject::private_creators).

use std::collections::BTreeMap;

use dicom_core::Tag;

use crate::{ConflictingCreatorSnafu, InvalidGroupSnafu, NoSpaceSnafu, PrivateElementError};
use snafu::{ensure, OptionExt};

/// The lowest private creator slot number, per PS3.5.
const MIN_SLOT: u8 = 0x10;
/// The highest private creator slot number.
const MAX_SLOT: u8 = 0xFF;

/// Normalizes a private creator string for comparison: trims trailing
/// spaces and NULs and lowercases it. The original string is kept
/// verbatim in the table; only comparisons go through this form.
fn normalize(creator: &str) -> String {
    creator
        .trim_end_matches(['\u{0}', ' '])
        .to_ascii_lowercase()
}

/// A table binding `(group, slot)` to the private creator string
/// occupying that slot, per PS3.5 §7.8.1.
///
/// The table does not own a dataset; it is typically derived from one
/// via [`InMemDicomObject::private_creators`](crate::InMemDicomObject::private_creators),
/// or built up independently and consulted by reader code that resolves
/// private tags during decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivateCreatorTable {
    // (group, slot) -> creator string, as found on the wire
    bindings: BTreeMap<(u16, u8), String>,
}

impl PrivateCreatorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        PrivateCreatorTable {
            bindings: BTreeMap::new(),
        }
    }

    /// Record a creator string at the slot given by `creator_tag`.
    ///
    /// `creator_tag` must be an odd-group tag whose element number is a
    /// private creator slot (`0x0010..=0x00FF`); any other tag is out of
    /// scope for this table and is simply ignored.
    ///
    /// Fails if the `(group, slot)` pair is already bound to a
    /// *different* creator string (after normalization); rebinding to
    /// the same creator is a no-op success.
    pub fn register(&mut self, creator_tag: Tag, creator_string: String) -> Result<(), PrivateElementError> {
        let group = creator_tag.group();
        let elem = creator_tag.element();
        if group % 2 == 0 || !(u16::from(MIN_SLOT)..=u16::from(MAX_SLOT)).contains(&elem) {
            return Ok(());
        }
        let slot = elem as u8;
        match self.bindings.get(&(group, slot)) {
            Some(existing) if normalize(existing) != normalize(&creator_string) => {
                ConflictingCreatorSnafu {
                    group,
                    slot,
                    existing: existing.clone(),
                    creator: creator_string,
                }
                .fail()
            }
            _ => {
                self.bindings.insert((group, slot), creator_string);
                Ok(())
            }
        }
    }

    /// Resolve the creator string bound to a private data element's tag,
    /// by deriving its `(group, slot)` from the tag's element number.
    pub fn lookup(&self, private_data_tag: Tag) -> Option<&str> {
        let group = private_data_tag.group();
        if group % 2 == 0 {
            return None;
        }
        let slot = (private_data_tag.element() >> 8) as u8;
        self.bindings.get(&(group, slot)).map(String::as_str)
    }

    /// Return the slot bound to `creator` within `group`, if any,
    /// comparing creator strings after normalization.
    pub fn slot_of(&self, group: u16, creator: &str) -> Option<u8> {
        let wanted = normalize(creator);
        self.bindings
            .iter()
            .find(|(&(g, _), c)| g == group && normalize(c) == wanted)
            .map(|(&(_, slot), _)| slot)
    }

    /// Return the existing slot bound to `creator` in `group`, or
    /// allocate the lowest unused slot in `0x10..=0xFF` and bind it.
    ///
    /// Fails with [`PrivateElementError::NoSpace`] if every slot in the
    /// group is already occupied by a different creator.
    pub fn allocate_slot(&mut self, group: u16, creator: &str) -> Result<u8, PrivateElementError> {
        ensure!(group % 2 == 1, InvalidGroupSnafu { group });
        if let Some(slot) = self.slot_of(group, creator) {
            return Ok(slot);
        }
        let slot = (MIN_SLOT..=MAX_SLOT)
            .find(|slot| !self.bindings.contains_key(&(group, *slot)))
            .context(NoSpaceSnafu { group })?;
        self.bindings.insert((group, slot), creator.to_string());
        Ok(slot)
    }

    /// Renumber the slots of `group` to be contiguous starting at
    /// `0x10`, preserving relative order. Returns a map from old slot to
    /// new slot for every slot that moved; slots already compact are
    /// omitted, and the returned map is empty if nothing moved.
    ///
    /// Callers that keep a dataset in sync with this table (such as
    /// [`InMemDicomObject::compact_private_group`](crate::InMemDicomObject::compact_private_group))
    /// use the returned map to rewrite the tags of private data elements
    /// whose slot changed.
    pub fn compact(&mut self, group: u16) -> BTreeMap<u8, u8> {
        let mut slots: Vec<(u8, String)> = self
            .bindings
            .iter()
            .filter(|(&(g, _), _)| g == group)
            .map(|(&(_, slot), creator)| (slot, creator.clone()))
            .collect();
        slots.sort_by_key(|(slot, _)| *slot);

        let mut renumbering = BTreeMap::new();
        let mut next_slot = MIN_SLOT;
        for (old_slot, creator) in slots {
            self.bindings.remove(&(group, old_slot));
            if old_slot != next_slot {
                renumbering.insert(old_slot, next_slot);
            }
            self.bindings.insert((group, next_slot), creator);
            next_slot += 1;
        }
        renumbering
    }

    /// Iterate over all `(group, slot, creator)` bindings in the table.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u8, &str)> {
        self.bindings
            .iter()
            .map(|(&(group, slot), creator)| (group, slot, creator.as_str()))
    }

    /// Check whether the table holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup_round_trip() {
        let mut table = PrivateCreatorTable::new();
        table
            .register(Tag(0x0009, 0x0010), "ACME 1.0".to_string())
            .unwrap();

        assert_eq!(table.lookup(Tag(0x0009, 0x1001)), Some("ACME 1.0"));
        assert_eq!(table.lookup(Tag(0x0009, 0x10FF)), Some("ACME 1.0"));
        assert_eq!(table.lookup(Tag(0x0009, 0x1101)), None);
    }

    #[test]
    fn register_same_creator_twice_is_fine() {
        let mut table = PrivateCreatorTable::new();
        table
            .register(Tag(0x0009, 0x0010), "ACME 1.0".to_string())
            .unwrap();
        table
            .register(Tag(0x0009, 0x0010), "ACME 1.0 ".to_string())
            .unwrap();
    }

    #[test]
    fn register_conflicting_creator_fails() {
        let mut table = PrivateCreatorTable::new();
        table
            .register(Tag(0x0009, 0x0010), "ACME 1.0".to_string())
            .unwrap();
        let err = table
            .register(Tag(0x0009, 0x0010), "OTHER VENDOR".to_string())
            .unwrap_err();
        assert!(matches!(err, PrivateElementError::ConflictingCreator { .. }));
    }

    #[test]
    fn allocate_slot_reuses_existing_binding() {
        let mut table = PrivateCreatorTable::new();
        let slot1 = table.allocate_slot(0x0009, "ACME 1.0").unwrap();
        let slot2 = table.allocate_slot(0x0009, "ACME 1.0").unwrap();
        assert_eq!(slot1, slot2);
    }

    #[test]
    fn allocate_slot_picks_lowest_free() {
        let mut table = PrivateCreatorTable::new();
        table.allocate_slot(0x0009, "A").unwrap();
        table.allocate_slot(0x0009, "B").unwrap();
        let slot = table.allocate_slot(0x0009, "C").unwrap();
        assert_eq!(slot, 0x12);
    }

    #[test]
    fn allocate_slot_rejects_even_group() {
        let mut table = PrivateCreatorTable::new();
        let err = table.allocate_slot(0x0008, "A").unwrap_err();
        assert!(matches!(err, PrivateElementError::InvalidGroup { .. }));
    }

    #[test]
    fn compact_renumbers_sparse_slots() {
        let mut table = PrivateCreatorTable::new();
        table
            .register(Tag(0x0009, 0x0015), "A".to_string())
            .unwrap();
        table
            .register(Tag(0x0009, 0x0020), "B".to_string())
            .unwrap();

        let renumbering = table.compact(0x0009);
        assert_eq!(renumbering.get(&0x15), Some(&0x10));
        assert_eq!(renumbering.get(&0x20), Some(&0x11));
        assert_eq!(table.slot_of(0x0009, "A"), Some(0x10));
        assert_eq!(table.slot_of(0x0009, "B"), Some(0x11));
    }

    #[test]
    fn compact_on_already_dense_table_is_a_noop() {
        let mut table = PrivateCreatorTable::new();
        table
            .register(Tag(0x0009, 0x0010), "A".to_string())
            .unwrap();
        table
            .register(Tag(0x0009, 0x0011), "B".to_string())
            .unwrap();
        assert!(table.compact(0x0009).is_empty());
    }
}
