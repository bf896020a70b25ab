//! A data element dictionary that resolves nothing.
//!
//! Used where a [`DataDictionary`] is required by a type signature but no
//! tag-to-keyword resolution is wanted, e.g. when decoding private data
//! whose creator is not registered, or in tests that should not depend on
//! the (much larger) standard dictionary.

use super::data_element::{DataDictionary, DataDictionaryEntryRef};
use crate::header::Tag;

/// An empty data element dictionary: every lookup returns `None`, so
/// tags resolve to no keyword and implicit VR decoding falls back to
/// [`VR::UN`](crate::header::VR::UN).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StubDataDictionary;

impl DataDictionary for StubDataDictionary {
    type Entry = DataDictionaryEntryRef<'static>;

    fn by_tag(&self, _: Tag) -> Option<&'static Self::Entry> {
        None
    }

    fn by_name(&self, _: &str) -> Option<&'static Self::Entry> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_resolves_nothing() {
        let dict = StubDataDictionary;
        assert!(dict.by_tag(Tag(0x0010, 0x0010)).is_none());
        assert!(dict.by_name("PatientName").is_none());
    }
}
