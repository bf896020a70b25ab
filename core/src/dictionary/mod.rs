//! This module contains the concept of a DICOM data dictionary.
//!
//! A data element dictionary provides the lookup described by the
//! specification's dictionary oracle: from a [`Tag`](crate::Tag) to VR,
//! keyword and tag-range metadata, and the reverse lookup from keyword to
//! tag. [`DataDictionary`] is the trait that both the standard dictionary
//! (built at compile time by `dicom-dictionary-std` from the NEMA tables)
//! and any private dictionary implement.
//!
//! This crate only defines the dictionary *concept*; the built-in
//! standard dictionary itself lives in the separate `dicom-dictionary-std`
//! crate, which depends back on the types declared here. [`stub`] offers a
//! dictionary that resolves nothing, useful for tests and for decoding
//! without attribute name support.

pub mod data_element;
pub mod stub;
pub mod uid;

pub use data_element::{
    DataDictionary, DataDictionaryEntry, DataDictionaryEntryBuf, DataDictionaryEntryRef,
    ParseSelectorError, TagByName, TagRange, TagRangeParseError, VirtualVr,
};
pub use uid::{UidDictionary, UidDictionaryEntry, UidDictionaryEntryRef, UidType};
