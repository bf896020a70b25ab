//! This module contains an assortment of types required for interpreting
//! DICOM data elements. It comprises the attribute tag, the value
//! representation, the element header, and value multiplicity.

use std::cmp::Ordering;
use std::fmt;
use std::str::{from_utf8, FromStr};

use crate::value::Value;

/// A trait for a data type that carries a byte length, which may be
/// undefined.
pub trait HasLength {
    /// Retrieve the effective length of the value in bytes.
    /// The concrete length may be undefined, which is the case for
    /// sequence elements and encapsulated pixel data.
    fn length(&self) -> Length;

    /// Check whether the length is well defined and equal to zero.
    fn is_empty(&self) -> bool {
        self.length() == Length(0)
    }
}

/// A placeholder type for contexts which do not need a nested data set
/// item type (no sequence values are expected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyObject;

impl HasLength for EmptyObject {
    fn length(&self) -> Length {
        Length(0)
    }
}

/// A trait for a data type containing a DICOM element header.
#[allow(clippy::len_without_is_empty)]
pub trait Header {
    /// Retrieve the element's tag as a `(group, element)` pair.
    fn tag(&self) -> Tag;

    /// Retrieve the value data's length as specified by the element,
    /// in bytes.
    fn len(&self) -> Length;

    /// Check whether this is the header of an item.
    fn is_item(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE000)
    }

    /// Check whether this is the header of an item delimiter.
    fn is_item_delimiter(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE00D)
    }

    /// Check whether this is the header of a sequence delimiter.
    fn is_sequence_delimiter(&self) -> bool {
        self.tag() == Tag(0xFFFE, 0xE0DD)
    }
}

/// Idiomatic alias for a tag's group number.
pub type GroupNumber = u16;
/// Idiomatic alias for a tag's element number.
pub type ElementNumber = u16;

/// The data type for a DICOM data element tag: a (group, element) pair of
/// 16-bit unsigned integers.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
pub struct Tag(pub GroupNumber, pub ElementNumber);

impl Tag {
    /// Getter for the tag's group value.
    #[inline]
    pub fn group(self) -> GroupNumber {
        self.0
    }

    /// Getter for the tag's element value.
    #[inline]
    pub fn element(self) -> ElementNumber {
        self.1
    }

    /// A tag's group is odd for private tags.
    #[inline]
    pub fn is_private(self) -> bool {
        self.0 % 2 == 1
    }

    /// A private creator occupies element numbers 0x0010..=0x00FF of an
    /// odd group.
    #[inline]
    pub fn is_private_creator(self) -> bool {
        self.is_private() && (0x0010..=0x00FF).contains(&self.1)
    }

    /// For a private data element `(group, (slot<<8)|offset)`, the slot
    /// byte identifying its creator block, if this tag is indeed a
    /// private data element (not a creator itself).
    pub fn private_creator_slot(self) -> Option<u8> {
        if self.is_private() && self.1 > 0x00FF {
            Some(((self.1 >> 8) & 0xFF) as u8)
        } else {
            None
        }
    }

    /// The tag at which the creator for this private data element would be
    /// registered, if this is a private data element.
    pub fn private_creator_tag(self) -> Option<Tag> {
        self.private_creator_slot().map(|slot| Tag(self.0, slot as u16))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({:#06X?}, {:#06X?})", self.0, self.1)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.0, self.1)
    }
}

impl PartialEq<(u16, u16)> for Tag {
    fn eq(&self, other: &(u16, u16)) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl PartialEq<[u16; 2]> for Tag {
    fn eq(&self, other: &[u16; 2]) -> bool {
        self.0 == other[0] && self.1 == other[1]
    }
}

impl From<(u16, u16)> for Tag {
    #[inline]
    fn from(value: (u16, u16)) -> Tag {
        Tag(value.0, value.1)
    }
}

impl From<[u16; 2]> for Tag {
    #[inline]
    fn from(value: [u16; 2]) -> Tag {
        Tag(value[0], value[1])
    }
}

/// A masked tag pattern, used by the dictionary for repeating groups such
/// as `50xx,xxxx` (overlay data) or private creator blocks `gggg,00xx`.
/// A concrete tag matches the pattern when
/// `tag.group() & group_mask == group_pattern` and likewise for the
/// element half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedTag {
    /// bits that must match in the group half
    pub group_mask: u16,
    /// required bits in the group half
    pub group_pattern: u16,
    /// bits that must match in the element half
    pub element_mask: u16,
    /// required bits in the element half
    pub element_pattern: u16,
}

impl MaskedTag {
    /// Parse a mask specifier such as `"50xx,xxxx"` where any `x` nibble is
    /// a wildcard.
    pub fn parse(spec: &str) -> Option<Self> {
        let (group, element) = spec.split_once(',')?;
        if group.len() != 4 || element.len() != 4 {
            return None;
        }
        let (group_mask, group_pattern) = Self::parse_half(group)?;
        let (element_mask, element_pattern) = Self::parse_half(element)?;
        Some(MaskedTag {
            group_mask,
            group_pattern,
            element_mask,
            element_pattern,
        })
    }

    fn parse_half(half: &str) -> Option<(u16, u16)> {
        let mut mask = 0u16;
        let mut pattern = 0u16;
        for c in half.chars() {
            mask <<= 4;
            pattern <<= 4;
            if c == 'x' || c == 'X' {
                // wildcard nibble: mask bits stay 0
            } else {
                let digit = c.to_digit(16)?;
                mask |= 0xF;
                pattern |= digit as u16;
            }
        }
        Some((mask, pattern))
    }

    /// Check whether a concrete tag matches this mask.
    pub fn matches(&self, tag: Tag) -> bool {
        (tag.0 & self.group_mask) == self.group_pattern
            && (tag.1 & self.element_mask) == self.element_pattern
    }
}

/// An enum type for a DICOM value representation, as described in
/// PS3.5 §6.2.
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd)]
pub enum VR {
    /// Application Entity
    AE,
    /// Age String
    AS,
    /// Attribute Tag
    AT,
    /// Code String
    CS,
    /// Date
    DA,
    /// Decimal String
    DS,
    /// Date Time
    DT,
    /// Floating Point Single
    FL,
    /// Floating Point Double
    FD,
    /// Integer String
    IS,
    /// Long String
    LO,
    /// Long Text
    LT,
    /// Other Byte
    OB,
    /// Other Double
    OD,
    /// Other Float
    OF,
    /// Other Long
    OL,
    /// Other Word
    OW,
    /// Person Name
    PN,
    /// Short String
    SH,
    /// Signed Long
    SL,
    /// Sequence of Items
    SQ,
    /// Signed Short
    SS,
    /// Short Text
    ST,
    /// Time
    TM,
    /// Unlimited Characters
    UC,
    /// Unique Identifier (UID)
    UI,
    /// Unsigned Long
    UL,
    /// Unknown
    UN,
    /// Universal Resource Identifier or Universal Resource Locator (URI/URL)
    UR,
    /// Unsigned Short
    US,
    /// Unlimited Text
    UT,
}

/// Static metadata describing a VR's wire-format behavior, per PS3.5 §6.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrMeta {
    /// padding byte used to bring odd-length values to an even length
    pub padding: u8,
    /// whether the element header carries a 32-bit length
    /// (and the 2 reserved bytes after the VR code)
    pub long_length: bool,
    /// maximum value length in bytes, if bounded
    pub max_length: Option<u32>,
    /// whether multiple values may be packed using a `\` separator
    pub allows_backslash: bool,
    /// broad value category, used by the element model
    pub category: VrCategory,
}

/// The broad category a VR belongs to, used to decide which [`Element`]
/// variant a decoded value should become.
///
/// [`Element`]: crate::value::Value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrCategory {
    /// text-based values
    Str,
    /// fixed-width binary numbers
    Numeric,
    /// opaque binary blobs (OB/OD/OF/OL/OW/UN)
    Binary,
    /// nested data sets
    Sequence,
}

impl VR {
    /// Obtain the value representation corresponding to the given two
    /// ASCII bytes.
    pub fn from_binary(chars: [u8; 2]) -> Option<Self> {
        from_utf8(chars.as_ref()).ok().and_then(|s| VR::from_str(s).ok())
    }

    /// Retrieve a string representation of this VR.
    pub fn to_string(self) -> &'static str {
        use VR::*;
        match self {
            AE => "AE", AS => "AS", AT => "AT", CS => "CS", DA => "DA",
            DS => "DS", DT => "DT", FL => "FL", FD => "FD", IS => "IS",
            LO => "LO", LT => "LT", OB => "OB", OD => "OD", OF => "OF",
            OL => "OL", OW => "OW", PN => "PN", SH => "SH", SL => "SL",
            SQ => "SQ", SS => "SS", ST => "ST", TM => "TM", UC => "UC",
            UI => "UI", UL => "UL", UN => "UN", UR => "UR", US => "US",
            UT => "UT",
        }
    }

    /// Retrieve a copy of this VR's byte representation.
    pub fn to_bytes(self) -> [u8; 2] {
        let bytes = self.to_string().as_bytes();
        [bytes[0], bytes[1]]
    }

    /// Retrieve the static wire-format metadata for this VR.
    pub fn meta(self) -> VrMeta {
        use VrCategory::*;
        use VR::*;
        match self {
            AE => VrMeta { padding: b' ', long_length: false, max_length: Some(16), allows_backslash: true, category: Str },
            AS => VrMeta { padding: b' ', long_length: false, max_length: Some(4), allows_backslash: false, category: Str },
            CS => VrMeta { padding: b' ', long_length: false, max_length: Some(16), allows_backslash: true, category: Str },
            DA => VrMeta { padding: b' ', long_length: false, max_length: Some(8), allows_backslash: true, category: Str },
            DS => VrMeta { padding: b' ', long_length: false, max_length: Some(16), allows_backslash: true, category: Str },
            DT => VrMeta { padding: b' ', long_length: false, max_length: Some(26), allows_backslash: true, category: Str },
            IS => VrMeta { padding: b' ', long_length: false, max_length: Some(12), allows_backslash: true, category: Str },
            LO => VrMeta { padding: b' ', long_length: false, max_length: Some(64), allows_backslash: false, category: Str },
            LT => VrMeta { padding: b' ', long_length: false, max_length: Some(10240), allows_backslash: false, category: Str },
            PN => VrMeta { padding: b' ', long_length: false, max_length: Some(64 * 3), allows_backslash: true, category: Str },
            SH => VrMeta { padding: b' ', long_length: false, max_length: Some(16), allows_backslash: true, category: Str },
            ST => VrMeta { padding: b' ', long_length: false, max_length: Some(1024), allows_backslash: false, category: Str },
            TM => VrMeta { padding: b' ', long_length: false, max_length: Some(14), allows_backslash: true, category: Str },
            UI => VrMeta { padding: b'\0', long_length: false, max_length: Some(64), allows_backslash: true, category: Str },
            UC => VrMeta { padding: b' ', long_length: true, max_length: None, allows_backslash: true, category: Str },
            UR => VrMeta { padding: b' ', long_length: true, max_length: None, allows_backslash: false, category: Str },
            UT => VrMeta { padding: b' ', long_length: true, max_length: None, allows_backslash: false, category: Str },

            AT => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            FL => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            FD => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            SL => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            SS => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            UL => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },
            US => VrMeta { padding: 0, long_length: false, max_length: None, allows_backslash: true, category: Numeric },

            OB => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },
            OD => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },
            OF => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },
            OL => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },
            OW => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },
            UN => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Binary },

            SQ => VrMeta { padding: 0, long_length: true, max_length: None, allows_backslash: false, category: Sequence },
        }
    }
}

impl FromStr for VR {
    type Err = &'static str;

    fn from_str(string: &str) -> std::result::Result<Self, Self::Err> {
        use VR::*;
        match string {
            "AE" => Ok(AE), "AS" => Ok(AS), "AT" => Ok(AT), "CS" => Ok(CS),
            "DA" => Ok(DA), "DS" => Ok(DS), "DT" => Ok(DT), "FL" => Ok(FL),
            "FD" => Ok(FD), "IS" => Ok(IS), "LO" => Ok(LO), "LT" => Ok(LT),
            "OB" => Ok(OB), "OD" => Ok(OD), "OF" => Ok(OF), "OL" => Ok(OL),
            "OW" => Ok(OW), "PN" => Ok(PN), "SH" => Ok(SH), "SL" => Ok(SL),
            "SQ" => Ok(SQ), "SS" => Ok(SS), "ST" => Ok(ST), "TM" => Ok(TM),
            "UC" => Ok(UC), "UI" => Ok(UI), "UL" => Ok(UL), "UN" => Ok(UN),
            "UR" => Ok(UR), "US" => Ok(US), "UT" => Ok(UT),
            _ => Err("no such value representation"),
        }
    }
}

impl fmt::Display for VR {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(VR::to_string(*self))
    }
}

/// A type for representing data set content length, in bytes.
/// An internal value of `0xFFFF_FFFF` represents an undefined
/// (unspecified) length, determined instead by a traversal of the
/// content's encoding (a sequence/item delimiter, or fragment sequence
/// delimiter).
///
/// Two undefined lengths are never equal, and never ordered, mirroring
/// the standard's treatment of the sentinel value as "not a number".
#[derive(Clone, Copy)]
pub struct Length(pub u32);

const UNDEFINED_LEN: u32 = 0xFFFF_FFFF;

impl Length {
    /// A length that is undefined.
    pub const UNDEFINED: Self = Length(UNDEFINED_LEN);

    /// Create a new length value from its internal representation.
    pub fn new(len: u32) -> Self {
        Length(len)
    }

    /// Create a new defined length value.
    ///
    /// # Panics
    /// Panics if `len` is the sentinel undefined-length value.
    pub fn defined(len: u32) -> Self {
        assert_ne!(len, UNDEFINED_LEN);
        Length(len)
    }

    /// Check whether this length is undefined.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.0 == UNDEFINED_LEN
    }

    /// Check whether this length is well defined (not undefined).
    #[inline]
    pub fn is_defined(self) -> bool {
        !self.is_undefined()
    }

    /// Fetch the concrete length value, if available.
    #[inline]
    pub fn get(self) -> Option<u32> {
        match self.0 {
            UNDEFINED_LEN => None,
            v => Some(v),
        }
    }
}

impl From<u32> for Length {
    fn from(o: u32) -> Self {
        Length(o)
    }
}

impl PartialEq<Length> for Length {
    fn eq(&self, rhs: &Length) -> bool {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => false,
            (l1, l2) => l1 == l2,
        }
    }
}

impl PartialOrd<Length> for Length {
    fn partial_cmp(&self, rhs: &Length) -> Option<Ordering> {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => None,
            (l1, l2) => Some(l1.cmp(&l2)),
        }
    }
}

impl std::ops::Add<Length> for Length {
    type Output = Self;
    fn add(self, rhs: Length) -> Self::Output {
        match (self.0, rhs.0) {
            (UNDEFINED_LEN, _) | (_, UNDEFINED_LEN) => Length::UNDEFINED,
            (l1, l2) => Length(l1 + l2),
        }
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("Length(Undefined)"),
            l => f.debug_tuple("Length").field(&l).finish(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            UNDEFINED_LEN => f.write_str("U/L"),
            l => write!(f, "{}", &l),
        }
    }
}

/// A data structure for a data element header: a tag, its value
/// representation and the specified length of the value that follows.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DataElementHeader {
    /// DICOM tag
    pub tag: Tag,
    /// Value Representation
    pub vr: VR,
    /// Element length
    pub len: Length,
}

impl Header for DataElementHeader {
    fn tag(&self) -> Tag {
        self.tag
    }

    fn len(&self) -> Length {
        self.len
    }
}

impl HasLength for DataElementHeader {
    fn length(&self) -> Length {
        self.len
    }
}

impl DataElementHeader {
    /// Create a new data element header with the given properties.
    pub fn new<T: Into<Tag>>(tag: T, vr: VR, len: Length) -> DataElementHeader {
        DataElementHeader { tag: tag.into(), vr, len }
    }

    /// Retrieve the element's value representation.
    pub fn vr(&self) -> VR {
        self.vr
    }
}

impl From<SequenceItemHeader> for DataElementHeader {
    fn from(value: SequenceItemHeader) -> DataElementHeader {
        DataElementHeader { tag: value.tag(), vr: VR::UN, len: value.len() }
    }
}

/// A DICOM data element, pairing a header with its value.
///
/// `I` is the type of nested data sets, held by the
/// [`Sequence`](crate::value::Value::Sequence) value variant, and `P` is the
/// type of encapsulated pixel data fragments, held by the
/// [`PixelSequence`](crate::value::Value::PixelSequence) variant.
#[derive(Debug, Clone, PartialEq)]
pub struct DataElement<I = EmptyObject, P = [u8; 0]> {
    header: DataElementHeader,
    value: Value<I, P>,
}

impl<I, P> Header for DataElement<I, P> {
    fn tag(&self) -> Tag {
        self.header.tag
    }

    fn len(&self) -> Length {
        self.header.len
    }
}

impl<I, P> HasLength for DataElement<I, P> {
    fn length(&self) -> Length {
        self.header.len
    }
}

impl<I, P> DataElement<I, P> {
    /// Create a new data element, inferring the length from the value.
    pub fn new<T>(tag: Tag, vr: VR, value: T) -> Self
    where
        T: Into<Value<I, P>>,
    {
        let value = value.into();
        let len = value.length();
        DataElement {
            header: DataElementHeader::new(tag, vr, len),
            value,
        }
    }

    /// Create a new data element with an explicit length,
    /// overriding the length that would otherwise be inferred from the
    /// value. Required for items and sequences of undefined length.
    pub fn new_with_len<T>(tag: Tag, vr: VR, len: Length, value: T) -> Self
    where
        T: Into<Value<I, P>>,
    {
        DataElement {
            header: DataElementHeader::new(tag, vr, len),
            value: value.into(),
        }
    }

    /// Retrieve the element's header.
    pub fn header(&self) -> &DataElementHeader {
        &self.header
    }

    /// Retrieve the element's value representation.
    pub fn vr(&self) -> VR {
        self.header.vr
    }

    /// Retrieve a reference to the element's value.
    pub fn value(&self) -> &Value<I, P> {
        &self.value
    }

    /// Retrieve a mutable reference to the element's value.
    pub fn value_mut(&mut self) -> &mut Value<I, P> {
        &mut self.value
    }

    /// Consume the element, returning its value.
    pub fn into_value(self) -> Value<I, P> {
        self.value
    }
}

/// Data type describing a sequence item boundary marker found on the wire:
/// either the start of an item (with its length) or one of the two
/// delimiters that close an item or a whole undefined-length sequence.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SequenceItemHeader {
    /// The cursor read an item start.
    Item {
        /// the length of the item in bytes (can be undefined)
        len: Length,
    },
    /// The cursor read an item delimiter: `(FFFE,E00D)`.
    ItemDelimiter,
    /// The cursor read a sequence delimiter: `(FFFE,E0DD)`.
    SequenceDelimiter,
}

impl SequenceItemHeader {
    /// Item tag, `(FFFE,E000)`.
    pub const ITEM_TAG: Tag = Tag(0xFFFE, 0xE000);
    /// Item delimiter tag, `(FFFE,E00D)`.
    pub const ITEM_DELIMITER_TAG: Tag = Tag(0xFFFE, 0xE00D);
    /// Sequence delimiter tag, `(FFFE,E0DD)`.
    pub const SEQUENCE_DELIMITER_TAG: Tag = Tag(0xFFFE, 0xE0DD);

    /// Build a sequence item header from a tag/length pair read off the
    /// wire. Fails if the tag is not one of the three recognized
    /// delimiter/item tags.
    pub fn new<T: Into<Tag>>(tag: T, len: Length) -> Result<SequenceItemHeader, crate::error::Error> {
        use crate::error::Error;
        match tag.into() {
            Self::ITEM_TAG => Ok(SequenceItemHeader::Item { len }),
            Self::ITEM_DELIMITER_TAG => {
                if len != Length(0) {
                    Err(Error::UnexpectedDataValueLength)
                } else {
                    Ok(SequenceItemHeader::ItemDelimiter)
                }
            }
            Self::SEQUENCE_DELIMITER_TAG => Ok(SequenceItemHeader::SequenceDelimiter),
            other => Err(Error::UnexpectedTag { tag: other }),
        }
    }
}

impl Header for SequenceItemHeader {
    fn tag(&self) -> Tag {
        match *self {
            SequenceItemHeader::Item { .. } => Self::ITEM_TAG,
            SequenceItemHeader::ItemDelimiter => Self::ITEM_DELIMITER_TAG,
            SequenceItemHeader::SequenceDelimiter => Self::SEQUENCE_DELIMITER_TAG,
        }
    }

    fn len(&self) -> Length {
        match *self {
            SequenceItemHeader::Item { len } => len,
            SequenceItemHeader::ItemDelimiter | SequenceItemHeader::SequenceDelimiter => Length(0),
        }
    }
}

/// A parsed value multiplicity specifier, e.g. `"1"`, `"1-n"`, `"2-2n"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMultiplicity {
    /// minimum number of values
    pub min: u32,
    /// maximum number of values, `None` when unbounded (`-n`)
    pub max: Option<u32>,
    /// the multiplicity must be a multiple of this step
    pub step: u32,
}

impl ValueMultiplicity {
    /// The single-valued multiplicity `1`.
    pub const ONE: ValueMultiplicity = ValueMultiplicity { min: 1, max: Some(1), step: 1 };

    /// Parse a VM specifier of the form `"1"`, `"1-n"`, `"2-2n"` or
    /// `"1-32"`.
    pub fn parse(spec: &str) -> Option<Self> {
        if let Some((lo, hi)) = spec.split_once('-') {
            let min: u32 = lo.parse().ok()?;
            if let Some(stripped) = hi.strip_suffix('n') {
                let step: u32 = if stripped.is_empty() {
                    1
                } else {
                    stripped.parse().ok()?
                };
                Some(ValueMultiplicity { min, max: None, step })
            } else {
                let max: u32 = hi.parse().ok()?;
                Some(ValueMultiplicity { min, max: Some(max), step: 1 })
            }
        } else {
            let n: u32 = spec.parse().ok()?;
            Some(ValueMultiplicity { min: n, max: Some(n), step: 1 })
        }
    }

    /// Check whether a given cardinality satisfies this multiplicity.
    pub fn accepts(&self, count: u32) -> bool {
        if count < self.min {
            return false;
        }
        if let Some(max) = self.max {
            if count > max {
                return false;
            }
        }
        count % self.step == 0 || count == self.min
    }
}
