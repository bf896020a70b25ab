//! DICOM unique identifiers (UIDs), as specified by PS3.5 §9.

use std::fmt;

/// Maximum permitted length of a UID string, per PS3.5 §9.1.
pub const MAX_UID_LENGTH: usize = 64;

/// A validated DICOM UID: a dotted-decimal string of at most 64
/// characters, with no empty components and no leading zeros in
/// multi-digit components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(String);

/// The reason a candidate string is not a valid UID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidError {
    /// longer than [`MAX_UID_LENGTH`]
    TooLong,
    /// empty string
    Empty,
    /// contains a component with no digits
    EmptyComponent,
    /// a multi-digit component starts with `0`
    LeadingZero,
    /// contains a character other than `.` or an ASCII digit
    InvalidCharacter,
    /// starts or ends with `.`
    BoundaryDot,
}

impl fmt::Display for UidError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            UidError::TooLong => "UID exceeds 64 characters",
            UidError::Empty => "UID is empty",
            UidError::EmptyComponent => "UID has an empty dotted component",
            UidError::LeadingZero => "UID component has a leading zero",
            UidError::InvalidCharacter => "UID contains a non-numeric, non-dot character",
            UidError::BoundaryDot => "UID starts or ends with a dot",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for UidError {}

impl Uid {
    /// Validate and wrap a candidate UID string.
    pub fn new(value: impl Into<String>) -> Result<Self, UidError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Uid(value))
    }

    /// Build a `Uid` from a string known (e.g. a built-in constant) to be
    /// well-formed, without re-validating it.
    pub fn from_static(value: &'static str) -> Self {
        debug_assert!(Self::validate(value).is_ok(), "invalid built-in UID {value:?}");
        Uid(value.to_string())
    }

    fn validate(value: &str) -> Result<(), UidError> {
        if value.is_empty() {
            return Err(UidError::Empty);
        }
        if value.len() > MAX_UID_LENGTH {
            return Err(UidError::TooLong);
        }
        if value.starts_with('.') || value.ends_with('.') {
            return Err(UidError::BoundaryDot);
        }
        for component in value.split('.') {
            if component.is_empty() {
                return Err(UidError::EmptyComponent);
            }
            if !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(UidError::InvalidCharacter);
            }
            if component.len() > 1 && component.starts_with('0') {
                return Err(UidError::LeadingZero);
            }
        }
        Ok(())
    }

    /// Borrow the UID as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Uid {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uid::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_uid() {
        assert!(Uid::new("1.2.840.10008.1.2.1").is_ok());
    }

    #[test]
    fn rejects_leading_zero_component() {
        assert_eq!(Uid::new("1.02.3"), Err(UidError::LeadingZero));
    }

    #[test]
    fn rejects_empty_component() {
        assert_eq!(Uid::new("1..3"), Err(UidError::EmptyComponent));
    }

    #[test]
    fn boundary_length_64_ok_65_rejected() {
        let s64 = "2".repeat(64);
        assert_eq!(s64.len(), 64);
        assert!(Uid::new(s64).is_ok());
        let s65 = "2".repeat(65);
        assert_eq!(Uid::new(s65), Err(UidError::TooLong));
    }
}
