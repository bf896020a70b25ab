//! DICOM transfer syntax descriptors.
//!
//! A [`TransferSyntax`] pairs a UID with the four booleans that drive the
//! encoder/decoder: explicit VR, byte order, encapsulation, and lossiness.
//! The concrete codecs and pixel data adapters for a transfer syntax are
//! assembled by higher-level crates (`dicom-encoding`,
//! `dicom-transfer-syntax-registry`); this type only carries the
//! declarative bits every layer needs to agree on.

use std::fmt;

/// A DICOM transfer syntax specifier: UID plus encoding characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSyntax {
    /// the transfer syntax UID
    pub uid: &'static str,
    /// a human-readable name
    pub name: &'static str,
    /// whether value representations are made explicit on the wire
    pub explicit_vr: bool,
    /// whether multi-byte integers are little-endian
    pub little_endian: bool,
    /// whether pixel data is encapsulated in fragments rather than a
    /// native fixed-size value
    pub encapsulated: bool,
    /// whether the pixel data encoding may be lossy
    pub lossy: bool,
}

impl TransferSyntax {
    /// Implicit VR Little Endian: the DICOM default transfer syntax.
    pub const IMPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2",
        name: "Implicit VR Little Endian",
        explicit_vr: false,
        little_endian: true,
        encapsulated: false,
        lossy: false,
    };

    /// Explicit VR Little Endian.
    pub const EXPLICIT_VR_LITTLE_ENDIAN: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.1",
        name: "Explicit VR Little Endian",
        explicit_vr: true,
        little_endian: true,
        encapsulated: false,
        lossy: false,
    };

    /// Explicit VR Big Endian (retired, decode-only in this implementation).
    pub const EXPLICIT_VR_BIG_ENDIAN: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.2",
        name: "Explicit VR Big Endian",
        explicit_vr: true,
        little_endian: false,
        encapsulated: false,
        lossy: false,
    };

    /// RLE Lossless.
    pub const RLE_LOSSLESS: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.5",
        name: "RLE Lossless",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: false,
    };

    /// JPEG Baseline (Process 1), lossy 8-bit.
    pub const JPEG_BASELINE: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.50",
        name: "JPEG Baseline (Process 1)",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: true,
    };

    /// JPEG Extended (Process 2 & 4).
    pub const JPEG_EXTENDED: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.51",
        name: "JPEG Extended (Process 2 & 4)",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: true,
    };

    /// JPEG Lossless, Non-Hierarchical, First-Order Prediction.
    pub const JPEG_LOSSLESS: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.70",
        name: "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: false,
    };

    /// JPEG-LS Lossless.
    pub const JPEG_LS_LOSSLESS: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.80",
        name: "JPEG-LS Lossless",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: false,
    };

    /// JPEG-LS Lossy (Near-Lossless).
    pub const JPEG_LS_LOSSY: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.81",
        name: "JPEG-LS Lossy (Near-Lossless)",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: true,
    };

    /// JPEG 2000 Lossless.
    pub const JPEG_2000_LOSSLESS: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.90",
        name: "JPEG 2000 Image Compression (Lossless Only)",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: false,
    };

    /// JPEG 2000.
    pub const JPEG_2000: TransferSyntax = TransferSyntax {
        uid: "1.2.840.10008.1.2.4.91",
        name: "JPEG 2000 Image Compression",
        explicit_vr: true,
        little_endian: true,
        encapsulated: true,
        lossy: true,
    };

    /// All transfer syntaxes recognized per §6 of this library's
    /// specification.
    pub const ALL: &'static [TransferSyntax] = &[
        Self::IMPLICIT_VR_LITTLE_ENDIAN,
        Self::EXPLICIT_VR_LITTLE_ENDIAN,
        Self::EXPLICIT_VR_BIG_ENDIAN,
        Self::RLE_LOSSLESS,
        Self::JPEG_BASELINE,
        Self::JPEG_EXTENDED,
        Self::JPEG_LOSSLESS,
        Self::JPEG_LS_LOSSLESS,
        Self::JPEG_LS_LOSSY,
        Self::JPEG_2000_LOSSLESS,
        Self::JPEG_2000,
    ];

    /// Look up a well-known transfer syntax by UID. Trailing NUL padding
    /// bytes (as would appear in a raw UI value) are trimmed first.
    pub fn for_uid(uid: &str) -> Option<&'static TransferSyntax> {
        let uid = uid.trim_end_matches(['\0', ' ']);
        Self::ALL.iter().find(|ts| ts.uid == uid)
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_well_known_transfer_syntaxes() {
        assert_eq!(
            TransferSyntax::for_uid("1.2.840.10008.1.2"),
            Some(&TransferSyntax::IMPLICIT_VR_LITTLE_ENDIAN)
        );
        assert_eq!(
            TransferSyntax::for_uid("1.2.840.10008.1.2.5"),
            Some(&TransferSyntax::RLE_LOSSLESS)
        );
        assert_eq!(TransferSyntax::for_uid("9.9.9"), None);
    }

    #[test]
    fn trims_nul_padding_from_uid() {
        assert_eq!(
            TransferSyntax::for_uid("1.2.840.10008.1.2.1\0"),
            Some(&TransferSyntax::EXPLICIT_VR_LITTLE_ENDIAN)
        );
    }

    #[test]
    fn encapsulated_flags_match_standard_expectations() {
        assert!(!TransferSyntax::IMPLICIT_VR_LITTLE_ENDIAN.encapsulated);
        assert!(TransferSyntax::RLE_LOSSLESS.encapsulated);
        assert!(TransferSyntax::JPEG_BASELINE.lossy);
        assert!(!TransferSyntax::JPEG_LOSSLESS.lossy);
    }
}
