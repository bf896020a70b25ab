//! Generated DICOM attribute tag constants and the dictionary entry table
//! they feed into [`crate::data_element`].
//!
//! This file stands in for the offline NEMA PS3.6 → Rust conversion step
//! ordinarily run by a separate dictionary-building tool; by design it
//! contains nothing but a flat, frozen table of constants and dictionary
//! entries, hand-maintained in the same shape that tool would emit.

use dicom_core::dictionary::{DataDictionaryEntryRef, TagRange::*, VirtualVr};
use dicom_core::header::Tag;
use dicom_core::{MaskedTag, VR};

// Command group (0000,eeee)

/// (0000,0000) Command Group Length
pub const COMMAND_GROUP_LENGTH: Tag = Tag(0x0000, 0x0000);
/// (0000,0002) Affected SOP Class UID
pub const AFFECTED_SOP_CLASS_UID: Tag = Tag(0x0000, 0x0002);
/// (0000,0100) Command Field
pub const COMMAND_FIELD: Tag = Tag(0x0000, 0x0100);
/// (0000,0110) Message ID
pub const MESSAGE_ID: Tag = Tag(0x0000, 0x0110);
/// (0000,0120) Message ID Being Responded To
pub const MESSAGE_ID_BEING_RESPONDED_TO: Tag = Tag(0x0000, 0x0120);
/// (0000,0600) Move Destination
pub const SENDING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0000, 0x0600);
/// (0000,0700) Priority
pub const PRIORITY: Tag = Tag(0x0000, 0x0700);
/// (0000,0800) Command Data Set Type
pub const COMMAND_DATA_SET_TYPE: Tag = Tag(0x0000, 0x0800);
/// (0000,0900) Status
pub const STATUS: Tag = Tag(0x0000, 0x0900);
/// (0000,1000) Affected SOP Instance UID
pub const AFFECTED_SOP_INSTANCE_UID: Tag = Tag(0x0000, 0x1000);
/// (0000,1035) Receiving Application Entity Title
pub const RECEIVING_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0000, 0x1035);

// File Meta group (0002,eeee), always Explicit VR Little Endian

/// (0002,0000) File Meta Information Group Length
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// (0002,0002) Media Storage SOP Class UID
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// (0002,0003) Media Storage SOP Instance UID
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// (0002,0010) Transfer Syntax UID
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// (0002,0012) Implementation Class UID
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// (0002,0013) Implementation Version Name
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);
/// (0002,0016) Source Application Entity Title
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);

// Directory structuring group (0004,eeee)

/// (0004,1220) Directory Record Sequence
pub const DIRECTORY_RECORD_SEQUENCE: Tag = Tag(0x0004, 0x1220);
/// (0004,1500) Referenced File ID
pub const REFERENCED_FILE_ID: Tag = Tag(0x0004, 0x1500);

// Identifying group (0008,eeee)

/// (0008,0014) Private Information Creator UID
pub const PRIVATE_INFORMATION_CREATOR_UID: Tag = Tag(0x0008, 0x0014);
/// (0008,0016) SOP Class UID
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// (0008,0018) SOP Instance UID
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// (0008,0060) Modality
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// (0008,0080) Institution Name
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
/// (0008,0100) Code Value
pub const CODE_VALUE: Tag = Tag(0x0008, 0x0100);
/// (0008,0102) Coding Scheme Designator
pub const CODING_SCHEME_DESIGNATOR: Tag = Tag(0x0008, 0x0102);
/// (0008,0104) Code Meaning
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);
/// (0008,1030) Study Description
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
/// (0008,1070) Operators' Name
pub const OPERATORS_NAME: Tag = Tag(0x0008, 0x1070);
/// (0008,2218) Anatomic Region Sequence
pub const ANATOMIC_REGION_SEQUENCE: Tag = Tag(0x0008, 0x2218);
/// (0008,2220) Anatomic Region Modifier Sequence
pub const ANATOMIC_REGION_MODIFIER_SEQUENCE: Tag = Tag(0x0008, 0x2220);

// Patient group (0010,eeee)

/// (0010,0010) Patient's Name
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// (0010,0030) Patient's Birth Date
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
/// (0010,1010) Patient's Age
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
/// (0010,1040) Patient's Address
pub const PATIENT_ADDRESS: Tag = Tag(0x0010, 0x1040);

// Acquisition / ultrasound region group (0018,eeee)

/// (0018,6011) Sequence of Ultrasound Regions
pub const SEQUENCE_OF_ULTRASOUND_REGIONS: Tag = Tag(0x0018, 0x6011);
/// (0018,6012) Region Spatial Format
pub const REGION_SPATIAL_FORMAT: Tag = Tag(0x0018, 0x6012);

// Relationship group (0020,eeee)

/// (0020,000D) Study Instance UID
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// (0020,000E) Series Instance UID
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// (0020,0013) Instance Number
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);

// Image Pixel group (0028,eeee)

/// (0028,0002) Samples per Pixel
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
/// (0028,0004) Photometric Interpretation
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
/// (0028,0006) Planar Configuration
pub const PLANAR_CONFIGURATION: Tag = Tag(0x0028, 0x0006);
/// (0028,0008) Number of Frames
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
/// (0028,0010) Rows
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// (0028,0011) Columns
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// (0028,0100) Bits Allocated
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// (0028,0101) Bits Stored
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
/// (0028,0102) High Bit
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
/// (0028,0103) Pixel Representation
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// (0028,0301) Burned In Annotation
pub const BURNED_IN_ANNOTATION: Tag = Tag(0x0028, 0x0301);
/// (0028,1052) Rescale Intercept
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
/// (0028,1053) Rescale Slope
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);
/// (0028,1056) VOI LUT Function
pub const VOILUT_FUNCTION: Tag = Tag(0x0028, 0x1056);
/// (0028,2110) Lossy Image Compression
pub const LOSSY_IMAGE_COMPRESSION: Tag = Tag(0x0028, 0x2110);
/// (0028,2112) Lossy Image Compression Ratio
pub const LOSSY_IMAGE_COMPRESSION_RATIO: Tag = Tag(0x0028, 0x2112);
/// (0028,2114) Lossy Image Compression Method
pub const LOSSY_IMAGE_COMPRESSION_METHOD: Tag = Tag(0x0028, 0x2114);

// Study group (0032,eeee)

/// (0032,1032) Requesting Physician
pub const REQUESTING_PHYSICIAN: Tag = Tag(0x0032, 0x1032);

// Content group (0040,eeee)

/// (0040,A043) Concept Name Code Sequence
pub const CONCEPT_NAME_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA043);
/// (0040,A168) Concept Code Sequence
pub const CONCEPT_CODE_SEQUENCE: Tag = Tag(0x0040, 0xA168);
/// (0040,A730) Content Sequence
pub const CONTENT_SEQUENCE: Tag = Tag(0x0040, 0xA730);

// Pixel Data group (7FE0,eeee)

/// (7FE0,0010) Pixel Data
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// The base tag of the repeating Overlay Data group, `(60xx,3000)`.
const OVERLAY_DATA: Tag = Tag(0x6000, 0x3000);

/// The retired repeating Curve Data group, `(50xx,xxxx)`: unlike
/// [`OVERLAY_DATA`], both the low byte of the group *and* every element
/// bit are open, so [`Group100`] can't express it and a full
/// [`MaskedTag`] is needed instead.
const CURVE_DATA: MaskedTag = MaskedTag {
    group_mask: 0xFF00,
    group_pattern: 0x5000,
    element_mask: 0x0000,
    element_pattern: 0x0000,
};

/// The frozen table of dictionary entries, keyed by tag or tag range.
///
/// [`crate::data_element::init_dictionary`] indexes every entry here by
/// both tag and alias on first use.
pub const ENTRIES: &[DataDictionaryEntryRef<'static>] = &[
    DataDictionaryEntryRef {
        tag: Single(COMMAND_GROUP_LENGTH),
        alias: "CommandGroupLength",
        vr: VirtualVr::Exact(VR::UL),
    },
    DataDictionaryEntryRef {
        tag: Single(AFFECTED_SOP_CLASS_UID),
        alias: "AffectedSOPClassUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(COMMAND_FIELD),
        alias: "CommandField",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(MESSAGE_ID),
        alias: "MessageID",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(MESSAGE_ID_BEING_RESPONDED_TO),
        alias: "MessageIDBeingRespondedTo",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(SENDING_APPLICATION_ENTITY_TITLE),
        alias: "MoveDestination",
        vr: VirtualVr::Exact(VR::AE),
    },
    DataDictionaryEntryRef {
        tag: Single(PRIORITY),
        alias: "Priority",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(COMMAND_DATA_SET_TYPE),
        alias: "CommandDataSetType",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(STATUS),
        alias: "Status",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(AFFECTED_SOP_INSTANCE_UID),
        alias: "AffectedSOPInstanceUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(RECEIVING_APPLICATION_ENTITY_TITLE),
        alias: "MoveOriginatorApplicationEntityTitle",
        vr: VirtualVr::Exact(VR::AE),
    },
    DataDictionaryEntryRef {
        tag: Single(FILE_META_INFORMATION_GROUP_LENGTH),
        alias: "FileMetaInformationGroupLength",
        vr: VirtualVr::Exact(VR::UL),
    },
    DataDictionaryEntryRef {
        tag: Single(MEDIA_STORAGE_SOP_CLASS_UID),
        alias: "MediaStorageSOPClassUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(MEDIA_STORAGE_SOP_INSTANCE_UID),
        alias: "MediaStorageSOPInstanceUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(TRANSFER_SYNTAX_UID),
        alias: "TransferSyntaxUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(IMPLEMENTATION_CLASS_UID),
        alias: "ImplementationClassUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(IMPLEMENTATION_VERSION_NAME),
        alias: "ImplementationVersionName",
        vr: VirtualVr::Exact(VR::SH),
    },
    DataDictionaryEntryRef {
        tag: Single(SOURCE_APPLICATION_ENTITY_TITLE),
        alias: "SourceApplicationEntityTitle",
        vr: VirtualVr::Exact(VR::AE),
    },
    DataDictionaryEntryRef {
        tag: Single(DIRECTORY_RECORD_SEQUENCE),
        alias: "DirectoryRecordSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(REFERENCED_FILE_ID),
        alias: "ReferencedFileID",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(PRIVATE_INFORMATION_CREATOR_UID),
        alias: "PrivateInformationCreatorUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(SOP_CLASS_UID),
        alias: "SOPClassUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(SOP_INSTANCE_UID),
        alias: "SOPInstanceUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(MODALITY),
        alias: "Modality",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(INSTITUTION_NAME),
        alias: "InstitutionName",
        vr: VirtualVr::Exact(VR::LO),
    },
    DataDictionaryEntryRef {
        tag: Single(CODE_VALUE),
        alias: "CodeValue",
        vr: VirtualVr::Exact(VR::SH),
    },
    DataDictionaryEntryRef {
        tag: Single(CODING_SCHEME_DESIGNATOR),
        alias: "CodingSchemeDesignator",
        vr: VirtualVr::Exact(VR::SH),
    },
    DataDictionaryEntryRef {
        tag: Single(CODE_MEANING),
        alias: "CodeMeaning",
        vr: VirtualVr::Exact(VR::LO),
    },
    DataDictionaryEntryRef {
        tag: Single(STUDY_DESCRIPTION),
        alias: "StudyDescription",
        vr: VirtualVr::Exact(VR::LO),
    },
    DataDictionaryEntryRef {
        tag: Single(OPERATORS_NAME),
        alias: "OperatorsName",
        vr: VirtualVr::Exact(VR::PN),
    },
    DataDictionaryEntryRef {
        tag: Single(ANATOMIC_REGION_SEQUENCE),
        alias: "AnatomicRegionSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(ANATOMIC_REGION_MODIFIER_SEQUENCE),
        alias: "AnatomicRegionModifierSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(PATIENT_NAME),
        alias: "PatientName",
        vr: VirtualVr::Exact(VR::PN),
    },
    DataDictionaryEntryRef {
        tag: Single(PATIENT_BIRTH_DATE),
        alias: "PatientBirthDate",
        vr: VirtualVr::Exact(VR::DA),
    },
    DataDictionaryEntryRef {
        tag: Single(PATIENT_AGE),
        alias: "PatientAge",
        vr: VirtualVr::Exact(VR::AS),
    },
    DataDictionaryEntryRef {
        tag: Single(PATIENT_ADDRESS),
        alias: "PatientAddress",
        vr: VirtualVr::Exact(VR::LO),
    },
    DataDictionaryEntryRef {
        tag: Single(SEQUENCE_OF_ULTRASOUND_REGIONS),
        alias: "SequenceOfUltrasoundRegions",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(REGION_SPATIAL_FORMAT),
        alias: "RegionSpatialFormat",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(STUDY_INSTANCE_UID),
        alias: "StudyInstanceUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(SERIES_INSTANCE_UID),
        alias: "SeriesInstanceUID",
        vr: VirtualVr::Exact(VR::UI),
    },
    DataDictionaryEntryRef {
        tag: Single(INSTANCE_NUMBER),
        alias: "InstanceNumber",
        vr: VirtualVr::Exact(VR::IS),
    },
    DataDictionaryEntryRef {
        tag: Single(SAMPLES_PER_PIXEL),
        alias: "SamplesPerPixel",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(PHOTOMETRIC_INTERPRETATION),
        alias: "PhotometricInterpretation",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(PLANAR_CONFIGURATION),
        alias: "PlanarConfiguration",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(NUMBER_OF_FRAMES),
        alias: "NumberOfFrames",
        vr: VirtualVr::Exact(VR::IS),
    },
    DataDictionaryEntryRef {
        tag: Single(ROWS),
        alias: "Rows",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(COLUMNS),
        alias: "Columns",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(BITS_ALLOCATED),
        alias: "BitsAllocated",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(BITS_STORED),
        alias: "BitsStored",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(HIGH_BIT),
        alias: "HighBit",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(PIXEL_REPRESENTATION),
        alias: "PixelRepresentation",
        vr: VirtualVr::Exact(VR::US),
    },
    DataDictionaryEntryRef {
        tag: Single(BURNED_IN_ANNOTATION),
        alias: "BurnedInAnnotation",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(RESCALE_INTERCEPT),
        alias: "RescaleIntercept",
        vr: VirtualVr::Exact(VR::DS),
    },
    DataDictionaryEntryRef {
        tag: Single(RESCALE_SLOPE),
        alias: "RescaleSlope",
        vr: VirtualVr::Exact(VR::DS),
    },
    DataDictionaryEntryRef {
        tag: Single(VOILUT_FUNCTION),
        alias: "VOILUTFunction",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(LOSSY_IMAGE_COMPRESSION),
        alias: "LossyImageCompression",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(LOSSY_IMAGE_COMPRESSION_RATIO),
        alias: "LossyImageCompressionRatio",
        vr: VirtualVr::Exact(VR::DS),
    },
    DataDictionaryEntryRef {
        tag: Single(LOSSY_IMAGE_COMPRESSION_METHOD),
        alias: "LossyImageCompressionMethod",
        vr: VirtualVr::Exact(VR::CS),
    },
    DataDictionaryEntryRef {
        tag: Single(REQUESTING_PHYSICIAN),
        alias: "RequestingPhysician",
        vr: VirtualVr::Exact(VR::PN),
    },
    DataDictionaryEntryRef {
        tag: Single(CONCEPT_NAME_CODE_SEQUENCE),
        alias: "ConceptNameCodeSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(CONCEPT_CODE_SEQUENCE),
        alias: "ConceptCodeSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(CONTENT_SEQUENCE),
        alias: "ContentSequence",
        vr: VirtualVr::Exact(VR::SQ),
    },
    DataDictionaryEntryRef {
        tag: Single(PIXEL_DATA),
        alias: "PixelData",
        vr: VirtualVr::Px,
    },
    DataDictionaryEntryRef {
        tag: Group100(OVERLAY_DATA),
        alias: "OverlayData",
        vr: VirtualVr::Ox,
    },
    DataDictionaryEntryRef {
        tag: Masked(CURVE_DATA),
        alias: "CurveData",
        vr: VirtualVr::Ox,
    },
];
