//! Literal round-trip scenario for RLE Lossless: a tiny 16-bit grayscale
//! frame encoded then decoded, checking both the pixel data and the shape
//! of the encoded RLE header.
#![cfg(feature = "rle")]

mod adapters;

use adapters::TestDataObject;
use dicom_encoding::{
    adapters::{EncodeOptions, PixelDataReader, PixelDataWriter},
    Codec,
};
use dicom_transfer_syntax_registry::entries::RLE_LOSSLESS;

#[test]
fn rle_roundtrip_4x2_16bit_grayscale() {
    // 4x2 pixels, 16-bit grayscale, little-endian samples 1..=8
    let input: Vec<u8> = vec![
        0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04, 0x00, 0x05, 0x00, 0x06, 0x00, 0x07, 0x00, 0x08,
        0x00,
    ];

    let obj = TestDataObject {
        ts_uid: "1.2.840.10008.1.2.5".to_string(),
        rows: 2,
        columns: 4,
        bits_allocated: 16,
        bits_stored: 16,
        samples_per_pixel: 1,
        photometric_interpretation: "MONOCHROME2",
        number_of_frames: 1,
        flat_pixel_data: Some(input.clone()),
        pixel_data_sequence: None,
    };

    let Codec::EncapsulatedPixelData(Some(decoder), Some(encoder)) = RLE_LOSSLESS.codec() else {
        panic!("RLE lossless pixel data adapter not found")
    };

    let mut encoded = Vec::new();
    let ops = encoder
        .encode_frame(&obj, 0, EncodeOptions::new(), &mut encoded)
        .expect("RLE frame encoding failed");
    assert!(!ops.is_empty(), "encode should set PlanarConfiguration");

    // Header: u32 number_of_segments, then segment offsets.
    let number_of_segments = u32::from_le_bytes(encoded[0..4].try_into().unwrap());
    assert_eq!(number_of_segments, 2, "one segment per byte of each sample");
    let first_offset = u32::from_le_bytes(encoded[4..8].try_into().unwrap());
    assert_eq!(first_offset, 64, "first segment always starts right after the 64-byte header");

    // now decode the just-encoded fragment and check it matches the input
    let encoded_obj = TestDataObject {
        ts_uid: "1.2.840.10008.1.2.5".to_string(),
        rows: 2,
        columns: 4,
        bits_allocated: 16,
        bits_stored: 16,
        samples_per_pixel: 1,
        photometric_interpretation: "MONOCHROME2",
        number_of_frames: 1,
        flat_pixel_data: None,
        pixel_data_sequence: Some(dicom_core::value::PixelFragmentSequence::new(
            vec![],
            vec![encoded],
        )),
    };

    let mut decoded = Vec::new();
    decoder
        .decode(&encoded_obj, &mut decoded)
        .expect("RLE frame decoding failed");

    assert_eq!(decoded, input);
}
