//! Root module for extended pixel data adapters.
//!
//! Additional support for certain transfer syntaxes
//! can be added via Cargo features.
//!
//! - [`rle_lossless`] provides native RLE lossless decoding and encoding.
//!   Requires the `rle` feature, enabled by default.
//!
//! Transfer syntaxes requiring other compressed codecs (JPEG, JPEG 2000,
//! JPEG-LS, MPEG, HEVC) are registered as stubs in [`entries`][super::entries]:
//! the UID and endianness are known, but no decoder/encoder is vendored here
//! (their `Codec::EncapsulatedPixelData` carries `None` for both the reader
//! and the writer). A plug-in crate can register a real adapter for one of
//! those UIDs through the [inventory]-based registry.
//!
//! [inventory]: https://docs.rs/inventory/0.3.15/inventory
#[cfg(feature = "rle")]
pub mod rle_lossless;

pub mod uncompressed;

/// **Note:** This module is a stub.
/// Enable the `rle` feature to use this module.
#[cfg(not(feature = "rle"))]
pub mod rle {}
