//! Top-level convenience functions and the [`OpenFileOptions`] builder for
//! reading a DICOM file or byte stream into an in-memory object.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

use dicom_core::validation::{Issue, Profile};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_encoding::transfer_syntax::TransferSyntaxIndex;
use dicom_parser::stateful::decode::CharacterSetOverride;
use dicom_transfer_syntax_registry::TransferSyntaxRegistry;

use crate::{validate, DefaultDicomObject, ReadError, Tag};

/// Whether to read the 128-byte DICOM file preamble before the `DICM`
/// magic code, when opening a file or byte stream.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ReadPreamble {
    /// Detect the presence of a preamble automatically: look for the
    /// `DICM` magic code at byte 128, falling back to byte 0.
    #[default]
    Auto,
    /// Always assume the preamble is present and skip it.
    Always,
    /// Assume there is no preamble.
    Never,
}

/// Read a DICOM object from a byte source, with default options.
///
/// See [`OpenFileOptions`] for more control over how the object is read.
pub fn from_reader<F>(file: F) -> Result<DefaultDicomObject, ReadError>
where
    F: Read,
{
    DefaultDicomObject::from_reader(file)
}

/// Open and read a DICOM file from the file system, with default options.
///
/// See [`OpenFileOptions`] for more control over how the object is read.
pub fn open_file<P>(path: P) -> Result<DefaultDicomObject, ReadError>
where
    P: AsRef<Path>,
{
    DefaultDicomObject::open_file(path)
}

/// A builder for configuring how a DICOM file or byte stream is read into
/// an in-memory object.
///
/// ```no_run
/// # use dicom_object::OpenFileOptions;
/// # use dicom_dictionary_std::tags;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let obj = OpenFileOptions::new()
///     .read_until(tags::PIXEL_DATA)
///     .open_file("0001.dcm")?;
/// # Ok(())
/// # }
/// ```
pub struct OpenFileOptions<D = StandardDataDictionary, R = TransferSyntaxRegistry> {
    dict: D,
    ts_index: R,
    ts_override: Option<String>,
    read_until: Option<Tag>,
    read_preamble: ReadPreamble,
    charset_override: CharacterSetOverride,
    retain_unknown_private_tags: bool,
    fail_on_orphan_private_elements: bool,
    fail_on_duplicate_private_slots: bool,
    validation_profile: Option<Profile>,
    validation_callback: Option<Rc<dyn Fn(&Issue) -> bool>>,
    collect_issues: bool,
}

impl<D: fmt::Debug, R: fmt::Debug> fmt::Debug for OpenFileOptions<D, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenFileOptions")
            .field("dict", &self.dict)
            .field("ts_index", &self.ts_index)
            .field("ts_override", &self.ts_override)
            .field("read_until", &self.read_until)
            .field("read_preamble", &self.read_preamble)
            .field("charset_override", &self.charset_override)
            .field("retain_unknown_private_tags", &self.retain_unknown_private_tags)
            .field("fail_on_orphan_private_elements", &self.fail_on_orphan_private_elements)
            .field("fail_on_duplicate_private_slots", &self.fail_on_duplicate_private_slots)
            .field("validation_profile", &self.validation_profile)
            .field("validation_callback", &self.validation_callback.as_ref().map(|_| "<callback>"))
            .field("collect_issues", &self.collect_issues)
            .finish()
    }
}

impl Default for OpenFileOptions {
    fn default() -> Self {
        OpenFileOptions {
            dict: StandardDataDictionary,
            ts_index: TransferSyntaxRegistry,
            ts_override: None,
            read_until: None,
            read_preamble: ReadPreamble::default(),
            charset_override: CharacterSetOverride::NONE,
            retain_unknown_private_tags: true,
            fail_on_orphan_private_elements: false,
            fail_on_duplicate_private_slots: false,
            validation_profile: None,
            validation_callback: None,
            collect_issues: false,
        }
    }
}

impl OpenFileOptions {
    /// Create a new set of options with the default configuration:
    /// the standard data dictionary and transfer syntax registry, no
    /// transfer syntax or character set override, automatic preamble
    /// detection, and no validation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D, R> OpenFileOptions<D, R> {
    /// Override the data element dictionary with the one given,
    /// potentially replacing the dictionary type.
    pub fn dictionary<D2>(self, dict: D2) -> OpenFileOptions<D2, R> {
        OpenFileOptions {
            dict,
            ts_index: self.ts_index,
            ts_override: self.ts_override,
            read_until: self.read_until,
            read_preamble: self.read_preamble,
            charset_override: self.charset_override,
            retain_unknown_private_tags: self.retain_unknown_private_tags,
            fail_on_orphan_private_elements: self.fail_on_orphan_private_elements,
            fail_on_duplicate_private_slots: self.fail_on_duplicate_private_slots,
            validation_profile: self.validation_profile,
            validation_callback: self.validation_callback,
            collect_issues: self.collect_issues,
        }
    }

    /// Override the transfer syntax index (also called registry) with the
    /// one given, potentially replacing the transfer syntax index type.
    pub fn transfer_syntax_index<R2>(self, ts_index: R2) -> OpenFileOptions<D, R2> {
        OpenFileOptions {
            dict: self.dict,
            ts_index,
            ts_override: self.ts_override,
            read_until: self.read_until,
            read_preamble: self.read_preamble,
            charset_override: self.charset_override,
            retain_unknown_private_tags: self.retain_unknown_private_tags,
            fail_on_orphan_private_elements: self.fail_on_orphan_private_elements,
            fail_on_duplicate_private_slots: self.fail_on_duplicate_private_slots,
            validation_profile: self.validation_profile,
            validation_callback: self.validation_callback,
            collect_issues: self.collect_issues,
        }
    }

    /// Force the given transfer syntax UID to be used instead of the one
    /// declared in the file meta group.
    ///
    /// Useful for reading data sets whose declared transfer syntax is
    /// wrong or unsupported but whose actual encoding is known.
    pub fn transfer_syntax_override(mut self, ts_uid: impl Into<String>) -> Self {
        self.ts_override = Some(ts_uid.into());
        self
    }

    /// Stop reading the data set once an element with a tag greater than
    /// or equal to `tag` would be read, leaving it and the remainder of
    /// the data set unread.
    ///
    /// A common use is to stop right before _Pixel Data_, when only the
    /// preceding attributes are of interest.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Set whether to read the 128-byte DICOM file preamble.
    pub fn read_preamble(mut self, option: ReadPreamble) -> Self {
        self.read_preamble = option;
        self
    }

    /// Force text to be decoded using the given character set code,
    /// regardless of what _Specific Character Set_ (0008,0005) declares.
    pub fn character_set_override(mut self, code: &'static str) -> Self {
        self.charset_override = CharacterSetOverride::new(code);
        self
    }

    /// Set whether private data elements whose creator could not be
    /// resolved should be kept in the resulting object (the default) or
    /// dropped.
    pub fn retain_unknown_private_tags(mut self, retain: bool) -> Self {
        self.retain_unknown_private_tags = retain;
        self
    }

    /// Fail the read outright if a private data element's creator cannot
    /// be resolved, instead of silently keeping or dropping it.
    pub fn fail_on_orphan_private_elements(mut self, fail: bool) -> Self {
        self.fail_on_orphan_private_elements = fail;
        self
    }

    /// Fail the read if two private creator elements in the same group
    /// claim the same slot with different creator strings.
    pub fn fail_on_duplicate_private_slots(mut self, fail: bool) -> Self {
        self.fail_on_duplicate_private_slots = fail;
        self
    }

    /// Validate every element against the given profile as the object is
    /// assembled.
    pub fn validation_profile(mut self, profile: Profile) -> Self {
        self.validation_profile = Some(profile);
        self
    }

    /// Register a callback invoked for every validation issue raised,
    /// in element order. Returning `false` aborts the read with that
    /// issue as the error, regardless of its severity.
    pub fn validation_callback(mut self, callback: impl Fn(&Issue) -> bool + 'static) -> Self {
        self.validation_callback = Some(Rc::new(callback));
        self
    }

    /// Set whether raised validation issues that do not abort the read
    /// should be collected and made available via
    /// [`open_file_collecting`](OpenFileOptions::open_file_collecting) /
    /// [`from_reader_collecting`](OpenFileOptions::from_reader_collecting).
    pub fn collect_issues(mut self, collect: bool) -> Self {
        self.collect_issues = collect;
        self
    }

    /// Proceed with opening and reading a file, discarding any collected
    /// (non-fatal) validation issues.
    pub fn open_file(self, filename: impl AsRef<Path>) -> Result<crate::FileDicomObject<crate::InMemDicomObject<D>>, ReadError>
    where
        D: dicom_core::dictionary::DataDictionary + Clone,
        R: TransferSyntaxIndex,
    {
        self.open_file_collecting(filename).map(|(obj, _)| obj)
    }

    /// Proceed with opening and reading a file, returning the collected
    /// (non-fatal) validation issues alongside the object.
    pub fn open_file_collecting(
        self,
        filename: impl AsRef<Path>,
    ) -> Result<(crate::FileDicomObject<crate::InMemDicomObject<D>>, Vec<Issue>), ReadError>
    where
        D: dicom_core::dictionary::DataDictionary + Clone,
        R: TransferSyntaxIndex,
    {
        let (dict, ts_index, ts_override, read_until, read_preamble, charset_override, post) =
            self.into_parts();
        let mut obj = crate::FileDicomObject::<crate::InMemDicomObject<D>>::open_file_with_full_options(
            filename,
            dict,
            ts_index,
            read_until,
            read_preamble,
            ts_override.as_deref(),
            charset_override,
        )?;
        let issues = post.run(&mut obj)?;
        Ok((obj, issues))
    }

    /// Create a DICOM object by reading from the given source, discarding
    /// any collected (non-fatal) validation issues.
    pub fn from_reader<S>(self, src: S) -> Result<crate::FileDicomObject<crate::InMemDicomObject<D>>, ReadError>
    where
        S: Read,
        D: dicom_core::dictionary::DataDictionary + Clone,
        R: TransferSyntaxIndex,
    {
        self.from_reader_collecting(src).map(|(obj, _)| obj)
    }

    /// Create a DICOM object by reading from the given source, returning
    /// the collected (non-fatal) validation issues alongside the object.
    pub fn from_reader_collecting<S>(
        self,
        src: S,
    ) -> Result<(crate::FileDicomObject<crate::InMemDicomObject<D>>, Vec<Issue>), ReadError>
    where
        S: Read,
        D: dicom_core::dictionary::DataDictionary + Clone,
        R: TransferSyntaxIndex,
    {
        let (dict, ts_index, ts_override, read_until, read_preamble, charset_override, post) =
            self.into_parts();
        let mut obj = crate::FileDicomObject::<crate::InMemDicomObject<D>>::from_reader_with_full_options(
            src,
            dict,
            ts_index,
            read_until,
            read_preamble,
            ts_override.as_deref(),
            charset_override,
        )?;
        let issues = post.run(&mut obj)?;
        Ok((obj, issues))
    }
}

/// The subset of [`OpenFileOptions`] needed after the object has been
/// built: private-tag enforcement and validation. Captured up front so
/// that the dictionary and transfer syntax index can be moved into the
/// read call without borrowing `self` afterwards.
struct PostProcessOptions {
    retain_unknown_private_tags: bool,
    fail_on_orphan_private_elements: bool,
    fail_on_duplicate_private_slots: bool,
    validation_profile: Option<Profile>,
    validation_callback: Option<Rc<dyn Fn(&Issue) -> bool>>,
    collect_issues: bool,
}

impl<D, R> OpenFileOptions<D, R> {
    /// Split the options into the parts needed to perform the read
    /// (dictionary, transfer syntax index, overrides) and the parts
    /// needed afterwards to enforce private-tag and validation policy.
    #[allow(clippy::type_complexity)]
    fn into_parts(
        self,
    ) -> (
        D,
        R,
        Option<String>,
        Option<Tag>,
        ReadPreamble,
        CharacterSetOverride,
        PostProcessOptions,
    ) {
        (
            self.dict,
            self.ts_index,
            self.ts_override,
            self.read_until,
            self.read_preamble,
            self.charset_override,
            PostProcessOptions {
                retain_unknown_private_tags: self.retain_unknown_private_tags,
                fail_on_orphan_private_elements: self.fail_on_orphan_private_elements,
                fail_on_duplicate_private_slots: self.fail_on_duplicate_private_slots,
                validation_profile: self.validation_profile,
                validation_callback: self.validation_callback,
                collect_issues: self.collect_issues,
            },
        )
    }
}

impl PostProcessOptions {
    fn run<D>(&self, obj: &mut crate::FileDicomObject<crate::InMemDicomObject<D>>) -> Result<Vec<Issue>, ReadError>
    where
        D: dicom_core::dictionary::DataDictionary + Clone,
    {
        validate::check_private_tags(
            &mut obj.obj,
            self.retain_unknown_private_tags,
            self.fail_on_orphan_private_elements,
            self.fail_on_duplicate_private_slots,
        )?;

        let Some(profile) = &self.validation_profile else {
            return Ok(Vec::new());
        };

        let callback = &self.validation_callback;
        let (issues, fatal) = validate::run(&obj.obj, profile, |issue| {
            callback.as_ref().map(|cb| cb(issue)).unwrap_or(true)
        });

        if let Some(issue) = fatal {
            return crate::ValidationSnafu { issue }.fail();
        }

        if self.collect_issues {
            Ok(issues)
        } else {
            Ok(Vec::new())
        }
    }
}
