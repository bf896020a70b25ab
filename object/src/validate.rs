//! Post-assembly validation of an in-memory data set against a
//! [`Profile`](dicom_core::validation::Profile).
//!
//! The reader's token stream does not retain the raw wire bytes of a
//! parsed value (see [`DataToken`](dicom_parser::dataset::DataToken)), so
//! rules run here against the string rendering of the assembled value
//! instead of the bytes actually seen on the wire. For the string-typed
//! VRs the standard rules check, this is equivalent; binary VRs are
//! always skipped by those rules.

use dicom_core::dictionary::DataDictionary;
use dicom_core::header::Header;
use dicom_core::validation::{Issue, Outcome, Profile, ValidationContext};

use crate::mem::InMemDicomObject;
use crate::{DuplicatePrivateSlotSnafu, OrphanPrivateElementSnafu, ReadError};
use snafu::ResultExt;

/// Run `profile` over every top-level primitive element of `obj`,
/// invoking `on_issue` for each raised issue (in element order).
///
/// `on_issue` returning `false` aborts immediately with that issue,
/// regardless of its severity, mirroring a `validation_callback` that
/// rejects the data set outright. Otherwise, returns the issues raised
/// under `Behavior::Warn` or an uncollected `Behavior::Validate`
/// pass, plus the first fatal issue encountered, if any.
pub(crate) fn run<D>(
    obj: &InMemDicomObject<D>,
    profile: &Profile,
    mut on_issue: impl FnMut(&Issue) -> bool,
) -> (Vec<Issue>, Option<Issue>)
where
    D: DataDictionary + Clone,
{
    let creators = obj.private_creators();
    let mut collected = Vec::new();

    for elt in obj.iter() {
        let tag = elt.header().tag;
        let declared_vr = elt.header().vr;
        let is_private = tag.group() % 2 == 1;
        let private_creator = if is_private {
            creators.lookup(tag)
        } else {
            None
        };

        let rendered;
        let raw_bytes: &[u8] = match elt.value().to_multi_str() {
            Ok(strings) => {
                rendered = strings.join("\\").into_bytes();
                &rendered
            }
            Err(_) => continue,
        };

        let ctx = ValidationContext {
            tag,
            declared_vr,
            expected_vr: None,
            raw_bytes,
            stream_position: None,
            is_private,
            private_creator,
        };

        match profile.check(&ctx) {
            Outcome::Ok => {}
            Outcome::Collected(issues) => {
                for issue in issues {
                    if !on_issue(&issue) {
                        return (collected, Some(issue));
                    }
                    collected.push(issue);
                }
            }
            Outcome::Fatal(issue) => {
                on_issue(&issue);
                return (collected, Some(issue));
            }
        }
    }

    (collected, None)
}

/// Enforce the reader's private-tag policy against an assembled object.
///
/// Re-registers every private creator element found, failing with
/// [`ReadError::DuplicatePrivateSlot`] if `fail_on_duplicate_slots` is set
/// and two creator elements in the same group/slot disagree. Private data
/// elements whose creator is unresolved (no matching creator element was
/// present) are orphans: with `fail_on_orphan` set this is an error, and
/// regardless of that flag, setting `retain_unknown` to `false` drops them
/// from the object.
pub(crate) fn check_private_tags<D>(
    obj: &mut InMemDicomObject<D>,
    retain_unknown: bool,
    fail_on_orphan: bool,
    fail_on_duplicate_slots: bool,
) -> Result<(), ReadError>
where
    D: DataDictionary + Clone,
{
    if fail_on_duplicate_slots {
        let mut table = crate::private::PrivateCreatorTable::new();
        for elt in obj.iter() {
            let tag = elt.header().tag;
            if tag.group() % 2 == 0 || !(0x0010..=0x00FF).contains(&tag.element()) {
                continue;
            }
            if let Ok(creator) = elt.value().to_str() {
                table
                    .register(tag, creator.into_owned())
                    .context(DuplicatePrivateSlotSnafu)?;
            }
        }
    }

    if !fail_on_orphan && retain_unknown {
        return Ok(());
    }

    let creators = obj.private_creators();
    let is_orphan = |tag: dicom_core::Tag| -> bool {
        tag.group() % 2 == 1 && tag.element() > 0x00FF && creators.lookup(tag).is_none()
    };

    if fail_on_orphan {
        if let Some(elt) = obj.iter().find(|elt| is_orphan(elt.header().tag)) {
            return OrphanPrivateElementSnafu {
                tag: elt.header().tag,
            }
            .fail();
        }
    }

    if !retain_unknown {
        obj.retain(|elt| !is_orphan(elt.header().tag));
    }

    Ok(())
}
