//! Standard validation rules, as described by PS3.5.

use super::{Issue, Rule, Severity, ValidationContext};
use crate::header::VR;

fn trim_padding(bytes: &[u8], padding: u8) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != padding)
        .map(|i| i + 1)
        .unwrap_or(0);
    &bytes[..end]
}

/// Validates DA, TM, DT and AS formats.
#[derive(Debug, Default)]
pub struct DateTimeFormatRule;

impl DateTimeFormatRule {
    /// stable rule identifier
    pub const ID: &'static str = "format.datetime";

    fn check_component(vr: VR, value: &[u8]) -> bool {
        let s = match std::str::from_utf8(value) {
            Ok(s) => s,
            Err(_) => return false,
        };
        match vr {
            VR::DA => {
                s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
            }
            VR::TM => {
                // HHMMSS.FFFFFF, with MM, SS and fraction optional
                if s.is_empty() || s.len() > 14 {
                    return false;
                }
                let (main, frac) = match s.split_once('.') {
                    Some((main, frac)) => (main, Some(frac)),
                    None => (s, None),
                };
                if main.is_empty() || main.len() > 6 || main.len() % 2 != 0 {
                    return false;
                }
                if !main.bytes().all(|b| b.is_ascii_digit()) {
                    return false;
                }
                if let Some(frac) = frac {
                    if frac.is_empty() || frac.len() > 6 {
                        return false;
                    }
                    if !frac.bytes().all(|b| b.is_ascii_digit()) {
                        return false;
                    }
                }
                true
            }
            VR::DT => {
                if s.len() < 4 || s.len() > 26 {
                    return false;
                }
                // YYYY then optional MM, DD, HH, MM, SS.FFFFFF, and a
                // trailing &ZZXX offset.
                let (body, _offset) = match s.find(['+', '-']) {
                    Some(idx) => (&s[..idx], Some(&s[idx..])),
                    None => (s, None),
                };
                let (main, frac) = match body.split_once('.') {
                    Some((main, frac)) => (main, Some(frac)),
                    None => (body, None),
                };
                if main.len() < 4 || main.len() > 14 || !main.bytes().all(|b| b.is_ascii_digit()) {
                    return false;
                }
                if let Some(frac) = frac {
                    if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit())
                    {
                        return false;
                    }
                }
                true
            }
            VR::AS => {
                s.len() == 4
                    && s.as_bytes()[..3].iter().all(|b| b.is_ascii_digit())
                    && matches!(s.as_bytes()[3], b'D' | b'W' | b'M' | b'Y')
            }
            _ => true,
        }
    }
}

impl Rule for DateTimeFormatRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue> {
        if !matches!(ctx.declared_vr, VR::DA | VR::TM | VR::DT | VR::AS) {
            return None;
        }
        let trimmed = trim_padding(ctx.raw_bytes, ctx.declared_vr.meta().padding);
        if trimmed.is_empty() {
            return None;
        }
        for component in trimmed.split(|&b| b == b'\\') {
            if !Self::check_component(ctx.declared_vr, component) {
                return Some(Issue::new(
                    Self::ID,
                    ctx.tag,
                    Severity::Error,
                    format!(
                        "value does not conform to {} format",
                        ctx.declared_vr
                    ),
                ));
            }
        }
        None
    }
}

/// Validates UI (unique identifier) syntax: dotted-decimal, <=64 chars,
/// no empty components, no leading zeros in multi-digit components.
#[derive(Debug, Default)]
pub struct UidFormatRule;

impl UidFormatRule {
    /// stable rule identifier
    pub const ID: &'static str = "format.uid";

    /// Check whether `s` is a syntactically valid UID string.
    pub fn is_valid(s: &str) -> bool {
        crate::uid::Uid::new(s).is_ok()
    }
}

impl Rule for UidFormatRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue> {
        if ctx.declared_vr != VR::UI {
            return None;
        }
        let trimmed = trim_padding(ctx.raw_bytes, b'\0');
        let trimmed = trim_padding(trimmed, b' ');
        if trimmed.is_empty() {
            return None;
        }
        let s = match std::str::from_utf8(trimmed) {
            Ok(s) => s,
            Err(_) => {
                return Some(Issue::new(
                    Self::ID,
                    ctx.tag,
                    Severity::Error,
                    "UID is not valid ASCII",
                ))
            }
        };
        for value in s.split('\\') {
            if !Self::is_valid(value) {
                return Some(Issue::new(
                    Self::ID,
                    ctx.tag,
                    Severity::Error,
                    format!("`{value}` is not a well-formed UID"),
                ));
            }
        }
        None
    }
}

/// Validates PN component-group and component structure and length.
///
/// A PN value has up to 3 `=`-separated component groups (alphabetic,
/// ideographic, phonetic), each with up to 5 `^`-separated components
/// (family, given, middle, prefix, suffix). The whole value must not
/// exceed 3 * 64 characters per the VR's maximum length.
#[derive(Debug, Default)]
pub struct PersonNameFormatRule;

impl PersonNameFormatRule {
    /// stable rule identifier
    pub const ID: &'static str = "format.person_name";
}

impl Rule for PersonNameFormatRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue> {
        if ctx.declared_vr != VR::PN {
            return None;
        }
        let trimmed = trim_padding(ctx.raw_bytes, b' ');
        if trimmed.is_empty() {
            return None;
        }
        let s = match std::str::from_utf8(trimmed) {
            Ok(s) => s,
            Err(_) => return None,
        };
        for name in s.split('\\') {
            let groups: Vec<&str> = name.split('=').collect();
            if groups.len() > 3 {
                return Some(Issue::new(
                    Self::ID,
                    ctx.tag,
                    Severity::Error,
                    "person name has more than 3 component groups",
                ));
            }
            for group in &groups {
                if group.split('^').count() > 5 {
                    return Some(Issue::new(
                        Self::ID,
                        ctx.tag,
                        Severity::Error,
                        "person name component group has more than 5 components",
                    ));
                }
            }
        }
        None
    }
}

/// Enforces the character repertoire allowed for a subset of VRs:
/// AE disallows backslash and control characters, DS allows
/// `0-9+-Ee. `, IS allows `0-9+- `.
#[derive(Debug, Default)]
pub struct CharacterRepertoireRule;

impl CharacterRepertoireRule {
    /// stable rule identifier
    pub const ID: &'static str = "format.repertoire";

    fn allowed(vr: VR, byte: u8) -> bool {
        match vr {
            VR::AE => byte != b'\\' && !byte.is_ascii_control(),
            VR::DS => byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'E' | b'e' | b'.' | b' '),
            VR::IS => byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b' '),
            VR::CS => byte.is_ascii_uppercase() || byte.is_ascii_digit() || matches!(byte, b' ' | b'_'),
            _ => true,
        }
    }
}

impl Rule for CharacterRepertoireRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue> {
        if !matches!(ctx.declared_vr, VR::AE | VR::DS | VR::IS | VR::CS) {
            return None;
        }
        let trimmed = trim_padding(ctx.raw_bytes, ctx.declared_vr.meta().padding);
        for &b in trimmed {
            if !Self::allowed(ctx.declared_vr, b) {
                return Some(Issue::new(
                    Self::ID,
                    ctx.tag,
                    Severity::Error,
                    format!(
                        "byte 0x{b:02x} is not allowed in the {} character repertoire",
                        ctx.declared_vr
                    ),
                ));
            }
        }
        None
    }
}

/// Enforces each VR's maximum encoded length, when one is defined.
#[derive(Debug, Default)]
pub struct MaxLengthRule;

impl MaxLengthRule {
    /// stable rule identifier
    pub const ID: &'static str = "format.max_length";
}

impl Rule for MaxLengthRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue> {
        let Some(max_length) = ctx.declared_vr.meta().max_length else {
            return None;
        };
        let trimmed = trim_padding(ctx.raw_bytes, ctx.declared_vr.meta().padding);
        if trimmed.len() as u32 > max_length {
            return Some(Issue::new(
                Self::ID,
                ctx.tag,
                Severity::Error,
                format!(
                    "value of length {} exceeds the {} character maximum for {}",
                    trimmed.len(),
                    max_length,
                    ctx.declared_vr
                ),
            ));
        }
        None
    }
}

/// All standard rules, in the order in which they should normally run.
pub fn standard_rules() -> Vec<Box<dyn Rule + Send + Sync>> {
    vec![
        Box::new(DateTimeFormatRule),
        Box::new(UidFormatRule),
        Box::new(PersonNameFormatRule),
        Box::new(CharacterRepertoireRule),
        Box::new(MaxLengthRule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Tag;

    fn ctx<'a>(tag: Tag, vr: VR, raw: &'a [u8]) -> ValidationContext<'a> {
        ValidationContext {
            tag,
            declared_vr: vr,
            expected_vr: Some(vr),
            raw_bytes: raw,
            stream_position: None,
            is_private: false,
            private_creator: None,
        }
    }

    #[test]
    fn valid_uid_passes() {
        let rule = UidFormatRule;
        let c = ctx(Tag(0x0008, 0x0018), VR::UI, b"1.2.840.10008.1.2.1\0");
        assert!(rule.check(&c).is_none());
    }

    #[test]
    fn uid_leading_zero_component_fails() {
        let rule = UidFormatRule;
        let c = ctx(Tag(0x0008, 0x0018), VR::UI, b"1.2.03.4\0");
        assert!(rule.check(&c).is_some());
    }

    #[test]
    fn uid_65_chars_fails() {
        assert!(!UidFormatRule::is_valid(&"1".repeat(65)));
        assert!(UidFormatRule::is_valid(&"1".repeat(64)));
    }

    #[test]
    fn valid_date_passes() {
        let rule = DateTimeFormatRule;
        let c = ctx(Tag(0x0008, 0x0020), VR::DA, b"20230401");
        assert!(rule.check(&c).is_none());
    }

    #[test]
    fn malformed_date_fails() {
        let rule = DateTimeFormatRule;
        let c = ctx(Tag(0x0008, 0x0020), VR::DA, b"2023-04-01");
        assert!(rule.check(&c).is_some());
    }

    #[test]
    fn age_string_format() {
        let rule = DateTimeFormatRule;
        assert!(rule.check(&ctx(Tag(0x0010, 0x1010), VR::AS, b"032Y")).is_none());
        assert!(rule.check(&ctx(Tag(0x0010, 0x1010), VR::AS, b"32Y ")).is_some());
    }

    #[test]
    fn person_name_too_many_groups() {
        let rule = PersonNameFormatRule;
        let c = ctx(Tag(0x0010, 0x0010), VR::PN, b"A=B=C=D");
        assert!(rule.check(&c).is_some());
    }

    #[test]
    fn ae_disallows_backslash() {
        let rule = CharacterRepertoireRule;
        let c = ctx(Tag(0x0000, 0x0002), VR::AE, b"A\\B");
        assert!(rule.check(&c).is_some());
    }

    #[test]
    fn ds_allows_scientific_notation() {
        let rule = CharacterRepertoireRule;
        let c = ctx(Tag(0x0018, 0x1151), VR::DS, b"1.05E+2 ");
        assert!(rule.check(&c).is_none());
    }

    #[test]
    fn max_length_enforced() {
        let rule = MaxLengthRule;
        let long = vec![b'A'; 17];
        let c = ctx(Tag(0x0000, 0x0002), VR::AE, &long);
        assert!(rule.check(&c).is_some());
    }
}
