//! Validation of DICOM element values against the rules of PS3.5.
//!
//! This module provides a small rule engine that can be run over data
//! elements as they are read (or at any later point against an assembled
//! data set). A [`Rule`] inspects a single element and optionally reports
//! an [`Issue`]; a [`Profile`] bundles a set of rules together with the
//! [`Behavior`] to apply when a rule fires, with optional per-tag
//! overrides.
//!
//! The engine does not mutate the element or the data set it came from:
//! it only classifies values. What a caller does with a raised issue
//! (abort decoding, collect it, or ignore it) is controlled by the
//! [`Behavior`] in effect for that tag.

mod rules;

use std::collections::HashMap;
use std::fmt;

use crate::header::{Tag, VR};

pub use rules::{standard_rules, CharacterRepertoireRule, DateTimeFormatRule, MaxLengthRule,
    PersonNameFormatRule, UidFormatRule};

/// The severity of a raised [`Issue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The value does not conform, and should be treated as an error.
    Error,
    /// The value is suspicious but parseable; worth a warning.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding produced by a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// identifier of the rule that raised this issue
    pub rule_id: &'static str,
    /// the tag of the element in question
    pub tag: Tag,
    /// severity assigned by the rule itself (before `Behavior` is applied)
    pub severity: Severity,
    /// human-readable description of the problem
    pub message: String,
    /// byte offset in the stream where the offending element started,
    /// when known
    pub stream_position: Option<u64>,
}

impl Issue {
    /// Build a new issue for the given tag and rule.
    pub fn new(
        rule_id: &'static str,
        tag: Tag,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            rule_id,
            tag,
            severity,
            message: message.into(),
            stream_position: None,
        }
    }

    /// Attach the stream position at which the element began.
    pub fn with_position(mut self, position: u64) -> Self {
        self.stream_position = Some(position);
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({}): {}", self.severity, self.tag, self.rule_id, self.message)
    }
}

/// The context a [`Rule`] is evaluated against.
///
/// Mirrors one data element as it is being parsed: the rule only sees
/// what the reader could know at that point, never the fully assembled
/// data set.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// the element's tag
    pub tag: Tag,
    /// the VR the element was declared (or resolved) with
    pub declared_vr: VR,
    /// the VR the dictionary expects for this tag, if resolvable
    pub expected_vr: Option<VR>,
    /// the element's raw value bytes, before padding is trimmed
    pub raw_bytes: &'a [u8],
    /// byte offset of the start of the element in the source stream
    pub stream_position: Option<u64>,
    /// whether the tag is a private data element
    pub is_private: bool,
    /// the resolved private creator string, if any
    pub private_creator: Option<&'a str>,
}

/// A single validation rule.
///
/// A rule inspects one element's context and, if the value does not
/// conform, returns at most one [`Issue`].
pub trait Rule: fmt::Debug {
    /// Stable identifier for this rule, used in reported issues and in
    /// per-tag overrides.
    fn id(&self) -> &'static str;

    /// Evaluate the rule against an element. Returns `None` when the
    /// value conforms.
    fn check(&self, ctx: &ValidationContext<'_>) -> Option<Issue>;
}

/// What to do with an issue raised while a [`Profile`] is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Errors are fatal, warnings are collected.
    Validate,
    /// All issues are collected, nothing is fatal.
    Warn,
    /// Rules are not run at all.
    Skip,
}

/// The outcome of running a [`Profile`] against one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No rule fired.
    Ok,
    /// One or more issues were raised but none were fatal.
    Collected(Vec<Issue>),
    /// A fatal issue was raised under `Behavior::Validate`.
    Fatal(Issue),
}

/// A bundle of rules plus the behavior to apply when they fire.
///
/// `per_tag_overrides` lets a caller dial a specific tag up or down
/// relative to `default_behavior`, e.g. to silence a noisy vendor's
/// malformed private element without relaxing validation everywhere.
#[derive(Debug)]
pub struct Profile {
    rules: Vec<Box<dyn Rule + Send + Sync>>,
    default_behavior: Behavior,
    per_tag_overrides: HashMap<Tag, Behavior>,
}

impl Profile {
    /// Construct a profile from an explicit rule set and default behavior.
    pub fn new(rules: Vec<Box<dyn Rule + Send + Sync>>, default_behavior: Behavior) -> Self {
        Profile {
            rules,
            default_behavior,
            per_tag_overrides: HashMap::new(),
        }
    }

    /// Override the behavior used for a specific tag, regardless of the
    /// profile's default.
    pub fn with_tag_override(mut self, tag: Tag, behavior: Behavior) -> Self {
        self.per_tag_overrides.insert(tag, behavior);
        self
    }

    /// The behavior that applies to the given tag.
    pub fn behavior_for(&self, tag: Tag) -> Behavior {
        self.per_tag_overrides
            .get(&tag)
            .copied()
            .unwrap_or(self.default_behavior)
    }

    /// Run all rules against one element, honoring the configured
    /// behavior for its tag. Each rule contributes at most one issue.
    pub fn check(&self, ctx: &ValidationContext<'_>) -> Outcome {
        let behavior = self.behavior_for(ctx.tag);
        if behavior == Behavior::Skip {
            return Outcome::Ok;
        }

        let mut issues = Vec::new();
        for rule in &self.rules {
            if let Some(issue) = rule.check(ctx) {
                if behavior == Behavior::Validate && issue.severity == Severity::Error {
                    return Outcome::Fatal(issue);
                }
                issues.push(issue);
            }
        }

        if issues.is_empty() {
            Outcome::Ok
        } else {
            Outcome::Collected(issues)
        }
    }

    /// All rules currently registered in reverse-chronological order,
    /// mostly useful for introspection and tests.
    pub fn rules(&self) -> impl Iterator<Item = &(dyn Rule + Send + Sync)> {
        self.rules.iter().map(|b| b.as_ref())
    }

    /// *Strict*: every standard rule, failing the decode on any error.
    pub fn strict() -> Self {
        Profile::new(standard_rules(), Behavior::Validate)
    }

    /// *Lenient*: every standard rule, but errors are only collected.
    pub fn lenient() -> Self {
        Profile::new(standard_rules(), Behavior::Warn)
    }

    /// *Permissive*: only the cheap, length-only rules, collected as
    /// warnings.
    pub fn permissive() -> Self {
        let rules: Vec<Box<dyn Rule + Send + Sync>> = standard_rules()
            .into_iter()
            .filter(|r| r.id() == MaxLengthRule::ID)
            .collect();
        Profile::new(rules, Behavior::Warn)
    }

    /// *None*: no rules run at all.
    pub fn none() -> Self {
        Profile::new(Vec::new(), Behavior::Skip)
    }
}

impl Default for Profile {
    /// Defaults to [`Profile::lenient`], matching the reader's own
    /// default of collecting rather than failing on format issues.
    fn default() -> Self {
        Profile::lenient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_override_takes_precedence() {
        let profile = Profile::new(Vec::new(), Behavior::Validate)
            .with_tag_override(Tag(0x0008, 0x0018), Behavior::Skip);

        assert_eq!(profile.behavior_for(Tag(0x0008, 0x0018)), Behavior::Skip);
        assert_eq!(profile.behavior_for(Tag(0x0010, 0x0010)), Behavior::Validate);
    }

    #[test]
    fn none_profile_never_raises() {
        let profile = Profile::none();
        let ctx = ValidationContext {
            tag: Tag(0x0008, 0x0018),
            declared_vr: VR::UI,
            expected_vr: Some(VR::UI),
            raw_bytes: b"not.a.valid.uid.at.all.........................................",
            stream_position: None,
            is_private: false,
            private_creator: None,
        };
        assert_eq!(profile.check(&ctx), Outcome::Ok);
    }
}
