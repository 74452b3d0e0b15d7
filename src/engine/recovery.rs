//! Error-event recovery policy.
//!
//! The parsing engine reports problems as named error events. The recovery
//! policy maps each [`EventKind`] to an [`Action`]; events with no
//! configured action are fatal. `Warn` reports through the `log` facade
//! and continues.

#[cfg(not(test))]
use alloc::string::String;

use core::fmt;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ParseError;

/// What to do when a named error event occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Abort parsing with a [`ParseError`]. The default for every kind.
    #[default]
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Silently continue.
    Ignore,
}

/// The named error events an engine can report.
///
/// The reference engine raises `UnknownKeyword`, `RandomText`,
/// `RandomSlash`, `ExtraData`, and `MissingInclude`. The remaining kinds
/// belong to semantic layers stacked above the tokenizer (dimension,
/// schedule, and summary validation); they are recognized and configurable
/// here so a richer engine behind the same seam can resolve them against
/// the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// A keyword name the engine does not recognize.
    UnknownKeyword,
    /// Free text where a keyword was expected.
    RandomText,
    /// A stray record terminator with no open keyword.
    RandomSlash,
    /// A required dimension keyword is missing.
    MissingDimsKeyword,
    /// Trailing data beyond what an entry may carry.
    ExtraData,
    /// An include target that cannot be found.
    MissingInclude,
    /// Unsupported geometry modifier in a schedule section.
    UnsupportedScheduleGeoModifier,
    /// Unsupported completion ordering type.
    UnsupportedCompordType,
    /// Unsupported initial threshold pressure option.
    UnsupportedInitialThpres,
    /// Unsupported terminate-if-BHP option.
    UnsupportedTerminateIfBhp,
    /// Internal error: uninitialized threshold pressure.
    InternalErrorUninitializedThpres,
    /// Summary references an unknown well.
    SummaryUnknownWell,
    /// Summary references an unknown group.
    SummaryUnknownGroup,
}

impl EventKind {
    /// The wire name of this event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnknownKeyword => "PARSE_UNKNOWN_KEYWORD",
            Self::RandomText => "PARSE_RANDOM_TEXT",
            Self::RandomSlash => "PARSE_RANDOM_SLASH",
            Self::MissingDimsKeyword => "PARSE_MISSING_DIMS_KEYWORD",
            Self::ExtraData => "PARSE_EXTRA_DATA",
            Self::MissingInclude => "PARSE_MISSING_INCLUDE",
            Self::UnsupportedScheduleGeoModifier => "UNSUPPORTED_SCHEDULE_GEO_MODIFIER",
            Self::UnsupportedCompordType => "UNSUPPORTED_COMPORD_TYPE",
            Self::UnsupportedInitialThpres => "UNSUPPORTED_INITIAL_THPRES",
            Self::UnsupportedTerminateIfBhp => "UNSUPPORTED_TERMINATE_IF_BHP",
            Self::InternalErrorUninitializedThpres => "INTERNAL_ERROR_UNINITIALIZED_THPRES",
            Self::SummaryUnknownWell => "SUMMARY_UNKNOWN_WELL",
            Self::SummaryUnknownGroup => "SUMMARY_UNKNOWN_GROUP",
        }
    }

    /// Look an event kind up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PARSE_UNKNOWN_KEYWORD" => Some(Self::UnknownKeyword),
            "PARSE_RANDOM_TEXT" => Some(Self::RandomText),
            "PARSE_RANDOM_SLASH" => Some(Self::RandomSlash),
            "PARSE_MISSING_DIMS_KEYWORD" => Some(Self::MissingDimsKeyword),
            "PARSE_EXTRA_DATA" => Some(Self::ExtraData),
            "PARSE_MISSING_INCLUDE" => Some(Self::MissingInclude),
            "UNSUPPORTED_SCHEDULE_GEO_MODIFIER" => Some(Self::UnsupportedScheduleGeoModifier),
            "UNSUPPORTED_COMPORD_TYPE" => Some(Self::UnsupportedCompordType),
            "UNSUPPORTED_INITIAL_THPRES" => Some(Self::UnsupportedInitialThpres),
            "UNSUPPORTED_TERMINATE_IF_BHP" => Some(Self::UnsupportedTerminateIfBhp),
            "INTERNAL_ERROR_UNINITIALIZED_THPRES" => {
                Some(Self::InternalErrorUninitializedThpres)
            }
            "SUMMARY_UNKNOWN_WELL" => Some(Self::SummaryUnknownWell),
            "SUMMARY_UNKNOWN_GROUP" => Some(Self::SummaryUnknownGroup),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-event-kind actions. Unconfigured kinds resolve to [`Action::Throw`].
#[derive(Debug, Clone, Default)]
pub struct RecoveryPolicy {
    actions: IndexMap<EventKind, Action>,
}

impl RecoveryPolicy {
    /// A policy where every event is fatal.
    pub fn new() -> Self {
        RecoveryPolicy::default()
    }

    /// Configure an action, builder-style.
    pub fn with(mut self, kind: EventKind, action: Action) -> Self {
        self.actions.insert(kind, action);
        self
    }

    /// Configure an action.
    pub fn set(&mut self, kind: EventKind, action: Action) {
        self.actions.insert(kind, action);
    }

    /// Configure an action by wire name. Unrecognized names are a
    /// configuration error.
    pub fn set_by_name(&mut self, name: &str, action: Action) -> Result<(), ParseError> {
        let kind = EventKind::from_name(name).ok_or_else(|| ParseError::UnknownEventKind {
            name: String::from(name),
        })?;
        self.set(kind, action);
        Ok(())
    }

    /// The action configured for `kind`.
    pub fn action_for(&self, kind: EventKind) -> Action {
        self.actions.get(&kind).copied().unwrap_or_default()
    }

    /// Resolve a raised event against this policy.
    ///
    /// `Ok(())` means the engine should continue; `Warn` has already been
    /// logged by the time this returns.
    pub(crate) fn resolve(
        &self,
        kind: EventKind,
        line: usize,
        message: &str,
    ) -> Result<(), ParseError> {
        match self.action_for(kind) {
            Action::Throw => Err(ParseError::Event {
                kind,
                line,
                message: String::from(message),
            }),
            Action::Warn => {
                log::warn!("{} at line {}: {}", kind.name(), line, message);
                Ok(())
            }
            Action::Ignore => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_throw() {
        let policy = RecoveryPolicy::new();
        assert_eq!(policy.action_for(EventKind::RandomSlash), Action::Throw);
    }

    #[test]
    fn test_configured_action() {
        let policy = RecoveryPolicy::new().with(EventKind::RandomSlash, Action::Ignore);
        assert_eq!(policy.action_for(EventKind::RandomSlash), Action::Ignore);
        assert_eq!(policy.action_for(EventKind::RandomText), Action::Throw);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in [
            EventKind::UnknownKeyword,
            EventKind::RandomText,
            EventKind::RandomSlash,
            EventKind::MissingDimsKeyword,
            EventKind::ExtraData,
            EventKind::MissingInclude,
            EventKind::UnsupportedScheduleGeoModifier,
            EventKind::UnsupportedCompordType,
            EventKind::UnsupportedInitialThpres,
            EventKind::UnsupportedTerminateIfBhp,
            EventKind::InternalErrorUninitializedThpres,
            EventKind::SummaryUnknownWell,
            EventKind::SummaryUnknownGroup,
        ] {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_name_is_config_error() {
        let mut policy = RecoveryPolicy::new();
        assert!(policy
            .set_by_name("PARSE_RANDOM_SLASH", Action::Warn)
            .is_ok());
        assert!(policy.set_by_name("NO_SUCH_EVENT", Action::Warn).is_err());
    }
}
