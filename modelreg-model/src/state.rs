//! Lifecycle state enums and their validating parser.
//!
//! Every member is its own wire string, so writing is the identity. Reading
//! is where the rules live: an unknown string is always rejected, while an
//! absent value is either "no authoritative state" or, for artifact state and
//! execution last-known-state only, the declared `UNKNOWN` default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing a lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("invalid {enum_name} value {value:?}, expected one of {expected}")]
    Invalid {
        enum_name: &'static str,
        value: String,
        expected: String,
    },
}

/// A closed set of wire strings.
pub trait WireEnum: Sized + Copy + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Every declared member.
    const MEMBERS: &'static [Self];

    /// The member's wire string.
    fn as_wire(self) -> &'static str;

    /// Parses a wire string, rejecting anything that is not a declared member.
    fn parse(raw: &str) -> Result<Self, StateError> {
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.as_wire() == raw)
            .ok_or_else(|| StateError::Invalid {
                enum_name: Self::NAME,
                value: raw.to_string(),
                expected: Self::MEMBERS
                    .iter()
                    .map(|m| m.as_wire())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Parses an optional wire string; absence stays absent.
    fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, StateError> {
        raw.map(Self::parse).transpose()
    }
}

/// A [`WireEnum`] whose contract maps absence to a defined member.
pub trait WireEnumWithDefault: WireEnum {
    /// The member an absent value stands for.
    const ABSENT: Self;

    /// Parses an optional wire string; absence yields [`Self::ABSENT`], an
    /// invalid string still fails.
    fn parse_or_default(raw: Option<&str>) -> Result<Self, StateError> {
        raw.map_or(Ok(Self::ABSENT), Self::parse)
    }
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [Self] = &[$(Self::$variant),+];

            fn as_wire(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_wire())
            }
        }

        impl FromStr for $name {
            type Err = StateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as WireEnum>::parse(s)
            }
        }
    };
}

wire_enum! {
    /// Registered model lifecycle. Absence is not defaulted.
    RegisteredModelState {
        Live => "LIVE",
        Archived => "ARCHIVED",
    }
}

wire_enum! {
    /// Model version lifecycle. Absence is not defaulted.
    ModelVersionState {
        Live => "LIVE",
        Archived => "ARCHIVED",
    }
}

wire_enum! {
    /// Artifact lifecycle, mirroring the graph store's artifact state column.
    ArtifactState {
        Unknown => "UNKNOWN",
        Pending => "PENDING",
        Live => "LIVE",
        MarkedForDeletion => "MARKED_FOR_DELETION",
        Deleted => "DELETED",
        Abandoned => "ABANDONED",
        Reference => "REFERENCE",
    }
}

impl WireEnumWithDefault for ArtifactState {
    const ABSENT: Self = Self::Unknown;
}

wire_enum! {
    /// Last known state of an execution (serve model).
    ExecutionState {
        Unknown => "UNKNOWN",
        New => "NEW",
        Running => "RUNNING",
        Complete => "COMPLETE",
        Failed => "FAILED",
        Cached => "CACHED",
        Canceled => "CANCELED",
    }
}

impl WireEnumWithDefault for ExecutionState {
    const ABSENT: Self = Self::Unknown;
}

wire_enum! {
    /// Desired deployment state of an inference service.
    InferenceServiceState {
        Deployed => "DEPLOYED",
        Undeployed => "UNDEPLOYED",
    }
}

wire_enum! {
    ExperimentState {
        Live => "LIVE",
        Archived => "ARCHIVED",
    }
}

wire_enum! {
    ExperimentRunState {
        Live => "LIVE",
        Archived => "ARCHIVED",
    }
}

wire_enum! {
    ExperimentRunStatus {
        Scheduled => "SCHEDULED",
        Running => "RUNNING",
        Finished => "FINISHED",
        Failed => "FAILED",
        Killed => "KILLED",
    }
}
