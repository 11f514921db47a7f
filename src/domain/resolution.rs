// src/domain/resolution.rs
//
// Resolution Domain - the two-hop lookup as value objects.
//
// The pipeline runs  Idle -> ResolvingId -> ResolvingDetails -> Ready
// with the error terminals NoMapping (a legitimate outcome: the title has
// no counterpart in the details catalog) and Failed (the details fetch
// broke). The state machine itself lives in the resolution service; these
// types only describe its positions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::movie::MovieRecord;

/// Output of the identifier bridge. Exists only transiently between the
/// two pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentifier {
    pub external_id: String,
    /// Absent means the bridge found no mapping - not a failure.
    pub internal_id: Option<String>,
}

impl ResolvedIdentifier {
    pub fn mapped(external_id: String, internal_id: String) -> Self {
        Self {
            external_id,
            internal_id: Some(internal_id),
        }
    }

    pub fn unmapped(external_id: String) -> Self {
        Self {
            external_id,
            internal_id: None,
        }
    }

    pub fn is_mapped(&self) -> bool {
        self.internal_id.is_some()
    }
}

/// Why a details fetch ended in `Failed`. Keeps the taxonomy of transient
/// and permanent failures distinguishable inside the terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The internal identifier yields no record.
    NotFound,
    /// Network, DNS, or timeout.
    Transport,
    /// Malformed response payload.
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not_found"),
            FailureKind::Transport => write!(f, "transport"),
            FailureKind::Parse => write!(f, "parse"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub kind: FailureKind,
    pub detail: String,
}

impl ResolutionFailure {
    pub fn not_found(internal_id: &str) -> Self {
        Self {
            kind: FailureKind::NotFound,
            detail: format!("no record for internal id {internal_id}"),
        }
    }

    pub fn transport(detail: String) -> Self {
        Self {
            kind: FailureKind::Transport,
            detail,
        }
    }

    pub fn parse(detail: String) -> Self {
        Self {
            kind: FailureKind::Parse,
            detail,
        }
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Position of one resolution pipeline instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionState {
    Idle,
    ResolvingId,
    ResolvingDetails,
    /// Terminal: holds the fetched record.
    Ready(MovieRecord),
    /// Terminal: the external identifier has no internal counterpart.
    NoMapping,
    /// Terminal: the details fetch failed.
    Failed(ResolutionFailure),
}

impl ResolutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ResolutionState::Ready(_) | ResolutionState::NoMapping | ResolutionState::Failed(_)
        )
    }

    /// True while the presentation layer should show a loading indicator.
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ResolutionState::ResolvingId | ResolutionState::ResolvingDetails
        )
    }

    pub fn record(&self) -> Option<&MovieRecord> {
        match self {
            ResolutionState::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResolutionState::Idle => "idle",
            ResolutionState::ResolvingId => "resolving_id",
            ResolutionState::ResolvingDetails => "resolving_details",
            ResolutionState::Ready(_) => "ready",
            ResolutionState::NoMapping => "no_mapping",
            ResolutionState::Failed(_) => "failed",
        }
    }
}
