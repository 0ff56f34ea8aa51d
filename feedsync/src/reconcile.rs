use alloc::string::String;
use alloc::vec::Vec;

use crate::{EngagementKind, ItemId, ItemStore};

/// Identifier of one in-flight engagement report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RequestId(pub u64);

/// A report the adapter must put on the wire.
///
/// The round trip is best-effort: on failure the report is logged and
/// dropped, never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutboundReport {
    pub request: RequestId,
    pub item: ItemId,
    pub kind: EngagementKind,
}

/// Wire shape of the like-mutation response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LikeResponse {
    pub success: bool,
    pub new_likes: u64,
}

impl LikeResponse {
    pub fn into_outcome(self) -> Result<u64, ServiceError> {
        if self.success {
            Ok(self.new_likes)
        } else {
            Err(ServiceError::Rejected)
        }
    }
}

/// Wire shape of the view-mutation response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewResponse {
    pub success: bool,
    pub new_views: u64,
}

impl ViewResponse {
    pub fn into_outcome(self) -> Result<u64, ServiceError> {
        if self.success {
            Ok(self.new_views)
        } else {
            Err(ServiceError::Rejected)
        }
    }
}

/// Why a round trip produced no confirmed value.
///
/// Engagement counting is not safety-critical: both variants degrade to
/// "stale but consistent" local state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The transport layer failed before a payload arrived.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with `success: false`.
    #[error("mutation rejected by the engagement service")]
    Rejected,
}

/// A confirmed counter merge to apply to the rendered card.
///
/// `count` is the post-merge stored value, which replaces any locally
/// assumed (optimistic) number on the card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmedPatch {
    pub item: ItemId,
    pub kind: EngagementKind,
    pub count: u64,
}

/// Two-phase (pending, then confirmed) engagement reconciliation.
///
/// [`Reconciler::begin`] registers a pending report and returns the
/// descriptor the adapter sends to the counting service;
/// [`Reconciler::complete`] resolves it against the store. A failed round
/// trip is logged and dropped with no retry and no rollback of optimistic
/// state, so every report reaches an explicit terminal state: confirmed or
/// dropped.
///
/// Pending reports are independent; several may be in flight for the same
/// item, including the same kind (likes are additive per click; dedup
/// applies to views only, and at the caller).
#[derive(Clone, Debug, Default)]
pub struct Reconciler {
    pending: Vec<OutboundReport>,
    next_request: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of in-flight reports for `(item, kind)`.
    pub fn pending_for(&self, item: ItemId, kind: EngagementKind) -> usize {
        self.pending
            .iter()
            .filter(|p| p.item == item && p.kind == kind)
            .count()
    }

    /// Registers a pending report and returns the wire descriptor.
    pub fn begin(&mut self, item: ItemId, kind: EngagementKind) -> OutboundReport {
        let request = RequestId(self.next_request);
        self.next_request = self.next_request.wrapping_add(1);
        let report = OutboundReport {
            request,
            item,
            kind,
        };
        self.pending.push(report);
        fdebug!(request = request.0, item, ?kind, "engagement report pending");
        report
    }

    /// Resolves an in-flight report.
    ///
    /// Returns the confirmed patch when the service acknowledged the
    /// mutation and the item is still mirrored. Every other outcome
    /// (transport failure, rejection, unknown or already-resolved request,
    /// missing item) is a logged no-op.
    pub fn complete(
        &mut self,
        store: &mut ItemStore,
        request: RequestId,
        outcome: Result<u64, ServiceError>,
    ) -> Option<ConfirmedPatch> {
        let Some(slot) = self.pending.iter().position(|p| p.request == request) else {
            fwarn!(request = request.0, "completion for unknown request");
            return None;
        };
        let report = self.pending.swap_remove(slot);

        let count = match outcome {
            Ok(count) => count,
            Err(err) => {
                fwarn!(
                    request = request.0,
                    item = report.item,
                    error = %err,
                    "engagement report dropped"
                );
                return None;
            }
        };

        let Some(item) = store.apply_confirmed(report.item, report.kind, count) else {
            fwarn!(
                request = request.0,
                item = report.item,
                "confirmation for unknown item"
            );
            return None;
        };

        Some(ConfirmedPatch {
            item: report.item,
            kind: report.kind,
            count: item.count(report.kind),
        })
    }

    /// Resolves a like report from its wire response.
    pub fn complete_like(
        &mut self,
        store: &mut ItemStore,
        request: RequestId,
        response: LikeResponse,
    ) -> Option<ConfirmedPatch> {
        self.complete(store, request, response.into_outcome())
    }

    /// Resolves a view report from its wire response.
    pub fn complete_view(
        &mut self,
        store: &mut ItemStore,
        request: RequestId,
        response: ViewResponse,
    ) -> Option<ConfirmedPatch> {
        self.complete(store, request, response.into_outcome())
    }
}
