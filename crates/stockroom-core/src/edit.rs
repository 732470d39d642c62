//! # Edit Session
//!
//! State machine behind the single-field edit modal.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Edit Session Lifecycle                           │
//! │                                                                         │
//! │  ┌────────┐   open(P, F)    ┌──────────────────────────┐               │
//! │  │ Closed │ ──────────────► │ Open(P.id, F, P[F])      │ ◄──┐          │
//! │  └────────┘                 └──────┬──────────┬────────┘    │          │
//! │      ▲  ▲                          │          │   set_candidate(V)      │
//! │      │  │         cancel()         │          └─────────────┘          │
//! │      │  └──────────────────────────┘                                    │
//! │      │                             │ begin_commit()                     │
//! │      │                             ▼                                    │
//! │      │                   ┌──────────────────┐                           │
//! │      └── finish_commit ─ │ Committing(P, F) │ ──► EditCommit{id, patch} │
//! │                          └──────────────────┘        │                  │
//! │                                                      ▼                  │
//! │                                            SyncEngine::update           │
//! │                                                                         │
//! │  The session closes BEFORE the update result is known. A failed        │
//! │  update shows up as an error banner, the modal does not reopen.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each session targets exactly one field of one product. Nothing survives
//! across sessions.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{EditField, Product, ProductId, ProductPatch};

/// Update request produced by committing an edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub product_id: ProductId,
    pub field: EditField,
    pub patch: ProductPatch,
}

/// Edit modal state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum EditSession {
    /// No modal is shown.
    #[default]
    Closed,

    /// Modal shown for one field of one product.
    Open {
        product_id: ProductId,
        /// Shown as "Editing: {name}" in the modal.
        product_name: String,
        field: EditField,
        /// Text being edited; parsed only on commit.
        candidate: String,
    },

    /// Patch built, about to be handed to the sync engine.
    Committing {
        product_id: ProductId,
        field: EditField,
    },
}

impl EditSession {
    /// Opens a session for `field` of `product`, seeded with its current value.
    ///
    /// Any session already open is replaced.
    pub fn open(&mut self, product: &Product, field: EditField) {
        *self = EditSession::Open {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            field,
            candidate: field.current_value(product),
        };
    }

    /// Replaces the candidate text.
    pub fn set_candidate(&mut self, text: impl Into<String>) -> CoreResult<()> {
        match self {
            EditSession::Open { candidate, .. } => {
                *candidate = text.into();
                Ok(())
            }
            _ => Err(CoreError::NoActiveEdit),
        }
    }

    /// Discards the session without sending anything.
    pub fn cancel(&mut self) {
        *self = EditSession::Closed;
    }

    /// Moves `Open` to `Committing` and returns the update to send.
    ///
    /// ## Errors
    /// - [`CoreError::NoActiveEdit`] if the session is not open
    /// - [`CoreError::Validation`] if a quantity candidate is not a whole
    ///   number; the session stays open so the text can be corrected
    pub fn begin_commit(&mut self) -> CoreResult<EditCommit> {
        let (product_id, field, candidate) = match self {
            EditSession::Open {
                product_id,
                field,
                candidate,
                ..
            } => (product_id.clone(), *field, candidate.clone()),
            _ => return Err(CoreError::NoActiveEdit),
        };

        let patch = field.build_patch(&candidate)?;

        *self = EditSession::Committing {
            product_id: product_id.clone(),
            field,
        };

        Ok(EditCommit {
            product_id,
            field,
            patch,
        })
    }

    /// Closes the session after a commit was handed off.
    pub fn finish_commit(&mut self) {
        if matches!(self, EditSession::Committing { .. }) {
            *self = EditSession::Closed;
        }
    }

    /// True while the modal is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open { .. })
    }

    /// Field targeted by the session, if any.
    pub fn field(&self) -> Option<EditField> {
        match self {
            EditSession::Open { field, .. } | EditSession::Committing { field, .. } => Some(*field),
            EditSession::Closed => None,
        }
    }

    /// Current candidate text while open.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            EditSession::Open { candidate, .. } => Some(candidate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn widget() -> Product {
        Product::new(ProductId::from("p-1"), "Widget", "W1", 5, "desc")
    }

    #[test]
    fn test_open_seeds_candidate_with_current_value() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Quantity);
        assert!(session.is_open());
        assert_eq!(session.candidate(), Some("5"));
        assert_eq!(session.field(), Some(EditField::Quantity));

        session.open(&widget(), EditField::Sku);
        assert_eq!(session.candidate(), Some("W1"));
    }

    #[test]
    fn test_set_candidate_requires_open_session() {
        let mut session = EditSession::default();
        assert!(matches!(
            session.set_candidate("7"),
            Err(CoreError::NoActiveEdit)
        ));
    }

    #[test]
    fn test_commit_builds_single_field_patch_and_closes() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Quantity);
        session.set_candidate("12").unwrap();

        let commit = session.begin_commit().unwrap();
        assert_eq!(commit.product_id, ProductId::from("p-1"));
        assert_eq!(commit.patch, ProductPatch::quantity(12));
        assert!(matches!(session, EditSession::Committing { .. }));

        session.finish_commit();
        assert_eq!(session, EditSession::Closed);
    }

    #[test]
    fn test_negative_quantity_is_not_rejected() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Quantity);
        session.set_candidate("-3").unwrap();
        assert_eq!(session.begin_commit().unwrap().patch, ProductPatch::quantity(-3));
    }

    #[test]
    fn test_unparseable_quantity_keeps_session_open() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Quantity);
        session.set_candidate("many").unwrap();

        let err = session.begin_commit().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotANumber { .. })
        ));
        assert!(session.is_open());
        assert_eq!(session.candidate(), Some("many"));
    }

    #[test]
    fn test_cancel_discards_candidate() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Description);
        session.set_candidate("changed").unwrap();
        session.cancel();
        assert_eq!(session, EditSession::Closed);
        assert!(matches!(session.begin_commit(), Err(CoreError::NoActiveEdit)));
    }

    #[test]
    fn test_session_serializes_with_state_tag() {
        let mut session = EditSession::default();
        session.open(&widget(), EditField::Sku);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["state"], "open");
        assert_eq!(json["field"], "sku");
        assert_eq!(json["candidate"], "W1");
    }
}
