#![forbid(unsafe_code)]

//! Reconciliation error taxonomy.
//!
//! Errors never cross the host boundary: the reconciler's public entry
//! points convert every variant into a logged no-op outcome, so one
//! malformed node cannot destabilize the rest of the graph.

/// Why a reconciliation pass could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// A control the algorithm cannot run without is missing from the node.
    #[error("required control `{name}` is missing")]
    MissingControl {
        /// Name of the absent control.
        name: String,
    },

    /// The connector master list no longer matches the host and could not
    /// be recovered.
    #[error("connector master list mismatch: expected {expected} slots, host has {actual}")]
    MasterListMismatch {
        /// Slot count the master list was captured with.
        expected: usize,
        /// Slot count the host currently reports.
        actual: usize,
    },

    /// Reconciliation was requested before the reconciler was attached to
    /// a node.
    #[error("reconciler is not attached to a node")]
    NotAttached,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_control() {
        let err = ReconcileError::MissingControl {
            name: "entry_count".into(),
        };
        assert_eq!(err.to_string(), "required control `entry_count` is missing");
    }

    #[test]
    fn mismatch_reports_both_lengths() {
        let err = ReconcileError::MasterListMismatch {
            expected: 24,
            actual: 20,
        };
        assert!(err.to_string().contains("expected 24"));
        assert!(err.to_string().contains("has 20"));
    }
}
