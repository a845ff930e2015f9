// Comprehensive integration tests for types crate

#[cfg(test)]
mod tests {
    use crate::*;

    fn candidate(id: CandidateId, name: &str, party: &str, votes: u64) -> Candidate {
        Candidate {
            id,
            name: name.to_string(),
            party: party.to_string(),
            vote_count: votes,
        }
    }

    #[test]
    fn test_window_classification() {
        assert_eq!(ElectionWindow::from_ledger(0, 0), ElectionWindow::Undefined);

        // A single non-zero field is a defined window, not an unset one
        assert!(ElectionWindow::from_ledger(0, 100).is_defined());
        assert!(ElectionWindow::from_ledger(100, 0).is_defined());

        let window = ElectionWindow::from_ledger(1_700_000_000, 1_700_086_400);
        assert_eq!(window.bounds(), Some((1_700_000_000, 1_700_086_400)));
        assert_eq!(ElectionWindow::Undefined.bounds(), None);
    }

    #[test]
    fn test_registry_ordering() {
        let snapshot = RegistrySnapshot::from_records(vec![
            candidate(3, "Carol", "Green", 2),
            candidate(1, "Alice", "Blue", 5),
            candidate(2, "Bob", "Red", 0),
        ]);

        let ids: Vec<CandidateId> = snapshot.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(snapshot.get(2).map(|c| c.name.as_str()), Some("Bob"));
        assert!(snapshot.contains(3));
        assert!(!snapshot.contains(4));
    }

    #[test]
    fn test_empty_registry() {
        let snapshot = RegistrySnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(!snapshot.contains(1));
    }

    #[test]
    fn test_submission_ref_short_form() {
        let reference = SubmissionRef::new("0xdeadbeefcafebabe");
        assert_eq!(reference.short(), "0xdeadbeef");

        // Short references are returned whole
        let tiny = SubmissionRef::new("0xab");
        assert_eq!(tiny.short(), "0xab");
    }

    #[test]
    fn test_outcome_predicates() {
        let success = SubmissionOutcome::Success(Some(SubmissionRef::new("ref")));
        assert!(success.is_success());
        assert!(!success.is_rejected());

        let reconciled = SubmissionOutcome::Success(None);
        assert!(reconciled.is_success());

        let rejected = SubmissionOutcome::Rejected(RejectReason::InFlight);
        assert!(rejected.is_rejected());
        assert_eq!(rejected.reject_reason(), Some(&RejectReason::InFlight));

        let indeterminate = SubmissionOutcome::Indeterminate("timeout".to_string());
        assert!(indeterminate.is_indeterminate());
    }

    #[test]
    fn test_roundtrip_serialization() {
        let snapshot = RegistrySnapshot::from_records(vec![
            candidate(1, "Alice", "Blue", 5),
            candidate(2, "Bob", "Red", 0),
        ]);

        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: RegistrySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);

        let window = ElectionWindow::Defined {
            start: 100,
            end: 200,
        };
        let json = serde_json::to_string(&window).unwrap();
        let deserialized: ElectionWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, deserialized);
    }

    #[test]
    fn test_ledger_error_display() {
        let rejected = LedgerError::Rejected("unauthorized caller".to_string());
        assert!(rejected.to_string().contains("unauthorized caller"));

        let transport = LedgerError::Transport("connection reset".to_string());
        assert!(transport.to_string().contains("connection reset"));
    }
}
