//! End-to-end flows through a session: rollback, text buffer, config.

use rdfg_core::QuadPattern;
use rdfg_mutation::{DeletionTarget, PlanError};
use rdfg_session::{Session, SessionError};
use rdfg_store::QuadStore;
use rdfg_tests::prelude::*;

/// t_p1 details p1 and places p2; p3 is unused.
fn editor() -> Fixture {
    Fixture::new()
        .concept("p1", Some("Top"))
        .diagram("t_p1", "p1")
        .concept("p2", None)
        .child_of("p2", "p1")
        .concept("p3", Some("Unused"))
        .individual("p2", "t_p1")
}

mod rollback {
    use super::*;

    const OPS: &str = r#"
--# delete_unused
delete concept-process vad:p3

--# retry
delete concept-process vad:p3
"#;

    #[test]
    fn test_failed_apply_restores_removed_quads() {
        // GIVEN a store rejecting the second removal
        let fixture = editor();
        let before = fixture.build().unwrap().quads(&QuadPattern::any()).unwrap();
        let store = FlakyStore::new(fixture.build().unwrap()).fail_write(1, Fault::Rejected);
        let mut session = Session::new(store, fixture.vocabulary().clone());

        // WHEN deleting p3, then retrying once the store behaves
        Scenario::new("failed_apply")
            .operations_source(OPS)
            .unwrap()
            .step("delete_unused", |a| {
                a.error("Store operation failed").graph("vad:ptree", 7)
            })
            .step("retry", |a| a.deleted().removed(2).graph("vad:ptree", 5))
            .run_on(&mut session)
            .unwrap();

        // THEN the failed attempt left no trace before the retry
        let after_retry = session.store().inner().quads(&QuadPattern::any()).unwrap();
        assert_eq!(after_retry.len(), before.len() - 2 + 3);
    }

    #[test]
    fn test_unavailable_recompute_rolls_back_the_deletion() {
        // GIVEN a store that goes away on the first write of the recompute
        let fixture = editor();
        let store = FlakyStore::new(fixture.build().unwrap()).fail_write(2, Fault::Unavailable);
        let mut session = Session::new(store, fixture.vocabulary().clone());

        // WHEN deleting p3
        let err = session
            .delete(&DeletionTarget::concept_process(fixture.term("p3")))
            .unwrap_err();

        // THEN the error is reported as unavailable AND p3 is back
        assert!(err.is_unavailable());
        let p3 = session
            .store()
            .quads(&QuadPattern::any().subject(fixture.term("p3")))
            .unwrap();
        assert_eq!(p3.len(), 2);
        // the recompute after the rollback rebuilt vt_p1
        assert_eq!(session.store().inner().graph_len(&fixture.graph("vt_p1")), 3);
    }

    #[test]
    fn test_quads_lost_in_rollback_are_reported() {
        // GIVEN a store that stops accepting writes once p3 is removed
        let fixture = editor();
        let store = FlakyStore::new(fixture.build().unwrap()).fail_writes_from(2);
        let mut session = Session::new(store, fixture.vocabulary().clone());

        // WHEN deleting p3
        let err = session
            .delete(&DeletionTarget::concept_process(fixture.term("p3")))
            .unwrap_err();

        // THEN the error names the two quads the rollback could not restore
        match err {
            SessionError::Plan(PlanError::RollbackIncomplete { unrestored, .. }) => {
                assert_eq!(unrestored.len(), 2);
                assert!(unrestored.iter().all(|q| q.subject == fixture.term("p3")));
            }
            other => panic!("expected an incomplete rollback, got {:?}", other),
        }
        let p3 = session
            .store()
            .quads(&QuadPattern::any().subject(fixture.term("p3")))
            .unwrap();
        assert!(p3.is_empty());
    }

    #[test]
    fn test_offline_store_is_not_reported_as_blocked() {
        let fixture = editor();
        let mut store = FlakyStore::new(fixture.build().unwrap());
        store.set_offline(true);
        let mut session = Session::new(store, fixture.vocabulary().clone());

        let err = session
            .delete(&DeletionTarget::concept_process(fixture.term("p1")))
            .unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(session.store().writes(), 0);
    }
}

mod text_buffer {
    use super::*;

    const TRIG: &str = r#"@prefix vad: <http://example.org/vad#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

vad:ptree {
    vad:p1 a vad:TypeProcess ;
        rdfs:label "Top" ;
        vad:hasTrig vad:t_p1 .

    # unused concept
    vad:p3 a vad:TypeProcess ;
        rdfs:label "Unused" .
}
"#;

    #[test]
    fn test_structural_delete_then_text_edit() {
        // GIVEN p3 in the store and in the text buffer
        let fixture = editor();
        let mut session = fixture.session().unwrap();
        let p3 = fixture.term("p3");

        // WHEN it is deleted from the store and from the text
        let outcome = session
            .delete(&DeletionTarget::concept_process(p3.clone()))
            .unwrap();
        let text = session.remove_from_text(TRIG, &p3).unwrap();

        // THEN p3's block and its comment are gone AND the graph still closes
        assert!(outcome.is_deleted());
        assert!(!text.contains("vad:p3"));
        assert!(!text.contains("# unused concept"));
        assert!(text.contains("vad:hasTrig vad:t_p1 .\n\n}"));
        assert_eq!(text.matches('}').count(), TRIG.matches('}').count());
    }
}

mod config {
    use super::*;
    use rdfg_store::MemoryStore;

    #[test]
    fn test_session_uses_configured_namespace() {
        // GIVEN a vocabulary in another namespace
        let config = r#"
            namespace = "http://acme.test/bp#"
            process_tree = "http://acme.test/bp#ptree"
            executor_tree = "http://acme.test/bp#rtree"
            type_process = "http://acme.test/bp#TypeProcess"
            type_executor = "http://acme.test/bp#TypeExecutor"
            diagram_type = "http://acme.test/bp#VADProcessDia"
            executor_group = "http://acme.test/bp#ExecutorGroup"
            is_subprocess_trig = "http://acme.test/bp#isSubprocessTrig"
            includes = "http://acme.test/bp#includes"
            has_executor = "http://acme.test/bp#hasExecutor"
            has_parent_obj = "http://acme.test/bp#hasParentObj"
            has_trig = "http://acme.test/bp#hasTrig"
            defines_process = "http://acme.test/bp#definesProcess"
            virtual_type = "http://acme.test/bp#Virtual"
            process_subtype = "http://acme.test/bp#processSubtype"
            not_defined = ["http://acme.test/bp#pNotDefined"]
        "#;
        let vocab = Session::from_toml(MemoryStore::new(), config)
            .unwrap()
            .vocabulary()
            .clone();
        let fixture = Fixture::with_vocabulary(vocab)
            .concept("p1", None)
            .diagram("t_p1", "p1")
            .concept("p2", None)
            .individual("p2", "t_p1");
        let mut session = fixture.session().unwrap();

        // WHEN recomputing
        session.recompute().unwrap();

        // THEN the virtual graph is named in that namespace
        let vt = fixture.graph("vt_p1");
        assert_eq!(vt.as_iri(), Some("http://acme.test/bp#vt_p1"));
        assert_eq!(session.store().graph_len(&vt), 3);
    }
}
