//! Statement block removal over generated TriG documents.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rdfg_text::{collapse_blank_runs, remove_subject_block, TextBlockEditor};

const SUBJECTS: [&str; 4] = ["vad:a", "vad:b", "vad:bb", "vad:c"];

#[derive(Debug, Clone)]
struct Block {
    subject: usize,
    predicates: usize,
    commented: bool,
}

fn block() -> impl Strategy<Value = Block> {
    (0..SUBJECTS.len(), 1usize..4, any::<bool>()).prop_map(|(subject, predicates, commented)| Block {
        subject,
        predicates,
        commented,
    })
}

/// Render a document. Blocks for which `keep` is false are left out,
/// except for the blank line that follows every block.
fn render(blocks: &[Block], in_graph: bool, keep: impl Fn(&Block) -> bool) -> String {
    let indent = if in_graph { "    " } else { "" };
    let mut lines = vec!["@prefix vad: <http://example.org/vad#> .".to_string(), String::new()];
    if in_graph {
        lines.push("vad:g {".to_string());
    }
    for (i, b) in blocks.iter().enumerate() {
        if keep(b) {
            if b.commented {
                lines.push(format!("{}# note {}", indent, i));
            }
            let first_end = if b.predicates == 1 { "." } else { ";" };
            lines.push(format!("{}{} a vad:T {}", indent, SUBJECTS[b.subject], first_end));
            for p in 1..b.predicates {
                let end = if p + 1 == b.predicates { "." } else { ";" };
                lines.push(format!("{}    vad:p{} \"v {}\" {}", indent, p, i, end));
            }
        }
        lines.push(String::new());
    }
    if in_graph {
        lines.push("}".to_string());
    }
    lines.join("\n")
}

proptest! {
    #[test]
    fn prop_removes_exactly_the_subject_blocks(
        blocks in proptest::collection::vec(block(), 0..12),
        in_graph in any::<bool>(),
    ) {
        let document = render(&blocks, in_graph, |_| true);
        let expected = render(&blocks, in_graph, |b| SUBJECTS[b.subject] != "vad:b");

        let edited = remove_subject_block(&document, "vad:b").unwrap();

        prop_assert_eq!(&edited, &expected);
        prop_assert_eq!(edited.matches('}').count(), document.matches('}').count());
    }

    #[test]
    fn prop_removal_is_idempotent(
        blocks in proptest::collection::vec(block(), 0..12),
        in_graph in any::<bool>(),
    ) {
        let editor = TextBlockEditor::new("vad:c").unwrap();
        let once = editor.remove_block(&render(&blocks, in_graph, |_| true));

        prop_assert_eq!(editor.remove_block(&once), once.clone());
    }
}

#[test]
fn test_shorthand_example() {
    // GIVEN a document with a commented, chained ns:b block
    let text = "ns:a rdf:type ns:T ;\n    rdfs:label \"A\" .\n# note\nns:b rdf:type ns:T ;\n    rdfs:label \"B\" ;\n    ns:parent ns:a .\nns:c rdf:type ns:T .";

    // WHEN removing ns:b
    let edited = remove_subject_block(text, "ns:b").unwrap();

    // THEN the neighbours are byte-identical
    assert_eq!(
        edited,
        "ns:a rdf:type ns:T ;\n    rdfs:label \"A\" .\nns:c rdf:type ns:T ."
    );
}

#[test]
fn test_cleanup_after_removal() {
    let text = "vad:a a vad:T .\n\nvad:b a vad:T .\n\nvad:c a vad:T .";

    let edited = collapse_blank_runs(&remove_subject_block(text, "vad:b").unwrap());

    assert_eq!(edited, "vad:a a vad:T .\n\nvad:c a vad:T .");
}
