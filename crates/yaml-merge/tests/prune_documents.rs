/*
 * prune_documents.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Null pruning on parsed YAML documents.
 */

use pretty_assertions::assert_eq;
use yaml_merge::{merge, prune_nulls};
use yaml_tree::{emit, parse};

struct Case {
    name: &'static str,
    original: &'static str,
    explicit: &'static str,
    implicit: &'static str,
    both: &'static str,
}

fn run(cases: &[Case]) {
    for case in cases {
        for (explicit, implicit, expected) in [
            (true, false, case.explicit),
            (false, true, case.implicit),
            (true, true, case.both),
        ] {
            let mut doc = parse(case.original).unwrap();
            prune_nulls(&mut doc, explicit, implicit);
            assert_eq!(
                emit(&doc),
                emit(&parse(expected).unwrap()),
                "{} (explicit: {explicit}, implicit: {implicit})",
                case.name
            );
        }
    }
}

#[test]
fn test_prune_tables() {
    run(&[
        Case {
            name: "null scalar",
            original: "null",
            explicit: "",
            implicit: "null",
            both: "",
        },
        Case {
            name: "to empty doc",
            original: "foo:\n  - null",
            explicit: "",
            implicit: "foo:\n  - null",
            both: "",
        },
        Case {
            name: "null nodes",
            original: r#"
a:
b:
  a:
  x: 1
  b:
    c: 5
  b: null
foo:
  a:
bar:
  a: null
  b:
    c:
g: null
"#,
            explicit: r#"
a:
b:
  a:
  x: 1
  b:
    c: 5
foo:
  a:
bar:
  b:
    c:
"#,
            implicit: r#"
b:
  x: 1
  b:
    c: 5
  b: null
bar:
  a: null
g: null
"#,
            both: r#"
b:
  x: 1
  b:
    c: 5
"#,
        },
    ]);
}

#[test]
fn test_emptied_document_becomes_absent() {
    let mut doc = parse("a:\n  b:\n    - ~\n").unwrap();
    prune_nulls(&mut doc, true, false);
    assert!(doc.is_absent());
    assert_eq!(emit(&doc), "");
}

#[test]
fn test_pruning_is_idempotent() {
    let text = "a: 1\nb:\nc:\n  - null\n  - 2\nd: {e: ~}\n";
    for (explicit, implicit) in [(true, false), (false, true), (true, true)] {
        let mut doc = parse(text).unwrap();
        prune_nulls(&mut doc, explicit, implicit);
        let once = doc.clone();
        prune_nulls(&mut doc, explicit, implicit);
        assert_eq!(doc, once);
    }
}

#[test]
fn test_overlay_deletes_keys() {
    let mut base = parse("keep: 1\nremove: 2\nnested:\n  drop: 3\n").unwrap();
    let overlay = parse("remove: null\nnested:\n  drop: null\n").unwrap();

    merge(&mut base, overlay).unwrap();
    prune_nulls(&mut base, true, false);

    assert_eq!(emit(&base), "keep: 1\n");
}
