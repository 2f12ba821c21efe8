//! Matching note sets against candidates, unique solutions and membership.

mod common;

use chord_tree::{
    exists, exists_in, filtered_catalog, identify, membership, solution, ChordError, ChordTree,
    Identifier, NoteError, PitchClass, Query,
};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rstest::rstest;

#[rstest]
#[case(&["C", "E", "G"], "Major", "C/E/G")]
#[case(&["C", "Eb", "Gb"], "Diminished", "C/Eb/Gb")]
#[case(&["C", "D#", "F#"], "Diminished", "C/Eb/Gb")]
#[case(&["G", "Eb"], "Minor", "C/Eb/G")]
#[case(&["G#"], "Augmented", "C/E/G#")]
#[case(&["Ab", "E", "C", "C"], "Augmented", "C/E/G#")]
fn triads_on_c_resolve_uniquely(
    #[case] notes: &[&str],
    #[case] label: &str,
    #[case] chord: &str,
) {
    common::init_test_setup();
    let found = identify("C", notes, 3).unwrap();
    let unique = found.unique_solution.expect("unique solution");
    assert_eq!(unique.label, label);
    assert_eq!(unique.chord.as_deref(), Some(chord));
}

#[rstest]
#[case(&["C", "E"], &["Major", "Augmented"])]
#[case(&["C", "Eb"], &["Diminished", "Minor"])]
#[case(&["G"], &["Minor", "Major"])]
#[case(&["C"], &["Diminished", "Minor", "Major", "Augmented"])]
#[case(&["D"], &[])]
#[case(&["C", "E", "Eb"], &[])]
fn ambiguous_or_missing_sets_have_no_solution(#[case] notes: &[&str], #[case] matched: &[&str]) {
    let found = identify("C", notes, 3).unwrap();
    assert!(found.unique_solution.is_none());
    let labels: Vec<_> = found.matches().map(|r| r.label).collect();
    assert_eq!(labels, matched);
}

#[test]
fn labeled_results_keep_every_slot() {
    let found = identify("C", ["C", "E"], 3).unwrap();
    let slots: Vec<_> = found
        .labeled_results
        .iter()
        .map(|r| (r.label, r.chord.as_deref()))
        .collect();
    assert_eq!(
        slots,
        [
            ("Diminished", None),
            ("Minor", None),
            ("Major", Some("C/E/G")),
            ("Augmented", Some("C/E/G#")),
        ]
    );
    assert_eq!(found.to_string(), "Major: C/E/G\nAugmented: C/E/G#\n");
}

#[test]
fn seventh_chords_at_depth_four() {
    let found = identify("C", ["C", "E", "G", "Bb"], 4).unwrap();
    let unique = found.unique_solution.unwrap();
    assert_eq!(unique.label, "Dominant 7th");
    assert_eq!(unique.chord.as_deref(), Some("C/E/G/Bb"));

    let found = identify("C", ["C", "E", "G"], 4).unwrap();
    assert!(found.unique_solution.is_none());
    assert_eq!(found.matches().count(), 2);
}

#[test]
fn depth_one_and_two_labels() {
    let found = identify("A", ["A"], 1).unwrap();
    assert_eq!(found.unique_solution.unwrap().label, "Note");

    let found = identify("A", ["C"], 2).unwrap();
    let unique = found.unique_solution.unwrap();
    assert_eq!(unique.label, "Minor 3rd");
    assert_eq!(unique.chord.as_deref(), Some("A/C"));
}

#[test]
fn separator_is_configurable() {
    let identifier = Identifier::builder().depth(3).separator(" - ").build().unwrap();
    let found = identifier.identify("D", ["D", "F#", "A"]).unwrap();
    assert_eq!(found.unique_solution.unwrap().chord.as_deref(), Some("D - F# - A"));
}

#[test]
fn errors_are_reported() {
    assert_eq!(
        identify("H", ["C"], 3),
        Err(ChordError::UnrecognizedNote(NoteError::UnrecognizedNote {
            name: "H".to_string()
        }))
    );
    assert!(matches!(
        identify("C", ["C", "X"], 3),
        Err(ChordError::UnrecognizedNote(_))
    ));
    assert_eq!(
        identify("C", Vec::<&str>::new(), 3),
        Err(ChordError::EmptyQuery)
    );
    for depth in [0, 5] {
        assert_eq!(
            identify("C", ["C"], depth),
            Err(ChordError::UnsupportedDepth {
                depth,
                min: 1,
                max: 4
            })
        );
    }
    assert!(membership(Vec::<String>::new(), "C", 3).is_err());
}

#[test]
fn catalog_never_matches_empty_or_unparsed_queries() {
    let tree = ChordTree::new("C", 3).unwrap();
    for query in [Query::default(), Query::lenient(["C", "E", "Q"])] {
        let slots = filtered_catalog(&tree, &query);
        assert_eq!(slots.len(), 4);
        assert!(slots.iter().all(|s| !s.is_match()));
        assert!(solution(&tree, &query).is_none());
        assert!(!exists_in(&tree, &query));
    }
    assert_eq!(Query::lenient(["C", "Q"]).unrecognized(), ["Q"]);
}

#[test]
fn query_collapses_enharmonic_duplicates() {
    let query = Query::parse(["C#", "Db", "C#"]).unwrap();
    assert_eq!(query.len(), 1);
    assert!(query.contains(PitchClass::resolve("Db").unwrap()));
}

#[test]
fn every_triad_is_found_from_its_own_notes() {
    common::init_test_setup();
    PitchClass::ALL.into_par_iter().for_each(|root| {
        let name = root.flat_side();
        let tree = ChordTree::new(name, 3).unwrap();
        for candidate in chord_tree::enumerate_candidates(&tree) {
            let notes: Vec<_> = candidate.notes().iter().map(|n| n.name()).collect();
            let found = identify(name, &notes, 3).unwrap();
            let unique = found.unique_solution.unwrap();
            assert_eq!(Some(unique.label), candidate.label());
            assert!(membership(&notes, name, 3).unwrap());
        }
    });
}

#[rstest]
#[case(&["C", "E", "G"], true)]
#[case(&["C", "Eb", "Gb", "A"], true)]
#[case(&["C", "E", "B"], true)]
#[case(&["C", "F"], false)]
#[case(&["D", "F", "A"], false)]
fn membership_on_c_triad_tree(#[case] notes: &[&str], #[case] expected: bool) {
    assert_eq!(membership(notes, "C", 3).unwrap(), expected);
}

#[test]
fn membership_accepts_once_threshold_is_reached() {
    // C-E-G#-C meets C twice, which reaches three hits with only two notes queried
    assert!(membership(["C", "E"], "C", 3).unwrap());

    let tree = ChordTree::new("C", 3).unwrap();
    let query = Query::parse(["C"]).unwrap();
    assert!(exists(&query, tree.root(), 0, 1));
    assert!(exists(&query, tree.root(), 2, 3));
    assert!(!exists(&query, tree.root(), 0, 3));
}

#[test]
fn membership_needs_the_root_branch() {
    assert!(membership(["D"], "C", 1).is_ok_and(|found| !found));
    assert!(membership(["C"], "C", 1).unwrap());
}
