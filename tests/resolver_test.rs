//! Path resolution against the bundled sample family and small fixtures

use rstest::rstest;

use famtree::application::services::sample_tree;
use famtree::domain::{normalize_name, EquivalenceRule, NameNormalizer, PathResult, Person};
use famtree::util::testing;
use famtree::FamilyTree;

fn sample() -> FamilyTree {
    testing::init_test_setup();
    sample_tree().expect("bundled sample parses")
}

// ============================================================
// Sample family
// ============================================================

#[test]
fn given_root_name_when_resolving_then_path_is_root_only() {
    let tree = sample();
    let result = tree.resolve_path("Kaduji Bhatt");
    assert_eq!(result.path().unwrap(), &["Kaduji Bhatt".to_string()]);
}

#[rstest]
#[case("Mit")]
#[case("Meet")]
#[case("MEET")]
#[case("  mit ")]
fn given_mit_spellings_when_resolving_then_reaches_mit_under_pravinbhai(#[case] query: &str) {
    let tree = sample();
    let result = tree.resolve_path(query);

    let path = result.path().expect("Mit is in the sample");
    assert_eq!(path.len(), 10);
    assert_eq!(path.first().map(String::as_str), Some("Kaduji Bhatt"));
    assert_eq!(path[path.len() - 2], "Pravinbhai Bhatt");
    assert_eq!(result.target(), Some("Mit"));
}

#[rstest]
#[case("Nonexistent Name")]
#[case("")]
#[case("   ")]
#[case("Kaduji")]
fn given_unknown_or_blank_query_when_resolving_then_not_found(#[case] query: &str) {
    let tree = sample();
    assert_eq!(tree.resolve_path(query), PathResult::NotFound);
}

#[test]
fn given_substring_variant_when_resolving_then_whole_name_rewrite_applies() {
    let tree = sample();
    // "amit" contains "mit", so both sides normalize to "ameetbhai bhatt"
    let result = tree.resolve_path("Ameetbhai Bhatt");
    assert_eq!(result.target(), Some("Amitbhai Bhatt"));
}

#[test]
fn given_same_query_when_resolving_twice_then_results_equal() {
    let tree = sample();
    assert_eq!(tree.resolve_path("Hemiben"), tree.resolve_path("Hemiben"));
    assert_eq!(tree.resolve_path("nobody"), tree.resolve_path("nobody"));
}

#[test]
fn given_every_person_when_resolving_own_name_then_target_is_equivalent() {
    let tree = sample();
    for (_, person) in tree.iter() {
        let result = tree.resolve_path(&person.name);
        let target = result.target().expect("every name resolves");
        assert_eq!(normalize_name(target), normalize_name(&person.name));
    }
}

#[test]
fn given_found_path_when_checking_then_each_step_is_parent_of_next() {
    let tree = sample();
    let result = tree.resolve_path("Hemiben");
    let path = result.path().unwrap();

    let mut current = tree.root();
    assert_eq!(current.name, path[0]);
    for name in &path[1..] {
        current = current
            .children
            .iter()
            .find(|c| &c.name == name)
            .expect("next step is a child");
    }
    assert_eq!(current.name, "Hemiben");
}

// ============================================================
// Fixtures and custom rules
// ============================================================

#[test]
fn given_duplicate_names_when_resolving_then_first_preorder_match_wins() {
    let content = std::fs::read_to_string("tests/resources/trees/duplicates.json").unwrap();
    let root: Person = serde_json::from_str(&content).unwrap();
    let tree = FamilyTree::new(root).unwrap();

    let result = tree.resolve_path("twin");
    assert_eq!(
        result.path().unwrap(),
        &["root", "left", "deep", "Twin"].map(String::from)
    );

    let result = tree.resolve_path("mit");
    assert_eq!(result.path().unwrap(), &["root", "Meet"].map(String::from));
}

#[test]
fn given_extra_rule_when_resolving_then_custom_spelling_matches() {
    let tree = FamilyTree::new(Person::with_children(
        "Natharam Bhatt",
        vec![Person::leaf("Chandu bhai Bhatt")],
    ))
    .unwrap();
    let normalizer =
        NameNormalizer::with_extra_rules(&[EquivalenceRule::new("bhai", ["bhae"])]).unwrap();

    assert!(!tree.resolve_path("Chandu bhae Bhatt").is_found());
    let result = tree.resolve_path_with(&normalizer, "Chandu bhae Bhatt");
    assert_eq!(result.target(), Some("Chandu bhai Bhatt"));
}

#[test]
fn given_results_when_serialized_then_found_flag_shape() {
    let tree = sample();
    let json = serde_json::to_value(tree.resolve_path("Kaduji Bhatt")).unwrap();
    assert_eq!(json, serde_json::json!({"found": true, "path": ["Kaduji Bhatt"]}));

    let json = serde_json::to_value(tree.resolve_path("nobody")).unwrap();
    assert_eq!(json, serde_json::json!({"found": false}));
}
