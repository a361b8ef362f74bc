//! Property-based tests for the parser and slug helper.
//!
//! # Invariants tested
//!
//! - **Tree reconstruction:** for text indented one level at a time, every
//!   line becomes exactly one node, pre-order traversal reproduces file order
//!   and the forest depth equals the deepest indent plus one.
//! - **Slug idempotence:** slugifying a slug changes nothing.
//! - **Slug alphabet:** slugs hold only lowercase ASCII letters, digits and
//!   single interior hyphens.

use proptest::prelude::*;
use shipyard_core::{ParseNode, parse, slugify};

/// Turn raw level requests into a valid indentation profile: the first line
/// sits at the root and each line is at most one level deeper than the last.
fn indent_profile(requests: &[usize]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(requests.len());
    let mut previous = None;
    for &request in requests {
        let depth = match previous {
            None => 0,
            Some(last) => request.min(last + 1),
        };
        depths.push(depth);
        previous = Some(depth);
    }
    depths
}

fn render(depths: &[usize]) -> String {
    depths
        .iter()
        .enumerate()
        .map(|(index, depth)| format!("{}key{index} value{index}\n", "\t".repeat(*depth)))
        .collect()
}

fn pre_order(forest: &[ParseNode]) -> Vec<(String, usize)> {
    let mut visited = Vec::new();
    let mut pending: Vec<(&ParseNode, usize)> = forest.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = pending.pop() {
        visited.push((node.key.clone(), depth));
        pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
    }
    visited
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the parsed forest mirrors the indentation profile exactly.
    #[test]
    fn parse_reconstructs_indentation_tree(requests in prop::collection::vec(0_usize..6, 1..60)) {
        let depths = indent_profile(&requests);
        let forest = parse(&render(&depths)).expect("profile is well formed");

        let expected: Vec<(String, usize)> = depths
            .iter()
            .enumerate()
            .map(|(index, depth)| (format!("key{index}"), *depth))
            .collect();
        prop_assert_eq!(pre_order(&forest), expected);

        let deepest = depths.iter().copied().max().unwrap_or_default() + 1;
        let forest_depth = forest.iter().map(ParseNode::depth).max().unwrap_or_default();
        prop_assert_eq!(forest_depth, deepest);
    }

    /// Property: slugify is idempotent.
    #[test]
    fn slugify_is_idempotent(text in ".*") {
        let once = slugify(&text);
        prop_assert_eq!(slugify(&once), once);
    }

    /// Property: slugs use a restricted alphabet with no stray hyphens.
    #[test]
    fn slugs_are_url_safe(text in ".*") {
        let slug = slugify(&text);
        prop_assert!(slug.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-'));
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
    }
}
