// Property tests for ChainHashSet against std::collections::HashSet.
//
// The model computes the expected content for each algebra operation;
// the subject must agree element-for-element, and the compound forms
// must match their non-mutating counterparts.
use chain_hashmap::ChainHashSet;
use proptest::prelude::*;
use std::collections::HashSet;

fn build(items: &[String]) -> (ChainHashSet<String>, HashSet<String>) {
    let sut: ChainHashSet<String> = items.iter().cloned().collect();
    let model: HashSet<String> = items.iter().cloned().collect();
    (sut, model)
}

fn same_content(sut: &ChainHashSet<String>, model: &HashSet<String>) -> bool {
    sut.len() == model.len() && sut.iter().all(|v| model.contains(v))
}

fn arb_items() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-e]{0,3}", 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    // Property: union/intersection/difference agree with the std model,
    // operands are never mutated, and each compound form equals its
    // non-mutating counterpart.
    #[test]
    fn prop_algebra_matches_model(xs in arb_items(), ys in arb_items()) {
        let (s1, m1) = build(&xs);
        let (s2, m2) = build(&ys);

        let union = &s1 + &s2;
        prop_assert!(same_content(&union, &m1.union(&m2).cloned().collect()));

        let inter = &s1 * &s2;
        prop_assert!(same_content(&inter, &m1.intersection(&m2).cloned().collect()));

        let diff = &s1 - &s2;
        prop_assert!(same_content(&diff, &m1.difference(&m2).cloned().collect()));

        // Operands untouched
        prop_assert!(same_content(&s1, &m1));
        prop_assert!(same_content(&s2, &m2));

        // Compound forms rewrite self with the immutable result
        let mut u = s1.clone();
        u += &s2;
        prop_assert_eq!(u, union);
        let mut i = s1.clone();
        i *= &s2;
        prop_assert_eq!(i, inter);
        let mut d = s1.clone();
        d -= &s2;
        prop_assert_eq!(d, diff);
    }

    // Property: subset/superset relations mirror the model's, and set
    // equality is exactly mutual containment.
    #[test]
    fn prop_subset_relations_match_model(xs in arb_items(), ys in arb_items()) {
        let (s1, m1) = build(&xs);
        let (s2, m2) = build(&ys);

        prop_assert_eq!(s1.is_subset_of(&s2), m1.is_subset(&m2));
        prop_assert_eq!(s1.is_superset_of(&s2), m1.is_superset(&m2));
        prop_assert_eq!(s1 == s2, m1 == m2);
    }

    // Property: algebra identities hold for arbitrary sets: the
    // difference is a subset of the left operand and disjoint from the
    // right; union is a superset of both; intersection is a subset of
    // both.
    #[test]
    fn prop_algebra_identities(xs in arb_items(), ys in arb_items()) {
        let (s1, _) = build(&xs);
        let (s2, _) = build(&ys);

        let diff = &s1 - &s2;
        prop_assert!(diff.is_subset_of(&s1));
        prop_assert!((&diff * &s2).is_empty());

        let union = &s1 + &s2;
        prop_assert!(union.is_superset_of(&s1));
        prop_assert!(union.is_superset_of(&s2));

        let inter = &s1 * &s2;
        prop_assert!(inter.is_subset_of(&s1));
        prop_assert!(inter.is_subset_of(&s2));

        // Partition: difference + intersection rebuilds the left operand.
        prop_assert_eq!(&diff + &inter, s1);
    }

    // Property: first()/last() succeed exactly on non-empty sets and
    // always return a member.
    #[test]
    fn prop_first_last_total_on_nonempty(xs in arb_items()) {
        let (s, _) = build(&xs);
        if s.is_empty() {
            prop_assert!(s.first().is_err());
            prop_assert!(s.last().is_err());
        } else {
            let f = s.first().unwrap();
            let l = s.last().unwrap();
            prop_assert!(s.contains(&f));
            prop_assert!(s.contains(&l));
        }
    }
}
