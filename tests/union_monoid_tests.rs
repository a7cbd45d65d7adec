//! Union forms a commutative, idempotent monoid at every arity.

mod test_data_gen;

use proptest::prelude::*;
use test_data_gen::{arb_pairs, arb_triples, nat, r2, r3};
use trirel_core::monoid::Semigroup;
use trirel_relation::{R1, R2, R3};

proptest! {
    #[test]
    fn r3_empty_is_identity(items in arb_triples()) {
        let r = r3(items);
        let e = R3::empty(nat(), nat(), nat());
        prop_assert_eq!(r.union(&e), r.clone());
        prop_assert_eq!(e.union(&r), r);
    }

    #[test]
    fn r3_union_commutes(a in arb_triples(), b in arb_triples()) {
        let (ra, rb) = (r3(a), r3(b));
        prop_assert_eq!(ra.union(&rb), rb.union(&ra));
    }

    #[test]
    fn r3_union_associates(a in arb_triples(), b in arb_triples(), c in arb_triples()) {
        let (ra, rb, rc) = (r3(a), r3(b), r3(c));
        prop_assert_eq!(ra.union(&rb).union(&rc), ra.union(&rb.union(&rc)));
    }

    #[test]
    fn r3_union_idempotent(a in arb_triples()) {
        let r = r3(a);
        prop_assert_eq!(r.union(&r), r);
    }

    #[test]
    fn r2_monoid_laws(a in arb_pairs(), b in arb_pairs(), c in arb_pairs()) {
        let (ra, rb, rc) = (r2(a), r2(b), r2(c));
        let e = R2::empty(nat(), nat());
        prop_assert_eq!(ra.union(&e), ra.clone());
        prop_assert_eq!(ra.union(&rb), rb.union(&ra));
        prop_assert_eq!(ra.union(&rb).union(&rc), ra.union(&rb.union(&rc)));
    }

    #[test]
    fn r1_monoid_laws(a in prop::collection::vec(0u16..20, 0..20),
                      b in prop::collection::vec(0u16..20, 0..20)) {
        let ra = R1::from_values(a, nat());
        let rb = R1::from_values(b, nat());
        let e = R1::empty(nat());
        prop_assert_eq!(ra.union(&e), ra.clone());
        prop_assert_eq!(ra.union(&rb), rb.union(&ra));
    }

    #[test]
    fn monoid_sum_matches_pairwise_fold(parts in prop::collection::vec(arb_triples(), 0..5)) {
        let rels: Vec<_> = parts.into_iter().map(r3).collect();
        let m = R3::union_monoid(nat(), nat(), nat());
        let summed = m.sum(&rels);
        let folded = rels.iter().fold(m.zero().clone(), |acc, r| acc.combine(r));
        prop_assert_eq!(summed, folded);
    }
}

#[test]
fn test_union_keeps_operands_intact() {
    let a = r3(vec![(1, 'a', true)]);
    let b = r3(vec![(2, 'b', false)]);
    let u = a.union(&b);
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(u.len(), 2);
}
