use crate::*;

fn ordered() -> BitmaskSet<u32> {
    BitmaskSet::new((0..10).collect()).unwrap()
}

fn random() -> BitmaskSet<u32> {
    BitmaskSet::new(vec![0, 8, 1, 9, 3, 2, 4, 6, 7, 5]).unwrap()
}

fn bits(value: u32) -> BigUint {
    BigUint::from(value)
}

// ---- Construction ----

#[test]
fn test_bitmask_from_digits() {
    let set = ordered();
    let mut bitmask = set.bitmask("0101101001").unwrap();
    assert_eq!(bitmask.as_str(), "0101101001");
    assert_eq!(bitmask.to_biguint(), bits(361));
    assert!(!bitmask.is_computed());

    assert_eq!(bitmask.compute_elements(), [1, 3, 4, 6, 9]);
    assert!(bitmask.is_computed());
    assert_eq!(bitmask.elements(), [1, 3, 4, 6, 9]);
}

#[test]
fn test_bitmask_from_elements_follows_set_order() {
    let random = random();
    let bitmask = random.bitmask([9, 2, 4, 6, 5]).unwrap();
    assert_eq!(bitmask.as_str(), "0001011101");
    assert_eq!(bitmask.to_biguint(), bits(93));

    let ordered = ordered();
    let bitmask = ordered.bitmask([5, 1, 4, 2, 3]).unwrap();
    assert_eq!(bitmask.as_str(), "0111110000");
    assert_eq!(bitmask.to_biguint(), bits(496));
}

#[test]
fn test_bitmask_from_elements_duplicates() {
    let set = ordered();
    let bitmask = set.bitmask([2, 2, 9, 2]).unwrap();
    assert_eq!(bitmask.as_str(), "0010000001");
    assert_eq!(bitmask.elements(), [2, 9]);
    assert_eq!(bitmask.len(), 2);
}

#[test]
fn test_bitmask_from_bits() {
    let set = ordered();
    let bitmask = set.bitmask(bits(496)).unwrap();
    assert_eq!(bitmask.as_str(), "0111110000");
    assert_eq!(bitmask.to_biguint(), bits(496));
    assert!(!bitmask.is_computed());
    assert_eq!(bitmask.elements(), [1, 2, 3, 4, 5]);
    assert!(bitmask.is_computed());

    assert_eq!(set.bitmask(bits(0)).unwrap().as_str(), "0000000000");
    assert_eq!(set.bitmask(bits(1023)).unwrap().as_str(), "1111111111");
}

#[test]
fn test_bitmask_errors() {
    let set = ordered();

    assert_eq!(
        set.bitmask([999]).unwrap_err(),
        Error::ElementNotFound {
            position: 0,
            element: "999".to_string()
        }
    );
    assert!(matches!(
        set.bitmask([1, 2, 10]),
        Err(Error::ElementNotFound { position: 2, .. })
    ));

    assert_eq!(
        set.bitmask(bits(1023 + 10)).unwrap_err(),
        Error::TooManyBits { bits: 11, size: 10 }
    );

    assert_eq!(set.bitmask("").unwrap_err(), Error::EmptyInput);

    let longer = set.bitmask("01011101111").unwrap_err();
    assert_eq!(longer.length(), Some(Length::Longer));
    assert!(longer.to_string().contains("string is longer"));

    let shorter = set.bitmask("010111").unwrap_err();
    assert_eq!(shorter.length(), Some(Length::Shorter));
    assert!(shorter.to_string().contains("string is shorter"));

    assert_eq!(
        set.bitmask("0101A10B11").unwrap_err(),
        Error::InvalidCharacter {
            character: 'A',
            position: 4
        }
    );
}

#[test]
fn test_bitmask_sort_option_does_not_change_bits() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let set = BitmaskSet::with_options(vec![3, 1, 2], SetOptions { sort: true }).unwrap();
    let sorted = BitmaskOptions {
        sort: true,
        inherit_sort: false,
    };

    let from_elements = set.bitmask_with([3, 1], sorted).unwrap();
    let from_bits = set.bitmask_with(bits(5), sorted).unwrap();
    let from_digits = set.bitmask_with("101", sorted).unwrap();

    assert_eq!(from_elements, "101");
    assert_eq!(from_elements, from_bits);
    assert_eq!(from_elements, from_digits);
    assert_eq!(from_elements.elements(), [1, 3]);
}

// ---- Queries ----

#[test]
fn test_bitmask_index_of() {
    let random = random();
    let random_bitmask = random.bitmask([9, 2, 4, 6, 5]).unwrap();
    assert_eq!(random_bitmask.index_of(&8), Some(1));
    assert_eq!(random_bitmask.index_of(&5), Some(9));

    let ordered = ordered();
    let ordered_bitmask = ordered.bitmask([9, 2, 4, 6, 5]).unwrap();
    assert_eq!(ordered_bitmask.index_of(&3), Some(3));
    assert_eq!(ordered_bitmask.index_of(&6), Some(6));
}

#[test]
fn test_bitmask_includes() {
    let set = random();
    let bitmask = set.bitmask([9, 2, 4, 6, 5]).unwrap();
    for member in [9, 2, 4, 6, 5] {
        assert!(bitmask.includes(&member), "{member} should be included");
    }
    for other in [0, 1, 3, 7, 8] {
        assert!(!bitmask.includes(&other), "{other} should not be included");
    }

    // Foreign elements are never members, even of the full bitmask.
    assert!(!set.full().includes(&42));
}

// ---- Operations ----

#[test]
fn test_bitmask_and() {
    let set = ordered();
    let a = set.bitmask([2, 4, 5, 6, 9]).unwrap();
    let b = set.bitmask([1, 2, 3, 4, 5]).unwrap();

    let c = a.and(&b);
    assert_eq!(c.to_biguint(), bits(176));
    assert_eq!(c.as_str(), "0010110000");
    assert_eq!(&a & &b, c);
}

#[test]
fn test_bitmask_or() {
    let set = ordered();
    let a = set.bitmask([2, 4, 5, 6, 9]).unwrap();
    let b = set.bitmask([1, 2, 3, 4, 5]).unwrap();

    let c = a.or(&b);
    assert_eq!(c.to_biguint(), bits(505));
    assert_eq!(c.as_str(), "0111111001");
    assert_eq!(&a | &b, c);
}

#[test]
fn test_bitmask_xor() {
    let set = ordered();
    let a = set.bitmask([2, 4, 5, 6, 9]).unwrap();
    let b = set.bitmask([1, 2, 3, 4, 5]).unwrap();

    let c = a.xor(&b);
    assert_eq!(c.to_biguint(), bits(329));
    assert_eq!(c.as_str(), "0101001001");
    assert_eq!(&a ^ &b, c);
}

#[test]
fn test_bitmask_invert() {
    let set = ordered();
    let a = set.bitmask([2, 4, 5, 6, 9]).unwrap();
    assert_eq!(a.as_str(), "0010111001");
    assert_eq!(a.to_biguint(), bits(185));

    let inverted = a.invert();
    assert_eq!(inverted.as_str(), "1101000110");
    assert_eq!(inverted.to_biguint(), bits(838));
    assert_eq!(!&a, inverted);

    // Leading ones are flipped to zeros and the width is kept.
    assert_eq!(set.bitmask("1111111110").unwrap().invert().as_str(), "0000000001");
}

#[test]
fn test_bitmask_add() {
    let set = ordered();
    let bitmask = set.bitmask("0011000100").unwrap();

    let mut result = bitmask.add(vec![0, 2, 9]).unwrap();
    assert_eq!(result.as_str(), "1011000101");
    assert!(!result.is_computed());
    assert_eq!(result.compute_elements(), [0, 2, 3, 7, 9]);

    let other = set.bitmask("1010000101").unwrap();
    let result = bitmask.add(&other).unwrap();
    assert_eq!(result.as_str(), "1011000101");
    assert_eq!(result.elements(), [0, 2, 3, 7, 9]);

    assert_eq!(bitmask.include(&other).unwrap(), result);
    assert_eq!(bitmask.union(&other).unwrap(), result);
    assert_eq!(bitmask.add(&[0, 2, 9][..]).unwrap(), result);
}

#[test]
fn test_bitmask_remove() {
    let set = ordered();

    let mut result = set.bitmask("1011000101").unwrap().remove([0, 2, 9]).unwrap();
    assert_eq!(result.as_str(), "0001000100");
    assert!(!result.is_computed());
    assert_eq!(result.compute_elements(), [3, 7]);

    let bitmask = set.bitmask("0011000100").unwrap();
    let other = set.bitmask("1010000101").unwrap();
    let result = bitmask.remove(&other).unwrap();
    assert_eq!(result.as_str(), "0001000000");
    assert_eq!(result.elements(), [3]);

    assert_eq!(bitmask.exclude(&other).unwrap(), result);
    assert_eq!(&bitmask - &other, result);
}

#[test]
fn test_bitmask_distinct_and_intersection() {
    let set = ordered();
    let bitmask = set.bitmask("0011000100").unwrap();

    let distinct = bitmask.distinct([2, 3]).unwrap();
    assert_eq!(distinct.as_str(), "0000000100");
    assert_eq!(bitmask.unlike([2, 3]).unwrap(), distinct);
    assert_eq!(bitmask.different([2, 3]).unwrap(), distinct);

    let other = set.bitmask([3, 7, 9]).unwrap();
    let common = bitmask.intersection(&other).unwrap();
    assert_eq!(common.as_str(), "0001000100");
    assert_eq!(bitmask.intersect([3, 7, 9]).unwrap(), common);
}

#[test]
fn test_bitmask_operand_element_errors() {
    let set = ordered();
    let bitmask = set.full();

    for result in [
        bitmask.add([42]),
        bitmask.remove([42]),
        bitmask.distinct([42]),
        bitmask.intersection([42]),
    ] {
        assert!(matches!(result, Err(Error::ElementNotFound { .. })));
    }
}

#[test]
fn test_bitmask_operations_do_not_mutate() {
    let set = ordered();
    let a = set.bitmask([1, 2]).unwrap();
    let b = set.bitmask([2, 3]).unwrap();

    let _ = a.and(&b);
    let _ = a.or(&b);
    let _ = a.invert();
    let _ = a.remove(&b).unwrap();
    assert_eq!(a, "0110000000");
    assert_eq!(b, "0011000000");
}

// ---- Predicates ----

#[test]
fn test_bitmask_is_in() {
    let set = ordered();
    let bitmask = set.bitmask([1, 2, 3, 4, 5]).unwrap();
    let included = set.bitmask([2, 4]).unwrap();
    let not_included = set.bitmask([2, 9]).unwrap();

    assert!(included.is_in(&bitmask));
    assert!(!not_included.is_in(&bitmask));
    assert!(not_included.is_not_in(&bitmask));
    assert!(!included.is_not_in(&bitmask));
}

#[test]
fn test_bitmask_is_in_edges() {
    let set = ordered();
    let all = set.full();
    let some = set.bitmask([0, 5]).unwrap();
    let none = set.empty();

    assert!(all.is_in(&all));
    assert!(some.is_in(&all));
    assert!(none.is_in(&all));

    assert!(!all.is_in(&none));
    assert!(!some.is_in(&none));
    assert!(none.is_in(&none));

    assert!(all.is_not_in(&none));
    assert!(some.is_not_in(&none));
    assert!(!none.is_not_in(&none));
}

#[test]
fn test_bitmask_full_empty() {
    let set = ordered();
    assert!(set.bitmask("1111111111").unwrap().is_full());
    assert!(set.bitmask(bits(0)).unwrap().is_empty());

    let some = set.bitmask([4]).unwrap();
    assert!(!some.is_full());
    assert!(!some.is_empty());
    assert!(!some.is_zero());
}

// ---- Equality and representations ----

#[test]
fn test_bitmask_equality() {
    let set = random();
    let a = set.bitmask([9, 2, 4, 6, 5]).unwrap();
    let b = set.bitmask([5, 9, 6, 2, 4]).unwrap();
    let c = set.bitmask("0001011101").unwrap();

    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_ne!(a, set.bitmask([9, 2]).unwrap());

    assert_eq!(a, "0001011101");
    assert_eq!(a.to_string(), "0001011101");
    assert!(a == *"0001011101");

    use std::collections::HashSet;
    let unique: HashSet<_> = [a.clone(), b, c].into_iter().collect();
    assert_eq!(unique.len(), 1);
}

#[test]
fn test_bitmask_iter() {
    let set = BitmaskSet::new(vec!["a", "b", "c", "d"]).unwrap();
    let bitmask = set.bitmask("1010").unwrap();

    let collected: Vec<&str> = bitmask.iter().copied().collect();
    assert_eq!(collected, ["a", "c"]);

    let mut seen = Vec::new();
    for element in &bitmask {
        seen.push(*element);
    }
    assert_eq!(seen, ["a", "c"]);
}

#[test]
fn test_bitmask_decoded_cache_is_stable() {
    let set = ordered();
    let mut bitmask = set.bitmask([7, 1]).unwrap();

    let first = bitmask.elements().as_ptr();
    let second = bitmask.elements().as_ptr();
    assert_eq!(first, second);

    assert_eq!(bitmask.compute_elements(), [1, 7]);
    assert_eq!(bitmask.elements(), [1, 7]);
}

// ---- Chained usage ----

#[test]
fn test_bitmask_chained() {
    let set = BitmaskSet::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();

    let a = set.bitmask([1, 3, 5, 7, 9]).unwrap();
    let b = set.bitmask([2, 4, 6, 8]).unwrap();
    let c = set.bitmask([1, 3, 5]).unwrap();
    let d = set.bitmask([6, 8]).unwrap();
    let e = set.bitmask([1, 2, 3, 4, 5]).unwrap();
    let f = set.bitmask([6, 7, 8, 9]).unwrap();
    let g = set.bitmask([1, 9]).unwrap();

    assert_eq!(set.bitmask([1, 2, 3]).unwrap(), "111000000");

    assert_eq!(a.and(&b), "000000000");
    assert_eq!(a.or(&b), "111111111");
    assert_eq!(a.xor(&e), "010100101");
    assert_eq!(a.invert(), "010101010");

    assert_eq!(a.add([1, 2, 3, 4, 5]).unwrap(), "111110101");
    assert_eq!(a.remove(&e).unwrap(), "000000101");
    assert_eq!(a.distinct(&e).unwrap(), "010100101");
    assert_eq!(a.intersection(&e).unwrap(), "101010000");

    assert_eq!(a.invert().elements(), [2, 4, 6, 8]);
    assert_eq!(a.invert(), b);

    assert!(!a.is_in(&b));
    assert!(!a.is_in(&c));
    assert!(c.is_in(&a));
    assert!(d.is_in(&f));
    assert!(g.is_in(&a));
    assert!(!g.is_in(&b));

    let result = a
        .distinct(&b)
        .unwrap()
        .and(&e)
        .add(&f)
        .unwrap()
        .remove(&g)
        .unwrap()
        .invert();
    assert_eq!(result, "100000001");
    assert_eq!(result.elements(), [1, 9]);
}
