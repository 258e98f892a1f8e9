#![no_main]

use bitmask_set::{BigUint, Bitmask, BitmaskSet};
use libfuzzer_sys::arbitrary::{self, Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use std::mem;

// Universe sizes around machine word and digit boundaries.
const UNIVERSES: [usize; 10] = [1, 2, 7, 8, 9, 63, 64, 65, 128, 257];

#[derive(Debug, Copy, Clone)]
struct Num(u16);

impl<'a> Arbitrary<'a> for Num {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self(u.arbitrary()?))
    }
}

#[derive(Arbitrary, Debug)]
enum Operation {
    Add(Vec<Num>),
    Remove(Vec<Num>),
    Distinct(Vec<Num>),
    Intersect(Vec<Num>),
    And,
    Or,
    Xor,
    Invert,
    Includes(Num),
    CheckIsIn,
    DigitsRoundtrip,
    BitsRoundtrip,
    SwapSides,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    universe_idx: u8,
    initial_lhs: Vec<Num>,
    initial_rhs: Vec<Num>,
    ops: Vec<Operation>,
}

/// Assert that a bitmask and a membership vector agree.
fn check_equal(b: &Bitmask<'_, u32>, m: &[bool]) {
    let digits: String = m.iter().map(|&x| if x { '1' } else { '0' }).collect();
    assert_eq!(b.as_str(), digits, "bit string mismatch");

    let members: Vec<u32> = (0..m.len() as u32).filter(|&i| m[i as usize]).collect();
    assert_eq!(b.elements(), members.as_slice(), "elements mismatch");
    assert_eq!(b.len(), members.len() as u64, "len mismatch");
    assert_eq!(b.is_empty(), members.is_empty(), "is_empty mismatch");
    assert_eq!(b.is_full(), members.len() == m.len(), "is_full mismatch");
}

fn in_universe(vals: &[Num], universe: usize) -> Vec<u32> {
    vals.iter().map(|n| (n.0 as usize % universe) as u32).collect()
}

fn model_of(vals: &[u32], universe: usize) -> Vec<bool> {
    let mut m = vec![false; universe];
    for &v in vals {
        m[v as usize] = true;
    }
    m
}

fn combine(a: &[bool], b: &[bool], f: impl Fn(bool, bool) -> bool) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect()
}

fuzz_target!(|input: FuzzInput| {
    let universe = UNIVERSES[input.universe_idx as usize % UNIVERSES.len()];
    let set = BitmaskSet::new((0..universe as u32).collect()).unwrap();

    let lhs_vals = in_universe(&input.initial_lhs, universe);
    let rhs_vals = in_universe(&input.initial_rhs, universe);

    let mut lhs = set.bitmask(lhs_vals.clone()).unwrap();
    let mut rhs = set.bitmask(rhs_vals.clone()).unwrap();
    let mut lhs_model = model_of(&lhs_vals, universe);
    let mut rhs_model = model_of(&rhs_vals, universe);

    check_equal(&lhs, &lhs_model);
    check_equal(&rhs, &rhs_model);

    for op in input.ops {
        match op {
            Operation::Add(vals) => {
                let vals = in_universe(&vals, universe);
                lhs = lhs.add(vals.clone()).unwrap();
                lhs_model = combine(&lhs_model, &model_of(&vals, universe), |x, y| x || y);
            }
            Operation::Remove(vals) => {
                let vals = in_universe(&vals, universe);
                lhs = lhs.remove(vals.clone()).unwrap();
                lhs_model = combine(&lhs_model, &model_of(&vals, universe), |x, y| x && !y);
            }
            Operation::Distinct(vals) => {
                let vals = in_universe(&vals, universe);
                lhs = lhs.distinct(vals.clone()).unwrap();
                lhs_model = combine(&lhs_model, &model_of(&vals, universe), |x, y| x != y);
            }
            Operation::Intersect(vals) => {
                let vals = in_universe(&vals, universe);
                lhs = lhs.intersection(vals.clone()).unwrap();
                lhs_model = combine(&lhs_model, &model_of(&vals, universe), |x, y| x && y);
            }
            Operation::And => {
                lhs = &lhs & &rhs;
                lhs_model = combine(&lhs_model, &rhs_model, |x, y| x && y);
            }
            Operation::Or => {
                lhs = &lhs | &rhs;
                lhs_model = combine(&lhs_model, &rhs_model, |x, y| x || y);
            }
            Operation::Xor => {
                lhs = &lhs ^ &rhs;
                lhs_model = combine(&lhs_model, &rhs_model, |x, y| x != y);
            }
            Operation::Invert => {
                lhs = !&lhs;
                lhs_model.iter_mut().for_each(|x| *x = !*x);
            }
            Operation::Includes(n) => {
                let v = (n.0 as usize % universe) as u32;
                assert_eq!(lhs.includes(&v), lhs_model[v as usize], "includes({v}) mismatch");
            }
            Operation::CheckIsIn => {
                let expected = lhs_model.iter().zip(&rhs_model).all(|(&x, &y)| !x || y);
                assert_eq!(lhs.is_in(&rhs), expected, "is_in mismatch");
            }
            Operation::DigitsRoundtrip => {
                let back = set.bitmask(lhs.as_str()).unwrap();
                assert_eq!(back, lhs);
            }
            Operation::BitsRoundtrip => {
                let value: BigUint = lhs.to_biguint();
                let back = set.bitmask(value).unwrap();
                assert_eq!(back, lhs);
            }
            Operation::SwapSides => {
                mem::swap(&mut lhs, &mut rhs);
                mem::swap(&mut lhs_model, &mut rhs_model);
            }
        }

        check_equal(&lhs, &lhs_model);
    }
});
