use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use wpc_core::bits::{bits_to_word, clog2, count_width, Bit};
use wpc_core::circuit::{PortCollection, PortID};
use wpc_core::components::{Component, ConstantRegister};
use wpc_core::designs::PopCounter;
use wpc_core::popcount::{is_settled, popcount, reduce_stage};

macro_rules! assert_count {
    ($input:expr, $expected:expr) => {{
        let input = $input;
        let out = popcount(&input);
        assert_eq!(
            out.len(),
            count_width(input.len()),
            "Wrong output width for {} input bits.",
            input.len()
        );
        assert_eq!(
            bits_to_word(&out),
            $expected,
            "Wrong count for input {:?}.",
            input
        );
    }};
}

/// Expands the low `n` bits of a pattern into input bits, lowest first.
fn bits_from_pattern(pattern: u64, n: usize) -> Vec<Bit> {
    (0..n).map(|i| (pattern >> i) & 1 == 1).collect()
}

/// Builds a structural counter over constant wires, settles it with a single
/// cycle and reads the count back.
fn structural_count(input: &[Bit]) -> u32 {
    let mut port_collection = PortCollection::new();

    let mut regs: Vec<ConstantRegister> = input
        .iter()
        .enumerate()
        .map(|(i, bit)| {
            ConstantRegister::new(&mut port_collection, 1, *bit as u32, format!("in_{}", i))
        })
        .collect();
    let input_ports: Vec<PortID> = regs.iter().map(|reg| reg.output_port).collect();

    let mut pop = PopCounter::new(&mut port_collection, &input_ports, String::from("pop"));

    for reg in regs.iter_mut() {
        reg.process_cycle(&mut port_collection);
    }
    pop.process_cycle(&mut port_collection);

    pop.count(&port_collection)
}

/// Number of reduction stages needed to settle n all-ones input bits.
/// (Column shapes are value-independent, so all-ones is representative.)
fn stages_to_settle(n: usize) -> usize {
    let mut columns = vec![vec![true; n]];
    let mut stages = 0;

    while !is_settled(&columns) {
        columns = reduce_stage(&columns);
        stages += 1;
    }

    stages
}

#[test]
/// Every input of up to 8 bits, exhaustively.
pub fn test_exhaustive_small_inputs() {
    for n in 0..=8usize {
        for pattern in 0..(1u64 << n) {
            assert_count!(bits_from_pattern(pattern, n), pattern.count_ones());
        }
    }
}

#[test]
/// The hardware rendition of the network must agree with the functional one.
pub fn test_structural_matches_functional() {
    for n in 0..=6usize {
        for pattern in 0..(1u64 << n) {
            let input = bits_from_pattern(pattern, n);

            assert_eq!(
                structural_count(&input),
                bits_to_word(&popcount(&input)),
                "Structural and functional counts disagree for {:?}.",
                input
            );
        }
    }
}

#[test]
pub fn test_randomized_wide_inputs() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for n in [16usize, 33, 64, 100, 128] {
        for _ in 0..32 {
            let input: Vec<Bit> = (0..n).map(|_| rng.gen::<bool>()).collect();
            let expected = input.iter().filter(|bit| **bit).count() as u32;

            assert_count!(input.clone(), expected);
            assert_eq!(structural_count(&input), expected);
        }
    }
}

#[test]
/// 128 ones produce 10000000 in an 8-bit result.
pub fn test_all_ones_128() {
    let out = popcount(&vec![true; 128]);

    assert_eq!(out.len(), 8);
    assert_eq!(bits_to_word(&out), 128);
    assert!(out[..7].iter().all(|bit| !bit));
    assert!(out[7]);
}

#[test]
/// Only the number of set bits matters, never their positions.
pub fn test_permutation_invariance() {
    let mut rng = StdRng::seed_from_u64(0xC0DE);

    for n in [5usize, 12, 31] {
        let mut input: Vec<Bit> = (0..n).map(|_| rng.gen::<bool>()).collect();
        let reference = popcount(&input);

        for _ in 0..8 {
            input.shuffle(&mut rng);
            assert_eq!(popcount(&input), reference);
        }
    }
}

#[test]
/// Settling takes logarithmically many stages: every stage cuts the largest
/// column by roughly a third.
pub fn test_stage_count_logarithmic() {
    assert_eq!(stages_to_settle(0), 0);
    assert_eq!(stages_to_settle(1), 0);

    for n in [2usize, 3, 8, 16, 64, 128, 500] {
        let bound = ((n as f64).ln() / 1.5f64.ln()).ceil() as usize + 3;
        let stages = stages_to_settle(n);

        assert!(
            stages <= bound,
            "{} bits took {} stages (bound {}).",
            n,
            stages,
            bound
        );
    }
}

#[test]
/// Structural networks also stay logarithmically shallow. A 128-wire counter
/// settles in 15 stages; the settled columns cover at least the count width,
/// with any surplus top wires held at 0.
pub fn test_structural_depth() {
    let mut port_collection = PortCollection::new();

    let input_ports: Vec<PortID> = (0..128)
        .map(|i| port_collection.register_bit_port(0, format!("in_{}", i)))
        .collect();

    let pop = PopCounter::new(&mut port_collection, &input_ports, String::from("pop"));

    assert!(pop.output_ports().len() >= clog2(128 + 1));
    assert_eq!(pop.num_stages(), 15);
}
