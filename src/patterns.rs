//! Logic-gate training sets.
//!
//! Each pattern draws random 0/1 inputs and labels them with a small boolean function,
//! paired with the topology it is usually trained on.

use rand::Rng;

use crate::{Sample, TrainingData};

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `a ^ b`
    Xor,
    /// `!(a & b)`
    Nand,
    /// `(a & b) | !c`
    Mux,
    /// `[a & b, !a & b]`
    Demux,
    /// Outputs `a` or `b` depending on a hidden coin flip the network never sees.
    FlipFlop,
}

impl Pattern {
    pub fn topology(self) -> &'static [usize] {
        match self {
            Pattern::Xor | Pattern::Nand => &[2, 4, 1],
            Pattern::Mux => &[3, 4, 1],
            Pattern::Demux => &[2, 4, 2],
            Pattern::FlipFlop => &[2, 2, 2, 1],
        }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Sample {
        let a = rng.gen_bool(0.5);
        let b = rng.gen_bool(0.5);
        let (inputs, targets) = match self {
            Pattern::Xor => (vec![a, b], vec![a ^ b]),
            Pattern::Nand => (vec![a, b], vec![!(a && b)]),
            Pattern::Mux => {
                let c = rng.gen_bool(0.5);
                (vec![a, b, c], vec![(a && b) || !c])
            }
            Pattern::Demux => (vec![a, b], vec![a && b, !a && b]),
            Pattern::FlipFlop => {
                let select_b = rng.gen_bool(0.5);
                (vec![a, b], vec![if select_b { b } else { a }])
            }
        };
        Sample::new(to_levels(&inputs), to_levels(&targets))
    }

    pub fn generate<R: Rng + ?Sized>(self, count: usize, rng: &mut R) -> TrainingData {
        let samples = (0..count).map(|_| self.sample(rng)).collect();
        TrainingData::from_parts(self.topology().to_vec(), samples)
    }
}

fn to_levels(bits: &[bool]) -> Vec<f64> {
    bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ALL: [Pattern; 5] = [
        Pattern::Xor,
        Pattern::Nand,
        Pattern::Mux,
        Pattern::Demux,
        Pattern::FlipFlop,
    ];

    #[test]
    fn samples_fit_their_topology() {
        let mut rng = StdRng::seed_from_u64(0);
        for p in ALL {
            let data = p.generate(50, &mut rng);
            assert_eq!(data.len(), 50);
            assert_eq!(data.topology(), p.topology());
        }
    }

    #[test]
    fn labels_follow_the_gate() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let s = Pattern::Xor.sample(&mut rng);
            let expected = if s.inputs[0] != s.inputs[1] { 1.0 } else { 0.0 };
            assert_eq!(s.targets, vec![expected]);

            let s = Pattern::Demux.sample(&mut rng);
            let (a, b) = (s.inputs[0] == 1.0, s.inputs[1] == 1.0);
            assert_eq!(s.targets, to_levels(&[a && b, !a && b]));
        }
    }

    #[test]
    fn generation_is_seeded() {
        let a = Pattern::Mux.generate(20, &mut StdRng::seed_from_u64(5));
        let b = Pattern::Mux.generate(20, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
