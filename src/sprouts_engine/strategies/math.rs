use std::fmt;

use crate::sprouts_engine::{
    models::{Difficulty, MathProblem, Operator},
    rng::SproutRng,
    sampling::shuffle,
};

/// One row of the leveled difficulty curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRule {
    Addition,
    BiggerAddition,
    Subtraction,
    NegativeSubtraction,
    Multiplication,
    TimesOrDivide,
    AddSubtractMix,
    TimesTables,
    UltimateMix,
}

impl LevelRule {
    /// Levels 1–8 have their own rule; everything else is the mixed tier.
    pub fn for_level(level: u32) -> Self {
        match level {
            1 => LevelRule::Addition,
            2 => LevelRule::BiggerAddition,
            3 => LevelRule::Subtraction,
            4 => LevelRule::NegativeSubtraction,
            5 => LevelRule::Multiplication,
            6 => LevelRule::TimesOrDivide,
            7 => LevelRule::AddSubtractMix,
            8 => LevelRule::TimesTables,
            _ => LevelRule::UltimateMix,
        }
    }
}

impl fmt::Display for LevelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LevelRule::Addition            => "Addition",
            LevelRule::BiggerAddition      => "Bigger Addition",
            LevelRule::Subtraction         => "Subtraction",
            LevelRule::NegativeSubtraction => "Negative Numbers",
            LevelRule::Multiplication      => "Multiplication",
            LevelRule::TimesOrDivide       => "Multiply & Divide",
            LevelRule::AddSubtractMix      => "Add & Subtract Mix",
            LevelRule::TimesTables         => "Times Tables",
            LevelRule::UltimateMix         => "Ultimate Mix",
        };
        write!(f, "{}", s)
    }
}

fn base_max(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Beginner     => 5,
        Difficulty::Intermediate => 15,
        Difficulty::Advanced     => 30,
    }
}

fn tiered(difficulty: Difficulty, beginner: i64, intermediate: i64, advanced: i64) -> i64 {
    match difficulty {
        Difficulty::Beginner     => beginner,
        Difficulty::Intermediate => intermediate,
        Difficulty::Advanced     => advanced,
    }
}

/// Two positive addends summing to a target in `[2, max]`.
fn sum_to_target(rng: &mut SproutRng, max: i64) -> (i64, i64, i64) {
    let answer = rng.below(max - 1) + 2;
    let n1 = rng.below(answer - 1) + 1;
    (n1, answer - n1, answer)
}

fn product(rng: &mut SproutRng, factor_max: i64) -> (i64, i64, i64) {
    let n1 = rng.below(factor_max) + 1;
    let n2 = rng.below(factor_max) + 1;
    (n1, n2, n1 * n2)
}

/// Quotient and divisor first, dividend derived, so the division is exact.
fn exact_division(rng: &mut SproutRng, max: i64) -> (i64, i64, i64) {
    let answer = rng.below(max) + 1;
    let n2 = rng.below(max) + 1;
    (answer * n2, n2, answer)
}

/// Build the three answer options: the answer plus two distinct decoys.
///
/// Each round draws an offset in `[-5, 5]`; while still short it also adds
/// `answer ± 10`. Decoys are not clamped, so negatives can appear.
pub fn answer_options(rng: &mut SproutRng, answer: i64) -> Vec<i64> {
    let mut options = vec![answer];
    while options.len() < 3 {
        let fake = answer + rng.below(11) - 5;
        if !options.contains(&fake) {
            options.push(fake);
        }
        if options.len() < 3 {
            let wide = answer + if rng.coin() { 10 } else { -10 };
            if !options.contains(&wide) {
                options.push(wide);
            }
        }
    }
    shuffle(rng, &options)
}

pub fn generate(rng: &mut SproutRng, level: u32, difficulty: Difficulty) -> MathProblem {
    let max = base_max(difficulty);

    let (op, (num1, num2, answer)) = match LevelRule::for_level(level) {
        LevelRule::Addition => (Operator::Add, sum_to_target(rng, max)),

        LevelRule::BiggerAddition => (Operator::Add, sum_to_target(rng, max * 3 / 2)),

        LevelRule::Subtraction => {
            let n1 = rng.below(max) + 5;
            let n2 = rng.below(n1) + 1;
            (Operator::Subtract, (n1, n2, n1 - n2))
        }

        LevelRule::NegativeSubtraction => {
            let n1 = rng.below(max);
            let n2 = rng.below(max);
            (Operator::Subtract, (n1, n2, n1 - n2))
        }

        LevelRule::Multiplication => {
            (Operator::Multiply, product(rng, tiered(difficulty, 5, 9, 12)))
        }

        LevelRule::TimesOrDivide => {
            if rng.coin() {
                (Operator::Divide, exact_division(rng, tiered(difficulty, 5, 10, 12)))
            } else {
                (Operator::Multiply, product(rng, tiered(difficulty, 6, 10, 15)))
            }
        }

        LevelRule::AddSubtractMix => {
            let mix_max = max * 2;
            if rng.coin() {
                let n1 = rng.below(mix_max) + 1;
                let n2 = rng.below(mix_max) + 1;
                (Operator::Add, (n1, n2, n1 + n2))
            } else {
                // n1 >= mix_max >= n2
                let n1 = rng.below(mix_max) + mix_max;
                let n2 = rng.below(mix_max) + 1;
                (Operator::Subtract, (n1, n2, n1 - n2))
            }
        }

        LevelRule::TimesTables => {
            let n1 = match difficulty {
                Difficulty::Beginner => rng.below(5) + 5,
                _ => rng.below(10) + 5,
            };
            let n2 = rng.below(10) + 1;
            (Operator::Multiply, (n1, n2, n1 * n2))
        }

        LevelRule::UltimateMix => {
            let roll = rng.next_f64();
            if roll < 0.25 {
                let n1 = rng.below(50);
                let n2 = rng.below(50);
                (Operator::Add, (n1, n2, n1 + n2))
            } else if roll < 0.5 {
                let n1 = rng.below(100);
                let n2 = rng.below(50);
                (Operator::Subtract, (n1, n2, n1 - n2))
            } else if roll < 0.75 {
                let n1 = rng.below(12);
                let n2 = rng.below(12);
                (Operator::Multiply, (n1, n2, n1 * n2))
            } else {
                (Operator::Divide, exact_division(rng, 12))
            }
        }
    };

    let options = answer_options(rng, answer);
    MathProblem { num1, num2, op, answer, options }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many(level: u32, difficulty: Difficulty) -> Vec<MathProblem> {
        let mut rng = SproutRng::with_seed(level as f64 * 31.0 + 7.0);
        (0..300).map(|_| generate(&mut rng, level, difficulty)).collect()
    }

    #[test]
    fn level_one_addends_are_positive_and_bounded() {
        for d in Difficulty::ALL {
            for p in many(1, d) {
                assert_eq!(p.op, Operator::Add);
                assert!(p.num1 >= 1 && p.num1 < p.answer, "{p:?}");
                assert!(p.answer >= 2 && p.answer <= base_max(d), "{p:?}");
                assert_eq!(p.num1 + p.num2, p.answer);
            }
        }
    }

    #[test]
    fn level_two_scales_magnitude() {
        for p in many(2, Difficulty::Advanced) {
            assert!(p.answer <= 45, "{p:?}");
            assert!(p.num2 >= 1);
        }
    }

    #[test]
    fn level_three_never_goes_negative() {
        for d in Difficulty::ALL {
            for p in many(3, d) {
                assert!(p.answer >= 0, "{p:?}");
                assert!(p.num1 >= 5 && p.num1 <= base_max(d) + 4);
            }
        }
    }

    #[test]
    fn level_four_can_go_negative() {
        let negatives = many(4, Difficulty::Intermediate).iter().filter(|p| p.answer < 0).count();
        assert!(negatives > 0, "expected some negative results at level 4");
    }

    #[test]
    fn level_five_factors_respect_tier() {
        for p in many(5, Difficulty::Beginner) {
            assert!((1..=5).contains(&p.num1) && (1..=5).contains(&p.num2));
        }
    }

    #[test]
    fn level_six_mixes_and_divides_exactly() {
        let problems = many(6, Difficulty::Advanced);
        assert!(problems.iter().any(|p| p.op == Operator::Divide));
        assert!(problems.iter().any(|p| p.op == Operator::Multiply));
        for p in problems.iter().filter(|p| p.op == Operator::Divide) {
            assert_eq!(p.num1 % p.num2, 0, "{p:?}");
            assert_eq!(p.num1 / p.num2, p.answer);
        }
    }

    #[test]
    fn level_seven_subtraction_is_non_negative() {
        for p in many(7, Difficulty::Beginner) {
            if p.op == Operator::Subtract {
                assert!(p.answer >= 0, "{p:?}");
            }
        }
    }

    #[test]
    fn level_eight_is_a_times_table() {
        for p in many(8, Difficulty::Beginner) {
            assert_eq!(p.op, Operator::Multiply);
            assert!((5..=9).contains(&p.num1) && (1..=10).contains(&p.num2));
        }
    }

    #[test]
    fn levels_above_nine_use_the_mixed_tier() {
        assert_eq!(LevelRule::for_level(9), LevelRule::UltimateMix);
        assert_eq!(LevelRule::for_level(42), LevelRule::UltimateMix);
        let ops: Vec<Operator> = many(12, Difficulty::Beginner).iter().map(|p| p.op).collect();
        for op in [Operator::Add, Operator::Subtract, Operator::Multiply, Operator::Divide] {
            assert!(ops.contains(&op), "{op} never drawn");
        }
    }

    #[test]
    fn options_are_three_distinct_with_answer() {
        let mut rng = SproutRng::with_seed(99.0);
        for answer in -20..60 {
            let opts = answer_options(&mut rng, answer);
            assert_eq!(opts.len(), 3);
            assert!(opts.contains(&answer));
            assert!(opts[0] != opts[1] && opts[1] != opts[2] && opts[0] != opts[2], "{opts:?}");
        }
    }
}
