//! Arithmetic questions and how they are generated per difficulty tier.

use std::{fmt, ops::RangeInclusive};

use rand::Rng;

/// Largest multiplier used to build the dividend of a division question.
const MAX_QUOTIENT: i64 = 20;

/// Arithmetic operation asked by a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`), never yields a negative result.
    Subtract,
    /// Multiplication (`*`).
    Multiply,
    /// Integer division (`/`), always exact.
    Divide,
}

impl Operator {
    /// Every operator, in the order they are drawn from.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Symbol shown to the player.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs.div_euclid(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Difficulty tier controlling operand magnitude, always within `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Easiest tier, used at the start of every session.
    pub const MIN: Difficulty = Difficulty(1);
    /// Hardest tier; increases stop here.
    pub const MAX: Difficulty = Difficulty(4);

    /// Build a tier, clamping out-of-range levels to the nearest valid one.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Numeric level of the tier.
    pub fn level(self) -> u8 {
        self.0
    }

    /// Next tier up, saturating at [`Difficulty::MAX`].
    pub fn increased(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    /// Ranges operands are drawn from before any adjustment.
    pub fn operand_ranges(self) -> (RangeInclusive<i64>, RangeInclusive<i64>) {
        match self.0 {
            1 => (1..=9, 1..=9),
            2 => (10..=99, 1..=99),
            3 => (100..=999, 1..=99),
            _ => (100..=9999, 10..=999),
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single arithmetic problem with its expected answer.
///
/// Construction enforces that subtraction never goes negative and that
/// division is exact with a non-zero divisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    operand1: i64,
    operand2: i64,
    operator: Operator,
    expected_answer: i64,
}

impl Question {
    /// Build a question, returning `None` when the operands break the
    /// operator's invariant.
    pub fn new(operand1: i64, operator: Operator, operand2: i64) -> Option<Self> {
        let valid = match operator {
            Operator::Subtract => operand1 >= operand2,
            Operator::Divide => operand2 != 0 && operand1 % operand2 == 0,
            Operator::Add | Operator::Multiply => true,
        };
        valid.then(|| Self {
            operand1,
            operand2,
            operator,
            expected_answer: operator.apply(operand1, operand2),
        })
    }

    /// Left-hand operand.
    pub fn operand1(&self) -> i64 {
        self.operand1
    }

    /// Right-hand operand.
    pub fn operand2(&self) -> i64 {
        self.operand2
    }

    /// Operation to perform.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Answer the player has to find.
    pub fn expected_answer(&self) -> i64 {
        self.expected_answer
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} = ?",
            self.operand1, self.operator, self.operand2
        )
    }
}

/// Generate a random question for the given tier.
pub fn generate<R: Rng>(difficulty: Difficulty, rng: &mut R) -> Question {
    let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
    let (mut operand1, mut operand2) = draw_operands(difficulty, rng);

    if operator == Operator::Divide {
        operand1 = operand2 * rng.random_range(1..=MAX_QUOTIENT);
    }
    if operator == Operator::Subtract && operand1 < operand2 {
        std::mem::swap(&mut operand1, &mut operand2);
    }

    Question {
        operand1,
        operand2,
        operator,
        expected_answer: operator.apply(operand1, operand2),
    }
}

fn draw_operands<R: Rng>(difficulty: Difficulty, rng: &mut R) -> (i64, i64) {
    let (first, second) = difficulty.operand_ranges();
    (rng.random_range(first), rng.random_range(second))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    const SAMPLES: usize = 2_000;

    fn tiers() -> impl Iterator<Item = Difficulty> {
        (1..=4).map(Difficulty::new)
    }

    #[test]
    fn difficulty_is_clamped() {
        assert_eq!(Difficulty::new(0), Difficulty::MIN);
        assert_eq!(Difficulty::new(9), Difficulty::MAX);
        assert_eq!(Difficulty::MAX.increased(), Difficulty::MAX);
        assert_eq!(Difficulty::MIN.increased().level(), 2);
    }

    #[test]
    fn drawn_operands_stay_within_tier_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for tier in tiers() {
            let (first, second) = tier.operand_ranges();
            for _ in 0..SAMPLES {
                let (a, b) = draw_operands(tier, &mut rng);
                assert!(first.contains(&a), "tier {tier}: {a} outside {first:?}");
                assert!(second.contains(&b), "tier {tier}: {b} outside {second:?}");
            }
        }
    }

    #[test]
    fn unadjusted_operators_keep_tier_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for tier in tiers() {
            let (first, second) = tier.operand_ranges();
            for _ in 0..SAMPLES {
                let q = generate(tier, &mut rng);
                match q.operator() {
                    Operator::Add | Operator::Multiply => {
                        assert!(first.contains(&q.operand1()));
                        assert!(second.contains(&q.operand2()));
                    }
                    Operator::Divide => assert!(second.contains(&q.operand2())),
                    Operator::Subtract => {}
                }
            }
        }
    }

    #[test]
    fn division_is_always_exact() {
        let mut rng = StdRng::seed_from_u64(42);
        for tier in tiers() {
            for _ in 0..SAMPLES {
                let q = generate(tier, &mut rng);
                if q.operator() == Operator::Divide {
                    assert!(q.operand2() > 0);
                    assert_eq!(q.operand1() % q.operand2(), 0);
                    let quotient = q.expected_answer();
                    assert!((1..=MAX_QUOTIENT).contains(&quotient));
                    assert_eq!(quotient * q.operand2(), q.operand1());
                }
            }
        }
    }

    #[test]
    fn subtraction_never_goes_negative() {
        let mut rng = StdRng::seed_from_u64(3);
        for tier in tiers() {
            for _ in 0..SAMPLES {
                let q = generate(tier, &mut rng);
                if q.operator() == Operator::Subtract {
                    assert!(q.operand1() >= q.operand2());
                    assert!(q.expected_answer() >= 0);
                }
            }
        }
    }

    #[test]
    fn every_operator_gets_drawn() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..SAMPLES {
            seen.insert(generate(Difficulty::MIN, &mut rng).operator());
        }
        assert_eq!(seen.len(), Operator::ALL.len());
    }

    #[test]
    fn new_rejects_broken_invariants() {
        assert!(Question::new(3, Operator::Subtract, 4).is_none());
        assert!(Question::new(7, Operator::Divide, 2).is_none());
        assert!(Question::new(7, Operator::Divide, 0).is_none());

        let q = Question::new(12, Operator::Divide, 4).unwrap();
        assert_eq!(q.expected_answer(), 3);
        assert_eq!(Question::new(6, Operator::Multiply, 7).unwrap().expected_answer(), 42);
    }

    #[test]
    fn question_text_matches_display_format() {
        let q = Question::new(3, Operator::Add, 4).unwrap();
        assert_eq!(q.to_string(), "3 + 4 = ?");
    }
}
