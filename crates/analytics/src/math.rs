//! Statistical helpers over `Decimal` series.

use rust_decimal::Decimal;

// Newton's method converges well before this bound for the magnitudes
// a trade journal produces.
const SQRT_ITERATIONS: usize = 50;
const SQRT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 7); // 0.0000001

/// Mean of a series. `None` for an empty series.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Sample standard deviation (n - 1 denominator). `None` for fewer than
/// two values.
pub fn std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let variance_sum: Decimal = values.iter().map(|v| (*v - avg) * (*v - avg)).sum();
    let variance = variance_sum / Decimal::from(values.len() - 1);

    sqrt_decimal(variance)
}

/// Square root via Newton's method. `None` for negative input.
pub fn sqrt_decimal(value: Decimal) -> Option<Decimal> {
    if value < Decimal::ZERO {
        return None;
    }
    if value == Decimal::ZERO {
        return Some(Decimal::ZERO);
    }

    let mut guess = value / Decimal::TWO;
    if guess == Decimal::ZERO {
        guess = value;
    }

    for _ in 0..SQRT_ITERATIONS {
        let next = (guess + value / guess) / Decimal::TWO;
        if (next - guess).abs() < SQRT_TOLERANCE {
            return Some(next);
        }
        guess = next;
    }

    Some(guess)
}
