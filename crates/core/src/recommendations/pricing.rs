//! Budget-anchored display prices. Advisory only.

use rand::Rng;

pub const MIN_MULTIPLIER: f64 = 0.7;
pub const MAX_MULTIPLIER: f64 = 1.1;
pub const PRICE_STEP: u64 = 50;

pub fn draw_multiplier<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(MIN_MULTIPLIER..=MAX_MULTIPLIER)
}

pub fn synthesize_price(budget: i64, multiplier: f64) -> u64 {
    round_to_step(budget.max(0) as f64 * multiplier).unwrap_or(0)
}

/// Pulls an arbitrary price into the `[0.7, 1.1] × budget` band.
pub fn anchor_to_budget(value: f64, budget: i64) -> f64 {
    let budget = budget.max(0) as f64;
    value.clamp(budget * MIN_MULTIPLIER, budget * MAX_MULTIPLIER)
}

/// Rounds to the nearest multiple of [`PRICE_STEP`]. `None` for values that
/// are not finite and positive or do not fit in a `u64` once rounded.
pub fn round_to_step(value: f64) -> Option<u64> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let steps = (value / PRICE_STEP as f64).round();
    if steps >= u64::MAX as f64 {
        return None;
    }
    (steps as u64).checked_mul(PRICE_STEP)
}

/// `Rs.` followed by the price with comma thousands separators.
pub fn format_inr(amount: u64) -> String {
    format!("Rs.{}", group_thousands(amount))
}

pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn prices_round_to_nearest_fifty() {
        assert_eq!(synthesize_price(3000, 0.7), 2100);
        assert_eq!(synthesize_price(3000, 1.1), 3300);
        assert_eq!(synthesize_price(1234, 1.0), 1250);
        assert_eq!(round_to_step(1224.0), Some(1200));
    }

    #[test]
    fn anchoring_clamps_into_the_budget_band() {
        assert_eq!(anchor_to_budget(250_000.0, 3000), 3000.0 * MAX_MULTIPLIER);
        assert_eq!(anchor_to_budget(10.0, 3000), 3000.0 * MIN_MULTIPLIER);
        assert_eq!(round_to_step(anchor_to_budget(250_000.0, 3000)), Some(3300));
        assert_eq!(anchor_to_budget(2890.0, 3000), 2890.0);
    }

    #[test]
    fn unrepresentable_values_do_not_round() {
        assert_eq!(round_to_step(1e300), None);
        assert_eq!(round_to_step(f64::INFINITY), None);
        assert_eq!(round_to_step(u64::MAX as f64), None);
    }

    #[test]
    fn drawn_multipliers_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let multiplier = draw_multiplier(&mut rng);
            assert!((MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&multiplier));
        }
    }

    #[test]
    fn rupee_formatting_groups_thousands() {
        assert_eq!(format_inr(950), "Rs.950");
        assert_eq!(format_inr(3300), "Rs.3,300");
        assert_eq!(format_inr(1_100_000), "Rs.1,100,000");
        assert_eq!(group_thousands(0), "0");
    }

    #[test]
    fn non_positive_values_do_not_round() {
        assert_eq!(round_to_step(-10.0), None);
        assert_eq!(round_to_step(f64::NAN), None);
        assert_eq!(synthesize_price(-5, 1.0), 0);
    }
}
