use rand::Rng;

use crate::game::Action;

/// Soft geometric translation of a real-game raise size into one of the
/// abstraction's raise choices. Exact match when available; otherwise
/// samples between the bracketing lower/upper abstract sizes with
/// probability proportional to how close `real` sits to each, using the
/// four-case logic (`lower==upper`, no lower, no upper, interpolate)
/// grounded on `PlayerModule::get_action_probs` in the original's
/// `player_module.cpp`.
///
/// Returns the index into `actions` of the chosen raise, or `None` if
/// `actions` contains no raise at all (the caller falls back to its
/// default distribution).
pub fn translate_raise(actions: &[Action], real: u32, rng: &mut impl Rng) -> Option<usize> {
    let mut lower: Option<(usize, u32)> = None;
    let mut upper: Option<(usize, u32)> = None;
    for (i, action) in actions.iter().enumerate() {
        if let Action::Raise(size) = action {
            if *size <= real && lower.is_none_or(|(_, l)| *size > l) {
                lower = Some((i, *size));
            }
            if *size >= real && upper.is_none_or(|(_, u)| *size < u) {
                upper = Some((i, *size));
            }
        }
    }

    match (lower, upper) {
        (Some((i, l)), Some((_, u))) if l == u => Some(i),
        (None, Some((i, _))) => Some(i),
        (Some((i, _)), None) => Some(i),
        (None, None) => None,
        (Some((li, l)), Some((ui, u))) => {
            let real = real as f64;
            let l = l as f64;
            let u = u as f64;
            let ratio = l / u;
            let lower_sim = (l / real - ratio) / (1.0 - ratio);
            let upper_sim = (real / u - ratio) / (1.0 - ratio);
            let dart: f64 = rng.random_range(0.0..1.0);
            if dart < lower_sim / (lower_sim + upper_sim) {
                Some(li)
            } else {
                Some(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// real=100 bracketed by abstract {50, 200}: sim_L == sim_U == 1/3.
    #[test]
    fn soft_translation_matches_reference_scenario() {
        let actions = vec![Action::Raise(50), Action::Raise(200)];
        let l = 50.0_f64;
        let u = 200.0_f64;
        let real = 100.0_f64;
        let ratio = l / u;
        let lower_sim = (l / real - ratio) / (1.0 - ratio);
        let upper_sim = (real / u - ratio) / (1.0 - ratio);
        assert!((lower_sim - 1.0 / 3.0).abs() < 1e-9);
        assert!((upper_sim - 1.0 / 3.0).abs() < 1e-9);

        let mut rng = SmallRng::seed_from_u64(1);
        let choice = translate_raise(&actions, 100, &mut rng);
        assert!(choice == Some(0) || choice == Some(1));
    }

    #[test]
    fn exact_match_is_deterministic() {
        let actions = vec![Action::Raise(50), Action::Raise(100), Action::Raise(200)];
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(translate_raise(&actions, 100, &mut rng), Some(1));
    }

    #[test]
    fn below_range_snaps_to_only_upper() {
        let actions = vec![Action::Raise(200)];
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(translate_raise(&actions, 10, &mut rng), Some(0));
    }
}
