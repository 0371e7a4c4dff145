//! Properties every generated order must satisfy, across seeds and configs.

use proptest::prelude::*;

use terms_conditions::game::order::codes_match;
use terms_conditions::{
    generate_order, Complexity, DeterministicRng, DeviationMode, ItemCatalog, ItemId, Order,
    OrderConfig,
};

fn sorted_ids(items: &[terms_conditions::Item]) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = items.iter().map(|i| i.id()).collect();
    ids.sort();
    ids
}

fn generate(config: &OrderConfig, seed: u64) -> Order {
    let catalog = ItemCatalog::standard();
    let mut rng = DeterministicRng::new(seed);
    generate_order(config, &catalog, &mut rng).unwrap()
}

fn order_config() -> impl Strategy<Value = OrderConfig> {
    (
        1u32..=20,
        0u8..3,
        0.0f64..=1.0,
        0.0f64..=1.0,
        prop_oneof![Just(DeviationMode::SharedDraw), Just(DeviationMode::IndependentDraws)],
    )
        .prop_map(|(order_size, tier, incorrect, missing, mode)| OrderConfig {
            order_size,
            item_complexity: Complexity(tier),
            incorrect_item_chance: incorrect,
            missing_item_chance: missing,
            deviation_mode: mode,
        })
}

proptest! {
    #[test]
    fn ordered_length_matches_config(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        prop_assert_eq!(order.ordered().len(), config.order_size as usize);
    }

    #[test]
    fn packed_never_longer_than_ordered(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        prop_assert!(order.packed().len() <= order.ordered().len());
    }

    #[test]
    fn shuffled_is_permutation_of_packed(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        prop_assert_eq!(sorted_ids(order.packed()), sorted_ids(order.packed_shuffled()));

        for item in order.packed_shuffled() {
            prop_assert!(order.packed().contains(item));
        }
    }

    #[test]
    fn correctness_flag_matches_codes(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        prop_assert_eq!(
            order.is_correctly_packed(),
            codes_match(order.ordered(), order.packed())
        );
        prop_assert_eq!(
            order.is_correctly_packed(),
            order.ordered_codes() == order.packed_codes()
        );
    }

    #[test]
    fn undeviated_box_is_exact_copy(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        if order.deviation().is_none() {
            prop_assert_eq!(order.packed(), order.ordered());
            prop_assert!(order.is_correctly_packed());
        }
    }

    #[test]
    fn omission_shortens_box_and_fails(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        if let Some(deviation) = order.deviation() {
            prop_assert!(deviation.amount_wrong() >= 1);
            prop_assert!(deviation.amount_wrong() <= config.order_size);
            prop_assert_eq!(
                order.packed().len(),
                order.ordered().len() - deviation.omitted as usize
            );
            if deviation.omitted > 0 {
                prop_assert!(!order.is_correctly_packed());
            }
        }
    }

    #[test]
    fn untouched_tail_keeps_identity(config in order_config(), seed in any::<u64>()) {
        let order = generate(&config, seed);
        let touched = order.deviation().map_or(0, |d| d.amount_wrong()) as usize;
        let kept = order.packed().len() - order.deviation().map_or(0, |d| d.substituted) as usize;

        prop_assert_eq!(kept, order.ordered().len() - touched);
        prop_assert_eq!(
            &order.packed()[order.packed().len() - kept..],
            &order.ordered()[touched..]
        );
    }

    #[test]
    fn shared_draw_never_mixes(mut config in order_config(), seed in any::<u64>()) {
        config.deviation_mode = DeviationMode::SharedDraw;
        let order = generate(&config, seed);
        if let Some(deviation) = order.deviation() {
            prop_assert!(deviation.substituted == 0 || deviation.omitted == 0);
        }
    }

    #[test]
    fn zero_incorrect_chance_never_deviates(mut config in order_config(), seed in any::<u64>()) {
        config.incorrect_item_chance = 0.0;
        let order = generate(&config, seed);
        prop_assert!(order.deviation().is_none());
        prop_assert!(order.is_correctly_packed());
    }

    #[test]
    fn generation_is_reproducible(config in order_config(), seed in any::<u64>()) {
        let order1 = generate(&config, seed);
        let order2 = generate(&config, seed);
        prop_assert_eq!(order1.compute_hash(), order2.compute_hash());
        prop_assert_eq!(order1, order2);
    }
}

#[test]
fn test_three_items_never_deviate() {
    let config = OrderConfig {
        order_size: 3,
        item_complexity: Complexity(0),
        incorrect_item_chance: 0.0,
        missing_item_chance: 0.0,
        deviation_mode: DeviationMode::SharedDraw,
    };

    for seed in 0..500 {
        let order = generate(&config, seed);
        assert_eq!(order.packed(), order.ordered());
        assert!(order.is_correctly_packed());
    }
}

#[test]
fn test_single_missing_item() {
    let config = OrderConfig {
        order_size: 1,
        item_complexity: Complexity(0),
        incorrect_item_chance: 1.0,
        missing_item_chance: 1.0,
        deviation_mode: DeviationMode::SharedDraw,
    };

    for seed in 0..500 {
        let order = generate(&config, seed);
        assert_eq!(order.packed().len(), 0);
        assert!(!order.is_correctly_packed());
    }
}

#[test]
fn test_deviation_rate_tracks_chance() {
    let config = OrderConfig {
        order_size: 4,
        incorrect_item_chance: 0.3,
        ..OrderConfig::default()
    };

    let deviated = (0..2000)
        .filter(|seed| generate(&config, *seed).deviation().is_some())
        .count();

    // 600 expected; binomial sd is about 20
    assert!((480..=720).contains(&deviated), "deviated {} of 2000", deviated);
}
