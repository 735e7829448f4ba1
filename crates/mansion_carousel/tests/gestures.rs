use mansion_animation::Animated;
use mansion_carousel::{
    category_palette, CarouselConfig, CarouselEngine, CarouselPhase, GestureRouter, ThemeResolver,
    WheelMode,
};
use mansion_core::{Catalog, Category, CategoryFilter, GestureEvent, TouchPoint};
use mansion_palette::{PaletteResolver, PrecomputedTable};
use pretty_assertions::assert_eq;

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next() % n.max(1)
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * (self.next() as f32 / u32::MAX as f32)
    }
}

fn run_to_rest(engine: &mut CarouselEngine) {
    let mut frames = 0;
    while engine.tick(16.0) {
        assert_in_bounds(engine);
        frames += 1;
        assert!(frames < 10_000, "engine never settled");
    }
}

fn assert_settled(engine: &CarouselEngine) {
    if engine.phase() != CarouselPhase::Idle {
        return;
    }
    let n = engine.item_count();
    assert!(
        engine.current_index() < n.max(1),
        "index {} out of range for {} items",
        engine.current_index(),
        n
    );
    assert_eq!(engine.offset(), engine.current_index() as f32);
}

/// Offset stays within the rubber band around the list, even mid-motion
fn assert_in_bounds(engine: &CarouselEngine) {
    let limit = engine.config().max_overscroll + 1e-5;
    let max = engine.item_count().saturating_sub(1) as f32;
    let offset = engine.offset();
    assert!(
        offset >= -limit && offset <= max + limit,
        "offset {} outside [-{}, {}]",
        offset,
        limit,
        max + limit
    );
}

fn random_session(seed: u64, mode: WheelMode) {
    let mut rng = Lcg(seed);
    let config = CarouselConfig {
        wheel_mode: mode,
        ..CarouselConfig::default()
    };
    let mut engine = CarouselEngine::new(1 + rng.below(8) as usize, config);
    let mut router = GestureRouter::new();
    let mut clock_ms = 0.0f64;
    let mut finger_y = 400.0f32;

    for _ in 0..600 {
        clock_ms += 16.0;
        let event = match rng.below(10) {
            0..=2 => Some(GestureEvent::Wheel {
                delta_x: if rng.below(4) == 0 { 2.0 } else { 0.0 },
                delta_y: rng.range(-300.0, 300.0),
                modifiers: Default::default(),
            }),
            3 => {
                finger_y = rng.range(100.0, 700.0);
                let x = rng.range(0.0, 375.0);
                Some(GestureEvent::TouchStart(TouchPoint::new(x, finger_y, clock_ms)))
            }
            4 | 5 => {
                finger_y += rng.range(-120.0, 120.0);
                Some(GestureEvent::TouchMove(TouchPoint::new(100.0, finger_y, clock_ms)))
            }
            6 => Some(GestureEvent::TouchEnd {
                timestamp_ms: clock_ms + rng.range(0.0, 200.0) as f64,
            }),
            7 => {
                let target = rng.below(10) as usize;
                if rng.below(2) == 0 {
                    engine.animate_to(target);
                } else {
                    engine.jump_to(target);
                }
                None
            }
            8 => {
                if rng.below(8) == 0 {
                    engine.reset_for_filter_change(rng.below(8) as usize);
                    router = GestureRouter::new();
                }
                None
            }
            _ => {
                for _ in 0..rng.below(40) {
                    engine.tick(16.0);
                    assert_in_bounds(&engine);
                }
                None
            }
        };
        if let Some(event) = event {
            router.handle(&mut engine, event);
        }
        assert_settled(&engine);
        assert_in_bounds(&engine);
    }

    router.handle(&mut engine, GestureEvent::TouchEnd { timestamp_ms: clock_ms + 500.0 });
    run_to_rest(&mut engine);
    assert_eq!(engine.phase(), CarouselPhase::Idle);
    assert_settled(&engine);
}

#[test]
fn random_gestures_settle_in_range() {
    for seed in 0..40 {
        random_session(seed, WheelMode::SingleStep);
    }
}

#[test]
fn random_gestures_settle_in_range_continuous() {
    for seed in 100..140 {
        random_session(seed, WheelMode::Continuous);
    }
}

#[test]
fn wheel_below_threshold_keeps_index() {
    let mut engine = CarouselEngine::new(5, CarouselConfig::default());
    let mut router = GestureRouter::new();
    router.handle(&mut engine, GestureEvent::wheel(100.0));
    run_to_rest(&mut engine);
    assert_eq!(engine.current_index(), 0);
    assert!((engine.accumulator() - 0.4).abs() < 1e-6);
}

#[test]
fn two_wheel_notches_step_one_item() {
    let mut engine = CarouselEngine::new(5, CarouselConfig::default());
    let mut router = GestureRouter::new();
    router.handle(&mut engine, GestureEvent::wheel(100.0));
    router.handle(&mut engine, GestureEvent::wheel(100.0));
    assert_eq!(engine.phase(), CarouselPhase::Animating);
    run_to_rest(&mut engine);
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.offset(), 1.0);
}

#[test]
fn slow_drag_rounds_to_nearest() {
    let mut engine = CarouselEngine::new(5, CarouselConfig::default());
    let mut router = GestureRouter::new();
    router.handle(&mut engine, GestureEvent::TouchStart(TouchPoint::new(180.0, 600.0, 0.0)));
    for (i, y) in [550.0, 500.0, 450.0, 400.0].into_iter().enumerate() {
        let t = 75.0 * (i + 1) as f64;
        router.handle(&mut engine, GestureEvent::TouchMove(TouchPoint::new(180.0, y, t)));
    }
    let expected = 200f32.powf(0.9) * 3.5 / 800.0;
    assert!((engine.offset() - expected).abs() < 1e-4);

    router.handle(&mut engine, GestureEvent::TouchEnd { timestamp_ms: 450.0 });
    assert_eq!(engine.current_index(), 1);
    assert_eq!(engine.offset(), 1.0);
}

#[test]
fn reset_after_any_state() {
    let mut engine = CarouselEngine::new(9, CarouselConfig::default());
    engine.jump_to(7);
    engine.apply_wheel_delta(400.0, false);
    engine.tick(16.0);
    engine.reset_for_filter_change(3);

    let state = engine.state();
    assert_eq!(state.offset, 0.0);
    assert_eq!(state.current_index, 0);
    assert_eq!(state.velocity, 0.0);
    assert!(!state.is_animating);
}

const MENU: &str = r#"
[[dishes]]
id = "soup"
name = { zh = "番茄锅", en = "Tomato Broth" }
description = { zh = "", en = "" }
price = 58
category = "soup-base"

[[dishes]]
id = "beef"
name = { zh = "牛肉", en = "Beef" }
description = { zh = "", en = "" }
price = 88
category = "land-fresh"
image = "/dishes/beef.jpg"

[[dishes]]
id = "shrimp"
name = { zh = "鲜虾", en = "Shrimp" }
description = { zh = "", en = "" }
price = 68
category = "seafood"
image = "/dishes/placeholder.jpg"
"#;

#[test]
fn filter_change_resets_and_rethemes() {
    let catalog = Catalog::from_toml_str(MENU).unwrap();
    let all = catalog.filter(CategoryFilter::All);
    let mut engine = CarouselEngine::new(all.len(), CarouselConfig::default());
    let mut themes = ThemeResolver::new(PaletteResolver::new(PrecomputedTable::new()));

    engine.jump_to(2);
    let theme = themes.background(&all, engine.offset()).unwrap();
    assert_eq!(theme.current, category_palette(Category::Seafood));

    let seafood = catalog.filter(CategoryFilter::Only(Category::Seafood));
    engine.reset_for_filter_change(seafood.len());
    assert_eq!(engine.current_index(), 0);
    assert_eq!(engine.visible_window().as_slice(), &[0]);

    // Mid-drag between soup and beef: beef has no table entry yet
    let mut engine = CarouselEngine::new(all.len(), CarouselConfig::default());
    engine.apply_touch_drag(600.0, 400.0, 300.0);
    let theme = themes.background(&all, engine.offset()).unwrap();
    assert_eq!(theme.current, category_palette(Category::SoupBase));
    assert!(theme.next.is_fallback());
    assert!(theme.progress > 0.5);
}
