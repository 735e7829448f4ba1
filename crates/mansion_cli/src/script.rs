//! Gesture scripts replayed against the carousel engine
//!
//! ```toml
//! [[step]]
//! kind = "wheel"
//! delta_y = 100
//! repeat = 2
//!
//! [[step]]
//! kind = "touch"
//! from_y = 600
//! to_y = 400
//! duration_ms = 300
//!
//! [[step]]
//! kind = "wait"
//! ms = 500
//! ```

use anyhow::{Context, Result};
use mansion_animation::Animated;
use mansion_carousel::{
    CarouselConfig, CarouselEngine, GestureRouter, ThemeResolver, WindowIndices,
};
use mansion_core::{Catalog, Category, CategoryFilter, GestureEvent, Modifiers, TouchPoint};
use mansion_palette::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Fixed simulation frame
pub const TICK_MS: f32 = 16.0;

/// Upper bound on frames spent settling, so a bad config cannot hang the CLI
const MAX_SETTLE_FRAMES: usize = 10_000;

const MAX_TOUCH_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GestureScript {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// One or more wheel events, `interval_ms` apart
    Wheel {
        delta_y: f32,
        #[serde(default)]
        delta_x: f32,
        #[serde(default = "default_repeat")]
        repeat: u32,
        #[serde(default = "default_interval")]
        interval_ms: f32,
        #[serde(default)]
        ctrl: bool,
    },
    /// A straight vertical drag sampled every frame, then lifted
    Touch {
        #[serde(default = "default_touch_x")]
        x: f32,
        from_y: f32,
        to_y: f32,
        #[serde(default = "default_touch_duration")]
        duration_ms: f32,
        /// Finger rests this long before lifting
        #[serde(default)]
        hold_ms: f32,
    },
    /// Let frames run
    Wait { ms: f32 },
    /// Run frames until the carousel is at rest
    Settle,
    Animate { index: usize },
    Jump { index: usize },
    /// Replace the item list, as a category filter change does
    Reset { items: usize },
    /// Show one category of the loaded menu ("all" for every dish)
    Filter { category: String },
}

fn default_repeat() -> u32 {
    1
}

fn default_interval() -> f32 {
    TICK_MS
}

fn default_touch_x() -> f32 {
    100.0
}

fn default_touch_duration() -> f32 {
    300.0
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Wheel { .. } => "wheel",
            Step::Touch { .. } => "touch",
            Step::Wait { .. } => "wait",
            Step::Settle => "settle",
            Step::Animate { .. } => "animate",
            Step::Jump { .. } => "jump",
            Step::Reset { .. } => "reset",
            Step::Filter { .. } => "filter",
        }
    }
}

impl GestureScript {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("Failed to parse gesture script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))
    }
}

/// State after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step: usize,
    pub action: &'static str,
    pub current_index: usize,
    pub offset: f32,
    pub phase: String,
    pub window: WindowIndices,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preload: Option<usize>,
    /// Identifier of the settled dish, when a menu is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dish: Option<String>,
    /// Primary background color at the current offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgb>,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3} {:<8} index={:<3} offset={:>7.3} phase={:<15} window={:?}",
            self.step,
            self.action,
            self.current_index,
            self.offset,
            self.phase,
            self.window.as_slice()
        )?;
        if let Some(preload) = self.preload {
            write!(f, " preload={}", preload)?;
        }
        if let Some(dish) = &self.dish {
            write!(f, " dish={}", dish)?;
        }
        if let Some(background) = self.background {
            write!(f, " bg={}", background)?;
        }
        Ok(())
    }
}

/// `"all"`, a category slug, or a Chinese category name
pub fn parse_filter(s: &str) -> Option<CategoryFilter> {
    match s {
        "all" | "全部" => Some(CategoryFilter::All),
        other => Category::from_slug(other).map(CategoryFilter::Only),
    }
}

/// Dishes behind the carousel items, with their background palettes
pub struct MenuContext {
    catalog: Catalog,
    filter: CategoryFilter,
    themes: ThemeResolver,
}

impl MenuContext {
    pub fn new(catalog: Catalog, filter: CategoryFilter, themes: ThemeResolver) -> Self {
        Self {
            catalog,
            filter,
            themes,
        }
    }

    fn item_count(&self) -> usize {
        self.catalog.filter(self.filter).len()
    }
}

/// Drives an engine with a virtual clock
pub struct Simulator {
    engine: CarouselEngine,
    router: GestureRouter,
    menu: Option<MenuContext>,
    now_ms: f64,
}

impl Simulator {
    pub fn new(items: usize, config: CarouselConfig) -> Self {
        Self {
            engine: CarouselEngine::new(items, config),
            router: GestureRouter::new(),
            menu: None,
            now_ms: 0.0,
        }
    }

    /// Items come from the menu's current filter instead of a fixed count
    pub fn with_menu(mut self, menu: MenuContext) -> Self {
        self.engine.reset_for_filter_change(menu.item_count());
        self.menu = Some(menu);
        self
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    /// Run every step, reporting after each, then once more at rest
    pub fn run(&mut self, script: &GestureScript) -> Vec<StepReport> {
        let mut reports = Vec::with_capacity(script.steps.len() + 1);
        for (i, step) in script.steps.iter().enumerate() {
            self.apply(step);
            reports.push(self.report(i + 1, step.name()));
        }
        self.settle();
        reports.push(self.report(script.steps.len() + 1, "final"));
        reports
    }

    pub fn apply(&mut self, step: &Step) {
        match *step {
            Step::Wheel {
                delta_y,
                delta_x,
                repeat,
                interval_ms,
                ctrl,
            } => {
                for _ in 0..repeat {
                    self.router.handle(
                        &mut self.engine,
                        GestureEvent::Wheel {
                            delta_x,
                            delta_y,
                            modifiers: Modifiers::new(false, ctrl, false, false),
                        },
                    );
                    self.advance(interval_ms);
                }
            }
            Step::Touch {
                x,
                from_y,
                to_y,
                duration_ms,
                hold_ms,
            } => self.touch(x, from_y, to_y, duration_ms, hold_ms),
            Step::Wait { ms } => self.advance(ms),
            Step::Settle => self.settle(),
            Step::Animate { index } => self.engine.animate_to(index),
            Step::Jump { index } => {
                self.engine.jump_to(index);
            }
            Step::Reset { items } => {
                self.engine.reset_for_filter_change(items);
                self.router = GestureRouter::new();
            }
            Step::Filter { ref category } => self.filter(category),
        }
    }

    fn filter(&mut self, category: &str) {
        let Some(menu) = self.menu.as_mut() else {
            tracing::warn!("filter step needs --menu, ignored");
            return;
        };
        let Some(filter) = parse_filter(category) else {
            tracing::warn!("unknown category '{}', ignored", category);
            return;
        };
        menu.filter = filter;
        self.engine.reset_for_filter_change(menu.item_count());
        self.router = GestureRouter::new();
    }

    fn touch(&mut self, x: f32, from_y: f32, to_y: f32, duration_ms: f32, hold_ms: f32) {
        let duration = if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 };
        let frames = ((duration / TICK_MS).ceil().max(1.0) as usize).min(MAX_TOUCH_SAMPLES);
        // Very long drags are sampled more coarsely
        let frame_ms = if frames == MAX_TOUCH_SAMPLES {
            duration / frames as f32
        } else {
            TICK_MS
        };

        self.router.handle(
            &mut self.engine,
            GestureEvent::TouchStart(TouchPoint::new(x, from_y, self.now_ms)),
        );
        let start_ms = self.now_ms;
        for frame in 1..=frames {
            let t = (frame as f32 * frame_ms).min(duration.max(TICK_MS));
            let progress = if duration > 0.0 { (t / duration).min(1.0) } else { 1.0 };
            let y = from_y + (to_y - from_y) * progress;
            self.advance(frame_ms);
            let at = start_ms + t as f64;
            self.router
                .handle(&mut self.engine, GestureEvent::TouchMove(TouchPoint::new(x, y, at)));
        }
        let last_sample = start_ms + (frames as f32 * frame_ms).min(duration.max(TICK_MS)) as f64;
        self.advance(hold_ms);
        let lift = last_sample + hold_ms.max(0.0) as f64;
        self.router
            .handle(&mut self.engine, GestureEvent::TouchEnd { timestamp_ms: lift });
    }

    /// Let `ms` of frames pass
    fn advance(&mut self, ms: f32) {
        if !ms.is_finite() || ms <= 0.0 {
            return;
        }
        let ms = ms as f64;
        let tick = TICK_MS as f64;
        let frames = (ms / tick).ceil() as u64;
        let last_dt = ms - (frames - 1) as f64 * tick;
        for frame in 0..frames {
            if !self.engine.needs_frame() {
                // Nothing moves at rest; skip the remaining frames
                self.now_ms += (frames - frame - 1) as f64 * tick + last_dt;
                return;
            }
            let dt = if frame + 1 == frames { last_dt } else { tick };
            self.engine.tick(dt as f32);
            self.now_ms += dt;
        }
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while self.engine.needs_frame() && frames < MAX_SETTLE_FRAMES {
            self.engine.tick(TICK_MS);
            self.now_ms += TICK_MS as f64;
            frames += 1;
        }
        if frames == MAX_SETTLE_FRAMES {
            tracing::warn!("carousel still moving after {} frames", frames);
        }
    }

    fn report(&mut self, step: usize, action: &'static str) -> StepReport {
        let (dish, background) = match self.menu.as_mut() {
            Some(menu) => {
                let dishes = menu.catalog.filter(menu.filter);
                let dish = dishes.get(self.engine.current_index()).map(|d| d.id.clone());
                let background = menu
                    .themes
                    .background(&dishes, self.engine.offset())
                    .map(|theme| theme.current.primary);
                (dish, background)
            }
            None => (None, None),
        };

        StepReport {
            step,
            action,
            current_index: self.engine.current_index(),
            offset: self.engine.offset(),
            phase: format!("{:?}", self.engine.phase()),
            window: self.engine.visible_window(),
            preload: self.engine.take_preload_hint(),
            dish,
            background,
        }
    }
}
