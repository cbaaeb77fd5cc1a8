use epi_core::geometry::{align_rotation, ensure_ccw};
use epi_core::{compute_coefficients, CoefficientSet, Point, RotationClock};
use epi_curves::CurveGenerator;
use epi_parsers::{VectorSource, VectorizeConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::chain::EpicycleChain;
use crate::config::{AnimatorConfig, ConfigError};
use crate::cursor::CursorFollower;
use crate::frame::{RenderCommand, RenderFrame};
use crate::loader::SourceLoader;
use crate::pointer::{PointerHandle, PointerInput};
use crate::ripple::RippleField;
use crate::transition::TransitionManager;

/// Mixed into the seed for the change-interval RNG so it does not mirror the curve RNG.
const INTERVAL_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Where the animator's curves come from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceStatus {
    /// Random parametric curves on a timer.
    Random,
    /// A vector source is being loaded; nothing is drawn until it lands.
    Loading,
    /// A fixed curve (loaded or supplied) is shown; the timer is paused.
    Fixed,
    /// Loading failed; random curves resumed.
    Failed(String),
}

/// One independent epicycle animation.
///
/// The host owns the frame loop and calls [`tick`](Self::tick) once per
/// display refresh with the elapsed wall-clock time. All state lives here;
/// several animators can run side by side.
pub struct Animator {
    config: AnimatorConfig,
    width: f64,
    height: f64,
    center: Point,
    target_radius: f64,
    generator: CurveGenerator,
    interval_rng: StdRng,
    transitions: TransitionManager,
    clock: RotationClock,
    chains: Vec<EpicycleChain>,
    cursor: CursorFollower,
    ripples: RippleField,
    pointer: PointerInput,
    loader: Option<SourceLoader>,
    status: SourceStatus,
    /// Source points of the curve currently shown, before radius scaling.
    last_points: Vec<Point>,
    /// Curve waiting for the running transition to settle.
    pending: Option<Vec<Point>>,
    since_change_ms: f64,
    next_change_ms: f64,
    disposed: bool,
}

impl Animator {
    /// Create an animator that starts on a random parametric curve.
    pub fn new(config: AnimatorConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        let mut animator = Self::blank(config, width, height)?;
        let points = animator.generator.generate_random_parametric_path();
        animator.apply_points(points);
        Ok(animator)
    }

    /// Create an animator whose first curve is vectorised from `source`.
    ///
    /// Frames are empty until loading finishes.
    pub fn with_source(
        config: AnimatorConfig,
        width: f64,
        height: f64,
        source: VectorSource,
    ) -> Result<Self, ConfigError> {
        let mut animator = Self::blank(config, width, height)?;
        animator.set_vector_source(source);
        Ok(animator)
    }

    fn blank(config: AnimatorConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        let width = width.max(1.0);
        let height = height.max(1.0);

        let interval_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ INTERVAL_SEED_SALT),
            None => StdRng::from_entropy(),
        };
        let chains = config
            .chains
            .iter()
            .map(|c| EpicycleChain::new(c, config.max_trail))
            .collect();

        let mut animator = Self {
            generator: CurveGenerator::new(config.sample_points, config.seed),
            interval_rng,
            transitions: TransitionManager::new(config.transition_duration_ms, config.easing),
            clock: RotationClock::new(),
            chains,
            cursor: CursorFollower::new(&config.cursor),
            ripples: RippleField::new(&config.ripple),
            pointer: PointerInput::new(),
            loader: None,
            status: SourceStatus::Random,
            last_points: Vec::new(),
            pending: None,
            since_change_ms: 0.0,
            next_change_ms: 0.0,
            disposed: false,
            center: Point::new(width / 2.0, height / 2.0),
            target_radius: config.target_radius(width, height),
            width,
            height,
            config,
        };
        animator.next_change_ms = animator.draw_interval();
        log::info!(
            "animator created: {}x{}, {} terms, {} chains",
            width,
            height,
            animator.config.terms,
            animator.chains.len()
        );
        Ok(animator)
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitions.is_transitioning()
    }

    pub fn source_status(&self) -> &SourceStatus {
        &self.status
    }

    pub fn chains(&self) -> &[EpicycleChain] {
        &self.chains
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The settled (target) coefficient set.
    pub fn coefficients(&self) -> &CoefficientSet {
        self.transitions.current()
    }

    /// The coefficient set as it would be drawn right now.
    pub fn interpolated_coefficients(&self) -> CoefficientSet {
        self.transitions.interpolated()
    }

    pub fn pointer_handle(&self) -> PointerHandle {
        self.pointer.handle()
    }

    fn draw_interval(&mut self) -> f64 {
        let (lo, hi) = (self.config.change_interval_min_ms, self.config.change_interval_max_ms);
        if hi > lo {
            self.interval_rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }

    /// Recompute viewport-derived values.
    ///
    /// A running transition keeps going; amplitudes and trails are mapped
    /// onto the new target radius and centre.
    pub fn resize(&mut self, width: f64, height: f64) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let radius = self.config.target_radius(width, height);
        let factor = if self.target_radius > 0.0 { radius / self.target_radius } else { 1.0 };
        let center = Point::new(width / 2.0, height / 2.0);
        self.transitions.rescale(factor);
        for chain in &mut self.chains {
            chain.remap_trail(self.center, center, factor);
        }
        self.width = width;
        self.height = height;
        self.center = center;
        self.target_radius = radius;
        log::info!("viewport resized to {}x{} (radius {:.1})", width, height, radius);
    }

    /// Show a fixed curve. Random changes pause until [`resume_random`](Self::resume_random).
    pub fn set_points(&mut self, points: Vec<Point>) {
        self.loader = None;
        self.status = SourceStatus::Fixed;
        self.apply_points(points);
    }

    /// Vectorise `source` in the background and show it when ready.
    pub fn set_vector_source(&mut self, source: VectorSource) {
        let config = VectorizeConfig {
            sample_count: self.config.sample_points,
            ..VectorizeConfig::default()
        };
        self.loader = Some(SourceLoader::start(source, config));
        self.status = SourceStatus::Loading;
        log::info!("loading vector source");
    }

    /// Go back to random curves on the change timer.
    pub fn resume_random(&mut self) {
        self.loader = None;
        self.status = SourceStatus::Random;
        self.since_change_ms = 0.0;
    }

    /// Switch to a new random curve now, if no transition is running.
    pub fn next_curve(&mut self) -> bool {
        if self.transitions.is_transitioning() {
            return false;
        }
        let curve = self.generator.generate();
        log::info!("new {} curve", curve.spec.kind().id());
        self.apply_points(curve.points);
        true
    }

    /// Transform a source curve and hand it to the transition manager.
    ///
    /// An empty curve is ignored. While a transition runs the curve waits
    /// in `pending` and starts when the current one settles.
    fn apply_points(&mut self, points: Vec<Point>) {
        if points.is_empty() {
            log::warn!("ignoring empty source curve");
            return;
        }
        if self.transitions.is_transitioning() {
            self.pending = Some(points);
            return;
        }

        let points = if self.config.align_transitions {
            let ccw = ensure_ccw(&points);
            align_rotation(&self.last_points, &ccw)
        } else {
            points
        };

        let set = compute_coefficients(&points, self.config.terms, self.target_radius);
        log::debug!("curve ready: {} epicycles", set.len());
        if self.transitions.current().is_empty() {
            self.transitions.set_immediate(set);
        } else {
            self.transitions.begin(set);
        }
        self.last_points = points;
    }

    fn poll_loader(&mut self) {
        let Some(result) = self.loader.as_ref().and_then(|l| l.poll()) else {
            return;
        };
        self.loader = None;
        match result {
            Ok(points) if points.is_empty() => {
                log::warn!("vector source produced no contour");
                self.fall_back("source produced no contour".to_string());
            }
            Ok(points) => {
                log::info!("vector source loaded: {} points", points.len());
                self.status = SourceStatus::Fixed;
                self.apply_points(points);
            }
            Err(e) => {
                log::warn!("vector source failed: {e}");
                self.fall_back(e.to_string());
            }
        }
    }

    /// Resume random curves after a failed load, drawing one at once if nothing is shown.
    fn fall_back(&mut self, reason: String) {
        self.status = SourceStatus::Failed(reason);
        self.since_change_ms = 0.0;
        if self.transitions.current().is_empty() {
            self.next_curve();
        }
    }

    fn random_curves_active(&self) -> bool {
        matches!(self.status, SourceStatus::Random | SourceStatus::Failed(_))
    }

    /// Advance one frame by `elapsed_ms` of wall-clock time and return what to draw.
    pub fn tick(&mut self, elapsed_ms: f64) -> RenderFrame {
        if self.disposed {
            return RenderFrame::empty(self.width, self.height);
        }
        let dt = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };

        self.poll_loader();

        if self.transitions.is_transitioning() {
            if self.transitions.advance(dt) {
                self.since_change_ms = 0.0;
                self.next_change_ms = self.draw_interval();
                if let Some(points) = self.pending.take() {
                    self.apply_points(points);
                }
            }
        } else if self.random_curves_active() && self.loader.is_none() {
            self.since_change_ms += dt;
            if self.since_change_ms >= self.next_change_ms {
                self.next_curve();
            }
        }

        let t = self.clock.advance(self.config.speed);
        let snapshot = self.transitions.interpolated();
        let pointer = self.pointer.snapshot();
        let view = self
            .cursor
            .update(dt, &pointer, &snapshot, t, self.config.speed, self.center);

        for click in self.pointer.drain_clicks() {
            self.ripples.spawn(click);
        }
        self.ripples.advance(dt);

        let mut commands = Vec::new();
        if !view.coefficients.is_empty() {
            let ordered = view.coefficients.construction_order();
            for (i, chain) in self.chains.iter_mut().enumerate() {
                let tip = chain.trace(&ordered, view.center, t, self.config.circle_boost, &mut commands);
                chain.push_trail(tip);
                if let Some(trail) = chain.trail_command(i) {
                    commands.push(trail);
                }
                commands.push(RenderCommand::Tip { chain: i, position: tip });
            }
        }
        commands.extend(self.ripples.commands());

        RenderFrame {
            width: self.width,
            height: self.height,
            time: t,
            transition_progress: self.transitions.progress(),
            cursor_blend: view.blend,
            commands,
        }
    }

    /// Stop background work and release trails. Later ticks draw nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.loader = None;
        self.pending = None;
        for chain in &mut self.chains {
            chain.clear_trail();
        }
        self.ripples.clear();
        self.disposed = true;
        log::info!("animator disposed");
    }
}
