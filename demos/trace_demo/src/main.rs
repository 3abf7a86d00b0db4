// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless frame loop that exercises layout, animation, rendering and the
//! diagnostics pipeline.
//!
//! Lays out a small scene on the hex lattice, then plays the intro zoom, a
//! camera pan to the dream entity, a flight back to the center, and the
//! zoom-out fade followed by a blink, all on a [`ManualClock`] at 60 Hz.
//! Every frame is rendered. Events go to a
//! [`RecorderSink`](somespace_debug::recorder::RecorderSink) (and frame
//! summaries to a [`PrettyPrintSink`](somespace_debug::pretty::PrettyPrintSink)),
//! then a Chrome trace JSON file and a PPM of the final frame are written.
//!
//! Usage: `trace_demo [OUT_DIR]` (defaults to the current directory).

use std::cell::Cell;
use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use kurbo::Point;
use somespace_core::anim::{
    self, BlinkConfig, FadeConfig, FlightConfig, IntroZoomConfig, SpriteState,
};
use somespace_core::camera::{Camera, CameraConfig};
use somespace_core::clock::{Clock, ManualClock};
use somespace_core::color::Color;
use somespace_core::entity::{Care, ContentKind, Entity, EntityId};
use somespace_core::lattice;
use somespace_core::scheduler::FrameScheduler;
use somespace_core::time::{Duration, HostTime};
use somespace_core::trace::{
    FrameSummary, FrameSummaryBuilder, FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    RenderStatsEvent, SchedulerTickEvent, TraceSink, Tracer,
};
use somespace_render::{DrawPlan, Presenter, RenderConfig, Scene, Surface, encode_ppm};

use somespace_debug::pretty::PrettyPrintSink;
use somespace_debug::recorder::RecorderSink;

/// ≈60 Hz.
const FRAME: Duration = Duration::from_micros(16_667);
/// Safety stop in case a stage never completes.
const MAX_FRAMES: u64 = 1_200;
const WIDTH: u32 = 320;
const HEIGHT: u32 = 200;
const ENTITY_COUNT: usize = 19;
/// Outer ring radius for 19 entities at the standard spacing.
const LAYOUT_BOUND: f64 = 300.0;
const DREAM_ID: EntityId = EntityId(7);
/// Summaries are printed for every Nth frame.
const PRINT_EVERY: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Intro,
    Pan,
    Flight,
    Fade,
    Blink,
    Done,
}

/// Animation outputs, written by animation callbacks and read by the render
/// phase.
#[derive(Default)]
struct Shared {
    camera: Cell<Camera>,
    sprite: Cell<Option<SpriteState>>,
    overlay: Cell<f64>,
    stage_done: Cell<bool>,
}

/// Forwards every event to the recorder and periodic summaries to the
/// pretty printer.
struct Tee {
    pretty: PrettyPrintSink,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.recorder.on_frame_tick(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.recorder.on_phase_end(e);
    }

    fn on_scheduler_tick(&mut self, e: &SchedulerTickEvent) {
        self.recorder.on_scheduler_tick(e);
    }

    fn on_render_stats(&mut self, e: &RenderStatsEvent) {
        self.recorder.on_render_stats(e);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.recorder.on_frame_summary(s);
        if s.frame_index % PRINT_EVERY == 0 {
            self.pretty.on_frame_summary(s);
        }
    }
}

/// Keeps the latest frame as PPM bytes.
#[derive(Default)]
struct PpmPresenter {
    latest: Vec<u8>,
}

impl Presenter for PpmPresenter {
    type Error = Infallible;

    fn present(&mut self, surface: &Surface) -> Result<(), Infallible> {
        self.latest = encode_ppm(surface, Color::BLACK);
        Ok(())
    }
}

fn main() -> io::Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("."), PathBuf::from);

    // -- scene -------------------------------------------------------------
    let layout = lattice::distribute(ENTITY_COUNT, LAYOUT_BOUND);
    let entities = build_entities(&layout.positions);
    let dream_at = entities
        .iter()
        .find(|e| e.id == DREAM_ID)
        .map_or(Point::ORIGIN, |e| e.position);
    let filters = [Color::rgb(250, 204, 21), Color::rgb(96, 165, 250)];

    // -- sinks -------------------------------------------------------------
    let mut sink = Tee {
        pretty: PrettyPrintSink::new(Box::new(io::stdout())),
        recorder: RecorderSink::new(),
    };

    // -- frame loop state --------------------------------------------------
    let clock = ManualClock::new(HostTime(1_000_000));
    let scheduler = FrameScheduler::new(clock.now());
    let shared = Rc::new(Shared::default());
    let camera_config = CameraConfig::STANDARD;
    let config = RenderConfig::STANDARD;
    let mut surface = Surface::new(WIDTH, HEIGHT);
    let mut plan = DrawPlan::new();
    let mut presenter = PpmPresenter::default();

    let start = Camera::new(0.0, 0.0, camera_config.min_zoom);
    let overview = Camera::new(0.0, 0.0, 0.3).clamped(&camera_config);
    shared.camera.set(start);
    let mut stage = Stage::Intro;
    // The intro has never played in a fresh process.
    let _intro = anim::start_intro_if_needed(
        false,
        &scheduler,
        start,
        overview,
        IntroZoomConfig::STANDARD,
        camera_writer(&shared),
        stage_finisher(&shared),
    );

    let mut last: Option<HostTime> = None;
    let mut frame_index = 0;
    while stage != Stage::Done && frame_index < MAX_FRAMES {
        let now = clock.now();
        let tick = FrameTickEvent {
            frame_index,
            now,
            interval: last.map(|prev| now.saturating_duration_since(prev)),
        };
        last = Some(now);
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_tick(&tick);
        let mut summary = FrameSummaryBuilder::new(&tick);
        let mut cursor = now;

        // 1. Animate
        let phase =
            PhaseTimer::begin(&mut tracer, &mut summary, &tick, cursor, PhaseKind::Animate);
        let report = scheduler.tick(now);
        cursor = phase.end(&mut tracer, &mut summary);
        let sched = SchedulerTickEvent::new(frame_index, &report);
        tracer.scheduler_tick(&sched);
        summary.scheduler(&sched);

        if shared.stage_done.replace(false) {
            stage = advance(stage, &scheduler, &shared, dream_at);
        }

        // 2. Render
        let phase =
            PhaseTimer::begin(&mut tracer, &mut summary, &tick, cursor, PhaseKind::Render);
        let frame_entities = with_sprite(&entities, shared.sprite.get());
        let mut scene = Scene::new(&frame_entities, shared.camera.get(), layout.clear_radius);
        scene.selected = Some(DREAM_ID);
        scene.filter_colors = &filters;
        let stats = somespace_render::render_into(&config, &mut surface, &scene, &mut plan);
        surface.overlay(Color::BLACK, shared.overlay.get());
        cursor = phase.end(&mut tracer, &mut summary);
        let stats = stats.to_event(frame_index);
        tracer.render_stats(&stats);
        summary.render_stats(&stats);

        // 3. Present
        let phase =
            PhaseTimer::begin(&mut tracer, &mut summary, &tick, cursor, PhaseKind::Present);
        let Ok(()) = presenter.present(&surface);
        phase.end(&mut tracer, &mut summary);

        tracer.frame_summary(&summary.finish());

        clock.advance(FRAME);
        frame_index += 1;
    }

    // -- output ------------------------------------------------------------
    let trace_path = out_dir.join("trace.json");
    let mut writer = BufWriter::new(File::create(&trace_path)?);
    somespace_debug::chrome::export(sink.recorder.as_bytes(), &mut writer)?;
    writer.flush()?;

    let frame_path = out_dir.join("frame.ppm");
    std::fs::write(&frame_path, &presenter.latest)?;

    println!(
        "Wrote {} and {} ({frame_index} frames, final stage {stage:?})",
        trace_path.display(),
        frame_path.display(),
    );
    Ok(())
}

/// Starts the animation that follows `stage` and returns the new stage.
fn advance(
    stage: Stage,
    scheduler: &FrameScheduler,
    shared: &Rc<Shared>,
    dream_at: Point,
) -> Stage {
    match stage {
        Stage::Intro => {
            let _ = anim::start_camera_pan(
                scheduler,
                shared.camera.get(),
                dream_at,
                Duration::from_millis(800),
                camera_writer(shared),
                stage_finisher(shared),
            );
            Stage::Pan
        }
        Stage::Pan => {
            let sprite = Rc::clone(shared);
            let _ = anim::start_flight(
                scheduler,
                dream_at,
                Point::ORIGIN,
                Duration::from_millis(1_200),
                FlightConfig::STANDARD,
                move |s| sprite.sprite.set(Some(s)),
                stage_finisher(shared),
            );
            Stage::Flight
        }
        Stage::Flight => {
            let fade = Rc::clone(shared);
            let _ = anim::start_zoom_out_fade(
                scheduler,
                FadeConfig::STANDARD,
                move |s| {
                    if let Some(sprite) = fade.sprite.get() {
                        fade.sprite.set(Some(SpriteState {
                            scale: s.scale,
                            ..sprite
                        }));
                    }
                    fade.overlay.set(s.overlay.opacity);
                },
                stage_finisher(shared),
            );
            Stage::Fade
        }
        Stage::Fade => {
            let blink = Rc::clone(shared);
            shared.sprite.set(None);
            let _ = anim::start_blink(
                scheduler,
                BlinkConfig::STANDARD,
                move |s| blink.overlay.set(s.opacity),
                stage_finisher(shared),
            );
            Stage::Blink
        }
        Stage::Blink | Stage::Done => Stage::Done,
    }
}

fn camera_writer(shared: &Rc<Shared>) -> impl FnMut(Camera) + 'static {
    let shared = Rc::clone(shared);
    move |camera| shared.camera.set(camera)
}

fn stage_finisher(shared: &Rc<Shared>) -> impl FnOnce() + 'static {
    let shared = Rc::clone(shared);
    move || shared.stage_done.set(true)
}

fn build_entities(positions: &[Point]) -> Vec<Entity> {
    let ratings = [
        None,
        Some(Care::Hate),
        Some(Care::Dislike),
        Some(Care::Neutral),
        Some(Care::Like),
        Some(Care::Love),
    ];
    positions
        .iter()
        .zip(0_u64..)
        .zip(ratings.iter().cycle())
        .map(|((&p, id), &rating)| {
            let care = if EntityId(id) == DREAM_ID {
                Some(Care::Dream)
            } else {
                rating
            };
            Entity::new(EntityId(id), p)
                .with_care(care)
                .with_content(ContentKind::Text, format!("entity {id}"))
        })
        .collect()
}

/// Replaces the dream entity with the flying sprite while one is active.
fn with_sprite(entities: &[Entity], sprite: Option<SpriteState>) -> Vec<Entity> {
    let Some(sprite) = sprite else {
        return entities.to_vec();
    };
    entities
        .iter()
        .map(|e| {
            if e.id == DREAM_ID {
                let mut flying = e.clone().with_scale(sprite.scale);
                flying.position = sprite.position;
                flying
            } else {
                e.clone()
            }
        })
        .collect()
}

/// Emits a phase's begin and end events and records it in the summary.
///
/// The clock is simulated, so phases are laid out back to back from the
/// frame's tick time using their measured wall-clock length.
struct PhaseTimer {
    frame_index: u64,
    phase: PhaseKind,
    begin: HostTime,
    started: Instant,
}

impl PhaseTimer {
    fn begin(
        tracer: &mut Tracer<'_>,
        summary: &mut FrameSummaryBuilder,
        tick: &FrameTickEvent,
        at: HostTime,
        phase: PhaseKind,
    ) -> Self {
        tracer.phase_begin(&PhaseBeginEvent {
            frame_index: tick.frame_index,
            phase,
            timestamp: at,
        });
        summary.phase_begin(phase, at);
        Self {
            frame_index: tick.frame_index,
            phase,
            begin: at,
            started: Instant::now(),
        }
    }

    /// Closes the phase and returns its end time.
    fn end(self, tracer: &mut Tracer<'_>, summary: &mut FrameSummaryBuilder) -> HostTime {
        let micros = u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX);
        let end = self
            .begin
            .checked_add(Duration::from_micros(micros))
            .unwrap_or(self.begin);
        tracer.phase_end(&PhaseEndEvent {
            frame_index: self.frame_index,
            phase: self.phase,
            timestamp: end,
        });
        summary.phase_end(self.phase, end);
        end
    }
}
