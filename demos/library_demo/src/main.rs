// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walk through the whole front-end pipeline.
//!
//! Loads settings, a theme and a systems file (defaulting to the files under
//! `data/`), scans every system into a metadata tree, binds the sorted games
//! to themed [`TextComponent`]s that fade in, and runs a few frames against a
//! [`RecordingRenderer`]. Frame events go to a
//! [`PrettyPrintSink`](marquee_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`], which is exported as Chrome trace JSON at the end.
//!
//! ```text
//! cargo run -p library_demo -- [settings.toml theme.toml systems.toml]
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use kurbo::Size;
use marquee_core::animation::FadeAnimation;
use marquee_core::component::{ComponentId, ComponentTree, Container};
use marquee_core::components::TextComponent;
use marquee_core::help::HelpStyle;
use marquee_core::render::RecordingRenderer;
use marquee_core::settings::Settings;
use marquee_core::theme::{ThemeData, ThemeFlags};
use marquee_core::time::{HostTime, Timebase};
use marquee_core::trace::{
    AnimationEvent, ComponentChange, FrameBeginEvent, FrameSummary, PhaseBeginEvent,
    PhaseEndEvent, TraceSink, Tracer,
};
use marquee_core::transform::Vec3;
use marquee_core::window::Window;
use marquee_debug::chrome;
use marquee_debug::pretty::PrettyPrintSink;
use marquee_debug::recorder::RecorderSink;
use marquee_library::{FileTypeMask, SORT_TYPES, SystemData, SystemsConfig};

const FRAME_COUNT: u64 = 8;
/// Simulated frame interval in nanoseconds (60 Hz).
const FRAME_INTERVAL_NS: u64 = 16_666_667;
const VIEW: &str = "basic";
const FADE_MS: u32 = 100;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let settings_path = args.next().unwrap_or_else(|| data.join("settings.toml"));
    let theme_path = args.next().unwrap_or_else(|| data.join("theme.toml"));
    let systems_path = args.next().unwrap_or_else(|| data.join("systems.toml"));

    let settings = Settings::load(&settings_path)?;
    let theme = ThemeData::load(&theme_path)?;
    let systems = load_systems(&systems_path)?;

    let mut window = Window::new(settings);
    let mut help = HelpStyle::new(window.settings().screen_size());
    help.apply_theme(&theme, VIEW);
    window.set_help_style(help);

    let gui = build_gamelist(window.tree_mut(), &theme, &systems);
    window.push_gui(gui);
    window.tree_mut().on_show(gui);

    let mut renderer = RecordingRenderer::default();
    let mut tee = Tee {
        pretty: PrettyPrintSink::new(std::io::stdout(), Timebase::NANOS),
        recorder: RecorderSink::new(),
    };
    let mut now = 1_000_000_000;
    for _ in 0..FRAME_COUNT {
        renderer.clear();
        let mut tracer = Tracer::new(&mut tee);
        window.frame(HostTime(now), &mut renderer, &mut tracer);
        now += FRAME_INTERVAL_NS;
    }

    println!("-- last frame --");
    for text in renderer.texts() {
        println!("{text}");
    }

    let trace_path = std::env::temp_dir().join("marquee_library_demo.json");
    let mut out = BufWriter::new(File::create(&trace_path)?);
    chrome::export(tee.recorder.as_bytes(), Timebase::NANOS, &mut out)?;
    out.flush()?;
    log::info!("chrome trace written to {}", trace_path.display());
    Ok(())
}

/// Loads every configured system, resolving relative paths against the
/// systems file, and scans it.
fn load_systems(path: &Path) -> Result<Vec<SystemData>, Box<dyn Error>> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let config = SystemsConfig::load(path)?;
    let mut systems = Vec::new();
    for mut system in config.systems {
        system.path = base.join(&system.path);
        let mut data = SystemData::from_config(&system);
        if data.populate() == 0 {
            log::warn!("{}: no games, skipping", data.name());
            continue;
        }
        data.sort(&SORT_TYPES[0]);
        systems.push(data);
    }
    Ok(systems)
}

/// Builds a full-screen container with a title per system followed by one
/// line per game.
fn build_gamelist(
    tree: &mut ComponentTree,
    theme: &ThemeData,
    systems: &[SystemData],
) -> ComponentId {
    let screen = tree.screen_size();
    let root = tree.create(Container);
    tree.set_size(root, screen);

    let mut lines = Vec::new();
    for system in systems {
        lines.push((system.full_name().to_owned(), "logoText"));
        let games = system
            .tree()
            .descendants_matching(system.root(), FileTypeMask::GAME);
        lines.extend(
            games
                .into_iter()
                .map(|id| (system.tree().clean_name(id), "gamelist")),
        );
    }

    let mut y = 0.0;
    for (i, (text, element)) in lines.into_iter().enumerate() {
        let label = tree.create(TextComponent::new(text));
        tree.add_child(root, label);
        tree.apply_theme(label, theme, VIEW, element, ThemeFlags::ALL);
        let height = tree.size(label).height.max(screen.height * 0.04);
        tree.set_position(label, Vec3::new(tree.position(label).x, y, 0.0));
        tree.set_size(label, Size::new(tree.size(label).width, height));
        y += height;
        tree.set_opacity(label, 0);

        let delay = u32::try_from(i).unwrap_or(u32::MAX).saturating_mul(10);
        let fade = FadeAnimation::new(0, 255, FADE_MS);
        tree.set_animation(label, fade, delay, None, false, 0);
    }
    root
}

/// Forwards every event to both sinks.
struct Tee {
    pretty: PrettyPrintSink<std::io::Stdout>,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_frame_begin(&mut self, e: &FrameBeginEvent) {
        self.pretty.on_frame_begin(e);
        self.recorder.on_frame_begin(e);
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.pretty.on_phase_begin(e);
        self.recorder.on_phase_begin(e);
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.pretty.on_phase_end(e);
        self.recorder.on_phase_end(e);
    }

    fn on_animation_events(&mut self, frame_index: u64, events: &[AnimationEvent]) {
        self.pretty.on_animation_events(frame_index, events);
        self.recorder.on_animation_events(frame_index, events);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.pretty.on_frame_summary(s);
        self.recorder.on_frame_summary(s);
    }

    fn on_component_changes(&mut self, frame_index: u64, changes: &[ComponentChange]) {
        self.pretty.on_component_changes(frame_index, changes);
        self.recorder.on_component_changes(frame_index, changes);
    }
}
