// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GUI stack and frame loop.
//!
//! A [`Window`] owns the [`ComponentTree`], a stack of root components
//! ("guis") and the [`FrameClock`]. Each call to [`Window::frame`] runs one
//! iteration of the loop:
//!
//! 1. **Update**: the top gui's subtree advances by the clock delta.
//! 2. **Evaluate**: dirty state is drained into [`FrameChanges`] and handed to
//!    [`Renderer::apply`].
//! 3. **Render**: every gui on the stack is drawn, bottom first.
//!
//! Phase timestamps come from [`time::now`](crate::time::now).

use crate::clock::FrameClock;
use crate::component::{ComponentId, ComponentTree, FrameChanges, HelpPrompt};
use crate::help::HelpStyle;
use crate::render::{RenderContext, Renderer};
use crate::settings::Settings;
use crate::time::{self, HostTime, Timebase};
use crate::trace::{
    FrameBeginEvent, FrameSummary, FrameSummaryBuilder, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    Tracer,
};
use crate::transform::Transform3d;

/// The component tree plus the stack of guis drawn on top of each other.
#[derive(Debug)]
pub struct Window {
    tree: ComponentTree,
    guis: Vec<ComponentId>,
    settings: Settings,
    help_style: HelpStyle,
    clock: FrameClock,
    frame_index: u64,
    changes: FrameChanges,
    #[cfg(feature = "trace")]
    animation_events: Vec<crate::trace::AnimationEvent>,
}

impl Window {
    /// Creates a window for `settings`, with host times in nanoseconds.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_timebase(settings, Timebase::NANOS)
    }

    /// Creates a window whose [`frame`](Self::frame) times are in `timebase`.
    #[must_use]
    pub fn with_timebase(settings: Settings, timebase: Timebase) -> Self {
        let screen_size = settings.screen_size();
        Self {
            tree: ComponentTree::with_screen_size(screen_size),
            guis: Vec::new(),
            help_style: HelpStyle::new(screen_size),
            clock: FrameClock::new(timebase, settings.max_frame_delta_ms),
            settings,
            frame_index: 0,
            changes: FrameChanges::default(),
            #[cfg(feature = "trace")]
            animation_events: Vec::new(),
        }
    }

    /// The component tree.
    #[must_use]
    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// The component tree, mutably.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current help bar style.
    #[must_use]
    pub fn help_style(&self) -> &HelpStyle {
        &self.help_style
    }

    /// Replaces the help bar style.
    pub fn set_help_style(&mut self, style: HelpStyle) {
        self.help_style = style;
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    // -- Gui stack --

    /// Pushes `gui` on top of the stack.
    ///
    /// # Panics
    ///
    /// Panics if `gui` is stale or is not a root component.
    pub fn push_gui(&mut self, gui: ComponentId) {
        assert!(self.tree.parent(gui).is_none(), "gui must be a root component");
        self.guis.push(gui);
    }

    /// Removes `gui` from the stack, wherever it is. Returns whether it was
    /// present.
    pub fn remove_gui(&mut self, gui: ComponentId) -> bool {
        match self.guis.iter().position(|&g| g == gui) {
            Some(i) => {
                self.guis.remove(i);
                true
            }
            None => false,
        }
    }

    /// Top of the stack.
    #[must_use]
    pub fn peek_gui(&self) -> Option<ComponentId> {
        self.guis.last().copied()
    }

    /// Number of guis on the stack.
    #[must_use]
    pub fn gui_count(&self) -> usize {
        self.guis.len()
    }

    // -- Frame loop --

    /// Advances the top gui by `delta_ms`.
    pub fn update(&mut self, delta_ms: u32) {
        if let Some(top) = self.peek_gui() {
            self.tree.update(top, delta_ms);
        }
    }

    /// Draws every gui, bottom of the stack first. Returns the number of
    /// components visited.
    pub fn render(&self, renderer: &mut dyn Renderer) -> u32 {
        let mut cx = RenderContext::new(renderer, &self.settings);
        self.guis
            .iter()
            .map(|&gui| self.tree.render(gui, &Transform3d::IDENTITY, &mut cx))
            .sum()
    }

    /// Runs one update/evaluate/render iteration at host time `now`.
    pub fn frame(
        &mut self,
        now: HostTime,
        renderer: &mut dyn Renderer,
        tracer: &mut Tracer<'_>,
    ) -> FrameSummary {
        let frame_index = self.frame_index;
        let delta_ms = self.clock.tick(now);
        let begin = FrameBeginEvent {
            frame_index,
            now,
            delta_ms,
        };
        tracer.frame_begin(&begin);
        let mut summary = FrameSummaryBuilder::new(&begin);

        // Update
        phase_begin(tracer, &mut summary, frame_index, PhaseKind::Update);
        self.update(delta_ms);
        phase_end(tracer, &mut summary, frame_index, PhaseKind::Update);

        #[cfg(feature = "trace")]
        {
            self.animation_events.clear();
            self.tree.drain_animation_events(&mut self.animation_events);
            tracer.animation_events(frame_index, &self.animation_events);
            summary.record_animations(&self.animation_events);
        }

        // Evaluate
        phase_begin(tracer, &mut summary, frame_index, PhaseKind::Evaluate);
        self.tree.evaluate_into(&mut self.changes);
        renderer.apply(&self.tree, &self.changes);
        phase_end(tracer, &mut summary, frame_index, PhaseKind::Evaluate);

        #[cfg(feature = "trace-rich")]
        if tracer.is_active() {
            let changes = component_changes(&self.changes);
            tracer.component_changes(frame_index, &changes);
        }

        // Render
        phase_begin(tracer, &mut summary, frame_index, PhaseKind::Render);
        let rendered = self.render(renderer);
        summary.set_rendered(rendered);
        phase_end(tracer, &mut summary, frame_index, PhaseKind::Render);

        self.frame_index += 1;
        let summary = summary.finish();
        tracer.frame_summary(&summary);
        summary
    }

    /// Like [`frame`](Self::frame), reading the time from
    /// [`time::now`](crate::time::now).
    pub fn frame_now(
        &mut self,
        renderer: &mut dyn Renderer,
        tracer: &mut Tracer<'_>,
    ) -> FrameSummary {
        self.frame(time::now(), renderer, tracer)
    }

    /// Help prompts for the help bar: the top gui's, or none when
    /// `show_help_prompts` is off.
    #[must_use]
    pub fn help_prompts(&self) -> Vec<HelpPrompt> {
        match self.peek_gui() {
            Some(top) if self.settings.show_help_prompts => self.tree.help_prompts(top),
            _ => Vec::new(),
        }
    }
}

fn phase_begin(
    tracer: &mut Tracer<'_>,
    summary: &mut FrameSummaryBuilder,
    frame_index: u64,
    phase: PhaseKind,
) {
    let timestamp = time::now();
    tracer.phase_begin(&PhaseBeginEvent {
        frame_index,
        phase,
        timestamp,
    });
    summary.phase_begin(phase, timestamp);
}

fn phase_end(
    tracer: &mut Tracer<'_>,
    summary: &mut FrameSummaryBuilder,
    frame_index: u64,
    phase: PhaseKind,
) {
    let timestamp = time::now();
    tracer.phase_end(&PhaseEndEvent {
        frame_index,
        phase,
        timestamp,
    });
    summary.phase_end(phase, timestamp);
}

#[cfg(feature = "trace-rich")]
fn component_changes(changes: &FrameChanges) -> Vec<crate::trace::ComponentChange> {
    use crate::trace::{ComponentChange, ComponentField};

    let field = |field| move |&component_index: &u32| ComponentChange {
        component_index,
        field,
    };
    changes
        .transforms
        .iter()
        .map(field(ComponentField::Transform))
        .chain(changes.opacities.iter().map(field(ComponentField::Opacity)))
        .chain(
            changes
                .added
                .iter()
                .chain(&changes.removed)
                .map(field(ComponentField::Topology)),
        )
        .collect()
}
