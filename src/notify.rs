// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transient notifications with a timed fade lifecycle.
//!
//! The sink never reads the clock itself; callers pass `now` so the whole
//! lifecycle can be driven step by step.

use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, Copy)]
pub struct NotifyOptions {
    pub fade_in: Duration,
    pub fade_out: Duration,
    pub fade_step: Duration,
    pub visible: Duration,
    pub post_hover_visible: Duration,
    /// Opacity reached at the end of the fade in.
    pub resting_opacity: f32,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_millis(1000),
            fade_out: Duration::from_millis(1000),
            fade_step: Duration::from_millis(50),
            visible: Duration::from_millis(5000),
            post_hover_visible: Duration::from_millis(500),
            resting_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Showing,
    Hovered,
    FadingOut { since: Instant },
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub text: String,
    pub shown_at: Instant,
    phase: Phase,
    hide_at: Instant,
    visible_for: Duration,
}

impl Notification {
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[derive(Debug, Default)]
pub struct NotificationSink {
    options: NotifyOptions,
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationSink {
    pub fn new(options: NotifyOptions) -> Self {
        Self {
            options,
            items: Vec::new(),
            next_id: 0,
        }
    }

    pub fn info(&mut self, text: &str, now: Instant) -> Option<u64> {
        self.push(Severity::Info, text, now)
    }

    pub fn error(&mut self, text: &str, now: Instant) -> Option<u64> {
        self.push(Severity::Error, text, now)
    }

    /// Empty text is dropped and yields `None`.
    pub fn push(&mut self, severity: Severity, text: &str, now: Instant) -> Option<u64> {
        if text.trim().is_empty() {
            return None;
        }
        self.next_id += 1;
        let visible_for = self.options.visible;
        self.items.push(Notification {
            id: self.next_id,
            severity,
            text: text.to_string(),
            shown_at: now,
            phase: Phase::Showing,
            hide_at: now + visible_for,
            visible_for,
        });
        Some(self.next_id)
    }

    /// Stacked messages, oldest first.
    pub fn active(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes and returns everything still on screen.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }

    /// Pointer entered: timers stop and the message goes fully opaque.
    pub fn hover(&mut self, id: u64) {
        let post = self.options.post_hover_visible;
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            n.phase = Phase::Hovered;
            n.visible_for = post;
        }
    }

    /// Pointer left: the hide timeout restarts with the post-hover duration.
    pub fn unhover(&mut self, id: u64, now: Instant) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            if n.phase == Phase::Hovered {
                n.phase = Phase::Showing;
                n.hide_at = now + n.visible_for;
            }
        }
    }

    /// Advances timers, starting fade outs and dropping fully faded messages.
    pub fn tick(&mut self, now: Instant) {
        let fade_out = self.options.fade_out;
        for n in self.items.iter_mut() {
            if n.phase == Phase::Showing && now >= n.hide_at {
                n.phase = Phase::FadingOut { since: n.hide_at };
            }
        }
        self.items.retain(|n| match n.phase {
            Phase::FadingOut { since } => now.saturating_duration_since(since) < fade_out,
            _ => true,
        });
    }

    /// Opacity at `now`, quantized to the fade step.
    pub fn opacity(&self, id: u64, now: Instant) -> Option<f32> {
        let n = self.items.iter().find(|n| n.id == id)?;
        let o = &self.options;
        let steps = |elapsed: Duration, total: Duration| -> f32 {
            if total.is_zero() || o.fade_step.is_zero() {
                return 1.0;
            }
            let done = (elapsed.as_millis() / o.fade_step.as_millis()) as f32;
            let all = (total.as_millis() / o.fade_step.as_millis()).max(1) as f32;
            (done / all).min(1.0)
        };
        let value = match n.phase {
            Phase::Hovered => 1.0,
            Phase::Showing => {
                let elapsed = now.saturating_duration_since(n.shown_at);
                (steps(elapsed, o.fade_in) * o.resting_opacity).min(o.resting_opacity)
            }
            Phase::FadingOut { since } => {
                let elapsed = now.saturating_duration_since(since);
                (o.resting_opacity * (1.0 - steps(elapsed, o.fade_out))).max(0.0)
            }
        };
        Some(value)
    }
}
