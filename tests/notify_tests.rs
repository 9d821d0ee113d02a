// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use budgetly::notify::{NotificationSink, NotifyOptions, Phase, Severity};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn empty_text_is_ignored_and_messages_stack() {
    let t0 = Instant::now();
    let mut sink = NotificationSink::new(NotifyOptions::default());
    assert!(sink.info("", t0).is_none());
    assert!(sink.error("   ", t0).is_none());

    let a = sink.info("first", t0).unwrap();
    let b = sink.error("second", t0 + ms(10)).unwrap();
    assert_ne!(a, b);
    let active = sink.active();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].text, "first");
    assert_eq!(active[0].severity, Severity::Info);
    assert_eq!(active[1].severity, Severity::Error);
}

#[test]
fn fades_in_stays_then_fades_out_and_disappears() {
    let t0 = Instant::now();
    let mut sink = NotificationSink::new(NotifyOptions::default());
    let id = sink.info("saved", t0).unwrap();

    assert_eq!(sink.opacity(id, t0), Some(0.0));
    let half = sink.opacity(id, t0 + ms(500)).unwrap();
    assert!((half - 0.4).abs() < 1e-6);
    assert_eq!(sink.opacity(id, t0 + ms(1500)), Some(0.8));

    sink.tick(t0 + ms(4999));
    assert_eq!(sink.active()[0].phase(), Phase::Showing);

    sink.tick(t0 + ms(5000));
    assert!(matches!(sink.active()[0].phase(), Phase::FadingOut { .. }));
    let fading = sink.opacity(id, t0 + ms(5500)).unwrap();
    assert!((fading - 0.4).abs() < 1e-6);

    sink.tick(t0 + ms(5999));
    assert_eq!(sink.active().len(), 1);
    sink.tick(t0 + ms(6000));
    assert!(sink.is_empty());
}

#[test]
fn hover_holds_message_and_shortens_the_rest() {
    let t0 = Instant::now();
    let mut sink = NotificationSink::new(NotifyOptions::default());
    let id = sink.error("failed", t0).unwrap();

    sink.hover(id);
    sink.tick(t0 + ms(60_000));
    assert_eq!(sink.active().len(), 1);
    assert_eq!(sink.opacity(id, t0 + ms(60_000)), Some(1.0));

    let left = t0 + ms(60_000);
    sink.unhover(id, left);
    sink.tick(left + ms(499));
    assert_eq!(sink.active()[0].phase(), Phase::Showing);
    sink.tick(left + ms(500));
    assert!(matches!(sink.active()[0].phase(), Phase::FadingOut { .. }));
    sink.tick(left + ms(1500));
    assert!(sink.is_empty());
}

#[test]
fn hover_rescues_a_fading_message() {
    let t0 = Instant::now();
    let mut sink = NotificationSink::new(NotifyOptions::default());
    let id = sink.info("hello", t0).unwrap();
    sink.tick(t0 + ms(5200));
    sink.hover(id);
    sink.tick(t0 + ms(7000));
    assert_eq!(sink.active().len(), 1);
    assert_eq!(sink.active()[0].phase(), Phase::Hovered);
}

#[test]
fn drain_empties_the_stack() {
    let t0 = Instant::now();
    let mut sink = NotificationSink::default();
    sink.info("a", t0);
    sink.info("b", t0);
    let drained = sink.drain();
    assert_eq!(drained.len(), 2);
    assert!(sink.is_empty());
}
