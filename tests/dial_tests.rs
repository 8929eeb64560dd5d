//! Duration dial gestures

mod common;

use common::approx_eq;
use focus_overlay::{DurationDial, Point};

/// Point on a circle around the default dial center, clockwise from twelve
fn at(degrees: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(125.0 + 100.0 * radians.sin(), 125.0 - 100.0 * radians.cos())
}

#[test]
fn crossing_twelve_takes_the_short_way() {
    let mut dial = DurationDial::default();
    dial.on_drag_start(at(359.0));
    dial.on_drag_move(at(1.0));
    assert!(approx_eq(dial.state().accumulated_minutes, 30.0 + 2.0 / 6.0, 1e-6));
    assert_eq!(dial.minutes(), 30);
}

#[test]
fn a_full_clockwise_turn_adds_an_hour() {
    let mut dial = DurationDial::default();
    dial.on_drag_start(at(0.0));
    for step in 1..=36 {
        dial.on_drag_move(at(step as f64 * 10.0));
    }
    dial.on_drag_end();
    assert_eq!(dial.minutes(), 90);
    assert!(!dial.is_dragging());

    // The ring wraps, the count does not
    let visual = dial.visual();
    assert_eq!(visual.visual_minutes, 30);
    assert!(approx_eq(visual.knob_angle_degrees, 180.0, 1e-9));
}

#[test]
fn unwinding_never_goes_below_zero() {
    let mut dial = DurationDial::default();
    dial.on_drag_start(at(0.0));
    for step in 1..=72 {
        dial.on_drag_move(at(-(step as f64) * 10.0));
        assert!(dial.state().accumulated_minutes >= -120.0 - 1e-6);
    }
    assert_eq!(dial.minutes(), 0);
}

#[test]
fn winding_back_up_from_below_zero_is_smooth() {
    let mut dial = DurationDial::default();
    dial.set_minutes(5);
    dial.on_drag_start(at(0.0));

    // 90 degrees counter-clockwise is 15 minutes down from 5
    for step in 1..=9 {
        dial.on_drag_move(at(-(step as f64) * 10.0));
    }
    assert!(dial.state().accumulated_minutes < 0.0);
    assert!(approx_eq(dial.state().accumulated_minutes, -10.0, 1e-6));
    assert_eq!(dial.minutes(), 0);

    // 60 degrees back up only pays off the deficit
    for step in 1..=6 {
        dial.on_drag_move(at(-90.0 + step as f64 * 10.0));
    }
    assert_eq!(dial.minutes(), 0);
    assert!(approx_eq(dial.state().accumulated_minutes, 0.0, 1e-6));

    for step in 1..=3 {
        dial.on_drag_move(at(-30.0 + step as f64 * 10.0));
    }
    assert_eq!(dial.minutes(), 5);
}

#[test]
fn moves_without_a_press_are_ignored() {
    let mut dial = DurationDial::default();
    assert!(!dial.on_drag_move(at(90.0)));
    assert_eq!(dial.minutes(), 30);
}

#[test]
fn knob_sits_on_the_ring() {
    let mut dial = DurationDial::default();
    dial.set_minutes(15);
    let knob = dial.knob_point();
    assert!(approx_eq(knob.x, 125.0 + 110.0, 1e-9));
    assert!(approx_eq(knob.y, 125.0, 1e-9));
}
