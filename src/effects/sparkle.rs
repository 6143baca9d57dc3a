//! Twinkling decorative markers. Opacity is a pure function of the frame
//! number and the marker's index, so the loop can be restarted at any time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use web_sys::Element;

use crate::utils::dom;

const BASE_OPACITY: f64 = 0.4;
const SWING: f64 = 0.6;
const SPEED: f64 = 0.02;

pub fn sparkle_opacity(frame: u64, index: usize) -> f64 {
    let t = (frame as f64 * SPEED + index as f64).sin().abs();
    BASE_OPACITY + t * SWING
}

pub struct SparkleLoop {
    markers: Vec<Element>,
    frame_count: Cell<u64>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl SparkleLoop {
    /// `None` when there is nothing to animate.
    pub fn new(markers: Vec<Element>) -> Option<Rc<Self>> {
        if markers.is_empty() {
            return None;
        }
        Some(Rc::new(Self {
            markers,
            frame_count: Cell::new(0),
            frame: RefCell::new(None),
        }))
    }

    pub fn start(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        self.schedule();
    }

    pub fn stop(&self) {
        self.frame.borrow_mut().take();
    }

    fn schedule(self: &Rc<Self>) {
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |_| view.step());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn step(self: &Rc<Self>) {
        self.frame.borrow_mut().take();
        let frame = self.frame_count.get() + 1;
        self.frame_count.set(frame);
        for (i, marker) in self.markers.iter().enumerate() {
            if let Some(style) = dom::style_of(marker) {
                let _ = style.set_property("opacity", &sparkle_opacity(frame, i).to_string());
            }
        }
        self.schedule();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_marker_starts_dim() {
        assert!((sparkle_opacity(0, 0) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn markers_are_out_of_phase() {
        let a = sparkle_opacity(10, 0);
        let b = sparkle_opacity(10, 1);
        assert!((a - b).abs() > 1e-3);
    }

    #[test]
    fn peaks_at_full_opacity() {
        // sin(0.02 * f) == 1 when f == 25π
        let frame = (25.0 * std::f64::consts::PI).round() as u64;
        assert!((sparkle_opacity(frame, 0) - 1.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn follows_the_twinkle_curve(frame in 0u64..1_000_000, index in 0usize..64) {
            let expected = 0.4 + 0.6 * (0.02 * frame as f64 + index as f64).sin().abs();
            let got = sparkle_opacity(frame, index);
            prop_assert!((got - expected).abs() < 1e-12);
            prop_assert!((0.4..=1.0).contains(&got));
        }
    }
}
