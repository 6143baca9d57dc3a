//! Pointer driven 3D tilt for the hero card.

use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};

use crate::config::selectors;
use crate::error::LandingError;
use crate::utils::dom;

const PERSPECTIVE_PX: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CardRect {
    pub fn measure(el: &HtmlElement) -> Self {
        let rect = el.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    /// Offset of a point from the card centre, scaled so the card edges sit at ±1.
    pub fn normalized_offset(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let dx = (x - (self.left + half_w)) / half_w;
        let dy = (y - (self.top + half_h)) / half_h;
        Some((dx, dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: Option<f64>,
}

impl Tilt {
    pub fn for_pointer(rect: &CardRect, x: f64, y: f64) -> Option<Self> {
        let (dx, dy) = rect.normalized_offset(x, y)?;
        Some(Self {
            rotate_x: dy * 6.0,
            rotate_y: dx * -8.0,
            scale: Some(1.0 + (dx * dy).abs() * 0.02),
        })
    }

    /// Gentler variant for touch, without the scale boost.
    pub fn for_touch(rect: &CardRect, x: f64, y: f64) -> Option<Self> {
        let (dx, dy) = rect.normalized_offset(x, y)?;
        Some(Self {
            rotate_x: dy * 4.0,
            rotate_y: dx * -6.0,
            scale: None,
        })
    }

    pub fn css(&self) -> String {
        let mut transform = format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg)",
            PERSPECTIVE_PX, self.rotate_x, self.rotate_y
        );
        if let Some(scale) = self.scale {
            transform.push_str(&format!(" scale({})", scale));
        }
        transform
    }
}

pub struct TiltController {
    card: HtmlElement,
    rect: Cell<CardRect>,
}

impl TiltController {
    pub fn attach() -> Result<(Rc<Self>, Vec<EventListener>), LandingError> {
        let card = dom::query_html(selectors::CARD)
            .ok_or(LandingError::MissingElement(selectors::CARD))?;
        let window = web_sys::window().ok_or(LandingError::NoContext("window"))?;
        let document = window
            .document()
            .ok_or(LandingError::NoContext("document"))?;

        let controller = Rc::new(Self {
            rect: Cell::new(CardRect::measure(&card)),
            card,
        });
        let mut listeners = Vec::new();

        if has_touch(&window) {
            let view = Rc::clone(&controller);
            // gloo listeners are passive unless asked otherwise.
            listeners.push(EventListener::new(&document, "touchmove", move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                view.update_rect();
                let rect = view.rect.get();
                if let Some(tilt) =
                    Tilt::for_touch(&rect, touch.client_x() as f64, touch.client_y() as f64)
                {
                    view.apply(&tilt);
                }
            }));
            log::debug!("Card tilt attached (touch)");
        } else {
            let view = Rc::clone(&controller);
            listeners.push(EventListener::new(&document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = view.rect.get();
                if let Some(tilt) =
                    Tilt::for_pointer(&rect, event.client_x() as f64, event.client_y() as f64)
                {
                    view.apply(&tilt);
                }
            }));
            let view = Rc::clone(&controller);
            listeners.push(EventListener::new(&document, "mouseleave", move |_| {
                view.reset();
            }));
            log::debug!("Card tilt attached (pointer)");
        }

        let view = Rc::clone(&controller);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            view.update_rect();
        }));

        Ok((controller, listeners))
    }

    pub fn update_rect(&self) {
        self.rect.set(CardRect::measure(&self.card));
    }

    fn apply(&self, tilt: &Tilt) {
        let _ = self.card.style().set_property("transform", &tilt.css());
    }

    pub fn reset(&self) {
        let _ = self.card.style().set_property("transform", "");
    }
}

fn has_touch(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: CardRect = CardRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 200.0,
    };

    #[test]
    fn centre_is_neutral() {
        let tilt = Tilt::for_pointer(&CARD, 300.0, 150.0).unwrap();
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);
        assert_eq!(tilt.scale, Some(1.0));
    }

    #[test]
    fn corner_gets_full_rotation_and_scale() {
        // bottom-right corner: dx = 1, dy = 1
        let tilt = Tilt::for_pointer(&CARD, 500.0, 250.0).unwrap();
        assert!((tilt.rotate_x - 6.0).abs() < 1e-9);
        assert!((tilt.rotate_y + 8.0).abs() < 1e-9);
        assert!((tilt.scale.unwrap() - 1.02).abs() < 1e-9);
    }

    #[test]
    fn offsets_are_not_clamped() {
        let (dx, dy) = CARD.normalized_offset(900.0, 50.0).unwrap();
        assert!((dx - 3.0).abs() < 1e-9);
        assert!((dy + 1.0).abs() < 1e-9);
    }

    #[test]
    fn touch_tilt_is_smaller_and_unscaled() {
        let pointer = Tilt::for_pointer(&CARD, 100.0, 50.0).unwrap();
        let touch = Tilt::for_touch(&CARD, 100.0, 50.0).unwrap();
        assert!(touch.rotate_x.abs() < pointer.rotate_x.abs());
        assert!(touch.rotate_y.abs() < pointer.rotate_y.abs());
        assert_eq!(touch.scale, None);
    }

    #[test]
    fn collapsed_card_produces_no_tilt() {
        let flat = CardRect {
            width: 0.0,
            ..CARD
        };
        assert!(Tilt::for_pointer(&flat, 10.0, 10.0).is_none());
        assert!(Tilt::for_touch(&CardRect::default(), 10.0, 10.0).is_none());
    }

    #[test]
    fn css_transform() {
        let tilt = Tilt {
            rotate_x: 3.0,
            rotate_y: -4.0,
            scale: Some(1.01),
        };
        assert_eq!(
            tilt.css(),
            "perspective(900px) rotateX(3deg) rotateY(-4deg) scale(1.01)"
        );
        let touch = Tilt {
            scale: None,
            ..tilt
        };
        assert_eq!(touch.css(), "perspective(900px) rotateX(3deg) rotateY(-4deg)");
    }
}
