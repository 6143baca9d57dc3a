use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;

use crate::config::{selectors, Config};
use crate::effects::entrance::run_entrance;
use crate::effects::particle_canvas::ParticleCanvas;
use crate::effects::sparkle::SparkleLoop;
use crate::effects::tilt::TiltController;
use crate::invite::dom_host::{self, SharedModal};
use crate::utils::dom;

thread_local! {
    // One page, one set of effects. Holding it here keeps the listeners alive.
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Everything the landing page script started, owned for the page's lifetime.
#[derive(Default)]
pub struct Page {
    particles: Option<Rc<ParticleCanvas>>,
    sparkle: Option<Rc<SparkleLoop>>,
    tilt: Option<Rc<TiltController>>,
    modal: Option<SharedModal>,
    listeners: Vec<EventListener>,
}

impl Page {
    fn build(config: &Config) -> Self {
        let mut page = Page::default();

        match ParticleCanvas::attach(config) {
            Ok(canvas) => {
                canvas.resize_to_window();
                canvas.start();
                page.listeners.extend(canvas.listen_resize());
                page.particles = Some(canvas);
            }
            Err(e) => log::debug!("Particles disabled: {}", e),
        }

        match SparkleLoop::new(dom::query_all(selectors::DECOR_MARKERS)) {
            Some(sparkle) => {
                sparkle.start();
                page.sparkle = Some(sparkle);
            }
            None => log::debug!("Sparkle disabled: no decorative markers"),
        }

        run_entrance(config.entrance_delay_ms);

        match TiltController::attach() {
            Ok((tilt, listeners)) => {
                page.listeners.extend(listeners);
                page.tilt = Some(tilt);
            }
            Err(e) => log::debug!("Card tilt disabled: {}", e),
        }

        match dom_host::attach(config) {
            Ok((modal, listeners)) => {
                page.listeners.extend(listeners);
                page.modal = Some(modal);
            }
            Err(e) => log::debug!("Invite modal disabled: {}", e),
        }

        page
    }

    pub fn pause(&self) {
        if let Some(particles) = &self.particles {
            particles.stop();
        }
        if let Some(sparkle) = &self.sparkle {
            sparkle.stop();
        }
    }

    pub fn resume(&self) {
        if let Some(particles) = &self.particles {
            particles.start();
        }
        if let Some(sparkle) = &self.sparkle {
            sparkle.start();
        }
    }

}

/// Runs [`init`] once the DOM is parsed, immediately if it already is.
pub fn run_when_ready() {
    let Some(document) = dom::document() else {
        log::warn!("No document, landing effects not started");
        return;
    };
    if is_loading(&document.ready_state()) {
        EventListener::once(&document, "DOMContentLoaded", |_| init()).forget();
    } else {
        init();
    }
}

fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

pub fn init() {
    let started = PAGE.with(|slot| slot.borrow().is_some());
    if started {
        return;
    }
    let config = dom::document()
        .map(|d| Config::from_document(&d))
        .unwrap_or_default();
    let page = Page::build(&config);
    log::info!(
        "Landing effects ready (particles: {}, sparkle: {}, tilt: {}, modal: {})",
        page.particles.is_some(),
        page.sparkle.is_some(),
        page.tilt.is_some(),
        page.modal.is_some()
    );
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

pub fn with_page(f: impl FnOnce(&Page)) {
    PAGE.with(|slot| {
        if let Some(page) = slot.borrow().as_ref() {
            f(page);
        }
    });
}
