use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::{selectors, Config};
use crate::effects::particles::{Particle, ParticleField};
use crate::error::LandingError;
use crate::utils::dom;

const OVERLAY_STOPS: [(f32, &str); 3] = [
    (0.0, "rgba(4,10,20,0.02)"),
    (0.5, "rgba(3,8,18,0.02)"),
    (1.0, "rgba(0,0,0,0.06)"),
];
const CORE_ALPHA: f64 = 0.95;

/// Full-viewport canvas that owns the particle field and its render loop.
pub struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: Config,
    field: RefCell<ParticleField<SmallRng>>,
    frame: RefCell<Option<AnimationFrame>>,
    resize_timer: RefCell<Option<Timeout>>,
    render_failed: Cell<bool>,
}

impl ParticleCanvas {
    pub fn attach(config: &Config) -> Result<Rc<Self>, LandingError> {
        let canvas: HtmlCanvasElement = dom::by_id(selectors::CANVAS_ID)
            .ok_or(LandingError::MissingElement("#bg canvas"))?;
        let ctx = canvas
            .get_context("2d")?
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(LandingError::NoContext("2d canvas"))?;
        Ok(Rc::new(Self {
            canvas,
            ctx,
            config: config.clone(),
            field: RefCell::new(ParticleField::new(SmallRng::from_entropy())),
            frame: RefCell::new(None),
            resize_timer: RefCell::new(None),
            render_failed: Cell::new(false),
        }))
    }

    /// Matches the canvas to the window and repopulates the field.
    pub fn resize_to_window(&self) {
        let Some((width, height)) = viewport_size() else {
            return;
        };
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        let density = self.config.effective_density(width);
        let mut field = self.field.borrow_mut();
        field.resize(width, height, density);
        log::debug!(
            "Particle field resized to {}x{} with {} particles",
            width,
            height,
            field.len()
        );
    }

    /// Debounced window resize handling. Each resize event restarts the settle timer.
    pub fn listen_resize(self: &Rc<Self>) -> Option<EventListener> {
        let window = web_sys::window()?;
        let view = Rc::clone(self);
        Some(EventListener::new(&window, "resize", move |_| {
            let target = Rc::clone(&view);
            let timer = Timeout::new(view.config.resize_debounce_ms, move || {
                target.resize_to_window();
            });
            // Replacing the pending timer drops it, which clears the timeout.
            *view.resize_timer.borrow_mut() = Some(timer);
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
        let handle = request_animation_frame(move |_| view.tick());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn tick(self: &Rc<Self>) {
        self.frame.borrow_mut().take();
        if let Err(e) = self.render() {
            if !self.render_failed.replace(true) {
                log::warn!("Particle render failed: {}", LandingError::from(e));
            }
        }
        self.schedule();
    }

    fn render(&self) -> Result<(), JsValue> {
        let mut field = self.field.borrow_mut();
        field.step();

        let ctx = &self.ctx;
        let (width, height) = (field.width(), field.height());
        ctx.clear_rect(0.0, 0.0, width, height);

        let overlay = ctx.create_linear_gradient(0.0, 0.0, 0.0, height);
        for (offset, color) in OVERLAY_STOPS {
            overlay.add_color_stop(offset, color)?;
        }
        ctx.set_fill_style_canvas_gradient(&overlay);
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_global_composite_operation("screen")?;
        let painted = field
            .particles()
            .iter()
            .try_for_each(|p| paint_particle(ctx, p));
        ctx.set_global_composite_operation("source-over")?;
        ctx.set_global_alpha(1.0);
        painted
    }
}

fn paint_particle(ctx: &CanvasRenderingContext2d, p: &Particle) -> Result<(), JsValue> {
    let blob = ctx.create_radial_gradient(p.x, p.y, p.r * 0.1, p.x, p.y, p.r)?;
    blob.add_color_stop(0.0, &p.color.with_alpha(CORE_ALPHA).css())?;
    blob.add_color_stop(0.4, &p.color.css())?;
    blob.add_color_stop(1.0, "rgba(0,0,0,0)")?;
    ctx.begin_path();
    ctx.set_fill_style_canvas_gradient(&blob);
    ctx.set_global_alpha(p.alpha);
    ctx.arc(p.x, p.y, p.r, 0.0, PI * 2.0)?;
    ctx.fill();
    Ok(())
}

pub fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}
