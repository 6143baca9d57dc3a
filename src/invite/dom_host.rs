use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::config::{selectors, Config, INVITE_URL};
use crate::error::LandingError;
use crate::invite::modal::{is_activation_key, FocusRing, InviteModal, ModalHost};
use crate::utils::dom;

pub type SharedModal = Rc<RefCell<InviteModal<DomModalHost>>>;

pub struct DomModalHost {
    modal: Element,
    trigger: HtmlElement,
    confirm: Option<HtmlElement>,
    cancel: Option<HtmlElement>,
    focus_delay_ms: u32,
    pending_focus: Option<Timeout>,
    ring: Vec<HtmlElement>,
}

impl DomModalHost {
    fn focusable(&self) -> Vec<HtmlElement> {
        dom::query_all_in(&self.modal, selectors::FOCUSABLE)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .filter(|el| !el.matches(":disabled").unwrap_or(false))
            .filter(|el| el.offset_parent().is_some())
            .collect()
    }
}

impl ModalHost for DomModalHost {
    fn set_shown(&mut self, shown: bool) {
        let classes = self.modal.class_list();
        if shown {
            let _ = classes.remove_1(selectors::HIDDEN_CLASS);
            let _ = classes.add_1(selectors::SHOWN_CLASS);
        } else {
            let _ = classes.add_1(selectors::HIDDEN_CLASS);
            let _ = classes.remove_1(selectors::SHOWN_CLASS);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if let Some(body) = dom::document().and_then(|d| d.body()) {
            let _ = body
                .style()
                .set_property("overflow", if locked { "hidden" } else { "" });
        }
    }

    fn focus_primary_action(&mut self) {
        let target = self
            .confirm
            .as_ref()
            .or(self.cancel.as_ref())
            .unwrap_or(&self.trigger)
            .clone();
        // Give the dialog a moment to lay out before focusing into it.
        self.pending_focus = Some(Timeout::new(self.focus_delay_ms, move || {
            let _ = target.focus();
        }));
    }

    fn cancel_pending_focus(&mut self) {
        // Dropping a gloo Timeout clears it.
        self.pending_focus.take();
    }

    fn restore_trigger_focus(&mut self) {
        let _ = self.trigger.focus();
    }

    fn focus_ring(&mut self) -> FocusRing {
        self.ring = self.focusable();
        let active = dom::document().and_then(|d| d.active_element());
        let position = active.and_then(|active| {
            self.ring
                .iter()
                .position(|el| AsRef::<Element>::as_ref(el) == &active)
        });
        FocusRing {
            len: self.ring.len(),
            active: position,
        }
    }

    fn focus_at(&mut self, index: usize) {
        if let Some(el) = self.ring.get(index) {
            let _ = el.focus();
        }
    }

    fn open_external(&mut self, url: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(e) =
                window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer")
            {
                log::warn!("Could not open invite link: {}", LandingError::from(e));
            }
        }
    }
}

/// Wires the invite button, the dialog controls and the global key handler.
pub fn attach(config: &Config) -> Result<(SharedModal, Vec<EventListener>), LandingError> {
    let modal_el = dom::query(selectors::INVITE_MODAL)
        .ok_or(LandingError::MissingElement(selectors::INVITE_MODAL))?;
    let trigger = dom::query_html(selectors::INVITE_TRIGGER)
        .ok_or(LandingError::MissingElement(selectors::INVITE_TRIGGER))?;
    let document = dom::document().ok_or(LandingError::NoContext("document"))?;
    let confirm = dom::query_html(selectors::CONFIRM_BUTTON);
    let cancel = dom::query_html(selectors::CANCEL_BUTTON);
    let close_actions = dom::query_all_in(&modal_el, selectors::CLOSE_ACTIONS);

    let host = DomModalHost {
        modal: modal_el,
        trigger: trigger.clone(),
        confirm: confirm.clone(),
        cancel: cancel.clone(),
        focus_delay_ms: config.focus_delay_ms,
        pending_focus: None,
        ring: Vec::new(),
    };
    let modal: SharedModal = Rc::new(RefCell::new(InviteModal::new(host, INVITE_URL)));
    let mut listeners = Vec::new();

    let handle = Rc::clone(&modal);
    listeners.push(EventListener::new_with_options(
        &trigger,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            handle.borrow_mut().show();
        },
    ));

    let handle = Rc::clone(&modal);
    listeners.push(EventListener::new_with_options(
        &trigger,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&event.key()) {
                event.prevent_default();
                handle.borrow_mut().show();
            }
        },
    ));

    if let Some(confirm) = &confirm {
        let handle = Rc::clone(&modal);
        listeners.push(EventListener::new(confirm, "click", move |_| {
            handle.borrow_mut().confirm();
        }));
    }

    let closers = cancel
        .iter()
        .map(|el| AsRef::<Element>::as_ref(el).clone())
        .chain(close_actions);
    for el in closers {
        let handle = Rc::clone(&modal);
        listeners.push(EventListener::new(&el, "click", move |_| {
            handle.borrow_mut().hide();
        }));
    }

    let handle = Rc::clone(&modal);
    listeners.push(EventListener::new_with_options(
        &document,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if handle.borrow_mut().handle_key(&event.key(), event.shift_key()) {
                event.prevent_default();
            }
        },
    ));

    log::debug!("Invite modal attached with {} listeners", listeners.len());
    Ok((modal, listeners))
}
