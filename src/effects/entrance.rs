use gloo_timers::callback::Timeout;

use crate::config::selectors;
use crate::utils::dom;

const ENTRANCE_TARGETS: [&str; 3] = [selectors::CARD, selectors::LOGO, selectors::CTA_BUTTON];

/// Adds the `enter` class to the card, logo and call-to-action after `delay_ms`.
/// Elements missing at that moment are skipped.
pub fn run_entrance(delay_ms: u32) {
    Timeout::new(delay_ms, || {
        for selector in ENTRANCE_TARGETS {
            if let Some(el) = dom::query(selector) {
                let _ = el.class_list().add_1(selectors::ENTERED_CLASS);
            }
        }
    })
    .forget();
}
