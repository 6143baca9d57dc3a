//! "Add bot" invite dialog: a two state machine (hidden/shown) with a focus
//! trap. Everything that touches the page goes through [`ModalHost`].

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Shown,
}

/// The modal's focusable elements at the moment of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusRing {
    pub len: usize,
    /// Position of the focused element in the ring, if focus is inside it.
    pub active: Option<usize>,
}

pub trait ModalHost {
    fn set_shown(&mut self, shown: bool);
    fn set_scroll_locked(&mut self, locked: bool);
    /// Focuses the confirm button, else cancel, else the trigger.
    fn focus_primary_action(&mut self);
    /// Drops a primary-action focus request that has not fired yet.
    fn cancel_pending_focus(&mut self);
    fn restore_trigger_focus(&mut self);
    fn focus_ring(&mut self) -> FocusRing;
    fn focus_at(&mut self, index: usize);
    fn open_external(&mut self, url: &str);
}

/// Element to move focus to when Tab would otherwise leave the ring.
pub fn trap_focus(ring: FocusRing, shift: bool) -> Option<usize> {
    if ring.len == 0 {
        return None;
    }
    let last = ring.len - 1;
    match (ring.active, shift) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

/// Keys that open the modal when the trigger button has focus.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

pub struct InviteModal<H> {
    host: H,
    state: ModalState,
    invite_url: String,
}

impl<H: ModalHost> InviteModal<H> {
    pub fn new(host: H, invite_url: impl Into<String>) -> Self {
        Self {
            host,
            state: ModalState::Hidden,
            invite_url: invite_url.into(),
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == ModalState::Shown
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn show(&mut self) {
        if self.is_shown() {
            return;
        }
        self.state = ModalState::Shown;
        self.host.set_shown(true);
        self.host.set_scroll_locked(true);
        self.host.focus_primary_action();
        log::debug!("Invite modal shown");
    }

    pub fn hide(&mut self) {
        if !self.is_shown() {
            return;
        }
        self.state = ModalState::Hidden;
        self.host.cancel_pending_focus();
        self.host.set_shown(false);
        self.host.set_scroll_locked(false);
        self.host.restore_trigger_focus();
        log::debug!("Invite modal hidden");
    }

    /// Opens the authorization link, then closes the modal.
    pub fn confirm(&mut self) {
        log::info!("Opening bot authorization link");
        self.host.open_external(&self.invite_url);
        self.hide();
    }

    /// Global keyboard handling while the modal is shown.
    /// Returns true when the browser default must be suppressed.
    pub fn handle_key(&mut self, key: &str, shift: bool) -> bool {
        if !self.is_shown() {
            return false;
        }
        match key {
            "Escape" => {
                self.hide();
                false
            }
            "Tab" => {
                let ring = self.host.focus_ring();
                match trap_focus(ring, shift) {
                    Some(index) => {
                        self.host.focus_at(index);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Shown(bool),
        ScrollLocked(bool),
        FocusPrimary,
        CancelFocus,
        RestoreTrigger,
        FocusAt(usize),
        Open(String),
    }

    #[derive(Default)]
    struct FakeHost {
        calls: Vec<Call>,
        ring_len: usize,
        active: Option<usize>,
    }

    impl FakeHost {
        fn with_ring(len: usize, active: Option<usize>) -> Self {
            Self {
                ring_len: len,
                active,
                ..Self::default()
            }
        }

        fn opened(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Open(url) => Some(url.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl ModalHost for FakeHost {
        fn set_shown(&mut self, shown: bool) {
            self.calls.push(Call::Shown(shown));
        }
        fn set_scroll_locked(&mut self, locked: bool) {
            self.calls.push(Call::ScrollLocked(locked));
        }
        fn focus_primary_action(&mut self) {
            self.calls.push(Call::FocusPrimary);
        }
        fn cancel_pending_focus(&mut self) {
            self.calls.push(Call::CancelFocus);
        }
        fn restore_trigger_focus(&mut self) {
            self.calls.push(Call::RestoreTrigger);
        }
        fn focus_ring(&mut self) -> FocusRing {
            FocusRing {
                len: self.ring_len,
                active: self.active,
            }
        }
        fn focus_at(&mut self, index: usize) {
            self.active = Some(index);
            self.calls.push(Call::FocusAt(index));
        }
        fn open_external(&mut self, url: &str) {
            self.calls.push(Call::Open(url.to_string()));
        }
    }

    const URL: &str = "https://discord.com/oauth2/authorize?client_id=1&scope=bot";

    fn modal(host: FakeHost) -> InviteModal<FakeHost> {
        InviteModal::new(host, URL)
    }

    #[test]
    fn starts_hidden() {
        let m = modal(FakeHost::default());
        assert_eq!(m.state(), ModalState::Hidden);
        assert!(m.host().calls.is_empty());
    }

    #[test]
    fn show_locks_scroll_and_focuses_primary_action() {
        let mut m = modal(FakeHost::default());
        m.show();
        assert!(m.is_shown());
        assert_eq!(
            m.host().calls,
            vec![Call::Shown(true), Call::ScrollLocked(true), Call::FocusPrimary]
        );
    }

    #[test]
    fn show_twice_stays_shown() {
        let mut m = modal(FakeHost::default());
        m.show();
        m.show();
        assert!(m.is_shown());
        assert_eq!(m.host().calls.len(), 3);
    }

    #[test]
    fn hide_while_hidden_is_noop() {
        let mut m = modal(FakeHost::default());
        m.hide();
        assert_eq!(m.state(), ModalState::Hidden);
        assert!(m.host().calls.is_empty());
    }

    #[test]
    fn escape_hides_and_returns_focus_to_trigger() {
        let mut m = modal(FakeHost::default());
        m.show();
        assert!(!m.handle_key("Escape", false));
        assert_eq!(m.state(), ModalState::Hidden);
        assert_eq!(
            &m.host().calls[3..],
            &[
                Call::CancelFocus,
                Call::Shown(false),
                Call::ScrollLocked(false),
                Call::RestoreTrigger
            ]
        );
    }

    #[test]
    fn closing_before_focus_settles_cancels_the_pending_focus() {
        let mut m = modal(FakeHost::default());
        m.show();
        m.hide();
        let calls = &m.host().calls;
        let requested = calls.iter().position(|c| *c == Call::FocusPrimary).unwrap();
        let cancelled = calls.iter().position(|c| *c == Call::CancelFocus).unwrap();
        let restored = calls.iter().position(|c| *c == Call::RestoreTrigger).unwrap();
        assert!(requested < cancelled && cancelled < restored);
        assert_eq!(calls.iter().filter(|c| **c == Call::CancelFocus).count(), 1);
    }

    #[test]
    fn keys_are_ignored_while_hidden() {
        let mut m = modal(FakeHost::with_ring(3, Some(2)));
        assert!(!m.handle_key("Tab", false));
        assert!(!m.handle_key("Escape", false));
        assert!(m.host().calls.is_empty());
    }

    #[test]
    fn tab_on_last_wraps_to_first() {
        let mut m = modal(FakeHost::with_ring(3, Some(2)));
        m.show();
        assert!(m.handle_key("Tab", false));
        assert_eq!(m.host().calls.last(), Some(&Call::FocusAt(0)));
        assert_eq!(m.host().active, Some(0));
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        let mut m = modal(FakeHost::with_ring(3, Some(0)));
        m.show();
        assert!(m.handle_key("Tab", true));
        assert_eq!(m.host().active, Some(2));
    }

    #[test]
    fn tab_in_the_middle_is_left_to_the_browser() {
        let mut m = modal(FakeHost::with_ring(3, Some(1)));
        m.show();
        assert!(!m.handle_key("Tab", false));
        assert!(!m.handle_key("Tab", true));
        assert_eq!(m.host().active, Some(1));
    }

    #[test]
    fn confirm_opens_link_once_and_hides() {
        let mut m = modal(FakeHost::default());
        m.show();
        m.confirm();
        assert_eq!(m.state(), ModalState::Hidden);
        assert_eq!(m.host().opened(), vec![URL]);
        assert_eq!(m.host().calls.last(), Some(&Call::RestoreTrigger));
    }

    #[test]
    fn trap_focus_edge_cases() {
        assert_eq!(trap_focus(FocusRing { len: 0, active: None }, false), None);
        assert_eq!(trap_focus(FocusRing { len: 1, active: Some(0) }, false), Some(0));
        assert_eq!(trap_focus(FocusRing { len: 1, active: Some(0) }, true), Some(0));
        assert_eq!(trap_focus(FocusRing { len: 3, active: None }, false), None);
    }

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Escape"));
        assert!(!is_activation_key("a"));
    }
}
