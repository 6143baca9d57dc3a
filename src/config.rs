use crate::error::LandingError;

/// Discord authorization link opened by the invite modal's confirm button.
pub const INVITE_URL: &str = "https://discord.com/oauth2/authorize?client_id=1412866688843776152&permissions=8&integration_type=0&scope=bot";

/// Element lookups the page script depends on. Every one of them is optional.
pub mod selectors {
    pub const CANVAS_ID: &str = "bg";
    pub const CARD: &str = "#card";
    pub const LOGO: &str = ".logo";
    pub const CTA_BUTTON: &str = ".btn";
    pub const DECOR_MARKERS: &str = ".decor-svgs circle";
    pub const INVITE_TRIGGER: &str = "#addBtn";
    pub const INVITE_MODAL: &str = "#inviteModal";
    pub const CONFIRM_BUTTON: &str = "#confirmInvite";
    pub const CANCEL_BUTTON: &str = "#cancelInvite";
    pub const CLOSE_ACTIONS: &str = "[data-action=\"close\"]";
    pub const FOCUSABLE: &str =
        "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

    pub const ENTERED_CLASS: &str = "enter";
    pub const HIDDEN_CLASS: &str = "hidden";
    pub const SHOWN_CLASS: &str = "show";
}

pub fn get_log_level() -> log::Level {
    let fallback = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    option_env!("PROBOT_LOG")
        .and_then(|level| level.parse().ok())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Viewport area per particle. Bigger means fewer particles.
    pub particle_density: f64,
    /// Viewports narrower than this get `small_screen_density_factor` fewer particles.
    pub small_screen_width: f64,
    pub small_screen_density_factor: f64,
    pub resize_debounce_ms: u32,
    pub entrance_delay_ms: u32,
    pub focus_delay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_density: 120_000.0,
            small_screen_width: 600.0,
            small_screen_density_factor: 1.8,
            resize_debounce_ms: 120,
            entrance_delay_ms: 120,
            focus_delay_ms: 10,
        }
    }
}

impl Config {
    /// Keys as they appear in `HTMLElement.dataset` (camelCase).
    pub const OVERRIDE_KEYS: [&'static str; 2] = ["particleDensity", "resizeDebounceMs"];

    /// Applies a single `data-*` override from the page. Unknown keys are ignored.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), LandingError> {
        let invalid = || LandingError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "particleDensity" => {
                let density: f64 = value.trim().parse().map_err(|_| invalid())?;
                if !density.is_finite() || density <= 0.0 {
                    return Err(invalid());
                }
                self.particle_density = density;
            }
            "resizeDebounceMs" => {
                self.resize_debounce_ms = value.trim().parse().map_err(|_| invalid())?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Reads overrides from `<body data-…>`, keeping defaults for anything invalid.
    pub fn from_document(document: &web_sys::Document) -> Self {
        let mut config = Self::default();
        let Some(body) = document.body() else {
            return config;
        };
        let dataset = body.dataset();
        for key in Self::OVERRIDE_KEYS {
            if let Some(value) = dataset.get(key) {
                if let Err(e) = config.apply_override(key, &value) {
                    log::warn!("Ignoring page config: {}", e);
                }
            }
        }
        config
    }

    /// Density used for a viewport of the given width.
    pub fn effective_density(&self, width: f64) -> f64 {
        if width < self.small_screen_width {
            self.particle_density * self.small_screen_density_factor
        } else {
            self.particle_density
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let config = Config::default();
        assert_eq!(config.particle_density, 120_000.0);
        assert_eq!(config.resize_debounce_ms, 120);
        assert_eq!(config.focus_delay_ms, 10);
    }

    #[test]
    fn small_screens_use_reduced_density() {
        let config = Config::default();
        assert_eq!(config.effective_density(1200.0), 120_000.0);
        assert!((config.effective_density(500.0) - 216_000.0).abs() < 1e-6);
        assert_eq!(config.effective_density(600.0), 120_000.0);
    }

    #[test]
    fn density_override_is_validated() {
        let mut config = Config::default();
        config.apply_override("particleDensity", "90000").unwrap();
        assert_eq!(config.particle_density, 90_000.0);

        assert!(config.apply_override("particleDensity", "0").is_err());
        assert!(config.apply_override("particleDensity", "-5").is_err());
        assert!(config.apply_override("particleDensity", "lots").is_err());
        assert_eq!(config.particle_density, 90_000.0);
    }

    #[test]
    fn invite_link_is_not_overridable() {
        let mut config = Config::default();
        config
            .apply_override("inviteUrl", "https://evil.example/")
            .unwrap();
        assert_eq!(config, Config::default());
        assert!(!Config::OVERRIDE_KEYS.contains(&"inviteUrl"));
        assert!(INVITE_URL.starts_with("https://discord.com/oauth2/authorize?"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut config = Config::default();
        config.apply_override("theme", "dark").unwrap();
        assert_eq!(config, Config::default());
    }
}
