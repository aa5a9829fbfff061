//! User configuration — keybindings, navigation tuning and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/page-grid/config.toml` (default
//! `~/.config/page-grid/config.toml`). Unknown keys are skipped and bad
//! values fall back to defaults, so a hand-edited file never blocks startup.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::projection::CellMetrics;
use crate::core::snap::DEFAULT_VELOCITY_THRESHOLD;

pub const DEFAULT_FPS: u32 = 60;

// ───────────────────────────────────────── actions ───────────

/// All configurable navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PrevPage,
    NextPage,
    PrevCard,
    NextCard,
    FirstPage,
    LastPage,
    MainCard,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::PrevPage,
        Action::NextPage,
        Action::PrevCard,
        Action::NextCard,
        Action::FirstPage,
        Action::LastPage,
        Action::MainCard,
        Action::OpenSettings,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::PrevPage => "Previous Page",
            Action::NextPage => "Next Page",
            Action::PrevCard => "Previous Card",
            Action::NextCard => "Next Card",
            Action::FirstPage => "First Page",
            Action::LastPage => "Last Page",
            Action::MainCard => "Back to Main Page",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::PrevPage => "prev_page",
            Action::NextPage => "next_page",
            Action::PrevCard => "prev_card",
            Action::NextCard => "next_card",
            Action::FirstPage => "first_page",
            Action::LastPage => "last_page",
            Action::MainCard => "main_card",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding (key code + modifier combination).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Only these modifiers take part in matching.
fn modifier_mask() -> KeyModifiers {
    KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = modifier_mask();
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & modifier_mask(),
        }
    }

    /// User-facing label (e.g. `"Shift+↓"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    /// Config-file form (e.g. `"Shift+Down"`).
    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::Left, true) => "←".into(),
            (KeyCode::Right, true) => "→".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::Left, false) => "Left".into(),
            (KeyCode::Right, false) => "Right".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::Backspace, _) => "Backspace".into(),
            (KeyCode::Delete, _) => "Delete".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::PageUp, _) => "PageUp".into(),
            (KeyCode::PageDown, _) => "PageDown".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Down"`, `"j"`, `"PageUp"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            f if f.starts_with('f') && f.len() > 1 => KeyCode::F(f[1..].parse().ok()?),
            // Single characters match case-sensitively: `G` and `g` differ.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Keybindings plus navigation tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Fling threshold (px/s) for the snap resolver.
    pub velocity_threshold: f64,
    /// Animation frame rate.
    pub fps: u32,
    /// Pixel size of one terminal cell.
    pub cell_metrics: CellMetrics,
    /// Where `save` writes; `None` keeps the config in memory only.
    pub path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            fps: DEFAULT_FPS,
            cell_metrics: CellMetrics::default(),
            path: None,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PrevPage, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(NextPage, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(PrevCard, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(NextCard, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(FirstPage, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(LastPage, vec![KeyBind::new(End, n)]);
        m.insert(MainCard, vec![KeyBind::new(Char('0'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action bound to a key event. The binding with the most
    /// modifiers wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Bind `bind` to `action`, stealing it from any other action.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}{}: pages | {}{}: cards | wheel/drag | {}: settings",
            self.short_binding(Action::PrevPage),
            self.short_binding(Action::NextPage),
            self.short_binding(Action::PrevCard),
            self.short_binding(Action::NextCard),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!("cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        };
        config.path = Some(path);
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, self.serialise())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "velocity_threshold" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.velocity_threshold = v.abs().clamp(50.0, 10_000.0);
                    }
                    continue;
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.fps = v.clamp(10, 240);
                    }
                    continue;
                }
                "cell_width_px" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.cell_metrics =
                            CellMetrics::new(v.clamp(1.0, 64.0), config.cell_metrics.height_px);
                    }
                    continue;
                }
                "cell_height_px" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.cell_metrics =
                            CellMetrics::new(config.cell_metrics.width_px, v.clamp(1.0, 64.0));
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::warn!("ignoring unknown config key `{key}`");
                continue;
            };

            // An empty value is an action the user unbound on purpose.
            if value.is_empty() {
                config.bindings.insert(action, Vec::new());
                continue;
            }
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# page-grid configuration".to_string(),
            String::new(),
            "# Navigation".to_string(),
            format!("velocity_threshold = {}", self.velocity_threshold),
            format!("fps = {}", self.fps),
            format!("cell_width_px = {}", self.cell_metrics.width_px),
            format!("cell_height_px = {}", self.cell_metrics.height_px),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/page-grid/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("page-grid").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_arrows_navigate() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Up)), Some(Action::PrevPage));
        assert_eq!(config.match_key(key(KeyCode::Down)), Some(Action::NextPage));
        assert_eq!(config.match_key(key(KeyCode::Left)), Some(Action::PrevCard));
        assert_eq!(config.match_key(key(KeyCode::Right)), Some(Action::NextCard));
        assert_eq!(config.match_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn modifiers_must_match() {
        let config = AppConfig::default();
        let alt_up = KeyEvent::new(KeyCode::Up, KeyModifiers::ALT);
        assert_eq!(config.match_key(alt_up), None);
    }

    #[test]
    fn rebinding_steals_key_from_other_action() {
        let mut config = AppConfig::default();
        config.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(config.match_key(key(KeyCode::Char('j'))), Some(Action::Quit));
        assert_eq!(config.display_bindings(Action::NextPage), "↓");
    }

    #[test]
    fn parse_reads_numbers_and_bindings() {
        let config = AppConfig::parse(
            "velocity_threshold = 800\nfps = 30\ncell_height_px = 20\nnext_page = Shift+Down, n\n",
        );
        assert_eq!(config.velocity_threshold, 800.0);
        assert_eq!(config.fps, 30);
        assert_eq!(config.cell_metrics, CellMetrics::new(8.0, 20.0));
        assert_eq!(
            config.bindings[&Action::NextPage],
            vec![
                KeyBind::new(KeyCode::Down, KeyModifiers::SHIFT),
                KeyBind::new(KeyCode::Char('n'), KeyModifiers::NONE),
            ]
        );
    }

    #[test]
    fn parse_clamps_and_skips_garbage() {
        let config = AppConfig::parse("fps = 100000\nvelocity_threshold = fast\nbogus = 1\nnext_page = Hyper+x");
        assert_eq!(config.fps, 240);
        assert_eq!(config.velocity_threshold, DEFAULT_VELOCITY_THRESHOLD);
        assert_eq!(config.bindings[&Action::NextPage], AppConfig::default_bindings()[&Action::NextPage]);
    }

    #[test]
    fn serialise_then_parse_keeps_settings() {
        let mut config = AppConfig::default();
        config.velocity_threshold = 1200.0;
        config.cell_metrics = CellMetrics::new(10.0, 20.0);
        config.add_binding(Action::LastPage, KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT));

        let reparsed = AppConfig::parse(&config.serialise());
        assert_eq!(reparsed.velocity_threshold, 1200.0);
        assert_eq!(reparsed.cell_metrics, config.cell_metrics);
        assert_eq!(reparsed.bindings, config.bindings);
    }

    #[test]
    fn cleared_binding_stays_cleared_after_reload() {
        let mut config = AppConfig::default();
        config.bindings.insert(Action::FirstPage, Vec::new());

        let reparsed = AppConfig::parse(&config.serialise());
        assert_eq!(reparsed.display_bindings(Action::FirstPage), "unbound");
        assert_eq!(reparsed.match_key(key(KeyCode::Home)), None);
        assert_eq!(reparsed.bindings[&Action::LastPage], config.bindings[&Action::LastPage]);
    }

    #[test]
    fn key_display_forms() {
        let bind = KeyBind::new(KeyCode::Down, KeyModifiers::SHIFT);
        assert_eq!(bind.display(), "Shift+↓");
        assert_eq!(bind.to_config_string(), "Shift+Down");
        assert_eq!(KeyBind::parse("space"), Some(KeyBind::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(KeyBind::parse("F5"), Some(KeyBind::new(KeyCode::F(5), KeyModifiers::NONE)));
    }
}
