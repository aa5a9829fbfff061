//! Settings menu model (data only).
//!
//! Kept outside the input handler so the handler and the popup renderer read
//! the same item list.

use super::state::{ActiveView, AppState};
use crate::core::projection::CellMetrics;

const THRESHOLDS: &[f64] = &[300.0, 500.0, 800.0, 1200.0, 2000.0];
const CELL_SIZES: &[(f64, f64)] = &[(6.0, 12.0), (8.0, 16.0), (10.0, 20.0), (12.0, 24.0)];

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. } | Self::Cycle { label, .. } => label,
        }
    }
}

fn persist(s: &mut AppState) {
    if let Err(e) = s.config.save() {
        tracing::warn!("saving config failed: {e:#}");
        s.status_message = Some("Could not save settings".to_string());
    }
}

/// Index of the preset after `current` (or the first if `current` is custom).
fn next_index<T: PartialEq>(presets: &[T], current: &T) -> usize {
    presets
        .iter()
        .position(|p| p == current)
        .map_or(0, |i| (i + 1) % presets.len())
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Cycle {
        label: "Fling Threshold",
        value: |s| format!("{} px/s", s.nav.resolver().velocity_threshold()),
        cycle: |s| {
            let next = THRESHOLDS[next_index(THRESHOLDS, &s.config.velocity_threshold)];
            s.config.velocity_threshold = next;
            s.nav.set_velocity_threshold(next);
            persist(s);
            s.status_message = Some(format!("Fling threshold: {next} px/s"));
        },
    },
    SettingsItem::Cycle {
        label: "Cell Size",
        value: |s| {
            let m = s.config.cell_metrics;
            format!("{}×{} px", m.width_px, m.height_px)
        },
        cycle: |s| {
            let m = s.config.cell_metrics;
            let (w, h) = CELL_SIZES[next_index(CELL_SIZES, &(m.width_px, m.height_px))];
            s.config.cell_metrics = CellMetrics::new(w, h);
            s.sync_viewport();
            persist(s);
            s.status_message = Some(format!("Cell size: {w}×{h} px"));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_index_wraps_and_recovers() {
        assert_eq!(next_index(THRESHOLDS, &500.0), 2);
        assert_eq!(next_index(THRESHOLDS, &2000.0), 0);
        assert_eq!(next_index(THRESHOLDS, &777.0), 0);
    }
}
