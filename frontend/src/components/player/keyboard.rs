pub const SEEK_STEP_SECS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    TogglePlay,
    SeekBy(f64),
    ToggleFullscreen,
    ToggleMute,
}

pub fn shortcut_for(key: &str) -> Option<Shortcut> {
    match key {
        " " | "Spacebar" => Some(Shortcut::TogglePlay),
        "ArrowLeft" => Some(Shortcut::SeekBy(-SEEK_STEP_SECS)),
        "ArrowRight" => Some(Shortcut::SeekBy(SEEK_STEP_SECS)),
        "f" | "F" => Some(Shortcut::ToggleFullscreen),
        "m" | "M" => Some(Shortcut::ToggleMute),
        _ => None,
    }
}

/// Keys typed into form fields never reach the player.
pub fn is_text_entry(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("input") || tag_name.eq_ignore_ascii_case("textarea")
}

/// Never below zero; capped at `duration` only when it is known.
pub fn clamp_seek(current: f64, delta: f64, duration: f64) -> f64 {
    let target = (current + delta).max(0.0);
    if duration.is_finite() && duration > 0.0 {
        target.min(duration)
    } else {
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_player_keys() {
        assert_eq!(shortcut_for(" "), Some(Shortcut::TogglePlay));
        assert_eq!(shortcut_for("ArrowLeft"), Some(Shortcut::SeekBy(-10.0)));
        assert_eq!(shortcut_for("ArrowRight"), Some(Shortcut::SeekBy(10.0)));
        assert_eq!(shortcut_for("F"), Some(Shortcut::ToggleFullscreen));
        assert_eq!(shortcut_for("m"), Some(Shortcut::ToggleMute));
        assert_eq!(shortcut_for("k"), None);
        assert_eq!(shortcut_for("Enter"), None);
    }

    #[test]
    fn ignores_form_fields() {
        assert!(is_text_entry("INPUT"));
        assert!(is_text_entry("textarea"));
        assert!(!is_text_entry("VIDEO"));
        assert!(!is_text_entry("BUTTON"));
    }

    #[test]
    fn seek_is_clamped() {
        assert_eq!(clamp_seek(4.0, -10.0, 120.0), 0.0);
        assert_eq!(clamp_seek(115.0, 10.0, 120.0), 120.0);
        assert_eq!(clamp_seek(30.0, 10.0, 120.0), 40.0);
        assert_eq!(clamp_seek(30.0, 10.0, f64::NAN), 40.0);
        assert_eq!(clamp_seek(30.0, 10.0, f64::INFINITY), 40.0);
    }
}
