//! Background color resolution for gauges hosted in arbitrary containers.

use dialkit_types::Color;
use log::warn;

/// Fallback when neither the gauge config nor the host names a background.
pub const DEFAULT_BACKGROUND: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Capability exposed by container types that know their effective
/// background color.
///
/// A gauge hosted in a themed panel should blend into it without the gauge
/// knowing the panel's concrete type; hosts implement this instead of being
/// sniffed for.
pub trait BackgroundProvider {
    fn effective_background(&self) -> Option<Color>;
}

impl BackgroundProvider for Color {
    fn effective_background(&self) -> Option<Color> {
        Some(*self)
    }
}

/// Resolve a gauge background: the explicit config color wins, then the
/// host capability, then [`DEFAULT_BACKGROUND`].
pub fn resolve(explicit: Option<Color>, host: Option<&dyn BackgroundProvider>) -> Color {
    if let Some(color) = explicit {
        return color;
    }
    if let Some(color) = host.and_then(|h| h.effective_background()) {
        return color;
    }
    warn!("no background color available from host, falling back to default");
    DEFAULT_BACKGROUND
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ThemedPanel {
        bg: Option<Color>,
    }

    impl BackgroundProvider for ThemedPanel {
        fn effective_background(&self) -> Option<Color> {
            self.bg
        }
    }

    #[test]
    fn test_explicit_color_wins() {
        let panel = ThemedPanel {
            bg: Some(Color::from_rgba8(30, 30, 30, 255)),
        };
        let explicit = Color::from_rgba8(240, 240, 240, 255);
        assert_eq!(resolve(Some(explicit), Some(&panel)), explicit);
    }

    #[test]
    fn test_host_capability_used() {
        let bg = Color::from_rgba8(30, 30, 30, 255);
        let panel = ThemedPanel { bg: Some(bg) };
        assert_eq!(resolve(None, Some(&panel)), bg);
    }

    #[test]
    fn test_falls_back_to_default() {
        let _ = env_logger::builder().is_test(true).try_init();
        let panel = ThemedPanel { bg: None };
        assert_eq!(resolve(None, Some(&panel)), DEFAULT_BACKGROUND);
        assert_eq!(resolve(None, None), DEFAULT_BACKGROUND);
    }
}
