// ABOUTME: Inline style attribute processing: declaration lookup, replacement, value normalization.
// ABOUTME: Handles the !important marker and computes hsl() values down to rgb() form.

use shades_engine::color::hsl_to_rgb;

/// Looks up a property in an inline `style` attribute.
///
/// The last declaration of the property wins, matching cascade order within
/// one attribute. A trailing `!important` marker is stripped from the
/// returned value.
pub(crate) fn property_value(style: &str, name: &str) -> Option<String> {
    let mut found = None;
    for declaration in style.split(';') {
        let Some((prop, value)) = declaration.split_once(':') else {
            continue;
        };
        if !prop.trim().eq_ignore_ascii_case(name) {
            continue;
        }
        let value = value.trim();
        let value = match value.strip_suffix("!important") {
            Some(rest) => rest.trim_end(),
            None => value,
        };
        found = Some(value.to_string());
    }
    found
}

/// Returns the style attribute with `name` set to `value`, replacing any
/// existing declarations of the property. With `important` the declaration is
/// written at `!important` precedence, overriding one already in force.
pub(crate) fn with_property(style: &str, name: &str, value: &str, important: bool) -> String {
    let mut declarations: Vec<String> = style
        .split(';')
        .filter_map(|declaration| {
            let trimmed = declaration.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.split_once(':') {
                Some((prop, _)) if prop.trim().eq_ignore_ascii_case(name) => None,
                _ => Some(trimmed.to_string()),
            }
        })
        .collect();

    let suffix = if important { " !important" } else { "" };
    declarations.push(format!("{}: {}{}", name, value, suffix));
    declarations.join("; ")
}

/// Computes an `hsl(...)`/`hsla(...)` value down to the `rgb(...)` form a
/// rendering engine would report. Anything else is returned unchanged.
pub(crate) fn normalize_color(value: &str) -> String {
    if !value.starts_with("hsl") {
        return value.to_string();
    }
    let Some(open) = value.find('(') else {
        return value.to_string();
    };
    let inner = value[open + 1..].trim_end_matches(')');
    let channels: Vec<&str> = inner.split(',').map(str::trim).collect();
    if channels.len() < 3 {
        return value.to_string();
    }

    let hue = channels[0].trim_end_matches("deg").parse::<f64>();
    let sat = channels[1].trim_end_matches('%').parse::<f64>();
    let lit = channels[2].trim_end_matches('%').parse::<f64>();
    let (Ok(hue), Ok(sat), Ok(lit)) = (hue, sat, lit) else {
        return value.to_string();
    };

    let rgb = hsl_to_rgb(hue / 360.0, sat / 100.0, lit / 100.0);
    match channels.get(3) {
        Some(alpha) => format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, alpha),
        None => format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_property_value_basic() {
        assert_eq!(
            property_value("color: red; background-color: rgb(1, 2, 3)", "background-color"),
            Some("rgb(1, 2, 3)".to_string())
        );
        assert_eq!(property_value("color: red", "background-color"), None);
    }

    #[test]
    fn test_property_value_last_declaration_wins() {
        assert_eq!(
            property_value("color: red; color: blue", "color"),
            Some("blue".to_string())
        );
    }

    #[test]
    fn test_property_value_strips_important() {
        assert_eq!(
            property_value("color: red !important", "color"),
            Some("red".to_string())
        );
    }

    #[test]
    fn test_property_value_case_insensitive_name() {
        assert_eq!(
            property_value("COLOR: red", "color"),
            Some("red".to_string())
        );
    }

    #[test]
    fn test_with_property_appends() {
        assert_eq!(
            with_property("color: red", "background-color", "rgb(1,2,3)", false),
            "color: red; background-color: rgb(1,2,3)"
        );
    }

    #[test]
    fn test_with_property_replaces_existing() {
        assert_eq!(
            with_property("background-color: white; color: red", "background-color", "rgb(1,2,3)", true),
            "color: red; background-color: rgb(1,2,3) !important"
        );
    }

    #[test]
    fn test_with_property_overrides_existing_important() {
        let style = "background-color: white !important";
        assert_eq!(
            with_property(style, "background-color", "rgb(1,2,3)", true),
            "background-color: rgb(1,2,3) !important"
        );
    }

    #[test]
    fn test_with_property_on_empty_style() {
        assert_eq!(
            with_property("", "background-color", "rgb(1,2,3)", false),
            "background-color: rgb(1,2,3)"
        );
    }

    #[test]
    fn test_normalize_color_computes_hsl() {
        assert_eq!(normalize_color("hsl(0, 0%, 66%)"), "rgb(168, 168, 168)");
        assert_eq!(normalize_color("hsl(0, 100%, 50%)"), "rgb(255, 0, 0)");
        assert_eq!(
            normalize_color("hsla(0, 0%, 50%, 0.5)"),
            "rgba(128, 128, 128, 0.5)"
        );
    }

    #[test]
    fn test_normalize_color_leaves_other_forms_alone() {
        assert_eq!(normalize_color("rgb(1, 2, 3)"), "rgb(1, 2, 3)");
        assert_eq!(normalize_color("transparent"), "transparent");
        assert_eq!(normalize_color("hsl(garbage)"), "hsl(garbage)");
    }
}
