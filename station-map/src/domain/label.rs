//! Station-type label normalization.
//!
//! Wikidata labels S-tog and Metro lines inconsistently: sometimes as a
//! bare line code (`"a"`, `"Bx"`), sometimes with a legacy prefix. Every
//! label is brought into the `"<code> line"` display form once, during row
//! conversion.

/// Legacy label for the F branch of the S-tog network.
const LEGACY_F_LINE: &str = "S-tog line F";

/// Legacy label for the Bx branch of the S-tog network.
const LEGACY_BX_LINE: &str = "S-tog Bx";

/// Bare line codes that get a `" line"` suffix (compared lower-cased).
const LINE_CODES: [&str; 7] = ["a", "b", "c", "e", "h", "bx", "f"];

/// Normalize a raw station-type label into its display form.
///
/// The two legacy spellings are matched exactly (case-sensitive); bare line
/// codes are matched case-insensitively and keep their original casing.
///
/// # Examples
///
/// ```
/// use station_map::domain::normalize;
///
/// assert_eq!(normalize(Some("S-tog Bx")).as_deref(), Some("Bx line"));
/// assert_eq!(normalize(Some("a")).as_deref(), Some("a line"));
/// assert_eq!(normalize(Some("Terminal")).as_deref(), Some("Terminal"));
/// assert_eq!(normalize(None), None);
/// ```
pub fn normalize(raw_label: Option<&str>) -> Option<String> {
    let label = match raw_label? {
        LEGACY_F_LINE => "F line",
        LEGACY_BX_LINE => "Bx line",
        other => other,
    };

    let lowered = label.to_lowercase();
    if LINE_CODES.contains(&lowered.as_str()) {
        Some(format!("{label} line"))
    } else {
        Some(label.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_stays_absent() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn legacy_spellings_rewritten() {
        assert_eq!(normalize(Some("S-tog line F")).as_deref(), Some("F line"));
        assert_eq!(normalize(Some("S-tog Bx")).as_deref(), Some("Bx line"));
    }

    #[test]
    fn legacy_spellings_are_case_sensitive() {
        assert_eq!(normalize(Some("s-tog bx")).as_deref(), Some("s-tog bx"));
        assert_eq!(
            normalize(Some("S-TOG LINE F")).as_deref(),
            Some("S-TOG LINE F")
        );
    }

    #[test]
    fn line_codes_get_suffix_case_insensitively() {
        assert_eq!(normalize(Some("a")).as_deref(), Some("a line"));
        assert_eq!(normalize(Some("C")).as_deref(), Some("C line"));
        assert_eq!(normalize(Some("BX")).as_deref(), Some("BX line"));
        assert_eq!(normalize(Some("h")).as_deref(), Some("h line"));
    }

    #[test]
    fn other_labels_unchanged() {
        assert_eq!(normalize(Some("Terminal")).as_deref(), Some("Terminal"));
        assert_eq!(normalize(Some("d")).as_deref(), Some("d"));
        assert_eq!(normalize(Some("")).as_deref(), Some(""));
        assert_eq!(normalize(Some(" a")).as_deref(), Some(" a"));
    }

    #[test]
    fn canonical_forms_are_fixed_points() {
        for label in ["F line", "Bx line", "a line", "Terminal"] {
            assert_eq!(normalize(Some(label)).as_deref(), Some(label));
        }
    }
}
