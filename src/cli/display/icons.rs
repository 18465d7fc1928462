//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (every selected resource applied)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (some resources skipped)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (nothing applied)
    pub const ERROR: &'static str = "✗";

    /// Pending icon (dry run)
    pub const PENDING: &'static str = "⏳";

    /// Unknown icon
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon based on applied/selected resources
    pub fn get_apply_icon(applied: u32, selected: u32) -> &'static str {
        if selected == 0 {
            Self::UNKNOWN
        } else if applied == selected {
            Self::SUCCESS
        } else if applied > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    /// Get status text based on applied/selected resources
    pub fn get_apply_text(applied: u32, selected: u32) -> &'static str {
        if selected == 0 {
            "No changes"
        } else if applied == selected {
            "Applied"
        } else if applied > 0 {
            "Partial"
        } else {
            "Skipped"
        }
    }
}
