//! Table rendering for CLI output

use super::colors::table_color_to_colored_str;
use super::{ColorTheme, StatusIcon};
use crate::domain::pipeline::DeploySummary;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use std::collections::BTreeMap;

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render the resolved template parameters as a formatted table
    pub fn render_parameters(&self, params: &BTreeMap<String, String>) -> String {
        if params.is_empty() {
            return "No template parameters set".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("PARAMETER").set_alignment(CellAlignment::Left),
                Cell::new("VALUE").set_alignment(CellAlignment::Left),
            ]);

        for (key, value) in params {
            table.add_row(vec![
                Cell::new(key).fg(self.theme.info),
                Cell::new(value),
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Template Parameters {} ─╮\n",
            format!("[{} set]", params.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output
    }

    /// Render the end-of-run summary line
    pub fn render_summary(&self, summary: &DeploySummary, dry_run: bool) -> String {
        let applied = summary.created + summary.replaced + summary.deleted;
        let selected = applied + summary.skipped;

        let icon = StatusIcon::get_apply_icon(applied, selected);
        let text = StatusIcon::get_apply_text(applied, selected);

        let counts = [
            (summary.created, "created", self.theme.success),
            (summary.replaced, "replaced", self.theme.info),
            (summary.skipped, "skipped", self.theme.warning),
            (summary.deleted, "deleted", self.theme.error),
        ];

        let rendered: Vec<String> = counts
            .iter()
            .map(|(count, label, base)| {
                let color = self.theme.get_count_color(*count, *base);
                format!("{count} {label}")
                    .color(table_color_to_colored_str(color))
                    .to_string()
            })
            .collect();

        let mut output = format!("{} {}: {}", icon, text, rendered.join("  "));
        if dry_run {
            output.push_str(&format!(
                "\n{} Dry run: no changes were made",
                StatusIcon::PENDING
            ));
        }
        output
    }
}
