use std::fmt::Write;

use pdfdesk_core::{
    Affordance, AppViewModel, DownloadRow, DownloadStatus, ErrorCategory, PreviewPane,
    ResultPanel, SlotView, FILL_COMPLETE,
};

const BAR_WIDTH: usize = 20;

/// Text rendering of the whole view model.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    for slot in &view.slots {
        render_slot(&mut out, slot);
    }

    if view.progress_visible {
        let _ = writeln!(out, "{}", progress_bar(view.progress.fill));
    }

    render_panel(&mut out, &view.panel);

    if !view.downloads.is_empty() {
        out.push_str("Downloads:\n");
        for row in &view.downloads {
            let _ = writeln!(out, "  {}", format_download(row));
        }
    }

    out
}

fn render_slot(out: &mut String, slot: &SlotView) {
    let marker = match slot.affordance {
        Affordance::Highlighted => " [drop here]",
        Affordance::Resting => "",
    };
    if slot.files.is_empty() {
        let _ = writeln!(out, "{}{}: (no files)", slot.slot, marker);
        return;
    }
    let _ = writeln!(out, "{}{}:", slot.slot, marker);
    for row in &slot.files {
        let _ = writeln!(
            out,
            "  [{}] {} ({} B)",
            row.index,
            row.name,
            format_with_commas(row.size)
        );
    }
}

fn progress_bar(fill: u8) -> String {
    let filled = usize::from(fill.min(FILL_COMPLETE)) * BAR_WIDTH / usize::from(FILL_COMPLETE);
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        fill
    )
}

fn render_panel(out: &mut String, panel: &ResultPanel) {
    match panel {
        ResultPanel::Hidden => {}
        ResultPanel::Success {
            kind,
            message,
            preview,
        } => {
            let _ = writeln!(out, "OK {kind}: {message}");
            if let Some(pane) = preview {
                render_preview(out, pane);
            }
        }
        ResultPanel::Error {
            kind,
            category,
            message,
        } => {
            let label = match category {
                ErrorCategory::Validation => "invalid",
                ErrorCategory::Request => "failed",
                ErrorCategory::Transport => "unreachable",
            };
            let _ = writeln!(out, "ERR {kind} ({label}): {message}");
        }
    }
}

fn render_preview(out: &mut String, pane: &PreviewPane) {
    let visible = pane.visible_lines();
    if visible.is_empty() {
        out.push_str("  (empty preview)\n");
        return;
    }
    let first = pane.scroll_offset() + 1;
    let last = pane.scroll_offset() + visible.len();
    let _ = writeln!(
        out,
        "  Preview (lines {first}-{last} of {}):",
        pane.total_lines()
    );
    for line in visible {
        let _ = writeln!(out, "  | {line}");
    }
}

fn format_download(row: &DownloadRow) -> String {
    match &row.status {
        DownloadStatus::Pending => format!("{} ... pending", row.filename),
        DownloadStatus::Saved(path) => format!("{} saved to {}", row.filename, path.display()),
        DownloadStatus::Failed(reason) => format!("{} failed: {}", row.filename, reason),
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
