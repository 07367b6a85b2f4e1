use std::fmt::Write;

use listing_core::{ListingViewModel, RowView};

/// Renders the listing as plain text, one line per master-list slot.
pub fn render(view: &ListingViewModel) -> String {
    let mut out = String::new();
    if view.loading {
        match &view.load_error {
            Some(error) => {
                let _ = writeln!(out, "{}: {error} (type `reload` to retry)", view.title);
            }
            None => {
                let _ = writeln!(out, "{}: loading...", view.title);
            }
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{} | page {} | {} shown, {} found, {} total",
        view.title, view.page, view.count, view.found_count, view.total_count
    );
    if let Some(notice) = &view.upload_notice {
        let _ = writeln!(out, "! {notice}");
    }
    if view.none_found {
        let _ = writeln!(out, "  No files found.");
    }

    for (index, row) in view.rows.iter().enumerate() {
        match row {
            Some(row) => {
                let _ = writeln!(out, "{index:>4}  {}", describe(row));
            }
            None => {
                let _ = writeln!(out, "{index:>4}  (removing)");
            }
        }
    }

    if let Some(error) = &view.load_error {
        let _ = writeln!(out, "load error: {error} (type `more` or `reload` to retry)");
    } else if view.is_next_page_loading {
        let _ = writeln!(out, "loading more...");
    } else if view.has_next_page {
        let _ = writeln!(out, "more available (`more`)");
    }
    out
}

fn describe(row: &RowView) -> String {
    let mut line = format!("{:<12} {}", row.id, row.name);
    if let Some(size) = row.size {
        let _ = write!(line, "  {}", format_size(size));
    }
    if let Some(uploaded_at) = &row.uploaded_at {
        let _ = write!(line, "  {uploaded_at}");
    }
    line
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
