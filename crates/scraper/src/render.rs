//! Chat-window fragments for fetched documents

use std::fmt::Write;

use compliance_agent_core::{DocumentCategory, StateKey, TableMatrix, SHOP_ESTABLISHMENT_URL};

/// Escape text for embedding in HTML
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn table_heading(category: DocumentCategory, index: usize) -> String {
    match category {
        DocumentCategory::HolidayList => format!("Holiday Table {index}"),
        DocumentCategory::WorkingHours => format!("Working Hours – Table {index}"),
        _ => format!("Table {index}"),
    }
}

fn empty_notice(category: DocumentCategory) -> &'static str {
    match category {
        DocumentCategory::MinimumWages => "<p>No wage data table found.</p>",
        DocumentCategory::HolidayList => "<p>No holiday table found.</p>",
        DocumentCategory::WorkingHours => "<p>No working hours table found.</p>",
        DocumentCategory::ShopEstablishment => "<p>No shop &amp; establishment table found.</p>",
    }
}

fn download_label(category: DocumentCategory) -> &'static str {
    match category {
        DocumentCategory::MinimumWages => "Download as PDF",
        DocumentCategory::HolidayList => "Download Holiday List PDF",
        DocumentCategory::WorkingHours => "Download Working Hours PDF",
        DocumentCategory::ShopEstablishment => "Download PDF",
    }
}

fn effective_date_banner(date: Option<&str>) -> String {
    match date {
        Some(date) => format!(
            r#"<div class="effective-date-banner"><div class="date-content"><i class="fas fa-calendar-check"></i><span class="date-label">EFFECTIVE DATE:</span><span class="date-value">{}</span></div></div>"#,
            escape(date)
        ),
        None => r#"<div class="effective-date-banner warning"><div class="date-content"><i class="fas fa-exclamation-triangle"></i><span class="date-label">EFFECTIVE DATE:</span><span class="date-value">Check on website</span></div></div>"#.to_string(),
    }
}

fn download_button(category: DocumentCategory, state: &StateKey) -> String {
    format!(
        r#"<div style="text-align:right; margin:15px 0;"><button onclick="openDownloadModal('{}', '{}')" class="download-pdf-btn"><i class="fas fa-file-pdf"></i> {}</button></div>"#,
        escape(&state.slug()),
        category.as_str(),
        download_label(category)
    )
}

fn source_footer(url: &str) -> String {
    let label = url.trim_start_matches("https://").trim_start_matches("www.");
    format!(
        r#"<div style="margin-top:20px; font-size:12px; color:#666; text-align:center; border-top:1px solid #ccc; padding-top:15px;">Source: <a href="{}" target="_blank">{}</a></div>"#,
        escape(url),
        escape(label)
    )
}

fn write_table(out: &mut String, table: &TableMatrix, styled_header: bool) {
    out.push_str(r#"<table class="minimum-wage-table" style="width:100%; border-collapse:collapse;">"#);
    for (row_idx, row) in table.iter().enumerate() {
        out.push_str("<tr>");
        let tag = if row_idx == 0 { "th" } else { "td" };
        for cell in row {
            if styled_header && row_idx == 0 {
                let _ = write!(
                    out,
                    "<{tag} style='border:1px solid #ddd; padding:8px; background-color:#1a237e; color:white; text-align:left;'>{}</{tag}>",
                    escape(cell)
                );
            } else {
                let _ = write!(out, "<{tag}>{}</{tag}>", escape(cell));
            }
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
}

/// Fragment for a per-state document page
pub fn document(
    category: DocumentCategory,
    state: &StateKey,
    source_url: &str,
    effective_date: Option<&str>,
    tables: &[TableMatrix],
) -> String {
    let mut html = format!(
        r#"<div><h3 style="margin-bottom:15px;">{} – {}</h3>"#,
        category.label(),
        escape(&state.display_name())
    );
    if category.has_effective_date() {
        html.push_str(&effective_date_banner(effective_date));
    }
    html.push_str(&download_button(category, state));

    if tables.is_empty() {
        html.push_str(empty_notice(category));
    }
    for (idx, table) in tables.iter().enumerate() {
        let _ = write!(
            html,
            "<h4 style='margin:15px 0 10px;'>{}</h4>",
            table_heading(category, idx + 1)
        );
        write_table(&mut html, table, false);
    }

    html.push_str(&source_footer(source_url));
    html.push_str("</div>");
    html
}

/// Fragment shown when the source page could not be fetched
pub fn fetch_error(category: DocumentCategory, state: &StateKey) -> String {
    format!(
        "<p>Error fetching {} data for {}.</p>",
        category.label().to_lowercase(),
        escape(&state.display_name())
    )
}

/// Shop & establishment fragment for one state, `tables` already filtered
pub fn shop_document(state: &StateKey, tables: &[TableMatrix]) -> String {
    let name = escape(&state.display_name());
    let mut body = String::new();
    if tables.is_empty() {
        let _ = write!(
            body,
            r#"<div style="padding: 20px; text-align: center; background: #fff3cd; border-radius: 8px;"><i class="fas fa-info-circle" style="color: #856404;"></i><p style="color: #856404; margin-top: 10px;">No specific Shop &amp; Establishment data found for <strong>{name}</strong>.<br>Please check our main page for more details.</p></div>"#
        );
    }
    for table in tables {
        let _ = write!(
            body,
            "<h4 style='color:#1a237e; margin:20px 0 10px;'>Shop &amp; Establishment Act – {name}</h4>"
        );
        write_table(&mut body, table, true);
    }

    let mut html = format!(
        r#"<div><h3 style="color:#1a237e; margin-bottom:15px;">🏢 Shop and Establishment Act – {name}</h3>"#
    );
    let _ = write!(
        html,
        r#"<div style="text-align:right; margin:20px 0;"><button onclick="openDownloadModal('{}', '{}')" class="download-pdf-btn"><i class="fas fa-file-pdf"></i> Download PDF for {name}</button></div>"#,
        escape(&state.slug()),
        DocumentCategory::ShopEstablishment.as_str()
    );
    html.push_str(&body);
    html.push_str(&source_footer(SHOP_ESTABLISHMENT_URL));
    html.push_str("</div>");
    html
}

/// Menu of every state for the "all states" request
pub fn shop_state_listing(keys: &[StateKey]) -> String {
    let mut html = String::from(
        "<h4>Select a State:</h4><ul style='columns:2; list-style-type:none; padding:0;'>",
    );
    for key in keys {
        let _ = write!(
            html,
            "<li style='padding:8px; margin:5px; background:#f5f5f5; border-radius:5px;'>📍 {}</li>",
            escape(&key.display_name())
        );
    }
    html.push_str("</ul>");
    html
}

/// Red error box for a failed shop & establishment fetch
pub fn shop_fetch_error(state: &StateKey) -> String {
    format!(
        r#"<div style="padding: 20px; text-align: center; background: #f8d7da; border-radius: 8px;"><i class="fas fa-exclamation-triangle" style="color: #721c24;"></i><p style="color: #721c24; margin-top: 10px;">Error fetching Shop &amp; Establishment data for {}.<br>Please try again later.</p></div>"#,
        escape(&state.display_name())
    )
}
