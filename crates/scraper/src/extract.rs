//! Table and effective-date extraction

use compliance_agent_core::TableMatrix;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::ScrapeError;

/// Shortcode left behind by the site's download plugin
const MARKER_TOKEN: &str = "[dl_btn]";

const WORD_DATE: &str = r"\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+,?\s+\d{4}";

/// Compiled selectors and date patterns, built once per service
pub struct TableExtractor {
    table: Selector,
    row: Selector,
    cell: Selector,
    date_scope: Selector,
    date_patterns: Vec<Regex>,
}

impl TableExtractor {
    pub fn new() -> Result<Self, ScrapeError> {
        let date_patterns = [
            format!(r"(?i)Effective from Date:\s*({WORD_DATE})"),
            format!(r"(?i)Effective[:\s]+from[:\s]+Date[:\s]*({WORD_DATE})"),
            r"(?i)w\.e\.f[.\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})".to_string(),
            format!(r"(?i)Effective Date[:\s]*({WORD_DATE})"),
        ]
        .iter()
        .map(|p| Regex::new(p).map_err(|e| ScrapeError::Pattern(e.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            table: selector("table")?,
            row: selector("tr")?,
            cell: selector("td, th")?,
            date_scope: selector("div, p, span, h1, h2, h3, h4, li, td, th")?,
            date_patterns,
        })
    }

    /// Every table in document order as trimmed text cells.
    ///
    /// Rows without cells are dropped, then tables without rows. Rows whose
    /// cells are all blank are kept as spacers.
    pub fn extract_tables(&self, document: &Html) -> Vec<TableMatrix> {
        document
            .select(&self.table)
            .filter_map(|table| {
                let rows: TableMatrix = table
                    .select(&self.row)
                    .map(|row| row.select(&self.cell).map(cell_text).collect::<Vec<_>>())
                    .filter(|cells| !cells.is_empty())
                    .collect();
                (!rows.is_empty()).then_some(rows)
            })
            .collect()
    }

    /// First effective date found in document order, normalised by [`clean_date`]
    pub fn extract_effective_date(&self, document: &Html) -> Option<String> {
        document.select(&self.date_scope).find_map(|element| {
            let text: String = element.text().collect();
            self.date_patterns.iter().find_map(|pattern| {
                pattern
                    .captures(&text)
                    .and_then(|caps| caps.get(1))
                    .and_then(|m| clean_date(m.as_str()))
            })
        })
    }
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Pattern(format!("{css}: {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let text = cell.text().collect::<Vec<_>>().join(" ");
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace(MARKER_TOKEN, "").trim().to_string()
}

/// Normalise an extracted date.
///
/// Word dates pass through. Numeric dates are re-joined with `/` and a two
/// digit year gets the `20` prefix.
pub fn clean_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let looks_like_word_date = raw.split_whitespace().count() >= 3
        && raw.chars().next().is_some_and(|c| c.is_ascii_digit())
        && raw.chars().any(|c| c.is_ascii_alphabetic());
    if looks_like_word_date {
        return Some(raw.to_string());
    }

    let separator = if raw.contains('/') {
        '/'
    } else if raw.contains('-') {
        '-'
    } else {
        return Some(raw.to_string());
    };

    let mut parts: Vec<String> = raw.split(separator).map(str::to_string).collect();
    if parts.len() != 3 {
        return Some(raw.to_string());
    }
    if parts[2].len() == 2 {
        parts[2] = format!("20{}", parts[2]);
    }
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_no_tables() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse("<html><body><p>Nothing tabular here</p></body></html>");
        assert!(extractor.extract_tables(&doc).is_empty());
    }

    #[test]
    fn test_cells_are_normalised() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse(
            "<table>\
               <tr><th> Category </th><th>Rate\n   per   day</th></tr>\
               <tr><td>Unskilled</td><td>Rs <b>783</b> [dl_btn]</td></tr>\
             </table>",
        );
        let tables = extractor.extract_tables(&doc);
        assert_eq!(
            tables,
            vec![vec![
                vec!["Category".to_string(), "Rate per day".to_string()],
                vec!["Unskilled".to_string(), "Rs 783".to_string()],
            ]]
        );
    }

    #[test]
    fn test_empty_rows_and_tables_dropped() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse(
            "<table><tr></tr></table>\
             <table><tr></tr><tr><td>Holiday</td></tr></table>",
        );
        let tables = extractor.extract_tables(&doc);
        assert_eq!(tables, vec![vec![vec!["Holiday".to_string()]]]);
    }

    #[test]
    fn test_blank_spacer_rows_kept() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse(
            "<table>\
               <tr><th>Zone</th><th>Rate</th></tr>\
               <tr><td> </td><td></td></tr>\
               <tr><td>Zone I</td><td>500</td></tr>\
             </table>",
        );
        let tables = extractor.extract_tables(&doc);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 3);
        assert_eq!(tables[0][1], vec![String::new(), String::new()]);
        assert_eq!(tables[0][2][0], "Zone I");
    }

    #[test]
    fn test_effective_date_word_form() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse("<div><p>Effective from Date: 21st November 2025</p></div>");
        assert_eq!(
            extractor.extract_effective_date(&doc).as_deref(),
            Some("21st November 2025")
        );
    }

    #[test]
    fn test_effective_date_wef() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse("<span>Rates w.e.f 21/11/25 for all zones</span>");
        let date = extractor.extract_effective_date(&doc).unwrap();
        assert_eq!(date, "21/11/2025");
    }

    #[test]
    fn test_effective_date_missing() {
        let extractor = TableExtractor::new().unwrap();
        let doc = parse("<p>Updated regularly</p>");
        assert_eq!(extractor.extract_effective_date(&doc), None);
    }

    #[test]
    fn test_clean_date() {
        assert_eq!(clean_date(" 1st April, 2024 ").as_deref(), Some("1st April, 2024"));
        assert_eq!(clean_date("01-10-24").as_deref(), Some("01/10/2024"));
        assert_eq!(clean_date("01/10/2024").as_deref(), Some("01/10/2024"));
        assert_eq!(clean_date(""), None);
    }
}
