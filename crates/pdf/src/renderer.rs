//! Report layout and document assembly

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use compliance_agent_core::{state::title_case, DocumentCategory, StateKey, TableMatrix};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::encoding::{encode, text_width, wrap};
use crate::{Logo, PdfError};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN_X: f32 = 50.0;
const MARGIN_TOP: f32 = 40.0;
const MARGIN_BOTTOM: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;

const HEADER_SIZE: f32 = 18.0;
const TITLE_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 10.0;
const TABLE_HEADER_SIZE: f32 = 9.0;
const TABLE_BODY_SIZE: f32 = 8.0;
const FOOTER_SIZE: f32 = 8.0;

const LINE_SPACING: f32 = 1.25;
const CELL_PADDING: f32 = 4.0;
const GRID_WIDTH: f32 = 0.5;
const TABLE_GAP: f32 = 16.0;
const MAX_HEADER_LINES: usize = 6;
const MAX_BODY_LINES: usize = 60;

const WATERMARK_ALPHA: f32 = 0.06;
const WATERMARK_SCALE: f32 = 0.65;
const HEADER_LOGO_SIZE: f32 = 50.0;
const HEADER_LOGO_GAP: f32 = 10.0;
const ELLIPSIS: char = '…';

/// Baseline of the company name
const HEADER_BASELINE: f32 = PAGE_HEIGHT - MARGIN_TOP - HEADER_SIZE;
const DIVIDER_Y: f32 = HEADER_BASELINE - 8.0;
/// Where page content starts below the header block
const CONTENT_TOP: f32 = DIVIDER_Y - 14.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const WATERMARK_STATE: &str = "GS1";
const LOGO_IMAGE: &str = "Im1";

#[derive(Debug, Clone, Copy)]
struct Rgb(f32, f32, f32);

impl Rgb {
    fn hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Rgb(channel(16), channel(8), channel(0))
    }

    fn operands(self) -> Vec<Object> {
        vec![real(self.0), real(self.1), real(self.2)]
    }
}

fn primary() -> Rgb {
    Rgb::hex(0x1a237e)
}

fn title_colour() -> Rgb {
    Rgb::hex(0x283593)
}

fn date_colour() -> Rgb {
    Rgb::hex(0x2e7d32)
}

fn grid_colour() -> Rgb {
    Rgb::hex(0xe0e0e0)
}

fn shade_colour() -> Rgb {
    Rgb::hex(0xf5f7fa)
}

fn footer_colour() -> Rgb {
    Rgb::hex(0x757575)
}

fn body_colour() -> Rgb {
    Rgb::hex(0x212121)
}

fn white() -> Rgb {
    Rgb(1.0, 1.0, 1.0)
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn op(operator: &str, operands: Vec<Object>) -> Operation {
    Operation::new(operator, operands)
}

/// Company identity printed on every page
#[derive(Debug, Clone)]
pub struct Branding {
    pub company_name: String,
    pub website: String,
    /// Header mark and watermark. Pages carry neither without it.
    pub logo: Option<Arc<Logo>>,
}

impl Branding {
    pub fn new(company_name: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            website: website.into(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Logo) -> Self {
        self.logo = Some(Arc::new(logo));
        self
    }
}

/// One report: title parts, optional effective date and the tables
#[derive(Debug, Clone)]
pub struct ReportRequest<'a> {
    /// State or region shown after the dash, e.g. `Tamil Nadu` or `India`
    pub state: &'a str,
    /// Act label, underscores allowed (`Minimum_Wages`)
    pub act: &'a str,
    pub tables: &'a [TableMatrix],
    pub effective_date: Option<&'a str>,
}

/// `"<Act Label> – <State>"` with underscores turned into spaces
pub fn report_title(act: &str, state: &str) -> String {
    format!(
        "{} – {}",
        title_case(&act.replace('_', " ")),
        title_case(state)
    )
}

/// Attachment name for a state document: `{category_tag}_{state_slug}.pdf`
pub fn filename(category: DocumentCategory, state: &StateKey) -> String {
    format!("{}_{}.pdf", category.as_str(), state.slug())
}

/// Stateless report renderer
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    branding: Branding,
}

impl PdfRenderer {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Render a fetched category document for `state`
    pub fn render(
        &self,
        state: &StateKey,
        category: DocumentCategory,
        tables: &[TableMatrix],
        effective_date: Option<&str>,
    ) -> Result<Vec<u8>, PdfError> {
        let state_name = state.display_name();
        self.render_report(&ReportRequest {
            state: &state_name,
            act: category.act_label(),
            tables,
            effective_date,
        })
    }

    /// Render an arbitrary report stamped with the current local time
    pub fn render_report(&self, request: &ReportRequest<'_>) -> Result<Vec<u8>, PdfError> {
        self.render_report_at(request, Local::now().naive_local())
    }

    pub fn render_report_at(
        &self,
        request: &ReportRequest<'_>,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, PdfError> {
        let title = report_title(request.act, request.state);
        let mut layout = Layout::new(&self.branding, generated_at);

        layout.title(&title);
        if let Some(date) = request.effective_date {
            layout.effective_date(date);
        }
        for table in request.tables {
            layout.table(table);
        }

        let pages = layout.finish();
        tracing::debug!(
            title = %title,
            tables = request.tables.len(),
            pages = pages.len(),
            "Rendered PDF report"
        );
        assemble(pages, self.branding.logo.as_deref())
    }
}

/// Wrapped cell text for one row plus its height
struct RowLayout {
    cells: Vec<Vec<String>>,
    height: f32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Header,
    Shaded,
    Plain,
}

struct Layout<'a> {
    branding: &'a Branding,
    footer_stamp: String,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    cursor: f32,
}

impl<'a> Layout<'a> {
    fn new(branding: &'a Branding, generated_at: NaiveDateTime) -> Self {
        let mut layout = Self {
            branding,
            footer_stamp: format!(
                "Generated on {}",
                generated_at.format("%d %B %Y | %I:%M %p")
            ),
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: CONTENT_TOP,
        };
        layout.decorate();
        layout
    }

    fn new_page(&mut self) {
        let finished = std::mem::take(&mut self.ops);
        self.pages.push(finished);
        self.cursor = CONTENT_TOP;
        self.decorate();
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        let last = std::mem::take(&mut self.ops);
        self.pages.push(last);
        self.pages
    }

    /// Watermark, header and footer. Drawn first so content sits on top.
    fn decorate(&mut self) {
        let logo_fit = self.branding.logo.as_deref().map(|logo| {
            (logo.fit(PAGE_WIDTH * WATERMARK_SCALE), logo.fit(HEADER_LOGO_SIZE))
        });

        let mut company_x = MARGIN_X;
        if let Some(((mark_w, mark_h), (head_w, head_h))) = logo_fit {
            self.ops.push(op("q", vec![]));
            self.ops.push(op("gs", vec![WATERMARK_STATE.into()]));
            self.image(
                (PAGE_WIDTH - mark_w) / 2.0,
                (PAGE_HEIGHT - mark_h) / 2.0,
                mark_w,
                mark_h,
            );
            self.ops.push(op("Q", vec![]));

            // Vertically centred on the company name
            let mid = HEADER_BASELINE + HEADER_SIZE * 0.35;
            self.image(MARGIN_X, mid - head_h / 2.0, head_w, head_h);
            company_x += HEADER_LOGO_SIZE + HEADER_LOGO_GAP;
        }

        let company = self.branding.company_name.clone();
        self.text(&company, company_x, HEADER_BASELINE, BOLD, HEADER_SIZE, primary());
        self.line(MARGIN_X, DIVIDER_Y, PAGE_WIDTH - MARGIN_X, DIVIDER_Y, primary(), 1.0);

        let stamp = self.footer_stamp.clone();
        let contact = format!("{} | {}", self.branding.company_name, self.branding.website);
        self.centred_text(&stamp, MARGIN_BOTTOM - 18.0, REGULAR, FOOTER_SIZE, footer_colour());
        self.centred_text(&contact, MARGIN_BOTTOM - 28.0, REGULAR, FOOTER_SIZE, footer_colour());
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: &str, size: f32, colour: Rgb) {
        self.ops.push(op("BT", vec![]));
        self.ops.push(op("rg", colour.operands()));
        self.ops.push(op("Tf", vec![font.into(), real(size)]));
        self.ops.push(op("Td", vec![real(x), real(y)]));
        self.ops.push(op(
            "Tj",
            vec![Object::String(encode(text), StringFormat::Literal)],
        ));
        self.ops.push(op("ET", vec![]));
    }

    fn image(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(op("q", vec![]));
        self.ops.push(op(
            "cm",
            vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
        ));
        self.ops.push(op("Do", vec![LOGO_IMAGE.into()]));
        self.ops.push(op("Q", vec![]));
    }

    fn centred_text(&mut self, text: &str, y: f32, font: &str, size: f32, colour: Rgb) {
        let width = text_width(text, size, font == BOLD);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN_X);
        self.text(text, x, y, font, size, colour);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, colour: Rgb, width: f32) {
        self.ops.push(op("q", vec![]));
        self.ops.push(op("RG", colour.operands()));
        self.ops.push(op("w", vec![real(width)]));
        self.ops.push(op("m", vec![real(x1), real(y1)]));
        self.ops.push(op("l", vec![real(x2), real(y2)]));
        self.ops.push(op("S", vec![]));
        self.ops.push(op("Q", vec![]));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<Rgb>, stroke: Option<Rgb>) {
        self.ops.push(op("q", vec![]));
        if let Some(colour) = fill {
            self.ops.push(op("rg", colour.operands()));
        }
        if let Some(colour) = stroke {
            self.ops.push(op("RG", colour.operands()));
            self.ops.push(op("w", vec![real(GRID_WIDTH)]));
        }
        self.ops.push(op("re", vec![real(x), real(y), real(width), real(height)]));
        let paint = match (fill.is_some(), stroke.is_some()) {
            (true, true) => "B",
            (true, false) => "f",
            (false, true) => "S",
            (false, false) => "n",
        };
        self.ops.push(op(paint, vec![]));
        self.ops.push(op("Q", vec![]));
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn title(&mut self, title: &str) {
        let line_height = TITLE_SIZE * LINE_SPACING;
        for line in wrap(title, TITLE_SIZE, true, CONTENT_WIDTH) {
            self.centred_text(&line, self.cursor - TITLE_SIZE, BOLD, TITLE_SIZE, title_colour());
            self.cursor -= line_height;
        }
        self.cursor -= 10.0;
    }

    fn effective_date(&mut self, date: &str) {
        let label = format!("Effective Date: {date}");
        self.centred_text(&label, self.cursor - DATE_SIZE, BOLD, DATE_SIZE, date_colour());
        self.cursor -= DATE_SIZE * LINE_SPACING + 10.0;
    }

    fn table(&mut self, table: &TableMatrix) {
        let columns = table.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }
        let column_width = CONTENT_WIDTH / columns as f32;
        let header = layout_row(&table[0], columns, column_width, RowStyle::Header);

        // Keep the header together with at least its first data row
        let first_body = table
            .get(1)
            .map(|row| layout_row(row, columns, column_width, RowStyle::Plain).height)
            .unwrap_or(0.0);
        self.ensure_space(header.height + first_body);
        self.row(&header, column_width, RowStyle::Header);

        for (idx, row) in table.iter().enumerate().skip(1) {
            let style = if idx % 2 == 0 {
                RowStyle::Shaded
            } else {
                RowStyle::Plain
            };
            let cells = layout_row(row, columns, column_width, style);
            if self.cursor - cells.height < MARGIN_BOTTOM {
                self.new_page();
                self.row(&header, column_width, RowStyle::Header);
            }
            self.row(&cells, column_width, style);
        }

        self.cursor -= TABLE_GAP;
    }

    fn row(&mut self, row: &RowLayout, column_width: f32, style: RowStyle) {
        let bottom = self.cursor - row.height;
        let (font, size, colour) = match style {
            RowStyle::Header => (BOLD, TABLE_HEADER_SIZE, white()),
            _ => (REGULAR, TABLE_BODY_SIZE, body_colour()),
        };
        let background = match style {
            RowStyle::Header => Some(primary()),
            RowStyle::Shaded => Some(shade_colour()),
            RowStyle::Plain => None,
        };

        for (col, lines) in row.cells.iter().enumerate() {
            let x = MARGIN_X + col as f32 * column_width;
            self.rect(x, bottom, column_width, row.height, background, Some(grid_colour()));

            let mut baseline = self.cursor - CELL_PADDING - size * 0.8;
            for line in lines {
                if !line.is_empty() {
                    self.text(line, x + CELL_PADDING, baseline, font, size, colour);
                }
                baseline -= size * LINE_SPACING;
            }
        }

        self.cursor = bottom;
    }
}

fn layout_row(row: &[String], columns: usize, column_width: f32, style: RowStyle) -> RowLayout {
    let (size, bold, max_lines) = match style {
        RowStyle::Header => (TABLE_HEADER_SIZE, true, MAX_HEADER_LINES),
        _ => (TABLE_BODY_SIZE, false, MAX_BODY_LINES),
    };
    let text_width = column_width - 2.0 * CELL_PADDING;

    let cells: Vec<Vec<String>> = (0..columns)
        .map(|col| {
            let text = row.get(col).map(String::as_str).unwrap_or("");
            let mut lines = wrap(text, size, bold, text_width);
            if lines.len() > max_lines {
                lines.truncate(max_lines);
                if let Some(last) = lines.last_mut() {
                    mark_cut(last, size, bold, text_width);
                }
            }
            lines
        })
        .collect();

    let line_count = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let height = line_count as f32 * size * LINE_SPACING + 2.0 * CELL_PADDING;
    RowLayout { cells, height }
}

/// End a line with an ellipsis, dropping characters until it fits
fn mark_cut(line: &mut String, size: f32, bold: bool, max_width: f32) {
    loop {
        let candidate = format!("{}{ELLIPSIS}", line.trim_end());
        if text_width(&candidate, size, bold) <= max_width || line.is_empty() {
            *line = candidate;
            return;
        }
        line.pop();
    }
}

fn image_object(doc: &mut Document, logo: &Logo) -> lopdf::ObjectId {
    let mut image = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => logo.width() as i64,
        "Height" => logo.height() as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8_i64,
    };
    if let Some(alpha) = logo.alpha() {
        let mask = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => logo.width() as i64,
                "Height" => logo.height() as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
            },
            alpha.to_vec(),
        ));
        image.set("SMask", mask);
    }
    doc.add_object(Stream::new(image, logo.rgb().to_vec()))
}

fn assemble(pages: Vec<Vec<Operation>>, logo: Option<&Logo>) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let watermark = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => real(WATERMARK_ALPHA),
        "CA" => real(WATERMARK_ALPHA),
    });
    let mut resources = dictionary! {
        "Font" => dictionary! {
            REGULAR => regular,
            BOLD => bold,
        },
        "ExtGState" => dictionary! {
            WATERMARK_STATE => watermark,
        },
    };
    if let Some(logo) = logo {
        let image = image_object(&mut doc, logo);
        resources.set("XObject", dictionary! { LOGO_IMAGE => image });
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::from(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| PdfError::Write(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn renderer() -> PdfRenderer {
        PdfRenderer::new(Branding::new("Shakti Legal Compliance India", "www.slci.in"))
    }

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 21)
            .and_then(|d| d.and_hms_opt(14, 5, 0))
            .unwrap()
    }

    fn wage_table(rows: usize) -> TableMatrix {
        let mut table = vec![vec![
            "Class of Employment".to_string(),
            "Basic".to_string(),
            "VDA".to_string(),
        ]];
        for i in 0..rows {
            table.push(vec![
                format!("Scheduled employment number {i} with a long descriptive name"),
                "12,000".to_string(),
                "2,500".to_string(),
            ]);
        }
        table
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    fn image_count(bytes: &[u8]) -> usize {
        let doc = Document::load_mem(bytes).unwrap();
        doc.objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| {
                s.dict
                    .get(b"Subtype")
                    .and_then(Object::as_name)
                    .map(|n| n == b"Image")
                    .unwrap_or(false)
            })
            .count()
    }

    fn holiday_request(tables: &[TableMatrix]) -> ReportRequest<'_> {
        ReportRequest {
            state: "Goa",
            act: "Holiday_List",
            tables,
            effective_date: Some("1st January 2025"),
        }
    }

    #[test]
    fn test_no_logo_no_watermark() {
        let tables = vec![wage_table(3)];
        let bytes = renderer().render_report_at(&holiday_request(&tables), stamp()).unwrap();
        assert_eq!(image_count(&bytes), 0);
    }

    #[test]
    fn test_logo_embedded_once_for_all_pages() {
        let logo = Logo::from_bytes(&crate::logo::tests::png(8, 4, 255)).unwrap();
        let renderer = PdfRenderer::new(
            Branding::new("Shakti Legal Compliance India", "www.slci.in").with_logo(logo),
        );
        let tables = vec![wage_table(200)];
        let bytes = renderer.render_report_at(&holiday_request(&tables), stamp()).unwrap();
        assert!(page_count(&bytes) > 2);
        assert_eq!(image_count(&bytes), 1);
    }

    #[test]
    fn test_translucent_logo_carries_soft_mask() {
        let logo = Logo::from_bytes(&crate::logo::tests::png(4, 4, 100)).unwrap();
        let renderer = PdfRenderer::new(Branding::new("SLCI", "www.slci.in").with_logo(logo));
        let bytes = renderer.render_report_at(&holiday_request(&[]), stamp()).unwrap();
        assert_eq!(image_count(&bytes), 2);
    }

    #[test]
    fn test_effective_date_is_centred() {
        let branding = Branding::new("SLCI", "www.slci.in");
        let mut layout = Layout::new(&branding, stamp());
        layout.effective_date("1st April 2025");
        let label = "Effective Date: 1st April 2025";
        let expected_x = (PAGE_WIDTH - text_width(label, DATE_SIZE, true)) / 2.0;
        let td = layout
            .ops
            .iter()
            .rev()
            .find(|o| o.operator == "Td")
            .unwrap();
        let x = match td.operands[0] {
            Object::Real(x) => x,
            _ => panic!("unexpected operand"),
        };
        assert!((x - expected_x).abs() < 0.01);
        assert!(x > MARGIN_X);
    }

    #[test]
    fn test_overlong_cell_ends_with_ellipsis() {
        let text = "word ".repeat(2000);
        let row = vec![text];
        let layout = layout_row(&row, 1, 120.0, RowStyle::Plain);
        let lines = &layout.cells[0];
        assert_eq!(lines.len(), MAX_BODY_LINES);
        let last = lines.last().unwrap();
        assert!(last.ends_with(ELLIPSIS));
        assert!(text_width(last, TABLE_BODY_SIZE, false) <= 120.0 - 2.0 * CELL_PADDING);
    }

    #[test]
    fn test_cell_within_limit_is_untouched() {
        let row = vec!["Republic Day".to_string()];
        let layout = layout_row(&row, 1, 200.0, RowStyle::Plain);
        assert_eq!(layout.cells[0], vec!["Republic Day".to_string()]);
    }

    #[test]
    fn test_report_title() {
        assert_eq!(report_title("Minimum_Wages", "tamil nadu"), "Minimum Wages – Tamil Nadu");
        assert_eq!(
            report_title("Shop_and_Establishment", "Delhi"),
            "Shop And Establishment – Delhi"
        );
    }

    #[test]
    fn test_filename() {
        let state = StateKey::new("andaman and nicobar");
        assert_eq!(
            filename(DocumentCategory::HolidayList, &state),
            "holiday_list_andaman_and_nicobar.pdf"
        );
    }

    #[test]
    fn test_empty_tables_single_page() {
        let request = ReportRequest {
            state: "Goa",
            act: "Holiday_List",
            tables: &[],
            effective_date: None,
        };
        let bytes = renderer().render_report_at(&request, stamp()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_small_table_fits_one_page() {
        let tables = vec![wage_table(5)];
        let request = ReportRequest {
            state: "Tamil Nadu",
            act: "Minimum_Wages",
            tables: &tables,
            effective_date: Some("1st April 2025"),
        };
        let bytes = renderer().render_report_at(&request, stamp()).unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_table_paginates() {
        let tables = vec![wage_table(200)];
        let request = ReportRequest {
            state: "Tamil Nadu",
            act: "Minimum_Wages",
            tables: &tables,
            effective_date: None,
        };
        let bytes = renderer().render_report_at(&request, stamp()).unwrap();
        assert!(page_count(&bytes) > 2);
    }

    #[test]
    fn test_render_category_document() {
        let tables = vec![vec![vec!["Date".to_string(), "Holiday".to_string()], vec![
            "26 Jan".to_string(),
            "Republic Day".to_string(),
        ]]];
        let bytes = renderer()
            .render(&StateKey::new("goa"), DocumentCategory::HolidayList, &tables, None)
            .unwrap();
        assert!(Document::load_mem(&bytes).is_ok());
    }

    #[test]
    fn test_ragged_rows_and_unicode() {
        let tables = vec![vec![
            vec!["Feature".to_string(), "Old".to_string(), "New".to_string()],
            vec!["✓ Included".to_string()],
            vec!["Wage ₹ 783 – revised".to_string(), String::new(), "Yes".to_string()],
        ]];
        let request = ReportRequest {
            state: "India",
            act: "Complete Labour Code Comparison",
            tables: &tables,
            effective_date: Some("November 2025"),
        };
        assert!(renderer().render_report_at(&request, stamp()).is_ok());
    }

    #[test]
    fn test_row_layout_pads_columns() {
        let row = vec!["only one".to_string()];
        let layout = layout_row(&row, 3, 100.0, RowStyle::Plain);
        assert_eq!(layout.cells.len(), 3);
        assert_eq!(layout.cells[2], vec![String::new()]);
        assert!((layout.height - (TABLE_BODY_SIZE * LINE_SPACING + 2.0 * CELL_PADDING)).abs() < 0.01);
    }
}
