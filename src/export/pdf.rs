use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A4 page layout for tabular reports, in PDF points.
const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 50.0;
const ROW_H: f32 = 20.0;
const LINE_H: f32 = 14.0;

const FONT_SIZE: f32 = 10.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 16.0;

/// Title, intro lines, table and optional footer row of one report.
pub struct PdfDocument<'a> {
    pub title: &'a str,
    pub intro: &'a [String],
    pub headers: &'a [&'a str],
    pub rows: &'a [Vec<String>],
    pub footer: Option<&'a [String]>,
}

/// Encode text for the single-byte WinAnsi font: printable ASCII and
/// Latin-1 map to themselves, a few typographic marks to their 0x80..0x9F
/// slots, anything else becomes `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    next_id: i32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            current_content_id: None,
            next_id: 4,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);
        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn draw_text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        let bytes = to_win_ansi(text);

        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn fill_band(content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(MARGIN, y, width, ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(content: &mut Content, y: f32, widths: &[f32], row: &[String], size: f32) {
        let mut x = MARGIN;

        for (text, w) in row.iter().zip(widths) {
            Self::draw_text(content, x + 4.0, y + 5.0, size, text);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, *w, ROW_H);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Column widths from header and cell lengths, scaled down to fit the page.
    fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

        for row in rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = w.max(cell.len() as f32 * 6.2 + 8.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PAGE_W - 2.0 * MARGIN;
        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Title on every page, intro lines on the first one, page number at the bottom.
    /// Returns the y coordinate where the table starts.
    fn draw_page_frame(content: &mut Content, doc: &PdfDocument, page: usize) -> f32 {
        Self::draw_text(content, MARGIN, PAGE_H - MARGIN, TITLE_FONT_SIZE, doc.title);

        let mut y = PAGE_H - MARGIN - 24.0;
        if page == 1 {
            for line in doc.intro {
                Self::draw_text(content, MARGIN, y, FONT_SIZE, line);
                y -= LINE_H;
            }
            y -= 6.0;
        }

        let pg = format!("Page {}", page);
        Self::draw_text(content, PAGE_W - MARGIN - 60.0, MARGIN - 35.0, FONT_SIZE, &pg);

        y - ROW_H
    }

    /// Multi-page table with a repeated header row and zebra stripes.
    pub fn write_document(&mut self, doc: &PdfDocument) {
        let widths = Self::column_widths(doc.headers, doc.rows);
        let table_w: f32 = widths.iter().sum();
        let header_row: Vec<String> = doc.headers.iter().map(|s| s.to_string()).collect();

        let mut remaining: &[Vec<String>] = doc.rows;
        let mut page = 1;

        loop {
            let mut content = self.new_page();
            let mut y = Self::draw_page_frame(&mut content, doc, page);

            Self::fill_band(&mut content, y, table_w, (0.85, 0.87, 0.90));
            Self::draw_row(&mut content, y, &widths, &header_row, HEADER_FONT_SIZE);
            y -= ROW_H;

            let mut consumed = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y - ROW_H < MARGIN {
                    break;
                }
                if i % 2 == 0 {
                    Self::fill_band(&mut content, y, table_w, (0.96, 0.96, 0.96));
                }
                Self::draw_row(&mut content, y, &widths, row, FONT_SIZE);
                y -= ROW_H;
                consumed += 1;
            }
            remaining = &remaining[consumed..];

            if remaining.is_empty() {
                if let Some(footer) = doc.footer {
                    if y - ROW_H < MARGIN {
                        self.finalize_page(content);
                        page += 1;
                        content = self.new_page();
                        y = Self::draw_page_frame(&mut content, doc, page);
                    }
                    Self::fill_band(&mut content, y, table_w, (0.85, 0.87, 0.90));
                    Self::draw_row(&mut content, y, &widths, footer, HEADER_FONT_SIZE);
                }
                self.finalize_page(content);
                break;
            }

            self.finalize_page(content);
            page += 1;
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .count(count)
            .kids(self.page_refs.iter().copied());

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
