use anyhow::Result;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use super::REPORT_TITLE;
use crate::models::SalesTable;

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;

const LEFT_MARGIN: f32 = 100.0;
const TOP_Y: f32 = 750.0;
const LINE_STEP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 12.0;

const FONT_NAME: Name<'static> = Name(b"F1");

// Catalog, page tree and font take ids 1 to 3
const FIRST_PAGE_ID: i32 = 4;

/// One text line placed on a page, baseline `y` in points from the bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub(crate) y: f32,
    pub(crate) text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PageLayout {
    pub(crate) lines: Vec<PlacedLine>,
}

/// Place the title and one line per record, starting a new page whenever the
/// next line would cross the bottom margin.
///
/// The title sits at the top of the first page and records start one step
/// below it. Continuation pages start at the title's height.
pub(crate) fn layout_pages(table: &SalesTable) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut current = PageLayout::default();
    current.lines.push(PlacedLine {
        y: TOP_Y,
        text: REPORT_TITLE.to_string(),
    });
    let mut y = TOP_Y - LINE_STEP;

    for record in table {
        if y < BOTTOM_MARGIN {
            pages.push(std::mem::take(&mut current));
            y = TOP_Y;
        }
        current.lines.push(PlacedLine {
            y,
            text: record.report_line(),
        });
        y -= LINE_STEP;
    }

    pages.push(current);
    pages
}

/// Render the sales report as a PDF document.
pub(crate) fn generate_pdf(table: &SalesTable) -> Result<Vec<u8>> {
    let pages = layout_pages(table);
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let page_ids = (0..pages.len())
        .map(|i| page_ref(i, 0))
        .collect::<Result<Vec<Ref>>>()?;

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(i32::try_from(page_ids.len())?);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, layout) in pages.iter().enumerate() {
        let content_id = page_ref(i, 1)?;
        {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
            page.parent(page_tree_id);
            page.contents(content_id);
            page.resources().fonts().pair(FONT_NAME, font_id);
        }

        let mut content = Content::new();
        for line in &layout.lines {
            let encoded = encode_win_ansi(&line.text);
            content.begin_text();
            content.set_font(FONT_NAME, FONT_SIZE);
            content.next_line(LEFT_MARGIN, line.y);
            content.show(Str(&encoded));
            content.end_text();
        }
        pdf.stream(content_id, &content.finish());
    }

    Ok(pdf.finish())
}

/// Page `i` gets two consecutive ids after the fixed objects: the page, then its content stream.
pub(super) fn page_ref(i: usize, offset: i32) -> Result<Ref> {
    i32::try_from(i)
        .ok()
        .and_then(|i| i.checked_mul(2))
        .and_then(|n| n.checked_add(FIRST_PAGE_ID + offset))
        .map(Ref::new)
        .ok_or_else(|| anyhow::anyhow!("Too many pages for a PDF object id: {i}"))
}

/// Latin-1 maps byte-for-byte onto WinAnsi for the characters we care about.
pub(super) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
