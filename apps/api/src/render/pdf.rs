//! Stateless PDF writer for the resume layout.
//!
//! Text is placed at fixed coordinates on a top-down millimetre cursor. A row
//! that would cross the bottom margin starts a new page, and every page opens
//! with the title banner. The photo sits on page one at its fixed box and
//! does not move the cursor.

use std::path::Path;

use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

use crate::render::font_metrics::StandardFont;
use crate::render::layout::{
    mm, row_width_mm, text_width_pt, Rgb, ACCENT, BODY_COLOR, BODY_SIZE_PT, BOTTOM_MARGIN_MM,
    CELL_PADDING_MM, HEADING_SIZE_PT, MARGIN_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, PHOTO_BOX,
    RESUME_SECTIONS, ROW_HEIGHT_MM, RULE_END_X_MM, RULE_START_X_MM, RULE_WIDTH_MM,
    SECTION_GAP_MM, TITLE_GAP_MM, TITLE_SIZE_PT, TITLE_TEXT,
};
use crate::render::photo::{load_photo, EmbeddedPhoto, PhotoColorSpace, PhotoEncoding};
use crate::render::RenderError;
use crate::submission::models::Submission;

const PHOTO_RESOURCE: &[u8] = b"Im1";

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// Renders the resume. `photo`, when given, must point at a readable JPEG or
/// PNG; its absence is not an error.
pub fn render_resume(
    submission: &Submission,
    photo: Option<&Path>,
) -> Result<Vec<u8>, RenderError> {
    let photo = photo.map(load_photo).transpose()?;

    let mut canvas = Canvas::new();
    for section in &RESUME_SECTIONS {
        canvas.text_row(
            section.heading,
            StandardFont::HelveticaBold,
            HEADING_SIZE_PT,
            ACCENT,
            Align::Left,
        );
        canvas.gap(SECTION_GAP_MM);

        let body = (section.body)(submission);
        let metrics = StandardFont::Helvetica.metrics();
        for line in metrics.wrap(&body, BODY_SIZE_PT, text_width_pt()) {
            canvas.text_row(
                &line,
                StandardFont::Helvetica,
                BODY_SIZE_PT,
                BODY_COLOR,
                Align::Left,
            );
        }
        canvas.gap(SECTION_GAP_MM);

        canvas.rule();
        canvas.gap(SECTION_GAP_MM);
    }

    debug!(
        pages = canvas.pages.len(),
        with_photo = photo.is_some(),
        "Resume laid out"
    );

    Ok(write_document(&submission.name, canvas.pages, photo.as_ref()))
}

/// Page contents under construction plus the vertical cursor, in mm from
/// the top of the current page.
struct Canvas {
    pages: Vec<Content>,
    y_mm: f32,
}

impl Canvas {
    fn new() -> Self {
        let mut canvas = Self {
            pages: Vec::new(),
            y_mm: 0.0,
        };
        canvas.add_page();
        canvas
    }

    fn add_page(&mut self) {
        self.pages.push(Content::new());
        self.y_mm = MARGIN_MM;
        self.text_row(
            TITLE_TEXT,
            StandardFont::HelveticaBold,
            TITLE_SIZE_PT,
            ACCENT,
            Align::Center,
        );
        self.gap(TITLE_GAP_MM);
    }

    fn content(&mut self) -> &mut Content {
        // `new` always pushes the first page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn gap(&mut self, height_mm: f32) {
        self.y_mm += height_mm;
    }

    fn text_row(
        &mut self,
        text: &str,
        font: StandardFont,
        size_pt: f32,
        color: Rgb,
        align: Align,
    ) {
        if self.y_mm + ROW_HEIGHT_MM > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            self.add_page();
        }

        let x_mm = match align {
            Align::Left => MARGIN_MM + CELL_PADDING_MM,
            Align::Center => {
                let text_w_mm = font.metrics().width_pt(text, size_pt) * 25.4 / 72.0;
                MARGIN_MM + (row_width_mm() - text_w_mm) / 2.0
            }
        };
        // Vertically centred in the row, as a cell would place it.
        let baseline_mm = self.y_mm + ROW_HEIGHT_MM / 2.0 + 0.3 * size_pt * 25.4 / 72.0;
        let encoded = encode_win_ansi(text);

        let (r, g, b) = color;
        self.content()
            .set_fill_rgb(r, g, b)
            .begin_text()
            .set_font(Name(font.resource_name()), size_pt)
            .next_line(mm(x_mm), mm(PAGE_HEIGHT_MM - baseline_mm))
            .show(Str(&encoded))
            .end_text();

        self.y_mm += ROW_HEIGHT_MM;
    }

    fn rule(&mut self) {
        let y = mm(PAGE_HEIGHT_MM - self.y_mm);
        let (r, g, b) = ACCENT;
        self.content()
            .set_line_width(mm(RULE_WIDTH_MM))
            .set_stroke_rgb(r, g, b)
            .move_to(mm(RULE_START_X_MM), y)
            .line_to(mm(RULE_END_X_MM), y)
            .stroke();
    }
}

/// Serializes the finished pages, fonts, and optional photo into a PDF file.
fn write_document(
    title_name: &str,
    mut pages: Vec<Content>,
    photo: Option<&EmbeddedPhoto>,
) -> Vec<u8> {
    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let pages_id = alloc.bump();
    let info_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let image_id = alloc.bump();
    let mask_id = alloc.bump();
    let page_refs: Vec<(Ref, Ref)> = pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    if photo.is_some() {
        let content = &mut pages[0];
        content
            .save_state()
            .transform([
                mm(PHOTO_BOX.width),
                0.0,
                0.0,
                mm(PHOTO_BOX.height),
                mm(PHOTO_BOX.x),
                mm(PAGE_HEIGHT_MM - PHOTO_BOX.y - PHOTO_BOX.height),
            ])
            .x_object(Name(PHOTO_RESOURCE))
            .restore_state();
    }

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(page_refs.len() as i32);
    pdf.document_info(info_id)
        .title(TextStr(&format!("Resume - {title_name}")))
        .producer(TextStr(concat!("resume_api ", env!("CARGO_PKG_VERSION"))));

    for (font, id) in [
        (StandardFont::Helvetica, regular_id),
        (StandardFont::HelveticaBold, bold_id),
    ] {
        pdf.type1_font(id)
            .base_font(Name(font.base_font()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    if let Some(photo) = photo {
        write_photo(&mut pdf, photo, image_id, mask_id);
    }

    for (index, (content, (page_id, content_id))) in pages.into_iter().zip(&page_refs).enumerate() {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM)))
            .parent(pages_id)
            .contents(*content_id);
        let mut resources = page.resources();
        resources
            .fonts()
            .pair(Name(StandardFont::Helvetica.resource_name()), regular_id)
            .pair(Name(StandardFont::HelveticaBold.resource_name()), bold_id);
        if index == 0 && photo.is_some() {
            resources.x_objects().pair(Name(PHOTO_RESOURCE), image_id);
        }
        resources.finish();
        page.finish();

        pdf.stream(*content_id, &content.finish());
    }

    pdf.finish()
}

fn write_photo(pdf: &mut Pdf, photo: &EmbeddedPhoto, image_id: Ref, mask_id: Ref) {
    let mut image = pdf.image_xobject(image_id, &photo.data);
    image.filter(match photo.encoding {
        PhotoEncoding::Jpeg => Filter::DctDecode,
        PhotoEncoding::Flate => Filter::FlateDecode,
    });
    image.width(photo.width as i32);
    image.height(photo.height as i32);
    match photo.color_space {
        PhotoColorSpace::Gray => image.color_space().device_gray(),
        PhotoColorSpace::Rgb => image.color_space().device_rgb(),
    }
    image.bits_per_component(8);
    if photo.alpha.is_some() {
        image.s_mask(mask_id);
    }
    image.finish();

    if let Some(alpha) = &photo.alpha {
        let mut mask = pdf.image_xobject(mask_id, alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(photo.width as i32);
        mask.height(photo.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }
}

/// Encodes text for a WinAnsiEncoding standard font. Latin-1 passes through,
/// common typographic punctuation maps to its 0x80..0x9F slot, anything else
/// becomes `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
