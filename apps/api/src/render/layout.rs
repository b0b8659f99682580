//! The one document shape the service renders: page geometry, styling, and
//! the ordered list of sections. Distances are in millimetres; the renderer
//! converts to PDF points.

use crate::submission::models::Submission;

/// Millimetres to PDF points.
pub fn mm(value: f32) -> f32 {
    value * 72.0 / 25.4
}

pub type Rgb = (f32, f32, f32);

/// The accent blue used for the title, headings, and rules.
pub const ACCENT: Rgb = (0.0, 102.0 / 255.0, 204.0 / 255.0);
pub const BODY_COLOR: Rgb = (0.0, 0.0, 0.0);

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// Content never crosses this distance from the bottom edge.
pub const BOTTOM_MARGIN_MM: f32 = 20.0;

pub const TITLE_TEXT: &str = "Resume";
pub const TITLE_SIZE_PT: f32 = 16.0;
pub const HEADING_SIZE_PT: f32 = 14.0;
pub const BODY_SIZE_PT: f32 = 12.0;

/// Horizontal inset of text inside its row.
pub const CELL_PADDING_MM: f32 = 1.0;
/// Height of the title, heading, and body text rows.
pub const ROW_HEIGHT_MM: f32 = 10.0;
pub const TITLE_GAP_MM: f32 = 10.0;
pub const SECTION_GAP_MM: f32 = 5.0;

pub const RULE_WIDTH_MM: f32 = 0.5;
pub const RULE_START_X_MM: f32 = 10.0;
pub const RULE_END_X_MM: f32 = 200.0;

/// Fixed photo box on the first page, independent of the text cursor.
pub const PHOTO_BOX: PhotoBox = PhotoBox {
    x: 160.0,
    y: 20.0,
    width: 30.0,
    height: 30.0,
};

/// Top-left anchored rectangle, in millimetres from the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One resume section: a heading and how to derive its body from a submission.
pub struct SectionLayout {
    pub heading: &'static str,
    pub body: fn(&Submission) -> String,
}

/// Sections in the order they appear on the page.
pub const RESUME_SECTIONS: [SectionLayout; 5] = [
    SectionLayout {
        heading: "Personal Details",
        body: personal_details,
    },
    SectionLayout {
        heading: "Skills",
        body: |s| s.skills_line(),
    },
    SectionLayout {
        heading: "Education",
        body: |s| s.education.clone(),
    },
    SectionLayout {
        heading: "Experience",
        body: |s| s.experience.clone(),
    },
    SectionLayout {
        heading: "Projects",
        body: |s| s.projects.clone(),
    },
];

fn personal_details(s: &Submission) -> String {
    format!("Name: {}\nEmail: {}\nPhone: {}", s.name, s.email, s.phone)
}

/// Width of a full text row between the margins, in millimetres.
pub fn row_width_mm() -> f32 {
    PAGE_WIDTH_MM - 2.0 * MARGIN_MM
}

/// Width section body text wraps at, in points.
pub fn text_width_pt() -> f32 {
    mm(row_width_mm() - 2.0 * CELL_PADDING_MM)
}
