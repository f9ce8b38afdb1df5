//! PDF writer for rendered pages.
//!
//! Produces a self-contained PDF using the standard Helvetica faces, so no
//! fonts are embedded. Output is a pure function of its inputs.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use synthscore_core::layout::LayoutConfig;

use crate::export::ExportMetadata;
use crate::render::{DrawOp, Font, RenderedPage};
use crate::style::Rgb;

const PT_PER_MM: f32 = 72.0 / 25.4;
const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Serialize rendered pages into PDF bytes.
pub fn write_pdf(pages: &[RenderedPage], layout: &LayoutConfig, metadata: &ExportMetadata) -> Vec<u8> {
    let mut pdf = Pdf::new();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let info_id = Ref::new(5);

    let page_ids: Vec<Ref> = (0..pages.len()).map(|i| Ref::new(6 + 2 * i as i32)).collect();
    let content_ids: Vec<Ref> = (0..pages.len())
        .map(|i| Ref::new(7 + 2 * i as i32))
        .collect();

    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(pages.len() as i32);

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let page_width = layout.page_width * PT_PER_MM;
    let page_height = layout.page_content_height * PT_PER_MM;

    for (i, rendered) in pages.iter().enumerate() {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height))
            .parent(page_tree_id)
            .contents(content_ids[i]);
        page.resources()
            .fonts()
            .pair(REGULAR, regular_id)
            .pair(BOLD, bold_id);
        page.finish();

        let content = draw_page(rendered, page_height);
        pdf.stream(content_ids[i], &content.finish());
    }

    pdf.document_info(info_id)
        .title(TextStr(&metadata.title()))
        .subject(TextStr("Student Evaluation Report"))
        .author(TextStr("SynthScore"))
        .creator(TextStr("SynthScore"));

    pdf.finish()
}

fn draw_page(rendered: &RenderedPage, page_height: f32) -> Content {
    let mut content = Content::new();
    // Page coordinates are millimetres from the top; PDF wants points from the bottom.
    let px = |mm: f32| mm * PT_PER_MM;
    let py = |mm: f32| page_height - mm * PT_PER_MM;

    for op in &rendered.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                show_text(&mut content, px(*x), py(*y), *size, *font, *color, text);
            }
            DrawOp::Paragraph {
                x,
                y,
                size,
                line_height,
                color,
                lines,
            } => {
                for (n, line) in lines.iter().enumerate() {
                    let baseline = *y + n as f32 * line_height;
                    show_text(&mut content, px(*x), py(baseline), *size, Font::Regular, *color, line);
                }
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = color.unit();
                content.save_state();
                content.set_fill_rgb(r, g, b);
                content.rect(px(*x), py(*y + height), px(*width), px(*height));
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::StrokeRect {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                let (r, g, b) = color.unit();
                content.save_state();
                content.set_line_width(px(*line_width));
                content.set_stroke_rgb(r, g, b);
                content.rect(px(*x), py(*y + height), px(*width), px(*height));
                content.stroke();
                content.restore_state();
            }
        }
    }

    content
}

fn show_text(content: &mut Content, x: f32, y: f32, size: f32, font: Font, color: Rgb, text: &str) {
    let (r, g, b) = color.unit();
    let face = match font {
        Font::Regular => REGULAR,
        Font::Bold => BOLD,
    };
    let bytes = encode_win_ansi(text);
    content.set_fill_rgb(r, g, b);
    content
        .begin_text()
        .set_font(face, size)
        .next_line(x, y)
        .show(Str(&bytes))
        .end_text();
}

/// Encode `text` for the standard fonts' WinAnsi encoding. Characters outside
/// the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2026}' => 0x85,
            _ => b'?',
        })
        .collect()
}
