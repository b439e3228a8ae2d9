//! Serialise a laid-out [`RenderedDocument`] to PDF bytes.
//!
//! Only the standard Type 1 fonts are used, so nothing is embedded: the three
//! Helvetica faces with WinAnsiEncoding, plus ZapfDingbats for star ratings.
//! Characters WinAnsi cannot represent are dropped at encode time.

use crate::output::{DrawOp, Font, Page, RenderedDocument, TextStyle};
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::debug;

const PRODUCER: &str = concat!("tripdoc ", env!("CARGO_PKG_VERSION"));

/// Write `doc` as a complete PDF file.
pub fn write_pdf(doc: &RenderedDocument, width: f32, height: f32, compress: bool) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1;
    let mut alloc = || {
        let id = Ref::new(next_id);
        next_id += 1;
        id
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();
    let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|&f| (f, alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.document_info(info_id)
        .title(TextStr(&format!("{} - {}", doc.title, doc.destination)))
        .producer(TextStr(PRODUCER));

    for &(font, id) in &font_ids {
        let mut writer = pdf.type1_font(id);
        writer.base_font(Name(font.base_name().as_bytes()));
        if font != Font::ZapfDingbats {
            writer.encoding_predefined(Name(b"WinAnsiEncoding"));
        }
        writer.finish();
    }

    let mut page_ids = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let annot_ids: Vec<Ref> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Link { rect, url } => {
                    let id = alloc();
                    let mut annot = pdf.annotation(id);
                    annot
                        .subtype(AnnotationType::Link)
                        .rect(Rect::new(rect[0], rect[1], rect[2], rect[3]))
                        .border(0.0, 0.0, 0.0, None);
                    annot
                        .action()
                        .action_type(ActionType::Uri)
                        .uri(Str(url.as_bytes()));
                    Some(id)
                }
                _ => None,
            })
            .collect();

        let raw = page_content(page).finish();
        if compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
            pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_id, &raw);
        }

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, width, height))
            .parent(pages_id)
            .contents(content_id);
        if !annot_ids.is_empty() {
            page_writer.annotations(annot_ids.iter().copied());
        }
        let mut resources = page_writer.resources();
        let mut fonts = resources.fonts();
        for &(font, id) in &font_ids {
            fonts.pair(Name(font.resource_name().as_bytes()), id);
        }
    }

    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    let bytes = pdf.finish();
    debug!("Wrote {} page(s), {} bytes", doc.pages.len(), bytes.len());
    bytes
}

fn page_content(page: &Page) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, text, style } => {
                let encoded = encode_text(text, style);
                if encoded.is_empty() {
                    continue;
                }
                content.set_fill_rgb(style.color.r, style.color.g, style.color.b);
                content.begin_text();
                content.set_font(Name(style.font.resource_name().as_bytes()), style.size);
                content.next_line(*x, *y);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Rule { x1, x2, y } => {
                content.set_stroke_rgb(0.0, 0.0, 0.0);
                content.set_line_width(1.0);
                content.move_to(*x1, *y);
                content.line_to(*x2, *y);
                content.stroke();
            }
            DrawOp::Link { .. } => {}
        }
    }
    content
}

fn encode_text(text: &str, style: &TextStyle) -> Vec<u8> {
    match style.font {
        Font::ZapfDingbats => encode_dingbats(text),
        _ => encode_win_ansi(text),
    }
}

/// ZapfDingbats: the black star is code 0x48 (`a35`). Other characters drop.
fn encode_dingbats(text: &str) -> Vec<u8> {
    text.chars()
        .filter_map(|c| match c {
            '\u{2605}' => Some(b'H'),
            ' ' => Some(b' '),
            _ => None,
        })
        .collect()
}

/// Encode to WinAnsi (Windows-1252), dropping unrepresentable characters.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().filter_map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}
