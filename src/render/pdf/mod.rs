//! PDF rendering.
//!
//! The document is laid out onto fixed-size pages (see [`layout`]) and
//! serialized with `pdf-writer`. Text uses the standard base-14 fonts in
//! WinAnsi encoding, so nothing is embedded except images.

mod fonts;
mod layout;

pub use fonts::FontKey;
pub use layout::{layout, Item, PageLayout};

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Resource};
use crate::render::RenderOptions;
use chrono::{DateTime, Datelike, Timelike, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::debug;
use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Encoded PDF plus the number of laid-out pages.
#[derive(Debug, Clone)]
pub struct PdfOutput {
    /// PDF file bytes
    pub data: Vec<u8>,
    /// Number of pages
    pub page_count: u32,
}

/// Render a document to PDF.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<PdfOutput> {
    let pages = layout(doc, options)?;
    debug!("Laid out {} pages", pages.len());

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let info_id = alloc.bump();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);

    let faces: BTreeSet<FontKey> = pages
        .iter()
        .flat_map(|page| &page.items)
        .filter_map(|item| match item {
            Item::Text { font, .. } => Some(*font),
            _ => None,
        })
        .collect();

    let mut fonts: BTreeMap<FontKey, (String, Ref)> = BTreeMap::new();
    for (i, face) in faces.into_iter().enumerate() {
        let id = alloc.bump();
        pdf.type1_font(id)
            .base_font(Name(face.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        fonts.insert(face, (format!("F{}", i + 1), id));
    }

    let mut images: BTreeMap<String, (String, Ref)> = BTreeMap::new();
    for item in pages.iter().flat_map(|page| &page.items) {
        if let Item::Image { resource_id, .. } = item {
            if images.contains_key(resource_id) {
                continue;
            }
            let resource = doc.get_resource(resource_id).ok_or_else(|| {
                Error::Image(format!("missing image resource: {}", resource_id))
            })?;
            let id = write_image(&mut pdf, &mut alloc, resource, options.compress)?;
            let name = format!("Im{}", images.len() + 1);
            images.insert(resource_id.clone(), (name, id));
        }
    }

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in &pages {
        let page_id = alloc.bump();
        let content_id = alloc.bump();
        page_ids.push(page_id);

        let content = page_content(page, &fonts, &images);
        write_stream(&mut pdf, content_id, &content, options.compress)?;

        let mut annotation_ids = Vec::new();
        for item in &page.items {
            if let Item::Link {
                x,
                y,
                width,
                height,
                url,
            } = item
            {
                let id = alloc.bump();
                let mut annotation = pdf.annotation(id);
                annotation
                    .subtype(AnnotationType::Link)
                    .rect(Rect::new(*x, *y, x + width, y + height))
                    .border(0.0, 0.0, 0.0, None);
                annotation
                    .action()
                    .action_type(ActionType::Uri)
                    .uri(Str(url.as_bytes()));
                annotation.finish();
                annotation_ids.push(id);
            }
        }

        let mut writer = pdf.page(page_id);
        writer
            .media_box(Rect::new(
                0.0,
                0.0,
                options.page_size.width,
                options.page_size.height,
            ))
            .parent(tree_id)
            .contents(content_id);
        if !annotation_ids.is_empty() {
            writer.annotations(annotation_ids);
        }
        let mut resources = writer.resources();
        resources
            .fonts()
            .pairs(fonts.values().map(|(name, id)| (Name(name.as_bytes()), *id)));
        if !images.is_empty() {
            resources
                .x_objects()
                .pairs(images.values().map(|(name, id)| (Name(name.as_bytes()), *id)));
        }
        resources.finish();
        writer.finish();
    }

    let page_count = page_ids.len() as u32;
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_count as i32);

    write_info(&mut pdf, info_id, &doc.metadata);

    Ok(PdfOutput {
        data: pdf.finish(),
        page_count,
    })
}

fn page_content(
    page: &PageLayout,
    fonts: &BTreeMap<FontKey, (String, Ref)>,
    images: &BTreeMap<String, (String, Ref)>,
) -> Vec<u8> {
    let mut content = Content::new();
    let mut word_spacing = 0.0f32;

    for item in &page.items {
        match item {
            Item::Text {
                x,
                y,
                font,
                size,
                color,
                text,
                word_spacing: spacing,
            } => {
                let Some((name, _)) = fonts.get(font) else {
                    continue;
                };
                let (r, g, b) = color.to_unit();
                content.begin_text();
                content.set_font(Name(name.as_bytes()), *size);
                content.set_fill_rgb(r, g, b);
                if *spacing != word_spacing {
                    content.set_word_spacing(*spacing);
                    word_spacing = *spacing;
                }
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *x, *y]);
                content.show(Str(text));
                content.end_text();
            }
            Item::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let (r, g, b) = color.to_unit();
                content.set_fill_rgb(r, g, b);
                content.rect(*x, *y, *width, *height);
                content.fill_nonzero();
            }
            Item::Image {
                resource_id,
                x,
                y,
                width,
                height,
            } => {
                let Some((name, _)) = images.get(resource_id) else {
                    continue;
                };
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
            Item::Link { .. } => {}
        }
    }

    content.finish()
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn write_stream(pdf: &mut Pdf, id: Ref, data: &[u8], compress: bool) -> Result<()> {
    if compress {
        let packed = deflate(data)?;
        pdf.stream(id, &packed).filter(Filter::FlateDecode);
    } else {
        pdf.stream(id, data);
    }
    Ok(())
}

/// Decode an image resource and write it as an RGB image XObject, with a
/// soft mask when the image has transparent pixels.
fn write_image(pdf: &mut Pdf, alloc: &mut Ref, resource: &Resource, compress: bool) -> Result<Ref> {
    let decoded = image::load_from_memory(&resource.data)?;
    let dimension = |value: u32| {
        i32::try_from(value).map_err(|_| Error::Pdf(format!("image dimension too large: {}", value)))
    };
    let width = dimension(decoded.width())?;
    let height = dimension(decoded.height())?;

    let mut mask_id = None;
    if decoded.color().has_alpha() {
        let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
        if alpha.iter().any(|&a| a != u8::MAX) {
            let id = alloc.bump();
            let data = if compress { deflate(&alpha)? } else { alpha };
            let mut mask = pdf.image_xobject(id, &data);
            if compress {
                mask.filter(Filter::FlateDecode);
            }
            mask.width(width).height(height).bits_per_component(8);
            mask.color_space().device_gray();
            mask.finish();
            mask_id = Some(id);
        }
    }

    let id = alloc.bump();
    let rgb = decoded.to_rgb8().into_raw();
    let data = if compress { deflate(&rgb)? } else { rgb };
    let mut xobject = pdf.image_xobject(id, &data);
    if compress {
        xobject.filter(Filter::FlateDecode);
    }
    xobject.width(width).height(height).bits_per_component(8);
    xobject.color_space().device_rgb();
    if let Some(mask) = mask_id {
        xobject.s_mask(mask);
    }
    xobject.finish();

    debug!(
        "Embedded image {}x{} ({} bytes)",
        width,
        height,
        data.len()
    );
    Ok(id)
}

fn write_info(pdf: &mut Pdf, id: Ref, metadata: &Metadata) {
    let mut info = pdf.document_info(id);
    if let Some(ref title) = metadata.title {
        info.title(TextStr(title));
    }
    if let Some(ref author) = metadata.author {
        info.author(TextStr(author));
    }
    if let Some(ref subject) = metadata.subject {
        info.subject(TextStr(subject));
    }
    if let Some(ref keywords) = metadata.keywords {
        info.keywords(TextStr(keywords));
    }
    if let Some(ref creator) = metadata.creator {
        info.creator(TextStr(creator));
    }
    info.producer(TextStr(concat!("betaguide ", env!("CARGO_PKG_VERSION"))));
    if let Some(created) = metadata.created {
        info.creation_date(pdf_date(created));
    }
    info.finish();
}

fn pdf_date(at: DateTime<Utc>) -> Date {
    Date::new(at.year().clamp(0, 9999) as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
        .utc_offset_minute(0)
}
