//! Fixed-geometry PDF renderer for the voter card.
//!
//! A pure function from (request, QR raster, optional photo bytes) to PDF
//! bytes. All coordinates and sizes come from [`super::layout`]; nothing here
//! reads configuration or touches the network.

use log::warn;
use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};

use super::common::{format_card_date, print_upper};
use super::layout::*;
use super::models::VoterCardRequest;
use super::qr::QrImage;
use super::CardError;

/// Resolution used when placing rasters on the page.
const EMBED_DPI: f32 = 300.0;
/// Average Helvetica glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.55;
/// Points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

fn mm(v: f32) -> Mm {
    Mm(v.into())
}

/// Render a voter card as a single-page PDF.
///
/// Photo problems (absent, undecodable) degrade to the "PHOTO" placeholder;
/// every other drawing or embedding failure aborts with
/// [`CardError::RenderingFailed`], since a partially rendered card must never
/// be issued.
pub fn render_card(
    request: &VoterCardRequest,
    qr: &QrImage,
    photo: Option<&[u8]>,
) -> Result<Vec<u8>, CardError> {
    let (doc, page, layer) =
        PdfDocument::new("Permanent Voter Card", mm(CARD_W_MM), mm(CARD_H_MM), "card");
    let layer = doc.get_page(page).get_layer(layer);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(render_err)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(render_err)?;

    draw_header(&layer, &regular, &bold);
    draw_photo_slot(&layer, &regular, photo);
    draw_field_stack(&layer, &regular, &bold, request);
    draw_location_block(&layer, &bold, &regular, request);
    draw_qr(&layer, qr)?;
    draw_footer(&layer, &regular, request);

    doc.save_to_bytes().map_err(render_err)
}

fn render_err<E: std::fmt::Display>(e: E) -> CardError {
    CardError::RenderingFailed(e.to_string())
}

fn rgb(c: (f32, f32, f32)) -> Color {
    Color::Rgb(Rgb::new(c.0.into(), c.1.into(), c.2.into(), None))
}

fn fill_rect(layer: &PdfLayerReference, x: f32, y: f32, w: f32, h: f32, color: (f32, f32, f32)) {
    layer.set_fill_color(rgb(color));
    layer.add_rect(Rect::new(mm(x), mm(y), mm(x + w), mm(y + h)).with_mode(PaintMode::Fill));
}

/// Rough text width for centering; exact metrics are not worth a font parser
/// for a five-character placeholder.
fn approx_text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.len() as f32 * GLYPH_ADVANCE * font_size_pt / PT_PER_MM
}

fn draw_header(layer: &PdfLayerReference, regular: &IndirectFontRef, bold: &IndirectFontRef) {
    fill_rect(layer, 0.0, HEADER_Y_MM, CARD_W_MM, HEADER_H_MM, HEADER_RGB);

    // national flag motif, top-right
    let stripes = [FLAG_GREEN_RGB, WHITE_RGB, FLAG_GREEN_RGB];
    for (i, stripe) in stripes.iter().enumerate() {
        fill_rect(
            layer,
            FLAG_X_MM + i as f32 * FLAG_STRIPE_W_MM,
            FLAG_Y_MM,
            FLAG_STRIPE_W_MM,
            FLAG_STRIPE_H_MM,
            *stripe,
        );
    }

    layer.set_fill_color(rgb(WHITE_RGB));
    layer.use_text(
        PRODUCT_NAME,
        HEADER_TITLE_PT.into(),
        mm(HEADER_TITLE_X_MM),
        mm(HEADER_TITLE_Y_MM),
        bold,
    );
    layer.use_text(
        CARD_SUBTITLE,
        HEADER_SUBTITLE_PT.into(),
        mm(HEADER_TITLE_X_MM),
        mm(HEADER_SUBTITLE_Y_MM),
        regular,
    );
}

fn draw_photo_slot(layer: &PdfLayerReference, regular: &IndirectFontRef, photo: Option<&[u8]>) {
    if let Some(bytes) = photo {
        match image_crate::load_from_memory(bytes) {
            Ok(decoded) => {
                place_image(layer, &decoded, PHOTO_X_MM, PHOTO_Y_MM, PHOTO_W_MM, PHOTO_H_MM);
                draw_photo_border(layer);
                return;
            }
            Err(e) => {
                warn!("passport photo is not a decodable image, using placeholder: {e}");
            }
        }
    }

    draw_photo_border(layer);
    layer.set_fill_color(rgb(MUTED_RGB));
    let text_w = approx_text_width_mm("PHOTO", PHOTO_PLACEHOLDER_PT);
    layer.use_text(
        "PHOTO",
        PHOTO_PLACEHOLDER_PT.into(),
        mm(PHOTO_X_MM + (PHOTO_W_MM - text_w) / 2.0),
        mm(PHOTO_Y_MM + PHOTO_H_MM / 2.0),
        regular,
    );
}

fn draw_photo_border(layer: &PdfLayerReference) {
    layer.set_outline_color(rgb(BLACK_RGB));
    layer.set_outline_thickness(PHOTO_BORDER_PT.into());
    layer.add_rect(
        Rect::new(
            mm(PHOTO_X_MM),
            mm(PHOTO_Y_MM),
            mm(PHOTO_X_MM + PHOTO_W_MM),
            mm(PHOTO_Y_MM + PHOTO_H_MM),
        )
        .with_mode(PaintMode::Stroke),
    );
}

/// Label/value rows of the personal-data stack, in print order. A missing
/// middle name yields no row at all; the rows below it shift up.
pub fn field_rows(request: &VoterCardRequest) -> Vec<(&'static str, String)> {
    let mut fields: Vec<(&str, String)> = vec![
        ("SURNAME", print_upper(&request.surname)),
        ("FIRST NAME", print_upper(&request.first_name)),
    ];
    if let Some(middle) = &request.middle_name {
        if !middle.trim().is_empty() {
            fields.push(("MIDDLE NAME", print_upper(middle)));
        }
    }
    fields.push(("DATE OF BIRTH", format_card_date(request.date_of_birth)));
    fields.push(("GENDER", print_upper(&request.gender)));
    fields
}

fn draw_field_stack(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    request: &VoterCardRequest,
) {
    for (i, (label, value)) in field_rows(request).iter().enumerate() {
        let label_y = FIELD_STACK_TOP_MM - i as f32 * FIELD_ADVANCE_MM;
        layer.set_fill_color(rgb(MUTED_RGB));
        layer.use_text(*label, LABEL_PT.into(), mm(FIELDS_X_MM), mm(label_y), regular);
        layer.set_fill_color(rgb(BLACK_RGB));
        layer.use_text(
            value.as_str(),
            VALUE_PT.into(),
            mm(FIELDS_X_MM),
            mm(label_y - LABEL_TO_VALUE_MM),
            bold,
        );
    }
}

fn draw_location_block(
    layer: &PdfLayerReference,
    bold: &IndirectFontRef,
    regular: &IndirectFontRef,
    request: &VoterCardRequest,
) {
    let lines = [
        (format!("VIN: {}", print_upper(&request.vin)), true),
        (format!("STATE: {}", print_upper(&request.state)), false),
        (format!("LGA: {}", print_upper(&request.lga)), false),
        (format!("WARD: {}", print_upper(&request.ward)), false),
    ];

    layer.set_fill_color(rgb(BLACK_RGB));
    for (i, (line, emphasized)) in lines.iter().enumerate() {
        let font = if *emphasized { bold } else { regular };
        layer.use_text(
            line.as_str(),
            LOCATION_PT.into(),
            mm(LOCATION_X_MM),
            mm(LOCATION_TOP_MM - i as f32 * LOCATION_LINE_MM),
            font,
        );
    }
}

fn draw_qr(layer: &PdfLayerReference, qr: &QrImage) -> Result<(), CardError> {
    let gray = image_crate::GrayImage::from_raw(qr.size_px, qr.size_px, qr.pixels.clone())
        .ok_or_else(|| CardError::RenderingFailed("QR raster has inconsistent size".to_string()))?;
    let image = DynamicImage::ImageLuma8(gray);
    place_image(layer, &image, QR_X_MM, QR_Y_MM, QR_SIZE_MM, QR_SIZE_MM);
    Ok(())
}

fn draw_footer(layer: &PdfLayerReference, regular: &IndirectFontRef, request: &VoterCardRequest) {
    let footer = format!(
        "REF: {}   ISSUED: {}   {}",
        request.application_ref,
        format_card_date(request.issue_date),
        VALIDITY_CAPTION
    );
    layer.set_fill_color(rgb(MUTED_RGB));
    layer.use_text(footer, FOOTER_PT.into(), mm(FOOTER_X_MM), mm(FOOTER_Y_MM), regular);
}

/// Place a raster on the layer scaled to an exact box in millimetres.
fn place_image(layer: &PdfLayerReference, image: &DynamicImage, x: f32, y: f32, w: f32, h: f32) {
    let (px_w, px_h) = image.dimensions();
    let native_w_mm = px_w as f32 * 25.4 / EMBED_DPI;
    let native_h_mm = px_h as f32 * 25.4 / EMBED_DPI;
    Image::from_dynamic_image(image).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            scale_x: Some((w / native_w_mm).into()),
            scale_y: Some((h / native_h_mm).into()),
            dpi: Some(EMBED_DPI.into()),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::qr::encode_verification_qr;
    use chrono::NaiveDate;

    fn request() -> VoterCardRequest {
        VoterCardRequest {
            first_name: "Adaeze".to_string(),
            middle_name: None,
            surname: "Okafor".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 11, 23).unwrap(),
            gender: "Female".to_string(),
            state: "Anambra".to_string(),
            lga: "Awka North".to_string(),
            ward: "Achalla Ward".to_string(),
            vin: "90F5B1E64D21A73ONQ4".to_string(),
            application_ref: "EV-2026-000123".to_string(),
            passport_photo_url: None,
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        }
    }

    #[test]
    fn test_render_without_photo_produces_pdf() {
        let qr = encode_verification_qr("https://evoter.example.org/verify/X1").unwrap();
        let pdf = render_card(&request(), &qr, None).unwrap();
        assert!(pdf.len() > 0);
        assert_eq!(&pdf[..4], b"%PDF");
    }

    #[test]
    fn test_render_with_undecodable_photo_falls_back_to_placeholder() {
        let qr = encode_verification_qr("https://evoter.example.org/verify/X1").unwrap();
        let pdf = render_card(&request(), &qr, Some(b"not an image")).unwrap();
        assert_eq!(&pdf[..4], b"%PDF");
    }

    #[test]
    fn test_render_with_middle_name() {
        let qr = encode_verification_qr("https://evoter.example.org/verify/X1").unwrap();
        let mut req = request();
        req.middle_name = Some("Ngozi".to_string());
        assert!(render_card(&req, &qr, None).is_ok());
    }

    #[test]
    fn test_field_rows_omit_missing_middle_name() {
        let mut req = request();
        req.middle_name = None;
        let labels: Vec<&str> = field_rows(&req).iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            vec!["SURNAME", "FIRST NAME", "DATE OF BIRTH", "GENDER"]
        );

        req.middle_name = Some("Ngozi".to_string());
        let rows = field_rows(&req);
        assert_eq!(rows[2], ("MIDDLE NAME", "NGOZI".to_string()));
    }

    #[test]
    fn test_field_rows_format_values_for_print() {
        let rows = field_rows(&request());
        assert_eq!(rows[0], ("SURNAME", "OKAFOR".to_string()));
        assert!(rows.contains(&("DATE OF BIRTH", "23/11/1990".to_string())));
        assert!(rows.contains(&("GENDER", "FEMALE".to_string())));
    }
}
