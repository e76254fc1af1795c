//! Card geometry and typography constants.
//!
//! Everything the renderer needs to place ink on the canvas lives here, in
//! millimetres from the bottom-left corner (PDF coordinate convention).
//! Font sizes are in points.

/// ISO/IEC 7810 ID-1 card width.
pub const CARD_W_MM: f32 = 85.6;
/// ISO/IEC 7810 ID-1 card height.
pub const CARD_H_MM: f32 = 53.98;

/// Common edge margin.
pub const MARGIN_MM: f32 = 3.0;

// Header band across the full width of the card.
pub const HEADER_H_MM: f32 = 12.3;
pub const HEADER_Y_MM: f32 = CARD_H_MM - HEADER_H_MM;
pub const HEADER_TITLE_X_MM: f32 = MARGIN_MM;
pub const HEADER_TITLE_Y_MM: f32 = 49.3;
pub const HEADER_SUBTITLE_Y_MM: f32 = 45.0;
pub const HEADER_TITLE_PT: f32 = 7.0;
pub const HEADER_SUBTITLE_PT: f32 = 4.5;

// Three-stripe flag motif in the top-right of the header band.
pub const FLAG_STRIPE_W_MM: f32 = 3.0;
pub const FLAG_STRIPE_H_MM: f32 = 6.0;
pub const FLAG_Y_MM: f32 = 45.2;
pub const FLAG_X_MM: f32 = CARD_W_MM - MARGIN_MM - 3.0 * FLAG_STRIPE_W_MM;

// Photo slot, left side under the header.
pub const PHOTO_X_MM: f32 = MARGIN_MM;
pub const PHOTO_Y_MM: f32 = 22.0;
pub const PHOTO_W_MM: f32 = 12.7;
pub const PHOTO_H_MM: f32 = 16.0;
pub const PHOTO_BORDER_PT: f32 = 0.6;
pub const PHOTO_PLACEHOLDER_PT: f32 = 3.5;

// Labelled field stack to the right of the photo. Labels sit immediately
// above their bold upper-case values; the whole stack advances by
// FIELD_ADVANCE_MM per field, so an omitted field shifts the rest up.
pub const FIELDS_X_MM: f32 = 19.5;
pub const FIELD_STACK_TOP_MM: f32 = 38.5;
pub const LABEL_TO_VALUE_MM: f32 = 2.2;
pub const FIELD_ADVANCE_MM: f32 = 5.2;
pub const LABEL_PT: f32 = 3.5;
pub const VALUE_PT: f32 = 5.0;

// Location block under the photo slot: VIN, state, LGA, ward.
pub const LOCATION_X_MM: f32 = MARGIN_MM;
pub const LOCATION_TOP_MM: f32 = 19.2;
pub const LOCATION_LINE_MM: f32 = 2.8;
pub const LOCATION_PT: f32 = 3.5;

// QR anchored to the bottom-right corner.
pub const QR_SIZE_MM: f32 = 12.0;
pub const QR_X_MM: f32 = CARD_W_MM - MARGIN_MM - QR_SIZE_MM;
pub const QR_Y_MM: f32 = MARGIN_MM;

// Footer line along the bottom edge.
pub const FOOTER_X_MM: f32 = MARGIN_MM;
pub const FOOTER_Y_MM: f32 = 3.2;
pub const FOOTER_PT: f32 = 3.5;

/// Fixed validity caption printed in the footer.
pub const VALIDITY_CAPTION: &str = "VALID: 10 YEARS";
/// Product name in the header band.
pub const PRODUCT_NAME: &str = "EVOTER ELECTORAL COMMISSION";
/// Header subtitle.
pub const CARD_SUBTITLE: &str = "PERMANENT VOTER CARD";

/// Header band fill (deep green).
pub const HEADER_RGB: (f32, f32, f32) = (0.0, 0.42, 0.25);
/// Flag stripe greens; the middle stripe is white.
pub const FLAG_GREEN_RGB: (f32, f32, f32) = (0.0, 0.53, 0.31);
pub const WHITE_RGB: (f32, f32, f32) = (1.0, 1.0, 1.0);
pub const BLACK_RGB: (f32, f32, f32) = (0.0, 0.0, 0.0);
/// Muted grey for field labels and the footer.
pub const MUTED_RGB: (f32, f32, f32) = (0.35, 0.35, 0.35);

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-3;

    #[test]
    fn test_header_band_spans_card_top() {
        assert!((HEADER_Y_MM + HEADER_H_MM - CARD_H_MM).abs() < TOL);
        assert!(HEADER_TITLE_Y_MM > HEADER_Y_MM && HEADER_TITLE_Y_MM < CARD_H_MM);
        assert!(HEADER_SUBTITLE_Y_MM > HEADER_Y_MM);
    }

    #[test]
    fn test_flag_motif_inside_header_band() {
        assert!(FLAG_Y_MM >= HEADER_Y_MM);
        assert!(FLAG_Y_MM + FLAG_STRIPE_H_MM <= CARD_H_MM);
        assert!(FLAG_X_MM + 3.0 * FLAG_STRIPE_W_MM <= CARD_W_MM - MARGIN_MM + TOL);
    }

    #[test]
    fn test_photo_slot_clears_header() {
        assert!(PHOTO_Y_MM + PHOTO_H_MM <= HEADER_Y_MM);
        assert!(PHOTO_X_MM + PHOTO_W_MM < FIELDS_X_MM);
    }

    #[test]
    fn test_field_stack_fits_five_fields() {
        // surname, first name, middle name, date of birth, gender
        let last_value_y =
            FIELD_STACK_TOP_MM - 4.0 * FIELD_ADVANCE_MM - LABEL_TO_VALUE_MM;
        assert!(last_value_y > QR_Y_MM + QR_SIZE_MM);
        assert!(FIELD_STACK_TOP_MM < HEADER_Y_MM);
    }

    #[test]
    fn test_location_block_sits_under_photo() {
        assert!(LOCATION_TOP_MM < PHOTO_Y_MM);
        let last_line_y = LOCATION_TOP_MM - 3.0 * LOCATION_LINE_MM;
        assert!(last_line_y > FOOTER_Y_MM);
    }

    #[test]
    fn test_qr_anchored_bottom_right_with_margin() {
        assert!((CARD_W_MM - (QR_X_MM + QR_SIZE_MM) - MARGIN_MM).abs() < TOL);
        assert!((QR_Y_MM - MARGIN_MM).abs() < TOL);
    }

    #[test]
    fn test_footer_clears_qr_zone() {
        assert!(FOOTER_X_MM < QR_X_MM);
        assert!(FOOTER_Y_MM < QR_Y_MM + QR_SIZE_MM);
    }
}
