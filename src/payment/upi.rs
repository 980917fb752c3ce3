//! UPI payment details and QR code rendering.

use qrcode::QrCode;
use qrcode::render::svg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// QR code generation errors.
#[derive(Debug, Error)]
pub enum QrCodeError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// UPI payee details shown to buyers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiDetails {
    /// Virtual payment address, e.g. `name@bank`.
    pub upi_id: String,

    /// Display name of the payee.
    pub payee_name: String,

    /// Amount in rupees, kept as a string to match the env var verbatim.
    pub amount: String,
}

impl UpiDetails {
    /// Builds the `upi://pay` deep link encoded into the QR code.
    #[must_use]
    pub fn payment_uri(&self) -> String {
        format!(
            "upi://pay?pa={}&pn={}&am={}&cu=INR",
            self.upi_id, self.payee_name, self.amount
        )
    }

    /// Renders the payment link as an SVG QR code.
    pub fn qr_svg(&self) -> Result<String, QrCodeError> {
        let code = QrCode::new(self.payment_uri().as_bytes())?;
        let image = code
            .render::<svg::Color>()
            .min_dimensions(300, 300)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> UpiDetails {
        UpiDetails {
            upi_id: "merchant@upi".to_owned(),
            payee_name: "Membership".to_owned(),
            amount: "99".to_owned(),
        }
    }

    #[test]
    fn test_payment_uri_shape() {
        assert_eq!(
            details().payment_uri(),
            "upi://pay?pa=merchant@upi&pn=Membership&am=99&cu=INR"
        );
    }

    #[test]
    fn test_qr_svg_renders() {
        let svg = details().qr_svg().unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("svg"));
    }
}
