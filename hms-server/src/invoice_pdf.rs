use printpdf::{BuiltinFont, Mm, PdfDocument};

use database::entities::InvoiceEntity;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 25.0;
const TOP_LINE_MM: f32 = 270.0;
const LINE_STEP_MM: f32 = 8.0;
const FONT_SIZE: f32 = 14.0;

pub(crate) fn format_amount(amount_cents: i64) -> String {
    format!("${}.{:02}", amount_cents / 100, amount_cents % 100)
}

/// Fixed-layout invoice document. Pure formatting, no side effects.
pub(crate) fn render_invoice(invoice: &InvoiceEntity, patient_name: &str) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| e.to_string())?;
    let current_layer = doc.get_page(page).get_layer(layer);

    let status = if invoice.is_paid { "Paid" } else { "Unpaid" };
    let lines = [
        format!("Invoice ID: {}", invoice.id),
        format!("Patient: {}", patient_name),
        format!("Date: {}", invoice.invoice_date.format("%Y-%m-%d")),
        format!("Description: {}", invoice.description),
        format!("Amount: {}", format_amount(invoice.amount_cents)),
        format!("Status: {}", status),
    ];

    let mut y = TOP_LINE_MM;
    for line in lines {
        current_layer.use_text(line, FONT_SIZE, Mm(LEFT_MARGIN_MM), Mm(y), &font);
        y -= LINE_STEP_MM;
    }

    doc.save_to_bytes().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn invoice(paid: bool) -> InvoiceEntity {
        InvoiceEntity {
            id: 17,
            patient_id: 3,
            invoice_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
            description: "Ward stay and medication".to_string(),
            amount_cents: 123_450,
            is_paid: paid,
            paid_date: None,
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_invoice(&invoice(false), "Jane Doe").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn amount_formatting_keeps_two_decimals() {
        assert_eq!(format_amount(123_450), "$1234.50");
        assert_eq!(format_amount(5), "$0.05");
        assert_eq!(format_amount(0), "$0.00");
    }
}
