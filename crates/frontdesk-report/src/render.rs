//! Page layout for the visit report.
//!
//! A4 portrait, measured in millimetres from the top-left corner (converted
//! to printpdf's bottom-left origin at draw time). Content that runs past the
//! break threshold continues on an added page; the signature line never sits
//! higher than a fixed minimum offset, however short the content above it.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::DateTime;
use chrono_tz::Tz;
use frontdesk_core::{
  document::Document, settings::CompanySettings, visit::VisitRecord,
};
use printpdf::{
  BuiltinFont, CustomPdfConformance, Image, ImageTransform, IndirectFontRef,
  Line, Mm, PdfConformance, PdfDocument, PdfDocumentReference,
  PdfLayerReference, Point,
};
use time::OffsetDateTime;

use crate::{Error, Result};

// ─── Layout constants ────────────────────────────────────────────────────────

const PAGE_W_MM: f32 = 210.0;
const PAGE_H_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

const ADDRESS_LINE_MM: f32 = 4.5;
const LINE_HEIGHT_MM: f32 = 6.0;

const LOGO_MAX_WIDTH_MM: f32 = 50.0;
const LOGO_DPI: f32 = 300.0;

/// The signature line is placed at `max(cursor, this)` from the page top.
const SIGNATURE_MIN_Y_MM: f32 = 230.0;
/// Advancing past this threshold starts a new page.
const CONTENT_BOTTOM_MM: f32 = PAGE_H_MM - 35.0;
const FOOTER_Y_MM: f32 = PAGE_H_MM - 22.0;

const PT_TO_MM: f32 = 0.352_778;

const TITLE: &str = "Visitor Check-In Report";
const AFFIRMATION: &str =
  "The visitor affirms having fully read the documents listed below.";
const NO_DOCUMENTS: &str = "No documents acknowledged.";
const REMOVED_DOCUMENT: &str = "(document removed)";
const DISCLAIMER: &str = "This document was generated electronically and is \
                          valid without a handwritten signature.";

// ─── Text metrics ────────────────────────────────────────────────────────────

/// Rough Helvetica advance: half an em per glyph. The layout contract is
/// visual structure, not pixel positions, so an estimate is enough for
/// centering.
fn approx_width_mm(text: &str, size_pt: f32) -> f32 {
  text.chars().count() as f32 * size_pt * 0.5 * PT_TO_MM
}

fn centered_x(text: &str, size_pt: f32) -> f32 {
  ((PAGE_W_MM - approx_width_mm(text, size_pt)) / 2.0).max(MARGIN_MM)
}

// ─── Page cursor ─────────────────────────────────────────────────────────────

/// Vertical write position on the current page, with overflow onto new pages.
struct PageCursor<'a> {
  doc:   &'a PdfDocumentReference,
  layer: PdfLayerReference,
  y:     f32,
  pages: usize,
}

impl<'a> PageCursor<'a> {
  fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
    self
      .layer
      .use_text(text, size, Mm(x), Mm(PAGE_H_MM - self.y), font);
  }

  fn advance(&mut self, dy: f32) {
    self.y += dy;
    if self.y > CONTENT_BOTTOM_MM {
      self.break_page();
    }
  }

  fn break_page(&mut self) {
    self.pages += 1;
    let (page, layer) = self.doc.add_page(
      Mm(PAGE_W_MM),
      Mm(PAGE_H_MM),
      format!("page {}", self.pages),
    );
    self.layer = self.doc.get_page(page).get_layer(layer);
    self.y = MARGIN_MM;
  }

  /// Push the cursor down to at least `min_y` on the current page.
  fn ensure_at_least(&mut self, min_y: f32) {
    if self.y < min_y {
      self.y = min_y;
    }
  }
}

// ─── Logo ────────────────────────────────────────────────────────────────────

fn decode_image_payload(uri: &str) -> Option<Vec<u8>> {
  let marker = ";base64,";
  let idx = uri.find(marker)?;
  B64.decode(&uri[idx + marker.len()..]).ok()
}

/// Draw the logo top-right, scaled so width stays within
/// [`LOGO_MAX_WIDTH_MM`] with aspect ratio preserved. Returns `None` when the
/// payload cannot be decoded or measured.
fn draw_logo(layer: &PdfLayerReference, uri: &str) -> Option<()> {
  use printpdf::image_crate::GenericImageView as _;

  let bytes = decode_image_payload(uri)?;
  let decoded = printpdf::image_crate::load_from_memory(&bytes).ok()?;
  let (w_px, h_px) = decoded.dimensions();
  if w_px == 0 || h_px == 0 {
    return None;
  }

  let natural_w_mm = w_px as f32 * 25.4 / LOGO_DPI;
  let natural_h_mm = h_px as f32 * 25.4 / LOGO_DPI;
  let scale = (LOGO_MAX_WIDTH_MM / natural_w_mm).min(1.0);

  let image = Image::from_dynamic_image(&decoded);
  image.add_to_layer(layer.clone(), ImageTransform {
    translate_x: Some(Mm(PAGE_W_MM - MARGIN_MM - natural_w_mm * scale)),
    translate_y: Some(Mm(PAGE_H_MM - MARGIN_MM - natural_h_mm * scale)),
    scale_x: Some(scale),
    scale_y: Some(scale),
    dpi: Some(LOGO_DPI),
    ..Default::default()
  });
  Some(())
}

// ─── Trailer ID ──────────────────────────────────────────────────────────────

/// printpdf writes a freshly randomised trailer `/ID[(...)(...)]` on every
/// save, even with a pinned document id. Rewrite both strings in place with
/// bytes cycled from `seed`. Replacements keep their exact length so xref
/// offsets stay valid.
fn pin_trailer_id(bytes: &mut [u8], seed: &str) {
  let Some(start) = bytes.windows(4).position(|w| w == b"/ID[") else {
    return;
  };
  let mut i = start + 4;
  for _ in 0..2 {
    if bytes.get(i) != Some(&b'(') {
      return;
    }
    let Some(len) = bytes[i + 1..].iter().position(|&b| b == b')') else {
      return;
    };
    let replacement: Vec<u8> = seed.bytes().cycle().take(len).collect();
    bytes[i + 1..i + 1 + len].copy_from_slice(&replacement);
    i += len + 2;
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Render the visit report for `visit`.
///
/// `documents` is the current document list, used to resolve acknowledged ids
/// to names at render time; an id with no match renders as "document
/// removed". `settings` being absent omits the branding header. All
/// non-determinism comes from `rendered_at`: PDF metadata dates and the
/// document id are derived from the inputs, so identical inputs with the same
/// render clock produce identical bytes.
pub fn render(
  visit: &VisitRecord,
  documents: &[Document],
  settings: Option<&CompanySettings>,
  rendered_at: DateTime<Tz>,
) -> Result<Vec<u8>> {
  let stamp = OffsetDateTime::from_unix_timestamp(rendered_at.timestamp())
    .map_err(|e| Error::Clock(e.to_string()))?;

  let (doc, page, layer) =
    PdfDocument::new(TITLE, Mm(PAGE_W_MM), Mm(PAGE_H_MM), "page 1");
  let doc = doc
    .with_conformance(PdfConformance::Custom(CustomPdfConformance {
      requires_icc_profile: false,
      requires_xmp_metadata: false,
      ..Default::default()
    }))
    .with_creation_date(stamp)
    .with_mod_date(stamp)
    .with_document_id(visit.record_id.simple().to_string());

  let font = doc
    .add_builtin_font(BuiltinFont::Helvetica)
    .map_err(|e| Error::Pdf(e.to_string()))?;
  let bold = doc
    .add_builtin_font(BuiltinFont::HelveticaBold)
    .map_err(|e| Error::Pdf(e.to_string()))?;

  let mut cursor = PageCursor {
    doc:   &doc,
    layer: doc.get_page(page).get_layer(layer),
    y:     MARGIN_MM,
    pages: 1,
  };

  // Branding header: address top-left, logo top-right.
  if let Some(settings) = settings {
    if !settings.address.is_empty() {
      for line in settings.address.lines() {
        cursor.text(line, 9.0, MARGIN_MM, &font);
        cursor.y += ADDRESS_LINE_MM;
      }
    }
    if let Some(logo) = settings.logo.as_deref()
      && draw_logo(&cursor.layer, logo).is_none()
    {
      tracing::warn!("logo could not be decoded, rendering report without it");
    }
  }

  // Title and render timestamp.
  cursor.ensure_at_least(50.0);
  cursor.text(TITLE, 16.0, centered_x(TITLE, 16.0), &bold);
  cursor.advance(8.0);
  let generated = format!(
    "Generated at {} ({})",
    rendered_at.format("%Y-%m-%d %H:%M"),
    rendered_at.timezone().name(),
  );
  cursor.text(&generated, 10.0, centered_x(&generated, 10.0), &font);
  cursor.advance(14.0);

  // Visitor information, fixed line order.
  cursor.text("Visitor Information", 12.0, MARGIN_MM, &bold);
  cursor.advance(7.0);
  let info_lines = [
    format!("Name: {}", visit.full_name()),
    format!("Company: {}", visit.company),
    format!("Visit reason: {}", visit.visit_reason),
    format!("Visit date: {}", visit.visit_date.format("%Y-%m-%d")),
    format!("Visit time: {}", visit.visit_time.as_deref().unwrap_or("-")),
  ];
  for line in &info_lines {
    cursor.text(line, 11.0, MARGIN_MM, &font);
    cursor.advance(LINE_HEIGHT_MM);
  }
  cursor.advance(6.0);

  // Acknowledged documents, resolved against the current document list.
  cursor.text("Acknowledged Documents", 12.0, MARGIN_MM, &bold);
  cursor.advance(7.0);
  cursor.text(AFFIRMATION, 10.0, MARGIN_MM, &font);
  cursor.advance(8.0);

  // Shown both when nothing was on offer and when the visitor acknowledged
  // none; stale ids against an empty current list fall under the former.
  if visit.accepted_documents.is_empty() || documents.is_empty() {
    cursor.text(NO_DOCUMENTS, 11.0, MARGIN_MM, &font);
    cursor.advance(LINE_HEIGHT_MM);
  } else {
    for (index, id) in visit.accepted_documents.iter().enumerate() {
      let name = documents
        .iter()
        .find(|d| d.document_id == *id)
        .map(|d| d.name.as_str())
        .unwrap_or(REMOVED_DOCUMENT);
      let entry = format!("{}. {}", index + 1, name);
      cursor.text(&entry, 11.0, MARGIN_MM + 4.0, &font);
      cursor.advance(LINE_HEIGHT_MM);
    }
  }

  // Signature line, never higher than the fixed minimum offset.
  cursor.ensure_at_least(SIGNATURE_MIN_Y_MM);
  cursor.text("Signature:", 11.0, MARGIN_MM, &font);
  let underline_y = PAGE_H_MM - (cursor.y + 1.5);
  cursor.layer.set_outline_thickness(0.5);
  cursor.layer.add_line(Line {
    points:    vec![
      (Point::new(Mm(MARGIN_MM + 25.0), Mm(underline_y)), false),
      (Point::new(Mm(MARGIN_MM + 95.0), Mm(underline_y)), false),
    ],
    is_closed: false,
  });

  // Footer: the original submission instant, not the render clock.
  let record_tz: Tz = visit.timezone.parse().unwrap_or(chrono_tz::UTC);
  let submitted = format!(
    "Submitted: {} ({})",
    visit.submitted_at.with_timezone(&record_tz).format("%Y-%m-%d %H:%M:%S"),
    visit.timezone,
  );
  cursor.y = FOOTER_Y_MM;
  cursor.text(&submitted, 8.0, MARGIN_MM, &font);
  cursor.y += 4.0;
  cursor.text(DISCLAIMER, 8.0, MARGIN_MM, &font);

  let mut bytes = doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))?;
  pin_trailer_id(&mut bytes, &visit.record_id.simple().to_string());
  Ok(bytes)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, TimeZone as _, Utc};
  use chrono_tz::Europe::Berlin;
  use frontdesk_core::settings::CompanySettings;
  use uuid::Uuid;

  use super::*;

  // 1x1 transparent PNG.
  const TINY_PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJ\
                              AAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

  fn clock() -> DateTime<Tz> {
    Berlin.with_ymd_and_hms(2026, 5, 20, 10, 0, 0).unwrap()
  }

  fn visit(accepted: Vec<Uuid>) -> VisitRecord {
    VisitRecord {
      record_id:          Uuid::from_u128(7),
      first_name:         "Ada".to_string(),
      last_name:          "Lovelace".to_string(),
      company:            "Analytical Engines Ltd".to_string(),
      visit_reason:       "audit".to_string(),
      visit_date:         NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
      visit_time:         Some("09:30".to_string()),
      accepted_documents: accepted,
      accepted_rules:     true,
      submitted_at:       Utc.with_ymd_and_hms(2026, 5, 20, 7, 55, 0).unwrap(),
      timezone:           "Europe/Berlin".to_string(),
      report_pdf:         None,
    }
  }

  fn document(id: Uuid, name: &str) -> Document {
    Document {
      document_id: id,
      name:        name.to_string(),
      description: None,
      content:     "data:application/pdf;base64,AAAA".to_string(),
      created_at:  Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
  }

  fn settings(logo: Option<String>) -> CompanySettings {
    CompanySettings {
      address:    "Acme GmbH\nHauptstr. 5\n10115 Berlin".to_string(),
      logo,
      updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
  }

  #[test]
  fn output_is_a_pdf() {
    let bytes = render(&visit(vec![]), &[], None, clock()).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "missing PDF magic");
    assert!(bytes.len() > 500);
  }

  #[test]
  fn identical_inputs_and_clock_produce_identical_bytes() {
    let id = Uuid::from_u128(11);
    let docs = vec![document(id, "Safety Policy")];
    let visit = visit(vec![id]);
    let branding = settings(Some(format!("data:image/png;base64,{TINY_PNG_B64}")));

    let first = render(&visit, &docs, Some(&branding), clock()).unwrap();
    let second = render(&visit, &docs, Some(&branding), clock()).unwrap();
    assert_eq!(first, second, "render is not deterministic");
  }

  #[test]
  fn different_visitors_produce_different_bytes() {
    let a = render(&visit(vec![]), &[], None, clock()).unwrap();
    let mut other = visit(vec![]);
    other.first_name = "Grace".to_string();
    other.last_name = "Hopper".to_string();
    let b = render(&other, &[], None, clock()).unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn renders_without_settings() {
    assert!(render(&visit(vec![]), &[], None, clock()).is_ok());
  }

  #[test]
  fn malformed_logo_is_skipped_not_fatal() {
    let branding = settings(Some("data:image/png;base64,@@not-base64@@".to_string()));
    let bytes = render(&visit(vec![]), &[], Some(&branding), clock()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
  }

  #[test]
  fn valid_logo_renders() {
    let branding = settings(Some(format!("data:image/png;base64,{TINY_PNG_B64}")));
    assert!(render(&visit(vec![]), &[], Some(&branding), clock()).is_ok());
  }

  #[test]
  fn acknowledged_id_without_matching_document_is_tolerated() {
    let gone = Uuid::from_u128(99);
    let bytes = render(&visit(vec![gone]), &[], None, clock()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
  }

  #[test]
  fn stale_acknowledgements_against_empty_list_render_as_no_documents() {
    // With no documents on offer the acknowledgement section must read the
    // same whether stale ids are present or not.
    let gone = Uuid::from_u128(99);
    let with_stale = render(&visit(vec![gone]), &[], None, clock()).unwrap();
    let without = render(&visit(vec![]), &[], None, clock()).unwrap();
    assert_eq!(with_stale, without);
  }

  #[test]
  fn trailer_id_rewrite_is_stable_and_length_preserving() {
    let mut bytes = b"xref trailer<</ID[(ABCD1234)(EFGH5678)]>>".to_vec();
    let original_len = bytes.len();
    super::pin_trailer_id(&mut bytes, "0f");
    assert_eq!(bytes.len(), original_len);
    let s = String::from_utf8(bytes).unwrap();
    assert!(s.contains("/ID[(0f0f0f0f)(0f0f0f0f)]"), "{s}");
  }

  #[test]
  fn long_document_list_overflows_onto_more_pages() {
    let docs: Vec<Document> = (0..80)
      .map(|i| document(Uuid::from_u128(i + 1), &format!("Policy {i}")))
      .collect();
    let ids: Vec<Uuid> = docs.iter().map(|d| d.document_id).collect();

    let short = render(&visit(vec![ids[0]]), &docs, None, clock()).unwrap();
    let long = render(&visit(ids), &docs, None, clock()).unwrap();
    assert!(long.len() > short.len());
  }
}
