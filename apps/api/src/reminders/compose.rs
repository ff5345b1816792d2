//! Reminder message composition. Pure: the same plant and recommendation
//! always produce the same subject and body.

use crate::recommendation::render::{escape_html, EmailHtmlRenderer, Renderer};
use crate::recommendation::ParsedRecommendation;

pub const SUBJECT_PREFIX: &str = "Pengingat Perawatan Tanaman: ";

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub subject: String,
    pub html: String,
}

/// Wraps the rendered recommendation in the reminder layout (header, greeting,
/// guide, footer).
pub fn compose_reminder(
    plant_name: &str,
    parsed: &ParsedRecommendation,
    renderer: &EmailHtmlRenderer,
) -> ReminderEmail {
    let name = escape_html(plant_name);
    let guide = renderer.render(parsed);

    let html = format!(
        concat!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #E0E0E0; border-radius: 8px;">"#,
            r#"<h2 style="color: #1B5E20; text-align: center; font-size: 24px;">PENGINGAT PERAWATAN TANAMAN</h2>"#,
            r#"<p style="color: #333333; text-align: center; font-size: 16px;">Halo, berikut adalah rekomendasi perawatan untuk tanaman <strong>{name}</strong> Anda:</p>"#,
            "{guide}",
            r#"<p style="color: #333333; text-align: center; margin-top: 30px; font-size: 14px;">Terima kasih telah menggunakan Platform Plant Planner 🌱</p>"#,
            "</div>"
        ),
        name = name,
        guide = guide,
    );

    ReminderEmail {
        subject: format!("{SUBJECT_PREFIX}{plant_name}"),
        html,
    }
}
