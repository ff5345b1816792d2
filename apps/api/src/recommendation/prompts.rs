// Prompt templates for the recommendation and species-prediction calls.
// The numbered asks fix the section order the parser assigns by position.

/// Care recommendation prompt. Replace `{species}`, `{location}`, `{light}`,
/// `{temperature}` before sending.
pub const CARE_PROMPT_TEMPLATE: &str = "Saya memiliki tanaman {species} di {location} dengan kondisi cahaya {light} dan suhu {temperature}°C. Berikan rekomendasi perawatan yang rinci, termasuk: 
1. Jadwal penyiraman dan cara menjaga kelembapan tanah.
2. Frekuensi pemupukan, jenis pupuk yang disarankan, dan rincian unsur hara yang dibutuhkan (seperti nitrogen, fosfor, kalium, dan unsur mikro).
3. Cara menjaga kelembapan udara.";

/// Species prediction prompt. Replace `{name}` before sending.
pub const SPECIES_PROMPT_TEMPLATE: &str = "Berdasarkan nama tanaman \"{name}\", prediksi spesies tanaman yang paling mungkin. Berikan hanya nama spesies (contoh: Monstera deliciosa) tanpa penjelasan tambahan.";

pub fn build_care_prompt(species: &str, location: &str, light: &str, temperature: f64) -> String {
    CARE_PROMPT_TEMPLATE
        .replace("{species}", species)
        .replace("{location}", location)
        .replace("{light}", light)
        .replace("{temperature}", &temperature.to_string())
}

pub fn build_species_prompt(name: &str) -> String {
    SPECIES_PROMPT_TEMPLATE.replace("{name}", name)
}
