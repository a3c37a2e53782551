use serde_json::json;
use std::fs;
use std::path::Path;

/// Writes a small data directory: four Arabic verses, full English coverage,
/// partial Pashto coverage and no Dari file.
pub fn write_fixture(dir: &Path) {
    let base = json!({
        "quran-uthmani-hafs": {
            "1": {"id": 1, "surah": 1, "ayah": 1, "verse": "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ"},
            "2": {"id": 2, "surah": 1, "ayah": 2, "verse": "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ"},
            "3": {"id": 3, "surah": 1, "ayah": 3, "verse": "ٱلرَّحْمَٰنِ ٱلرَّحِيمِ"},
            "10": {"id": 10, "surah": 2, "ayah": 3, "verse": "ٱلَّذِينَ يُؤْمِنُونَ بِٱلْغَيْبِ"}
        }
    });
    let en = json!({
        "1": {"translation": "In the name of Allah, the Entirely Merciful, the Especially Merciful."},
        "2": {"translation": "All praise is due to Allah, Lord of the worlds."},
        "3": {"translation": "The Entirely Merciful, the Especially Merciful."},
        "10": {"translation": "Who believe in the unseen, establish prayer."}
    });
    let ps = json!({
        "1": {"translation": "د الله په نوم چې ډېر مهربان او لوی رحم کوونکی دی"},
        "2": {"translation": "ټول ستاینې الله لره دي چې د ټولو عالمونو رب دی"}
    });

    fs::write(dir.join("ArabicQuran.json"), base.to_string()).unwrap();
    fs::write(dir.join("EnglishQuran.json"), en.to_string()).unwrap();
    fs::write(dir.join("PashtoQuran.json"), ps.to_string()).unwrap();
}
