use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of chapters in the recitation ring.
pub const CHAPTER_COUNT: u16 = 114;

/// Identifier of a chapter, 1..=114.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ChapterId(u16);

impl ChapterId {
    pub const FIRST: ChapterId = ChapterId(1);
    pub const LAST: ChapterId = ChapterId(CHAPTER_COUNT);

    /// Returns `None` outside 1..=114.
    pub fn new(raw: u16) -> Option<Self> {
        (1..=CHAPTER_COUNT).contains(&raw).then_some(Self(raw))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Following chapter; 114 wraps to 1.
    pub fn next(self) -> Self {
        if self.0 >= CHAPTER_COUNT {
            Self::FIRST
        } else {
            Self(self.0 + 1)
        }
    }

    /// Preceding chapter; 1 wraps to 114.
    pub fn previous(self) -> Self {
        if self.0 <= 1 {
            Self::LAST
        } else {
            Self(self.0 - 1)
        }
    }
}

impl TryFrom<u16> for ChapterId {
    type Error = String;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("chapter id {raw} out of range"))
    }
}

impl From<ChapterId> for u16 {
    fn from(id: ChapterId) -> u16 {
        id.0
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Place of revelation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Meccan,
    Medinan,
}

impl Classification {
    /// Arabic display label.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Meccan => "مكية",
            Classification::Medinan => "مدنية",
        }
    }
}

/// One immutable catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub id: ChapterId,
    pub name: &'static str,
    pub english_name: &'static str,
    pub classification: Classification,
    pub verses: u16,
    pub audio_url: String,
}

/// Read-only list of all chapters, ordered by id.
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<Chapter>,
}

impl Catalog {
    /// Build the catalog, pointing each chapter at `{base}/{id:03}.mp3`.
    pub fn new(audio_base_url: &str) -> Self {
        let base = audio_base_url.trim_end_matches('/');
        let chapters = CHAPTERS
            .iter()
            .zip(1..=CHAPTER_COUNT)
            .map(|(&(name, english_name, classification, verses), raw)| Chapter {
                id: ChapterId(raw),
                name,
                english_name,
                classification,
                verses,
                audio_url: format!("{base}/{raw:03}.mp3"),
            })
            .collect();
        Self { chapters }
    }

    pub fn get(&self, id: ChapterId) -> Option<&Chapter> {
        self.chapters.get(usize::from(id.get()) - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }
}

use Classification::{Meccan, Medinan};

const CHAPTERS: [(&str, &str, Classification, u16); CHAPTER_COUNT as usize] = [
    ("الفاتحة", "Al-Fatihah", Meccan, 7),
    ("البقرة", "Al-Baqarah", Medinan, 286),
    ("آل عمران", "Aal-E-Imran", Medinan, 200),
    ("النساء", "An-Nisa", Medinan, 176),
    ("المائدة", "Al-Ma'idah", Medinan, 120),
    ("الأنعام", "Al-An'am", Meccan, 165),
    ("الأعراف", "Al-A'raf", Meccan, 206),
    ("الأنفال", "Al-Anfal", Medinan, 75),
    ("التوبة", "At-Tawbah", Medinan, 129),
    ("يونس", "Yunus", Meccan, 109),
    ("هود", "Hud", Meccan, 123),
    ("يوسف", "Yusuf", Meccan, 111),
    ("الرعد", "Ar-Ra'd", Medinan, 43),
    ("إبراهيم", "Ibrahim", Meccan, 52),
    ("الحجر", "Al-Hijr", Meccan, 99),
    ("النحل", "An-Nahl", Meccan, 128),
    ("الإسراء", "Al-Isra", Meccan, 111),
    ("الكهف", "Al-Kahf", Meccan, 110),
    ("مريم", "Maryam", Meccan, 98),
    ("طه", "Taha", Meccan, 135),
    ("الأنبياء", "Al-Anbiya", Meccan, 112),
    ("الحج", "Al-Hajj", Medinan, 78),
    ("المؤمنون", "Al-Mu'minun", Meccan, 118),
    ("النور", "An-Nur", Medinan, 64),
    ("الفرقان", "Al-Furqan", Meccan, 77),
    ("الشعراء", "Ash-Shu'ara", Meccan, 227),
    ("النمل", "An-Naml", Meccan, 93),
    ("القصص", "Al-Qasas", Meccan, 88),
    ("العنكبوت", "Al-Ankabut", Meccan, 69),
    ("الروم", "Ar-Rum", Meccan, 60),
    ("لقمان", "Luqman", Meccan, 34),
    ("السجدة", "As-Sajdah", Meccan, 30),
    ("الأحزاب", "Al-Ahzab", Medinan, 73),
    ("سبأ", "Saba", Meccan, 54),
    ("فاطر", "Fatir", Meccan, 45),
    ("يس", "Ya-Sin", Meccan, 83),
    ("الصافات", "As-Saffat", Meccan, 182),
    ("ص", "Sad", Meccan, 88),
    ("الزمر", "Az-Zumar", Meccan, 75),
    ("غافر", "Ghafir", Meccan, 85),
    ("فصلت", "Fussilat", Meccan, 54),
    ("الشورى", "Ash-Shura", Meccan, 53),
    ("الزخرف", "Az-Zukhruf", Meccan, 89),
    ("الدخان", "Ad-Dukhan", Meccan, 59),
    ("الجاثية", "Al-Jathiyah", Meccan, 37),
    ("الأحقاف", "Al-Ahqaf", Meccan, 35),
    ("محمد", "Muhammad", Medinan, 38),
    ("الفتح", "Al-Fath", Medinan, 29),
    ("الحجرات", "Al-Hujurat", Medinan, 18),
    ("ق", "Qaf", Meccan, 45),
    ("الذاريات", "Adh-Dhariyat", Meccan, 60),
    ("الطور", "At-Tur", Meccan, 49),
    ("النجم", "An-Najm", Meccan, 62),
    ("القمر", "Al-Qamar", Meccan, 55),
    ("الرحمن", "Ar-Rahman", Medinan, 78),
    ("الواقعة", "Al-Waqi'ah", Meccan, 96),
    ("الحديد", "Al-Hadid", Medinan, 29),
    ("المجادلة", "Al-Mujadila", Medinan, 22),
    ("الحشر", "Al-Hashr", Medinan, 24),
    ("الممتحنة", "Al-Mumtahanah", Medinan, 13),
    ("الصف", "As-Saff", Medinan, 14),
    ("الجمعة", "Al-Jumu'ah", Medinan, 11),
    ("المنافقون", "Al-Munafiqun", Medinan, 11),
    ("التغابن", "At-Taghabun", Medinan, 18),
    ("الطلاق", "At-Talaq", Medinan, 12),
    ("التحريم", "At-Tahrim", Medinan, 12),
    ("الملك", "Al-Mulk", Meccan, 30),
    ("القلم", "Al-Qalam", Meccan, 52),
    ("الحاقة", "Al-Haqqah", Meccan, 52),
    ("المعارج", "Al-Ma'arij", Meccan, 44),
    ("نوح", "Nuh", Meccan, 28),
    ("الجن", "Al-Jinn", Meccan, 28),
    ("المزمل", "Al-Muzzammil", Meccan, 20),
    ("المدثر", "Al-Muddaththir", Meccan, 56),
    ("القيامة", "Al-Qiyamah", Meccan, 40),
    ("الإنسان", "Al-Insan", Medinan, 31),
    ("المرسلات", "Al-Mursalat", Meccan, 50),
    ("النبأ", "An-Naba", Meccan, 40),
    ("النازعات", "An-Nazi'at", Meccan, 46),
    ("عبس", "Abasa", Meccan, 42),
    ("التكوير", "At-Takwir", Meccan, 29),
    ("الانفطار", "Al-Infitar", Meccan, 19),
    ("المطففين", "Al-Mutaffifin", Meccan, 36),
    ("الانشقاق", "Al-Inshiqaq", Meccan, 25),
    ("البروج", "Al-Buruj", Meccan, 22),
    ("الطارق", "At-Tariq", Meccan, 17),
    ("الأعلى", "Al-A'la", Meccan, 19),
    ("الغاشية", "Al-Ghashiyah", Meccan, 26),
    ("الفجر", "Al-Fajr", Meccan, 30),
    ("البلد", "Al-Balad", Meccan, 20),
    ("الشمس", "Ash-Shams", Meccan, 15),
    ("الليل", "Al-Layl", Meccan, 21),
    ("الضحى", "Ad-Duha", Meccan, 11),
    ("الشرح", "Ash-Sharh", Meccan, 8),
    ("التين", "At-Tin", Meccan, 8),
    ("العلق", "Al-Alaq", Meccan, 19),
    ("القدر", "Al-Qadr", Meccan, 5),
    ("البينة", "Al-Bayyinah", Medinan, 8),
    ("الزلزلة", "Az-Zalzalah", Medinan, 8),
    ("العاديات", "Al-Adiyat", Meccan, 11),
    ("القارعة", "Al-Qari'ah", Meccan, 11),
    ("التكاثر", "At-Takathur", Meccan, 8),
    ("العصر", "Al-Asr", Meccan, 3),
    ("الهمزة", "Al-Humazah", Meccan, 9),
    ("الفيل", "Al-Fil", Meccan, 5),
    ("قريش", "Quraysh", Meccan, 4),
    ("الماعون", "Al-Ma'un", Meccan, 7),
    ("الكوثر", "Al-Kawthar", Meccan, 3),
    ("الكافرون", "Al-Kafirun", Meccan, 6),
    ("النصر", "An-Nasr", Medinan, 3),
    ("المسد", "Al-Masad", Meccan, 5),
    ("الإخلاص", "Al-Ikhlas", Meccan, 4),
    ("الفلق", "Al-Falaq", Meccan, 5),
    ("الناس", "An-Nas", Meccan, 6),
];
