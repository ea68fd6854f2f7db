//! Locale vocabularies for human-facing synthesized values.

use oaf_core::Locale;
use rand::Rng;
use rand::seq::SliceRandom;

/// Word lists backing one locale.
pub struct LocaleData {
    pub given_names: &'static [&'static str],
    pub family_names: &'static [&'static str],
    /// ASCII handles used for usernames, emails and URLs.
    pub handles: &'static [&'static str],
    pub words: &'static [&'static str],
    pub titles: &'static [&'static str],
    pub descriptions: &'static [&'static str],
    pub streets: &'static [&'static str],
    pub cities: &'static [&'static str],
    pub domains: &'static [&'static str],
}

static EN: LocaleData = LocaleData {
    given_names: &["Alice", "Bob", "Carol", "David", "Emma", "Frank", "Grace", "Henry"],
    family_names: &["Smith", "Johnson", "Lee", "Brown", "Garcia", "Miller", "Wilson", "Taylor"],
    handles: &["alice", "bob", "carol", "david", "emma", "frank", "grace", "henry"],
    words: &["alpha", "bravo", "sample", "record", "widget", "orbit", "maple", "river"],
    titles: &["Quarterly report", "Release notes", "Weekly summary", "Project kickoff"],
    descriptions: &[
        "A short description used for automated testing.",
        "Sample content generated from the API schema.",
        "Placeholder text describing this resource.",
    ],
    streets: &["Main Street", "Oak Avenue", "Pine Road", "Maple Lane"],
    cities: &["Springfield", "Riverside", "Franklin", "Greenville"],
    domains: &["example.com", "example.org", "example.net"],
};

static ZH_TW: LocaleData = LocaleData {
    given_names: &["志明", "春嬌", "怡君", "家豪", "淑芬", "建宏", "雅婷", "冠宇"],
    family_names: &["陳", "林", "黃", "張", "李", "王", "吳", "劉"],
    handles: &["chihming", "chunchiao", "yichun", "chiahao", "shufen", "chienhung", "yating", "kuanyu"],
    words: &["測試", "範例", "資料", "項目", "紀錄", "內容", "樣本", "數值"],
    titles: &["季度報告", "版本說明", "每週摘要", "專案啟動會議"],
    descriptions: &[
        "這是一段自動化測試用的描述。",
        "依據 API 結構產生的範例內容。",
        "描述此資源的預留文字。",
    ],
    streets: &["中正路", "民生東路", "忠孝西路", "仁愛路"],
    cities: &["臺北市", "新北市", "臺中市", "高雄市"],
    domains: &["example.com.tw", "example.tw", "example.com"],
};

pub fn data(locale: Locale) -> &'static LocaleData {
    match locale {
        Locale::En => &EN,
        Locale::ZhTw => &ZH_TW,
    }
}

pub fn pick<R: Rng + ?Sized>(rng: &mut R, table: &'static [&'static str]) -> &'static str {
    table.choose(rng).copied().unwrap_or("sample")
}

pub fn full_name<R: Rng + ?Sized>(rng: &mut R, locale: Locale) -> String {
    let d = data(locale);
    let given = pick(rng, d.given_names);
    let family = pick(rng, d.family_names);
    match locale {
        Locale::En => format!("{given} {family}"),
        Locale::ZhTw => format!("{family}{given}"),
    }
}

pub fn username<R: Rng + ?Sized>(rng: &mut R, locale: Locale) -> String {
    format!("{}{:02}", pick(rng, data(locale).handles), rng.gen_range(0..100))
}

pub fn email<R: Rng + ?Sized>(rng: &mut R, locale: Locale) -> String {
    let local = username(rng, locale);
    format!("{local}@{}", pick(rng, data(locale).domains))
}

pub fn address<R: Rng + ?Sized>(rng: &mut R, locale: Locale) -> String {
    let d = data(locale);
    let number = rng.gen_range(1..300);
    let street = pick(rng, d.streets);
    let city = pick(rng, d.cities);
    match locale {
        Locale::En => format!("{number} {street}, {city}"),
        Locale::ZhTw => format!("{city}{street}{number}號"),
    }
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R, locale: Locale) -> String {
    match locale {
        Locale::En => format!(
            "+1-{}-{}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(200..1000),
            rng.gen_range(0..10000)
        ),
        Locale::ZhTw => format!(
            "09{:02}-{:03}-{:03}",
            rng.gen_range(0..100),
            rng.gen_range(0..1000),
            rng.gen_range(0..1000)
        ),
    }
}
