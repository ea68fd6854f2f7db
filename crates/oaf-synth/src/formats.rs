//! Recognized string formats and field-name hints.

use std::net::{Ipv4Addr, Ipv6Addr};

use oaf_core::Locale;
use rand::Rng;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::locale::{self, data, pick};

/// 2020-01-01T00:00:00Z .. 2030-01-01T00:00:00Z
const TIMESTAMP_RANGE: std::ops::Range<i64> = 1_577_836_800..1_893_456_000;

/// A `format` value the synthesizer knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    Email,
    Uri,
    Uuid,
    Date,
    DateTime,
    Time,
    Ipv4,
    Ipv6,
    Hostname,
    Phone,
}

impl StringFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format.to_ascii_lowercase().as_str() {
            "email" | "idn-email" => Some(Self::Email),
            "uri" | "url" | "uri-reference" | "iri" => Some(Self::Uri),
            "uuid" => Some(Self::Uuid),
            "date" => Some(Self::Date),
            "date-time" | "datetime" => Some(Self::DateTime),
            "time" => Some(Self::Time),
            "ipv4" => Some(Self::Ipv4),
            "ipv6" => Some(Self::Ipv6),
            "hostname" | "idn-hostname" => Some(Self::Hostname),
            "phone" | "tel" => Some(Self::Phone),
            _ => None,
        }
    }

    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R, locale: Locale) -> String {
        match self {
            Self::Email => locale::email(rng, locale),
            Self::Uri => format!(
                "https://{}/{}/{}",
                pick(rng, data(locale).domains),
                pick(rng, data(Locale::En).words),
                rng.gen_range(1..1000)
            ),
            Self::Uuid => uuid::Builder::from_random_bytes(rng.r#gen())
                .into_uuid()
                .to_string(),
            Self::Date => random_timestamp(rng)
                .format(format_description!("[year]-[month]-[day]"))
                .unwrap_or_else(|_| "2024-01-01".to_string()),
            Self::DateTime => random_timestamp(rng)
                .format(&Rfc3339)
                .unwrap_or_else(|_| "2024-01-01T00:00:00Z".to_string()),
            Self::Time => random_timestamp(rng)
                .format(format_description!("[hour]:[minute]:[second]"))
                .unwrap_or_else(|_| "12:00:00".to_string()),
            Self::Ipv4 => Ipv4Addr::new(
                rng.gen_range(1..224),
                rng.r#gen(),
                rng.r#gen(),
                rng.gen_range(1..255),
            )
            .to_string(),
            Self::Ipv6 => Ipv6Addr::new(
                0x2001,
                0x0db8,
                rng.r#gen(),
                rng.r#gen(),
                rng.r#gen(),
                rng.r#gen(),
                rng.r#gen(),
                rng.gen_range(1..=u16::MAX),
            )
            .to_string(),
            Self::Hostname => format!(
                "{}.{}",
                pick(rng, data(Locale::En).words),
                pick(rng, data(locale).domains)
            ),
            Self::Phone => locale::phone(rng, locale),
        }
    }

    /// A fixed value that fails this format.
    pub fn malformed(self) -> &'static str {
        match self {
            Self::Email => "not-an-email",
            Self::Uri => "not a uri",
            Self::Uuid => "not-a-uuid",
            Self::Date => "2024-13-45",
            Self::DateTime => "not-a-date-time",
            Self::Time => "25:61:61",
            Self::Ipv4 => "999.999.999.999",
            Self::Ipv6 => "not:an:ipv6",
            Self::Hostname => "-invalid_host-",
            Self::Phone => "not-a-phone",
        }
    }
}

/// Semantic hint inferred from a property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHint {
    Username,
    Password,
    Email,
    Name,
    Title,
    Description,
    Address,
    Phone,
}

impl FieldHint {
    /// More specific hints are checked first so `username` is not read as `name`.
    pub fn detect(field_name: &str) -> Option<Self> {
        let lower = field_name.to_ascii_lowercase();
        let has = |needle: &str| lower.contains(needle);

        if has("username") || has("user_name") || lower == "login" {
            Some(Self::Username)
        } else if has("password") || has("passwd") {
            Some(Self::Password)
        } else if has("email") || has("mail") {
            Some(Self::Email)
        } else if has("phone") || has("mobile") || lower == "tel" {
            Some(Self::Phone)
        } else if has("address") {
            Some(Self::Address)
        } else if has("title") {
            Some(Self::Title)
        } else if has("description") || lower == "desc" {
            Some(Self::Description)
        } else if has("name") {
            Some(Self::Name)
        } else {
            None
        }
    }

    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R, locale: Locale) -> String {
        match self {
            Self::Username => locale::username(rng, locale),
            Self::Password => format!("Passw0rd!{:02}", rng.gen_range(0..100)),
            Self::Email => locale::email(rng, locale),
            Self::Name => locale::full_name(rng, locale),
            Self::Title => pick(rng, data(locale).titles).to_string(),
            Self::Description => pick(rng, data(locale).descriptions).to_string(),
            Self::Address => locale::address(rng, locale),
            Self::Phone => locale::phone(rng, locale),
        }
    }
}

fn random_timestamp<R: Rng + ?Sized>(rng: &mut R) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(rng.gen_range(TIMESTAMP_RANGE))
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
