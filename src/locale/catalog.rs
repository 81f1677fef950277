//! Message catalog with per-locale tables and fallback.
//!
//! Lookup walks a fallback chain until a table defines the key:
//! 1. The exact locale (`es-us`)
//! 2. Its language (`es`)
//! 3. The catalog's default locale
//!
//! Messages may contain `{name}` placeholders, filled from the caller's
//! arguments. Unknown placeholders are left as written.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, SkillError};

use super::strings;

/// Normalized locale tag: lowercase, `_` replaced by `-`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a platform tag such as `en-US`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().replace('_', "-").to_lowercase())
    }

    /// The normalized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The language part (`es` for `es-us`), if the tag has a region.
    #[must_use]
    pub fn language(&self) -> Option<Locale> {
        self.0
            .split_once('-')
            .map(|(lang, _)| Locale(lang.to_string()))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keys for every message the skill speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    /// Rules and the engine's first number.
    Launch,
    /// Nudge after the launch message.
    LaunchReprompt,
    /// Game over. Takes `{answer}`.
    WrongAnswer,
    Help,
    Stop,
    Fallback,
    Error,
    /// Debug echo of an unhandled intent. Takes `{intent}`.
    Reflector,
}

impl MessageKey {
    /// All keys, in declaration order.
    pub const ALL: [MessageKey; 8] = [
        MessageKey::Launch,
        MessageKey::LaunchReprompt,
        MessageKey::WrongAnswer,
        MessageKey::Help,
        MessageKey::Stop,
        MessageKey::Fallback,
        MessageKey::Error,
        MessageKey::Reflector,
    ];
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Strings for one locale.
pub type MessageTable = FxHashMap<MessageKey, String>;

/// Per-locale message tables.
///
/// ## Example
///
/// ```
/// use fizzbuzz_skill::locale::{Locale, MessageCatalog, MessageKey};
///
/// let catalog = MessageCatalog::builtin();
/// let text = catalog
///     .resolve(&Locale::new("en-GB"), MessageKey::WrongAnswer, &[("answer", "fizz")])
///     .unwrap();
/// assert!(text.contains("fizz"));
/// ```
#[derive(Clone, Debug)]
pub struct MessageCatalog {
    tables: FxHashMap<Locale, MessageTable>,
    default_locale: Locale,
}

impl MessageCatalog {
    /// Create an empty catalog falling back to `default_locale`.
    #[must_use]
    pub fn new(default_locale: Locale) -> Self {
        Self {
            tables: FxHashMap::default(),
            default_locale,
        }
    }

    /// The built-in `en` and `es-us` tables, defaulting to `en`.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new(Locale::new("en"));
        catalog.insert_table(Locale::new("en"), strings::english());
        catalog.insert_table(Locale::new("es-us"), strings::spanish_us());
        catalog
    }

    /// Change the fallback locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// The fallback locale.
    #[must_use]
    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Add or replace a locale's table.
    pub fn insert_table<I, S>(&mut self, locale: Locale, messages: I)
    where
        I: IntoIterator<Item = (MessageKey, S)>,
        S: Into<String>,
    {
        let table = self.tables.entry(locale).or_default();
        for (key, text) in messages {
            table.insert(key, text.into());
        }
    }

    /// Locales to try, in order, for `locale`. No duplicates.
    #[must_use]
    pub fn fallback_chain(&self, locale: &Locale) -> SmallVec<[Locale; 3]> {
        let mut chain: SmallVec<[Locale; 3]> = SmallVec::new();
        let candidates = [
            Some(locale.clone()),
            locale.language(),
            Some(self.default_locale.clone()),
        ];

        for candidate in candidates.into_iter().flatten() {
            if !chain.contains(&candidate) {
                chain.push(candidate);
            }
        }
        chain
    }

    /// Look up the raw message for `key`, walking the fallback chain.
    #[must_use]
    pub fn get(&self, locale: &Locale, key: MessageKey) -> Option<&str> {
        self.fallback_chain(locale)
            .iter()
            .find_map(|l| self.tables.get(l).and_then(|t| t.get(&key)))
            .map(String::as_str)
    }

    /// Look up `key` and fill in `{name}` placeholders from `args`.
    pub fn resolve(
        &self,
        locale: &Locale,
        key: MessageKey,
        args: &[(&str, &str)],
    ) -> Result<String> {
        let template = self.get(locale, key).ok_or_else(|| SkillError::MissingMessage {
            key: key.to_string(),
            locale: locale.to_string(),
        })?;
        Ok(interpolate(template, args))
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replace `{name}` with the matching argument value.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match args.iter().find(|(k, _)| *k == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
