//! Spam scoring for review text.
//!
//! Text is scored against a fixed, ordered list of categories. Each match
//! adds the category weight; a few whole-text penalties follow. Category
//! order is part of the contract: it fixes the order of `reasons`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::sanitizer::sanitize;
use crate::domain::review::moderation::{CategoryMatches, ModerationResult, ModerationThresholds};

const COMMON_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "info", "biz", "io", "co", "us", "uk", "ca", "au",
    "de", "fr", "jp", "cn", "ru", "br", "in", "mx", "es", "it", "nl", "se", "no", "fi", "dk", "pl",
    "cz", "hu", "ro", "bg", "gr", "pt", "ie", "at", "ch", "be", "lu",
];

const UNCOMMON_SUFFIXES: &[&str] = &[
    "xyz", "fit", "top", "site", "online", "tech", "store", "shop", "app", "dev", "web", "cloud",
    "space", "website", "club", "fun", "game", "live", "stream", "video", "photo", "pic", "img",
    "art", "design", "studio", "agency", "company", "business", "services", "solutions",
    "systems", "network", "software", "mobile", "phone", "tablet", "computer", "laptop",
    "desktop", "server", "host", "domain", "page", "blog", "news", "media", "content", "social",
    "chat", "message", "mail", "email", "contact", "info", "data", "file", "download", "upload",
    "share", "link", "url", "net", "digital", "virtual", "cyber", "secure", "safe", "protect",
    "guard", "shield", "defense", "security", "privacy", "anonymous", "proxy", "vpn", "tor",
    "dark", "deep", "hidden", "secret", "private", "exclusive", "vip", "premium", "pro", "plus",
    "gold", "silver", "platinum", "diamond", "elite", "luxury", "fancy", "cool", "awesome",
    "amazing", "incredible", "fantastic", "perfect", "best", "quality", "professional", "expert",
    "certified", "licensed", "insured", "affordable", "reliable", "trusted", "approved",
    "verified",
];

const COMMERCE_TERMS: &str = r"buy|sell|offer|deal|discount|cheap|price|cost|free|trial|sample|promo|coupon|voucher|sale|clearance|bargain|save|special|limited|exclusive|guarantee|warranty|refund|money\.?back";
const CALL_TO_ACTION_TERMS: &str = r"click|visit|check|shop|order|purchase|download|subscribe|register|sign\.?up|join|follow|like|share|comment|contact|call|text|whatsapp|telegram|discord|skype";
const SUPERLATIVE_TERMS: &str = r"awesome|amazing|incredible|fantastic|perfect|best|top|quality|professional|expert|certified|licensed|insured|affordable|reliable|trusted|approved|verified";
const URGENCY_TERMS: &str = r"urgent|immediate|instant|quick|fast|easy|simple|hassle\.?free|risk\.?free|100%|satisfaction|guaranteed|proven|effective|powerful|revolutionary|breakthrough";
const PLATFORM_TERMS: &str = r"whatsapp|telegram|signal|viber|wechat|line|kik|snapchat|instagram|facebook|twitter|youtube|tiktok|linkedin|pinterest|reddit";
const BAIT_TERMS: &str = r"hello|hi|dear|friend|sir|madam|attention|notice|important|congratulations|winner|lottery|prize|reward|bonus|gift|claim|collect|receive";
const MONEY_TERMS: &str = r"money|cash|dollar|euro|pound|currency|payment|transfer|deposit|investment|profit|income|earn|make|get";
const PHARMA_TERMS: &str = r"viagra|cialis|levitra|pharmacy|medication|drug|pill|weight\.?loss|diet|fat\.?burn|muscle|fitness|bodybuilding|supplement|vitamin|herbal|natural|organic";

pub const SHORT_CONTENT_CHARS: usize = 10;
pub const LONG_CONTENT_CHARS: usize = 2000;
pub const SHORT_CONTENT_PENALTY: i32 = 2;
pub const LONG_CONTENT_PENALTY: i32 = 1;
pub const CAPITALIZATION_PENALTY: i32 = 2;
pub const CAPITALIZATION_RATIO: f64 = 0.5;

/// A way of finding spam fragments in text.
///
/// The two repetition rules need back-references, which `regex` does not
/// support, so they are matched by hand.
#[derive(Debug)]
pub enum Matcher {
    Pattern(Regex),
    /// The same character `min_run` or more times in a row (newlines excluded).
    RepeatedChar { min_run: usize },
    /// The same word (case-insensitive) `min_run` or more times, separated only by whitespace.
    RepeatedWord { min_run: usize },
}

/// Rewrites `\b` as an ASCII-only boundary. In Unicode mode `ñ` and CJK
/// letters are word characters, which would hide `spam.xyz` inside
/// `ñspam.xyz` or `访问spam.xyz`.
fn ascii_word_boundaries(source: &str) -> String {
    source.replace(r"\b", r"(?-u:\b)")
}

impl Matcher {
    fn pattern(source: &str) -> Self {
        Matcher::Pattern(Regex::new(&ascii_word_boundaries(source)).expect("valid spam pattern"))
    }

    /// Non-overlapping matches, left to right.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match self {
            Matcher::Pattern(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
            Matcher::RepeatedChar { min_run } => repeated_char_runs(text, *min_run),
            Matcher::RepeatedWord { min_run } => repeated_word_runs(text, *min_run),
        }
    }
}

fn repeated_char_runs(text: &str, min_run: usize) -> Vec<&str> {
    let mut found = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        let mut end = start + ch.len_utf8();
        let mut run = 1;
        while let Some(&(idx, next)) = chars.peek() {
            if next != ch {
                break;
            }
            end = idx + next.len_utf8();
            run += 1;
            chars.next();
        }
        if ch != '\n' && run >= min_run {
            found.push(&text[start..end]);
        }
    }
    found
}

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[A-Za-z0-9_]+").expect("valid word pattern");
}

fn repeated_word_runs(text: &str, min_run: usize) -> Vec<&str> {
    let words: Vec<regex::Match<'_>> = WORD.find_iter(text).collect();
    let mut found = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let first = words[i];
        let mut j = i + 1;
        while j < words.len() {
            let gap = &text[words[j - 1].end()..words[j].start()];
            let separated_by_space = !gap.is_empty() && gap.chars().all(char::is_whitespace);
            if !separated_by_space || !words[j].as_str().eq_ignore_ascii_case(first.as_str()) {
                break;
            }
            j += 1;
        }
        if j - i >= min_run {
            found.push(&text[first.start()..words[j - 1].end()]);
        }
        i = j;
    }
    found
}

/// A named group of matchers sharing one weight.
#[derive(Debug)]
pub struct SpamCategory {
    pub name: &'static str,
    pub weight: i32,
    pub matchers: Vec<Matcher>,
}

impl SpamCategory {
    fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.matchers.iter().flat_map(|m| m.find_all(text)).collect()
    }
}

fn build_categories() -> Vec<SpamCategory> {
    let common_tlds = COMMON_TLDS.join("|");
    let uncommon = UNCOMMON_SUFFIXES.join("|");
    let uncommon_domain = format!(r"(?i)\b[a-zA-Z0-9-]{{2,20}}\.(?:{})\b", uncommon);

    vec![
        SpamCategory {
            name: "urls",
            weight: 3,
            matchers: vec![
                Matcher::pattern(
                    r"(?i)https?://(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
                ),
                Matcher::pattern(r"(?i)www\.[a-zA-Z0-9-]+\.[a-zA-Z]{2,}"),
                Matcher::pattern(r"(?i)[a-zA-Z0-9-]+\.[a-zA-Z]{2,}/\S*"),
                Matcher::pattern(r"(?i)[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
                Matcher::pattern(&format!(r"(?i)\b[a-zA-Z0-9.-]+\.(?:{})\b", common_tlds)),
                Matcher::pattern(&uncommon_domain),
                Matcher::pattern(r"(?i)\b[a-zA-Z0-9-]{2,20}\.[a-zA-Z]{2,6}\b"),
            ],
        },
        SpamCategory {
            name: "promotional",
            weight: 2,
            matchers: [COMMERCE_TERMS, CALL_TO_ACTION_TERMS, SUPERLATIVE_TERMS, URGENCY_TERMS]
                .iter()
                .map(|terms| Matcher::pattern(&format!(r"(?i)\b(?:{})\b", terms)))
                .collect(),
        },
        SpamCategory {
            name: "contact",
            weight: 4,
            matchers: vec![
                Matcher::pattern(r"\b[0-9]{3}[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b"),
                Matcher::pattern(r"\b\+?1?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b"),
                Matcher::pattern(&format!(r"(?i)\b(?:{})\b", PLATFORM_TERMS)),
            ],
        },
        SpamCategory {
            name: "repetitive",
            weight: 1,
            matchers: vec![
                Matcher::RepeatedChar { min_run: 5 },
                Matcher::RepeatedWord { min_run: 3 },
                Matcher::pattern(r"[!@#$%^&*]{3,}"),
            ],
        },
        SpamCategory {
            name: "suspicious",
            weight: 5,
            matchers: vec![
                Matcher::pattern(&format!(
                    r"(?i)\b(?:{})\b.*\b(?:{})\b",
                    BAIT_TERMS, MONEY_TERMS
                )),
                Matcher::pattern(&format!(r"(?i)\b(?:{})\b", PHARMA_TERMS)),
            ],
        },
        SpamCategory {
            name: "obscureWebsites",
            weight: 8,
            matchers: vec![Matcher::pattern(&uncommon_domain)],
        },
    ]
}

lazy_static! {
    static ref SPAM_CATEGORIES: Vec<SpamCategory> = build_categories();
}

/// Raw scoring output, before a disposition is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpamScore {
    pub score: i32,
    pub reasons: Vec<String>,
    pub category_matches: Vec<CategoryMatches>,
}

fn weighted(weight: i32, count: usize) -> i32 {
    weight.saturating_mul(i32::try_from(count).unwrap_or(i32::MAX))
}

/// Scores already sanitized text. Deterministic and side-effect free.
pub fn detect_spam(content: &str) -> SpamScore {
    let mut result = SpamScore::default();

    for category in SPAM_CATEGORIES.iter() {
        let matches = category.find_all(content);
        if matches.is_empty() {
            continue;
        }
        result.score = result
            .score
            .saturating_add(weighted(category.weight, matches.len()));
        result
            .reasons
            .push(format!("{}: {} matches", category.name, matches.len()));
        result.category_matches.push(CategoryMatches {
            category: category.name.to_string(),
            matches: matches.into_iter().map(str::to_string).collect(),
        });
    }

    let length = content.chars().count();
    if length < SHORT_CONTENT_CHARS {
        result.reasons.push("Content too short".to_string());
        result.score = result.score.saturating_add(SHORT_CONTENT_PENALTY);
    }
    if length > LONG_CONTENT_CHARS {
        result.reasons.push("Content too long".to_string());
        result.score = result.score.saturating_add(LONG_CONTENT_PENALTY);
    }

    let uppercase = content.chars().filter(char::is_ascii_uppercase).count();
    if length > 0 && (uppercase as f64 / length as f64) > CAPITALIZATION_RATIO {
        result.reasons.push("Excessive capitalization".to_string());
        result.score = result.score.saturating_add(CAPITALIZATION_PENALTY);
    }

    result
}

/// Names and weights of the categories, in evaluation order.
pub fn category_weights() -> Vec<(&'static str, i32)> {
    SPAM_CATEGORIES.iter().map(|c| (c.name, c.weight)).collect()
}

/// Sanitizes, scores and classifies review text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFilter {
    thresholds: ModerationThresholds,
}

impl ContentFilter {
    pub fn new(thresholds: ModerationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ModerationThresholds {
        self.thresholds
    }

    pub fn validate_review(&self, raw: &str) -> ModerationResult {
        let sanitized_body = sanitize(raw);
        let SpamScore {
            score,
            reasons,
            category_matches,
        } = detect_spam(&sanitized_body);
        let disposition = self.thresholds.classify(score);

        ModerationResult {
            sanitized_body,
            score,
            reasons,
            category_matches,
            disposition,
        }
    }
}
