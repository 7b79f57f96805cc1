//! Remix annotation parsing.
//!
//! Finds "(Remixer Type)" credits in a raw post title. Patterns are tried in
//! a fixed priority order and the first non-false-positive hit wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{RemixCredit, RemixInfo};

/// Remix-type keywords accepted at the end of a credit.
pub const REMIX_TYPES: &[&str] = &["remix", "mix", "edit", "rework", "vip", "bootleg", "flip"];

/// Whole phrases that negate a remix credit. The bare word "not" is never
/// enough on its own ("What So Not Remix" is a real credit).
pub const NEGATION_PHRASES: &[&str] = &[
    "not a remix",
    "no remix",
    "non remix",
    "non-remix",
    "not a mix",
    "not an edit",
    "not a rework",
    "not a bootleg",
];

/// Production descriptors that look like credits but name no remixer.
pub const BENIGN_DESCRIPTORS: &[&str] = &[
    "radio edit",
    "extended mix",
    "club mix",
    "original mix",
    "vocal mix",
    "instrumental mix",
];

/// Any negation phrase as whole words, so "luciano remix" never reads as "no remix".
static NEGATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = NEGATION_PHRASES.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).unwrap()
});

/// (Remixer Type)
static PAREN_CREDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(([^\(\)]+?)\s+(remix|mix|edit|rework|vip|bootleg|flip)\)").unwrap()
});

/// [Remixer Type]
static BRACKET_CREDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[([^\[\]]+?)\s+(remix|mix|edit|rework|vip|bootleg|flip)\]").unwrap()
});

/// feat. Featured (Remixer Type), parens or brackets
static FEATURED_CREDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:feat\.?|ft\.?)\s+([^\(\[]+?)\s*[\(\[]([^\(\)\[\]]+?)\s+(remix|mix|edit|rework|vip|bootleg|flip)[\)\]]",
    )
    .unwrap()
});

/// True when a (remixer, type) pair is not a real remix credit.
pub fn is_false_positive_remix(remixer: &str, remix_type: &str) -> bool {
    let remixer = remixer.trim().to_lowercase();
    let remix_type = remix_type.trim().to_lowercase();
    let combined = format!("{} {}", remixer, remix_type);

    if NEGATION_PATTERN.is_match(&combined) {
        return true;
    }
    if remixer == "original" && remix_type == "mix" {
        return true;
    }
    BENIGN_DESCRIPTORS.contains(&combined.as_str())
}

fn credit_from(caps: &Captures, remixer_group: usize, type_group: usize) -> Option<RemixCredit> {
    let remixer = caps.get(remixer_group)?.as_str().trim();
    let remix_type = caps.get(type_group)?.as_str().trim().to_lowercase();
    if remixer.is_empty() || is_false_positive_remix(remixer, &remix_type) {
        return None;
    }
    Some(RemixCredit {
        remixer: remixer.to_string(),
        remix_type,
    })
}

/// Detect a remix credit in an uncleaned title.
pub fn extract_remix_info(title: &str) -> RemixInfo {
    for pattern in [&*PAREN_CREDIT, &*BRACKET_CREDIT] {
        if let Some(credit) = pattern.captures(title).and_then(|c| credit_from(&c, 1, 2)) {
            return RemixInfo {
                credit: Some(credit),
                featured_artist: None,
            };
        }
    }

    if let Some(caps) = FEATURED_CREDIT.captures(title) {
        if let Some(credit) = credit_from(&caps, 2, 3) {
            let featured = caps
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .filter(|f| !f.is_empty());
            return RemixInfo {
                credit: Some(credit),
                featured_artist: featured,
            };
        }
    }

    RemixInfo::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit(title: &str) -> Option<(String, String)> {
        extract_remix_info(title)
            .credit
            .map(|c| (c.remixer, c.remix_type))
    }

    #[test]
    fn test_basic_paren_remix() {
        let info = extract_remix_info("Deadmau5 - Strobe (Eric Prydz Remix)");
        assert!(info.is_remix());
        assert_eq!(
            credit("Deadmau5 - Strobe (Eric Prydz Remix)"),
            Some(("Eric Prydz".to_string(), "remix".to_string()))
        );
        assert_eq!(info.featured_artist, None);
    }

    #[test]
    fn test_bracket_and_other_types() {
        assert_eq!(
            credit("Porter Robinson - Language [Mat Zo Remix]"),
            Some(("Mat Zo".to_string(), "remix".to_string()))
        );
        assert_eq!(
            credit("Disclosure - Latch (Sam Smith VIP Mix)"),
            Some(("Sam Smith VIP".to_string(), "mix".to_string()))
        );
        assert_eq!(
            credit("Moderat - A New Error (Thom Yorke Rework)"),
            Some(("Thom Yorke".to_string(), "rework".to_string()))
        );
        assert_eq!(
            credit("Aphex Twin - Windowlicker [Boards of Canada Flip]"),
            Some(("Boards of Canada".to_string(), "flip".to_string()))
        );
        assert_eq!(
            credit("Justice - Genesis (Boys Noize Bootleg)"),
            Some(("Boys Noize".to_string(), "bootleg".to_string()))
        );
        assert_eq!(
            credit("Paranoid London - Eating Glue (SAD PROM Live Rework)"),
            Some(("SAD PROM Live".to_string(), "rework".to_string()))
        );
    }

    #[test]
    fn test_what_so_not_is_a_real_remixer() {
        assert_eq!(
            credit("Flume - Never Be Like You (What So Not Remix)"),
            Some(("What So Not".to_string(), "remix".to_string()))
        );
        assert!(!extract_remix_info("What So Not - Track").is_remix());
        assert!(!is_false_positive_remix("What So Not", "remix"));
    }

    #[test]
    fn test_negation_inside_remixer_name_ignored() {
        assert_eq!(
            credit("Pryda - Opus (Luciano Remix)"),
            Some(("Luciano".to_string(), "remix".to_string()))
        );
        assert_eq!(
            credit("A - B (Canon Remix)"),
            Some(("Canon".to_string(), "remix".to_string()))
        );
        assert_eq!(
            credit("A - B (Bruno Edit)"),
            Some(("Bruno".to_string(), "edit".to_string()))
        );
        assert!(!is_false_positive_remix("Luciano", "remix"));
        assert!(is_false_positive_remix("Definitely Not A", "Remix"));
    }

    #[test]
    fn test_false_positives_suppressed() {
        assert!(!extract_remix_info("Artist - Track (Original Mix)").is_remix());
        assert!(!extract_remix_info("Artist - Track (Something Not A Remix)").is_remix());
        assert!(!extract_remix_info("Artist - Track (Radio Edit)").is_remix());
        assert!(!extract_remix_info("Artist - Track [Extended Mix]").is_remix());
        assert!(is_false_positive_remix("Club", "Mix"));
    }

    #[test]
    fn test_plain_titles_are_not_remixes() {
        for title in ["Deadmau5 - Strobe", "Porter Robinson - Language", "Disclosure - Latch"] {
            assert_eq!(extract_remix_info(title), RemixInfo::default());
        }
    }

    #[test]
    fn test_featured_credit_after_false_positive() {
        let info = extract_remix_info("Artist - Track (Original Mix) feat. Singer (Caspa Remix)");
        assert_eq!(info.featured_artist.as_deref(), Some("Singer"));
        let c = info.credit.unwrap();
        assert_eq!(c.remixer, "Caspa");
        assert_eq!(c.remix_type, "remix");
    }

    #[test]
    fn test_featured_artist_elsewhere_uses_paren_credit() {
        let info = extract_remix_info("Deadmau5 feat. Kaskade - I Remember (Caspa Remix)");
        assert_eq!(info.credit.unwrap().remixer, "Caspa");
        assert_eq!(info.featured_artist, None);
    }
}
