//! English pluralization for model type names.
//!
//! Controller names and `DbSet` properties use the plural form (`Post` →
//! `Posts`, `Category` → `Categories`). Only the last word of a PascalCase
//! name is inflected, so `BlogEntry` becomes `BlogEntries`.

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("datum", "data"),
    ("criterion", "criteria"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("quiz", "quizzes"),
    ("leaf", "leaves"),
    ("loaf", "loaves"),
    ("thief", "thieves"),
];

/// `-o` words that take `-oes`; every other `-o` word takes `-s`
const O_ES: &[&str] = &[
    "buffalo", "echo", "embargo", "hero", "mosquito", "potato", "tomato", "torpedo", "veto",
    "volcano",
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
];

/// Pluralize a PascalCase type name
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let split = last_word_start(name);
    let (head, word) = name.split_at(split);
    format!("{head}{}", pluralize_word(word))
}

fn last_word_start(name: &str) -> usize {
    name.char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .last()
        .unwrap_or(0)
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_case(word, plural);
    }

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("sh")
        || lower.ends_with("ch")
    {
        return format!("{word}es");
    }
    if lower.ends_with('y') && !ends_with_vowel_then(&lower, 'y') {
        return format!("{}ies", &word[..word.len() - 1]);
    }
    if lower.ends_with("fe") && !lower.ends_with("ffe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if lower.ends_with("lf") || lower.ends_with("rf") {
        return format!("{}ves", &word[..word.len() - 1]);
    }
    if O_ES.contains(&lower.as_str()) {
        return format!("{word}es");
    }
    format!("{word}s")
}

fn ends_with_vowel_then(lower: &str, last: char) -> bool {
    let mut chars = lower.chars().rev();
    chars.next() == Some(last) && matches!(chars.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

fn match_case(original: &str, plural: &str) -> String {
    let mut chars = plural.chars();
    match (original.chars().next(), chars.next()) {
        (Some(first), Some(p)) if first.is_uppercase() => {
            p.to_uppercase().collect::<String>() + chars.as_str()
        }
        _ => plural.to_string(),
    }
}
