// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Recognition languages and script-based language detection

use std::collections::BTreeMap;

/// Language codes accepted as recognition hints, with display names
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en-US", "English"),
    ("fr-FR", "French"),
    ("it-IT", "Italian"),
    ("de-DE", "German"),
    ("es-ES", "Spanish"),
    ("pt-BR", "Portuguese"),
    ("zh-Hans", "Chinese (Simplified)"),
    ("zh-Hant", "Chinese (Traditional)"),
    ("yue-Hans", "Cantonese (Simplified)"),
    ("yue-Hant", "Cantonese (Traditional)"),
    ("ko-KR", "Korean"),
    ("ja-JP", "Japanese"),
    ("ru-RU", "Russian"),
    ("uk-UA", "Ukrainian"),
];

/// Default hints when a request names none
pub fn default_languages() -> Vec<String> {
    vec!["zh-Hans".to_string(), "en-US".to_string()]
}

pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
    SUPPORTED_LANGUAGES.iter().copied().collect()
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == code)
}

/// Split a comma-separated `languages` parameter, dropping blanks
pub fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Han,
    Kana,
    Hangul,
    Cyrillic,
}

fn script_for(code: &str) -> Option<Script> {
    let primary = code.split('-').next().unwrap_or(code);
    match primary {
        "en" | "fr" | "it" | "de" | "es" | "pt" => Some(Script::Latin),
        "zh" | "yue" => Some(Script::Han),
        "ja" => Some(Script::Kana),
        "ko" => Some(Script::Hangul),
        "ru" | "uk" => Some(Script::Cyrillic),
        _ => None,
    }
}

fn in_script(c: char, script: Script) -> bool {
    match script {
        Script::Latin => c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{024F}').contains(&c),
        Script::Han => ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c),
        Script::Kana => ('\u{3040}'..='\u{30FF}').contains(&c),
        Script::Hangul => ('\u{AC00}'..='\u{D7AF}').contains(&c) || ('\u{1100}'..='\u{11FF}').contains(&c),
        Script::Cyrillic => ('\u{0400}'..='\u{04FF}').contains(&c),
    }
}

/// Hinted languages whose script appears in `text`, in hint order
pub fn detect_languages(text: &str, hints: &[String]) -> Vec<String> {
    hints
        .iter()
        .filter(|code| {
            script_for(code).is_some_and(|script| text.chars().any(|c| in_script(c, script)))
        })
        .cloned()
        .collect()
}
