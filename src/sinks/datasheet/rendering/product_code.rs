//! Short product codes such as `UE0099` derived from the module title.

use regex::Regex;
use std::sync::LazyLock;

static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b([A-Z]{2,4}[0-9]{2,4})\b",
        r"\b(UE\d+)\b",
        r"\b([A-Z]{3,}[0-9]+[A-Z]*)\b",
        r"\b([A-Z]{2,}[0-9]+)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

const STOP_WORDS: [&str; 4] = ["ELECTRONIC", "MODULE", "SENSOR", "UNIT"];
const FILLER_WORDS: [&str; 6] = ["THE", "AND", "FOR", "WITH", "ELECTRONIC", "MODULE"];

const FALLBACK: &str = "MODULE";

fn first_code(text: &str) -> Option<String> {
    CODE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures_iter(text)
            .map(|c| c[1].to_string())
            .find(|code| !STOP_WORDS.contains(&code.as_str()))
    })
}

/// Product code for a module: a model-number-looking token in the title or
/// subtitle, then in the section text, then an abbreviation of the first
/// meaningful title word.
pub fn detect(title: &str, subtitle: &str, sections: &str) -> String {
    let heading = format!("{title} {subtitle}").to_uppercase();
    if let Some(code) = first_code(&heading) {
        return code;
    }
    if let Some(code) = first_code(sections) {
        return code;
    }

    title
        .to_uppercase()
        .split_whitespace()
        .find(|word| {
            word.len() > 2
                && word.chars().all(|c| c.is_ascii_alphabetic())
                && !FILLER_WORDS.contains(word)
        })
        .map(|word| word.chars().take(6).collect())
        .unwrap_or_else(|| FALLBACK.to_string())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_find_code_in_title() {
        assert_eq!(detect("UE0099 Light Sensor", "", ""), "UE0099");
        assert_eq!(detect("Light Sensor", "Rev ab12", ""), "AB12");
        assert_eq!(detect("BME688 environmental board", "", ""), "BME688");
    }

    #[test]
    fn can_find_code_in_sections() {
        assert_eq!(detect("Light Sensor", "", "Based on the TSL2591 chip."), "TSL2591");
    }

    #[test]
    fn falls_back_to_title_word() {
        assert_eq!(detect("The Thermometer Module", "", ""), "THERMO");
        assert_eq!(detect("An Ox", "", ""), "MODULE");
        assert_eq!(detect("", "", ""), "MODULE");
    }
}
