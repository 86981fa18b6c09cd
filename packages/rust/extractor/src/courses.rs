//! Line-level course heuristics.
//!
//! A line is kept when it mentions credits/hours (`зач`, `кред`, `часы`, ...)
//! or starts with an enumerated-list marker such as `12.`.

use std::collections::HashSet;
use std::sync::LazyLock;

use itmo_advisor_shared::CourseRecord;
use regex::Regex;

/// Credit/hour keyword stems, case-insensitive.
static CREDIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)зач|кред|кредит|зачет|часы").expect("credit regex")
});

/// Numeral followed by a period at the start of the line.
static ENUMERATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.").expect("enumerated regex"));

/// Line boundaries: `\n`, `\r`, vertical tab, form feed, the file/group/record
/// separators, NEL and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{b}' | '\u{c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

/// Whether a trimmed, non-empty line looks like a course descriptor.
pub fn is_course_line(line: &str) -> bool {
    CREDIT_RE.is_match(line) || ENUMERATED_RE.is_match(line)
}

/// Collect course lines from a document's plain text.
///
/// Order follows the text; repeated lines keep only their first occurrence.
pub fn extract_courses(text: &str) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    // `\r\n` yields an empty piece between the two breaks; blanks are dropped.
    for record in text.split(is_line_break).filter_map(CourseRecord::from_line) {
        if !is_course_line(&record.raw) {
            continue;
        }
        if seen.insert(record.raw.clone()) {
            out.push(record);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raws(records: &[CourseRecord]) -> Vec<&str> {
        records.iter().map(|r| r.raw.as_str()).collect()
    }

    #[test]
    fn credit_stems_match_case_insensitively() {
        assert!(is_course_line("Машинное обучение 6 ЗАЧ. ЕД."));
        assert!(is_course_line("Кредиты: 3"));
        assert!(is_course_line("Аудиторные часы 72"));
        assert!(!is_course_line("Учебный план"));
    }

    #[test]
    fn enumerated_lines_match_only_at_start() {
        assert!(is_course_line("1. Глубокое обучение"));
        assert!(is_course_line("12.Статистика"));
        assert!(!is_course_line("Семестр 1. Осень"));
        assert!(!is_course_line("1) Математика"));
    }

    #[test]
    fn identical_lines_collapse_to_one_record() {
        let text = "1. Глубокое обучение\n1. Глубокое обучение\n";
        let courses = extract_courses(text);
        assert_eq!(raws(&courses), vec!["1. Глубокое обучение"]);
    }

    #[test]
    fn matching_both_patterns_is_not_duplicated() {
        let courses = extract_courses("1. Машинное обучение 6 зач. ед.");
        assert_eq!(courses.len(), 1);
    }

    #[test]
    fn lines_are_trimmed_and_order_preserved() {
        let text = "Блок 1\n   2. Алгоритмы 4 кредита  \n\n\t\n1. Python\nОбщая информация\n  2. Алгоритмы 4 кредита\nПрактика 144 часы";
        let courses = extract_courses(text);
        assert_eq!(
            raws(&courses),
            vec!["2. Алгоритмы 4 кредита", "1. Python", "Практика 144 часы"]
        );
    }

    #[test]
    fn splits_on_every_line_separator() {
        let text = "1. Python\r2. SQL\u{c}3. Statistics\u{b}4. Linux\u{2028}5. Git\r\n6. Docker\u{85}7. Rust";
        let courses = extract_courses(text);
        assert_eq!(
            raws(&courses),
            vec![
                "1. Python",
                "2. SQL",
                "3. Statistics",
                "4. Linux",
                "5. Git",
                "6. Docker",
                "7. Rust"
            ]
        );
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_courses("").is_empty());
        assert!(extract_courses("\n \n").is_empty());
    }
}
