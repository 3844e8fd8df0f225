// French calendar vocabulary used by the platform's data and date labels

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Full French month name (lowercase), 1-based month
pub fn month_name(month: u32) -> &'static str {
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

/// Full French weekday name (lowercase)
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lundi",
        Weekday::Tue => "mardi",
        Weekday::Wed => "mercredi",
        Weekday::Thu => "jeudi",
        Weekday::Fri => "vendredi",
        Weekday::Sat => "samedi",
        Weekday::Sun => "dimanche",
    }
}

/// Two-letter weekday header for calendar grids, Monday first
pub fn weekday_initials() -> [&'static str; 7] {
    ["lu", "ma", "me", "je", "ve", "sa", "di"]
}

/// Parse a month token such as "Juin", "juil", "Fév", "Sept" or "aout"
pub fn parse_month(token: &str) -> Option<u32> {
    let token = fold_accents(&token.trim().trim_end_matches('.').to_lowercase());
    if token.is_empty() {
        return None;
    }

    // "ju" alone is ambiguous between juin and juillet
    if token.len() < 3 {
        return None;
    }

    MONTHS
        .iter()
        .position(|month| fold_accents(month).starts_with(&token))
        .map(|idx| idx as u32 + 1)
}

/// Parse "12 Juin 2023" style dates
pub fn parse_long_date(input: &str) -> Option<NaiveDate> {
    let mut parts = input.split_whitespace();
    let day: u32 = parts.next()?.parse().ok()?;
    let month = parse_month(parts.next()?)?;
    let year: i32 = parts.next()?.parse().ok()?;

    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse "14:00" or "14h00" start times
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let normalized = input.trim().to_lowercase().replace('h', ":");
    let normalized = if normalized.ends_with(':') {
        format!("{}00", normalized)
    } else {
        normalized
    };

    NaiveTime::parse_from_str(&normalized, "%H:%M").ok()
}

/// "12 juin 2023"
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date.month()), date.year())
}

/// "lundi 12 juin 2023"
pub fn format_full_date(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), format_long_date(date))
}

/// "12 juin"
pub fn format_day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), month_name(date.month()))
}

/// "juin 2023"
pub fn format_month_year(date: NaiveDate) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

fn fold_accents(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'à' | 'â' | 'ä' => 'a',
            'û' | 'ù' | 'ü' => 'u',
            'ô' | 'ö' => 'o',
            'î' | 'ï' => 'i',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_variants() {
        assert_eq!(parse_month("Juin"), Some(6));
        assert_eq!(parse_month("Juillet"), Some(7));
        assert_eq!(parse_month("juil"), Some(7));
        assert_eq!(parse_month("Fév"), Some(2));
        assert_eq!(parse_month("Sept"), Some(9));
        assert_eq!(parse_month("Déc"), Some(12));
        assert_eq!(parse_month("août"), Some(8));
        assert_eq!(parse_month("Aout"), Some(8));
        assert_eq!(parse_month("Ju"), None);
        assert_eq!(parse_month("Smarch"), None);
    }

    #[test]
    fn test_parse_long_date() {
        assert_eq!(
            parse_long_date("12 Juin 2023"),
            NaiveDate::from_ymd_opt(2023, 6, 12)
        );
        assert_eq!(
            parse_long_date("5 Juillet 2023"),
            NaiveDate::from_ymd_opt(2023, 7, 5)
        );
        assert_eq!(parse_long_date("31 Février 2023"), None);
        assert_eq!(parse_long_date("22 Juin"), None);
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:00"), NaiveTime::from_hms_opt(14, 0, 0));
        assert_eq!(parse_time("10h30"), NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(parse_time("9h"), NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(parse_time("soon"), None);
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 12).unwrap();
        assert_eq!(format_long_date(date), "12 juin 2023");
        assert_eq!(format_full_date(date), "lundi 12 juin 2023");
        assert_eq!(format_day_month(date), "12 juin");
        assert_eq!(format_month_year(date), "juin 2023");
    }
}
