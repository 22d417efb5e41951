//! pt-BR date and time-of-day phrasing used by the reply templates.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// "sábado, 18 de outubro de 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Salutation for the hour of day: before noon, before 18h, then night.
pub fn period_of_day(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Bom dia",
        12..=17 => "Boa tarde",
        _ => "Boa noite",
    }
}
