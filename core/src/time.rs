use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, Duration, Local, Months, NaiveDate, Weekday};

/// Parses a due date relative to the local calendar day.
pub fn parse_human_date(input: &str) -> Result<NaiveDate> {
    parse_human_date_from(input, Local::now().date_naive())
}

/// Accepts `today`/`tod`, `tomorrow`/`tom`, `eow`, `eom`, `+Nd`/`+Nw`/`+Nm`,
/// `YYYY-MM-DD`, and weekdays (`fri`, `2:fri`).
pub fn parse_human_date_from(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "eow" => {
            // Coming Sunday, or today if it already is one.
            let days = (7 - today.weekday().num_days_from_sunday()) % 7;
            return Ok(today + Duration::days(days as i64));
        }
        "eom" => {
            let first = today
                .with_day(1)
                .ok_or_else(|| anyhow!("Invalid date: {}", today))?;
            let next_month = first
                .checked_add_months(Months::new(1))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return Ok(next_month - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('+') {
        return parse_relative(rest, today);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target) = parse_weekday_str(day_str) {
            if count < 1 {
                return Err(anyhow!("Weekday count must be positive: {}", input));
            }
            let mut days_needed = target.num_days_from_sunday() as i64
                - today.weekday().num_days_from_sunday() as i64;
            if days_needed <= 0 {
                days_needed += 7;
            }
            let target_date = (count as u64 - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(days_needed as u64))
                .and_then(|days| today.checked_add_days(Days::new(days)));
            return target_date.ok_or_else(|| anyhow!("Date out of range: {}", input));
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_relative(rest: &str, today: NaiveDate) -> Result<NaiveDate> {
    let unit = rest
        .chars()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative format: +{}", rest))?;
    let num_str = &rest[..rest.len() - unit.len_utf8()];
    let count: u32 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: +{}", rest))?;

    let target = match unit.to_ascii_lowercase() {
        'd' => today.checked_add_signed(Duration::days(count as i64)),
        'w' => today.checked_add_signed(Duration::weeks(count as i64)),
        // Clamps to the last day of a shorter month (Jan 31 + 1m -> Feb 28).
        'm' => today.checked_add_months(Months::new(count)),
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    target.ok_or_else(|| anyhow!("Date out of range: +{}", rest))
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => count.parse::<i64>().ok().map(|c| (c, day)),
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
