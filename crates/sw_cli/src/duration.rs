use std::str::FromStr;
use std::time::Duration;

/// A duration written like `30s`, `2m` or `1m30s`. A bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_number = false;
        let mut chars = s.trim().chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }

            if current_number.is_empty() {
                return Err(format!("Missing number before unit: {}", c));
            }
            let millis_per_unit = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_millis = accumulate(total_millis, &current_number, millis_per_unit)?;
            current_number.clear();
            has_number = true;
        }

        // Trailing number without a unit counts as seconds
        if !current_number.is_empty() {
            total_millis = accumulate(total_millis, &current_number, 1_000)?;
            has_number = true;
        }

        if !has_number {
            return Err("Duration must include a number".to_string());
        }
        if total_millis == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

fn accumulate(total_millis: u64, digits: &str, millis_per_unit: u64) -> Result<u64, String> {
    digits
        .parse::<u64>()
        .ok()
        .and_then(|num| num.checked_mul(millis_per_unit))
        .and_then(|millis| total_millis.checked_add(millis))
        .ok_or_else(|| "Duration too large".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> std::result::Result<Duration, String> {
        s.parse::<HumanDuration>().map(|d| d.0)
    }

    #[test]
    fn test_units() {
        assert_eq!(parse("30s"), Ok(Duration::from_secs(30)));
        assert_eq!(parse("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse("1m30s"), Ok(Duration::from_secs(90)));
    }

    #[test]
    fn test_bare_number_is_seconds() {
        assert_eq!(parse("45"), Ok(Duration::from_secs(45)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(parse("").is_err());
        assert!(parse("s").is_err());
        assert!(parse("10x").is_err());
        assert!(parse("0s").is_err());
    }

    #[test]
    fn test_rejects_overflowing_durations() {
        let too_large = Err("Duration too large".to_string());
        assert_eq!(parse("6000000000000h"), too_large);
        assert_eq!(parse("18446744073709552s"), too_large);
        assert_eq!(parse("18446744073709551615ms1ms"), too_large);
        assert_eq!(parse("99999999999999999999999"), too_large);
    }
}
