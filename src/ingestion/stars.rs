use anyhow::{Context, Result};
use regex::Regex;

const MIN_RATING: f64 = 0.5;
const MAX_RATING: f64 = 5.0;

/// Turns rating labels ("4.50 stars", "3.5") into raw ratings
pub struct StarParser {
    stars_regex: Regex,
}

impl StarParser {
    pub fn new() -> Result<Self> {
        let stars_regex = Self::compile_regex()?;
        Ok(Self { stars_regex })
    }

    /// `None` for anything that is not a half-step between 0.5 and 5.0
    pub fn parse(&self, label: &str) -> Option<f64> {
        let label = label.trim();
        let number = match self.stars_regex.captures(label) {
            Some(captures) => captures.get(1)?.as_str(),
            None => label,
        };

        number.parse::<f64>().ok().filter(|&v| is_valid_rating(v))
    }

    fn compile_regex() -> Result<Regex> {
        Regex::new(r"^(\d+(?:\.\d+)?)\s*stars?$")
            .context("Failed to compile star rating regex")
    }
}

fn is_valid_rating(value: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&value) && (value * 2.0).fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_star_labels() {
        let parser = StarParser::new().unwrap();
        assert_eq!(parser.parse("4.50 stars"), Some(4.5));
        assert_eq!(parser.parse("5.00 stars"), Some(5.0));
        assert_eq!(parser.parse("0.50 stars"), Some(0.5));
        assert_eq!(parser.parse(" 1.00 star "), Some(1.0));
    }

    #[test]
    fn test_parse_plain_numbers() {
        let parser = StarParser::new().unwrap();
        assert_eq!(parser.parse("3.5"), Some(3.5));
        assert_eq!(parser.parse("2"), Some(2.0));
    }

    #[test]
    fn test_reject_out_of_scale_values() {
        let parser = StarParser::new().unwrap();
        assert_eq!(parser.parse("0"), None);
        assert_eq!(parser.parse("5.50 stars"), None);
        assert_eq!(parser.parse("3.25"), None);
        assert_eq!(parser.parse("n/a"), None);
        assert_eq!(parser.parse(""), None);
    }
}
