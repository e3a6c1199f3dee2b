//! Shop-style price formatting.

use askama::Template;
use rust_decimal::Decimal;

use super::calculators::round_money;

/// Where the currency symbol sits relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Left,
    Right,
    LeftSpace,
    RightSpace,
}

impl SymbolPosition {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "left_space" => Some(Self::LeftSpace),
            "right_space" => Some(Self::RightSpace),
            _ => None,
        }
    }

    fn symbol_first(self) -> bool {
        matches!(self, Self::Left | Self::LeftSpace)
    }

    fn spaced(self) -> bool {
        matches!(self, Self::LeftSpace | Self::RightSpace)
    }
}

/// Price markup returned to the product page
#[derive(Template)]
#[template(
    source = r#"<span class="hire-price amount"><bdi>{% if symbol_first %}<span class="hire-price-currency">{{ symbol }}</span>{{ gap|safe }}{{ number }}{% else %}{{ number }}{{ gap|safe }}<span class="hire-price-currency">{{ symbol }}</span>{% endif %}</bdi></span>"#,
    ext = "html"
)]
struct PriceMarkup<'a> {
    symbol: &'a str,
    number: &'a str,
    gap: &'a str,
    symbol_first: bool,
}

/// Display settings for money amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    pub currency_code: String,
    pub symbol: String,
    pub position: SymbolPosition,
    pub decimals: u32,
    pub decimal_separator: String,
    pub thousand_separator: String,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            currency_code: "USD".to_string(),
            symbol: "$".to_string(),
            position: SymbolPosition::Left,
            decimals: 2,
            decimal_separator: ".".to_string(),
            thousand_separator: ",".to_string(),
        }
    }
}

impl PriceFormat {
    /// Format the number alone: rounded, padded to `decimals`, grouped in thousands.
    pub fn format_number(&self, amount: Decimal) -> String {
        let mut rounded = round_money(amount, self.decimals);
        rounded.rescale(self.decimals);

        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = rounded.abs().to_string();
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + 8);
        if negative {
            out.push('-');
        }
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push_str(&self.thousand_separator);
            }
            out.push(c);
        }
        if let Some(frac_part) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    /// Plain-text price with the currency symbol, e.g. `$1,234.50`.
    pub fn format_plain(&self, amount: Decimal) -> String {
        let number = self.format_number(amount);
        let gap = if self.position.spaced() { " " } else { "" };
        if self.position.symbol_first() {
            format!("{}{}{}", self.symbol, gap, number)
        } else {
            format!("{}{}{}", number, gap, self.symbol)
        }
    }

    /// HTML price markup, escaped.
    pub fn to_html(&self, amount: Decimal) -> Result<String, askama::Error> {
        let number = self.format_number(amount);
        PriceMarkup {
            symbol: &self.symbol,
            number: &number,
            gap: if self.position.spaced() { "&nbsp;" } else { "" },
            symbol_first: self.position.symbol_first(),
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn euro() -> PriceFormat {
        PriceFormat {
            currency_code: "EUR".to_string(),
            symbol: "€".to_string(),
            position: SymbolPosition::RightSpace,
            decimals: 2,
            decimal_separator: ",".to_string(),
            thousand_separator: ".".to_string(),
        }
    }

    #[test]
    fn test_format_number_pads_decimals() {
        let fmt = PriceFormat::default();
        assert_eq!(fmt.format_number(dec!(30)), "30.00");
        assert_eq!(fmt.format_number(dec!(0.5)), "0.50");
        assert_eq!(fmt.format_number(dec!(0)), "0.00");
    }

    #[test]
    fn test_format_number_groups_thousands() {
        let fmt = PriceFormat::default();
        assert_eq!(fmt.format_number(dec!(1234.5)), "1,234.50");
        assert_eq!(fmt.format_number(dec!(1234567)), "1,234,567.00");
        assert_eq!(fmt.format_number(dec!(999)), "999.00");
        assert_eq!(fmt.format_number(dec!(-1234.5)), "-1,234.50");
    }

    #[test]
    fn test_format_number_rounds_half_up() {
        let fmt = PriceFormat::default();
        assert_eq!(fmt.format_number(dec!(10.005)), "10.01");
        assert_eq!(fmt.format_number(dec!(10.004)), "10.00");
    }

    #[test]
    fn test_format_number_zero_decimals() {
        let fmt = PriceFormat {
            decimals: 0,
            ..PriceFormat::default()
        };
        assert_eq!(fmt.format_number(dec!(1500.4)), "1,500");
    }

    #[test]
    fn test_format_plain_positions() {
        assert_eq!(PriceFormat::default().format_plain(dec!(30)), "$30.00");
        assert_eq!(euro().format_plain(dec!(1234.5)), "1.234,50 €");
    }

    #[test]
    fn test_html_markup_symbol_left() {
        let html = PriceFormat::default().to_html(dec!(30)).unwrap();
        assert_eq!(
            html,
            r#"<span class="hire-price amount"><bdi><span class="hire-price-currency">$</span>30.00</bdi></span>"#
        );
    }

    #[test]
    fn test_html_markup_symbol_right_spaced() {
        let html = euro().to_html(dec!(30)).unwrap();
        assert!(html.contains("30,00&nbsp;<span class=\"hire-price-currency\">€</span>"));
    }

    #[test]
    fn test_html_markup_escapes_symbol() {
        let fmt = PriceFormat {
            symbol: "<b>".to_string(),
            ..PriceFormat::default()
        };
        let html = fmt.to_html(dec!(1)).unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_symbol_position_parse() {
        assert_eq!(SymbolPosition::parse("LEFT"), Some(SymbolPosition::Left));
        assert_eq!(SymbolPosition::parse("right_space"), Some(SymbolPosition::RightSpace));
        assert_eq!(SymbolPosition::parse("middle"), None);
    }
}
