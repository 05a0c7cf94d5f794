//! Display formatting for monetary amounts
//!
//! Amounts are shown the way Chilean exchanges print them: `.` groups
//! thousands, `,` separates two fixed decimals.

/// Separators and precision of a rendered amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyFormat {
    pub thousands: char,
    pub decimal: char,
    pub decimals: usize,
}

impl MoneyFormat {
    /// `4.500.000,50`
    pub const CLP: MoneyFormat = MoneyFormat {
        thousands: '.',
        decimal: ',',
        decimals: 2,
    };

    /// Render `value` with this format
    ///
    /// ```
    /// use cryptobot::money::MoneyFormat;
    ///
    /// assert_eq!(MoneyFormat::CLP.render(4_500_000.5), "4.500.000,50");
    /// assert_eq!(MoneyFormat::CLP.render(-1234.0), "-1.234,00");
    /// ```
    pub fn render(&self, value: f64) -> String {
        if !value.is_finite() {
            return "N/A".to_string();
        }

        let fixed = format!("{:.*}", self.decimals, value.abs());
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
        // "-0,00" reads as noise
        if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
            out.push('-');
        }
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                out.push(self.thousands);
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push(self.decimal);
            out.push_str(fraction);
        }
        out
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::CLP
    }
}

/// Render `value` with [`MoneyFormat::CLP`]
pub fn render(value: f64) -> String {
    MoneyFormat::CLP.render(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values() {
        assert_eq!(render(0.0), "0,00");
        assert_eq!(render(5.0), "5,00");
        assert_eq!(render(99.0), "99,00");
        assert_eq!(render(100.0), "100,00");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(render(1000.0), "1.000,00");
        assert_eq!(render(123_456.789), "123.456,79");
        assert_eq!(render(1_234_567.0), "1.234.567,00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(render(-0.001), "0,00");
        assert_eq!(render(-42.5), "-42,50");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render(f64::NAN), "N/A");
        assert_eq!(render(f64::INFINITY), "N/A");
    }

    #[test]
    fn test_custom_format() {
        let format = MoneyFormat {
            thousands: ',',
            decimal: '.',
            decimals: 4,
        };
        assert_eq!(format.render(1234.5), "1,234.5000");
    }

    #[test]
    fn test_zero_decimals() {
        let format = MoneyFormat {
            decimals: 0,
            ..MoneyFormat::CLP
        };
        assert_eq!(format.render(1_500_000.4), "1.500.000");
    }
}
