/// Formato de precio `es-CO`: separador de miles `.`, decimales con `,`,
/// máximo dos decimales y sin ceros finales (`15000` → `"15.000"`).
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "0".to_string();
    }

    let negative = price < 0.0;
    let cents = (price.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let decimals = format!("{:02}", fraction);
        grouped.push(',');
        grouped.push_str(decimals.trim_end_matches('0'));
    }

    if negative && cents > 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Etiqueta de precio con símbolo: `$15.000`
pub fn price_label(price: f64) -> String {
    format!("${}", format_price(price))
}

/// `"1 cupo"`, `"3 cupos"`
pub fn seats_label(count: u32) -> String {
    if count == 1 {
        "1 cupo".to_string()
    } else {
        format!("{} cupos", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_price(0.0), "0");
        assert_eq!(format_price(800.0), "800");
        assert_eq!(format_price(15000.0), "15.000");
        assert_eq!(format_price(1234567.0), "1.234.567");
    }

    #[test]
    fn decimals_use_comma_without_trailing_zeros() {
        assert_eq!(format_price(1500.5), "1.500,5");
        assert_eq!(format_price(1500.25), "1.500,25");
        assert_eq!(format_price(-2000.0), "-2.000");
    }

    #[test]
    fn labels() {
        assert_eq!(price_label(8000.0), "$8.000");
        assert_eq!(seats_label(1), "1 cupo");
        assert_eq!(seats_label(4), "4 cupos");
    }
}
