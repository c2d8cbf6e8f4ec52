use analysis_core::{FieldError, Figure};

/// Normalize a provider figure to a plain number.
///
/// Strings may carry thousands separators and surrounding whitespace
/// (`" 1,234,567 "`). Anything that does not end up as a finite number is a
/// field error for `field`.
pub fn parse_figure(field: &str, figure: Option<&Figure>) -> Result<f64, FieldError> {
    let value = match figure {
        None => {
            return Err(FieldError::Missing { field: field.to_string() });
        }
        Some(Figure::Number(n)) => *n,
        Some(Figure::Text(raw)) => {
            let cleaned: String = raw
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                return Err(FieldError::Missing { field: field.to_string() });
            }
            cleaned.parse::<f64>().map_err(|_| FieldError::NotNumeric {
                field: field.to_string(),
                value: raw.clone(),
            })?
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::NotNumeric {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_locale_formatted_strings() {
        assert_eq!(parse_figure("revenue", Some(&Figure::from("1,234,567"))), Ok(1_234_567.0));
        assert_eq!(parse_figure("revenue", Some(&Figure::from(" -12,500.5 "))), Ok(-12_500.5));
        assert_eq!(parse_figure("revenue", Some(&Figure::from(42.0))), Ok(42.0));
    }

    #[test]
    fn missing_and_blank_are_missing() {
        assert_eq!(
            parse_figure("revenue", None),
            Err(FieldError::Missing { field: "revenue".to_string() })
        );
        assert!(matches!(
            parse_figure("revenue", Some(&Figure::from("  "))),
            Err(FieldError::Missing { .. })
        ));
    }

    #[test]
    fn non_numeric_is_reported_with_raw_value() {
        let err = parse_figure("total_equity", Some(&Figure::from("n/a"))).unwrap_err();
        assert_eq!(
            err,
            FieldError::NotNumeric { field: "total_equity".to_string(), value: "n/a".to_string() }
        );
        assert!(parse_figure("total_equity", Some(&Figure::from("NaN"))).is_err());
        assert!(parse_figure("total_equity", Some(&Figure::from(f64::INFINITY))).is_err());
    }
}
