use super::{Field, Location, Style, simple_string};
use crate::error::CoinApiError;

/// Render header fields as `(name, value)` pairs.
///
/// Multi-valued headers are always comma-joined. Empty renderings are dropped.
pub fn get_headers(fields: &[Field]) -> Result<Vec<(String, String)>, CoinApiError> {
    let mut headers = Vec::new();

    for field in fields {
        let Some(value) = field.located(Location::Header) else {
            continue;
        };
        if field.style != Style::Simple {
            return Err(CoinApiError::UnsupportedStyle {
                field: field.name.to_string(),
                style: field.style,
            });
        }
        let rendered = simple_string(value, field.explode);
        if !rendered.is_empty() {
            headers.push((field.name.to_string(), rendered));
        }
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::ParamValue;

    #[test]
    fn test_header_values() {
        let fields = vec![
            Field::header("X-Trace", Some(true)),
            Field::header("X-Ids", Some(ParamValue::list([1, 2, 3]))).explode(true),
            Field::header("X-Meta", Some(ParamValue::record([("a", "1"), ("b", "2")]))),
            Field::header::<&str>("X-Missing", None),
            Field::query("not_a_header", Some("q")),
        ];
        let headers = get_headers(&fields).unwrap();
        assert_eq!(
            headers,
            vec![
                ("X-Trace".to_string(), "true".to_string()),
                ("X-Ids".to_string(), "1,2,3".to_string()),
                ("X-Meta".to_string(), "a,1,b,2".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_header_is_skipped() {
        let fields = vec![Field::header("X-Empty", Some(ParamValue::List(Vec::new())))];
        assert!(get_headers(&fields).unwrap().is_empty());
    }
}
