use super::{Field, Location, ParamValue, Style, simple_string};
use crate::error::CoinApiError;

/// Join the server URL and the path template, substituting path fields.
///
/// Fields are applied in declaration order and each replaces only the first
/// `{name}` placeholder it finds.
pub fn generate_url(
    server_url: &str,
    template: &str,
    fields: &[Field],
) -> Result<String, CoinApiError> {
    let mut path = template.to_string();

    for field in fields {
        let Some(value) = field.located(Location::Path) else {
            continue;
        };
        let rendered = render(field, value)?;
        path = path.replacen(&format!("{{{}}}", field.name), &rendered, 1);
    }

    Ok(format!("{}{}", server_url.trim_end_matches('/'), path))
}

fn render(field: &Field, value: &ParamValue) -> Result<String, CoinApiError> {
    if field.json {
        return Ok(value.to_json().to_string());
    }
    match field.style {
        Style::Simple => Ok(simple_string(value, field.explode)),
        style => Err(CoinApiError::UnsupportedStyle {
            field: field.name.to_string(),
            style,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "/v1/exchangerate/{asset_id_base}/{asset_id_quote}";

    #[test]
    fn test_substitutes_path_fields() {
        let fields = vec![
            Field::path("asset_id_base", "BTC"),
            Field::path("asset_id_quote", "USD"),
        ];
        let url = generate_url("https://rest.coinapi.io", TEMPLATE, &fields).unwrap();
        assert_eq!(url, "https://rest.coinapi.io/v1/exchangerate/BTC/USD");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let fields = vec![Field::path("size", 32)];
        let url =
            generate_url("http://localhost:8080/", "/v1/assets/icons/{size}", &fields).unwrap();
        assert_eq!(url, "http://localhost:8080/v1/assets/icons/32");
    }

    #[test]
    fn test_only_first_placeholder_is_replaced() {
        let fields = vec![Field::path("id", "abc")];
        let url = generate_url("", "/{id}/copy/{id}", &fields).unwrap();
        assert_eq!(url, "/abc/copy/{id}");
    }

    #[test]
    fn test_list_and_record_values() {
        let fields = vec![
            Field::path("ids", ParamValue::list(["a", "b"])),
            Field::path("filter", ParamValue::record([("x", 1), ("y", 2)])).explode(true),
        ];
        let url = generate_url("", "/{ids}/{filter}", &fields).unwrap();
        assert_eq!(url, "/a,b/x=1,y=2");
    }

    #[test]
    fn test_json_path_field() {
        let fields = vec![Field::path("ids", ParamValue::list(["a", "b"])).json()];
        let url = generate_url("", "/{ids}", &fields).unwrap();
        assert_eq!(url, r#"/["a","b"]"#);
    }

    #[test]
    fn test_non_simple_style_fails() {
        let fields = vec![Field::path("id", "abc").style(Style::Form)];
        let err = generate_url("", "/{id}", &fields).unwrap_err();
        assert!(matches!(err, CoinApiError::UnsupportedStyle { style: Style::Form, .. }));
    }
}
