use super::{Field, Location, ParamValue, Style, delimited_pairs};
use crate::error::CoinApiError;

/// Render query fields as ordered `(key, value)` pairs.
pub fn get_query_params(fields: &[Field]) -> Result<Vec<(String, String)>, CoinApiError> {
    let mut params = Vec::new();

    for field in fields {
        let Some(value) = field.located(Location::Query) else {
            continue;
        };

        if field.json {
            params.push((field.name.to_string(), value.to_json().to_string()));
            continue;
        }

        match field.style {
            Style::Form => params.extend(delimited_pairs(field.name, value, ",", field.explode)),
            Style::PipeDelimited => {
                params.extend(delimited_pairs(field.name, value, "|", field.explode))
            }
            Style::DeepObject => params.extend(deep_object(field, value)?),
            Style::Simple => {
                return Err(CoinApiError::UnsupportedStyle {
                    field: field.name.to_string(),
                    style: Style::Simple,
                });
            }
        }
    }

    Ok(params)
}

fn deep_object(field: &Field, value: &ParamValue) -> Result<Vec<(String, String)>, CoinApiError> {
    let ParamValue::Record(entries) = value else {
        return Err(CoinApiError::UnsupportedParameter {
            field: field.name.to_string(),
            reason: "deepObject style requires a record value".to_string(),
        });
    };

    Ok(entries
        .iter()
        .flat_map(|(key, member)| {
            let name = format!("{}[{key}]", field.name);
            member.values().into_iter().map(move |v| (name.clone(), v))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::serialization::{Member, Scalar};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_form_exploded_list() {
        let fields = vec![Field::query(
            "filter_asset_id",
            Some(ParamValue::list(["BTC", "ETH"])),
        )];
        assert_eq!(
            get_query_params(&fields).unwrap(),
            pairs(&[("filter_asset_id", "BTC"), ("filter_asset_id", "ETH")])
        );
    }

    #[test]
    fn test_form_scalars_and_missing_values() {
        let fields = vec![
            Field::query("include_supply", Some(false)),
            Field::query("limit", Some(100)),
            Field::query::<&str>("time", None),
            Field::query("time_start", Some(datetime!(2024-01-01 00:00:00 UTC))),
        ];
        assert_eq!(
            get_query_params(&fields).unwrap(),
            pairs(&[
                ("include_supply", "false"),
                ("limit", "100"),
                ("time_start", "2024-01-01T00:00:00Z"),
            ])
        );
    }

    #[test]
    fn test_form_records() {
        let record = ParamValue::record([("a", "1"), ("b", "2")]);
        let exploded = vec![Field::query("obj", Some(record.clone()))];
        assert_eq!(
            get_query_params(&exploded).unwrap(),
            pairs(&[("a", "1"), ("b", "2")])
        );

        let joined = vec![Field::query("obj", Some(record)).explode(false)];
        assert_eq!(get_query_params(&joined).unwrap(), pairs(&[("obj", "a,1,b,2")]));
    }

    #[test]
    fn test_pipe_delimited() {
        let fields = vec![
            Field::query("ids", Some(ParamValue::list(["a", "b", "c"])))
                .style(Style::PipeDelimited)
                .explode(false),
        ];
        assert_eq!(get_query_params(&fields).unwrap(), pairs(&[("ids", "a|b|c")]));
    }

    #[test]
    fn test_deep_object() {
        let value = ParamValue::Record(vec![
            ("exchange".to_string(), Member::One(Scalar::from("BINANCE"))),
            (
                "asset".to_string(),
                Member::Many(vec![Scalar::from("BTC"), Scalar::from("ETH")]),
            ),
        ]);
        let fields = vec![Field::query("filter", Some(value)).style(Style::DeepObject)];
        assert_eq!(
            get_query_params(&fields).unwrap(),
            pairs(&[
                ("filter[exchange]", "BINANCE"),
                ("filter[asset]", "BTC"),
                ("filter[asset]", "ETH"),
            ])
        );
    }

    #[test]
    fn test_deep_object_rejects_lists() {
        let fields = vec![
            Field::query("filter", Some(ParamValue::list(["a"]))).style(Style::DeepObject),
        ];
        assert!(matches!(
            get_query_params(&fields),
            Err(CoinApiError::UnsupportedParameter { .. })
        ));
    }

    #[test]
    fn test_simple_style_is_rejected() {
        let fields = vec![Field::query("q", Some("x")).style(Style::Simple)];
        assert!(matches!(
            get_query_params(&fields),
            Err(CoinApiError::UnsupportedStyle { .. })
        ));
    }

    #[test]
    fn test_json_query_field() {
        let fields = vec![Field::query("filter", Some(ParamValue::record([("a", 1)]))).json()];
        assert_eq!(get_query_params(&fields).unwrap(), pairs(&[("filter", r#"{"a":1}"#)]));
    }
}
