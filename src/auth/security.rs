//! Security descriptors and the resolver that turns them into request
//! decorations.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::CoinApiError;
use crate::http::HttpRequest;

/// Authentication scheme family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeType {
    /// API key sent in a header or query parameter.
    ApiKey,
    /// HTTP authentication (`basic`, `bearer`, ...).
    Http,
    /// OAuth 2 access token.
    OAuth2,
    /// OpenID Connect token.
    OpenIdConnect,
}

/// Scheme sub-type: the placement for API keys, the flavour otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubType {
    Header,
    Query,
    Cookie,
    Basic,
    Bearer,
    Digest,
    ClientCredentials,
    Password,
    AuthorizationCode,
    Implicit,
    Unspecified,
}

/// Tag of a descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityTag {
    /// A union of alternative credential shapes; only the first populated
    /// option is applied.
    Option,
    /// An authentication scheme, optionally naming its target header or
    /// query parameter.
    Scheme {
        scheme_type: SchemeType,
        sub_type: SubType,
        field_name: Option<String>,
    },
    /// A member of a scheme record naming its target.
    Field { field_name: String },
}

/// Value of a descriptor field.
#[derive(Debug, Clone)]
pub enum SecurityValue {
    /// A credential.
    Secret(SecretString),
    /// Nested fields: scheme members or the schemes of an option.
    Record(Vec<SecurityField>),
}

/// One tagged field of a [`Security`] descriptor.
#[derive(Debug, Clone)]
pub struct SecurityField {
    pub tag: SecurityTag,
    /// Unset fields are skipped.
    pub value: Option<SecurityValue>,
}

impl SecurityField {
    /// A scheme holding a single credential.
    pub fn scheme(
        scheme_type: SchemeType,
        sub_type: SubType,
        field_name: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            tag: SecurityTag::Scheme {
                scheme_type,
                sub_type,
                field_name: Some(field_name.into()),
            },
            value: Some(SecurityValue::Secret(SecretString::from(secret.into()))),
        }
    }

    /// A scheme whose value is a record of named members.
    pub fn scheme_record(
        scheme_type: SchemeType,
        sub_type: SubType,
        members: Vec<SecurityField>,
    ) -> Self {
        Self {
            tag: SecurityTag::Scheme {
                scheme_type,
                sub_type,
                field_name: None,
            },
            value: Some(SecurityValue::Record(members)),
        }
    }

    /// A member of a scheme record.
    pub fn member(field_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            tag: SecurityTag::Field {
                field_name: field_name.into(),
            },
            value: Some(SecurityValue::Secret(SecretString::from(secret.into()))),
        }
    }

    /// A union of alternative schemes.
    pub fn option(schemes: Vec<SecurityField>) -> Self {
        Self {
            tag: SecurityTag::Option,
            value: Some(SecurityValue::Record(schemes)),
        }
    }

    fn target_name(&self) -> Option<&str> {
        match &self.tag {
            SecurityTag::Field { field_name }
            | SecurityTag::Scheme {
                field_name: Some(field_name),
                ..
            } => Some(field_name),
            _ => None,
        }
    }

    fn secret(&self) -> Option<&str> {
        match &self.value {
            Some(SecurityValue::Secret(secret)) => Some(secret.expose_secret()),
            _ => None,
        }
    }
}

/// A security descriptor: the tagged fields describing how a request
/// authenticates.
#[derive(Debug, Clone, Default)]
pub struct Security {
    pub fields: Vec<SecurityField>,
}

impl Security {
    /// A descriptor from explicit fields.
    pub fn new(fields: Vec<SecurityField>) -> Self {
        Self { fields }
    }

    /// An API key sent in the named header.
    pub fn api_key_header(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(vec![SecurityField::scheme(
            SchemeType::ApiKey,
            SubType::Header,
            header,
            key,
        )])
    }

    /// An API key sent as the named query parameter.
    pub fn api_key_query(param: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(vec![SecurityField::scheme(
            SchemeType::ApiKey,
            SubType::Query,
            param,
            key,
        )])
    }

    /// HTTP basic credentials laid out as two flat fields.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(vec![
            SecurityField::scheme(SchemeType::Http, SubType::Basic, "username", username),
            SecurityField::scheme(SchemeType::Http, SubType::Basic, "password", password),
        ])
    }

    /// An HTTP bearer token sent in `Authorization`.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(vec![SecurityField::scheme(
            SchemeType::Http,
            SubType::Bearer,
            "Authorization",
            token,
        )])
    }
}

/// Headers and query parameters injected into every outgoing request.
#[derive(Clone, Default)]
pub struct RequestDecorator {
    headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl RequestDecorator {
    /// Injected headers. Values are marked sensitive.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Injected query parameters.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Apply to a request.
    ///
    /// Headers overwrite same-named request headers; query parameters are
    /// appended next to the request's own.
    pub fn apply(&self, request: &mut HttpRequest) {
        for (name, value) in &self.headers {
            request.headers.insert(name.clone(), value.clone());
        }
        request.query.extend(self.query.iter().cloned());
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), CoinApiError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoinApiError::InvalidHeader(format!("{name}: {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| CoinApiError::InvalidHeader(format!("{}: {e}", name.as_str())))?;
        value.set_sensitive(true);
        self.headers.insert(name, value);
        Ok(())
    }

    fn set_query(&mut self, name: &str, value: &str) {
        match self.query.iter_mut().find(|(k, _)| k == name) {
            Some(existing) => existing.1 = value.to_string(),
            None => self.query.push((name.to_string(), value.to_string())),
        }
    }
}

impl std::fmt::Debug for RequestDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDecorator")
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("query", &self.query.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// Resolve a security descriptor into a [`RequestDecorator`].
///
/// Fields are evaluated in order. The first populated option field is applied
/// and ends resolution.
pub fn configure(security: Option<&Security>) -> Result<RequestDecorator, CoinApiError> {
    let mut decorator = RequestDecorator::default();
    let Some(security) = security else {
        return Ok(decorator);
    };

    for field in &security.fields {
        let Some(value) = &field.value else {
            continue;
        };
        match &field.tag {
            SecurityTag::Option => {
                if let SecurityValue::Record(options) = value {
                    apply_option(&mut decorator, options)?;
                }
                return Ok(decorator);
            }
            SecurityTag::Scheme {
                scheme_type: SchemeType::Http,
                sub_type: SubType::Basic,
                ..
            } if matches!(value, SecurityValue::Secret(_)) => {
                // Flat username/password fields live on the descriptor itself.
                apply_basic(&mut decorator, &security.fields)?;
            }
            SecurityTag::Scheme {
                scheme_type,
                sub_type,
                field_name,
            } => apply_scheme(
                &mut decorator,
                *scheme_type,
                *sub_type,
                field_name.as_deref(),
                value,
            )?,
            SecurityTag::Field { .. } => {}
        }
    }

    Ok(decorator)
}

fn apply_option(
    decorator: &mut RequestDecorator,
    options: &[SecurityField],
) -> Result<(), CoinApiError> {
    for option in options {
        let (
            SecurityTag::Scheme {
                scheme_type,
                sub_type,
                field_name,
            },
            Some(value),
        ) = (&option.tag, &option.value)
        else {
            continue;
        };
        apply_scheme(decorator, *scheme_type, *sub_type, field_name.as_deref(), value)?;
    }
    Ok(())
}

fn apply_scheme(
    decorator: &mut RequestDecorator,
    scheme_type: SchemeType,
    sub_type: SubType,
    field_name: Option<&str>,
    value: &SecurityValue,
) -> Result<(), CoinApiError> {
    match value {
        SecurityValue::Record(members)
            if scheme_type == SchemeType::Http && sub_type == SubType::Basic =>
        {
            apply_basic(decorator, members)
        }
        SecurityValue::Record(members) => {
            for member in members {
                if let (Some(name), Some(secret)) = (member.target_name(), member.secret()) {
                    apply_value(decorator, scheme_type, sub_type, name, secret)?;
                }
            }
            Ok(())
        }
        SecurityValue::Secret(secret) => match field_name {
            Some(name) => {
                apply_value(decorator, scheme_type, sub_type, name, secret.expose_secret())
            }
            None => Ok(()),
        },
    }
}

fn apply_value(
    decorator: &mut RequestDecorator,
    scheme_type: SchemeType,
    sub_type: SubType,
    name: &str,
    value: &str,
) -> Result<(), CoinApiError> {
    match (scheme_type, sub_type) {
        (SchemeType::ApiKey, SubType::Header) => decorator.set_header(name, value),
        (SchemeType::ApiKey, SubType::Query) => {
            decorator.set_query(name, value);
            Ok(())
        }
        // Client-credentials tokens are obtained out of band.
        (SchemeType::OAuth2, SubType::ClientCredentials) => Ok(()),
        (SchemeType::OAuth2, _)
        | (SchemeType::OpenIdConnect, _)
        | (SchemeType::Http, SubType::Bearer) => decorator.set_header(name, &bearer(value)),
        _ => Err(CoinApiError::UnsupportedSecurityScheme {
            scheme_type,
            sub_type,
        }),
    }
}

fn apply_basic(
    decorator: &mut RequestDecorator,
    fields: &[SecurityField],
) -> Result<(), CoinApiError> {
    let mut username = "";
    let mut password = "";

    for field in fields {
        match (field.target_name(), field.secret()) {
            (Some("username"), Some(secret)) => username = secret,
            (Some("password"), Some(secret)) => password = secret,
            _ => {}
        }
    }

    let encoded = BASE64.encode(format!("{username}:{password}"));
    decorator.set_header("Authorization", &format!("Basic {encoded}"))
}

fn bearer(token: &str) -> String {
    let prefixed = token
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "));
    if prefixed {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;

    fn header<'a>(decorator: &'a RequestDecorator, name: &str) -> &'a str {
        decorator.headers()[name].to_str().unwrap()
    }

    #[test]
    fn test_api_key_header() {
        let security = Security::api_key_header("X-CoinAPI-Key", "secret123");
        let decorator = configure(Some(&security)).unwrap();
        assert_eq!(header(&decorator, "X-CoinAPI-Key"), "secret123");
        assert!(decorator.headers()["X-CoinAPI-Key"].is_sensitive());
        assert!(decorator.query().is_empty());
    }

    #[test]
    fn test_api_key_query() {
        let security = Security::api_key_query("apikey", "secret123");
        let decorator = configure(Some(&security)).unwrap();
        assert_eq!(decorator.query(), &[("apikey".to_string(), "secret123".to_string())]);
    }

    #[test]
    fn test_basic_auth_flat_fields() {
        let decorator = configure(Some(&Security::basic("user", "pass"))).unwrap();
        assert_eq!(header(&decorator, "Authorization"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_basic_auth_nested_record() {
        let security = Security::new(vec![SecurityField::scheme_record(
            SchemeType::Http,
            SubType::Basic,
            vec![
                SecurityField::member("username", "user"),
                SecurityField::member("password", "pass"),
            ],
        )]);
        let decorator = configure(Some(&security)).unwrap();
        assert_eq!(header(&decorator, "Authorization"), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_bearer_is_not_double_prefixed() {
        let decorator = configure(Some(&Security::bearer("abc"))).unwrap();
        assert_eq!(header(&decorator, "Authorization"), "Bearer abc");

        let decorator = configure(Some(&Security::bearer("BEARER abc"))).unwrap();
        assert_eq!(header(&decorator, "Authorization"), "BEARER abc");
    }

    #[test]
    fn test_oauth2_and_openid() {
        let security = Security::new(vec![
            SecurityField::scheme(
                SchemeType::OAuth2,
                SubType::AuthorizationCode,
                "Authorization",
                "tok",
            ),
            SecurityField::scheme(
                SchemeType::OpenIdConnect,
                SubType::Unspecified,
                "X-Id-Token",
                "id",
            ),
        ]);
        let decorator = configure(Some(&security)).unwrap();
        assert_eq!(header(&decorator, "Authorization"), "Bearer tok");
        assert_eq!(header(&decorator, "X-Id-Token"), "Bearer id");
    }

    #[test]
    fn test_oauth2_client_credentials_is_skipped() {
        let security = Security::new(vec![SecurityField::scheme(
            SchemeType::OAuth2,
            SubType::ClientCredentials,
            "Authorization",
            "tok",
        )]);
        let decorator = configure(Some(&security)).unwrap();
        assert!(decorator.headers().is_empty());
    }

    #[test]
    fn test_unsupported_scheme() {
        let security = Security::new(vec![SecurityField::scheme(
            SchemeType::ApiKey,
            SubType::Cookie,
            "session",
            "tok",
        )]);
        let err = configure(Some(&security)).unwrap_err();
        assert!(matches!(
            err,
            CoinApiError::UnsupportedSecurityScheme {
                scheme_type: SchemeType::ApiKey,
                sub_type: SubType::Cookie,
            }
        ));
    }

    #[test]
    fn test_first_option_short_circuits() {
        let security = Security::new(vec![
            SecurityField {
                tag: SecurityTag::Option,
                value: None,
            },
            SecurityField::option(vec![SecurityField::scheme(
                SchemeType::ApiKey,
                SubType::Header,
                "X-CoinAPI-Key",
                "from-option",
            )]),
            SecurityField::scheme(SchemeType::ApiKey, SubType::Header, "X-Other", "never"),
        ]);
        let decorator = configure(Some(&security)).unwrap();
        assert_eq!(header(&decorator, "X-CoinAPI-Key"), "from-option");
        assert!(decorator.headers().get("X-Other").is_none());
    }

    #[test]
    fn test_injected_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("X-CoinAPI-Key", HeaderValue::from_static("caller"));
        let mut request = HttpRequest {
            method: Method::GET,
            url: "https://rest.coinapi.io/v1/assets".to_string(),
            query: vec![("apikey".to_string(), "caller".to_string())],
            headers,
            body: None,
        };

        let mut security = Security::api_key_header("X-CoinAPI-Key", "injected");
        security
            .fields
            .push(SecurityField::scheme(SchemeType::ApiKey, SubType::Query, "apikey", "injected"));
        configure(Some(&security)).unwrap().apply(&mut request);

        assert_eq!(request.headers["X-CoinAPI-Key"], "injected");
        assert_eq!(request.headers.get_all("X-CoinAPI-Key").iter().count(), 1);
        assert_eq!(
            request.query,
            vec![
                ("apikey".to_string(), "caller".to_string()),
                ("apikey".to_string(), "injected".to_string()),
            ]
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let security = Security::api_key_header("X-CoinAPI-Key", "secret123");
        let decorator = configure(Some(&security)).unwrap();
        let debug = format!("{decorator:?}");
        assert!(debug.contains("x-coinapi-key"));
        assert!(!debug.contains("secret123"));
        assert!(!format!("{:?}", Security::basic("user", "pass")).contains("pass\""));
    }
}
