use cookiekit_core::{CookieDefinition, CookieError, CookieFactory, CookieRegistry, Cookies};
use cookiekit_jar::{CookieJar, HeaderSource, MemoryJar};
use cookiekit_schema::{JsonSchemaValidator, ValidationError, Validator};
use serde_json::{json, Value};

const THEME_SCHEMA: &str = r#"{
    "type": "object",
    "properties": { "theme": { "enum": ["light", "dark"] } },
    "required": ["theme"]
}"#;

fn factory() -> CookieFactory {
    CookieRegistry::builder()
        .define("pref", CookieDefinition::structured("ui"))
        .define("session", CookieDefinition::raw("auth"))
        .define(
            "theme",
            CookieDefinition::structured("ui")
                .with_validator(JsonSchemaValidator::from_json(THEME_SCHEMA).unwrap()),
        )
        .build()
        .into()
}

fn fresh() -> Cookies<MemoryJar> {
    factory().bind(MemoryJar::new())
}

#[test]
fn raw_string_round_trip_is_identity() {
    let mut cookies = fresh();
    for value in ["", "abc123", "with spaces; and=signs", "{\"looks\":\"json\"}", "ünïcödé"] {
        cookies.set("session", value).unwrap();
        assert_eq!(cookies.get("session").unwrap(), Some(json!(value)));
    }
}

#[test]
fn structured_round_trip_preserves_structure() {
    let mut cookies = fresh();
    let values = [
        json!({"theme": "dark"}),
        json!([1, "two", {"three": 3.5}]),
        json!("a plain string"),
        json!(null),
        json!(false),
        json!(-12),
    ];
    for value in values {
        cookies.set("pref", value.clone()).unwrap();
        assert_eq!(cookies.get("pref").unwrap(), Some(value));
    }
}

#[test]
fn validated_key_returns_validator_output() {
    let mut cookies = fresh();
    let value = json!({"theme": "light"});
    cookies.set("theme", value.clone()).unwrap();

    let validator = JsonSchemaValidator::from_json(THEME_SCHEMA).unwrap();
    assert_eq!(
        cookies.get("theme").unwrap(),
        Some(validator.parse(value).unwrap())
    );
}

#[test]
fn validated_key_failure_returns_no_value() {
    let mut cookies = fresh();
    cookies.set("theme", json!({"theme": "sepia"})).unwrap();

    let err = cookies.get("theme").unwrap_err();
    match &err {
        CookieError::Validation { key, source } => {
            assert_eq!(key, "theme");
            assert!(!source.diagnostics().is_empty());
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn absent_cookie_is_none_not_error() {
    let cookies = fresh();
    assert_eq!(cookies.get("pref").unwrap(), None);
    assert_eq!(cookies.get("theme").unwrap(), None);
}

#[test]
fn get_all_covers_exactly_the_registry() {
    let mut jar = MemoryJar::new();
    jar.set("unmanaged", "x").unwrap();
    jar.set("session", "abc123").unwrap();
    let cookies = factory().bind(jar);

    let values = cookies.get_all().unwrap();
    assert_eq!(
        values.keys().collect::<Vec<_>>(),
        vec!["pref", "session", "theme"]
    );
    assert!(!values.contains_key("unmanaged"));
    assert_eq!(values.get("session"), Some(&json!("abc123")));
    assert_eq!(values.get("pref"), None);
}

#[test]
fn get_all_aborts_on_first_failure() {
    let mut jar = MemoryJar::new();
    jar.set("session", "ok").unwrap();
    jar.set("pref", "{broken").unwrap();
    jar.set("theme", r#"{"theme":"sepia"}"#).unwrap();
    let cookies = factory().bind(jar);

    // pref is declared before theme, so its decode failure wins.
    assert!(matches!(
        cookies.get_all(),
        Err(CookieError::MalformedStoredValue { key, .. }) if key == "pref"
    ));
}

#[test]
fn size_counts_the_whole_jar() {
    let mut jar = MemoryJar::new();
    jar.set("a", "1").unwrap();
    jar.set("b", "2").unwrap();
    let mut cookies = factory().bind(jar);
    assert_eq!(cookies.size(), 2);

    cookies.set("session", "abc").unwrap();
    assert_eq!(cookies.size(), 3);

    cookies.delete("session").unwrap();
    assert_eq!(cookies.size(), 2);
}

#[test]
fn to_string_is_the_jar_serialization() {
    let mut jar = MemoryJar::new();
    jar.set("unmanaged", "x y").unwrap();
    let mut cookies = factory().bind(jar);
    cookies.set("pref", json!({"theme": "dark"})).unwrap();

    assert_eq!(cookies.to_string(), cookies.jar().serialize());
    assert_eq!(
        cookies.to_string(),
        "unmanaged=x%20y; pref=%7B%22theme%22%3A%22dark%22%7D"
    );

    let empty = CookieFactory::new(CookieRegistry::default()).bind(cookies.into_jar());
    assert_eq!(
        empty.to_string(),
        "unmanaged=x%20y; pref=%7B%22theme%22%3A%22dark%22%7D"
    );
}

#[test]
fn delete_is_idempotent() {
    let mut cookies = fresh();
    cookies.set("session", "abc").unwrap();

    cookies.delete("session").unwrap();
    cookies.delete("session").unwrap();
    assert!(!cookies.has("session").unwrap());
}

#[test]
fn raw_string_key_coerces_non_string_values() {
    let mut cookies = fresh();
    cookies.set("session", json!({"id": 7})).unwrap();

    assert_eq!(cookies.jar().get("session").as_deref(), Some(r#"{"id":7}"#));
    assert_eq!(cookies.get("session").unwrap(), Some(json!(r#"{"id":7}"#)));
}

#[tokio::test]
async fn pref_and_session_scenario() {
    let source = HeaderSource::new("");
    let mut cookies = factory().acquire(&source).await.unwrap();

    cookies.set("pref", json!({"theme": "dark"})).unwrap();
    assert_eq!(cookies.get("pref").unwrap(), Some(json!({"theme": "dark"})));

    cookies.set("session", "abc123").unwrap();
    assert_eq!(cookies.get("session").unwrap(), Some(json!("abc123")));

    assert!(matches!(
        cookies.has("missing"),
        Err(CookieError::UnknownKey(key)) if key == "missing"
    ));
}

#[tokio::test]
async fn corrupted_structured_cookie_scenario() {
    let source = HeaderSource::new("pref=%7Btheme%3Adark");
    let cookies = factory().acquire(&source).await.unwrap();

    assert!(matches!(
        cookies.get("pref"),
        Err(CookieError::MalformedStoredValue { key, .. }) if key == "pref"
    ));
    assert!(cookies.has("pref").unwrap());
}

#[tokio::test]
async fn request_scoped_accessors_are_independent() {
    let factory = factory();
    let first_source = HeaderSource::new("session=first");
    let second_source = HeaderSource::new("session=second");

    let mut first = factory.acquire(&first_source).await.unwrap();
    let second = factory.acquire(&second_source).await.unwrap();
    first.set("session", "changed").unwrap();

    assert_eq!(first.get("session").unwrap(), Some(json!("changed")));
    assert_eq!(second.get("session").unwrap(), Some(json!("second")));
}

#[tokio::test]
async fn unmanaged_cookies_pass_through_untouched() {
    let source = HeaderSource::new("tracker=%FF%FE; session=abc");
    let mut cookies = factory().acquire(&source).await.unwrap();
    assert_eq!(cookies.to_string(), "tracker=%FF%FE; session=abc");

    cookies.set("session", "def").unwrap();
    assert_eq!(cookies.to_string(), "tracker=%FF%FE; session=def");
}

#[tokio::test]
async fn oversized_unmanaged_cookie_does_not_block_reads() {
    let header = format!("tracker={}; session=abc", "{".repeat(2000));
    let source = HeaderSource::new(header);

    let cookies = factory().acquire(&source).await.unwrap();
    assert_eq!(cookies.get("session").unwrap(), Some(json!("abc")));
    assert_eq!(cookies.size(), 2);
}

struct Upper;

impl Validator for Upper {
    fn parse(&self, value: Value) -> Result<Value, ValidationError> {
        value
            .as_str()
            .map(|s| json!(s.to_uppercase()))
            .ok_or_else(|| ValidationError::new("expected string"))
    }
}

#[test]
fn custom_validator_applies_to_raw_strings() {
    let registry = CookieRegistry::builder()
        .define("lang", CookieDefinition::raw("i18n").with_validator(Upper))
        .build();
    let mut cookies = CookieFactory::new(registry).bind(MemoryJar::new());

    cookies.set("lang", "en-gb").unwrap();
    assert_eq!(cookies.get("lang").unwrap(), Some(json!("EN-GB")));
    assert_eq!(cookies.jar().get("lang").as_deref(), Some("en-gb"));
}
