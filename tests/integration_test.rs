use metrics::{Key, Label, SharedString, Unit};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use metrics_util::{CompositeKey, MetricKind};
use rayon::prelude::*;
use siito_validation::{
    authorize, compute_check_digit, landing_path, validate_identity, Access, AdminArea, Advisor,
    AdvisorConfig, CurrentUser, FaqEntry, Field, FormConfig, InMemorySession, KeywordRule, Labels,
    MemoryStore, RegistrationForm, ResponseSource, Role, Run, SessionProvider, StaticFaqs,
    StoredSession, UserForm, ValidationStatus,
};
use std::collections::HashMap;
use std::sync::Arc;

type Snapshot = HashMap<CompositeKey, (Option<Unit>, Option<SharedString>, DebugValue)>;

fn counter_value(
    snapshot: &Snapshot,
    name: &'static str,
    labels: &[(&'static str, &'static str)],
) -> Option<DebugValue> {
    let key = Key::from_parts(
        name,
        labels
            .iter()
            .map(|(key, value)| Label::new(*key, *value))
            .collect::<Vec<_>>(),
    );
    snapshot
        .get(&CompositeKey::new(MetricKind::Counter, key))
        .map(|(_, _, value)| match value {
            // DebugValue does not implement Clone in metrics-util 0.18
            DebugValue::Counter(v) => DebugValue::Counter(*v),
            DebugValue::Gauge(v) => DebugValue::Gauge(*v),
            DebugValue::Histogram(v) => DebugValue::Histogram(v.clone()),
        })
}

fn faq(id: u64, pregunta: &str, respuesta: &str) -> FaqEntry {
    FaqEntry {
        id,
        pregunta: pregunta.to_string(),
        respuesta: respuesta.to_string(),
    }
}

#[test]
fn identity_examples() {
    assert_eq!(validate_identity("").status, ValidationStatus::Empty);
    assert_eq!(
        validate_identity("1234567").status,
        ValidationStatus::InvalidFormat
    );
    assert_eq!(
        validate_identity("ABCDEFGH-K").status,
        ValidationStatus::InvalidFormat
    );
    assert_eq!(validate_identity("12345678-5").status, ValidationStatus::Valid);
    assert_eq!(
        validate_identity("12345678k").status,
        validate_identity("12345678K").status
    );
    assert_eq!(
        validate_identity("12.345.678-5").normalized.as_deref(),
        Some("123456785")
    );
}

#[test]
fn every_wrong_check_character_is_a_checksum_failure() {
    let expected = compute_check_digit("12345678").unwrap();
    for check in "0123456789K".chars().filter(|c| *c != expected) {
        let raw = format!("12345678-{check}");
        assert_eq!(
            validate_identity(&raw).status,
            ValidationStatus::InvalidChecksum,
            "{raw}"
        );
    }
}

#[test]
fn concurrent_validation_is_deterministic() {
    let inputs: Vec<String> = (1_000_000u32..1_002_000)
        .map(|body| format!("{body}-{}", body % 10))
        .collect();

    let sequential: Vec<_> = inputs.iter().map(|raw| validate_identity(raw)).collect();
    let parallel: Vec<_> = inputs.par_iter().map(|raw| validate_identity(raw)).collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn run_values_survive_json() {
    let run: Run = "1.234.567-4".parse().unwrap();
    let json = serde_json::to_string(&run).unwrap();
    assert_eq!(json, r#""12345674""#);
    assert_eq!(serde_json::from_str::<Run>(&json).unwrap(), run);
    assert!(serde_json::from_str::<Run>(r#""12345670""#).is_err());
}

#[test]
fn registration_then_admin_access() {
    let form = RegistrationForm {
        run: "11.111.112-k".to_string(),
        correo: "owner@gmail.com".to_string(),
        password: "secret".to_string(),
        confirm_password: "secret".to_string(),
        nombres: "Rosa".to_string(),
        apellidos: "Díaz".to_string(),
        direccion: "Calle 1".to_string(),
        region_id: Some(13),
        comuna_id: Some(7),
        telefono: String::new(),
    };
    let payload = form.validate(&FormConfig::default()).unwrap();
    assert_eq!(payload.run, "11111112K");

    // the backend answers with the created user
    let user = CurrentUser {
        id: 10,
        nombres: payload.nombres,
        apellidos: payload.apellidos,
        correo: payload.correo,
        rol: Role::Cliente,
    };
    let session = StoredSession::new(MemoryStore::new());
    session.set(user.clone());

    assert_eq!(landing_path(user.rol), "/");
    assert_eq!(authorize(&session, AdminArea::Dashboard), Access::Redirect("/"));

    session.clear();
    assert_eq!(
        authorize(&session, AdminArea::Users),
        Access::Redirect("/login")
    );
}

#[test]
fn should_submit_form_metrics() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let config = FormConfig::new().labels(Labels::new(&[("app", "store")]));
        let form = UserForm {
            run: "12.345.678-6".to_string(),
            ..UserForm::default()
        };
        let errors = form.validate(&config).unwrap_err();
        assert!(errors.get(Field::Run).is_some());
    });

    let snapshot = snapshotter.snapshot().into_hashmap();

    let key = Key::from_parts(
        "identity.validations",
        vec![
            Label::new("app", "store"),
            Label::new("form", "user_administration"),
            Label::new("status", "INVALID_CHECKSUM"),
        ],
    );
    let metric_value = snapshot
        .get(&CompositeKey::new(MetricKind::Counter, key))
        .expect("metric not found");
    assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));

    let key = Key::from_parts(
        "form.submissions",
        vec![
            Label::new("app", "store"),
            Label::new("form", "user_administration"),
            Label::new("outcome", "rejected"),
        ],
    );
    let metric_value = snapshot
        .get(&CompositeKey::new(MetricKind::Counter, key))
        .expect("metric not found");
    assert_eq!(metric_value, &(None, None, DebugValue::Counter(1)));
}

#[test]
fn should_count_session_changes() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let session = InMemorySession::new();
        session.set(CurrentUser {
            id: 1,
            nombres: "Ana".to_string(),
            apellidos: "Rojas".to_string(),
            correo: "ana@duoc.cl".to_string(),
            rol: Role::Admin,
        });
        session.clear();
        session.clear();
    });

    let snapshot = snapshotter.snapshot().into_hashmap();
    assert_eq!(
        counter_value(&snapshot, "session.changes", &[("event", "signed_in")]),
        Some(DebugValue::Counter(1))
    );
    assert_eq!(
        counter_value(&snapshot, "session.changes", &[("event", "signed_out")]),
        Some(DebugValue::Counter(2))
    );
}

#[test]
fn should_count_advisor_responses_by_source() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let config = AdvisorConfig::new("hello", "ask a person")
            .rule(KeywordRule::new(&["boleta"], "receipts"))
            .labels(Labels::new(&[("app", "store")]));
        let search = StaticFaqs(vec![faq(1, "¿Cuándo vence el F29?", "day 20")]);
        let mut advisor = Advisor::new(config, Arc::new(search)).unwrap();
        advisor.load_faqs(vec![faq(2, "¿Qué es el PPM?", "monthly prepayment")]);

        let sources: Vec<_> = ["vence el f29", "qué es el ppm", "emitir boleta", "hola"]
            .iter()
            .map(|question| advisor.respond(question).unwrap().source)
            .collect();
        assert_eq!(
            sources,
            vec![
                ResponseSource::FaqSearch,
                ResponseSource::LoadedFaq,
                ResponseSource::KeywordRule,
                ResponseSource::Fallback
            ]
        );
        // blank questions are not answered and not counted
        assert_eq!(advisor.respond("  "), None);
    });

    let snapshot = snapshotter.snapshot().into_hashmap();
    for source in ["faq_search", "loaded_faq", "keyword_rule", "fallback"] {
        assert_eq!(
            counter_value(
                &snapshot,
                "advisor.responses",
                &[("app", "store"), ("source", source)]
            ),
            Some(DebugValue::Counter(1)),
            "{source}"
        );
    }
}
