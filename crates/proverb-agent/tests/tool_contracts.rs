//! Tool contracts in demo mode (no provider credentials).

use agent_core::{AgentEvent, ToolCall, ToolRegistry};
use proverb_agent::{toolkit, ProverbState, Providers};
use serde_json::json;

fn demo_state() -> ProverbState {
    ProverbState::new(Providers::demo())
}

async fn call(
    registry: &ToolRegistry<ProverbState>,
    state: &mut ProverbState,
    call: ToolCall,
) -> serde_json::Value {
    let result = registry
        .execute(state, &call)
        .await
        .unwrap_or_else(|e| panic!("{} failed: {e}", call.name));
    result.data.unwrap_or_else(|| json!(result.output))
}

fn proverbs_call(name: &str, proverbs: &[&str]) -> ToolCall {
    ToolCall::new(name).with_arg("proverbs", json!(proverbs))
}

#[tokio::test]
async fn set_then_get_returns_same_list() {
    let registry = toolkit();
    let cases: [&[&str]; 3] = [
        &[],
        &["Actions speak louder than words"],
        &["b", "a", "b", ""],
    ];

    for proverbs in cases {
        let mut state = demo_state().with_proverbs(vec!["stale".into()]);
        call(&registry, &mut state, proverbs_call("set_proverbs", proverbs)).await;
        let listed = call(&registry, &mut state, ToolCall::new("get_proverbs")).await;
        assert_eq!(listed, json!(proverbs));
    }
}

#[tokio::test]
async fn add_twice_concatenates() {
    let registry = toolkit();
    let mut state = demo_state();

    call(&registry, &mut state, proverbs_call("add_proverbs", &["a", "b"])).await;
    let snapshot = call(&registry, &mut state, proverbs_call("add_proverbs", &["b", "c"])).await;
    assert_eq!(snapshot, json!({"proverbs": ["a", "b", "b", "c"]}));

    let listed = call(&registry, &mut state, ToolCall::new("get_proverbs")).await;
    assert_eq!(listed, json!(["a", "b", "b", "c"]));
}

#[tokio::test]
async fn mutations_emit_snapshot_events() {
    let registry = toolkit();
    let mut state = demo_state();

    let result = registry
        .execute(&mut state, &proverbs_call("set_proverbs", &["x"]))
        .await
        .unwrap();

    match result.events.as_slice() {
        [AgentEvent::StateSnapshot { snapshot }] => {
            assert_eq!(snapshot, &json!({"proverbs": ["x"]}));
        }
        other => panic!("expected one snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn demo_location_ignores_input() {
    let registry = toolkit();
    let mut state = demo_state();

    for place in ["Tokyo", "nowhere at all"] {
        let point = call(
            &registry,
            &mut state,
            ToolCall::new("get_lat_lng").with_arg("location_description", json!(place)),
        )
        .await;
        assert_eq!(point, json!({"lat": 51.1, "lng": -0.1}));
    }
}

#[tokio::test]
async fn demo_weather_is_fixed() {
    let registry = toolkit();
    let mut state = demo_state();

    let report = call(
        &registry,
        &mut state,
        ToolCall::new("get_weather")
            .with_arg("lat", json!(123.0))
            .with_arg("lng", json!(-999.0)),
    )
    .await;
    assert_eq!(report, json!({"temperature": "21°C", "description": "Sunny"}));
}

#[tokio::test]
async fn demo_search_is_empty() {
    let registry = toolkit();
    let mut state = demo_state();

    let results = call(
        &registry,
        &mut state,
        ToolCall::new("search").with_arg("query", json!("proverbs")),
    )
    .await;
    assert_eq!(results, json!([]));
}

#[tokio::test]
async fn current_date_format() {
    let registry = toolkit();
    let mut state = demo_state();

    let result = registry
        .execute(&mut state, &ToolCall::new("get_current_date"))
        .await
        .unwrap();

    let bytes = result.output.as_bytes();
    assert_eq!(bytes.len(), 19, "{}", result.output);
    assert_eq!(
        (bytes[4], bytes[7], bytes[10], bytes[13], bytes[16]),
        (b'-', b'-', b' ', b':', b':')
    );
}

#[tokio::test]
async fn concurrent_states_are_independent() {
    let registry = toolkit();

    let run = |proverb: &'static str| {
        let registry = &registry;
        async move {
            let mut state = demo_state();
            for _ in 0..3 {
                registry
                    .execute(&mut state, &proverbs_call("add_proverbs", &[proverb]))
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
            state.proverbs().to_vec()
        }
    };

    let (first, second) = tokio::join!(run("first"), run("second"));
    assert_eq!(first, ["first"; 3]);
    assert_eq!(second, ["second"; 3]);
}

#[tokio::test]
async fn missing_argument_is_model_recoverable() {
    let registry = toolkit();
    let mut state = demo_state();

    let err = registry
        .execute(&mut state, &ToolCall::new("get_weather").with_arg("lat", json!(1.0)))
        .await
        .unwrap_err();
    assert!(err.is_model_recoverable());
}
