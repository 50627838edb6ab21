use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pretty_assertions::assert_eq;
use velto::{
    convert, parse_markup, AttrClass, BehaviorRegistry, HookPoint, HostDocument, Level,
    MemorySink, OutputElement, RenderConfig, RuntimeContext, StaticLoader, VeltoError, ROOT_TAG,
};

fn ctx_with_sink() -> (RuntimeContext, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let ctx = RuntimeContext::with_sink(sink.clone());
    (ctx, sink)
}

fn mounted_host(ctx: &RuntimeContext, sink: Arc<MemorySink>, source: &str) -> HostDocument {
    let tree = parse_markup(source).expect("markup should parse");
    let root = tree.find_element(ROOT_TAG).expect("root should exist");
    let dom = convert(ctx, root);
    let mut host = HostDocument::with_mount(sink, "app");
    host.mount("#app", dom).expect("mount should exist");
    host
}

// Registry order and classification

#[test]
fn test_builtin_registry_order_is_documented_contract() {
    let registry = BehaviorRegistry::builtin();
    let prefixes: Vec<&str> = registry.prefixes().collect();
    assert_eq!(
        prefixes,
        vec![
            "on-click:redirect",
            "on-click:alert",
            "on-click:log",
            "on-click:toggle",
            "on-input:log",
        ]
    );
}

#[test]
fn test_classify_matches_registered_prefix() {
    let registry = BehaviorRegistry::builtin();
    assert_eq!(registry.classify("on-click:alert"), AttrClass::Behavior(1));
    assert_eq!(registry.classify("on-input:log"), AttrClass::Behavior(4));
}

#[test]
fn test_classify_reserved_namespace() {
    let registry = BehaviorRegistry::builtin();
    assert_eq!(
        registry.classify("on-hover:zoom"),
        AttrClass::ReservedPassthrough
    );
    assert_eq!(
        registry.classify("data:role"),
        AttrClass::ReservedPassthrough
    );
}

#[test]
fn test_classify_plain_name() {
    let registry = BehaviorRegistry::builtin();
    assert_eq!(registry.classify("title"), AttrClass::PlainPassthrough);
}

#[test]
fn test_first_match_wins_with_shadowing_prefix() {
    let (ctx, sink) = ctx_with_sink();
    let mut registry = BehaviorRegistry::empty();
    registry
        .register(
            "on-click",
            Box::new(|el, _| el.set_attribute("matched", "broad")),
        )
        .unwrap();
    registry
        .register(
            "on-click:alert",
            Box::new(|el, _| el.set_attribute("matched", "specific")),
        )
        .unwrap();

    let mut element = OutputElement::new("button");
    registry.apply(&ctx.config, sink.as_ref(), &mut element, "on-click:alert", "x");

    // The broader prefix registered first swallows the specific one.
    assert_eq!(element.attribute("matched"), Some("broad"));
    assert!(!element.has_attribute("on-click:alert"));
}

#[test]
fn test_exactly_one_handler_fires() {
    let (ctx, sink) = ctx_with_sink();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let mut registry = BehaviorRegistry::empty();
    let counter = first.clone();
    registry
        .register(
            "on-click:alert",
            Box::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
    let counter = second.clone();
    registry
        .register(
            "on-click",
            Box::new(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    let mut element = OutputElement::new("button");
    registry.apply(&ctx.config, sink.as_ref(), &mut element, "on-click:alert", "x");

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

#[test]
fn test_register_rejects_malformed_prefix() {
    let mut registry = BehaviorRegistry::empty();
    for prefix in ["On-Click:Alert", "on click", "on-click:", ":alert", ""] {
        let result = registry.register(prefix, Box::new(|_, _| {}));
        assert!(
            matches!(result, Err(VeltoError::InvalidBehaviorPrefix { .. })),
            "prefix '{}' should be rejected",
            prefix
        );
    }
    assert!(registry.is_empty());
}

#[test]
fn test_custom_behavior_receives_value() {
    let (mut ctx, sink) = ctx_with_sink();
    ctx.behaviors
        .register(
            "x-mark",
            Box::new(|el, value| el.set_attribute("marked", value)),
        )
        .unwrap();

    let tree = parse_markup(r#"<velto><content x-mark="yes"/></velto>"#).unwrap();
    let root = tree.find_element(ROOT_TAG).unwrap();
    let node = convert(&ctx, root);

    let content = node.as_element().unwrap().children[0].as_element().unwrap();
    assert_eq!(content.attribute("marked"), Some("yes"));
    assert!(!content.has_attribute("x-mark"));
    assert_eq!(sink.count(Level::Warn), 0);
}

// Event dispatch through the host document

#[test]
fn test_click_alert_surfaces_message() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(
        &ctx,
        sink,
        r#"<velto><button on-click:alert="Hello">Go</button></velto>"#,
    );

    assert!(host.click("button"));
    assert_eq!(host.alerts, vec!["Hello".to_string()]);
    assert_eq!(host.location, None);
}

#[test]
fn test_click_redirect_navigates_host() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(
        &ctx,
        sink,
        r#"<velto><button on-click:redirect="https://example.com">Go</button></velto>"#,
    );

    assert!(host.click("button"));
    assert_eq!(host.location.as_deref(), Some("https://example.com"));
    assert!(host.alerts.is_empty());
}

#[test]
fn test_click_log_reports_through_sink() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(
        &ctx,
        sink.clone(),
        r#"<velto><button on-click:log="visited">Go</button></velto>"#,
    );

    assert!(host.click("button"));
    let infos = sink.messages(Level::Info);
    assert_eq!(infos, vec!["visited".to_string()]);
}

#[test]
fn test_toggle_visibility_roundtrip() {
    let (ctx, sink) = ctx_with_sink();
    let source = r##"<velto><button on-click:toggle="#details">Go</button><content id="details"><text1>hi</text1></content></velto>"##;
    let mut host = mounted_host(&ctx, sink, source);

    assert!(host.query("#details").unwrap().visible);
    host.click("button");
    assert!(!host.query("#details").unwrap().visible);
    host.click("button");
    assert!(host.query("#details").unwrap().visible);
}

#[test]
fn test_toggle_with_unmatched_selector_is_silent() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(
        &ctx,
        sink.clone(),
        r##"<velto><button on-click:toggle="#ghost">Go</button></velto>"##,
    );

    assert!(host.click("button"));
    assert!(host.alerts.is_empty());
    assert_eq!(sink.count(Level::Error), 0);
}

#[test]
fn test_input_logging_reports_label_and_value() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(
        &ctx,
        sink.clone(),
        r#"<velto><content id="search-box" on-input:log="search"/></velto>"#,
    );

    assert!(host.input("#search-box", "abc"));
    assert_eq!(host.query("#search-box").unwrap().attribute("value"), Some("abc"));

    let records = sink.records();
    let logged = records
        .iter()
        .find(|d| d.level == Level::Info)
        .expect("input should be logged");
    assert_eq!(logged.message, "abc");
    assert_eq!(
        logged.context,
        vec![("label".to_string(), "search".to_string())]
    );
}

#[test]
fn test_dispatch_unknown_selector_returns_false() {
    let (ctx, sink) = ctx_with_sink();
    let mut host = mounted_host(&ctx, sink, "<velto><text1>hi</text1></velto>");
    assert!(!host.click("#missing"));
    assert!(!host.input("#missing", "x"));
}

#[test]
fn test_query_by_id_class_and_kind() {
    let (ctx, sink) = ctx_with_sink();
    let source =
        r#"<velto><content id="panel" class="wide main"><button>Go</button></content></velto>"#;
    let host = mounted_host(&ctx, sink, source);

    assert!(host.query("#panel").is_some());
    assert!(host.query(".main").is_some());
    assert!(host.query(".wide").is_some());
    assert_eq!(host.query("button").unwrap().kind, "button");
    assert!(host.query("#nope").is_none());
    assert!(host.query(".nope").is_none());
}

// Lifecycle hooks: registration surface only, never invoked

#[tokio::test]
async fn test_hooks_register_but_never_fire() {
    let (mut ctx, sink) = ctx_with_sink();
    let fired = Arc::new(AtomicUsize::new(0));
    for point in [
        HookPoint::ElementCreated,
        HookPoint::AttributeApplied,
        HookPoint::RenderComplete,
    ] {
        let counter = fired.clone();
        ctx.hooks.on(point, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(ctx.hooks.registered(point), 1);
    }

    let mut loader = StaticLoader::new();
    loader.insert(
        "page.velto",
        r#"<velto><button on-click:alert="hi" title="t">Go</button></velto>"#,
    );
    let mut host = HostDocument::with_mount(sink, "app");
    ctx.render(&loader, "page.velto", &mut host, "#app").await.unwrap();
    host.click("button");

    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

// Config interaction with dispatch

#[test]
fn test_passthrough_unaffected_by_warning_config() {
    let sink = Arc::new(MemorySink::default());
    let registry = BehaviorRegistry::builtin();

    for warn in [true, false] {
        let config = RenderConfig {
            warn_unknown_attributes: warn,
            ..RenderConfig::default()
        };
        let mut element = OutputElement::new("div");
        registry.apply(&config, sink.as_ref(), &mut element, "title", "hi");
        assert_eq!(element.attribute("title"), Some("hi"));
    }
    assert_eq!(sink.count(Level::Warn), 1);
}
