use scribe_engine::config::SelectorConfig;
use scribe_engine::dom::{DomNode, HtmlPage};
use scribe_engine::selector::{SelectorEngine, SelectorStrategy};

fn resolve(html: &str, css: &str) -> Option<String> {
    let page = HtmlPage::parse(html);
    let node = page.query(css).unwrap().expect("target element");
    SelectorEngine::default().resolve(&node)
}

fn strategy(html: &str, css: &str) -> SelectorStrategy {
    let page = HtmlPage::parse(html);
    let node = page.query(css).unwrap().expect("target element");
    SelectorEngine::default()
        .resolve_with_strategy(&node)
        .expect("resolvable")
        .strategy
}

#[test]
fn test_id_wins_exactly() {
    let html = r#"<body><input id="email" name="email" data-testid="e" class="field"></body>"#;
    assert_eq!(resolve(html, "input").as_deref(), Some("#email"));
    assert_eq!(strategy(html, "input"), SelectorStrategy::Id);
}

#[test]
fn test_escaped_ids_select_their_element() {
    for (id, expected) in [("-1", r"#-\31 "), ("1col", r"#\31 col"), ("a.b", r"#a\.b")] {
        let html = format!(r#"<body><div id="{id}"></div><div></div></body>"#);
        let page = HtmlPage::parse(&html);
        let node = page.query("div").unwrap().unwrap();

        let selector = SelectorEngine::default().resolve(&node).unwrap();
        assert_eq!(selector, expected);
        let found = page.query(&selector).unwrap().expect("selector finds its element");
        assert_eq!(found.attribute("id").as_deref(), Some(id));
    }
}

#[test]
fn test_id_with_whitespace_is_skipped() {
    let html = r#"<body><div id="main panel" data-testid="panel"></div></body>"#;
    assert_eq!(resolve(html, "div").as_deref(), Some(r#"[data-testid="panel"]"#));
}

#[test]
fn test_stable_attributes_in_priority_order() {
    let html = r#"<body><button data-cy="cy-save" data-testid="save">Save</button></body>"#;
    assert_eq!(resolve(html, "button").as_deref(), Some(r#"[data-testid="save"]"#));

    let html = r#"<body><button data-qa="qa-save">Save</button></body>"#;
    assert_eq!(resolve(html, "button").as_deref(), Some(r#"[data-qa="qa-save"]"#));
}

#[test]
fn test_name_attribute() {
    let html = r#"<body><form><input name="q" class="search"></form></body>"#;
    assert_eq!(resolve(html, "input").as_deref(), Some(r#"input[name="q"]"#));
    assert_eq!(strategy(html, "input"), SelectorStrategy::Name);
}

#[test]
fn test_button_text_is_normalized() {
    let html = "<body><button>\n   Sign    in  </button></body>";
    assert_eq!(resolve(html, "button").as_deref(), Some("text=Sign in"));
}

#[test]
fn test_link_text_is_truncated() {
    let html = "<body><a href=\"/docs\">Read the complete getting started guide today</a></body>";
    assert_eq!(
        resolve(html, "a").as_deref(),
        Some("text=Read the complete getting star")
    );
}

#[test]
fn test_role_link_uses_text() {
    let html = r#"<body><span role="link" class="nav-item">Docs</span></body>"#;
    assert_eq!(resolve(html, "span").as_deref(), Some("text=Docs"));
}

#[test]
fn test_aria_label_is_escaped() {
    let html = r#"<body><input aria-label='Say "hi"'></body>"#;
    assert_eq!(
        resolve(html, "input").as_deref(),
        Some(r#"[aria-label="Say \"hi\""]"#)
    );
}

#[test]
fn test_dynamic_classes_are_dropped() {
    let html = r#"<body><i class="icon a1b2c3 btn__glyph x"></i></body>"#;
    assert_eq!(resolve(html, "i").as_deref(), Some(".icon"));
    assert_eq!(strategy(html, "i"), SelectorStrategy::Classes);
}

#[test]
fn test_class_below_match_limit_is_accepted() {
    let html = r#"<body><main>
        <div class="tile"></div><div class="tile"></div>
        <div class="tile"></div><div class="tile"></div>
    </main></body>"#;
    assert_eq!(resolve(html, "div").as_deref(), Some(".tile"));
}

#[test]
fn test_class_matching_five_elements_falls_through() {
    let html = r#"<body><main>
        <div class="tile"></div><div class="tile"></div>
        <div class="tile"></div><div class="tile"></div>
        <div class="tile"></div>
    </main></body>"#;
    let page = HtmlPage::parse(html);
    let third = page.query_all("div.tile").unwrap()[2];

    let resolved = SelectorEngine::default().resolve_with_strategy(&third).unwrap();
    assert_eq!(resolved.strategy, SelectorStrategy::Structural);
    assert_eq!(resolved.selector, "body > main > div:nth-of-type(3)");
}

#[test]
fn test_shared_class_with_text_falls_back_to_text() {
    let html = r#"<body><ul>
        <li class="item">Alpha</li><li class="item">Beta</li><li class="item">Gamma</li>
        <li class="item">Delta</li><li class="item">Epsilon</li>
    </ul></body>"#;
    let page = HtmlPage::parse(html);
    let gamma = page.query_all("li").unwrap()[2];
    assert_eq!(
        SelectorEngine::default().resolve(&gamma).as_deref(),
        Some("text=Gamma")
    );
}

#[test]
fn test_featureless_node_gets_structural_path() {
    let html = "<body><div><div></div><div><span></span></div></div></body>";
    let selector = resolve(html, "span").expect("structural path is never empty");
    assert_eq!(selector, "body > div > div:nth-of-type(2) > span");
}

#[test]
fn test_only_child_has_no_position() {
    let html = "<body><section><canvas></canvas></section></body>";
    assert_eq!(resolve(html, "canvas").as_deref(), Some("body > section > canvas"));
}

#[test]
fn test_document_root_is_unresolvable() {
    let page = HtmlPage::parse("<html><body></body></html>");
    assert_eq!(SelectorEngine::default().resolve(&page.root()), None);
}

#[test]
fn test_resolution_is_deterministic() {
    let html = "<body><div><p></p><p><em></em></p></div></body>";
    let page = HtmlPage::parse(html);
    let node = page.query("em").unwrap().unwrap();
    let engine = SelectorEngine::default();
    assert_eq!(engine.resolve(&node), engine.resolve(&node));
}

#[test]
fn test_custom_config() {
    let config = SelectorConfig {
        stable_attributes: vec!["data-hook".to_string()],
        text_limit: 4,
        ..SelectorConfig::default()
    };
    let engine = SelectorEngine::new(config);

    let page = HtmlPage::parse(r#"<body><button data-hook="go">Continue</button></body>"#);
    let button = page.query("button").unwrap().unwrap();
    assert_eq!(engine.resolve(&button).as_deref(), Some(r#"[data-hook="go"]"#));

    let page = HtmlPage::parse(r#"<body><button data-testid="go">Continue</button></body>"#);
    let button = page.query("button").unwrap().unwrap();
    assert_eq!(engine.resolve(&button).as_deref(), Some("text=Cont"));
}
