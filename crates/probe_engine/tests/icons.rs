use probe_engine::favicon_url;

#[test]
fn favicon_url_extracts_the_template_host() {
    let url = favicon_url("https://acme.test/search?q=%s").unwrap();
    assert_eq!(url, "https://www.google.com/s2/favicons?domain=acme.test&sz=64");
}

#[test]
fn placeholders_in_the_path_do_not_break_host_extraction() {
    let url = favicon_url("https://beta.test/find/%s/page").unwrap();
    assert!(url.contains("domain=beta.test"));
}

#[test]
fn templates_without_a_host_yield_nothing() {
    assert!(favicon_url("not a url %s").is_none());
}
