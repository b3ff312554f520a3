use settings::{
    load_advanced, save_advanced, AdvancedOptions, EmbedMode, FlagName, InMemoryOptionStore,
    OptionKey, OptionStore, Settings, SqliteOptionStore,
};

#[test]
fn unset_options_read_as_defaults() {
    let store = InMemoryOptionStore::new();
    assert_eq!(store.get_option(OptionKey::EmbedMode).expect("mode"), "regular");
    assert_eq!(store.get_option(OptionKey::GhostMetricsUrl).expect("url"), "");

    let settings = Settings::load(&store).expect("settings");
    assert_eq!(settings.embed_mode, EmbedMode::Regular);
    assert!(settings.selected_site_id.is_empty());
    assert!(!settings.token_set());
    assert_eq!(settings.advanced, AdvancedOptions::default());
}

#[test]
fn settings_load_reads_flags_of_selected_site() {
    let store = InMemoryOptionStore::with_values([
        ("ghost_metrics_url", "https://acme.ghostmetrics.cloud/"),
        ("selected_site_id", "2"),
        ("embed_mode", "tag_manager"),
    ]);
    save_advanced(
        &store,
        &AdvancedOptions::new("1").with_flag(FlagName::DisableTrackingCookies, true),
    )
    .expect("save site 1");
    save_advanced(
        &store,
        &AdvancedOptions::new("2").with_flag(FlagName::TrackSubdomains, true),
    )
    .expect("save site 2");

    let settings = Settings::load(&store).expect("settings");
    assert_eq!(settings.embed_mode, EmbedMode::TagManager);
    assert_eq!(settings.advanced.site_id, "2");
    assert!(settings.advanced.is_enabled(FlagName::TrackSubdomains));
    assert!(!settings.advanced.is_enabled(FlagName::DisableTrackingCookies));

    let other = load_advanced(&store, "1").expect("site 1");
    assert!(other.is_enabled(FlagName::DisableTrackingCookies));
}

#[test]
fn saving_flags_without_site_id_fails() {
    let store = InMemoryOptionStore::new();
    let result = save_advanced(&store, &AdvancedOptions::default());
    assert!(result.is_err());
}

#[test]
fn resolved_flags_cover_all_eight() {
    let options = AdvancedOptions::new("3").with_flag(FlagName::ClientSideDnt, true);
    let resolved = options.resolved();
    assert_eq!(resolved.len(), 8);
    assert_eq!(resolved.get(&FlagName::ClientSideDnt), Some(&true));
    assert_eq!(resolved.get(&FlagName::HideAliasUrls), Some(&false));
}

#[test]
fn sqlite_store_roundtrip() {
    let store = SqliteOptionStore::open(":memory:").expect("store");
    store.ensure_schema().expect("schema");
    assert_eq!(store.get("auth_token").expect("get"), None);

    store.set_option(OptionKey::AuthToken, "abc").expect("set");
    store.set_option(OptionKey::AuthToken, "def").expect("overwrite");
    assert_eq!(store.get_option(OptionKey::AuthToken).expect("get"), "def");

    save_advanced(
        &store,
        &AdvancedOptions::new("7").with_flag(FlagName::TrackJsDisabled, true),
    )
    .expect("flags");
    let loaded = load_advanced(&store, "7").expect("load flags");
    assert!(loaded.is_enabled(FlagName::TrackJsDisabled));
}
