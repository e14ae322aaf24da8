use std::sync::Arc;

use paramstore_config::{ParamstoreConfig, RemoteStoreSettings};
use paramstore_core::{
    ConfigStoreError, ConfigurationStore, DualSourceResolver, InMemoryConnector,
    InMemoryEnvironment, InMemoryParameterStore, LocalEnvironmentPort, LocalStore, RemoteStore,
};

const SNAPSHOT: &str = r#"
[dev.database]
url = "postgres://dev-db"
pool_size = "8"

[dev.feature]
search = "on"

[prod.database]
url = "postgres://prod-db"
"#;

fn credentials_env() -> Arc<InMemoryEnvironment> {
    Arc::new(InMemoryEnvironment::from_pairs([
        ("AWS_ACCESS_KEY_ID", "AKIA"),
        ("AWS_SECRET_ACCESS_KEY", "secret"),
        ("LOCAL_ONLY", "from-env"),
        ("database_url", "shadowed"),
    ]))
}

async fn snapshot_resolver(
    environment: &str,
    page_size: usize,
) -> (Arc<InMemoryEnvironment>, DualSourceResolver) {
    let store = InMemoryParameterStore::from_snapshot_toml(SNAPSHOT)
        .unwrap()
        .with_page_size(page_size);
    let connector = InMemoryConnector::new(Arc::new(store));
    let env = credentials_env();

    let mut config = ParamstoreConfig::default();
    config.environment = environment.to_string();
    config.remote.enabled = true;
    config.remote.use_environment_credentials = true;

    let resolver = DualSourceResolver::from_config(&config, env.clone(), &connector)
        .await
        .unwrap();
    (env, resolver)
}

#[tokio::test]
async fn test_resolution_order_across_sources() {
    let (_, resolver) = snapshot_resolver("dev", 10).await;

    assert_eq!(resolver.get("DATABASE_URL").await.unwrap(), "postgres://dev-db");
    assert_eq!(resolver.get("LOCAL_ONLY").await.unwrap(), "from-env");
    assert!(resolver.get("UNKNOWN").await.unwrap_err().is_not_found());

    resolver.set_override("DATABASE_URL", "pinned").await;
    assert_eq!(resolver.get("DATABASE_URL").await.unwrap(), "pinned");
}

#[tokio::test]
async fn test_environment_listing_spans_pages() {
    let (_, resolver) = snapshot_resolver("dev", 1).await;

    let values = resolver.get_environment().await.unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(values["database_url"], "postgres://dev-db");
    assert_eq!(values["database_pool_size"], "8");
    assert_eq!(values["feature_search"], "on");
}

#[tokio::test]
async fn test_environment_scope_isolation() {
    let (_, resolver) = snapshot_resolver("prod", 2).await;

    let values = resolver.get_environment().await.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values["database_url"], "postgres://prod-db");
    assert!(resolver.get("FEATURE_SEARCH").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_observed_local_values_merge_under_remote() {
    let (_, resolver) = snapshot_resolver("dev", 10).await;

    assert_eq!(resolver.local().get("database_url").await.unwrap(), "shadowed");
    assert_eq!(resolver.local().get("LOCAL_ONLY").await.unwrap(), "from-env");

    let values = resolver.get_environment().await.unwrap();
    assert_eq!(values.len(), 4);
    assert_eq!(values["database_url"], "postgres://dev-db");
    assert_eq!(values["LOCAL_ONLY"], "from-env");
}

#[tokio::test]
async fn test_write_then_delete_round_trip() {
    let (env, resolver) = snapshot_resolver("dev", 10).await;

    resolver.create("CACHE_TTL", "60").await.unwrap();
    assert_eq!(resolver.get("cache_ttl").await.unwrap(), "60");
    assert!(resolver.create("CACHE_TTL", "90").await.unwrap_err().is_already_exists());

    resolver.set("CACHE_TTL", "90").await.unwrap();
    assert_eq!(resolver.get("CACHE_TTL").await.unwrap(), "90");

    resolver.delete("CACHE_TTL").await.unwrap();
    assert!(resolver.get("CACHE_TTL").await.unwrap_err().is_not_found());
    assert_eq!(env.get_var("CACHE_TTL"), None);
}

#[tokio::test]
async fn test_local_store_as_trait_object() {
    let env = Arc::new(InMemoryEnvironment::new());
    let store: Arc<dyn ConfigurationStore> = Arc::new(LocalStore::new(env.clone()));

    store.set("APP_MODE", "debug").await.unwrap();
    assert_eq!(store.get("APP_MODE").await.unwrap(), "debug");
    assert_eq!(store.get_environment().await.unwrap().len(), 1);

    store.delete("APP_MODE").await.unwrap();
    assert!(store.get_environment().await.unwrap().is_empty());
    assert_eq!(env.get_var("APP_MODE"), None);
}

#[tokio::test]
async fn test_remote_connect_rejects_unsupported_region() {
    let connector = InMemoryConnector::new(Arc::new(InMemoryParameterStore::new()))
        .with_allowed_regions(["us-east-1"]);
    let settings = RemoteStoreSettings::new("dev").with_static_credentials("AKIA", "secret");

    let err = RemoteStore::connect_with_environment(
        &settings,
        &connector,
        &InMemoryEnvironment::new(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ConfigStoreError::SessionInit(_)));
}

#[tokio::test]
async fn test_snapshot_file_backed_remote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.toml");
    std::fs::write(&path, SNAPSHOT).unwrap();

    let store = Arc::new(InMemoryParameterStore::load_snapshot(&path).unwrap());
    assert_eq!(store.len().await, 4);

    let remote = RemoteStore::with_client(store, "dev", "_");
    assert_eq!(remote.get("DATABASE_POOL_SIZE").await.unwrap(), "8");
}
