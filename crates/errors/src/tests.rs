use crate::*;

#[test]
fn test_config_store_error_display() {
    let not_found = ConfigStoreError::not_found("nonexistingkeyshouldgohere");
    assert_eq!(
        not_found.to_string(),
        "no value with key nonexistingkeyshouldgohere"
    );

    let creds = ConfigStoreError::missing_credentials(
        "no awsAccessKey and/or awsSecretAccessKey provided",
    );
    assert_eq!(
        creds.to_string(),
        "缺少访问凭证: no awsAccessKey and/or awsSecretAccessKey provided"
    );

    let session = ConfigStoreError::session_init("region rejected");
    assert_eq!(session.to_string(), "初始化远程会话失败: region rejected");

    let remote = ConfigStoreError::remote(
        "set",
        "hello_world",
        ParameterStoreError::service("throttled"),
    );
    assert_eq!(
        remote.to_string(),
        "远程set操作失败 (key: hello_world): 参数存储服务错误: throttled"
    );

    let local = ConfigStoreError::local("delete", "HELLO", "invalid name");
    assert_eq!(
        local.to_string(),
        "本地delete操作失败 (key: HELLO): invalid name"
    );
}

#[test]
fn test_multiple_error_display() {
    let err = ConfigStoreError::Multiple(vec![
        ConfigStoreError::not_found("a"),
        ConfigStoreError::config_error("bad"),
    ]);
    assert_eq!(
        err.to_string(),
        "多个操作失败: [no value with key a; 配置错误: bad]"
    );
}

#[test]
fn test_error_classification() {
    let exists = ConfigStoreError::remote(
        "create",
        "hello",
        ParameterStoreError::already_exists("/dev/hello"),
    );
    assert!(exists.is_already_exists());
    assert!(!exists.is_not_found());
    assert_eq!(exists.key(), Some("hello"));

    let local_exists = ConfigStoreError::local("create", "HELLO", "already set");
    assert!(local_exists.is_already_exists());

    let local_set = ConfigStoreError::local("set", "HELLO", "invalid name");
    assert!(!local_set.is_already_exists());

    assert!(ConfigStoreError::not_found("x").is_not_found());
    assert_eq!(ConfigStoreError::session_init("x").key(), None);
}

#[test]
fn test_remote_error_source_chain() {
    use std::error::Error;

    let err = ConfigStoreError::remote(
        "get",
        "db_url",
        ParameterStoreError::not_found("/dev/db/url"),
    );
    let source = err.source().expect("source should be kept");
    assert_eq!(source.to_string(), "参数不存在: /dev/db/url");
}
