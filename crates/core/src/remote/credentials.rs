use paramstore_config::defaults::credential_vars;
use paramstore_config::{CredentialSource, RemoteStoreSettings, StaticCredentials};
use paramstore_errors::{ConfigStoreError, ConfigStoreResult};
use tracing::debug;

use crate::traits::LocalEnvironmentPort;

/// 解析远程会话使用的凭证
///
/// 未声明从环境读取且静态凭证不完整时返回 `MissingCredentials`；
/// 声明从环境读取时，环境中必须同时存在 access key 和 secret key。
pub fn resolve_credentials(
    settings: &RemoteStoreSettings,
    env: &dyn LocalEnvironmentPort,
) -> ConfigStoreResult<StaticCredentials> {
    match settings.credential_source() {
        Some(CredentialSource::Static(credentials)) => {
            debug!(access_key_id = %credentials.access_key_id, "使用静态凭证");
            Ok(credentials)
        }
        Some(CredentialSource::Environment) => from_environment(env),
        None => Err(ConfigStoreError::missing_credentials(
            "no awsAccessKey and/or awsSecretAccessKey provided",
        )),
    }
}

fn from_environment(env: &dyn LocalEnvironmentPort) -> ConfigStoreResult<StaticCredentials> {
    let access_key_id = first_present(env, &credential_vars::ACCESS_KEY_ID);
    let secret_access_key = first_present(env, &credential_vars::SECRET_ACCESS_KEY);

    match (access_key_id, secret_access_key) {
        (Some(access_key_id), Some(secret_access_key)) => {
            debug!(access_key_id = %access_key_id, "使用环境变量凭证");
            let credentials = StaticCredentials::new(access_key_id, secret_access_key);
            Ok(match non_empty(env, credential_vars::SESSION_TOKEN) {
                Some(token) => credentials.with_session_token(token),
                None => credentials,
            })
        }
        (None, _) => Err(ConfigStoreError::missing_credentials(format!(
            "环境变量中未找到 {}",
            credential_vars::ACCESS_KEY_ID.join(" / ")
        ))),
        (_, None) => Err(ConfigStoreError::missing_credentials(format!(
            "环境变量中未找到 {}",
            credential_vars::SECRET_ACCESS_KEY.join(" / ")
        ))),
    }
}

fn first_present(env: &dyn LocalEnvironmentPort, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| non_empty(env, name))
}

fn non_empty(env: &dyn LocalEnvironmentPort, name: &str) -> Option<String> {
    env.get_var(name).filter(|value| !value.is_empty())
}
