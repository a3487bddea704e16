//! Input records, one per document family. Field names serialize to the
//! PascalCase names the templates reference. Every credential field carries
//! already-encoded base64 text.

use serde::Serialize;

/// Application namespace with its registry and object-store secrets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NamespaceRecord {
    pub namespace: String,
    pub minio_access_key_base64: String,
    pub minio_secret_key_base64: String,
    /// `"enabled"` or `"disabled"`.
    pub knative_eventing_injection: String,
    pub docker_config_json_base64: String,
}

/// Shared by the cicd service account, the cluster role binding and both
/// pipeline headers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CicdServiceAccountRecord {
    pub namespace: String,
    pub namespace_api: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CicdRecord {
    pub docker_server: String,
    pub docker_username: String,
    pub docker_username_base64: String,
    pub docker_password_base64: String,
    pub namespace: String,
    pub docker_config_json_base64: String,
    pub minio_access_key_base64: String,
    pub minio_secret_key_base64: String,
    pub token_webservice1_data_base64: String,
    pub token_webservice2_data_base64: String,
    pub knative_serving_domain_template: String,
    pub domain: String,
    pub namespace_api: String,
    pub cool_knative_docker_image: String,
    pub public_ip: String,
    pub apps_git: String,
    pub file_resources_git: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SshGitRecord {
    pub namespace: String,
    pub ssh_git_server: String,
    pub ssh_private_key_data_base64: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TlsRecord {
    pub tls_crt_data_base64: String,
    pub tls_key_data_base64: String,
}

/// One pipeline task per application; `run_after` is the comma-joined
/// dependency list placed inside `runAfter: [...]`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationNodeRecord {
    pub namespace: String,
    pub folder: String,
    pub run_after: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FanInRecord {
    pub run_after: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MinioInstanceRecord {
    pub namespace: String,
    pub minio_access_key_base64: String,
    pub minio_secret_key_base64: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NatsStreamingInstanceRecord {
    pub size: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct KnativeServingConfigRecord {
    pub domain_template: String,
    pub domain: String,
    pub enable_scale_to_zero: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FluentdRecord {
    pub namespace: String,
    pub fluentd_custom_image: String,
}

/// For templates without placeholders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyRecord {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cicd_record_serializes_template_field_names() {
        let record = CicdRecord {
            docker_server: String::new(),
            docker_username: String::new(),
            docker_username_base64: String::new(),
            docker_password_base64: String::new(),
            namespace: String::new(),
            docker_config_json_base64: String::new(),
            minio_access_key_base64: String::new(),
            minio_secret_key_base64: String::new(),
            token_webservice1_data_base64: String::new(),
            token_webservice2_data_base64: String::new(),
            knative_serving_domain_template: String::new(),
            domain: String::new(),
            namespace_api: String::new(),
            cool_knative_docker_image: String::new(),
            public_ip: String::new(),
            apps_git: String::new(),
            file_resources_git: String::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "AppsGit",
                "CoolKnativeDockerImage",
                "DockerConfigJsonBase64",
                "DockerPasswordBase64",
                "DockerServer",
                "DockerUsername",
                "DockerUsernameBase64",
                "Domain",
                "FileResourcesGit",
                "KnativeServingDomainTemplate",
                "MinioAccessKeyBase64",
                "MinioSecretKeyBase64",
                "Namespace",
                "NamespaceApi",
                "PublicIp",
                "TokenWebservice1DataBase64",
                "TokenWebservice2DataBase64",
            ]
        );
    }
}
