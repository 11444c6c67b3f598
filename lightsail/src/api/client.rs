use async_trait::async_trait;
use aws_config::SdkConfig;

use super::error::ApiError;
use super::{ContainerService, LightsailApi, Operation, RelationalDatabase};

/// Lightsail API client backed by the AWS SDK
#[derive(Clone, Debug)]
pub struct Client {
    inner: aws_sdk_lightsail::Client,
}

impl Client {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            inner: aws_sdk_lightsail::Client::new(sdk_config),
        }
    }

    pub fn from_conf(conf: aws_sdk_lightsail::Config) -> Self {
        Self {
            inner: aws_sdk_lightsail::Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl LightsailApi for Client {
    async fn get_operation(&self, operation_id: &str) -> Result<Operation, ApiError> {
        tracing::debug!("Checking Lightsail Operation ({})", operation_id);

        let output = self
            .inner
            .get_operation()
            .operation_id(operation_id)
            .send()
            .await
            .map_err(|e| ApiError::from_sdk("GetOperation", "operation", operation_id, e))?;

        let op = output
            .operation()
            .ok_or_else(|| ApiError::missing("operation", operation_id, "operation"))?;

        Ok(Operation {
            id: op.id().unwrap_or(operation_id).to_string(),
            status: op.status().map(|s| s.as_str().to_string()),
            operation_type: op.operation_type().map(|t| t.as_str().to_string()),
            resource_name: op.resource_name().map(str::to_string),
            resource_type: op.resource_type().map(|t| t.as_str().to_string()),
            error_code: op.error_code().map(str::to_string),
            error_details: op.error_details().map(str::to_string),
        })
    }

    async fn get_relational_database(&self, name: &str) -> Result<RelationalDatabase, ApiError> {
        tracing::debug!("Checking Lightsail Database ({})", name);

        let output = self
            .inner
            .get_relational_database()
            .relational_database_name(name)
            .send()
            .await
            .map_err(|e| {
                ApiError::from_sdk("GetRelationalDatabase", "relational database", name, e)
            })?;

        let db = output.relational_database().ok_or_else(|| {
            ApiError::missing("relational database", name, "relationalDatabase")
        })?;

        Ok(RelationalDatabase {
            name: db.name().unwrap_or(name).to_string(),
            state: db.state().map(str::to_string),
            backup_retention_enabled: db.backup_retention_enabled(),
            engine: db.engine().map(str::to_string),
        })
    }

    async fn get_container_service(&self, name: &str) -> Result<ContainerService, ApiError> {
        tracing::debug!("Checking Lightsail Container Service ({})", name);

        let output = self
            .inner
            .get_container_services()
            .service_name(name)
            .send()
            .await
            .map_err(|e| {
                ApiError::from_sdk("GetContainerServices", "container service", name, e)
            })?;

        let service = output
            .container_services()
            .first()
            .ok_or_else(|| ApiError::NotFound {
                kind: "container service",
                name: name.to_string(),
            })?;

        Ok(ContainerService {
            name: service
                .container_service_name()
                .unwrap_or(name)
                .to_string(),
            state: service.state().map(|s| s.as_str().to_string()),
            url: service.url().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_lightsail::config::retry::RetryConfig;
    use aws_sdk_lightsail::config::{BehaviorVersion, Credentials, Region};
    use mockito::{Matcher, Server, ServerGuard};

    const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

    fn client_for(server: &ServerGuard) -> Client {
        let conf = aws_sdk_lightsail::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
            .endpoint_url(server.url())
            .retry_config(RetryConfig::disabled())
            .build();
        Client::from_conf(conf)
    }

    fn target(action: &str) -> Matcher {
        Matcher::Exact(format!("Lightsail_20161128.{}", action))
    }

    #[tokio::test]
    async fn client_reads_operation_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("x-amz-target", target("GetOperation"))
            .match_body(Matcher::PartialJsonString(
                r#"{"operationId":"op-123"}"#.to_string(),
            ))
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(
                r#"{"operation":{"id":"op-123","status":"Started","operationType":"CreateInstance","resourceName":"web-1","resourceType":"Instance"}}"#,
            )
            .create_async()
            .await;

        let op = client_for(&server).get_operation("op-123").await.unwrap();

        assert_eq!(op.id, "op-123");
        assert_eq!(op.status.as_deref(), Some("Started"));
        assert_eq!(op.operation_type.as_deref(), Some("CreateInstance"));
        assert_eq!(op.resource_name.as_deref(), Some("web-1"));
        assert_eq!(op.resource_type.as_deref(), Some("Instance"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_maps_not_found_exception() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .match_header("x-amz-target", target("GetRelationalDatabase"))
            .with_status(400)
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(r#"{"__type":"NotFoundException","message":"The Relational Database does not exist"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .get_relational_database("db-1")
            .await
            .unwrap_err();

        match err {
            ApiError::NotFound { kind, name } => {
                assert_eq!(kind, "relational database");
                assert_eq!(name, "db-1");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_keeps_other_service_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(400)
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(r#"{"__type":"AccessDeniedException","message":"not authorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_operation("op-1").await.unwrap_err();

        match err {
            ApiError::Service {
                operation, code, ..
            } => {
                assert_eq!(operation, "GetOperation");
                assert_eq!(code.as_deref(), Some("AccessDeniedException"));
            }
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn client_reads_database_backup_retention() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .match_header("x-amz-target", target("GetRelationalDatabase"))
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(
                r#"{"relationalDatabase":{"name":"db-1","state":"modifying","backupRetentionEnabled":false,"engine":"mysql"}}"#,
            )
            .create_async()
            .await;

        let db = client_for(&server)
            .get_relational_database("db-1")
            .await
            .unwrap();

        assert_eq!(db.name, "db-1");
        assert_eq!(db.state.as_deref(), Some("modifying"));
        assert_eq!(db.backup_retention_enabled, Some(false));
        assert_eq!(db.engine.as_deref(), Some("mysql"));
    }

    #[tokio::test]
    async fn client_reads_first_container_service() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .match_query(Matcher::UrlEncoded("serviceName".into(), "api".into()))
            .match_header("x-amz-target", target("GetContainerServices"))
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(
                r#"{"containerServices":[{"containerServiceName":"api","state":"DEPLOYING","url":"https://api.example.com/"}]}"#,
            )
            .create_async()
            .await;

        let service = client_for(&server)
            .get_container_service("api")
            .await
            .unwrap();

        assert_eq!(service.name, "api");
        assert_eq!(service.state.as_deref(), Some("DEPLOYING"));
        assert_eq!(service.url.as_deref(), Some("https://api.example.com/"));
    }

    #[tokio::test]
    async fn client_treats_empty_container_service_list_as_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .match_query(Matcher::UrlEncoded("serviceName".into(), "api".into()))
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(r#"{"containerServices":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .get_container_service("api")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn client_reports_missing_operation_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body("{}")
            .create_async()
            .await;

        let err = client_for(&server).get_operation("op-9").await.unwrap_err();

        assert!(matches!(err, ApiError::MissingField { field: "operation", .. }));
    }
}
