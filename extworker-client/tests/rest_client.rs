use extworker_client::{ClientError, Credentials, ExternalWorkerRestClient};
use extworker_core::domain::variable::{Variable, VariableType};
use extworker_core::dto::job::{
    AcquireJobParams, BpmnErrorJobParams, CmmnTerminateJobParams, CompleteJobParams,
    FailJobParams,
};
use mockito::{Matcher, Server};
use serde_json::{Value, json};

const BASIC_AUTH: &str = "Basic YWRtaW46dGVzdA==";
const JOB_ID: &str = "JOB-36ebec96-360d-11ee-8300-0242c0a8d006";

fn client(server: &Server) -> ExternalWorkerRestClient {
    ExternalWorkerRestClient::builder(server.url(), "test-worker")
        .credentials(Credentials::basic("admin", "test"))
        .build()
        .unwrap()
}

fn acquire_response() -> Value {
    json!([{
        "id": JOB_ID,
        "correlationId": "36ebec95-360d-11ee-8300-0242c0a8d006",
        "processInstanceId": "36e9f1b4-360d-11ee-8300-0242c0a8d006",
        "elementId": "externalWorkerTask",
        "elementName": "External Worker Task",
        "scopeType": "bpmn",
        "retries": 5,
        "lockOwner": "test-worker",
        "lockExpirationTime": "2023-08-08T10:22:04.012Z",
        "variables": [
            { "name": "initiator", "type": "string", "value": "admin" }
        ]
    }])
}

#[tokio::test]
async fn test_list_jobs_returns_total() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/external-job-api/jobs")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [{
                    "id": "JOB-3728f5a5-360d-11ee-8300-0242c0a8d006",
                    "correlationId": "3728f5a4-360d-11ee-8300-0242c0a8d006"
                }],
                "total": 1,
                "start": 0,
                "sort": "id",
                "order": "asc",
                "size": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let page = client(&server).list_jobs().await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.total, 1);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn test_list_jobs_with_invalid_authentication() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/external-job-api/jobs")
        .with_status(401)
        .create_async()
        .await;

    let err = client(&server).list_jobs().await.unwrap_err();

    mock.assert_async().await;
    assert!(err.is_client_error());
    assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn test_get_job() {
    let job_id = "JOB-3728f5a5-360d-11ee-8300-0242c0a8d006";
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/external-job-api/jobs/{}", job_id).as_str())
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": job_id,
                "correlationId": "3728f5a4-360d-11ee-8300-0242c0a8d006"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let job = client(&server).get_job(job_id).await.unwrap();

    mock.assert_async().await;
    assert_eq!(job.id, job_id);
    assert_eq!(
        job.correlation_id.as_deref(),
        Some("3728f5a4-360d-11ee-8300-0242c0a8d006")
    );
}

#[tokio::test]
async fn test_get_unknown_job_is_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/external-job-api/jobs/JOB-missing")
        .with_status(404)
        .create_async()
        .await;

    let err = client(&server).get_job("JOB-missing").await.unwrap_err();

    mock.assert_async().await;
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_acquire_with_default_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/external-job-api/acquire/jobs")
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::Json(json!({
            "topic": "myTopic",
            "lockDuration": "PT10S",
            "numberOfTasks": 1,
            "numberOfRetries": 5,
            "workerId": "test-worker",
            "scopeType": null
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(acquire_response().to_string())
        .create_async()
        .await;

    let jobs = client(&server)
        .acquire_jobs(AcquireJobParams {
            topic: "myTopic".to_string(),
            lock_duration: Some("PT10S".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id(), JOB_ID);
    assert_eq!(
        jobs[0].variables,
        vec![Variable::new("initiator", "admin", VariableType::String)]
    );
}

#[tokio::test]
async fn test_acquire_defaults_lock_duration() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/external-job-api/acquire/jobs")
        .match_body(Matcher::PartialJson(json!({ "lockDuration": "PT1M" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let jobs = client(&server)
        .acquire_jobs(AcquireJobParams::new("myTopic"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn test_acquire_with_custom_params() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/external-job-api/acquire/jobs")
        .match_body(Matcher::Json(json!({
            "topic": "myTopic",
            "lockDuration": "PT10S",
            "numberOfTasks": 2,
            "numberOfRetries": 3,
            "workerId": "another-worker",
            "scopeType": "bpmn"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(acquire_response().to_string())
        .create_async()
        .await;

    let jobs = client(&server)
        .acquire_jobs(AcquireJobParams {
            topic: "myTopic".to_string(),
            lock_duration: Some("PT10S".to_string()),
            number_of_tasks: Some(2),
            number_of_retries: Some(3),
            worker_id: Some("another-worker".to_string()),
            scope_type: Some("bpmn".to_string()),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(jobs.len(), 1);
}

#[tokio::test]
async fn test_acquire_rejects_empty_topic() {
    let server = Server::new_async().await;

    let err = client(&server)
        .acquire_jobs(AcquireJobParams::new(""))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
}

#[tokio::test]
async fn test_complete_job_with_variables() {
    let job_id = "JOB-0d5e6cce-368b-11ee-a638-0242c0a8f005";
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            format!("/external-job-api/acquire/jobs/{}/complete", job_id).as_str(),
        )
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::Json(json!({
            "workerId": "test-worker",
            "variables": [
                { "name": "testVar", "type": "string", "value": "test content", "valueUrl": null }
            ]
        })))
        .with_status(204)
        .create_async()
        .await;

    client(&server)
        .complete_job(CompleteJobParams {
            job_id: job_id.to_string(),
            variables: Some(vec![Variable::new("testVar", "test content", "string")]),
            worker_id: None,
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_complete_job_with_server_error() {
    let job_id = "JOB-0d5e6cce-368b-11ee-a638-0242c0a8f005";
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            format!("/external-job-api/acquire/jobs/{}/complete", job_id).as_str(),
        )
        .match_body(Matcher::Json(json!({
            "workerId": "test-worker",
            "variables": null
        })))
        .with_status(500)
        .create_async()
        .await;

    let err = client(&server)
        .complete_job(CompleteJobParams::new(job_id))
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(err.is_server_error());
}

#[tokio::test]
async fn test_fail_job() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", format!("/external-job-api/acquire/jobs/{}/fail", JOB_ID).as_str())
        .match_body(Matcher::Json(json!({
            "workerId": "test-worker",
            "errorMessage": "Some error message",
            "retries": 2,
            "retryTimeout": "PT20M"
        })))
        .with_status(204)
        .create_async()
        .await;

    client(&server)
        .fail_job(FailJobParams {
            job_id: JOB_ID.to_string(),
            error_message: Some("Some error message".to_string()),
            retries: Some(2),
            retry_timeout: Some("PT20M".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_bpmn_error_job() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            format!("/external-job-api/acquire/jobs/{}/bpmnError", JOB_ID).as_str(),
        )
        .match_body(Matcher::Json(json!({
            "workerId": "test-worker",
            "variables": [
                { "name": "testVar", "type": "string", "value": "test failure", "valueUrl": null }
            ],
            "errorCode": "errorCode1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(acquire_response().to_string())
        .create_async()
        .await;

    client(&server)
        .bpmn_error_job(BpmnErrorJobParams {
            job_id: JOB_ID.to_string(),
            variables: Some(vec![Variable::new("testVar", "test failure", "string")]),
            error_code: Some("errorCode1".to_string()),
            worker_id: None,
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_cmmn_terminate_job_with_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            format!("/external-job-api/acquire/jobs/{}/cmmnTerminate", JOB_ID).as_str(),
        )
        .match_header("authorization", "Bearer my-token")
        .match_body(Matcher::Json(json!({ "workerId": "test-worker" })))
        .with_status(204)
        .create_async()
        .await;

    let client = ExternalWorkerRestClient::builder(server.url(), "test-worker")
        .credentials(Credentials::bearer("my-token"))
        .build()
        .unwrap();

    client
        .cmmn_terminate_job(CmmnTerminateJobParams::new(JOB_ID))
        .await
        .unwrap();

    mock.assert_async().await;
}
