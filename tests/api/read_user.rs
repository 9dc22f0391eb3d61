use crate::common::{
    TEST_EMAIL, TEST_LOGIN, TEST_PASSWORD, TEST_USER_TOKEN, scenario_user, spawn_mock_service,
    user_body,
};
use favqs_checks::quote_client::QuoteClientError;
use favqs_checks::workflows::{WorkflowError, create_user, verify_read};
use serde_json::json;
use wiremock::ResponseTemplate;

const SCENARIO: (&str, &str, &str) = (TEST_LOGIN, TEST_EMAIL, TEST_PASSWORD);

#[tokio::test]
async fn created_user_reads_back_with_the_same_login_and_email() {
    // Arrange
    let service = spawn_mock_service().await;
    service
        .mount_created_session(SCENARIO, TEST_USER_TOKEN)
        .await;
    service
        .mount_get_user(
            TEST_LOGIN,
            TEST_USER_TOKEN,
            ResponseTemplate::new(200).set_body_json(user_body(TEST_LOGIN, TEST_EMAIL)),
            1,
        )
        .await;
    let fixture = create_user(&service.client, scenario_user())
        .await
        .expect("User creation failed.");

    // Act
    let details = verify_read(&service.client, &fixture)
        .await
        .expect("Read verification failed.");

    // Assert
    assert_eq!(details.login, TEST_LOGIN);
    assert_eq!(details.account_details.email, TEST_EMAIL);
}

#[tokio::test]
async fn read_fails_when_the_email_differs() {
    let service = spawn_mock_service().await;
    service
        .mount_created_session(SCENARIO, TEST_USER_TOKEN)
        .await;
    service
        .mount_get_user(
            TEST_LOGIN,
            TEST_USER_TOKEN,
            ResponseTemplate::new(200).set_body_json(user_body(TEST_LOGIN, "other@example.com")),
            1,
        )
        .await;
    let fixture = create_user(&service.client, scenario_user())
        .await
        .expect("User creation failed.");

    let error = verify_read(&service.client, &fixture)
        .await
        .expect_err("A different email must fail the check.");

    assert!(matches!(
        error,
        WorkflowError::Mismatch {
            field: "account_details.email",
            ..
        }
    ));
}

#[tokio::test]
async fn read_fails_when_the_login_differs() {
    let service = spawn_mock_service().await;
    service
        .mount_created_session(SCENARIO, TEST_USER_TOKEN)
        .await;
    service
        .mount_get_user(
            TEST_LOGIN,
            TEST_USER_TOKEN,
            ResponseTemplate::new(200).set_body_json(user_body("someone_else", TEST_EMAIL)),
            1,
        )
        .await;
    let fixture = create_user(&service.client, scenario_user())
        .await
        .expect("User creation failed.");

    let error = verify_read(&service.client, &fixture)
        .await
        .expect_err("A different login must fail the check.");

    assert!(matches!(
        error,
        WorkflowError::Mismatch { field: "login", .. }
    ));
}

#[tokio::test]
async fn read_fails_with_the_body_when_the_status_is_not_200() {
    let service = spawn_mock_service().await;
    service
        .mount_created_session(SCENARIO, TEST_USER_TOKEN)
        .await;
    service
        .mount_get_user(
            TEST_LOGIN,
            TEST_USER_TOKEN,
            ResponseTemplate::new(404).set_body_string("User not found"),
            1,
        )
        .await;
    let fixture = create_user(&service.client, scenario_user())
        .await
        .expect("User creation failed.");

    let error = verify_read(&service.client, &fixture)
        .await
        .expect_err("A 404 must fail the check.");

    assert!(matches!(
        error,
        WorkflowError::Request {
            step: "get the user",
            source: QuoteClientError::UnexpectedStatus { .. },
        }
    ));
    assert!(format!("{:?}", error).contains("User not found"));
}

#[tokio::test]
async fn read_fails_when_account_details_are_missing() {
    let service = spawn_mock_service().await;
    service
        .mount_created_session(SCENARIO, TEST_USER_TOKEN)
        .await;
    service
        .mount_get_user(
            TEST_LOGIN,
            TEST_USER_TOKEN,
            ResponseTemplate::new(200).set_body_json(json!({"login": TEST_LOGIN})),
            1,
        )
        .await;
    let fixture = create_user(&service.client, scenario_user())
        .await
        .expect("User creation failed.");

    let error = verify_read(&service.client, &fixture)
        .await
        .expect_err("A body without account details must fail the check.");

    assert!(format!("{:?}", error).contains("account_details"));
}
