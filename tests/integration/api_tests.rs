//! API integration tests
//!
//! These run against a live server with a fresh database. A superuser
//! bearer token must be provided via the KULTURA_TEST_TOKEN environment
//! variable (tokens are issued by the external user-management service).
//!
//! Run with: cargo test -- --ignored

use reqwest::{multipart, Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn superuser_token() -> String {
    std::env::var("KULTURA_TEST_TOKEN").expect("KULTURA_TEST_TOKEN must be set")
}

/// Create an event running over the given dates, returning its id
async fn create_event(client: &Client, name: &str, start_date: &str, end_date: &str) -> i64 {
    let response = client
        .post(format!("{}/events", BASE_URL))
        .bearer_auth(superuser_token())
        .json(&json!({
            "name": name,
            "description": "integration test event",
            "short_description": null,
            "location": "Main hall",
            "participants": null,
            "coordinator_contact": "coordinator@example.com",
            "start_date": start_date,
            "end_date": end_date
        }))
        .send()
        .await
        .expect("Failed to create event");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse event");
    body["id"].as_i64().expect("No id in event response")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_event_round_trip() {
    let client = Client::new();
    let id = create_event(&client, "Round trip", "2030-06-10", "2030-06-12").await;

    let response = client
        .get(format!("{}/events/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get event");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse event");
    assert_eq!(body["name"], "Round trip");
    assert_eq!(body["location"], "Main hall");
    assert_eq!(body["start_date"], "2030-06-10");
    // A far-future event is planned
    assert_eq!(body["status"], 0);

    // Delete, then the id is gone
    let response = client
        .delete(format!("{}/events/{}", BASE_URL, id))
        .bearer_auth(superuser_token())
        .send()
        .await
        .expect("Failed to delete event");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/events/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get event");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_mutations_require_superuser() {
    let client = Client::new();

    let response = client
        .post(format!("{}/events", BASE_URL))
        .json(&json!({
            "name": "No auth",
            "start_date": "2030-01-01",
            "end_date": "2030-01-02"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_event_list_pagination_envelope() {
    let client = Client::new();
    for i in 0..3 {
        create_event(
            &client,
            &format!("Paged event {}", i),
            "2031-01-10",
            "2031-01-11",
        )
        .await;
    }

    let response = client
        .get(format!("{}/events?page=2&per_page=1", BASE_URL))
        .send()
        .await
        .expect("Failed to list events");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse page");
    assert_eq!(body["page"], 2);
    assert_eq!(body["per_page"], 1);
    // Page 2 of size 1 holds exactly one row
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let total = body["total_count"].as_i64().unwrap();
    let pages = body["number_of_pages"].as_i64().unwrap();
    assert!(total >= 3);
    // per_page=1 means one page per row
    assert_eq!(pages, total);

    // Degenerate page numbers are rejected
    let response = client
        .get(format!("{}/events?page=0&per_page=1", BASE_URL))
        .send()
        .await
        .expect("Failed to list events");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_application_time_gate() {
    let client = Client::new();
    let applicant = json!({
        "full_name": "Jane Applicant",
        "email": "jane@example.com",
        "phone": "+100000000",
        "birthdate": "2001-03-04",
        "comment": null,
        "study_organisation": "State University"
    });

    // Finished event
    let finished = create_event(&client, "Finished", "2020-01-01", "2020-01-02").await;
    let response = client
        .post(format!("{}/events/{}/applications", BASE_URL, finished))
        .json(&applicant)
        .send()
        .await
        .expect("Failed to apply");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("finished"));

    // Ongoing event
    let ongoing = create_event(&client, "Ongoing", "2020-01-01", "2040-01-01").await;
    let response = client
        .post(format!("{}/events/{}/applications", BASE_URL, ongoing))
        .json(&applicant)
        .send()
        .await
        .expect("Failed to apply");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("started"));

    // Upcoming event: the application lands as pending
    let upcoming = create_event(&client, "Upcoming", "2039-01-01", "2039-01-02").await;
    let response = client
        .post(format!("{}/events/{}/applications", BASE_URL, upcoming))
        .json(&applicant)
        .send()
        .await
        .expect("Failed to apply");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 2);
    assert_eq!(body["event_id"].as_i64().unwrap(), upcoming);
}

#[tokio::test]
#[ignore]
async fn test_application_review_flow() {
    let client = Client::new();
    let event = create_event(&client, "Reviewed", "2039-05-01", "2039-05-02").await;

    let response = client
        .post(format!("{}/events/{}/applications", BASE_URL, event))
        .json(&json!({
            "full_name": "John Applicant",
            "email": "john@example.com",
            "phone": "+100000001",
            "birthdate": "1999-12-31",
            "comment": "looking forward",
            "study_organisation": "Tech College"
        }))
        .send()
        .await
        .expect("Failed to apply");
    assert_eq!(response.status(), StatusCode::CREATED);
    let application: Value = response.json().await.unwrap();
    let id = application["id"].as_i64().unwrap();

    // Accept the application
    let response = client
        .put(format!("{}/events/applications/{}", BASE_URL, id))
        .bearer_auth(superuser_token())
        .json(&json!({
            "full_name": "John Applicant",
            "email": "john@example.com",
            "phone": "+100000001",
            "birthdate": "1999-12-31",
            "comment": "looking forward",
            "study_organisation": "Tech College",
            "status": 0
        }))
        .send()
        .await
        .expect("Failed to update application");
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], 0);

    // Filter by status
    let response = client
        .get(format!(
            "{}/events/{}/applications?statuses=0",
            BASE_URL, event
        ))
        .send()
        .await
        .expect("Failed to list applications");
    let body: Value = response.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().any(|a| a["id"].as_i64() == Some(id)));
}

#[tokio::test]
#[ignore]
async fn test_media_category_link_and_unlink() {
    let client = Client::new();
    let token = superuser_token();

    let response = client
        .post(format!("{}/media/categories", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "Guides", "media_type": 0 }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(response.status(), StatusCode::CREATED);
    let category: Value = response.json().await.unwrap();
    let category_id = category["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/media", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Visitor guide",
            "description": null,
            "media_type": 0,
            "category_id": null
        }))
        .send()
        .await
        .expect("Failed to create media");
    assert_eq!(response.status(), StatusCode::CREATED);
    let media: Value = response.json().await.unwrap();
    let media_id = media["id"].as_i64().unwrap();
    assert!(media["category_id"].is_null());

    // Link, then the media carries the category
    let response = client
        .post(format!(
            "{}/media/categories/{}/media/{}",
            BASE_URL, category_id, media_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to link");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let media: Value = client
        .get(format!("{}/media/{}", BASE_URL, media_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(media["category_id"].as_i64(), Some(category_id));

    // Unlink, then it is cleared
    let response = client
        .delete(format!(
            "{}/media/categories/{}/media/{}",
            BASE_URL, category_id, media_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to unlink");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let media: Value = client
        .get(format!("{}/media/{}", BASE_URL, media_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(media["category_id"].is_null());

    // Unknown ids are rejected
    let response = client
        .post(format!(
            "{}/media/categories/999999/media/{}",
            BASE_URL, media_id
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_photo_requires_photo_typed_media() {
    let client = Client::new();
    let token = superuser_token();

    // A video media cannot own photos
    let response = client
        .post(format!("{}/media", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Concert recording",
            "description": null,
            "media_type": 4,
            "category_id": null
        }))
        .send()
        .await
        .expect("Failed to create media");
    let media: Value = response.json().await.unwrap();
    let media_id = media["id"].as_i64().unwrap();

    let form = multipart::Form::new().part(
        "image",
        multipart::Part::bytes(vec![0u8; 16])
            .file_name("photo.jpg")
            .mime_str("image/jpeg")
            .unwrap(),
    );

    let response = client
        .post(format!("{}/media/{}/photos", BASE_URL, media_id))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .expect("Failed to post photo");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The media still has no photos
    let media: Value = client
        .get(format!("{}/media/{}", BASE_URL, media_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(media["photos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_hall_section_cascade() {
    let client = Client::new();
    let token = superuser_token();

    // Hall with no sections
    let response = client
        .post(format!("{}/museum/halls", BASE_URL))
        .bearer_auth(&token)
        .json(&json!({ "name": "East wing", "description": null }))
        .send()
        .await
        .expect("Failed to create hall");
    assert_eq!(response.status(), StatusCode::CREATED);
    let hall: Value = response.json().await.unwrap();
    let hall_id = hall["id"].as_i64().unwrap();
    assert_eq!(hall["sections"].as_array().unwrap().len(), 0);

    // Add one section
    let response = client
        .post(format!("{}/museum/halls/{}/sections", BASE_URL, hall_id))
        .bearer_auth(&token)
        .json(&json!({ "name": "Bronze age", "description": null }))
        .send()
        .await
        .expect("Failed to create section");
    assert_eq!(response.status(), StatusCode::CREATED);
    let section: Value = response.json().await.unwrap();
    let section_id = section["id"].as_i64().unwrap();
    assert_eq!(section["hall_id"].as_i64(), Some(hall_id));

    // Listing by hall returns exactly that section
    let page: Value = client
        .get(format!("{}/museum/halls/{}/sections", BASE_URL, hall_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(section_id));

    // Deleting the hall cascades to the section
    let response = client
        .delete(format!("{}/museum/halls/{}", BASE_URL, hall_id))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete hall");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/museum/sections/{}", BASE_URL, section_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Sections of a missing hall are a not-found error
    let response = client
        .get(format!("{}/museum/halls/{}/sections", BASE_URL, hall_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
