mod common;

use serde_json::{json, Value};

fn claim_body(item_id: &str, claimer_email: &str) -> Value {
    json!({
        "itemId": item_id,
        "claimerName": "Asha",
        "claimerEmail": claimer_email,
        "claimDescription": "My name is written on the first page",
        "claimLocation": "Canteen",
        "claimDate": "2024-05-01"
    })
}

#[tokio::test]
async fn claim_marks_found_item_claimed_and_pending() {
    let app = common::spawn_app().await;
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;

    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&found_id, "asha@gitam.in"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Claim submitted successfully");
    let item = &body["foundItem"];
    assert_eq!(item["status"], "claimed");
    assert_eq!(item["claimStatus"], "pending");
    assert_eq!(item["claimerName"], "Asha");
    assert_eq!(item["claimerEmail"], "asha@gitam.in");
    assert_eq!(item["claimDate"], "2024-05-01");

    let items = common::list_items(&app).await;
    assert_eq!(items["foundItems"][0]["status"], "claimed");
}

#[tokio::test]
async fn claim_with_malformed_email_leaves_store_unchanged() {
    let app = common::spawn_app().await;
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;
    let before = app.store.read_raw().await.unwrap();

    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&found_id, "not-an-email"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    assert_eq!(app.store.read_raw().await.unwrap(), before);
}

#[tokio::test]
async fn claim_with_missing_field_is_rejected() {
    let app = common::spawn_app().await;
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;

    let mut body = claim_body(&found_id, "asha@gitam.in");
    body.as_object_mut().unwrap().remove("claimDescription");
    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn claim_on_unknown_item_is_not_found() {
    let app = common::spawn_app().await;
    let lost_id = common::create_lost_item(&app, "Phone", "asha@gitam.in").await;

    // A lost item's id does not name a found item.
    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&lost_id, "asha@gitam.in"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Found item not found.");
}

#[tokio::test]
async fn claim_on_reunion_record_emails_claimer_and_finder() {
    let app = common::spawn_app().await;
    let lost_id = common::create_lost_item(&app, "Phone", "call me").await;

    let body: Value = app
        .client
        .post(app.url("/finder-details"))
        .json(&json!({
            "itemId": lost_id,
            "finderName": "Ravi",
            "finderContact": "ravi@gitam.in",
            "finderLocation": "Front desk"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let reunion_id = body["foundItem"]["id"].as_str().unwrap().to_string();

    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&reunion_id, "asha@gitam.in"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let mut recipients: Vec<String> = app
        .outbox
        .wait_for(2)
        .await
        .into_iter()
        .map(|(to, _)| to)
        .collect();
    recipients.sort();
    assert_eq!(recipients, vec!["asha@gitam.in", "ravi@gitam.in"]);
}

#[tokio::test]
async fn delivery_failure_does_not_affect_the_response() {
    let mut app = common::spawn_app().await;
    app.outbox.refuse("asha@gitam.in");
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;

    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&found_id, "asha@gitam.in"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let failure = tokio::time::timeout(std::time::Duration::from_secs(2), app.failures.recv())
        .await
        .expect("no delivery failure reported")
        .unwrap();
    assert_eq!(failure.to, "asha@gitam.in");
}

#[tokio::test]
async fn claim_on_archived_item_is_rejected() {
    let app = common::spawn_app().await;
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;

    let resp = app
        .client
        .put(app.url(&format!("/items/found/{}", found_id)))
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let before = app.store.read_raw().await.unwrap();

    let resp = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&found_id, "asha@gitam.in"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(app.store.read_raw().await.unwrap(), before);
}

#[tokio::test]
async fn claim_without_notes_reads_back_identically() {
    let app = common::spawn_app().await;
    let found_id = common::create_found_item(&app, "Textbook", "ravi@gitam.in").await;

    let body: Value = app
        .client
        .post(app.url("/item-claim"))
        .json(&claim_body(&found_id, "asha@gitam.in"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let claimed = &body["foundItem"];
    assert!(claimed.get("claimNotes").is_none());

    let items = common::list_items(&app).await;
    assert_eq!(&items["foundItems"][0], claimed);
}
