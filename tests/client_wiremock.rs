//! HTTP-level tests using wiremock.
//!
//! These pin the wire contract: discovery handshake, header auth, link
//! resolution, pagination chains, and the create/update payload shapes.

use anapi::{
    AnClient, AnError, Create, Donation, EmailAddress, Get, Identified, List, Person,
    PersonParams, PersonSignup, PostalAddress, Tag, Update,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn discovery_doc(base: &str) -> serde_json::Value {
    json!({
        "motd": "The road to happiness is paved with action!",
        "links": { "self": format!("{base}/") },
        "_links": {
            "osdi:people": { "href": format!("{base}/people") },
            "osdi:donations": { "href": format!("{base}/donations") },
            "osdi:tags": { "href": format!("{base}/tags") }
        }
    })
}

async fn mount_discovery(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_doc(&server.uri())))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_connect_fetches_discovery_and_exposes_motd() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();

    assert_eq!(
        client.motd(),
        Some("The road to happiness is paved with action!")
    );
    assert_eq!(client.base_url().as_str(), format!("{}/", server.uri()));
    assert!(client
        .resolve("people")
        .unwrap()
        .as_str()
        .ends_with("/people"));
}

#[tokio::test]
async fn test_requests_carry_osdi_api_token_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("OSDI-API-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_doc(&server.uri())))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/people/abc"))
        .and(header("OSDI-API-Token", "secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identifiers": ["action_network:abc"],
            "given_name": "Jane"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AnClient::connect("secret-token", &server.uri())
        .await
        .unwrap();
    let person = Person::get(&client, "abc").await.unwrap();
    assert_eq!(person.id().unwrap().primary(), "abc");
}

#[tokio::test]
async fn test_resolve_unknown_resource_carries_name() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    match client.resolve("events") {
        Err(AnError::UnknownResource(name)) => assert_eq!(name, "events"),
        other => panic!("expected UnknownResource, got {other:?}"),
    }
}

#[tokio::test]
async fn test_list_all_walks_next_chain_in_order() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let donation = |id: &str| {
        json!({
            "identifiers": [format!("action_network:{id}")],
            "created_date": "2017-08-14T14:54:26Z",
            "amount": "10.00"
        })
    };

    Mock::given(method("GET"))
        .and(path("/donations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "osdi:donations": [donation("d-1"), donation("d-2")] },
            "_links": { "next": { "href": format!("{}/donations/page2", server.uri()) } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/donations/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "osdi:donations": [donation("d-3")] },
            "_links": { "self": { "href": format!("{}/donations/page2", server.uri()) } }
        })))
        .mount(&server)
        .await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    let donations = Donation::list_all(&client).await.unwrap();

    let ids: Vec<String> = donations
        .iter()
        .map(|d| d.id().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["d-1", "d-2", "d-3"]);
}

#[tokio::test]
async fn test_list_all_discards_partial_results_on_failure() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    Mock::given(method("GET"))
        .and(path("/donations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "osdi:donations": [{
                "identifiers": ["action_network:d-1"],
                "created_date": "2017-08-14T14:54:26Z"
            }] },
            "_links": { "next": { "href": format!("{}/donations/page2", server.uri()) } }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/donations/page2"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "upstream exploded"
        })))
        .mount(&server)
        .await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    match Donation::list_all(&client).await {
        Err(AnError::ApiError {
            message,
            status_code,
        }) => {
            assert_eq!(message, "upstream exploded");
            assert_eq!(status_code, Some(500));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_endless_next_chain_trips_pagination_limit() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    // A page whose `next` points back at itself never terminates.
    Mock::given(method("GET"))
        .and(path("/donations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_embedded": { "osdi:donations": [] },
            "_links": { "next": { "href": format!("{}/donations", server.uri()) } }
        })))
        .mount(&server)
        .await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    match Donation::list_all(&client).await {
        Err(AnError::PaginationLimit { pages, url }) => {
            assert_eq!(pages, anapi::MAX_PAGES);
            assert!(url.contains("/donations"));
        }
        other => panic!("expected PaginationLimit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_surfaced() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    Mock::given(method("GET"))
        .and(path("/tags"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "42"))
        .mount(&server)
        .await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    match Tag::list_all(&client).await {
        Err(AnError::RateLimited { retry_after_secs }) => {
            assert_eq!(retry_after_secs, Some(42));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_person_posts_nested_payload() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    // The exact wire shape: fields nested under `person`, tags alongside.
    let expected_body = json!({
        "person": {
            "given_name": "John",
            "family_name": "Doe",
            "postal_addresses": [{
                "address_lines": ["800 Nowhere St.", "Apt. 1"],
                "locality": "Philadelphia",
                "region": "PA",
                "country": "US",
                "postal_code": "19125"
            }],
            "email_addresses": [{ "address": "john.doe@example.com" }]
        },
        "add_tags": ["volunteer"]
    });

    Mock::given(method("POST"))
        .and(path("/people"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identifiers": ["action_network:new-person"],
            "given_name": "John",
            "family_name": "Doe"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let signup = PersonSignup {
        person: PersonParams {
            given_name: Some("John".to_string()),
            family_name: Some("Doe".to_string()),
            postal_addresses: vec![PostalAddress {
                address_lines: vec!["800 Nowhere St.".to_string(), "Apt. 1".to_string()],
                locality: Some("Philadelphia".to_string()),
                region: Some("PA".to_string()),
                country: Some("US".to_string()),
                postal_code: Some("19125".to_string()),
                primary: None,
            }],
            email_addresses: vec![EmailAddress {
                address: Some("john.doe@example.com".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        },
        add_tags: vec!["volunteer".to_string()],
    };

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    let created = Person::create(&client, &signup).await.unwrap();
    assert_eq!(created.id().unwrap().primary(), "new-person");
}

#[tokio::test]
async fn test_update_person_puts_flat_payload() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    // Updates send the same fields unnested; this asymmetry is the
    // service's contract.
    let expected_body = json!({
        "family_name": "Doe-Smith",
        "email_addresses": [{ "address": "jane@example.com" }]
    });

    Mock::given(method("PUT"))
        .and(path("/people/abc-123"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "identifiers": ["action_network:abc-123"],
            "family_name": "Doe-Smith"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = PersonParams {
        family_name: Some("Doe-Smith".to_string()),
        email_addresses: vec![EmailAddress {
            address: Some("jane@example.com".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    let updated = Person::update(&client, "abc-123", &params).await.unwrap();
    assert_eq!(updated.family_name.as_deref(), Some("Doe-Smith"));
}

#[tokio::test]
async fn test_missing_identifiers_is_contract_violation() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    Mock::given(method("GET"))
        .and(path("/people/ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "given_name": "Ghost"
        })))
        .mount(&server)
        .await;

    let client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    let person = Person::get(&client, "ghost").await.unwrap();
    match person.id() {
        Err(AnError::DataContract(_)) => {}
        other => panic!("expected DataContract, got {other:?}"),
    }
}

#[tokio::test]
async fn test_refresh_links_supersedes_snapshot() {
    let server = MockServer::start().await;

    // First discovery fetch: no `events` relation.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_doc(&server.uri())))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let mut client = AnClient::connect("test-token", &server.uri()).await.unwrap();
    let old_links = client.links();
    assert!(client.resolve("events").is_err());

    // Second discovery fetch gains one.
    let mut doc = discovery_doc(&server.uri());
    doc["_links"]["osdi:events"] = json!({ "href": format!("{}/events", server.uri()) });
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(doc))
        .mount(&server)
        .await;

    client.refresh_links().await.unwrap();
    assert!(client.resolve("events").is_ok());

    // The snapshot taken before the refresh is unchanged.
    assert!(old_links.resolve("events").is_err());
    assert!(old_links.resolve("people").is_ok());
}
