//! `MarvelClient` behavior with a deterministic stub transport.

use std::sync::Arc;

use marvel_core::{
    ApiError, ClientConfig, FixedClock, ImagePath, MarvelClient, StubReply, StubTransport,
};

const COMIC_URL: &str =
    "https://gateway.marvel.com/v1/public/comics/1111?apikey=1234&ts=1&hash=ffd275c5130566a2916217b101f26150";
const LIST_URL: &str =
    "https://gateway.marvel.com/v1/public/comics?apikey=1234&ts=1&hash=ffd275c5130566a2916217b101f26150";

const MILESTONES: &str = r#"{ "code": 200, "data": { "count": 1, "results": [{ "id": 5813, "title": "Marvel Milestones (2005) #22", "issueNumber": 22, "description": null, "thumbnail": { "path": "http://i.annihil.us/u/prod/marvel/i/mg/b/40/image_not_available", "extension": "jpg" }, "creators": { "available": 0, "collectionURI": "http://gateway.marvel.com/v1/public/comics/5813/creators", "items": [], "returned": 0 } }]}}"#;

use mock_server::PLACEHOLDER_PNG;

fn client(stub: StubTransport) -> (MarvelClient, Arc<StubTransport>) {
    let stub = Arc::new(stub);
    let client = MarvelClient::with_clock(
        ClientConfig::new("1234", "abcd"),
        stub.clone(),
        Arc::new(FixedClock::new("1")),
    );
    (client, stub)
}

// ---------------------------------------------------------------------------
// fetch_comic
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_comic_success_returns_flattened_comic() {
    let (client, stub) = client(StubTransport::new().with_reply(COMIC_URL, StubReply::ok(MILESTONES)));

    let comic = client.fetch_comic(1111).await.unwrap();
    assert_eq!(comic.id, 5813);
    assert_eq!(comic.title, "Marvel Milestones");
    assert_eq!(comic.issue_number, 22);
    assert_eq!(comic.description, None);
    assert!(comic.authors.is_empty());
    assert!(comic.image_path.path.ends_with(ImagePath::NOT_AVAILABLE));
    assert!(comic.image_path.is_not_available());

    let requested: Vec<String> = stub.requests().iter().map(|u| u.to_string()).collect();
    assert_eq!(requested, vec![COMIC_URL.to_string()]);
}

#[tokio::test]
async fn fetch_comic_404_is_non_success_status() {
    let (client, _) = client(StubTransport::new().with_reply(COMIC_URL, StubReply::status(404, "")));

    let err = client.fetch_comic(1111).await.unwrap_err();
    assert_eq!(err, ApiError::NonSuccessStatus { status: 404 });
}

#[tokio::test]
async fn fetch_comic_undecodable_body_is_malformed() {
    let (client, _) =
        client(StubTransport::new().with_reply(COMIC_URL, StubReply::ok(r#""invalid":"data""#)));

    let err = client.fetch_comic(1111).await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
}

#[tokio::test]
async fn fetch_comic_empty_results_is_empty() {
    let body = r#"{"code":200,"data":{"count":0,"results":[]}}"#;
    let (client, _) = client(StubTransport::new().with_reply(COMIC_URL, StubReply::ok(body)));

    let err = client.fetch_comic(1111).await.unwrap_err();
    assert_eq!(err, ApiError::Empty);
}

#[tokio::test]
async fn fetch_comic_empty_body_is_empty_body() {
    let (client, _) = client(StubTransport::new().with_reply(COMIC_URL, StubReply::ok(Vec::new())));

    let err = client.fetch_comic(1111).await.unwrap_err();
    assert_eq!(err, ApiError::EmptyBody);
}

#[tokio::test]
async fn fetch_comic_transport_failure_is_unreachable() {
    let (client, _) = client(StubTransport::new().with_reply(COMIC_URL, StubReply::error("offline")));

    let err = client.fetch_comic(1111).await.unwrap_err();
    assert_eq!(err, ApiError::Unreachable("offline".to_string()));
}

// ---------------------------------------------------------------------------
// fetch_comics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_comics_empty_results_is_empty_list() {
    let body = r#"{"code":200,"data":{"count":0,"results":[]}}"#;
    let (client, _) = client(StubTransport::new().with_reply(LIST_URL, StubReply::ok(body)));

    let comics = client.fetch_comics().await.unwrap();
    assert!(comics.is_empty());
}

#[tokio::test]
async fn fetch_comics_keeps_order() {
    let body = r#"{"data":{"results":[
        {"id":2,"title":"Second TPB","issueNumber":0,"thumbnail":{"path":"http://x/2","extension":"jpg"},"creators":{"items":[{"name":"B"}]}},
        {"id":1,"title":"First (1963) #1","issueNumber":1,"thumbnail":{"path":"http://x/1","extension":"jpg"},"creators":{"items":[{"name":"A"},{"name":"C"}]}}
    ]}}"#;
    let (client, _) = client(StubTransport::new().with_reply(LIST_URL, StubReply::ok(body)));

    let comics = client.fetch_comics().await.unwrap().into_vec();
    assert_eq!(comics.len(), 2);
    assert_eq!(comics[0].id, 2);
    assert_eq!(comics[0].title, "Second");
    assert_eq!(comics[1].title, "First");
    assert_eq!(comics[1].authors, vec!["A", "C"]);
}

#[tokio::test]
async fn fetch_comics_server_error_is_non_success_status() {
    let (client, _) = client(StubTransport::new().with_reply(LIST_URL, StubReply::status(500, "oops")));

    let err = client.fetch_comics().await.unwrap_err();
    assert_eq!(err, ApiError::NonSuccessStatus { status: 500 });
}

// ---------------------------------------------------------------------------
// fetch_image
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_image_requests_https_detail_variant() {
    let url = "https://i.annihil.us/u/prod/marvel/i/mg/c/e0/5d11b4b5c0e08/detail.jpg";
    let (client, stub) = client(StubTransport::new().with_reply(url, StubReply::ok(PLACEHOLDER_PNG)));
    let path = ImagePath::new("http://i.annihil.us/u/prod/marvel/i/mg/c/e0/5d11b4b5c0e08", "jpg");

    let image = client.fetch_image(&path).await.unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.bytes, PLACEHOLDER_PNG);
    assert_eq!((image.width, image.height), (1, 1));
    assert_eq!(stub.requests()[0].scheme(), "https");
}

#[tokio::test]
async fn fetch_image_truncated_body_is_undecodable() {
    let truncated = &PLACEHOLDER_PNG[..PLACEHOLDER_PNG.len() / 2];
    let (client, _) = client(StubTransport::new().with_fallback(StubReply::ok(truncated)));
    let path = ImagePath::new("http://i.annihil.us/mg/1/2/abc", "png");

    let err = client.fetch_image(&path).await.unwrap_err();
    assert_eq!(err, ApiError::UndecodableImage);
}

#[tokio::test]
async fn fetch_image_non_image_is_undecodable() {
    let (client, _) = client(StubTransport::new().with_fallback(StubReply::ok("<html></html>")));
    let path = ImagePath::new("http://i.annihil.us/mg/1/2/abc", "jpg");

    let err = client.fetch_image(&path).await.unwrap_err();
    assert_eq!(err, ApiError::UndecodableImage);
}

#[tokio::test]
async fn fetch_image_invalid_path_is_invalid_url() {
    let (client, stub) = client(StubTransport::new().with_fallback(StubReply::ok(PLACEHOLDER_PNG)));
    let path = ImagePath::new("no scheme here", "jpg");

    let err = client.fetch_image(&path).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)));
    assert!(stub.requests().is_empty());
}

// ---------------------------------------------------------------------------
// independent instances
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clients_with_different_keys_sign_differently() {
    let stub = Arc::new(StubTransport::new().with_fallback(StubReply::ok(MILESTONES)));
    let a = MarvelClient::with_clock(ClientConfig::new("1234", "abcd"), stub.clone(), Arc::new(FixedClock::new("1")));
    let b = MarvelClient::with_clock(ClientConfig::new("5678", "efgh"), stub.clone(), Arc::new(FixedClock::new("1")));

    a.fetch_comic(1111).await.unwrap();
    b.fetch_comic(1111).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].as_str(), COMIC_URL);
    assert_ne!(requests[0].query(), requests[1].query());
}
