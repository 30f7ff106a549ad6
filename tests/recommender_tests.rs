//! Recommendation service integration tests
//!
//! Run the HTTP adapter against a local wiremock server.

use voice_sampler::application::ports::{RecommendationError, SongRecommender};
use voice_sampler::domain::audio::{AudioData, PcmClip};
use voice_sampler::domain::recommendation::Recommendation;
use voice_sampler::domain::session::VoiceSamples;
use voice_sampler::infrastructure::HttpRecommender;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clip(level: i16) -> AudioData {
    AudioData::from_pcm(&PcmClip {
        samples: vec![0, level, -level, level / 2, 0],
        sample_rate: 16_000,
    })
    .unwrap()
}

fn samples() -> VoiceSamples {
    VoiceSamples {
        high: clip(1000),
        low: clip(2000),
        normal: clip(3000),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

async fn server_returning(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn posts_three_named_wav_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let recommender = HttpRecommender::new(&server.uri()).unwrap();
    let samples = samples();
    recommender.recommend(&samples).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = &requests[0].body;

    let mut last = 0;
    for (field, audio) in [("high", &samples.high), ("low", &samples.low), ("norm", &samples.normal)] {
        let disposition = format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}.wav\"",
            field, field
        );
        let at = find(body, disposition.as_bytes())
            .unwrap_or_else(|| panic!("missing part {}", field));
        assert!(at >= last, "part {} out of order", field);
        last = at;

        let rest = &body[at..];
        let type_at = find(rest, b"Content-Type: audio/wav").expect("part content type");
        let data_at = find(rest, audio.data()).expect("part bytes");
        assert!(type_at < data_at);
    }
}

#[tokio::test]
async fn returns_recommendations_in_order() {
    let server = server_returning(ResponseTemplate::new(200).set_body_string(
        r#"[{"name":"A","artist":"X"},{"name":"B","artist":"Y"}]"#,
    ))
    .await;

    let recommender = HttpRecommender::new(&server.uri()).unwrap();
    let songs = recommender.recommend(&samples()).await.unwrap();

    assert_eq!(
        songs,
        vec![Recommendation::new("A", "X"), Recommendation::new("B", "Y")]
    );
}

#[tokio::test]
async fn empty_list_is_success() {
    let server = server_returning(ResponseTemplate::new(200).set_body_string("[]")).await;

    let recommender = HttpRecommender::new(&server.uri()).unwrap();
    assert!(recommender.recommend(&samples()).await.unwrap().is_empty());
}

#[tokio::test]
async fn server_error_is_http_status() {
    let server =
        server_returning(ResponseTemplate::new(500).set_body_string("model crashed")).await;

    let recommender = HttpRecommender::new(&server.uri()).unwrap();
    let err = recommender.recommend(&samples()).await.unwrap_err();

    match err {
        RecommendationError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model crashed");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = server_returning(ResponseTemplate::new(200).set_body_string("<html>")).await;

    let recommender = HttpRecommender::new(&server.uri()).unwrap();
    let err = recommender.recommend(&samples()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::ParseError(_)));
}

#[tokio::test]
async fn unreachable_service_is_request_failure() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let recommender = HttpRecommender::new(&uri).unwrap();
    let err = recommender.recommend(&samples()).await.unwrap_err();
    assert!(matches!(err, RecommendationError::RequestFailed(_)));
    assert!(!err.to_string().is_empty());
}
