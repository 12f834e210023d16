//! Image orchestrator against mocked upstreams.

mod support;

use genstudio::prelude::*;
use support::{PNG_BYTES, body_json, studio, studio_with_google_key};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn dalle_response(b64: &str) -> serde_json::Value {
    serde_json::json!({ "created": 1733837122, "data": [{ "b64_json": b64 }] })
}

#[tokio::test]
async fn openai_issues_one_request_per_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(header("authorization", "Bearer sk-test"))
        .and(|req: &Request| {
            let v = body_json(req);
            v["model"] == "dall-e-3"
                && v["n"] == 1
                && v["size"] == "1792x1024"
                && v["response_format"] == "b64_json"
                && v["prompt"] == "a lighthouse. Avoid: fog"
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(dalle_response("aGVsbG8=")))
        .expect(3)
        .mount(&server)
        .await;

    let request = ImageRequest::new("a lighthouse")
        .with_negative_prompt("fog")
        .with_count(3)
        .with_aspect_ratio(AspectRatio::Landscape);
    let images = studio(&server)
        .generate_images(ProviderId::OpenAi, &Credential::new("sk-test"), &request)
        .await
        .expect("images");

    assert_eq!(images.len(), 3);
    assert!(images.iter().all(|i| i == "data:image/png;base64,aGVsbG8="));
}

#[tokio::test]
async fn unsupported_ratio_uses_square_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(|req: &Request| body_json(req)["size"] == "1024x1024")
        .respond_with(ResponseTemplate::new(200).set_body_json(dalle_response("aGk=")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ImageRequest::new("a fox")
        .with_count(1)
        .with_aspect_ratio(AspectRatio::Standard);
    let images = studio(&server)
        .generate_images(ProviderId::OpenAi, &Credential::new("sk-test"), &request)
        .await
        .expect("images");
    assert_eq!(images, vec!["data:image/png;base64,aGk=".to_string()]);
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let studio = studio(&server);
    for provider in [ProviderId::OpenAi, ProviderId::HuggingFaceImage] {
        let err = studio
            .generate_images(provider, &Credential::new("   "), &ImageRequest::new("a cat"))
            .await
            .unwrap_err();
        assert_eq!(err, StudioError::MissingCredential { provider });
        assert_eq!(err.to_string(), format!("An API key is required for {provider}."));
    }
}

#[tokio::test]
async fn gemini_returns_every_image_from_one_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-3.0-generate-002:predict"))
        .and(header("x-goog-api-key", "g-key"))
        .and(|req: &Request| {
            let v = body_json(req);
            v["instances"][0]["prompt"] == "a castle"
                && v["parameters"]["sampleCount"] == 2
                && v["parameters"]["aspectRatio"] == "9:16"
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [
                { "bytesBase64Encoded": "b25l", "mimeType": "image/png" },
                { "bytesBase64Encoded": "dHdv", "mimeType": "image/jpeg" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ImageRequest::new("a castle").with_aspect_ratio(AspectRatio::Portrait);
    let images = studio_with_google_key(&server, "g-key")
        .generate_images(ProviderId::Gemini, &Credential::empty(), &request)
        .await
        .expect("images");
    assert_eq!(
        images,
        vec![
            "data:image/png;base64,b25l".to_string(),
            "data:image/jpeg;base64,dHdv".to_string()
        ]
    );
}

#[tokio::test]
async fn gemini_partial_batch_is_missing_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/imagen-3.0-generate-002:predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "predictions": [{ "bytesBase64Encoded": "b25l", "mimeType": "image/png" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = studio_with_google_key(&server, "g-key")
        .generate_images(ProviderId::Gemini, &Credential::empty(), &ImageRequest::new("a castle"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::MissingOutput(_)));
}

#[tokio::test]
async fn gemini_without_any_key_is_missing_credential() {
    let server = MockServer::start().await;
    let err = studio(&server)
        .generate_images(ProviderId::Gemini, &Credential::empty(), &ImageRequest::new("x"))
        .await
        .unwrap_err();
    assert!(err.is_missing_credential());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn huggingface_binary_body_becomes_data_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/stabilityai/stable-diffusion-3-medium-diffusers"))
        .and(header("authorization", "Bearer hf-test"))
        .and(|req: &Request| {
            let v = body_json(req);
            v["inputs"] == "a robot"
                && v["parameters"]["width"] == 1344
                && v["parameters"]["height"] == 768
        })
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/octet-stream")
                .set_body_bytes(PNG_BYTES),
        )
        .expect(2)
        .mount(&server)
        .await;

    let request = ImageRequest::new("a robot").with_aspect_ratio(AspectRatio::Landscape);
    let images = studio(&server)
        .generate_images(ProviderId::HuggingFaceImage, &Credential::new("hf-test"), &request)
        .await
        .expect("images");
    assert_eq!(images.len(), 2);
    for image in &images {
        assert!(image.starts_with("data:image/png;base64,"));
        let binary = genstudio::utils::to_binary(image).unwrap();
        assert_eq!(binary.bytes, PNG_BYTES);
    }
}

#[tokio::test]
async fn one_failed_call_fails_the_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let err = studio(&server)
        .generate_images(
            ProviderId::OpenAi,
            &Credential::new("sk-bad"),
            &ImageRequest::new("a cat").with_count(2),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn zero_count_and_blank_prompt_are_rejected_locally() {
    let server = MockServer::start().await;
    let studio = studio(&server);
    let key = Credential::new("sk-test");

    let err = studio
        .generate_images(ProviderId::OpenAi, &key, &ImageRequest::new("a cat").with_count(0))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::InvalidInput(_)));

    let err = studio
        .generate_images(ProviderId::OpenAi, &key, &ImageRequest::new("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::MissingInput(_)));

    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn regenerate_requests_a_single_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dalle_response("b25l")))
        .expect(1)
        .mount(&server)
        .await;

    let image = studio(&server)
        .regenerate_image(
            ProviderId::OpenAi,
            &Credential::new("sk-test"),
            &ImageRequest::new("a cat").with_count(4),
        )
        .await
        .expect("image");
    assert_eq!(image, "data:image/png;base64,b25l");
}

#[tokio::test]
async fn provider_of_another_modality_is_unsupported() {
    let server = MockServer::start().await;
    let err = studio(&server)
        .generate_images(ProviderId::GeminiVeo, &Credential::new("k"), &ImageRequest::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::UnsupportedProvider { .. }));
}
