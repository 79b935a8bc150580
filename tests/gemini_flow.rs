use gradecraft::GradingSession;
use gradecraft::feedback::{FeedbackClient, FeedbackStatus};
use gradecraft::llm::GeminiProvider;
use gradecraft::prompt::{FeedbackPromptBuilder, FeedbackStyle, Submission};
use gradecraft::rubric::{ScoreSet, templates};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn session_against(server: &MockServer) -> GradingSession {
    let provider =
        GeminiProvider::with_base_url(&server.uri(), Some("test-key"), reqwest::Client::new());
    let client = FeedbackClient::new(Box::new(provider), "gemini-1.5-flash", 0.7);
    GradingSession::new(FeedbackPromptBuilder::new().unwrap(), client)
}

#[tokio::test]
async fn generate_round_trips_through_gemini() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Great grasp of statistics."}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_against(&server).await;
    let rubric = templates::find(templates::INTERNAL_ASSESSMENT_2).unwrap();
    let scores: ScoreSet = [("Stats (Statistics)", 4), ("Python Programming", 2)]
        .into_iter()
        .collect();

    let record = session
        .generate(
            Submission::new("Ada").with_assignment(Some("Final")),
            &rubric,
            &scores,
            FeedbackStyle::Detailed,
        )
        .await
        .unwrap();
    assert_eq!(record.status(), FeedbackStatus::Generated);
    assert_eq!(record.feedback(), "Great grasp of statistics.");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Student: Ada\nAssignment: Final\n"));
    assert!(prompt.contains("Overall Score: 1.2/4.0 (30.0%)"));
    assert!(prompt.contains("- Stats (Statistics): 4/4 (Excellent)"));
    assert!(prompt.contains("- AI (Artificial Intelligence): 0/4 (Not Assessed)"));
    assert_eq!(body["generationConfig"]["temperature"], 0.7);
}

#[tokio::test]
async fn api_rejection_becomes_failed_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let mut session = session_against(&server).await;
    let rubric = templates::find(templates::INTERNAL_ASSESSMENT_1).unwrap();

    let record = session
        .generate(
            Submission::new("Grace"),
            &rubric,
            &ScoreSet::new(),
            FeedbackStyle::Brief,
        )
        .await
        .unwrap();

    assert!(record.is_failed());
    assert!(record.feedback().starts_with("Error generating feedback: "));
    assert!(record.feedback().contains("quota exhausted"));
    assert_eq!(session.history().len(), 1);
}
