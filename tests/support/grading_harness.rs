#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use gradecraft::GradingSession;
use gradecraft::feedback::FeedbackClient;
use gradecraft::llm::Provider;
use gradecraft::prompt::FeedbackPromptBuilder;
use gradecraft::rubric::{Rubric, templates};

/// Provider that replays scripted replies and records every prompt it sees.
/// `Err` entries fail the call with that message; once the script runs out
/// every call echoes a fixed reply.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<&str, &str>>) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(String::from).map_err(String::from))
                    .collect(),
            ),
            prompts: Arc::clone(&prompts),
        };
        (provider, prompts)
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn chat<'a>(
        &'a self,
        message: &'a str,
        _model: &'a str,
        _temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        self.prompts.lock().unwrap().push(message.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Scripted feedback.".to_string()));
        Box::pin(async move { reply.map_err(|e| anyhow::anyhow!(e)) })
    }
}

pub fn scripted_session(
    replies: Vec<Result<&str, &str>>,
) -> (GradingSession, Arc<Mutex<Vec<String>>>) {
    let (provider, prompts) = ScriptedProvider::new(replies);
    let client = FeedbackClient::new(Box::new(provider), "test-model", 0.7);
    let session = GradingSession::new(FeedbackPromptBuilder::new().unwrap(), client);
    (session, prompts)
}

pub fn internal_assessment_1() -> Rubric {
    templates::find(templates::INTERNAL_ASSESSMENT_1).unwrap()
}

pub const IA_COLUMNS: [&str; 5] = [
    "ai_(artificial_intelligence)",
    "ml_(machine_learning)",
    "dl_(deep_learning)",
    "stats_(statistics)",
    "python_programming",
];
