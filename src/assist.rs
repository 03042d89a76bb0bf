//! Language-model helpers: health articles for the clinic feed and
//! wait-time predictions for the front desk.
//!
//! The model itself sits behind [`PromptBackend`]. Each helper validates
//! its input, renders a fixed prompt, and parses the backend's JSON reply.
//! Nothing is retried here; a failed call is reported to the caller, who
//! can ask again.
//!
//! These are library entry points only. The bundled CLI ships no model
//! backend, so an embedding application supplies its own `PromptBackend`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Prompt backend failed: {0}")]
    Backend(String),

    #[error("Backend reply was not in the expected shape: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Something that turns a prompt into a JSON reply.
pub trait PromptBackend {
    fn generate(&self, prompt: &str) -> Result<String, AssistError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthArticleRequest {
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthArticle {
    pub title: String,
    /// Markdown body.
    pub content: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimeRequest {
    /// Age and symptoms.
    pub patient_description: String,
    pub doctor_specialization: String,
    pub queue_length: u32,
    /// e.g. Morning, Afternoon.
    pub time_of_day: String,
    /// e.g. Walk-in, Scheduled.
    pub appointment_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitTimePrediction {
    pub predicted_wait_time_minutes: f64,
    pub reasoning: String,
}

const MIN_DESCRIPTION_LEN: usize = 10;

impl HealthArticleRequest {
    pub fn validate(&self) -> Result<(), AssistError> {
        if self.topic.trim().is_empty() {
            return Err(AssistError::Validation("topic cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        format!(
            "You are a health and wellness writer for a clinic's blog.\n\n\
             Write an informative and engaging article about the following topic: {topic}.\n\n\
             The article should be well-structured, easy to read, and provide practical advice.\n\
             Format the content in Markdown.\n\n\
             Generate a suitable title and a few relevant tags for the article.\n\
             Reply with a JSON object with the fields \"title\", \"content\" and \"tags\".",
            topic = self.topic.trim()
        )
    }
}

impl WaitTimeRequest {
    pub fn validate(&self) -> Result<(), AssistError> {
        if self.patient_description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(AssistError::Validation(format!(
                "description must be at least {} characters",
                MIN_DESCRIPTION_LEN
            )));
        }
        let required = [
            ("specialization", &self.doctor_specialization),
            ("time of day", &self.time_of_day),
            ("appointment type", &self.appointment_type),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AssistError::Validation(format!("{} must be selected", field)));
            }
        }
        Ok(())
    }

    pub fn prompt(&self) -> String {
        format!(
            "You are an AI assistant that predicts patient wait times at a clinic.\n\n\
             Based on the patient's description, doctor's specialization, current queue length, \
             time of day, and appointment type, predict how long the patient will have to wait \
             (in minutes).\n\n\
             Explain your reasoning for the predicted wait time.\n\n\
             Patient Description: {}\n\
             Doctor Specialization: {}\n\
             Queue Length: {}\n\
             Time of Day: {}\n\
             Appointment Type: {}\n\n\
             Reply with a JSON object with the fields \"predictedWaitTimeMinutes\" and \"reasoning\".",
            self.patient_description.trim(),
            self.doctor_specialization,
            self.queue_length,
            self.time_of_day,
            self.appointment_type
        )
    }
}

fn run<T>(backend: &dyn PromptBackend, flow: &str, prompt: &str) -> Result<T, AssistError>
where
    T: for<'de> Deserialize<'de>,
{
    debug!(flow, prompt_len = prompt.len(), "sending prompt");
    let reply = backend.generate(prompt).map_err(|e| {
        warn!(flow, error = %e, "prompt backend failed");
        e
    })?;
    serde_json::from_str(reply.trim()).map_err(|e| {
        warn!(flow, error = %e, "unparseable backend reply");
        AssistError::MalformedOutput(e)
    })
}

pub fn generate_health_article(
    backend: &dyn PromptBackend,
    request: &HealthArticleRequest,
) -> Result<HealthArticle, AssistError> {
    request.validate()?;
    run(backend, "health_article", &request.prompt())
}

pub fn predict_wait_time(
    backend: &dyn PromptBackend,
    request: &WaitTimeRequest,
) -> Result<WaitTimePrediction, AssistError> {
    request.validate()?;
    let prediction: WaitTimePrediction = run(backend, "wait_time", &request.prompt())?;
    if !prediction.predicted_wait_time_minutes.is_finite()
        || prediction.predicted_wait_time_minutes < 0.0
    {
        return Err(AssistError::Backend(format!(
            "predicted a wait of {} minutes",
            prediction.predicted_wait_time_minutes
        )));
    }
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CannedBackend {
        reply: Result<String, String>,
        prompts: RefCell<Vec<String>>,
    }

    impl CannedBackend {
        fn replying(reply: &str) -> Self {
            CannedBackend {
                reply: Ok(reply.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            CannedBackend {
                reply: Err(message.to_string()),
                prompts: RefCell::new(Vec::new()),
            }
        }
    }

    impl PromptBackend for CannedBackend {
        fn generate(&self, prompt: &str) -> Result<String, AssistError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply.clone().map_err(AssistError::Backend)
        }
    }

    fn wait_request() -> WaitTimeRequest {
        WaitTimeRequest {
            patient_description: "45 year old with mild chest pain".to_string(),
            doctor_specialization: "Cardiology".to_string(),
            queue_length: 4,
            time_of_day: "Morning".to_string(),
            appointment_type: "Walk-in".to_string(),
        }
    }

    #[test]
    fn should_parse_article_reply() {
        let backend = CannedBackend::replying(
            r##"{"title":"Sleep Well","content":"# Sleep\nRest more.","tags":["sleep","habits"]}"##,
        );
        let article = generate_health_article(
            &backend,
            &HealthArticleRequest { topic: "sleep hygiene".to_string() },
        )
        .unwrap();

        assert_eq!(article.title, "Sleep Well");
        assert!(article.content.starts_with("# Sleep"));
        assert_eq!(article.tags, vec!["sleep", "habits"]);
        assert!(backend.prompts.borrow()[0].contains("topic: sleep hygiene."));
    }

    #[test]
    fn should_reject_blank_topic_without_calling_backend() {
        let backend = CannedBackend::replying("{}");
        let err = generate_health_article(&backend, &HealthArticleRequest { topic: " ".into() })
            .unwrap_err();
        assert!(matches!(err, AssistError::Validation(_)));
        assert!(backend.prompts.borrow().is_empty());
    }

    #[test]
    fn should_predict_wait_time() {
        let backend = CannedBackend::replying(
            r#"{"predictedWaitTimeMinutes": 25, "reasoning": "Four patients ahead."}"#,
        );
        let prediction = predict_wait_time(&backend, &wait_request()).unwrap();
        assert_eq!(prediction.predicted_wait_time_minutes, 25.0);

        let prompts = backend.prompts.borrow();
        let prompt = &prompts[0];
        assert!(prompt.contains("Queue Length: 4"));
        assert!(prompt.contains("Doctor Specialization: Cardiology"));
    }

    #[test]
    fn should_validate_wait_time_request() {
        let backend = CannedBackend::replying("{}");

        let mut request = wait_request();
        request.patient_description = "cough".to_string();
        assert!(matches!(
            predict_wait_time(&backend, &request),
            Err(AssistError::Validation(_))
        ));

        let mut request = wait_request();
        request.doctor_specialization.clear();
        assert!(matches!(
            predict_wait_time(&backend, &request),
            Err(AssistError::Validation(_))
        ));
    }

    #[test]
    fn should_surface_backend_and_parse_failures() {
        let backend = CannedBackend::failing("quota exceeded");
        assert!(matches!(
            predict_wait_time(&backend, &wait_request()),
            Err(AssistError::Backend(_))
        ));

        let backend = CannedBackend::replying("about twenty minutes");
        assert!(matches!(
            predict_wait_time(&backend, &wait_request()),
            Err(AssistError::MalformedOutput(_))
        ));

        let backend = CannedBackend::replying(r#"{"predictedWaitTimeMinutes": -5, "reasoning": ""}"#);
        assert!(matches!(
            predict_wait_time(&backend, &wait_request()),
            Err(AssistError::Backend(_))
        ));
    }
}
