use std::sync::Arc;

use tracing::info;

use super::dashboard::{activity_feed, ActivityItem, DashboardStats, UserProfile};
use crate::app::Config;
use crate::assistant::HttpResponder;
use crate::chat::ChatController;
use crate::directory::{Directory, JsonFileRecordSource, RecordSource, StaticRecordSource};
use crate::utils::PortalError;

/// Everything one portal session owns: the directory, the chat, the user.
/// Built once at startup and handed to whatever drives the UI.
pub struct Portal {
    directory: Directory,
    chat: ChatController,
    profile: UserProfile,
    source_label: String,
}

impl Portal {
    /// Load the records from `source` and assemble a portal around `chat`.
    /// Every failure here is an initialization failure.
    pub async fn bootstrap(
        source: &dyn RecordSource,
        chat: ChatController,
        profile: UserProfile,
    ) -> Result<Self, PortalError> {
        let records = source.load().await.map_err(into_init_error)?;
        let directory = Directory::new(records)?;
        info!(
            source = %source.describe(),
            alumni = directory.len(),
            "portal initialized"
        );

        Ok(Self {
            directory,
            chat,
            profile,
            source_label: source.describe(),
        })
    }

    /// Wire the HTTP assistant and the configured record source
    pub async fn from_config(config: &Config) -> Result<Self, PortalError> {
        let timeout = config.assistant.timeout();
        let responder = HttpResponder::new(
            &config.assistant.endpoint,
            config.assistant.session_cookie.clone(),
            timeout,
        )
        .map_err(into_init_error)?;
        info!(endpoint = %responder.endpoint(), "assistant endpoint configured");

        let mut chat = ChatController::new(Arc::new(responder));
        if let Some(limit) = timeout {
            chat = chat.with_timeout(limit);
        }

        let source: Box<dyn RecordSource> = match &config.directory.data_file {
            Some(path) => Box::new(JsonFileRecordSource::new(path)),
            None => Box::new(StaticRecordSource),
        };

        Self::bootstrap(source.as_ref(), chat, config.profile.clone()).await
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn chat(&self) -> &ChatController {
        &self.chat
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::new(self.directory.len())
    }

    pub fn activity(&self) -> Vec<ActivityItem> {
        activity_feed()
    }

    /// Send a connection request; `None` for an unknown id
    pub fn connect(&self, id: u64) -> Option<String> {
        let alumni = self.directory.find(id)?;
        info!(alumni_id = id, "connection request sent");
        Some(format!("Connection request sent to {}!", alumni.name))
    }

    /// Multi-line profile summary; `None` for an unknown id
    pub fn profile_card(&self, id: u64) -> Option<String> {
        self.directory.find(id).map(|alumni| {
            format!(
                "Viewing profile for {}\n\nPosition: {}\nCompany: {}\nLocation: {}\nEmail: {}",
                alumni.name, alumni.position, alumni.company, alumni.location, alumni.email
            )
        })
    }
}

fn into_init_error(err: PortalError) -> PortalError {
    match err {
        PortalError::InitError(_) => err,
        other => PortalError::InitError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::MockResponder;
    use crate::directory::AlumniRecord;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl RecordSource for FailingSource {
        async fn load(&self) -> Result<Vec<AlumniRecord>, PortalError> {
            Err(PortalError::NetworkError("directory service unreachable".to_string()))
        }

        fn describe(&self) -> String {
            "failing source".to_string()
        }
    }

    fn chat() -> ChatController {
        ChatController::new(Arc::new(MockResponder::new()))
    }

    async fn sample_portal() -> Portal {
        Portal::bootstrap(&StaticRecordSource, chat(), UserProfile::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_bootstrap_loads_directory() {
        let portal = sample_portal().await;
        assert_eq!(portal.directory().len(), 5);
        assert_eq!(portal.stats().connections, 5);
        assert_eq!(portal.source_label(), "built-in sample directory");
        assert_eq!(portal.activity().len(), 4);
    }

    #[tokio::test]
    async fn test_bootstrap_failure_is_init_error() {
        let result = Portal::bootstrap(&FailingSource, chat(), UserProfile::default()).await;
        match result {
            Err(PortalError::InitError(msg)) => assert!(msg.contains("unreachable")),
            Err(other) => panic!("expected init error, got {other}"),
            Ok(_) => panic!("expected init error"),
        }
    }

    #[tokio::test]
    async fn test_connect_and_profile_card() {
        let portal = sample_portal().await;
        assert_eq!(
            portal.connect(1).as_deref(),
            Some("Connection request sent to Sarah Johnson!")
        );
        assert!(portal.connect(99).is_none());

        let card = portal.profile_card(4).unwrap();
        assert!(card.starts_with("Viewing profile for David Kim"));
        assert!(card.contains("Company: Goldman Sachs"));
        assert!(card.contains("Email: david.kim@example.com"));
    }

    #[tokio::test]
    async fn test_from_config_with_missing_data_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.directory.data_file = Some(dir.path().join("missing.json"));

        let result = Portal::from_config(&config).await;
        assert!(matches!(result, Err(PortalError::InitError(_))));
    }
}
