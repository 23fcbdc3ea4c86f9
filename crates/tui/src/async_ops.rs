use std::sync::Arc;
use std::time::Duration;

use moodroom_api::CredentialsRequest;
use moodroom_api_client::ApiClient;
use moodroom_core::config::ClientConfig;

/// Commands that require async I/O (network calls). The realtime channel and
/// the mood poller are not here — they are long-lived tasks owned by the
/// session, not one-shot commands.
pub enum AsyncCommand {
    Login { username: String, password: String },
    Signup { username: String, password: String },
    FetchSummary,
}

/// Results returned by async commands. `Err` carries the inline-displayable
/// detail, already extracted from the response body.
pub enum CommandResult {
    Login(Result<String, String>),   // Ok(access_token)
    Signup(Result<String, String>),  // Ok(username)
    Summary(Result<String, String>), // Ok(summary text)
}

fn make_client(config: &ClientConfig) -> Result<ApiClient, String> {
    ApiClient::new(&config.server.url, Duration::from_secs(15)).map_err(|e| e.detail())
}

pub async fn execute(
    cmd: AsyncCommand,
    config: &ClientConfig,
    session_client: Option<Arc<ApiClient>>,
) -> CommandResult {
    match cmd {
        AsyncCommand::Login { username, password } => {
            let result = async {
                let client = make_client(config)?;
                let resp = client
                    .login(&CredentialsRequest { username, password })
                    .await
                    .map_err(|e| e.detail())?;
                Ok(resp.access_token)
            }
            .await;
            CommandResult::Login(result)
        }

        AsyncCommand::Signup { username, password } => {
            let result = async {
                let client = make_client(config)?;
                let resp = client
                    .signup(&CredentialsRequest { username, password })
                    .await
                    .map_err(|e| e.detail())?;
                Ok(resp.username)
            }
            .await;
            CommandResult::Signup(result)
        }

        AsyncCommand::FetchSummary => {
            let result = async {
                let client = session_client.ok_or_else(|| "Not logged in".to_string())?;
                let resp = client.summary().await.map_err(|e| e.detail())?;
                Ok(resp.summary)
            }
            .await;
            CommandResult::Summary(result)
        }
    }
}
