//! Account commands: register, login, logout and password recovery

use std::io::{self, BufRead};

use dialoguer::Password;

use tracing::info;

use super::card::or_default;
use super::Command;
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success, OutputStyle};

/// Auth command action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Register { email: String, password: Option<String> },
    Login { email: String, password: Option<String> },
    Logout,
    WhoAmI,
    ForgotPassword { email: String },
    ResetPassword { token: String, new_password: Option<String> },
}

/// Auth command handler
pub struct AuthCommand {
    action: AuthAction,
}

impl AuthCommand {
    pub fn new(action: AuthAction) -> Self {
        Self { action }
    }
}

#[async_trait::async_trait]
impl Command for AuthCommand {
    async fn execute(&self, ctx: &AppContext) -> CliResult<()> {
        match &self.action {
            AuthAction::Register { email, password } => {
                let password = password_or_prompt(password.as_deref(), "Password")?;
                let response = ctx.backend.register(email, &password).await?;
                print_success(&or_default(response.message, "Account created"));
                print_info("Log in with 'manavault login <email>'");
            }
            AuthAction::Login { email, password } => {
                let password = password_or_prompt(password.as_deref(), "Password")?;
                let token = ctx.backend.login(email, &password).await?;
                ctx.sessions.save(&token)?;
                print_success(&format!("Logged in as {}", email.trim()));
            }
            AuthAction::Logout => {
                if ctx.sessions.clear()? {
                    info!("Logged out");
                    print_success("Logged out");
                } else {
                    print_info("No stored session");
                }
            }
            AuthAction::WhoAmI => {
                let profile = ctx.backend.me().await?;
                let style = OutputStyle::default();
                println!("{}", style.key_value("Email", &profile.email));
            }
            AuthAction::ForgotPassword { email } => {
                let response = ctx.backend.forgot_password(email).await?;
                print_success(&or_default(
                    response.message,
                    "If the account exists, a reset link was sent",
                ));
            }
            AuthAction::ResetPassword {
                token,
                new_password,
            } => {
                let new_password = password_or_prompt(new_password.as_deref(), "New password")?;
                let response = ctx.backend.reset_password(token, &new_password).await?;
                print_success(&or_default(response.message, "Password updated"));
            }
        }
        Ok(())
    }
}

/// Use the given password, ask for it without echo on a terminal, or read
/// one line from piped stdin
fn password_or_prompt(given: Option<&str>, prompt: &str) -> CliResult<String> {
    if let Some(password) = given {
        return Ok(password.to_string());
    }

    if atty::is(atty::Stream::Stdin) {
        return Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| CliError::InvalidArgument {
                message: format!("could not read password: {}", e),
            });
    }
    read_password(io::stdin().lock())
}

fn read_password(mut input: impl BufRead) -> CliResult<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::InvalidArgument {
            message: "no password given".to_string(),
        });
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_password_keeps_spaces() {
        let password = read_password(" hunter2 \n".as_bytes()).unwrap();
        assert_eq!(password, " hunter2 ");
    }

    #[test]
    fn test_read_password_windows_newline() {
        assert_eq!(read_password("pw\r\n".as_bytes()).unwrap(), "pw");
    }

    #[test]
    fn test_read_password_eof() {
        assert!(matches!(
            read_password("".as_bytes()),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_given_password_wins() {
        assert_eq!(password_or_prompt(Some("pw"), "Password").unwrap(), "pw");
    }
}
