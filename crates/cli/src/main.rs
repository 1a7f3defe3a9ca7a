//! Command-line front-end for the quiz-generation product: sign-in,
//! dashboard listing, job creation with status polling, quiz review,
//! question editing and regeneration, and deletion.

mod config;
mod session_store;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use quizmaker_client::{AuthClient, AuthConfig, QuizApi, SessionContext};
use quizmaker_core::answer::AnswerOption;
use quizmaker_db::models::VideoWithQuestions;
use quizmaker_workflows::create::{self, PgVideoSource, StatusPoller, PollOutcome};
use quizmaker_workflows::{dashboard, review, QuestionEdit};

use config::AppConfig;

#[derive(Parser)]
#[command(name = "quizmaker")]
#[command(about = "Turn a video URL into an editable multiple-choice quiz")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session locally.
    Login {
        email: String,
        /// Read from the terminal when omitted.
        #[arg(long, env = "QUIZMAKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Register a new account.
    Signup {
        email: String,
        #[arg(long, env = "QUIZMAKER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Where the confirmation email should land the user.
        #[arg(long, default_value = "http://localhost:5173/auth/callback")]
        redirect_to: String,
    },
    /// Resend the signup confirmation email.
    Resend { email: String },
    /// Revoke and forget the stored session.
    Logout,
    /// Show the signed-in user, validating the session with the
    /// provider.
    Whoami,
    /// List your quizzes, newest first.
    List,
    /// Submit a video URL and poll until the quiz is ready.
    Create { url: String },
    /// Show a quiz with its segments and questions.
    Show { video_id: Uuid },
    /// Delete a quiz and everything under it.
    Delete {
        video_id: Uuid,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Edit one question's fields in place.
    EditQuestion {
        video_id: Uuid,
        question_id: Uuid,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        option_a: Option<String>,
        #[arg(long)]
        option_b: Option<String>,
        #[arg(long)]
        option_c: Option<String>,
        #[arg(long)]
        option_d: Option<String>,
        /// One of A, B, C, D.
        #[arg(long)]
        answer: Option<String>,
    },
    /// Regenerate one question from its segment's content.
    Regenerate { video_id: Uuid, question_id: Uuid },
}

impl Command {
    /// Everything except the pre-auth commands needs a stored session,
    /// the login-redirect analogue of the web client.
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::Signup { .. }
                | Command::Resend { .. }
                | Command::Logout
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizmaker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    if cli.command.requires_session() {
        session_store::require()?;
    }

    match cli.command {
        Command::Login { email, password } => login(&config, &email, password).await,
        Command::Signup {
            email,
            password,
            redirect_to,
        } => signup(&config, &email, password, &redirect_to).await,
        Command::Resend { email } => resend(&config, &email).await,
        Command::Logout => logout(&config).await,
        Command::Whoami => whoami(&config).await,
        Command::List => list(&config).await,
        Command::Create { url } => create_quiz(&config, &url).await,
        Command::Show { video_id } => show(&config, video_id).await,
        Command::Delete { video_id, yes } => delete(&config, video_id, yes).await,
        Command::EditQuestion {
            video_id,
            question_id,
            text,
            option_a,
            option_b,
            option_c,
            option_d,
            answer,
        } => {
            edit_question(
                &config,
                video_id,
                question_id,
                text,
                [option_a, option_b, option_c, option_d],
                answer,
            )
            .await
        }
        Command::Regenerate {
            video_id,
            question_id,
        } => regenerate(&config, video_id, question_id).await,
    }
}

fn auth_client(config: &AppConfig) -> AuthClient {
    AuthClient::new(AuthConfig {
        url: config.auth_url.clone(),
        anon_key: config.auth_anon_key.clone(),
    })
}

async fn connect(config: &AppConfig) -> Result<quizmaker_db::DbPool> {
    let pool = quizmaker_db::create_pool(&config.database_url)
        .await
        .context("Connecting to the quiz store")?;
    quizmaker_db::health_check(&pool)
        .await
        .context("Quiz store did not answer a connectivity check")?;
    Ok(pool)
}

/// Ask for the password on the terminal when it was not supplied.
fn resolve_password(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn login(config: &AppConfig, email: &str, password: Option<String>) -> Result<()> {
    let password = resolve_password(password)?;
    let session = auth_client(config).sign_in(email, &password).await?;
    let ctx = SessionContext::from(session);
    session_store::save(&ctx)?;
    println!("Signed in as {}", ctx.email.as_deref().unwrap_or(email));
    Ok(())
}

async fn signup(
    config: &AppConfig,
    email: &str,
    password: Option<String>,
    redirect_to: &str,
) -> Result<()> {
    let password = resolve_password(password)?;
    let session = auth_client(config)
        .sign_up(email, &password, redirect_to)
        .await?;

    if session.access_token.is_empty() {
        println!("Account created. Check your email to confirm it, then sign in.");
        return Ok(());
    }
    let ctx = SessionContext::from(session);
    session_store::save(&ctx)?;
    println!("Signed up and signed in as {email}");
    Ok(())
}

async fn resend(config: &AppConfig, email: &str) -> Result<()> {
    auth_client(config).resend_verification_email(email).await?;
    println!("Confirmation email sent to {email}.");
    Ok(())
}

async fn logout(config: &AppConfig) -> Result<()> {
    if let Some(session) = session_store::load()? {
        // Best effort: forget the local session even if the provider
        // call fails.
        if let Err(e) = auth_client(config).sign_out(&session.access_token).await {
            tracing::warn!(error = %e, "Sign-out call failed");
        }
    }
    session_store::clear()?;
    println!("Signed out.");
    Ok(())
}

async fn whoami(config: &AppConfig) -> Result<()> {
    let session = session_store::require()?;
    let user = auth_client(config).get_user(&session.access_token).await?;
    println!("{}  {}", user.id, user.email.as_deref().unwrap_or("(no email)"));
    Ok(())
}

async fn list(config: &AppConfig) -> Result<()> {
    let session = session_store::require()?;
    let pool = connect(config).await?;

    let videos = dashboard::list(&pool, &session).await?;
    if videos.is_empty() {
        println!("No quizzes yet. Create your first quiz: quizmaker create <url>");
        return Ok(());
    }
    for video in videos {
        println!(
            "{}  {:<20}  {}  {}",
            video.id,
            video.status,
            video.created_at.format("%Y-%m-%d %H:%M"),
            video.title
        );
    }
    Ok(())
}

async fn create_quiz(config: &AppConfig, url: &str) -> Result<()> {
    let session = session_store::require()?;
    let api = QuizApi::new(config.api_base_url.clone());

    let video = create::submit(&api, &session, url).await?;
    println!("Created job {} ({})", video.id, video.title);

    let pool = connect(config).await?;
    let poller = StatusPoller::new(PgVideoSource::new(pool)).with_interval(config.poll_interval);

    // Ctrl-C tears the poller down; the job keeps running server-side.
    let cancel = poller.cancellation_token();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel.cancel();
    });

    let mut last_label = String::new();
    let outcome = poller
        .run(video.id, |label| {
            if label != last_label {
                println!("{label}");
                last_label = label.to_string();
            }
        })
        .await?;

    match outcome {
        PollOutcome::Completed(video) => {
            println!("Quiz ready: quizmaker show {}", video.id);
            Ok(())
        }
        PollOutcome::Failed { message } => bail!(message),
        PollOutcome::Cancelled => {
            println!("Stopped watching. Check later with: quizmaker list");
            Ok(())
        }
    }
}

async fn show(config: &AppConfig, video_id: Uuid) -> Result<()> {
    let pool = connect(config).await?;
    let tree = review::load(&pool, video_id).await?;
    render(&tree);
    Ok(())
}

async fn delete(config: &AppConfig, video_id: Uuid, yes: bool) -> Result<()> {
    if !yes && !confirm("Are you sure you want to delete this quiz?")? {
        println!("Kept.");
        return Ok(());
    }
    let pool = connect(config).await?;
    dashboard::remove(&pool, video_id).await?;
    println!("Deleted {video_id}");
    Ok(())
}

async fn edit_question(
    config: &AppConfig,
    video_id: Uuid,
    question_id: Uuid,
    text: Option<String>,
    options: [Option<String>; 4],
    answer: Option<String>,
) -> Result<()> {
    let pool = connect(config).await?;

    let tree = review::load(&pool, video_id).await?;
    let question = tree
        .segments
        .iter()
        .flat_map(|s| s.questions.iter())
        .find(|q| q.id == question_id)
        .with_context(|| format!("No question {question_id} in this quiz"))?;

    // Seed the form with current values, then apply the overrides.
    let mut edit = QuestionEdit::seeded_from(question);
    let [option_a, option_b, option_c, option_d] = options;
    if let Some(text) = text {
        edit.question_text = text;
    }
    if let Some(a) = option_a {
        edit.option_a = a;
    }
    if let Some(b) = option_b {
        edit.option_b = b;
    }
    if let Some(c) = option_c {
        edit.option_c = c;
    }
    if let Some(d) = option_d {
        edit.option_d = d;
    }
    if let Some(answer) = answer {
        edit.correct_answer = answer;
    }

    let tree = review::save_question(&pool, video_id, question_id, edit).await?;
    println!("Saved.");
    render(&tree);
    Ok(())
}

async fn regenerate(config: &AppConfig, video_id: Uuid, question_id: Uuid) -> Result<()> {
    let session = session_store::require()?;
    let api = QuizApi::new(config.api_base_url.clone());
    let pool = connect(config).await?;

    let mut tree = review::load(&pool, video_id).await?;
    review::regenerate_question(&api, &session, &mut tree, question_id).await?;
    println!("Regenerated.");
    render(&tree);
    Ok(())
}

/// Print the quiz the way the review page lays it out.
fn render(tree: &VideoWithQuestions) {
    println!("{}  [{}]", tree.video.title, tree.video.status);
    if let Some(message) = &tree.video.error_message {
        println!("error: {message}");
    }

    for (index, segment) in tree.segments.iter().enumerate() {
        println!("\nSegment {}", index + 1);
        println!("  {}", segment.segment.content);

        for question in &segment.questions {
            println!("\n  {}  (id {})", question.question_text, question.id);
            for option in AnswerOption::ALL {
                let marker = if question.correct_answer == option.as_str() {
                    "  (correct)"
                } else {
                    ""
                };
                println!("    {}. {}{}", option, question.option_text(option), marker);
            }
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre_auth_commands_skip_the_session_gate() {
        assert!(!Command::Login {
            email: "user@example.com".into(),
            password: None,
        }
        .requires_session());
        assert!(!Command::Signup {
            email: "user@example.com".into(),
            password: None,
            redirect_to: "http://localhost:5173/auth/callback".into(),
        }
        .requires_session());
        assert!(!Command::Resend {
            email: "user@example.com".into(),
        }
        .requires_session());
        assert!(!Command::Logout.requires_session());
    }

    #[test]
    fn data_commands_require_a_session() {
        let id = Uuid::new_v4();
        for command in [
            Command::Whoami,
            Command::List,
            Command::Create { url: "u".into() },
            Command::Show { video_id: id },
            Command::Delete {
                video_id: id,
                yes: true,
            },
            Command::Regenerate {
                video_id: id,
                question_id: id,
            },
            Command::EditQuestion {
                video_id: id,
                question_id: id,
                text: None,
                option_a: None,
                option_b: None,
                option_c: None,
                option_d: None,
                answer: None,
            },
        ] {
            assert!(command.requires_session());
        }
    }
}
