use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courseware::Config;
use courseware::auth::{UserClaims, generate_token};
use courseware::error::AppResult;
use courseware::model::StoreError;
use courseware::model::entity::{Course, LessonKind, ResourceCategory, resource_media_type};
use courseware::web::UserRole;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for course authors and operators", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint a session token signed with the configured secret
    Token {
        #[arg(long, default_value = "learner")]
        role: String,
        /// Subject, a random id when omitted
        #[arg(long)]
        sub: Option<String>,
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },

    /// Check a course document before serving it
    Validate {
        file: PathBuf,
    },

    /// Show how an uploaded file would be typed
    Infer {
        filename: String,
        #[arg(long, default_value = "")]
        mime: String,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    match args.command {
        Commands::Token { role, sub, hours } => {
            let config = Config::get_or_init(true).await;
            let sub = sub.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            let role = UserRole::from(role.as_str());

            let claims = UserClaims::new(&sub, role, chrono::Duration::hours(hours));
            let token = generate_token(claims, config.app().jwt())?;
            println!("{token}");
        }

        Commands::Validate { file } => {
            let bytes = tokio::fs::read(&file).await?;
            let course = Course::from_json(&bytes).map_err(StoreError::from)?;

            let issues = course.validate();
            if issues.is_empty() {
                let lessons: usize = course.modules.iter().map(|m| m.lessons().len()).sum();
                println!(
                    "{}: {} modules, {} lessons, {} resources",
                    file.display(),
                    course.modules.len(),
                    lessons,
                    course.resources.len()
                );
            } else {
                for issue in &issues {
                    eprintln!("{}: {issue}", file.display());
                }
                std::process::exit(1);
            }
        }

        Commands::Infer { filename, mime } => {
            let media_type = resource_media_type(&mime, &filename);
            let kind = LessonKind::from_media_type(&media_type);
            println!("category:   {}", ResourceCategory::from_filename(&filename));
            println!("type:       {media_type}");
            println!("lesson:     {kind} ({})", kind.icon());
        }
    }

    Ok(())
}
