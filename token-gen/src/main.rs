use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use posts_api::services::auth::{
    Claims, Secret, token_issuer::TokenIssuer, token_validator::TokenValidator,
};

/// Issue or inspect access tokens signed with the API's HMAC secret.
///
/// The secret is read from `--secret`, then `API_SECRET` (a `.env` file is honoured).
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Signing secret. Defaults to API_SECRET.
    #[arg(long, global = true)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mint a token for a user id (valid for one hour)
    Issue {
        #[arg(long)]
        user_id: u32,

        /// Print only the token (no extra lines)
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },
    /// Validate a token and print its subject
    Verify { token: String },
}

fn load_secret(flag: Option<String>) -> Result<Secret> {
    dotenvy::dotenv().ok();
    let raw = match flag {
        Some(s) => s,
        None => std::env::var("API_SECRET").context("API_SECRET is not set")?,
    };
    Ok(Secret::new(raw)?)
}

fn print_claims(claims: &Claims) {
    println!("user_id: {}", claims.user_id);
    println!("authorized: {}", claims.authorized);
    match claims.expires_at() {
        Some(at) => println!("exp: {} ({})", claims.exp, at.to_rfc3339()),
        None => println!("exp: {}", claims.exp),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let secret = load_secret(args.secret)?;

    match args.command {
        Command::Issue { user_id, quiet } => {
            let issued_at = chrono::Utc::now();
            let token = TokenIssuer::new(&secret).create_token_at(user_id, issued_at)?;

            if quiet {
                println!("{}", token);
                return Ok(());
            }

            println!("token: {}", token);
            print_claims(&Claims::new(user_id, issued_at));
            println!("header: Authorization: Bearer {}", token);
            println!("note: send with ?token=<any> unless AUTH_REQUIRE_TOKEN_QUERY=false");
        }
        Command::Verify { token } => match TokenValidator::new(&secret).verify_claims(&token) {
            Ok(claims) => print_claims(&claims),
            Err(e) => bail!("rejected: {}", e),
        },
    }

    Ok(())
}
