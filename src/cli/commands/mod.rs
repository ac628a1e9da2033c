pub mod logging;
pub mod secret;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_HASH_PASSWORD: &str = "hash-password";
pub const CMD_VERIFY_PASSWORD: &str = "verify-password";
pub const CMD_ISSUE_TOKEN: &str = "issue-token";
pub const CMD_VERIFY_TOKEN: &str = "verify-token";
pub const CMD_GENERATE_API_KEY: &str = "generate-api-key";
pub const CMD_API_KEY_DIGEST: &str = "api-key-digest";

pub const ARG_STORED: &str = "stored";
pub const ARG_SUBJECT: &str = "subject";
pub const ARG_EMAIL: &str = "email";
pub const ARG_TYPE: &str = "type";
pub const ARG_TOKEN: &str = "token";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("faq-auth")
        .about("Credential tooling for the FAQ admin backend")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_HASH_PASSWORD)
                .about("Read a password from stdin and print its stored digest"),
        )
        .subcommand(
            Command::new(CMD_VERIFY_PASSWORD)
                .about("Read a password from stdin and check it against a stored digest")
                .arg(
                    Arg::new(ARG_STORED)
                        .long(ARG_STORED)
                        .help("Stored digest, <32 hex>:<128 hex>")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_ISSUE_TOKEN)
                .about("Issue an access token, a refresh token, or both")
                .arg(
                    Arg::new(ARG_SUBJECT)
                        .long(ARG_SUBJECT)
                        .help("User id placed in the `sub` claim")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_EMAIL)
                        .long(ARG_EMAIL)
                        .help("User email placed in the `email` claim")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_TYPE)
                        .long(ARG_TYPE)
                        .help("Token type to issue")
                        .default_value("access")
                        .value_parser(["access", "refresh", "pair"]),
                ),
        )
        .subcommand(
            Command::new(CMD_VERIFY_TOKEN)
                .about("Verify a token and print its payload")
                .arg(
                    Arg::new(ARG_TYPE)
                        .long(ARG_TYPE)
                        .help("Expected token type")
                        .default_value("access")
                        .value_parser(["access", "refresh"]),
                )
                .arg(Arg::new(ARG_TOKEN).help("Token to verify").required(true)),
        )
        .subcommand(
            Command::new(CMD_GENERATE_API_KEY)
                .about("Generate an API key; the secret is printed once"),
        )
        .subcommand(
            Command::new(CMD_API_KEY_DIGEST)
                .about("Read an API key from stdin and print its lookup digest"),
        );

    let command = secret::with_args(command);
    logging::with_args(command)
}
