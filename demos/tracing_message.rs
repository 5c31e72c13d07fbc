//! Example: Print tracing messages while a recipe runs
use secretcmd::{
    command::{config::CommandConfig, error::CommandError, plain::PlainCommand},
    recipe::{Recipe, command::CommandRecipe, retry::RetryPolicy},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let recipe = CommandRecipe::new(
        |word: &String| {
            Ok(PlainCommand::new(
                CommandConfig::new("/bin/sh").args(["-c", "echo \"$1\"", "sh", word.as_str()]),
            ))
        },
        |output| {
            if !output.success() {
                return Err(CommandError::failed(output.exit_code, &output.stderr));
            }
            Ok(output.lines()[0].clone())
        },
    )
    .retry_policy(RetryPolicy::limited(2));

    let line = recipe.transform("Hello!".to_string()).await?;
    println!("Output: {}", line);
    Ok(())
}
