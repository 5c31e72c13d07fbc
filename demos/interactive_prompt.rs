//! Example: Answer a password prompt from a stdout hook
use secretcmd::command::{channel::ProcessChannel, config::CommandConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CommandConfig::new("/bin/sh").args([
        "-c",
        "printf 'Master password: '; read pw; echo \"unlocked with ${#pw} characters\" >&2",
    ]);

    let channel = ProcessChannel::new(config)
        .on_launch(|| println!("Process started"))
        .handle_stdout(|chunk| {
            print!("Prompt: {}", String::from_utf8_lossy(chunk));
            if chunk.ends_with(b"password: ") {
                return Ok(Some(b"correct horse battery staple\n".to_vec()));
            }
            Ok(None)
        })
        .handle_stderr(|chunk| {
            print!("Stderr: {}", String::from_utf8_lossy(chunk));
            Ok(None)
        })
        .handle_termination(|code, reason| {
            println!("Stopped: {}, reason: {:?}", code, reason);
            Ok(())
        });

    let output = channel.exec().await?;
    println!("Captured stderr: {}", output.stderr_text().trim_end());
    Ok(())
}
