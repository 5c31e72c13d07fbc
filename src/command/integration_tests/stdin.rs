use std::time::Duration;

use crate::command::{
    channel::ProcessChannel,
    config::CommandConfig,
    executable::ExecutableCommand,
    integration_tests::helper::{sh, within},
    plain::PlainCommand,
};

#[tokio::test]
async fn answers_prompt_from_stdout_hook() {
    let script = "printf 'Password: '; read pw; echo \"got $pw\"";
    let output = within(
        ProcessChannel::new(sh(script))
            .handle_stdout(|chunk| {
                if chunk.ends_with(b"Password: ") {
                    return Ok(Some(b"hunter2\n".to_vec()));
                }
                Ok(None)
            })
            .exec(),
    )
    .await
    .unwrap();

    assert_eq!(output.stdout_text(), "Password: got hunter2\n");
}

#[tokio::test]
async fn answers_prompt_from_stderr_hook() {
    let script = "printf 'Unlock vault? ' >&2; read answer; echo \"answer=$answer\"";
    let output = within(
        ProcessChannel::new(sh(script))
            .handle_stderr(|chunk| {
                if chunk.ends_with(b"? ") {
                    return Ok(Some(b"yes\n".to_vec()));
                }
                Ok(None)
            })
            .exec(),
    )
    .await
    .unwrap();

    assert_eq!(output.lines()[0], "answer=yes");
    assert_eq!(output.stderr_text(), "Unlock vault? ");
}

#[tokio::test]
async fn write_before_exec_is_delivered() {
    let channel = ProcessChannel::new(sh("read line; echo \"[$line]\""));
    channel.write("queued early\n");
    let output = within(channel.exec()).await.unwrap();
    assert_eq!(output.lines()[0], "[queued early]");
}

#[tokio::test]
async fn close_stdin_ends_input() {
    let channel = ProcessChannel::new(CommandConfig::new("/bin/cat"));
    channel.write("all of it");
    channel.close_stdin();
    channel.close_stdin();
    let output = within(channel.exec()).await.unwrap();
    assert_eq!(output.stdout_text(), "all of it");
}

#[tokio::test]
async fn stdin_handle_writes_while_running() {
    let channel = ProcessChannel::new(CommandConfig::new("/bin/cat"));
    let handle = channel.stdin_handle();
    let task = tokio::spawn(channel.exec());

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.write("from another task\n");
    handle.close();

    let output = within(task).await.unwrap().unwrap();
    assert_eq!(output.stdout_text(), "from another task\n");
}

#[tokio::test]
async fn write_after_exit_is_a_noop() {
    let channel = ProcessChannel::new(sh("exit 0"));
    let handle = channel.stdin_handle();
    within(channel.exec()).await.unwrap();

    assert!(handle.is_closed());
    handle.write("too late");
    handle.close();
}

#[tokio::test]
async fn plain_command_writes_payload() {
    let command = PlainCommand::new(CommandConfig::new("/bin/cat")).stdin("secret\n");
    let output = within(command.exec()).await.unwrap();
    assert_eq!(output.lines(), vec!["secret", ""]);
}

#[tokio::test]
async fn plain_command_is_reusable() {
    let command = PlainCommand::new(sh("echo run"));
    for _ in 0..3 {
        let output = within(command.exec()).await.unwrap();
        assert_eq!(output.lines()[0], "run");
    }
}

#[tokio::test]
async fn plain_command_can_keep_stdin_open() {
    let command = PlainCommand::new(sh("read first; echo \"$first\"; exit 0"))
        .stdin("hello\n")
        .keep_stdin_open();
    let output = within(command.exec()).await.unwrap();
    assert_eq!(output.lines()[0], "hello");
}
